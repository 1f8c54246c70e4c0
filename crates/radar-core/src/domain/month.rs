//! 집계 월 ("YYYY-MM").

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{RadarError, RadarResult};

/// 선택 가능한 월 개수.
pub const AVAILABLE_MONTH_COUNT: u32 = 12;

/// 검증된 집계 월.
///
/// 형식만 검사합니다 (`^\d{4}-\d{2}$`). 월 번호의 범위(01~12)는 검사하지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Month(String);

impl Month {
    /// 문자열을 검증하여 Month를 생성합니다.
    pub fn parse(s: &str) -> RadarResult<Self> {
        let bytes = s.as_bytes();
        let well_formed = bytes.len() == 7
            && bytes[..4].iter().all(u8::is_ascii_digit)
            && bytes[4] == b'-'
            && bytes[5..].iter().all(u8::is_ascii_digit);

        if well_formed {
            Ok(Self(s.to_string()))
        } else {
            Err(RadarError::InvalidMonth(s.to_string()))
        }
    }

    /// 날짜가 속한 월.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(format!("{:04}-{:02}", date.year(), date.month()))
    }

    /// 문자열 표현.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// (연도, 월 번호) 숫자 구성요소.
    pub fn seed_components(&self) -> (u32, u32) {
        (digits(&self.0[..4]), digits(&self.0[5..]))
    }

    /// 구성요소 합 (합성 데이터 시드 기준값).
    pub fn component_sum(&self) -> u32 {
        let (year, month) = self.seed_components();
        year + month
    }
}

fn digits(s: &str) -> u32 {
    s.bytes().fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Month {
    type Err = RadarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Month {
    type Error = RadarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Month> for String {
    fn from(month: Month) -> Self {
        month.0
    }
}

/// `today`로부터 `months_back`개월 전의 월.
fn months_before(today: NaiveDate, months_back: u32) -> Month {
    let index = today.year() * 12 + today.month0() as i32 - months_back as i32;
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) + 1;
    Month(format!("{:04}-{:02}", year, month))
}

/// 선택 가능한 월 목록 (1~12개월 전, 가까운 월부터).
pub fn available_months(today: NaiveDate) -> Vec<Month> {
    (1..=AVAILABLE_MONTH_COUNT)
        .map(|back| months_before(today, back))
        .collect()
}

/// 최신 집계 월 (지난달).
pub fn latest_month(today: NaiveDate) -> Month {
    months_before(today, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let month = Month::parse("2025-03").unwrap();
        assert_eq!(month.as_str(), "2025-03");
        assert_eq!(month.seed_components(), (2025, 3));
        assert_eq!(month.component_sum(), 2028);
    }

    #[test]
    fn test_parse_invalid() {
        for input in ["13-1", "2025-3", "2025/03", "202503", "2025-03-01", "abcd-ef", ""] {
            assert!(Month::parse(input).is_err(), "{} should be rejected", input);
        }
    }

    #[test]
    fn test_pattern_only_validation() {
        // 형식만 검사하므로 13월도 통과
        assert!(Month::parse("2025-13").is_ok());
    }

    #[test]
    fn test_available_months_crosses_year() {
        let today = NaiveDate::from_ymd_opt(2025, 2, 14).unwrap();
        let months: Vec<String> = available_months(today)
            .into_iter()
            .map(String::from)
            .collect();

        assert_eq!(months.len(), 12);
        assert_eq!(months[0], "2025-01");
        assert_eq!(months[1], "2024-12");
        assert_eq!(months[11], "2024-02");
        assert_eq!(latest_month(today).as_str(), "2025-01");
    }

    #[test]
    fn test_serde_roundtrip_validates() {
        let month: Month = serde_json::from_str(r#""2024-11""#).unwrap();
        assert_eq!(month.as_str(), "2024-11");
        assert!(serde_json::from_str::<Month>(r#""2024-1""#).is_err());
    }
}
