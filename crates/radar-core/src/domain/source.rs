//! 다나와 월간 판매 실적 페이지 URL.

use super::{Month, Nation};

/// 다나와 자동차 기본 URL.
pub const DEFAULT_SOURCE_BASE: &str = "https://auto.danawa.com";

/// 국가/월의 판매 실적 페이지 URL을 만듭니다.
///
/// `base`는 끝에 `/`가 있어도 됩니다.
pub fn source_url(base: &str, nation: Nation, month: &Month) -> String {
    format!(
        "{}/auto/?Month={}-00&Nation={}&Tab=Model&Work=record",
        base.trim_end_matches('/'),
        month,
        nation.source_param()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_url() {
        let month = Month::parse("2025-03").unwrap();
        assert_eq!(
            source_url(DEFAULT_SOURCE_BASE, Nation::Import, &month),
            "https://auto.danawa.com/auto/?Month=2025-03-00&Nation=export&Tab=Model&Work=record"
        );
        assert_eq!(
            source_url("http://127.0.0.1:1234/", Nation::Domestic, &month),
            "http://127.0.0.1:1234/auto/?Month=2025-03-00&Nation=domestic&Tab=Model&Work=record"
        );
    }
}
