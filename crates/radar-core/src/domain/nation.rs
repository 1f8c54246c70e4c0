//! 국산/수입 구분.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RadarError;

/// 판매 집계 구분 (국산차 / 수입차).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Nation {
    /// 국산차
    Domestic,
    /// 수입차
    Import,
}

impl Nation {
    /// 모든 구분.
    pub const ALL: [Nation; 2] = [Nation::Domestic, Nation::Import];

    /// API/캐시 키에 쓰는 문자열.
    pub fn as_str(&self) -> &'static str {
        match self {
            Nation::Domestic => "domestic",
            Nation::Import => "import",
        }
    }

    /// 다나와 URL의 `Nation` 파라미터 값.
    ///
    /// 다나와는 수입차를 `export`로 표기합니다.
    pub fn source_param(&self) -> &'static str {
        match self {
            Nation::Domestic => "domestic",
            Nation::Import => "export",
        }
    }
}

impl fmt::Display for Nation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Nation {
    type Err = RadarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "domestic" => Ok(Nation::Domestic),
            "import" => Ok(Nation::Import),
            other => Err(RadarError::InvalidNation(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nation() {
        assert_eq!("domestic".parse::<Nation>().unwrap(), Nation::Domestic);
        assert_eq!("import".parse::<Nation>().unwrap(), Nation::Import);
        assert!("Import".parse::<Nation>().is_err());
        assert!("export".parse::<Nation>().is_err());
    }

    #[test]
    fn test_source_param() {
        assert_eq!(Nation::Domestic.source_param(), "domestic");
        assert_eq!(Nation::Import.source_param(), "export");
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Nation::Import).unwrap(), r#""import""#);
        let parsed: Nation = serde_json::from_str(r#""domestic""#).unwrap();
        assert_eq!(parsed, Nation::Domestic);
    }
}
