//! 설정 관리.
//!
//! 기본값 → `config/default.toml`(선택) → `RADAR__SECTION__KEY` 환경변수 순으로
//! 덮어써서 [`AppConfig`]를 만듭니다.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::RadarResult;

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 다나와 수집 설정
    #[serde(default)]
    pub danawa: DanawaConfig,
    /// 응답 캐시 설정
    #[serde(default)]
    pub cache: CacheConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
    /// 화면 필터 기본값
    #[serde(default)]
    pub filter: FilterConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
    /// 요청 타임아웃 (초)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// 다나와 실데이터 수집 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DanawaConfig {
    /// 실데이터 수집 사용 여부 (false면 합성 데이터만 사용)
    pub enabled: bool,
    /// 기본 URL
    pub base_url: String,
    /// HTTP 타임아웃 (초)
    pub timeout_secs: u64,
    /// User-Agent 헤더
    pub user_agent: String,
}

impl Default for DanawaConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://auto.danawa.com".to_string(),
            timeout_secs: 10,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36"
                .to_string(),
        }
    }
}

impl DanawaConfig {
    /// HTTP 타임아웃을 Duration으로 반환
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// 응답 캐시 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// 캐시 TTL (초, 기본 30분)
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_secs: 30 * 60 }
    }
}

impl CacheConfig {
    /// TTL을 Duration으로 반환
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// 화면 필터 기본값.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FilterConfig {
    /// 최소 판매량
    pub min_sales: u64,
    /// 신규 진입 모델 제외 여부
    pub exclude_new_entries: bool,
    /// 최대 표시 개수
    pub limit: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_sales: 300,
            exclude_new_entries: false,
            limit: 20,
        }
    }
}

impl AppConfig {
    /// 파일(선택)과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> RadarResult<Self> {
        let defaults = AppConfig::default();

        let builder = config::Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("danawa.enabled", defaults.danawa.enabled)?
            .set_default("danawa.base_url", defaults.danawa.base_url)?
            .set_default("danawa.timeout_secs", defaults.danawa.timeout_secs)?
            .set_default("danawa.user_agent", defaults.danawa.user_agent)?
            .set_default("cache.ttl_secs", defaults.cache.ttl_secs)?
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.format", defaults.logging.format)?
            .set_default("filter.min_sales", defaults.filter.min_sales)?
            .set_default("filter.exclude_new_entries", defaults.filter.exclude_new_entries)?
            .set_default("filter.limit", defaults.filter.limit as u64)?
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix("RADAR")
                    .separator("__")
                    .try_parsing(true),
            );

        Ok(builder.build()?.try_deserialize()?)
    }

    /// 기본 경로(`config/default.toml`)에서 설정을 로드합니다.
    pub fn load_default() -> RadarResult<Self> {
        Self::load("config/default.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.cache.ttl(), Duration::from_secs(1800));
        assert_eq!(config.filter.min_sales, 300);
        assert_eq!(config.filter.limit, 20);
        assert!(!config.filter.exclude_new_entries);
        assert!(config.danawa.enabled);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = AppConfig::load("does/not/exist.toml").unwrap();
        assert_eq!(config.danawa.base_url, "https://auto.danawa.com");
        assert_eq!(config.cache.ttl_secs, 1800);
    }
}
