//! tracing 기반 로깅 초기화.
//!
//! API 서버와 CLI가 같은 방식으로 구독자를 설치하도록 공통 진입점을 제공합니다.
//! - **pretty**: 개발용 컬러 출력
//! - **json**: 로그 수집기용 JSON 출력
//! - **compact**: 한 줄 출력

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 로그 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 사람이 읽기 쉬운 형식 (개발용)
    #[default]
    Pretty,
    /// JSON 형식 (운영용)
    Json,
    /// 간결한 한 줄 형식
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// 필터 지시어 (예: "info", "radar_api=debug,tower_http=info")
    pub level: String,
    /// 출력 형식
    pub format: LogFormat,
    /// 파일명/줄 번호 포함 여부
    pub with_file: bool,
    /// 대상 모듈 경로 포함 여부
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            with_file: false,
            with_target: true,
        }
    }
}

impl LogConfig {
    /// 레벨을 지정해 설정을 생성합니다.
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            ..Default::default()
        }
    }

    /// 로그 형식을 설정합니다.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// 파일명/줄 번호 출력을 설정합니다.
    pub fn with_file(mut self, enabled: bool) -> Self {
        self.with_file = enabled;
        self
    }

    /// `RUST_LOG`, `LOG_FORMAT` 환경변수에서 설정을 만듭니다.
    ///
    /// `RUST_LOG`가 없으면 `default_level`을 사용합니다.
    pub fn from_env(default_level: &str) -> Self {
        let level = std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.to_string());
        let format = std::env::var("LOG_FORMAT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();

        Self {
            level,
            format,
            ..Default::default()
        }
    }
}

/// 주어진 설정으로 전역 구독자를 설치합니다.
///
/// 이미 구독자가 설치되어 있으면 에러를 반환합니다.
///
/// ```no_run
/// use radar_core::logging::{init_logging, LogConfig, LogFormat};
///
/// init_logging(LogConfig::new("radar_api=debug").with_format(LogFormat::Json)).unwrap();
/// ```
pub fn init_logging(config: LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_new(&config.level)?;
    let registry = tracing_subscriber::registry().with(env_filter);

    match config.format {
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_file(config.with_file)
                    .with_line_number(config.with_file)
                    .with_target(config.with_target),
            )
            .try_init()?,
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_file(config.with_file)
                    .with_line_number(config.with_file)
                    .with_target(config.with_target),
            )
            .try_init()?,
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_file(config.with_file)
                    .with_line_number(config.with_file)
                    .with_target(config.with_target),
            )
            .try_init()?,
    }

    tracing::info!(format = ?config.format, level = %config.level, "Logging initialized");
    Ok(())
}

/// 환경변수 기반 초기화 (`RUST_LOG`, `LOG_FORMAT`).
pub fn init_logging_from_env(default_level: &str) -> Result<(), Box<dyn std::error::Error>> {
    init_logging(LogConfig::from_env(default_level))
}

/// 국가/월 컨텍스트가 포함된 span을 생성하는 매크로.
#[macro_export]
macro_rules! radar_span {
    ($name:expr, $nation:expr, $month:expr) => {
        tracing::info_span!($name, nation = %$nation, month = %$month)
    };
}
