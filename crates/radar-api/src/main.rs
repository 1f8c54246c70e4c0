//! 상승 모델 레이더 API 서버.
//!
//! Axum 기반 REST API 서버를 시작합니다.
//! 월 목록, 레이더 순위, 헬스 체크, 메트릭 엔드포인트를 제공합니다.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{http::StatusCode, middleware, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use radar_api::metrics::setup_metrics_recorder;
use radar_api::middleware::metrics_layer;
use radar_api::openapi::openapi_router;
use radar_api::routes::create_api_router;
use radar_api::state::AppState;
use radar_core::logging::{init_logging, LogConfig, LogFormat};
use radar_core::AppConfig;
use radar_data::RadarService;

/// 바인딩 주소 결정.
///
/// `API_HOST`, `API_PORT` 환경변수가 있으면 설정 파일 값보다 우선합니다.
fn socket_addr(config: &AppConfig) -> Result<SocketAddr, std::net::AddrParseError> {
    let host = std::env::var("API_HOST").unwrap_or_else(|_| config.server.host.clone());
    let port = std::env::var("API_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(config.server.port);

    format!("{}:{}", host, port).parse()
}

/// 설정과 환경변수로 로깅 초기화.
///
/// `RUST_LOG`, `LOG_FORMAT`이 있으면 설정 파일 값보다 우선합니다.
fn setup_logging(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let level = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        format!(
            "radar_api={0},radar_data={0},radar_core={0},tower_http=info",
            config.logging.level
        )
    });
    let format = std::env::var("LOG_FORMAT")
        .ok()
        .or_else(|| Some(config.logging.format.clone()))
        .and_then(|s| s.parse::<LogFormat>().ok())
        .unwrap_or_default();

    init_logging(LogConfig::new(level).with_format(format))
}

/// CORS 미들웨어 구성.
///
/// CORS_ORIGINS 환경변수가 설정되어 있으면 해당 origin만 허용합니다.
/// 설정되지 않으면 모든 origin을 허용합니다.
///
/// # 환경변수
///
/// - `CORS_ORIGINS`: 쉼표로 구분된 허용 origin 목록
///   예: `https://radar.example.com,https://admin.example.com`
fn cors_layer() -> CorsLayer {
    let allow_origin = match std::env::var("CORS_ORIGINS") {
        Ok(origins) if !origins.is_empty() => {
            let origins: Vec<_> = origins
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();

            if origins.is_empty() {
                warn!("CORS_ORIGINS is set but contains no valid origins, allowing any");
                AllowOrigin::any()
            } else {
                info!("CORS configured with {} allowed origins", origins.len());
                AllowOrigin::list(origins)
            }
        }
        _ => AllowOrigin::any(),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        // 읽기 전용 API
        .allow_methods([axum::http::Method::GET, axum::http::Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        // preflight 요청 캐시 시간
        .max_age(Duration::from_secs(3600))
}

/// /metrics 엔드포인트 핸들러.
async fn metrics_handler(
    axum::extract::State(handle): axum::extract::State<PrometheusHandle>,
) -> String {
    handle.render()
}

/// 전체 라우터 생성.
fn create_router(
    state: Arc<AppState>,
    metrics_handle: PrometheusHandle,
    request_timeout: Duration,
) -> Router {
    // 메트릭 라우터 (별도 상태)
    let metrics_router = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metrics_handle);

    Router::new()
        .merge(metrics_router)
        .merge(create_api_router().with_state(state))
        .merge(openapi_router())
        // 메트릭 미들웨어 (모든 요청에 적용)
        .layer(middleware::from_fn(metrics_layer))
        .layer(TraceLayer::new_for_http())
        // 전역 타임아웃 - 408 상태 코드 반환
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(cors_layer())
}

/// OpenAPI 스펙 내보내기 처리.
///
/// `--export-openapi` 플래그 또는 `EXPORT_OPENAPI` 환경변수가 설정된 경우
/// OpenAPI JSON 스펙을 stdout으로 출력하고 `true`를 반환합니다.
fn handle_export_openapi() -> Result<bool, Box<dyn std::error::Error>> {
    use radar_api::openapi::ApiDoc;
    use utoipa::OpenApi as _;

    let export_flag = std::env::args().any(|arg| arg == "--export-openapi");
    let export_env = std::env::var("EXPORT_OPENAPI")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    if export_flag || export_env {
        let json = serde_json::to_string_pretty(&ApiDoc::openapi())?;
        println!("{}", json);
        return Ok(true);
    }

    Ok(false)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    // OpenAPI 내보내기 처리 (서버 시작 전)
    if handle_export_openapi()? {
        return Ok(());
    }

    let config = AppConfig::load_default()?;
    setup_logging(&config)?;

    info!("Starting Rising Radar API server...");

    // Prometheus 메트릭 레코더 설정
    let metrics_handle = setup_metrics_recorder()?;
    info!("Prometheus metrics recorder initialized");

    let addr = socket_addr(&config).map_err(|e| {
        error!(
            host = %config.server.host,
            port = config.server.port,
            error = %e,
            "소켓 주소 설정이 유효하지 않습니다. API_HOST, API_PORT 환경변수를 확인하세요."
        );
        e
    })?;

    let radar = RadarService::from_config(&config)?;
    let state = Arc::new(AppState::new(radar));
    info!(
        version = %state.version,
        provider = %state.radar.provider_mode(),
        cache_ttl_secs = config.cache.ttl_secs,
        "Application state initialized"
    );

    let app = create_router(
        state,
        metrics_handle,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    info!(%addr, "API server listening");
    info!("OpenAPI spec at http://{}/api-docs/openapi.json", addr);
    info!("Metrics available at http://{}/metrics", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");

    Ok(())
}

/// Graceful shutdown 시그널 대기.
///
/// Ctrl+C 또는 SIGTERM 시그널을 수신하면 반환합니다.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
