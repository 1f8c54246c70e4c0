//! Prometheus 메트릭 설정 및 유틸리티.
//!
//! HTTP 요청 메트릭과 레이더 서비스 메트릭을 `/metrics` 엔드포인트로 노출합니다.

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};
use radar_core::Nation;

/// Prometheus 메트릭 레코더를 설정하고 핸들을 반환합니다.
///
/// 레코더가 이미 설치되어 있으면 에러를 반환합니다.
pub fn setup_metrics_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new()
        // HTTP 요청 지속 시간 히스토그램 버킷 설정
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0],
        )?
        .install_recorder()?;

    describe_metrics();
    Ok(handle)
}

/// 메트릭 설명 등록.
fn describe_metrics() {
    describe_counter!("http_requests_total", "Total HTTP requests");
    describe_counter!("http_responses_total", "Total HTTP responses by status");
    describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_counter!(
        "radar_requests_total",
        "Radar lookups by nation and status"
    );
    describe_counter!("radar_cache_hits_total", "Radar response cache hits");
    describe_counter!("radar_cache_misses_total", "Radar response cache misses");
    describe_counter!(
        "radar_provider_fallback_total",
        "Live fetch failures recovered with synthetic data"
    );
    describe_counter!("radar_batches_total", "Record batches fetched by source");
}

// ============================================================================
// HTTP 메트릭 헬퍼 함수
// ============================================================================

/// HTTP 요청 카운터 증가.
pub fn record_http_request(method: &str, path: &str) {
    counter!("http_requests_total", "method" => method.to_string(), "path" => path.to_string())
        .increment(1);
}

/// HTTP 응답 카운터 증가.
pub fn record_http_response(method: &str, path: &str, status: u16) {
    counter!(
        "http_responses_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// HTTP 요청 지속 시간 기록.
pub fn record_http_duration(method: &str, path: &str, duration_secs: f64) {
    histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(duration_secs);
}

// ============================================================================
// 레이더 메트릭 헬퍼 함수
// ============================================================================

/// 레이더 조회 카운터 증가.
pub fn record_radar_request(nation: &str, status: u16) {
    counter!(
        "radar_requests_total",
        "nation" => nation.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

// ============================================================================
// 라벨 유틸리티
// ============================================================================

/// 레이더 조회 경로.
pub const RADAR_ROUTE: &str = "/api/radar";

/// 등록된 경로 템플릿. 그 밖의 경로는 [`UNMATCHED_ROUTE`]로 묶습니다.
const ROUTE_TEMPLATES: &[&str] = &[
    RADAR_ROUTE,
    "/api/months",
    "/health",
    "/health/ready",
    "/metrics",
    "/api-docs/openapi.json",
];

/// 알 수 없는 경로의 라벨.
pub const UNMATCHED_ROUTE: &str = "unmatched";

/// 요청 경로를 라우트 템플릿 라벨로 변환합니다.
///
/// 라벨 카디널리티를 제한하기 위해 등록되지 않은 경로는 하나로 묶습니다.
/// 끝의 `/`는 무시합니다.
///
/// 예: `/api/radar/` → `/api/radar`, `/api/unknown/42` → `unmatched`
pub fn route_label(path: &str) -> &'static str {
    let trimmed = match path.trim_end_matches('/') {
        "" => "/",
        rest => rest,
    };

    ROUTE_TEMPLATES
        .iter()
        .copied()
        .find(|template| *template == trimmed)
        .unwrap_or(UNMATCHED_ROUTE)
}

/// 쿼리 문자열의 `nation` 값을 라벨로 변환합니다.
///
/// `domestic`, `import` 외에는 `missing` 또는 `invalid`.
pub fn nation_label(query: Option<&str>) -> &'static str {
    let value = query
        .unwrap_or_default()
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "nation")
        .map(|(_, value)| value);

    match value {
        None | Some("") => "missing",
        Some(raw) => raw
            .parse::<Nation>()
            .map(|nation| nation.as_str())
            .unwrap_or("invalid"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_label_known_routes() {
        assert_eq!(route_label("/api/radar"), "/api/radar");
        assert_eq!(route_label("/api/months"), "/api/months");
        assert_eq!(route_label("/health/ready"), "/health/ready");
    }

    #[test]
    fn test_route_label_trailing_slash() {
        assert_eq!(route_label("/api/radar/"), "/api/radar");
    }

    #[test]
    fn test_route_label_collapses_unknown_paths() {
        assert_eq!(route_label("/api/radar/2025-03"), UNMATCHED_ROUTE);
        assert_eq!(route_label("/api/unknown/42"), UNMATCHED_ROUTE);
        assert_eq!(route_label("/"), UNMATCHED_ROUTE);
    }

    #[test]
    fn test_nation_label() {
        assert_eq!(nation_label(Some("month=2025-03&nation=import")), "import");
        assert_eq!(nation_label(Some("nation=domestic")), "domestic");
        assert_eq!(nation_label(Some("nation=europe&month=2025-03")), "invalid");
        assert_eq!(nation_label(Some("month=2025-03&nation=")), "missing");
        assert_eq!(nation_label(Some("month=2025-03")), "missing");
        assert_eq!(nation_label(None), "missing");
    }
}
