//! HTTP 요청 metrics middleware.
//!
//! 경로는 라우트 템플릿 라벨로 묶고, 레이더 조회는 nation 별로 따로 셉니다.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

use crate::metrics::{
    nation_label, record_http_duration, record_http_request, record_http_response,
    record_radar_request, route_label, RADAR_ROUTE,
};

/// HTTP 메트릭을 수집하는 미들웨어 레이어.
///
/// - `http_requests_total`, `http_responses_total`, `http_request_duration_seconds`:
///   method, route 라벨 (응답은 status 포함)
/// - `radar_requests_total`: `/api/radar` 조회의 nation, status 라벨
pub async fn metrics_layer(request: Request, next: Next) -> Response {
    let start = Instant::now();

    let method = request.method().to_string();
    let route = route_label(request.uri().path());
    let nation = (route == RADAR_ROUTE).then(|| nation_label(request.uri().query()));

    record_http_request(&method, route);

    let response = next.run(request).await;

    let status = response.status().as_u16();
    record_http_response(&method, route, status);
    record_http_duration(&method, route, start.elapsed().as_secs_f64());

    if let Some(nation) = nation {
        record_radar_request(nation, status);
    }

    response
}
