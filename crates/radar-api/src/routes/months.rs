//! 선택 가능한 월 목록 endpoint.

use axum::{extract::State, routing::get, Json, Router};
use radar_core::AvailableMonths;
use std::sync::Arc;

use crate::state::AppState;

/// 최근 12개월과 최신 월.
///
/// 서울 기준 오늘 날짜로 계산합니다.
#[utoipa::path(
    get,
    path = "/api/months",
    tag = "radar",
    responses((status = 200, description = "선택 가능한 월 목록", body = AvailableMonths))
)]
pub async fn list_months(State(state): State<Arc<AppState>>) -> Json<AvailableMonths> {
    Json(state.radar.months())
}

/// 월 목록 라우터 생성.
pub fn months_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(list_months))
}
