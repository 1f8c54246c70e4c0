//! 상승 모델 레이더 endpoint.
//!
//! `GET /api/radar?month=YYYY-MM&nation=domestic|import`

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use radar_core::{Month, Nation, RadarResponse};
use serde::Deserialize;
use std::sync::Arc;
use tracing::error;
use utoipa::IntoParams;

use crate::error::{internal_error, invalid_query, ApiErrorResponse, ApiResult, FieldError};
use crate::state::AppState;

/// 레이더 조회 쿼리.
///
/// 검증 오류를 필드 단위로 모으기 위해 문자열로 받습니다.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RadarQuery {
    /// 집계 월 (YYYY-MM)
    #[param(example = "2025-03")]
    pub month: Option<String>,
    /// 국산/수입 구분 (domestic | import)
    #[param(example = "domestic")]
    pub nation: Option<String>,
}

impl RadarQuery {
    /// 쿼리를 검증합니다. 실패하면 모든 필드 오류를 반환합니다.
    pub fn validate(&self) -> Result<(Month, Nation), Vec<FieldError>> {
        let mut errors = Vec::new();

        let month = match self.month.as_deref() {
            None | Some("") => {
                errors.push(FieldError::new("month", "Required"));
                None
            }
            Some(raw) => match raw.parse::<Month>() {
                Ok(month) => Some(month),
                Err(_) => {
                    errors.push(FieldError::new("month", "Invalid month format (YYYY-MM)"));
                    None
                }
            },
        };

        let nation = match self.nation.as_deref() {
            None | Some("") => {
                errors.push(FieldError::new("nation", "Required"));
                None
            }
            Some(raw) => match raw.parse::<Nation>() {
                Ok(nation) => Some(nation),
                Err(_) => {
                    errors.push(FieldError::new(
                        "nation",
                        "Invalid enum value. Expected 'domestic' | 'import'",
                    ));
                    None
                }
            },
        };

        match (month, nation) {
            (Some(month), Some(nation)) => Ok((month, nation)),
            _ => Err(errors),
        }
    }
}

/// 점수 순 레이더 응답.
#[utoipa::path(
    get,
    path = "/api/radar",
    tag = "radar",
    params(RadarQuery),
    responses(
        (status = 200, description = "점수 순 모델 목록", body = RadarResponse),
        (status = 400, description = "쿼리 검증 실패", body = ApiErrorResponse),
        (status = 500, description = "데이터 조회 실패", body = ApiErrorResponse)
    )
)]
pub async fn get_radar(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RadarQuery>,
) -> ApiResult<Json<RadarResponse>> {
    let (month, nation) = query.validate().map_err(|details| invalid_query(&details))?;

    match state.radar.radar(nation, &month).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            error!(nation = %nation, month = %month, error = %e, "Radar API error");
            Err(internal_error("Failed to fetch radar data"))
        }
    }
}

/// 레이더 라우터 생성.
pub fn radar_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(get_radar))
}
