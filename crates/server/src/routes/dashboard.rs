use axum::{
    Router,
    extract::State,
    response::Json as ResponseJson,
    routing::get,
};
use services::services::dashboard::DashboardStats;
use utils::response::ApiResponse;

use crate::{AppState, error::ApiError, routes::MaybeUser};

pub async fn get_stats(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
) -> Result<ResponseJson<ApiResponse<DashboardStats>>, ApiError> {
    let stats = state.dashboard.stats(user.as_ref()).await?;
    Ok(ResponseJson(ApiResponse::success(stats)))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/dashboard/stats", get(get_stats))
}
