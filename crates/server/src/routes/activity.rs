use axum::{
    Router,
    extract::State,
    response::Json as ResponseJson,
    routing::get,
};
use db::models::activity::{LoginHistory, SystemLog};
use services::services::auth::AuthError;
use utils::response::ApiResponse;

use crate::{AppState, error::ApiError, routes::MaybeUser};

pub async fn list_system_logs(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
) -> Result<ResponseJson<ApiResponse<Vec<SystemLog>>>, ApiError> {
    let user = user.ok_or(AuthError::Unauthenticated)?;
    let logs = state.activity.system_logs(&user).await?;
    Ok(ResponseJson(ApiResponse::success(logs)))
}

pub async fn list_login_history(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
) -> Result<ResponseJson<ApiResponse<Vec<LoginHistory>>>, ApiError> {
    let user = user.ok_or(AuthError::Unauthenticated)?;
    let history = state.activity.login_history(&user).await?;
    Ok(ResponseJson(ApiResponse::success(history)))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/activity",
        Router::new()
            .route("/system-logs", get(list_system_logs))
            .route("/login-history", get(list_login_history)),
    )
}
