use axum::{
    Router,
    extract::State,
    http::{HeaderMap, header},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::settings::BusinessSetting;
use serde::Deserialize;
use services::services::auth::AuthError;
use ts_rs::TS;
use utils::response::ApiResponse;

use crate::{AppState, error::ApiError, routes::MaybeUser};

#[derive(Debug, Deserialize, TS)]
pub struct UpsertSettingRequest {
    pub setting_key: String,
    pub setting_value: Option<String>,
}

pub async fn list_settings(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
) -> Result<ResponseJson<ApiResponse<Vec<BusinessSetting>>>, ApiError> {
    let user = user.ok_or(AuthError::Unauthenticated)?;
    let settings =
        BusinessSetting::find_all(&state.resources.db().pool, user.id, user.business_type).await?;
    Ok(ResponseJson(ApiResponse::success(settings)))
}

/// Settings writes are among the explicitly activity-logged actions.
pub async fn upsert_setting(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    headers: HeaderMap,
    axum::Json(payload): axum::Json<UpsertSettingRequest>,
) -> Result<ResponseJson<ApiResponse<BusinessSetting>>, ApiError> {
    let user = user.ok_or(AuthError::Unauthenticated)?;
    let setting = BusinessSetting::upsert(
        &state.resources.db().pool,
        user.id,
        user.business_type,
        &payload.setting_key,
        payload.setting_value.as_deref(),
    )
    .await?;

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok());
    state
        .activity
        .log(
            &user,
            "settings_updated",
            "business_settings",
            Some(serde_json::json!({ "key": payload.setting_key })),
            user_agent,
        )
        .await;

    Ok(ResponseJson(ApiResponse::success_with_message(
        setting,
        "Settings saved",
    )))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/settings",
        Router::new().route("/", get(list_settings).put(upsert_setting)),
    )
}
