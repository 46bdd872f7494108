use axum::{
    Router,
    extract::State,
    http::{HeaderMap, header},
    response::Json as ResponseJson,
    routing::{get, post},
};
use db::models::{business::BusinessType, profile::ProfileInfo};
use serde::{Deserialize, Serialize};
use services::services::{auth::AuthError, business_profile};
use ts_rs::TS;
use utils::response::ApiResponse;

use crate::{AppState, error::ApiError, routes::MaybeUser};

#[derive(Debug, Deserialize, TS)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
    pub business_type: Option<BusinessType>,
}

#[derive(Debug, Deserialize, TS)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, TS)]
pub struct SessionResponse {
    pub profile: ProfileInfo,
    pub token: String,
}

#[derive(Debug, Deserialize, TS)]
pub struct SwitchBusinessTypeRequest {
    pub business_type: BusinessType,
}

fn user_agent(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
}

pub async fn sign_up(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<SignUpRequest>,
) -> Result<ResponseJson<ApiResponse<SessionResponse>>, ApiError> {
    let business_type = payload
        .business_type
        .unwrap_or(business_profile::DEFAULT_BUSINESS_TYPE);
    let (profile, token) = state
        .auth
        .sign_up(
            &payload.email,
            &payload.password,
            payload.full_name.as_deref(),
            business_type,
        )
        .await?;
    Ok(ResponseJson(ApiResponse::success(SessionResponse {
        profile,
        token,
    })))
}

pub async fn sign_in(
    State(state): State<AppState>,
    headers: HeaderMap,
    axum::Json(payload): axum::Json<SignInRequest>,
) -> Result<ResponseJson<ApiResponse<SessionResponse>>, ApiError> {
    let (profile, token) = state
        .auth
        .sign_in(&payload.email, &payload.password, user_agent(&headers))
        .await?;
    Ok(ResponseJson(ApiResponse::success(SessionResponse {
        profile,
        token,
    })))
}

pub async fn me(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
) -> Result<ResponseJson<ApiResponse<ProfileInfo>>, ApiError> {
    let user = user.ok_or(AuthError::Unauthenticated)?;
    let profile = state.auth.profile(&user).await?;
    Ok(ResponseJson(ApiResponse::success(profile)))
}

/// Explicit user action: switches the account's single active business
/// type, recorded in the activity log.
pub async fn switch_business_type(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    headers: HeaderMap,
    axum::Json(payload): axum::Json<SwitchBusinessTypeRequest>,
) -> Result<ResponseJson<ApiResponse<ProfileInfo>>, ApiError> {
    let user = user.ok_or(AuthError::Unauthenticated)?;
    let profile = state
        .auth
        .switch_business_type(&user, payload.business_type)
        .await?;

    state
        .activity
        .log(
            &user,
            "business_type_switched",
            "profiles",
            Some(serde_json::json!({ "to": payload.business_type })),
            user_agent(&headers),
        )
        .await;

    Ok(ResponseJson(ApiResponse::success(profile)))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/auth",
        Router::new()
            .route("/signup", post(sign_up))
            .route("/login", post(sign_in))
            .route("/me", get(me))
            .route("/business-type", post(switch_business_type)),
    )
}
