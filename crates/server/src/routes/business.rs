use axum::{
    Router,
    extract::Query,
    response::Json as ResponseJson,
    routing::get,
};
use serde::Deserialize;
use services::services::{auth::AuthError, business_profile, business_profile::BusinessProfile};
use utils::response::ApiResponse;

use crate::{AppState, error::ApiError, routes::MaybeUser};

#[derive(Debug, Deserialize)]
pub struct ProfileQuery {
    /// Raw tag override; unknown values resolve to the canonical default.
    pub business_type: Option<String>,
}

/// The configuration bundle driving vocabulary, defaults, and conditional
/// fields. Defaults to the caller's active business type.
pub async fn get_business_profile(
    MaybeUser(user): MaybeUser,
    Query(query): Query<ProfileQuery>,
) -> Result<ResponseJson<ApiResponse<BusinessProfile>>, ApiError> {
    let profile = match query.business_type.as_deref() {
        Some(tag) => business_profile::profile_for_tag(tag),
        None => {
            let user = user.ok_or(AuthError::Unauthenticated)?;
            business_profile::profile(user.business_type)
        }
    };
    Ok(ResponseJson(ApiResponse::success(profile.clone())))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/business-profile", get(get_business_profile))
}
