use axum::{
    Router,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use services::services::auth::CurrentUser;

use crate::AppState;

pub mod activity;
pub mod appointments;
pub mod auth;
pub mod business;
pub mod customers;
pub mod dashboard;
pub mod medical_records;
pub mod orders;
pub mod products;
pub mod settings;
pub mod suppliers;

/// Optional bearer identity. Extraction never rejects; the services enforce
/// the authenticated precondition themselves, before any database access.
pub struct MaybeUser(pub Option<CurrentUser>);

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));
        let user = state.auth.verify_token(token).await.ok();
        Ok(Self(user))
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(business::router())
        .merge(customers::router())
        .merge(products::router())
        .merge(orders::router())
        .merge(suppliers::router())
        .merge(appointments::router())
        .merge(medical_records::router())
        .merge(settings::router())
        .merge(activity::router())
        .merge(dashboard::router())
}
