use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use services::services::{auth::AuthError, csv::CsvError, resources::ResourceError};
use thiserror::Error;
use utils::response::ApiResponse;

/// Boundary conversion: every service error becomes a transient,
/// user-visible notification in the response envelope. Nothing here is
/// fatal to the process.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Resource(#[from] ResourceError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Csv(#[from] CsvError),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Resource(ResourceError::Unauthenticated)
            | ApiError::Auth(AuthError::Unauthenticated)
            | ApiError::Auth(AuthError::InvalidCredentials) => StatusCode::UNAUTHORIZED,
            ApiError::Auth(AuthError::EmailTaken) => StatusCode::CONFLICT,
            ApiError::Csv(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body: ApiResponse<()> = ApiResponse::error(self.to_string());
        (status, Json(body)).into_response()
    }
}
