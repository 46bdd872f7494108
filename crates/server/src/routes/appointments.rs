use axum::{
    Router,
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Json as ResponseJson},
    routing::{get, put},
};
use db::models::{
    appointment::{Appointment, CreateAppointment, UpdateAppointment},
    business::BusinessType,
};
use serde::Deserialize;
use services::services::{business_profile, csv};
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError, routes::MaybeUser};

const INVALIDATE: &[&str] = &["appointments"];

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub business_type: Option<BusinessType>,
}

pub async fn list_appointments(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Query(query): Query<ListQuery>,
) -> Result<ResponseJson<ApiResponse<Vec<Appointment>>>, ApiError> {
    let rows = state
        .resources
        .list::<Appointment>(user.as_ref(), query.business_type)
        .await?;
    Ok(ResponseJson(ApiResponse::success(rows.as_ref().clone())))
}

pub async fn create_appointment(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    axum::Json(mut payload): axum::Json<CreateAppointment>,
) -> Result<ResponseJson<ApiResponse<Appointment>>, ApiError> {
    if payload.appointment_type.is_none() {
        if let Some(user) = &user {
            payload.appointment_type = Some(
                business_profile::profile(user.business_type)
                    .default_appointment_type
                    .to_string(),
            );
        }
    }
    let row = state
        .resources
        .create::<Appointment>(user.as_ref(), &payload, INVALIDATE)
        .await?;
    Ok(ResponseJson(ApiResponse::success_with_message(
        row,
        "Record created successfully",
    )))
}

pub async fn update_appointment(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<UpdateAppointment>,
) -> Result<ResponseJson<ApiResponse<Appointment>>, ApiError> {
    let updated = state
        .resources
        .update::<Appointment>(user.as_ref(), id, &payload, INVALIDATE)
        .await?;
    Ok(ResponseJson(match updated {
        Some(row) => ApiResponse::success_with_message(row, "Record updated successfully"),
        None => ApiResponse::error("No matching record to update"),
    }))
}

pub async fn delete_appointment(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let affected = state
        .resources
        .delete::<Appointment>(user.as_ref(), id, INVALIDATE)
        .await?;
    Ok(ResponseJson(if affected == 0 {
        ApiResponse::error("No matching record to delete")
    } else {
        ApiResponse::success_with_message((), "Record deleted successfully")
    }))
}

/// Export only: an appointment row cannot be rebuilt positionally because
/// the mandatory customer link is exported as a display name.
pub async fn export_appointments(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = state
        .resources
        .list::<Appointment>(user.as_ref(), query.business_type)
        .await?;
    let body = csv::export(rows.as_slice())?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"appointments.csv\"",
            ),
        ],
        body,
    ))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/appointments",
        Router::new()
            .route("/", get(list_appointments).post(create_appointment))
            .route("/{id}", put(update_appointment).delete(delete_appointment))
            .route("/export", get(export_appointments)),
    )
}
