use axum::{
    Router,
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Json as ResponseJson},
    routing::{get, put},
};
use db::models::{
    business::BusinessType,
    medical_record::{CreateMedicalRecord, MedicalRecord, UpdateMedicalRecord},
};
use serde::Deserialize;
use services::services::csv;
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError, routes::MaybeUser};

const INVALIDATE: &[&str] = &["medical_records"];

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub business_type: Option<BusinessType>,
}

pub async fn list_medical_records(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Query(query): Query<ListQuery>,
) -> Result<ResponseJson<ApiResponse<Vec<MedicalRecord>>>, ApiError> {
    let rows = state
        .resources
        .list::<MedicalRecord>(user.as_ref(), query.business_type)
        .await?;
    Ok(ResponseJson(ApiResponse::success(rows.as_ref().clone())))
}

pub async fn create_medical_record(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    axum::Json(payload): axum::Json<CreateMedicalRecord>,
) -> Result<ResponseJson<ApiResponse<MedicalRecord>>, ApiError> {
    let row = state
        .resources
        .create::<MedicalRecord>(user.as_ref(), &payload, INVALIDATE)
        .await?;
    Ok(ResponseJson(ApiResponse::success_with_message(
        row,
        "Record created successfully",
    )))
}

pub async fn update_medical_record(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<UpdateMedicalRecord>,
) -> Result<ResponseJson<ApiResponse<MedicalRecord>>, ApiError> {
    let updated = state
        .resources
        .update::<MedicalRecord>(user.as_ref(), id, &payload, INVALIDATE)
        .await?;
    Ok(ResponseJson(match updated {
        Some(row) => ApiResponse::success_with_message(row, "Record updated successfully"),
        None => ApiResponse::error("No matching record to update"),
    }))
}

pub async fn delete_medical_record(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let affected = state
        .resources
        .delete::<MedicalRecord>(user.as_ref(), id, INVALIDATE)
        .await?;
    Ok(ResponseJson(if affected == 0 {
        ApiResponse::error("No matching record to delete")
    } else {
        ApiResponse::success_with_message((), "Record deleted successfully")
    }))
}

pub async fn export_medical_records(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = state
        .resources
        .list::<MedicalRecord>(user.as_ref(), query.business_type)
        .await?;
    let body = csv::export(rows.as_slice())?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"medical_records.csv\"",
            ),
        ],
        body,
    ))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/medical-records",
        Router::new()
            .route("/", get(list_medical_records).post(create_medical_record))
            .route(
                "/{id}",
                put(update_medical_record).delete(delete_medical_record),
            )
            .route("/export", get(export_medical_records)),
    )
}
