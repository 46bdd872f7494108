use axum::{
    Router,
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Json as ResponseJson},
    routing::{get, put},
};
use db::models::{
    business::BusinessType,
    supplier::{CreateSupplier, Supplier, UpdateSupplier},
};
use serde::Deserialize;
use services::services::csv::{self, ImportOutcome};
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError, routes::MaybeUser};

const INVALIDATE: &[&str] = &["suppliers"];

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub business_type: Option<BusinessType>,
}

pub async fn list_suppliers(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Query(query): Query<ListQuery>,
) -> Result<ResponseJson<ApiResponse<Vec<Supplier>>>, ApiError> {
    let rows = state
        .resources
        .list::<Supplier>(user.as_ref(), query.business_type)
        .await?;
    Ok(ResponseJson(ApiResponse::success(rows.as_ref().clone())))
}

pub async fn create_supplier(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    axum::Json(payload): axum::Json<CreateSupplier>,
) -> Result<ResponseJson<ApiResponse<Supplier>>, ApiError> {
    let row = state
        .resources
        .create::<Supplier>(user.as_ref(), &payload, INVALIDATE)
        .await?;
    Ok(ResponseJson(ApiResponse::success_with_message(
        row,
        "Record created successfully",
    )))
}

pub async fn update_supplier(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<UpdateSupplier>,
) -> Result<ResponseJson<ApiResponse<Supplier>>, ApiError> {
    let updated = state
        .resources
        .update::<Supplier>(user.as_ref(), id, &payload, INVALIDATE)
        .await?;
    Ok(ResponseJson(match updated {
        Some(row) => ApiResponse::success_with_message(row, "Record updated successfully"),
        None => ApiResponse::error("No matching record to update"),
    }))
}

pub async fn delete_supplier(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let affected = state
        .resources
        .delete::<Supplier>(user.as_ref(), id, INVALIDATE)
        .await?;
    Ok(ResponseJson(if affected == 0 {
        ApiResponse::error("No matching record to delete")
    } else {
        ApiResponse::success_with_message((), "Record deleted successfully")
    }))
}

pub async fn export_suppliers(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = state
        .resources
        .list::<Supplier>(user.as_ref(), query.business_type)
        .await?;
    let body = csv::export(rows.as_slice())?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"suppliers.csv\"",
            ),
        ],
        body,
    ))
}

pub async fn import_suppliers(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    body: String,
) -> Result<ResponseJson<ApiResponse<ImportOutcome>>, ApiError> {
    let outcome =
        csv::import::<Supplier>(&state.resources, user.as_ref(), &body, INVALIDATE).await?;
    let message = if outcome.failed > 0 {
        format!(
            "{} records imported, {} rows failed",
            outcome.imported, outcome.failed
        )
    } else {
        format!("{} records imported successfully", outcome.imported)
    };
    Ok(ResponseJson(ApiResponse::success_with_message(
        outcome, message,
    )))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/suppliers",
        Router::new()
            .route("/", get(list_suppliers).post(create_supplier))
            .route("/{id}", put(update_supplier).delete(delete_supplier))
            .route("/export", get(export_suppliers))
            .route("/import", axum::routing::post(import_suppliers)),
    )
}
