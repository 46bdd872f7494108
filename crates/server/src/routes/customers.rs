use axum::{
    Router,
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Json as ResponseJson},
    routing::{get, put},
};
use db::models::{
    business::BusinessType,
    customer::{CreateCustomer, Customer, UpdateCustomer},
};
use serde::Deserialize;
use services::services::csv::{self, ImportOutcome};
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError, routes::MaybeUser};

const INVALIDATE: &[&str] = &["customers"];

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub business_type: Option<BusinessType>,
}

pub async fn list_customers(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Query(query): Query<ListQuery>,
) -> Result<ResponseJson<ApiResponse<Vec<Customer>>>, ApiError> {
    let rows = state
        .resources
        .list::<Customer>(user.as_ref(), query.business_type)
        .await?;
    Ok(ResponseJson(ApiResponse::success(rows.as_ref().clone())))
}

pub async fn create_customer(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    axum::Json(payload): axum::Json<CreateCustomer>,
) -> Result<ResponseJson<ApiResponse<Customer>>, ApiError> {
    let row = state
        .resources
        .create::<Customer>(user.as_ref(), &payload, INVALIDATE)
        .await?;
    Ok(ResponseJson(ApiResponse::success_with_message(
        row,
        "Record created successfully",
    )))
}

pub async fn update_customer(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<UpdateCustomer>,
) -> Result<ResponseJson<ApiResponse<Customer>>, ApiError> {
    let updated = state
        .resources
        .update::<Customer>(user.as_ref(), id, &payload, INVALIDATE)
        .await?;
    Ok(ResponseJson(match updated {
        Some(row) => ApiResponse::success_with_message(row, "Record updated successfully"),
        None => ApiResponse::error("No matching record to update"),
    }))
}

pub async fn delete_customer(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let affected = state
        .resources
        .delete::<Customer>(user.as_ref(), id, INVALIDATE)
        .await?;
    Ok(ResponseJson(if affected == 0 {
        ApiResponse::error("No matching record to delete")
    } else {
        ApiResponse::success_with_message((), "Record deleted successfully")
    }))
}

pub async fn export_customers(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = state
        .resources
        .list::<Customer>(user.as_ref(), query.business_type)
        .await?;
    let body = csv::export(rows.as_slice())?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"customers.csv\"",
            ),
        ],
        body,
    ))
}

pub async fn import_customers(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    body: String,
) -> Result<ResponseJson<ApiResponse<ImportOutcome>>, ApiError> {
    let outcome = csv::import::<Customer>(&state.resources, user.as_ref(), &body, INVALIDATE).await?;
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
        "/customers",
        Router::new()
            .route("/", get(list_customers).post(create_customer))
            .route("/{id}", put(update_customer).delete(delete_customer))
            .route("/export", get(export_customers))
            .route("/import", axum::routing::post(import_customers)),
    )
}
