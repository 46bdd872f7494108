use axum::{
    Router,
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Json as ResponseJson},
    routing::{get, put},
};
use db::models::{
    business::BusinessType,
    product::{CreateProduct, Product, UpdateProduct},
};
use serde::Deserialize;
use services::services::csv::{self, ImportOutcome};
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError, routes::MaybeUser};

const INVALIDATE: &[&str] = &["products"];

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub business_type: Option<BusinessType>,
}

pub async fn list_products(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Query(query): Query<ListQuery>,
) -> Result<ResponseJson<ApiResponse<Vec<Product>>>, ApiError> {
    let rows = state
        .resources
        .list::<Product>(user.as_ref(), query.business_type)
        .await?;
    Ok(ResponseJson(ApiResponse::success(rows.as_ref().clone())))
}

pub async fn create_product(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    axum::Json(payload): axum::Json<CreateProduct>,
) -> Result<ResponseJson<ApiResponse<Product>>, ApiError> {
    let row = state
        .resources
        .create::<Product>(user.as_ref(), &payload, INVALIDATE)
        .await?;
    Ok(ResponseJson(ApiResponse::success_with_message(
        row,
        "Record created successfully",
    )))
}

pub async fn update_product(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<UpdateProduct>,
) -> Result<ResponseJson<ApiResponse<Product>>, ApiError> {
    let updated = state
        .resources
        .update::<Product>(user.as_ref(), id, &payload, INVALIDATE)
        .await?;
    Ok(ResponseJson(match updated {
        Some(row) => ApiResponse::success_with_message(row, "Record updated successfully"),
        None => ApiResponse::error("No matching record to update"),
    }))
}

pub async fn delete_product(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let affected = state
        .resources
        .delete::<Product>(user.as_ref(), id, INVALIDATE)
        .await?;
    Ok(ResponseJson(if affected == 0 {
        ApiResponse::error("No matching record to delete")
    } else {
        ApiResponse::success_with_message((), "Record deleted successfully")
    }))
}

pub async fn export_products(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = state
        .resources
        .list::<Product>(user.as_ref(), query.business_type)
        .await?;
    let body = csv::export(rows.as_slice())?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"products.csv\"",
            ),
        ],
        body,
    ))
}

pub async fn import_products(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    body: String,
) -> Result<ResponseJson<ApiResponse<ImportOutcome>>, ApiError> {
    let outcome = csv::import::<Product>(&state.resources, user.as_ref(), &body, INVALIDATE).await?;
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
        "/products",
        Router::new()
            .route("/", get(list_products).post(create_product))
            .route("/{id}", put(update_product).delete(delete_product))
            .route("/export", get(export_products))
            .route("/import", axum::routing::post(import_products)),
    )
}
