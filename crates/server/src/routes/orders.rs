use axum::{
    Router,
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Json as ResponseJson},
    routing::{get, put},
};
use db::models::{
    business::BusinessType,
    order::{CreateOrder, Order, UpdateOrder},
};
use serde::Deserialize;
use services::services::{
    business_profile,
    csv::{self, ImportOutcome},
};
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError, routes::MaybeUser};

const INVALIDATE: &[&str] = &["orders"];

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub business_type: Option<BusinessType>,
}

pub async fn list_orders(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Query(query): Query<ListQuery>,
) -> Result<ResponseJson<ApiResponse<Vec<Order>>>, ApiError> {
    let rows = state
        .resources
        .list::<Order>(user.as_ref(), query.business_type)
        .await?;
    Ok(ResponseJson(ApiResponse::success(rows.as_ref().clone())))
}

pub async fn create_order(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    axum::Json(mut payload): axum::Json<CreateOrder>,
) -> Result<ResponseJson<ApiResponse<Order>>, ApiError> {
    // The order-type vocabulary is business-type-specific; an absent type
    // falls back to the active profile's default.
    if payload.order_type.is_none() {
        if let Some(user) = &user {
            payload.order_type = Some(
                business_profile::profile(user.business_type)
                    .default_order_type
                    .to_string(),
            );
        }
    }
    let row = state
        .resources
        .create::<Order>(user.as_ref(), &payload, INVALIDATE)
        .await?;
    Ok(ResponseJson(ApiResponse::success_with_message(
        row,
        "Record created successfully",
    )))
}

pub async fn update_order(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<UpdateOrder>,
) -> Result<ResponseJson<ApiResponse<Order>>, ApiError> {
    let updated = state
        .resources
        .update::<Order>(user.as_ref(), id, &payload, INVALIDATE)
        .await?;
    Ok(ResponseJson(match updated {
        Some(row) => ApiResponse::success_with_message(row, "Record updated successfully"),
        None => ApiResponse::error("No matching record to update"),
    }))
}

pub async fn delete_order(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let affected = state
        .resources
        .delete::<Order>(user.as_ref(), id, INVALIDATE)
        .await?;
    Ok(ResponseJson(if affected == 0 {
        ApiResponse::error("No matching record to delete")
    } else {
        ApiResponse::success_with_message((), "Record deleted successfully")
    }))
}

pub async fn export_orders(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = state
        .resources
        .list::<Order>(user.as_ref(), query.business_type)
        .await?;
    let body = csv::export(rows.as_slice())?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"orders.csv\"",
            ),
        ],
        body,
    ))
}

pub async fn import_orders(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    body: String,
) -> Result<ResponseJson<ApiResponse<ImportOutcome>>, ApiError> {
    let outcome = csv::import::<Order>(&state.resources, user.as_ref(), &body, INVALIDATE).await?;
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
        "/orders",
        Router::new()
            .route("/", get(list_orders).post(create_order))
            .route("/{id}", put(update_order).delete(delete_order))
            .route("/export", get(export_orders))
            .route("/import", axum::routing::post(import_orders)),
    )
}
