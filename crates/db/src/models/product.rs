use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Type;
use strum_macros::{Display, EnumString};
use ts_rs::TS;
use uuid::Uuid;

use crate::{
    models::business::BusinessType,
    resource::{Resource, SqliteQuery},
};

#[derive(
    Debug, Clone, Type, Serialize, Deserialize, PartialEq, TS, EnumString, Display, Default,
)]
#[sqlx(type_name = "product_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProductStatus {
    #[default]
    Active,
    Inactive,
}

/// Catalog/inventory item. Expiry, batch and the prescription flag matter
/// for pharmacy types; weight and dimensions for warehouses.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize, TS)]
pub struct Product {
    pub id: Uuid,
    pub user_id: Uuid,
    pub business_type: BusinessType,
    pub product_code: String,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub brand: Option<String>,
    pub unit_price: Option<f64>,
    pub cost_price: Option<f64>,
    pub quantity_in_stock: Option<i64>,
    pub minimum_stock_level: Option<i64>,
    pub unit_of_measure: Option<String>,
    pub location: Option<String>,
    pub barcode: Option<String>,
    pub batch_number: Option<String>,
    pub expiry_date: Option<String>,
    pub weight: Option<f64>,
    pub dimensions: Option<String>,
    pub prescription_required: bool,
    pub status: ProductStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
pub struct CreateProduct {
    pub product_code: String,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub brand: Option<String>,
    pub unit_price: Option<f64>,
    pub cost_price: Option<f64>,
    pub quantity_in_stock: Option<i64>,
    pub minimum_stock_level: Option<i64>,
    pub unit_of_measure: Option<String>,
    pub location: Option<String>,
    pub barcode: Option<String>,
    pub batch_number: Option<String>,
    pub expiry_date: Option<String>,
    pub weight: Option<f64>,
    pub dimensions: Option<String>,
    pub prescription_required: Option<bool>,
    pub status: Option<ProductStatus>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
pub struct UpdateProduct {
    pub product_code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub brand: Option<String>,
    pub unit_price: Option<f64>,
    pub cost_price: Option<f64>,
    pub quantity_in_stock: Option<i64>,
    pub minimum_stock_level: Option<i64>,
    pub unit_of_measure: Option<String>,
    pub location: Option<String>,
    pub barcode: Option<String>,
    pub batch_number: Option<String>,
    pub expiry_date: Option<String>,
    pub weight: Option<f64>,
    pub dimensions: Option<String>,
    pub prescription_required: Option<bool>,
    pub status: Option<ProductStatus>,
}

impl Resource for Product {
    const TABLE: &'static str = "products";
    const INSERT_COLUMNS: &'static [&'static str] = &[
        "product_code",
        "name",
        "description",
        "category",
        "subcategory",
        "brand",
        "unit_price",
        "cost_price",
        "quantity_in_stock",
        "minimum_stock_level",
        "unit_of_measure",
        "location",
        "barcode",
        "batch_number",
        "expiry_date",
        "weight",
        "dimensions",
        "prescription_required",
        "status",
    ];
    const UPDATE_COLUMNS: &'static [&'static str] = Self::INSERT_COLUMNS;

    type Create = CreateProduct;
    type Update = UpdateProduct;

    fn bind_create<'q>(query: SqliteQuery<'q>, data: &'q CreateProduct) -> SqliteQuery<'q> {
        query
            .bind(&data.product_code)
            .bind(&data.name)
            .bind(&data.description)
            .bind(&data.category)
            .bind(&data.subcategory)
            .bind(&data.brand)
            .bind(data.unit_price)
            .bind(data.cost_price)
            .bind(data.quantity_in_stock)
            .bind(data.minimum_stock_level)
            .bind(&data.unit_of_measure)
            .bind(&data.location)
            .bind(&data.barcode)
            .bind(&data.batch_number)
            .bind(&data.expiry_date)
            .bind(data.weight)
            .bind(&data.dimensions)
            .bind(data.prescription_required.unwrap_or(false))
            .bind(data.status.clone().unwrap_or_default())
    }

    fn bind_update<'q>(query: SqliteQuery<'q>, data: &'q UpdateProduct) -> SqliteQuery<'q> {
        query
            .bind(&data.product_code)
            .bind(&data.name)
            .bind(&data.description)
            .bind(&data.category)
            .bind(&data.subcategory)
            .bind(&data.brand)
            .bind(data.unit_price)
            .bind(data.cost_price)
            .bind(data.quantity_in_stock)
            .bind(data.minimum_stock_level)
            .bind(&data.unit_of_measure)
            .bind(&data.location)
            .bind(&data.barcode)
            .bind(&data.batch_number)
            .bind(&data.expiry_date)
            .bind(data.weight)
            .bind(&data.dimensions)
            .bind(data.prescription_required)
            .bind(&data.status)
    }
}
