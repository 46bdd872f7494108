use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::{
    models::business::BusinessType,
    resource::{Resource, SqliteQuery},
};

/// Transactional record linking an optional customer and an optional
/// supplier. The order-type vocabulary is business-type-specific and the
/// monetary fields are entered independently, never derived from each other.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize, TS)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub business_type: BusinessType,
    pub order_number: String,
    pub order_type: String,
    pub order_date: Option<String>,
    pub due_date: Option<String>,
    pub customer_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,
    pub subtotal: Option<f64>,
    pub tax_amount: Option<f64>,
    pub discount_amount: Option<f64>,
    pub total_amount: Option<f64>,
    pub status: String,
    pub payment_status: String,
    pub payment_method: Option<String>,
    pub priority: Option<String>,
    pub assigned_to: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Joined display names, populated by the canonical select.
    #[sqlx(default)]
    pub customer_name: Option<String>,
    #[sqlx(default)]
    pub supplier_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
pub struct CreateOrder {
    pub order_number: String,
    /// Defaults to the business profile's order type when absent.
    pub order_type: Option<String>,
    pub order_date: Option<String>,
    pub due_date: Option<String>,
    pub customer_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,
    pub subtotal: Option<f64>,
    pub tax_amount: Option<f64>,
    pub discount_amount: Option<f64>,
    pub total_amount: Option<f64>,
    pub status: Option<String>,
    pub payment_status: Option<String>,
    pub payment_method: Option<String>,
    pub priority: Option<String>,
    pub assigned_to: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
pub struct UpdateOrder {
    pub order_number: Option<String>,
    pub order_type: Option<String>,
    pub order_date: Option<String>,
    pub due_date: Option<String>,
    pub customer_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,
    pub subtotal: Option<f64>,
    pub tax_amount: Option<f64>,
    pub discount_amount: Option<f64>,
    pub total_amount: Option<f64>,
    pub status: Option<String>,
    pub payment_status: Option<String>,
    pub payment_method: Option<String>,
    pub priority: Option<String>,
    pub assigned_to: Option<String>,
    pub notes: Option<String>,
}

impl Resource for Order {
    const TABLE: &'static str = "orders";
    const SELECT_COLUMNS: &'static str = "orders.*, \
        (SELECT c.name FROM customers c WHERE c.id = orders.customer_id) AS customer_name, \
        (SELECT s.name FROM suppliers s WHERE s.id = orders.supplier_id) AS supplier_name";
    const INSERT_COLUMNS: &'static [&'static str] = &[
        "order_number",
        "order_type",
        "order_date",
        "due_date",
        "customer_id",
        "supplier_id",
        "subtotal",
        "tax_amount",
        "discount_amount",
        "total_amount",
        "status",
        "payment_status",
        "payment_method",
        "priority",
        "assigned_to",
        "notes",
    ];
    const UPDATE_COLUMNS: &'static [&'static str] = Self::INSERT_COLUMNS;

    type Create = CreateOrder;
    type Update = UpdateOrder;

    fn bind_create<'q>(query: SqliteQuery<'q>, data: &'q CreateOrder) -> SqliteQuery<'q> {
        query
            .bind(&data.order_number)
            .bind(data.order_type.as_deref().unwrap_or("general"))
            .bind(&data.order_date)
            .bind(&data.due_date)
            .bind(data.customer_id)
            .bind(data.supplier_id)
            .bind(data.subtotal)
            .bind(data.tax_amount)
            .bind(data.discount_amount)
            .bind(data.total_amount)
            .bind(data.status.as_deref().unwrap_or("pending"))
            .bind(data.payment_status.as_deref().unwrap_or("pending"))
            .bind(&data.payment_method)
            .bind(&data.priority)
            .bind(&data.assigned_to)
            .bind(&data.notes)
    }

    fn bind_update<'q>(query: SqliteQuery<'q>, data: &'q UpdateOrder) -> SqliteQuery<'q> {
        query
            .bind(&data.order_number)
            .bind(&data.order_type)
            .bind(&data.order_date)
            .bind(&data.due_date)
            .bind(data.customer_id)
            .bind(data.supplier_id)
            .bind(data.subtotal)
            .bind(data.tax_amount)
            .bind(data.discount_amount)
            .bind(data.total_amount)
            .bind(&data.status)
            .bind(&data.payment_status)
            .bind(&data.payment_method)
            .bind(&data.priority)
            .bind(&data.assigned_to)
            .bind(&data.notes)
    }
}
