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
#[sqlx(type_name = "supplier_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SupplierStatus {
    #[default]
    Active,
    Inactive,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize, TS)]
pub struct Supplier {
    pub id: Uuid,
    pub user_id: Uuid,
    pub business_type: BusinessType,
    pub supplier_code: String,
    pub name: String,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub tax_number: Option<String>,
    pub payment_terms: Option<String>,
    pub status: SupplierStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
pub struct CreateSupplier {
    pub supplier_code: String,
    pub name: String,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub tax_number: Option<String>,
    pub payment_terms: Option<String>,
    pub status: Option<SupplierStatus>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
pub struct UpdateSupplier {
    pub supplier_code: Option<String>,
    pub name: Option<String>,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub tax_number: Option<String>,
    pub payment_terms: Option<String>,
    pub status: Option<SupplierStatus>,
}

impl Resource for Supplier {
    const TABLE: &'static str = "suppliers";
    const INSERT_COLUMNS: &'static [&'static str] = &[
        "supplier_code",
        "name",
        "contact_person",
        "email",
        "phone",
        "address",
        "city",
        "state",
        "postal_code",
        "tax_number",
        "payment_terms",
        "status",
    ];
    const UPDATE_COLUMNS: &'static [&'static str] = Self::INSERT_COLUMNS;

    type Create = CreateSupplier;
    type Update = UpdateSupplier;

    fn bind_create<'q>(query: SqliteQuery<'q>, data: &'q CreateSupplier) -> SqliteQuery<'q> {
        query
            .bind(&data.supplier_code)
            .bind(&data.name)
            .bind(&data.contact_person)
            .bind(&data.email)
            .bind(&data.phone)
            .bind(&data.address)
            .bind(&data.city)
            .bind(&data.state)
            .bind(&data.postal_code)
            .bind(&data.tax_number)
            .bind(&data.payment_terms)
            .bind(data.status.clone().unwrap_or_default())
    }

    fn bind_update<'q>(query: SqliteQuery<'q>, data: &'q UpdateSupplier) -> SqliteQuery<'q> {
        query
            .bind(&data.supplier_code)
            .bind(&data.name)
            .bind(&data.contact_person)
            .bind(&data.email)
            .bind(&data.phone)
            .bind(&data.address)
            .bind(&data.city)
            .bind(&data.state)
            .bind(&data.postal_code)
            .bind(&data.tax_number)
            .bind(&data.payment_terms)
            .bind(&data.status)
    }
}
