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
#[sqlx(type_name = "customer_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CustomerStatus {
    #[default]
    Active,
    Inactive,
}

/// Identity/contact record. The medical sub-fields (date of birth, gender,
/// emergency contact) are only surfaced for healthcare business types.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize, TS)]
pub struct Customer {
    pub id: Uuid,
    pub user_id: Uuid,
    pub business_type: BusinessType,
    pub customer_code: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub emergency_contact: Option<String>,
    pub emergency_phone: Option<String>,
    pub status: CustomerStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
pub struct CreateCustomer {
    pub customer_code: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub emergency_contact: Option<String>,
    pub emergency_phone: Option<String>,
    pub status: Option<CustomerStatus>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
pub struct UpdateCustomer {
    pub customer_code: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub emergency_contact: Option<String>,
    pub emergency_phone: Option<String>,
    pub status: Option<CustomerStatus>,
    pub notes: Option<String>,
}

impl Resource for Customer {
    const TABLE: &'static str = "customers";
    const INSERT_COLUMNS: &'static [&'static str] = &[
        "customer_code",
        "name",
        "email",
        "phone",
        "address",
        "city",
        "state",
        "postal_code",
        "date_of_birth",
        "gender",
        "emergency_contact",
        "emergency_phone",
        "status",
        "notes",
    ];
    const UPDATE_COLUMNS: &'static [&'static str] = Self::INSERT_COLUMNS;

    type Create = CreateCustomer;
    type Update = UpdateCustomer;

    fn bind_create<'q>(query: SqliteQuery<'q>, data: &'q CreateCustomer) -> SqliteQuery<'q> {
        query
            .bind(&data.customer_code)
            .bind(&data.name)
            .bind(&data.email)
            .bind(&data.phone)
            .bind(&data.address)
            .bind(&data.city)
            .bind(&data.state)
            .bind(&data.postal_code)
            .bind(&data.date_of_birth)
            .bind(&data.gender)
            .bind(&data.emergency_contact)
            .bind(&data.emergency_phone)
            .bind(data.status.clone().unwrap_or_default())
            .bind(&data.notes)
    }

    fn bind_update<'q>(query: SqliteQuery<'q>, data: &'q UpdateCustomer) -> SqliteQuery<'q> {
        query
            .bind(&data.customer_code)
            .bind(&data.name)
            .bind(&data.email)
            .bind(&data.phone)
            .bind(&data.address)
            .bind(&data.city)
            .bind(&data.state)
            .bind(&data.postal_code)
            .bind(&data.date_of_birth)
            .bind(&data.gender)
            .bind(&data.emergency_contact)
            .bind(&data.emergency_phone)
            .bind(&data.status)
            .bind(&data.notes)
    }
}
