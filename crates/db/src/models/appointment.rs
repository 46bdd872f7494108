use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Type;
use strum_macros::{Display, EnumString};
use ts_rs::TS;
use uuid::Uuid;

use crate::{
    models::business::BusinessType,
    resource::{Ordering, Resource, SqliteQuery},
};

#[derive(
    Debug, Clone, Type, Serialize, Deserialize, PartialEq, TS, EnumString, Display, Default,
)]
#[sqlx(type_name = "appointment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
    NoShow,
}

/// Scheduling record. Unlike every other resource, appointments list in
/// ascending appointment-date order (soonest first). The clinical fields
/// are only surfaced for healthcare business types.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize, TS)]
pub struct Appointment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub business_type: BusinessType,
    pub appointment_number: String,
    pub appointment_date: String,
    pub appointment_type: Option<String>,
    pub customer_id: Uuid,
    pub duration_minutes: Option<i64>,
    pub status: AppointmentStatus,
    pub appointed_to: Option<String>,
    pub symptoms: Option<String>,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub prescription: Option<String>,
    pub follow_up_date: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(default)]
    pub customer_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
pub struct CreateAppointment {
    pub appointment_number: String,
    pub appointment_date: String,
    /// Defaults to the business profile's appointment type when absent.
    pub appointment_type: Option<String>,
    pub customer_id: Uuid,
    pub duration_minutes: Option<i64>,
    pub status: Option<AppointmentStatus>,
    pub appointed_to: Option<String>,
    pub symptoms: Option<String>,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub prescription: Option<String>,
    pub follow_up_date: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
pub struct UpdateAppointment {
    pub appointment_number: Option<String>,
    pub appointment_date: Option<String>,
    pub appointment_type: Option<String>,
    pub customer_id: Option<Uuid>,
    pub duration_minutes: Option<i64>,
    pub status: Option<AppointmentStatus>,
    pub appointed_to: Option<String>,
    pub symptoms: Option<String>,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub prescription: Option<String>,
    pub follow_up_date: Option<String>,
    pub notes: Option<String>,
}

impl Resource for Appointment {
    const TABLE: &'static str = "appointments";
    const SELECT_COLUMNS: &'static str = "appointments.*, \
        (SELECT c.name FROM customers c WHERE c.id = appointments.customer_id) AS customer_name";
    const INSERT_COLUMNS: &'static [&'static str] = &[
        "appointment_number",
        "appointment_date",
        "appointment_type",
        "customer_id",
        "duration_minutes",
        "status",
        "appointed_to",
        "symptoms",
        "diagnosis",
        "treatment",
        "prescription",
        "follow_up_date",
        "notes",
    ];
    const UPDATE_COLUMNS: &'static [&'static str] = Self::INSERT_COLUMNS;
    const ORDER_BY: Ordering = Ordering {
        column: "appointment_date",
        ascending: true,
    };

    type Create = CreateAppointment;
    type Update = UpdateAppointment;

    fn bind_create<'q>(query: SqliteQuery<'q>, data: &'q CreateAppointment) -> SqliteQuery<'q> {
        query
            .bind(&data.appointment_number)
            .bind(&data.appointment_date)
            .bind(&data.appointment_type)
            .bind(data.customer_id)
            .bind(data.duration_minutes)
            .bind(data.status.clone().unwrap_or_default())
            .bind(&data.appointed_to)
            .bind(&data.symptoms)
            .bind(&data.diagnosis)
            .bind(&data.treatment)
            .bind(&data.prescription)
            .bind(&data.follow_up_date)
            .bind(&data.notes)
    }

    fn bind_update<'q>(query: SqliteQuery<'q>, data: &'q UpdateAppointment) -> SqliteQuery<'q> {
        query
            .bind(&data.appointment_number)
            .bind(&data.appointment_date)
            .bind(&data.appointment_type)
            .bind(data.customer_id)
            .bind(data.duration_minutes)
            .bind(&data.status)
            .bind(&data.appointed_to)
            .bind(&data.symptoms)
            .bind(&data.diagnosis)
            .bind(&data.treatment)
            .bind(&data.prescription)
            .bind(&data.follow_up_date)
            .bind(&data.notes)
    }
}
