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

/// Stored capitalized ("Active"/"Inactive"), unlike the lowercase statuses
/// elsewhere.
#[derive(
    Debug, Clone, Type, Serialize, Deserialize, PartialEq, TS, EnumString, Display, Default,
)]
#[sqlx(type_name = "record_status")]
pub enum RecordStatus {
    #[default]
    Active,
    Inactive,
}

/// Clinical record. Patient identity (name, date of birth, gender) is
/// copied at creation time, not live-joined, so the record stays intact
/// if the customer row changes or disappears.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize, TS)]
pub struct MedicalRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub business_type: BusinessType,
    pub record_number: String,
    pub patient_id: Option<Uuid>,
    pub patient_name: String,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub blood_type: Option<String>,
    pub allergies: Option<String>,
    pub medical_history: Option<String>,
    pub current_medications: Option<String>,
    pub diagnosis: Option<String>,
    pub notes: Option<String>,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
pub struct CreateMedicalRecord {
    pub record_number: String,
    pub patient_id: Option<Uuid>,
    pub patient_name: String,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub blood_type: Option<String>,
    pub allergies: Option<String>,
    pub medical_history: Option<String>,
    pub current_medications: Option<String>,
    pub diagnosis: Option<String>,
    pub notes: Option<String>,
    pub status: Option<RecordStatus>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
pub struct UpdateMedicalRecord {
    pub record_number: Option<String>,
    pub patient_id: Option<Uuid>,
    pub patient_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub blood_type: Option<String>,
    pub allergies: Option<String>,
    pub medical_history: Option<String>,
    pub current_medications: Option<String>,
    pub diagnosis: Option<String>,
    pub notes: Option<String>,
    pub status: Option<RecordStatus>,
}

impl Resource for MedicalRecord {
    const TABLE: &'static str = "medical_records";
    const INSERT_COLUMNS: &'static [&'static str] = &[
        "record_number",
        "patient_id",
        "patient_name",
        "date_of_birth",
        "gender",
        "blood_type",
        "allergies",
        "medical_history",
        "current_medications",
        "diagnosis",
        "notes",
        "status",
    ];
    const UPDATE_COLUMNS: &'static [&'static str] = Self::INSERT_COLUMNS;

    type Create = CreateMedicalRecord;
    type Update = UpdateMedicalRecord;

    fn bind_create<'q>(query: SqliteQuery<'q>, data: &'q CreateMedicalRecord) -> SqliteQuery<'q> {
        query
            .bind(&data.record_number)
            .bind(data.patient_id)
            .bind(&data.patient_name)
            .bind(&data.date_of_birth)
            .bind(&data.gender)
            .bind(&data.blood_type)
            .bind(&data.allergies)
            .bind(&data.medical_history)
            .bind(&data.current_medications)
            .bind(&data.diagnosis)
            .bind(&data.notes)
            .bind(data.status.clone().unwrap_or_default())
    }

    fn bind_update<'q>(query: SqliteQuery<'q>, data: &'q UpdateMedicalRecord) -> SqliteQuery<'q> {
        query
            .bind(&data.record_number)
            .bind(data.patient_id)
            .bind(&data.patient_name)
            .bind(&data.date_of_birth)
            .bind(&data.gender)
            .bind(&data.blood_type)
            .bind(&data.allergies)
            .bind(&data.medical_history)
            .bind(&data.current_medications)
            .bind(&data.diagnosis)
            .bind(&data.notes)
            .bind(&data.status)
    }
}
