use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{SqlitePool, Type};
use strum_macros::{Display, EnumString};
use ts_rs::TS;
use uuid::Uuid;

use crate::models::business::BusinessType;

#[derive(
    Debug, Clone, Type, Serialize, Deserialize, PartialEq, TS, EnumString, Display, Default,
)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UserRole {
    Admin,
    Manager,
    Employee,
    #[default]
    User,
}

/// Account record. Carries the account's single active business type and
/// the password digest; never serialized to the API as-is.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub role: UserRole,
    pub business_type: BusinessType,
    pub password_digest: String,
    pub password_salt: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// API-facing view of a profile, without credential material.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct ProfileInfo {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub role: UserRole,
    pub business_type: BusinessType,
    pub created_at: DateTime<Utc>,
}

impl From<Profile> for ProfileInfo {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id,
            email: profile.email,
            full_name: profile.full_name,
            role: profile.role,
            business_type: profile.business_type,
            created_at: profile.created_at,
        }
    }
}

impl Profile {
    pub async fn create(
        pool: &SqlitePool,
        email: &str,
        full_name: Option<&str>,
        business_type: BusinessType,
        password_digest: &str,
        password_salt: &str,
    ) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        sqlx::query_as::<_, Profile>(
            r#"INSERT INTO profiles
                   (id, email, full_name, role, business_type,
                    password_digest, password_salt, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
               RETURNING *"#,
        )
        .bind(id)
        .bind(email)
        .bind(full_name)
        .bind(UserRole::default())
        .bind(business_type)
        .bind(password_digest)
        .bind(password_salt)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Switches the account's active business type. Every resource created
    /// afterwards is stamped with the new value; existing rows keep theirs.
    pub async fn update_business_type(
        pool: &SqlitePool,
        id: Uuid,
        business_type: BusinessType,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Profile>(
            r#"UPDATE profiles
               SET business_type = $2, updated_at = $3
               WHERE id = $1
               RETURNING *"#,
        )
        .bind(id)
        .bind(business_type)
        .bind(Utc::now())
        .fetch_optional(pool)
        .await
    }
}
