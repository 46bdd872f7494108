use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use ts_rs::TS;
use uuid::Uuid;

use crate::models::business::BusinessType;

/// Per-account key/value setting, scoped by business type.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize, TS)]
pub struct BusinessSetting {
    pub id: Uuid,
    pub user_id: Uuid,
    pub business_type: BusinessType,
    pub setting_key: String,
    pub setting_value: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BusinessSetting {
    pub async fn upsert(
        pool: &SqlitePool,
        user_id: Uuid,
        business_type: BusinessType,
        key: &str,
        value: Option<&str>,
    ) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        sqlx::query_as::<_, BusinessSetting>(
            r#"INSERT INTO business_settings
                   (id, user_id, business_type, setting_key, setting_value, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               ON CONFLICT (user_id, business_type, setting_key) DO UPDATE SET
                   setting_value = excluded.setting_value,
                   updated_at = excluded.updated_at
               RETURNING *"#,
        )
        .bind(id)
        .bind(user_id)
        .bind(business_type)
        .bind(key)
        .bind(value)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await
    }

    pub async fn find_all(
        pool: &SqlitePool,
        user_id: Uuid,
        business_type: BusinessType,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, BusinessSetting>(
            r#"SELECT * FROM business_settings
               WHERE user_id = $1 AND business_type = $2
               ORDER BY setting_key ASC"#,
        )
        .bind(user_id)
        .bind(business_type)
        .fetch_all(pool)
        .await
    }
}
