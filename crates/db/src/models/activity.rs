use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use ts_rs::TS;
use uuid::Uuid;

/// Durable activity entry for explicit settings/security actions.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize, TS)]
pub struct SystemLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub action: String,
    pub resource: String,
    pub details: Option<String>,
    pub user_agent: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize, TS)]
pub struct LoginHistory {
    pub id: Uuid,
    pub user_id: Uuid,
    pub login_time: DateTime<Utc>,
    pub success: bool,
    pub user_agent: Option<String>,
    pub location: Option<String>,
}

impl SystemLog {
    pub async fn create(
        pool: &SqlitePool,
        user_id: Uuid,
        action: &str,
        resource: &str,
        details: Option<&str>,
        user_agent: Option<&str>,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, SystemLog>(
            r#"INSERT INTO system_logs (id, user_id, action, resource, details, user_agent, timestamp)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               RETURNING *"#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(action)
        .bind(resource)
        .bind(details)
        .bind(user_agent)
        .bind(Utc::now())
        .fetch_one(pool)
        .await
    }

    pub async fn find_recent(pool: &SqlitePool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, SystemLog>(
            r#"SELECT * FROM system_logs
               WHERE user_id = $1
               ORDER BY timestamp DESC
               LIMIT 100"#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}

impl LoginHistory {
    pub async fn create(
        pool: &SqlitePool,
        user_id: Uuid,
        success: bool,
        user_agent: Option<&str>,
        location: Option<&str>,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, LoginHistory>(
            r#"INSERT INTO login_history (id, user_id, login_time, success, user_agent, location)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING *"#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(Utc::now())
        .bind(success)
        .bind(user_agent)
        .bind(location)
        .fetch_one(pool)
        .await
    }

    pub async fn find_recent(pool: &SqlitePool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, LoginHistory>(
            r#"SELECT * FROM login_history
               WHERE user_id = $1
               ORDER BY login_time DESC
               LIMIT 50"#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
