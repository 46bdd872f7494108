//! Durable activity logging for explicit settings/security actions.
//!
//! Nothing else in the system logs to a durable store; ordinary errors are
//! surfaced as transient notifications only. Logging itself is best-effort:
//! a failed write is traced and swallowed, never propagated.

use db::{
    DBService,
    models::activity::{LoginHistory, SystemLog},
};
use tracing::warn;

use super::auth::CurrentUser;

#[derive(Clone)]
pub struct ActivityLogService {
    db: DBService,
}

impl ActivityLogService {
    pub fn new(db: DBService) -> Self {
        Self { db }
    }

    pub async fn log(
        &self,
        user: &CurrentUser,
        action: &str,
        resource: &str,
        details: Option<serde_json::Value>,
        user_agent: Option<&str>,
    ) {
        let details = details.map(|value| value.to_string());
        if let Err(error) = SystemLog::create(
            &self.db.pool,
            user.id,
            action,
            resource,
            details.as_deref(),
            user_agent,
        )
        .await
        {
            warn!(%error, action, resource, "failed to record activity");
        }
    }

    pub async fn system_logs(&self, user: &CurrentUser) -> Result<Vec<SystemLog>, sqlx::Error> {
        SystemLog::find_recent(&self.db.pool, user.id).await
    }

    pub async fn login_history(
        &self,
        user: &CurrentUser,
    ) -> Result<Vec<LoginHistory>, sqlx::Error> {
        LoginHistory::find_recent(&self.db.pool, user.id).await
    }
}

#[cfg(test)]
mod tests {
    use db::models::{business::BusinessType, profile::Profile};

    use super::*;

    #[tokio::test]
    async fn logged_actions_come_back_newest_first() {
        let db = DBService::new_in_memory().await.unwrap();
        let profile = Profile::create(
            &db.pool,
            "owner@example.com",
            None,
            BusinessType::Hospital,
            "digest",
            "salt",
        )
        .await
        .unwrap();
        let user = CurrentUser {
            id: profile.id,
            business_type: profile.business_type,
        };
        let activity = ActivityLogService::new(db);

        activity
            .log(&user, "settings_updated", "business_settings", None, None)
            .await;
        activity
            .log(
                &user,
                "business_type_switched",
                "profiles",
                Some(serde_json::json!({ "to": "Warehouse" })),
                None,
            )
            .await;

        let logs = activity.system_logs(&user).await.unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].action, "business_type_switched");
        assert!(logs[0].timestamp >= logs[1].timestamp);
    }
}
