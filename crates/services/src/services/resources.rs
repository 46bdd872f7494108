//! The generic create/read/update/delete service over CRM resources.
//!
//! Wraps the tenant-scoped store in `db::resource` with the per-call auth
//! precondition, business-type stamping, the process-wide read cache, and
//! declared-key invalidation. Mutations are never retried; a failure is
//! surfaced once and left for manual re-invocation.

use std::sync::Arc;

use db::{DBService, models::business::BusinessType, resource, resource::Resource};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use super::{
    auth::CurrentUser,
    cache::{CacheKey, ResourceCache},
};

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("not authenticated")]
    Unauthenticated,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Clone)]
pub struct ResourceService {
    db: DBService,
    cache: ResourceCache,
}

impl ResourceService {
    pub fn new(db: DBService, cache: ResourceCache) -> Self {
        Self { db, cache }
    }

    pub fn db(&self) -> &DBService {
        &self.db
    }

    /// Fails before any database access when no identity is present.
    fn require_user(user: Option<&CurrentUser>) -> Result<&CurrentUser, ResourceError> {
        user.ok_or(ResourceError::Unauthenticated)
    }

    /// The account's rows, optionally narrowed to one business type, in the
    /// entity's declared order. Repeated calls with identical parameters are
    /// served from the cache until a mutation invalidates the entity.
    pub async fn list<R: Resource>(
        &self,
        user: Option<&CurrentUser>,
        filter: Option<BusinessType>,
    ) -> Result<Arc<Vec<R>>, ResourceError> {
        let user = Self::require_user(user)?;
        let key = CacheKey {
            user_id: user.id,
            entity: R::TABLE,
            filter,
        };

        if let Some(rows) = self.cache.get::<Vec<R>>(&key).await {
            debug!(entity = R::TABLE, user_id = %user.id, "serving list from cache");
            return Ok(rows);
        }

        let rows = Arc::new(resource::list::<R>(&self.db.pool, user.id, filter).await?);
        self.cache.insert(key, rows.clone()).await;
        Ok(rows)
    }

    pub async fn find_by_id<R: Resource>(
        &self,
        user: Option<&CurrentUser>,
        id: Uuid,
    ) -> Result<Option<R>, ResourceError> {
        let user = Self::require_user(user)?;
        Ok(resource::find_by_id::<R>(&self.db.pool, user.id, id).await?)
    }

    /// Inserts one row stamped with the caller's identity and active
    /// business type, then invalidates the declared dependent entities.
    pub async fn create<R: Resource>(
        &self,
        user: Option<&CurrentUser>,
        data: &R::Create,
        invalidate: &[&'static str],
    ) -> Result<R, ResourceError> {
        let user = Self::require_user(user)?;
        let row = resource::insert::<R>(&self.db.pool, user.id, user.business_type, data).await?;
        self.invalidate(user.id, invalidate).await;
        info!(entity = R::TABLE, user_id = %user.id, "record created");
        Ok(row)
    }

    /// Partial update matched on both id and identity; a guessed id under a
    /// different account updates nothing and returns `None`.
    pub async fn update<R: Resource>(
        &self,
        user: Option<&CurrentUser>,
        id: Uuid,
        data: &R::Update,
        invalidate: &[&'static str],
    ) -> Result<Option<R>, ResourceError> {
        let user = Self::require_user(user)?;
        let row = resource::update::<R>(&self.db.pool, user.id, id, data).await?;
        self.invalidate(user.id, invalidate).await;
        Ok(row)
    }

    /// Removes the row matched on both id and identity. Zero rows affected
    /// is a successful no-op, surfaced to the caller as such.
    pub async fn delete<R: Resource>(
        &self,
        user: Option<&CurrentUser>,
        id: Uuid,
        invalidate: &[&'static str],
    ) -> Result<u64, ResourceError> {
        let user = Self::require_user(user)?;
        let rows_affected = resource::delete::<R>(&self.db.pool, user.id, id).await?;
        self.invalidate(user.id, invalidate).await;
        if rows_affected == 0 {
            debug!(entity = R::TABLE, %id, "delete matched no rows");
        }
        Ok(rows_affected)
    }

    async fn invalidate(&self, user_id: Uuid, entities: &[&'static str]) {
        for entity in entities {
            self.cache.invalidate_entity(user_id, entity).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use db::models::{
        customer::{CreateCustomer, Customer, CustomerStatus, UpdateCustomer},
        profile::Profile,
    };

    use super::*;

    async fn setup() -> (ResourceService, CurrentUser) {
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
        (ResourceService::new(db, ResourceCache::new()), user)
    }

    fn customer(code: &str, name: &str) -> CreateCustomer {
        CreateCustomer {
            customer_code: code.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn created_hospital_customer_is_listed_under_the_hospital_filter() {
        let (service, user) = setup().await;

        let created = service
            .create::<Customer>(
                Some(&user),
                &customer("CUST-1700000000000", "Jane Doe"),
                &["customers"],
            )
            .await
            .unwrap();
        assert_eq!(created.business_type, BusinessType::Hospital);
        assert_eq!(created.status, CustomerStatus::Active);

        let listed = service
            .list::<Customer>(Some(&user), Some(BusinessType::Hospital))
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].customer_code, "CUST-1700000000000");
        assert_eq!(listed[0].name, "Jane Doe");
        assert_eq!(listed[0].status, CustomerStatus::Active);
    }

    #[tokio::test]
    async fn every_operation_requires_an_identity_before_touching_the_database() {
        let (service, _) = setup().await;
        // A closed pool turns any accidental query into a database error, so
        // the Unauthenticated variant proves the call stopped early.
        service.db.pool.close().await;

        let list = service.list::<Customer>(None, None).await;
        assert!(matches!(list, Err(ResourceError::Unauthenticated)));

        let create = service
            .create::<Customer>(None, &customer("C-1", "Ada"), &["customers"])
            .await;
        assert!(matches!(create, Err(ResourceError::Unauthenticated)));

        let update = service
            .update::<Customer>(None, Uuid::new_v4(), &UpdateCustomer::default(), &["customers"])
            .await;
        assert!(matches!(update, Err(ResourceError::Unauthenticated)));

        let delete = service
            .delete::<Customer>(None, Uuid::new_v4(), &["customers"])
            .await;
        assert!(matches!(delete, Err(ResourceError::Unauthenticated)));
    }

    #[tokio::test]
    async fn mutations_with_declared_keys_refresh_the_cached_list() {
        let (service, user) = setup().await;

        service
            .create::<Customer>(Some(&user), &customer("C-1", "Ada"), &["customers"])
            .await
            .unwrap();
        let first = service.list::<Customer>(Some(&user), None).await.unwrap();
        assert_eq!(first.len(), 1);

        service
            .create::<Customer>(Some(&user), &customer("C-2", "Bel"), &["customers"])
            .await
            .unwrap();
        let second = service.list::<Customer>(Some(&user), None).await.unwrap();
        assert_eq!(second.len(), 2);
    }

    #[tokio::test]
    async fn mutations_against_undeclared_keys_leave_stale_reads() {
        let (service, user) = setup().await;

        service
            .create::<Customer>(Some(&user), &customer("C-1", "Ada"), &["customers"])
            .await
            .unwrap();
        let cached = service.list::<Customer>(Some(&user), None).await.unwrap();
        assert_eq!(cached.len(), 1);

        // No dependent keys declared: the cached list must not notice.
        service
            .create::<Customer>(Some(&user), &customer("C-2", "Bel"), &[])
            .await
            .unwrap();
        let stale = service.list::<Customer>(Some(&user), None).await.unwrap();
        assert_eq!(stale.len(), 1);

        // An unrelated invalidation under the right key refetches.
        service
            .create::<Customer>(Some(&user), &customer("C-3", "Cyd"), &["customers"])
            .await
            .unwrap();
        let fresh = service.list::<Customer>(Some(&user), None).await.unwrap();
        assert_eq!(fresh.len(), 3);
    }

    #[tokio::test]
    async fn cached_lists_are_not_shared_across_accounts() {
        let (service, user_a) = setup().await;
        let profile_b = Profile::create(
            &service.db.pool,
            "other@example.com",
            None,
            BusinessType::Hospital,
            "digest",
            "salt",
        )
        .await
        .unwrap();
        let user_b = CurrentUser {
            id: profile_b.id,
            business_type: profile_b.business_type,
        };

        service
            .create::<Customer>(Some(&user_a), &customer("C-1", "Ada"), &["customers"])
            .await
            .unwrap();

        let mine = service.list::<Customer>(Some(&user_a), None).await.unwrap();
        assert_eq!(mine.len(), 1);

        let theirs = service.list::<Customer>(Some(&user_b), None).await.unwrap();
        assert!(theirs.is_empty());
    }

    #[tokio::test]
    async fn deleting_a_cross_tenant_id_resolves_to_zero_rows() {
        let (service, user_a) = setup().await;
        let profile_b = Profile::create(
            &service.db.pool,
            "other@example.com",
            None,
            BusinessType::Hospital,
            "digest",
            "salt",
        )
        .await
        .unwrap();
        let user_b = CurrentUser {
            id: profile_b.id,
            business_type: profile_b.business_type,
        };

        let row = service
            .create::<Customer>(Some(&user_a), &customer("C-1", "Ada"), &["customers"])
            .await
            .unwrap();

        let affected = service
            .delete::<Customer>(Some(&user_b), row.id, &["customers"])
            .await
            .unwrap();
        assert_eq!(affected, 0);

        let still_there = service
            .find_by_id::<Customer>(Some(&user_a), row.id)
            .await
            .unwrap();
        assert!(still_there.is_some());
    }
}
