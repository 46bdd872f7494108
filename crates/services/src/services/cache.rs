//! Process-wide read cache for resource lists.
//!
//! Keys carry the account id: the cache is shared by every session in the
//! process, so leaving the account out of the key would let one tenant read
//! another tenant's cached rows.

use std::{any::Any, sync::Arc};

use db::models::business::BusinessType;
use moka::future::Cache;
use uuid::Uuid;

const MAX_ENTRIES: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub user_id: Uuid,
    pub entity: &'static str,
    pub filter: Option<BusinessType>,
}

type CachedValue = Arc<dyn Any + Send + Sync>;

/// Caches the last successful fetch per (account, entity, filter). Values
/// are type-erased; the entity name in the key pins the concrete row type.
#[derive(Clone)]
pub struct ResourceCache {
    inner: Cache<CacheKey, CachedValue>,
}

impl ResourceCache {
    pub fn new() -> Self {
        Self {
            inner: Cache::new(MAX_ENTRIES),
        }
    }

    pub async fn get<T: Send + Sync + 'static>(&self, key: &CacheKey) -> Option<Arc<T>> {
        let value = self.inner.get(key).await?;
        value.downcast::<T>().ok()
    }

    pub async fn insert<T: Send + Sync + 'static>(&self, key: CacheKey, value: Arc<T>) {
        self.inner.insert(key, value).await;
    }

    /// Drops every cached list for one entity under one account: the
    /// unfiltered key plus one key per business type. Exact-key removal over
    /// a finite filter set, so unrelated entries survive.
    pub async fn invalidate_entity(&self, user_id: Uuid, entity: &'static str) {
        self.inner
            .invalidate(&CacheKey {
                user_id,
                entity,
                filter: None,
            })
            .await;
        for business_type in BusinessType::ALL {
            self.inner
                .invalidate(&CacheKey {
                    user_id,
                    entity,
                    filter: Some(business_type),
                })
                .await;
        }
    }
}

impl Default for ResourceCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn invalidation_is_scoped_to_entity_and_account() {
        let cache = ResourceCache::new();
        let user_a = Uuid::new_v4();
        let user_b = Uuid::new_v4();

        let key_a = CacheKey {
            user_id: user_a,
            entity: "customers",
            filter: Some(BusinessType::Hospital),
        };
        let key_b = CacheKey {
            user_id: user_b,
            entity: "customers",
            filter: Some(BusinessType::Hospital),
        };

        cache.insert(key_a.clone(), Arc::new(vec![1u32])).await;
        cache.insert(key_b.clone(), Arc::new(vec![2u32])).await;

        cache.invalidate_entity(user_a, "customers").await;

        assert!(cache.get::<Vec<u32>>(&key_a).await.is_none());
        assert_eq!(*cache.get::<Vec<u32>>(&key_b).await.unwrap(), vec![2u32]);
    }
}
