//! Aggregate counts for the dashboard, scoped like every other read: by
//! account and the account's active business type.

use db::DBService;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::{
    auth::CurrentUser,
    resources::ResourceError,
};
use db::models::business::BusinessType;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct DashboardStats {
    pub total_customers: i64,
    pub total_products: i64,
    pub total_orders: i64,
    pub total_suppliers: i64,
    pub total_appointments: i64,
    pub total_revenue: f64,
    pub low_stock_products: i64,
}

#[derive(Clone)]
pub struct DashboardService {
    db: DBService,
}

impl DashboardService {
    pub fn new(db: DBService) -> Self {
        Self { db }
    }

    pub async fn stats(&self, user: Option<&CurrentUser>) -> Result<DashboardStats, ResourceError> {
        let user = user.ok_or(ResourceError::Unauthenticated)?;

        Ok(DashboardStats {
            total_customers: self.count("customers", user.id, user.business_type).await?,
            total_products: self.count("products", user.id, user.business_type).await?,
            total_orders: self.count("orders", user.id, user.business_type).await?,
            total_suppliers: self.count("suppliers", user.id, user.business_type).await?,
            total_appointments: self.count("appointments", user.id, user.business_type).await?,
            total_revenue: self.revenue(user.id, user.business_type).await?,
            low_stock_products: self.low_stock(user.id, user.business_type).await?,
        })
    }

    async fn count(
        &self,
        table: &str,
        user_id: Uuid,
        business_type: BusinessType,
    ) -> Result<i64, sqlx::Error> {
        let sql = format!("SELECT COUNT(*) FROM {table} WHERE user_id = $1 AND business_type = $2");
        sqlx::query_scalar::<_, i64>(&sql)
            .bind(user_id)
            .bind(business_type)
            .fetch_one(&self.db.pool)
            .await
    }

    async fn revenue(
        &self,
        user_id: Uuid,
        business_type: BusinessType,
    ) -> Result<f64, sqlx::Error> {
        let total: Option<f64> = sqlx::query_scalar(
            "SELECT SUM(total_amount) FROM orders WHERE user_id = $1 AND business_type = $2",
        )
        .bind(user_id)
        .bind(business_type)
        .fetch_one(&self.db.pool)
        .await?;
        Ok(total.unwrap_or(0.0))
    }

    async fn low_stock(
        &self,
        user_id: Uuid,
        business_type: BusinessType,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM products
               WHERE user_id = $1 AND business_type = $2
                 AND quantity_in_stock IS NOT NULL
                 AND minimum_stock_level IS NOT NULL
                 AND quantity_in_stock < minimum_stock_level"#,
        )
        .bind(user_id)
        .bind(business_type)
        .fetch_one(&self.db.pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use db::{
        models::{
            customer::{CreateCustomer, Customer},
            order::{CreateOrder, Order},
            product::{CreateProduct, Product},
            profile::Profile,
        },
        resource,
    };

    use super::*;

    #[tokio::test]
    async fn stats_cover_only_the_active_business_type() {
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

        resource::insert::<Customer>(
            &db.pool,
            user.id,
            BusinessType::Hospital,
            &CreateCustomer {
                customer_code: "C-1".to_string(),
                name: "Ada".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        // A row under another business type must not count.
        resource::insert::<Customer>(
            &db.pool,
            user.id,
            BusinessType::Warehouse,
            &CreateCustomer {
                customer_code: "C-2".to_string(),
                name: "Bel".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        for (number, total) in [("ORD-1", 120.0), ("ORD-2", 80.0)] {
            resource::insert::<Order>(
                &db.pool,
                user.id,
                BusinessType::Hospital,
                &CreateOrder {
                    order_number: number.to_string(),
                    order_type: Some("medical_supply".to_string()),
                    total_amount: Some(total),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        }

        resource::insert::<Product>(
            &db.pool,
            user.id,
            BusinessType::Hospital,
            &CreateProduct {
                product_code: "P-1".to_string(),
                name: "Gauze".to_string(),
                quantity_in_stock: Some(2),
                minimum_stock_level: Some(10),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let stats = DashboardService::new(db).stats(Some(&user)).await.unwrap();
        assert_eq!(stats.total_customers, 1);
        assert_eq!(stats.total_orders, 2);
        assert_eq!(stats.total_revenue, 200.0);
        assert_eq!(stats.low_stock_products, 1);
    }

    #[tokio::test]
    async fn stats_require_an_identity() {
        let db = DBService::new_in_memory().await.unwrap();
        let outcome = DashboardService::new(db).stats(None).await;
        assert!(matches!(outcome, Err(ResourceError::Unauthenticated)));
    }
}
