//! Generic, tenant-scoped data access for the CRM resources.
//!
//! Every statement issued here carries `user_id = ?`, so tenant isolation is
//! enforced in exactly one place instead of being repeated per entity. The
//! per-entity pieces (table name, column lists, ordering, bind order) are
//! declared through [`Resource`].

use chrono::Utc;
use sqlx::{
    Sqlite, SqlitePool,
    sqlite::{SqliteArguments, SqliteRow},
};
use uuid::Uuid;

use crate::models::business::BusinessType;

pub type SqliteQuery<'q> = sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>;

/// List ordering rule for an entity.
pub struct Ordering {
    pub column: &'static str,
    pub ascending: bool,
}

/// Declares how one entity maps onto its table.
///
/// `bind_create` must bind exactly `INSERT_COLUMNS` values in order;
/// `bind_update` must bind exactly `UPDATE_COLUMNS` values in order, using
/// `None` for fields the caller did not supply.
pub trait Resource:
    for<'r> sqlx::FromRow<'r, SqliteRow> + Send + Sync + Unpin + 'static
{
    const TABLE: &'static str;
    /// Column list for reads. Entities with declared relations select the
    /// related display names here as correlated subqueries.
    const SELECT_COLUMNS: &'static str = "*";
    const INSERT_COLUMNS: &'static [&'static str];
    const UPDATE_COLUMNS: &'static [&'static str];
    const ORDER_BY: Ordering = Ordering {
        column: "created_at",
        ascending: false,
    };

    type Create: Send + Sync;
    type Update: Send + Sync;

    fn bind_create<'q>(query: SqliteQuery<'q>, data: &'q Self::Create) -> SqliteQuery<'q>;
    fn bind_update<'q>(query: SqliteQuery<'q>, data: &'q Self::Update) -> SqliteQuery<'q>;
}

/// All rows of the calling account, optionally narrowed to one business
/// type, in the entity's declared order.
pub async fn list<R: Resource>(
    pool: &SqlitePool,
    user_id: Uuid,
    business_type: Option<BusinessType>,
) -> Result<Vec<R>, sqlx::Error> {
    let mut sql = format!(
        "SELECT {} FROM {} WHERE user_id = $1",
        R::SELECT_COLUMNS,
        R::TABLE
    );
    if business_type.is_some() {
        sql.push_str(" AND business_type = $2");
    }
    sql.push_str(&format!(
        " ORDER BY {} {}",
        R::ORDER_BY.column,
        if R::ORDER_BY.ascending { "ASC" } else { "DESC" }
    ));

    let mut query = sqlx::query_as::<_, R>(&sql).bind(user_id);
    if let Some(bt) = business_type {
        query = query.bind(bt);
    }
    query.fetch_all(pool).await
}

pub async fn find_by_id<R: Resource>(
    pool: &SqlitePool,
    user_id: Uuid,
    id: Uuid,
) -> Result<Option<R>, sqlx::Error> {
    let sql = format!(
        "SELECT {} FROM {} WHERE id = $1 AND user_id = $2",
        R::SELECT_COLUMNS,
        R::TABLE
    );
    sqlx::query_as::<_, R>(&sql)
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Inserts one row stamped with the account identity, the account's active
/// business type, and both timestamps, then reads it back through the
/// canonical select so relation names are populated.
pub async fn insert<R: Resource>(
    pool: &SqlitePool,
    user_id: Uuid,
    business_type: BusinessType,
    data: &R::Create,
) -> Result<R, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let mut columns = vec!["id", "user_id", "business_type", "created_at", "updated_at"];
    columns.extend_from_slice(R::INSERT_COLUMNS);
    let placeholders = (1..=columns.len())
        .map(|i| format!("${i}"))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        R::TABLE,
        columns.join(", "),
        placeholders
    );

    let query = sqlx::query(&sql)
        .bind(id)
        .bind(user_id)
        .bind(business_type)
        .bind(now)
        .bind(now);
    R::bind_create(query, data).execute(pool).await?;

    find_by_id::<R>(pool, user_id, id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)
}

/// Partial update: each column is written as `COALESCE(?, column)`, so only
/// the supplied fields change. Returns the updated row, or `None` when no
/// row matched the id under this account.
pub async fn update<R: Resource>(
    pool: &SqlitePool,
    user_id: Uuid,
    id: Uuid,
    data: &R::Update,
) -> Result<Option<R>, sqlx::Error> {
    let mut sets = R::UPDATE_COLUMNS
        .iter()
        .enumerate()
        .map(|(i, col)| format!("{col} = COALESCE(${}, {col})", i + 3))
        .collect::<Vec<_>>();
    sets.push(format!("updated_at = ${}", R::UPDATE_COLUMNS.len() + 3));
    let sql = format!(
        "UPDATE {} SET {} WHERE id = $1 AND user_id = $2",
        R::TABLE,
        sets.join(", ")
    );

    let query = sqlx::query(&sql).bind(id).bind(user_id);
    let query = R::bind_update(query, data).bind(Utc::now());
    let result = query.execute(pool).await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    find_by_id::<R>(pool, user_id, id).await
}

/// Removes the row matching both the id and the account. Returns rows
/// affected; deleting a missing or cross-tenant id is a zero-row no-op,
/// not an error.
pub async fn delete<R: Resource>(
    pool: &SqlitePool,
    user_id: Uuid,
    id: Uuid,
) -> Result<u64, sqlx::Error> {
    let sql = format!("DELETE FROM {} WHERE id = $1 AND user_id = $2", R::TABLE);
    let result = sqlx::query(&sql).bind(id).bind(user_id).execute(pool).await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        DBService,
        models::{
            appointment::{Appointment, CreateAppointment},
            business::BusinessType,
            customer::{CreateCustomer, Customer, CustomerStatus, UpdateCustomer},
            order::{CreateOrder, Order},
            profile::Profile,
            supplier::{CreateSupplier, Supplier},
        },
    };

    async fn setup() -> (SqlitePool, Uuid) {
        let db = DBService::new_in_memory().await.unwrap();
        let user = new_account(&db.pool, "owner@example.com").await;
        (db.pool, user)
    }

    async fn new_account(pool: &SqlitePool, email: &str) -> Uuid {
        let profile = Profile::create(
            pool,
            email,
            Some("Test Account"),
            BusinessType::Hospital,
            "digest",
            "salt",
        )
        .await
        .unwrap();
        profile.id
    }

    fn customer(code: &str, name: &str) -> CreateCustomer {
        CreateCustomer {
            customer_code: code.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn rows_are_scoped_to_the_creating_account() {
        let (pool, user_a) = setup().await;
        let user_b = new_account(&pool, "other@example.com").await;

        insert::<Customer>(&pool, user_a, BusinessType::Hospital, &customer("C-1", "Ada"))
            .await
            .unwrap();

        let theirs = list::<Customer>(&pool, user_b, None).await.unwrap();
        assert!(theirs.is_empty());

        let mine = list::<Customer>(&pool, user_a, None).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].name, "Ada");
    }

    #[tokio::test]
    async fn business_type_filter_is_exact() {
        let (pool, user) = setup().await;

        insert::<Customer>(&pool, user, BusinessType::Hospital, &customer("C-1", "Ada"))
            .await
            .unwrap();
        insert::<Customer>(&pool, user, BusinessType::Warehouse, &customer("C-2", "Bel"))
            .await
            .unwrap();

        let hospital = list::<Customer>(&pool, user, Some(BusinessType::Hospital))
            .await
            .unwrap();
        assert_eq!(hospital.len(), 1);
        assert_eq!(hospital[0].business_type, BusinessType::Hospital);

        let all = list::<Customer>(&pool, user, None).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn customers_come_back_newest_first() {
        let (pool, user) = setup().await;

        for i in 0..4 {
            insert::<Customer>(
                &pool,
                user,
                BusinessType::Hospital,
                &customer(&format!("C-{i}"), &format!("Customer {i}")),
            )
            .await
            .unwrap();
        }

        let rows = list::<Customer>(&pool, user, None).await.unwrap();
        assert_eq!(rows.len(), 4);
        for pair in rows.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
        assert_eq!(rows[0].customer_code, "C-3");
        assert_eq!(rows[3].customer_code, "C-0");
    }

    #[tokio::test]
    async fn appointments_come_back_soonest_first() {
        let (pool, user) = setup().await;
        let patient = insert::<Customer>(
            &pool,
            user,
            BusinessType::Hospital,
            &customer("C-1", "Ada"),
        )
        .await
        .unwrap();

        for (n, date) in [("A-1", "2026-09-20"), ("A-2", "2026-08-10"), ("A-3", "2026-12-01")] {
            let data = CreateAppointment {
                appointment_number: n.to_string(),
                appointment_date: date.to_string(),
                customer_id: patient.id,
                ..Default::default()
            };
            insert::<Appointment>(&pool, user, BusinessType::Hospital, &data)
                .await
                .unwrap();
        }

        let rows = list::<Appointment>(&pool, user, None).await.unwrap();
        let dates: Vec<&str> = rows.iter().map(|a| a.appointment_date.as_str()).collect();
        assert_eq!(dates, vec!["2026-08-10", "2026-09-20", "2026-12-01"]);
    }

    #[tokio::test]
    async fn update_only_touches_supplied_fields_and_is_idempotent() {
        let (pool, user) = setup().await;
        let mut data = customer("C-1", "Ada");
        data.city = Some("Wellington".to_string());
        let row = insert::<Customer>(&pool, user, BusinessType::Hospital, &data)
            .await
            .unwrap();

        let patch = UpdateCustomer {
            name: Some("Ada Lovelace".to_string()),
            ..Default::default()
        };

        let first = update::<Customer>(&pool, user, row.id, &patch)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(first.name, "Ada Lovelace");
        assert_eq!(first.city.as_deref(), Some("Wellington"));
        assert_eq!(first.status, CustomerStatus::Active);

        let second = update::<Customer>(&pool, user, row.id, &patch)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(second.name, first.name);
        assert_eq!(second.city, first.city);
        assert_eq!(second.status, first.status);
    }

    #[tokio::test]
    async fn update_never_crosses_tenants() {
        let (pool, user_a) = setup().await;
        let user_b = new_account(&pool, "other@example.com").await;
        let row = insert::<Customer>(&pool, user_a, BusinessType::Hospital, &customer("C-1", "Ada"))
            .await
            .unwrap();

        let patch = UpdateCustomer {
            name: Some("Hijacked".to_string()),
            ..Default::default()
        };
        let outcome = update::<Customer>(&pool, user_b, row.id, &patch).await.unwrap();
        assert!(outcome.is_none());

        let untouched = find_by_id::<Customer>(&pool, user_a, row.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(untouched.name, "Ada");
    }

    #[tokio::test]
    async fn delete_of_missing_or_foreign_row_is_a_zero_row_noop() {
        let (pool, user_a) = setup().await;
        let user_b = new_account(&pool, "other@example.com").await;
        let row = insert::<Customer>(&pool, user_a, BusinessType::Hospital, &customer("C-1", "Ada"))
            .await
            .unwrap();

        assert_eq!(delete::<Customer>(&pool, user_a, Uuid::new_v4()).await.unwrap(), 0);
        assert_eq!(delete::<Customer>(&pool, user_b, row.id).await.unwrap(), 0);
        assert_eq!(delete::<Customer>(&pool, user_a, row.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn orders_join_customer_and_supplier_names() {
        let (pool, user) = setup().await;
        let cust = insert::<Customer>(&pool, user, BusinessType::Hospital, &customer("C-1", "Ada"))
            .await
            .unwrap();
        let supp = insert::<Supplier>(
            &pool,
            user,
            BusinessType::Hospital,
            &CreateSupplier {
                supplier_code: "S-1".to_string(),
                name: "MedSupply Ltd".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let order = insert::<Order>(
            &pool,
            user,
            BusinessType::Hospital,
            &CreateOrder {
                order_number: "ORD-1".to_string(),
                order_type: Some("medical_supply".to_string()),
                customer_id: Some(cust.id),
                supplier_id: Some(supp.id),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(order.customer_name.as_deref(), Some("Ada"));
        assert_eq!(order.supplier_name.as_deref(), Some("MedSupply Ltd"));
    }
}
