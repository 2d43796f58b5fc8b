//! # Product Repository
//!
//! Database operations for catalog products.
//!
//! ## Key Operations
//! - CRUD with SKU uniqueness
//! - Listing with substring search, stock filter, sorting, pagination
//!
//! ## Listing Query Construction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 How a Listing Query is Built                            │
//! │                                                                         │
//! │  GET /products?q=wid&in_stock=true&sort=price:asc&skip=10&limit=10     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SELECT ... FROM products                                              │
//! │    WHERE (name LIKE '%wid%' OR sku LIKE '%wid%')   ← only if q given   │
//! │      AND in_stock = 1                              ← only if given     │
//! │    ORDER BY price_cents ASC                        ← enum-resolved     │
//! │    LIMIT 10 OFFSET 10                                                  │
//! │                                                                         │
//! │  The sort column comes from the SortField enum, never from caller      │
//! │  text, so no user input is ever interpolated into SQL.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use stockroom_core::{NewProduct, Price, Product, ProductPatch, ProductQuery};

// =============================================================================
// Row Mapping
// =============================================================================

/// Raw table row. Kept separate from the domain `Product` so the cents
/// column maps onto the `Price` newtype in exactly one place.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    sku: String,
    name: String,
    description: Option<String>,
    price_cents: i64,
    in_stock: bool,
    created_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            sku: row.sku,
            name: row.name,
            description: row.description,
            price: Price::from_cents(row.price_cents),
            in_stock: row.in_stock,
            created_at: row.created_at,
        }
    }
}

const SELECT_COLUMNS: &str =
    "SELECT id, sku, name, description, price_cents, in_stock, created_at FROM products";

// =============================================================================
// Repository
// =============================================================================

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
/// let product = repo.create(&input).await?;
/// let page = repo.list(&ProductQuery::default()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a new product, assigning its id and creation timestamp.
    ///
    /// Runs as a single transaction: the SKU pre-check and the insert
    /// either both happen or neither does. The pre-check gives a clean
    /// conflict message; the unique index remains the authority when two
    /// creates race on the same SKU (the loser's insert fails and also
    /// maps to `UniqueViolation`).
    ///
    /// ## Returns
    /// * `Ok(Product)` - stored record with generated fields
    /// * `Err(DbError::UniqueViolation)` - SKU already exists
    pub async fn create(&self, input: &NewProduct) -> DbResult<Product> {
        debug!(sku = %input.sku, "Inserting product");

        let mut tx = self.pool.begin().await?;

        let taken: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE sku = ?")
            .bind(&input.sku)
            .fetch_one(&mut *tx)
            .await?;
        if taken > 0 {
            return Err(DbError::duplicate("sku", &input.sku));
        }

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO products (sku, name, description, price_cents, in_stock, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&input.sku)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price.cents())
        .bind(input.in_stock)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Product {
            id: result.last_insert_rowid(),
            sku: input.sku.clone(),
            name: input.name.clone(),
            description: input.description.clone(),
            price: input.price,
            in_stock: input.in_stock,
            created_at: now,
        })
    }

    /// Lists products matching the query.
    ///
    /// Filters are a conjunction: substring match on name OR sku (when `q`
    /// is present and non-blank) AND exact stock status (when given).
    /// SQLite's LIKE is case-insensitive for ASCII, matching the listing
    /// contract. Empty result sets are valid, not an error.
    pub async fn list(&self, query: &ProductQuery) -> DbResult<Vec<Product>> {
        debug!(
            q = ?query.search_term(),
            in_stock = ?query.in_stock,
            skip = query.skip,
            limit = query.limit,
            "Listing products"
        );

        let mut builder = QueryBuilder::<Sqlite>::new(SELECT_COLUMNS);
        let mut prefix = " WHERE ";

        if let Some(term) = query.search_term() {
            let pattern = format!("%{term}%");
            builder.push(prefix);
            builder.push("(name LIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR sku LIKE ");
            builder.push_bind(pattern);
            builder.push(")");
            prefix = " AND ";
        }

        if let Some(flag) = query.in_stock {
            builder.push(prefix);
            builder.push("in_stock = ");
            builder.push_bind(flag);
        }

        // Column and direction come from enums, not caller strings.
        builder.push(" ORDER BY ");
        builder.push(query.sort.field.column());
        builder.push(" ");
        builder.push(query.sort.direction.sql());

        builder.push(" LIMIT ");
        builder.push_bind(query.limit);
        builder.push(" OFFSET ");
        builder.push_bind(query.skip);

        let rows: Vec<ProductRow> = builder.build_query_as().fetch_all(&self.pool).await?;

        debug!(count = rows.len(), "Listing returned products");
        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Gets a product by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - product found
    /// * `Ok(None)` - no row with that id
    pub async fn get(&self, id: i64) -> DbResult<Option<Product>> {
        let row: Option<ProductRow> =
            sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE id = ?"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(Product::from))
    }

    /// Applies a partial update to a product.
    ///
    /// Runs as a single transaction: load, conflict check, write. Only
    /// fields supplied in the patch change; `created_at` is never written.
    ///
    /// ## Returns
    /// * `Ok(Product)` - the updated record
    /// * `Err(DbError::NotFound)` - no row with that id
    /// * `Err(DbError::UniqueViolation)` - the new SKU belongs to another row
    pub async fn update(&self, id: i64, patch: &ProductPatch) -> DbResult<Product> {
        debug!(id, "Updating product");

        let mut tx = self.pool.begin().await?;

        let row: Option<ProductRow> =
            sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE id = ?"))
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let mut product: Product = row.ok_or_else(|| DbError::not_found("Product", id))?.into();

        // Re-check uniqueness only when the SKU actually changes,
        // excluding the row being updated.
        if let Some(new_sku) = &patch.sku {
            if *new_sku != product.sku {
                let taken: i64 = sqlx::query_scalar(
                    "SELECT COUNT(*) FROM products WHERE sku = ? AND id <> ?",
                )
                .bind(new_sku)
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
                if taken > 0 {
                    return Err(DbError::duplicate("sku", new_sku));
                }
            }
        }

        patch.apply(&mut product);

        sqlx::query(
            r#"
            UPDATE products
            SET sku = ?, name = ?, description = ?, price_cents = ?, in_stock = ?
            WHERE id = ?
            "#,
        )
        .bind(&product.sku)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price.cents())
        .bind(product.in_stock)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(product)
    }

    /// Permanently deletes a product.
    ///
    /// ## Returns
    /// * `Ok(())` - row removed
    /// * `Err(DbError::NotFound)` - no row with that id
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use stockroom_core::{SortSpec, ValidationError};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn input(sku: &str, name: &str, cents: i64, in_stock: bool) -> NewProduct {
        NewProduct {
            sku: sku.to_string(),
            name: name.to_string(),
            description: None,
            price: Price::from_cents(cents),
            in_stock,
        }
    }

    async fn seed(db: &Database) -> Vec<Product> {
        let repo = db.products();
        let mut out = Vec::new();
        out.push(repo.create(&input("WID-1", "Widget", 1000, true)).await.unwrap());
        out.push(repo.create(&input("WID-2", "Widget Deluxe", 2500, false)).await.unwrap());
        out.push(repo.create(&input("GAD-1", "Gadget", 500, true)).await.unwrap());
        out.push(repo.create(&input("GIZ-1", "Gizmo", 1999, true)).await.unwrap());
        out
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamp() {
        let db = test_db().await;
        let product = db
            .products()
            .create(&input("A1", "Widget", 1000, true))
            .await
            .unwrap();

        assert!(product.id > 0);
        assert_eq!(product.price.cents(), 1000);
        // created_at is system-assigned, roughly "now"
        assert!((Utc::now() - product.created_at).num_seconds() < 5);
    }

    #[tokio::test]
    async fn test_create_duplicate_sku_conflicts() {
        let db = test_db().await;
        let repo = db.products();
        repo.create(&input("A1", "Widget", 1000, true)).await.unwrap();

        let err = repo
            .create(&input("A1", "Other", 500, true))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_unique_index_backs_up_the_precheck() {
        // Insert behind the repository's back to prove the constraint
        // itself rejects duplicates.
        let db = test_db().await;
        db.products()
            .create(&input("A1", "Widget", 1000, true))
            .await
            .unwrap();

        let err = sqlx::query(
            "INSERT INTO products (sku, name, price_cents, in_stock, created_at) \
             VALUES ('A1', 'Clone', 1, 1, '2024-01-01T00:00:00Z')",
        )
        .execute(db.pool())
        .await
        .map_err(DbError::from)
        .unwrap_err();

        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let db = test_db().await;
        let created = db
            .products()
            .create(&input("A1", "Widget", 1000, true))
            .await
            .unwrap();

        let fetched = db.products().get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);

        assert!(db.products().get(99_999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_search_matches_name_or_sku() {
        let db = test_db().await;
        seed(&db).await;

        // "wid" appears in the names "Widget*" and the skus "WID-*"
        let query = ProductQuery {
            q: Some("wid".to_string()),
            ..ProductQuery::default()
        };
        let found = db.products().list(&query).await.unwrap();
        assert_eq!(found.len(), 2);

        // sku-only hit, case-insensitive
        let query = ProductQuery {
            q: Some("gad".to_string()),
            ..ProductQuery::default()
        };
        let found = db.products().list(&query).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].sku, "GAD-1");
    }

    #[tokio::test]
    async fn test_list_blank_q_disables_filter() {
        let db = test_db().await;
        seed(&db).await;

        let query = ProductQuery {
            q: Some("   ".to_string()),
            ..ProductQuery::default()
        };
        let found = db.products().list(&query).await.unwrap();
        assert_eq!(found.len(), 4);
    }

    #[tokio::test]
    async fn test_list_in_stock_filter() {
        let db = test_db().await;
        seed(&db).await;
        let repo = db.products();

        let in_stock = repo
            .list(&ProductQuery {
                in_stock: Some(true),
                ..ProductQuery::default()
            })
            .await
            .unwrap();
        assert_eq!(in_stock.len(), 3);
        assert!(in_stock.iter().all(|p| p.in_stock));

        let out_of_stock = repo
            .list(&ProductQuery {
                in_stock: Some(false),
                ..ProductQuery::default()
            })
            .await
            .unwrap();
        assert_eq!(out_of_stock.len(), 1);
        assert_eq!(out_of_stock[0].sku, "WID-2");

        let all = repo.list(&ProductQuery::default()).await.unwrap();
        assert_eq!(all.len(), 4);
    }

    #[tokio::test]
    async fn test_list_pagination_slices_ordered_result() {
        let db = test_db().await;
        seed(&db).await;

        let base = ProductQuery {
            sort: SortSpec::parse("id:asc"),
            skip: 0,
            limit: 100,
            ..ProductQuery::default()
        };
        let all = db.products().list(&base).await.unwrap();

        let page = db
            .products()
            .list(&ProductQuery {
                skip: 1,
                limit: 2,
                ..base.clone()
            })
            .await
            .unwrap();

        assert_eq!(page.len(), 2);
        assert_eq!(page[0], all[1]);
        assert_eq!(page[1], all[2]);
    }

    #[tokio::test]
    async fn test_list_skip_past_end_is_empty() {
        let db = test_db().await;
        seed(&db).await;

        let found = db
            .products()
            .list(&ProductQuery {
                skip: 100,
                ..ProductQuery::default()
            })
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_list_sort_by_price() {
        let db = test_db().await;
        seed(&db).await;
        let repo = db.products();

        let asc = repo
            .list(&ProductQuery {
                sort: SortSpec::parse("price:asc"),
                ..ProductQuery::default()
            })
            .await
            .unwrap();
        let cents: Vec<i64> = asc.iter().map(|p| p.price.cents()).collect();
        assert_eq!(cents, vec![500, 1000, 1999, 2500]);

        let desc = repo
            .list(&ProductQuery {
                sort: SortSpec::parse("price:desc"),
                ..ProductQuery::default()
            })
            .await
            .unwrap();
        let cents: Vec<i64> = desc.iter().map(|p| p.price.cents()).collect();
        assert_eq!(cents, vec![2500, 1999, 1000, 500]);
    }

    #[tokio::test]
    async fn test_list_bogus_sort_falls_back_to_created_at() {
        let db = test_db().await;
        seed(&db).await;

        // Unknown field: falls back to created_at, direction still honored.
        let found = db
            .products()
            .list(&ProductQuery {
                sort: SortSpec::parse("bogus:asc"),
                ..ProductQuery::default()
            })
            .await
            .unwrap();
        assert_eq!(found.len(), 4);
        assert!(found.windows(2).all(|w| w[0].created_at <= w[1].created_at));

        let found = db
            .products()
            .list(&ProductQuery {
                sort: SortSpec::parse("bogus:whatever"),
                ..ProductQuery::default()
            })
            .await
            .unwrap();
        assert!(found.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }

    #[tokio::test]
    async fn test_update_changes_only_supplied_fields() {
        let db = test_db().await;
        let created = db
            .products()
            .create(&NewProduct {
                description: Some("blue".to_string()),
                ..input("A1", "Widget", 1000, true)
            })
            .await
            .unwrap();

        let patch = ProductPatch {
            price: Some(Price::from_cents(999)),
            ..ProductPatch::default()
        };
        let updated = db.products().update(created.id, &patch).await.unwrap();

        assert_eq!(updated.price.cents(), 999);
        assert_eq!(updated.sku, created.sku);
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.description, created.description);
        assert_eq!(updated.in_stock, created.in_stock);
        assert_eq!(updated.created_at, created.created_at);

        // And the write is durable, not just the returned struct.
        let fetched = db.products().get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.price.cents(), 999);
        assert_eq!(fetched.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_update_sku_conflict() {
        let db = test_db().await;
        let repo = db.products();
        repo.create(&input("A1", "Widget", 1000, true)).await.unwrap();
        let other = repo.create(&input("B2", "Gadget", 500, true)).await.unwrap();

        let patch = ProductPatch {
            sku: Some("A1".to_string()),
            ..ProductPatch::default()
        };
        let err = repo.update(other.id, &patch).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));

        // Re-submitting the row's own SKU is not a conflict.
        let patch = ProductPatch {
            sku: Some("B2".to_string()),
            ..ProductPatch::default()
        };
        assert!(repo.update(other.id, &patch).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_missing_not_found() {
        let db = test_db().await;
        let err = db
            .products()
            .update(42, &ProductPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_then_get_not_found() {
        let db = test_db().await;
        let created = db
            .products()
            .create(&input("A1", "Widget", 1000, true))
            .await
            .unwrap();

        db.products().delete(created.id).await.unwrap();
        assert!(db.products().get(created.id).await.unwrap().is_none());

        let err = db.products().delete(created.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_price_round_trips_exactly() {
        let db = test_db().await;
        let created = db
            .products()
            .create(&input("A1", "Widget", 1999, true))
            .await
            .unwrap();

        let fetched = db.products().get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.price, Price::from_cents(1999));
        assert_eq!(fetched.price.to_string(), "19.99");
    }

    #[test]
    fn test_core_validation_is_wired_for_inputs() {
        // The repository trusts callers to validate first; double-check
        // the rule exists for the values tests rely on.
        assert!(matches!(
            input("A", "Widget", 1000, true).validate(),
            Err(ValidationError::TooShort { field: "sku", .. })
        ));
    }
}
