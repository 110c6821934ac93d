//! PostgreSQL Repository Implementations
//!
//! Search uses the generated `search_vector` column (name weight A,
//! description weight B) and `ts_rank`. Constraint names come from the
//! `products` migration.

use chrono::{DateTime, Utc};
use kernel::error::constraint::ConstraintViolation;
use kernel::id::ProductId;
use kernel::pagination::PageRequest;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::product::{Product, ProductPatch};
use crate::domain::entity::summary::InventorySummary;
use crate::domain::repository::ProductRepository;
use crate::domain::value_object::{Price, ProductName, Quantity, SearchQuery, Sku};
use crate::error::{CatalogError, CatalogResult};

const SKU_UNIQUE: &str = "products_sku_key";
const QUANTITY_CHECK: &str = "products_quantity_check";
const PRICE_CHECK: &str = "products_price_check";

/// Text search configuration shared with the generated column
const TS_CONFIG: &str = "english";

const PRODUCT_COLUMNS: &str = r#"
    id,
    name,
    sku,
    description,
    price,
    quantity,
    image_url,
    product_type,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed product repository
#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ProductRepository for PgProductRepository {
    async fn insert(&self, product: &Product) -> CatalogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO products (
                id,
                name,
                sku,
                description,
                price,
                quantity,
                image_url,
                product_type,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(product.id.as_uuid())
        .bind(product.name.as_str())
        .bind(product.sku.as_ref().map(Sku::as_str))
        .bind(product.description.as_deref())
        .bind(product.price.amount())
        .bind(product.quantity.value())
        .bind(product.image_url.as_deref())
        .bind(product.product_type.as_deref())
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(())
    }

    async fn find_by_id(&self, id: &ProductId) -> CatalogResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProductRow::into_product))
    }

    async fn update(
        &self,
        id: &ProductId,
        patch: &ProductPatch,
        updated_at: DateTime<Utc>,
    ) -> CatalogResult<Option<Product>> {
        // For nullable columns a flag says whether to overwrite, so that
        // "set to NULL" and "leave alone" stay distinct.
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            UPDATE products SET
                name = COALESCE($2, name),
                sku = CASE WHEN $3 THEN $4 ELSE sku END,
                description = CASE WHEN $5 THEN $6 ELSE description END,
                price = COALESCE($7, price),
                quantity = COALESCE($8, quantity),
                image_url = CASE WHEN $9 THEN $10 ELSE image_url END,
                product_type = CASE WHEN $11 THEN $12 ELSE product_type END,
                updated_at = $13
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(id.as_uuid())
        .bind(patch.name.as_ref().map(ProductName::as_str))
        .bind(patch.sku.is_some())
        .bind(patch.sku.as_ref().and_then(|s| s.as_ref().map(Sku::as_str)))
        .bind(patch.description.is_some())
        .bind(patch.description.as_ref().and_then(|d| d.as_deref()))
        .bind(patch.price.map(|p| p.amount()))
        .bind(patch.quantity.map(|q| q.value()))
        .bind(patch.image_url.is_some())
        .bind(patch.image_url.as_ref().and_then(|u| u.as_deref()))
        .bind(patch.product_type.is_some())
        .bind(patch.product_type.as_ref().and_then(|t| t.as_deref()))
        .bind(updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(row.map(ProductRow::into_product))
    }

    async fn adjust_quantity(
        &self,
        id: &ProductId,
        delta: i64,
        updated_at: DateTime<Utc>,
    ) -> CatalogResult<Product> {
        // The WHERE clause is the guard: the row only changes if the result
        // is storable.
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            UPDATE products SET
                quantity = (quantity + $2)::INTEGER,
                updated_at = $3
            WHERE id = $1
              AND quantity + $2 BETWEEN 0 AND {max}
            RETURNING {PRODUCT_COLUMNS}
            "#,
            max = Quantity::MAX
        ))
        .bind(id.as_uuid())
        .bind(delta)
        .bind(updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?;

        if let Some(row) = row {
            return Ok(row.into_product());
        }

        // Nothing changed: find out why
        let current = sqlx::query_scalar::<_, i32>("SELECT quantity FROM products WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        match current {
            None => Err(CatalogError::NotFound),
            Some(quantity) if i64::from(quantity) + delta < 0 => {
                Err(CatalogError::InsufficientStock)
            }
            Some(_) => Err(CatalogError::Validation(
                "Stock would exceed the maximum quantity".to_string(),
            )),
        }
    }

    async fn delete(&self, id: &ProductId) -> CatalogResult<bool> {
        let deleted = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn list(
        &self,
        request: PageRequest,
        search: Option<&SearchQuery>,
    ) -> CatalogResult<(Vec<Product>, u64)> {
        let limit = i64::try_from(request.page_size()).unwrap_or(i64::MAX);
        let offset = i64::try_from(request.offset()).unwrap_or(i64::MAX);

        let (rows, total) = match search {
            None => {
                let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
                    .fetch_one(&self.pool)
                    .await?;

                let rows = sqlx::query_as::<_, ProductRow>(&format!(
                    r#"
                    SELECT {PRODUCT_COLUMNS}
                    FROM products
                    ORDER BY created_at DESC, id DESC
                    LIMIT $1 OFFSET $2
                    "#
                ))
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?;

                (rows, total)
            }
            Some(query) => {
                let tsquery = query.to_tsquery();

                let total = sqlx::query_scalar::<_, i64>(&format!(
                    "SELECT COUNT(*) FROM products \
                     WHERE search_vector @@ to_tsquery('{TS_CONFIG}', $1)"
                ))
                .bind(&tsquery)
                .fetch_one(&self.pool)
                .await?;

                let rows = sqlx::query_as::<_, ProductRow>(&format!(
                    r#"
                    SELECT {PRODUCT_COLUMNS}
                    FROM products, to_tsquery('{TS_CONFIG}', $1) AS query
                    WHERE search_vector @@ query
                    ORDER BY ts_rank(search_vector, query) DESC, created_at DESC, id DESC
                    LIMIT $2 OFFSET $3
                    "#
                ))
                .bind(&tsquery)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?;

                (rows, total)
            }
        };

        let items = rows.into_iter().map(ProductRow::into_product).collect();
        Ok((items, u64::try_from(total).unwrap_or(0)))
    }

    async fn summary(&self, low_stock_threshold: i32) -> CatalogResult<InventorySummary> {
        let (products, total_inventory_value, low_stock) =
            sqlx::query_as::<_, (i64, Decimal, i64)>(
                r#"
                SELECT
                    COUNT(*),
                    COALESCE(SUM(price * quantity), 0),
                    COUNT(*) FILTER (WHERE quantity <= $1)
                FROM products
                "#,
            )
            .bind(low_stock_threshold)
            .fetch_one(&self.pool)
            .await?;

        Ok(InventorySummary {
            products: u64::try_from(products).unwrap_or(0),
            total_inventory_value,
            low_stock: u64::try_from(low_stock).unwrap_or(0),
        })
    }
}

fn map_write_error(err: sqlx::Error) -> CatalogError {
    match ConstraintViolation::from_sqlx(&err) {
        Some(v) if v.is_unique_on(SKU_UNIQUE) => CatalogError::DuplicateSku,
        Some(v) if v.is_check_on(QUANTITY_CHECK) => CatalogError::InsufficientStock,
        Some(v) if v.is_check_on(PRICE_CHECK) => {
            CatalogError::Validation("Price must not be negative".to_string())
        }
        _ => CatalogError::Database(err),
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    sku: Option<String>,
    description: Option<String>,
    price: Decimal,
    quantity: i32,
    image_url: Option<String>,
    product_type: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self) -> Product {
        Product {
            id: ProductId::from_uuid(self.id),
            name: ProductName::from_db(self.name),
            sku: self.sku.map(Sku::from_db),
            description: self.description,
            price: Price::from_db(self.price),
            quantity: Quantity::from_db(self.quantity),
            image_url: self.image_url,
            product_type: self.product_type,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
