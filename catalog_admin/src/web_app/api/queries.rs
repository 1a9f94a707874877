// web_app/api/queries.rs - Postgres implementation of ProductStore
//
// Plain sqlx queries over `<schema>.delivery_products`. Rows are mapped
// through an intermediate `ProductRow` so the category text column can be
// checked before it becomes a `Category`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::catalog::model::{Product, ProductFields, ProductId, ProductPatch};
use crate::catalog::store::{reject_invalid, ProductStore, StoreError};
use crate::fixtures::tables::products::TABLE_NAME;

const COLUMNS: &str = "id, name, category, price, original_price, description, image_url, \
                       is_active, is_weighable, price_per_gram, complement_groups, sizes, \
                       scheduled_days, availability_type, created_at, updated_at";

/// Helper struct for mapping SQL rows to Product
#[derive(Clone, sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    category: String,
    price: Decimal,
    original_price: Option<Decimal>,
    description: String,
    image_url: Option<String>,
    is_active: bool,
    is_weighable: bool,
    price_per_gram: Option<Decimal>,
    complement_groups: Option<serde_json::Value>,
    sizes: Option<serde_json::Value>,
    scheduled_days: Option<serde_json::Value>,
    availability_type: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = StoreError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let category = row
            .category
            .parse()
            .map_err(|e| StoreError::Transport(format!("product {}: {}", row.id, e)))?;

        Ok(Product {
            id: row.id,
            name: row.name,
            category,
            price: row.price,
            original_price: row.original_price,
            description: row.description,
            image_url: row.image_url,
            is_active: row.is_active,
            is_weighable: row.is_weighable,
            price_per_gram: row.price_per_gram,
            complement_groups: row.complement_groups,
            sizes: row.sizes,
            scheduled_days: row.scheduled_days,
            availability_type: row.availability_type,
            created_at: Some(row.created_at),
            updated_at: Some(row.updated_at),
        })
    }
}

/// Map a database error onto the store taxonomy.
/// Constraint and input-syntax violations are the client's fault.
fn store_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if let Some(code) = db_err.code() {
            // not_null_violation, check_violation, invalid_text_representation
            if matches!(code.as_ref(), "23502" | "23514" | "22P02") {
                return StoreError::Validation(db_err.message().to_string());
            }
        }
    }
    tracing::error!("Database error: {}", err);
    StoreError::transport(err)
}

/// Product store backed by a Postgres table
#[derive(Clone, Debug)]
pub struct PgProductStore {
    pool: PgPool,
    schema: String,
}

impl PgProductStore {
    /// `schema` must be a trusted identifier; it is interpolated into SQL
    pub fn new(pool: PgPool, schema: impl Into<String>) -> Self {
        PgProductStore {
            pool,
            schema: schema.into(),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    fn table(&self) -> String {
        format!("{}.{}", self.schema, TABLE_NAME)
    }

    /// Number of stored products
    pub async fn count(&self) -> Result<i64, StoreError> {
        let sql = format!("SELECT COUNT(*) FROM {}", self.table());
        let row: (i64,) = sqlx::query_as(&sql)
            .fetch_one(&self.pool)
            .await
            .map_err(store_error)?;
        Ok(row.0)
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY created_at ASC, name ASC",
            COLUMNS,
            self.table()
        );

        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(store_error)?;

        tracing::debug!("Listed {} products", rows.len());
        rows.into_iter().map(Product::try_from).collect()
    }

    async fn create(&self, fields: ProductFields) -> Result<Product, StoreError> {
        reject_invalid(&fields)?;

        let sql = format!(
            r#"
            INSERT INTO {} (
                name, category, price, original_price, description, image_url,
                is_active, is_weighable, price_per_gram, complement_groups, sizes,
                scheduled_days, availability_type
            ) VALUES (
                $1, $2, $3, $4, $5, $6,
                $7, $8, $9, $10, $11,
                $12, $13
            )
            RETURNING {}
            "#,
            self.table(),
            COLUMNS
        );

        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(&fields.name)
            .bind(fields.category.as_str())
            .bind(fields.price)
            .bind(fields.original_price)
            .bind(&fields.description)
            .bind(&fields.image_url)
            .bind(fields.is_active)
            .bind(fields.is_weighable)
            .bind(fields.price_per_gram)
            .bind(&fields.complement_groups)
            .bind(&fields.sizes)
            .bind(&fields.scheduled_days)
            .bind(&fields.availability_type)
            .fetch_one(&self.pool)
            .await
            .map_err(store_error)?;

        let product = Product::try_from(row)?;
        tracing::info!("Created product {} ({})", product.id, product.name);
        Ok(product)
    }

    async fn update(&self, id: ProductId, patch: ProductPatch) -> Result<Product, StoreError> {
        let mut tx = self.pool.begin().await.map_err(store_error)?;

        let select_sql = format!("SELECT {} FROM {} WHERE id = $1 FOR UPDATE", COLUMNS, self.table());
        let current = sqlx::query_as::<_, ProductRow>(&select_sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(store_error)?
            .ok_or(StoreError::NotFound(id))?;

        let mut product = Product::try_from(current)?;
        product.apply_patch(&patch);
        reject_invalid(&product.to_fields())?;

        let update_sql = format!(
            r#"
            UPDATE {} SET
                name = $2, category = $3, price = $4, original_price = $5,
                description = $6, image_url = $7, is_active = $8, is_weighable = $9,
                price_per_gram = $10, complement_groups = $11, sizes = $12,
                scheduled_days = $13, availability_type = $14, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            self.table(),
            COLUMNS
        );

        let row = sqlx::query_as::<_, ProductRow>(&update_sql)
            .bind(id)
            .bind(&product.name)
            .bind(product.category.as_str())
            .bind(product.price)
            .bind(product.original_price)
            .bind(&product.description)
            .bind(&product.image_url)
            .bind(product.is_active)
            .bind(product.is_weighable)
            .bind(product.price_per_gram)
            .bind(&product.complement_groups)
            .bind(&product.sizes)
            .bind(&product.scheduled_days)
            .bind(&product.availability_type)
            .fetch_one(&mut *tx)
            .await
            .map_err(store_error)?;

        tx.commit().await.map_err(store_error)?;

        let updated = Product::try_from(row)?;
        tracing::info!("Updated product {} ({})", updated.id, updated.name);
        Ok(updated)
    }

    async fn delete(&self, id: ProductId) -> Result<(), StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.table());
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(store_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        tracing::info!("Deleted product {}", id);
        Ok(())
    }
}
