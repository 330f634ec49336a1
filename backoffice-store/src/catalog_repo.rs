use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use backoffice_core::catalog::{Collection, Product};
use backoffice_core::repository::{
    CollectionRepository, ProductQuery, ProductRepository, RepoError,
};
use backoffice_core::views::{CollectionWithCount, ProductWithCollection};

pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal structs for type-safe querying
#[derive(sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    title: String,
    unit_price: Decimal,
    inventory: i32,
    collection_id: Uuid,
    collection_title: String,
}

impl From<ProductRow> for ProductWithCollection {
    fn from(row: ProductRow) -> Self {
        ProductWithCollection {
            product: Product {
                id: row.id,
                title: row.title,
                unit_price: row.unit_price,
                inventory: row.inventory,
                collection_id: row.collection_id,
            },
            collection_title: row.collection_title,
        }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn list(&self, query: &ProductQuery) -> Result<Vec<ProductWithCollection>, RepoError> {
        let mut qb: QueryBuilder<sqlx::Postgres> = QueryBuilder::new(
            "SELECT p.id, p.title, p.unit_price, p.inventory, p.collection_id, \
             col.title AS collection_title \
             FROM products p \
             INNER JOIN collections col ON col.id = p.collection_id \
             WHERE 1 = 1",
        );

        if let Some(collection_id) = query.collection_id {
            qb.push(" AND p.collection_id = ").push_bind(collection_id);
        }
        if let Some(min) = query.inventory_min {
            qb.push(" AND p.inventory >= ").push_bind(min);
        }
        if let Some(max) = query.inventory_max {
            qb.push(" AND p.inventory <= ").push_bind(max);
        }

        qb.push(" ORDER BY p.title, p.unit_price");
        qb.push(" LIMIT ").push_bind(query.page.limit());
        qb.push(" OFFSET ").push_bind(query.page.offset());

        let rows: Vec<ProductRow> = qb.build_query_as().fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(ProductWithCollection::from).collect())
    }

    async fn update_unit_price(&self, id: Uuid, unit_price: Decimal) -> Result<bool, RepoError> {
        let result = sqlx::query("UPDATE products SET unit_price = $1 WHERE id = $2")
            .bind(unit_price)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn clear_inventory(&self, ids: &[Uuid]) -> Result<u64, RepoError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = sqlx::query("UPDATE products SET inventory = 0 WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

pub struct PgCollectionRepository {
    pool: PgPool,
}

impl PgCollectionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CollectionRow {
    id: Uuid,
    title: String,
    product_count: i64,
}

#[async_trait]
impl CollectionRepository for PgCollectionRepository {
    async fn list(&self) -> Result<Vec<CollectionWithCount>, RepoError> {
        let rows: Vec<CollectionRow> = sqlx::query_as(
            "SELECT col.id, col.title, COUNT(p.id) AS product_count \
             FROM collections col \
             LEFT JOIN products p ON p.collection_id = col.id \
             GROUP BY col.id, col.title \
             ORDER BY col.title",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| CollectionWithCount {
                collection: Collection {
                    id: row.id,
                    title: row.title,
                },
                product_count: row.product_count,
            })
            .collect())
    }
}
