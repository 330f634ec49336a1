use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use backoffice_core::order::{Order, PaymentStatus};
use backoffice_core::pii::Masked;
use backoffice_core::repository::{OrderQuery, OrderRepository, RepoError};
use backoffice_core::views::{InvoiceSource, OrderSummary, PricedItem};

pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal structs for type-safe querying
#[derive(sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    placed_at: DateTime<Utc>,
    payment_status: String,
    customer_id: Uuid,
    first_name: String,
    last_name: String,
}

#[derive(sqlx::FromRow)]
struct InvoiceHeadRow {
    id: Uuid,
    placed_at: DateTime<Utc>,
    payment_status: String,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
}

#[derive(sqlx::FromRow)]
struct InvoiceItemRow {
    title: String,
    unit_price: Decimal,
    quantity: i32,
}

fn parse_status(code: &str) -> Result<PaymentStatus, RepoError> {
    PaymentStatus::from_code(code)
        .ok_or_else(|| format!("unknown payment status code: {code}").into())
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn list(&self, query: &OrderQuery) -> Result<Vec<OrderSummary>, RepoError> {
        let mut qb: QueryBuilder<sqlx::Postgres> = QueryBuilder::new(
            "SELECT o.id, o.placed_at, o.payment_status, o.customer_id, \
             c.first_name, c.last_name \
             FROM orders o \
             INNER JOIN customers c ON c.id = o.customer_id \
             WHERE 1 = 1",
        );

        if let Some(customer_id) = query.customer_id {
            qb.push(" AND o.customer_id = ").push_bind(customer_id);
        }
        if let Some(status) = query.payment_status {
            qb.push(" AND o.payment_status = ").push_bind(status.as_code());
        }

        qb.push(" ORDER BY o.placed_at, o.id");
        qb.push(" LIMIT ").push_bind(query.page.limit());
        qb.push(" OFFSET ").push_bind(query.page.offset());

        let rows: Vec<OrderRow> = qb.build_query_as().fetch_all(&self.pool).await?;

        rows.into_iter()
            .map(|row| {
                let payment_status = parse_status(&row.payment_status)?;
                Ok(OrderSummary {
                    order: Order {
                        id: row.id,
                        placed_at: row.placed_at,
                        payment_status,
                        customer_id: row.customer_id,
                    },
                    customer_name: format!("{} {}", row.first_name, row.last_name),
                })
            })
            .collect()
    }

    async fn update_payment_status(
        &self,
        id: Uuid,
        status: PaymentStatus,
    ) -> Result<bool, RepoError> {
        let result = sqlx::query("UPDATE orders SET payment_status = $1 WHERE id = $2")
            .bind(status.as_code())
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn invoice_source(&self, order_id: Uuid) -> Result<Option<InvoiceSource>, RepoError> {
        let head: Option<InvoiceHeadRow> = sqlx::query_as(
            "SELECT o.id, o.placed_at, o.payment_status, \
             c.first_name, c.last_name, c.email, c.phone \
             FROM orders o \
             INNER JOIN customers c ON c.id = o.customer_id \
             WHERE o.id = $1",
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(head) = head else {
            return Ok(None);
        };

        // Items come back in insertion order; unit_price is the snapshot
        // taken at order time, not the product's current price.
        let items: Vec<InvoiceItemRow> = sqlx::query_as(
            "SELECT p.title, oi.unit_price, oi.quantity \
             FROM order_items oi \
             INNER JOIN products p ON p.id = oi.product_id \
             WHERE oi.order_id = $1 \
             ORDER BY oi.id",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        let payment_status = parse_status(&head.payment_status)?;

        Ok(Some(InvoiceSource {
            order_id: head.id,
            placed_at: head.placed_at,
            payment_status,
            customer_name: format!("{} {}", head.first_name, head.last_name),
            customer_email: Masked(head.email),
            customer_phone: Masked(head.phone),
            items: items
                .into_iter()
                .map(|row| PricedItem {
                    title: row.title,
                    unit_price: row.unit_price,
                    quantity: row.quantity,
                })
                .collect(),
        }))
    }
}
