use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use backoffice_core::customer::{Customer, Membership};
use backoffice_core::pii::Masked;
use backoffice_core::repository::{CustomerQuery, CustomerRepository, RepoError};
use backoffice_core::views::CustomerWithOrders;

pub struct PgCustomerRepository {
    pool: PgPool,
}

impl PgCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal struct for type-safe querying
#[derive(sqlx::FromRow)]
struct CustomerRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    membership: String,
    order_count: i64,
}

impl CustomerRow {
    fn into_view(self) -> Result<CustomerWithOrders, RepoError> {
        let membership = Membership::from_code(&self.membership)
            .ok_or_else(|| format!("unknown membership code: {}", self.membership))?;
        Ok(CustomerWithOrders {
            customer: Customer {
                id: self.id,
                first_name: self.first_name,
                last_name: self.last_name,
                email: Masked(self.email),
                phone: Masked(self.phone),
                membership,
            },
            order_count: self.order_count,
        })
    }
}

const LIST_SQL: &str = r#"
    SELECT c.id, c.first_name, c.last_name, c.email, c.phone, c.membership,
           COUNT(o.id) AS order_count
    FROM customers c
    LEFT JOIN orders o ON o.customer_id = c.id
"#;

const LIST_TAIL_SQL: &str = r#"
    GROUP BY c.id, c.first_name, c.last_name, c.email, c.phone, c.membership
    ORDER BY c.first_name, c.last_name
"#;

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    async fn list(&self, query: &CustomerQuery) -> Result<Vec<CustomerWithOrders>, RepoError> {
        let rows: Vec<CustomerRow> = if let Some(search) = &query.search {
            let sql = format!(
                "{LIST_SQL} WHERE c.first_name ILIKE $1 OR c.last_name ILIKE $1 \
                 {LIST_TAIL_SQL} LIMIT $2 OFFSET $3"
            );
            sqlx::query_as(&sql)
                .bind(format!("{search}%"))
                .bind(query.page.limit())
                .bind(query.page.offset())
                .fetch_all(&self.pool)
                .await?
        } else {
            let sql = format!("{LIST_SQL} {LIST_TAIL_SQL} LIMIT $1 OFFSET $2");
            sqlx::query_as(&sql)
                .bind(query.page.limit())
                .bind(query.page.offset())
                .fetch_all(&self.pool)
                .await?
        };

        rows.into_iter().map(CustomerRow::into_view).collect()
    }

    async fn update_membership(
        &self,
        id: Uuid,
        membership: Membership,
    ) -> Result<bool, RepoError> {
        let result = sqlx::query("UPDATE customers SET membership = $1 WHERE id = $2")
            .bind(membership.as_code())
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
