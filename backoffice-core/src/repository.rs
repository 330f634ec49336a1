use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::customer::Membership;
use crate::order::PaymentStatus;
use crate::views::{
    CollectionWithCount, CustomerWithOrders, InvoiceSource, OrderSummary, ProductWithCollection,
};

pub type RepoError = Box<dyn std::error::Error + Send + Sync>;

/// List-page window: LIMIT/OFFSET derived from the entity's page size
#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub number: u32,
    pub size: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            number: 1,
            size: 100,
        }
    }
}

impl Page {
    pub fn new(number: u32, size: u32) -> Self {
        Self { number, size }
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.number.saturating_sub(1)) * i64::from(self.size)
    }
}

/// Filters accepted by the customer list
#[derive(Debug, Clone, Default)]
pub struct CustomerQuery {
    /// Case-insensitive prefix match on first or last name
    pub search: Option<String>,
    pub page: Page,
}

/// Filters accepted by the product list
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    pub collection_id: Option<Uuid>,
    /// Inclusive stock range, from the bucket filter
    pub inventory_min: Option<i32>,
    pub inventory_max: Option<i32>,
    pub page: Page,
}

/// Filters accepted by the order list
#[derive(Debug, Clone, Default)]
pub struct OrderQuery {
    pub customer_id: Option<Uuid>,
    pub payment_status: Option<PaymentStatus>,
    pub page: Page,
}

/// Repository trait for customer data access
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// List customers with their order count aggregate, ordered by
    /// first name then last name.
    async fn list(&self, query: &CustomerQuery) -> Result<Vec<CustomerWithOrders>, RepoError>;

    /// Inline edit of the membership tier; Ok(false) when no row matched.
    async fn update_membership(&self, id: Uuid, membership: Membership)
        -> Result<bool, RepoError>;
}

/// Repository trait for product catalog access
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// List products with their collection title, ordered by title then
    /// unit price.
    async fn list(&self, query: &ProductQuery) -> Result<Vec<ProductWithCollection>, RepoError>;

    /// Inline edit of the unit price; Ok(false) when no row matched.
    async fn update_unit_price(&self, id: Uuid, unit_price: Decimal) -> Result<bool, RepoError>;

    /// Bulk action: zero the inventory of the selected products.
    /// Returns the number of rows affected.
    async fn clear_inventory(&self, ids: &[Uuid]) -> Result<u64, RepoError>;
}

/// Repository trait for collection access
#[async_trait]
pub trait CollectionRepository: Send + Sync {
    /// List collections with their product count aggregate.
    async fn list(&self) -> Result<Vec<CollectionWithCount>, RepoError>;
}

/// Repository trait for order data access
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// List orders with customer names, ordered by placed_at then id.
    async fn list(&self, query: &OrderQuery) -> Result<Vec<OrderSummary>, RepoError>;

    /// Inline edit of the payment status; Ok(false) when no row matched.
    async fn update_payment_status(
        &self,
        id: Uuid,
        status: PaymentStatus,
    ) -> Result<bool, RepoError>;

    /// Fetch one order with its customer and priced line items for the
    /// invoice pipeline. Items come back in insertion order.
    async fn invoice_source(&self, order_id: Uuid) -> Result<Option<InvoiceSource>, RepoError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_window() {
        let page = Page::new(3, 20);
        assert_eq!(page.limit(), 20);
        assert_eq!(page.offset(), 40);

        // Page numbers are 1-based; 0 behaves like the first page.
        assert_eq!(Page::new(0, 50).offset(), 0);
    }
}
