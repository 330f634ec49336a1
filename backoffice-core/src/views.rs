//! Denormalized view models returned by the repository queries.
//!
//! The admin list screens display aggregate columns (order counts, product
//! counts, joined collection titles). Those are computed by explicit queries
//! and carried on these structs rather than recomputed per row.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::customer::Customer;
use crate::order::{Order, PaymentStatus};
use crate::pii::Masked;

/// A customer row with its order count aggregate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerWithOrders {
    pub customer: Customer,
    pub order_count: i64,
}

/// A product row with its collection title joined in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductWithCollection {
    pub product: crate::catalog::Product,
    pub collection_title: String,
}

/// A collection row with its product count aggregate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionWithCount {
    pub collection: crate::catalog::Collection,
    pub product_count: i64,
}

/// An order row with its customer's display name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSummary {
    pub order: Order,
    pub customer_name: String,
}

/// One line of an order as priced at order time, with the product title
/// joined in for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricedItem {
    pub title: String,
    pub unit_price: Decimal,
    pub quantity: i32,
}

/// Everything the invoice pipeline needs for one order, fetched in a single
/// repository call: the order, its customer, and the items in insertion
/// order, each joined with its product title.
#[derive(Debug, Clone)]
pub struct InvoiceSource {
    pub order_id: Uuid,
    pub placed_at: DateTime<Utc>,
    pub payment_status: PaymentStatus,
    pub customer_name: String,
    pub customer_email: Masked<String>,
    pub customer_phone: Masked<String>,
    pub items: Vec<PricedItem>,
}
