use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use backoffice_core::order::PaymentStatus;
use backoffice_core::pii::Masked;
use backoffice_core::views::PricedItem;

/// One row of the invoice table
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceLine {
    pub title: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    /// `unit_price * quantity`
    pub net_price: Decimal,
}

/// Everything the renderer needs for one order's invoice
#[derive(Debug, Clone)]
pub struct Invoice {
    pub order_id: Uuid,
    pub customer_name: String,
    pub customer_email: Masked<String>,
    pub customer_phone: Masked<String>,
    pub placed_at: DateTime<Utc>,
    pub invoice_date: DateTime<Utc>,
    pub payment_status: PaymentStatus,
    pub lines: Vec<InvoiceLine>,
    pub grand_total: Decimal,
}

impl Invoice {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn filename(&self) -> String {
        format!("invoice-{}.pdf", self.order_id)
    }
}

/// Build the line records from the priced items, preserving their order,
/// and accumulate the grand total in decimal precision.
pub fn assemble_lines(items: &[PricedItem]) -> (Vec<InvoiceLine>, Decimal) {
    let mut grand_total = Decimal::ZERO;
    let lines = items
        .iter()
        .map(|item| {
            let net_price = item.unit_price * Decimal::from(item.quantity);
            grand_total += net_price;
            InvoiceLine {
                title: item.title.clone(),
                unit_price: item.unit_price,
                quantity: item.quantity,
                net_price,
            }
        })
        .collect();
    (lines, grand_total)
}
