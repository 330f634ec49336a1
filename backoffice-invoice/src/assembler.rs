use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use backoffice_core::repository::OrderRepository;

use crate::error::InvoiceError;
use crate::model::{assemble_lines, Invoice};

/// Builds renderable invoices from order data.
///
/// One repository round trip per order: the order row, its customer, and
/// the line items joined with their product titles. Totals are derived
/// here, never read from storage.
pub struct InvoiceAssembler {
    orders: Arc<dyn OrderRepository>,
}

impl InvoiceAssembler {
    pub fn new(orders: Arc<dyn OrderRepository>) -> Self {
        Self { orders }
    }

    /// Assemble the invoice for one order.
    ///
    /// An order with zero line items assembles successfully into an empty
    /// invoice; whether that renders or skips is the exporter's policy.
    pub async fn assemble(&self, order_id: Uuid) -> Result<Invoice, InvoiceError> {
        let source = self
            .orders
            .invoice_source(order_id)
            .await
            .map_err(InvoiceError::Repository)?
            .ok_or(InvoiceError::OrderNotFound(order_id))?;

        let (lines, grand_total) = assemble_lines(&source.items);

        Ok(Invoice {
            order_id: source.order_id,
            customer_name: source.customer_name,
            customer_email: source.customer_email,
            customer_phone: source.customer_phone,
            placed_at: source.placed_at,
            invoice_date: Utc::now(),
            payment_status: source.payment_status,
            lines,
            grand_total,
        })
    }
}
