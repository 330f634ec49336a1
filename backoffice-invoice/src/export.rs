//! Bulk invoice export.
//!
//! Accepts the admin selection of order ids and produces one PDF per
//! exportable order: nothing for an empty selection, a bare PDF for a
//! single document, a ZIP archive for several. Orders that cannot be
//! exported are skipped and reported, never silently dropped.

use std::io::{Cursor, Write};
use std::path::PathBuf;

use serde::Serialize;
use tracing::warn;
use uuid::Uuid;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::assembler::InvoiceAssembler;
use crate::error::InvoiceError;
use crate::pdf::{InvoiceRenderer, Logo};

/// Policy for orders with zero line items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyOrders {
    /// Render the empty table with a 0.00 grand total
    #[default]
    Render,
    /// Skip the order and record a no-line-items outcome
    Skip,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum OrderOutcome {
    Exported { order_id: Uuid, filename: String },
    Skipped { order_id: Uuid, reason: String },
}

/// Per-order outcomes plus any degradations (e.g. a missing logo)
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExportReport {
    pub outcomes: Vec<OrderOutcome>,
    pub warnings: Vec<String>,
}

impl ExportReport {
    pub fn exported(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, OrderOutcome::Exported { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.len() - self.exported()
    }
}

/// What the bulk action hands back to the HTTP layer
pub enum ExportBundle {
    /// Nothing exportable; no file is produced
    Empty { report: ExportReport },
    /// Exactly one invoice, served as a bare PDF
    Single {
        filename: String,
        bytes: Vec<u8>,
        report: ExportReport,
    },
    /// Several invoices, packed into one ZIP
    Archive {
        filename: String,
        bytes: Vec<u8>,
        report: ExportReport,
    },
}

impl ExportBundle {
    pub fn report(&self) -> &ExportReport {
        match self {
            ExportBundle::Empty { report } => report,
            ExportBundle::Single { report, .. } => report,
            ExportBundle::Archive { report, .. } => report,
        }
    }
}

pub struct BulkExporter {
    assembler: InvoiceAssembler,
    renderer: InvoiceRenderer,
    logo_path: Option<PathBuf>,
    empty_orders: EmptyOrders,
}

impl BulkExporter {
    pub fn new(
        assembler: InvoiceAssembler,
        renderer: InvoiceRenderer,
        logo_path: Option<PathBuf>,
        empty_orders: EmptyOrders,
    ) -> Self {
        Self {
            assembler,
            renderer,
            logo_path,
            empty_orders,
        }
    }

    /// Export the selection. Unknown orders and (under the skip policy)
    /// empty orders become report entries; storage and render failures
    /// abort the whole action.
    pub async fn export(&self, order_ids: &[Uuid]) -> Result<ExportBundle, InvoiceError> {
        let mut report = ExportReport::default();

        let mut ids: Vec<Uuid> = Vec::with_capacity(order_ids.len());
        for id in order_ids {
            if !ids.contains(id) {
                ids.push(*id);
            }
        }

        if ids.is_empty() {
            return Ok(ExportBundle::Empty { report });
        }

        // The logo is loaded once per action; a bad asset degrades every
        // invoice in the batch the same way.
        let logo = match &self.logo_path {
            Some(path) => match Logo::load(path) {
                Ok(logo) => Some(logo),
                Err(err @ (InvoiceError::MissingAsset { .. } | InvoiceError::BadAsset { .. })) => {
                    warn!("invoice logo unavailable, rendering without it: {err}");
                    report.warnings.push(err.to_string());
                    None
                }
                Err(err) => return Err(err),
            },
            None => None,
        };

        let mut files: Vec<(String, Vec<u8>)> = Vec::with_capacity(ids.len());
        for order_id in ids {
            match self.assembler.assemble(order_id).await {
                Ok(invoice) => {
                    if invoice.is_empty() && self.empty_orders == EmptyOrders::Skip {
                        let reason = InvoiceError::NoLineItems(order_id).to_string();
                        warn!("skipping order {order_id}: no line items");
                        report.outcomes.push(OrderOutcome::Skipped { order_id, reason });
                        continue;
                    }
                    let filename = invoice.filename();
                    let bytes = self.renderer.render(&invoice, logo.as_ref())?;
                    report.outcomes.push(OrderOutcome::Exported {
                        order_id,
                        filename: filename.clone(),
                    });
                    files.push((filename, bytes));
                }
                Err(err @ InvoiceError::OrderNotFound(_)) => {
                    warn!("skipping order {order_id}: {err}");
                    report.outcomes.push(OrderOutcome::Skipped {
                        order_id,
                        reason: err.to_string(),
                    });
                }
                Err(err) => return Err(err),
            }
        }

        match files.len() {
            0 => Ok(ExportBundle::Empty { report }),
            1 => {
                let (filename, bytes) = files.remove(0);
                Ok(ExportBundle::Single {
                    filename,
                    bytes,
                    report,
                })
            }
            _ => {
                let bytes = pack_archive(&files)?;
                Ok(ExportBundle::Archive {
                    filename: "invoices.zip".to_string(),
                    bytes,
                    report,
                })
            }
        }
    }
}

fn pack_archive(files: &[(String, Vec<u8>)]) -> Result<Vec<u8>, InvoiceError> {
    let mut archive = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, bytes) in files {
        archive.start_file(name.as_str(), options)?;
        archive
            .write_all(bytes)
            .map_err(|e| InvoiceError::Archive(e.into()))?;
    }
    let cursor = archive.finish()?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::RenderOptions;
    use async_trait::async_trait;
    use backoffice_core::order::PaymentStatus;
    use backoffice_core::pii::Masked;
    use backoffice_core::repository::{OrderQuery, OrderRepository, RepoError};
    use backoffice_core::views::{InvoiceSource, OrderSummary, PricedItem};
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::sync::Arc;

    struct FixtureOrders {
        sources: HashMap<Uuid, InvoiceSource>,
    }

    #[async_trait]
    impl OrderRepository for FixtureOrders {
        async fn list(&self, _query: &OrderQuery) -> Result<Vec<OrderSummary>, RepoError> {
            Ok(vec![])
        }

        async fn update_payment_status(
            &self,
            _id: Uuid,
            _status: PaymentStatus,
        ) -> Result<bool, RepoError> {
            Ok(false)
        }

        async fn invoice_source(
            &self,
            order_id: Uuid,
        ) -> Result<Option<InvoiceSource>, RepoError> {
            Ok(self.sources.get(&order_id).cloned())
        }
    }

    fn source(order_id: Uuid, items: Vec<PricedItem>) -> InvoiceSource {
        InvoiceSource {
            order_id,
            placed_at: Utc::now(),
            payment_status: PaymentStatus::Complete,
            customer_name: "Ada Lovelace".to_string(),
            customer_email: Masked("ada@example.com".to_string()),
            customer_phone: Masked("555-0100".to_string()),
            items,
        }
    }

    fn widget() -> PricedItem {
        PricedItem {
            title: "Widget".to_string(),
            unit_price: dec!(10.00),
            quantity: 3,
        }
    }

    fn exporter_with(
        sources: Vec<InvoiceSource>,
        empty_orders: EmptyOrders,
    ) -> BulkExporter {
        let repo = Arc::new(FixtureOrders {
            sources: sources.into_iter().map(|s| (s.order_id, s)).collect(),
        });
        BulkExporter::new(
            InvoiceAssembler::new(repo),
            InvoiceRenderer::new(RenderOptions {
                company_name: "Storefront Ltd".to_string(),
                remit_to: vec!["1 Warehouse Way".to_string()],
            }),
            None,
            empty_orders,
        )
    }

    #[tokio::test]
    async fn test_empty_selection_yields_no_file() {
        let exporter = exporter_with(vec![], EmptyOrders::Render);
        let bundle = exporter.export(&[]).await.unwrap();
        assert!(matches!(bundle, ExportBundle::Empty { .. }));
        assert_eq!(bundle.report().outcomes.len(), 0);
    }

    #[tokio::test]
    async fn test_single_order_yields_one_pdf_named_after_it() {
        let id = Uuid::new_v4();
        let exporter = exporter_with(vec![source(id, vec![widget()])], EmptyOrders::Render);

        match exporter.export(&[id]).await.unwrap() {
            ExportBundle::Single {
                filename, bytes, ..
            } => {
                assert_eq!(filename, format!("invoice-{id}.pdf"));
                assert!(bytes.starts_with(b"%PDF"));
            }
            _ => panic!("expected a single PDF"),
        }
    }

    #[tokio::test]
    async fn test_multi_order_selection_yields_archive_with_all_entries() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        let exporter = exporter_with(
            vec![
                source(a, vec![widget()]),
                source(b, vec![widget()]),
                source(c, vec![widget()]),
            ],
            EmptyOrders::Render,
        );

        match exporter.export(&[a, b, c]).await.unwrap() {
            ExportBundle::Archive {
                filename,
                bytes,
                report,
            } => {
                assert_eq!(filename, "invoices.zip");
                assert_eq!(report.exported(), 3);
                let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
                assert_eq!(archive.len(), 3);
            }
            _ => panic!("expected an archive"),
        }
    }

    #[tokio::test]
    async fn test_unknown_orders_are_reported_not_fatal() {
        let known = Uuid::new_v4();
        let unknown = Uuid::new_v4();
        let exporter = exporter_with(vec![source(known, vec![widget()])], EmptyOrders::Render);

        match exporter.export(&[known, unknown]).await.unwrap() {
            ExportBundle::Single { report, .. } => {
                assert_eq!(report.exported(), 1);
                assert_eq!(report.skipped(), 1);
            }
            _ => panic!("one resolvable order should yield a single PDF"),
        }
    }

    #[tokio::test]
    async fn test_empty_order_policy_render() {
        let id = Uuid::new_v4();
        let exporter = exporter_with(vec![source(id, vec![])], EmptyOrders::Render);

        match exporter.export(&[id]).await.unwrap() {
            ExportBundle::Single { bytes, report, .. } => {
                assert!(bytes.starts_with(b"%PDF"));
                assert_eq!(report.exported(), 1);
            }
            _ => panic!("render policy should produce a document"),
        }
    }

    #[tokio::test]
    async fn test_empty_order_policy_skip() {
        let id = Uuid::new_v4();
        let exporter = exporter_with(vec![source(id, vec![])], EmptyOrders::Skip);

        match exporter.export(&[id]).await.unwrap() {
            ExportBundle::Empty { report } => {
                assert_eq!(report.skipped(), 1);
            }
            _ => panic!("skip policy should produce no file"),
        }
    }

    #[tokio::test]
    async fn test_duplicate_ids_export_once() {
        let id = Uuid::new_v4();
        let exporter = exporter_with(vec![source(id, vec![widget()])], EmptyOrders::Render);

        match exporter.export(&[id, id, id]).await.unwrap() {
            ExportBundle::Single { report, .. } => assert_eq!(report.exported(), 1),
            _ => panic!("duplicates collapse to one document"),
        }
    }

    #[tokio::test]
    async fn test_missing_logo_degrades_with_warning() {
        let id = Uuid::new_v4();
        let repo = Arc::new(FixtureOrders {
            sources: HashMap::from([(id, source(id, vec![widget()]))]),
        });
        let exporter = BulkExporter::new(
            InvoiceAssembler::new(repo),
            InvoiceRenderer::new(RenderOptions {
                company_name: "Storefront Ltd".to_string(),
                remit_to: vec![],
            }),
            Some(PathBuf::from("/nonexistent/logo.png")),
            EmptyOrders::Render,
        );

        match exporter.export(&[id]).await.unwrap() {
            ExportBundle::Single { bytes, report, .. } => {
                assert!(bytes.starts_with(b"%PDF"));
                assert_eq!(report.warnings.len(), 1);
            }
            _ => panic!("missing logo must not abort the export"),
        }
    }
}
