pub mod assembler;
pub mod error;
pub mod export;
pub mod model;
pub mod money;
pub mod pdf;

pub use assembler::InvoiceAssembler;
pub use error::InvoiceError;
pub use export::{BulkExporter, EmptyOrders, ExportBundle, ExportReport, OrderOutcome};
pub use model::{Invoice, InvoiceLine};
pub use pdf::{InvoiceRenderer, Logo, RenderOptions};
