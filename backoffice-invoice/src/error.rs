use std::path::PathBuf;
use uuid::Uuid;

/// Failure modes of the invoice export pipeline
#[derive(Debug, thiserror::Error)]
pub enum InvoiceError {
    #[error("Order not found: {0}")]
    OrderNotFound(Uuid),

    #[error("Order {0} has no line items")]
    NoLineItems(Uuid),

    #[error("Missing asset {}: {}", path.display(), source)]
    MissingAsset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Asset {} could not be decoded: {}", path.display(), source)]
    BadAsset {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("PDF rendering failed: {0}")]
    Render(String),

    #[error("Archive packing failed: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Repository error: {0}")]
    Repository(#[source] Box<dyn std::error::Error + Send + Sync>),
}
