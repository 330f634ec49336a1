use std::sync::Arc;

use backoffice_admin::AdminRegistry;
use backoffice_core::repository::{
    CollectionRepository, CustomerRepository, OrderRepository, ProductRepository,
};
use backoffice_invoice::BulkExporter;

#[derive(Clone)]
pub struct AppState {
    pub customers: Arc<dyn CustomerRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub collections: Arc<dyn CollectionRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub registry: Arc<AdminRegistry>,
    pub exporter: Arc<BulkExporter>,
}
