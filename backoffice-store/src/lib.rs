pub mod app_config;
pub mod catalog_repo;
pub mod customer_repo;
pub mod database;
pub mod order_repo;

pub use catalog_repo::{PgCollectionRepository, PgProductRepository};
pub use customer_repo::PgCustomerRepository;
pub use database::DbClient;
pub use order_repo::PgOrderRepository;
