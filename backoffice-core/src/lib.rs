pub mod customer;
pub mod catalog;
pub mod inventory;
pub mod order;
pub mod pii;
pub mod repository;
pub mod views;

pub use customer::{Customer, Membership};
pub use catalog::{Collection, Product};
pub use inventory::InventoryStatus;
pub use order::{Order, OrderItem, PaymentStatus};
