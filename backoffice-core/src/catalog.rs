use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A group of related products
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    pub id: Uuid,
    pub title: String,
}

/// A sellable product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    pub unit_price: Decimal,
    pub inventory: i32,
    pub collection_id: Uuid,
}

impl Product {
    /// Current stock classification for display and filtering
    pub fn inventory_status(&self) -> crate::inventory::InventoryStatus {
        crate::inventory::InventoryStatus::classify(self.inventory)
    }
}
