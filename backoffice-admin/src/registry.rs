//! Explicit registration tables for the admin console.
//!
//! Each entity declares its list columns, default ordering, page size,
//! filters and bulk actions as plain data. The HTTP layer serves these
//! tables to the console and consults them when building list queries,
//! instead of reflecting over model metadata.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    Customers,
    Products,
    Collections,
    Orders,
}

impl Entity {
    pub fn all() -> [Entity; 4] {
        [
            Entity::Customers,
            Entity::Products,
            Entity::Collections,
            Entity::Orders,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::Customers => "customers",
            Entity::Products => "products",
            Entity::Collections => "collections",
            Entity::Orders => "orders",
        }
    }
}

/// One list-view column
#[derive(Debug, Clone, Serialize)]
pub struct ColumnSpec {
    pub key: &'static str,
    pub label: &'static str,
    /// Editable inline from the list view
    pub editable: bool,
    /// Rendered as a hyperlink into another filtered list
    pub linked: bool,
}

impl ColumnSpec {
    pub const fn plain(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            editable: false,
            linked: false,
        }
    }

    pub const fn editable(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            editable: true,
            linked: false,
        }
    }

    pub const fn linked(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            editable: false,
            linked: true,
        }
    }
}

/// One list-view filter and the query parameter it binds to
#[derive(Debug, Clone, Serialize)]
pub struct FilterSpec {
    pub param: &'static str,
    pub label: &'static str,
    /// Fixed choices offered by the console; empty for free-form params
    pub choices: Vec<&'static str>,
}

/// One bulk action and the route that performs it
#[derive(Debug, Clone, Serialize)]
pub struct ActionSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub path: &'static str,
}

/// Everything the console needs to render one entity's list page
#[derive(Debug, Clone, Serialize)]
pub struct ListSpec {
    pub entity: Entity,
    pub columns: Vec<ColumnSpec>,
    pub ordering: Vec<&'static str>,
    pub page_size: u32,
    pub filters: Vec<FilterSpec>,
    pub actions: Vec<ActionSpec>,
}

/// The full registration table, one spec per entity
#[derive(Debug, Clone, Serialize)]
pub struct AdminRegistry {
    pub entities: Vec<ListSpec>,
}

impl AdminRegistry {
    pub fn new() -> Self {
        Self {
            entities: vec![
                customers_spec(),
                products_spec(),
                collections_spec(),
                orders_spec(),
            ],
        }
    }

    pub fn get(&self, entity: Entity) -> &ListSpec {
        // The table is built with one spec per variant.
        self.entities
            .iter()
            .find(|spec| spec.entity == entity)
            .unwrap_or_else(|| unreachable!("registry covers every entity"))
    }

    pub fn page_size(&self, entity: Entity) -> u32 {
        self.get(entity).page_size
    }
}

impl Default for AdminRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn customers_spec() -> ListSpec {
    ListSpec {
        entity: Entity::Customers,
        columns: vec![
            ColumnSpec::plain("first_name", "First name"),
            ColumnSpec::plain("last_name", "Last name"),
            ColumnSpec::plain("email", "Email"),
            ColumnSpec::plain("phone", "Phone"),
            ColumnSpec::editable("membership", "Membership"),
            ColumnSpec::linked("order_count", "Orders"),
        ],
        ordering: vec!["first_name", "last_name"],
        page_size: 50,
        filters: vec![FilterSpec {
            param: "search",
            label: "Name starts with",
            choices: vec![],
        }],
        actions: vec![],
    }
}

fn products_spec() -> ListSpec {
    ListSpec {
        entity: Entity::Products,
        columns: vec![
            ColumnSpec::plain("title", "Title"),
            ColumnSpec::editable("unit_price", "Unit price"),
            ColumnSpec::plain("inventory_status", "Inventory status"),
            ColumnSpec::plain("collection_title", "Collection"),
        ],
        ordering: vec!["title", "unit_price"],
        page_size: 20,
        filters: vec![
            FilterSpec {
                param: "collection",
                label: "Collection",
                choices: vec![],
            },
            FilterSpec {
                param: "stock",
                label: "Inventory",
                choices: crate::filters::StockBucket::query_values().to_vec(),
            },
        ],
        actions: vec![ActionSpec {
            key: "clear_inventory",
            label: "Clear inventory",
            path: "/admin/products/actions/clear-inventory",
        }],
    }
}

fn collections_spec() -> ListSpec {
    ListSpec {
        entity: Entity::Collections,
        columns: vec![
            ColumnSpec::plain("title", "Title"),
            ColumnSpec::linked("product_count", "Products"),
        ],
        ordering: vec!["title"],
        page_size: 100,
        filters: vec![],
        actions: vec![],
    }
}

fn orders_spec() -> ListSpec {
    ListSpec {
        entity: Entity::Orders,
        columns: vec![
            ColumnSpec::plain("id", "Order"),
            ColumnSpec::plain("placed_at", "Placed at"),
            ColumnSpec::editable("payment_status", "Payment status"),
            ColumnSpec::plain("customer", "Customer"),
        ],
        ordering: vec!["placed_at", "id"],
        page_size: 20,
        filters: vec![
            FilterSpec {
                param: "customer",
                label: "Customer",
                choices: vec![],
            },
            FilterSpec {
                param: "payment_status",
                label: "Payment status",
                choices: vec!["P", "C", "F"],
            },
        ],
        actions: vec![ActionSpec {
            key: "download_invoices",
            label: "Download invoices",
            path: "/admin/orders/actions/download-invoices",
        }],
    }
}
