//! Display-row builders for the admin list screens.
//!
//! Repository view models come in with their aggregates already computed;
//! these builders add the presentation: status labels, money strings, and
//! the hyperlinks that filter a related list (order counts link to the
//! order list, product counts to the product list).

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use backoffice_core::pii::Masked;
use backoffice_core::views::{
    CollectionWithCount, CustomerWithOrders, OrderSummary, ProductWithCollection,
};

#[derive(Debug, Serialize)]
pub struct CustomerRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: Masked<String>,
    pub phone: Masked<String>,
    pub membership: &'static str,
    pub order_count: i64,
    /// Filters the order list down to this customer
    pub orders_link: String,
}

impl From<CustomerWithOrders> for CustomerRow {
    fn from(view: CustomerWithOrders) -> Self {
        let orders_link = order_list_link(view.customer.id);
        Self {
            id: view.customer.id,
            first_name: view.customer.first_name,
            last_name: view.customer.last_name,
            email: view.customer.email,
            phone: view.customer.phone,
            membership: view.customer.membership.label(),
            order_count: view.order_count,
            orders_link,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProductRow {
    pub id: Uuid,
    pub title: String,
    pub unit_price: Decimal,
    pub inventory: i32,
    pub inventory_status: &'static str,
    pub collection_title: String,
}

impl From<ProductWithCollection> for ProductRow {
    fn from(view: ProductWithCollection) -> Self {
        let status = view.product.inventory_status();
        Self {
            id: view.product.id,
            title: view.product.title,
            unit_price: view.product.unit_price,
            inventory: view.product.inventory,
            inventory_status: status.label(),
            collection_title: view.collection_title,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CollectionRow {
    pub id: Uuid,
    pub title: String,
    pub product_count: i64,
    /// Filters the product list down to this collection
    pub products_link: String,
}

impl From<CollectionWithCount> for CollectionRow {
    fn from(view: CollectionWithCount) -> Self {
        let products_link = product_list_link(view.collection.id);
        Self {
            id: view.collection.id,
            title: view.collection.title,
            product_count: view.product_count,
            products_link,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrderRow {
    pub id: Uuid,
    pub placed_at: chrono::DateTime<chrono::Utc>,
    pub payment_status: &'static str,
    pub customer: String,
}

impl From<OrderSummary> for OrderRow {
    fn from(view: OrderSummary) -> Self {
        Self {
            id: view.order.id,
            placed_at: view.order.placed_at,
            payment_status: view.order.payment_status.label(),
            customer: view.customer_name,
        }
    }
}

pub fn order_list_link(customer_id: Uuid) -> String {
    format!("/admin/orders?customer={customer_id}")
}

pub fn product_list_link(collection_id: Uuid) -> String {
    format!("/admin/products?collection={collection_id}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use backoffice_core::catalog::{Collection, Product};
    use backoffice_core::customer::{Customer, Membership};
    use rust_decimal_macros::dec;

    #[test]
    fn test_customer_row_links_to_filtered_orders() {
        let id = Uuid::new_v4();
        let row = CustomerRow::from(CustomerWithOrders {
            customer: Customer {
                id,
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                email: Masked("ada@example.com".to_string()),
                phone: Masked("555-0100".to_string()),
                membership: Membership::Silver,
            },
            order_count: 7,
        });
        assert_eq!(row.order_count, 7);
        assert_eq!(row.membership, "Silver");
        assert_eq!(row.orders_link, format!("/admin/orders?customer={id}"));
    }

    #[test]
    fn test_product_row_carries_status_label() {
        let row = ProductRow::from(ProductWithCollection {
            product: Product {
                id: Uuid::new_v4(),
                title: "Widget".to_string(),
                unit_price: dec!(10.00),
                inventory: 20,
                collection_id: Uuid::new_v4(),
            },
            collection_title: "Hardware".to_string(),
        });
        // 20 sits on a boundary and must classify as Low here too.
        assert_eq!(row.inventory_status, "Low");
        assert_eq!(row.collection_title, "Hardware");
    }

    #[test]
    fn test_collection_row_links_to_filtered_products() {
        let id = Uuid::new_v4();
        let row = CollectionRow::from(CollectionWithCount {
            collection: Collection {
                id,
                title: "Hardware".to_string(),
            },
            product_count: 12,
        });
        assert_eq!(row.products_link, format!("/admin/products?collection={id}"));
    }
}
