//! List-view filter parsing.
//!
//! The stock filter offers exactly four buckets matching the inventory
//! status thresholds. Bucket bounds are derived from the same
//! classification function the list column uses, so a product on a
//! boundary value filters into the bucket it displays as.

use backoffice_core::inventory::InventoryStatus;
use backoffice_core::order::PaymentStatus;

/// The four fixed choices of the inventory range filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockBucket(pub InventoryStatus);

impl StockBucket {
    /// Query-string values accepted by the `stock` parameter
    pub fn query_values() -> [&'static str; 4] {
        ["verylow", "low", "moderate", "high"]
    }

    pub fn parse(value: &str) -> Option<Self> {
        let status = match value {
            "verylow" => InventoryStatus::VeryFew,
            "low" => InventoryStatus::Low,
            "moderate" => InventoryStatus::Moderate,
            "high" => InventoryStatus::High,
            _ => return None,
        };
        Some(StockBucket(status))
    }

    /// Inclusive bounds for the repository query; `None` max is unbounded.
    pub fn bounds(&self) -> (i32, Option<i32>) {
        self.0.bounds()
    }

    pub fn matches(&self, inventory: i32) -> bool {
        InventoryStatus::classify(inventory) == self.0
    }
}

/// Parse the `payment_status` filter value (one-letter code or label)
pub fn parse_payment_status(value: &str) -> Option<PaymentStatus> {
    PaymentStatus::from_code(value).or_else(|| match value {
        "pending" => Some(PaymentStatus::Pending),
        "complete" => Some(PaymentStatus::Complete),
        "failed" => Some(PaymentStatus::Failed),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_unknown_values() {
        assert!(StockBucket::parse("verylow").is_some());
        assert!(StockBucket::parse("everything").is_none());
        assert!(StockBucket::parse("").is_none());
    }

    #[test]
    fn test_bucket_boundaries_agree_with_status_column() {
        // 5, 20 and 40 must filter into the same bucket they display as.
        for inventory in [0, 5, 6, 20, 21, 40, 41, 500] {
            let status = InventoryStatus::classify(inventory);
            for value in StockBucket::query_values() {
                let bucket = StockBucket::parse(value).unwrap();
                assert_eq!(bucket.matches(inventory), bucket.0 == status);
            }
        }
    }

    #[test]
    fn test_bucket_bounds() {
        assert_eq!(StockBucket::parse("verylow").unwrap().bounds().1, Some(5));
        assert_eq!(StockBucket::parse("low").unwrap().bounds(), (6, Some(20)));
        assert_eq!(
            StockBucket::parse("moderate").unwrap().bounds(),
            (21, Some(40))
        );
        assert_eq!(StockBucket::parse("high").unwrap().bounds(), (41, None));
    }

    #[test]
    fn test_parse_payment_status() {
        assert_eq!(parse_payment_status("P"), Some(PaymentStatus::Pending));
        assert_eq!(parse_payment_status("complete"), Some(PaymentStatus::Complete));
        assert_eq!(parse_payment_status("paid"), None);
    }
}
