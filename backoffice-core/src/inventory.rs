use serde::{Deserialize, Serialize};

/// Inclusive upper bounds for the stock buckets
pub const VERY_FEW_MAX: i32 = 5;
pub const LOW_MAX: i32 = 20;
pub const MODERATE_MAX: i32 = 40;

/// Coarse four-bucket classification of a product's stock count.
///
/// The single source of truth for the thresholds: both the product list
/// column and the stock range filter go through [`InventoryStatus::classify`],
/// so a count of exactly 5, 20 or 40 lands in the same bucket everywhere.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InventoryStatus {
    VeryFew,
    Low,
    Moderate,
    High,
}

impl InventoryStatus {
    pub fn classify(inventory: i32) -> Self {
        if inventory <= VERY_FEW_MAX {
            InventoryStatus::VeryFew
        } else if inventory <= LOW_MAX {
            InventoryStatus::Low
        } else if inventory <= MODERATE_MAX {
            InventoryStatus::Moderate
        } else {
            InventoryStatus::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InventoryStatus::VeryFew => "Very Few",
            InventoryStatus::Low => "Low",
            InventoryStatus::Moderate => "Moderate",
            InventoryStatus::High => "High",
        }
    }

    /// Inclusive `(min, max)` stock range covered by this bucket.
    /// `None` for max means unbounded above.
    pub fn bounds(&self) -> (i32, Option<i32>) {
        match self {
            InventoryStatus::VeryFew => (i32::MIN, Some(VERY_FEW_MAX)),
            InventoryStatus::Low => (VERY_FEW_MAX + 1, Some(LOW_MAX)),
            InventoryStatus::Moderate => (LOW_MAX + 1, Some(MODERATE_MAX)),
            InventoryStatus::High => (MODERATE_MAX + 1, None),
        }
    }

    pub fn all() -> [InventoryStatus; 4] {
        [
            InventoryStatus::VeryFew,
            InventoryStatus::Low,
            InventoryStatus::Moderate,
            InventoryStatus::High,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        // Thresholds are inclusive: 5, 20 and 40 belong to the lower bucket.
        assert_eq!(InventoryStatus::classify(0), InventoryStatus::VeryFew);
        assert_eq!(InventoryStatus::classify(5), InventoryStatus::VeryFew);
        assert_eq!(InventoryStatus::classify(6), InventoryStatus::Low);
        assert_eq!(InventoryStatus::classify(20), InventoryStatus::Low);
        assert_eq!(InventoryStatus::classify(21), InventoryStatus::Moderate);
        assert_eq!(InventoryStatus::classify(40), InventoryStatus::Moderate);
        assert_eq!(InventoryStatus::classify(41), InventoryStatus::High);
    }

    #[test]
    fn test_bounds_agree_with_classify() {
        for status in InventoryStatus::all() {
            let (min, max) = status.bounds();
            let lo = min.max(0);
            assert_eq!(InventoryStatus::classify(lo), status);
            if let Some(max) = max {
                assert_eq!(InventoryStatus::classify(max), status);
                assert_ne!(InventoryStatus::classify(max + 1), status);
            }
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(InventoryStatus::classify(3).label(), "Very Few");
        assert_eq!(InventoryStatus::classify(100).label(), "High");
    }
}
