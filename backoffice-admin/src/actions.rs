//! Bulk-action outcome reporting.

use serde::Serialize;

/// Result of a bulk action over an admin row selection
#[derive(Debug, Clone, Serialize)]
pub struct BulkOutcome {
    pub selected: usize,
    pub affected: u64,
    pub message: String,
}

impl BulkOutcome {
    /// Outcome of the clear-inventory action, with the console notification
    /// line ("N products were successfully updated.").
    pub fn inventory_cleared(selected: usize, affected: u64) -> Self {
        let phrase = if affected == 1 {
            "product was"
        } else {
            "products were"
        };
        Self {
            selected,
            affected,
            message: format!("{affected} {phrase} successfully updated."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_pluralizes() {
        let one = BulkOutcome::inventory_cleared(1, 1);
        assert_eq!(one.message, "1 product was successfully updated.");

        let many = BulkOutcome::inventory_cleared(3, 3);
        assert_eq!(many.message, "3 products were successfully updated.");
    }
}
