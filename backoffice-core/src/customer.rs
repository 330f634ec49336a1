use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pii::Masked;

/// Membership tier, stored as its one-letter code
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Membership {
    Bronze,
    Silver,
    Gold,
}

impl Membership {
    /// Storage code as persisted in the customers table
    pub fn as_code(&self) -> &'static str {
        match self {
            Membership::Bronze => "B",
            Membership::Silver => "S",
            Membership::Gold => "G",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "B" => Some(Membership::Bronze),
            "S" => Some(Membership::Silver),
            "G" => Some(Membership::Gold),
            _ => None,
        }
    }

    /// Human-readable label for list views
    pub fn label(&self) -> &'static str {
        match self {
            Membership::Bronze => "Bronze",
            Membership::Silver => "Silver",
            Membership::Gold => "Gold",
        }
    }
}

/// A registered customer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: Masked<String>,
    pub phone: Masked<String>,
    pub membership: Membership,
}

impl Customer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
