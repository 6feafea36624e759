//! Customer Model

use serde::{Deserialize, Serialize};

/// Customer entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Assigned by the store on first save
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

impl Customer {
    /// Build a transient customer (not yet persisted)
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone: Option<String>,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone,
            notes,
        }
    }

    /// "First Last", computed on demand
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Create / replace customer payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerInput {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Customer with its reservation count (top customers view)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRanking {
    #[serde(flatten)]
    pub customer: Customer,
    pub reservation_count: i64,
}
