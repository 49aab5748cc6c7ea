use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// Sentinel bank name marking manual balance corrections. Bank transfers with
/// exactly one leg equal to this value are adjustment legs: they are excluded
/// from ordinary interbank totals and tracked separately in cash balances.
pub const ADJUSTMENT_BANK: &str = "ADJUSTMENT";

/// A fiat-currency holding account referenced by trades, expenses, and bank
/// transfers. Transaction entities reference banks by name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bank {
    pub id: Uuid,
    pub name: String,
    pub is_active: bool,
}

impl Bank {
    /// Creates a new active bank.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            is_active: true,
        }
    }
}

impl Identifiable for Bank {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Bank {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Bank {
    fn display_label(&self) -> String {
        if self.is_active {
            self.name.clone()
        } else {
            format!("{} (inactive)", self.name)
        }
    }
}

/// An external trading venue/exchange account holding asset stock. Referenced
/// by trades and platform transfers by name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Platform {
    pub id: Uuid,
    pub name: String,
    pub is_active: bool,
}

impl Platform {
    /// Creates a new active platform.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            is_active: true,
        }
    }
}

impl Identifiable for Platform {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Platform {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Platform {
    fn display_label(&self) -> String {
        if self.is_active {
            self.name.clone()
        } else {
            format!("{} (inactive)", self.name)
        }
    }
}
