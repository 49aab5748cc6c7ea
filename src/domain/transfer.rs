use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Dated, Displayable, Identifiable};
use crate::domain::reference::ADJUSTMENT_BANK;

/// Moves asset stock from one platform to another.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransferEntry {
    pub id: Uuid,
    pub from_platform: String,
    pub to_platform: String,
    pub quantity: f64,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl TransferEntry {
    pub fn new(
        from_platform: impl Into<String>,
        to_platform: impl Into<String>,
        quantity: f64,
        created_by: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            from_platform: from_platform.into(),
            to_platform: to_platform.into(),
            quantity,
            created_at: Utc::now(),
            created_by: created_by.into(),
            edited_by: None,
            updated_at: None,
        }
    }

    pub fn mark_edited(&mut self, editor: impl Into<String>) {
        self.edited_by = Some(editor.into());
        self.updated_at = Some(Utc::now());
    }
}

impl Identifiable for TransferEntry {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Dated for TransferEntry {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Displayable for TransferEntry {
    fn display_label(&self) -> String {
        format!(
            "{:.8} from {} to {}",
            self.quantity, self.from_platform, self.to_platform
        )
    }
}

/// Moves fiat between bank accounts. A leg equal to [`ADJUSTMENT_BANK`] marks
/// a manual correction rather than an ordinary interbank transfer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BankTransferEntry {
    pub id: Uuid,
    pub from_bank: String,
    pub from_account: String,
    pub to_bank: String,
    pub to_account: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl BankTransferEntry {
    pub fn new(
        from_bank: impl Into<String>,
        from_account: impl Into<String>,
        to_bank: impl Into<String>,
        to_account: impl Into<String>,
        amount: f64,
        created_by: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            from_bank: from_bank.into(),
            from_account: from_account.into(),
            to_bank: to_bank.into(),
            to_account: to_account.into(),
            amount,
            reference: None,
            created_at: Utc::now(),
            created_by: created_by.into(),
            edited_by: None,
            updated_at: None,
        }
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn mark_edited(&mut self, editor: impl Into<String>) {
        self.edited_by = Some(editor.into());
        self.updated_at = Some(Utc::now());
    }

    /// True when exactly one leg is the adjustment sentinel.
    pub fn is_adjustment(&self) -> bool {
        (self.from_bank == ADJUSTMENT_BANK) != (self.to_bank == ADJUSTMENT_BANK)
    }
}

impl Identifiable for BankTransferEntry {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Dated for BankTransferEntry {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Displayable for BankTransferEntry {
    fn display_label(&self) -> String {
        format!(
            "{:.2} from {}/{} to {}/{}",
            self.amount, self.from_bank, self.from_account, self.to_bank, self.to_account
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjustment_requires_exactly_one_sentinel_leg() {
        let ordinary = BankTransferEntry::new("Maybank", "001", "CIMB", "002", 500.0, "desk");
        assert!(!ordinary.is_adjustment());

        let top_up = BankTransferEntry::new(ADJUSTMENT_BANK, "-", "CIMB", "002", 500.0, "desk");
        assert!(top_up.is_adjustment());

        let write_off = BankTransferEntry::new("CIMB", "002", ADJUSTMENT_BANK, "-", 500.0, "desk");
        assert!(write_off.is_adjustment());

        let degenerate =
            BankTransferEntry::new(ADJUSTMENT_BANK, "-", ADJUSTMENT_BANK, "-", 500.0, "desk");
        assert!(!degenerate.is_adjustment());
    }
}
