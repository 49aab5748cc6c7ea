use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Dated, Displayable, Identifiable};

/// Selects which trade collection an operation targets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TradeKind {
    Sale,
    Purchase,
}

impl TradeKind {
    pub fn label(&self) -> &'static str {
        match self {
            TradeKind::Sale => "sale",
            TradeKind::Purchase => "purchase",
        }
    }
}

/// A single sale or purchase of an asset against an external platform,
/// settled in fiat through a bank. Immutable once created; edits replace the
/// full record and stamp `edited_by`/`updated_at`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TradeEntry {
    pub id: Uuid,
    pub order_number: String,
    pub bank: String,
    pub platform: String,
    pub asset_type: String,
    pub fiat_type: String,
    pub total_price: f64,
    pub price: f64,
    pub quantity: f64,
    pub counterparty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl TradeEntry {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        order_number: impl Into<String>,
        bank: impl Into<String>,
        platform: impl Into<String>,
        asset_type: impl Into<String>,
        fiat_type: impl Into<String>,
        total_price: f64,
        price: f64,
        quantity: f64,
        counterparty: impl Into<String>,
        created_by: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            order_number: order_number.into(),
            bank: bank.into(),
            platform: platform.into(),
            asset_type: asset_type.into(),
            fiat_type: fiat_type.into(),
            total_price,
            price,
            quantity,
            counterparty: counterparty.into(),
            contact: None,
            created_at: Utc::now(),
            created_by: created_by.into(),
            edited_by: None,
            updated_at: None,
        }
    }

    pub fn with_contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = Some(contact.into());
        self
    }

    /// Stamps the editing operator and update time after a mutation.
    pub fn mark_edited(&mut self, editor: impl Into<String>) {
        self.edited_by = Some(editor.into());
        self.updated_at = Some(Utc::now());
    }

    /// Deviation of the recorded quantity from `total_price / price`, the
    /// advisory consistency check. `None` when the unit price is zero.
    pub fn price_consistency(&self) -> Option<f64> {
        if self.price.abs() < f64::EPSILON {
            return None;
        }
        Some(self.quantity - self.total_price / self.price)
    }
}

impl Identifiable for TradeEntry {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Dated for TradeEntry {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Displayable for TradeEntry {
    fn display_label(&self) -> String {
        format!(
            "{} {:.8} {} @ {} on {}",
            self.order_number, self.quantity, self.asset_type, self.price, self.platform
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TradeEntry {
        TradeEntry::new(
            "ORD-1", "Maybank", "Binance", "USDT", "MYR", 470.0, 4.70, 100.0, "Ali", "desk",
        )
    }

    #[test]
    fn new_sets_audit_defaults() {
        let entry = sample();
        assert_eq!(entry.created_by, "desk");
        assert!(entry.edited_by.is_none());
        assert!(entry.updated_at.is_none());
    }

    #[test]
    fn mark_edited_stamps_editor_and_time() {
        let mut entry = sample();
        entry.mark_edited("auditor");
        assert_eq!(entry.edited_by.as_deref(), Some("auditor"));
        assert!(entry.updated_at.is_some());
    }

    #[test]
    fn price_consistency_is_advisory() {
        let entry = sample();
        assert!(entry.price_consistency().unwrap().abs() < 1e-9);

        let mut skewed = sample();
        skewed.quantity = 90.0;
        assert!(skewed.price_consistency().unwrap() < 0.0);

        let mut free = sample();
        free.price = 0.0;
        assert!(free.price_consistency().is_none());
    }
}
