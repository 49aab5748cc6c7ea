//! Business logic helpers for managing sale and purchase entries.

use uuid::Uuid;

use crate::core::services::{ensure_amount, ServiceError, ServiceResult};
use crate::domain::ledger::Ledger;
use crate::domain::trade::{TradeEntry, TradeKind};

/// Provides validated CRUD helpers for the sales and purchases books.
pub struct TradeService;

impl TradeService {
    /// Adds a new entry to the selected book and returns its identifier.
    pub fn add(ledger: &mut Ledger, kind: TradeKind, entry: TradeEntry) -> ServiceResult<Uuid> {
        Self::validate(&entry)?;
        let id = ledger.add_trade(kind, entry);
        tracing::info!(kind = kind.label(), %id, "trade entry recorded");
        Ok(id)
    }

    /// Updates the entry identified by `id` via the provided mutator and
    /// stamps the editing operator.
    pub fn update<F>(
        ledger: &mut Ledger,
        kind: TradeKind,
        id: Uuid,
        editor: &str,
        mutator: F,
    ) -> ServiceResult<()>
    where
        F: FnOnce(&mut TradeEntry),
    {
        let entry = ledger
            .trade_mut(kind, id)
            .ok_or_else(|| ServiceError::Invalid(format!("{} not found", kind.label())))?;
        // Full-record replacement: mutate a copy, validate, then commit.
        let mut updated = entry.clone();
        mutator(&mut updated);
        updated.mark_edited(editor);
        Self::validate(&updated)?;
        *entry = updated;
        ledger.touch();
        Ok(())
    }

    /// Removes the entry identified by `id`, returning the removed instance.
    pub fn remove(ledger: &mut Ledger, kind: TradeKind, id: Uuid) -> ServiceResult<TradeEntry> {
        ledger
            .remove_trade(kind, id)
            .ok_or_else(|| ServiceError::Invalid(format!("{} not found", kind.label())))
    }

    /// Returns a snapshot of the selected book.
    pub fn list(ledger: &Ledger, kind: TradeKind) -> Vec<&TradeEntry> {
        ledger.trades(kind).iter().collect()
    }

    fn validate(entry: &TradeEntry) -> ServiceResult<()> {
        ensure_amount("total price", entry.total_price)?;
        ensure_amount("price", entry.price)?;
        ensure_amount("quantity", entry.quantity)?;
        if entry.platform.trim().is_empty() {
            return Err(ServiceError::Invalid("platform is required".into()));
        }
        if entry.bank.trim().is_empty() {
            return Err(ServiceError::Invalid("bank is required".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_ledger() -> Ledger {
        Ledger::new("Desk")
    }

    fn sample_entry() -> TradeEntry {
        TradeEntry::new(
            "ORD-1", "Maybank", "Binance", "USDT", "MYR", 470.0, 4.7, 100.0, "Ali", "desk",
        )
    }

    #[test]
    fn add_rejects_non_finite_amounts() {
        let mut ledger = base_ledger();
        let mut entry = sample_entry();
        entry.quantity = f64::NAN;
        let err = TradeService::add(&mut ledger, TradeKind::Sale, entry)
            .expect_err("NaN quantity must be rejected");
        assert!(matches!(err, ServiceError::Invalid(_)));
        assert!(ledger.sales.is_empty());
    }

    #[test]
    fn update_stamps_editor() {
        let mut ledger = base_ledger();
        let id = TradeService::add(&mut ledger, TradeKind::Purchase, sample_entry()).unwrap();
        TradeService::update(&mut ledger, TradeKind::Purchase, id, "auditor", |entry| {
            entry.quantity = 90.0;
        })
        .unwrap();
        let entry = ledger.trade(TradeKind::Purchase, id).unwrap();
        assert_eq!(entry.quantity, 90.0);
        assert_eq!(entry.edited_by.as_deref(), Some("auditor"));
        assert!(entry.updated_at.is_some());
    }

    #[test]
    fn failed_update_leaves_entry_unchanged() {
        let mut ledger = base_ledger();
        let id = TradeService::add(&mut ledger, TradeKind::Sale, sample_entry()).unwrap();
        let err = TradeService::update(&mut ledger, TradeKind::Sale, id, "auditor", |entry| {
            entry.quantity = f64::NAN;
        })
        .expect_err("NaN quantity must be rejected");
        assert!(matches!(err, ServiceError::Invalid(_)));
        let entry = ledger.trade(TradeKind::Sale, id).unwrap();
        assert_eq!(entry.quantity, 100.0);
        assert!(entry.edited_by.is_none());
    }

    #[test]
    fn update_fails_for_missing_entry() {
        let mut ledger = base_ledger();
        let err = TradeService::update(&mut ledger, TradeKind::Sale, Uuid::new_v4(), "x", |_| {})
            .expect_err("update must fail for unknown id");
        assert!(
            matches!(err, ServiceError::Invalid(ref message) if message.contains("not found")),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn remove_returns_deleted_entry() {
        let mut ledger = base_ledger();
        let id = TradeService::add(&mut ledger, TradeKind::Sale, sample_entry()).unwrap();
        let removed = TradeService::remove(&mut ledger, TradeKind::Sale, id).unwrap();
        assert_eq!(removed.id, id);
        assert!(ledger.trade(TradeKind::Sale, id).is_none());
    }

    #[test]
    fn books_are_independent() {
        let mut ledger = base_ledger();
        TradeService::add(&mut ledger, TradeKind::Sale, sample_entry()).unwrap();
        assert_eq!(TradeService::list(&ledger, TradeKind::Sale).len(), 1);
        assert!(TradeService::list(&ledger, TradeKind::Purchase).is_empty());
    }
}
