//! Business logic helpers for expense and income entries.

use uuid::Uuid;

use crate::core::services::{ensure_amount, ServiceError, ServiceResult};
use crate::domain::expense::ExpenseEntry;
use crate::domain::ledger::Ledger;

/// Provides validated CRUD helpers for expense/income entries.
pub struct ExpenseService;

impl ExpenseService {
    pub fn add(ledger: &mut Ledger, entry: ExpenseEntry) -> ServiceResult<Uuid> {
        ensure_amount("amount", entry.amount)?;
        if entry.bank.trim().is_empty() {
            return Err(ServiceError::Invalid("bank is required".into()));
        }
        let id = ledger.add_expense(entry);
        tracing::info!(%id, "expense entry recorded");
        Ok(id)
    }

    pub fn update<F>(ledger: &mut Ledger, id: Uuid, editor: &str, mutator: F) -> ServiceResult<()>
    where
        F: FnOnce(&mut ExpenseEntry),
    {
        let entry = ledger
            .expense_mut(id)
            .ok_or_else(|| ServiceError::Invalid("expense not found".into()))?;
        let mut updated = entry.clone();
        mutator(&mut updated);
        updated.mark_edited(editor);
        ensure_amount("amount", updated.amount)?;
        *entry = updated;
        ledger.touch();
        Ok(())
    }

    pub fn remove(ledger: &mut Ledger, id: Uuid) -> ServiceResult<ExpenseEntry> {
        ledger
            .remove_expense(id)
            .ok_or_else(|| ServiceError::Invalid("expense not found".into()))
    }

    pub fn list(ledger: &Ledger) -> Vec<&ExpenseEntry> {
        ledger.expenses.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::expense::CashFlow;

    #[test]
    fn add_rejects_negative_amount() {
        let mut ledger = Ledger::new("Desk");
        let entry = ExpenseEntry::new("Maybank", -5.0, CashFlow::Expense, "desk");
        assert!(ExpenseService::add(&mut ledger, entry).is_err());
        assert!(ledger.expenses.is_empty());
    }

    #[test]
    fn update_stamps_editor() {
        let mut ledger = Ledger::new("Desk");
        let entry = ExpenseEntry::new("Maybank", 20.0, CashFlow::Expense, "desk");
        let id = ExpenseService::add(&mut ledger, entry).unwrap();
        ExpenseService::update(&mut ledger, id, "auditor", |entry| {
            entry.category = Some("fees".into());
        })
        .unwrap();
        let entry = &ledger.expenses[0];
        assert_eq!(entry.category.as_deref(), Some("fees"));
        assert_eq!(entry.edited_by.as_deref(), Some("auditor"));
    }
}
