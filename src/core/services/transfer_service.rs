//! Business logic helpers for platform and bank transfers.

use uuid::Uuid;

use crate::core::services::{ensure_amount, ServiceError, ServiceResult};
use crate::domain::ledger::Ledger;
use crate::domain::reference::ADJUSTMENT_BANK;
use crate::domain::transfer::{BankTransferEntry, TransferEntry};

/// Provides validated CRUD helpers for stock and fiat transfers.
pub struct TransferService;

impl TransferService {
    /// Records a platform-to-platform stock transfer. Transfers onto the
    /// originating platform are rejected.
    pub fn add_transfer(ledger: &mut Ledger, entry: TransferEntry) -> ServiceResult<Uuid> {
        ensure_amount("quantity", entry.quantity)?;
        if entry.from_platform == entry.to_platform {
            return Err(ServiceError::Invalid(
                "transfer source and destination platforms must differ".into(),
            ));
        }
        let id = ledger.add_transfer(entry);
        tracing::info!(%id, "platform transfer recorded");
        Ok(id)
    }

    pub fn update_transfer<F>(
        ledger: &mut Ledger,
        id: Uuid,
        editor: &str,
        mutator: F,
    ) -> ServiceResult<()>
    where
        F: FnOnce(&mut TransferEntry),
    {
        let entry = ledger
            .transfer_mut(id)
            .ok_or_else(|| ServiceError::Invalid("transfer not found".into()))?;
        let mut updated = entry.clone();
        mutator(&mut updated);
        updated.mark_edited(editor);
        if updated.from_platform == updated.to_platform {
            return Err(ServiceError::Invalid(
                "transfer source and destination platforms must differ".into(),
            ));
        }
        ensure_amount("quantity", updated.quantity)?;
        *entry = updated;
        ledger.touch();
        Ok(())
    }

    pub fn remove_transfer(ledger: &mut Ledger, id: Uuid) -> ServiceResult<TransferEntry> {
        ledger
            .remove_transfer(id)
            .ok_or_else(|| ServiceError::Invalid("transfer not found".into()))
    }

    /// Records an interbank fiat transfer or a manual adjustment. A sentinel
    /// leg on both sides carries no bank attribution and is rejected.
    pub fn add_bank_transfer(ledger: &mut Ledger, entry: BankTransferEntry) -> ServiceResult<Uuid> {
        ensure_amount("amount", entry.amount)?;
        if entry.from_bank == ADJUSTMENT_BANK && entry.to_bank == ADJUSTMENT_BANK {
            return Err(ServiceError::Invalid(
                "at most one transfer leg may be the adjustment sentinel".into(),
            ));
        }
        let adjustment = entry.is_adjustment();
        let id = ledger.add_bank_transfer(entry);
        tracing::info!(%id, adjustment, "bank transfer recorded");
        Ok(id)
    }

    pub fn update_bank_transfer<F>(
        ledger: &mut Ledger,
        id: Uuid,
        editor: &str,
        mutator: F,
    ) -> ServiceResult<()>
    where
        F: FnOnce(&mut BankTransferEntry),
    {
        let entry = ledger
            .bank_transfer_mut(id)
            .ok_or_else(|| ServiceError::Invalid("bank transfer not found".into()))?;
        let mut updated = entry.clone();
        mutator(&mut updated);
        updated.mark_edited(editor);
        if updated.from_bank == ADJUSTMENT_BANK && updated.to_bank == ADJUSTMENT_BANK {
            return Err(ServiceError::Invalid(
                "at most one transfer leg may be the adjustment sentinel".into(),
            ));
        }
        ensure_amount("amount", updated.amount)?;
        *entry = updated;
        ledger.touch();
        Ok(())
    }

    pub fn remove_bank_transfer(ledger: &mut Ledger, id: Uuid) -> ServiceResult<BankTransferEntry> {
        ledger
            .remove_bank_transfer(id)
            .ok_or_else(|| ServiceError::Invalid("bank transfer not found".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_transfer_is_rejected() {
        let mut ledger = Ledger::new("Desk");
        let entry = TransferEntry::new("Binance", "Binance", 5.0, "desk");
        let err = TransferService::add_transfer(&mut ledger, entry)
            .expect_err("same-platform transfer must fail");
        assert!(matches!(err, ServiceError::Invalid(_)));
        assert!(ledger.transfers.is_empty());
    }

    #[test]
    fn adjustment_leg_is_accepted() {
        let mut ledger = Ledger::new("Desk");
        let entry = BankTransferEntry::new(ADJUSTMENT_BANK, "-", "Maybank", "001", 50.0, "desk");
        TransferService::add_bank_transfer(&mut ledger, entry).unwrap();
        assert_eq!(ledger.bank_transfers.len(), 1);
        assert!(ledger.bank_transfers[0].is_adjustment());
    }

    #[test]
    fn double_sentinel_is_rejected() {
        let mut ledger = Ledger::new("Desk");
        let entry =
            BankTransferEntry::new(ADJUSTMENT_BANK, "-", ADJUSTMENT_BANK, "-", 50.0, "desk");
        assert!(TransferService::add_bank_transfer(&mut ledger, entry).is_err());
    }

    #[test]
    fn remove_returns_deleted_transfer() {
        let mut ledger = Ledger::new("Desk");
        let entry = TransferEntry::new("Binance", "OKX", 5.0, "desk");
        let id = TransferService::add_transfer(&mut ledger, entry).unwrap();
        let removed = TransferService::remove_transfer(&mut ledger, id).unwrap();
        assert_eq!(removed.id, id);
        assert!(ledger.transfers.is_empty());
    }
}
