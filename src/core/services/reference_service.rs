//! Business logic helpers for the bank and platform reference lists.
//!
//! Transaction entities reference banks and platforms by name, so renames do
//! not rewrite historic entries; records keep the name that was current when
//! they were created.

use uuid::Uuid;

use crate::core::services::{ServiceError, ServiceResult};
use crate::domain::ledger::Ledger;
use crate::domain::reference::{Bank, Platform, ADJUSTMENT_BANK};

/// Manages the selectable bank and platform lists.
pub struct ReferenceService;

impl ReferenceService {
    pub fn add_bank(ledger: &mut Ledger, name: &str) -> ServiceResult<Uuid> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::Invalid("bank name is required".into()));
        }
        if name == ADJUSTMENT_BANK {
            return Err(ServiceError::Invalid(
                "the adjustment sentinel is not a selectable bank".into(),
            ));
        }
        if ledger.bank_by_name(name).is_some() {
            return Err(ServiceError::Invalid(format!("bank {name} already exists")));
        }
        Ok(ledger.add_bank(Bank::new(name)))
    }

    pub fn add_platform(ledger: &mut Ledger, name: &str) -> ServiceResult<Uuid> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::Invalid("platform name is required".into()));
        }
        if ledger.platform_by_name(name).is_some() {
            return Err(ServiceError::Invalid(format!(
                "platform {name} already exists"
            )));
        }
        Ok(ledger.add_platform(Platform::new(name)))
    }

    pub fn rename_bank(ledger: &mut Ledger, id: Uuid, new_name: &str) -> ServiceResult<()> {
        let new_name = new_name.trim();
        if new_name.is_empty() || new_name == ADJUSTMENT_BANK {
            return Err(ServiceError::Invalid("invalid bank name".into()));
        }
        if ledger.banks.iter().any(|b| b.name == new_name && b.id != id) {
            return Err(ServiceError::Invalid(format!(
                "bank {new_name} already exists"
            )));
        }
        let bank = ledger
            .banks
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| ServiceError::Invalid("bank not found".into()))?;
        tracing::warn!(old = %bank.name, new = %new_name, "renaming bank; historic entries keep the old name");
        bank.name = new_name.to_string();
        ledger.touch();
        Ok(())
    }

    pub fn rename_platform(ledger: &mut Ledger, id: Uuid, new_name: &str) -> ServiceResult<()> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(ServiceError::Invalid("invalid platform name".into()));
        }
        if ledger
            .platforms
            .iter()
            .any(|p| p.name == new_name && p.id != id)
        {
            return Err(ServiceError::Invalid(format!(
                "platform {new_name} already exists"
            )));
        }
        let platform = ledger
            .platforms
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ServiceError::Invalid("platform not found".into()))?;
        tracing::warn!(old = %platform.name, new = %new_name, "renaming platform; historic entries keep the old name");
        platform.name = new_name.to_string();
        ledger.touch();
        Ok(())
    }

    pub fn set_bank_active(ledger: &mut Ledger, id: Uuid, active: bool) -> ServiceResult<()> {
        let bank = ledger
            .banks
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| ServiceError::Invalid("bank not found".into()))?;
        bank.is_active = active;
        ledger.touch();
        Ok(())
    }

    pub fn set_platform_active(ledger: &mut Ledger, id: Uuid, active: bool) -> ServiceResult<()> {
        let platform = ledger
            .platforms
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ServiceError::Invalid("platform not found".into()))?;
        platform.is_active = active;
        ledger.touch();
        Ok(())
    }

    /// Banks offered in selection lists and dashboard totals.
    pub fn active_banks(ledger: &Ledger) -> Vec<&Bank> {
        ledger.banks.iter().filter(|b| b.is_active).collect()
    }

    /// Platforms offered in selection lists and dashboard totals.
    pub fn active_platforms(ledger: &Ledger) -> Vec<&Platform> {
        ledger.platforms.iter().filter(|p| p.is_active).collect()
    }
}
