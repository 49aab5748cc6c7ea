pub mod expense_service;
pub mod reference_service;
pub mod report_service;
pub mod trade_service;
pub mod transfer_service;

pub use expense_service::ExpenseService;
pub use reference_service::ReferenceService;
pub use report_service::{BankCash, DashboardSummary, PlatformStock, ReportService};
pub use trade_service::TradeService;
pub use transfer_service::TransferService;

use crate::errors::LedgerError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("{0}")]
    Invalid(String),
}

/// Rejects non-finite or negative magnitudes before they can poison totals.
pub(crate) fn ensure_amount(label: &str, value: f64) -> ServiceResult<()> {
    if !value.is_finite() {
        return Err(ServiceError::Invalid(format!(
            "{label} must be a finite number"
        )));
    }
    if value < 0.0 {
        return Err(ServiceError::Invalid(format!(
            "{label} must not be negative"
        )));
    }
    Ok(())
}
