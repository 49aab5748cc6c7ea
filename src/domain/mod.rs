//! Ledger domain models, persistence-friendly types, and helpers.

pub mod common;
pub mod expense;
pub mod ledger;
pub mod reference;
pub mod trade;
pub mod transfer;

pub use common::{Dated, Displayable, Identifiable, NamedEntity};
pub use expense::{CashFlow, ExpenseEntry};
pub use ledger::{DateRange, Ledger, CURRENT_SCHEMA_VERSION};
pub use reference::{Bank, Platform, ADJUSTMENT_BANK};
pub use trade::{TradeEntry, TradeKind};
pub use transfer::{BankTransferEntry, TransferEntry};
