use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::LedgerError;

use super::{
    expense::ExpenseEntry,
    reference::{Bank, Platform},
    trade::{TradeEntry, TradeKind},
    transfer::{BankTransferEntry, TransferEntry},
};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Inclusive calendar-day range used by report filtering.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, LedgerError> {
        if end < start {
            return Err(LedgerError::InvalidRef(
                "range end must not precede start".into(),
            ));
        }
        Ok(Self { start, end })
    }

    /// Both ends are inclusive.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Aggregate root holding the append-only transaction collections and the
/// bank/platform reference lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub banks: Vec<Bank>,
    #[serde(default)]
    pub platforms: Vec<Platform>,
    #[serde(default)]
    pub sales: Vec<TradeEntry>,
    #[serde(default)]
    pub purchases: Vec<TradeEntry>,
    #[serde(default)]
    pub transfers: Vec<TransferEntry>,
    #[serde(default)]
    pub bank_transfers: Vec<BankTransferEntry>,
    #[serde(default)]
    pub expenses: Vec<ExpenseEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Ledger::schema_version_default")]
    pub schema_version: u8,
}

impl Ledger {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            banks: Vec::new(),
            platforms: Vec::new(),
            sales: Vec::new(),
            purchases: Vec::new(),
            transfers: Vec::new(),
            bank_transfers: Vec::new(),
            expenses: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn trades(&self, kind: TradeKind) -> &Vec<TradeEntry> {
        match kind {
            TradeKind::Sale => &self.sales,
            TradeKind::Purchase => &self.purchases,
        }
    }

    pub fn trades_mut(&mut self, kind: TradeKind) -> &mut Vec<TradeEntry> {
        match kind {
            TradeKind::Sale => &mut self.sales,
            TradeKind::Purchase => &mut self.purchases,
        }
    }

    pub fn add_trade(&mut self, kind: TradeKind, entry: TradeEntry) -> Uuid {
        let id = entry.id;
        self.trades_mut(kind).push(entry);
        self.touch();
        id
    }

    pub fn trade(&self, kind: TradeKind, id: Uuid) -> Option<&TradeEntry> {
        self.trades(kind).iter().find(|entry| entry.id == id)
    }

    pub fn trade_mut(&mut self, kind: TradeKind, id: Uuid) -> Option<&mut TradeEntry> {
        self.trades_mut(kind).iter_mut().find(|entry| entry.id == id)
    }

    pub fn remove_trade(&mut self, kind: TradeKind, id: Uuid) -> Option<TradeEntry> {
        let book = self.trades_mut(kind);
        let index = book.iter().position(|entry| entry.id == id)?;
        let removed = book.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn add_transfer(&mut self, entry: TransferEntry) -> Uuid {
        let id = entry.id;
        self.transfers.push(entry);
        self.touch();
        id
    }

    pub fn transfer_mut(&mut self, id: Uuid) -> Option<&mut TransferEntry> {
        self.transfers.iter_mut().find(|entry| entry.id == id)
    }

    pub fn remove_transfer(&mut self, id: Uuid) -> Option<TransferEntry> {
        let index = self.transfers.iter().position(|entry| entry.id == id)?;
        let removed = self.transfers.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn add_bank_transfer(&mut self, entry: BankTransferEntry) -> Uuid {
        let id = entry.id;
        self.bank_transfers.push(entry);
        self.touch();
        id
    }

    pub fn bank_transfer_mut(&mut self, id: Uuid) -> Option<&mut BankTransferEntry> {
        self.bank_transfers.iter_mut().find(|entry| entry.id == id)
    }

    pub fn remove_bank_transfer(&mut self, id: Uuid) -> Option<BankTransferEntry> {
        let index = self
            .bank_transfers
            .iter()
            .position(|entry| entry.id == id)?;
        let removed = self.bank_transfers.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn add_expense(&mut self, entry: ExpenseEntry) -> Uuid {
        let id = entry.id;
        self.expenses.push(entry);
        self.touch();
        id
    }

    pub fn expense_mut(&mut self, id: Uuid) -> Option<&mut ExpenseEntry> {
        self.expenses.iter_mut().find(|entry| entry.id == id)
    }

    pub fn remove_expense(&mut self, id: Uuid) -> Option<ExpenseEntry> {
        let index = self.expenses.iter().position(|entry| entry.id == id)?;
        let removed = self.expenses.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn add_bank(&mut self, bank: Bank) -> Uuid {
        let id = bank.id;
        self.banks.push(bank);
        self.touch();
        id
    }

    pub fn add_platform(&mut self, platform: Platform) -> Uuid {
        let id = platform.id;
        self.platforms.push(platform);
        self.touch();
        id
    }

    pub fn bank_by_name(&self, name: &str) -> Option<&Bank> {
        self.banks.iter().find(|bank| bank.name == name)
    }

    pub fn platform_by_name(&self, name: &str) -> Option<&Platform> {
        self.platforms.iter().find(|platform| platform.name == name)
    }

    pub fn entry_count(&self) -> usize {
        self.sales.len()
            + self.purchases.len()
            + self.transfers.len()
            + self.bank_transfers.len()
            + self.expenses.len()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}
