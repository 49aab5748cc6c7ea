//! Pure balance aggregation over the append-only entry collections.
//!
//! Every function here is synchronous, side-effect free, and never mutates
//! its inputs. Balances are advisory: a negative stock balance signals
//! over-commitment and is reported, not rejected.

use crate::domain::common::Dated;
use crate::domain::expense::{CashFlow, ExpenseEntry};
use crate::domain::ledger::DateRange;
use crate::domain::reference::ADJUSTMENT_BANK;
use crate::domain::trade::TradeEntry;
use crate::domain::transfer::{BankTransferEntry, TransferEntry};

/// Numeric field of a trade entry to aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeField {
    Quantity,
    TotalPrice,
}

/// Leg of a platform transfer to match against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    From,
    To,
}

/// Sums `field` over entries recorded against `platform`. Empty input sums
/// to zero.
pub fn platform_total(entries: &[TradeEntry], platform: &str, field: TradeField) -> f64 {
    entries
        .iter()
        .filter(|entry| entry.platform == platform)
        .map(|entry| match field {
            TradeField::Quantity => entry.quantity,
            TradeField::TotalPrice => entry.total_price,
        })
        .sum()
}

/// Sums `total_price` over entries settled through `bank`.
pub fn bank_total(entries: &[TradeEntry], bank: &str) -> f64 {
    entries
        .iter()
        .filter(|entry| entry.bank == bank)
        .map(|entry| entry.total_price)
        .sum()
}

/// Sums transferred quantity where the selected leg matches `platform`.
pub fn transfer_total(transfers: &[TransferEntry], platform: &str, direction: Direction) -> f64 {
    transfers
        .iter()
        .filter(|transfer| match direction {
            Direction::From => transfer.from_platform == platform,
            Direction::To => transfer.to_platform == platform,
        })
        .map(|transfer| transfer.quantity)
        .sum()
}

/// Net asset quantity attributed to `platform`:
/// `purchased - sold - transferred out + transferred in`. Signed; negative
/// results are meaningful.
pub fn stock_balance(
    purchases: &[TradeEntry],
    sales: &[TradeEntry],
    transfers: &[TransferEntry],
    platform: &str,
) -> f64 {
    platform_total(purchases, platform, TradeField::Quantity)
        - platform_total(sales, platform, TradeField::Quantity)
        - transfer_total(transfers, platform, Direction::From)
        + transfer_total(transfers, platform, Direction::To)
}

/// Net fiat amount attributed to `bank`:
/// `sales in - purchases out - net expenses + transfers in - transfers out
/// + adjustments in - adjustments out`.
///
/// Bank transfers with exactly one `ADJUSTMENT` leg are manual corrections
/// and contribute to the adjustment terms; ordinary interbank terms exclude
/// them entirely.
pub fn bank_cash_balance(
    bank: &str,
    sales: &[TradeEntry],
    purchases: &[TradeEntry],
    expenses: &[ExpenseEntry],
    bank_transfers: &[BankTransferEntry],
) -> f64 {
    let sales_in = bank_total(sales, bank);
    let purchases_out = bank_total(purchases, bank);

    let mut expense_out = 0.0;
    let mut income_in = 0.0;
    for entry in expenses.iter().filter(|entry| entry.bank == bank) {
        match entry.flow {
            CashFlow::Expense => expense_out += entry.amount,
            CashFlow::Income => income_in += entry.amount,
        }
    }

    let mut transfers_in = 0.0;
    let mut transfers_out = 0.0;
    let mut adjustment_in = 0.0;
    let mut adjustment_out = 0.0;
    for transfer in bank_transfers {
        if transfer.is_adjustment() {
            if transfer.to_bank == bank && transfer.from_bank == ADJUSTMENT_BANK {
                adjustment_in += transfer.amount;
            } else if transfer.from_bank == bank && transfer.to_bank == ADJUSTMENT_BANK {
                adjustment_out += transfer.amount;
            }
            continue;
        }
        if transfer.from_bank == ADJUSTMENT_BANK || transfer.to_bank == ADJUSTMENT_BANK {
            // Degenerate sentinel-to-sentinel rows carry no bank attribution.
            continue;
        }
        if transfer.to_bank == bank {
            transfers_in += transfer.amount;
        }
        if transfer.from_bank == bank {
            transfers_out += transfer.amount;
        }
    }

    sales_in - purchases_out - (expense_out - income_in) + transfers_in - transfers_out
        + adjustment_in
        - adjustment_out
}

/// Returns the entries whose creation date (UTC) falls within `range`, both
/// ends inclusive. When `is_active` is false the filter is a passthrough and
/// every entry is returned.
pub fn filter_by_date_range<T: Dated + Clone>(
    entries: &[T],
    range: DateRange,
    is_active: bool,
) -> Vec<T> {
    if !is_active {
        return entries.to_vec();
    }
    entries
        .iter()
        .filter(|entry| range.contains(entry.created_at().date_naive()))
        .cloned()
        .collect()
}

/// Profit margin percentage of `sales` over `purchases`, rounded to two
/// decimals. Zero purchases yield zero rather than an error.
pub fn margin(sales: f64, purchases: f64) -> f64 {
    if purchases == 0.0 {
        return 0.0;
    }
    round2((sales - purchases) / purchases * 100.0)
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::expense::ExpenseEntry;
    use crate::domain::trade::TradeEntry;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn trade(platform: &str, bank: &str, quantity: f64, total_price: f64) -> TradeEntry {
        let mut entry = TradeEntry::new(
            "ORD",
            bank,
            platform,
            "USDT",
            "MYR",
            total_price,
            if quantity == 0.0 { 0.0 } else { total_price / quantity },
            quantity,
            "counterparty",
            "desk",
        );
        entry.created_at = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
        entry
    }

    fn transfer(from: &str, to: &str, quantity: f64) -> TransferEntry {
        TransferEntry::new(from, to, quantity, "desk")
    }

    #[test]
    fn totals_are_zero_for_empty_input() {
        assert_eq!(platform_total(&[], "X", TradeField::Quantity), 0.0);
        assert_eq!(bank_total(&[], "Maybank"), 0.0);
        assert_eq!(transfer_total(&[], "X", Direction::From), 0.0);
        assert_eq!(stock_balance(&[], &[], &[], "X"), 0.0);
        assert_eq!(bank_cash_balance("Maybank", &[], &[], &[], &[]), 0.0);
    }

    #[test]
    fn platform_total_selects_the_requested_field() {
        let entries = vec![trade("X", "Maybank", 10.0, 47.0), trade("Y", "CIMB", 3.0, 14.1)];
        assert_eq!(platform_total(&entries, "X", TradeField::Quantity), 10.0);
        assert_eq!(platform_total(&entries, "X", TradeField::TotalPrice), 47.0);
        assert_eq!(platform_total(&entries, "Z", TradeField::Quantity), 0.0);
    }

    #[test]
    fn stock_balance_nets_trades_and_transfers() {
        let purchases = vec![trade("X", "Maybank", 10.0, 47.0)];
        let sales = vec![trade("X", "Maybank", 3.0, 14.4)];
        let transfers = vec![transfer("X", "Y", 2.0)];
        assert_eq!(stock_balance(&purchases, &sales, &transfers, "X"), 5.0);
        assert_eq!(stock_balance(&purchases, &sales, &transfers, "Y"), 2.0);
    }

    #[test]
    fn stock_balance_is_linear_in_each_collection() {
        let mut purchases = vec![trade("X", "Maybank", 10.0, 47.0)];
        let sales: Vec<TradeEntry> = Vec::new();
        let transfers: Vec<TransferEntry> = Vec::new();
        let base = stock_balance(&purchases, &sales, &transfers, "X");

        purchases.push(trade("X", "Maybank", 7.5, 35.0));
        assert_eq!(stock_balance(&purchases, &sales, &transfers, "X"), base + 7.5);

        let sales = vec![trade("X", "Maybank", 4.0, 19.0)];
        assert_eq!(
            stock_balance(&purchases, &sales, &transfers, "X"),
            base + 7.5 - 4.0
        );
    }

    #[test]
    fn negative_stock_balance_is_reported_not_rejected() {
        let sales = vec![trade("X", "Maybank", 8.0, 40.0)];
        assert_eq!(stock_balance(&[], &sales, &[], "X"), -8.0);
    }

    #[test]
    fn bank_cash_balance_nets_sales_expenses() {
        let sales = vec![trade("X", "Maybank", 100.0, 100.0)];
        let expenses = vec![ExpenseEntry::new("Maybank", 20.0, CashFlow::Expense, "desk")];
        assert_eq!(bank_cash_balance("Maybank", &sales, &[], &expenses, &[]), 80.0);
    }

    #[test]
    fn bank_cash_balance_counts_income_against_expenses() {
        let expenses = vec![
            ExpenseEntry::new("Maybank", 20.0, CashFlow::Expense, "desk"),
            ExpenseEntry::new("Maybank", 5.0, CashFlow::Income, "desk"),
        ];
        assert_eq!(bank_cash_balance("Maybank", &[], &[], &expenses, &[]), -15.0);
    }

    #[test]
    fn bank_cash_balance_separates_adjustment_legs() {
        let transfers = vec![
            BankTransferEntry::new("Maybank", "001", "CIMB", "002", 300.0, "desk"),
            BankTransferEntry::new(ADJUSTMENT_BANK, "-", "Maybank", "001", 50.0, "desk"),
            BankTransferEntry::new("Maybank", "001", ADJUSTMENT_BANK, "-", 10.0, "desk"),
        ];
        // -300 interbank out, +50 adjustment in, -10 adjustment out.
        assert_eq!(bank_cash_balance("Maybank", &[], &[], &[], &transfers), -260.0);
        // CIMB only sees the ordinary interbank leg.
        assert_eq!(bank_cash_balance("CIMB", &[], &[], &[], &transfers), 300.0);
    }

    #[test]
    fn inactive_filter_returns_everything() {
        let entries = vec![trade("X", "Maybank", 1.0, 1.0), trade("Y", "CIMB", 2.0, 2.0)];
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(1999, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(1999, 1, 2).unwrap(),
        )
        .unwrap();
        let filtered = filter_by_date_range(&entries, range, false);
        assert_eq!(filtered.len(), entries.len());
    }

    #[test]
    fn active_filter_is_inclusive_and_idempotent() {
        let mut inside = trade("X", "Maybank", 1.0, 1.0);
        inside.created_at = Utc.with_ymd_and_hms(2025, 6, 30, 23, 59, 59).unwrap();
        let mut outside = trade("X", "Maybank", 2.0, 2.0);
        outside.created_at = Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap();
        let entries = vec![inside.clone(), outside];

        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
        )
        .unwrap();
        let once = filter_by_date_range(&entries, range, true);
        assert_eq!(once.len(), 1);
        assert_eq!(once[0].id, inside.id);

        let twice = filter_by_date_range(&once, range, true);
        assert_eq!(twice, once);
    }

    #[test]
    fn margin_matches_reference_values() {
        assert_eq!(margin(0.0, 0.0), 0.0);
        assert_eq!(margin(150.0, 100.0), 50.0);
        assert_eq!(margin(100.0, 150.0), -33.33);
    }
}
