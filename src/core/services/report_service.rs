//! Dashboard aggregates built on the pure balance functions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::balance::{
    bank_cash_balance, filter_by_date_range, margin, platform_total, stock_balance, TradeField,
};
use crate::domain::common::Dated;
use crate::domain::ledger::{DateRange, Ledger};
use crate::domain::reference::ADJUSTMENT_BANK;

/// Net asset quantity held on one platform.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlatformStock {
    pub platform: String,
    pub quantity: f64,
}

/// Net fiat amount held at one bank.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BankCash {
    pub bank: String,
    pub balance: f64,
}

/// Point-in-time dashboard over an optional date range. Stock rows cover
/// active platforms and cash rows active banks; totals and margin cover the
/// filtered sales/purchases books.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardSummary {
    pub range: Option<DateRange>,
    pub stock: Vec<PlatformStock>,
    pub cash: Vec<BankCash>,
    pub sales_total: f64,
    pub purchases_total: f64,
    pub margin_percent: f64,
}

pub struct ReportService;

impl ReportService {
    /// Derives the dashboard for `ledger`, restricted to `range` when given.
    pub fn dashboard(ledger: &Ledger, range: Option<DateRange>) -> DashboardSummary {
        let sales = Self::windowed(&ledger.sales, range);
        let purchases = Self::windowed(&ledger.purchases, range);
        let transfers = Self::windowed(&ledger.transfers, range);
        let bank_transfers = Self::windowed(&ledger.bank_transfers, range);
        let expenses = Self::windowed(&ledger.expenses, range);

        let stock = ledger
            .platforms
            .iter()
            .filter(|platform| platform.is_active)
            .map(|platform| PlatformStock {
                platform: platform.name.clone(),
                quantity: stock_balance(&purchases, &sales, &transfers, &platform.name),
            })
            .collect();

        let cash = ledger
            .banks
            .iter()
            .filter(|bank| bank.is_active && bank.name != ADJUSTMENT_BANK)
            .map(|bank| BankCash {
                bank: bank.name.clone(),
                balance: bank_cash_balance(
                    &bank.name,
                    &sales,
                    &purchases,
                    &expenses,
                    &bank_transfers,
                ),
            })
            .collect();

        let sales_total: f64 = sales.iter().map(|entry| entry.total_price).sum();
        let purchases_total: f64 = purchases.iter().map(|entry| entry.total_price).sum();

        DashboardSummary {
            range,
            stock,
            cash,
            sales_total,
            purchases_total,
            margin_percent: margin(sales_total, purchases_total),
        }
    }

    /// Stock balance for a single platform over the whole ledger history.
    pub fn platform_stock(ledger: &Ledger, platform: &str) -> f64 {
        stock_balance(&ledger.purchases, &ledger.sales, &ledger.transfers, platform)
    }

    /// Cash balance for a single bank over the whole ledger history.
    pub fn bank_cash(ledger: &Ledger, bank: &str) -> f64 {
        bank_cash_balance(
            bank,
            &ledger.sales,
            &ledger.purchases,
            &ledger.expenses,
            &ledger.bank_transfers,
        )
    }

    /// Total traded volume (by total price) per platform in the sales book.
    pub fn platform_sales_volume(ledger: &Ledger, platform: &str) -> f64 {
        platform_total(&ledger.sales, platform, TradeField::TotalPrice)
    }

    fn windowed<T: Dated + Clone>(entries: &[T], range: Option<DateRange>) -> Vec<T> {
        let span = range.unwrap_or(DateRange {
            start: NaiveDate::MIN,
            end: NaiveDate::MAX,
        });
        filter_by_date_range(entries, span, range.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::expense::{CashFlow, ExpenseEntry};
    use crate::domain::reference::{Bank, Platform};
    use crate::domain::trade::{TradeEntry, TradeKind};
    use crate::domain::transfer::TransferEntry;
    use chrono::{TimeZone, Utc};

    fn trade(platform: &str, bank: &str, quantity: f64, total_price: f64) -> TradeEntry {
        TradeEntry::new(
            "ORD",
            bank,
            platform,
            "USDT",
            "MYR",
            total_price,
            1.0,
            quantity,
            "counterparty",
            "desk",
        )
    }

    fn desk_ledger() -> Ledger {
        let mut ledger = Ledger::new("Desk");
        ledger.add_bank(Bank::new("Maybank"));
        ledger.add_platform(Platform::new("Binance"));
        ledger.add_platform(Platform::new("OKX"));
        ledger.add_trade(TradeKind::Purchase, trade("Binance", "Maybank", 10.0, 47.0));
        ledger.add_trade(TradeKind::Sale, trade("Binance", "Maybank", 3.0, 15.0));
        ledger.add_transfer(TransferEntry::new("Binance", "OKX", 2.0, "desk"));
        ledger.add_expense(ExpenseEntry::new("Maybank", 2.0, CashFlow::Expense, "desk"));
        ledger
    }

    #[test]
    fn dashboard_reports_per_platform_stock() {
        let summary = ReportService::dashboard(&desk_ledger(), None);
        let binance = summary
            .stock
            .iter()
            .find(|row| row.platform == "Binance")
            .unwrap();
        assert_eq!(binance.quantity, 5.0);
        let okx = summary.stock.iter().find(|row| row.platform == "OKX").unwrap();
        assert_eq!(okx.quantity, 2.0);
    }

    #[test]
    fn dashboard_reports_bank_cash_and_margin() {
        let summary = ReportService::dashboard(&desk_ledger(), None);
        let maybank = summary.cash.iter().find(|row| row.bank == "Maybank").unwrap();
        // 15 sales in, 47 purchases out, 2 expense.
        assert_eq!(maybank.balance, -34.0);
        assert_eq!(summary.sales_total, 15.0);
        assert_eq!(summary.purchases_total, 47.0);
        assert_eq!(summary.margin_percent, margin(15.0, 47.0));
    }

    #[test]
    fn inactive_platforms_are_excluded() {
        let mut ledger = desk_ledger();
        ledger.platforms[1].is_active = false;
        let summary = ReportService::dashboard(&ledger, None);
        assert!(summary.stock.iter().all(|row| row.platform != "OKX"));
    }

    #[test]
    fn range_restricts_the_books() {
        let mut ledger = desk_ledger();
        // Backdate the purchase so a current-month range excludes it.
        ledger.purchases[0].created_at = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let today = Utc::now().date_naive();
        let range = DateRange::new(today, today).unwrap();
        let summary = ReportService::dashboard(&ledger, Some(range));
        assert_eq!(summary.purchases_total, 0.0);
        assert_eq!(summary.sales_total, 15.0);
    }
}
