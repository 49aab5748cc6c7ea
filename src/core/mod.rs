//! Aggregation core and service layer.

pub mod balance;
pub mod services;

pub use balance::{
    bank_cash_balance, bank_total, filter_by_date_range, margin, platform_total, stock_balance,
    transfer_total, Direction, TradeField,
};
pub use services::{
    BankCash, DashboardSummary, ExpenseService, PlatformStock, ReferenceService, ReportService,
    ServiceError, ServiceResult, TradeService, TransferService,
};
