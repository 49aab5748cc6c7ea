use colored::Colorize;
use std::fmt;

use crate::core::services::DashboardSummary;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Section,
}

fn apply_style(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()).bold().to_string(),
        MessageKind::Info => format!("INFO: {text}"),
        MessageKind::Success => format!("SUCCESS: {text}").bright_green().to_string(),
        MessageKind::Warning => format!("WARNING: {text}").bright_yellow().to_string(),
        MessageKind::Error => format!("ERROR: {text}").bright_red().to_string(),
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = apply_style(kind, message);
    match kind {
        MessageKind::Section => println!("\n{formatted}"),
        _ => println!("{formatted}"),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

/// Renders the dashboard tables. Negative stock balances indicate
/// over-commitment and are highlighted, not rejected.
pub fn render_dashboard(summary: &DashboardSummary) {
    if let Some(range) = summary.range {
        info(format!("Entries from {} to {} (inclusive)", range.start, range.end));
    } else {
        info("All entries (no date filter)");
    }

    section("Stock per platform");
    if summary.stock.is_empty() {
        info("no active platforms");
    }
    for row in &summary.stock {
        let line = format!("{:<20} {:>16.8}", row.platform, row.quantity);
        if row.quantity < 0.0 {
            warning(format!("{line}  (over-committed)"));
        } else {
            println!("{line}");
        }
    }

    section("Cash per bank");
    if summary.cash.is_empty() {
        info("no active banks");
    }
    for row in &summary.cash {
        println!("{:<20} {:>16.2}", row.bank, row.balance);
    }

    section("Totals");
    println!("{:<20} {:>16.2}", "sales", summary.sales_total);
    println!("{:<20} {:>16.2}", "purchases", summary.purchases_total);
    println!("{:<20} {:>15.2}%", "margin", summary.margin_percent);
}
