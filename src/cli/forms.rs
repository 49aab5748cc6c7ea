//! Interactive entry forms built on dialoguer prompts.

use std::error::Error;

use dialoguer::{Confirm, Input, Select};

use crate::core::services::{
    ExpenseService, ReferenceService, TradeService, TransferService,
};
use crate::domain::expense::{CashFlow, ExpenseEntry};
use crate::domain::ledger::Ledger;
use crate::domain::trade::{TradeEntry, TradeKind};
use crate::domain::transfer::{BankTransferEntry, TransferEntry};

use super::output;

/// Prompts for one new entry and records it through the service layer.
pub fn record_entry(ledger: &mut Ledger, operator: &str) -> Result<(), Box<dyn Error>> {
    let kinds = [
        "Sale",
        "Purchase",
        "Platform transfer",
        "Bank transfer",
        "Expense / income",
    ];
    let choice = Select::new()
        .with_prompt("Entry type")
        .items(&kinds)
        .default(0)
        .interact()?;

    match choice {
        0 => record_trade(ledger, TradeKind::Sale, operator)?,
        1 => record_trade(ledger, TradeKind::Purchase, operator)?,
        2 => record_transfer(ledger, operator)?,
        3 => record_bank_transfer(ledger, operator)?,
        _ => record_expense(ledger, operator)?,
    }
    Ok(())
}

fn record_trade(ledger: &mut Ledger, kind: TradeKind, operator: &str) -> Result<(), Box<dyn Error>> {
    let order_number: String = Input::new().with_prompt("Order number").interact_text()?;
    let bank = pick_bank(ledger)?;
    let platform = pick_platform(ledger)?;
    let asset_type: String = Input::new().with_prompt("Asset type").interact_text()?;
    let fiat_type: String = Input::new().with_prompt("Fiat currency").interact_text()?;
    let total_price: f64 = Input::new().with_prompt("Total price").interact_text()?;
    let price: f64 = Input::new().with_prompt("Unit price").interact_text()?;
    let quantity: f64 = Input::new().with_prompt("Quantity").interact_text()?;
    let counterparty: String = Input::new().with_prompt("Counterparty").interact_text()?;
    let contact: String = Input::new()
        .with_prompt("Contact (optional)")
        .allow_empty(true)
        .interact_text()?;

    let mut entry = TradeEntry::new(
        order_number,
        bank,
        platform,
        asset_type,
        fiat_type,
        total_price,
        price,
        quantity,
        counterparty,
        operator,
    );
    if !contact.trim().is_empty() {
        entry = entry.with_contact(contact.trim());
    }
    if let Some(deviation) = entry.price_consistency() {
        if deviation.abs() > 1e-8 {
            output::warning(format!(
                "quantity differs from total/price by {deviation:.8}"
            ));
        }
    }
    TradeService::add(ledger, kind, entry)?;
    output::success(format!("{} recorded", kind.label()));
    Ok(())
}

fn record_transfer(ledger: &mut Ledger, operator: &str) -> Result<(), Box<dyn Error>> {
    let from = pick_platform(ledger)?;
    let to = pick_platform(ledger)?;
    let quantity: f64 = Input::new().with_prompt("Quantity").interact_text()?;
    TransferService::add_transfer(ledger, TransferEntry::new(from, to, quantity, operator))?;
    output::success("platform transfer recorded");
    Ok(())
}

fn record_bank_transfer(ledger: &mut Ledger, operator: &str) -> Result<(), Box<dyn Error>> {
    let adjustment = Confirm::new()
        .with_prompt("Is this a manual adjustment?")
        .default(false)
        .interact()?;
    let (from_bank, from_account) = if adjustment {
        (crate::domain::reference::ADJUSTMENT_BANK.to_string(), "-".to_string())
    } else {
        (
            pick_bank(ledger)?,
            Input::new().with_prompt("From account").interact_text()?,
        )
    };
    let to_bank = pick_bank(ledger)?;
    let to_account: String = Input::new().with_prompt("To account").interact_text()?;
    let amount: f64 = Input::new().with_prompt("Amount").interact_text()?;
    let reference: String = Input::new()
        .with_prompt("Reference (optional)")
        .allow_empty(true)
        .interact_text()?;

    let mut entry =
        BankTransferEntry::new(from_bank, from_account, to_bank, to_account, amount, operator);
    if !reference.trim().is_empty() {
        entry = entry.with_reference(reference.trim());
    }
    TransferService::add_bank_transfer(ledger, entry)?;
    output::success("bank transfer recorded");
    Ok(())
}

fn record_expense(ledger: &mut Ledger, operator: &str) -> Result<(), Box<dyn Error>> {
    let flows = ["Expense", "Income"];
    let flow = match Select::new()
        .with_prompt("Flow")
        .items(&flows)
        .default(0)
        .interact()?
    {
        0 => CashFlow::Expense,
        _ => CashFlow::Income,
    };
    let bank = pick_bank(ledger)?;
    let amount: f64 = Input::new().with_prompt("Amount").interact_text()?;
    let category: String = Input::new()
        .with_prompt("Category (optional)")
        .allow_empty(true)
        .interact_text()?;

    let mut entry = ExpenseEntry::new(bank, amount, flow, operator);
    if !category.trim().is_empty() {
        entry = entry.with_category(category.trim());
    }
    ExpenseService::add(ledger, entry)?;
    output::success("expense entry recorded");
    Ok(())
}

fn pick_bank(ledger: &Ledger) -> Result<String, Box<dyn Error>> {
    let names: Vec<String> = ReferenceService::active_banks(ledger)
        .iter()
        .map(|bank| bank.name.clone())
        .collect();
    if names.is_empty() {
        let name: String = Input::new().with_prompt("Bank").interact_text()?;
        return Ok(name);
    }
    let choice = Select::new()
        .with_prompt("Bank")
        .items(&names)
        .default(0)
        .interact()?;
    Ok(names[choice].clone())
}

fn pick_platform(ledger: &Ledger) -> Result<String, Box<dyn Error>> {
    let names: Vec<String> = ReferenceService::active_platforms(ledger)
        .iter()
        .map(|platform| platform.name.clone())
        .collect();
    if names.is_empty() {
        let name: String = Input::new().with_prompt("Platform").interact_text()?;
        return Ok(name);
    }
    let choice = Select::new()
        .with_prompt("Platform")
        .items(&names)
        .default(0)
        .interact()?;
    Ok(names[choice].clone())
}
