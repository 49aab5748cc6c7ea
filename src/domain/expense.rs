use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Dated, Displayable, Identifiable};

/// Direction of an expense entry's cash movement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CashFlow {
    Expense,
    Income,
}

/// An operating expense or incidental income attributed to a bank.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseEntry {
    pub id: Uuid,
    pub bank: String,
    pub amount: f64,
    pub flow: CashFlow,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ExpenseEntry {
    pub fn new(
        bank: impl Into<String>,
        amount: f64,
        flow: CashFlow,
        created_by: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            bank: bank.into(),
            amount,
            flow,
            category: None,
            description: None,
            created_at: Utc::now(),
            created_by: created_by.into(),
            edited_by: None,
            updated_at: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn mark_edited(&mut self, editor: impl Into<String>) {
        self.edited_by = Some(editor.into());
        self.updated_at = Some(Utc::now());
    }

    /// Amount signed by flow direction: expenses negative, income positive.
    pub fn signed_amount(&self) -> f64 {
        match self.flow {
            CashFlow::Expense => -self.amount,
            CashFlow::Income => self.amount,
        }
    }
}

impl Identifiable for ExpenseEntry {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Dated for ExpenseEntry {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Displayable for ExpenseEntry {
    fn display_label(&self) -> String {
        let kind = match self.flow {
            CashFlow::Expense => "expense",
            CashFlow::Income => "income",
        };
        format!("{kind} {:.2} ({})", self.amount, self.bank)
    }
}
