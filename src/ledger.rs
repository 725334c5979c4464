//! Ordered line items shared by the expense tracker and the shopping cart.

use crate::error::{AppError, AppResult};
use crate::money::Money;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub label: String,
    pub amount: Money,
}

impl LineItem {
    pub fn new(label: impl Into<String>, amount: Money) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }
}

/// Items in entry order. The total is always summed from the items.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    items: Vec<LineItem>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item. Refused when the new total would not fit, so
    /// `total()` never has to saturate.
    pub fn add(&mut self, label: impl Into<String>, amount: Money) -> AppResult<&LineItem> {
        let label = label.into();
        if self.total().checked_add(amount).is_none() {
            return Err(AppError::TotalOverflow { label });
        }
        self.items.push(LineItem::new(label, amount));
        Ok(&self.items[self.items.len() - 1])
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total(&self) -> Money {
        self.items.iter().map(|item| item.amount).sum()
    }

    /// Empty the ledger, returning what it summed to beforehand.
    pub fn checkout(&mut self) -> Money {
        let total = self.total();
        self.items.clear();
        total
    }
}
