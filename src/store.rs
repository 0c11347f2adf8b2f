// 🗂️ Expense Store - the in-memory expense list
//
// A flat, ordered Vec searched linearly by id.
// Ids come from `len + 1` at creation time, so they can repeat after a delete.

use chrono::Utc;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{ApiError, Result};
use crate::expense::{seed_expenses, Expense, ExpenseInput};

/// Shared handle to the expense list
///
/// Cloning is cheap; all clones see the same list.
#[derive(Debug, Clone, Default)]
pub struct ExpenseStore {
    expenses: Arc<RwLock<Vec<Expense>>>,
}

impl ExpenseStore {
    /// Create new empty store
    pub fn new() -> Self {
        ExpenseStore::default()
    }

    /// Create store with the sample expenses pre-loaded
    pub fn with_seed() -> Self {
        ExpenseStore::from_expenses(seed_expenses(Utc::now()))
    }

    pub fn from_expenses(expenses: Vec<Expense>) -> Self {
        ExpenseStore {
            expenses: Arc::new(RwLock::new(expenses)),
        }
    }

    // A panicked writer can only leave a fully-pushed or untouched Vec behind.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Expense>> {
        self.expenses.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Expense>> {
        self.expenses.write().unwrap_or_else(PoisonError::into_inner)
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// All expenses, in insertion order
    pub fn list(&self) -> Vec<Expense> {
        self.read().clone()
    }

    pub fn count(&self) -> usize {
        self.read().len()
    }

    /// First expense with a matching id
    pub fn get(&self, id: &str) -> Result<Expense> {
        self.read()
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or(ApiError::NotFound)
    }

    // ========================================================================
    // MUTATIONS
    // ========================================================================

    /// Append a new expense, stamped with the current time
    pub fn create(&self, input: ExpenseInput) -> Expense {
        let mut expenses = self.write();
        let id = (expenses.len() + 1).to_string();
        let now = Utc::now();

        let mut expense = Expense::from_input(id, input);
        expense.date = now;
        expenses.push(expense.clone());

        tracing::info!(id = %expense.id, merchant = %expense.merchant, "Expense created");
        expense
    }

    /// Replace the first expense with a matching id
    ///
    /// Nothing is merged: fields missing from the input take their zero value.
    pub fn update(&self, id: &str, input: ExpenseInput) -> Result<Expense> {
        let mut expenses = self.write();
        let slot = expenses
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(ApiError::NotFound)?;

        let updated = Expense::from_input(id.to_string(), input);
        *slot = updated.clone();

        tracing::info!(id = %id, "Expense updated");
        Ok(updated)
    }

    /// Remove the first expense with a matching id, keeping the others in order
    pub fn delete(&self, id: &str) -> Result<Expense> {
        let mut expenses = self.write();
        let index = expenses
            .iter()
            .position(|e| e.id == id)
            .ok_or(ApiError::NotFound)?;

        let removed = expenses.remove(index);
        tracing::info!(id = %id, "Expense deleted");
        Ok(removed)
    }
}
