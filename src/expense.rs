// 💸 Expense Entity - one spending record
//
// Flat record: no versioning, no links to categories.
// `category` is a free-text label, not a foreign key.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// EXPENSE ENTITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Sequential id, assigned from list length at creation time
    pub id: String,

    pub amount: f64,

    /// Category label (e.g., "Food & Dining")
    pub category: String,

    pub merchant: String,

    pub date: DateTime<Utc>,

    pub description: String,
}

/// Date of a record whose body carried none: 0001-01-01T00:00:00Z
pub fn zero_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

impl Expense {
    /// Build a stored expense from bound input, field for field
    ///
    /// A missing date becomes [`zero_date`].
    pub fn from_input(id: String, input: ExpenseInput) -> Self {
        Expense {
            id,
            amount: input.amount,
            category: input.category,
            merchant: input.merchant,
            date: input.date.unwrap_or_else(zero_date),
            description: input.description,
        }
    }
}

// ============================================================================
// REQUEST BODY
// ============================================================================

/// Body of POST/PUT requests
///
/// Every field falls back to its zero value, whether absent or `null`.
/// An `id` in the body is ignored; the store assigns or keeps ids.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExpenseInput {
    #[serde(deserialize_with = "null_as_default")]
    pub amount: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(deserialize_with = "null_as_default")]
    pub merchant: String,
    pub date: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// ============================================================================
// SEED DATA
// ============================================================================

/// Sample expenses loaded at startup, dated relative to `now`
pub fn seed_expenses(now: DateTime<Utc>) -> Vec<Expense> {
    vec![
        Expense {
            id: "1".to_string(),
            amount: 25.50,
            category: "Food & Dining".to_string(),
            merchant: "Starbucks".to_string(),
            date: now - Duration::days(1),
            description: "Coffee and pastry".to_string(),
        },
        Expense {
            id: "2".to_string(),
            amount: 45.00,
            category: "Transportation".to_string(),
            merchant: "Uber".to_string(),
            date: now - Duration::days(2),
            description: "Ride to work".to_string(),
        },
    ]
}
