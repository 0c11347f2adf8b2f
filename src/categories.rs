// 🏷️ Categories - fixed lookup table for the UI
//
// Ten categories with display color and icon name.
// Not linked to expenses: an expense's category is just a label.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: u32,
    pub name: &'static str,
    /// Hex color for UI (e.g., "#EF4444")
    pub color: &'static str,
    /// Icon name for UI (e.g., "utensils")
    pub icon: &'static str,
}

const fn category(id: u32, name: &'static str, color: &'static str, icon: &'static str) -> Category {
    Category { id, name, color, icon }
}

pub const CATEGORIES: [Category; 10] = [
    category(1, "Food & Dining", "#EF4444", "utensils"),
    category(2, "Transportation", "#3B82F6", "car"),
    category(3, "Shopping", "#8B5CF6", "shopping-bag"),
    category(4, "Entertainment", "#EC4899", "film"),
    category(5, "Utilities", "#10B981", "bolt"),
    category(6, "Healthcare", "#F59E0B", "heart"),
    category(7, "Travel", "#06B6D4", "plane"),
    category(8, "Education", "#84CC16", "graduation-cap"),
    category(9, "Home & Garden", "#F97316", "home"),
    category(10, "Other", "#6B7280", "ellipsis-h"),
];

/// All categories, ordered by id
pub fn all() -> &'static [Category] {
    &CATEGORIES
}
