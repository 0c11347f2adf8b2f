// Expense Tracker - Core Library
// Exposes all modules for use in the API server and tests

pub mod api;
pub mod categories;
pub mod config;
pub mod error;
pub mod expense;
pub mod logging;
pub mod ocr;
pub mod server;
pub mod store;

// Re-export commonly used types
pub use api::{router, AppState};
pub use categories::{Category, CATEGORIES};
pub use config::{ConfigError, Environment, ServerConfig};
pub use error::{ApiError, ErrorResponse};
pub use expense::{seed_expenses, Expense, ExpenseInput};
pub use ocr::{OcrResponse, ReceiptData, ReceiptItem};
pub use store::ExpenseStore;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
