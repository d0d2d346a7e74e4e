//! Expense management for the application.
//!
//! This module contains everything related to expenses:
//! - The `Expense` model and the fixed `Category` set
//! - Database functions for storing, listing and deleting expenses
//! - The page handler and the command endpoints (add, delete, export)

mod chart;
mod core;
mod create_endpoint;
mod delete_all_endpoint;
mod delete_endpoint;
mod expenses_page;
mod export_endpoint;
mod summary;
mod view;

pub use self::core::{Category, Expense, create_expense_table};
pub use create_endpoint::create_expense_endpoint;
pub use delete_all_endpoint::delete_all_expenses_endpoint;
pub use delete_endpoint::delete_expense_endpoint;
pub use expenses_page::get_expenses_page;
pub use export_endpoint::export_csv_endpoint;
