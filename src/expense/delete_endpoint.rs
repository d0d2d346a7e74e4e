//! Defines the endpoint for deleting a single expense.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::Response,
};
use rusqlite::Connection;

use crate::AppState;

use super::{
    core::{ExpenseId, delete_expense},
    expenses_page::{Flash, redirect_with_flash},
};

/// The state needed to delete an expense.
#[derive(Debug, Clone)]
pub struct DeleteExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting an expense; redirects back to the expenses
/// page with a confirmation.
///
/// Deleting an id that is no longer in the table affects nothing and still
/// redirects with the confirmation.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn delete_expense_endpoint(
    State(state): State<DeleteExpenseState>,
    Path(expense_id): Path<ExpenseId>,
) -> Response {
    let connection = state.db_connection.lock().unwrap();

    match delete_expense(expense_id, &connection) {
        Ok(0) => {
            tracing::debug!("expense {expense_id} was already gone");
            redirect_with_flash(Flash::DespesaApagada)
        }
        Ok(_) => redirect_with_flash(Flash::DespesaApagada),
        Err(error) => {
            tracing::error!("Could not delete expense {expense_id}: {error}");
            error.into_alert_response()
        }
    }
}
