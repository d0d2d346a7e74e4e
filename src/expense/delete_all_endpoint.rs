//! Defines the endpoint for clearing the whole expense history.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::Response,
};
use rusqlite::Connection;

use crate::AppState;

use super::{
    core::delete_all_expenses,
    expenses_page::{Flash, redirect_with_flash},
};

/// The state needed to clear the expense history.
#[derive(Debug, Clone)]
pub struct DeleteAllExpensesState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteAllExpensesState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that deletes every expense, immediately and without a
/// confirmation step; redirects back to the expenses page.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn delete_all_expenses_endpoint(State(state): State<DeleteAllExpensesState>) -> Response {
    let connection = state.db_connection.lock().unwrap();

    match delete_all_expenses(&connection) {
        Ok(rows_affected) => {
            tracing::debug!("deleted {rows_affected} expenses");
            redirect_with_flash(Flash::HistoricoApagado)
        }
        Err(error) => {
            tracing::error!("Could not delete expense history: {error}");
            error.into_alert_response()
        }
    }
}
