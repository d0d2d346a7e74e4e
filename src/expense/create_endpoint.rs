//! Defines the endpoint for recording a new expense.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::Response,
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use rusqlite::Connection;
use serde::Deserialize;
use time::Date;

use crate::AppState;

use super::{
    core::{Category, NewExpense, create_expense},
    expenses_page::{Flash, redirect_with_flash},
};

/// The state needed to record an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The form data for recording an expense.
#[derive(Debug, Deserialize)]
pub struct ExpenseForm {
    /// Text detailing the expense.
    pub descricao: String,
    /// The value of the expense in reais.
    pub valor: f64,
    /// Which category the expense belongs to.
    pub categoria: Category,
    /// The date when the money was spent.
    pub data: Date,
}

/// A route handler for recording a new expense; redirects back to the
/// expenses page with a confirmation on success.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseState>,
    Form(form): Form<ExpenseForm>,
) -> Response {
    let expense = NewExpense {
        descricao: form.descricao,
        valor: form.valor,
        categoria: form.categoria,
        data: form.data,
    };

    let connection = state.db_connection.lock().unwrap();

    if let Err(error) = create_expense(expense, &connection) {
        tracing::error!("Could not create expense: {error}");
        return error.into_alert_response();
    }

    redirect_with_flash(Flash::DespesaAdicionada)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{body::Body, extract::State, http::Response};
    use axum_extra::extract::Form;
    use axum_htmx::HX_REDIRECT;
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        db::initialize,
        expense::core::{Category, count_expenses, list_expenses},
    };

    use super::{CreateExpenseState, ExpenseForm, create_expense_endpoint};

    fn get_test_state() -> CreateExpenseState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        CreateExpenseState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    #[tokio::test]
    async fn can_create_expense() {
        let state = get_test_state();

        let form = ExpenseForm {
            descricao: "Almoço".to_string(),
            valor: 15.5,
            categoria: Category::Alimentacao,
            data: date!(2024 - 01 - 10),
        };

        let response = create_expense_endpoint(State(state.clone()), Form(form)).await;

        assert_redirects_with_confirmation(response);

        // Verify the expense was actually created. The first row will have ID 1.
        let connection = state.db_connection.lock().unwrap();
        let expenses = list_expenses(&connection).unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].id, 1);
        assert_eq!(expenses[0].descricao, "Almoço");
        assert_eq!(expenses[0].valor, 15.5);
        assert_eq!(expenses[0].categoria, Category::Alimentacao);
        assert_eq!(expenses[0].data, date!(2024 - 01 - 10));
    }

    #[tokio::test]
    async fn empty_description_is_accepted() {
        let state = get_test_state();

        let form = ExpenseForm {
            descricao: String::new(),
            valor: 1.0,
            categoria: Category::Outros,
            data: date!(2024 - 01 - 10),
        };

        create_expense_endpoint(State(state.clone()), Form(form)).await;

        let connection = state.db_connection.lock().unwrap();
        assert_eq!(count_expenses(&connection).unwrap(), 1);
    }

    #[track_caller]
    fn assert_redirects_with_confirmation(response: Response<Body>) {
        let location = response
            .headers()
            .get(HX_REDIRECT)
            .expect("expected response to have the header hx-redirect");
        assert_eq!(
            location, "/despesas?sucesso=despesa-adicionada",
            "got redirect to {location:?}, want redirect to /despesas with the confirmation flash"
        );
    }
}
