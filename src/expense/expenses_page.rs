//! Defines the route handler for the expenses page.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::Deserialize;
use time::OffsetDateTime;

use crate::{AppState, Error, alert::Alert, endpoints};

use super::{
    chart::{chart_script, summary_chart},
    core::list_expenses,
    summary::summarize_by_category,
    view::{ExpenseTableRow, expenses_view},
};

/// Which confirmation message the page shows after a command redirect.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(super) enum Flash {
    /// An expense was recorded.
    DespesaAdicionada,
    /// A single expense was deleted.
    DespesaApagada,
    /// Every expense was deleted.
    HistoricoApagado,
}

impl Flash {
    fn as_query(self) -> &'static str {
        match self {
            Flash::DespesaAdicionada => "sucesso=despesa-adicionada",
            Flash::DespesaApagada => "sucesso=despesa-apagada",
            Flash::HistoricoApagado => "sucesso=historico-apagado",
        }
    }

    fn message(self) -> &'static str {
        match self {
            Flash::DespesaAdicionada => "Despesa adicionada com sucesso!",
            Flash::DespesaApagada => "Despesa apagada com sucesso!",
            Flash::HistoricoApagado => "Histórico apagado com sucesso!",
        }
    }
}

/// Redirect an htmx request back to the expenses page with `flash` set, so
/// the fresh render shows the matching confirmation alert.
pub(super) fn redirect_with_flash(flash: Flash) -> Response {
    (
        HxRedirect(format!(
            "{}?{}",
            endpoints::DESPESAS_VIEW,
            flash.as_query()
        )),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

/// The query parameters accepted by the expenses page.
#[derive(Debug, Default, Deserialize)]
pub struct ExpensesPageQuery {
    /// Set by command redirects to show a confirmation alert.
    sucesso: Option<Flash>,
}

/// The state needed for the expenses page.
#[derive(Debug, Clone)]
pub struct ExpensesPageState {
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ExpensesPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the expenses page: add form, table, summary chart and the
/// manage/export sections.
pub async fn get_expenses_page(
    State(state): State<ExpensesPageState>,
    Query(query): Query<ExpensesPageQuery>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let expenses = list_expenses(&connection)
        .inspect_err(|error| tracing::error!("could not list expenses: {error}"))?;

    let summary = summarize_by_category(&expenses);
    let chart_init =
        (!expenses.is_empty()).then(|| chart_script(&summary_chart(&summary).to_string()));

    let rows = expenses
        .into_iter()
        .map(ExpenseTableRow::new_from_expense)
        .collect();
    let alert = query
        .sucesso
        .map(|flash| Alert::success(flash.message(), ""));
    let default_date = OffsetDateTime::now_utc().date();

    Ok(expenses_view(rows, default_date, chart_init, alert).into_response())
}
