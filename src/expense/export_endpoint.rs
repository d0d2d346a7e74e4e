//! Defines the endpoint that serves the records as a CSV download.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{AppState, Error};

use super::core::{BR_DATE_FORMAT, Expense, list_expenses};

/// The header row of the export, mirroring the on-screen table minus the id.
const CSV_HEADER: [&str; 4] = ["Descrição", "Valor", "Categoria", "Data"];

/// The state needed for the CSV export.
#[derive(Debug, Clone)]
pub struct ExportCsvState {
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ExportCsvState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that serves every record as a `despesas.csv` attachment.
pub async fn export_csv_endpoint(State(state): State<ExportCsvState>) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let expenses = list_expenses(&connection)
        .inspect_err(|error| tracing::error!("could not list expenses for export: {error}"))?;

    let payload = write_expenses_csv(&expenses)?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"despesas.csv\"",
            ),
        ],
        payload,
    )
        .into_response())
}

/// Serialize `expenses` as UTF-8 CSV, one row per record, without the id
/// column.
fn write_expenses_csv(expenses: &[Expense]) -> Result<Vec<u8>, Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(CSV_HEADER)
        .map_err(|error| Error::CsvExport(error.to_string()))?;

    for expense in expenses {
        let data = expense
            .data
            .format(BR_DATE_FORMAT)
            .map_err(|error| Error::InvalidDateFormat(error.to_string()))?;

        writer
            .write_record([
                expense.descricao.as_str(),
                &expense.valor.to_string(),
                expense.categoria.as_str(),
                &data,
            ])
            .map_err(|error| Error::CsvExport(error.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|error| Error::CsvExport(error.to_string()))
}
