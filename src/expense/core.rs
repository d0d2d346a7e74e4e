//! Defines the core data model and database queries for expenses.

use rusqlite::{Connection, Row};
use serde::Deserialize;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::Error;

/// The storage and display format for expense dates, e.g. "07/08/2026".
pub(crate) const BR_DATE_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[day]/[month]/[year]");

/// The identifier type for rows in the `despesas` table.
pub type ExpenseId = i64;

// ============================================================================
// MODELS
// ============================================================================

/// The fixed set of expense categories.
///
/// A category is stored in the database by its display name, e.g.
/// "Alimentação", which is also the value the form select submits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Category {
    /// Food and groceries.
    #[serde(rename = "Alimentação")]
    Alimentacao,
    /// Getting around: bus, fuel, rideshares.
    #[serde(rename = "Transporte")]
    Transporte,
    /// Entertainment and hobbies.
    #[serde(rename = "Lazer")]
    Lazer,
    /// Everything that does not fit the other categories.
    #[serde(rename = "Outros")]
    Outros,
}

impl Category {
    /// Every category, in the order the form select lists them.
    pub const ALL: [Category; 4] = [
        Category::Alimentacao,
        Category::Transporte,
        Category::Lazer,
        Category::Outros,
    ];

    /// The display name, which is also the stored representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Alimentacao => "Alimentação",
            Category::Transporte => "Transporte",
            Category::Lazer => "Lazer",
            Category::Outros => "Outros",
        }
    }

    /// Look up a category by its stored name.
    ///
    /// Unknown names collapse to [Category::Outros].
    fn from_stored_name(name: &str) -> Category {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == name)
            .unwrap_or(Category::Outros)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored expense record.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    /// The ID of the expense, assigned by the database on insert.
    pub id: ExpenseId,
    /// A text description of what the money was spent on.
    pub descricao: String,
    /// How much was spent.
    pub valor: f64,
    /// Which category the expense belongs to.
    pub categoria: Category,
    /// When the money was spent.
    pub data: Date,
}

/// The fields needed to record a new expense.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    /// A text description of what the money was spent on.
    pub descricao: String,
    /// How much was spent.
    pub valor: f64,
    /// Which category the expense belongs to.
    pub categoria: Category,
    /// When the money was spent.
    pub data: Date,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create the `despesas` table in the database.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    // AUTOINCREMENT so that ids of deleted rows are never reused.
    connection.execute(
        "CREATE TABLE IF NOT EXISTS despesas (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                descricao TEXT NOT NULL,
                valor REAL NOT NULL,
                categoria TEXT NOT NULL,
                data TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// Record a new expense in the database and return the stored row.
///
/// The date is stored in the dd/mm/yyyy format used everywhere the record is
/// shown.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidDateFormat] if the date cannot be rendered as dd/mm/yyyy,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_expense(expense: NewExpense, connection: &Connection) -> Result<Expense, Error> {
    let data = expense
        .data
        .format(BR_DATE_FORMAT)
        .map_err(|error| Error::InvalidDateFormat(error.to_string()))?;

    let expense = connection
        .prepare(
            "INSERT INTO despesas (descricao, valor, categoria, data)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, descricao, valor, categoria, data",
        )?
        .query_one(
            (
                expense.descricao,
                expense.valor,
                expense.categoria.as_str(),
                data,
            ),
            map_expense_row,
        )?;

    Ok(expense)
}

/// Retrieve every expense, in storage order.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn list_expenses(connection: &Connection) -> Result<Vec<Expense>, Error> {
    connection
        .prepare("SELECT id, descricao, valor, categoria, data FROM despesas")?
        .query_map((), map_expense_row)?
        .map(|maybe_expense| maybe_expense.map_err(Error::from))
        .collect()
}

/// How many rows a delete statement removed.
pub(crate) type RowsAffected = usize;

/// Delete the expense with `id`.
///
/// Deleting an id that is not in the table affects zero rows; that is not an
/// error.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn delete_expense(id: ExpenseId, connection: &Connection) -> Result<RowsAffected, Error> {
    connection
        .execute("DELETE FROM despesas WHERE id = :id", &[(":id", &id)])
        .map_err(|error| error.into())
}

/// Delete every expense.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn delete_all_expenses(connection: &Connection) -> Result<RowsAffected, Error> {
    connection
        .execute("DELETE FROM despesas", ())
        .map_err(|error| error.into())
}

/// Get the total number of expenses in the database.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn count_expenses(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM despesas;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Map a database row to an [Expense].
pub(crate) fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let id = row.get(0)?;
    let descricao = row.get(1)?;
    let valor = row.get(2)?;

    let raw_categoria: String = row.get(3)?;
    let categoria = Category::from_stored_name(&raw_categoria);

    let raw_data: String = row.get(4)?;
    let data = Date::parse(&raw_data, BR_DATE_FORMAT).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(error))
    })?;

    Ok(Expense {
        id,
        descricao,
        valor,
        categoria,
        data,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{db::initialize, expense::summary::summarize_by_category};

    use super::{
        Category, NewExpense, count_expenses, create_expense, delete_all_expenses, delete_expense,
        list_expenses,
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn new_expense(descricao: &str, valor: f64, categoria: Category) -> NewExpense {
        NewExpense {
            descricao: descricao.to_owned(),
            valor,
            categoria,
            data: date!(2024 - 01 - 10),
        }
    }

    #[test]
    fn create_then_list_round_trips_all_fields() {
        let conn = get_test_connection();

        let created = create_expense(
            new_expense("Almoço", 15.50, Category::Alimentacao),
            &conn,
        )
        .unwrap();

        let expenses = list_expenses(&conn).unwrap();

        assert_eq!(expenses, vec![created.clone()]);
        assert_eq!(created.id, 1);
        assert_eq!(created.descricao, "Almoço");
        assert_eq!(created.valor, 15.50);
        assert_eq!(created.categoria, Category::Alimentacao);
        assert_eq!(created.data, date!(2024 - 01 - 10));
    }

    #[test]
    fn create_stores_date_as_dd_mm_yyyy() {
        let conn = get_test_connection();

        create_expense(new_expense("Almoço", 15.50, Category::Alimentacao), &conn).unwrap();

        let stored_date: String = conn
            .query_row("SELECT data FROM despesas WHERE id = 1", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(stored_date, "10/01/2024");
    }

    #[test]
    fn ids_are_assigned_in_insertion_order() {
        let conn = get_test_connection();

        create_expense(new_expense("Almoço", 15.50, Category::Alimentacao), &conn).unwrap();
        create_expense(new_expense("Ônibus", 3.00, Category::Transporte), &conn).unwrap();

        let expenses = list_expenses(&conn).unwrap();

        let ids: Vec<_> = expenses.iter().map(|expense| expense.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn deleted_ids_are_never_reused() {
        let conn = get_test_connection();

        create_expense(new_expense("Almoço", 15.50, Category::Alimentacao), &conn).unwrap();
        delete_expense(1, &conn).unwrap();

        let recreated =
            create_expense(new_expense("Ônibus", 3.00, Category::Transporte), &conn).unwrap();

        assert_eq!(recreated.id, 2);
    }

    #[test]
    fn list_returns_empty_for_fresh_database() {
        let conn = get_test_connection();

        let expenses = list_expenses(&conn).unwrap();

        assert_eq!(expenses, vec![]);
    }

    #[test]
    fn delete_removes_exactly_one_expense() {
        let conn = get_test_connection();
        create_expense(new_expense("Almoço", 15.50, Category::Alimentacao), &conn).unwrap();
        let kept = create_expense(new_expense("Ônibus", 3.00, Category::Transporte), &conn).unwrap();

        let rows_affected = delete_expense(1, &conn).unwrap();

        assert_eq!(rows_affected, 1);
        assert_eq!(list_expenses(&conn).unwrap(), vec![kept]);
    }

    #[test]
    fn delete_missing_id_is_a_no_op() {
        let conn = get_test_connection();
        create_expense(new_expense("Almoço", 15.50, Category::Alimentacao), &conn).unwrap();

        let rows_affected = delete_expense(1337, &conn).unwrap();

        assert_eq!(rows_affected, 0);
        assert_eq!(count_expenses(&conn).unwrap(), 1);
    }

    #[test]
    fn delete_all_empties_the_table() {
        let conn = get_test_connection();
        create_expense(new_expense("Almoço", 15.50, Category::Alimentacao), &conn).unwrap();
        create_expense(new_expense("Ônibus", 3.00, Category::Transporte), &conn).unwrap();

        let rows_affected = delete_all_expenses(&conn).unwrap();

        assert_eq!(rows_affected, 2);
        assert_eq!(list_expenses(&conn).unwrap(), vec![]);
    }

    #[test]
    fn unknown_stored_category_collapses_to_outros() {
        let conn = get_test_connection();
        conn.execute(
            "INSERT INTO despesas (descricao, valor, categoria, data)
             VALUES ('Antigo', 1.0, 'Mercado', '01/01/2020')",
            (),
        )
        .unwrap();

        let expenses = list_expenses(&conn).unwrap();

        assert_eq!(expenses[0].categoria, Category::Outros);
    }

    #[test]
    fn full_lifecycle() {
        let conn = get_test_connection();

        create_expense(new_expense("Almoço", 15.50, Category::Alimentacao), &conn).unwrap();
        let expenses = list_expenses(&conn).unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].id, 1);
        assert_eq!(expenses[0].descricao, "Almoço");

        create_expense(new_expense("Ônibus", 3.00, Category::Transporte), &conn).unwrap();
        let summary = summarize_by_category(&list_expenses(&conn).unwrap());
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].categoria, Category::Alimentacao);
        assert_eq!(summary[0].total, 15.50);
        assert_eq!(summary[1].categoria, Category::Transporte);
        assert_eq!(summary[1].total, 3.00);

        delete_expense(1, &conn).unwrap();
        let expenses = list_expenses(&conn).unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].descricao, "Ônibus");

        delete_all_expenses(&conn).unwrap();
        assert_eq!(list_expenses(&conn).unwrap(), vec![]);
    }

    #[test]
    fn get_count() {
        let conn = get_test_connection();
        let want_count = 20;
        for i in 1..=want_count {
            create_expense(new_expense("", i as f64, Category::Outros), &conn)
                .expect("Could not create expense");
        }

        let got_count = count_expenses(&conn).expect("Could not get count");

        assert_eq!(want_count, got_count);
    }
}
