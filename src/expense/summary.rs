//! Per-category aggregation for the summary chart.

use std::{cmp::Ordering, collections::HashMap};

use super::core::{Category, Expense};

/// The total spent in one category.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CategorySummary {
    /// The category the total belongs to.
    pub(crate) categoria: Category,
    /// The sum of `valor` over every expense in the category.
    pub(crate) total: f64,
}

/// Group `expenses` by category and sum their amounts.
///
/// Categories with no expenses are omitted. The result is ordered by total,
/// largest first; ties break on the category name so the order is stable.
pub(crate) fn summarize_by_category(expenses: &[Expense]) -> Vec<CategorySummary> {
    let mut totals: HashMap<Category, f64> = HashMap::new();

    for expense in expenses {
        *totals.entry(expense.categoria).or_insert(0.0) += expense.valor;
    }

    let mut summary: Vec<_> = totals
        .into_iter()
        .map(|(categoria, total)| CategorySummary { categoria, total })
        .collect();

    summary.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.categoria.as_str().cmp(b.categoria.as_str()))
    });

    summary
}
