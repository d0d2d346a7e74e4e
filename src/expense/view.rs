//! HTML rendering for the expenses page.

use maud::{Markup, html};
use time::Date;
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    alert::Alert,
    endpoints,
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        HeadElement, LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, base, currency_input_styles, format_currency,
    },
};

use super::{
    chart::chart_view,
    core::{BR_DATE_FORMAT, Category, Expense, ExpenseId},
};

/// The max number of graphemes to display in the expense table rows before
/// truncating and displaying ellipses.
const MAX_DESCRIPTION_GRAPHEMES: usize = 32;

/// Renders an expense as a table row with its delete action.
#[derive(Debug, PartialEq, Clone)]
pub(super) struct ExpenseTableRow {
    /// The ID of the expense.
    pub(super) id: ExpenseId,
    /// A text description of what the money was spent on.
    pub(super) descricao: String,
    /// How much was spent.
    pub(super) valor: f64,
    /// Which category the expense belongs to.
    pub(super) categoria: Category,
    /// When the money was spent.
    pub(super) data: Date,
    /// The API path to delete this expense.
    pub(super) delete_url: String,
    /// The accessible label of the delete action, e.g. "3 - Almoço (15.5 R$)".
    pub(super) delete_label: String,
}

impl ExpenseTableRow {
    pub(super) fn new_from_expense(expense: Expense) -> Self {
        Self {
            delete_url: endpoints::format_endpoint(endpoints::DELETE_DESPESA, expense.id),
            delete_label: format!(
                "{} - {} ({} R$)",
                expense.id, expense.descricao, expense.valor
            ),
            id: expense.id,
            descricao: expense.descricao,
            valor: expense.valor,
            categoria: expense.categoria,
            data: expense.data,
        }
    }
}

pub(super) fn expenses_view(
    expenses: Vec<ExpenseTableRow>,
    default_date: Date,
    chart_init: Option<HeadElement>,
    alert: Option<Alert<'static>>,
) -> Markup {
    let mut head_elements = vec![currency_input_styles()];
    if let Some(script) = chart_init {
        head_elements.push(script);
    }

    // Cache this result so it can be accessed after `expenses` is moved by the for loop.
    let expenses_empty = expenses.is_empty();

    let content = html! {
        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-3xl space-y-8"
            {
                header
                {
                    h1 class="text-2xl font-bold" { "Controle de Despesas" }
                }

                @if let Some(alert) = alert {
                    (alert.into_html())
                }

                (add_expense_form_view(default_date))

                section class="space-y-4"
                {
                    h2 class="text-xl font-bold" { "Minhas despesas" }

                    @if expenses_empty {
                        p data-empty-state="true" { "Nenhuma despesa cadastrada ainda." }
                    } @else {
                        div class="rounded bg-gray-50 dark:bg-gray-800 overflow-x-auto"
                        {
                            table class="w-full my-2 text-sm text-left rtl:text-right
                                text-gray-500 dark:text-gray-400"
                            {
                                thead class=(TABLE_HEADER_STYLE)
                                {
                                    tr
                                    {
                                        th scope="col" class=(TABLE_CELL_STYLE) { "ID" }
                                        th scope="col" class=(TABLE_CELL_STYLE) { "Descrição" }
                                        th scope="col" class="px-6 py-3 text-right" { "Valor" }
                                        th scope="col" class=(TABLE_CELL_STYLE) { "Categoria" }
                                        th scope="col" class=(TABLE_CELL_STYLE) { "Data" }
                                        th scope="col" class=(TABLE_CELL_STYLE) { "Ações" }
                                    }
                                }

                                tbody
                                {
                                    @for expense_row in expenses {
                                        (expense_row_view(&expense_row))
                                    }
                                }
                            }
                        }
                    }
                }

                section class="space-y-4"
                {
                    h2 class="text-xl font-bold" { "Resumo de Gastos por Categoria" }

                    @if expenses_empty {
                        p data-empty-state="true" { "Nenhuma despesa para mostrar no gráfico." }
                    } @else {
                        (chart_view())
                    }
                }

                section class="space-y-4"
                {
                    h2 class="text-xl font-bold" { "Gerenciar despesas" }

                    button
                        type="button"
                        hx-delete=(endpoints::DESPESAS_API)
                        class=(BUTTON_DELETE_STYLE)
                    {
                        "Apagar todo histórico"
                    }
                }

                section class="space-y-4"
                {
                    h2 class="text-xl font-bold" { "Exportar despesas" }

                    @if expenses_empty {
                        p { "Nenhuma despesa para exportar." }
                    } @else {
                        a
                            href=(endpoints::EXPORT_CSV)
                            download="despesas.csv"
                            class=(LINK_STYLE)
                        {
                            "Baixar CSV"
                        }
                    }
                }
            }
        }
    };

    base("Despesas", &head_elements, &content)
}

fn add_expense_form_view(default_date: Date) -> Markup {
    html!(
        section class="space-y-4"
        {
            h2 class="text-xl font-bold" { "Adicionar nova despesa" }

            form hx-post=(endpoints::DESPESAS_API) class="space-y-4"
            {
                div
                {
                    label for="descricao" class=(FORM_LABEL_STYLE) { "Descrição" }

                    input
                        type="text"
                        name="descricao"
                        id="descricao"
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="categoria" class=(FORM_LABEL_STYLE) { "Categoria" }

                    select
                        name="categoria"
                        id="categoria"
                        class=(FORM_TEXT_INPUT_STYLE)
                    {
                        @for categoria in Category::ALL {
                            option value=(categoria.as_str()) { (categoria.as_str()) }
                        }
                    }
                }

                div
                {
                    label for="valor" class=(FORM_LABEL_STYLE) { "Valor" }

                    div class="input-wrapper"
                    {
                        input
                            type="number"
                            name="valor"
                            id="valor"
                            min="0"
                            step="0.01"
                            required
                            class=(FORM_TEXT_INPUT_STYLE);
                    }
                }

                div
                {
                    label for="data" class=(FORM_LABEL_STYLE) { "Data" }

                    input
                        type="date"
                        name="data"
                        id="data"
                        value=(default_date)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Adicionar despesa" }
            }
        }
    )
}

fn expense_row_view(expense_row: &ExpenseTableRow) -> Markup {
    html!(
        tr class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE) { (expense_row.id) }
            td class=(TABLE_CELL_STYLE) { (truncated_description(&expense_row.descricao)) }
            td class="px-6 py-4 text-right" { (format_currency(expense_row.valor)) }
            td class=(TABLE_CELL_STYLE) { (expense_row.categoria) }
            td class=(TABLE_CELL_STYLE) { (format_date(expense_row.data)) }
            td class=(TABLE_CELL_STYLE)
            {
                button
                    type="button"
                    hx-delete=(expense_row.delete_url)
                    aria-label=(expense_row.delete_label)
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Apagar"
                }
            }
        }
    )
}

fn format_date(date: Date) -> String {
    date.format(BR_DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

fn truncated_description(descricao: &str) -> String {
    let graphemes: Vec<&str> = descricao.graphemes(true).collect();

    if graphemes.len() <= MAX_DESCRIPTION_GRAPHEMES {
        descricao.to_owned()
    } else {
        format!("{}…", graphemes[..MAX_DESCRIPTION_GRAPHEMES].concat())
    }
}
