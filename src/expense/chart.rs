//! Chart generation for the category summary.
//!
//! The chart is generated as JSON configuration for the ECharts library and
//! rendered with an HTML container and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Title},
    element::{AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Tooltip, Trigger},
    series::bar::Bar,
};
use maud::{Markup, PreEscaped, html};

use crate::html::HeadElement;

use super::summary::CategorySummary;

/// The HTML element ID the summary chart is drawn into.
pub(super) const SUMMARY_CHART_ID: &str = "summary-chart";

/// Renders the HTML container for the summary chart.
pub(super) fn chart_view() -> Markup {
    html!(
        div
            id=(SUMMARY_CHART_ID)
            class="min-h-[380px] rounded dark:bg-gray-100"
        {}
    )
}

/// Generates the JavaScript that initializes the summary chart with dark mode
/// support and responsive resizing.
pub(super) fn chart_script(options: &str) -> HeadElement {
    let script = format!(
        r#"document.addEventListener('DOMContentLoaded', function() {{
            const chartDom = document.getElementById("{SUMMARY_CHART_ID}");
            const chart = echarts.init(chartDom);
            const option = {options};
            chart.setOption(option);

            window.addEventListener('resize', chart.resize);

            const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
            const updateTheme = () => {{
                const isDarkMode = darkModeMediaQuery.matches;
                chart.setTheme(isDarkMode ? 'dark' : 'default');
            }}
            darkModeMediaQuery.addEventListener('change', updateTheme);
            updateTheme();
        }});"#
    );

    HeadElement::ScriptSource(PreEscaped(script))
}

/// Build the bar chart of totals per category, largest first.
pub(super) fn summary_chart(summary: &[CategorySummary]) -> Chart {
    let labels: Vec<String> = summary
        .iter()
        .map(|row| row.categoria.to_string())
        .collect();
    let values: Vec<f64> = summary.iter().map(|row| row.total).collect();

    Chart::new()
        .title(Title::new().text("Resumo de Gastos por Categoria"))
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Bar::new().name("Gastos").data(values))
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('pt-BR', {
              style: 'currency',
              currency: 'BRL'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
