//! Cost summary tables.
//!
//! Every table has a bold, shaded header row whose cells carry the column
//! widths; body rows always have the header's cell count.

use super::normalize::{
    has_expenses, normalize_commitment, normalize_duration, normalize_duration_compact,
    normalize_rate,
};
use super::options::StyleConfig;
use crate::input::ProposalFields;
use crate::model::{Cell, Row, Table};

const STAFF_COLUMNS: [(&str, u8); 7] = [
    ("Staff Name", 18),
    ("Position", 18),
    ("Duration", 12),
    ("Hourly Rate", 13),
    ("Commitment", 12),
    ("Monthly Cost", 13),
    ("Total Cost", 14),
];

const EXPENSE_COLUMNS: [(&str, u8); 5] = [
    ("Expense Type", 20),
    ("Description", 35),
    ("Duration", 15),
    ("Monthly Cost", 15),
    ("Total Cost", 15),
];

const COMBINED_COLUMNS: [(&str, u8); 3] = [
    ("Cost Summary", 50),
    ("Monthly", 25),
    ("Total", 25),
];

const GRID_WIDTHS: [u8; 4] = [20, 30, 20, 30];

/// Placeholder for missing text cells.
const DASH: &str = "-";

/// Placeholder for missing money cells.
const ZERO: &str = "$0";

fn header_row(columns: &[(&str, u8)], style: &StyleConfig) -> Row {
    Row::new(
        columns
            .iter()
            .map(|(label, width)| {
                Cell::bold(*label)
                    .width(*width)
                    .shaded(style.header_shading.clone())
            })
            .collect(),
    )
}

fn body_row<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Row {
    Row::new(values.into_iter().map(Cell::with_text).collect())
}

fn total_row<S: Into<String>>(values: impl IntoIterator<Item = S>, style: &StyleConfig) -> Row {
    Row::new(
        values
            .into_iter()
            .map(|v| Cell::bold(v).shaded(style.total_shading.clone()))
            .collect(),
    )
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.trim().is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

/// Monthly and total expense cells, `$0` when there is no expense.
fn expense_amounts(fields: &ProposalFields) -> (String, String) {
    if has_expenses(&fields.expense_monthly) {
        (
            fields.expense_monthly.clone(),
            or_placeholder(&fields.expense_total, ZERO),
        )
    } else {
        (ZERO.to_string(), ZERO.to_string())
    }
}

/// One row per staff member: name, position, normalized duration, rate,
/// commitment, and the precomputed monthly and total cost.
pub fn build_staff_table(fields: &ProposalFields, style: &StyleConfig) -> Table {
    let mut table = Table::new();
    table.add_row(header_row(&STAFF_COLUMNS, style));
    table.add_row(body_row([
        fields.staff_name.clone(),
        fields.position.clone(),
        normalize_duration(&fields.duration),
        normalize_rate(&fields.hourly_rate),
        normalize_commitment(&fields.commitment),
        fields.staff_monthly.clone(),
        fields.staff_total.clone(),
    ]));
    table
}

/// Expense line; placeholders stand in when no expense applies.
pub fn build_expense_table(fields: &ProposalFields, style: &StyleConfig) -> Table {
    let mut table = Table::new();
    table.add_row(header_row(&EXPENSE_COLUMNS, style));

    let expense_type = or_placeholder(&fields.expense_type, DASH);
    let (monthly, total) = expense_amounts(fields);
    let row = if has_expenses(&fields.expense_monthly) {
        body_row([
            expense_type,
            or_placeholder(&fields.expense_desc, DASH),
            normalize_duration(&fields.duration),
            monthly,
            total,
        ])
    } else {
        body_row([expense_type, DASH.to_string(), DASH.to_string(), monthly, total])
    };
    table.add_row(row);
    table
}

/// Staff and expense subtotals followed by the shaded combined total, which
/// is shown exactly as supplied.
pub fn build_combined_table(fields: &ProposalFields, style: &StyleConfig) -> Table {
    let (expense_monthly, expense_total) = expense_amounts(fields);

    let mut table = Table::new();
    table.add_row(header_row(&COMBINED_COLUMNS, style));
    table.add_row(body_row([
        "Staff".to_string(),
        fields.staff_monthly.clone(),
        fields.staff_total.clone(),
    ]));
    table.add_row(body_row([
        "Expenses".to_string(),
        expense_monthly,
        expense_total,
    ]));
    table.add_row(total_row(
        [
            "Combined Total".to_string(),
            fields.combined_monthly.clone(),
            fields.combined_total.clone(),
        ],
        style,
    ));
    table
}

/// Compact label/value grid holding staffing, expense, and combined figures
/// in a single table.
pub fn build_summary_grid(fields: &ProposalFields, style: &StyleConfig) -> Table {
    let label = |text: &str, width: u8| {
        Cell::bold(text)
            .width(width)
            .shaded(style.header_shading.clone())
    };
    let plain_label = |text: &str| Cell::bold(text).shaded(style.header_shading.clone());
    let (expense_monthly, expense_total) = expense_amounts(fields);
    let expense_desc = if has_expenses(&fields.expense_monthly) {
        or_placeholder(&fields.expense_desc, DASH)
    } else {
        DASH.to_string()
    };

    let mut table = Table::new();
    table.add_row(Row::new(vec![
        label("Staff Name", GRID_WIDTHS[0]),
        Cell::with_text(fields.staff_name.clone()).width(GRID_WIDTHS[1]),
        label("Position", GRID_WIDTHS[2]),
        Cell::with_text(fields.position.clone()).width(GRID_WIDTHS[3]),
    ]));
    table.add_row(Row::new(vec![
        plain_label("Duration"),
        Cell::with_text(normalize_duration_compact(&fields.duration)),
        plain_label("Commitment"),
        Cell::with_text(normalize_commitment(&fields.commitment)),
    ]));
    table.add_row(Row::new(vec![
        plain_label("Hourly Rate"),
        Cell::with_text(normalize_rate(&fields.hourly_rate)),
        plain_label("Staff Monthly"),
        Cell::with_text(fields.staff_monthly.clone()),
    ]));
    table.add_row(Row::new(vec![
        plain_label("Staff Total"),
        Cell::with_text(fields.staff_total.clone()),
        plain_label("Expenses"),
        Cell::with_text(expense_desc),
    ]));
    table.add_row(Row::new(vec![
        plain_label("Expense Monthly"),
        Cell::with_text(expense_monthly),
        plain_label("Expense Total"),
        Cell::with_text(expense_total),
    ]));
    table.add_row(total_row(
        [
            "Combined Monthly".to_string(),
            fields.combined_monthly.clone(),
            "Combined Total".to_string(),
            fields.combined_total.clone(),
        ],
        style,
    ));
    table
}
