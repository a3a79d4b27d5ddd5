//! Display normalization of flat proposal fields.
//!
//! Each function leaves values that already carry their unit untouched, so
//! applying one twice gives the same result as applying it once.

/// `"12"` becomes `"12 Months"`; anything mentioning "Month" is kept.
pub fn normalize_duration(value: &str) -> String {
    if value.contains("Month") {
        value.to_string()
    } else {
        format!("{} Months", value)
    }
}

/// Compact duration for the merged grid: `"12"` becomes `"12 mo"`.
pub fn normalize_duration_compact(value: &str) -> String {
    if value.contains("Month") || value.ends_with(" mo") {
        value.to_string()
    } else {
        format!("{} mo", value)
    }
}

/// `"200"` becomes `"$200/hr"`; anything with a dollar sign is kept.
pub fn normalize_rate(value: &str) -> String {
    if value.contains('$') {
        value.to_string()
    } else {
        format!("${}/hr", value)
    }
}

/// `"75"` becomes `"75%"`.
pub fn normalize_commitment(value: &str) -> String {
    if value.contains('%') {
        value.to_string()
    } else {
        format!("{}%", value)
    }
}

/// Whether the monthly expense field describes a real expense.
pub fn has_expenses(expense_monthly: &str) -> bool {
    !expense_monthly.is_empty() && expense_monthly != "N/A" && expense_monthly != "$0"
}
