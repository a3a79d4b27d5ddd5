//! Staffing cost arithmetic and currency formatting.
//!
//! Money fields in [`ProposalFields`] are display strings. When an upstream
//! producer leaves them empty they can be derived here from the hourly rate,
//! the duration in months, and the commitment percentage.

use crate::input::ProposalFields;

/// Billable hours in a month: 40 hours/week * 52 weeks / 12 months.
pub const HOURS_PER_MONTH: f64 = 173.33;

/// Monthly and whole-engagement cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    pub monthly: f64,
    pub total: f64,
}

/// Compute monthly and total staff cost.
pub fn calculate_totals(hourly_rate: f64, duration_months: f64, commitment_pct: f64) -> Totals {
    let monthly = hourly_rate * HOURS_PER_MONTH * (commitment_pct / 100.0);
    Totals {
        monthly,
        total: monthly * duration_months,
    }
}

/// Parse a money or quantity string such as `"$1,200"`, `"12 Months"`,
/// `"$200/hr"`, or `"75%"`. Returns `None` when no number is present.
pub fn parse_amount(value: &str) -> Option<f64> {
    let cleaned: String = value
        .trim()
        .trim_start_matches('$')
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .filter(|c| *c != ',')
        .collect();
    cleaned.parse().ok()
}

/// Format a dollar amount rounded to whole dollars with thousands
/// separators, e.g. `34600.4` becomes `"$34,600"`.
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

impl ProposalFields {
    /// Fill empty money fields from the rate, duration, and commitment.
    ///
    /// Fields that already carry a value are left untouched, except an
    /// expense total that is not a number (such as `"N/A"`) while a monthly
    /// expense is present. Combined totals are the sums of the staff and
    /// expense values as they will be displayed. Commitment defaults to 100%
    /// when it is empty or unparseable. Nothing is derived when the rate or
    /// duration cannot be parsed.
    pub fn with_computed_totals(mut self) -> Self {
        let (Some(rate), Some(months)) = (
            parse_amount(&self.hourly_rate),
            parse_amount(&self.duration),
        ) else {
            log::debug!("Skipping cost derivation: rate or duration is not numeric");
            return self;
        };
        let commitment = parse_amount(&self.commitment).unwrap_or(100.0);
        let staff = calculate_totals(rate, months, commitment);

        fill(&mut self.staff_monthly, staff.monthly);
        fill(&mut self.staff_total, staff.total);

        let expense_monthly = parse_amount(&self.expense_monthly).unwrap_or(0.0);
        if expense_monthly > 0.0 && parse_amount(&self.expense_total).is_none() {
            self.expense_total = format_currency(expense_monthly * months);
        }

        let shown = |field: &str| parse_amount(field).unwrap_or(0.0);
        let combined_monthly = shown(&self.staff_monthly) + expense_monthly;
        let combined_total = shown(&self.staff_total) + shown(&self.expense_total);
        fill(&mut self.combined_monthly, combined_monthly);
        fill(&mut self.combined_total, combined_total);
        self
    }
}

fn fill(field: &mut String, amount: f64) {
    if field.trim().is_empty() {
        *field = format_currency(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_totals() {
        let totals = calculate_totals(200.0, 12.0, 100.0);
        assert!((totals.monthly - 34_666.0).abs() < 0.01);
        assert!((totals.total - 415_992.0).abs() < 0.01);

        let half = calculate_totals(200.0, 12.0, 50.0);
        assert!((half.monthly - 17_333.0).abs() < 0.01);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(999.4), "$999");
        assert_eq!(format_currency(34_600.0), "$34,600");
        assert_eq!(format_currency(415_200.0), "$415,200");
        assert_eq!(format_currency(1_234_567.0), "$1,234,567");
        assert_eq!(format_currency(-1_500.0), "-$1,500");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("$1,200"), Some(1200.0));
        assert_eq!(parse_amount("12 Months"), Some(12.0));
        assert_eq!(parse_amount("$200/hr"), Some(200.0));
        assert_eq!(parse_amount("75%"), Some(75.0));
        assert_eq!(parse_amount("N/A"), None);
        assert_eq!(parse_amount(""), None);
    }

    #[test]
    fn test_with_computed_totals_fills_empty_fields() {
        let fields = ProposalFields {
            hourly_rate: "$200/hr".into(),
            duration: "12 Months".into(),
            commitment: "100%".into(),
            expense_monthly: "$1,000".into(),
            ..Default::default()
        }
        .with_computed_totals();

        assert_eq!(fields.staff_monthly, "$34,666");
        assert_eq!(fields.staff_total, "$415,992");
        assert_eq!(fields.expense_total, "$12,000");
        assert_eq!(fields.combined_monthly, "$35,666");
        assert_eq!(fields.combined_total, "$427,992");
    }

    #[test]
    fn test_with_computed_totals_keeps_existing_values() {
        let fields = ProposalFields {
            hourly_rate: "200".into(),
            duration: "12".into(),
            staff_monthly: "$34,600".into(),
            combined_total: "$1".into(),
            ..Default::default()
        }
        .with_computed_totals();

        assert_eq!(fields.staff_monthly, "$34,600");
        assert_eq!(fields.combined_total, "$1");
        assert_eq!(fields.expense_total, "");
    }

    #[test]
    fn test_combined_sums_supplied_staff_cost() {
        let fields = ProposalFields {
            hourly_rate: "200".into(),
            duration: "12".into(),
            staff_monthly: "$34,600".into(),
            staff_total: "$415,200".into(),
            ..Default::default()
        }
        .with_computed_totals();

        assert_eq!(fields.combined_monthly, "$34,600");
        assert_eq!(fields.combined_total, "$415,200");
    }

    #[test]
    fn test_placeholder_expense_total_is_replaced() {
        let fields = ProposalFields {
            hourly_rate: "200".into(),
            duration: "12".into(),
            expense_monthly: "$1,000".into(),
            expense_total: "N/A".into(),
            ..Default::default()
        }
        .with_computed_totals();

        assert_eq!(fields.expense_total, "$12,000");
        assert_eq!(fields.combined_monthly, "$35,666");
        assert_eq!(fields.combined_total, "$427,992");
    }

    #[test]
    fn test_placeholder_expenses_stay_when_absent() {
        let fields = ProposalFields {
            hourly_rate: "200".into(),
            duration: "12".into(),
            expense_monthly: "N/A".into(),
            expense_total: "N/A".into(),
            ..Default::default()
        }
        .with_computed_totals();

        assert_eq!(fields.expense_total, "N/A");
        assert_eq!(fields.combined_total, "$415,992");
    }

    #[test]
    fn test_with_computed_totals_requires_numbers() {
        let fields = ProposalFields {
            hourly_rate: "TBD".into(),
            duration: "12".into(),
            ..Default::default()
        }
        .with_computed_totals();
        assert!(fields.staff_monthly.is_empty());
    }
}
