//! Plain-text expense report export.
//!
//! The report is a fixed human-readable template generated on demand; the
//! shell offers the returned string as a downloadable text file.

use std::fmt::Write as _;

use chrono::NaiveDate;

use crate::expenses::ExpenseSummary;

/// The reporting window shown in the header (informational only; the
/// summary itself is not re-filtered by it).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// USD formatting with thousands separators and two decimals,
/// e.g. `$1,234.50` / `-$12.00`.
pub fn format_currency(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}${grouped}.{fraction:02}")
}

/// Conventional file name for a downloaded report.
pub fn report_file_name(date: NaiveDate) -> String {
    format!("expense-report-{}.txt", date.format("%Y-%m-%d"))
}

/// Render the fixed report template.
///
/// `year` labels the month-wise section (the calendar year the summary's
/// month buckets were computed for).
pub fn render_report(
    summary: &ExpenseSummary,
    generated: NaiveDate,
    period: ReportPeriod,
    year: i32,
) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "COMPREHENSIVE EXPENSE ANALYSIS REPORT");
    let _ = writeln!(out, "Generated: {generated}");
    let _ = writeln!(out, "Period: {} to {}", period.start, period.end);
    let _ = writeln!(out);

    let _ = writeln!(out, "OVERALL SUMMARY");
    let _ = writeln!(
        out,
        "Total Products Cost: {}",
        format_currency(summary.total_products_cost)
    );
    let _ = writeln!(
        out,
        "Total Services Cost: {}",
        format_currency(summary.total_services_cost)
    );
    let _ = writeln!(
        out,
        "Total Appointments Cost: {}",
        format_currency(summary.total_appointments_cost)
    );
    let _ = writeln!(
        out,
        "Total Expenses: {}",
        format_currency(summary.total_expenses)
    );
    let _ = writeln!(
        out,
        "Total Revenue: {}",
        format_currency(summary.total_revenue)
    );
    let _ = writeln!(
        out,
        "Total Profit: {}",
        format_currency(summary.total_profit)
    );
    let _ = writeln!(out, "Profit Margin: {:.2}%", summary.profit_margin);
    let _ = writeln!(out);

    let _ = writeln!(out, "BRANCH-WISE EXPENSES");
    for row in &summary.branch_wise {
        let _ = writeln!(
            out,
            "{}: Products: {}, Services: {}, Appointments: {}, Total: {}",
            row.branch,
            format_currency(row.products_cost),
            format_currency(row.services_cost),
            format_currency(row.appointments_cost),
            format_currency(row.total_cost),
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "MONTH-WISE EXPENSES ({year})");
    for row in &summary.month_wise {
        let _ = writeln!(
            out,
            "{}: Products: {}, Services: {}, Appointments: {}, Revenue: {}, Profit: {}",
            row.month,
            format_currency(row.products_cost),
            format_currency(row.services_cost),
            format_currency(row.appointments_cost),
            format_currency(row.revenue),
            format_currency(row.profit),
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "CATEGORY-WISE EXPENSES");
    for row in &summary.category_wise {
        let _ = writeln!(
            out,
            "{}: Products: {}, Services: {}, Total: {}",
            row.category,
            format_currency(row.products_cost),
            format_currency(row.services_cost),
            format_currency(row.total_cost),
        );
    }

    out
}
