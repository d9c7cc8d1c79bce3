//! Fixed-width tabular rendering of `StateRecord`s.

use crate::models::StateRecord;
use std::fmt::Write;

const STATE_WIDTH: usize = 18;
const CAPITAL_WIDTH: usize = 18;
const POPULATION_WIDTH: usize = 15;
const FLOWER_WIDTH: usize = 15;

/// Formats an integer with a comma between every group of three digits.
///
/// `39500000` becomes `"39,500,000"`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

fn push_header(out: &mut String) {
    out.push('\n');
    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        "{:<sw$}{:<cw$}{:<pw$}{:<fw$}",
        "State",
        "Capitol",
        "Population",
        "Flower",
        sw = STATE_WIDTH,
        cw = CAPITAL_WIDTH,
        pw = POPULATION_WIDTH,
        fw = FLOWER_WIDTH,
    );
    let _ = writeln!(
        out,
        "{:<sw$}{:<cw$}{:<pw$}{:<fw$}\n",
        "-".repeat(5),
        "-".repeat(7),
        "-".repeat(10),
        "-".repeat(6),
        sw = STATE_WIDTH,
        cw = CAPITAL_WIDTH,
        pw = POPULATION_WIDTH,
        fw = FLOWER_WIDTH,
    );
}

fn push_row(out: &mut String, record: &StateRecord) {
    let _ = writeln!(
        out,
        "{:<sw$}{:<cw$}{:<pw$}{:<fw$}",
        record.name,
        record.capital,
        group_thousands(record.population),
        record.flower_name,
        sw = STATE_WIDTH,
        cw = CAPITAL_WIDTH,
        pw = POPULATION_WIDTH,
        fw = FLOWER_WIDTH,
    );
}

/// Renders records as a table preceded by a header and a dashed separator.
///
/// Values longer than their column are not truncated; they push the
/// following columns to the right.
pub fn format_table(records: &[StateRecord]) -> String {
    let mut out = String::new();
    push_header(&mut out);
    for record in records {
        push_row(&mut out, record);
    }
    out
}

/// Renders a single record with the same layout as `format_table`.
pub fn format_single(record: &StateRecord) -> String {
    format_table(std::slice::from_ref(record))
}
