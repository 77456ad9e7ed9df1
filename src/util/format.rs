//! Display helpers shared by the dashboard widgets.

use time::{macros::format_description, OffsetDateTime};

/// `1234567.891` -> `$1,234,567.89`.
pub fn currency(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = group_thousands(cents / 100);
    format!("{sign}${whole}.{:02}", cents % 100)
}

pub fn signed_currency(value: f64) -> String {
    if value > 0.0 {
        format!("+{}", currency(value))
    } else {
        currency(value)
    }
}

/// Formats a percentage that is already scaled (10.0 -> `+10.0%`).
pub fn signed_pct(value: f64) -> String {
    format!("{value:+.1}%")
}

/// Two decimals, matching the rounding of the revenue-maximising price change.
pub fn optimum_pct(value: f64) -> String {
    format!("{value:+.2}%")
}

/// Formats a `[0, 1]` ratio as a percentage.
pub fn ratio_pct(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

pub fn loaded_at(time: OffsetDateTime) -> String {
    time.format(format_description!("[hour]:[minute]:[second] UTC"))
        .unwrap_or_else(|_| "unknown".to_string())
}

fn group_thousands(mut value: u64) -> String {
    let mut groups = Vec::new();
    loop {
        let group = value % 1000;
        value /= 1000;
        if value == 0 {
            groups.push(group.to_string());
            break;
        }
        groups.push(format!("{group:03}"));
    }
    groups.reverse();
    groups.join(",")
}
