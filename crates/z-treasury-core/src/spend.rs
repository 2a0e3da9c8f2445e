//! Current card spend.

use crate::records::Authorization;

/// Sum of approved authorization amounts, in minor units.
#[must_use]
pub fn approved_total_cents(authorizations: &[Authorization]) -> i64 {
    authorizations
        .iter()
        .filter(|a| a.approved)
        .map(|a| a.amount)
        .sum()
}

/// Current spend for a card, formatted as US dollars (`"$10.00"`).
///
/// The authorization currency is ignored; amounts are always shown as USD.
#[must_use]
pub fn current_spend(authorizations: &[Authorization]) -> String {
    format_usd(approved_total_cents(authorizations))
}

/// Format minor units the way `en-US` formats USD: `$1,234.56`, `-$5.00`.
#[must_use]
pub fn format_usd(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let dollars = (cents / 100).to_string();

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, digit) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}${grouped}.{:02}", cents % 100)
}
