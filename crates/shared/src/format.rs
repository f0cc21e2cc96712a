//! Display formatting for monetary amounts.

use rust_decimal::{Decimal, RoundingStrategy};

/// Default thousands separator (`5.000.000`).
pub const DEFAULT_THOUSANDS_SEPARATOR: char = '.';

/// Rounds `amount` to whole units and groups its digits in thousands.
///
/// Midpoints round away from zero, so `1499.5` becomes `1.500`.
///
/// ```
/// use rust_decimal_macros::dec;
/// use planwise_shared::format::format_thousands;
///
/// assert_eq!(format_thousands(dec!(5000000), '.'), "5.000.000");
/// assert_eq!(format_thousands(dec!(-1600000), ','), "-1,600,000");
/// ```
#[must_use]
pub fn format_thousands(amount: Decimal, separator: char) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < Decimal::ZERO {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}
