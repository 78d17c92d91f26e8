//! Rounding and display helpers for Naira amounts.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to the nearest whole currency unit, halves away from zero.
///
/// Every derived amount in the engine (allowances, statutory deductions,
/// PAYE) goes through this one function so the rounding mode is fixed.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_to_unit;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_to_unit(Decimal::from_str("1690.5").unwrap()), Decimal::from(1691));
/// assert_eq!(round_to_unit(Decimal::from_str("5409.4").unwrap()), Decimal::from(5409));
/// ```
pub fn round_to_unit(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount for display as Naira with two decimals and thousands separators.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::format_naira;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_naira(Decimal::from(1_234_567)), "₦1,234,567.00");
/// ```
pub fn format_naira(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}₦{}.{}", if negative { "-" } else { "" }, grouped, fraction)
}
