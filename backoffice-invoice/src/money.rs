use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Format a monetary value with a thousands separator and two decimal
/// places: 9600 → "9,600.00". Rounding is banker's-free half-up on the
/// cent, applied only for display; stored values keep full precision.
pub fn fmt_money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative();
    let abs = rounded.abs();

    let units = abs.trunc().to_u128().unwrap_or(0);
    let cents = ((abs - abs.trunc()) * Decimal::from(100))
        .round()
        .to_u32()
        .unwrap_or(0);

    let digits = units.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped}.{cents:02}")
}
