use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::types::{Money, Rate};

/// Assumed government rates levy as a fraction of price per year.
pub const ANNUAL_RATES_LEVY: Rate = dec!(0.001);

/// Monthly government rates estimated from price: 0.1% a year spread over
/// twelve months, rounded to the whole dollar with halves rounded up.
pub fn estimate_monthly_rates(actual_price: Money) -> Money {
    (actual_price * ANNUAL_RATES_LEVY / dec!(12))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// The caller's rates when positive, otherwise the estimate.
pub fn resolve_monthly_rates(manual_rates: Money, actual_price: Money) -> Money {
    if manual_rates > Decimal::ZERO {
        manual_rates
    } else {
        estimate_monthly_rates(actual_price)
    }
}
