//! Currency conversion arithmetic

use crate::rates::RateTable;

/// Convert `amount` between two currencies
///
/// Rates in the table are all expressed against the same base currency, so
/// the result is the base-normalized cross rate
/// `amount * (to_rate / from_rate)`, not a direct pairwise quote.
///
/// Degrades to 0.0 when either code is unknown or the source rate has not
/// been fetched yet (rate exactly 0), rather than failing or dividing by
/// zero.
pub fn convert(table: &RateTable, amount: f64, from: &str, to: &str) -> f64 {
    let from_rate = match table.lookup(from) {
        Some(rate) => rate,
        None => return 0.0,
    };
    let to_rate = match table.lookup(to) {
        Some(rate) => rate,
        None => return 0.0,
    };
    if from_rate == 0.0 {
        return 0.0;
    }
    amount * (to_rate / from_rate)
}
