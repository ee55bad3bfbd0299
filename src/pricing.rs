//! Discounted-cost pricing for commercial paper.

use rust_decimal::Decimal;

/// Cost of purchasing `amount` papers at the given par value and discount:
/// `amount * par * (1 - discount)`.
///
/// Computed in exact decimal arithmetic. Settlement debits the buyer
/// `cost(total)` and credits each seller `cost(part)`; at the scales
/// involved `Decimal` multiplication carries no rounding step, so
/// `cost(a) + cost(b) == cost(a + b)` and the transfer stays zero-sum to
/// the last digit.
pub fn cost_of_purchase(amount: u64, par: Decimal, discount: Decimal) -> Decimal {
    Decimal::from(amount) * par * (Decimal::ONE - discount)
}
