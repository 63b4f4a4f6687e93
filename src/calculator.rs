//! Realized gain/loss arithmetic.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("prices must be finite numbers")]
    NonFinite,
    #[error("buy price must be greater than zero")]
    NonPositiveBuyPrice,
    #[error("sell price must not be negative")]
    NegativeSellPrice,
}

/// A validated submission of the form.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationInput {
    pub ticker: String,
    pub buy_price: f64,
    pub sell_price: f64,
}

impl CalculationInput {
    pub fn evaluate(&self) -> Result<CalculationResult, CalcError> {
        let percent_change = calculate_gain_or_loss(self.buy_price, self.sell_price)?;
        Ok(CalculationResult {
            ticker: self.ticker.clone(),
            percent_change,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub ticker: String,
    pub percent_change: f64,
}

impl CalculationResult {
    /// Break-even counts as a gain.
    #[must_use]
    pub fn is_gain(&self) -> bool {
        self.percent_change >= 0.0
    }
}

/// Percentage change from `buy_price` to `sell_price`, rounded to two decimals.
///
/// Rounding is half away from zero: `12.345` becomes `12.35` and `-12.345`
/// becomes `-12.35` (modulo the binary representation of the input). A zero
/// result is always reported as `0.0`, never `-0.0`.
///
/// # Errors
///
/// Returns [`CalcError`] instead of a meaningless number when either price is
/// not finite, the buy price is zero or negative, the sell price is negative, or
/// the ratio overflows.
pub fn calculate_gain_or_loss(buy_price: f64, sell_price: f64) -> Result<f64, CalcError> {
    if !buy_price.is_finite() || !sell_price.is_finite() {
        return Err(CalcError::NonFinite);
    }
    if buy_price <= 0.0 {
        return Err(CalcError::NonPositiveBuyPrice);
    }
    if sell_price < 0.0 {
        return Err(CalcError::NegativeSellPrice);
    }

    let change = (sell_price - buy_price) / buy_price * 100.0;
    let rounded = round_to_cents(change);
    if rounded.is_finite() {
        Ok(rounded)
    } else {
        Err(CalcError::NonFinite)
    }
}

#[must_use]
pub fn round_to_cents(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    // -0.0 + 0.0 == +0.0
    rounded + 0.0
}
