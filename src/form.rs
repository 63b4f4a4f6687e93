//! Raw form fields and their validation into a [`CalculationInput`].

use crate::calculator::{CalcError, CalculationInput, CalculationResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Ticker,
    BuyPrice,
    SellPrice,
}

impl Field {
    pub const ALL: [Self; 3] = [Self::Ticker, Self::BuyPrice, Self::SellPrice];

    /// Label shown next to the input.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ticker => "ticker",
            Self::BuyPrice => "buy",
            Self::SellPrice => "sell",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ticker => "ticker",
            Self::BuyPrice => "buy_price",
            Self::SellPrice => "sell_price",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(Field),
    #[error("{field} must be a number, got {value:?}")]
    NotANumber { field: Field, value: String },
    #[error(transparent)]
    Calculation(#[from] CalcError),
}

/// The three inputs exactly as typed. Whitespace-only counts as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFields {
    pub ticker: String,
    pub buy_price: String,
    pub sell_price: String,
}

impl FormFields {
    pub fn new(
        ticker: impl Into<String>,
        buy_price: impl Into<String>,
        sell_price: impl Into<String>,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            buy_price: buy_price.into(),
            sell_price: sell_price.into(),
        }
    }

    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Ticker => &self.ticker,
            Field::BuyPrice => &self.buy_price,
            Field::SellPrice => &self.sell_price,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Ticker => &mut self.ticker,
            Field::BuyPrice => &mut self.buy_price,
            Field::SellPrice => &mut self.sell_price,
        };
        *slot = value.into();
    }

    /// First field, in form order, that has no content.
    #[must_use]
    pub fn first_missing(&self) -> Option<Field> {
        Field::ALL
            .into_iter()
            .find(|field| self.get(*field).trim().is_empty())
    }

    /// Required and numeric checks only; the prices are not range-checked.
    ///
    /// # Errors
    ///
    /// [`FormError::Missing`] when a field is empty and
    /// [`FormError::NotANumber`] when a price does not parse.
    pub fn parse(&self) -> Result<CalculationInput, FormError> {
        if let Some(field) = self.first_missing() {
            return Err(FormError::Missing(field));
        }

        Ok(CalculationInput {
            ticker: self.ticker.trim().to_string(),
            buy_price: parse_price(Field::BuyPrice, &self.buy_price)?,
            sell_price: parse_price(Field::SellPrice, &self.sell_price)?,
        })
    }

    /// Parses the fields and runs the calculator once.
    ///
    /// # Errors
    ///
    /// Everything [`FormFields::parse`] reports, plus
    /// [`FormError::Calculation`] when the prices cannot produce a meaningful
    /// percentage.
    pub fn evaluate(&self) -> Result<CalculationResult, FormError> {
        Ok(self.parse()?.evaluate()?)
    }
}

fn parse_price(field: Field, raw: &str) -> Result<f64, FormError> {
    let trimmed = raw.trim();
    trimmed
        .parse::<f64>()
        .map_err(|_| FormError::NotANumber {
            field,
            value: trimmed.to_string(),
        })
}
