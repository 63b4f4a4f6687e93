//! The widget's entire UI state as one serializable value.
//!
//! The outcome view moves from [`Phase::Idle`] to a result phase on the first
//! valid submission and from result to result on every later one. Invalid
//! submissions leave the state untouched. The theme flag is orthogonal to the
//! result and only changes through [`ViewState::toggle_theme`].

use crate::calculator::CalculationResult;
use crate::form::{FormError, FormFields};
use crate::formatting::outcome_message;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Gain,
    Loss,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    theme: Theme,
    result: Option<CalculationResult>,
}

impl ViewState {
    #[must_use]
    pub const fn new(theme: Theme) -> Self {
        Self {
            theme,
            result: None,
        }
    }

    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    #[must_use]
    pub const fn result(&self) -> Option<&CalculationResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        match &self.result {
            None => Phase::Idle,
            Some(result) if result.is_gain() => Phase::Gain,
            Some(_) => Phase::Loss,
        }
    }

    /// Validates and evaluates `fields`, replacing the previous result.
    ///
    /// # Errors
    ///
    /// Returns the [`FormError`] of the rejected submission; the state is then
    /// exactly what it was before the call.
    pub fn submit(&mut self, fields: &FormFields) -> Result<&CalculationResult, FormError> {
        match fields.evaluate() {
            Ok(result) => {
                log::debug!("accepted submission: {}", outcome_message(&result));
                Ok(&*self.result.insert(result))
            }
            Err(err) => {
                log::debug!("rejected submission: {err}");
                Err(err)
            }
        }
    }

    pub const fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    pub fn clear(&mut self) {
        self.result = None;
    }
}
