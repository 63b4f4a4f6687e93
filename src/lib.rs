//! Realized profit/loss calculator widget: the pure calculation, form
//! validation, an explicit view state and its terminal and HTML renderings.

pub mod calculator;
pub mod form;
pub mod formatting;
pub mod page;
pub mod session;
pub mod summary;
pub mod theme;
pub mod view_state;

pub use calculator::{CalcError, CalculationInput, CalculationResult, calculate_gain_or_loss};
pub use form::{Field, FormError, FormFields};
pub use theme::Theme;
pub use view_state::{Phase, ViewState};
