use crate::calculator::CalculationResult;

/// Two decimals at most, trailing zeros dropped: `50.0` prints as `50`.
#[must_use]
pub fn format_percent(value: f64) -> String {
    let fixed = format!("{:.2}", value + 0.0);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[must_use]
pub fn format_signed_percent(value: f64) -> String {
    let body = format_percent(value);
    if value > 0.0 && body != "0" {
        format!("+{body}%")
    } else {
        format!("{body}%")
    }
}

/// Text in front of the value; renderers color the value on their own.
#[must_use]
pub fn outcome_lead(ticker: &str) -> String {
    format!("your realized profit/loss on {ticker} is")
}

#[must_use]
pub fn outcome_message(result: &CalculationResult) -> String {
    format!(
        "{} {}%",
        outcome_lead(&result.ticker),
        format_percent(result.percent_change)
    )
}
