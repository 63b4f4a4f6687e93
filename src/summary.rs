use crate::calculator::CalculationResult;
use crate::formatting::{format_percent, format_signed_percent, outcome_lead};
use crate::theme::Theme;
use colored::Colorize;

pub const TITLE: &str = "pnl calculator";

const GAIN_ART: [&str; 3] = ["   ___/", "  /", "_/  good stonks"];
const LOSS_ART: [&str; 3] = ["\\_", "  \\", "   \\___  bad stonks"];

/// The outcome view: indicator chosen by the sign, then the message with the
/// value in the gain or loss color.
#[must_use]
pub fn render_result(result: &CalculationResult, theme: Theme) -> String {
    let palette = theme.palette();
    let gain = result.is_gain();
    let art = if gain { GAIN_ART } else { LOSS_ART };

    let mut out = String::new();
    out.push('\n');
    for line in art {
        let line = if gain {
            line.bright_green().bold()
        } else {
            line.bright_red().bold()
        };
        out.push_str(&format!("  {line}\n"));
    }
    out.push('\n');

    let value = format!("{}%", format_percent(result.percent_change));
    let value = if gain {
        value.green().bold()
    } else {
        value.red().bold()
    };
    let lead = outcome_lead(&result.ticker).color(palette.term_text);
    out.push_str(&format!("  {lead} {value}\n"));

    let badge = format!("[{} {}]", result.ticker, format_signed_percent(result.percent_change));
    out.push_str(&format!("  {}\n", badge.color(palette.term_heading)));
    out
}

#[must_use]
pub fn render_header(theme: Theme) -> String {
    let palette = theme.palette();
    format!(
        "{} {}",
        TITLE.bold().color(palette.term_heading),
        format!("({theme} mode, :theme to switch)").color(palette.term_heading)
    )
}
