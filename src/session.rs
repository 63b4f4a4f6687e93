//! Line-based interactive form.

use crate::form::{Field, FormFields};
use crate::summary::{render_header, render_result};
use crate::theme::Theme;
use crate::view_state::ViewState;
use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{BufRead, Write};

const HELP: &str = "commands: :theme toggle light/dark | :state print state as JSON | :clear reset result | :quit exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Theme,
    State,
    Clear,
    Help,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Option<Self> {
        match line {
            ":theme" | ":t" => Some(Self::Theme),
            ":state" | ":s" => Some(Self::State),
            ":clear" | ":c" => Some(Self::Clear),
            ":help" | ":h" | ":?" => Some(Self::Help),
            ":quit" | ":q" | ":exit" => Some(Self::Quit),
            _ => None,
        }
    }
}

pub struct Session<R, W> {
    input: R,
    output: W,
    state: ViewState,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub const fn new(input: R, output: W, theme: Theme) -> Self {
        Self {
            input,
            output,
            state: ViewState::new(theme),
        }
    }

    pub const fn state(&self) -> &ViewState {
        &self.state
    }

    /// Runs until `:quit` or end of input.
    ///
    /// # Errors
    ///
    /// Only I/O failures on the underlying reader or writer end the session
    /// with an error; rejected submissions are reported and the loop goes on.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "{}", render_header(self.state.theme()))?;
        writeln!(self.output, "{}", HELP.bright_black())?;

        loop {
            let mut fields = FormFields::default();
            for field in Field::ALL {
                let Some(value) = self.read_field(field)? else {
                    self.output.flush()?;
                    return Ok(());
                };
                fields.set(field, value);
            }

            let theme = self.state.theme();
            match self.state.submit(&fields) {
                Ok(result) => {
                    let view = render_result(result, theme);
                    write!(self.output, "{view}")?;
                }
                Err(err) => {
                    writeln!(self.output, "{} {err}", "error:".bright_red().bold())?;
                }
            }
            writeln!(self.output)?;
        }
    }

    /// Prompts until `field` gets a non-empty answer. `None` means quit.
    fn read_field(&mut self, field: Field) -> Result<Option<String>> {
        loop {
            write!(self.output, "{}> ", field.label().bright_cyan().bold())?;
            self.output.flush().context("failed to flush prompt")?;

            let mut raw = Vec::new();
            let read = self
                .input
                .read_until(b'\n', &mut raw)
                .context("failed to read from input")?;
            if read == 0 {
                writeln!(self.output)?;
                return Ok(None);
            }

            // undecodable bytes become U+FFFD and fail validation like any other typo
            let line = String::from_utf8_lossy(&raw);
            let answer = line.trim();
            if let Some(command) = Command::parse(answer) {
                if command == Command::Quit {
                    return Ok(None);
                }
                self.apply(command)?;
                continue;
            }
            if answer.is_empty() {
                writeln!(self.output, "{}", format!("{field} is required").bright_black())?;
                continue;
            }
            return Ok(Some(answer.to_string()));
        }
    }

    fn apply(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Theme => {
                let theme = self.state.toggle_theme();
                writeln!(self.output, "{}", render_header(theme))?;
            }
            Command::State => {
                let json = serde_json::to_string_pretty(&self.state)
                    .context("failed to serialize view state")?;
                writeln!(self.output, "{json}")?;
            }
            Command::Clear => {
                self.state.clear();
                writeln!(self.output, "{}", "cleared".bright_black())?;
            }
            Command::Help => writeln!(self.output, "{HELP}")?,
            Command::Quit => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view_state::Phase;
    use std::io::Cursor;

    fn run(script: &str, theme: Theme) -> (ViewState, String) {
        run_bytes(script.as_bytes(), theme)
    }

    fn run_bytes(script: &[u8], theme: Theme) -> (ViewState, String) {
        colored::control::set_override(false);
        let mut output = Vec::new();
        let mut session = Session::new(Cursor::new(script), &mut output, theme);
        session.run().unwrap();
        let state = session.state().clone();
        drop(session);
        (state, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_gain_submission() {
        let (state, output) = run("BTC\n100\n150\n", Theme::Light);
        assert_eq!(state.phase(), Phase::Gain);
        assert!(output.contains("good stonks"));
        assert!(output.contains("your realized profit/loss on BTC is 50%"));
    }

    #[test]
    fn test_loss_then_gain_replaces_result() {
        let (state, output) = run("ETH\n200\n150\nBTC\n3\n10\n:quit\n", Theme::Light);
        assert!(output.contains("bad stonks"));
        assert!(output.contains("your realized profit/loss on ETH is -25%"));
        let result = state.result().unwrap();
        assert_eq!(result.ticker, "BTC");
        assert_eq!(result.percent_change, 233.33);
    }

    #[test]
    fn test_empty_answer_reprompts_same_field() {
        let (state, output) = run("\nBTC\n\n100\n150\n", Theme::Light);
        assert_eq!(output.matches("ticker is required").count(), 1);
        assert_eq!(output.matches("buy is required").count(), 1);
        assert_eq!(state.result().unwrap().ticker, "BTC");
    }

    #[test]
    fn test_rejected_submission_keeps_previous_result() {
        let (state, output) = run("BTC\n100\n150\nBAD\n0\n5\n", Theme::Light);
        assert!(output.contains("error: buy price must be greater than zero"));
        assert_eq!(state.result().unwrap().ticker, "BTC");
    }

    #[test]
    fn test_not_a_number_is_reported() {
        let (state, output) = run("BTC\nabc\n150\n", Theme::Light);
        assert!(output.contains("error: buy must be a number"));
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn test_invalid_utf8_line_is_reported_and_session_continues() {
        let (state, output) = run_bytes(b"BTC\n\xff\xfe\n100\nETH\n200\n150\n", Theme::Light);
        assert!(output.contains("error: buy must be a number"));
        let result = state.result().unwrap();
        assert_eq!(result.ticker, "ETH");
        assert_eq!(result.percent_change, -25.0);
    }

    #[test]
    fn test_invalid_utf8_ticker_is_kept_lossily() {
        let (state, _) = run_bytes(b"B\xffC\n100\n150\n", Theme::Light);
        assert_eq!(state.result().unwrap().ticker, "B\u{fffd}C");
    }

    #[test]
    fn test_theme_command_mid_form() {
        let (state, output) = run("BTC\n:theme\n100\n150\n", Theme::Light);
        assert_eq!(state.theme(), Theme::Dark);
        assert!(output.contains("dark mode"));
        assert_eq!(state.result().unwrap().percent_change, 50.0);
    }

    #[test]
    fn test_theme_twice_restores() {
        let (state, _) = run(":t\n:t\n", Theme::Dark);
        assert_eq!(state.theme(), Theme::Dark);
    }

    #[test]
    fn test_state_and_clear_commands() {
        let (state, output) = run("BTC\n100\n150\n:state\n:clear\n", Theme::Light);
        assert!(output.contains("\"percent_change\": 50.0"));
        assert!(output.contains("cleared"));
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn test_quit_stops_before_submit() {
        let (state, _) = run("BTC\n:q\n100\n150\n", Theme::Light);
        assert_eq!(state.phase(), Phase::Idle);
    }
}
