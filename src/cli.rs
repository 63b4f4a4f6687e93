use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate, generate_to};
use pnlcalc::Theme;

pub const DEFAULT_HTML_PATH: &str = "data/output/pnl.html";

pub const SAVE_HTML_HELP: &str = "Save an HTML snapshot of the widget to the given file (defaults to data/output/pnl.html when no path is provided).";
pub const ASSET_BASE_HELP: &str = "Base URL or directory for the good/bad outcome images referenced by the HTML snapshot.";

#[derive(Debug, Parser)]
#[command(
    name = "pnlcalc",
    about = "Compute the realized profit/loss percentage of a trade from its buy and sell price.",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        value_enum,
        env = "PNLCALC_THEME",
        default_value_t = Theme::Light,
        help = "Initial visual theme."
    )]
    pub theme: Theme,
    #[arg(long, global = true, help = "Disable colored output.")]
    pub no_color: bool,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fill in the form interactively (the default when no command is given).
    Form,
    /// Submit the form once and print the outcome.
    Calc {
        #[arg(long, help = "Ticker of the asset, echoed back in the result.")]
        ticker: String,
        #[arg(long = "buy", value_name = "PRICE", allow_hyphen_values = true)]
        buy_price: String,
        #[arg(long = "sell", value_name = "PRICE", allow_hyphen_values = true)]
        sell_price: String,
        #[arg(long, help = "Print the view state as JSON instead of the outcome view.")]
        json: bool,
        #[arg(
            long,
            value_name = "FILE",
            num_args = 0..=1,
            default_missing_value = DEFAULT_HTML_PATH,
            help = SAVE_HTML_HELP
        )]
        save_html: Option<PathBuf>,
        #[arg(long, requires = "save_html", help = "Minify the saved HTML snapshot.")]
        minify: bool,
        #[arg(long, value_name = "URL", default_value = "", help = ASSET_BASE_HELP)]
        asset_base: String,
        #[arg(
            long = "link",
            value_name = "URL",
            help = "External link shown in the HTML snapshot header; repeat for several."
        )]
        links: Vec<String>,
    },
    /// Generate shell completion scripts, optionally installing them for the current user.
    Completions {
        #[arg(value_enum, help = "Shell to generate completions for.")]
        shell: Shell,
        #[arg(
            long,
            value_name = "DIR",
            help = "Directory to write the completion script to."
        )]
        output_dir: Option<PathBuf>,
        #[arg(
            long,
            help = "Install the completion script into the default location for the selected shell."
        )]
        install: bool,
    },
}

pub fn generate_completions(
    shell: Shell,
    output_dir: Option<PathBuf>,
    install: bool,
) -> Result<()> {
    let mut command = Cli::command();
    let bin_name = command.get_name().to_string();

    let target_dir = if let Some(dir) = output_dir {
        Some(dir)
    } else if install {
        Some(default_install_dir(shell)?)
    } else {
        None
    };

    if let Some(dir) = target_dir {
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create completion directory {}", dir.display()))?;
        let path = generate_to(shell, &mut command, bin_name, &dir)
            .context("failed to write completion file")?;
        log::info!("wrote {shell:?} completions to {}", path.display());
        println!("Installed {shell:?} completions to {}", path.display());
    } else {
        let mut stdout = io::stdout().lock();
        generate(shell, &mut command, bin_name, &mut stdout);
        stdout
            .flush()
            .context("failed to flush completion output")?;
    }

    Ok(())
}

fn default_install_dir(shell: Shell) -> Result<PathBuf> {
    let subdir = completion_subdir(shell)
        .ok_or_else(|| anyhow!("no default install location for {shell:?}; specify --output-dir"))?;
    let home = std::env::var_os("HOME").ok_or_else(|| {
        anyhow!("HOME environment variable is not set; use --output-dir to specify a path")
    })?;
    Ok(Path::new(&home).join(subdir))
}

/// Per-user completion directory, relative to `$HOME`.
const fn completion_subdir(shell: Shell) -> Option<&'static str> {
    match shell {
        Shell::Bash => Some(".local/share/bash-completion/completions"),
        Shell::Elvish => Some(".elvish/lib/completions"),
        Shell::Fish => Some(".config/fish/completions"),
        Shell::PowerShell => Some(".local/share/powershell/Scripts"),
        Shell::Zsh => Some(".local/share/zsh/site-functions"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::ValueEnum;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_calc_arguments() {
        let cli = Cli::try_parse_from([
            "pnlcalc", "--theme", "dark", "calc", "--ticker", "BTC", "--buy", "100", "--sell",
            "150", "--save-html",
        ])
        .unwrap();
        assert_eq!(cli.theme, Theme::Dark);
        match cli.command {
            Some(Commands::Calc {
                ticker,
                buy_price,
                sell_price,
                save_html,
                links,
                ..
            }) => {
                assert_eq!(ticker, "BTC");
                assert_eq!(buy_price, "100");
                assert_eq!(sell_price, "150");
                assert_eq!(save_html, Some(PathBuf::from(DEFAULT_HTML_PATH)));
                assert!(links.is_empty());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_negative_price_reaches_validation() {
        let cli = Cli::try_parse_from([
            "pnlcalc", "calc", "--ticker", "X", "--buy", "-5", "--sell", "1",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Calc { buy_price, .. }) if buy_price == "-5"
        ));
    }

    #[test]
    fn test_minify_requires_save_html() {
        let parsed = Cli::try_parse_from([
            "pnlcalc", "calc", "--ticker", "X", "--buy", "1", "--sell", "2", "--minify",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_repeated_links() {
        let cli = Cli::try_parse_from([
            "pnlcalc",
            "calc",
            "--ticker",
            "X",
            "--buy",
            "1",
            "--sell",
            "2",
            "--link",
            "https://github.com/example",
            "--link",
            "https://twitter.com/example",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Calc { links, .. })
                if links == ["https://github.com/example", "https://twitter.com/example"]
        ));
    }

    #[test]
    fn test_no_color_flag_is_global() {
        let cli = Cli::try_parse_from(["pnlcalc", "form", "--no-color"]).unwrap();
        assert!(cli.no_color);
        assert!(matches!(cli.command, Some(Commands::Form)));

        let cli = Cli::try_parse_from(["pnlcalc"]).unwrap();
        assert!(!cli.no_color);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_theme_from_environment() {
        // SAFETY: the only test that sets PNLCALC_THEME; the others never assert on the env fallback.
        unsafe { std::env::set_var("PNLCALC_THEME", "dark") };
        let from_env = Cli::try_parse_from(["pnlcalc", "form"]).map(|cli| cli.theme);
        let explicit =
            Cli::try_parse_from(["pnlcalc", "--theme", "light", "form"]).map(|cli| cli.theme);
        // SAFETY: as above.
        unsafe { std::env::remove_var("PNLCALC_THEME") };

        assert_eq!(from_env.unwrap(), Theme::Dark);
        assert_eq!(explicit.unwrap(), Theme::Light);
    }

    #[test]
    fn test_completion_dirs() {
        assert_eq!(
            completion_subdir(Shell::Zsh),
            Some(".local/share/zsh/site-functions")
        );
        assert_eq!(
            completion_subdir(Shell::Bash),
            Some(".local/share/bash-completion/completions")
        );
        assert!(Shell::value_variants().iter().all(|shell| {
            completion_subdir(*shell).is_some_and(|dir| !dir.starts_with('/'))
        }));
    }

    #[test]
    fn test_completions_written_to_output_dir() {
        let dir = std::env::temp_dir().join(format!("pnlcalc-completions-{}", std::process::id()));
        generate_completions(Shell::Bash, Some(dir.clone()), false).unwrap();
        let script = fs::read_to_string(dir.join("pnlcalc.bash")).unwrap();
        assert!(script.contains("--buy"));
        assert!(script.contains("--link"));
        fs::remove_dir_all(&dir).unwrap();
    }
}
