use crate::cli::{Cli, Commands};
use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use pnlcalc::page::{PageContext, save_page};
use pnlcalc::session::Session;
use pnlcalc::summary::render_result;
use pnlcalc::{FormFields, Theme, ViewState};
use std::io::{self, Write};
use std::path::PathBuf;

mod cli;

struct CalcArgs {
    fields: FormFields,
    json: bool,
    save_html: Option<PathBuf>,
    minify: bool,
    asset_base: String,
    links: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    colored::control::set_override(!cli.no_color);
    log::debug!("command line: {cli:?}");

    match cli.command {
        None | Some(Commands::Form) => run_form(cli.theme),
        Some(Commands::Calc {
            ticker,
            buy_price,
            sell_price,
            json,
            save_html,
            minify,
            asset_base,
            links,
        }) => {
            let args = CalcArgs {
                fields: FormFields::new(ticker, buy_price, sell_price),
                json,
                save_html,
                minify,
                asset_base,
                links,
            };
            run_calc(cli.theme, args).await
        }
        Some(Commands::Completions {
            shell,
            output_dir,
            install,
        }) => crate::cli::generate_completions(shell, output_dir, install),
    }
}

fn run_form(theme: Theme) -> Result<()> {
    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    Session::new(stdin, stdout, theme).run()
}

async fn run_calc(theme: Theme, args: CalcArgs) -> Result<()> {
    let state = {
        let mut stdout = io::stdout().lock();
        write_calc(theme, &args.fields, args.json, &mut stdout)?
    };

    if let Some(path) = args.save_html.as_ref() {
        let generated_at = Local::now();
        let context = PageContext::new(&state, &args.fields, &generated_at, &args.asset_base)
            .with_links(&args.links);
        save_page(path, &context, args.minify).await?;
        if !args.json {
            println!("HTML snapshot {}", path.display());
        }
    }

    Ok(())
}

/// One submission: the outcome view, or the view state as JSON, goes to `out`.
fn write_calc<W: Write>(
    theme: Theme,
    fields: &FormFields,
    json: bool,
    out: &mut W,
) -> Result<ViewState> {
    let mut state = ViewState::new(theme);
    let result = state
        .submit(fields)
        .context("cannot calculate profit/loss")?;

    if json {
        let json =
            serde_json::to_string_pretty(&state).context("failed to serialize view state")?;
        writeln!(out, "{json}").context("failed to write output")?;
    } else {
        let view = render_result(result, theme);
        write!(out, "{view}").context("failed to write output")?;
    }
    out.flush().context("failed to flush output")?;

    Ok(state)
}
