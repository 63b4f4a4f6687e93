//! HTML snapshot of the widget.

use crate::form::{Field, FormFields};
use crate::formatting::{format_percent, outcome_lead};
use crate::summary::TITLE;
use crate::theme::{Palette, Theme};
use crate::view_state::ViewState;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use minify_html::Cfg;
use std::path::Path;
use tokio::fs;

pub const GAIN_IMAGE: &str = "goodstonks.jpg";
pub const LOSS_IMAGE: &str = "badstonks.png";
pub const LOGO_IMAGE: &str = "logo.png";

pub struct PageContext<'a> {
    pub(crate) state: &'a ViewState,
    pub(crate) fields: &'a FormFields,
    pub(crate) generated_at: &'a DateTime<Local>,
    pub(crate) asset_base: &'a str,
    pub(crate) links: &'a [String],
}

impl<'a> PageContext<'a> {
    #[must_use]
    pub const fn new(
        state: &'a ViewState,
        fields: &'a FormFields,
        generated_at: &'a DateTime<Local>,
        asset_base: &'a str,
    ) -> Self {
        Self {
            state,
            fields,
            generated_at,
            asset_base,
            links: &[],
        }
    }

    /// External links shown as buttons in the page header.
    #[must_use]
    pub const fn with_links(mut self, links: &'a [String]) -> Self {
        self.links = links;
        self
    }
}

/// # Errors
///
/// Fails when the file or its parent directory cannot be written.
pub async fn save_page(output_path: &Path, context: &PageContext<'_>, minify: bool) -> Result<()> {
    let html = render_page(context);
    let bytes = if minify {
        minify_page(&html)
    } else {
        html.into_bytes()
    };
    write_output_file(output_path, &bytes).await?;
    log::info!("wrote page to {}", output_path.display());
    Ok(())
}

#[must_use]
pub fn render_page(context: &PageContext<'_>) -> String {
    let theme = context.state.theme();
    let root_class = theme.is_dark().then_some("dark");
    let generated_at = context
        .generated_at
        .format("%Y-%m-%d %H:%M:%S %Z")
        .to_string();

    let markup = html! {
        (DOCTYPE)
        html lang="en" class=[root_class] {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                meta name="color-scheme" content="light dark";
                title { (TITLE) }
                style { (PreEscaped(page_style())) }
            }
            body {
                div.page {
                    header.header {
                        @if !context.links.is_empty() {
                            nav.links {
                                @for link in context.links {
                                    a.link href=(link) target="_blank" rel="noopener noreferrer" { (link_label(link)) }
                                }
                            }
                        }
                        img.logo src=(asset_url(context.asset_base, LOGO_IMAGE)) alt="Logo" width="60" height="60";
                        h1 { (TITLE) }
                        button id="theme-toggle" type="button" aria-label="Toggle dark mode" {
                            span.icon-to-dark { (Theme::Light.toggle_icon()) }
                            span.icon-to-light { (Theme::Dark.toggle_icon()) }
                        }
                    }
                    (render_form(context.fields))
                    (render_outcome(context))
                    footer.footer { "Generated " (generated_at) }
                }
                script { (PreEscaped(TOGGLE_SCRIPT)) }
            }
        }
    };
    markup.into_string()
}

/// The page is a static snapshot, so the inputs only echo the submission.
fn render_form(fields: &FormFields) -> Markup {
    html! {
        form.form {
            @for field in Field::ALL {
                div.field {
                    label for=(field.name()) { (field.label()) }
                    input id=(field.name()) name=(field.name()) type="text" value=(fields.get(field)) readonly;
                }
            }
            p.hint { "snapshot of the last calculation, run pnlcalc calc to compute another" }
        }
    }
}

fn render_outcome(context: &PageContext<'_>) -> Markup {
    let Some(result) = context.state.result() else {
        return html! {};
    };
    let (image, alt, class) = if result.is_gain() {
        (GAIN_IMAGE, "Good stocks", "gain")
    } else {
        (LOSS_IMAGE, "Bad stocks", "loss")
    };
    let src = asset_url(context.asset_base, image);

    html! {
        section.outcome {
            img src=(src) alt=(alt) width="200" height="200";
            p {
                (outcome_lead(&result.ticker)) " "
                span class=(class) { (format_percent(result.percent_change)) "%" }
            }
        }
    }
}

fn asset_url(base: &str, file: &str) -> String {
    if base.is_empty() {
        file.to_string()
    } else {
        format!("{}/{file}", base.trim_end_matches('/'))
    }
}

fn link_label(url: &str) -> &str {
    let without_scheme = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    without_scheme.trim_end_matches('/')
}

fn minify_page(html: &str) -> Vec<u8> {
    let cfg = Cfg {
        minify_css: true,
        ..Cfg::default()
    };
    minify_html::minify(html.as_bytes(), &cfg)
}

pub(crate) async fn write_output_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    fs::write(path, bytes)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;

    Ok(())
}

fn palette_vars(palette: &Palette) -> String {
    format!(
        "--bg: {}; --surface: {}; --ink: {}; --muted: {}; --input: {}; --border: {}; --accent: {}; --gain: {}; --loss: {};",
        palette.background,
        palette.surface,
        palette.text,
        palette.muted,
        palette.input,
        palette.border,
        palette.accent,
        palette.gain,
        palette.loss
    )
}

fn page_style() -> String {
    format!(
        ":root {{ color-scheme: light; {} }}\n:root.dark {{ color-scheme: dark; {} }}\n{}",
        palette_vars(&Theme::Light.palette()),
        palette_vars(&Theme::Dark.palette()),
        PAGE_STYLE
    )
}

const TOGGLE_SCRIPT: &str = r"
document.getElementById('theme-toggle').addEventListener('click', function () {
  document.documentElement.classList.toggle('dark');
});
";

const PAGE_STYLE: &str = r#"
* {
  box-sizing: border-box;
}

body {
  margin: 0;
  font-family: "Manrope", "Segoe UI", sans-serif;
  background: var(--bg);
  color: var(--ink);
  transition: background 0.5s ease-in-out, color 0.5s ease-in-out;
}

.page {
  min-height: 100vh;
  display: flex;
  flex-direction: column;
  align-items: center;
  justify-content: center;
  padding: 24px;
}

.header {
  display: flex;
  align-items: center;
  justify-content: space-between;
  gap: 24px;
  margin-bottom: 20px;
}

h1 {
  font-size: 1.5rem;
  font-weight: 700;
  color: var(--muted);
  margin: 0;
}

#theme-toggle {
  width: 64px;
  height: 64px;
  border: none;
  border-radius: 8px;
  background: var(--bg);
  color: var(--muted);
  font-size: 24px;
  cursor: pointer;
  transition: transform 0.2s ease-in-out;
}

#theme-toggle:hover {
  transform: scale(1.2);
}

.icon-to-light,
:root.dark .icon-to-dark {
  display: none;
}

:root.dark .icon-to-light {
  display: inline;
}

.form {
  padding: 24px;
  border: 2px solid var(--border);
  border-radius: 12px;
  background: var(--surface);
  color: var(--ink);
  box-shadow: 0 10px 30px rgba(0, 0, 0, 0.12);
  transition: border-color 0.5s ease-in-out, box-shadow 0.5s ease-in-out;
}

.form:hover {
  border-color: var(--accent);
  box-shadow: 0 20px 50px rgba(0, 0, 0, 0.2);
}

.field {
  margin-bottom: 16px;
}

.field label {
  display: block;
  text-align: center;
  margin-bottom: 8px;
}

.field input {
  width: 100%;
  padding: 8px 12px;
  border: none;
  border-radius: 6px;
  background: var(--input);
  color: var(--ink);
}

.hint {
  margin: 0;
  text-align: center;
  color: var(--muted);
  font-size: 13px;
}

.links {
  display: flex;
  gap: 8px;
}

.link {
  padding: 8px 12px;
  border-radius: 8px;
  color: var(--muted);
  text-decoration: none;
  transition: transform 0.2s ease-in-out;
}

.link:hover {
  transform: scale(1.2);
}

.outcome {
  margin-top: 16px;
  text-align: center;
}

.outcome img {
  display: block;
  margin: 0 auto 8px;
}

.gain {
  color: var(--gain);
}

.loss {
  color: var(--loss);
}

.footer {
  margin-top: 28px;
  color: var(--muted);
  font-size: 13px;
}
"#;
