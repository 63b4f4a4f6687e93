use clap::ValueEnum;
use colored::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Icon of the toggle control: offers the mode you would switch to.
    #[must_use]
    pub const fn toggle_icon(self) -> &'static str {
        match self {
            Self::Light => "☾",
            Self::Dark => "☀",
        }
    }

    #[must_use]
    pub const fn palette(self) -> Palette {
        match self {
            Self::Light => LIGHT,
            Self::Dark => DARK,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Colors applied to every rendered surface for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub surface: &'static str,
    pub text: &'static str,
    pub muted: &'static str,
    pub input: &'static str,
    pub border: &'static str,
    pub accent: &'static str,
    pub gain: &'static str,
    pub loss: &'static str,
    pub term_heading: Color,
    pub term_text: Color,
}

const LIGHT: Palette = Palette {
    background: "#f3f4f6",
    surface: "#ffffff",
    text: "#000000",
    muted: "#6b7280",
    input: "#f3f4f6",
    border: "#15803d",
    accent: "#22c55e",
    gain: "#22c55e",
    loss: "#ef4444",
    term_heading: Color::BrightBlack,
    term_text: Color::Black,
};

const DARK: Palette = Palette {
    background: "#1f2937",
    surface: "#111827",
    text: "#ffffff",
    muted: "#ffffff",
    input: "#1f2937",
    border: "#15803d",
    accent: "#22c55e",
    gain: "#22c55e",
    loss: "#ef4444",
    term_heading: Color::BrightWhite,
    term_text: Color::White,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_light() {
        assert_eq!(Theme::default(), Theme::Light);
    }

    #[test]
    fn test_toggle_is_involution() {
        for theme in [Theme::Light, Theme::Dark] {
            assert_ne!(theme.toggled(), theme);
            assert_eq!(theme.toggled().toggled(), theme);
        }
    }

    #[test]
    fn test_palettes_differ_on_surfaces() {
        let light = Theme::Light.palette();
        let dark = Theme::Dark.palette();
        assert_ne!(light.background, dark.background);
        assert_ne!(light.surface, dark.surface);
        assert_ne!(light.text, dark.text);
        assert_eq!(light.gain, dark.gain);
        assert_eq!(light.loss, dark.loss);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        let parsed: Theme = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(parsed, Theme::Light);
    }
}
