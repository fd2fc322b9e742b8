//! Themes and the two-colour palettes they select.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An sRGB colour with a straight (non-premultiplied) alpha in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Same colour, different alpha.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Whether both colours share the same RGB channels, ignoring alpha.
    pub fn same_rgb(&self, other: &Rgba) -> bool {
        self.r == other.r && self.g == other.g && self.b == other.b
    }
}

/// Colour scheme supplied by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn palette(self) -> Palette {
        Palette::for_theme(self)
    }

    /// Page background the field sits on (white / slate-950).
    pub fn backdrop(self) -> Rgba {
        match self {
            Theme::Light => Rgba::rgb(255, 255, 255),
            Theme::Dark => Rgba::rgb(2, 6, 23),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme `{0}`, expected `light` or `dark`")]
pub struct ParseThemeError(String);

impl FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(ParseThemeError(s.to_string())),
        }
    }
}

/// Accent + glow colour pair.
///
/// `accent` paints link lines and particle cores, `glow` is the centre
/// colour of each particle's radial gradient. Every colour the simulator
/// hands to a surface is one of these two, possibly with another alpha.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub accent: Rgba,
    pub glow: Rgba,
}

impl Palette {
    /// Sky-500.
    pub const LIGHT: Palette = Palette {
        accent: Rgba::rgb(14, 165, 233),
        glow: Rgba::rgb(14, 165, 233).with_alpha(0.8),
    };

    /// Sky-400.
    pub const DARK: Palette = Palette {
        accent: Rgba::rgb(56, 189, 248),
        glow: Rgba::rgb(56, 189, 248).with_alpha(0.8),
    };

    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self::LIGHT,
            Theme::Dark => Self::DARK,
        }
    }

    /// Whether `color` is drawn from this palette (any alpha).
    pub fn contains(&self, color: &Rgba) -> bool {
        self.accent.same_rgb(color) || self.glow.same_rgb(color)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::for_theme(Theme::default())
    }
}
