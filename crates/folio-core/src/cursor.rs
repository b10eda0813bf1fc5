//! Custom pointer state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Visual mode of the custom pointer indicator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CursorVariant {
    #[default]
    Default,
    /// Over an interactive element (links, nav entries, cards).
    Hover,
    /// Over body text.
    TextFocus,
    /// Over code-like content (terminal panel, contact block).
    CodeFocus,
}

impl CursorVariant {
    pub const ALL: [CursorVariant; 4] = [
        CursorVariant::Default,
        CursorVariant::Hover,
        CursorVariant::TextFocus,
        CursorVariant::CodeFocus,
    ];

    /// Canonical name of the variant.
    pub fn name(self) -> &'static str {
        match self {
            CursorVariant::Default => "default",
            CursorVariant::Hover => "hover",
            CursorVariant::TextFocus => "text-focus",
            CursorVariant::CodeFocus => "code-focus",
        }
    }

    /// Lenient lookup: unknown names fall back to [`CursorVariant::Default`].
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }
}

impl fmt::Display for CursorVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a cursor variant name is not one of the four known ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCursorVariantError {
    name: String,
}

impl ParseCursorVariantError {
    /// The rejected input.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ParseCursorVariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown cursor variant {:?} (expected default, hover, text or code)",
            self.name
        )
    }
}

impl std::error::Error for ParseCursorVariantError {}

impl FromStr for CursorVariant {
    type Err = ParseCursorVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(CursorVariant::Default),
            "hover" => Ok(CursorVariant::Hover),
            "text" | "text-focus" => Ok(CursorVariant::TextFocus),
            "code" | "code-focus" => Ok(CursorVariant::CodeFocus),
            _ => Err(ParseCursorVariantError { name: s.to_string() }),
        }
    }
}

/// Latest pointer position and visual mode.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CursorState {
    /// Horizontal position in viewport coordinates.
    pub x: f32,
    /// Vertical position in viewport coordinates.
    pub y: f32,
    pub variant: CursorVariant,
}
