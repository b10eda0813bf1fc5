//! Display preferences: clock format, colour theme and animation speed.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Time format for the clock line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFormat {
    #[default]
    #[serde(rename = "24h")]
    TwentyFourHour,
    #[serde(rename = "12h")]
    TwelveHour,
}

impl TimeFormat {
    /// Toggle between 12-hour and 24-hour format.
    pub fn toggle(&self) -> Self {
        match self {
            TimeFormat::TwentyFourHour => TimeFormat::TwelveHour,
            TimeFormat::TwelveHour => TimeFormat::TwentyFourHour,
        }
    }

    /// chrono format string for this format.
    pub fn pattern(self) -> &'static str {
        match self {
            TimeFormat::TwentyFourHour => "%H:%M:%S",
            TimeFormat::TwelveHour => "%I:%M:%S %p",
        }
    }
}

/// Accent colour theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    Cyan,
    #[default]
    Green,
    White,
    Magenta,
    Yellow,
    Red,
    Blue,
}

impl ColorTheme {
    /// Cycle to the next color theme.
    pub fn next(&self) -> Self {
        match self {
            ColorTheme::Green => ColorTheme::Cyan,
            ColorTheme::Cyan => ColorTheme::Magenta,
            ColorTheme::Magenta => ColorTheme::Yellow,
            ColorTheme::Yellow => ColorTheme::Red,
            ColorTheme::Red => ColorTheme::Blue,
            ColorTheme::Blue => ColorTheme::White,
            ColorTheme::White => ColorTheme::Green,
        }
    }

    /// Convert theme to Ratatui Color.
    pub fn color(self) -> Color {
        match self {
            ColorTheme::Cyan => Color::Cyan,
            ColorTheme::Green => Color::Green,
            ColorTheme::White => Color::White,
            ColorTheme::Magenta => Color::Magenta,
            ColorTheme::Yellow => Color::Yellow,
            ColorTheme::Red => Color::Red,
            ColorTheme::Blue => Color::Blue,
        }
    }

    /// Hue in degrees used when shading animated elements.
    pub fn hue(self) -> f32 {
        match self {
            ColorTheme::Cyan => 180.0,
            ColorTheme::Green => 120.0,
            ColorTheme::White => 0.0,
            ColorTheme::Magenta => 300.0,
            ColorTheme::Yellow => 55.0,
            ColorTheme::Red => 0.0,
            ColorTheme::Blue => 220.0,
        }
    }

    /// Saturation used when shading animated elements.
    pub fn saturation(self) -> f32 {
        match self {
            ColorTheme::White => 0.0,
            _ => 0.9,
        }
    }
}

/// Global pace of the background animation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl AnimationSpeed {
    /// Multiplier applied to the background tick period.
    pub fn tick_scale(self) -> f32 {
        match self {
            AnimationSpeed::Slow => 2.0,
            AnimationSpeed::Medium => 1.0,
            AnimationSpeed::Fast => 0.5,
        }
    }

    /// How long a binary-matrix frame stays on screen.
    pub fn binary_refresh_period_ms(self) -> u64 {
        match self {
            AnimationSpeed::Slow => 6000,
            AnimationSpeed::Medium => 3000,
            AnimationSpeed::Fast => 1500,
        }
    }
}
