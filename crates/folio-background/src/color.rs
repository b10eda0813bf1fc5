//! Color utility functions for background animations.

use folio_core::ColorTheme;
use ratatui::style::Color;

/// Shade the theme accent by an element opacity (0.0-1.0).
///
/// Terminals have no alpha channel, so opacity is mapped to lightness on a
/// dark background: faint elements come out close to black.
pub fn shade(theme: ColorTheme, opacity: f32) -> Color {
    let opacity = opacity.clamp(0.0, 1.0);
    let lightness = 0.08 + opacity * 0.55;
    hsl_to_rgb(theme.hue(), theme.saturation(), lightness)
}

/// Convert HSL to RGB color.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Color {
    if s == 0.0 {
        let v = (l * 255.0) as u8;
        return Color::Rgb(v, v, v);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let h = h.rem_euclid(360.0) / 360.0;

    let r = hue_to_rgb(p, q, h + 1.0 / 3.0);
    let g = hue_to_rgb(p, q, h);
    let b = hue_to_rgb(p, q, h - 1.0 / 3.0);

    Color::Rgb((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn green_channel(color: Color) -> u8 {
        match color {
            Color::Rgb(_, g, _) => g,
            other => panic!("expected rgb, got {other:?}"),
        }
    }

    #[test]
    fn test_grayscale_when_unsaturated() {
        assert_eq!(hsl_to_rgb(120.0, 0.0, 0.5), Color::Rgb(127, 127, 127));
    }

    #[test]
    fn test_pure_green() {
        assert_eq!(hsl_to_rgb(120.0, 1.0, 0.5), Color::Rgb(0, 255, 0));
    }

    #[test]
    fn test_shade_brightens_with_opacity() {
        let faint = green_channel(shade(ColorTheme::Green, 0.1));
        let bright = green_channel(shade(ColorTheme::Green, 0.7));
        assert!(bright > faint);
    }
}
