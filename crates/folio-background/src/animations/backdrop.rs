//! Stateless backdrop (computed from position and time only).

use folio_core::AnimationSpeed;
use ratatui::style::Color;

use crate::chars::{BINARY_CHARS, GRID_CHAR};

/// Spacing of the circuit grid in virtual pixels.
pub const GRID_SPACING_PX: f32 = 50.0;

/// Backdrop glyph for a cell, if any.
///
/// The circuit grid wins over the binary matrix where both would draw.
pub fn render_char(
    col: u16,
    row: u16,
    cell_width: f32,
    cell_height: f32,
    elapsed_ms: u64,
    speed: AnimationSpeed,
) -> Option<(char, Color)> {
    grid_char(col, row, cell_width, cell_height)
        .or_else(|| binary_char(col, row, elapsed_ms, speed))
}

/// Grid crossing if a grid line passes through this cell on both axes.
fn grid_char(col: u16, row: u16, cell_width: f32, cell_height: f32) -> Option<(char, Color)> {
    let crosses = |index: u16, extent: f32| {
        let start = index as f32 * extent;
        let end = start + extent;
        let next_line = (start / GRID_SPACING_PX).ceil() * GRID_SPACING_PX;
        next_line < end
    };

    if crosses(col, cell_width) && crosses(row, cell_height) {
        Some((GRID_CHAR, Color::Rgb(22, 48, 22)))
    } else {
        None
    }
}

/// Sparse, very dim 0/1 digits that reshuffle every refresh period.
fn binary_char(col: u16, row: u16, elapsed_ms: u64, speed: AnimationSpeed) -> Option<(char, Color)> {
    let frame_num = elapsed_ms / speed.binary_refresh_period_ms();
    let seed = (col as usize)
        .wrapping_mul(73_856_093)
        ^ (row as usize).wrapping_mul(19_349_663)
        ^ (frame_num as usize).wrapping_mul(83_492_791);
    let seed = seed.wrapping_mul(2_654_435_761) >> 7;

    // ~6% of cells
    if seed % 100 < 6 {
        let ch = BINARY_CHARS[(seed / 100) % BINARY_CHARS.len()];
        Some((ch, Color::Rgb(18, 34, 18)))
    } else {
        None
    }
}
