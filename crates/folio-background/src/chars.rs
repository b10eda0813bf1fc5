//! Character constants for background animations.

/// Particle glyphs, smallest to largest.
pub const PARTICLE_CHARS: &[char] = &['·', '•', '●'];

/// Glyph drawn where circuit-grid lines cross.
pub const GRID_CHAR: char = '┼';

/// Characters used for the faint binary matrix.
pub const BINARY_CHARS: &[char] = &['0', '1'];
