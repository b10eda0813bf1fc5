//! Animated background for the folio terminal portfolio.
//!
//! The [`Field`] holds the stateful decorations (a fixed set of wrapping
//! particles and a fixed set of drifting code snippets) and advances them one
//! tick at a time. [`BackgroundLayer`] draws an immutable view of that state,
//! over a stateless circuit-grid backdrop, into a ratatui buffer.

mod animations;
mod chars;
mod color;
mod field;
mod layer;

pub use animations::code_lines::{FloatingLine, LINE_RESET_Y};
pub use animations::particles::Particle;
pub use color::{hsl_to_rgb, shade};
pub use field::{Field, FieldSettings};
pub use layer::{BackgroundLayer, CellSize};
