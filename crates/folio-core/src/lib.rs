//! Core types shared by the folio crates.

mod cursor;
pub mod defaults;
mod theme;
mod viewport;

pub use cursor::{CursorState, CursorVariant, ParseCursorVariantError};
pub use theme::{AnimationSpeed, ColorTheme, TimeFormat};
pub use viewport::Viewport;
