//! Background animation building blocks.

pub mod backdrop;
pub mod code_lines;
pub mod particles;
