//! Rendering primitives: styled strips.

pub mod strip;

pub use strip::{CellStyle, Strip, StyledCell};
