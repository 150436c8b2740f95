// Text module - Text layout for the error screens
//
// This module provides:
// - Word wrapping to a fixed character budget
// - Wide glyph weighting so CJK text wraps at a sensible width

pub mod wrap;

pub use wrap::{is_wide_glyph, line_weight, word_wrap, wrapped_capacity};
