mod format_int;
mod parse_rle;
pub mod patterns;

pub use format_int::NiceInt;
pub use parse_rle::{parse_rle, MAX_PATTERN_AREA};
pub use patterns::{Pattern, PATTERNS};
