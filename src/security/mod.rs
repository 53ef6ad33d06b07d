//! Text hygiene applied before anything is stored.

mod sanitizer;

pub use sanitizer::{Sanitizer, TextSanitizer};
