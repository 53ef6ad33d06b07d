//! Data models for teledigest.
//!
//! Messages as they are stored, the `{channel, text}` shape returned to digest
//! builders, keyword sets for relevance retrieval, and time windows.

mod keywords;
mod message;
mod window;

pub use keywords::{Keyword, KeywordSet};
pub use message::{
    DigestEntry, MAX_STORED_TIMESTAMP, MIN_STORED_TIMESTAMP, Message, MessageId, SaveOutcome,
    format_bound, format_timestamp, is_storable_timestamp, parse_timestamp,
};
pub use window::{TimeWindow, day_window, day_window_in, rolling_24h_window};
