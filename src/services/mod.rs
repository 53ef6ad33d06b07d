//! Business logic services.
//!
//! Services sit on top of storage backends and expose digest-shaped requests.

mod digest;

pub use digest::{DEFAULT_MAX_DOCS, DigestService};
