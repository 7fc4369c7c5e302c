//! The `exports` field: typed representation and resolution.
//!
//! [`Exports`] mirrors the recursive union the descriptor declares. The
//! resolver answers the consumer-side question "which file does
//! `pkg/subpath` load under these conditions", which the descriptor itself
//! never executes.

mod entry;
mod resolve;

pub use entry::{Exports, MapKind};
pub use resolve::{resolve, Conditions, ExportsError, ExportsResult, Resolution};
