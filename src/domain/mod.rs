//! Domain layer for dirrank.
//!
//! This module contains the core record type and the pure query-matching rule,
//! independent of persistence or filesystem concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`entry`]: Tracked directory record
//! - [`matcher`]: Query matching against stored paths

pub mod entry;
pub mod error;
pub mod matcher;

pub use entry::{Entry, MIN_SCORE};
pub use error::{DirRankError, Result};
pub use matcher::Matcher;
