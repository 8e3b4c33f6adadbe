//! Storage layer for persistent entry data.
//!
//! This module provides the storage abstraction for persisting tracked directories,
//! the frecency ranking applied at query time, and the aging policy that keeps
//! scores bounded.
//!
//! # Modules
//!
//! - `backend`: Storage trait abstraction for backend implementations
//! - `json`: JSON file-based storage implementation
//! - `frecency`: Bucketed scoring combining frequency and recency
//! - `aging`: Score decay and optional missing-path pruning

pub mod aging;
pub mod backend;
pub mod frecency;
pub mod json;

pub use aging::AgingPolicy;
pub use backend::Storage;
pub use frecency::{calculate_score, frecency, sort_by_frecency};
pub use json::JsonStorage;
