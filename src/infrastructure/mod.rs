//! Infrastructure layer for filesystem and environment interactions.
//!
//! This module provides path handling: platform data/config locations, tilde
//! expansion for the front end, path normalization, and existence checks.

pub mod paths;

pub use paths::{absolutize, default_config_file, expand_tilde, get_data_dir, path_exists};
