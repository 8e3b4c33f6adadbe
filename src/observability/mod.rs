//! Tracing setup for the command-line front end.
//!
//! The library only emits `tracing` events and spans; it never installs a
//! subscriber itself. Binaries call [`init_tracing`] once at startup.
//!
//! # Configuration
//!
//! Trace level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"warn"`
//!
//! # Usage
//!
//! ```rust
//! use dirrank::observability::init_tracing;
//! use dirrank::Config;
//!
//! let config = Config::default();
//! init_tracing(&config);
//!
//! tracing::debug!("tracing initialized");
//! ```

mod init;

pub use init::init_tracing;
