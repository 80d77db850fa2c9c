//! FRP Common Library
//!
//! Shared constants, configuration loading and the fixed-layout result
//! record used by every crate of the FRP pipe-inspection workspace.
//!
//! # Module Structure
//!
//! - [`consts`] - Defaults and parameter bounds
//! - [`config`] - Configuration loading traits and types
//! - [`scan`] - Scan configuration (sampling, tolerances) and the ABI result record
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust,no_run
//! use frp_common::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config/frp.toml")).unwrap();
//! println!("expected samples per rev: {}", config.sampling.samples_per_rev);
//! ```

pub mod config;
pub mod consts;
pub mod prelude;
pub mod scan;
