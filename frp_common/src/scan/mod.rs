//! Scan-level shared types.
//!
//! - [`config`] - Sampling parameters and acceptance tolerances
//! - [`result`] - The measurement result, its fixed-layout ABI twin and
//!   tolerance violation flags

pub mod config;
pub mod result;
