#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

//! # mldash
//!
//! Typed client for the ML dashboard backend, plus the `mldash` CLI built on it.
//!
//! ## Architecture
//!
//! - **[`error`]** - Error taxonomy shared by every call
//! - **[`config`]** - Base URL, timeout budgets and development proxy rules
//! - **[`client`]** - Shared transport with request and response interceptors
//! - **[`api`]** - One wrapper per backend endpoint
//! - **[`notify`]** - User-facing error notices
//! - **[`routes`]** - Static dashboard route table
//! - **[`probe`]** - Backend reachability checks
//! - **[`commands`]** - CLI command handlers
//!
//! ## Quick Start
//!
//! ```bash
//! mldash data load-default
//! mldash ml train --model-type random_forest --target yield_strength
//! mldash reports generate --format html
//! ```

pub mod api;
pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod notify;
pub mod probe;
pub mod routes;

/// Error type alias for convenience
pub use error::{ClientError, Result};

/// Configuration type alias for convenience
pub use config::Config;

/// Shared transport
pub use client::Transport;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = "mldash";
