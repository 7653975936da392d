//! One call per backend capability
//!
//! Every function takes the shared [`Transport`](crate::client::Transport) by
//! reference, builds the request descriptor, and returns whatever the
//! transport produced. Nothing here retries, caches, or swallows errors:
//! failures always come back as `Err`.
//!
//! ```no_run
//! use std::sync::Arc;
//! use mldash_cli::api::{self, TrainParams};
//! use mldash_cli::client::Transport;
//! use mldash_cli::notify::ConsoleNotifier;
//! use mldash_cli::Config;
//!
//! # async fn run() -> mldash_cli::Result<()> {
//! let transport = Transport::from_config(&Config::default(), Arc::new(ConsoleNotifier))?;
//! api::load_default_data(&transport).await?;
//! let params = TrainParams::new("random_forest", vec!["tensile_strength".into()]);
//! let trained = api::train_model(&transport, &params).await?;
//! println!("{:?}", trained.get("model_id"));
//! # Ok(())
//! # }
//! ```

pub mod data;
pub mod endpoints;
pub mod ml;
pub mod models;
pub mod params;
pub mod reports;
pub mod system;
pub mod types;
pub mod visualization;

pub use data::*;
pub use ml::*;
pub use models::*;
pub use params::*;
pub use reports::*;
pub use system::*;
pub use types::*;
pub use visualization::*;

/// Join `base` and percent-encoded path segments
pub(crate) fn path_with(base: &str, segments: &[&str]) -> String {
    let mut path = base.to_string();
    for segment in segments {
        path.push('/');
        path.push_str(&urlencoding::encode(segment));
    }
    path
}
