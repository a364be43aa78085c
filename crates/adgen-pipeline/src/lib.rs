//! Staged orchestrator that turns a product image into a video ad.
//!
//! A run moves through analysis, asset generation and video synthesis, then
//! verifies the finished video can be downloaded:
//!
//! ```text
//! Analyzing -> GeneratingAsset -> GeneratingVideo -> Complete
//! ```
//!
//! Any failure ends the run with a single `Failed` event and a classified
//! [`PipelineError`]; cancellation ends it with `Cancelled`.

pub mod cancel;
pub mod classifier;
pub mod config;
pub mod controller;
pub mod credential;
pub mod error;
pub mod locator;
pub mod logging;
pub mod metrics;
pub mod notify;
pub mod poller;
pub mod progress;
pub mod verifier;

#[cfg(test)]
pub(crate) mod testing;

pub use cancel::{CancelHandle, CancelToken};
pub use classifier::{classify, classify_message};
pub use config::{PipelineConfig, PollConfig};
pub use controller::Pipeline;
pub use credential::{resolve_credential, validate_credential};
pub use error::{ErrorKind, PipelineError, RunResult};
pub use locator::with_credential;
pub use logging::RunLogger;
pub use notify::mailto_link;
pub use poller::OperationPoller;
pub use progress::ProgressSender;
pub use verifier::verify_access;
