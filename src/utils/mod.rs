//! # Utility Modules
//!
//! Supporting utilities used around the codec.
//!
//! ## Components
//! - **Logging**: tracing-subscriber setup from `LoggingConfig`
//! - **Metrics**: Thread-safe codec traffic counters

pub mod logging;
pub mod metrics;

pub use metrics::{Metrics, MetricsSnapshot};
