//! Retry execution engine with policy-based configuration
//!
//! # Features
//!
//! - Retry strategies: None, Fixed, Exponential, Linear backoff
//! - Observable retry attempts via the `RetryObserver` trait
//! - Built-in `TracingObserver` for logging
//! - Cancellation of in-flight attempts and backoff sleeps through a
//!   `CancellationToken`
//!
//! # Example
//!
//! ```rust,no_run
//! use tokio_util::sync::CancellationToken;
//! use vaultlift_core::retry::{RetryError, RetryExecutor, RetryPolicy, TracingObserver};
//!
//! async fn example() -> Result<String, RetryError<std::io::Error>> {
//!     let cancel = CancellationToken::new();
//!     RetryExecutor::new(RetryPolicy::default())
//!         .with_observer(TracingObserver::new("upload"))
//!         .execute(|| async { Ok("done".to_string()) }, &cancel)
//!         .await
//! }
//! ```

mod error;
mod executor;
mod observer;
mod strategies;

pub use error::RetryError;
pub use executor::RetryExecutor;
pub use observer::{NoOpObserver, RetryObserver, RetryStats, StatsObserver, TracingObserver};
pub use strategies::{calculate_delay, RetryPolicy, RetryStrategy};
