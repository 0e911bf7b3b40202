//! Time utilities and abstractions
//!
//! - **[`timer`]**: one-shot timers with cancellation support
//!
//! ## Usage
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use rota_common::time::timeout;
//!
//! #[tokio::main]
//! async fn main() {
//!     let handle = timeout(Duration::from_secs(5), || {
//!         tracing::info!("expired");
//!     });
//!     handle.cancel();
//! }
//! ```

pub mod timer;

// Re-export commonly used items
pub use timer::{timeout, TimerHandle};
