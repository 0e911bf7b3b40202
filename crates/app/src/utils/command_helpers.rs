//! Command execution helpers
//!
//! Wraps a roster operation with timing and outcome logging.

use std::future::Future;
use std::time::Instant;

use rota_domain::Result as DomainResult;

use crate::utils::logging::{error_label, log_command_execution};

/// Run `command_fn`, logging its duration and outcome under `command_name`.
///
/// # Example
///
/// ```rust,ignore
/// execute_logged("roster::generate", || ctx.store.generate_selected()).await?;
/// ```
pub async fn execute_logged<F, Fut, T>(command_name: &str, command_fn: F) -> DomainResult<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = DomainResult<T>>,
{
    let start = Instant::now();
    let result = command_fn().await;

    let error_type = result.as_ref().err().map(error_label);
    log_command_execution(command_name, start.elapsed(), result.is_ok(), error_type);

    result
}
