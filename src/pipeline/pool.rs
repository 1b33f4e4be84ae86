//! Bounded units of blocking work.
use std::time::Duration;

use log::warn;
use tokio_util::sync::CancellationToken;

use crate::error::Error;

/// Run a blocking unit of work on the blocking pool.
///
/// The unit receives its own token. When `timeout` elapses the token is cancelled
/// and [Error::Timeout] is returned right away, the detached unit stops at its next check.
/// A panicking unit yields [Error::Join].
pub async fn run_unit<T, F>(
    name: &str,
    work: F,
    timeout: Option<Duration>,
    token: CancellationToken,
) -> Result<T, Error>
where
    T: Send + 'static,
    F: FnOnce(CancellationToken) -> Result<T, Error> + Send + 'static,
{
    if token.is_cancelled() {
        return Err(Error::Cancelled);
    }

    let unit_token = token.clone();
    let handle = tokio::task::spawn_blocking(move || work(unit_token));

    let joined = match timeout {
        Some(duration) => match tokio::time::timeout(duration, handle).await {
            Ok(joined) => joined,
            Err(_) => {
                warn!("[{}] timed out after {:?}", name, duration);
                token.cancel();
                return Err(Error::Timeout);
            }
        },
        None => handle.await,
    };

    joined?
}
