use std::thread;
use std::time::{Duration, Instant};

use bankdash_client::refresh::RefreshPolicy;
use bankdash_client::{ClientError, ClientResult};

/// Renders once, then again every `policy.interval` until `max_refreshes`
/// renders have happened or the session has been idle past the timeout.
///
/// A watch session has no input of its own, so the last activity is `started`.
pub fn run_watch<R, S>(
    policy: RefreshPolicy,
    max_refreshes: Option<u32>,
    started: Instant,
    mut render: R,
    mut sleep: S,
) -> ClientResult<u32>
where
    R: FnMut(u32) -> ClientResult<()>,
    S: FnMut(Duration),
{
    let mut rendered = 0u32;
    loop {
        render(rendered + 1)?;
        rendered += 1;
        if max_refreshes.is_some_and(|limit| rendered >= limit) {
            tracing::debug!(rendered, "watch reached refresh limit");
            break;
        }

        sleep(policy.interval);
        if !policy.should_refresh(started.elapsed()) {
            tracing::info!(rendered, "watch stopped after idle timeout");
            break;
        }
    }
    Ok(rendered)
}

pub fn sleep_for(interval: Duration) {
    thread::sleep(interval);
}

pub fn output_error(error: std::io::Error) -> ClientError {
    ClientError::internal_output(&error.to_string())
}
