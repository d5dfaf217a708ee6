use std::time::Duration;
use tokio::time::{Instant, sleep};

/// Poll `cond` until it holds or `timeout` elapses. Returns the last result.
pub async fn wait_until(timeout: Duration, mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;

    loop {
        if cond() {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        sleep(Duration::from_millis(20)).await;
    }
}
