//! Async test helpers

use std::time::Duration;
use tokio::sync::watch;
use tokio::time::timeout;
use tracing_subscriber::EnvFilter;

/// How long [`wait_for`] polls before giving up.
pub const WAIT_DEADLINE: Duration = Duration::from_secs(2);

/// Await the first observed value satisfying `pred`, panicking after
/// [`WAIT_DEADLINE`].
pub async fn wait_for<T, F>(rx: &mut watch::Receiver<T>, mut pred: F) -> T
where
    T: Clone,
    F: FnMut(&T) -> bool,
{
    timeout(WAIT_DEADLINE, async {
        loop {
            {
                let current = rx.borrow_and_update();
                if pred(&current) {
                    return T::clone(&current);
                }
            }
            rx.changed().await.expect("watched source alive");
        }
    })
    .await
    .expect("condition within deadline")
}

/// Install a fmt subscriber honoring `RUST_LOG`, once per process.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
