use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

/// Process-wide minimum spacing between calls to the places service.
///
/// Search, details and photo downloads share one pacer so the provider sees
/// at most one request per interval regardless of which call it is.
pub struct Pacer {
    last_request: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl Pacer {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Mutex::new(None),
            min_interval,
        }
    }

    /// Wait until the interval since the previous call has elapsed
    pub async fn wait(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(last_time) = *last {
            let elapsed = last_time.elapsed();
            if elapsed < self.min_interval {
                let wait_time = self.min_interval - elapsed;
                debug!("Pacing: waiting {:?}", wait_time);
                tokio::time::sleep(wait_time).await;
            }
        }

        *last = Some(Instant::now());
    }
}
