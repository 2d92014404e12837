// src/engine/pacing.rs

//! Inter-cycle pacing: one timed wait with periodic progress logging.

use std::time::Duration;

use tokio::time::{self, Instant};
use tracing::info;

/// How often the remaining wait time is logged.
pub const PROGRESS_INTERVAL: Duration = Duration::from_secs(60);

/// Sleep for `total`, logging the remaining time every `progress_every`.
///
/// This is a single deadline-based wait, not a decrementing busy loop; the
/// ticker only produces the progress log lines.
pub async fn sleep_with_progress(total: Duration, progress_every: Duration) {
    let deadline = Instant::now() + total;
    let sleep = time::sleep_until(deadline);
    tokio::pin!(sleep);

    let mut ticker = time::interval(progress_every);
    // The first tick of an interval completes immediately; consume it.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = &mut sleep => break,
            _ = ticker.tick() => {
                let remaining = deadline.saturating_duration_since(Instant::now());
                info!("restarting loop in {}", format_mm_ss(remaining));
            }
        }
    }
}

/// Format a duration as `MM:SS`.
pub fn format_mm_ss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
