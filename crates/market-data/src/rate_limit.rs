//! Client-side request budget for the quote provider.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Margin added to each wait so the slot is really free when we wake
const WAKE_SLACK: Duration = Duration::from_millis(50);

/// Send times of the requests still inside the trailing window
struct RequestWindow {
    sent: VecDeque<Instant>,
    capacity: usize,
    span: Duration,
}

impl RequestWindow {
    fn new(capacity: usize, span: Duration) -> Self {
        Self {
            sent: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            span,
        }
    }

    /// Claim a slot at `now`, or report how long until the oldest claim expires.
    fn try_reserve(&mut self, now: Instant) -> Result<(), Duration> {
        while self
            .sent
            .front()
            .is_some_and(|&t| now.duration_since(t) >= self.span)
        {
            self.sent.pop_front();
        }

        if self.sent.len() < self.capacity {
            self.sent.push_back(now);
            return Ok(());
        }

        let oldest = self.sent.front().copied().unwrap_or(now);
        Err((oldest + self.span).duration_since(now))
    }
}

/// Shared sliding-window limiter; clones draw from the same budget.
#[derive(Clone)]
pub(crate) struct RateLimiter {
    window: Arc<Mutex<RequestWindow>>,
}

impl RateLimiter {
    pub(crate) fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            window: Arc::new(Mutex::new(RequestWindow::new(max_requests, window))),
        }
    }

    pub(crate) fn per_minute(max_requests: usize) -> Self {
        Self::new(max_requests, Duration::from_secs(60))
    }

    /// Wait until a request may be sent and claim the slot.
    pub(crate) async fn acquire(&self) {
        loop {
            let wait = match self.window.lock().await.try_reserve(Instant::now()) {
                Ok(()) => return,
                Err(wait) => wait + WAKE_SLACK,
            };
            tracing::debug!("Alpha Vantage budget spent, next slot in {:.1}s", wait.as_secs_f64());
            tokio::time::sleep(wait).await;
        }
    }
}
