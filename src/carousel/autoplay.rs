//! Repeating autoplay timer.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::CarouselState;

/// Default autoplay period.
pub const AUTOPLAY_INTERVAL: Duration = Duration::from_secs(5);

/// Handle to a running autoplay task. Dropping it cancels the task.
#[derive(Debug)]
pub struct AutoplayTimer {
    handle: JoinHandle<()>,
}

impl AutoplayTimer {
    /// Tick `state` every `period`, starting one period from now.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(state: Arc<Mutex<CarouselState>>, period: Duration) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let mut guard = state.lock().unwrap_or_else(PoisonError::into_inner);
                if let Some(transition) = guard.deck_mut().and_then(|deck| deck.tick()) {
                    tracing::trace!(index = transition.index, "Autoplay advanced");
                }
            }
        });

        Self { handle }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for AutoplayTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
