//! Homepage slide carousel.
//!
//! A [`Carousel`] fetches the active slides once on mount, advances through
//! them on a cancellable timer, and supports manual navigation. The timer is
//! restarted whenever the slide count or the autoplay flag changes and is
//! cancelled when the carousel is dropped.

mod action;
mod autoplay;
mod state;

pub use action::*;
pub use autoplay::*;
pub use state::*;

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::db::Repository;
use crate::errors::AppError;
use crate::models::Slide;

/// Anything that can hand the carousel its active slides in display order.
pub trait SlideSource {
    fn active_slides(&self) -> impl Future<Output = Result<Vec<Slide>, AppError>> + Send;
}

impl SlideSource for Repository {
    fn active_slides(&self) -> impl Future<Output = Result<Vec<Slide>, AppError>> + Send {
        self.list_active_slides()
    }
}

/// One mounted carousel instance.
#[derive(Debug)]
pub struct Carousel {
    state: Arc<Mutex<CarouselState>>,
    period: Duration,
    timer: Option<AutoplayTimer>,
    /// `(len, autoplay)` the current timer was started for.
    timer_key: Option<(usize, bool)>,
}

impl Carousel {
    pub fn new(period: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(CarouselState::Loading)),
            period,
            timer: None,
            timer_key: None,
        }
    }

    /// Create and fetch in one go.
    pub async fn mount<S: SlideSource>(source: &S, period: Duration) -> Self {
        let mut carousel = Self::new(period);
        let result = source.active_slides().await;
        carousel.load(result);
        carousel
    }

    /// Settle the fetch result and (re)start autoplay if it applies.
    pub fn load(&mut self, result: Result<Vec<Slide>, AppError>) {
        *self.lock() = CarouselState::from_fetch(result);
        self.reconcile_timer();
    }

    pub fn snapshot(&self) -> CarouselSnapshot {
        self.lock().snapshot()
    }

    /// The slide currently on screen.
    pub fn current_slide(&self) -> Option<Slide> {
        self.lock().deck().map(|deck| deck.current_slide().clone())
    }

    pub fn next(&mut self) -> Option<Transition> {
        self.lock().deck_mut().map(Deck::advance)
    }

    pub fn previous(&mut self) -> Option<Transition> {
        self.lock().deck_mut().map(Deck::retreat)
    }

    pub fn go_to(&mut self, index: usize) -> Option<Transition> {
        self.lock().deck_mut().and_then(|deck| deck.jump_to(index))
    }

    /// Flip autoplay. Returns the new flag, or `None` when not ready.
    pub fn toggle_autoplay(&mut self) -> Option<bool> {
        let enabled = self.lock().deck_mut().map(Deck::toggle_autoplay);
        self.reconcile_timer();
        enabled
    }

    /// Resolve the call-to-action of the slide on screen.
    pub fn current_action(&self) -> SlideAction {
        self.lock()
            .deck()
            .map_or(SlideAction::None, |deck| resolve_action(deck.current_slide()))
    }

    pub fn is_autoplaying(&self) -> bool {
        self.timer.as_ref().is_some_and(|t| !t.is_finished())
    }

    fn lock(&self) -> MutexGuard<'_, CarouselState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cancel and restart the timer if its inputs changed.
    fn reconcile_timer(&mut self) {
        let key = self.lock().deck().map(|deck| (deck.len(), deck.autoplay()));
        if key == self.timer_key {
            return;
        }

        self.timer = None;
        self.timer_key = key;

        if let Some((len, true)) = key {
            if len > 1 {
                self.timer = Some(AutoplayTimer::spawn(self.state.clone(), self.period));
                tracing::debug!(len, "Autoplay started");
            }
        }
    }
}
