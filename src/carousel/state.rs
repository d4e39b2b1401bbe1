//! Carousel state machine.
//!
//! `Loading -> Empty | Ready`. A ready carousel holds a non-empty, ordered
//! snapshot of active slides plus the current index and autoplay flag.

use serde::Serialize;

use crate::errors::AppError;
use crate::models::Slide;

/// Result of moving to another slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub index: usize,
    /// Image of the newly selected slide, worth fetching ahead of display.
    pub prefetch: Option<String>,
}

/// Non-empty, ordered slide snapshot with a cursor.
#[derive(Debug, Clone)]
pub struct Deck {
    slides: Vec<Slide>,
    current: usize,
    autoplay: bool,
}

impl Deck {
    /// Keep active slides in display order. `None` when nothing is left.
    pub fn new(mut slides: Vec<Slide>) -> Option<Self> {
        slides.retain(|s| s.is_active);
        if slides.is_empty() {
            return None;
        }
        slides.sort_by(|a, b| a.order_key().cmp(&b.order_key()));
        Some(Self {
            slides,
            current: 0,
            autoplay: true,
        })
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn current_slide(&self) -> &Slide {
        &self.slides[self.current]
    }

    pub fn autoplay(&self) -> bool {
        self.autoplay
    }

    pub fn advance(&mut self) -> Transition {
        self.select((self.current + 1) % self.slides.len())
    }

    pub fn retreat(&mut self) -> Transition {
        let index = if self.current == 0 {
            self.slides.len() - 1
        } else {
            self.current - 1
        };
        self.select(index)
    }

    /// Jump straight to `index`; out-of-range indices are ignored.
    pub fn jump_to(&mut self, index: usize) -> Option<Transition> {
        (index < self.slides.len()).then(|| self.select(index))
    }

    /// Timer-driven advance. Does nothing with autoplay off or a single slide.
    pub fn tick(&mut self) -> Option<Transition> {
        (self.autoplay && self.slides.len() > 1).then(|| self.advance())
    }

    pub fn toggle_autoplay(&mut self) -> bool {
        self.autoplay = !self.autoplay;
        self.autoplay
    }

    pub fn set_autoplay(&mut self, enabled: bool) {
        self.autoplay = enabled;
    }

    fn select(&mut self, index: usize) -> Transition {
        self.current = index;
        let image = &self.slides[index].image_url;
        Transition {
            index,
            prefetch: (!image.is_empty()).then(|| image.clone()),
        }
    }
}

/// Lifecycle of one mounted carousel.
#[derive(Debug, Clone, Default)]
pub enum CarouselState {
    #[default]
    Loading,
    Empty,
    Ready(Deck),
}

impl CarouselState {
    /// Settle the fetch result. Failures degrade to `Empty`.
    pub fn from_fetch(result: Result<Vec<Slide>, AppError>) -> Self {
        match result {
            Ok(slides) => Deck::new(slides).map_or(CarouselState::Empty, CarouselState::Ready),
            Err(e) => {
                tracing::warn!("Failed to fetch slides, showing fallback: {}", e);
                CarouselState::Empty
            }
        }
    }

    pub fn deck(&self) -> Option<&Deck> {
        match self {
            CarouselState::Ready(deck) => Some(deck),
            _ => None,
        }
    }

    pub fn deck_mut(&mut self) -> Option<&mut Deck> {
        match self {
            CarouselState::Ready(deck) => Some(deck),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> CarouselSnapshot {
        match self {
            CarouselState::Loading => CarouselSnapshot {
                phase: Phase::Loading,
                current: None,
                len: 0,
                autoplay: false,
            },
            CarouselState::Empty => CarouselSnapshot {
                phase: Phase::Empty,
                current: None,
                len: 0,
                autoplay: false,
            },
            CarouselState::Ready(deck) => CarouselSnapshot {
                phase: Phase::Ready,
                current: Some(deck.current()),
                len: deck.len(),
                autoplay: deck.autoplay(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Loading,
    Empty,
    Ready,
}

/// Copyable summary of the carousel state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselSnapshot {
    pub phase: Phase,
    pub current: Option<usize>,
    pub len: usize,
    pub autoplay: bool,
}
