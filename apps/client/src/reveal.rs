//! Entrance animations and decorative particles for page sections.
//!
//! Every animated section owns a [`VisibilityTracker`] with a 0.1
//! threshold; its children resolve to their hidden or shown keyframe from
//! that one latch, with staggered delays.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::ClientError;
use crate::nav::SectionId;
use crate::visibility::{ElementId, Observer, ObserverOptions, VisibilityTracker};

pub const SECTION_THRESHOLD: f64 = 0.1;

/// Visual state an element animates between.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    pub opacity: f64,
    /// Vertical offset in px.
    pub y: f64,
    pub scale: f64,
}

impl Keyframe {
    pub const REST: Keyframe = Keyframe {
        opacity: 1.0,
        y: 0.0,
        scale: 1.0,
    };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reveal {
    pub hidden: Keyframe,
    pub shown: Keyframe,
    pub duration: Duration,
    pub delay: Duration,
}

impl Reveal {
    /// Fade in while rising `distance` px.
    pub fn fade_up(distance: f64) -> Self {
        Reveal {
            hidden: Keyframe {
                opacity: 0.0,
                y: distance,
                scale: 1.0,
            },
            shown: Keyframe::REST,
            duration: Duration::from_millis(500),
            delay: Duration::ZERO,
        }
    }

    /// Fade in while growing from `from_scale`.
    pub fn pop_in(from_scale: f64) -> Self {
        Reveal {
            hidden: Keyframe {
                opacity: 0.0,
                y: 0.0,
                scale: from_scale,
            },
            shown: Keyframe::REST,
            duration: Duration::from_millis(500),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Delay for the `index`th child of a staggered list.
    pub fn staggered(self, step: Duration, index: usize) -> Self {
        let delay = self.delay + step * index as u32;
        self.with_delay(delay)
    }

    pub fn target(&self, in_view: bool) -> Keyframe {
        if in_view {
            self.shown
        } else {
            self.hidden
        }
    }
}

/// A skill bar fills from zero to its percentage once in view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkillBarAnimation {
    pub percentage: u8,
    pub duration: Duration,
    pub delay: Duration,
}

impl SkillBarAnimation {
    pub fn new(percentage: u8, delay: Duration) -> Self {
        SkillBarAnimation {
            percentage: percentage.min(100),
            duration: Duration::from_millis(1200),
            delay,
        }
    }

    /// Bar width in percent of the track.
    pub fn width(&self, in_view: bool) -> f64 {
        if in_view {
            f64::from(self.percentage)
        } else {
            0.0
        }
    }
}

/// Opacity keyframes of a rising bubble over one loop.
pub const BUBBLE_OPACITY: [f64; 4] = [0.3, 0.5, 0.2, 0.0];
/// Scale keyframes of a rising bubble over one loop.
pub const BUBBLE_SCALE: [f64; 5] = [1.0, 1.2, 0.8, 1.1, 0.0];
/// Distance a bubble rises per loop, in px.
pub const BUBBLE_RISE: f64 = 1000.0;

/// One decorative bubble. Bubbles loop forever from below the section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bubble {
    /// Diameter in px, in `[5, 20)`.
    pub size_px: u32,
    /// Horizontal position in percent, in `[0, 100)`.
    pub left_pct: u32,
    pub delay: Duration,
    pub duration: Duration,
}

impl Bubble {
    fn random(rng: &mut impl Rng) -> Self {
        Bubble {
            size_px: rng.random_range(5..20),
            left_pct: rng.random_range(0..100),
            delay: Duration::from_secs_f64(rng.random_range(0.0..5.0)),
            duration: Duration::from_secs_f64(rng.random_range(15.0..25.0)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParticleField {
    pub bubbles: Vec<Bubble>,
}

impl ParticleField {
    pub fn generate(count: usize, rng: &mut impl Rng) -> Self {
        ParticleField {
            bubbles: (0..count).map(|_| Bubble::random(rng)).collect(),
        }
    }

    pub fn random(count: usize) -> Self {
        Self::generate(count, &mut rand::rng())
    }

    /// Reproducible field, for snapshots and tests.
    pub fn seeded(count: usize, seed: u64) -> Self {
        Self::generate(count, &mut StdRng::seed_from_u64(seed))
    }
}

/// Number of background bubbles a section renders.
pub fn bubble_count(section: SectionId) -> usize {
    match section {
        SectionId::Skills => 10,
        SectionId::Experience | SectionId::Projects => 7,
        _ => 0,
    }
}

/// A mounted page section: its visibility latch plus background particles.
#[derive(Debug)]
pub struct AnimatedSection {
    pub id: SectionId,
    pub particles: ParticleField,
    tracker: VisibilityTracker,
}

impl AnimatedSection {
    pub fn mount(
        id: SectionId,
        observer: Arc<dyn Observer>,
        element: Option<ElementId>,
    ) -> Result<Self, ClientError> {
        let tracker = VisibilityTracker::track(
            observer,
            element,
            ObserverOptions::with_threshold(SECTION_THRESHOLD),
        )?;
        Ok(AnimatedSection {
            id,
            particles: ParticleField::random(bubble_count(id)),
            tracker,
        })
    }

    pub fn in_view(&self) -> bool {
        self.tracker.is_visible()
    }

    pub fn heading(&self) -> Keyframe {
        Reveal::fade_up(20.0).target(self.in_view())
    }

    /// Keyframe for the `index`th card of a staggered grid.
    pub fn card(&self, index: usize) -> (Keyframe, Duration) {
        let reveal = Reveal::fade_up(20.0).staggered(Duration::from_millis(100), index);
        (reveal.target(self.in_view()), reveal.delay)
    }
}
