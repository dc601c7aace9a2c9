//! The API workflow showcase between the skills and experience sections.
//!
//! Besides the usual reveal and bubbles it runs a [`ParticleEmitter`]: once
//! the section is in view a particle is spawned every [`SPAWN_INTERVAL`],
//! each removed [`PARTICLE_LIFETIME`] after it appeared. Time is passed in
//! explicitly as the elapsed time since mount.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::error::ClientError;
use crate::reveal::{Keyframe, ParticleField, Reveal, SECTION_THRESHOLD};
use crate::visibility::{ElementId, Observer, ObserverOptions, VisibilityTracker};

pub const SHOWCASE_BUBBLES: usize = 5;
pub const SPAWN_INTERVAL: Duration = Duration::from_millis(300);
pub const PARTICLE_LIFETIME: Duration = Duration::from_secs(6);

/// Offset a particle drifts by over its animation, in px.
pub const PARTICLE_DRIFT: (f64, f64) = (100.0, -200.0);

/// A short-lived dot drifting across the request/response diagram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub id: u64,
    /// Diameter in px, in `[3, 8)`.
    pub size_px: f64,
    /// Start position in px, x in `[100, 300)`, y in `[50, 150)`.
    pub x: f64,
    pub y: f64,
    /// Fade-and-drift animation length, in `[2, 6)` s.
    pub animation: Duration,
    pub spawned_at: Duration,
}

impl Particle {
    fn random(id: u64, spawned_at: Duration, rng: &mut impl Rng) -> Self {
        Particle {
            id,
            size_px: rng.random_range(3.0..8.0),
            x: rng.random_range(100.0..300.0),
            y: rng.random_range(50.0..150.0),
            animation: Duration::from_secs_f64(rng.random_range(2.0..6.0)),
            spawned_at,
        }
    }

    pub fn expires_at(&self) -> Duration {
        self.spawned_at + PARTICLE_LIFETIME
    }
}

/// The container particles are drawn into. Shared with the renderer.
#[derive(Debug, Default)]
pub struct ParticleLayer {
    particles: Mutex<Vec<Particle>>,
}

impl ParticleLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn particles(&self) -> Vec<Particle> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Particle>> {
        self.particles.lock().unwrap_or_else(|p| p.into_inner())
    }

    fn attach(&self, particle: Particle) {
        self.lock().push(particle);
    }

    fn detach_where(&self, mut remove: impl FnMut(&Particle) -> bool) -> usize {
        let mut particles = self.lock();
        let before = particles.len();
        particles.retain(|p| !remove(p));
        before - particles.len()
    }
}

/// Spawns particles into a [`ParticleLayer`] while active.
///
/// The emitter owns every particle it attaches: expired ones are detached on
/// [`tick`](Self::tick), and the rest when the emitter is dropped.
pub struct ParticleEmitter {
    layer: Arc<ParticleLayer>,
    rng: StdRng,
    started_at: Option<Duration>,
    spawned: u32,
    next_id: u64,
}

impl std::fmt::Debug for ParticleEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParticleEmitter")
            .field("started_at", &self.started_at)
            .field("spawned", &self.spawned)
            .finish_non_exhaustive()
    }
}

impl ParticleEmitter {
    pub fn new(layer: Arc<ParticleLayer>) -> Self {
        Self::with_rng(layer, StdRng::from_rng(&mut rand::rng()))
    }

    pub fn seeded(layer: Arc<ParticleLayer>, seed: u64) -> Self {
        Self::with_rng(layer, StdRng::seed_from_u64(seed))
    }

    fn with_rng(layer: Arc<ParticleLayer>, rng: StdRng) -> Self {
        ParticleEmitter {
            layer,
            rng,
            started_at: None,
            spawned: 0,
            next_id: 1,
        }
    }

    pub fn layer(&self) -> &Arc<ParticleLayer> {
        &self.layer
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Advances to `now`. The emitter starts on the first tick where `active`
    /// is set and keeps running from then on. Spawns due since the last tick
    /// are caught up; those already past their lifetime are skipped.
    pub fn tick(&mut self, now: Duration, active: bool) {
        if self.started_at.is_none() && active {
            debug!("Particle emitter started at {now:?}");
            self.started_at = Some(now);
        }

        if let Some(start) = self.started_at {
            let elapsed = now.saturating_sub(start);
            let due = elapsed.as_millis() / SPAWN_INTERVAL.as_millis();
            while u128::from(self.spawned) < due {
                self.spawned += 1;
                let spawned_at = start + SPAWN_INTERVAL * self.spawned;
                if spawned_at + PARTICLE_LIFETIME <= now {
                    continue;
                }
                let particle = Particle::random(self.next_id, spawned_at, &mut self.rng);
                self.next_id += 1;
                self.layer.attach(particle);
            }
        }

        self.layer.detach_where(|p| p.expires_at() <= now);
    }
}

impl Drop for ParticleEmitter {
    fn drop(&mut self) {
        let removed = self.layer.detach_where(|_| true);
        if removed > 0 {
            debug!("Particle emitter dropped, removed {removed} particles");
        }
    }
}

/// The mounted showcase section.
#[derive(Debug)]
pub struct ApiShowcaseSection {
    pub bubbles: ParticleField,
    tracker: VisibilityTracker,
    emitter: ParticleEmitter,
}

impl ApiShowcaseSection {
    pub fn mount(
        observer: Arc<dyn Observer>,
        element: Option<ElementId>,
        layer: Arc<ParticleLayer>,
    ) -> Result<Self, ClientError> {
        let tracker = VisibilityTracker::track(
            observer,
            element,
            ObserverOptions::with_threshold(SECTION_THRESHOLD),
        )?;
        Ok(ApiShowcaseSection {
            bubbles: ParticleField::random(SHOWCASE_BUBBLES),
            tracker,
            emitter: ParticleEmitter::new(layer),
        })
    }

    pub fn in_view(&self) -> bool {
        self.tracker.is_visible()
    }

    /// Drives the particle emitter; `now` is the time since mount.
    pub fn tick(&mut self, now: Duration) {
        let in_view = self.in_view();
        self.emitter.tick(now, in_view);
    }

    pub fn heading(&self) -> Keyframe {
        Reveal::fade_up(20.0).target(self.in_view())
    }

    pub fn badge(&self) -> (Keyframe, Duration) {
        let reveal = Reveal::pop_in(0.8).with_delay(Duration::from_millis(200));
        (reveal.target(self.in_view()), reveal.delay)
    }
}
