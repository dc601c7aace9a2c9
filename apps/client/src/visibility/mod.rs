//! Scroll-triggered visibility detection.
//!
//! A [`VisibilityTracker`] registers one element with an [`Observer`] and
//! latches to `true` the first time the element's intersection with the
//! root reaches the configured threshold. The latch never resets. Dropping
//! the tracker releases the observation.
//!
//! The [`Observer`] trait stands in for the browser's intersection
//! observer so the latch logic runs without a rendering environment;
//! [`ViewportObserver`] is a geometric implementation driven by explicit
//! layout and scroll updates.

pub mod viewport;

use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::error::ClientError;

pub use viewport::{Rect, ViewportObserver};

/// Handle to a laid-out element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u32);

/// Handle to one registered observation, returned by [`Observer::observe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObservationId(pub u64);

/// One side of a root margin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarginValue {
    Px(f64),
    Percent(f64),
}

impl MarginValue {
    /// Resolves against the root dimension on the same axis.
    pub fn resolve(self, basis: f64) -> f64 {
        match self {
            MarginValue::Px(px) => px,
            MarginValue::Percent(pct) => basis * pct / 100.0,
        }
    }
}

impl FromStr for MarginValue {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ClientError::InvalidRootMargin(s.to_string());
        let (number, ctor): (&str, fn(f64) -> MarginValue) = if let Some(n) = s.strip_suffix("px")
        {
            (n, MarginValue::Px)
        } else if let Some(n) = s.strip_suffix('%') {
            (n, MarginValue::Percent)
        } else if s == "0" {
            (s, MarginValue::Px)
        } else {
            return Err(invalid());
        };
        let value: f64 = number.parse().map_err(|_| invalid())?;
        if !value.is_finite() {
            return Err(invalid());
        }
        Ok(ctor(value))
    }
}

/// Margins applied to the root box before intersecting, in CSS shorthand
/// order (top, right, bottom, left). Positive values grow the root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootMargin {
    pub top: MarginValue,
    pub right: MarginValue,
    pub bottom: MarginValue,
    pub left: MarginValue,
}

impl Default for RootMargin {
    fn default() -> Self {
        let zero = MarginValue::Px(0.0);
        RootMargin {
            top: zero,
            right: zero,
            bottom: zero,
            left: zero,
        }
    }
}

impl FromStr for RootMargin {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split_whitespace()
            .map(MarginValue::from_str)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ClientError::InvalidRootMargin(s.to_string()))?;

        let (top, right, bottom, left) = match values.as_slice() {
            [all] => (*all, *all, *all, *all),
            [v, h] => (*v, *h, *v, *h),
            [t, h, b] => (*t, *h, *b, *h),
            [t, r, b, l] => (*t, *r, *b, *l),
            _ => return Err(ClientError::InvalidRootMargin(s.to_string())),
        };
        Ok(RootMargin {
            top,
            right,
            bottom,
            left,
        })
    }
}

/// Observation settings. `root: None` observes against the viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverOptions {
    pub threshold: f64,
    pub root: Option<ElementId>,
    pub root_margin: String,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        ObserverOptions {
            threshold: 0.0,
            root: None,
            root_margin: "0px".to_string(),
        }
    }
}

impl ObserverOptions {
    pub fn with_threshold(threshold: f64) -> Self {
        ObserverOptions {
            threshold,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<RootMargin, ClientError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ClientError::InvalidThreshold(self.threshold));
        }
        self.root_margin.parse()
    }
}

/// What an observer reports for one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: ElementId,
    pub is_intersecting: bool,
    pub intersection_ratio: f64,
}

pub type IntersectionCallback = Box<dyn FnMut(&IntersectionEntry) + Send>;

/// Intersection observation capability.
///
/// Implementations invoke the callback once with the initial state and
/// again whenever the element crosses the threshold. Callbacks must not
/// call back into the observer.
pub trait Observer: Send + Sync {
    fn observe(
        &self,
        element: ElementId,
        options: &ObserverOptions,
        callback: IntersectionCallback,
    ) -> Result<ObservationId, ClientError>;

    fn unobserve(&self, id: ObservationId);
}

/// One-shot "has entered the viewport" latch for a single element.
pub struct VisibilityTracker {
    visible: Arc<AtomicBool>,
    registration: Option<(Arc<dyn Observer>, ObservationId)>,
}

impl std::fmt::Debug for VisibilityTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisibilityTracker")
            .field("visible", &self.is_visible())
            .field("observing", &self.registration.is_some())
            .finish()
    }
}

impl VisibilityTracker {
    /// Starts tracking `element`. A missing element yields a tracker that
    /// stays hidden and holds no observation.
    pub fn track(
        observer: Arc<dyn Observer>,
        element: Option<ElementId>,
        options: ObserverOptions,
    ) -> Result<Self, ClientError> {
        let visible = Arc::new(AtomicBool::new(false));
        let Some(element) = element else {
            return Ok(Self {
                visible,
                registration: None,
            });
        };

        let latch = visible.clone();
        let threshold = options.threshold;
        let callback: IntersectionCallback = Box::new(move |entry: &IntersectionEntry| {
            if entry.is_intersecting
                && entry.intersection_ratio >= threshold
                && !latch.swap(true, Ordering::SeqCst)
            {
                debug!("Element {:?} entered view", entry.target);
            }
        });

        let id = observer.observe(element, &options, callback)?;
        Ok(Self {
            visible,
            registration: Some((observer, id)),
        })
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }
}

impl Drop for VisibilityTracker {
    fn drop(&mut self) {
        if let Some((observer, id)) = self.registration.take() {
            observer.unobserve(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records registrations and lets the test push entries by hand.
    #[derive(Default)]
    struct ManualObserver {
        callbacks: Mutex<Vec<(ObservationId, IntersectionCallback)>>,
        unobserved: Mutex<Vec<ObservationId>>,
    }

    impl ManualObserver {
        fn emit(&self, is_intersecting: bool, intersection_ratio: f64) {
            for (_, cb) in self.callbacks.lock().unwrap().iter_mut() {
                cb(&IntersectionEntry {
                    target: ElementId(1),
                    is_intersecting,
                    intersection_ratio,
                });
            }
        }
    }

    impl Observer for ManualObserver {
        fn observe(
            &self,
            _element: ElementId,
            options: &ObserverOptions,
            callback: IntersectionCallback,
        ) -> Result<ObservationId, ClientError> {
            options.validate()?;
            let mut callbacks = self.callbacks.lock().unwrap();
            let id = ObservationId(callbacks.len() as u64 + 1);
            callbacks.push((id, callback));
            Ok(id)
        }

        fn unobserve(&self, id: ObservationId) {
            self.callbacks.lock().unwrap().retain(|(i, _)| *i != id);
            self.unobserved.lock().unwrap().push(id);
        }
    }

    #[test]
    fn test_latches_when_threshold_met_and_stays_true() {
        let observer = Arc::new(ManualObserver::default());
        let tracker = VisibilityTracker::track(
            observer.clone(),
            Some(ElementId(1)),
            ObserverOptions::with_threshold(0.1),
        )
        .unwrap();

        observer.emit(false, 0.0);
        assert!(!tracker.is_visible());
        observer.emit(true, 0.05);
        assert!(!tracker.is_visible());
        observer.emit(true, 0.1);
        assert!(tracker.is_visible());
        observer.emit(false, 0.0);
        assert!(tracker.is_visible());
    }

    #[test]
    fn test_zero_threshold_latches_on_edge_contact() {
        let observer = Arc::new(ManualObserver::default());
        let tracker =
            VisibilityTracker::track(observer.clone(), Some(ElementId(1)), Default::default())
                .unwrap();
        observer.emit(true, 0.0);
        assert!(tracker.is_visible());
    }

    #[test]
    fn test_missing_element_is_noop() {
        let observer = Arc::new(ManualObserver::default());
        let tracker =
            VisibilityTracker::track(observer.clone(), None, Default::default()).unwrap();
        assert!(observer.callbacks.lock().unwrap().is_empty());
        drop(tracker);
        assert!(observer.unobserved.lock().unwrap().is_empty());
    }

    #[test]
    fn test_drop_releases_observation() {
        let observer = Arc::new(ManualObserver::default());
        let tracker =
            VisibilityTracker::track(observer.clone(), Some(ElementId(1)), Default::default())
                .unwrap();
        assert_eq!(observer.callbacks.lock().unwrap().len(), 1);
        drop(tracker);
        assert!(observer.callbacks.lock().unwrap().is_empty());
        assert_eq!(observer.unobserved.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_options_rejected() {
        let observer = Arc::new(ManualObserver::default());
        let bad_threshold = VisibilityTracker::track(
            observer.clone(),
            Some(ElementId(1)),
            ObserverOptions::with_threshold(1.5),
        );
        assert!(matches!(bad_threshold, Err(ClientError::InvalidThreshold(_))));

        let bad_margin = VisibilityTracker::track(
            observer,
            Some(ElementId(1)),
            ObserverOptions {
                root_margin: "10em".to_string(),
                ..Default::default()
            },
        );
        assert!(matches!(bad_margin, Err(ClientError::InvalidRootMargin(_))));
    }

    #[test]
    fn test_root_margin_shorthand() {
        let m: RootMargin = "10px".parse().unwrap();
        assert_eq!(m.left, MarginValue::Px(10.0));

        let m: RootMargin = "5px 10%".parse().unwrap();
        assert_eq!(m.top, MarginValue::Px(5.0));
        assert_eq!(m.right, MarginValue::Percent(10.0));
        assert_eq!(m.bottom, MarginValue::Px(5.0));
        assert_eq!(m.left, MarginValue::Percent(10.0));

        let m: RootMargin = "1px 2px 3px".parse().unwrap();
        assert_eq!(m.bottom, MarginValue::Px(3.0));
        assert_eq!(m.left, MarginValue::Px(2.0));

        let m: RootMargin = "-1px 0 3px 4px".parse().unwrap();
        assert_eq!(m.top, MarginValue::Px(-1.0));
        assert_eq!(m.right, MarginValue::Px(0.0));
        assert_eq!(m.left, MarginValue::Px(4.0));

        assert!("".parse::<RootMargin>().is_err());
        assert!("1px 2px 3px 4px 5px".parse::<RootMargin>().is_err());
        assert!("px".parse::<RootMargin>().is_err());
    }

    #[test]
    fn test_percent_margin_resolves_against_basis() {
        assert_eq!(MarginValue::Percent(10.0).resolve(800.0), 80.0);
        assert_eq!(MarginValue::Px(12.0).resolve(800.0), 12.0);
    }
}
