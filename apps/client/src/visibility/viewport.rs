use std::collections::HashMap;
use std::sync::Mutex;

use super::{
    ElementId, IntersectionCallback, IntersectionEntry, ObservationId, Observer, ObserverOptions,
    RootMargin,
};
use crate::error::ClientError;

/// Axis-aligned box in page coordinates (pixels, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    fn translate(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    fn expand(&self, margin: &RootMargin) -> Rect {
        let top = margin.top.resolve(self.height);
        let right = margin.right.resolve(self.width);
        let bottom = margin.bottom.resolve(self.height);
        let left = margin.left.resolve(self.width);
        Rect::new(
            self.x - left,
            self.y - top,
            self.width + left + right,
            self.height + top + bottom,
        )
    }

    /// Overlap of two boxes; `None` when they are disjoint. Boxes that only
    /// touch along an edge yield a zero-area overlap.
    fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        (right >= x && bottom >= y).then(|| Rect::new(x, y, right - x, bottom - y))
    }
}

struct Observation {
    element: ElementId,
    root: Option<ElementId>,
    margin: RootMargin,
    threshold: f64,
    callback: IntersectionCallback,
    /// (is_intersecting, threshold met) as last reported.
    last: Option<(bool, bool)>,
}

struct Layout {
    viewport_width: f64,
    viewport_height: f64,
    scroll_x: f64,
    scroll_y: f64,
    elements: HashMap<ElementId, Rect>,
}

impl Layout {
    fn root_box(&self, root: Option<ElementId>) -> Option<Rect> {
        match root {
            // The viewport sits at the scroll offset in page coordinates.
            None => Some(Rect::new(
                self.scroll_x,
                self.scroll_y,
                self.viewport_width,
                self.viewport_height,
            )),
            Some(id) => self.elements.get(&id).copied(),
        }
    }

    fn measure(&self, obs: &Observation) -> IntersectionEntry {
        let hidden = IntersectionEntry {
            target: obs.element,
            is_intersecting: false,
            intersection_ratio: 0.0,
        };
        let (Some(target), Some(root)) =
            (self.elements.get(&obs.element), self.root_box(obs.root))
        else {
            return hidden;
        };

        match root.expand(&obs.margin).intersection(target) {
            Some(overlap) => {
                let area = target.area();
                let ratio = if area > 0.0 {
                    (overlap.area() / area).min(1.0)
                } else {
                    1.0
                };
                IntersectionEntry {
                    target: obs.element,
                    is_intersecting: true,
                    intersection_ratio: ratio,
                }
            }
            None => hidden,
        }
    }
}

struct Inner {
    layout: Layout,
    observations: HashMap<ObservationId, Observation>,
    next_id: u64,
}

impl Inner {
    /// Reports every observation whose state changed since its last report.
    fn notify(&mut self) {
        let layout = &self.layout;
        for obs in self.observations.values_mut() {
            let entry = layout.measure(obs);
            let state = (
                entry.is_intersecting,
                entry.intersection_ratio >= obs.threshold,
            );
            if obs.last != Some(state) {
                obs.last = Some(state);
                (obs.callback)(&entry);
            }
        }
    }
}

/// Geometric [`Observer`] over a laid-out page.
///
/// Element boxes are placed in page coordinates; scrolling moves the
/// viewport over them. Every layout or scroll change re-measures all
/// observations and fires callbacks for those that crossed a boundary.
pub struct ViewportObserver {
    inner: Mutex<Inner>,
}

impl std::fmt::Debug for ViewportObserver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewportObserver").finish_non_exhaustive()
    }
}

impl ViewportObserver {
    pub fn new(viewport_width: f64, viewport_height: f64) -> Self {
        ViewportObserver {
            inner: Mutex::new(Inner {
                layout: Layout {
                    viewport_width,
                    viewport_height,
                    scroll_x: 0.0,
                    scroll_y: 0.0,
                    elements: HashMap::new(),
                },
                observations: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    fn update(&self, f: impl FnOnce(&mut Layout)) {
        let mut inner = self.inner.lock().unwrap_or_else(|p| p.into_inner());
        f(&mut inner.layout);
        inner.notify();
    }

    pub fn place(&self, element: ElementId, rect: Rect) {
        self.update(|layout| {
            layout.elements.insert(element, rect);
        });
    }

    pub fn remove(&self, element: ElementId) {
        self.update(|layout| {
            layout.elements.remove(&element);
        });
    }

    pub fn scroll_to(&self, x: f64, y: f64) {
        self.update(|layout| {
            layout.scroll_x = x;
            layout.scroll_y = y;
        });
    }

    pub fn resize(&self, width: f64, height: f64) {
        self.update(|layout| {
            layout.viewport_width = width;
            layout.viewport_height = height;
        });
    }

    /// Element box relative to the viewport, as a bounding client rect.
    pub fn client_rect(&self, element: ElementId) -> Option<Rect> {
        let inner = self.inner.lock().unwrap_or_else(|p| p.into_inner());
        let layout = &inner.layout;
        layout
            .elements
            .get(&element)
            .map(|r| r.translate(-layout.scroll_x, -layout.scroll_y))
    }

    pub fn scroll_y(&self) -> f64 {
        self.inner
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .layout
            .scroll_y
    }

    pub fn observation_count(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .observations
            .len()
    }
}

impl Observer for ViewportObserver {
    fn observe(
        &self,
        element: ElementId,
        options: &ObserverOptions,
        callback: IntersectionCallback,
    ) -> Result<ObservationId, ClientError> {
        let margin = options.validate()?;
        let mut inner = self.inner.lock().unwrap_or_else(|p| p.into_inner());
        let id = ObservationId(inner.next_id);
        inner.next_id += 1;
        inner.observations.insert(
            id,
            Observation {
                element,
                root: options.root,
                margin,
                threshold: options.threshold,
                callback,
                last: None,
            },
        );
        inner.notify();
        Ok(id)
    }

    fn unobserve(&self, id: ObservationId) {
        self.inner
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .observations
            .remove(&id);
    }
}
