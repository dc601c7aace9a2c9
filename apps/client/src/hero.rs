//! Landing section: the typing intro and the floating tech icons.

use std::time::Duration;

/// How long the headline types before the caret stops and the rest shows.
pub const TYPING_DURATION: Duration = Duration::from_millis(3500);

/// One-shot latch set once [`TYPING_DURATION`] has passed since mount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypingIntro {
    typed: bool,
}

impl TypingIntro {
    pub fn new() -> Self {
        Self::default()
    }

    /// `since_mount` is the time since the section mounted. Returns whether
    /// the intro is done.
    pub fn tick(&mut self, since_mount: Duration) -> bool {
        if since_mount >= TYPING_DURATION {
            self.typed = true;
        }
        self.typed
    }

    pub fn is_typed(&self) -> bool {
        self.typed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatingIcon {
    Database,
    Server,
    Code,
    Globe,
}

/// A decorative icon bobbing in the hero background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatingElement {
    pub icon: FloatingIcon,
    pub size_px: u32,
    pub left_pct: u32,
    pub top_pct: u32,
    /// One full bob loop.
    pub duration: Duration,
}

const ICONS: [(FloatingIcon, u32); 4] = [
    (FloatingIcon::Database, 64),
    (FloatingIcon::Server, 48),
    (FloatingIcon::Code, 56),
    (FloatingIcon::Globe, 40),
];

/// The four floating elements, spread 25% apart from 20%.
pub fn floating_elements() -> [FloatingElement; 4] {
    let mut index = 0u32;
    ICONS.map(|(icon, size_px)| {
        let element = FloatingElement {
            icon,
            size_px,
            left_pct: 20 + index * 25,
            top_pct: 10 + (index * 15) % 40,
            duration: Duration::from_secs(u64::from(15 + index * 2)),
        };
        index += 1;
        element
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_latches_once() {
        let mut intro = TypingIntro::new();
        assert!(!intro.tick(Duration::from_millis(3499)));
        assert!(intro.tick(Duration::from_millis(3500)));
        // Never resets, even for an out-of-order tick.
        assert!(intro.tick(Duration::ZERO));
        assert!(intro.is_typed());
    }

    #[test]
    fn test_floating_layout() {
        let elements = floating_elements();
        let lefts: Vec<_> = elements.iter().map(|e| e.left_pct).collect();
        let tops: Vec<_> = elements.iter().map(|e| e.top_pct).collect();
        let secs: Vec<_> = elements.iter().map(|e| e.duration.as_secs()).collect();

        assert_eq!(lefts, vec![20, 45, 70, 95]);
        assert_eq!(tops, vec![10, 25, 40, 15]);
        assert_eq!(secs, vec![15, 17, 19, 21]);
        assert_eq!(elements[0].icon, FloatingIcon::Database);
        assert_eq!(elements[3].icon, FloatingIcon::Globe);
    }
}
