//! Navbar state: scroll-spy highlighting and in-page anchor scrolling.

use std::fmt;
use std::str::FromStr;

/// Scroll distance past which the navbar switches to its solid style.
pub const SCROLLED_AFTER_PX: f64 = 50.0;
/// Viewport line a section must span to become the active one.
pub const ACTIVE_PROBE_Y: f64 = 100.0;
/// Space left above a section when jumping to it, for the fixed navbar.
pub const ANCHOR_OFFSET_PX: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    Home,
    Skills,
    Experience,
    Projects,
    Education,
    Contact,
}

impl SectionId {
    pub fn anchor(self) -> &'static str {
        match self {
            SectionId::Home => "home",
            SectionId::Skills => "skills",
            SectionId::Experience => "experience",
            SectionId::Projects => "projects",
            SectionId::Education => "education",
            SectionId::Contact => "contact",
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.anchor())
    }
}

impl FromStr for SectionId {
    type Err = ();

    /// Accepts `skills` or `#skills`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.strip_prefix('#').unwrap_or(s);
        NAV_LINKS
            .iter()
            .map(|link| link.section)
            .find(|section| section.anchor() == name)
            .ok_or(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub section: SectionId,
}

pub const NAV_LINKS: [NavLink; 6] = [
    NavLink {
        label: "Home",
        section: SectionId::Home,
    },
    NavLink {
        label: "Skills",
        section: SectionId::Skills,
    },
    NavLink {
        label: "Experience",
        section: SectionId::Experience,
    },
    NavLink {
        label: "Projects",
        section: SectionId::Projects,
    },
    NavLink {
        label: "Education",
        section: SectionId::Education,
    },
    NavLink {
        label: "Contact",
        section: SectionId::Contact,
    },
];

/// A section's bounding box relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionBounds {
    pub section: SectionId,
    pub top: f64,
    pub bottom: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScrollSpy {
    active: SectionId,
    scrolled: bool,
}

impl Default for ScrollSpy {
    fn default() -> Self {
        ScrollSpy {
            active: SectionId::Home,
            scrolled: false,
        }
    }
}

impl ScrollSpy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> SectionId {
        self.active
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    /// Updates from a scroll event. Sections are checked in nav order; a
    /// section absent from `bounds` is skipped. When no section spans the
    /// probe line the previous active section is kept.
    pub fn on_scroll(&mut self, scroll_y: f64, bounds: &[SectionBounds]) {
        self.scrolled = scroll_y > SCROLLED_AFTER_PX;

        let current = NAV_LINKS.iter().find_map(|link| {
            bounds
                .iter()
                .find(|b| b.section == link.section)
                .filter(|b| b.top <= ACTIVE_PROBE_Y && b.bottom >= ACTIVE_PROBE_Y)
                .map(|b| b.section)
        });
        if let Some(section) = current {
            self.active = section;
        }
    }
}

/// Scroll position that puts a section just under the navbar, given its
/// viewport-relative top and the current scroll offset.
pub fn anchor_scroll_target(element_top: f64, scroll_y: f64) -> f64 {
    (element_top + scroll_y - ANCHOR_OFFSET_PX).max(0.0)
}
