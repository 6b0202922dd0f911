//! Page model
//!
//! The portfolio laid out for one terminal size: positioned elements in
//! document coordinates (row 0 is the top of the page), their reveal
//! configs, focusable links, and section anchors.

pub mod builder;
pub mod viewport;
pub mod wrap;

use std::collections::HashMap;

use folio_core::motion::{ElementId, Keyframes, RevealConfig};
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::text::Line;

pub use builder::PageBuilder;
pub use viewport::ViewportTracker;

/// Sections of the page, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionId {
    Hero,
    About,
    Experience,
    Skills,
    Projects,
    Contact,
}

impl SectionId {
    /// Sections listed in the navigation bar
    pub const NAV: [SectionId; 5] = [
        SectionId::About,
        SectionId::Experience,
        SectionId::Skills,
        SectionId::Projects,
        SectionId::Contact,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SectionId::Hero => "Home",
            SectionId::About => "About",
            SectionId::Experience => "Experience",
            SectionId::Skills => "Skills",
            SectionId::Projects => "Projects",
            SectionId::Contact => "Contact",
        }
    }

    /// Section bound to the 1-based navigation shortcut
    pub fn from_shortcut(n: usize) -> Option<Self> {
        n.checked_sub(1).and_then(|i| Self::NAV.get(i).copied())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// What an element draws
#[derive(Debug, Clone)]
pub enum ElementBody {
    /// Draws nothing; parent of other elements for shared reveals
    Group,
    Text {
        lines: Vec<Line<'static>>,
        align: Align,
    },
    /// Single-row call to action. `fill` draws a solid button, otherwise an outline.
    Button {
        label: String,
        fg: Color,
        fill: Option<Color>,
        edge: Color,
    },
    /// Rounded box with a filled interior
    Card { border: Color, fill: Color },
    /// Timeline rail with a dot on its first row
    Rail { line: Color, dot: Color },
    /// Skill progress bar; `fraction` of the track is filled once fully grown
    Meter {
        fraction: f64,
        from: Color,
        to: Color,
        track: Color,
    },
    /// Project card gradient header
    Banner { from: Color, to: Color, label: String },
    /// Text colored by a gradient whose position follows `frames` (0..1)
    Sweep {
        text: String,
        from: Color,
        to: Color,
        frames: Keyframes,
    },
    /// Scroll indicator; `frames` gives the dot's row inside the frame
    Bounce {
        frame: Color,
        dot: Color,
        frames: Keyframes,
    },
    /// Soft background blob; `frames` gives its intensity
    Glow { color: Color, frames: Keyframes },
}

#[derive(Debug, Clone)]
pub struct PageElement {
    pub id: ElementId,
    pub section: SectionId,
    /// Position in document coordinates
    pub rect: Rect,
    pub body: ElementBody,
    pub reveal: Option<RevealConfig>,
    pub parent: Option<ElementId>,
    /// Color behind the element; faded text blends toward it
    pub backdrop: Color,
    /// Index into `Page::links`
    pub link: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    Anchor(SectionId),
    /// Opaque string handed to the system opener (URL, mailto:, tel:, path)
    External(String),
}

#[derive(Debug, Clone)]
pub struct Link {
    pub element: ElementId,
    pub label: String,
    pub target: LinkTarget,
    /// Part of the fixed navigation bar rather than the document
    pub fixed: bool,
}

#[derive(Debug, Clone)]
pub struct NavItem {
    pub element: ElementId,
    pub section: SectionId,
    pub reveal: RevealConfig,
    /// Column in the bar
    pub x: u16,
    pub link: usize,
}

/// Fixed navigation bar overlaying the top of the viewport
#[derive(Debug, Clone)]
pub struct NavLayout {
    pub bar: ElementId,
    pub reveal: RevealConfig,
    pub brand: String,
    pub brand_x: u16,
    pub items: Vec<NavItem>,
    /// Too narrow for the item list; only the brand is shown
    pub compact: bool,
}

impl NavLayout {
    /// Rows covered: the bar and its bottom border
    pub const HEIGHT: u16 = 2;
}

#[derive(Debug, Clone)]
pub struct Page {
    pub width: u16,
    pub viewport_height: u16,
    pub height: u16,
    pub nav: NavLayout,
    pub elements: Vec<PageElement>,
    pub links: Vec<Link>,
    anchors: Vec<(SectionId, u16)>,
    index: HashMap<ElementId, usize>,
}

impl Page {
    pub(crate) fn new(
        width: u16,
        viewport_height: u16,
        height: u16,
        nav: NavLayout,
        elements: Vec<PageElement>,
        links: Vec<Link>,
        anchors: Vec<(SectionId, u16)>,
    ) -> Self {
        let index = elements
            .iter()
            .enumerate()
            .map(|(i, element)| (element.id, i))
            .collect();
        Self {
            width,
            viewport_height,
            height,
            nav,
            elements,
            links,
            anchors,
            index,
        }
    }

    pub fn element(&self, id: ElementId) -> Option<&PageElement> {
        self.index.get(&id).map(|&i| &self.elements[i])
    }

    /// First row of a section
    pub fn anchor(&self, section: SectionId) -> u16 {
        self.anchors
            .iter()
            .find(|(id, _)| *id == section)
            .map(|(_, row)| *row)
            .unwrap_or(0)
    }

    pub fn anchors(&self) -> &[(SectionId, u16)] {
        &self.anchors
    }

    /// Section containing `row`
    pub fn section_at(&self, row: u16) -> SectionId {
        self.anchors
            .iter()
            .rev()
            .find(|(_, top)| *top <= row)
            .map(|(id, _)| *id)
            .unwrap_or(SectionId::Hero)
    }

    pub fn max_scroll(&self) -> u16 {
        self.height.saturating_sub(self.viewport_height)
    }

    /// Every animated element with its reveal config, navigation included
    pub fn reveal_configs(&self) -> Vec<(ElementId, RevealConfig)> {
        let mut configs = vec![(self.nav.bar, self.nav.reveal.clone())];
        configs.extend(
            self.nav
                .items
                .iter()
                .map(|item| (item.element, item.reveal.clone())),
        );
        configs.extend(
            self.elements
                .iter()
                .filter_map(|e| e.reveal.clone().map(|config| (e.id, config))),
        );
        configs
    }

    /// Ids that always count as in view
    pub fn fixed_ids(&self) -> Vec<ElementId> {
        let mut ids = vec![self.nav.bar];
        ids.extend(self.nav.items.iter().map(|item| item.element));
        ids
    }

    /// Links reachable with Tab, in order
    pub fn focusable_links(&self) -> Vec<usize> {
        self.links
            .iter()
            .enumerate()
            .filter(|(_, link)| !(link.fixed && self.nav.compact))
            .map(|(i, _)| i)
            .collect()
    }

    /// Document rows of a link, `None` for links in the fixed bar
    pub fn link_span(&self, link: usize) -> Option<(u16, u16)> {
        let link = self.links.get(link)?;
        if link.fixed {
            return None;
        }
        self.element(link.element)
            .map(|element| (element.rect.y, element.rect.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_shortcuts() {
        assert_eq!(SectionId::from_shortcut(1), Some(SectionId::About));
        assert_eq!(SectionId::from_shortcut(5), Some(SectionId::Contact));
        assert_eq!(SectionId::from_shortcut(0), None);
        assert_eq!(SectionId::from_shortcut(6), None);
    }

    #[test]
    fn test_nav_labels_in_order() {
        let labels: Vec<&str> = SectionId::NAV.iter().map(|s| s.label()).collect();
        assert_eq!(labels, ["About", "Experience", "Skills", "Projects", "Contact"]);
    }
}
