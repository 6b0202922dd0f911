//! Viewport intersection
//!
//! Compares each animated element's rows against the visible rows and
//! reports changes. The first evaluation reports every element, so items
//! already on screen at mount are seen as entering the viewport.

use std::collections::HashMap;
use std::time::Instant;

use folio_core::motion::{ElementId, Intersection};

use super::Page;

#[derive(Debug, Default)]
pub struct ViewportTracker {
    seen: HashMap<ElementId, bool>,
}

/// Whether rows `[top, top + height)` overlap `[offset, offset + viewport)`
pub fn intersects(top: u16, height: u16, offset: u16, viewport: u16) -> bool {
    let (top, offset) = (u32::from(top), u32::from(offset));
    let bottom = top + u32::from(height.max(1));
    top < offset + u32::from(viewport) && bottom > offset
}

impl ViewportTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intersection changes at scroll `offset`
    pub fn evaluate(&mut self, page: &Page, offset: u16, now: Instant) -> Vec<Intersection> {
        let fixed = page.fixed_ids().into_iter().map(|id| (id, true));
        let document = page
            .elements
            .iter()
            .filter(|element| element.reveal.is_some())
            .map(|element| {
                let rect = element.rect;
                (
                    element.id,
                    intersects(rect.y, rect.height, offset, page.viewport_height),
                )
            });

        let mut changes = Vec::new();
        for (element, visible) in fixed.chain(document) {
            if self.seen.insert(element, visible) != Some(visible) {
                changes.push(Intersection {
                    element,
                    visible,
                    at: now,
                });
            }
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{PageBuilder, SectionId};
    use crate::theme::Theme;
    use folio_core::config::RevealSettings;
    use folio_core::Portfolio;

    fn page(height: u16) -> Page {
        let portfolio = Portfolio::default();
        let theme = Theme::default();
        let settings = RevealSettings::default();
        PageBuilder::new(&portfolio, &theme, &settings).build(120, height)
    }

    #[test]
    fn test_intersects() {
        assert!(intersects(0, 5, 0, 10));
        assert!(intersects(9, 5, 0, 10));
        assert!(!intersects(10, 5, 0, 10));
        assert!(!intersects(0, 5, 5, 10));
        assert!(intersects(4, 0, 0, 10));
    }

    #[test]
    fn test_first_evaluation_reports_everything() {
        let page = page(30);
        let mut tracker = ViewportTracker::new();
        let changes = tracker.evaluate(&page, 0, Instant::now());
        let animated = page.reveal_configs().len();
        assert_eq!(changes.len(), animated);

        // Nothing moved, nothing to report
        assert!(tracker.evaluate(&page, 0, Instant::now()).is_empty());
    }

    #[test]
    fn test_element_in_view_at_mount_is_visible() {
        let page = page(30);
        let mut tracker = ViewportTracker::new();
        let changes = tracker.evaluate(&page, 0, Instant::now());

        let fixed = page.fixed_ids();
        assert!(changes
            .iter()
            .filter(|c| fixed.contains(&c.element))
            .all(|c| c.visible));

        // Hero content is on screen, the contact section is not
        let contact_top = page.anchor(SectionId::Contact);
        for change in &changes {
            if let Some(element) = page.element(change.element) {
                if element.rect.y >= contact_top {
                    assert!(!change.visible);
                }
                if element.section == SectionId::Hero {
                    assert!(change.visible);
                }
            }
        }
    }

    #[test]
    fn test_scrolling_reports_entries_and_exits() {
        let page = page(30);
        let mut tracker = ViewportTracker::new();
        tracker.evaluate(&page, 0, Instant::now());

        let contact = page.anchor(SectionId::Contact);
        let changes = tracker.evaluate(&page, contact, Instant::now());
        assert!(changes.iter().any(|c| c.visible));
        assert!(changes.iter().any(|c| !c.visible));
        // The fixed bar never changes
        assert!(changes.iter().all(|c| c.element != page.nav.bar));
    }

    #[test]
    fn test_unchanged_offset_reports_nothing() {
        let page = page(30);
        let mut tracker = ViewportTracker::new();
        tracker.evaluate(&page, 0, Instant::now());
        assert!(tracker.evaluate(&page, 0, Instant::now()).is_empty());
    }
}
