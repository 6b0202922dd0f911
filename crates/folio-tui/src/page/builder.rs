//! Lays the portfolio out for a terminal size
//!
//! Element ids are assigned in a fixed order that depends only on the
//! content, so a rebuild after a resize keeps every reveal latch.

use std::time::Duration;

use chrono::Datelike;
use folio_core::config::RevealSettings;
use folio_core::content::models::{Education, Experience, Project, Skill};
use folio_core::motion::{
    nested_stagger, stagger, ElementId, Keyframes, RevealConfig, VisualState,
};
use folio_core::{EasingType, Portfolio};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use super::wrap::{display_width, split_heading, wrap};
use super::{
    Align, ElementBody, Link, LinkTarget, NavItem, NavLayout, Page, PageElement, SectionId,
};
use crate::theme::{mix, Theme};

const SECTION_PADDING: u16 = 3;
const HEADING_GAP: u16 = 2;
const GUTTER: u16 = 2;
const MAX_CONTENT_WIDTH: u16 = 100;
const HERO_MIN_HEIGHT: u16 = 18;
const PROSE_WIDTH: u16 = 72;
const NAV_GAP: u16 = 3;

// Pixel offsets scaled to cells (about 8px per column, 16px per row)
const SLIDE_FAR: i16 = 6;
const SLIDE_NEAR: i16 = 2;
const RISE: i16 = 1;
const RISE_FAR: i16 = 2;
const NAV_DROP: i16 = -(NavLayout::HEIGHT as i16);

const ENTRANCE: Duration = Duration::from_millis(800);
const METER_GROWTH: Duration = Duration::from_secs(1);
/// List entries starting below this row are left out of the page
const MAX_PAGE_ROWS: u16 = u16::MAX - 1024;

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

fn bold(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn plain(color: Color) -> Style {
    Style::default().fg(color)
}

/// Skill and project grid columns for a content width
pub fn grid_columns(content_width: u16) -> u16 {
    match content_width {
        w if w >= 90 => 3,
        w if w >= 56 => 2,
        _ => 1,
    }
}

impl PageElement {
    fn revealed(&mut self, config: RevealConfig) -> &mut Self {
        self.reveal = Some(config);
        self
    }

    fn within(&mut self, parent: ElementId) -> &mut Self {
        self.parent = Some(parent);
        self
    }

    fn on(&mut self, backdrop: Color) -> &mut Self {
        self.backdrop = backdrop;
        self
    }
}

/// Mutable layout state while building
struct Layout {
    next_id: u32,
    cursor: u16,
    width: u16,
    left: u16,
    content_width: u16,
    section: SectionId,
    backdrop: Color,
    elements: Vec<PageElement>,
    links: Vec<Link>,
    anchors: Vec<(SectionId, u16)>,
}

/// Row count of a line list, saturating at the page coordinate limit
fn row_count(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

impl Layout {
    fn new(width: u16, backdrop: Color) -> Self {
        let content_width = width
            .saturating_sub(2 * GUTTER)
            .clamp(1, MAX_CONTENT_WIDTH);
        Self {
            next_id: 0,
            cursor: 0,
            width,
            left: width.saturating_sub(content_width) / 2,
            content_width,
            section: SectionId::Hero,
            backdrop,
            elements: Vec::new(),
            links: Vec::new(),
            anchors: Vec::new(),
        }
    }

    fn reserve(&mut self) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        id
    }

    fn add(&mut self, rect: Rect, body: ElementBody) -> &mut PageElement {
        let id = self.reserve();
        self.add_as(id, rect, body)
    }

    fn add_as(&mut self, id: ElementId, rect: Rect, body: ElementBody) -> &mut PageElement {
        let index = self.elements.len();
        self.elements.push(PageElement {
            id,
            section: self.section,
            rect,
            body,
            reveal: None,
            parent: None,
            backdrop: self.backdrop,
            link: None,
        });
        &mut self.elements[index]
    }

    fn link(&mut self, element: ElementId, label: impl Into<String>, target: LinkTarget) -> usize {
        let index = self.links.len();
        if let Some(el) = self.elements.iter_mut().rev().find(|e| e.id == element) {
            el.link = Some(index);
        }
        self.links.push(Link {
            element,
            label: label.into(),
            target,
            fixed: false,
        });
        index
    }

    fn resize(&mut self, id: ElementId, height: u16) {
        if let Some(el) = self.elements.iter_mut().find(|e| e.id == id) {
            el.rect.height = height;
        }
    }

    fn advance(&mut self, rows: u16) {
        self.cursor = self.cursor.saturating_add(rows);
    }

    /// Whether the page has run out of rows for further list entries
    fn is_full(&self) -> bool {
        if self.cursor >= MAX_PAGE_ROWS {
            tracing::warn!(
                "Page is {} rows long, dropping remaining {:?} entries",
                self.cursor,
                self.section
            );
            return true;
        }
        false
    }

    fn row(&self, height: u16) -> Rect {
        Rect::new(self.left, self.cursor, self.content_width, height)
    }

    /// Centered span of `width` cells inside the content column
    fn centered(&self, width: u16, y: u16) -> Rect {
        let width = width.min(self.content_width);
        let x = self.left + (self.content_width - width) / 2;
        Rect::new(x, y, width, 1)
    }
}

pub struct PageBuilder<'a> {
    portfolio: &'a Portfolio,
    theme: &'a Theme,
    reveal: &'a RevealSettings,
    year: i32,
}

impl<'a> PageBuilder<'a> {
    pub fn new(portfolio: &'a Portfolio, theme: &'a Theme, reveal: &'a RevealSettings) -> Self {
        Self {
            portfolio,
            theme,
            reveal,
            year: chrono::Local::now().year(),
        }
    }

    /// Year printed in the footer
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    pub fn build(&self, width: u16, viewport_height: u16) -> Page {
        let mut layout = Layout::new(width, self.theme.bg0);

        let nav = self.nav(&mut layout);
        self.hero(&mut layout, viewport_height);
        self.about(&mut layout);
        self.experience(&mut layout);
        self.skills(&mut layout);
        self.projects(&mut layout);
        self.contact(&mut layout);

        let Layout {
            cursor,
            elements,
            links,
            anchors,
            ..
        } = layout;
        let height = cursor.max(viewport_height);

        tracing::debug!(
            "Laid out {} elements, {} links over {} rows at width {}",
            elements.len(),
            links.len(),
            height,
            width
        );
        Page::new(width, viewport_height, height, nav, elements, links, anchors)
    }

    fn duration(&self) -> Duration {
        ms(self.reveal.duration_ms)
    }

    fn step(&self) -> Duration {
        ms(self.reveal.stagger_ms)
    }

    /// Apply the configured duration and easing
    fn tuned(&self, config: RevealConfig) -> RevealConfig {
        config
            .with_duration(self.duration())
            .with_easing(self.reveal.easing)
    }

    fn nav(&self, layout: &mut Layout) -> NavLayout {
        let bar = layout.reserve();
        let reveal = self
            .tuned(RevealConfig::new(
                VisualState::SETTLED.shifted_y(NAV_DROP),
                VisualState::SETTLED,
            ))
            .on_mount();

        let brand = self.portfolio.profile.brand.clone();
        let items_width: u16 = SectionId::NAV
            .iter()
            .map(|s| display_width(s.label()))
            .sum::<u16>()
            + NAV_GAP * (SectionId::NAV.len() as u16 - 1);
        let compact = display_width(&brand).saturating_add(5 + items_width) > layout.content_width;

        let mut x = (layout.left + layout.content_width).saturating_sub(items_width);
        let mut items = Vec::with_capacity(SectionId::NAV.len());
        for (i, section) in SectionId::NAV.into_iter().enumerate() {
            let element = layout.reserve();
            let link = layout.links.len();
            layout.links.push(Link {
                element,
                label: section.label().to_string(),
                target: LinkTarget::Anchor(section),
                fixed: true,
            });
            items.push(NavItem {
                element,
                section,
                reveal: self
                    .tuned(RevealConfig::slide_y(-RISE))
                    .with_delay(stagger(i, self.step()))
                    .on_mount(),
                x,
                link,
            });
            x = x.saturating_add(display_width(section.label()) + NAV_GAP);
        }

        NavLayout {
            bar,
            reveal,
            brand,
            brand_x: layout.left,
            items,
            compact,
        }
    }

    fn hero(&self, layout: &mut Layout, viewport_height: u16) {
        let theme = self.theme;
        let profile = &self.portfolio.profile;
        layout.section = SectionId::Hero;
        layout.backdrop = theme.bg0;
        layout.anchors.push((SectionId::Hero, layout.cursor));

        let top = layout.cursor;
        let height = viewport_height.max(HERO_MIN_HEIGHT);
        let (left, cw) = (layout.left, layout.content_width);

        // Glows first so everything else draws over them
        let (w1, h1) = (layout.width / 3, height / 3);
        layout.add(
            Rect::new(0, top + height / 4, w1, h1),
            ElementBody::Glow {
                color: theme.accent,
                frames: Keyframes::new([0.3, 0.5, 0.3], Duration::from_secs(8))
                    .looping()
                    .with_easing(EasingType::EaseInOut),
            },
        );
        let (w2, h2) = (layout.width * 2 / 5, height * 2 / 5);
        layout.add(
            Rect::new(
                layout.width.saturating_sub(w2),
                (top + height * 3 / 4).saturating_sub(h2),
                w2,
                h2,
            ),
            ElementBody::Glow {
                color: theme.secondary,
                frames: Keyframes::new([0.3, 0.5, 0.3], Duration::from_secs(10))
                    .looping()
                    .with_easing(EasingType::EaseInOut),
            },
        );

        let tagline = wrap(&profile.tagline, cw.min(PROSE_WIDTH));
        let buttons = [
            ("View My Work", SectionId::Projects, true),
            ("Get In Touch", SectionId::Contact, false),
        ];
        let button_widths: Vec<u16> = buttons
            .iter()
            .map(|(label, _, _)| display_width(label) + 4)
            .collect();
        let side_by_side = button_widths.iter().sum::<u16>() + 2 <= cw;
        let button_rows = if side_by_side { 1 } else { 3 };

        let block_height = row_count(tagline.len()).saturating_add(4 + button_rows);
        let free = height.saturating_sub(block_height.saturating_add(4));
        let block_top = top.saturating_add(free / 2);

        let wrapper = layout
            .add(Rect::new(left, block_top, cw, block_height), ElementBody::Group)
            .revealed(
                self.tuned(RevealConfig::slide_y(RISE))
                    .with_duration(ENTRANCE)
                    .on_mount(),
            )
            .id;

        let title = layout
            .add(Rect::new(left, block_top, cw, 2), ElementBody::Group)
            .revealed(
                self.tuned(RevealConfig::slide_y(RISE_FAR))
                    .with_duration(ENTRANCE)
                    .with_delay(ms(200))
                    .on_mount(),
            )
            .within(wrapper)
            .id;
        layout
            .add(
                Rect::new(left, block_top, cw, 1),
                ElementBody::Text {
                    lines: vec![Line::from(Span::styled(
                        profile.greeting.clone(),
                        bold(theme.fg0),
                    ))],
                    align: Align::Center,
                },
            )
            .within(title);
        let name_rect = layout.centered(display_width(&profile.name), block_top + 1);
        layout
            .add(
                name_rect,
                ElementBody::Sweep {
                    text: profile.name.clone(),
                    from: theme.accent,
                    to: theme.secondary,
                    frames: Keyframes::new([0.0, 1.0, 0.0], Duration::from_secs(5)).looping(),
                },
            )
            .within(title);

        let tagline_top = block_top + 3;
        layout
            .add(
                Rect::new(left, tagline_top, cw, row_count(tagline.len())),
                ElementBody::Text {
                    lines: tagline
                        .into_iter()
                        .map(|l| Line::from(Span::styled(l, plain(theme.grey1))))
                        .collect(),
                    align: Align::Center,
                },
            )
            .revealed(
                self.tuned(RevealConfig::slide_y(RISE_FAR))
                    .with_duration(ENTRANCE)
                    .with_delay(ms(400))
                    .on_mount(),
            )
            .within(wrapper);

        let buttons_top = block_top.saturating_add(block_height) - button_rows;
        let group = layout
            .add(Rect::new(left, buttons_top, cw, button_rows), ElementBody::Group)
            .revealed(
                self.tuned(RevealConfig::slide_y(RISE_FAR))
                    .with_duration(ENTRANCE)
                    .with_delay(ms(600))
                    .on_mount(),
            )
            .within(wrapper)
            .id;

        let total: u16 = button_widths.iter().sum::<u16>() + 2;
        let mut x = left + cw.saturating_sub(total) / 2;
        let sized = buttons.iter().zip(&button_widths);
        for (i, ((label, target, primary), width)) in sized.enumerate() {
            let rect = if side_by_side {
                let rect = Rect::new(x, buttons_top, *width, 1);
                x += width + 2;
                rect
            } else {
                layout.centered(*width, buttons_top + 2 * i as u16)
            };
            let id = layout
                .add(rect, self.button(label, *primary))
                .within(group)
                .id;
            layout.link(id, *label, LinkTarget::Anchor(*target));
        }

        // Scroll indicator
        layout.add(
            Rect::new((layout.width / 2).saturating_sub(1), top.saturating_add(height - 5), 3, 4),
            ElementBody::Bounce {
                frame: theme.grey2,
                dot: theme.accent,
                frames: Keyframes::new([0.0, 1.0, 0.0], Duration::from_secs(2)).looping(),
            },
        );

        layout.cursor = top.saturating_add(height);
    }

    fn button(&self, label: &str, primary: bool) -> ElementBody {
        ElementBody::Button {
            label: label.to_string(),
            fg: self.theme.fg0,
            fill: primary.then_some(self.theme.accent),
            edge: if primary { self.theme.accent } else { self.theme.grey2 },
        }
    }

    /// Start a section: anchor, top padding and a fading wrapper group
    fn open_section(
        &self,
        layout: &mut Layout,
        section: SectionId,
        backdrop: Color,
        reveal: RevealConfig,
    ) -> ElementId {
        layout.section = section;
        layout.backdrop = backdrop;
        layout.anchors.push((section, layout.cursor));
        let wrapper = layout
            .add(layout.row(0), ElementBody::Group)
            .revealed(reveal)
            .id;
        layout.advance(SECTION_PADDING);
        wrapper
    }

    fn close_section(&self, layout: &mut Layout, wrapper: ElementId) {
        layout.advance(SECTION_PADDING);
        let top = layout.anchors.last().map(|(_, top)| *top).unwrap_or(0);
        layout.resize(wrapper, layout.cursor.saturating_sub(top));
    }

    fn heading(&self, layout: &mut Layout, text: &str, parent: ElementId) {
        let (lead, last) = split_heading(text);
        let line = Line::from(vec![
            Span::styled(lead.to_string(), bold(self.theme.fg0)),
            Span::styled(last.to_string(), bold(self.theme.accent)),
        ]);
        layout
            .add(
                layout.row(1),
                ElementBody::Text {
                    lines: vec![line],
                    align: Align::Center,
                },
            )
            .within(parent);
        layout.advance(1 + HEADING_GAP);
    }

    fn about(&self, layout: &mut Layout) {
        let theme = self.theme;
        let profile = &self.portfolio.profile;
        let wrapper = self.open_section(
            layout,
            SectionId::About,
            theme.bg0,
            self.tuned(RevealConfig::fade()).with_duration(ENTRANCE),
        );
        self.heading(layout, "About Me", wrapper);

        let (left, cw) = (layout.left, layout.content_width);
        let two_columns = cw >= 64;
        let column = if two_columns { (cw - 4) / 2 } else { cw };

        let mut prose: Vec<Line<'static>> = Vec::new();
        for (i, paragraph) in profile.about.iter().enumerate() {
            if i > 0 {
                prose.push(Line::default());
            }
            prose.extend(
                wrap(paragraph, column)
                    .into_iter()
                    .map(|l| Line::from(Span::styled(l, plain(theme.grey1)))),
            );
        }
        let prose_height = row_count(prose.len());
        let text_height = prose_height.saturating_add(2);
        let card_height = if two_columns { text_height.clamp(7, 11) } else { 7 };
        let card_width = if two_columns { column } else { column.min(40) };

        let card_top = layout.cursor;
        let (text_left, text_top) = if two_columns {
            let free = card_height.saturating_sub(text_height);
            (left + column + 4, card_top.saturating_add(free / 2))
        } else {
            (left, card_top.saturating_add(card_height + 2))
        };
        let card_left = if two_columns {
            left
        } else {
            left + (cw - card_width) / 2
        };

        let card = layout
            .add(
                Rect::new(card_left, card_top, card_width, card_height),
                ElementBody::Card {
                    border: mix(theme.accent, theme.secondary, 0.5),
                    fill: theme.bg0,
                },
            )
            .revealed(
                self.tuned(RevealConfig::slide_x(-SLIDE_FAR))
                    .with_duration(ENTRANCE),
            )
            .within(wrapper)
            .id;
        layout
            .add(
                Rect::new(
                    card_left + 1,
                    card_top.saturating_add(card_height / 2),
                    card_width.saturating_sub(2),
                    1,
                ),
                ElementBody::Text {
                    lines: vec![Line::from(profile.avatar.clone())],
                    align: Align::Center,
                },
            )
            .within(card);

        let text = layout
            .add(
                Rect::new(text_left, text_top, column, text_height),
                ElementBody::Group,
            )
            .revealed(
                self.tuned(RevealConfig::slide_x(SLIDE_FAR))
                    .with_duration(ENTRANCE),
            )
            .within(wrapper)
            .id;
        layout
            .add(
                Rect::new(text_left, text_top, column, prose_height),
                ElementBody::Text {
                    lines: prose,
                    align: Align::Left,
                },
            )
            .within(text);

        let label = "View Experience";
        let button = layout
            .add(
                Rect::new(
                    text_left,
                    text_top.saturating_add(prose_height).saturating_add(1),
                    display_width(label) + 4,
                    1,
                ),
                self.button(label, true),
            )
            .revealed(self.tuned(RevealConfig::fade()).with_delay(ms(400)))
            .within(text)
            .id;
        layout.link(button, label, LinkTarget::Anchor(SectionId::Experience));

        layout.cursor = card_top
            .saturating_add(card_height)
            .max(text_top.saturating_add(text_height));
        self.close_section(layout, wrapper);
    }

    fn experience(&self, layout: &mut Layout) {
        let theme = self.theme;
        let wrapper = self.open_section(
            layout,
            SectionId::Experience,
            theme.bg1,
            self.tuned(RevealConfig::fade()),
        );

        let (left, cw) = (layout.left, layout.content_width);
        let resume_inline = cw >= 80;
        let resume = self
            .portfolio
            .resume
            .as_ref()
            .map(|path| (layout.reserve(), path.clone()));
        if let (Some((id, path)), true) = (&resume, resume_inline) {
            let label = "Download PDF";
            let width = display_width(label) + 4;
            layout
                .add_as(
                    *id,
                    Rect::new(left + cw - width, layout.cursor, width, 1),
                    self.outline(label, theme.accent),
                )
                .within(wrapper);
            layout.link(*id, label, LinkTarget::External(path.clone()));
        }
        self.heading(layout, "Experience & Education", wrapper);

        self.subheading(layout, "Work Experience", theme.accent, wrapper);
        for (i, entry) in self.portfolio.experience.iter().enumerate() {
            if layout.is_full() {
                break;
            }
            self.experience_entry(layout, entry, i, wrapper);
        }

        layout.advance(1);
        self.subheading(layout, "Education", theme.secondary, wrapper);
        for (i, entry) in self.portfolio.education.iter().enumerate() {
            if layout.is_full() {
                break;
            }
            self.education_entry(layout, entry, i, wrapper);
        }

        if let (Some((id, path)), false) = (&resume, resume_inline) {
            let label = "Download PDF Resume";
            let rect = layout.centered(display_width(label) + 4, layout.cursor.saturating_add(1));
            layout
                .add_as(*id, rect, self.outline(label, theme.accent))
                .revealed(self.tuned(RevealConfig::fade()))
                .within(wrapper);
            layout.link(*id, label, LinkTarget::External(path.clone()));
            layout.advance(2);
        }

        self.close_section(layout, wrapper);
    }

    fn outline(&self, label: &str, color: Color) -> ElementBody {
        ElementBody::Button {
            label: label.to_string(),
            fg: color,
            fill: None,
            edge: color,
        }
    }

    fn subheading(&self, layout: &mut Layout, text: &str, marker: Color, parent: ElementId) {
        let line = Line::from(vec![
            Span::styled("▌ ", plain(marker)),
            Span::styled(text.to_string(), bold(self.theme.fg0)),
        ]);
        layout
            .add(
                layout.row(1),
                ElementBody::Text {
                    lines: vec![line],
                    align: Align::Left,
                },
            )
            .within(parent);
        layout.advance(2);
    }

    /// Title lines of a timeline card, and whether the period fits beside the title
    fn card_title(&self, title: &str, period: &str, width: u16) -> (Vec<Line<'static>>, bool) {
        let inline = display_width(title) + 2 + display_width(period) <= width;
        let lines = wrap(title, width)
            .into_iter()
            .map(|l| Line::from(Span::styled(l, bold(self.theme.fg0))))
            .collect();
        (lines, inline)
    }

    /// Period of a timeline card, right-aligned on the title row when it fits,
    /// otherwise on its own row at `row`. Returns the row below the content.
    fn card_period(
        &self,
        layout: &mut Layout,
        x: u16,
        title_row: u16,
        row: u16,
        width: u16,
        period: &str,
        inline: bool,
        parent: ElementId,
    ) -> u16 {
        let (y, align) = if inline {
            (title_row, Align::Right)
        } else {
            (row, Align::Left)
        };
        layout
            .add(
                Rect::new(x, y, width, 1),
                ElementBody::Text {
                    lines: vec![Line::from(Span::styled(
                        period.to_string(),
                        plain(self.theme.grey0),
                    ))],
                    align,
                },
            )
            .within(parent)
            .on(self.theme.bg2);
        if inline {
            row
        } else {
            row.saturating_add(1)
        }
    }

    fn experience_entry(
        &self,
        layout: &mut Layout,
        entry: &Experience,
        index: usize,
        parent: ElementId,
    ) {
        let theme = self.theme;
        let (left, cw) = (layout.left, layout.content_width);
        let card_left = left + 3;
        let card_width = cw.saturating_sub(3);
        let inner_left = card_left + 2;
        let inner = card_width.saturating_sub(4).max(1);

        let (header, period_inline) = self.card_title(&entry.title, &entry.period, inner);
        let company = wrap(&entry.company, inner);
        let description = wrap(&entry.description, inner);
        let achievements: Vec<Vec<String>> = entry
            .achievements
            .iter()
            .map(|a| wrap(a, inner.saturating_sub(2).max(1)))
            .collect();
        let chips = self.chip_lines(&entry.skills, inner);

        let achievement_rows: usize = achievements.iter().map(Vec::len).sum();
        let content = header.len()
            + company.len()
            + usize::from(!period_inline)
            + 1
            + description.len()
            + if achievements.is_empty() { 0 } else { 1 + achievement_rows }
            + if chips.is_empty() { 0 } else { 1 + chips.len() };
        let height = row_count(content).saturating_add(2);
        let top = layout.cursor;

        let group = layout
            .add(Rect::new(left, top, cw, height), ElementBody::Group)
            .revealed(
                self.tuned(RevealConfig::slide_x(-SLIDE_FAR))
                    .with_delay(stagger(index, self.step())),
            )
            .within(parent)
            .id;
        layout
            .add(
                Rect::new(left, top, 1, height),
                ElementBody::Rail {
                    line: theme.bg3,
                    dot: theme.accent,
                },
            )
            .within(group);
        layout
            .add(
                Rect::new(card_left, top, card_width, height),
                ElementBody::Card {
                    border: theme.bg3,
                    fill: theme.bg2,
                },
            )
            .within(group);

        let title_row = top.saturating_add(1);
        let mut row = self.card_text(layout, inner_left, title_row, inner, header, group);
        let company_id = layout
            .add(
                Rect::new(inner_left, row, inner, row_count(company.len())),
                ElementBody::Text {
                    lines: company
                        .into_iter()
                        .map(|l| Line::from(Span::styled(l, plain(theme.accent_soft))))
                        .collect(),
                    align: Align::Left,
                },
            )
            .within(group)
            .on(theme.bg2)
            .id;
        if let Some(url) = &entry.company_url {
            layout.link(company_id, entry.company.clone(), LinkTarget::External(url.clone()));
        }
        row = row.saturating_add(layout.element_height(company_id));
        row = self.card_period(
            layout,
            inner_left,
            title_row,
            row,
            inner,
            &entry.period,
            period_inline,
            group,
        );
        row = row.saturating_add(1);
        let description = description
            .into_iter()
            .map(|l| Line::from(Span::styled(l, plain(theme.grey1))))
            .collect();
        row = self.card_text(layout, inner_left, row, inner, description, group);

        if !achievements.is_empty() {
            row = row.saturating_add(1);
            for (j, wrapped) in achievements.into_iter().enumerate() {
                let lines: Vec<Line<'static>> = wrapped
                    .into_iter()
                    .enumerate()
                    .map(|(k, l)| {
                        let marker = if k == 0 { "▸ " } else { "  " };
                        Line::from(vec![
                            Span::styled(marker, plain(theme.accent)),
                            Span::styled(l, plain(theme.fg1)),
                        ])
                    })
                    .collect();
                let rows = row_count(lines.len());
                layout
                    .add(
                        Rect::new(inner_left, row, inner, rows),
                        ElementBody::Text {
                            lines,
                            align: Align::Left,
                        },
                    )
                    .revealed(
                        self.tuned(RevealConfig::slide_x(-SLIDE_NEAR)).with_delay(nested_stagger(
                            index,
                            self.step(),
                            j,
                            self.step() / 2,
                        )),
                    )
                    .within(group)
                    .on(theme.bg2);
                row = row.saturating_add(rows);
            }
        }

        if !chips.is_empty() {
            row = row.saturating_add(1);
            self.card_text(layout, inner_left, row, inner, chips, group);
        }

        layout.cursor = top.saturating_add(height).saturating_add(1);
    }

    fn education_entry(
        &self,
        layout: &mut Layout,
        entry: &Education,
        index: usize,
        parent: ElementId,
    ) {
        let theme = self.theme;
        let (left, cw) = (layout.left, layout.content_width);
        let card_left = left + 3;
        let card_width = cw.saturating_sub(3);
        let inner_left = card_left + 2;
        let inner = card_width.saturating_sub(4).max(1);

        let (header, period_inline) = self.card_title(&entry.degree, &entry.period, inner);
        let school = wrap(&entry.school, inner);
        let description = wrap(&entry.description, inner);

        let content =
            header.len() + school.len() + 1 + description.len() + usize::from(!period_inline);
        let height = row_count(content).saturating_add(2);
        let top = layout.cursor;

        let group = layout
            .add(Rect::new(left, top, cw, height), ElementBody::Group)
            .revealed(
                self.tuned(RevealConfig::slide_x(-SLIDE_FAR))
                    .with_delay(stagger(index, self.step())),
            )
            .within(parent)
            .id;
        layout
            .add(
                Rect::new(left, top, 1, height),
                ElementBody::Rail {
                    line: theme.bg3,
                    dot: theme.secondary,
                },
            )
            .within(group);
        layout
            .add(
                Rect::new(card_left, top, card_width, height),
                ElementBody::Card {
                    border: theme.bg3,
                    fill: theme.bg2,
                },
            )
            .within(group);

        let title_row = top.saturating_add(1);
        let mut row = self.card_text(layout, inner_left, title_row, inner, header, group);
        let school_rows = row_count(school.len());
        let school_id = layout
            .add(
                Rect::new(inner_left, row, inner, school_rows),
                ElementBody::Text {
                    lines: school
                        .into_iter()
                        .map(|l| {
                            Line::from(Span::styled(
                                l,
                                plain(theme.secondary_soft).add_modifier(Modifier::UNDERLINED),
                            ))
                        })
                        .collect(),
                    align: Align::Left,
                },
            )
            .within(group)
            .on(theme.bg2)
            .id;
        layout.link(school_id, entry.school.clone(), LinkTarget::External(entry.link.clone()));
        row = row.saturating_add(school_rows);
        row = self.card_period(
            layout,
            inner_left,
            title_row,
            row,
            inner,
            &entry.period,
            period_inline,
            group,
        );
        row = row.saturating_add(1);
        let description = description
            .into_iter()
            .map(|l| Line::from(Span::styled(l, plain(theme.grey1))))
            .collect();
        self.card_text(layout, inner_left, row, inner, description, group);

        layout.cursor = top.saturating_add(height).saturating_add(1);
    }

    /// Static text inside a card; returns the row below it
    fn card_text(
        &self,
        layout: &mut Layout,
        x: u16,
        y: u16,
        width: u16,
        lines: Vec<Line<'static>>,
        parent: ElementId,
    ) -> u16 {
        let rows = row_count(lines.len());
        if rows > 0 {
            layout
                .add(
                    Rect::new(x, y, width, rows),
                    ElementBody::Text {
                        lines,
                        align: Align::Left,
                    },
                )
                .within(parent)
                .on(self.theme.bg2);
        }
        y.saturating_add(rows)
    }

    /// Tag chips flowed into lines of at most `width` cells
    fn chip_lines(&self, tags: &[String], width: u16) -> Vec<Line<'static>> {
        let style = Style::default()
            .fg(self.theme.accent_soft)
            .bg(mix(self.theme.bg2, self.theme.accent, 0.15));
        let mut lines = Vec::new();
        let mut spans: Vec<Span<'static>> = Vec::new();
        let mut used = 0u16;

        for tag in tags {
            let chip = format!(" {} ", tag);
            let chip_width = display_width(&chip);
            if !spans.is_empty() && used.saturating_add(1).saturating_add(chip_width) > width {
                lines.push(Line::from(std::mem::take(&mut spans)));
                used = 0;
            }
            if !spans.is_empty() {
                spans.push(Span::raw(" "));
                used += 1;
            }
            spans.push(Span::styled(chip, style));
            used = used.saturating_add(chip_width);
        }
        if !spans.is_empty() {
            lines.push(Line::from(spans));
        }
        lines
    }

    fn skills(&self, layout: &mut Layout) {
        let theme = self.theme;
        let wrapper = self.open_section(
            layout,
            SectionId::Skills,
            theme.bg1,
            self.tuned(RevealConfig::fade()),
        );
        self.heading(layout, "Skills & Expertise", wrapper);

        let columns = grid_columns(layout.content_width);
        let gap = 2;
        let card_width = (layout.content_width - gap * (columns - 1)) / columns;
        let card_height = 5;
        let top = layout.cursor;

        let columns_n = usize::from(columns);
        let mut placed = 0;
        for (i, skill) in self.portfolio.skills.iter().enumerate() {
            let row = row_count(i / columns_n);
            let y = top.saturating_add(row.saturating_mul(card_height + 1));
            if i % columns_n == 0 {
                layout.cursor = y;
                if layout.is_full() {
                    break;
                }
            }
            let col = (i % columns_n) as u16;
            let x = layout.left + col * (card_width + gap);
            self.skill_card(layout, skill, i, Rect::new(x, y, card_width, card_height), wrapper);
            placed = i + 1;
        }

        let rows = row_count(placed.div_ceil(columns_n));
        layout.cursor = top.saturating_add(rows.saturating_mul(card_height + 1));
        self.close_section(layout, wrapper);
    }

    fn skill_card(
        &self,
        layout: &mut Layout,
        skill: &Skill,
        index: usize,
        rect: Rect,
        parent: ElementId,
    ) {
        let theme = self.theme;
        let delay = stagger(index, self.step());
        let inner = rect.width.saturating_sub(4).max(1);

        let card = layout
            .add(
                rect,
                ElementBody::Card {
                    border: theme.bg3,
                    fill: theme.bg2,
                },
            )
            .revealed(self.tuned(RevealConfig::slide_y(RISE)).with_delay(delay))
            .within(parent)
            .id;

        let level = format!("{}%", skill.level);
        let level_width = display_width(&level);
        layout
            .add(
                Rect::new(rect.x + 2, rect.y + 1, inner.saturating_sub(level_width + 1).max(1), 1),
                ElementBody::Text {
                    lines: vec![Line::from(Span::styled(skill.name.clone(), bold(theme.fg0)))],
                    align: Align::Left,
                },
            )
            .within(card)
            .on(theme.bg2);
        layout
            .add(
                Rect::new(rect.x + 2, rect.y + 1, inner, 1),
                ElementBody::Text {
                    lines: vec![Line::from(Span::styled(level, bold(theme.accent)))],
                    align: Align::Right,
                },
            )
            .within(card)
            .on(theme.bg2);
        layout
            .add(
                Rect::new(rect.x + 2, rect.y + 3, inner, 1),
                ElementBody::Meter {
                    fraction: skill.fill_fraction(),
                    from: theme.accent,
                    to: theme.secondary,
                    track: theme.bg3,
                },
            )
            .revealed(
                self.tuned(RevealConfig::grow())
                    .with_duration(METER_GROWTH)
                    .with_delay(delay),
            )
            .within(card)
            .on(theme.bg2);
    }

    fn projects(&self, layout: &mut Layout) {
        let theme = self.theme;
        let wrapper = self.open_section(
            layout,
            SectionId::Projects,
            theme.bg0,
            self.tuned(RevealConfig::fade()),
        );
        self.heading(layout, "Featured Projects", wrapper);

        let columns = grid_columns(layout.content_width) as usize;
        let gap = 2u16;
        let card_width = (layout.content_width - gap * (columns as u16 - 1)) / columns as u16;
        let inner = card_width.saturating_sub(4).max(1);

        for (row, chunk) in self.portfolio.projects.chunks(columns).enumerate() {
            if layout.is_full() {
                break;
            }
            let heights: Vec<u16> = chunk.iter().map(|p| self.project_height(p, inner)).collect();
            let row_height = heights.iter().copied().max().unwrap_or(0);
            let top = layout.cursor;
            for (col, project) in chunk.iter().enumerate() {
                let x = layout.left + col as u16 * (card_width + gap);
                let index = row * columns + col;
                self.project_card(
                    layout,
                    project,
                    index,
                    Rect::new(x, top, card_width, row_height),
                    wrapper,
                );
            }
            layout.cursor = top.saturating_add(row_height).saturating_add(1);
        }

        self.close_section(layout, wrapper);
    }

    const BANNER_HEIGHT: u16 = 4;

    fn project_height(&self, project: &Project, inner: u16) -> u16 {
        let description = wrap(&project.description, inner).len();
        let tags = self.chip_lines(&project.tags, inner).len();
        let links = if project.live_url.is_some() || project.github_url.is_some() {
            2
        } else {
            0
        };
        // border, banner, gap, title, gap, description, gap, tags, links, border
        let fixed = 1 + usize::from(Self::BANNER_HEIGHT) + 1 + 1 + 1 + 1 + 1;
        row_count(fixed + description + tags + links)
    }

    fn project_card(
        &self,
        layout: &mut Layout,
        project: &Project,
        index: usize,
        rect: Rect,
        parent: ElementId,
    ) {
        let theme = self.theme;
        let inner_left = rect.x + 2;
        let inner = rect.width.saturating_sub(4).max(1);

        let card = layout
            .add(
                rect,
                ElementBody::Card {
                    border: theme.bg3,
                    fill: theme.bg2,
                },
            )
            .revealed(
                self.tuned(RevealConfig::slide_y(RISE))
                    .with_delay(stagger(index, self.step())),
            )
            .within(parent)
            .id;

        let from = theme.resolve(&project.gradient.from).unwrap_or(theme.accent);
        let to = theme.resolve(&project.gradient.to).unwrap_or(theme.secondary);
        layout
            .add(
                Rect::new(
                    rect.x + 1,
                    rect.y + 1,
                    rect.width.saturating_sub(2),
                    Self::BANNER_HEIGHT,
                ),
                ElementBody::Banner {
                    from,
                    to,
                    label: "View Project →".to_string(),
                },
            )
            .within(card)
            .on(theme.bg2);

        let mut row = rect.y.saturating_add(Self::BANNER_HEIGHT + 2);
        let title = vec![Line::from(Span::styled(project.title.clone(), bold(theme.fg0)))];
        row = self.card_text(layout, inner_left, row, inner, title, card).saturating_add(1);
        let description = wrap(&project.description, inner)
            .into_iter()
            .map(|l| Line::from(Span::styled(l, plain(theme.grey1))))
            .collect();
        row = self.card_text(layout, inner_left, row, inner, description, card).saturating_add(1);
        let tags = self.chip_lines(&project.tags, inner);
        row = self.card_text(layout, inner_left, row, inner, tags, card);

        row = row.saturating_add(1);
        let mut x = inner_left;
        let urls = [("Live ↗", &project.live_url), ("GitHub ↗", &project.github_url)];
        for (label, url) in urls {
            let Some(url) = url else { continue };
            let width = display_width(label);
            let id = layout
                .add(
                    Rect::new(x, row, width, 1),
                    ElementBody::Text {
                        lines: vec![Line::from(Span::styled(label, plain(theme.accent_soft)))],
                        align: Align::Left,
                    },
                )
                .within(card)
                .on(theme.bg2)
                .id;
            layout.link(
                id,
                format!("{} {}", project.title, label),
                LinkTarget::External(url.clone()),
            );
            x = x.saturating_add(width + 3);
        }
    }

    fn contact(&self, layout: &mut Layout) {
        let theme = self.theme;
        let contact = &self.portfolio.contact;
        let wrapper = self.open_section(
            layout,
            SectionId::Contact,
            theme.bg1,
            self.tuned(RevealConfig::fade()),
        );
        self.heading(layout, &contact.heading, wrapper);

        let pitch = wrap(&contact.pitch, layout.content_width.min(PROSE_WIDTH));
        let pitch_rows = row_count(pitch.len());
        layout
            .add(
                layout.row(pitch_rows),
                ElementBody::Text {
                    lines: pitch
                        .into_iter()
                        .map(|l| Line::from(Span::styled(l, plain(theme.grey1))))
                        .collect(),
                    align: Align::Center,
                },
            )
            .within(wrapper);
        layout.advance(pitch_rows.saturating_add(2));

        let buttons = [
            ("Send Email", format!("mailto:{}", contact.email), true),
            ("LinkedIn", contact.linkedin.clone(), false),
            ("GitHub", contact.github.clone(), false),
        ];
        let widths: Vec<u16> = buttons.iter().map(|(l, _, _)| display_width(l) + 4).collect();
        let total = widths.iter().sum::<u16>() + 3 * (widths.len() as u16 - 1);
        let side_by_side = total <= layout.content_width;
        let rows = if side_by_side { 1 } else { 2 * widths.len() as u16 - 1 };
        let top = layout.cursor;

        let group = layout
            .add(layout.row(rows), ElementBody::Group)
            .revealed(self.tuned(RevealConfig::slide_y(RISE)).with_delay(ms(200)))
            .within(wrapper)
            .id;
        let mut x = layout.left + layout.content_width.saturating_sub(total) / 2;
        for (i, ((label, target, primary), width)) in buttons.into_iter().zip(widths).enumerate() {
            let rect = if side_by_side {
                let rect = Rect::new(x, top, width, 1);
                x += width + 3;
                rect
            } else {
                layout.centered(width, top + 2 * i as u16)
            };
            let id = layout.add(rect, self.button(label, primary)).within(group).id;
            layout.link(id, label, LinkTarget::External(target));
        }
        layout.advance(rows + 2);

        let info = layout
            .add(layout.row(1), ElementBody::Group)
            .revealed(self.tuned(RevealConfig::fade()).with_delay(ms(300)))
            .within(wrapper)
            .id;
        let phone_width = display_width(&contact.phone_display);
        let rest = format!(" • {}", contact.location);
        let rest_width = display_width(&rest);
        let start = layout.centered(phone_width.saturating_add(rest_width), layout.cursor);
        let phone = layout
            .add(
                Rect::new(start.x, start.y, phone_width, 1),
                ElementBody::Text {
                    lines: vec![Line::from(Span::styled(
                        contact.phone_display.clone(),
                        plain(theme.grey1),
                    ))],
                    align: Align::Left,
                },
            )
            .within(info)
            .id;
        layout.link(
            phone,
            contact.phone_display.clone(),
            LinkTarget::External(format!("tel:{}", contact.phone)),
        );
        layout
            .add(
                Rect::new(start.x.saturating_add(phone_width), start.y, rest_width, 1),
                ElementBody::Text {
                    lines: vec![Line::from(Span::styled(rest, plain(theme.grey1)))],
                    align: Align::Left,
                },
            )
            .within(info);
        layout.advance(1 + 3);

        let footer = vec![
            Line::from(Span::styled(
                "─".repeat(layout.content_width as usize),
                plain(theme.bg3),
            )),
            Line::default(),
            Line::from(Span::styled(
                format!(
                    "© {} {}. All rights reserved.",
                    self.year, contact.copyright_holder
                ),
                plain(theme.grey0),
            )),
        ];
        layout
            .add(
                layout.row(3),
                ElementBody::Text {
                    lines: footer,
                    align: Align::Center,
                },
            )
            .revealed(self.tuned(RevealConfig::fade()).with_delay(ms(400)))
            .within(wrapper);
        layout.advance(3);

        self.close_section(layout, wrapper);
    }
}

impl Layout {
    fn element_height(&self, id: ElementId) -> u16 {
        self.elements
            .iter()
            .rev()
            .find(|e| e.id == id)
            .map(|e| e.rect.height)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::content::models::Skill;
    use std::collections::BTreeSet;

    fn build(portfolio: &Portfolio, width: u16, height: u16) -> Page {
        let theme = Theme::default();
        let settings = RevealSettings::default();
        PageBuilder::new(portfolio, &theme, &settings)
            .with_year(2025)
            .build(width, height)
    }

    fn ids(page: &Page) -> BTreeSet<ElementId> {
        page.elements.iter().map(|e| e.id).collect()
    }

    fn text_of(element: &PageElement) -> String {
        match &element.body {
            ElementBody::Text { lines, .. } => lines
                .iter()
                .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
                .collect::<Vec<_>>()
                .join("\n"),
            _ => String::new(),
        }
    }

    #[test]
    fn test_anchors_are_ordered() {
        let page = build(&Portfolio::default(), 120, 40);
        let rows: Vec<u16> = page.anchors().iter().map(|(_, row)| *row).collect();
        assert!(rows.windows(2).all(|w| w[0] < w[1]), "{:?}", rows);
        let sections: Vec<SectionId> = page.anchors().iter().map(|(s, _)| *s).collect();
        assert_eq!(
            sections,
            [
                SectionId::Hero,
                SectionId::About,
                SectionId::Experience,
                SectionId::Skills,
                SectionId::Projects,
                SectionId::Contact
            ]
        );
        assert!(page.height > page.anchor(SectionId::Contact));
    }

    #[test]
    fn test_hero_fills_viewport() {
        let page = build(&Portfolio::default(), 120, 40);
        assert_eq!(page.anchor(SectionId::About), 40);
    }

    #[test]
    fn test_ids_do_not_depend_on_width() {
        let portfolio = Portfolio::default();
        let wide = build(&portfolio, 160, 40);
        let narrow = build(&portfolio, 40, 20);
        assert_eq!(ids(&wide), ids(&narrow));
        assert_eq!(wide.links.len(), narrow.links.len());
    }

    #[test]
    fn test_skill_meters_follow_levels() {
        let portfolio = Portfolio {
            skills: vec![Skill::new("A", 90), Skill::new("B", 50)],
            ..Portfolio::default()
        };
        let page = build(&portfolio, 120, 40);
        let fractions: Vec<f64> = page
            .elements
            .iter()
            .filter_map(|e| match e.body {
                ElementBody::Meter { fraction, .. } => Some(fraction),
                _ => None,
            })
            .collect();
        assert_eq!(fractions, [0.9, 0.5]);
    }

    #[test]
    fn test_skill_cards_stagger() {
        let page = build(&Portfolio::default(), 120, 40);
        let delays: Vec<Duration> = page
            .elements
            .iter()
            .filter(|e| {
                e.section == SectionId::Skills && matches!(e.body, ElementBody::Card { .. })
            })
            .filter_map(|e| e.reveal.as_ref().map(|r| r.delay))
            .collect();
        assert_eq!(delays.len(), 12);
        for (i, delay) in delays.iter().enumerate() {
            assert_eq!(*delay, Duration::from_millis(100) * i as u32);
        }
    }

    #[test]
    fn test_empty_achievements_render_no_rows() {
        let mut portfolio = Portfolio::default();
        portfolio.experience.truncate(1);
        portfolio.experience[0].achievements.clear();
        let page = build(&portfolio, 120, 40);
        let markers = page
            .elements
            .iter()
            .filter(|e| e.section == SectionId::Experience)
            .filter(|e| text_of(e).starts_with("▸"))
            .count();
        assert_eq!(markers, 0);
    }

    #[test]
    fn test_achievements_use_nested_stagger() {
        let page = build(&Portfolio::default(), 120, 40);
        let delays: Vec<Duration> = page
            .elements
            .iter()
            .filter(|e| text_of(e).starts_with("▸"))
            .filter_map(|e| e.reveal.as_ref().map(|r| r.delay))
            .collect();
        assert_eq!(delays.len(), 9);
        // Second entry, third achievement: 1 × 100ms + 2 × 50ms
        assert_eq!(delays[5], Duration::from_millis(200));
    }

    #[test]
    fn test_links_cover_anchors_and_contacts() {
        let page = build(&Portfolio::default(), 120, 40);
        let targets: Vec<&LinkTarget> = page.links.iter().map(|l| &l.target).collect();
        assert!(targets.contains(&&LinkTarget::Anchor(SectionId::Projects)));
        assert!(targets.contains(&&LinkTarget::External(
            "mailto:musah.abdulmalikgh@gmail.com".to_string()
        )));
        assert!(targets.contains(&&LinkTarget::External("tel:+233249809695".to_string())));
        assert!(targets.contains(&&LinkTarget::External("resume.pdf".to_string())));
        assert!(targets.contains(&&LinkTarget::External("https://uenr.edu.gh".to_string())));
        // Nav items come first and are fixed
        assert!(page.links[..5].iter().all(|l| l.fixed));
    }

    #[test]
    fn test_footer_year() {
        let page = build(&Portfolio::default(), 120, 40);
        let footer = page
            .elements
            .iter()
            .map(text_of)
            .find(|t| t.contains("All rights reserved"))
            .unwrap();
        assert!(footer.ends_with("© 2025 Abdul-Malik Musah. All rights reserved."));
    }

    #[test]
    fn test_navigation_reveals_on_mount() {
        let page = build(&Portfolio::default(), 120, 40);
        assert_eq!(page.nav.reveal.trigger, folio_core::motion::Trigger::Mount);
        let delays: Vec<Duration> = page.nav.items.iter().map(|i| i.reveal.delay).collect();
        assert_eq!(delays[0], Duration::ZERO);
        assert_eq!(delays[4], Duration::from_millis(400));
        assert!(!page.nav.compact);
        assert!(build(&Portfolio::default(), 40, 20).nav.compact);
    }

    #[test]
    fn test_grid_columns() {
        assert_eq!(grid_columns(100), 3);
        assert_eq!(grid_columns(70), 2);
        assert_eq!(grid_columns(30), 1);
    }

    #[test]
    fn test_narrow_terminal_does_not_panic() {
        for width in [1, 5, 12, 30] {
            let page = build(&Portfolio::default(), width, 3);
            assert!(page.height >= 3);
        }
    }

    #[test]
    fn test_oversized_history_is_cut_at_page_limit() {
        let mut portfolio = Portfolio::default();
        let entry = portfolio.experience[0].clone();
        portfolio.experience = vec![entry; 10_000];
        let page = build(&portfolio, 80, 24);

        let rows: Vec<u16> = page.anchors().iter().map(|(_, row)| *row).collect();
        assert_eq!(rows.len(), 6);
        assert!(rows.windows(2).all(|w| w[0] < w[1]), "{:?}", rows);
        assert!(page.anchor(SectionId::Skills) >= MAX_PAGE_ROWS);
        assert!(page.height > page.anchor(SectionId::Contact));
        assert!(page
            .elements
            .iter()
            .all(|e| e.rect.y.checked_add(e.rect.height).is_some()));
    }

    #[test]
    fn test_row_count_saturates() {
        assert_eq!(row_count(3), 3);
        assert_eq!(row_count(usize::from(u16::MAX) + 10), u16::MAX);
    }
}
