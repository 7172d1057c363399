//! Scroll tracking: accent color and active navigation link.
//!
//! Sections are observed for visibility. When one crosses the threshold it
//! becomes active: its color (if mapped) becomes the page accent and the
//! navigation link pointing at it becomes the only active link. Entries of
//! one batch are applied in report order, so the last qualifying entry wins.

use std::collections::BTreeMap;
use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::config::SiteConfig;
use crate::page::{IntersectionEntry, Page};

/// How the tracker ended up running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerMode {
    /// Observing this many sections
    Observing { sections: usize },
    /// No observation; the accent was pinned to the home color
    Fallback,
}

pub struct ScrollTracker<P: Page> {
    page: Rc<P>,
    nav_links: Vec<P::Element>,
    colors: BTreeMap<String, String>,
    accent_property: String,
    active_class: String,
    threshold: f64,
}

impl<P: Page> ScrollTracker<P> {
    /// Capture the navigation links present now.
    pub fn new(page: Rc<P>, config: &SiteConfig) -> Self {
        let nav_links = page.query_all(&config.selectors.nav_links);
        Self {
            page,
            nav_links,
            colors: config.section_colors.clone(),
            accent_property: config.scroll.accent_property.clone(),
            active_class: config.scroll.active_class.clone(),
            threshold: config.scroll.threshold,
        }
    }

    /// Observe every identified section, or pin the accent to the home color
    /// when observation is impossible.
    pub fn install(page: Rc<P>, config: &SiteConfig) -> TrackerMode {
        let sections: Vec<P::Element> = page
            .query_all(&config.selectors.sections)
            .into_iter()
            .filter(|s| page.attribute(s, "id").is_some_and(|id| !id.is_empty()))
            .collect();

        let fallback = |reason: &str| {
            warn!(reason, "scroll tracking unavailable, using home accent");
            if let Some(color) = config.home_color() {
                page.set_root_property(&config.scroll.accent_property, color);
            }
            TrackerMode::Fallback
        };

        if sections.is_empty() {
            return fallback("no sections");
        }

        let tracker = Rc::new(Self::new(Rc::clone(&page), config));
        let observed = sections.len();
        let result = page.observe_intersections(
            &sections,
            config.scroll.threshold,
            Box::new(move |entries: Vec<IntersectionEntry<P::Element>>| {
                tracker.handle_entries(entries)
            }),
        );

        match result {
            Ok(()) => {
                info!(sections = observed, "scroll tracking installed");
                TrackerMode::Observing { sections: observed }
            }
            Err(e) => fallback(&e.to_string()),
        }
    }

    /// Apply one observation batch in report order.
    pub fn handle_entries(&self, entries: Vec<IntersectionEntry<P::Element>>) {
        for entry in entries {
            // The ratio is of the section's own area, so a section taller
            // than 1/threshold viewports never qualifies.
            if !entry.is_intersecting || entry.ratio < self.threshold {
                continue;
            }
            let id = self.page.attribute(&entry.target, "id").unwrap_or_default();
            self.activate(&id);
        }
    }

    /// Make `section_id` the active section.
    pub fn activate(&self, section_id: &str) {
        if let Some(color) = self.colors.get(section_id) {
            self.page.set_root_property(&self.accent_property, color);
        }
        let marked = self.set_active_nav(section_id);
        debug!(section = section_id, marked, "section active");
    }

    /// Mark the link pointing at `section_id` active and clear all others.
    ///
    /// Returns whether a link was marked.
    pub fn set_active_nav(&self, section_id: &str) -> bool {
        let href = format!("#{}", section_id);
        let mut marked = false;
        for link in &self.nav_links {
            if self.page.attribute(link, "href").as_deref() == Some(href.as_str()) {
                self.page.add_class(link, &self.active_class);
                marked = true;
            } else {
                self.page.remove_class(link, &self.active_class);
            }
        }
        marked
    }
}
