//! The element-tree seam every behavior is written against.
//!
//! A [`Page`] is the host document: element lookup, style and attribute
//! mutation, event subscription, intersection observation and single-shot
//! timers. The browser binding implements it over `web-sys`; [`MemoryPage`]
//! implements it in memory for tests and headless runs.
//!
//! All operations run on one thread. Handlers are `'static` boxed closures
//! that live for the rest of the page session.

pub mod memory;
mod selector;

use std::time::Duration;

use crate::error::FolioResult;

pub use memory::{MemoryPage, NodeId};

/// Handler for click events on a single element.
pub type ClickHandler<E> = Box<dyn FnMut(&mut ClickEvent<E>)>;

/// Handler for keyboard events.
pub type KeyHandler = Box<dyn FnMut(&KeyEvent)>;

/// Handler for one batch of intersection reports.
pub type IntersectionHandler<E> = Box<dyn FnMut(Vec<IntersectionEntry<E>>)>;

/// Single-shot timer callback.
pub type TimerCallback = Box<dyn FnOnce()>;

/// A click as seen by a handler.
#[derive(Debug)]
pub struct ClickEvent<E> {
    target: Option<E>,
    default_prevented: bool,
}

impl<E> ClickEvent<E> {
    pub fn new(target: Option<E>) -> Self {
        Self {
            target,
            default_prevented: false,
        }
    }

    /// The element the click originated on (not the one listening).
    pub fn target(&self) -> Option<&E> {
        self.target.as_ref()
    }

    /// Suppress the host's default action (navigation for links).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// A key press as seen by a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// Key name as reported by the host (`"Enter"`, `"Escape"`, `"a"`)
    pub key: String,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn is_enter(&self) -> bool {
        self.key == "Enter"
    }

    pub fn is_escape(&self) -> bool {
        self.key == "Escape"
    }
}

/// One element's visibility report inside an observation batch.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEntry<E> {
    pub target: E,
    pub is_intersecting: bool,
    /// Visible fraction of the element, in `[0, 1]`
    pub ratio: f64,
}

/// Host document operations.
///
/// Lookups return `None` for missing elements and for selectors the host
/// cannot parse. Mutations never fail.
pub trait Page: 'static {
    /// Handle to one element of the document.
    type Element: Clone + PartialEq + 'static;

    fn query(&self, selector: &str) -> Option<Self::Element>;

    fn query_all(&self, selector: &str) -> Vec<Self::Element>;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    fn attribute(&self, el: &Self::Element, name: &str) -> Option<String>;

    fn set_attribute(&self, el: &Self::Element, name: &str, value: &str);

    /// Set an inline style property (CSS property name, e.g. `background-size`).
    fn set_style(&self, el: &Self::Element, property: &str, value: &str);

    /// Set a property on the document root (custom properties like `--accent`).
    fn set_root_property(&self, name: &str, value: &str);

    fn add_class(&self, el: &Self::Element, class: &str);

    fn remove_class(&self, el: &Self::Element, class: &str);

    fn set_text(&self, el: &Self::Element, text: &str);

    fn set_image_source(&self, el: &Self::Element, src: &str);

    fn focus(&self, el: &Self::Element);

    /// Smoothly scroll the viewport until the element is visible.
    fn scroll_into_view(&self, el: &Self::Element);

    fn on_click(&self, el: &Self::Element, handler: ClickHandler<Self::Element>);

    fn on_keypress(&self, el: &Self::Element, handler: KeyHandler);

    fn on_document_keydown(&self, handler: KeyHandler);

    /// Observe `targets`, reporting crossings of `threshold`.
    ///
    /// Returns [`FolioError::Unsupported`](crate::FolioError::Unsupported)
    /// when the host has no intersection observation.
    fn observe_intersections(
        &self,
        targets: &[Self::Element],
        threshold: f64,
        callback: IntersectionHandler<Self::Element>,
    ) -> FolioResult<()>;

    fn set_timeout(&self, delay: Duration, callback: TimerCallback);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_event_prevent_default() {
        let mut event = ClickEvent::new(Some(3u32));
        assert!(!event.default_prevented());
        event.prevent_default();
        assert!(event.default_prevented());
        assert_eq!(event.target(), Some(&3));
    }

    #[test]
    fn test_key_event_names() {
        assert!(KeyEvent::new("Enter").is_enter());
        assert!(KeyEvent::new("Escape").is_escape());
        assert!(!KeyEvent::new("Esc").is_escape());
    }
}
