//! In-memory [`Page`] implementation.
//!
//! Builds a small element tree, records every mutation the behaviors make,
//! dispatches synthetic events and runs timers on a virtual clock. Used by
//! the test suites and the headless CLI.
//!
//! ```ignore
//! use std::rc::Rc;
//! use folio_core::page::MemoryPage;
//!
//! let page = Rc::new(MemoryPage::new());
//! let nav = page.add(None, "nav", &[("class", "main-nav")]);
//! let link = page.add(Some(nav), "a", &[("class", "nav-link"), ("href", "#about")]);
//! assert!(!page.click(link));
//! ```

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use super::selector::{Selector, Tree};
use super::{
    ClickEvent, ClickHandler, IntersectionEntry, IntersectionHandler, KeyEvent, KeyHandler, Page,
    TimerCallback,
};
use crate::error::{FolioError, FolioResult};

/// Handle to a node of a [`MemoryPage`]; ids follow document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
pub(crate) struct Node {
    tag: String,
    parent: Option<NodeId>,
    detached: bool,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    text: String,
}

#[derive(Debug, Default)]
struct Document {
    nodes: Vec<Node>,
    root_properties: BTreeMap<String, String>,
    focused: Option<NodeId>,
    scrolled: Vec<NodeId>,
}

impl Document {
    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    fn is_connected(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.node(node_id);
            if node.detached {
                return false;
            }
            current = node.parent;
        }
        true
    }

    fn select(&self, selector: &str) -> Vec<NodeId> {
        let Some(selector) = Selector::parse(selector) else {
            return Vec::new();
        };
        (0..self.nodes.len())
            .map(NodeId)
            .filter(|&id| self.is_connected(id) && selector.matches(self, id))
            .collect()
    }

    /// The node and its ancestors, innermost first.
    fn path(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = vec![id];
        let mut current = self.node(id).parent;
        while let Some(parent) = current {
            path.push(parent);
            current = self.node(parent).parent;
        }
        path
    }
}

impl Tree for Document {
    fn tag(&self, node: NodeId) -> &str {
        &self.node(node).tag
    }

    fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.node(node).attributes.get(name).map(String::as_str)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).parent
    }
}

struct Observer {
    targets: Vec<NodeId>,
    threshold: f64,
    callback: Rc<RefCell<IntersectionHandler<NodeId>>>,
}

struct Timer {
    due: Duration,
    seq: u64,
    callback: TimerCallback,
}

type SharedClick = Rc<RefCell<ClickHandler<NodeId>>>;
type SharedKey = Rc<RefCell<KeyHandler>>;

/// A page that lives entirely in memory.
pub struct MemoryPage {
    doc: RefCell<Document>,
    clicks: RefCell<Vec<(NodeId, SharedClick)>>,
    keypresses: RefCell<Vec<(NodeId, SharedKey)>>,
    keydowns: RefCell<Vec<SharedKey>>,
    observers: RefCell<Vec<Observer>>,
    intersection_supported: Cell<bool>,
    timers: RefCell<Vec<Timer>>,
    now: Cell<Duration>,
    next_seq: Cell<u64>,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPage {
    /// Create an empty page with intersection observation available.
    pub fn new() -> Self {
        Self {
            doc: RefCell::new(Document::default()),
            clicks: RefCell::new(Vec::new()),
            keypresses: RefCell::new(Vec::new()),
            keydowns: RefCell::new(Vec::new()),
            observers: RefCell::new(Vec::new()),
            intersection_supported: Cell::new(true),
            timers: RefCell::new(Vec::new()),
            now: Cell::new(Duration::ZERO),
            next_seq: Cell::new(0),
        }
    }

    // ------------------------------------------------------------------
    // Building
    // ------------------------------------------------------------------

    /// Append an element under `parent` (or at top level).
    pub fn add(&self, parent: Option<NodeId>, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let mut doc = self.doc.borrow_mut();
        let id = NodeId(doc.nodes.len());
        doc.nodes.push(Node {
            tag: tag.to_ascii_lowercase(),
            parent,
            detached: false,
            attributes: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            styles: BTreeMap::new(),
            text: String::new(),
        });
        id
    }

    /// Remove an element (and its subtree) from the document.
    pub fn detach(&self, node: NodeId) {
        self.doc.borrow_mut().node_mut(node).detached = true;
    }

    /// Toggle whether `observe_intersections` is available.
    pub fn set_intersection_supported(&self, supported: bool) {
        self.intersection_supported.set(supported);
    }

    // ------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------

    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.doc.borrow().node(node).styles.get(property).cloned()
    }

    pub fn text(&self, node: NodeId) -> String {
        self.doc.borrow().node(node).text.clone()
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.doc
            .borrow()
            .attr(node, "class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    pub fn root_property(&self, name: &str) -> Option<String> {
        self.doc.borrow().root_properties.get(name).cloned()
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.doc.borrow().focused
    }

    /// Every element scrolled into view, in call order.
    pub fn scrolled(&self) -> Vec<NodeId> {
        self.doc.borrow().scrolled.clone()
    }

    /// Every element registered with an intersection observer.
    pub fn observed(&self) -> Vec<NodeId> {
        self.observers
            .borrow()
            .iter()
            .flat_map(|o| o.targets.iter().copied())
            .collect()
    }

    /// Threshold of the most recently registered observer.
    pub fn observed_threshold(&self) -> Option<f64> {
        self.observers.borrow().last().map(|o| o.threshold)
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Click `target`, bubbling through its ancestors.
    ///
    /// Returns whether any handler suppressed the default action.
    pub fn click(&self, target: NodeId) -> bool {
        let path = self.doc.borrow().path(target);
        let mut event = ClickEvent::new(Some(target));
        for node in path {
            let handlers: Vec<SharedClick> = self
                .clicks
                .borrow()
                .iter()
                .filter(|(el, _)| *el == node)
                .map(|(_, h)| Rc::clone(h))
                .collect();
            for handler in handlers {
                (handler.borrow_mut())(&mut event);
            }
        }
        event.default_prevented()
    }

    /// Deliver a keypress to `target` and its ancestors.
    pub fn keypress(&self, target: NodeId, key: &str) {
        let path = self.doc.borrow().path(target);
        let event = KeyEvent::new(key);
        for node in path {
            let handlers: Vec<SharedKey> = self
                .keypresses
                .borrow()
                .iter()
                .filter(|(el, _)| *el == node)
                .map(|(_, h)| Rc::clone(h))
                .collect();
            for handler in handlers {
                (handler.borrow_mut())(&event);
            }
        }
    }

    /// Deliver a keydown to the document-level listeners.
    pub fn keydown(&self, key: &str) {
        let event = KeyEvent::new(key);
        let handlers: Vec<SharedKey> = self.keydowns.borrow().iter().cloned().collect();
        for handler in handlers {
            (handler.borrow_mut())(&event);
        }
    }

    /// Deliver one observation batch of `(element, visible ratio)` reports.
    ///
    /// Each observer receives the entries for its own targets, in the order
    /// given.
    pub fn report_intersections(&self, reports: &[(NodeId, f64)]) {
        let batches: Vec<(Rc<RefCell<IntersectionHandler<NodeId>>>, Vec<IntersectionEntry<NodeId>>)> =
            self.observers
                .borrow()
                .iter()
                .map(|observer| {
                    let entries = reports
                        .iter()
                        .filter(|(node, _)| observer.targets.contains(node))
                        .map(|&(target, ratio)| IntersectionEntry {
                            target,
                            is_intersecting: ratio > 0.0,
                            ratio,
                        })
                        .collect();
                    (Rc::clone(&observer.callback), entries)
                })
                .collect();

        for (callback, entries) in batches {
            if !entries.is_empty() {
                (callback.borrow_mut())(entries);
            }
        }
    }

    // ------------------------------------------------------------------
    // Virtual clock
    // ------------------------------------------------------------------

    /// Time elapsed on the virtual clock.
    pub fn now(&self) -> Duration {
        self.now.get()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().len()
    }

    /// Time until the earliest pending timer fires.
    pub fn next_timer_delay(&self) -> Option<Duration> {
        let now = self.now.get();
        self.timers
            .borrow()
            .iter()
            .map(|t| t.due.saturating_sub(now))
            .min()
    }

    /// Advance the clock, firing every timer that comes due (including ones
    /// scheduled by the timers themselves) in due order.
    pub fn advance(&self, by: Duration) {
        let until = self.now.get() + by;
        loop {
            let next = {
                let mut timers = self.timers.borrow_mut();
                let earliest = timers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= until)
                    .min_by_key(|(_, t)| (t.due, t.seq))
                    .map(|(i, _)| i);
                earliest.map(|i| timers.remove(i))
            };
            match next {
                Some(timer) => {
                    self.now.set(timer.due);
                    (timer.callback)();
                }
                None => break,
            }
        }
        self.now.set(until);
    }

    /// Fire only the earliest pending timer, moving the clock to its due time.
    ///
    /// Returns the delay that elapsed, or `None` if nothing was pending.
    pub fn fire_next(&self) -> Option<Duration> {
        let delay = self.next_timer_delay()?;
        let now = self.now.get();
        let timer = {
            let mut timers = self.timers.borrow_mut();
            let index = timers
                .iter()
                .enumerate()
                .min_by_key(|(_, t)| (t.due, t.seq))
                .map(|(i, _)| i)?;
            timers.remove(index)
        };
        self.now.set(now + delay);
        (timer.callback)();
        Some(delay)
    }
}

impl Page for MemoryPage {
    type Element = NodeId;

    fn query(&self, selector: &str) -> Option<NodeId> {
        self.doc.borrow().select(selector).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        self.doc.borrow().select(selector)
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let doc = self.doc.borrow();
        (0..doc.nodes.len())
            .map(NodeId)
            .find(|&node| doc.is_connected(node) && doc.attr(node, "id") == Some(id))
    }

    fn attribute(&self, el: &NodeId, name: &str) -> Option<String> {
        self.doc.borrow().attr(*el, name).map(String::from)
    }

    fn set_attribute(&self, el: &NodeId, name: &str, value: &str) {
        self.doc
            .borrow_mut()
            .node_mut(*el)
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn set_style(&self, el: &NodeId, property: &str, value: &str) {
        self.doc
            .borrow_mut()
            .node_mut(*el)
            .styles
            .insert(property.to_string(), value.to_string());
    }

    fn set_root_property(&self, name: &str, value: &str) {
        self.doc
            .borrow_mut()
            .root_properties
            .insert(name.to_string(), value.to_string());
    }

    fn add_class(&self, el: &NodeId, class: &str) {
        if self.has_class(*el, class) {
            return;
        }
        let mut doc = self.doc.borrow_mut();
        let attrs = &mut doc.node_mut(*el).attributes;
        let classes = attrs.entry("class".to_string()).or_default();
        if !classes.is_empty() {
            classes.push(' ');
        }
        classes.push_str(class);
    }

    fn remove_class(&self, el: &NodeId, class: &str) {
        let mut doc = self.doc.borrow_mut();
        if let Some(classes) = doc.node_mut(*el).attributes.get_mut("class") {
            *classes = classes
                .split_whitespace()
                .filter(|c| *c != class)
                .collect::<Vec<_>>()
                .join(" ");
        }
    }

    fn set_text(&self, el: &NodeId, text: &str) {
        self.doc.borrow_mut().node_mut(*el).text = text.to_string();
    }

    fn set_image_source(&self, el: &NodeId, src: &str) {
        self.set_attribute(el, "src", src);
    }

    fn focus(&self, el: &NodeId) {
        self.doc.borrow_mut().focused = Some(*el);
    }

    fn scroll_into_view(&self, el: &NodeId) {
        self.doc.borrow_mut().scrolled.push(*el);
    }

    fn on_click(&self, el: &NodeId, handler: ClickHandler<NodeId>) {
        self.clicks
            .borrow_mut()
            .push((*el, Rc::new(RefCell::new(handler))));
    }

    fn on_keypress(&self, el: &NodeId, handler: KeyHandler) {
        self.keypresses
            .borrow_mut()
            .push((*el, Rc::new(RefCell::new(handler))));
    }

    fn on_document_keydown(&self, handler: KeyHandler) {
        self.keydowns
            .borrow_mut()
            .push(Rc::new(RefCell::new(handler)));
    }

    fn observe_intersections(
        &self,
        targets: &[NodeId],
        threshold: f64,
        callback: IntersectionHandler<NodeId>,
    ) -> FolioResult<()> {
        if !self.intersection_supported.get() {
            return Err(FolioError::Unsupported("IntersectionObserver"));
        }
        self.observers.borrow_mut().push(Observer {
            targets: targets.to_vec(),
            threshold,
            callback: Rc::new(RefCell::new(callback)),
        });
        Ok(())
    }

    fn set_timeout(&self, delay: Duration, callback: TimerCallback) {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        self.timers.borrow_mut().push(Timer {
            due: self.now.get() + delay,
            seq,
            callback,
        });
    }
}
