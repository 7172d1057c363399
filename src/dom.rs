//! [`Page`] over the live browser document.

use std::time::Duration;

use folio_core::page::{
    ClickEvent, ClickHandler, IntersectionEntry, IntersectionHandler, KeyEvent, KeyHandler, Page,
    TimerCallback,
};
use folio_core::{FolioError, FolioResult};
use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, HtmlImageElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent, ScrollBehavior,
    ScrollIntoViewOptions, Window,
};

/// Timer delay in the millisecond units `setTimeout` takes.
pub(crate) fn delay_millis(delay: Duration) -> u32 {
    u32::try_from(delay.as_millis()).unwrap_or(u32::MAX)
}

/// The page the wasm module was loaded into.
pub struct BrowserPage {
    window: Window,
    document: Document,
}

impl BrowserPage {
    /// `None` outside a browsing context (e.g. in a worker).
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn html(el: &Element) -> Option<&HtmlElement> {
        el.dyn_ref::<HtmlElement>()
    }

    fn supports_intersection(&self) -> bool {
        js_sys::Reflect::has(&self.window, &JsValue::from_str("IntersectionObserver"))
            .unwrap_or(false)
    }
}

impl Page for BrowserPage {
    type Element = Element;

    fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        let Ok(nodes) = self.document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn attribute(&self, el: &Element, name: &str) -> Option<String> {
        el.get_attribute(name)
    }

    fn set_attribute(&self, el: &Element, name: &str, value: &str) {
        let _ = el.set_attribute(name, value);
    }

    fn set_style(&self, el: &Element, property: &str, value: &str) {
        if let Some(html) = Self::html(el) {
            let _ = html.style().set_property(property, value);
        }
    }

    fn set_root_property(&self, name: &str, value: &str) {
        if let Some(root) = self.document.document_element() {
            self.set_style(&root, name, value);
        }
    }

    fn add_class(&self, el: &Element, class: &str) {
        let _ = el.class_list().add_1(class);
    }

    fn remove_class(&self, el: &Element, class: &str) {
        let _ = el.class_list().remove_1(class);
    }

    fn set_text(&self, el: &Element, text: &str) {
        el.set_text_content(Some(text));
    }

    fn set_image_source(&self, el: &Element, src: &str) {
        match el.dyn_ref::<HtmlImageElement>() {
            Some(img) => img.set_src(src),
            None => self.set_attribute(el, "src", src),
        }
    }

    fn focus(&self, el: &Element) {
        if let Some(html) = Self::html(el) {
            let _ = html.focus();
        }
    }

    fn scroll_into_view(&self, el: &Element) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        el.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn on_click(&self, el: &Element, handler: ClickHandler<Element>) {
        let mut handler = handler;
        EventListener::new(el, "click", move |event| {
            let target = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok());
            let mut click = ClickEvent::new(target);
            handler(&mut click);
            if click.default_prevented() {
                event.prevent_default();
            }
        })
        .forget();
    }

    fn on_keypress(&self, el: &Element, handler: KeyHandler) {
        let mut handler = handler;
        EventListener::new(el, "keypress", move |event| {
            if let Some(key) = event.dyn_ref::<KeyboardEvent>() {
                handler(&KeyEvent::new(key.key()));
            }
        })
        .forget();
    }

    fn on_document_keydown(&self, handler: KeyHandler) {
        let mut handler = handler;
        EventListener::new(&self.document, "keydown", move |event| {
            if let Some(key) = event.dyn_ref::<KeyboardEvent>() {
                handler(&KeyEvent::new(key.key()));
            }
        })
        .forget();
    }

    fn observe_intersections(
        &self,
        targets: &[Element],
        threshold: f64,
        callback: IntersectionHandler<Element>,
    ) -> FolioResult<()> {
        if !self.supports_intersection() {
            return Err(FolioError::Unsupported("IntersectionObserver"));
        }

        let mut callback = callback;
        let on_batch = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                let batch = entries
                    .iter()
                    .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                    .map(|entry| IntersectionEntry {
                        target: entry.target(),
                        is_intersecting: entry.is_intersecting(),
                        ratio: entry.intersection_ratio(),
                    })
                    .collect();
                callback(batch);
            },
        );

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(threshold));
        let observer =
            IntersectionObserver::new_with_options(on_batch.as_ref().unchecked_ref(), &options)
                .map_err(|_| FolioError::Unsupported("IntersectionObserver"))?;

        for target in targets {
            observer.observe(target);
        }
        on_batch.forget();
        Ok(())
    }

    fn set_timeout(&self, delay: Duration, callback: TimerCallback) {
        Timeout::new(delay_millis(delay), callback).forget();
    }
}
