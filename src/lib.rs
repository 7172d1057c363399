//! Folio - browser entrypoint
//!
//! Mounts the portfolio behaviors from `folio-core` on the live document once
//! its structure is ready, and exposes the certificate modal to JavaScript.
//!
//! ## Markup contract
//!
//! ```html
//! <!-- optional override of any SiteConfig field -->
//! <script type="application/json" id="folio-config">{"roles": ["Rustacean"]}</script>
//!
//! <div class="exp" tabindex="0" data-certificate="assets/cert.jpg"
//!      onclick="openCertificate('assets/cert.jpg')">...</div>
//! ```
//!
//! ```js
//! import init, { certificates } from "./pkg/folio.js";
//! await init();
//! certificates()?.open("assets/cert.jpg");
//! ```

mod console;
mod dom;

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::logging::LoggingBuilder;
use folio_core::{CertificateModal, Portfolio, SiteConfig};
use gloo::events::EventListener;
use wasm_bindgen::prelude::*;
use web_sys::Window;

pub use console::ConsoleSink;
pub use dom::BrowserPage;

/// Id of the inline JSON configuration override.
const CONFIG_ELEMENT_ID: &str = "folio-config";

thread_local! {
    static CERTIFICATES: RefCell<Option<CertificateModal<BrowserPage>>> = const { RefCell::new(None) };
}

/// Certificate modal handle exported to JavaScript.
#[wasm_bindgen]
pub struct Certificates {
    modal: CertificateModal<BrowserPage>,
}

#[wasm_bindgen]
impl Certificates {
    /// Show `src` in the modal.
    pub fn open(&self, src: &str) {
        self.modal.open(src);
    }

    /// Hide the modal and clear its image.
    pub fn close(&self) {
        self.modal.close();
    }

    #[wasm_bindgen(js_name = isOpen)]
    pub fn is_open(&self) -> bool {
        self.modal.is_open()
    }
}

/// The mounted certificate modal, once the page is ready.
#[wasm_bindgen]
pub fn certificates() -> Option<Certificates> {
    CERTIFICATES.with(|slot| {
        slot.borrow()
            .as_ref()
            .map(|modal| Certificates { modal: modal.clone() })
    })
}

/// Parse the inline override, falling back to defaults when it is absent or
/// unusable.
fn resolve_config(override_json: Option<String>) -> SiteConfig {
    let Some(json) = override_json.filter(|j| !j.trim().is_empty()) else {
        return SiteConfig::default();
    };
    match SiteConfig::from_json(&json) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "config override rejected, using defaults");
            SiteConfig::default()
        }
    }
}

/// Whether mounting has to wait for `DOMContentLoaded`, given
/// `document.readyState`.
fn needs_dom_ready(ready_state: &str) -> bool {
    ready_state == "loading"
}

/// Image source from a legacy `openCertificate(...)` argument. Anything that
/// is not a string, including a missing argument, clears the image.
fn legacy_source(arg: Option<String>) -> String {
    arg.unwrap_or_default()
}

fn load_config(page: &BrowserPage) -> SiteConfig {
    let override_json = page
        .document()
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content());
    resolve_config(override_json)
}

/// Register `openCertificate`/`closeCertificate` on `window` for inline
/// handlers in existing markup.
fn expose_globals(window: &Window, modal: &CertificateModal<BrowserPage>) {
    let open_modal = modal.clone();
    let open = Closure::<dyn Fn(JsValue)>::new(move |src: JsValue| {
        open_modal.open(&legacy_source(src.as_string()))
    });
    let close_modal = modal.clone();
    let close = Closure::<dyn Fn()>::new(move || close_modal.close());

    for (name, function) in [
        ("openCertificate", open.as_ref()),
        ("closeCertificate", close.as_ref()),
    ] {
        if js_sys::Reflect::set(window, &JsValue::from_str(name), function).is_err() {
            tracing::warn!(name, "could not expose global");
        }
    }

    open.forget();
    close.forget();
}

fn mount(page: BrowserPage) {
    let config = load_config(&page);
    let page = Rc::new(page);

    match Portfolio::mount(Rc::clone(&page), &config) {
        Ok(mounted) => {
            expose_globals(page.window(), &mounted.certificates);
            CERTIFICATES.with(|slot| *slot.borrow_mut() = Some(mounted.certificates));
        }
        Err(e) => tracing::error!(error = %e, "mount failed"),
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    if let Err(e) = LoggingBuilder::new().with_filter("info").init(ConsoleSink) {
        web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
    }

    let Some(page) = BrowserPage::new() else {
        return;
    };

    if needs_dom_ready(&page.document().ready_state()) {
        let document = page.document().clone();
        EventListener::once(&document, "DOMContentLoaded", move |_| mount(page)).forget();
    } else {
        mount(page);
    }
}
