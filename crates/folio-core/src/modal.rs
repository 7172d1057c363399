//! Certificate preview modal.
//!
//! The modal's visibility lives only in the document: `aria-hidden` plus the
//! inline `display` style, and the image element's `src`. Every operation
//! looks the elements up again, so the handle never holds stale state.

use std::rc::Rc;

use tracing::debug;

use crate::config::SiteConfig;
use crate::page::{ClickEvent, KeyEvent, Page};

/// Handle used by markup-facing code to show and hide the modal.
pub struct CertificateModal<P: Page> {
    page: Rc<P>,
    modal_id: Rc<str>,
    image_id: Rc<str>,
}

impl<P: Page> Clone for CertificateModal<P> {
    fn clone(&self) -> Self {
        Self {
            page: Rc::clone(&self.page),
            modal_id: Rc::clone(&self.modal_id),
            image_id: Rc::clone(&self.image_id),
        }
    }
}

impl<P: Page> CertificateModal<P> {
    pub fn new(page: Rc<P>, modal_id: &str, image_id: &str) -> Self {
        Self {
            page,
            modal_id: Rc::from(modal_id),
            image_id: Rc::from(image_id),
        }
    }

    pub fn from_config(page: Rc<P>, config: &SiteConfig) -> Self {
        Self::new(page, &config.selectors.modal_id, &config.selectors.image_id)
    }

    fn modal(&self) -> Option<P::Element> {
        self.page.element_by_id(&self.modal_id)
    }

    fn image(&self) -> Option<P::Element> {
        self.page.element_by_id(&self.image_id)
    }

    /// Show `src` in the modal and focus it. No-op unless both the modal and
    /// its image element exist.
    pub fn open(&self, src: &str) {
        let (Some(modal), Some(image)) = (self.modal(), self.image()) else {
            debug!(src, "certificate modal incomplete, open ignored");
            return;
        };
        self.page.set_image_source(&image, src);
        self.page.set_attribute(&modal, "aria-hidden", "false");
        self.page.set_style(&modal, "display", "flex");
        self.page.focus(&modal);
    }

    /// Hide the modal and clear the image. Each element is guarded on its own.
    pub fn close(&self) {
        let Some(modal) = self.modal() else {
            return;
        };
        self.page.set_attribute(&modal, "aria-hidden", "true");
        self.page.set_style(&modal, "display", "none");
        if let Some(image) = self.image() {
            self.page.set_image_source(&image, "");
        }
    }

    /// Whether the modal is currently marked visible.
    pub fn is_open(&self) -> bool {
        self.modal()
            .and_then(|modal| self.page.attribute(&modal, "aria-hidden"))
            .is_some_and(|hidden| hidden == "false")
    }

    /// Wire background-click and Escape-key dismissal.
    ///
    /// Only a click whose direct target is the modal container dismisses;
    /// clicks on its content do not. Escape closes from anywhere, open or not.
    pub fn install(page: Rc<P>, config: &SiteConfig) -> Self {
        let handle = Self::from_config(Rc::clone(&page), config);

        if let Some(modal) = handle.modal() {
            let on_background = handle.clone();
            let container = modal.clone();
            page.on_click(
                &modal,
                Box::new(move |event: &mut ClickEvent<P::Element>| {
                    if event.target() == Some(&container) {
                        on_background.close();
                    }
                }),
            );
        } else {
            debug!(modal_id = %handle.modal_id, "certificate modal missing");
        }

        let on_escape = handle.clone();
        page.on_document_keydown(Box::new(move |event: &KeyEvent| {
            if event.is_escape() {
                on_escape.close();
            }
        }));

        handle
    }
}
