//! Keyboard activation for certificate trigger elements.
//!
//! Triggers are non-button elements, so Enter does nothing natively. Each
//! trigger gets a keypress handler that resolves the image path and opens
//! the modal. The path comes from the `data-certificate` attribute; markup
//! that still carries an inline `onclick="openCertificate('...')"` is read
//! by pattern matching that text.

use std::rc::Rc;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::modal::CertificateModal;
use crate::page::{KeyEvent, Page};

/// Attribute holding the image path explicitly.
pub const CERTIFICATE_ATTRIBUTE: &str = "data-certificate";

/// Inline handler attribute used by older markup.
pub const LEGACY_ATTRIBUTE: &str = "onclick";

fn legacy_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"openCertificate\(['"](.+?)['"]\)"#).expect("valid regex")
    })
}

/// Extract the image path from inline handler text like
/// `openCertificate('assets/cert.jpg')`.
pub fn extract_legacy_source(text: &str) -> Option<String> {
    legacy_pattern()
        .captures(text)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
}

/// Image path a trigger should open, if it declares one.
pub fn certificate_source<P: Page>(page: &P, el: &P::Element) -> Option<String> {
    if let Some(src) = page.attribute(el, CERTIFICATE_ATTRIBUTE) {
        return Some(src);
    }
    page.attribute(el, LEGACY_ATTRIBUTE)
        .as_deref()
        .and_then(extract_legacy_source)
}

/// Give every trigger matching `selector` Enter-key activation.
///
/// The source is resolved when the key is pressed. Returns how many
/// triggers were wired.
pub fn install_keyboard_triggers<P: Page>(
    page: &Rc<P>,
    selector: &str,
    modal: &CertificateModal<P>,
) -> usize {
    let triggers = page.query_all(selector);
    for trigger in &triggers {
        let handler_page = Rc::clone(page);
        let el = trigger.clone();
        let modal = modal.clone();
        page.on_keypress(
            trigger,
            Box::new(move |event: &KeyEvent| {
                if !event.is_enter() {
                    return;
                }
                match certificate_source(handler_page.as_ref(), &el) {
                    Some(src) => modal.open(&src),
                    None => debug!("trigger has no certificate source"),
                }
            }),
        );
    }
    triggers.len()
}
