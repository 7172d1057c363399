//! One-shot mount routine wiring every page behavior.

use std::rc::Rc;

use tracing::info;

use crate::anchor::install_smooth_scroll;
use crate::background::apply_backgrounds;
use crate::config::SiteConfig;
use crate::error::FolioResult;
use crate::modal::CertificateModal;
use crate::page::Page;
use crate::scroll::{ScrollTracker, TrackerMode};
use crate::trigger::install_keyboard_triggers;
use crate::typewriter::{Typewriter, TypewriterLoop};

/// What a mount did, plus the modal handle for markup-facing code.
pub struct Mounted<P: Page> {
    pub backgrounds: usize,
    pub tracker: TrackerMode,
    pub anchors: usize,
    pub triggers: usize,
    pub certificates: CertificateModal<P>,
}

pub struct Portfolio;

impl Portfolio {
    /// Wire backgrounds, typewriter, scroll tracking, smooth anchors and the
    /// certificate modal. Call once, after the document structure is ready.
    ///
    /// Fails only if `config` is invalid; missing elements just disable the
    /// matching effect.
    pub fn mount<P: Page>(page: Rc<P>, config: &SiteConfig) -> FolioResult<Mounted<P>> {
        config.validate()?;
        let span = tracing::info_span!("mount");
        let _guard = span.enter();

        let backgrounds = apply_backgrounds(page.as_ref(), &config.backgrounds);

        let typewriter = Typewriter::from_config(config)?;
        TypewriterLoop::start(Rc::clone(&page), typewriter, &config.selectors.typed_id);

        let tracker = ScrollTracker::install(Rc::clone(&page), config);
        let anchors = install_smooth_scroll(&page, &config.selectors.anchors);

        let certificates = CertificateModal::install(Rc::clone(&page), config);
        let triggers = install_keyboard_triggers(&page, &config.selectors.triggers, &certificates);

        info!(backgrounds, anchors, triggers, tracker = ?tracker, "portfolio mounted");

        Ok(Mounted {
            backgrounds,
            tracker,
            anchors,
            triggers,
            certificates,
        })
    }
}
