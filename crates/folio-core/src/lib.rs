//! Folio Core Library
//!
//! Interactivity for a single-page portfolio, written against an abstract
//! [`Page`] so it runs natively in tests and in the browser through the
//! `folio` wasm binding.
//!
//! ## Behaviors
//!
//! - **Backgrounds**: per-section background images
//! - **Typewriter**: looping type/delete animation of role phrases
//! - **Scroll tracking**: accent color and active nav link follow the visible section
//! - **Smooth anchors**: in-page links scroll instead of jumping
//! - **Certificate modal**: image preview with background-click and Escape dismissal
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::rc::Rc;
//! use folio_core::{MemoryPage, Portfolio, SiteConfig};
//!
//! let page = Rc::new(MemoryPage::new());
//! let mounted = Portfolio::mount(Rc::clone(&page), &SiteConfig::default())?;
//! mounted.certificates.open("assets/cert.jpg");
//! ```

pub mod anchor;
pub mod background;
pub mod config;
pub mod error;
pub mod logging;
pub mod modal;
pub mod page;
pub mod scroll;
pub mod site;
pub mod trigger;
pub mod typewriter;

// Re-exports
pub use config::{ScrollSettings, SectionBackground, Selectors, SiteConfig, TypingTiming};
pub use error::{FolioError, FolioResult};
pub use modal::CertificateModal;
pub use page::{ClickEvent, IntersectionEntry, KeyEvent, MemoryPage, NodeId, Page};
pub use scroll::{ScrollTracker, TrackerMode};
pub use site::{Mounted, Portfolio};
pub use trigger::extract_legacy_source;
pub use typewriter::{Cursor, Frame, Phase, Typewriter, TypewriterLoop};
