//! Site configuration
//!
//! Every literal the page behaviors depend on lives here: the background
//! table, the role phrases, section colors, timings and the selectors the
//! markup is expected to provide. `SiteConfig::default()` is the shipped
//! site; a JSON document can override any subset of fields.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{FolioError, FolioResult};

/// One entry of the section-background table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionBackground {
    /// Selector of the section element (e.g. `#home`)
    pub selector: String,
    /// Image path applied as the background
    pub image: String,
}

impl SectionBackground {
    pub fn new(selector: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            image: image.into(),
        }
    }
}

/// Tick intervals of the typewriter, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypingTiming {
    /// Delay between typed characters
    pub type_ms: u64,
    /// Delay between deleted characters
    pub delete_ms: u64,
    /// Pause after a phrase is fully typed
    pub hold_ms: u64,
    /// Pause after a phrase is fully deleted, before the next one
    pub advance_ms: u64,
}

impl Default for TypingTiming {
    fn default() -> Self {
        Self {
            type_ms: 120,
            delete_ms: 60,
            hold_ms: 1200,
            advance_ms: 200,
        }
    }
}

impl TypingTiming {
    pub fn type_delay(&self) -> Duration {
        Duration::from_millis(self.type_ms)
    }

    pub fn delete_delay(&self) -> Duration {
        Duration::from_millis(self.delete_ms)
    }

    pub fn hold_delay(&self) -> Duration {
        Duration::from_millis(self.hold_ms)
    }

    pub fn advance_delay(&self) -> Duration {
        Duration::from_millis(self.advance_ms)
    }
}

/// Scroll tracking settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollSettings {
    /// Visible fraction at which a section becomes active
    pub threshold: f64,
    /// Custom property on the document root that carries the accent color
    pub accent_property: String,
    /// Class marking the active navigation link
    pub active_class: String,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            threshold: 0.55,
            accent_property: "--accent".to_string(),
            active_class: "active".to_string(),
        }
    }
}

/// Selectors and ids the behaviors look up in the markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    /// Id of the typewriter text container
    pub typed_id: String,
    /// Navigation links tracked for the active marker
    pub nav_links: String,
    /// Sections observed for visibility
    pub sections: String,
    /// In-page anchors that scroll smoothly
    pub anchors: String,
    /// Id of the certificate modal container
    pub modal_id: String,
    /// Id of the image element inside the modal
    pub image_id: String,
    /// Certificate trigger elements that get Enter-key activation
    pub triggers: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            typed_id: "typed".to_string(),
            nav_links: ".main-nav .nav-link".to_string(),
            sections: ".section[id]".to_string(),
            anchors: "a[href^=\"#\"]".to_string(),
            modal_id: "certificateModal".to_string(),
            image_id: "certImage".to_string(),
            triggers: ".exp".to_string(),
        }
    }
}

/// Complete configuration for one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub backgrounds: Vec<SectionBackground>,
    pub roles: Vec<String>,
    /// Accent color per section id
    pub section_colors: BTreeMap<String, String>,
    /// Section whose color is used when visibility tracking is unavailable
    pub home_section: String,
    pub typing: TypingTiming,
    pub scroll: ScrollSettings,
    pub selectors: Selectors,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let backgrounds = vec![
            SectionBackground::new("#home", "assets/bg-hero.jpg"),
            SectionBackground::new("#about", "assets/bg-about.jpg"),
            SectionBackground::new("#skills", "assets/bg-skills.jpg"),
            SectionBackground::new("#projects", "assets/bg-projects.jpg"),
            SectionBackground::new("#experience", "assets/bg-experience.jpg"),
            SectionBackground::new("#contact", "assets/download.jpeg"),
        ];

        let roles = ["Cloud & IoT Developer", "Full-Stack Developer", "Problem Solver"]
            .into_iter()
            .map(String::from)
            .collect();

        let section_colors = [
            ("home", "#108f73ff"),
            ("about", "#db0808ff"),
            ("skills", "#74b9ff"),
            ("projects", "#55efc4"),
            ("experience", "#ffeaa7"),
            ("contact", "#a29bfe"),
        ]
        .into_iter()
        .map(|(id, color)| (id.to_string(), color.to_string()))
        .collect();

        Self {
            backgrounds,
            roles,
            section_colors,
            home_section: "home".to_string(),
            typing: TypingTiming::default(),
            scroll: ScrollSettings::default(),
            selectors: Selectors::default(),
        }
    }
}

impl SiteConfig {
    /// Parse a JSON override; fields not present keep their defaults.
    pub fn from_json(json: &str) -> FolioResult<Self> {
        let config: SiteConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON file.
    pub fn load(path: impl AsRef<std::path::Path>) -> FolioResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject configurations the behaviors cannot run with.
    pub fn validate(&self) -> FolioResult<()> {
        if self.roles.is_empty() {
            return Err(FolioError::InvalidConfig(
                "roles must not be empty".to_string(),
            ));
        }
        if self.typing.type_ms == 0 || self.typing.delete_ms == 0 {
            return Err(FolioError::InvalidConfig(
                "type_ms and delete_ms must be positive".to_string(),
            ));
        }
        let threshold = self.scroll.threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(FolioError::InvalidConfig(format!(
                "threshold {} outside (0, 1]",
                threshold
            )));
        }
        if self.home_color().is_none() {
            return Err(FolioError::InvalidConfig(format!(
                "home section '{}' has no color",
                self.home_section
            )));
        }
        Ok(())
    }

    /// Accent color of a section, if one is mapped.
    pub fn color_for(&self, section_id: &str) -> Option<&str> {
        self.section_colors.get(section_id).map(String::as_str)
    }

    /// Accent color of the home section.
    pub fn home_color(&self) -> Option<&str> {
        self.color_for(&self.home_section)
    }
}
