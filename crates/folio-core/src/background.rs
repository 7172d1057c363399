//! Section background images.

use tracing::debug;

use crate::config::SectionBackground;
use crate::page::Page;

/// CSS value for a background image path.
pub fn background_url(image: &str) -> String {
    format!("url('{}')", image)
}

/// Apply every background entry whose section exists on the page.
///
/// Missing sections are skipped. Returns how many sections were styled.
pub fn apply_backgrounds<P: Page>(page: &P, backgrounds: &[SectionBackground]) -> usize {
    let mut applied = 0;
    for entry in backgrounds {
        let Some(el) = page.query(&entry.selector) else {
            debug!(selector = %entry.selector, "background target missing, skipped");
            continue;
        };
        page.set_style(&el, "background-image", &background_url(&entry.image));
        page.set_style(&el, "background-size", "cover");
        page.set_style(&el, "background-position", "center");
        applied += 1;
    }
    applied
}
