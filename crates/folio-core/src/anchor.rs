//! Smooth scrolling for in-page anchors.

use std::rc::Rc;

use tracing::debug;

use crate::page::{ClickEvent, Page};

/// Wire every anchor matching `selector`. Returns how many were wired.
///
/// On click the link's current `href` is read. Any fragment link has its
/// default navigation suppressed, whether or not the fragment resolves;
/// when it does, the target is scrolled into view smoothly.
pub fn install_smooth_scroll<P: Page>(page: &Rc<P>, selector: &str) -> usize {
    let anchors = page.query_all(selector);
    for anchor in &anchors {
        let handler_page = Rc::clone(page);
        let link = anchor.clone();
        page.on_click(
            anchor,
            Box::new(move |event: &mut ClickEvent<P::Element>| {
                follow_fragment(handler_page.as_ref(), &link, event);
            }),
        );
    }
    anchors.len()
}

/// Handle one activation of a fragment link.
pub fn follow_fragment<P: Page>(page: &P, link: &P::Element, event: &mut ClickEvent<P::Element>) {
    let Some(href) = page.attribute(link, "href") else {
        return;
    };
    if !href.starts_with('#') {
        return;
    }

    event.prevent_default();
    match page.query(&href) {
        Some(target) => page.scroll_into_view(&target),
        None => debug!(href = %href, "fragment target missing, navigation suppressed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::MemoryPage;

    const ANCHORS: &str = "a[href^=\"#\"]";

    #[test]
    fn test_click_scrolls_to_target() {
        let page = Rc::new(MemoryPage::new());
        let link = page.add(None, "a", &[("href", "#about")]);
        let about = page.add(None, "section", &[("id", "about")]);

        assert_eq!(install_smooth_scroll(&page, ANCHORS), 1);

        assert!(page.click(link));
        assert_eq!(page.scrolled(), vec![about]);
    }

    #[test]
    fn test_missing_target_still_suppresses() {
        let page = Rc::new(MemoryPage::new());
        let link = page.add(None, "a", &[("href", "#nowhere")]);
        install_smooth_scroll(&page, ANCHORS);

        assert!(page.click(link));
        assert!(page.scrolled().is_empty());
    }

    #[test]
    fn test_bare_hash_suppresses_without_scroll() {
        let page = Rc::new(MemoryPage::new());
        let link = page.add(None, "a", &[("href", "#")]);
        install_smooth_scroll(&page, ANCHORS);

        assert!(page.click(link));
        assert!(page.scrolled().is_empty());
    }

    #[test]
    fn test_external_links_untouched() {
        let page = Rc::new(MemoryPage::new());
        let external = page.add(None, "a", &[("href", "https://example.com")]);

        assert_eq!(install_smooth_scroll(&page, ANCHORS), 0);
        assert!(!page.click(external));
    }

    #[test]
    fn test_href_read_at_click_time() {
        let page = Rc::new(MemoryPage::new());
        let link = page.add(None, "a", &[("href", "#about")]);
        let _about = page.add(None, "section", &[("id", "about")]);
        let skills = page.add(None, "section", &[("id", "skills")]);
        install_smooth_scroll(&page, ANCHORS);

        page.set_attribute(&link, "href", "#skills");
        assert!(page.click(link));
        assert_eq!(page.scrolled(), vec![skills]);

        page.set_attribute(&link, "href", "/elsewhere");
        assert!(!page.click(link));
    }
}
