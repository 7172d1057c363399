//! Page Integration Tests
//!
//! Mount every behavior on an in-memory page shaped like the portfolio
//! markup and drive it with synthetic events, timers and visibility reports.

use std::rc::Rc;
use std::time::Duration;

use folio_core::logging::{LoggingBuilder, MemorySink};
use folio_core::{MemoryPage, NodeId, Page, Portfolio, SiteConfig, TrackerMode};

// ============================================================================
// Test Utilities
// ============================================================================

struct Site {
    page: Rc<MemoryPage>,
    sections: Vec<(String, NodeId)>,
    nav_links: Vec<NodeId>,
    typed: NodeId,
    modal: NodeId,
    image: NodeId,
    trigger: NodeId,
    legacy_trigger: NodeId,
}

impl Site {
    fn section(&self, id: &str) -> NodeId {
        self.sections
            .iter()
            .find(|(name, _)| name == id)
            .map(|(_, node)| *node)
            .expect("section exists")
    }

    fn active_links(&self) -> Vec<NodeId> {
        self.nav_links
            .iter()
            .copied()
            .filter(|l| self.page.has_class(*l, "active"))
            .collect()
    }

    fn link_for(&self, id: &str) -> NodeId {
        let href = format!("#{}", id);
        self.nav_links
            .iter()
            .copied()
            .find(|l| self.page.attribute(l, "href").as_deref() == Some(href.as_str()))
            .expect("nav link exists")
    }
}

/// Build the full portfolio markup.
fn portfolio_site() -> Site {
    let page = Rc::new(MemoryPage::new());
    let ids = ["home", "about", "skills", "projects", "experience", "contact"];

    let header = page.add(None, "header", &[]);
    let nav = page.add(Some(header), "nav", &[("class", "main-nav")]);
    let nav_links = ids
        .into_iter()
        .map(|id| {
            let href = format!("#{}", id);
            page.add(Some(nav), "a", &[("class", "nav-link"), ("href", href.as_str())])
        })
        .collect();

    let main = page.add(None, "main", &[]);
    let sections: Vec<(String, NodeId)> = ids
        .into_iter()
        .map(|id| {
            (
                id.to_string(),
                page.add(Some(main), "section", &[("class", "section"), ("id", id)]),
            )
        })
        .collect();

    let home = sections[0].1;
    let typed = page.add(Some(home), "span", &[("id", "typed")]);

    let experience = sections[4].1;
    let trigger = page.add(
        Some(experience),
        "div",
        &[("class", "exp"), ("tabindex", "0"), ("data-certificate", "assets/aws.jpg")],
    );
    let legacy_trigger = page.add(
        Some(experience),
        "div",
        &[
            ("class", "exp"),
            ("tabindex", "0"),
            ("onclick", "openCertificate('assets/iot.jpg')"),
        ],
    );

    let modal = page.add(
        None,
        "div",
        &[("id", "certificateModal"), ("aria-hidden", "true")],
    );
    let content = page.add(Some(modal), "div", &[("class", "modal-content")]);
    let image = page.add(Some(content), "img", &[("id", "certImage")]);

    Site {
        page,
        sections,
        nav_links,
        typed,
        modal,
        image,
        trigger,
        legacy_trigger,
    }
}

fn mount(site: &Site) -> folio_core::Mounted<MemoryPage> {
    Portfolio::mount(Rc::clone(&site.page), &SiteConfig::default()).expect("mount succeeds")
}

// ============================================================================
// Mount Tests
// ============================================================================

#[test]
fn test_mount_wires_everything() {
    let site = portfolio_site();
    let mounted = mount(&site);

    assert_eq!(mounted.backgrounds, 6);
    assert_eq!(mounted.tracker, TrackerMode::Observing { sections: 6 });
    assert_eq!(mounted.anchors, 6);
    assert_eq!(mounted.triggers, 2);
}

#[test]
fn test_backgrounds_match_table() {
    let site = portfolio_site();
    mount(&site);

    for entry in SiteConfig::default().backgrounds {
        let id = entry.selector.trim_start_matches('#');
        let section = site.section(id);
        assert_eq!(
            site.page.style(section, "background-image"),
            Some(format!("url('{}')", entry.image))
        );
        assert_eq!(site.page.style(section, "background-size").as_deref(), Some("cover"));
        assert_eq!(
            site.page.style(section, "background-position").as_deref(),
            Some("center")
        );
    }
}

#[test]
fn test_mount_logs_summary() {
    let site = portfolio_site();
    let sink = MemorySink::new();

    LoggingBuilder::new()
        .with_filter("info")
        .scoped(sink.clone(), || mount(&site))
        .unwrap();

    let mounted = sink.matching("portfolio mounted");
    assert_eq!(mounted.len(), 1);
    assert_eq!(mounted[0].span.as_deref(), Some("mount"));
    assert_eq!(mounted[0].field("backgrounds"), Some(&serde_json::json!(6)));
}

// ============================================================================
// Typewriter Tests
// ============================================================================

#[test]
fn test_typewriter_types_first_role() {
    let site = portfolio_site();
    mount(&site);

    assert_eq!(site.page.text(site.typed), "C");
    site.page.advance(Duration::from_millis(120 * 4));
    assert_eq!(site.page.text(site.typed), "Cloud");
}

#[test]
fn test_typewriter_reaches_second_role() {
    let site = portfolio_site();
    mount(&site);

    let first = "Cloud & IoT Developer".chars().count() as u64;
    // Typing the rest, hold, deleting all but the last, then the final
    // delete that advances.
    let elapsed = 120 * (first - 1) + 1200 + 60 * (first - 1);
    site.page.advance(Duration::from_millis(elapsed));
    assert_eq!(site.page.text(site.typed), "");
    assert_eq!(site.page.next_timer_delay(), Some(Duration::from_millis(200)));

    site.page.advance(Duration::from_millis(200));
    assert_eq!(site.page.text(site.typed), "F");
}

#[test]
fn test_typewriter_survives_missing_target() {
    let site = portfolio_site();
    mount(&site);

    site.page.detach(site.typed);
    site.page.advance(Duration::from_secs(10));
    assert_eq!(site.page.pending_timers(), 1);
}

// ============================================================================
// Scroll Tracking Tests
// ============================================================================

#[test]
fn test_single_active_link_follows_latest_section() {
    let site = portfolio_site();
    mount(&site);

    for id in ["about", "projects", "contact", "home"] {
        site.page.report_intersections(&[(site.section(id), 0.9)]);
        assert_eq!(site.active_links(), vec![site.link_for(id)]);
        assert_eq!(
            site.page.root_property("--accent"),
            SiteConfig::default().color_for(id).map(String::from)
        );
    }
}

#[test]
fn test_fallback_accent_without_observer() {
    let site = portfolio_site();
    site.page.set_intersection_supported(false);
    let mounted = mount(&site);

    assert_eq!(mounted.tracker, TrackerMode::Fallback);
    assert_eq!(site.page.root_property("--accent").as_deref(), Some("#108f73ff"));
    assert!(site.active_links().is_empty());
}

// ============================================================================
// Smooth Scroll Tests
// ============================================================================

#[test]
fn test_nav_click_scrolls_smoothly() {
    let site = portfolio_site();
    mount(&site);

    let prevented = site.page.click(site.link_for("about"));
    assert!(prevented);
    assert_eq!(site.page.scrolled(), vec![site.section("about")]);
}

// ============================================================================
// Certificate Modal Tests
// ============================================================================

#[test]
fn test_open_close_round() {
    let site = portfolio_site();
    let mounted = mount(&site);

    mounted.certificates.open("x.jpg");
    assert_eq!(site.page.attribute(&site.modal, "aria-hidden").as_deref(), Some("false"));
    assert_eq!(site.page.focused(), Some(site.modal));

    mounted.certificates.close();
    assert_eq!(site.page.attribute(&site.modal, "aria-hidden").as_deref(), Some("true"));
    assert_eq!(site.page.attribute(&site.image, "src").as_deref(), Some(""));
}

#[test]
fn test_background_click_and_escape_dismiss() {
    let site = portfolio_site();
    let mounted = mount(&site);

    mounted.certificates.open("x.jpg");
    site.page.click(site.image);
    assert!(mounted.certificates.is_open());
    site.page.click(site.modal);
    assert!(!mounted.certificates.is_open());

    mounted.certificates.open("x.jpg");
    site.page.keydown("Escape");
    assert!(!mounted.certificates.is_open());
}

#[test]
fn test_enter_on_triggers_opens_modal() {
    let site = portfolio_site();
    let mounted = mount(&site);

    site.page.keypress(site.trigger, "Enter");
    assert!(mounted.certificates.is_open());
    assert_eq!(site.page.attribute(&site.image, "src").as_deref(), Some("assets/aws.jpg"));

    site.page.keydown("Escape");
    site.page.keypress(site.legacy_trigger, "Enter");
    assert!(mounted.certificates.is_open());
    assert_eq!(site.page.attribute(&site.image, "src").as_deref(), Some("assets/iot.jpg"));
}
