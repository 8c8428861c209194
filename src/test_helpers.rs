//! Shared test utilities for the navdeck test suite.
//!
//! Provides a sample navigation structure and assertions over the overlay
//! state machine and the in-memory page.
//!
//! # Sample Structure
//!
//! ```text
//! root list
//! ├── Home            → index.html
//! ├── Services        → [services]
//! │   ├── Web         → [services-web]
//! │   │   ├── Sites   → sites.html
//! │   │   └── Shops   → shops.html
//! │   └── Branding    → branding.html
//! ├── Company         → [company]
//! │   ├── Team        → [company-team]
//! │   │   └── Leadership → leadership.html
//! │   └── Careers     → careers.html
//! └── Contact         → contact.html
//! ```

use crate::config::{NavConfig, parse_config};
use crate::overlay::{NavOverlay, NavState};
use crate::page::MemoryPage;

pub const SAMPLE_NAV_TOML: &str = r#"
breakpoint = 992

[carousel]
slides = 3

[[links]]
label = "Home"
href = "index.html"

[[links]]
label = "Services"
submenu = "services"

[[links]]
label = "Company"
submenu = "company"

[[links]]
label = "Contact"
href = "contact.html"

[[panels]]
id = "services"
title = "Services"
links = [
    { label = "Web", submenu = "services-web" },
    { label = "Branding", href = "branding.html" },
]

[[panels]]
id = "services-web"
title = "Web"
parent = "services"
links = [
    { label = "Sites", href = "sites.html" },
    { label = "Shops", href = "shops.html" },
]

[[panels]]
id = "company"
title = "Company"
links = [
    { label = "Team", submenu = "company-team" },
    { label = "Careers", href = "careers.html" },
]

[[panels]]
id = "company-team"
title = "Team"
parent = "company"
links = [{ label = "Leadership", href = "leadership.html" }]
"#;

/// The sample structure above, parsed and validated.
pub fn sample_config() -> NavConfig {
    parse_config(SAMPLE_NAV_TOML).unwrap()
}

/// Assert the page shows a fully reset, closed overlay.
pub fn assert_closed_page(page: &MemoryPage) {
    assert!(!page.scroll_locked(), "scroll still locked");
    assert!(!page.activator_active(), "activator still active");
    assert!(!page.overlay_active(), "overlay still active");
    assert!(!page.right_pane_expanded(), "right pane still expanded");
    let active: Vec<_> = page.active_panels().collect();
    assert!(active.is_empty(), "panels still active: {active:?}");
}

/// Assert the machine and page agree and the overlay invariants hold.
pub fn assert_consistent(nav: &NavOverlay, page: &MemoryPage) {
    let state = nav.state();
    assert_eq!(page.scroll_locked(), state.is_open(), "scroll lock in {state}");
    assert_eq!(page.overlay_active(), state.is_open(), "overlay flag in {state}");

    let machine_active: Vec<_> = nav.panels().filter(|p| p.is_active()).map(|p| p.id()).collect();
    let page_active: Vec<_> = page.active_panels().collect();
    assert!(machine_active.len() <= 1, "several panels active: {machine_active:?}");
    assert_eq!(machine_active, page_active, "machine and page disagree in {state}");
    assert_eq!(state.submenu(), machine_active.first().copied(), "state vs active in {state}");
    assert_eq!(
        page.right_pane_expanded(),
        !machine_active.is_empty(),
        "right pane in {state}"
    );
    if *state == NavState::Closed {
        assert_closed_page(page);
    }
}
