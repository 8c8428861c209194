//! Overlay markup rendering.
//!
//! Produces the static DOM structure the state machine is bound to. Class
//! names and data attributes are the contract with the gesture bindings:
//!
//! | Element | Selector | Binds |
//! |---------|----------|-------|
//! | Activator | `button.hamburger` | `Trigger::Activator` |
//! | Overlay root | `div.mobile-nav-overlay` | `Trigger::Background` (direct hits only) |
//! | Submenu trigger | `button.mobile-submenu-trigger[data-submenu]` | `Trigger::Submenu(id)` |
//! | Right pane | `div.mobile-nav-right` | expanded iff a panel is active |
//! | Panel | `div.mobile-submenu[data-submenu][data-parent]` | panel `id`, parent linkage |
//! | Back control | `button.mobile-back-button` | `Trigger::Back` |
//! | Mirrored theme toggle | `button.mobile-theme-toggle` | `Trigger::ThemeMirror` |
//! | Primary theme toggle | `button.theme-toggle` | the theme switch |
//!
//! Every ARIA attribute is written from the enums in [`crate::aria`], so the
//! initial markup uses the same tokens the state machine writes later.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating with
//! automatic escaping.

use crate::aria::{AriaChecked, AriaExpanded, link_current};
use crate::config::{NavConfig, PanelConfig};
use crate::types::{LinkTarget, NavLink, PanelId};
use maud::{DOCTYPE, Markup, html};

const OVERLAY_ID: &str = "mobile-nav";

/// Renders a single link: an anchor for `href` targets, a trigger button for submenus.
fn render_link(link: &NavLink, current_path: &str) -> Markup {
    html! {
        li {
            @match link.target() {
                LinkTarget::Href(href) => {
                    a href=(href) aria-current=(link_current(href, current_path).as_str()) {
                        (link.label)
                    }
                }
                LinkTarget::Submenu(panel) => {
                    button.mobile-submenu-trigger type="button" data-submenu=(panel.as_str()) {
                        (link.label)
                    }
                }
            }
        }
    }
}

/// Renders one submenu panel with its back control.
fn render_panel(panel: &PanelConfig, current_path: &str) -> Markup {
    html! {
        div.mobile-submenu
            data-submenu=(panel.id.as_str())
            data-parent=[panel.parent.as_ref().map(PanelId::as_str)] {
            button.mobile-back-button type="button" aria-label="Back" { "‹ Back" }
            h2.mobile-submenu-title { (panel.title) }
            ul {
                @for link in &panel.links {
                    (render_link(link, current_path))
                }
            }
        }
    }
}

/// Renders the activator button, collapsed.
pub fn render_activator() -> Markup {
    html! {
        button.hamburger
            type="button"
            aria-label="Open navigation"
            aria-expanded=(AriaExpanded::False.as_str())
            aria-controls=(OVERLAY_ID) {
            span.hamburger-line {}
            span.hamburger-line {}
            span.hamburger-line {}
        }
    }
}

/// Renders the overlay: root list on the left, every panel on the right.
pub fn render_overlay(config: &NavConfig, current_path: &str, dark: bool) -> Markup {
    let checked = AriaChecked::from(dark);
    html! {
        div.mobile-nav-overlay id=(OVERLAY_ID) {
            div.mobile-nav-content {
                div.mobile-nav-left {
                    ul {
                        @for link in &config.links {
                            (render_link(link, current_path))
                        }
                    }
                    button.mobile-theme-toggle
                        type="button"
                        role="switch"
                        aria-checked=(checked.as_str())
                        aria-label="Dark mode" {
                        "Dark mode"
                    }
                }
                div.mobile-nav-right {
                    @for panel in &config.panels {
                        (render_panel(panel, current_path))
                    }
                }
            }
        }
    }
}

/// Renders the desktop header: plain root links, the primary theme toggle, and the activator.
pub fn render_header(config: &NavConfig, current_path: &str, dark: bool) -> Markup {
    html! {
        header.glassy-nav {
            nav {
                ul.nav-links {
                    @for link in &config.links {
                        @if let LinkTarget::Href(href) = link.target() {
                            li {
                                a href=(href) aria-current=(link_current(href, current_path).as_str()) {
                                    (link.label)
                                }
                            }
                        }
                    }
                }
            }
            button.theme-toggle
                type="button"
                role="switch"
                aria-checked=(AriaChecked::from(dark).as_str())
                aria-label="Dark mode" {}
            (render_activator())
        }
    }
}

/// Renders a standalone preview document containing the header and overlay.
pub fn render_document(config: &NavConfig, current_path: &str, dark: bool) -> Markup {
    let body_class = if dark { "dark-theme" } else { "light-theme" };
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Navigation preview" }
            }
            body class=(body_class) {
                (render_header(config, current_path, dark))
                (render_overlay(config, current_path, dark))
            }
        }
    }
}
