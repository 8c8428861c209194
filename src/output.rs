//! CLI output formatting.
//!
//! # Check
//!
//! The navigation structure is shown as the user walks it: root list first,
//! each submenu trigger followed by the contents of the panel it opens.
//!
//! ```text
//! Breakpoint: 992px
//!
//! Root list
//! 001 Home → index.html
//! 002 Services ▸ services
//!     001 Web ▸ services-web
//!         001 Sites → sites.html
//!     002 Branding → branding.html
//!
//! 4 panels, 9 links
//! ```
//!
//! # Simulate
//!
//! One header line per script step (positional index + the step as written),
//! then indented context lines describing what changed:
//!
//! ```text
//! 001 tap activator
//!     Closed → Open.RootList
//! 002 tap submenu ghost
//!     Open.RootList (unchanged)
//! 003 scroll 400 at 100
//!     nav hidden, parallax 200px, back-to-top shown
//! 004 image-error 0
//!     image 0 → placeholder
//! ```
//!
//! # Architecture
//!
//! Each output has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::config::NavConfig;
use crate::content::Enhanced;
use crate::page::MemoryPage;
use crate::scroll::NavVisibility;
use crate::session::Outcome;
use crate::types::{LinkTarget, NavLink};

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

// ============================================================================
// Tree walker
// ============================================================================

/// A flattened node from walking the link tree.
struct TreeNode<'a> {
    depth: usize,
    position: usize,
    link: &'a NavLink,
}

/// Walk links from the root list, descending into the panel each submenu
/// trigger opens. Positions are assigned per list.
fn walk_links(config: &NavConfig) -> Vec<TreeNode<'_>> {
    let mut nodes = Vec::new();
    walk_links_recursive(config, &config.links, 0, &mut nodes);
    nodes
}

fn walk_links_recursive<'a>(
    config: &'a NavConfig,
    links: &'a [NavLink],
    depth: usize,
    nodes: &mut Vec<TreeNode<'a>>,
) {
    for (i, link) in links.iter().enumerate() {
        nodes.push(TreeNode {
            depth,
            position: i + 1,
            link,
        });
        // Validated configs only link a panel from its parent, so depth is bounded.
        if let LinkTarget::Submenu(id) = link.target() {
            if let Some(panel) = config.panel(id) {
                if depth < config.panels.len() {
                    walk_links_recursive(config, &panel.links, depth + 1, nodes);
                }
            }
        }
    }
}

fn link_line(node: &TreeNode<'_>) -> String {
    let target = match node.link.target() {
        LinkTarget::Href(href) => format!("→ {href}"),
        LinkTarget::Submenu(id) => format!("▸ {id}"),
    };
    format!(
        "{}{} {} {}",
        indent(node.depth),
        format_index(node.position),
        node.link.label,
        target
    )
}

// ============================================================================
// Check output
// ============================================================================

/// Format the navigation structure of a validated config.
pub fn format_check_output(config: &NavConfig) -> Vec<String> {
    let mut lines = vec![format!("Breakpoint: {}px", config.breakpoint), String::new()];

    lines.push("Root list".to_string());
    let nodes = walk_links(config);
    if nodes.is_empty() {
        lines.push("    (empty)".to_string());
    }
    lines.extend(nodes.iter().map(link_line));

    let unreachable = config.unreachable_panels();
    if !unreachable.is_empty() {
        lines.push(String::new());
        lines.push("Unreachable panels".to_string());
        for id in unreachable {
            lines.push(format!("    {id}"));
        }
    }

    let link_count = config.links.len() + config.panels.iter().map(|p| p.links.len()).sum::<usize>();
    lines.push(String::new());
    lines.push(format!(
        "{} panels, {} links",
        config.panels.len(),
        link_count
    ));
    let content = &config.content;
    if !content.images.is_empty() || !content.cards.is_empty() {
        lines.push(format!(
            "{} images, {} cards",
            content.images.len(),
            content.cards.len()
        ));
    }
    lines
}

pub fn print_check_output(config: &NavConfig) {
    for line in format_check_output(config) {
        println!("{}", line);
    }
}

// ============================================================================
// Simulate output
// ============================================================================

/// Describe what handling one event changed.
pub fn describe_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Nav(t) if t.changed() => format!("{} → {}", t.from, t.to),
        Outcome::Nav(t) => format!("{} (unchanged)", t.to),
        Outcome::Theme(Some(theme)) => format!("theme {}", theme.as_str()),
        Outcome::Theme(None) => "no theme toggle".to_string(),
        Outcome::Scroll(Some(effect)) => format!(
            "nav {}, parallax {}px, back-to-top {}",
            match effect.nav {
                NavVisibility::Shown => "shown",
                NavVisibility::Hidden => "hidden",
            },
            effect.parallax_offset,
            if effect.back_to_top { "shown" } else { "hidden" }
        ),
        Outcome::Scroll(None) => "throttled".to_string(),
        Outcome::Slide(Some(slide)) => format!("slide {slide}"),
        Outcome::Slide(None) => "slide unchanged".to_string(),
        Outcome::Image(Some(index)) => format!("image {index} → placeholder"),
        Outcome::Image(None) => "image unchanged".to_string(),
        Outcome::Card(Some(index)) => format!("card {index} focus changed"),
        Outcome::Card(None) => "card unchanged".to_string(),
        Outcome::Focus(true) => "keyboard focus on".to_string(),
        Outcome::Focus(false) => "keyboard focus off".to_string(),
    }
}

/// Format the load-time content pass, or nothing when it changed nothing.
pub fn format_enhanced(report: &Enhanced) -> Vec<String> {
    if *report == Enhanced::default() {
        return Vec::new();
    }
    vec![format!(
        "Enhanced: {} lazy images, {} labelled buttons, {} focusable cards",
        report.lazy_images, report.labelled_buttons, report.focusable_cards
    )]
}

/// Format one replayed step: header line plus what it changed.
pub fn format_step(index: usize, text: &str, outcome: &Outcome) -> Vec<String> {
    vec![
        format!("{} {}", format_index(index), text),
        format!("{}{}", indent(1), describe_outcome(outcome)),
    ]
}

/// Format the final element state of the page.
pub fn format_page_state(page: &MemoryPage) -> Vec<String> {
    let flag = |on: bool| if on { "yes" } else { "no" };
    let active: Vec<String> = page.active_panels().map(|p| p.to_string()).collect();
    let mut lines = vec![
        "Page".to_string(),
        format!("{}scroll locked: {}", indent(1), flag(page.scroll_locked())),
        format!(
            "{}activator: {} (aria-expanded=\"{}\")",
            indent(1),
            if page.activator_active() { "active" } else { "inactive" },
            page.activator_expanded()
        ),
        format!("{}right pane expanded: {}", indent(1), flag(page.right_pane_expanded())),
        format!(
            "{}active panels: {}",
            indent(1),
            if active.is_empty() { "none".to_string() } else { active.join(", ") }
        ),
    ];
    if let Some(theme) = page.theme() {
        lines.push(format!(
            "{}theme: {} (aria-checked=\"{}\")",
            indent(1),
            theme.theme().as_str(),
            theme.aria_checked()
        ));
    }
    if let Some(slide) = page.active_slide() {
        lines.push(format!("{}slide: {}", indent(1), slide));
    }
    lines.push(format!("{}keyboard focus: {}", indent(1), flag(page.keyboard_focus())));
    let content = page.content();
    let list = |items: Vec<String>| if items.is_empty() { "none".to_string() } else { items.join(", ") };
    if !content.images.is_empty() {
        let placeholders = content
            .images
            .iter()
            .enumerate()
            .filter(|(_, image)| image.is_placeholder())
            .map(|(i, _)| i.to_string())
            .collect();
        lines.push(format!("{}placeholder images: {}", indent(1), list(placeholders)));
    }
    if !content.cards.is_empty() {
        let focused = content
            .cards
            .iter()
            .filter(|card| card.is_focused())
            .map(|card| card.title.clone())
            .collect();
        lines.push(format!("{}focused cards: {}", indent(1), list(focused)));
    }
    lines
}

pub fn print_step(index: usize, text: &str, outcome: &Outcome) {
    for line in format_step(index, text, outcome) {
        println!("{}", line);
    }
}

pub fn print_enhanced(report: &Enhanced) {
    for line in format_enhanced(report) {
        println!("{}", line);
    }
}

pub fn print_page_state(page: &MemoryPage) {
    for line in format_page_state(page) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Card, Enhanced, Image};
    use crate::overlay::{NavState, OpenView, Transition};
    use crate::page::Page;
    use crate::scroll::ScrollEffect;
    use crate::test_helpers::sample_config;
    use crate::theme::Theme;
    use crate::types::PanelId;

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
    }

    #[test]
    fn indent_levels() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "        ");
    }

    #[test]
    fn walk_links_descends_into_panels() {
        let config = sample_config();
        let nodes = walk_links(&config);
        let shape: Vec<_> = nodes
            .iter()
            .map(|n| (n.depth, n.position, n.link.label.as_str()))
            .collect();
        assert_eq!(
            shape,
            vec![
                (0, 1, "Home"),
                (0, 2, "Services"),
                (1, 1, "Web"),
                (2, 1, "Sites"),
                (2, 2, "Shops"),
                (1, 2, "Branding"),
                (0, 3, "Company"),
                (1, 1, "Team"),
                (2, 1, "Leadership"),
                (1, 2, "Careers"),
                (0, 4, "Contact"),
            ]
        );
    }

    #[test]
    fn check_output_lines() {
        let lines = format_check_output(&sample_config());
        assert_eq!(lines[0], "Breakpoint: 992px");
        assert_eq!(lines[2], "Root list");
        assert_eq!(lines[3], "001 Home → index.html");
        assert_eq!(lines[4], "002 Services ▸ services");
        assert_eq!(lines[5], "    001 Web ▸ services-web");
        assert_eq!(lines[6], "        001 Sites → sites.html");
        assert_eq!(lines.last().unwrap(), "4 panels, 11 links");
        assert!(!lines.contains(&"Unreachable panels".to_string()));
    }

    #[test]
    fn check_output_lists_unreachable() {
        let mut config = sample_config();
        config.panels.push(crate::config::PanelConfig {
            id: PanelId::new("orphan"),
            title: "Orphan".into(),
            parent: None,
            links: vec![],
        });
        let lines = format_check_output(&config);
        let pos = lines.iter().position(|l| l == "Unreachable panels").unwrap();
        assert_eq!(lines[pos + 1], "    orphan");
    }

    #[test]
    fn check_output_empty_root() {
        let lines = format_check_output(&NavConfig::default());
        assert_eq!(lines[3], "    (empty)");
        assert_eq!(lines.last().unwrap(), "0 panels, 0 links");
    }

    #[test]
    fn step_with_transition() {
        let outcome = Outcome::Nav(Transition {
            from: NavState::Closed,
            to: NavState::Open(OpenView::RootList),
        });
        assert_eq!(
            format_step(1, "tap activator", &outcome),
            vec!["001 tap activator", "    Closed → Open.RootList"]
        );
    }

    #[test]
    fn step_unchanged() {
        let state = NavState::Open(OpenView::Submenu(PanelId::new("services")));
        let outcome = Outcome::Nav(Transition {
            from: state.clone(),
            to: state,
        });
        let lines = format_step(3, "tap submenu ghost", &outcome);
        assert_eq!(lines[1], "    Open.Submenu(services) (unchanged)");
    }

    #[test]
    fn step_scroll_and_theme() {
        let outcome = Outcome::Scroll(Some(ScrollEffect {
            nav: NavVisibility::Hidden,
            parallax_offset: 200.0,
            back_to_top: true,
        }));
        let lines = format_step(2, "scroll 400 at 0", &outcome);
        assert_eq!(lines[1], "    nav hidden, parallax 200px, back-to-top shown");
        let lines = format_step(4, "scroll 410 at 10", &Outcome::Scroll(None));
        assert_eq!(lines[1], "    throttled");
        let lines = format_step(5, "tap theme", &Outcome::Theme(Some(Theme::Dark)));
        assert_eq!(lines[1], "    theme dark");
    }

    #[test]
    fn content_outcomes() {
        assert_eq!(describe_outcome(&Outcome::Image(Some(1))), "image 1 → placeholder");
        assert_eq!(describe_outcome(&Outcome::Card(None)), "card unchanged");
        assert_eq!(describe_outcome(&Outcome::Focus(true)), "keyboard focus on");
    }

    #[test]
    fn enhanced_line_only_when_something_changed() {
        assert!(format_enhanced(&Enhanced::default()).is_empty());
        let lines = format_enhanced(&Enhanced {
            lazy_images: 1,
            labelled_buttons: 4,
            focusable_cards: 0,
        });
        assert_eq!(
            lines,
            vec!["Enhanced: 1 lazy images, 4 labelled buttons, 0 focusable cards"]
        );
    }

    #[test]
    fn page_state_lists_content() {
        let mut config = sample_config();
        config.content.images = vec![Image::new("a.jpg", "A"), Image::new("b.jpg", "B")];
        config.content.cards = vec![Card::new("Web")];
        let mut page = MemoryPage::from_config(&config);
        page.image_error(1);
        page.set_card_focused(0, true);
        let lines = format_page_state(&page);
        assert!(lines.contains(&"    keyboard focus: no".to_string()));
        assert!(lines.contains(&"    placeholder images: 1".to_string()));
        assert!(lines.contains(&"    focused cards: Web".to_string()));

        let check = format_check_output(&config);
        assert_eq!(check.last().unwrap(), "2 images, 1 cards");
    }

    #[test]
    fn page_state_lines() {
        let config = sample_config();
        let mut page = MemoryPage::from_config(&config);
        page.set_scroll_locked(true);
        page.set_activator_active(true);
        page.set_right_pane_expanded(true);
        page.set_panel_active(&PanelId::new("services"), true);
        let lines = format_page_state(&page);
        assert_eq!(lines[1], "    scroll locked: yes");
        assert_eq!(lines[2], "    activator: active (aria-expanded=\"true\")");
        assert_eq!(lines[4], "    active panels: services");
    }
}
