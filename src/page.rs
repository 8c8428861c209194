//! The page surface the state machine drives.
//!
//! [`Page`] is the seam between navigation logic and the DOM. Every visible
//! consequence of a transition (scroll lock, `active` classes, the
//! activator's `aria-expanded`, delegation to the theme toggle) goes through
//! it, so the state machine never holds element handles.
//!
//! Page content decides which controls exist. An implementation must ignore
//! setters for elements that are absent rather than fail; the state machine
//! only asks about presence where the answer changes what it does (an
//! overlay that does not exist cannot be opened).
//!
//! [`MemoryPage`] is the in-memory implementation used by the simulator and
//! the test suite.

use crate::aria::AriaExpanded;
use crate::config::NavConfig;
use crate::content::{Enhanced, FocusTracker, PageContent};
use crate::scroll::{NavVisibility, ScrollEffect};
use crate::theme::{MemoryStore, Theme, ThemeSwitch};
use crate::types::PanelId;
use serde::Serialize;
use std::collections::BTreeSet;

/// DOM operations the navigation overlay needs.
pub trait Page {
    /// Whether the overlay root exists.
    fn has_overlay(&self) -> bool;

    /// Disable (`true`) or restore (`false`) body scrolling.
    fn set_scroll_locked(&mut self, locked: bool);

    /// Toggle the activator's `active` class and its `aria-expanded`.
    fn set_activator_active(&mut self, active: bool);

    /// Toggle the overlay root's `active` class.
    fn set_overlay_active(&mut self, active: bool);

    /// Toggle the right pane's `active` class.
    fn set_right_pane_expanded(&mut self, expanded: bool);

    /// Toggle a submenu panel's `active` class.
    fn set_panel_active(&mut self, id: &PanelId, active: bool);

    /// Activate the page's primary theme toggle.
    fn click_theme_toggle(&mut self);
}

/// Which optional elements exist on a [`MemoryPage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elements {
    pub activator: bool,
    pub overlay: bool,
    pub right_pane: bool,
    pub theme_toggle: bool,
}

impl Default for Elements {
    fn default() -> Self {
        Self {
            activator: true,
            overlay: true,
            right_pane: true,
            theme_toggle: true,
        }
    }
}

/// In-memory page that records the state of every element it owns.
#[derive(Debug, Clone)]
pub struct MemoryPage {
    elements: Elements,
    panels: BTreeSet<PanelId>,
    scroll_locked: bool,
    activator_active: bool,
    overlay_active: bool,
    right_pane_expanded: bool,
    active_panels: BTreeSet<PanelId>,
    theme: Option<ThemeSwitch<MemoryStore>>,
    nav_visibility: NavVisibility,
    parallax_offset: f64,
    back_to_top_visible: bool,
    active_slide: Option<usize>,
    content: PageContent,
    focus: FocusTracker,
}

impl MemoryPage {
    pub fn new(elements: Elements, panels: impl IntoIterator<Item = PanelId>) -> Self {
        Self {
            elements,
            panels: panels.into_iter().collect(),
            scroll_locked: false,
            activator_active: false,
            overlay_active: false,
            right_pane_expanded: false,
            active_panels: BTreeSet::new(),
            theme: None,
            nav_visibility: NavVisibility::Shown,
            parallax_offset: 0.0,
            back_to_top_visible: false,
            active_slide: None,
            content: PageContent::default(),
            focus: FocusTracker::default(),
        }
    }

    /// A page containing every element, every configured panel, and the
    /// configured content.
    pub fn from_config(config: &NavConfig) -> Self {
        let mut page = Self::new(
            Elements::default(),
            config.panels.iter().map(|p| p.id.clone()),
        );
        page.content = PageContent::from_config(config);
        page
    }

    /// Attach the primary theme toggle. Ignored if the page has no toggle element.
    pub fn with_theme(mut self, theme: ThemeSwitch<MemoryStore>) -> Self {
        if self.elements.theme_toggle {
            self.theme = Some(theme);
        }
        self
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    pub fn activator_active(&self) -> bool {
        self.activator_active
    }

    pub fn activator_expanded(&self) -> AriaExpanded {
        AriaExpanded::from(self.activator_active)
    }

    pub fn overlay_active(&self) -> bool {
        self.overlay_active
    }

    pub fn right_pane_expanded(&self) -> bool {
        self.right_pane_expanded
    }

    pub fn panel_active(&self, id: &PanelId) -> bool {
        self.active_panels.contains(id)
    }

    pub fn active_panels(&self) -> impl Iterator<Item = &PanelId> {
        self.active_panels.iter()
    }

    pub fn theme(&self) -> Option<&ThemeSwitch<MemoryStore>> {
        self.theme.as_ref()
    }

    /// Activate the primary theme toggle directly (the non-mirrored control).
    pub fn toggle_theme(&mut self) -> Option<Theme> {
        self.theme.as_mut().map(ThemeSwitch::toggle)
    }

    pub fn nav_visibility(&self) -> NavVisibility {
        self.nav_visibility
    }

    pub fn parallax_offset(&self) -> f64 {
        self.parallax_offset
    }

    pub fn back_to_top_visible(&self) -> bool {
        self.back_to_top_visible
    }

    pub fn apply_scroll(&mut self, effect: &ScrollEffect) {
        self.nav_visibility = effect.nav;
        self.parallax_offset = effect.parallax_offset;
        self.back_to_top_visible = effect.back_to_top;
    }

    pub fn active_slide(&self) -> Option<usize> {
        self.active_slide
    }

    pub fn show_slide(&mut self, index: usize) {
        self.active_slide = Some(index);
    }

    pub fn content(&self) -> &PageContent {
        &self.content
    }

    /// Run the load-time content pass.
    pub fn enhance_content(&mut self) -> Enhanced {
        self.content.enhance()
    }

    pub fn image_error(&mut self, index: usize) -> bool {
        self.content.image_error(index)
    }

    pub fn set_card_focused(&mut self, index: usize, focused: bool) -> bool {
        self.content.set_card_focused(index, focused)
    }

    pub fn key_down(&mut self, key: &str) {
        self.focus.key_down(key);
    }

    pub fn pointer_down(&mut self) {
        self.focus.pointer_down();
    }

    /// Whether the body carries the `keyboard-focus` class.
    pub fn keyboard_focus(&self) -> bool {
        self.focus.is_keyboard()
    }

    /// Serializable view of the current element state.
    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            scroll_locked: self.scroll_locked,
            activator_active: self.activator_active,
            aria_expanded: self.activator_expanded().as_str(),
            overlay_active: self.overlay_active,
            right_pane_expanded: self.right_pane_expanded,
            active_panels: self.active_panels.iter().map(|p| p.to_string()).collect(),
            theme: self.theme.as_ref().map(|t| t.theme().as_str()),
            nav: self.nav_visibility,
            back_to_top_visible: self.back_to_top_visible,
            active_slide: self.active_slide,
            keyboard_focus: self.keyboard_focus(),
            placeholder_images: positions(self.content.images.iter().map(|i| i.is_placeholder())),
            focused_cards: positions(self.content.cards.iter().map(|c| c.is_focused())),
        }
    }
}

fn positions(flags: impl Iterator<Item = bool>) -> Vec<usize> {
    flags
        .enumerate()
        .filter_map(|(i, on)| on.then_some(i))
        .collect()
}

impl Page for MemoryPage {
    fn has_overlay(&self) -> bool {
        self.elements.overlay
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }

    fn set_activator_active(&mut self, active: bool) {
        if self.elements.activator {
            self.activator_active = active;
        }
    }

    fn set_overlay_active(&mut self, active: bool) {
        if self.elements.overlay {
            self.overlay_active = active;
        }
    }

    fn set_right_pane_expanded(&mut self, expanded: bool) {
        if self.elements.right_pane {
            self.right_pane_expanded = expanded;
        }
    }

    fn set_panel_active(&mut self, id: &PanelId, active: bool) {
        if !self.panels.contains(id) {
            return;
        }
        if active {
            self.active_panels.insert(id.clone());
        } else {
            self.active_panels.remove(id);
        }
    }

    fn click_theme_toggle(&mut self) {
        self.toggle_theme();
    }
}

/// Element state of a [`MemoryPage`], as emitted by `simulate --json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSnapshot {
    pub scroll_locked: bool,
    pub activator_active: bool,
    pub aria_expanded: &'static str,
    pub overlay_active: bool,
    pub right_pane_expanded: bool,
    pub active_panels: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<&'static str>,
    pub nav: NavVisibility,
    pub back_to_top_visible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_slide: Option<usize>,
    pub keyboard_focus: bool,
    pub placeholder_images: Vec<usize>,
    pub focused_cards: Vec<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> MemoryPage {
        MemoryPage::new(Elements::default(), [PanelId::new("services")])
    }

    #[test]
    fn setters_record_state() {
        let mut page = page();
        page.set_scroll_locked(true);
        page.set_activator_active(true);
        page.set_overlay_active(true);
        page.set_right_pane_expanded(true);
        page.set_panel_active(&PanelId::new("services"), true);
        assert!(page.scroll_locked());
        assert!(page.activator_active());
        assert_eq!(page.activator_expanded(), AriaExpanded::True);
        assert!(page.overlay_active());
        assert!(page.right_pane_expanded());
        assert!(page.panel_active(&PanelId::new("services")));
    }

    #[test]
    fn missing_elements_ignore_setters() {
        let elements = Elements {
            activator: false,
            overlay: false,
            right_pane: false,
            theme_toggle: false,
        };
        let mut page = MemoryPage::new(elements, []);
        page.set_activator_active(true);
        page.set_overlay_active(true);
        page.set_right_pane_expanded(true);
        page.set_panel_active(&PanelId::new("services"), true);
        page.click_theme_toggle();
        assert!(!page.has_overlay());
        assert!(!page.activator_active());
        assert!(!page.overlay_active());
        assert!(!page.right_pane_expanded());
        assert_eq!(page.active_panels().count(), 0);
        assert!(page.theme().is_none());
    }

    #[test]
    fn theme_toggle_click_flips_theme() {
        let theme = ThemeSwitch::init(MemoryStore::default(), "theme", false);
        let mut page = page().with_theme(theme);
        page.click_theme_toggle();
        assert_eq!(page.theme().map(|t| t.theme()), Some(Theme::Dark));
    }

    #[test]
    fn snapshot_uses_aria_tokens() {
        let mut page = page();
        page.set_activator_active(true);
        let snapshot = page.snapshot();
        assert_eq!(snapshot.aria_expanded, "true");
        assert!(snapshot.activator_active);
        assert!(snapshot.theme.is_none());
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["nav"], "shown");
    }

    #[test]
    fn content_events_show_in_snapshot() {
        use crate::content::{Card, Image};
        use crate::test_helpers::sample_config;

        let mut config = sample_config();
        config.content.images = vec![Image::new("a.jpg", "A"), Image::new("b.jpg", "B")];
        config.content.cards = vec![Card::new("Web"), Card::new("Apps")];
        let mut page = MemoryPage::from_config(&config);
        let enhanced = page.enhance_content();
        assert_eq!(enhanced.lazy_images, 2);
        assert_eq!(enhanced.focusable_cards, 2);

        assert!(page.image_error(1));
        assert!(page.set_card_focused(0, true));
        page.key_down("Tab");
        let snapshot = page.snapshot();
        assert_eq!(snapshot.placeholder_images, vec![1]);
        assert_eq!(snapshot.focused_cards, vec![0]);
        assert!(snapshot.keyboard_focus);

        page.pointer_down();
        assert!(!page.keyboard_focus());
    }
}
