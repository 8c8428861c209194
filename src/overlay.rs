//! Mobile navigation overlay state machine.
//!
//! The overlay is either closed, open on its root list, or open on exactly one
//! submenu panel. Panels form a tree through their `parent` linkage; the
//! back button walks one level up that tree, while every dismissal
//! (activator, background tap, Escape, growing past the breakpoint) resets
//! the whole overlay in one step.
//!
//! ## States
//!
//! ```text
//!                 activator
//!   Closed ───────────────────────▶ Open.RootList
//!     ▲                               │     ▲
//!     │ activator / background /      │     │ back (no parent)
//!     │ Escape / resize > breakpoint  │     │
//!     │                     trigger id▼     │
//!     └─────────────────────────── Open.Submenu(id) ──┐
//!                                        ▲            │ trigger id2 / back (parent)
//!                                        └────────────┘
//! ```
//!
//! ## Ownership
//!
//! [`NavOverlay`] owns the open flag and every panel's active flag. Nothing
//! else can set them: the panel registry is private and the [`Page`] only
//! receives the resulting side effects. The machine's view and the page's
//! view therefore cannot disagree as long as the page applies what it is told.
//!
//! ## Invariants
//!
//! After every operation:
//! - page scroll is locked iff the state is `Open.*`
//! - at most one panel is active, and it is the one named by `Open.Submenu`
//! - the right pane is expanded iff a panel is active
//!
//! ## Missing Content
//!
//! Operations never fail. An unknown panel id is logged and ignored; an
//! overlay element that does not exist means `open` does nothing.

use crate::config::NavConfig;
use crate::page::Page;
use crate::types::PanelId;
use std::collections::BTreeMap;
use std::fmt;

/// What the open overlay is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenView {
    RootList,
    Submenu(PanelId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavState {
    Closed,
    Open(OpenView),
}

impl NavState {
    pub fn is_open(&self) -> bool {
        matches!(self, NavState::Open(_))
    }

    /// The panel being shown, if any.
    pub fn submenu(&self) -> Option<&PanelId> {
        match self {
            NavState::Open(OpenView::Submenu(id)) => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for NavState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavState::Closed => f.write_str("Closed"),
            NavState::Open(OpenView::RootList) => f.write_str("Open.RootList"),
            NavState::Open(OpenView::Submenu(id)) => write!(f, "Open.Submenu({id})"),
        }
    }
}

/// A named gesture bound at page initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// The hamburger was tapped.
    Activator,
    /// The overlay itself (outside panel content) was tapped.
    Background,
    /// A submenu trigger for the given panel was tapped.
    Submenu(PanelId),
    /// A back button inside the shown panel was tapped.
    Back,
    /// A key was pressed; only `"Escape"` does anything.
    Key(String),
    /// The viewport was resized to `width` pixels.
    Resize { width: u32 },
    /// The theme toggle inside the overlay was tapped.
    ThemeMirror,
}

/// The state before and after an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub from: NavState,
    pub to: NavState,
}

impl Transition {
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

/// A nested navigation list known to the overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmenuPanel {
    id: PanelId,
    parent: Option<PanelId>,
    active: bool,
}

impl SubmenuPanel {
    pub fn id(&self) -> &PanelId {
        &self.id
    }

    pub fn parent(&self) -> Option<&PanelId> {
        self.parent.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

#[derive(Debug, Clone)]
pub struct NavOverlay {
    state: NavState,
    panels: BTreeMap<PanelId, SubmenuPanel>,
    breakpoint: u32,
    viewport_width: Option<u32>,
}

impl NavOverlay {
    /// Build a closed overlay from `(id, parent)` pairs.
    pub fn new(
        breakpoint: u32,
        panels: impl IntoIterator<Item = (PanelId, Option<PanelId>)>,
    ) -> Self {
        let panels = panels
            .into_iter()
            .map(|(id, parent)| {
                let panel = SubmenuPanel {
                    id: id.clone(),
                    parent,
                    active: false,
                };
                (id, panel)
            })
            .collect();
        Self {
            state: NavState::Closed,
            panels,
            breakpoint,
            viewport_width: None,
        }
    }

    pub fn from_config(config: &NavConfig) -> Self {
        Self::new(
            config.breakpoint,
            config
                .panels
                .iter()
                .map(|p| (p.id.clone(), p.parent.clone())),
        )
    }

    pub fn state(&self) -> &NavState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn breakpoint(&self) -> u32 {
        self.breakpoint
    }

    pub fn panel(&self, id: &PanelId) -> Option<&SubmenuPanel> {
        self.panels.get(id)
    }

    pub fn panels(&self) -> impl Iterator<Item = &SubmenuPanel> {
        self.panels.values()
    }

    /// The active panel, if any.
    pub fn active_panel(&self) -> Option<&PanelId> {
        self.panels.values().find(|p| p.active).map(|p| &p.id)
    }

    pub fn parent_of(&self, id: &PanelId) -> Option<&PanelId> {
        self.panels.get(id).and_then(|p| p.parent.as_ref())
    }

    /// Open on the root list. No-op if already open or the page has no overlay.
    pub fn open<P: Page + ?Sized>(&mut self, page: &mut P) -> Transition {
        if self.is_open() {
            return self.stay();
        }
        if !page.has_overlay() {
            log::debug!("nav: no overlay element, ignoring open");
            return self.stay();
        }
        page.set_activator_active(true);
        page.set_overlay_active(true);
        page.set_scroll_locked(true);
        self.move_to(NavState::Open(OpenView::RootList))
    }

    /// Close and fully reset, whatever the depth. Safe to call when closed.
    pub fn close<P: Page + ?Sized>(&mut self, page: &mut P) -> Transition {
        for panel in self.panels.values_mut() {
            panel.active = false;
            page.set_panel_active(&panel.id, false);
        }
        page.set_right_pane_expanded(false);
        page.set_activator_active(false);
        page.set_overlay_active(false);
        page.set_scroll_locked(false);
        self.move_to(NavState::Closed)
    }

    /// Activator behavior: open when closed, close when open.
    pub fn toggle<P: Page + ?Sized>(&mut self, page: &mut P) -> Transition {
        if self.is_open() {
            self.close(page)
        } else {
            self.open(page)
        }
    }

    /// Show panel `id`, deactivating whichever panel was shown.
    ///
    /// Only panels whose trigger is in the current view can be shown: a
    /// top-level panel from the root list, or a child of the shown panel.
    pub fn open_submenu<P: Page + ?Sized>(&mut self, id: &PanelId, page: &mut P) -> Transition {
        if !self.panels.contains_key(id) {
            log::warn!("nav: no submenu panel '{id}'");
            return self.stay();
        }
        if !self.is_open() {
            log::debug!("nav: submenu '{id}' triggered while closed, ignoring");
            return self.stay();
        }
        if self.parent_of(id) != self.state.submenu() {
            log::debug!("nav: submenu '{id}' not reachable from {}, ignoring", self.state);
            return self.stay();
        }

        page.set_right_pane_expanded(true);
        for panel in self.panels.values_mut() {
            if panel.active && &panel.id != id {
                panel.active = false;
                page.set_panel_active(&panel.id, false);
            }
        }
        self.set_active(id, page);
        self.move_to(NavState::Open(OpenView::Submenu(id.clone())))
    }

    /// Leave the shown panel for its parent, or for the root list. No-op
    /// when no panel is shown.
    pub fn go_back<P: Page + ?Sized>(&mut self, page: &mut P) -> Transition {
        let Some(current) = self.state.submenu().cloned() else {
            return self.stay();
        };
        if let Some(panel) = self.panels.get_mut(&current) {
            panel.active = false;
        }
        page.set_panel_active(&current, false);

        let parent = self
            .parent_of(&current)
            .filter(|p| self.panels.contains_key(*p))
            .cloned();
        match parent {
            Some(parent) => {
                self.set_active(&parent, page);
                self.move_to(NavState::Open(OpenView::Submenu(parent)))
            }
            None => {
                page.set_right_pane_expanded(false);
                self.move_to(NavState::Open(OpenView::RootList))
            }
        }
    }

    /// Record a new viewport width, closing if it crosses above the breakpoint
    /// while open.
    pub fn resize<P: Page + ?Sized>(&mut self, width: u32, page: &mut P) -> Transition {
        let previous = self.viewport_width.replace(width);
        let crossed = width > self.breakpoint && previous.is_none_or(|w| w <= self.breakpoint);
        if crossed && self.is_open() {
            log::debug!("nav: viewport {width}px above breakpoint {}", self.breakpoint);
            self.close(page)
        } else {
            self.stay()
        }
    }

    /// Dispatch a named trigger to the matching operation.
    pub fn handle<P: Page + ?Sized>(&mut self, trigger: &Trigger, page: &mut P) -> Transition {
        match trigger {
            Trigger::Activator => self.toggle(page),
            Trigger::Background | Trigger::Key(_) if !self.is_open() => self.stay(),
            Trigger::Background => self.close(page),
            Trigger::Key(key) if key == "Escape" => self.close(page),
            Trigger::Key(_) => self.stay(),
            Trigger::Submenu(id) => self.open_submenu(id, page),
            Trigger::Back => self.go_back(page),
            Trigger::Resize { width } => self.resize(*width, page),
            Trigger::ThemeMirror => {
                page.click_theme_toggle();
                self.stay()
            }
        }
    }

    fn set_active<P: Page + ?Sized>(&mut self, id: &PanelId, page: &mut P) {
        if let Some(panel) = self.panels.get_mut(id) {
            panel.active = true;
            page.set_panel_active(id, true);
        }
    }

    fn stay(&self) -> Transition {
        Transition {
            from: self.state.clone(),
            to: self.state.clone(),
        }
    }

    fn move_to(&mut self, to: NavState) -> Transition {
        let from = std::mem::replace(&mut self.state, to.clone());
        if from != to {
            log::debug!("nav: {from} -> {to}");
        }
        Transition { from, to }
    }
}
