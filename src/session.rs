//! A page session: every enhancement component, owned in one place.
//!
//! A browser page sets its components up once at load and routes each event
//! to the component that owns it. [`Session`] does the same against a
//! [`MemoryPage`], which is what the `simulate` command and the integration
//! tests drive. Components never reach for shared state; the session passes
//! the page to whichever component handles the event.

use crate::carousel::Carousel;
use crate::config::NavConfig;
use crate::content::Enhanced;
use crate::overlay::{NavOverlay, Transition, Trigger};
use crate::page::MemoryPage;
use crate::scroll::{ScrollEffect, ScrollWatcher};
use crate::theme::{MemoryStore, Theme, ThemeSwitch};

/// A discrete page event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A gesture bound to the navigation overlay.
    Nav(Trigger),
    /// The primary theme toggle was tapped.
    ThemeToggle,
    /// The page scrolled to `top` pixels at `at_ms`.
    Scroll { top: f64, at_ms: u64 },
    /// The clock reached `at_ms`.
    Tick { at_ms: u64 },
    /// A carousel dot was tapped.
    Dot(usize),
    /// Image `index` failed to load.
    ImageError(usize),
    /// Card `index` gained (`true`) or lost focus.
    CardFocus { index: usize, focused: bool },
    /// A mouse button was pressed anywhere on the page.
    PointerDown,
}

/// What handling an [`Event`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Nav(Transition),
    /// New theme, or `None` when the page has no theme toggle.
    Theme(Option<Theme>),
    /// Applied effect, or `None` when the sample was throttled.
    Scroll(Option<ScrollEffect>),
    /// Slide now shown, or `None` when nothing changed.
    Slide(Option<usize>),
    /// Image swapped to the placeholder, or `None` when nothing changed.
    Image(Option<usize>),
    /// Card whose focus changed, or `None`.
    Card(Option<usize>),
    /// Whether keyboard focus styling is on afterwards.
    Focus(bool),
}

/// Initial page conditions.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Viewport width at load, if known.
    pub viewport_width: Option<u32>,
    /// Whether the system color scheme prefers dark.
    pub prefers_dark: bool,
    /// Value already stored under the theme key.
    pub stored_theme: Option<String>,
    /// Height of the fixed navigation bar.
    pub nav_height: f64,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            viewport_width: None,
            prefers_dark: false,
            stored_theme: None,
            nav_height: 80.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    overlay: NavOverlay,
    page: MemoryPage,
    scroll: ScrollWatcher,
    carousel: Carousel,
    enhanced: Enhanced,
}

impl Session {
    pub fn new(config: &NavConfig, options: &SessionOptions) -> Self {
        let key = &config.theme.storage_key;
        let store = match &options.stored_theme {
            Some(value) => MemoryStore::with(key, value),
            None => MemoryStore::default(),
        };
        let theme = ThemeSwitch::init(store, key, options.prefers_dark);
        let mut page = MemoryPage::from_config(config).with_theme(theme);
        let enhanced = page.enhance_content();

        let carousel = Carousel::new(config.carousel.slides, config.carousel.interval_ms);
        if let Some(slide) = carousel.current() {
            page.show_slide(slide);
        }

        let mut overlay = NavOverlay::from_config(config);
        if let Some(width) = options.viewport_width {
            overlay.resize(width, &mut page);
        }

        Self {
            overlay,
            page,
            scroll: ScrollWatcher::new(&config.scroll, options.nav_height),
            carousel,
            enhanced,
        }
    }

    pub fn overlay(&self) -> &NavOverlay {
        &self.overlay
    }

    pub fn page(&self) -> &MemoryPage {
        &self.page
    }

    /// What the load-time content pass changed.
    pub fn enhanced(&self) -> Enhanced {
        self.enhanced
    }

    /// Route an event to the component that owns it.
    pub fn dispatch(&mut self, event: &Event) -> Outcome {
        match event {
            Event::Nav(trigger) => {
                if let Trigger::Key(key) = trigger {
                    self.page.key_down(key);
                }
                Outcome::Nav(self.overlay.handle(trigger, &mut self.page))
            }
            Event::ThemeToggle => Outcome::Theme(self.page.toggle_theme()),
            Event::Scroll { top, at_ms } => {
                let effect = self.scroll.on_scroll(*top, *at_ms);
                if let Some(effect) = &effect {
                    self.page.apply_scroll(effect);
                }
                Outcome::Scroll(effect)
            }
            Event::Tick { at_ms } => {
                let slide = self.carousel.tick(*at_ms);
                self.show(slide)
            }
            Event::Dot(index) => {
                let slide = self.carousel.show(*index);
                self.show(slide)
            }
            Event::ImageError(index) => {
                Outcome::Image(self.page.image_error(*index).then_some(*index))
            }
            Event::CardFocus { index, focused } => {
                Outcome::Card(self.page.set_card_focused(*index, *focused).then_some(*index))
            }
            Event::PointerDown => {
                self.page.pointer_down();
                Outcome::Focus(self.page.keyboard_focus())
            }
        }
    }

    fn show(&mut self, slide: Option<usize>) -> Outcome {
        if let Some(slide) = slide {
            self.page.show_slide(slide);
        }
        Outcome::Slide(slide)
    }
}
