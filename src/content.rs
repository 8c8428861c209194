//! Load-time enhancements of page content outside the navigation.
//!
//! Run once when the page loads:
//! - images without a `loading` mode load lazily
//! - buttons without `aria-label` are labelled with their trimmed text
//! - cards without a `tabindex` become keyboard-focusable (`tabindex="0"`)
//!
//! After load, an image that fails swaps to a placeholder, cards carry a
//! `card-focused` class while focused, and [`FocusTracker`] owns the
//! `keyboard-focus` body class (Tab sets it, a mouse press clears it).

use crate::config::NavConfig;
use crate::types::LinkTarget;
use serde::{Deserialize, Serialize};

pub const PLACEHOLDER_SRC: &str = "/api/placeholder/400/320";
pub const PLACEHOLDER_ALT: &str = "Image placeholder";
pub const KEYBOARD_FOCUS_CLASS: &str = "keyboard-focus";
pub const CARD_FOCUSED_CLASS: &str = "card-focused";

/// Value of an image's `loading` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Loading {
    Lazy,
    Eager,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Image {
    pub src: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loading: Option<Loading>,
}

impl Image {
    pub fn new(src: &str, alt: &str) -> Self {
        Self {
            src: src.to_string(),
            alt: alt.to_string(),
            loading: None,
        }
    }

    /// Default to lazy loading. Returns whether the attribute was added.
    pub fn ensure_loading(&mut self) -> bool {
        if self.loading.is_some() {
            return false;
        }
        self.loading = Some(Loading::Lazy);
        true
    }

    /// Swap in the placeholder after a load error. Returns `false` when the
    /// placeholder itself failed, so the swap never repeats.
    pub fn fall_back(&mut self) -> bool {
        if self.is_placeholder() {
            return false;
        }
        self.src = PLACEHOLDER_SRC.to_string();
        self.alt = PLACEHOLDER_ALT.to_string();
        true
    }

    pub fn is_placeholder(&self) -> bool {
        self.src == PLACEHOLDER_SRC
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub text: String,
    pub aria_label: Option<String>,
}

impl Button {
    /// Use the visible text as `aria-label` when none is set. Buttons with
    /// blank text stay unlabelled.
    pub fn label_from_text(&mut self) -> bool {
        let text = self.text.trim();
        if self.aria_label.is_some() || text.is_empty() {
            return false;
        }
        self.aria_label = Some(text.to_string());
        true
    }
}

/// A service or project card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Card {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tabindex: Option<i32>,
    #[serde(skip)]
    focused: bool,
}

impl Card {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            tabindex: None,
            focused: false,
        }
    }

    /// Put the card in the tab order unless it sets its own `tabindex`.
    pub fn make_focusable(&mut self) -> bool {
        if self.tabindex.is_some() {
            return false;
        }
        self.tabindex = Some(0);
        true
    }

    /// Returns whether the `card-focused` class changed.
    pub fn set_focused(&mut self, focused: bool) -> bool {
        let changed = self.focused != focused;
        self.focused = focused;
        changed
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Class to add while focused.
    pub fn class(&self) -> Option<&'static str> {
        self.focused.then_some(CARD_FOCUSED_CLASS)
    }
}

/// How many elements the load-time pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Enhanced {
    pub lazy_images: usize,
    pub labelled_buttons: usize,
    pub focusable_cards: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageContent {
    pub images: Vec<Image>,
    pub buttons: Vec<Button>,
    pub cards: Vec<Card>,
}

impl PageContent {
    /// Content of a page rendered from `config`: the configured images and
    /// cards, plus the overlay's buttons. Submenu triggers carry only text;
    /// back buttons are labelled in markup.
    pub fn from_config(config: &NavConfig) -> Self {
        let links = config
            .links
            .iter()
            .chain(config.panels.iter().flat_map(|p| p.links.iter()));
        let triggers = links
            .filter(|l| matches!(l.target(), LinkTarget::Submenu(_)))
            .map(|l| Button {
                text: l.label.clone(),
                aria_label: None,
            });
        let backs = config.panels.iter().map(|_| Button {
            text: "‹ Back".to_string(),
            aria_label: Some("Back".to_string()),
        });
        Self {
            images: config.content.images.clone(),
            buttons: triggers.chain(backs).collect(),
            cards: config.content.cards.clone(),
        }
    }

    /// Apply the load-time pass to every element.
    pub fn enhance(&mut self) -> Enhanced {
        let report = Enhanced {
            lazy_images: self.images.iter_mut().map(|i| usize::from(i.ensure_loading())).sum(),
            labelled_buttons: self
                .buttons
                .iter_mut()
                .map(|b| usize::from(b.label_from_text()))
                .sum(),
            focusable_cards: self.cards.iter_mut().map(|c| usize::from(c.make_focusable())).sum(),
        };
        log::debug!(
            "content: {} lazy images, {} labelled buttons, {} focusable cards",
            report.lazy_images,
            report.labelled_buttons,
            report.focusable_cards
        );
        report
    }

    /// Handle a load error on image `index`.
    pub fn image_error(&mut self, index: usize) -> bool {
        match self.images.get_mut(index) {
            Some(image) => image.fall_back(),
            None => {
                log::debug!("content: no image {index}");
                false
            }
        }
    }

    /// Focus or blur card `index`. Returns whether anything changed.
    pub fn set_card_focused(&mut self, index: usize, focused: bool) -> bool {
        self.cards
            .get_mut(index)
            .is_some_and(|card| card.set_focused(focused))
    }
}

/// Tracks whether the user is navigating by keyboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusTracker {
    keyboard: bool,
}

impl FocusTracker {
    pub fn key_down(&mut self, key: &str) {
        if key == "Tab" {
            self.keyboard = true;
        }
    }

    pub fn pointer_down(&mut self) {
        self.keyboard = false;
    }

    pub fn is_keyboard(&self) -> bool {
        self.keyboard
    }

    /// Body class to add, if any.
    pub fn body_class(&self) -> Option<&'static str> {
        self.keyboard.then_some(KEYBOARD_FOCUS_CLASS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::sample_config;

    #[test]
    fn missing_loading_defaults_to_lazy() {
        let mut image = Image::new("hero.jpg", "Hero");
        assert!(image.ensure_loading());
        assert_eq!(image.loading, Some(Loading::Lazy));
        assert!(!image.ensure_loading());
    }

    #[test]
    fn explicit_loading_kept() {
        let mut image = Image {
            loading: Some(Loading::Eager),
            ..Image::new("hero.jpg", "Hero")
        };
        assert!(!image.ensure_loading());
        assert_eq!(image.loading, Some(Loading::Eager));
    }

    #[test]
    fn failed_image_shows_placeholder_once() {
        let mut image = Image::new("missing.jpg", "Team photo");
        assert!(image.fall_back());
        assert_eq!(image.src, PLACEHOLDER_SRC);
        assert_eq!(image.alt, PLACEHOLDER_ALT);
        assert!(!image.fall_back());
    }

    #[test]
    fn button_labelled_from_trimmed_text() {
        let mut button = Button {
            text: "  Services \n".into(),
            aria_label: None,
        };
        assert!(button.label_from_text());
        assert_eq!(button.aria_label.as_deref(), Some("Services"));
    }

    #[test]
    fn button_keeps_existing_label() {
        let mut button = Button {
            text: "‹ Back".into(),
            aria_label: Some("Back".into()),
        };
        assert!(!button.label_from_text());
        assert_eq!(button.aria_label.as_deref(), Some("Back"));
    }

    #[test]
    fn blank_button_stays_unlabelled() {
        let mut button = Button {
            text: "   ".into(),
            aria_label: None,
        };
        assert!(!button.label_from_text());
        assert_eq!(button.aria_label, None);
    }

    #[test]
    fn cards_become_focusable() {
        let mut card = Card::new("Web design");
        assert!(card.make_focusable());
        assert_eq!(card.tabindex, Some(0));
        let mut skipped = Card {
            tabindex: Some(-1),
            ..Card::new("Archived")
        };
        assert!(!skipped.make_focusable());
        assert_eq!(skipped.tabindex, Some(-1));
    }

    #[test]
    fn card_focus_and_blur() {
        let mut content = PageContent {
            cards: vec![Card::new("A"), Card::new("B")],
            ..PageContent::default()
        };
        assert!(content.set_card_focused(1, true));
        assert!(!content.set_card_focused(1, true));
        assert!(content.cards[1].is_focused());
        assert_eq!(content.cards[1].class(), Some(CARD_FOCUSED_CLASS));
        assert_eq!(content.cards[0].class(), None);
        assert!(content.set_card_focused(1, false));
        assert!(!content.set_card_focused(5, true));
    }

    #[test]
    fn content_from_config_labels_triggers() {
        let mut content = PageContent::from_config(&sample_config());
        // Services, Company, Web, Team triggers plus four back buttons.
        assert_eq!(content.buttons.len(), 8);
        let report = content.enhance();
        assert_eq!(report.labelled_buttons, 4);
        assert!(content.buttons.iter().all(|b| b.aria_label.is_some()));
        assert_eq!(content.buttons[0].aria_label.as_deref(), Some("Services"));
    }

    #[test]
    fn image_error_out_of_range() {
        let mut content = PageContent {
            images: vec![Image::new("a.jpg", "A")],
            ..PageContent::default()
        };
        assert!(!content.image_error(3));
        assert!(content.image_error(0));
        assert!(content.images[0].is_placeholder());
    }

    #[test]
    fn tab_sets_keyboard_focus_and_mouse_clears() {
        let mut focus = FocusTracker::default();
        focus.key_down("Escape");
        assert_eq!(focus.body_class(), None);
        focus.key_down("Tab");
        assert_eq!(focus.body_class(), Some(KEYBOARD_FOCUS_CLASS));
        focus.key_down("Enter");
        assert!(focus.is_keyboard());
        focus.pointer_down();
        assert!(!focus.is_keyboard());
    }
}
