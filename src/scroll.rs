//! Scroll-driven header effects.
//!
//! [`ScrollWatcher`] samples the page's scroll position and decides three
//! things: whether the fixed navigation bar is hidden, how far the hero
//! content is offset for the parallax effect, and whether the back-to-top
//! button is shown. The previous scroll position lives on the watcher, which
//! is constructed once per page and handed to the scroll handler.
//!
//! ## Nav Visibility
//!
//! ```text
//! scrolling down and past the nav height  → hidden
//! scrolling up, or still within the nav   → shown
//! at or above the top of the page         → shown
//! ```
//!
//! Overscroll (negative positions on elastic-scrolling platforms) is treated
//! as the top of the page.

use crate::config::ScrollConfig;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NavVisibility {
    Shown,
    Hidden,
}

/// Everything a handled scroll sample changes on the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollEffect {
    pub nav: NavVisibility,
    /// Vertical translation of the hero content, in pixels.
    pub parallax_offset: f64,
    pub back_to_top: bool,
}

/// Leading-edge throttle: the first call fires, calls within `limit_ms` of
/// the last fired call are dropped.
#[derive(Debug, Clone)]
pub struct Throttle {
    limit_ms: u64,
    last_fired: Option<u64>,
}

impl Throttle {
    pub fn new(limit_ms: u64) -> Self {
        Self {
            limit_ms,
            last_fired: None,
        }
    }

    /// Returns `true` if a call at `now_ms` should run.
    pub fn ready(&mut self, now_ms: u64) -> bool {
        match self.last_fired {
            Some(last) if now_ms.saturating_sub(last) < self.limit_ms => false,
            _ => {
                self.last_fired = Some(now_ms);
                true
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScrollWatcher {
    last_scroll_top: f64,
    nav_height: f64,
    parallax_factor: f64,
    back_to_top_offset: f64,
    throttle: Throttle,
}

impl ScrollWatcher {
    pub fn new(config: &ScrollConfig, nav_height: f64) -> Self {
        Self {
            last_scroll_top: 0.0,
            nav_height,
            parallax_factor: config.parallax_factor,
            back_to_top_offset: config.back_to_top_offset,
            throttle: Throttle::new(config.throttle_ms),
        }
    }

    /// Last handled scroll position, clamped at zero.
    pub fn last_scroll_top(&self) -> f64 {
        self.last_scroll_top
    }

    /// Handle a scroll sample. Returns `None` when the sample is throttled.
    pub fn on_scroll(&mut self, scroll_top: f64, now_ms: u64) -> Option<ScrollEffect> {
        if !self.throttle.ready(now_ms) {
            log::trace!("scroll sample at {now_ms}ms throttled");
            return None;
        }

        let nav = if scroll_top <= 0.0 {
            NavVisibility::Shown
        } else if scroll_top > self.last_scroll_top && scroll_top > self.nav_height {
            NavVisibility::Hidden
        } else {
            NavVisibility::Shown
        };
        self.last_scroll_top = scroll_top.max(0.0);

        Some(ScrollEffect {
            nav,
            parallax_offset: scroll_top * self.parallax_factor,
            back_to_top: scroll_top > self.back_to_top_offset,
        })
    }
}
