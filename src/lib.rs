//! # navdeck
//!
//! The mobile-navigation layer of a marketing site, as a typed state machine.
//! A hamburger activator opens a full-viewport overlay; submenu triggers drill
//! into nested panels; a back control, the Escape key, a background tap, or
//! the viewport growing past the desktop breakpoint walk it back out.
//!
//! # Architecture: Machine, Page, Session
//!
//! ```text
//! nav.toml ──► NavConfig ──► NavOverlay ──(Page trait)──► DOM / MemoryPage
//!                        └─► ScrollWatcher, Carousel, ThemeSwitch
//!                                   ▲
//!            script / browser ──► Session::dispatch(Event)
//! ```
//!
//! The overlay never touches the DOM directly. Every side effect (scroll
//! lock, class toggles, `aria-expanded`, the mirrored theme click) goes
//! through the [`page::Page`] trait, so the same machine drives a browser
//! binding or the in-memory page the CLI and the tests use.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`overlay`] | The navigation overlay state machine: open, close, submenu stack, back, resize |
//! | [`page`] | `Page` trait (the DOM seam) and the in-memory `MemoryPage` |
//! | [`theme`] | Light/dark theme switch persisted under a single preference key |
//! | [`scroll`] | Throttled scroll handling: nav hide/show, parallax offset, back-to-top |
//! | [`carousel`] | Hero slide index with timed auto-advance |
//! | [`aria`] | Normalized ARIA attribute values and active-link detection |
//! | [`content`] | Load-time image, button, and card enhancements; keyboard focus tracking |
//! | [`config`] | `nav.toml` loading, stock-default merging, and structural validation |
//! | [`types`] | Panel ids and navigation links shared by config, machine, and markup |
//! | [`markup`] | Maud rendering of the overlay DOM the machine binds to |
//! | [`session`] | One owner for every component; routes page events |
//! | [`script`] | Line-oriented gesture scripts for `navdeck simulate` |
//! | [`output`] | CLI output formatting: structure tree and replay trace |
//!
//! # Design Decisions
//!
//! ## One State Value
//!
//! Open/closed and the active submenu live in a single [`overlay::NavState`]
//! value rather than separate flags, so "closed with a panel active" cannot
//! be represented. Each operation returns a [`overlay::Transition`] so callers
//! and tests see exactly what moved.
//!
//! ## Breakpoint-Gated Resize
//!
//! A resize closes the overlay only when the viewport crosses from at-or-below
//! the breakpoint to above it. Resizes that stay on one side never dismiss an
//! open menu, so rotating a phone keeps the user where they were.
//!
//! ## Named Triggers
//!
//! Gestures arrive as [`overlay::Trigger`] values (activator, background,
//! submenu id, back, key, resize, theme mirror). The binding layer decides
//! which element was hit; the machine never inspects event targets.
//!
//! ## Missing Elements Are Not Errors
//!
//! Pages vary in which controls they ship. A page without an overlay makes
//! `open` a no-op, and setters for absent elements do nothing. Only an
//! unknown panel id is logged, since it points at a markup/config mismatch.

pub mod aria;
pub mod carousel;
pub mod config;
pub mod content;
pub mod markup;
pub mod output;
pub mod overlay;
pub mod page;
pub mod script;
pub mod scroll;
pub mod session;
pub mod theme;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
