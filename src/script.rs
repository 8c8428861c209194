//! Gesture script parsing.
//!
//! A script is a plain-text list of page events, one per line, replayed by
//! `navdeck simulate`:
//!
//! ```text
//! # open the menu and drill into services
//! tap activator
//! tap submenu services
//! tap back
//! key Escape
//! resize 1200
//! tap theme            # primary theme toggle
//! tap mobile-theme     # mirrored toggle inside the overlay
//! tap background
//! scroll 400 at 1000   # scroll position 400px at t=1000ms
//! tick 5000            # clock reaches 5000ms
//! dot 2                # carousel dot 2 tapped
//! image-error 0        # first content image failed to load
//! focus card 1         # second card focused
//! blur card 1
//! key Tab              # keyboard navigation begins
//! mousedown            # ...and ends
//! ```
//!
//! `#` starts a comment. Blank lines are skipped. Errors report the 1-based
//! line number.

use crate::overlay::Trigger;
use crate::session::Event;
use crate::types::PanelId;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// One parsed script line.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// 1-based line number in the script.
    pub line: usize,
    /// The line with comments and surrounding whitespace removed.
    pub text: String,
    pub event: Event,
}

/// Parse a whole script.
pub fn parse_script(source: &str) -> Result<Vec<Step>, ScriptError> {
    let mut steps = Vec::new();
    for (idx, raw) in source.lines().enumerate() {
        let line = idx + 1;
        let text = raw.split('#').next().unwrap_or_default().trim();
        if text.is_empty() {
            continue;
        }
        let event = parse_event(text).map_err(|message| ScriptError::Parse { line, message })?;
        steps.push(Step {
            line,
            text: text.to_string(),
            event,
        });
    }
    Ok(steps)
}

/// Read and parse a script file.
pub fn load_script(path: &Path) -> Result<Vec<Step>, ScriptError> {
    let source = fs::read_to_string(path)?;
    parse_script(&source)
}

/// Parse a single non-empty, comment-free line.
pub fn parse_event(text: &str) -> Result<Event, String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let event = match words.as_slice() {
        ["tap", "activator"] => Event::Nav(Trigger::Activator),
        ["tap", "background"] => Event::Nav(Trigger::Background),
        ["tap", "back"] => Event::Nav(Trigger::Back),
        ["tap", "theme"] => Event::ThemeToggle,
        ["tap", "mobile-theme"] => Event::Nav(Trigger::ThemeMirror),
        ["tap", "submenu", id] => Event::Nav(Trigger::Submenu(PanelId::new(*id))),
        ["tap", "submenu"] => return Err("'tap submenu' needs a panel id".into()),
        ["tap", other, ..] => return Err(format!("unknown tap target '{other}'")),
        ["key", name] => Event::Nav(Trigger::Key((*name).to_string())),
        ["resize", width] => Event::Nav(Trigger::Resize {
            width: number(width, "width")?,
        }),
        ["scroll", top, "at", at_ms] => Event::Scroll {
            top: number(top, "scroll position")?,
            at_ms: number(at_ms, "time")?,
        },
        ["tick", at_ms] => Event::Tick {
            at_ms: number(at_ms, "time")?,
        },
        ["dot", index] => Event::Dot(number(index, "dot index")?),
        ["image-error", index] => Event::ImageError(number(index, "image index")?),
        ["focus", "card", index] => Event::CardFocus {
            index: number(index, "card index")?,
            focused: true,
        },
        ["blur", "card", index] => Event::CardFocus {
            index: number(index, "card index")?,
            focused: false,
        },
        ["mousedown"] => Event::PointerDown,
        [verb, ..] if is_verb(verb) => {
            return Err(format!("wrong arguments for '{verb}': {text}"));
        }
        [verb, ..] => return Err(format!("unknown event '{verb}'")),
        [] => return Err("empty line".into()),
    };
    Ok(event)
}

fn is_verb(word: &str) -> bool {
    matches!(
        word,
        "tap" | "key" | "resize" | "scroll" | "tick" | "dot" | "image-error" | "focus" | "blur"
            | "mousedown"
    )
}

fn number<T: FromStr>(word: &str, what: &str) -> Result<T, String> {
    word.parse()
        .map_err(|_| format!("invalid {what} '{word}'"))
}
