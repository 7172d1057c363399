//! Looping typewriter animation.
//!
//! [`Typewriter`] is the pure state machine: each [`tick`](Typewriter::tick)
//! types or deletes one character of the current phrase and says how long to
//! wait before the next tick. It never ends, so it is also an infinite
//! iterator of [`Frame`]s.
//!
//! [`TypewriterLoop`] drives it on a [`Page`] with self-rescheduling
//! single-shot timers: every tick schedules exactly the next one.

use std::rc::Rc;
use std::time::Duration;

use tracing::{debug, trace};

use crate::config::{SiteConfig, TypingTiming};
use crate::error::{FolioError, FolioResult};
use crate::page::Page;

/// Whether the current phrase is growing or shrinking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Typing,
    Deleting,
}

/// Position of the animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Index into the phrase list
    pub role: usize,
    /// Characters of the phrase currently shown
    pub chars: usize,
    pub deleting: bool,
}

/// Display state after one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Text to show
    pub text: String,
    /// Phrase the text was taken from
    pub role: usize,
    /// Length of `text` in characters
    pub chars: usize,
    /// Wait before the next tick
    pub delay: Duration,
}

/// First `chars` characters of `phrase`.
fn prefix(phrase: &str, chars: usize) -> &str {
    match phrase.char_indices().nth(chars) {
        Some((byte, _)) => &phrase[..byte],
        None => phrase,
    }
}

/// Typing/deleting state machine over a cyclic phrase list.
#[derive(Debug, Clone)]
pub struct Typewriter {
    roles: Vec<String>,
    timing: TypingTiming,
    cursor: Cursor,
}

impl Typewriter {
    pub fn new(roles: Vec<String>, timing: TypingTiming) -> FolioResult<Self> {
        if roles.is_empty() {
            return Err(FolioError::InvalidConfig(
                "typewriter needs at least one phrase".to_string(),
            ));
        }
        Ok(Self {
            roles,
            timing,
            cursor: Cursor::default(),
        })
    }

    pub fn from_config(config: &SiteConfig) -> FolioResult<Self> {
        Self::new(config.roles.clone(), config.typing)
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn phase(&self) -> Phase {
        if self.cursor.deleting {
            Phase::Deleting
        } else {
            Phase::Typing
        }
    }

    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    pub fn current_role(&self) -> &str {
        &self.roles[self.cursor.role]
    }

    /// Advance one step and return what to display.
    pub fn tick(&mut self) -> Frame {
        let role = self.cursor.role;
        let full = &self.roles[role];
        let len = full.chars().count();

        let delay = if self.cursor.deleting {
            self.cursor.chars = self.cursor.chars.saturating_sub(1);
            if self.cursor.chars == 0 {
                self.cursor.deleting = false;
                self.cursor.role = (role + 1) % self.roles.len();
                self.timing.advance_delay()
            } else {
                self.timing.delete_delay()
            }
        } else {
            self.cursor.chars = (self.cursor.chars + 1).min(len);
            if self.cursor.chars >= len {
                self.cursor.deleting = true;
                self.timing.hold_delay()
            } else {
                self.timing.type_delay()
            }
        };

        let chars = self.cursor.chars;
        Frame {
            text: prefix(full, chars).to_string(),
            role,
            chars,
            delay,
        }
    }
}

impl Iterator for Typewriter {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        Some(self.tick())
    }
}

/// Drives a [`Typewriter`] on a page for the rest of the session.
pub struct TypewriterLoop;

impl TypewriterLoop {
    /// Run the first tick now and keep rescheduling.
    ///
    /// The target element is looked up on every tick; while it is absent the
    /// write is skipped but the loop keeps its cadence.
    pub fn start<P: Page>(page: Rc<P>, typewriter: Typewriter, target_id: &str) {
        if page.element_by_id(target_id).is_none() {
            debug!(target_id, "typewriter target missing, ticks will not render");
        }
        tick(page, typewriter, Rc::from(target_id));
    }
}

fn tick<P: Page>(page: Rc<P>, mut typewriter: Typewriter, target_id: Rc<str>) {
    let frame = typewriter.tick();
    match page.element_by_id(&target_id) {
        Some(el) => page.set_text(&el, &frame.text),
        None => trace!(chars = frame.chars, "typewriter tick skipped"),
    }

    let next_page = Rc::clone(&page);
    page.set_timeout(
        frame.delay,
        Box::new(move || tick(next_page, typewriter, target_id)),
    );
}
