//! Page Elements and Notifications
//!
//! Controllers never touch a concrete page. They are handed element handles
//! and a [`Notifier`] at construction time, which lets the same controller
//! drive a browser-like page, the terminal, or an in-memory test double.

mod memory;
mod terminal;

pub use memory::{MemoryContainer, MemoryElement, MemoryForm, MemoryNotifier};
pub use terminal::TerminalNotifier;

use std::collections::HashMap;

/// Container whose inner markup is replaced wholesale on each render
pub trait ListContainer: Send {
    fn replace_contents(&mut self, markup: &str);
}

/// Note-creation form
pub trait NoteForm: Send {
    fn title(&self) -> String;
    fn content(&self) -> String;
    /// Clear all fields
    fn reset(&mut self);
}

/// Single display element (title, body, label)
pub trait DisplayElement: Send {
    fn set_content(&mut self, markup: &str);
}

/// User-facing notices
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Informational or error message
    Info(String),
    /// Yes/no question gating an action
    ConfirmRequest(String),
    /// Share link ready to be copied
    ShareResult { message: String, url: String },
}

/// Surface for [`Notice`]s.
///
/// Implementations may block until the user answers.
pub trait Notifier: Send + Sync {
    fn info(&self, message: &str);

    /// Returns `true` when the user accepts
    fn confirm(&self, message: &str) -> bool;

    fn share_result(&self, message: &str, url: &str);
}

/// Element a click landed on: its class list and `data-*` attributes
#[derive(Debug, Clone, Default)]
pub struct ClickTarget {
    classes: Vec<String>,
    data: HashMap<String, String>,
}

impl ClickTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Set a `data-*` attribute (key without the `data-` prefix)
    pub fn data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn data_attr(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }
}
