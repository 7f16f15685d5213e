//! In-memory page elements
//!
//! Handles are cheap to clone and share their state, so a caller can keep one
//! copy for inspection and hand the other to a controller.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{DisplayElement, ListContainer, Notice, NoteForm, Notifier};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// List container backed by a string
#[derive(Debug, Clone, Default)]
pub struct MemoryContainer {
    state: Arc<Mutex<ContainerState>>,
}

#[derive(Debug, Default)]
struct ContainerState {
    markup: String,
    renders: usize,
}

impl MemoryContainer {
    pub fn markup(&self) -> String {
        lock(&self.state).markup.clone()
    }

    /// Number of times the contents were replaced
    pub fn renders(&self) -> usize {
        lock(&self.state).renders
    }

    /// Count of top-level `<li` items in the current markup
    pub fn item_count(&self) -> usize {
        lock(&self.state).markup.matches("<li").count()
    }
}

impl ListContainer for MemoryContainer {
    fn replace_contents(&mut self, markup: &str) {
        let mut state = lock(&self.state);
        state.markup = markup.to_string();
        state.renders += 1;
    }
}

/// Display element backed by a string
#[derive(Debug, Clone, Default)]
pub struct MemoryElement {
    content: Arc<Mutex<String>>,
}

impl MemoryElement {
    pub fn with_content(content: &str) -> Self {
        Self {
            content: Arc::new(Mutex::new(content.to_string())),
        }
    }

    pub fn content(&self) -> String {
        lock(&self.content).clone()
    }
}

impl DisplayElement for MemoryElement {
    fn set_content(&mut self, markup: &str) {
        *lock(&self.content) = markup.to_string();
    }
}

/// Form with fixed field values until reset
#[derive(Debug, Clone, Default)]
pub struct MemoryForm {
    fields: Arc<Mutex<(String, String)>>,
}

impl MemoryForm {
    pub fn new(title: &str, content: &str) -> Self {
        Self {
            fields: Arc::new(Mutex::new((title.to_string(), content.to_string()))),
        }
    }

    /// Overwrite both fields, as a user typing would
    pub fn fill(&self, title: &str, content: &str) {
        *lock(&self.fields) = (title.to_string(), content.to_string());
    }

    pub fn is_empty(&self) -> bool {
        let fields = lock(&self.fields);
        fields.0.is_empty() && fields.1.is_empty()
    }
}

impl NoteForm for MemoryForm {
    fn title(&self) -> String {
        lock(&self.fields).0.clone()
    }

    fn content(&self) -> String {
        lock(&self.fields).1.clone()
    }

    fn reset(&mut self) {
        *lock(&self.fields) = (String::new(), String::new());
    }
}

/// Notifier that records every notice and answers confirms with a fixed value
#[derive(Debug, Clone)]
pub struct MemoryNotifier {
    accept: bool,
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl MemoryNotifier {
    /// Accepts every confirm request
    pub fn confirming() -> Self {
        Self {
            accept: true,
            notices: Arc::default(),
        }
    }

    /// Declines every confirm request
    pub fn declining() -> Self {
        Self {
            accept: false,
            notices: Arc::default(),
        }
    }

    pub fn notices(&self) -> Vec<Notice> {
        lock(&self.notices).clone()
    }

    fn record(&self, notice: Notice) {
        lock(&self.notices).push(notice);
    }
}

impl Notifier for MemoryNotifier {
    fn info(&self, message: &str) {
        self.record(Notice::Info(message.to_string()));
    }

    fn confirm(&self, message: &str) -> bool {
        self.record(Notice::ConfirmRequest(message.to_string()));
        self.accept
    }

    fn share_result(&self, message: &str, url: &str) {
        self.record(Notice::ShareResult {
            message: message.to_string(),
            url: url.to_string(),
        });
    }
}
