//! Notes list controller
//!
//! Keeps the rendered note list in step with the backend and mediates the
//! create, delete, share and edit actions.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{ActionOutcome, UNTITLED};
use crate::api::{Note, NoteChanges, NoteId, NotesApi};
use crate::escape::{escape_html, escape_or};
use crate::format::DateFormat;
use crate::ui::{ClickTarget, ListContainer, NoteForm, Notifier};

pub const EMPTY_LIST_ITEM: &str = "<li>No notes yet. Create one!</li>";
pub const LOAD_ERROR_ITEM: &str = "<li>Error loading notes. Please try again later.</li>";

pub const DELETE_CLASS: &str = "delete-btn";
pub const SHARE_CLASS: &str = "share-btn";

const EMPTY_CONTENT_MESSAGE: &str = "Content cannot be empty!";
const DELETE_CONFIRM_MESSAGE: &str = "Are you sure you want to delete this note?";
const SHARE_MESSAGE: &str = "Share this link:";

fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Markup for one note.
///
/// Title and content are escaped; the id is numeric and needs no escaping.
pub fn render_note_item(note: &Note, dates: &DateFormat) -> String {
    let mut item = format!(
        "<li data-id=\"{id}\">\n<h3>{title}</h3>\n<p>{content}</p>\n<small>Created: {created}</small>\n",
        id = note.id,
        title = escape_or(note.title.as_deref(), UNTITLED),
        content = escape_html(Some(&note.content)),
        created = dates.format(&note.created_at),
    );

    if let Some(updated) = &note.updated_at {
        item.push_str(&format!(
            "<br><small>Updated: {}</small>\n",
            dates.format(updated)
        ));
    }

    item.push_str(&format!(
        "<div class=\"actions\">\n\
         <button class=\"{share}\" data-id=\"{id}\">Share</button>\n\
         <button class=\"{delete}\" data-id=\"{id}\">Delete</button>\n\
         </div>\n</li>\n",
        share = SHARE_CLASS,
        delete = DELETE_CLASS,
        id = note.id,
    ));
    item
}

/// Markup for the whole list, in the given order
pub fn render_list_markup(notes: &[Note], dates: &DateFormat) -> String {
    if notes.is_empty() {
        return EMPTY_LIST_ITEM.to_string();
    }
    notes
        .iter()
        .map(|note| render_note_item(note, dates))
        .collect()
}

/// Controller for the notes-management page
pub struct NotesListController {
    api: Arc<dyn NotesApi>,
    notifier: Arc<dyn Notifier>,
    list: Mutex<Box<dyn ListContainer>>,
    form: Option<Mutex<Box<dyn NoteForm>>>,
    dates: DateFormat,
}

impl NotesListController {
    pub fn new(
        api: Arc<dyn NotesApi>,
        notifier: Arc<dyn Notifier>,
        list: Box<dyn ListContainer>,
        dates: DateFormat,
    ) -> Self {
        Self {
            api,
            notifier,
            list: Mutex::new(list),
            form: None,
            dates,
        }
    }

    /// Attach the note-creation form
    pub fn with_form(mut self, form: Box<dyn NoteForm>) -> Self {
        self.form = Some(Mutex::new(form));
        self
    }

    /// Page finished loading
    pub async fn init(&self) {
        self.refresh().await;
    }

    /// Fetch all notes and re-render the list.
    ///
    /// Concurrent refreshes are not coalesced; whichever finishes last is shown.
    pub async fn refresh(&self) {
        match self.api.list_notes().await {
            Ok(notes) => {
                tracing::debug!("Rendering {} notes", notes.len());
                self.render_notes(&notes);
            }
            Err(e) => {
                tracing::error!("Error fetching notes: {}", e);
                lock(&self.list).replace_contents(LOAD_ERROR_ITEM);
            }
        }
    }

    pub fn render_notes(&self, notes: &[Note]) {
        let markup = render_list_markup(notes, &self.dates);
        lock(&self.list).replace_contents(&markup);
    }

    /// Form submission
    pub async fn submit(&self) -> ActionOutcome {
        let Some(form) = &self.form else {
            tracing::warn!("Submit without a note form");
            return ActionOutcome::Ignored;
        };

        let (title, content) = {
            let form = lock(form);
            (form.title(), form.content())
        };

        if content.trim().is_empty() {
            self.notifier.info(EMPTY_CONTENT_MESSAGE);
            return ActionOutcome::Rejected;
        }

        match self.api.create_note(&title, &content).await {
            Ok(saved) => {
                tracing::info!("Created note {}", saved.id);
                lock(form).reset();
                self.refresh().await;
                ActionOutcome::Completed
            }
            Err(e) => {
                tracing::error!("Error creating note: {}", e);
                self.notifier.info(&format!("Error creating note: {}", e));
                ActionOutcome::Failed
            }
        }
    }

    /// Delegated click handler for the list container
    pub async fn handle_click(&self, target: &ClickTarget) -> ActionOutcome {
        let is_delete = target.has_class(DELETE_CLASS);
        let is_share = target.has_class(SHARE_CLASS);
        if !is_delete && !is_share {
            return ActionOutcome::Ignored;
        }

        let id = match target.data_attr("id").map(str::parse::<NoteId>) {
            Some(Ok(id)) => id,
            Some(Err(e)) => {
                tracing::warn!("Click target has invalid data-id: {}", e);
                return ActionOutcome::Ignored;
            }
            None => {
                tracing::warn!("Click target has no data-id");
                return ActionOutcome::Ignored;
            }
        };

        if is_delete {
            self.delete_note(id).await
        } else {
            self.share_note(id).await
        }
    }

    pub async fn delete_note(&self, id: NoteId) -> ActionOutcome {
        if !self.notifier.confirm(DELETE_CONFIRM_MESSAGE) {
            return ActionOutcome::Cancelled;
        }

        match self.api.delete_note(id).await {
            Ok(()) => {
                tracing::info!("Deleted note {}", id);
                self.refresh().await;
                ActionOutcome::Completed
            }
            Err(e) => {
                tracing::error!("Error deleting note {}: {}", id, e);
                self.notifier.info(&format!("Error deleting note: {}", e));
                ActionOutcome::Failed
            }
        }
    }

    pub async fn share_note(&self, id: NoteId) -> ActionOutcome {
        match self.api.share_note(id).await {
            Ok(share) => {
                self.notifier.share_result(SHARE_MESSAGE, &share.share_url);
                ActionOutcome::Completed
            }
            Err(e) => {
                tracing::error!("Error sharing note {}: {}", id, e);
                self.notifier.info(&format!("Error sharing note: {}", e));
                ActionOutcome::Failed
            }
        }
    }

    /// Apply a partial update, then refresh
    pub async fn update_note(&self, id: NoteId, changes: NoteChanges) -> ActionOutcome {
        if changes.is_empty() {
            self.notifier.info("Nothing to update.");
            return ActionOutcome::Rejected;
        }
        if changes.content.as_deref().is_some_and(|c| c.trim().is_empty()) {
            self.notifier.info(EMPTY_CONTENT_MESSAGE);
            return ActionOutcome::Rejected;
        }

        match self.api.update_note(id, &changes).await {
            Ok(saved) => {
                tracing::info!("Updated note {}", saved.id);
                self.refresh().await;
                ActionOutcome::Completed
            }
            Err(e) => {
                tracing::error!("Error updating note {}: {}", id, e);
                self.notifier.info(&format!("Error updating note: {}", e));
                ActionOutcome::Failed
            }
        }
    }
}
