//! Page Controllers
//!
//! - [`NotesListController`]: the notes-management page
//! - [`SharedNoteViewController`]: the public shared-note page
//!
//! Each controller owns its element handles. They share nothing but the
//! [`NotesApi`](crate::api::NotesApi) they are given.

mod notes_list;
mod shared_view;

pub use notes_list::{
    render_list_markup, render_note_item, NotesListController, DELETE_CLASS, EMPTY_LIST_ITEM,
    LOAD_ERROR_ITEM, SHARE_CLASS,
};
pub use shared_view::{SharedNoteElements, SharedNoteViewController, ViewOutcome};

/// Fallback title for notes without one
pub const UNTITLED: &str = "Untitled Note";

/// How a user action ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Backend accepted the action
    Completed,
    /// Rejected client-side before any request
    Rejected,
    /// User declined the confirm request
    Cancelled,
    /// Request failed; the user was notified
    Failed,
    /// Click target did not map to an action
    Ignored,
}
