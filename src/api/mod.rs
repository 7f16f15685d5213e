//! Notes REST API
//!
//! Typed client for the Notes backend.
//!
//! # Endpoints
//!
//! ## Notes
//! - `GET /notes` - List all notes
//! - `POST /notes` - Create a note
//! - `GET /notes/{id}` - Get a note
//! - `PUT /notes/{id}` - Update a note
//! - `DELETE /notes/{id}` - Delete a note
//!
//! ## Sharing
//! - `POST /notes/{id}/share` - Create a share link
//! - `GET /share/{token}` - Fetch a shared note
//!
//! ## Misc
//! - `GET /welcome` - Reachability check

mod client;
pub mod dto;
pub mod error;

pub use client::{ApiClientConfig, HttpNotesApi};
pub use dto::{
    Note, NoteChanges, NoteId, NoteSaved, ShareResponse, SharedNote, Timestamp, WelcomeResponse,
};
pub use error::ApiError;

use async_trait::async_trait;

use crate::route::ShareToken;

/// Operations the controllers need from the backend
#[async_trait]
pub trait NotesApi: Send + Sync {
    /// Full note collection, in backend order
    async fn list_notes(&self) -> Result<Vec<Note>, ApiError>;

    async fn create_note(&self, title: &str, content: &str) -> Result<NoteSaved, ApiError>;

    async fn get_note(&self, id: NoteId) -> Result<Note, ApiError>;

    async fn update_note(&self, id: NoteId, changes: &NoteChanges) -> Result<NoteSaved, ApiError>;

    async fn delete_note(&self, id: NoteId) -> Result<(), ApiError>;

    /// Create a share link for a note
    async fn share_note(&self, id: NoteId) -> Result<ShareResponse, ApiError>;

    async fn fetch_shared_note(&self, token: &ShareToken) -> Result<SharedNote, ApiError>;

    async fn welcome(&self) -> Result<WelcomeResponse, ApiError>;
}
