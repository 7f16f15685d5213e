//! # Notes Client
//!
//! Client for the Notes REST API: list, create, delete and share notes, and
//! view a single shared note through its public link.
//!
//! ## Modules
//!
//! - [`api`]: Typed REST client for the Notes backend
//! - [`controllers`]: The notes-list and shared-note page controllers
//! - [`ui`]: Page element and notifier seams, with in-memory and terminal implementations
//! - [`route`]: Share-link path matching
//! - [`escape`]: HTML escaping for user-supplied text
//! - [`format`]: Timestamp display formatting
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use notes_client::api::{ApiClientConfig, HttpNotesApi};
//! use notes_client::controllers::NotesListController;
//! use notes_client::format::DateFormat;
//! use notes_client::ui::{MemoryContainer, MemoryNotifier};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = Arc::new(HttpNotesApi::new(ApiClientConfig::default())?);
//!     let list = MemoryContainer::default();
//!
//!     let controller = NotesListController::new(
//!         api,
//!         Arc::new(MemoryNotifier::confirming()),
//!         Box::new(list.clone()),
//!         DateFormat::default(),
//!     );
//!     controller.refresh().await;
//!
//!     println!("{}", list.markup());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod controllers;
pub mod escape;
pub mod format;
pub mod route;
pub mod ui;

pub use api::{
    ApiClientConfig, ApiError, HttpNotesApi, Note, NoteChanges, NoteId, NotesApi, SharedNote,
    Timestamp,
};

pub use controllers::{
    ActionOutcome, NotesListController, SharedNoteElements, SharedNoteViewController, ViewOutcome,
};

pub use config::{ApiConfig, Config, ConfigError, DisplayConfig, LoggingConfig};

pub use escape::{escape_html, unescape_html};
pub use format::DateFormat;
pub use route::{ShareRoute, ShareToken};
