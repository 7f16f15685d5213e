//! Shared note view controller
//!
//! Renders the single note behind a `/shared/{token}` link.

use std::sync::{Arc, Mutex, PoisonError};

use super::UNTITLED;
use crate::api::{ApiError, NotesApi, SharedNote};
use crate::escape::{escape_html, escape_or};
use crate::format::DateFormat;
use crate::route::ShareRoute;
use crate::ui::DisplayElement;

const ERROR_TITLE: &str = "Error";
const MISSING_TOKEN_MESSAGE: &str = "Share token not found in URL.";
const NOT_FOUND_TITLE: &str = "Note Not Found";
const NOT_FOUND_MESSAGE: &str = "This shared note could not be found or may have been deleted.";
const UNREACHABLE_MESSAGE: &str =
    "Could not load shared note. Please check the link or try again later.";

/// Element handles the shared-note page is expected to provide
#[derive(Default)]
pub struct SharedNoteElements {
    pub title: Option<Box<dyn DisplayElement>>,
    pub content: Option<Box<dyn DisplayElement>>,
    pub shared_at: Option<Box<dyn DisplayElement>>,
}

struct Elements {
    title: Box<dyn DisplayElement>,
    content: Box<dyn DisplayElement>,
    shared_at: Box<dyn DisplayElement>,
}

impl SharedNoteElements {
    fn resolve(self) -> Option<Elements> {
        Some(Elements {
            title: self.title?,
            content: self.content?,
            shared_at: self.shared_at?,
        })
    }
}

/// How a page load ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewOutcome {
    /// Note rendered
    Loaded,
    /// A display element was missing; nothing rendered
    MalformedPage,
    /// Path carried no token; no request sent
    MissingToken,
    /// Backend answered 404
    NotFound,
    /// Any other failure
    Failed,
}

/// Controller for the shared-note page
pub struct SharedNoteViewController {
    api: Arc<dyn NotesApi>,
    route: ShareRoute,
    elements: Option<Mutex<Elements>>,
    dates: DateFormat,
}

impl SharedNoteViewController {
    /// `path` is the page's URL path, e.g. `/shared/<token>`
    pub fn new(
        api: Arc<dyn NotesApi>,
        path: &str,
        elements: SharedNoteElements,
        dates: DateFormat,
    ) -> Self {
        Self {
            api,
            route: ShareRoute::match_path(path),
            elements: elements.resolve().map(Mutex::new),
            dates,
        }
    }

    /// Page finished loading
    pub async fn load(&self) -> ViewOutcome {
        let Some(elements) = &self.elements else {
            tracing::error!("One or more HTML elements for displaying the note are missing.");
            return ViewOutcome::MalformedPage;
        };

        let ShareRoute::Token(token) = &self.route else {
            show(elements, ERROR_TITLE, MISSING_TOKEN_MESSAGE);
            return ViewOutcome::MissingToken;
        };

        match self.api.fetch_shared_note(token).await {
            Ok(note) => {
                self.render(elements, &note);
                ViewOutcome::Loaded
            }
            Err(e) => {
                tracing::error!("Error fetching shared note: {}", e);
                match &e {
                    ApiError::NotFound { .. } => {
                        show(elements, NOT_FOUND_TITLE, NOT_FOUND_MESSAGE);
                        ViewOutcome::NotFound
                    }
                    ApiError::Status { status, .. } => {
                        let message = format!("Could not load shared note. Status: {}", status);
                        show(elements, ERROR_TITLE, &message);
                        ViewOutcome::Failed
                    }
                    _ => {
                        show(elements, ERROR_TITLE, UNREACHABLE_MESSAGE);
                        ViewOutcome::Failed
                    }
                }
            }
        }
    }

    fn render(&self, elements: &Mutex<Elements>, note: &SharedNote) {
        let label = match &note.shared_at {
            Some(shared_at) => format!("Shared on: {}", self.dates.format(shared_at)),
            None => String::new(),
        };

        let mut elements = elements.lock().unwrap_or_else(PoisonError::into_inner);
        elements
            .title
            .set_content(&escape_or(note.title.as_deref(), UNTITLED));
        elements
            .content
            .set_content(&escape_html(Some(&note.content)));
        elements.shared_at.set_content(&label);
    }
}

fn show(elements: &Mutex<Elements>, title: &str, message: &str) {
    let mut elements = elements.lock().unwrap_or_else(PoisonError::into_inner);
    elements.title.set_content(title);
    elements.content.set_content(message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Timestamp;
    use crate::controllers::fake::{Call, FakeNotesApi, Failure};
    use crate::ui::MemoryElement;

    const LOADING: &str = "Loading title...";

    struct Page {
        api: Arc<FakeNotesApi>,
        title: MemoryElement,
        content: MemoryElement,
        shared_at: MemoryElement,
        controller: SharedNoteViewController,
    }

    fn page(api: FakeNotesApi, path: &str) -> Page {
        let api = Arc::new(api);
        let title = MemoryElement::with_content(LOADING);
        let content = MemoryElement::default();
        let shared_at = MemoryElement::with_content("stale");

        let controller = SharedNoteViewController::new(
            api.clone(),
            path,
            SharedNoteElements {
                title: Some(Box::new(title.clone())),
                content: Some(Box::new(content.clone())),
                shared_at: Some(Box::new(shared_at.clone())),
            },
            DateFormat::utc("%Y-%m-%d %H:%M"),
        );

        Page {
            api,
            title,
            content,
            shared_at,
            controller,
        }
    }

    fn shared(title: Option<&str>, content: &str, shared_at: Option<&str>) -> SharedNote {
        SharedNote {
            title: title.map(str::to_string),
            content: content.to_string(),
            shared_at: shared_at.and_then(Timestamp::parse),
        }
    }

    #[tokio::test]
    async fn test_renders_shared_note() {
        let api = FakeNotesApi::default();
        *api.shared.lock().unwrap() = Some(shared(
            Some("Trip <plan>"),
            "Pack \"boots\" & socks",
            Some("2024-06-01T12:30:00+00:00"),
        ));
        let p = page(api, "/shared/abc123");

        assert_eq!(p.controller.load().await, ViewOutcome::Loaded);

        assert_eq!(p.api.calls(), vec![Call::FetchShared("abc123".to_string())]);
        assert_eq!(p.title.content(), "Trip &lt;plan&gt;");
        assert_eq!(p.content.content(), "Pack &quot;boots&quot; &amp; socks");
        assert_eq!(p.shared_at.content(), "Shared on: 2024-06-01 12:30");
    }

    #[tokio::test]
    async fn test_missing_shared_at_blanks_label() {
        let api = FakeNotesApi::default();
        *api.shared.lock().unwrap() = Some(shared(None, "body", None));
        let p = page(api, "/shared/abc123");

        p.controller.load().await;

        assert_eq!(p.title.content(), "Untitled Note");
        assert_eq!(p.shared_at.content(), "");
    }

    #[tokio::test]
    async fn test_path_without_token_makes_no_request() {
        let p = page(FakeNotesApi::default(), "/notes/abc123");

        assert_eq!(p.controller.load().await, ViewOutcome::MissingToken);

        assert!(p.api.calls().is_empty());
        assert_eq!(p.title.content(), "Error");
        assert_eq!(p.content.content(), "Share token not found in URL.");
    }

    #[tokio::test]
    async fn test_not_found() {
        let p = page(FakeNotesApi::default(), "/shared/gone");

        assert_eq!(p.controller.load().await, ViewOutcome::NotFound);

        assert_eq!(p.title.content(), "Note Not Found");
        assert_eq!(
            p.content.content(),
            "This shared note could not be found or may have been deleted."
        );
        assert_eq!(p.shared_at.content(), "stale");
    }

    #[tokio::test]
    async fn test_other_status() {
        let api = FakeNotesApi::default();
        *api.fail_shared.lock().unwrap() = Some(Failure::status(500, Some("db down")));
        let p = page(api, "/shared/tok");

        assert_eq!(p.controller.load().await, ViewOutcome::Failed);

        assert_eq!(p.title.content(), "Error");
        assert_eq!(p.content.content(), "Could not load shared note. Status: 500");
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let api = FakeNotesApi::default();
        *api.fail_shared.lock().unwrap() = Some(Failure::network());
        let p = page(api, "/shared/tok");

        assert_eq!(p.controller.load().await, ViewOutcome::Failed);

        assert_eq!(p.title.content(), "Error");
        assert_eq!(
            p.content.content(),
            "Could not load shared note. Please check the link or try again later."
        );
    }

    #[tokio::test]
    async fn test_missing_element_does_nothing() {
        let api = Arc::new(FakeNotesApi::default());
        let title = MemoryElement::with_content(LOADING);

        let controller = SharedNoteViewController::new(
            api.clone(),
            "/shared/tok",
            SharedNoteElements {
                title: Some(Box::new(title.clone())),
                content: Some(Box::new(MemoryElement::default())),
                shared_at: None,
            },
            DateFormat::default(),
        );

        assert_eq!(controller.load().await, ViewOutcome::MalformedPage);
        assert!(api.calls().is_empty());
        assert_eq!(title.content(), LOADING);
    }
}
