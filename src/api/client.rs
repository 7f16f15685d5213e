//! Notes REST API Client
//!
//! HTTP client for communicating with the Notes backend.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::dto::{
    CreateNoteRequest, ErrorBody, Note, NoteChanges, NoteId, NoteListResponse, NoteSaved,
    ShareResponse, SharedNote, WelcomeResponse,
};
use super::{ApiError, NotesApi};
use crate::route::ShareToken;

/// Configuration for the Notes API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL the API is mounted at (e.g., "http://localhost:5000/api")
    pub base_url: String,
    /// Request timeout in milliseconds; 0 disables the timeout
    pub request_timeout_ms: u64,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            request_timeout_ms: 30_000,
        }
    }
}

/// Notes REST API client
pub struct HttpNotesApi {
    client: Client,
    config: ApiClientConfig,
}

impl HttpNotesApi {
    /// Create a new client with the given configuration
    pub fn new(config: ApiClientConfig) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if config.request_timeout_ms > 0 {
            builder = builder.timeout(std::time::Duration::from_millis(config.request_timeout_ms));
        }
        let client = builder.build().map_err(|e| ApiError::Setup(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Send a request and turn non-2xx statuses into errors
    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
        tracing::debug!("API returned {}: {}", status, text);

        Err(ApiError::from_status(status.as_u16(), body.error))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl NotesApi for HttpNotesApi {
    async fn list_notes(&self) -> Result<Vec<Note>, ApiError> {
        let url = self.url("/notes");
        tracing::debug!("GET {}", url);

        let response = self.send(self.client.get(&url)).await?;
        let result: NoteListResponse = Self::decode(response).await?;
        Ok(result.notes)
    }

    async fn create_note(&self, title: &str, content: &str) -> Result<NoteSaved, ApiError> {
        let url = self.url("/notes");
        tracing::debug!("POST {}", url);

        let body = CreateNoteRequest {
            title: title.to_string(),
            content: content.to_string(),
        };

        let response = self.send(self.client.post(&url).json(&body)).await?;
        Self::decode(response).await
    }

    async fn get_note(&self, id: NoteId) -> Result<Note, ApiError> {
        let url = self.url(&format!("/notes/{}", id));
        tracing::debug!("GET {}", url);

        let response = self.send(self.client.get(&url)).await?;
        Self::decode(response).await
    }

    async fn update_note(&self, id: NoteId, changes: &NoteChanges) -> Result<NoteSaved, ApiError> {
        let url = self.url(&format!("/notes/{}", id));
        tracing::debug!("PUT {}", url);

        let response = self.send(self.client.put(&url).json(changes)).await?;
        Self::decode(response).await
    }

    async fn delete_note(&self, id: NoteId) -> Result<(), ApiError> {
        let url = self.url(&format!("/notes/{}", id));
        tracing::debug!("DELETE {}", url);

        // Success body is ignored
        self.send(self.client.delete(&url)).await?;
        Ok(())
    }

    async fn share_note(&self, id: NoteId) -> Result<ShareResponse, ApiError> {
        let url = self.url(&format!("/notes/{}/share", id));
        tracing::debug!("POST {}", url);

        let response = self.send(self.client.post(&url)).await?;
        Self::decode(response).await
    }

    async fn fetch_shared_note(&self, token: &ShareToken) -> Result<SharedNote, ApiError> {
        let url = self.url(&format!("/share/{}", urlencoding::encode(token.as_str())));
        tracing::debug!("GET {}", url);

        let response = self.send(self.client.get(&url)).await?;
        Self::decode(response).await
    }

    async fn welcome(&self) -> Result<WelcomeResponse, ApiError> {
        let url = self.url("/welcome");

        let response = self.send(self.client.get(&url)).await?;
        Self::decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::ShareRoute;
    use axum::{
        extract::Path,
        http::StatusCode,
        routing::{get, post},
        Json, Router,
    };
    use serde_json::{json, Value};

    async fn spawn_backend(router: Router) -> HttpNotesApi {
        spawn_backend_with_timeout(router, 5000).await
    }

    async fn spawn_backend_with_timeout(router: Router, request_timeout_ms: u64) -> HttpNotesApi {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        HttpNotesApi::new(ApiClientConfig {
            base_url: format!("http://{}/api/", addr),
            request_timeout_ms,
        })
        .unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = ApiClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:5000/api");
        assert_eq!(config.request_timeout_ms, 30_000);
    }

    #[tokio::test]
    async fn test_list_notes_keeps_order() {
        let router = Router::new().route(
            "/api/notes",
            get(|| async {
                Json(json!({
                    "notes": [
                        {"id": 9, "title": "b", "content": "second", "created_at": "2024-02-01T08:00:00", "updated_at": null},
                        {"id": 2, "title": null, "content": "first", "created_at": "2024-01-01T08:00:00+00:00", "updated_at": "2024-01-03T08:00:00+00:00"}
                    ]
                }))
            }),
        );
        let api = spawn_backend(router).await;

        let notes = api.list_notes().await.unwrap();
        let ids: Vec<i64> = notes.iter().map(|n| n.id.0).collect();
        assert_eq!(ids, vec![9, 2]);
        assert!(notes[1].updated_at.is_some());
    }

    #[tokio::test]
    async fn test_list_notes_schema_mismatch() {
        let router = Router::new().route("/api/notes", get(|| async { Json(json!({"items": []})) }));
        let api = spawn_backend(router).await;

        let err = api.list_notes().await.unwrap_err();
        assert!(matches!(err, ApiError::Schema(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_create_note_sends_body() {
        let router = Router::new().route(
            "/api/notes",
            post(|Json(body): Json<Value>| async move {
                (
                    StatusCode::CREATED,
                    Json(json!({
                        "id": 5,
                        "title": body["title"],
                        "content": body["content"],
                        "message": "Note created successfully"
                    })),
                )
            }),
        );
        let api = spawn_backend(router).await;

        let saved = api.create_note("Groceries", "eggs").await.unwrap();
        assert_eq!(saved.id, NoteId(5));
        assert_eq!(saved.title.as_deref(), Some("Groceries"));
        assert_eq!(saved.content, "eggs");
        assert_eq!(saved.message.as_deref(), Some("Note created successfully"));
    }

    #[tokio::test]
    async fn test_create_note_error_body() {
        let router = Router::new().route(
            "/api/notes",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"error": "Missing content for note"})),
                )
            }),
        );
        let api = spawn_backend(router).await;

        let err = api.create_note("", "x").await.unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.to_string(), "Missing content for note");
    }

    #[tokio::test]
    async fn test_delete_not_found() {
        let router = Router::new().route(
            "/api/notes/:id",
            axum::routing::delete(|Path(id): Path<i64>| async move {
                (
                    StatusCode::NOT_FOUND,
                    Json(json!({"error": format!("Note {} not found", id)})),
                )
            }),
        );
        let api = spawn_backend(router).await;

        let err = api.delete_note(NoteId(77)).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Note 77 not found");
    }

    #[tokio::test]
    async fn test_share_without_json_body() {
        let router = Router::new().route(
            "/api/notes/:id/share",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let api = spawn_backend(router).await;

        let err = api.share_note(NoteId(1)).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "HTTP error! status: 500");
    }

    #[tokio::test]
    async fn test_share_note() {
        let router = Router::new().route(
            "/api/notes/:id/share",
            post(|Path(id): Path<i64>| async move {
                (
                    StatusCode::CREATED,
                    Json(json!({
                        "message": "Note shared successfully.",
                        "share_token": format!("tok-{}", id),
                        "share_url": format!("http://notes.local/shared/tok-{}", id)
                    })),
                )
            }),
        );
        let api = spawn_backend(router).await;

        let share = api.share_note(NoteId(4)).await.unwrap();
        assert_eq!(share.share_url, "http://notes.local/shared/tok-4");
        assert_eq!(share.share_token.as_deref(), Some("tok-4"));
    }

    #[tokio::test]
    async fn test_fetch_shared_note() {
        let router = Router::new().route(
            "/api/share/:token",
            get(|Path(token): Path<String>| async move {
                Json(json!({
                    "title": token,
                    "content": "shared body",
                    "shared_at": "2024-06-01T12:00:00+00:00"
                }))
            }),
        );
        let api = spawn_backend(router).await;

        let ShareRoute::Token(token) = ShareRoute::match_path("/shared/abc-123") else {
            panic!("expected token");
        };
        let note = api.fetch_shared_note(&token).await.unwrap();
        assert_eq!(note.title.as_deref(), Some("abc-123"));
        assert_eq!(note.content, "shared body");
        assert!(note.shared_at.is_some());
    }

    #[tokio::test]
    async fn test_update_note() {
        let router = Router::new().route(
            "/api/notes/:id",
            axum::routing::put(|Path(id): Path<i64>, Json(body): Json<Value>| async move {
                Json(json!({
                    "id": id,
                    "title": body.get("title").cloned().unwrap_or(json!("old title")),
                    "content": body.get("content").cloned().unwrap_or(json!("old content")),
                    "message": "Note updated successfully"
                }))
            }),
        );
        let api = spawn_backend(router).await;

        let changes = NoteChanges {
            title: None,
            content: Some("new content".to_string()),
        };
        let saved = api.update_note(NoteId(8), &changes).await.unwrap();
        assert_eq!(saved.title.as_deref(), Some("old title"));
        assert_eq!(saved.content, "new content");
    }

    #[tokio::test]
    async fn test_zero_timeout_means_no_timeout() {
        let router = Router::new().route(
            "/api/welcome",
            get(|| async { Json(json!({"message": "Welcome to the Notes API!"})) }),
        );
        let api = spawn_backend_with_timeout(router, 0).await;

        let welcome = api.welcome().await.unwrap();
        assert_eq!(welcome.message, "Welcome to the Notes API!");
    }

    #[tokio::test]
    async fn test_shared_token_sent_as_one_segment() {
        let router = Router::new().route(
            "/api/share/:token",
            get(|Path(token): Path<String>| async move {
                Json(json!({"title": token, "content": "x", "shared_at": null}))
            }),
        );
        let api = spawn_backend(router).await;

        let ShareRoute::Token(token) = ShareRoute::match_path("/shared/a%20b") else {
            panic!("expected token");
        };
        let note = api.fetch_shared_note(&token).await.unwrap();
        assert_eq!(note.title.as_deref(), Some("a b"));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = HttpNotesApi::new(ApiClientConfig {
            base_url: format!("http://{}/api", addr),
            request_timeout_ms: 2000,
        })
        .unwrap();

        let err = api.list_notes().await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)), "got {:?}", err);
    }
}
