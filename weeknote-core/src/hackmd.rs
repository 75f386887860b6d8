//! HackMD REST client — list, fetch and create notes.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use tracing::debug;

use crate::error::{NotesError, Result};
use crate::types::{NewNote, NoteContent, NoteSummary, UNTITLED};

/// Default HackMD API base URL.
pub const DEFAULT_API_URL: &str = "https://api.hackmd.io/v1";

/// Default base for shareable note links.
pub const DEFAULT_SHARE_BASE_URL: &str = "https://hackmd.io";

/// Remote operations of a notes service.
#[async_trait]
pub trait NotesApi: Send + Sync {
    /// List every note visible to the token (metadata only).
    async fn list_notes(&self) -> Result<Vec<NoteSummary>>;

    /// Fetch one note with its content.
    ///
    /// Blank content is an error ([`NotesError::EmptyContent`]), never an
    /// empty [`NoteContent`].
    async fn fetch_content(&self, id: &str) -> Result<NoteContent>;

    /// Create a note and return a shareable URL for it.
    async fn create_note(&self, note: &NewNote) -> Result<String>;
}

/// Full note as returned by `GET /notes/{id}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NoteDetail {
    id: Option<String>,
    title: Option<String>,
    content: Option<String>,
    created_at: Option<i64>,
}

/// Response of `POST /notes`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedNote {
    id: String,
    publish_link: Option<String>,
}

/// Client for the HackMD v1 API.
#[derive(Debug, Clone)]
pub struct HackMdClient {
    http: Client,
    api_url: String,
    api_token: String,
    share_base_url: String,
}

impl HackMdClient {
    /// Create a client; a trailing `/` on `api_url` is ignored.
    #[must_use]
    pub fn new(api_token: impl Into<String>, api_url: impl Into<String>) -> Self {
        Self::with_http(Client::new(), api_token, api_url)
    }

    /// Create a client whose requests time out after `timeout`.
    ///
    /// # Errors
    /// Returns [`NotesError::Gateway`] if the HTTP client cannot be built.
    pub fn with_timeout(
        api_token: impl Into<String>,
        api_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_http(http, api_token, api_url))
    }

    fn with_http(http: Client, api_token: impl Into<String>, api_url: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            api_token: api_token.into(),
            share_base_url: DEFAULT_SHARE_BASE_URL.to_string(),
        }
    }

    /// Override the base used to build share links when the service does
    /// not return a `publishLink`.
    #[must_use]
    pub fn with_share_base_url(mut self, url: impl Into<String>) -> Self {
        self.share_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.api_token)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(NotesError::Http {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            })
        }
    }
}

#[async_trait]
impl NotesApi for HackMdClient {
    async fn list_notes(&self) -> Result<Vec<NoteSummary>> {
        let url = format!("{}/notes", self.api_url);
        debug!("GET {url}");
        let response = self.authorized(self.http.get(&url)).send().await?;
        let notes = Self::check(response).await?.json::<Vec<NoteSummary>>().await?;
        Ok(notes)
    }

    async fn fetch_content(&self, id: &str) -> Result<NoteContent> {
        let url = format!("{}/notes/{id}", self.api_url);
        debug!("GET {url}");
        let response = self.authorized(self.http.get(&url)).send().await?;
        let detail = Self::check(response).await?.json::<NoteDetail>().await?;

        let title = detail.title.unwrap_or_default();
        NoteContent::new(
            detail.id.unwrap_or_else(|| id.to_string()),
            title.clone(),
            detail.content.unwrap_or_default(),
            detail.created_at.unwrap_or_default(),
        )
        .ok_or_else(|| NotesError::EmptyContent {
            id: id.to_string(),
            title: if title.is_empty() { UNTITLED.to_string() } else { title },
        })
    }

    async fn create_note(&self, note: &NewNote) -> Result<String> {
        let url = format!("{}/notes", self.api_url);
        debug!("POST {url} (title: {})", note.title);
        let response = self.authorized(self.http.post(&url)).json(note).send().await?;
        let created = Self::check(response).await?.json::<CreatedNote>().await?;

        Ok(match created.publish_link {
            Some(link) if !link.is_empty() => link,
            _ => format!("{}/{}", self.share_base_url, created.id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> HackMdClient {
        HackMdClient::new("test_token", format!("{}/", server.uri()))
            .with_share_base_url("https://notes.example")
    }

    #[tokio::test]
    async fn list_notes_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/notes"))
            .and(header("authorization", "Bearer test_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "n1", "title": "Week 1", "createdAt": 1_705_276_800_000_i64,
                 "folderPaths": [{"name": "Test Folder"}]},
                {"id": "n2", "title": "Loose", "createdAt": 1_705_276_800_001_i64}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let notes = client_for(&server).list_notes().await.expect("list should succeed");
        assert_eq!(notes.len(), 2);
        assert!(notes[0].in_folder("Test Folder"));
        assert!(notes[1].folder_paths.is_empty());
    }

    #[tokio::test]
    async fn list_notes_surfaces_http_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/notes"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad token"))
            .mount(&server)
            .await;

        let err = client_for(&server).list_notes().await.expect_err("should fail");
        assert!(matches!(err, NotesError::Http { status: 401, ref body } if body == "bad token"));
    }

    #[tokio::test]
    async fn fetch_content_returns_note() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/notes/n1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "n1", "title": "Week 1", "content": "Shipped the parser",
                "createdAt": 1_705_276_800_000_i64
            })))
            .mount(&server)
            .await;

        let note = client_for(&server).fetch_content("n1").await.expect("fetch");
        assert_eq!(note.content, "Shipped the parser");
        assert_eq!(note.created_at, 1_705_276_800_000);
    }

    #[tokio::test]
    async fn fetch_content_rejects_blank_content() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/notes/n2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "n2", "title": null, "content": "   \n"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_content("n2").await.expect_err("blank");
        assert!(matches!(err, NotesError::EmptyContent { .. }));
        assert_eq!(
            err.to_string(),
            "Note content is empty - [Note ID: n2, Title: Untitled]"
        );
    }

    #[tokio::test]
    async fn fetch_content_missing_note_is_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/notes/gone"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_content("gone").await.expect_err("404");
        assert!(matches!(err, NotesError::Http { status: 404, .. }));
    }

    #[tokio::test]
    async fn create_note_posts_owner_only_note() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/notes"))
            .and(body_partial_json(json!({
                "title": "Report",
                "readPermission": "owner",
                "writePermission": "owner"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "new-id"})))
            .expect(1)
            .mount(&server)
            .await;

        let url = client_for(&server)
            .create_note(&NewNote::private("Report", "# Report", &[]))
            .await
            .expect("create");
        assert_eq!(url, "https://notes.example/new-id");
    }

    #[tokio::test]
    async fn create_note_prefers_publish_link() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/notes"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "new-id", "publishLink": "https://hackmd.io/@me/new-id"
            })))
            .mount(&server)
            .await;

        let url = client_for(&server)
            .create_note(&NewNote::private("Report", "# Report", &[]))
            .await
            .expect("create");
        assert_eq!(url, "https://hackmd.io/@me/new-id");
    }

    #[tokio::test]
    async fn unreachable_service_is_gateway_error() {
        let client = HackMdClient::new("t", "http://127.0.0.1:1");
        let err = client.list_notes().await.expect_err("connection refused");
        assert!(matches!(err, NotesError::Gateway(_)));
    }
}
