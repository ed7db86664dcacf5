//! HTTP client for the Obsidian Local REST API and Omnisearch.
//!
//! Every call goes through [`ObsidianClient::send`], which joins the path onto
//! the right base URL, attaches the bearer token for the REST API, applies the
//! configured timeout and maps the outcome onto [`ApiError`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, Url};
use serde_json::Value;
use tracing::{debug, error, instrument};

use super::error::{ApiError, ApiResult};
use super::models::{MARKDOWN_MIME, NoteContent, NoteFormat, SearchDialect};
use crate::core::config::ObsidianConfig;
use crate::core::{Error, Result};

/// The two services this server talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// Obsidian Local REST API (authenticated).
    RestApi,
    /// Omnisearch HTTP server (unauthenticated).
    OmniSearch,
}

/// A single outbound request.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    service: Service,
    path: String,
    query: Vec<(String, String)>,
    accept: Option<String>,
    content_type: Option<String>,
    body: Option<String>,
    success: &'static [u16],
}

impl ApiRequest {
    /// Build a request; only `200 OK` is accepted unless overridden.
    pub fn new(method: Method, service: Service, path: impl Into<String>) -> Self {
        Self {
            method,
            service,
            path: path.into(),
            query: Vec::new(),
            accept: None,
            content_type: None,
            body: None,
            success: &[200],
        }
    }

    pub fn get(service: Service, path: impl Into<String>) -> Self {
        Self::new(Method::GET, service, path)
    }

    pub fn post(service: Service, path: impl Into<String>) -> Self {
        Self::new(Method::POST, service, path)
    }

    pub fn put(service: Service, path: impl Into<String>) -> Self {
        Self::new(Method::PUT, service, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn accept(mut self, mime: impl Into<String>) -> Self {
        self.accept = Some(mime.into());
        self
    }

    pub fn body(mut self, content_type: impl Into<String>, body: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self.body = Some(body.into());
        self
    }

    /// Status codes treated as success.
    pub fn success_statuses(mut self, statuses: &'static [u16]) -> Self {
        self.success = statuses;
        self
    }

    /// Human-readable endpoint label used in errors and logs, e.g. `GET /active`.
    pub fn endpoint(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

/// Operations the search-then-scan workflow needs from the vault.
///
/// Implemented by [`ObsidianClient`]; tests provide in-memory fakes.
#[async_trait]
pub trait VaultApi: Send + Sync {
    /// Run a `POST /search` query and return the raw result rows.
    async fn search(&self, query: &str, dialect: SearchDialect) -> ApiResult<Vec<Value>>;

    /// Read a vault file in the requested representation.
    async fn get_file(&self, path: &str, format: NoteFormat) -> ApiResult<NoteContent>;
}

/// Client for both Obsidian services.
#[derive(Debug, Clone)]
pub struct ObsidianClient {
    http: reqwest::Client,
    rest_base: Url,
    omni_base: Url,
    api_key: Option<String>,
}

impl ObsidianClient {
    /// Build a client from the endpoint configuration.
    pub fn new(config: &ObsidianConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            rest_base: parse_base("OBSIDIAN_BASE_URL", config.base_url.as_deref())?,
            omni_base: parse_base(
                "OBSIDIAN_OMNI_SEARCH_BASE_URL",
                config.omni_search_base_url.as_deref(),
            )?,
            api_key: config.api_key.clone(),
        })
    }

    /// Join a slash-separated path onto a service base URL.
    ///
    /// Segments are percent-encoded individually, so vault names containing
    /// spaces, `#` or `?` address the right file.
    pub fn url(&self, service: Service, path: &str) -> ApiResult<Url> {
        let mut url = match service {
            Service::RestApi => self.rest_base.clone(),
            Service::OmniSearch => self.omni_base.clone(),
        };
        url.path_segments_mut()
            .map_err(|_| ApiError::Transport {
                endpoint: path.to_string(),
                message: "base URL cannot carry a path".to_string(),
            })?
            .pop_if_empty()
            .extend(path.trim_start_matches('/').split('/'));
        Ok(url)
    }

    /// Perform a request and check its status.
    pub async fn send(&self, request: ApiRequest) -> ApiResult<reqwest::Response> {
        let endpoint = request.endpoint();
        let url = self.url(request.service, &request.path)?;
        debug!("{} {}", request.method, url);

        let mut builder = self.http.request(request.method, url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if request.service == Service::RestApi {
            if let Some(key) = &self.api_key {
                builder = builder.bearer_auth(key);
            }
        }
        if let Some(accept) = request.accept {
            builder = builder.header(ACCEPT, accept);
        }
        if let Some(content_type) = request.content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            error!("{} failed: {}", endpoint, e);
            ApiError::transport(&endpoint, &e)
        })?;

        let status = response.status().as_u16();
        if !request.success.contains(&status) {
            error!("{} returned status {}", endpoint, status);
            return Err(ApiError::status(status, endpoint));
        }

        Ok(response)
    }

    /// Perform a request and return the body as text.
    pub async fn send_text(&self, request: ApiRequest) -> ApiResult<String> {
        let endpoint = request.endpoint();
        let response = self.send(request).await?;
        response.text().await.map_err(|e| {
            error!("Reading body of {} failed: {}", endpoint, e);
            ApiError::transport(&endpoint, &e)
        })
    }

    /// Perform a request and decode the body as JSON.
    pub async fn send_json(&self, request: ApiRequest) -> ApiResult<Value> {
        let endpoint = request.endpoint();
        let text = self.send_text(request).await?;
        serde_json::from_str(&text).map_err(|e| {
            error!("Decoding body of {} failed: {}", endpoint, e);
            ApiError::decode(&endpoint, &e)
        })
    }

    async fn read_note(&self, request: ApiRequest, format: NoteFormat) -> ApiResult<NoteContent> {
        let request = request.accept(format.accept());
        match format {
            NoteFormat::Markdown => self.send_text(request).await.map(NoteContent::Markdown),
            NoteFormat::Json => self.send_json(request).await.map(NoteContent::Json),
        }
    }

    // ========================================================================
    // Local REST API
    // ========================================================================

    /// `GET /` - server status and authentication state.
    #[instrument(skip(self))]
    pub async fn status(&self) -> ApiResult<Value> {
        self.send_json(ApiRequest::get(Service::RestApi, "/")).await
    }

    /// `GET /active` - the note currently open in Obsidian.
    #[instrument(skip(self))]
    pub async fn active_note(&self, format: NoteFormat) -> ApiResult<NoteContent> {
        self.read_note(ApiRequest::get(Service::RestApi, "/active"), format)
            .await
    }

    /// `GET /vault/{path}` - read a vault file.
    #[instrument(skip(self))]
    pub async fn read_file(&self, path: &str, format: NoteFormat) -> ApiResult<NoteContent> {
        self.read_note(vault_request(Method::GET, path), format).await
    }

    /// `PUT /vault/{path}` - replace (or create) a vault file.
    #[instrument(skip(self, content), fields(bytes = content.len()))]
    pub async fn write_file(&self, path: &str, content: &str) -> ApiResult<()> {
        let request = vault_request(Method::PUT, path)
            .body(MARKDOWN_MIME, content)
            .success_statuses(&[200, 204]);
        self.send(request).await.map(|_| ())
    }

    /// `POST /search` - Dataview DQL or JsonLogic query.
    #[instrument(skip(self, query))]
    pub async fn structured_search(&self, query: &str, dialect: SearchDialect) -> ApiResult<Value> {
        let request =
            ApiRequest::post(Service::RestApi, "/search").body(dialect.content_type(), query);
        self.send_json(request).await
    }

    // ========================================================================
    // Omnisearch
    // ========================================================================

    /// `GET /search?q=...` on the Omnisearch server.
    #[instrument(skip(self))]
    pub async fn omni_search(&self, q: &str) -> ApiResult<Value> {
        self.send_json(ApiRequest::get(Service::OmniSearch, "/search").query("q", q))
            .await
    }
}

#[async_trait]
impl VaultApi for ObsidianClient {
    async fn search(&self, query: &str, dialect: SearchDialect) -> ApiResult<Vec<Value>> {
        match self.structured_search(query, dialect).await? {
            Value::Array(rows) => Ok(rows),
            Value::Null => Ok(Vec::new()),
            other => Ok(vec![other]),
        }
    }

    async fn get_file(&self, path: &str, format: NoteFormat) -> ApiResult<NoteContent> {
        self.read_file(path, format).await
    }
}

fn vault_request(method: Method, path: &str) -> ApiRequest {
    ApiRequest::new(
        method,
        Service::RestApi,
        format!("/vault/{}", path.trim_start_matches('/')),
    )
}

fn parse_base(name: &str, value: Option<&str>) -> Result<Url> {
    let value = value.ok_or_else(|| Error::config(format!("{} is not set", name)))?;
    let url = Url::parse(value)
        .map_err(|e| Error::config(format!("{} is not a valid URL ({}): {}", name, value, e)))?;
    if url.cannot_be_a_base() {
        return Err(Error::config(format!("{} cannot be used as a base URL", name)));
    }
    Ok(url)
}
