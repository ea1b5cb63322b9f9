//! GitHub repository contents API client
//!
//! Reads and writes a single file through `/repos/{owner}/{repo}/contents/{path}`.
//! The blob `sha` returned on read is the version token; supplying it on write makes GitHub
//! reject the update when the file changed in between.

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use super::{DocumentStore, Snapshot, TransportError};
use crate::config::Config;

const ACCEPT: &str = "application/vnd.github+json";
const API_VERSION: &str = "2022-11-28";

/// Longest error body kept in a [`TransportError`]
const MAX_ERROR_BODY: usize = 500;

pub struct GithubContentStore {
    client: reqwest::Client,
    url: String,
    branch: Option<String>,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    sha: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    encoding: Option<String>,
}

#[derive(Debug, Serialize)]
struct PutContentRequest<'a> {
    message: &'a str,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    branch: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct PutContentResponse {
    content: PutContentFile,
}

#[derive(Debug, Deserialize)]
struct PutContentFile {
    sha: String,
}

impl GithubContentStore {
    pub fn new(config: &Config) -> Result<Self, String> {
        Ok(Self::with_client(config, crate::http::shared_client()?))
    }

    pub fn with_client(config: &Config, client: reqwest::Client) -> Self {
        Self {
            client,
            url: contents_url(config),
            branch: config.branch.clone(),
            token: config.token.clone(),
        }
    }

    fn request(&self, method: reqwest::Method) -> reqwest::RequestBuilder {
        let mut req = self
            .client
            .request(method, &self.url)
            .header(reqwest::header::ACCEPT, ACCEPT)
            .header("X-GitHub-Api-Version", API_VERSION);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        req
    }
}

#[async_trait]
impl DocumentStore for GithubContentStore {
    async fn fetch(&self) -> Result<Snapshot, TransportError> {
        let mut req = self.request(reqwest::Method::GET);
        if let Some(branch) = &self.branch {
            req = req.query(&[("ref", branch)]);
        }

        let resp = req.send().await?;
        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            log::info!("[GitHub] {} does not exist yet, starting empty", self.url);
            return Ok(Snapshot::default());
        }
        if !status.is_success() {
            return Err(status_error(status, resp.text().await.unwrap_or_default(), false));
        }

        let body: ContentResponse = resp
            .json()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))?;
        let content = decode_content(&body)?;
        log::info!("[GitHub] Fetched {} ({} bytes, sha {})", self.url, content.len(), body.sha);

        Ok(Snapshot {
            content,
            version: Some(body.sha),
        })
    }

    async fn write(
        &self,
        content: &str,
        version: Option<&str>,
        message: &str,
    ) -> Result<String, TransportError> {
        let body = PutContentRequest {
            message,
            content: BASE64.encode(content.as_bytes()),
            sha: version,
            branch: self.branch.as_deref(),
        };

        let resp = self.request(reqwest::Method::PUT).json(&body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let err = status_error(status, resp.text().await.unwrap_or_default(), true);
            log::warn!("[GitHub] Write to {} failed: {}", self.url, err);
            return Err(err);
        }

        let body: PutContentResponse = resp
            .json()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))?;
        log::info!("[GitHub] Wrote {} ({}), new sha {}", self.url, message, body.content.sha);
        Ok(body.content.sha)
    }

    fn describe(&self) -> String {
        match &self.branch {
            Some(branch) => format!("{}@{}", self.url, branch),
            None => self.url.clone(),
        }
    }
}

fn contents_url(config: &Config) -> String {
    format!(
        "{}/repos/{}/{}/contents/{}",
        config.api_url, config.owner, config.repo, config.path
    )
}

/// GitHub wraps base64 content at 60 columns; strip the line breaks before decoding.
fn decode_content(body: &ContentResponse) -> Result<String, TransportError> {
    match body.encoding.as_deref() {
        None | Some("base64") => {}
        Some(other) => {
            return Err(TransportError::Decode(format!(
                "unsupported content encoding '{}'",
                other
            )));
        }
    }

    let compact: String = body.content.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = BASE64
        .decode(compact)
        .map_err(|e| TransportError::Decode(format!("bad base64 content: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|e| TransportError::Decode(format!("content is not UTF-8: {}", e)))
}

fn status_error(status: StatusCode, body: String, is_write: bool) -> TransportError {
    let code = status.as_u16();
    let body: String = body.chars().take(MAX_ERROR_BODY).collect();
    match code {
        401 | 403 => TransportError::Unauthorized { status: code, body },
        409 | 412 | 422 if is_write => TransportError::Conflict { status: code },
        _ => TransportError::Status { status: code, body },
    }
}
