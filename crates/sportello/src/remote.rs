//! Client for the hosted-model answer proxy.
//!
//! The proxy is a thin HTTP passthrough to a chat-completion API: POST a
//! JSON body of either `{question, document}` or `{slug, question}` and
//! read back `{answer}`. Anything short of a 2xx with a non-empty answer
//! is an error here, so the engine can log the cause and fall back to the
//! offline router.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::config::RemoteConfig;
use crate::document::Document;

const BODY_PREVIEW_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("proxy request failed: {0}")]
    Request(String),
    #[error("proxy returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("proxy returned a malformed body: {0}")]
    MalformedBody(String),
    #[error("proxy returned an empty answer")]
    EmptyAnswer,
}

/// Transport seam for the hosted-model path. The HTTP client below is the
/// real implementation; tests substitute stubs.
#[async_trait]
pub trait AnswerProxy: Send + Sync {
    async fn ask(&self, question: &str, doc: &Document) -> Result<String, ProxyError>;
}

#[derive(Serialize)]
struct AskRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    slug: Option<&'a str>,
    question: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    document: Option<&'a Document>,
}

#[derive(Debug, Deserialize)]
struct AskResponse {
    #[serde(default)]
    answer: Option<String>,
}

pub struct ProxyClient {
    client: reqwest::Client,
    endpoint: String,
    slug: Option<String>,
}

impl ProxyClient {
    pub fn new(endpoint: impl Into<String>, slug: Option<String>) -> Result<Self, ProxyError> {
        Self::with_timeouts(
            endpoint,
            slug,
            Duration::from_secs(10),
            Duration::from_secs(30),
        )
    }

    pub fn with_timeouts(
        endpoint: impl Into<String>,
        slug: Option<String>,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self, ProxyError> {
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()
            .map_err(|e| ProxyError::Request(format!("failed to build http client: {}", e)))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            slug,
        })
    }

    pub fn from_config(config: &RemoteConfig) -> Result<Self, ProxyError> {
        Self::with_timeouts(
            config.endpoint.clone(),
            config.slug.clone(),
            Duration::from_secs(config.connect_timeout_secs),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// When a slug is configured the proxy holds the document server-side
    /// and only the slug travels; otherwise the full document goes along.
    fn request_body<'a>(&'a self, question: &'a str, doc: &'a Document) -> AskRequest<'a> {
        match &self.slug {
            Some(slug) => AskRequest {
                slug: Some(slug.as_str()),
                question,
                document: None,
            },
            None => AskRequest {
                slug: None,
                question,
                document: Some(doc),
            },
        }
    }
}

#[async_trait]
impl AnswerProxy for ProxyClient {
    async fn ask(&self, question: &str, doc: &Document) -> Result<String, ProxyError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&self.request_body(question, doc))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProxyError::Request(format!("request to {} timed out", self.endpoint))
                } else if e.is_connect() {
                    ProxyError::Request(format!(
                        "failed to connect to {}: {}",
                        self.endpoint, e
                    ))
                } else {
                    ProxyError::Request(format!("request to {} failed: {}", self.endpoint, e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProxyError::Status {
                status: status.as_u16(),
                body: preview(&body),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProxyError::Request(format!("failed to read proxy response: {}", e)))?;
        let parsed: AskResponse = serde_json::from_str(&body)
            .map_err(|e| ProxyError::MalformedBody(format!("{} (body: {})", e, preview(&body))))?;

        let answer = parsed
            .answer
            .map(|a| a.trim().to_string())
            .unwrap_or_default();
        if answer.is_empty() {
            return Err(ProxyError::EmptyAnswer);
        }
        Ok(answer)
    }
}

/// Truncate opaque error bodies before they reach logs.
fn preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_CHARS).collect()
}
