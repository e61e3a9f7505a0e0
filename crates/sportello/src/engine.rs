//! Answer orchestration: hosted proxy first, offline router as fallback.
//!
//! The offline chain is total, so both entry points are infallible; a
//! proxy failure costs a warn log and a rule-based answer, never an error
//! surfaced to the widget.

use anyhow::Result;

use crate::config::EngineConfig;
use crate::document::Document;
use crate::remote::{AnswerProxy, ProxyClient};
use crate::router::{Router, SessionReply};
use crate::session::SessionState;

pub struct AnswerEngine {
    router: Router,
    proxy: Option<Box<dyn AnswerProxy>>,
}

impl AnswerEngine {
    /// Fully offline engine: rule-based routing only.
    pub fn offline() -> Self {
        Self {
            router: Router::new(),
            proxy: None,
        }
    }

    pub fn with_proxy(proxy: Box<dyn AnswerProxy>) -> Self {
        Self {
            router: Router::new(),
            proxy: Some(proxy),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        config.validate().map_err(anyhow::Error::msg)?;
        match &config.remote {
            Some(remote) => {
                let client = ProxyClient::from_config(remote)?;
                Ok(Self::with_proxy(Box::new(client)))
            }
            None => Ok(Self::offline()),
        }
    }

    /// Answer a one-shot question. A non-empty trimmed proxy answer is
    /// preferred verbatim; everything else falls back to the offline
    /// router, which always produces an answer.
    pub async fn answer(&self, question: &str, doc: &Document) -> String {
        if let Some(answer) = self.remote_answer(question, doc).await {
            return answer;
        }
        self.router.route(question, doc)
    }

    /// Session-aware variant. Remote answers bypass the rotation state
    /// entirely: no items surfaced, nothing excluded.
    pub async fn answer_session(
        &self,
        question: &str,
        doc: &Document,
        state: &mut SessionState,
    ) -> SessionReply {
        if let Some(answer) = self.remote_answer(question, doc).await {
            return SessionReply {
                text: answer,
                used_items: Vec::new(),
                exhausted: false,
            };
        }
        self.router.route_session(question, doc, state)
    }

    async fn remote_answer(&self, question: &str, doc: &Document) -> Option<String> {
        let proxy = self.proxy.as_ref()?;
        match proxy.ask(question, doc).await {
            Ok(answer) => {
                let trimmed = answer.trim();
                if trimmed.is_empty() {
                    tracing::warn!("Remote proxy returned a blank answer, falling back offline");
                    None
                } else {
                    tracing::info!("Remote proxy answered");
                    Some(trimmed.to_string())
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Remote proxy failed, falling back offline");
                None
            }
        }
    }
}
