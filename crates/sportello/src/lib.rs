pub mod catalog;
pub mod config;
pub mod document;
pub mod engine;
pub mod faq;
pub mod filters;
pub mod intent;
pub mod remote;
pub mod router;
pub mod session;
pub mod text;

// Re-export primary types for convenience
pub use config::{EngineConfig, RemoteConfig};
pub use document::{Category, Document, Item};
pub use engine::AnswerEngine;
pub use filters::{parse_filters, FilterSet};
pub use intent::{MunicipalityClassifier, VenueClassifier};
pub use remote::{AnswerProxy, ProxyClient, ProxyError};
pub use router::{Router, SessionReply};
pub use session::{is_continuation, SessionState};
pub use text::normalize;

// Re-export common types
pub use anyhow::{Error, Result};
