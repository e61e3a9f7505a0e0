use serde::{Deserialize, Serialize};
use std::path::Path;

/// Engine configuration. The default is a fully offline engine; adding a
/// `remote` section enables the hosted-proxy path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub remote: Option<RemoteConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    pub endpoint: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl EngineConfig {
    /// Validate config values, returning errors for clearly broken configurations.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(remote) = &self.remote {
            if remote.endpoint.trim().is_empty() {
                return Err("remote.endpoint must not be empty".into());
            }
            if !remote.endpoint.starts_with("http://") && !remote.endpoint.starts_with("https://") {
                return Err("remote.endpoint must be an http(s) URL".into());
            }
            if remote.connect_timeout_secs == 0 {
                return Err("remote.connect_timeout_secs must be > 0".into());
            }
            if remote.request_timeout_secs == 0 {
                return Err("remote.request_timeout_secs must be > 0".into());
            }
        }
        Ok(())
    }

    /// Load config from a JSON file, falling back to defaults for missing fields.
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_offline() {
        let config = EngineConfig::default();
        assert!(config.remote.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_remote_defaults_fill_timeouts() {
        let config: EngineConfig = serde_json::from_str(
            r#"{"remote": {"endpoint": "https://proxy.example/api/ask"}}"#,
        )
        .unwrap();
        let remote = config.remote.unwrap();
        assert_eq!(remote.connect_timeout_secs, 10);
        assert_eq!(remote.request_timeout_secs, 30);
        assert!(remote.slug.is_none());
    }

    #[test]
    fn test_validate_rejects_broken_remote() {
        let mut config: EngineConfig = serde_json::from_str(
            r#"{"remote": {"endpoint": "   "}}"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        config.remote = Some(RemoteConfig {
            endpoint: "ftp://proxy.example".into(),
            slug: None,
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
        });
        assert!(config.validate().is_err());

        config.remote = Some(RemoteConfig {
            endpoint: "https://proxy.example".into(),
            slug: None,
            connect_timeout_secs: 0,
            request_timeout_secs: 30,
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file_round_trip() {
        let path = std::env::temp_dir().join("sportello-config-test.json");
        std::fs::write(
            &path,
            r#"{"remote": {"endpoint": "https://proxy.example/api/ask", "slug": "damario"}}"#,
        )
        .unwrap();

        let config = EngineConfig::from_file(&path).unwrap();
        let remote = config.remote.unwrap();
        assert_eq!(remote.endpoint, "https://proxy.example/api/ask");
        assert_eq!(remote.slug.as_deref(), Some("damario"));

        std::fs::remove_file(&path).ok();
        assert!(EngineConfig::from_file(&path).is_err());
    }
}
