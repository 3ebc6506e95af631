//! Shared utilities for command handlers

use crate::config::Config;
use crate::error::{Error, ErrorContext, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Provider named on the command line, else the configured default
pub fn resolve_provider(provider: Option<&str>, config: &Config) -> String {
    provider.unwrap_or(&config.default_provider).to_string()
}

/// Load a JSON or YAML document
///
/// `.yaml`/`.yml` files are read as YAML, everything else as JSON.
pub fn load_document(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;

    match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&content)?),
        Some("json") => Ok(serde_json::from_str(&content)?),
        _ => serde_json::from_str(&content)
            .or_else(|_| serde_yaml::from_str::<Value>(&content))
            .map_err(|_| Error::InvalidFormat {
                path: path.to_path_buf(),
                expected: "JSON or YAML".to_string(),
            }),
    }
}

/// Write a value as pretty JSON
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_provider() {
        let config = Config::default();
        assert_eq!(resolve_provider(None, &config), "anthropic");
        assert_eq!(resolve_provider(Some("anthropic-chat"), &config), "anthropic-chat");
    }

    #[test]
    fn test_load_json_and_yaml() {
        let dir = TempDir::new().unwrap();

        let json_path = dir.path().join("request.json");
        fs::write(&json_path, r#"{"model": "claude-3-haiku-20240307"}"#).unwrap();
        assert_eq!(
            load_document(&json_path).unwrap(),
            json!({"model": "claude-3-haiku-20240307"})
        );

        let yaml_path = dir.path().join("request.yaml");
        fs::write(&yaml_path, "messages:\n  - role: user\n    content: hi\n").unwrap();
        assert_eq!(
            load_document(&yaml_path).unwrap(),
            json!({"messages": [{"role": "user", "content": "hi"}]})
        );
    }

    #[test]
    fn test_unknown_extension_falls_back() {
        let dir = TempDir::new().unwrap();

        let capture = dir.path().join("capture.txt");
        fs::write(&capture, "model: claude\n").unwrap();
        assert_eq!(load_document(&capture).unwrap(), json!({"model": "claude"}));

        let broken = dir.path().join("broken.txt");
        fs::write(&broken, "{ unterminated: [").unwrap();
        assert!(matches!(load_document(&broken), Err(Error::InvalidFormat { .. })));
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(load_document(&missing), Err(Error::FileNotFound { .. })));
    }

    #[test]
    fn test_save_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        save_json(&path, &json!({"a": [1, 2]})).unwrap();
        assert_eq!(load_document(&path).unwrap(), json!({"a": [1, 2]}));
    }
}
