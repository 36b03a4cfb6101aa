//! Secret store lookup and credential loading.
//!
//! Secrets live in a small JSON document read once at startup. The API key is
//! addressed by a dotted path so both layouts seen in deployments work
//! without code changes:
//!
//! ```text
//! { "api_key": "..." }             -> path "api_key"
//! { "api_key": { "key": "..." } }  -> path "api_key.key"
//! ```

use std::path::Path;

use serde_json::Value;

/// The provider API key. Opaque once loaded; [`std::fmt::Debug`] redacts the
/// value so the key cannot leak through logs or error output.
#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    pub fn new(key: String) -> Self {
        Self(key)
    }

    /// The raw key, for building the outbound auth header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Errors from loading or querying the secret store.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The requested secret path does not resolve to a string value.
    #[error("secret `{path}` not found in secret store")]
    Missing { path: String },

    /// The secrets file could not be read.
    #[error("failed to read secrets file `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The secrets file is not valid JSON.
    #[error("secrets file `{path}` is not valid JSON: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Read-only key/value lookup over a JSON document.
#[derive(Debug, Clone)]
pub struct SecretStore {
    root: Value,
}

impl SecretStore {
    /// Wrap an already-parsed JSON document.
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// Load the store from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let root = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self { root })
    }

    /// Resolve a dotted path (`"api_key"`, `"api_key.key"`) to a string
    /// value. Returns `None` when any segment is absent or the leaf is not a
    /// string.
    pub fn get(&self, path: &str) -> Option<&str> {
        let mut current = &self.root;
        for segment in path.split('.') {
            current = current.get(segment)?;
        }
        current.as_str()
    }
}

/// Load the provider credential from the store.
///
/// Call once per process, before constructing the generation client. A
/// missing secret is a startup failure with a clear message, never a panic.
pub fn load_credential(store: &SecretStore, path: &str) -> Result<Credential, ConfigError> {
    store
        .get(path)
        .map(|key| Credential::new(key.to_string()))
        .ok_or_else(|| ConfigError::Missing {
            path: path.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn flat_path_resolves() {
        let store = SecretStore::from_value(json!({ "api_key": "sk-test" }));
        let credential = load_credential(&store, "api_key").unwrap();
        assert_eq!(credential.expose(), "sk-test");
    }

    #[test]
    fn nested_path_resolves() {
        let store = SecretStore::from_value(json!({ "api_key": { "key": "sk-nested" } }));
        let credential = load_credential(&store, "api_key.key").unwrap();
        assert_eq!(credential.expose(), "sk-nested");
    }

    #[test]
    fn empty_store_reports_missing() {
        let store = SecretStore::from_value(json!({}));
        let err = load_credential(&store, "api_key").unwrap_err();
        assert!(matches!(err, ConfigError::Missing { ref path } if path == "api_key"));
    }

    #[test]
    fn non_string_leaf_reports_missing() {
        let store = SecretStore::from_value(json!({ "api_key": { "key": "sk" } }));
        // Path stops at the object; only string leaves count as secrets.
        let err = load_credential(&store, "api_key").unwrap_err();
        assert!(matches!(err, ConfigError::Missing { .. }));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "api_key": "sk-from-file" }}"#).unwrap();

        let store = SecretStore::from_file(file.path()).unwrap();
        assert_eq!(store.get("api_key"), Some("sk-from-file"));
    }

    #[test]
    fn unreadable_file_is_io_error() {
        let err = SecretStore::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn invalid_json_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "api_key = not json").unwrap();

        let err = SecretStore::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn debug_output_never_contains_the_key() {
        let credential = Credential::new("sk-very-secret".to_string());
        let debug = format!("{credential:?}");
        assert!(!debug.contains("sk-very-secret"));
        assert!(debug.contains("redacted"));
    }
}
