use std::time::Duration;

use storygen_gemini::GeminiConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. In production,
/// override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// Inbound HTTP request timeout in seconds (default: `75`). Kept above
    /// the outbound generation timeout so the provider call decides.
    pub request_timeout_secs: u64,
    /// Upper bound on one provider round trip in seconds (default: `60`).
    pub generation_timeout_secs: u64,
    /// Provider API base URL.
    pub gemini_base_url: String,
    /// Model identifier sent with every generation call.
    pub gemini_model: String,
    /// Path of the JSON secrets file.
    pub secrets_file: String,
    /// Dotted lookup path of the API key inside the secrets file
    /// (`api_key` or `api_key.key`).
    pub api_key_path: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                                            |
    /// |---------------------------|----------------------------------------------------|
    /// | `HOST`                    | `0.0.0.0`                                          |
    /// | `PORT`                    | `3000`                                             |
    /// | `CORS_ORIGINS`            | `http://localhost:5173`                            |
    /// | `REQUEST_TIMEOUT_SECS`    | `75`                                               |
    /// | `GENERATION_TIMEOUT_SECS` | `60`                                               |
    /// | `GEMINI_BASE_URL`         | `https://generativelanguage.googleapis.com/v1beta` |
    /// | `GEMINI_MODEL`            | `gemini-1.5-flash`                                 |
    /// | `STORY_SECRETS_FILE`      | `secrets.json`                                     |
    /// | `STORY_API_KEY_PATH`      | `api_key`                                          |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "75".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let generation_timeout_secs: u64 = std::env::var("GENERATION_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("GENERATION_TIMEOUT_SECS must be a valid u64");

        let gemini_base_url = std::env::var("GEMINI_BASE_URL")
            .unwrap_or_else(|_| storygen_gemini::generator::DEFAULT_BASE_URL.into());

        let gemini_model = std::env::var("GEMINI_MODEL")
            .unwrap_or_else(|_| storygen_gemini::generator::DEFAULT_MODEL.into());

        let secrets_file =
            std::env::var("STORY_SECRETS_FILE").unwrap_or_else(|_| "secrets.json".into());

        let api_key_path = std::env::var("STORY_API_KEY_PATH").unwrap_or_else(|_| "api_key".into());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            generation_timeout_secs,
            gemini_base_url,
            gemini_model,
            secrets_file,
            api_key_path,
        }
    }

    /// Provider connection settings derived from this config.
    pub fn gemini(&self) -> GeminiConfig {
        GeminiConfig {
            base_url: self.gemini_base_url.clone(),
            model: self.gemini_model.clone(),
            timeout: Duration::from_secs(self.generation_timeout_secs),
        }
    }
}
