//! Application configuration management with security considerations.
//!
//! This module handles all configuration values required for the application.
//! Sensitive fields are clearly marked and must never be logged.

use envconfig::Envconfig;
use std::sync::OnceLock;

/// Application configuration loaded from environment variables.
///
/// # Security Requirements
/// - All `SENSITIVE` fields must be stored securely (encrypted at rest)
/// - Never log or expose sensitive values
#[derive(Envconfig, Clone)]
pub struct AppConfig {
    /// Environment name to deploy the app (NON-SENSITIVE)
    /// Values: "local", "dev", "staging", "prod"
    #[envconfig(default = "local")]
    pub env: String,

    /// Database host value (NON-SENSITIVE)
    /// Example: "sqlite:data/barkive.db"
    pub db_host: String,

    /// 🔒 SENSITIVE: Database password to encrypt SQLite data
    pub db_pass_encrypt: String,

    /// Host address for web server binding (NON-SENSITIVE)
    /// Example: "0.0.0.0", "localhost", "barkive.app"
    pub wep_server_host: String,

    /// Port for web server binding (NON-SENSITIVE)
    #[envconfig(default = "8080")]
    pub wep_server_port: u16,

    /// Path to SSL private key file (SENSITIVE PATH)
    #[envconfig(default = "server.key")]
    pub private_key_path: String,

    /// Path to SSL certificate file (NON-SENSITIVE)
    #[envconfig(default = "server.crt")]
    pub certificate_path: String,

    /// 🔒 SENSITIVE: CSRF protection password (UUID format)
    pub csrf_pass: String,

    /// 🔒 SENSITIVE: CSRF protection salt (UUID format)
    pub csrf_salt: String,

    /// 🔒 SENSITIVE: Logfire write token. Empty means console logging only.
    #[envconfig(default = "")]
    pub logfire_token: String,

    /// AWS region of the storage bucket (NON-SENSITIVE)
    #[envconfig(default = "us-east-2")]
    pub aws_region: String,

    /// Bucket holding avatars and memories (NON-SENSITIVE)
    #[envconfig(default = "barkive-app-storage")]
    pub storage_bucket: String,

    /// Base url of the generative text endpoint (NON-SENSITIVE)
    #[envconfig(default = "https://generativelanguage.googleapis.com/v1beta")]
    pub care_tips_endpoint: String,

    /// Model used to write care tips (NON-SENSITIVE)
    #[envconfig(default = "gemini-2.0-flash")]
    pub care_tips_model: String,

    /// 🔒 SENSITIVE: API key of the generative text endpoint
    pub care_tips_api_key: String,

    /// Time zone used when the browser does not send one (NON-SENSITIVE)
    #[envconfig(default = "UTC")]
    pub default_timezone: String,

    /// Google OAuth client ID (SEMI-SENSITIVE)
    pub google_oauth_client_id: String,

    /// Google OAuth authorization URI (NON-SENSITIVE)
    /// Standard value: "https://accounts.google.com/o/oauth2/auth"
    #[envconfig(default = "https://accounts.google.com/o/oauth2/auth")]
    pub google_oauth_auth_uri: String,

    /// Google OAuth token URI (NON-SENSITIVE)
    /// Standard value: "https://oauth2.googleapis.com/token"
    #[envconfig(default = "https://oauth2.googleapis.com/token")]
    pub google_oauth_token_uri: String,

    /// 🔒 SENSITIVE: Google OAuth client secret
    pub google_oauth_client_secret: String,
}

impl AppConfig {
    /// Checks if running in production environment
    pub fn is_prod(&self) -> bool {
        self.env.to_lowercase() == "prod"
    }

    /// Gets the server URL host with port for non-production environments
    pub fn url_host(&self) -> String {
        if self.is_prod() {
            return self.wep_server_host.to_string();
        }

        format!(
            "{host}:{port}",
            host = self.wep_server_host,
            port = self.wep_server_port
        )
    }

    /// Gets the appropriate protocol (HTTP/HTTPS) based on environment
    pub fn wep_server_protocol(&self) -> String {
        if self.is_prod() {
            return "https".into();
        }
        "http".into()
    }

    /// Constructs the complete base URL for the application
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.wep_server_protocol(), self.url_host())
    }

    /// Endpoint asking the configured model for a single completion
    pub fn care_tips_generate_endpoint(&self) -> String {
        format!(
            "{base}/models/{model}:generateContent",
            base = self.care_tips_endpoint.trim_end_matches('/'),
            model = self.care_tips_model
        )
    }

    /// Parsed fallback time zone, UTC when the configured name is unknown
    pub fn fallback_timezone(&self) -> chrono_tz::Tz {
        self.default_timezone.parse().unwrap_or(chrono_tz::UTC)
    }
}

/// Global application configuration, set once by [init_config]
pub static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Loads the configuration from the environment into [APP_CONFIG]
pub fn init_config() -> anyhow::Result<()> {
    let app_config = AppConfig::init_from_env()?;

    // a second call keeps the first loaded value
    let _ = APP_CONFIG.set(app_config);

    Ok(())
}
