//! Configuration management
//!
//! Two layers:
//! - [`ClientConfig`] is baked in at build time (`TIMETABLE_API_URL`,
//!   `TIMETABLE_GOOGLE_CLIENT_ID`) since the browser bundle has no environment.
//! - [`ServerConfig`] configures the host process that serves the bundle
//!   (server builds only).

use url::Url;

/// Backend used when `TIMETABLE_API_URL` is not set at build time.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Settings compiled into the client bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the REST API, without a trailing slash
    pub api_url: String,
    /// OAuth client id for Google sign-in; `None` hides the Google button
    pub google_client_id: Option<String>,
}

impl ClientConfig {
    /// Read the build-time environment.
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("TIMETABLE_API_URL"),
            option_env!("TIMETABLE_GOOGLE_CLIENT_ID"),
        )
    }

    /// Build from raw values. Invalid or missing URLs fall back to [`DEFAULT_API_URL`].
    pub fn from_values(api_url: Option<&str>, google_client_id: Option<&str>) -> Self {
        let api_url = match api_url.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => match normalize_base_url(raw) {
                Some(url) => url,
                None => {
                    tracing::warn!(value = raw, "Invalid TIMETABLE_API_URL, using default");
                    DEFAULT_API_URL.to_string()
                }
            },
            None => DEFAULT_API_URL.to_string(),
        };

        let google_client_id = google_client_id
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Self {
            api_url,
            google_client_id,
        }
    }

    pub fn google_sign_in_enabled(&self) -> bool {
        self.google_client_id.is_some()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_values(None, None)
    }
}

/// Validate an http(s) URL and strip trailing slashes so `base + "/path"` joins cleanly.
fn normalize_base_url(raw: &str) -> Option<String> {
    let parsed = Url::parse(raw).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return None;
    }
    Some(raw.trim_end_matches('/').to_string())
}

#[cfg(feature = "server")]
mod server {
    use anyhow::Result;
    use serde::Deserialize;
    use std::path::{Path, PathBuf};

    /// Host-process settings for serving the portal.
    #[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
    pub struct ServerConfig {
        #[serde(default = "default_ip")]
        pub ip: String,

        #[serde(default = "default_port")]
        pub port: u16,

        /// `tracing_subscriber::EnvFilter` directive string
        #[serde(default = "default_log_filter")]
        pub log_filter: String,
    }

    fn default_ip() -> String {
        "127.0.0.1".to_string()
    }

    fn default_port() -> u16 {
        8080
    }

    pub(crate) fn default_log_filter() -> String {
        "timetable_portal=debug,dioxus=info".to_string()
    }

    impl Default for ServerConfig {
        fn default() -> Self {
            Self {
                ip: default_ip(),
                port: default_port(),
                log_filter: default_log_filter(),
            }
        }
    }

    /// Directory holding the optional `config.{toml,json,yaml}` file.
    fn config_dir() -> PathBuf {
        std::env::var_os("TIMETABLE_CONFIG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn load_config() -> Result<ServerConfig> {
        load_config_from(&config_dir())
    }

    pub fn load_config_from(config_dir: &Path) -> Result<ServerConfig> {
        let config = ::config::Config::builder()
            // Start with defaults
            .set_default("ip", default_ip())?
            .set_default("port", default_port())?
            .set_default("log_filter", default_log_filter())?
            // Load from config file if it exists
            .add_source(
                ::config::File::with_name(&config_dir.join("config").to_string_lossy())
                    .required(false),
            )
            // Override with environment variables (TIMETABLE_PORT, TIMETABLE_LOG_FILTER, etc.)
            .add_source(
                ::config::Environment::with_prefix("TIMETABLE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(feature = "server")]
pub use server::{load_config, load_config_from, ServerConfig};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_api_url() {
        let cfg = ClientConfig::from_values(None, None);
        assert_eq!(cfg.api_url, DEFAULT_API_URL);
        assert!(!cfg.google_sign_in_enabled());
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let cfg = ClientConfig::from_values(Some("https://api.uni.ac.ke/v1/"), Some("abc.apps"));
        assert_eq!(cfg.api_url, "https://api.uni.ac.ke/v1");
        assert_eq!(cfg.google_client_id.as_deref(), Some("abc.apps"));
    }

    #[test]
    fn test_invalid_url_falls_back() {
        assert_eq!(
            ClientConfig::from_values(Some("not a url"), None).api_url,
            DEFAULT_API_URL
        );
        assert_eq!(
            ClientConfig::from_values(Some("ftp://files.uni.ac.ke"), None).api_url,
            DEFAULT_API_URL
        );
    }

    #[test]
    fn test_blank_client_id_is_none() {
        let cfg = ClientConfig::from_values(Some("http://localhost:9000"), Some("   "));
        assert_eq!(cfg.api_url, "http://localhost:9000");
        assert!(cfg.google_client_id.is_none());
    }

    #[cfg(feature = "server")]
    mod server_config {
        use super::super::*;
        use serial_test::serial;
        use std::io::Write;

        fn clear_env() {
            for key in ["TIMETABLE_IP", "TIMETABLE_PORT", "TIMETABLE_LOG_FILTER"] {
                std::env::remove_var(key);
            }
        }

        #[test]
        #[serial]
        fn test_defaults_without_file() {
            clear_env();
            let dir = tempfile::tempdir().unwrap();
            let cfg = load_config_from(dir.path()).unwrap();
            assert_eq!(cfg, ServerConfig::default());
        }

        #[test]
        #[serial]
        fn test_file_values() {
            clear_env();
            let dir = tempfile::tempdir().unwrap();
            let mut file = std::fs::File::create(dir.path().join("config.toml")).unwrap();
            writeln!(file, "ip = \"0.0.0.0\"\nport = 9090").unwrap();

            let cfg = load_config_from(dir.path()).unwrap();
            assert_eq!(cfg.ip, "0.0.0.0");
            assert_eq!(cfg.port, 9090);
            assert_eq!(cfg.log_filter, "timetable_portal=debug,dioxus=info");
        }

        #[test]
        #[serial]
        fn test_env_overrides_file() {
            clear_env();
            let dir = tempfile::tempdir().unwrap();
            std::fs::write(dir.path().join("config.toml"), "port = 9090\n").unwrap();
            std::env::set_var("TIMETABLE_PORT", "7000");
            std::env::set_var("TIMETABLE_LOG_FILTER", "warn");

            let cfg = load_config_from(dir.path()).unwrap();
            clear_env();
            assert_eq!(cfg.port, 7000);
            assert_eq!(cfg.log_filter, "warn");
        }
    }
}
