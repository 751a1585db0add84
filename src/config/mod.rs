use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

use crate::constants::*;

/// Application configuration with sensible defaults.
///
/// Can be overridden via ~/.config/nexus/config.toml, then by the
/// `NEXUS_API_URL` environment variable, then by CLI flags.
#[derive(Debug, Clone)]
pub struct Config {
    /// Chat backend URL that receives the POST.
    pub endpoint: String,
    /// Opening assistant message. `None` uses the locale's greeting.
    pub greeting: Option<String>,
    /// Theme name (built-in or custom)
    pub theme: String,
    /// UI language (en, pt)
    pub lang: String,
    /// Overall request timeout in seconds (0 = none)
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            greeting: None,
            theme: "nexus".to_string(),
            lang: "en".to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

/// TOML-deserializable config file format.
/// All fields are optional — missing fields use defaults.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct FileConfig {
    endpoint: Option<String>,
    greeting: Option<String>,
    theme: Option<String>,
    lang: Option<String>,
    request_timeout_secs: Option<u64>,
}

impl Config {
    /// Load config from ~/.config/nexus/config.toml and the environment.
    pub fn load() -> Self {
        let mut config = Self::load_from(&config_file_path());
        config.apply_env(std::env::var(ENDPOINT_ENV_VAR).ok());
        config
    }

    /// Load a config file, falling back to defaults for any missing fields.
    /// If the file doesn't exist, returns pure defaults.
    pub fn load_from(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return Config::default(),
        };

        match toml::from_str::<FileConfig>(&content) {
            Ok(file_config) => Config::default().merge(file_config),
            Err(e) => {
                warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                Config::default()
            }
        }
    }

    fn merge(mut self, file_config: FileConfig) -> Self {
        if let Some(v) = file_config.endpoint {
            if is_http_url(&v) {
                self.endpoint = v;
            } else {
                warn!("Ignoring endpoint {:?}: not an http(s) URL", v);
            }
        }
        if let Some(v) = file_config.greeting {
            // An explicit empty greeting means "no greeting".
            self.greeting = Some(v);
        }
        if let Some(v) = file_config.theme {
            if !v.is_empty() {
                self.theme = v;
            }
        }
        if let Some(v) = file_config.lang {
            self.set_lang(&v);
        }
        if let Some(v) = file_config.request_timeout_secs {
            self.request_timeout_secs = v; // 0 = none
        }
        self
    }

    /// Apply the endpoint environment override, if set and usable.
    pub fn apply_env(&mut self, endpoint: Option<String>) {
        if let Some(v) = endpoint {
            if v.is_empty() {
                return;
            }
            if is_http_url(&v) {
                self.endpoint = v;
            } else {
                warn!("Ignoring {}={:?}: not an http(s) URL", ENDPOINT_ENV_VAR, v);
            }
        }
    }

    /// Switch UI language, keeping the current one if `lang` is unsupported.
    pub fn set_lang(&mut self, lang: &str) {
        let lang = lang.to_lowercase();
        if LANGUAGES.contains(&lang.as_str()) {
            self.lang = lang;
        } else if !lang.is_empty() {
            warn!("Unsupported language {:?}, keeping {}", lang, self.lang);
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

/// Cheap sanity check; reqwest reports anything subtler at request time.
pub fn is_http_url(s: &str) -> bool {
    match reqwest::Url::parse(s) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.has_host(),
        Err(_) => false,
    }
}
