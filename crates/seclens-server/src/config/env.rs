// crates/seclens-server/src/config/env.rs
// Environment-based configuration - single source of truth for all env vars

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::analysis::{DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use crate::llm::DEFAULT_BASE_URL;

/// Simulated processing latency applied by the analysis endpoint
pub const DEFAULT_ANALYZE_DELAY_MS: u64 = 1000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

/// Configuration validation result
#[derive(Debug)]
pub struct ConfigValidation {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl Default for ConfigValidation {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigValidation {
    pub fn new() -> Self {
        Self {
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Format as a human-readable report
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        if !self.errors.is_empty() {
            lines.push("Errors:".to_string());
            for err in &self.errors {
                lines.push(format!("  - {}", err));
            }
        }

        if !self.warnings.is_empty() {
            lines.push("Warnings:".to_string());
            for warn in &self.warnings {
                lines.push(format!("  - {}", warn));
            }
        }

        if lines.is_empty() {
            "Configuration OK".to_string()
        } else {
            lines.join("\n")
        }
    }
}

/// Environment configuration - all env vars in one place
#[derive(Clone)]
pub struct EnvConfig {
    /// Bearer credential for the completion API (OPENAI_API_KEY)
    pub api_key: Option<String>,
    /// API root of the completion service (OPENAI_BASE_URL)
    pub base_url: String,
    /// Model identifier (SECLENS_MODEL)
    pub model: String,
    /// Sampling temperature (SECLENS_TEMPERATURE)
    pub temperature: f32,
    /// Artificial delay before each analysis (SECLENS_ANALYZE_DELAY_MS)
    pub analyze_delay: Duration,
    /// Bind address (SECLENS_HOST)
    pub host: String,
    /// Bind port (SECLENS_PORT)
    pub port: u16,
    /// Built frontend to serve, if any (SECLENS_ASSETS_DIR)
    pub assets_dir: Option<PathBuf>,
}

// Hand-written so the key never reaches a log line
impl std::fmt::Debug for EnvConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("analyze_delay", &self.analyze_delay)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("assets_dir", &self.assets_dir)
            .finish()
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            analyze_delay: Duration::from_millis(DEFAULT_ANALYZE_DELAY_MS),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            assets_dir: None,
        }
    }
}

impl EnvConfig {
    /// Load all environment configuration (call once at startup)
    pub fn load() -> Self {
        info!("Loading environment configuration");
        let config = Self::from_lookup(|name| std::env::var(name).ok());
        config.log_status();
        config
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            api_key: read("OPENAI_API_KEY").map(|k| k.trim().to_string()),
            base_url: read("OPENAI_BASE_URL").unwrap_or(defaults.base_url),
            model: read("SECLENS_MODEL").unwrap_or(defaults.model),
            temperature: parse_or("SECLENS_TEMPERATURE", read("SECLENS_TEMPERATURE"), defaults.temperature),
            analyze_delay: Duration::from_millis(parse_or(
                "SECLENS_ANALYZE_DELAY_MS",
                read("SECLENS_ANALYZE_DELAY_MS"),
                DEFAULT_ANALYZE_DELAY_MS,
            )),
            host: read("SECLENS_HOST").unwrap_or(defaults.host),
            port: parse_or("SECLENS_PORT", read("SECLENS_PORT"), defaults.port),
            assets_dir: read("SECLENS_ASSETS_DIR").map(PathBuf::from),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Log what was configured (without exposing the key)
    fn log_status(&self) {
        if self.has_api_key() {
            debug!(model = %self.model, base_url = %self.base_url, "Completion API key loaded");
        } else {
            warn!("OPENAI_API_KEY is not set - analysis requests will fail");
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> ConfigValidation {
        let mut validation = ConfigValidation::new();

        if !self.has_api_key() {
            validation.add_error("No completion API key configured. Set OPENAI_API_KEY.");
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            validation.add_error(format!(
                "SECLENS_TEMPERATURE must be between 0.0 and 2.0, got {}",
                self.temperature
            ));
        } else if self.temperature > 0.5 {
            validation.add_warning(format!(
                "SECLENS_TEMPERATURE {} is high; replies may stop being valid JSON",
                self.temperature
            ));
        }

        if self.analyze_delay.is_zero() {
            validation.add_warning("Simulated analysis delay is disabled.");
        }

        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            validation.add_error(format!(
                "OPENAI_BASE_URL must be an http(s) URL, got '{}'",
                self.base_url
            ));
        }

        if let Some(ref dir) = self.assets_dir {
            if !dir.join("index.html").is_file() {
                validation.add_warning(format!(
                    "SECLENS_ASSETS_DIR '{}' has no index.html",
                    dir.display()
                ));
            }
        }

        validation
    }
}

/// Parse a value, logging and falling back to `default` when it is malformed
fn parse_or<T: FromStr + Copy>(name: &str, value: Option<String>, default: T) -> T {
    match value {
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(name = name, value = %raw, "Unparseable value, using default");
                default
            }
        },
        None => default,
    }
}
