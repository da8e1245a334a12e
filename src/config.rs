//! Configuration management with TOML, environment variables, and CLI overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Base delay before each request in milliseconds
    #[serde(default)]
    pub delay_ms: u64,

    /// Random jitter added to delay (0 to this value)
    #[serde(default)]
    pub delay_jitter_ms: u64,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Extra attempts after a server error or transport failure
    #[serde(default)]
    pub retries: u32,

    /// Pause between attempts in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// File the scraped records are written to
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Output format for stdout
    #[serde(default)]
    pub format: OutputFormat,

    /// Fail extraction on the first field that cannot be parsed
    #[serde(default)]
    pub strict: bool,

    /// Always write a list, even for a single URL
    #[serde(default)]
    pub batch: bool,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_output() -> PathBuf {
    PathBuf::from("data.json")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            proxy: None,
            delay_ms: 0,
            delay_jitter_ms: 0,
            timeout_secs: default_timeout_secs(),
            retries: 0,
            retry_delay_ms: default_retry_delay_ms(),
            output: default_output(),
            format: OutputFormat::Table,
            strict: false,
            batch: false,
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("ebay-crawler").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        // 4. Return default config
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(proxy) = std::env::var("EBAY_PROXY") {
            self.proxy = Some(proxy);
        }

        if let Ok(delay) = std::env::var("EBAY_DELAY") {
            if let Ok(d) = delay.parse() {
                self.delay_ms = d;
            }
        }

        if let Ok(output) = std::env::var("EBAY_OUTPUT") {
            if !output.is_empty() {
                self.output = PathBuf::from(output);
            }
        }

        self
    }
}

/// Output format for results printed to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}
