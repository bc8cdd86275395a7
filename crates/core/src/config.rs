use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub calendar: CalendarConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
}

#[derive(Clone, Debug)]
pub struct LlmConfig {
    pub provider: LlmProvider,
    pub api_key: Option<SecretString>,
    pub base_url: Option<String>,
    pub model: String,
    pub temperature: f64,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct CalendarConfig {
    /// Reference zone all naive datetimes are interpreted in.
    pub timezone: Tz,
    /// Directory ICS artifacts are written to.
    pub ics_dir: PathBuf,
    /// Fallback window length when a search window cannot be parsed.
    pub default_window_days: u32,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

// `lowercase` so the file spelling matches `FromStr` ("openai", not "open_ai").
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    OpenAi,
    Mistral,
    Ollama,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub bind_address: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
    pub llm_provider: Option<LlmProvider>,
    pub llm_model: Option<String>,
    pub ics_dir: Option<PathBuf>,
    pub timezone: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig { bind_address: "127.0.0.1".to_string(), port: 8000 },
            llm: LlmConfig {
                provider: LlmProvider::Ollama,
                api_key: None,
                base_url: Some("http://localhost:11434".to_string()),
                model: "llama3.1".to_string(),
                temperature: 0.2,
                timeout_secs: 30,
            },
            calendar: CalendarConfig {
                timezone: chrono_tz::Europe::Rome,
                ics_dir: PathBuf::from("ics_out"),
                default_window_days: 7,
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LlmProvider {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "mistral" => Ok(Self::Mistral),
            "ollama" => Ok(Self::Ollama),
            other => Err(ConfigError::Validation(format!(
                "unsupported llm provider `{other}` (expected openai|mistral|ollama)"
            ))),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

/// TOML shape of the optional config file. Every field is optional; file
/// values layer over the defaults and under env/explicit overrides.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    server: RawServer,
    #[serde(default)]
    llm: RawLlm,
    #[serde(default)]
    calendar: RawCalendar,
    #[serde(default)]
    logging: RawLogging,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawServer {
    bind_address: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawLlm {
    provider: Option<LlmProvider>,
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    temperature: Option<f64>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCalendar {
    timezone: Option<String>,
    ics_dir: Option<PathBuf>,
    default_window_days: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawLogging {
    level: Option<String>,
    format: Option<LogFormat>,
}

impl AppConfig {
    /// Load effective configuration: defaults, then the config file (if
    /// any), then `VISITA_*` environment variables, then explicit overrides.
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let path = options.config_path.clone().or_else(default_config_path);
        if let Some(path) = path {
            match fs::read_to_string(&path) {
                Ok(contents) => {
                    let raw: RawConfig = toml::from_str(&contents)
                        .map_err(|source| ConfigError::ParseFile { path: path.clone(), source })?;
                    config.apply_file(raw)?;
                }
                Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                    if options.require_file {
                        return Err(ConfigError::MissingConfigFile(path));
                    }
                }
                Err(source) => return Err(ConfigError::ReadFile { path, source }),
            }
        }

        config.apply_env()?;
        config.apply_overrides(options.overrides)?;
        config.validate()?;
        Ok(config)
    }

    fn apply_file(&mut self, raw: RawConfig) -> Result<(), ConfigError> {
        if let Some(value) = raw.server.bind_address {
            self.server.bind_address = value;
        }
        if let Some(value) = raw.server.port {
            self.server.port = value;
        }
        if let Some(value) = raw.llm.provider {
            self.llm.provider = value;
        }
        if let Some(value) = raw.llm.api_key {
            self.llm.api_key = Some(value.into());
        }
        if let Some(value) = raw.llm.base_url {
            self.llm.base_url = Some(value);
        }
        if let Some(value) = raw.llm.model {
            self.llm.model = value;
        }
        if let Some(value) = raw.llm.temperature {
            self.llm.temperature = value;
        }
        if let Some(value) = raw.llm.timeout_secs {
            self.llm.timeout_secs = value;
        }
        if let Some(value) = raw.calendar.timezone {
            self.calendar.timezone = parse_timezone(&value)?;
        }
        if let Some(value) = raw.calendar.ics_dir {
            self.calendar.ics_dir = value;
        }
        if let Some(value) = raw.calendar.default_window_days {
            self.calendar.default_window_days = value;
        }
        if let Some(value) = raw.logging.level {
            self.logging.level = value;
        }
        if let Some(value) = raw.logging.format {
            self.logging.format = value;
        }
        Ok(())
    }

    fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("VISITA_SERVER_BIND_ADDRESS") {
            self.server.bind_address = value;
        }
        if let Some(value) = read_env("VISITA_SERVER_PORT") {
            self.server.port = parse_env("VISITA_SERVER_PORT", &value)?;
        }
        if let Some(value) = read_env("VISITA_LLM_PROVIDER") {
            self.llm.provider = value.parse()?;
        }
        if let Some(value) = read_env("VISITA_LLM_API_KEY") {
            self.llm.api_key = Some(value.into());
        }
        if let Some(value) = read_env("VISITA_LLM_BASE_URL") {
            self.llm.base_url = Some(value);
        }
        if let Some(value) = read_env("VISITA_LLM_MODEL") {
            self.llm.model = value;
        }
        if let Some(value) = read_env("VISITA_CALENDAR_TIMEZONE") {
            self.calendar.timezone = parse_timezone(&value)?;
        }
        if let Some(value) = read_env("VISITA_CALENDAR_ICS_DIR") {
            self.calendar.ics_dir = PathBuf::from(value);
        }
        if let Some(value) = read_env("VISITA_CALENDAR_WINDOW_DAYS") {
            self.calendar.default_window_days = parse_env("VISITA_CALENDAR_WINDOW_DAYS", &value)?;
        }
        if let Some(value) = read_env("VISITA_LOG_LEVEL") {
            self.logging.level = value;
        }
        if let Some(value) = read_env("VISITA_LOG_FORMAT") {
            self.logging.format = value.parse()?;
        }
        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) -> Result<(), ConfigError> {
        if let Some(value) = overrides.bind_address {
            self.server.bind_address = value;
        }
        if let Some(value) = overrides.port {
            self.server.port = value;
        }
        if let Some(value) = overrides.log_level {
            self.logging.level = value;
        }
        if let Some(value) = overrides.llm_provider {
            self.llm.provider = value;
        }
        if let Some(value) = overrides.llm_model {
            self.llm.model = value;
        }
        if let Some(value) = overrides.ics_dir {
            self.calendar.ics_dir = value;
        }
        if let Some(value) = overrides.timezone {
            self.calendar.timezone = parse_timezone(&value)?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.bind_address.trim().is_empty() {
            return Err(ConfigError::Validation("server.bind_address must not be empty".into()));
        }
        if self.calendar.default_window_days == 0 {
            return Err(ConfigError::Validation(
                "calendar.default_window_days must be at least 1".into(),
            ));
        }
        if self.llm.model.trim().is_empty() {
            return Err(ConfigError::Validation("llm.model must not be empty".into()));
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ConfigError::Validation(
                "llm.temperature must be within 0.0..=2.0".into(),
            ));
        }
        Ok(())
    }
}

fn parse_timezone(name: &str) -> Result<Tz, ConfigError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| ConfigError::Validation(format!("unknown calendar timezone `{name}`")))
}

fn default_config_path() -> Option<PathBuf> {
    if let Ok(path) = env::var("VISITA_CONFIG") {
        return Some(PathBuf::from(path));
    }
    let candidate = Path::new("visita.toml");
    candidate.exists().then(|| candidate.to_path_buf())
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}
