use serde_json::{json, Value};
use visita_core::{AppConfig, LoadOptions};

use super::CommandResult;

pub fn run() -> CommandResult {
    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => CommandResult::success("config", render(&config)),
        Err(error) => CommandResult::failure("config", "config", error.to_string()),
    }
}

/// Effective configuration as JSON with the API key redacted.
fn render(config: &AppConfig) -> Value {
    json!({
        "server": {
            "bind_address": config.server.bind_address,
            "port": config.server.port,
        },
        "llm": {
            "provider": format!("{:?}", config.llm.provider).to_lowercase(),
            "api_key": config.llm.api_key.as_ref().map(|_| "<redacted>"),
            "base_url": config.llm.base_url,
            "model": config.llm.model,
            "temperature": config.llm.temperature,
            "timeout_secs": config.llm.timeout_secs,
        },
        "calendar": {
            "timezone": config.calendar.timezone.name(),
            "ics_dir": config.calendar.ics_dir.display().to_string(),
            "default_window_days": config.calendar.default_window_days,
        },
        "logging": {
            "level": config.logging.level,
            "format": format!("{:?}", config.logging.format).to_lowercase(),
        },
    })
}
