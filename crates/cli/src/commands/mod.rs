pub mod agents;
pub mod availability;
pub mod book;
pub mod chat;
pub mod config;
pub mod properties;

use serde_json::{json, Value};

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

impl CommandResult {
    pub fn success(command: &str, payload: Value) -> Self {
        let body = json!({
            "command": command,
            "status": "ok",
            "result": payload,
        });
        Self { exit_code: 0, output: serialize(body) }
    }

    pub fn failure(command: &str, error_class: &str, message: impl Into<String>) -> Self {
        let body = json!({
            "command": command,
            "status": "error",
            "error_class": error_class,
            "message": message.into(),
        });
        Self { exit_code: 1, output: serialize(body) }
    }
}

fn serialize(body: Value) -> String {
    serde_json::to_string_pretty(&body).unwrap_or_else(|error| {
        format!(
            "{{\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

/// Shared wiring for commands that need the scheduling core: effective
/// config, demo directory, and a fresh per-invocation registry.
pub(crate) fn core_context(
) -> Result<(visita_core::AppConfig, visita_core::Directory, visita_core::BookingRegistry), String>
{
    let config = visita_core::AppConfig::load(visita_core::LoadOptions::default())
        .map_err(|error| error.to_string())?;
    let directory = visita_core::Directory::demo();
    let registry = visita_core::BookingRegistry::new(&config.calendar);
    Ok((config, directory, registry))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::CommandResult;

    #[test]
    fn success_envelope_carries_the_payload() {
        let result = CommandResult::success("agents", json!({"count": 3}));
        assert_eq!(result.exit_code, 0);
        let parsed: serde_json::Value = serde_json::from_str(&result.output).expect("json");
        assert_eq!(parsed["status"], "ok");
        assert_eq!(parsed["result"]["count"], 3);
    }

    #[test]
    fn failure_envelope_is_nonzero_and_classified() {
        let result = CommandResult::failure("book", "conflict", "slot unavailable");
        assert_eq!(result.exit_code, 1);
        let parsed: serde_json::Value = serde_json::from_str(&result.output).expect("json");
        assert_eq!(parsed["status"], "error");
        assert_eq!(parsed["error_class"], "conflict");
    }
}
