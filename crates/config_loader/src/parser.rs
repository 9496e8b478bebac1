//! Configuration parsing
//!
//! Supports TOML (primary) and JSON (secondary) formats.

use contracts::{CoreError, DispatchBlueprint};

/// Configuration file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML format (recommended)
    Toml,
    /// JSON format
    Json,
}

impl ConfigFormat {
    /// Infer format from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Parse TOML configuration
pub fn parse_toml(content: &str) -> Result<DispatchBlueprint, CoreError> {
    toml::from_str(content).map_err(|e| CoreError::ConfigParse {
        message: format!("TOML parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse JSON configuration
pub fn parse_json(content: &str) -> Result<DispatchBlueprint, CoreError> {
    serde_json::from_str(content).map_err(|e| CoreError::ConfigParse {
        message: format!("JSON parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse configuration in the given format
pub fn parse(content: &str, format: ConfigFormat) -> Result<DispatchBlueprint, CoreError> {
    match format {
        ConfigFormat::Toml => parse_toml(content),
        ConfigFormat::Json => parse_json(content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::ExchangeKind;

    #[test]
    fn test_parse_toml_minimal() {
        let content = r#"
[broker]
host = "mq.lab.internal"
port = 5672
username = "rooms"
password = "secret"
vhost = "lab"

[topology]
command_exchange = "commands"
computer_routing_key = "cmd.{room}.{computer}"
room_broadcast_routing_key = "cmd.{room}.all"

[[topology.exchanges]]
name = "commands"
kind = "topic"
durable = true
auto_delete = false
"#;
        let result = parse_toml(content);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        let bp = result.unwrap();
        assert_eq!(bp.broker.host, "mq.lab.internal");
        assert_eq!(bp.broker.vhost, "lab");
        assert_eq!(bp.topology.exchanges.len(), 1);
        assert_eq!(bp.topology.exchanges[0].kind, ExchangeKind::Topic);
    }

    #[test]
    fn test_parse_toml_broker_defaults() {
        let content = r#"
[topology]
command_exchange = "commands"
computer_routing_key = "cmd.{room}.{computer}"
room_broadcast_routing_key = "cmd.{room}.all"

[[topology.exchanges]]
name = "commands"
"#;
        let bp = parse_toml(content).unwrap();
        assert_eq!(bp.broker.host, "localhost");
        assert_eq!(bp.broker.port, 5672);
        assert_eq!(bp.broker.vhost, "/");
    }

    #[test]
    fn test_parse_json_minimal() {
        let content = r#"{
            "broker": { "host": "localhost", "port": 5672 },
            "topology": {
                "exchanges": [{ "name": "commands", "kind": "topic" }],
                "command_exchange": "commands",
                "computer_routing_key": "cmd.{room}.{computer}",
                "room_broadcast_routing_key": "cmd.{room}.all"
            }
        }"#;
        let result = parse_json(content);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
    }

    #[test]
    fn test_parse_toml_syntax_error() {
        let content = "invalid toml [[[";
        let result = parse_toml(content);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, CoreError::ConfigParse { .. }));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ConfigFormat::from_extension("toml"),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_extension("TOML"),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_extension("json"),
            Some(ConfigFormat::Json)
        );
        assert_eq!(ConfigFormat::from_extension("yaml"), None);
    }
}
