//! `validate` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use config_loader::DispatchBlueprint;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    broker: String,
    vhost: String,
    command_exchange: String,
    exchange_count: usize,
    computer_routing_key: String,
    room_broadcast_routing_key: String,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    // Check file exists
    if !args.config.exists() {
        return ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("File not found: {}", args.config.display())),
            warnings: None,
            summary: None,
        };
    }

    // Try to load and validate
    match config_loader::ConfigLoader::load_from_path(&args.config) {
        Ok(blueprint) => {
            let warnings = collect_warnings(&blueprint);

            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(ConfigSummary {
                    broker: blueprint.broker.addr(),
                    vhost: blueprint.broker.vhost.clone(),
                    command_exchange: blueprint.topology.command_exchange.clone(),
                    exchange_count: blueprint.topology.exchanges.len(),
                    computer_routing_key: blueprint
                        .topology
                        .computer_routing_key
                        .as_str()
                        .to_string(),
                    room_broadcast_routing_key: blueprint
                        .topology
                        .room_broadcast_routing_key
                        .as_str()
                        .to_string(),
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

/// Collect configuration warnings (non-fatal issues)
fn collect_warnings(blueprint: &DispatchBlueprint) -> Vec<String> {
    let mut warnings = Vec::new();

    for exchange in &blueprint.topology.exchanges {
        if exchange.name != blueprint.topology.command_exchange {
            continue;
        }
        if !exchange.durable {
            warnings.push(format!(
                "Command exchange '{}' is not durable - topology will not survive a broker restart",
                exchange.name
            ));
        }
        if exchange.auto_delete {
            warnings.push(format!(
                "Command exchange '{}' is auto-delete - it disappears once the last queue unbinds",
                exchange.name
            ));
        }
    }

    let extra_exchanges = blueprint
        .topology
        .exchanges
        .iter()
        .filter(|e| e.name != blueprint.topology.command_exchange)
        .count();
    if extra_exchanges > 0 {
        warnings.push(format!(
            "{extra_exchanges} declared exchange(s) are not used for command publishes"
        ));
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Configuration is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Broker: {} (vhost {})", summary.broker, summary.vhost);
            println!("  Command exchange: {}", summary.command_exchange);
            println!("  Exchanges: {}", summary.exchange_count);
            println!("  Computer key: {}", summary.computer_routing_key);
            println!("  Room key: {}", summary.room_broadcast_routing_key);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}
