//! Configuration validation
//!
//! Rules:
//! - exchange names non-empty and unique
//! - command_exchange refers to a declared exchange
//! - computer template carries `{room}` and `{computer}` tokens
//! - room broadcast template carries `{room}`
//! - broker host/vhost non-empty, port non-zero

use std::collections::HashSet;

use contracts::{CoreError, DispatchBlueprint};

/// Validate a DispatchBlueprint
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(blueprint: &DispatchBlueprint) -> Result<(), CoreError> {
    validate_broker(blueprint)?;
    validate_exchanges(blueprint)?;
    validate_command_exchange(blueprint)?;
    validate_templates(blueprint)?;
    Ok(())
}

/// Validate broker coordinates
fn validate_broker(blueprint: &DispatchBlueprint) -> Result<(), CoreError> {
    let broker = &blueprint.broker;

    if broker.host.is_empty() {
        return Err(CoreError::config_validation(
            "broker.host",
            "host cannot be empty",
        ));
    }
    if broker.port == 0 {
        return Err(CoreError::config_validation(
            "broker.port",
            "port must be non-zero",
        ));
    }
    if broker.vhost.is_empty() {
        return Err(CoreError::config_validation(
            "broker.vhost",
            "vhost cannot be empty (use \"/\" for the default vhost)",
        ));
    }
    Ok(())
}

/// Validate exchange name uniqueness
fn validate_exchanges(blueprint: &DispatchBlueprint) -> Result<(), CoreError> {
    let mut seen = HashSet::new();
    for (idx, exchange) in blueprint.topology.exchanges.iter().enumerate() {
        if exchange.name.is_empty() {
            return Err(CoreError::config_validation(
                format!("topology.exchanges[{idx}].name"),
                "exchange name cannot be empty",
            ));
        }
        if !seen.insert(&exchange.name) {
            return Err(CoreError::config_validation(
                format!("topology.exchanges[name={}]", exchange.name),
                "duplicate exchange name",
            ));
        }
    }
    Ok(())
}

/// Validate that the command exchange is declared
fn validate_command_exchange(blueprint: &DispatchBlueprint) -> Result<(), CoreError> {
    let topology = &blueprint.topology;

    if topology.command_exchange.is_empty() {
        return Err(CoreError::config_validation(
            "topology.command_exchange",
            "command exchange cannot be empty",
        ));
    }

    let declared = topology
        .exchanges
        .iter()
        .any(|e| e.name == topology.command_exchange);

    if !declared {
        return Err(CoreError::config_validation(
            "topology.command_exchange",
            format!(
                "command exchange '{}' is not declared in topology.exchanges",
                topology.command_exchange
            ),
        ));
    }
    Ok(())
}

/// Validate placeholder tokens in the routing templates
fn validate_templates(blueprint: &DispatchBlueprint) -> Result<(), CoreError> {
    let topology = &blueprint.topology;

    for token in ["room", "computer"] {
        if !topology.computer_routing_key.has_token(token) {
            return Err(CoreError::config_validation(
                "topology.computer_routing_key",
                format!(
                    "template '{}' is missing the {{{token}}} token",
                    topology.computer_routing_key.as_str()
                ),
            ));
        }
    }

    if !topology.room_broadcast_routing_key.has_token("room") {
        return Err(CoreError::config_validation(
            "topology.room_broadcast_routing_key",
            format!(
                "template '{}' is missing the {{room}} token",
                topology.room_broadcast_routing_key.as_str()
            ),
        ));
    }
    Ok(())
}
