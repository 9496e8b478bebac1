//! DispatchBlueprint: Config Loader output
//!
//! The complete declarative configuration: broker coordinates plus topology.

use serde::{Deserialize, Serialize};

use crate::{BrokerParams, Topology};

/// Complete dispatch configuration blueprint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchBlueprint {
    /// Broker coordinates
    #[serde(default)]
    pub broker: BrokerParams,

    /// Exchanges and routing templates
    pub topology: Topology,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExchangeKind, ExchangeSpec};

    #[test]
    fn test_blueprint_deserialize_with_default_broker() {
        let json = r#"{
            "topology": {
                "exchanges": [{"name": "commands", "kind": "topic"}],
                "command_exchange": "commands",
                "computer_routing_key": "cmd.{room}.{computer}",
                "room_broadcast_routing_key": "cmd.{room}.all"
            }
        }"#;
        let blueprint: DispatchBlueprint = serde_json::from_str(json).unwrap();
        assert_eq!(blueprint.broker, BrokerParams::default());
        assert_eq!(
            blueprint.topology.exchanges,
            vec![ExchangeSpec {
                name: "commands".to_string(),
                kind: ExchangeKind::Topic,
                durable: true,
                auto_delete: false,
            }]
        );
        assert_eq!(blueprint.topology.computer_key("r1", "c9"), "cmd.r1.c9");
    }
}
