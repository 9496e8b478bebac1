//! Topology bootstrap: declare configured exchanges at startup

use tracing::{debug, instrument};

use contracts::{CommandTransport, CoreError, Topology};

/// Declare every exchange from the topology, in order.
///
/// The first failure aborts the bootstrap; the caller must not proceed with a
/// partially-initialized connection. Declares are idempotent on the broker
/// side, so a partially-declared topology left behind is safe to repeat.
#[instrument(
    name = "topology_bootstrap",
    skip(transport, topology),
    fields(exchanges = topology.exchanges.len())
)]
pub async fn bootstrap_topology<T: CommandTransport>(
    transport: &mut T,
    topology: &Topology,
) -> Result<(), CoreError> {
    for spec in &topology.exchanges {
        transport.declare_exchange(spec).await?;
        debug!(
            exchange = %spec.name,
            kind = ?spec.kind,
            durable = spec.durable,
            auto_delete = spec.auto_delete,
            "Exchange declared"
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{ExchangeKind, ExchangeSpec};

    struct CountingTransport {
        declared: Vec<String>,
        fail_on: Option<String>,
    }

    impl CommandTransport for CountingTransport {
        async fn declare_exchange(&mut self, spec: &ExchangeSpec) -> Result<(), CoreError> {
            if self.fail_on.as_deref() == Some(spec.name.as_str()) {
                return Err(CoreError::connection(format!(
                    "exchange declare '{}': mock failure",
                    spec.name
                )));
            }
            self.declared.push(spec.name.clone());
            Ok(())
        }

        async fn declare_queue(&mut self, _name: &str) -> Result<(), CoreError> {
            Ok(())
        }

        async fn publish(
            &mut self,
            _exchange: &str,
            _routing_key: &str,
            _payload: &[u8],
        ) -> Result<(), CoreError> {
            Ok(())
        }

        async fn close(&mut self) {}
    }

    fn exchange(name: &str) -> ExchangeSpec {
        ExchangeSpec {
            name: name.to_string(),
            kind: ExchangeKind::Topic,
            durable: true,
            auto_delete: false,
        }
    }

    fn topology(exchanges: Vec<ExchangeSpec>) -> Topology {
        Topology {
            exchanges,
            command_exchange: "commands".to_string(),
            computer_routing_key: "cmd.{room}.{computer}".into(),
            room_broadcast_routing_key: "cmd.{room}.all".into(),
        }
    }

    #[tokio::test]
    async fn test_bootstrap_declares_all_exchanges_in_order() {
        let mut transport = CountingTransport {
            declared: vec![],
            fail_on: None,
        };
        let topology = topology(vec![exchange("commands"), exchange("events")]);

        bootstrap_topology(&mut transport, &topology).await.unwrap();
        assert_eq!(transport.declared, vec!["commands", "events"]);
    }

    #[tokio::test]
    async fn test_bootstrap_aborts_on_first_failure() {
        let mut transport = CountingTransport {
            declared: vec![],
            fail_on: Some("events".to_string()),
        };
        let topology = topology(vec![
            exchange("commands"),
            exchange("events"),
            exchange("audit"),
        ]);

        let result = bootstrap_topology(&mut transport, &topology).await;
        assert!(matches!(result, Err(CoreError::Connection { .. })));
        // Earlier declares went through; later ones never attempted
        assert_eq!(transport.declared, vec!["commands"]);
    }

    #[tokio::test]
    async fn test_bootstrap_empty_topology_is_noop() {
        let mut transport = CountingTransport {
            declared: vec![],
            fail_on: None,
        };
        let topology = topology(vec![]);

        bootstrap_topology(&mut transport, &topology).await.unwrap();
        assert!(transport.declared.is_empty());
    }
}
