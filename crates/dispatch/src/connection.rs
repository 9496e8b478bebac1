//! BrokerConnection: owns the AMQP connection and its single channel

use lapin::{
    options::{BasicPublishOptions, ExchangeDeclareOptions, QueueDeclareOptions},
    types::FieldTable,
    BasicProperties, Channel, Connection, ConnectionProperties,
};
use tracing::{debug, instrument, warn};

use contracts::{
    BrokerParams, CommandTransport, CoreError, ExchangeKind, ExchangeSpec, Topology,
    CONTENT_TYPE_JSON,
};

use crate::bootstrap::bootstrap_topology;

/// Delivery mode 2: message body written to stable storage
const DELIVERY_MODE_PERSISTENT: u8 = 2;

/// Reply code for a clean channel/connection close
const REPLY_SUCCESS: u16 = 200;

/// One physical connection plus one channel to the broker
///
/// Created once per process (or per long-lived worker) and torn down exactly
/// once via `close`. There is no reconnect loop: a failure during `open` is
/// fatal and propagates immediately.
pub struct BrokerConnection {
    connection: Connection,
    channel: Option<Channel>,
}

impl BrokerConnection {
    /// Connect, open a channel, and declare the configured exchanges
    ///
    /// # Errors
    /// Any failure here (transport, auth, channel, exchange declare) aborts
    /// the open as a `Connection` error; the caller must not fall back to a
    /// partially-initialized connection.
    #[instrument(
        name = "broker_open",
        skip(params, topology),
        fields(broker = %params.addr(), vhost = %params.vhost)
    )]
    pub async fn open(params: &BrokerParams, topology: &Topology) -> Result<Self, CoreError> {
        let connection = Connection::connect(&params.amqp_uri(), ConnectionProperties::default())
            .await
            .map_err(|e| CoreError::connection(format!("connect to {}: {e}", params.addr())))?;

        let channel = connection
            .create_channel()
            .await
            .map_err(|e| CoreError::connection(format!("open channel: {e}")))?;

        let mut broker = Self {
            connection,
            channel: Some(channel),
        };
        bootstrap_topology(&mut broker, topology).await?;

        debug!(
            exchanges = topology.exchanges.len(),
            "Broker connection ready"
        );
        Ok(broker)
    }
}

fn amqp_kind(kind: ExchangeKind) -> lapin::ExchangeKind {
    match kind {
        ExchangeKind::Direct => lapin::ExchangeKind::Direct,
        ExchangeKind::Topic => lapin::ExchangeKind::Topic,
        ExchangeKind::Fanout => lapin::ExchangeKind::Fanout,
        ExchangeKind::Headers => lapin::ExchangeKind::Headers,
    }
}

/// Properties stamped on every outbound message: JSON content type plus
/// persistent delivery, regardless of target.
fn message_properties() -> BasicProperties {
    BasicProperties::default()
        .with_content_type(CONTENT_TYPE_JSON.into())
        .with_delivery_mode(DELIVERY_MODE_PERSISTENT)
}

impl CommandTransport for BrokerConnection {
    #[instrument(
        name = "broker_declare_exchange",
        skip(self, spec),
        fields(exchange = %spec.name)
    )]
    async fn declare_exchange(&mut self, spec: &ExchangeSpec) -> Result<(), CoreError> {
        let channel = self
            .channel
            .as_ref()
            .ok_or_else(|| CoreError::connection("channel closed"))?;

        channel
            .exchange_declare(
                &spec.name,
                amqp_kind(spec.kind),
                ExchangeDeclareOptions {
                    passive: false,
                    durable: spec.durable,
                    auto_delete: spec.auto_delete,
                    ..ExchangeDeclareOptions::default()
                },
                FieldTable::default(),
            )
            .await
            .map_err(|e| CoreError::connection(format!("exchange declare '{}': {e}", spec.name)))
    }

    #[instrument(name = "broker_declare_queue", skip(self), fields(queue = %name))]
    async fn declare_queue(&mut self, name: &str) -> Result<(), CoreError> {
        let channel = self
            .channel
            .as_ref()
            .ok_or_else(|| CoreError::queue_declare(name, "channel closed"))?;

        channel
            .queue_declare(
                name,
                QueueDeclareOptions {
                    passive: false,
                    durable: true,
                    exclusive: false,
                    auto_delete: false,
                    ..QueueDeclareOptions::default()
                },
                FieldTable::default(),
            )
            .await
            .map(|_| ())
            .map_err(|e| CoreError::queue_declare(name, e.to_string()))
    }

    #[instrument(
        name = "broker_publish",
        skip(self, payload),
        fields(exchange = %exchange, routing_key = %routing_key, bytes = payload.len())
    )]
    async fn publish(
        &mut self,
        exchange: &str,
        routing_key: &str,
        payload: &[u8],
    ) -> Result<(), CoreError> {
        let channel = self
            .channel
            .as_ref()
            .ok_or_else(|| CoreError::publish(exchange, routing_key, "channel closed"))?;

        // Awaits only the confirmed transport write; no retry, no broker ack
        // beyond what the channel mode requires.
        channel
            .basic_publish(
                exchange,
                routing_key,
                BasicPublishOptions::default(),
                payload,
                message_properties(),
            )
            .await
            .map_err(|e| CoreError::publish(exchange, routing_key, e.to_string()))?
            .await
            .map_err(|e| CoreError::publish(exchange, routing_key, e.to_string()))?;

        Ok(())
    }

    #[instrument(name = "broker_close", skip(self))]
    async fn close(&mut self) {
        // Channel first, then connection. Taking the channel makes later
        // calls no-ops.
        let Some(channel) = self.channel.take() else {
            return;
        };

        if let Err(e) = channel.close(REPLY_SUCCESS, "shutting down").await {
            warn!(error = %e, "Failed to close channel");
        }
        if let Err(e) = self.connection.close(REPLY_SUCCESS, "shutting down").await {
            warn!(error = %e, "Failed to close connection");
        }
        debug!("Broker connection closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amqp_kind_mapping() {
        assert!(matches!(
            amqp_kind(ExchangeKind::Direct),
            lapin::ExchangeKind::Direct
        ));
        assert!(matches!(
            amqp_kind(ExchangeKind::Topic),
            lapin::ExchangeKind::Topic
        ));
        assert!(matches!(
            amqp_kind(ExchangeKind::Fanout),
            lapin::ExchangeKind::Fanout
        ));
        assert!(matches!(
            amqp_kind(ExchangeKind::Headers),
            lapin::ExchangeKind::Headers
        ));
    }

    #[test]
    fn test_message_properties_delivery_contract() {
        let properties = message_properties();
        assert_eq!(
            properties.content_type().as_ref().map(|c| c.as_str()),
            Some("application/json")
        );
        assert_eq!(*properties.delivery_mode(), Some(2));
    }
}
