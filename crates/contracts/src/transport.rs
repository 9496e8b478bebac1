//! CommandTransport trait: broker channel interface
//!
//! Defines the abstract interface the dispatcher publishes through, so tests
//! can substitute an in-memory transport for a live channel.

use crate::{CoreError, ExchangeSpec};

/// Broker channel operations
///
/// Every method takes `&mut self`: the underlying protocol multiplexes
/// commands over one channel sequentially, so exclusive access is part of the
/// contract. Callers that need concurrent publishes open one connection per
/// worker instead of sharing a transport.
#[trait_variant::make(CommandTransport: Send)]
pub trait LocalCommandTransport {
    /// Declare an exchange (passive=false). Idempotent on the broker side.
    ///
    /// # Errors
    /// Returns a fatal connection error; callers must not continue with a
    /// partially-declared topology
    async fn declare_exchange(&mut self, spec: &ExchangeSpec) -> Result<(), CoreError>;

    /// Ensure a durable, non-exclusive, non-auto-delete queue exists
    /// (passive=false). Safe to call repeatedly with the same name.
    async fn declare_queue(&mut self, name: &str) -> Result<(), CoreError>;

    /// Publish bytes with persistent delivery and JSON content type
    ///
    /// # Errors
    /// Returns a publish error carrying the exchange and routing key
    async fn publish(
        &mut self,
        exchange: &str,
        routing_key: &str,
        payload: &[u8],
    ) -> Result<(), CoreError>;

    /// Release the channel, then the connection, in that order
    ///
    /// Idempotent. Never fails: close-time errors are logged, not surfaced,
    /// since the caller can no longer act on them.
    async fn close(&mut self);
}
