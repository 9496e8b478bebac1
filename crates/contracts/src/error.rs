//! Layered error definitions
//!
//! Categorized by source: config / broker / payload

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum CoreError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Broker Errors =====
    /// Fatal connection or bootstrap failure. Raised only while opening a
    /// connection (transport, auth, channel, exchange declare); there is no
    /// automatic recovery.
    #[error("broker connection error: {message}")]
    Connection { message: String },

    /// Publish failure on an otherwise healthy connection. Recoverable by the
    /// caller, who may retry or abandon the command.
    #[error("publish to exchange '{exchange}' (routing key '{routing_key}') failed: {message}")]
    Publish {
        exchange: String,
        routing_key: String,
        message: String,
    },

    /// Queue declare failure before a named-queue publish
    #[error("declare of queue '{queue}' failed: {message}")]
    QueueDeclare { queue: String, message: String },

    // ===== Payload Errors =====
    /// Payload could not be encoded for the wire
    #[error("payload serialize error: {message}")]
    Serialize { message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl CoreError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create broker connection error
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create publish error
    pub fn publish(
        exchange: impl Into<String>,
        routing_key: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Publish {
            exchange: exchange.into(),
            routing_key: routing_key.into(),
            message: message.into(),
        }
    }

    /// Create queue declare error
    pub fn queue_declare(queue: impl Into<String>, message: impl Into<String>) -> Self {
        Self::QueueDeclare {
            queue: queue.into(),
            message: message.into(),
        }
    }

    /// Create payload serialize error
    pub fn serialize(message: impl Into<String>) -> Self {
        Self::Serialize {
            message: message.into(),
        }
    }
}
