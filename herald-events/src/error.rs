// Error types for the event service

use crate::handler::{HandlerError, HandlerId};
use crate::key::EventKey;
use crate::signature::Signature;
use thiserror::Error;

/// Errors surfaced by [`EventService::broadcast`](crate::EventService::broadcast)
#[derive(Debug, Error)]
pub enum EventServiceError {
    #[error(
        "Signature mismatch for event {key}: handler {handler} expects {expected}, broadcast supplied {actual}"
    )]
    SignatureMismatch {
        key: EventKey,
        handler: HandlerId,
        expected: Signature,
        actual: Signature,
    },

    #[error("Handler {handler} for event {key} failed: {source}")]
    HandlerFailed {
        key: EventKey,
        handler: HandlerId,
        #[source]
        source: HandlerError,
    },

    #[error("Broadcast of event {key} failed in {} handlers", .errors.len())]
    BroadcastFailed {
        key: EventKey,
        errors: Vec<EventServiceError>,
    },
}

impl EventServiceError {
    /// Key of the broadcast that produced this error
    pub fn key(&self) -> EventKey {
        match self {
            Self::SignatureMismatch { key, .. }
            | Self::HandlerFailed { key, .. }
            | Self::BroadcastFailed { key, .. } => *key,
        }
    }

    /// Individual failures, flattening [`EventServiceError::BroadcastFailed`]
    pub fn failures(&self) -> Vec<&EventServiceError> {
        match self {
            Self::BroadcastFailed { errors, .. } => errors.iter().collect(),
            other => vec![other],
        }
    }

    /// Whether any failure is a signature mismatch
    pub fn is_signature_mismatch(&self) -> bool {
        self.failures()
            .iter()
            .any(|failure| matches!(failure, Self::SignatureMismatch { .. }))
    }

    /// Fold the failures recorded during one broadcast into a result
    pub(crate) fn collect(key: EventKey, mut failures: Vec<EventServiceError>) -> Result<()> {
        match failures.len() {
            0 => Ok(()),
            1 => Err(failures.remove(0)),
            _ => Err(Self::BroadcastFailed {
                key,
                errors: failures,
            }),
        }
    }
}

/// Errors raised while loading [`EventServiceConfig`](crate::EventServiceConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),
}

pub type Result<T> = std::result::Result<T, EventServiceError>;
