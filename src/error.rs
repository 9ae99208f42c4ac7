// src/error.rs
//! Unified error handling for the Myo protocol core
//!
//! Every fallible operation in this crate returns [`ProtocolResult`]. The
//! taxonomy is deliberately small: decoding fails closed on wrong payload
//! lengths, the command encoder rejects bad arguments before producing any
//! bytes, and transport failures are propagated opaquely from the external
//! BLE stack. Unknown notification sources are *not* errors — undocumented
//! vendor characteristics exist on this hardware, so they are passed through
//! as data (see [`crate::protocol::Event::UnknownSource`]).

use thiserror::Error;

/// Unified error type for the Myo protocol core
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProtocolError {
    /// A known notification source delivered a payload of the wrong length.
    ///
    /// Decoding fails closed: no partial event is emitted.
    #[error("malformed {what} payload: expected {expected} bytes, got {actual}")]
    MalformedPayload {
        /// Human-readable name of the payload that failed to decode
        what: &'static str,
        /// Exact byte length the fixed wire layout requires
        expected: usize,
        /// Byte length actually received
        actual: usize,
    },

    /// The caller supplied an out-of-range value to the command encoder.
    ///
    /// Rejected before any bytes are produced.
    #[error("invalid argument for {command} command: {reason}")]
    InvalidCommandArgument {
        /// Name of the command being encoded
        command: &'static str,
        /// Why the argument was rejected
        reason: String,
    },

    /// An operation on the external transport failed.
    ///
    /// The core retries nothing itself; retry policy belongs to the
    /// transport collaborator.
    #[error("transport failure during {operation}: {reason}")]
    TransportFailure {
        /// Transport operation that failed (write, subscribe, unsubscribe)
        operation: String,
        /// Opaque reason reported by the transport
        reason: String,
    },
}

impl ProtocolError {
    /// Shorthand for a length-mismatch decode failure.
    pub fn malformed(what: &'static str, expected: usize, actual: usize) -> Self {
        ProtocolError::MalformedPayload {
            what,
            expected,
            actual,
        }
    }

    /// Shorthand for a rejected encoder argument.
    pub fn invalid_argument(command: &'static str, reason: impl Into<String>) -> Self {
        ProtocolError::InvalidCommandArgument {
            command,
            reason: reason.into(),
        }
    }

    /// Shorthand for an opaque transport failure.
    pub fn transport(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        ProtocolError::TransportFailure {
            operation: operation.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for protocol operations
pub type ProtocolResult<T> = Result<T, ProtocolError>;
