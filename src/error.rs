//! Crate-wide error types.
//!
//! Parse and lookup errors are recoverable at the unit of work that produced
//! them (one wire line, one key lookup) and are logged and dropped by their
//! caller. Socket setup failures are fatal and are expected to propagate out
//! of `main` as [`anyhow::Error`].

use thiserror::Error;

/// Errors raised while decoding a single line from one of the four inbound
/// wire formats.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line too short: expected at least {expected} bytes, got {actual}: {line:?}")]
    LineTooShort {
        expected: usize,
        actual: usize,
        line: String,
    },

    #[error("unknown CUSIP {cusip:?} in line: {line:?}")]
    UnknownCusip { cusip: String, line: String },

    #[error("invalid {field} field {value:?} in line: {line:?}")]
    InvalidField {
        field: &'static str,
        value: String,
        line: String,
    },

    #[error("malformed market data line: {0:?}")]
    MalformedMarketData(String),
}

/// Errors raised by a [`crate::graph::Service`] keyed-store lookup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("key not found in service store")]
    UnknownKey,
}

/// Errors raised while loading the static CUSIP reference table. Only the
/// file itself can fail outright — a malformed row is logged and skipped
/// rather than surfaced as an error.
#[derive(Debug, Error)]
pub enum ReferenceDataError {
    #[error("failed to read reference CSV {path:?}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
