//! Validation errors for the Metronome domain model.
//!
//! Every constructor and wire decoder in this crate reports failure through
//! [`ModelError`]. The variants name the offending field or value so that a
//! caller can surface the problem without further interpretation. None of these
//! errors ever originates from the network: they are raised before a request is
//! built, or while decoding a body the transport has already received.

use thiserror::Error;

/// A value that violates the Metronome job schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A required field was missing, empty, or not strictly positive.
    ///
    /// `field` uses the dotted entity path (e.g. `"Run.cpus"`, `"host path"`).
    #[error("{field} is required")]
    Required {
        /// Name of the missing field.
        field: &'static str,
    },

    /// A string did not match any member of a closed wire vocabulary.
    #[error("invalid {kind} value '{value}': must be one of {allowed}")]
    InvalidEnumValue {
        /// Name of the enumeration (e.g. `"operator"`).
        kind: &'static str,
        /// The rejected input, verbatim.
        value: String,
        /// Comma-separated list of accepted values.
        allowed: String,
    },

    /// A container path did not match `^/[^/].*$`.
    #[error("invalid path '{path}': container path must match `^/[^/].*$`")]
    InvalidPath {
        /// The rejected path, verbatim.
        path: String,
    },

    /// A field carried a value outside its permitted range.
    #[error("{field} is invalid: {reason}")]
    InvalidValue {
        /// Name of the field.
        field: &'static str,
        /// Human-readable constraint that was violated.
        reason: String,
    },

    /// A constraint expression was not of the form `attribute OPERATOR value`.
    #[error("malformed constraint '{input}': expected `attribute {{EQ|LIKE|UNLIKE}} value`")]
    MalformedConstraint {
        /// The rejected expression, verbatim.
        input: String,
    },
}
