//! Error type for the Metronome client.
//!
//! [`ClientError`] separates the ways a call can fail: the request never got a
//! response ([`ClientError::Transport`]), the service answered with a failure
//! status ([`ClientError::HttpStatus`], [`ClientError::Api`]), the body could
//! not be interpreted, or the request was rejected locally before it was sent
//! ([`ClientError::Validation`]).
//!
//! Error bodies from the service are kept as the raw text the service sent.
//! Their shape varies between endpoints and versions, so the client does not
//! try to decode them.

use thiserror::Error;

use model::ModelError;

/// Every failure a Metronome client call can report.
#[derive(Debug, Error)]
pub enum ClientError {
    // -----------------------------------------------------------------------
    // No response
    // -----------------------------------------------------------------------
    /// Connecting, sending, or reading the response failed (DNS, refused, timeout).
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The liveness check run while building a client failed.
    #[error("Could not reach metronome cluster: {source}")]
    Unreachable {
        #[source]
        source: Box<ClientError>,
    },

    // -----------------------------------------------------------------------
    // Failure status
    // -----------------------------------------------------------------------
    /// Non-2xx status with an empty body; the message is the status line.
    #[error("{status_line}")]
    HttpStatus { status: u16, status_line: String },

    /// Non-2xx status with a body; the message is the body verbatim.
    #[error("{body}")]
    Api { status: u16, body: String },

    // -----------------------------------------------------------------------
    // Undecodable response
    // -----------------------------------------------------------------------
    /// A body declared as `application/json` was not valid JSON.
    #[error("malformed JSON response (status {status}): {source}")]
    MalformedJson {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// Valid JSON that does not fit the expected type; the message is the body.
    #[error("{body}")]
    Decode {
        status: u16,
        body: String,
        #[source]
        source: serde_json::Error,
    },

    /// A `text/plain` body was returned where JSON was expected.
    #[error("unexpected text response (status {status}): {body}")]
    TextBody { status: u16, body: String },

    /// The response carried a content type the client cannot decode.
    #[error("unrecognized content type '{content_type}' (status {status})")]
    UnrecognizedContentType { status: u16, content_type: String },

    /// A successful response had no body where one was required.
    #[error("empty response body (status {status})")]
    EmptyBody { status: u16 },

    // -----------------------------------------------------------------------
    // Rejected before sending
    // -----------------------------------------------------------------------
    #[error(transparent)]
    Validation(#[from] ModelError),

    #[error("invalid service URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ClientError {
    /// HTTP status of the response this error was derived from, if one arrived.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::HttpStatus { status, .. }
            | ClientError::Api { status, .. }
            | ClientError::MalformedJson { status, .. }
            | ClientError::Decode { status, .. }
            | ClientError::TextBody { status, .. }
            | ClientError::UnrecognizedContentType { status, .. }
            | ClientError::EmptyBody { status } => Some(*status),
            ClientError::Transport(err) => err.status().map(|s| s.as_u16()),
            ClientError::Unreachable { source } => source.status(),
            ClientError::Validation(_) | ClientError::InvalidUrl(_) | ClientError::Encode(_) => {
                None
            }
        }
    }
}
