//! Client configuration.

use std::fmt;
use std::time::Duration;

/// Service URL used when none is configured.
pub const DEFAULT_URL: &str = "http://127.0.0.1:9000";

/// Per-request timeout used when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

const TOKEN_PREFIX: &str = "token=";

/// Connection settings for a [`MetronomeClient`](crate::MetronomeClient).
///
/// Fixed for the lifetime of the client.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the service. May carry a path prefix and query parameters,
    /// both of which are kept on every request.
    pub url: String,
    pub request_timeout: Duration,
    /// Accept self-signed or otherwise unverifiable TLS certificates.
    pub allow_unverified_tls: bool,
    /// Log every outgoing request at `info` level.
    pub debug: bool,
    pub auth_token: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            allow_unverified_tls: false,
            debug: false,
            auth_token: None,
            user: None,
            password: None,
        }
    }
}

impl ClientConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn with_basic_auth(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self.password = Some(password.into());
        self
    }

    pub fn with_unverified_tls(mut self, allow: bool) -> Self {
        self.allow_unverified_tls = allow;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// The `Authorization` header value for the configured token, as `token=<value>`.
    pub(crate) fn authorization(&self) -> Option<String> {
        self.auth_token.as_deref().map(|token| {
            if token.starts_with(TOKEN_PREFIX) {
                token.to_string()
            } else {
                format!("{TOKEN_PREFIX}{token}")
            }
        })
    }

    /// Basic credentials, only when both halves are configured.
    pub(crate) fn basic_auth(&self) -> Option<(&str, &str)> {
        match (&self.user, &self.password) {
            (Some(user), Some(password)) => Some((user.as_str(), password.as_str())),
            _ => None,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("url", &self.url)
            .field("request_timeout", &self.request_timeout)
            .field("allow_unverified_tls", &self.allow_unverified_tls)
            .field("debug", &self.debug)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "<redacted>"))
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
