//! HTTP transport: URL construction, request headers, and response decoding.
//!
//! [`Transport::call`] is the single path every endpoint goes through. It
//! sends one request, reads the whole body, and classifies the outcome from
//! the status code and the declared content type:
//!
//! | Body | Content type | 2xx | other |
//! |------|--------------|-----|-------|
//! | empty | any | `Ok`, no body | [`ClientError::HttpStatus`] |
//! | non-empty | `application/json` | decoded into the target | [`ClientError::Api`] |
//! | non-empty | `text/plain` | string targets only | [`ClientError::Api`] |
//! | non-empty | anything else | [`ClientError::UnrecognizedContentType`] | same |
//!
//! JSON bodies are always parsed into a [`serde_json::Value`] first, so a
//! malformed document is reported as [`ClientError::MalformedJson`] whatever the
//! status, and never confused with a document of the wrong shape.

use std::collections::BTreeMap;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use crate::{ClientConfig, ClientError};

const APPLICATION_JSON: &str = "application/json";
const TEXT_PLAIN: &str = "text/plain";

/// Query parameters; each key may carry several values, sent in order.
pub type QueryParams = BTreeMap<String, Vec<String>>;

/// Placeholder body for requests that send none.
pub const NO_BODY: Option<&'static ()> = None;

// ---------------------------------------------------------------------------
// Response targets
// ---------------------------------------------------------------------------

/// A type a response body can be decoded into.
pub trait ResponseTarget: Sized {
    /// Converts an already-parsed JSON document.
    fn from_json(value: Value) -> Result<Self, serde_json::Error>;

    /// Accepts a `text/plain` body. Targets that cannot hold text return `None`.
    fn from_text(_text: &str) -> Option<Self> {
        None
    }
}

/// Decodes a JSON body into `T` through serde.
#[derive(Debug, Clone, PartialEq)]
pub struct Json<T>(pub T);

impl<T: DeserializeOwned> ResponseTarget for Json<T> {
    fn from_json(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value).map(Json)
    }
}

/// Raw passthrough: the parsed document, untouched.
impl ResponseTarget for Value {
    fn from_json(value: Value) -> Result<Self, serde_json::Error> {
        Ok(value)
    }
}

impl ResponseTarget for String {
    fn from_json(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    fn from_text(text: &str) -> Option<Self> {
        Some(text.to_string())
    }
}

/// Outcome of a successful call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub status: u16,
    /// `None` when the service sent an empty body.
    pub body: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Returns the decoded body, failing with [`ClientError::EmptyBody`] if there was none.
    pub fn into_body(self) -> Result<T, ClientError> {
        self.body.ok_or(ClientError::EmptyBody {
            status: self.status,
        })
    }
}

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// Sends requests to one Metronome service.
///
/// Holds only immutable configuration and reqwest's connection pool, so a
/// single instance can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct Transport {
    http: reqwest::Client,
    base: Url,
    config: ClientConfig,
}

impl Transport {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let base = Url::parse(&config.url)?;
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .danger_accept_invalid_certs(config.allow_unverified_tls)
            .build()?;
        Ok(Self { http, base, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Joins `path` onto the base URL and appends `query` after any query the
    /// base URL already carries.
    pub fn url(&self, path: &str, query: &QueryParams) -> Url {
        let mut url = self.base.clone();
        let joined = format!(
            "{}/{}",
            self.base.path().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        url.set_path(&joined);
        if query.values().any(|values| !values.is_empty()) {
            let mut pairs = url.query_pairs_mut();
            for (key, values) in query {
                for value in values {
                    pairs.append_pair(key, value);
                }
            }
        }
        url
    }

    /// Performs one request and decodes the response into `T`.
    pub async fn call<T, B>(
        &self,
        method: Method,
        path: &str,
        query: &QueryParams,
        body: Option<&B>,
    ) -> Result<ApiResponse<T>, ClientError>
    where
        T: ResponseTarget,
        B: Serialize + Sync + ?Sized,
    {
        let url = self.url(path, query);
        let payload = body
            .map(serde_json::to_string)
            .transpose()
            .map_err(ClientError::Encode)?;

        if self.config.debug {
            info!(
                method = %method,
                url = %url,
                body = payload.as_deref().unwrap_or(""),
                "metronome request"
            );
        }

        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .header(CONTENT_TYPE, APPLICATION_JSON)
            .header(ACCEPT, APPLICATION_JSON);
        // Both schemes travel in the Authorization header; the token wins.
        if let Some(token) = self.config.authorization() {
            request = request.header(AUTHORIZATION, token);
        } else if let Some((user, password)) = self.config.basic_auth() {
            request = request.basic_auth(user, Some(password));
        }
        if let Some(payload) = payload {
            request = request.body(payload);
        }

        let response = request.send().await?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(media_type);
        let text = response.text().await?;

        debug!(
            method = %method,
            url = %url,
            status = status.as_u16(),
            content_type = content_type.as_deref().unwrap_or(""),
            bytes = text.len(),
            "metronome call"
        );

        decode_response(status, content_type.as_deref(), text)
    }
}

/// Lower-cased media type with parameters such as `charset` removed.
fn media_type(raw: &str) -> String {
    raw.split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

fn decode_response<T: ResponseTarget>(
    status: StatusCode,
    content_type: Option<&str>,
    body: String,
) -> Result<ApiResponse<T>, ClientError> {
    let code = status.as_u16();

    if body.is_empty() {
        if status.is_success() {
            return Ok(ApiResponse { status: code, body: None });
        }
        return Err(ClientError::HttpStatus {
            status: code,
            status_line: status.to_string(),
        });
    }

    match content_type {
        Some(APPLICATION_JSON) => {
            let value: Value = serde_json::from_str(&body)
                .map_err(|source| ClientError::MalformedJson { status: code, source })?;
            if !status.is_success() {
                return Err(ClientError::Api { status: code, body });
            }
            match T::from_json(value) {
                Ok(decoded) => Ok(ApiResponse {
                    status: code,
                    body: Some(decoded),
                }),
                Err(source) => Err(ClientError::Decode {
                    status: code,
                    body,
                    source,
                }),
            }
        }
        Some(TEXT_PLAIN) => {
            if !status.is_success() {
                return Err(ClientError::Api { status: code, body });
            }
            match T::from_text(&body) {
                Some(decoded) => Ok(ApiResponse {
                    status: code,
                    body: Some(decoded),
                }),
                None => Err(ClientError::TextBody { status: code, body }),
            }
        }
        other => Err(ClientError::UnrecognizedContentType {
            status: code,
            content_type: other.unwrap_or_default().to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(url: &str) -> Transport {
        Transport::new(ClientConfig::new(url)).unwrap()
    }

    #[test]
    fn test_media_type_strips_parameters() {
        assert_eq!(media_type("application/json; charset=utf-8"), "application/json");
        assert_eq!(media_type("Text/Plain;charset=UTF-8"), "text/plain");
        assert_eq!(media_type("application/xml"), "application/xml");
    }

    #[test]
    fn test_url_joins_base_path_and_endpoint() {
        let t = transport("http://metronome.test:9000/service/metronome/");
        let url = t.url("/v1/jobs", &QueryParams::new());
        assert_eq!(url.as_str(), "http://metronome.test:9000/service/metronome/v1/jobs");
    }

    #[test]
    fn test_url_keeps_base_query_and_appends_multi_valued_params() {
        let t = transport("http://metronome.test:9000?tenant=a");
        let mut query = QueryParams::new();
        query.insert(
            "embed".to_string(),
            vec!["history".to_string(), "schedules".to_string()],
        );
        let url = t.url("/v1/jobs/foo", &query);
        assert_eq!(
            url.as_str(),
            "http://metronome.test:9000/v1/jobs/foo?tenant=a&embed=history&embed=schedules"
        );
    }

    #[test]
    fn test_url_without_params_has_no_query() {
        let url = transport("http://metronome.test:9000").url("/v1/ping", &QueryParams::new());
        assert_eq!(url.as_str(), "http://metronome.test:9000/v1/ping");
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let err = Transport::new(ClientConfig::new("not a url")).unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
    }

    #[test]
    fn test_decode_json_success() {
        let response: ApiResponse<Value> =
            decode_response(StatusCode::OK, Some(APPLICATION_JSON), r#"{"a":1}"#.to_string())
                .unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, Some(serde_json::json!({"a": 1})));
    }

    #[test]
    fn test_decode_json_failure_status_keeps_body_text() {
        let body = r#"{"message":"Object is not valid"}"#;
        let err = decode_response::<Value>(
            StatusCode::UNPROCESSABLE_ENTITY,
            Some(APPLICATION_JSON),
            body.to_string(),
        )
        .unwrap_err();
        assert_eq!(err.status(), Some(422));
        assert_eq!(err.to_string(), body);
    }

    #[test]
    fn test_decode_malformed_json() {
        let err = decode_response::<Value>(
            StatusCode::OK,
            Some(APPLICATION_JSON),
            "{not json".to_string(),
        )
        .unwrap_err();
        assert!(matches!(err, ClientError::MalformedJson { status: 200, .. }));
    }

    #[test]
    fn test_decode_shape_mismatch() {
        let err = decode_response::<Json<Vec<String>>>(
            StatusCode::OK,
            Some(APPLICATION_JSON),
            r#"{"a":1}"#.to_string(),
        )
        .unwrap_err();
        assert!(matches!(err, ClientError::Decode { status: 200, .. }));
        assert_eq!(err.to_string(), r#"{"a":1}"#);
    }

    #[test]
    fn test_decode_text_into_string_only() {
        let response: ApiResponse<String> =
            decode_response(StatusCode::OK, Some(TEXT_PLAIN), "pong".to_string()).unwrap();
        assert_eq!(response.body.as_deref(), Some("pong"));

        let err = decode_response::<Value>(StatusCode::OK, Some(TEXT_PLAIN), "pong".to_string())
            .unwrap_err();
        assert!(matches!(err, ClientError::TextBody { .. }));
    }

    #[test]
    fn test_decode_unrecognized_content_type_regardless_of_status() {
        for status in [StatusCode::OK, StatusCode::INTERNAL_SERVER_ERROR] {
            let err = decode_response::<Value>(status, Some("application/xml"), "<a/>".to_string())
                .unwrap_err();
            assert!(matches!(
                err,
                ClientError::UnrecognizedContentType { ref content_type, .. } if content_type == "application/xml"
            ));
        }
        let err = decode_response::<Value>(StatusCode::OK, None, "x".to_string()).unwrap_err();
        assert!(matches!(err, ClientError::UnrecognizedContentType { .. }));
    }

    #[test]
    fn test_decode_empty_body() {
        let response: ApiResponse<Value> =
            decode_response(StatusCode::NO_CONTENT, None, String::new()).unwrap();
        assert_eq!(response.status, 204);
        assert!(response.body.is_none());
        assert!(matches!(
            response.into_body(),
            Err(ClientError::EmptyBody { status: 204 })
        ));

        let err = decode_response::<Value>(
            StatusCode::INTERNAL_SERVER_ERROR,
            Some(APPLICATION_JSON),
            String::new(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "500 Internal Server Error");
    }
}
