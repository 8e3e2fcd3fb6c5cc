//! Error types for the REST client.
//!
//! Every failed call is normalized into [`ApiError`] before it reaches
//! controller code: a connectivity failure, a structured field-error map,
//! or a single server message.

use std::collections::BTreeMap;
use std::path::PathBuf;

use reqwest::StatusCode;
use serde_json::Value;

/// Message shown when the request never got a response.
pub const CONNECT_FAILURE_MESSAGE: &str =
    "Could not connect to the server. Please check your network connection.";

/// Field name → one or more messages.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Errors from the REST API layer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// No response: DNS, refused connection, TLS or timeout.
    #[error("{0}")]
    Network(String),

    /// The backend rejected the input field by field.
    #[error("{}", summarize(fields))]
    Validation {
        status: u16,
        fields: FieldErrors,
    },

    /// The backend returned 401.
    #[error("{0}")]
    Unauthorized(String),

    /// Any other non-2xx response, flattened to one message.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// A 2xx response whose body did not have the expected shape.
    #[error("Unexpected response from server: {0}")]
    Decode(String),

    /// The input was rejected locally and no request was made.
    #[error("{0}")]
    Invalid(String),

    /// The call succeeded but the session could not be stored or removed.
    #[error("{0}")]
    Session(String),
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        ApiError::Session(err.to_string())
    }
}

impl ApiError {
    /// Map a transport-level [`reqwest::Error`] raised before any response
    /// arrived.
    pub fn transport(err: reqwest::Error) -> Self {
        tracing::warn!(error = %err, "Request did not reach the server");
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(CONNECT_FAILURE_MESSAGE.to_string())
        }
    }

    /// Normalize a non-2xx response body into a single error shape.
    ///
    /// - `{"errors": {field: [..]}}` becomes [`ApiError::Validation`], as
    ///   does a bare `{field: [..]}` object on a 400 or 422;
    /// - `errors` as a list of strings is joined into one message;
    /// - `message` / `title` / `error` / `detail` strings, JSON strings and
    ///   plain text become one message;
    /// - 401 without field errors becomes [`ApiError::Unauthorized`].
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let parsed: Option<Value> = serde_json::from_str(body).ok();

        if let Some(Value::Object(map)) = &parsed {
            let fields = match map.get("errors") {
                Some(Value::Object(errors)) => collect_fields(errors),
                None if accepts_bare_fields(status) && message_of(map).is_none() => {
                    // Every value must be a message list.
                    let fields = collect_fields(map);
                    if fields.len() == map.len() {
                        fields
                    } else {
                        FieldErrors::new()
                    }
                }
                _ => FieldErrors::new(),
            };
            if !fields.is_empty() {
                return ApiError::Validation {
                    status: status.as_u16(),
                    fields,
                };
            }
        }

        let message = match &parsed {
            Some(Value::Object(map)) => message_of(map).or_else(|| error_list(map)),
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => None,
            None => Some(body.trim().to_string()).filter(|text| !text.is_empty()),
        }
        .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()));

        if status == StatusCode::UNAUTHORIZED {
            ApiError::Unauthorized(message)
        } else {
            ApiError::Server {
                status: status.as_u16(),
                message,
            }
        }
    }

    /// Per-field messages, when the backend supplied them.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ApiError::Validation { fields, .. } => Some(fields),
            _ => None,
        }
    }

    /// HTTP status, when a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Validation { status, .. } | ApiError::Server { status, .. } => Some(*status),
            ApiError::Unauthorized(_) => Some(401),
            _ => None,
        }
    }
}

fn message_of(map: &serde_json::Map<String, Value>) -> Option<String> {
    ["message", "title", "error", "detail"]
        .iter()
        .find_map(|key| map.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

fn accepts_bare_fields(status: StatusCode) -> bool {
    status == StatusCode::BAD_REQUEST || status == StatusCode::UNPROCESSABLE_ENTITY
}

/// `{"errors": ["..", ".."]}` as one message.
fn error_list(map: &serde_json::Map<String, Value>) -> Option<String> {
    let items = map.get("errors")?.as_array()?;
    let messages: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
    (!messages.is_empty()).then(|| messages.join("; "))
}

/// Keep only entries whose value is a string or an array of strings.
fn collect_fields(map: &serde_json::Map<String, Value>) -> FieldErrors {
    map.iter()
        .filter_map(|(field, value)| {
            let messages: Vec<String> = match value {
                Value::String(s) => vec![s.clone()],
                Value::Array(items) => items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect(),
                _ => return None,
            };
            (!messages.is_empty()).then(|| (field.clone(), messages))
        })
        .collect()
}

fn summarize(fields: &FieldErrors) -> String {
    fields
        .iter()
        .map(|(field, messages)| format!("{field}: {}", messages.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var}: {message}")]
    Invalid { var: &'static str, message: String },

    #[error("No platform config directory; set PIDGEN_SESSION_FILE")]
    NoConfigDir,
}

/// Errors while persisting or loading the session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Session file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
