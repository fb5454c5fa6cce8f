use super::Response;

use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{Body, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The JSON body every [`JsonHandler`](super::JsonHandler) response and every
/// routing failure is wrapped in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub header: Header,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub success: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error: String,
}

impl Envelope {
    pub fn success(data: Value) -> Self {
        let data = if data.is_null() { None } else { Some(data) };
        Self {
            header: Header {
                success: true,
                error: String::new(),
            },
            data,
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self {
            header: Header {
                success: false,
                error: error.into(),
            },
            data: None,
        }
    }

    pub fn into_response(self, status: StatusCode) -> Response {
        let (status, body) = match serde_json::to_vec(&self) {
            Ok(body) => (status, body),
            Err(e) => {
                let fallback = Self::error(format!("failed to encode JSON response: {}", e));
                let body = serde_json::to_vec(&fallback).unwrap_or_default();
                (StatusCode::INTERNAL_SERVER_ERROR, body)
            }
        };
        let mut res = Response::new(Body::from(body));
        *res.status_mut() = status;
        res.headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        res
    }
}
