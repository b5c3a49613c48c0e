// Response Generator Module
// Builds the success payload that echoes a validated request back to the caller.

use crate::validation::{validate_headers, validate_mapping, validate_url, SimError};
use rand::Rng;
use serde_json::{json, Map, Value};
use std::fmt;
use std::ops::RangeInclusive;

/// Range of the numeric part of a request id (`req-NNNNNN`)
pub const REQUEST_ID_RANGE: RangeInclusive<u32> = 100_000..=999_999;

/// Statuses a successful simulated call may report
pub const SUCCESS_STATUS_RANGE: RangeInclusive<u16> = 200..=299;

/// HTTP method being simulated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }

    /// Payload key under which the caller's mapping argument is echoed
    pub fn data_key(&self) -> &'static str {
        match self {
            Method::Get => "params",
            Method::Post => "body",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request whose arguments have passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct SimRequest {
    pub method: Method,
    pub url: String,
    /// Query parameters for GET, body for POST; `{}` when absent
    pub data: Map<String, Value>,
    pub headers: Map<String, Value>,
}

impl SimRequest {
    pub fn new(
        method: Method,
        url: &str,
        data: Option<Value>,
        headers: Option<Value>,
    ) -> Result<Self, SimError> {
        validate_url(url)?;
        let data = validate_mapping(method.data_key(), data)?;
        let headers = validate_headers(headers)?;
        Ok(Self {
            method,
            url: url.to_string(),
            data,
            headers,
        })
    }
}

pub fn generate_request_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("req-{}", rng.random_range(REQUEST_ID_RANGE))
}

pub fn generate_success_status<R: Rng + ?Sized>(rng: &mut R) -> u16 {
    rng.random_range(SUCCESS_STATUS_RANGE)
}

/// Echo payload: request id, url, mapping argument, request headers and capture time
pub fn success_payload(request: &SimRequest, request_id: &str, time: f64) -> Value {
    let mut payload = Map::new();
    payload.insert("request_id".to_string(), json!(request_id));
    payload.insert("url".to_string(), json!(request.url));
    payload.insert(
        request.method.data_key().to_string(),
        Value::Object(request.data.clone()),
    );
    payload.insert(
        "headers".to_string(),
        Value::Object(request.headers.clone()),
    );
    payload.insert("time".to_string(), json!(time));
    Value::Object(payload)
}
