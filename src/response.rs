// Simulated Response Module
// The immutable reply record handed back to callers.

use crate::validation::SimError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const APPLICATION_JSON: &str = "application/json";

/// A simulated HTTP reply.
///
/// `raw_text` is produced from `payload` inside [`ResponseData::new`] and
/// the fields are private, so the two can never disagree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseData {
    status_code: u16,
    payload: Value,
    headers: HashMap<String, String>,
    raw_text: String,
}

impl ResponseData {
    pub fn new(
        status_code: u16,
        payload: Value,
        headers: HashMap<String, String>,
    ) -> Result<Self, SimError> {
        let raw_text = serde_json::to_string(&payload)?;
        Ok(Self {
            status_code,
            payload,
            headers,
            raw_text,
        })
    }

    /// A response with the `Content-Type: application/json` header set
    pub fn json_response(status_code: u16, payload: Value) -> Result<Self, SimError> {
        let mut headers = HashMap::new();
        headers.insert(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string());
        Self::new(status_code, payload, headers)
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// The decoded body
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The serialized body
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Decode the body into a caller-chosen type
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, SimError> {
        serde_json::from_str(&self.raw_text).map_err(SimError::Decode)
    }

    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status_code)
    }

    pub fn is_error(&self) -> bool {
        self.status_code >= 400
    }

    pub(crate) fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_string(), value.into());
        self
    }
}
