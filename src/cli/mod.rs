//! CLI support for the `respsim` binary.
//!
//! Turns raw command-line strings into simulator arguments and runs a
//! single simulated call.

use crate::config::{Config, ConfigError};
use crate::generator::Method;
use crate::simulator::SimulateOptions;
use crate::validation::SimError;
use crate::{LatencyProfile, ResponseData};
use serde_json::{Map, Value};

/// Errors surfaced by the command-line front end
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("expected KEY=VALUE, got {0:?}")]
    InvalidPair(String),
    #[error("body is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Simulation(#[from] SimError),
}

/// Split `key=value` at the first `=`; the key must be non-empty
pub fn parse_key_value(pair: &str) -> Result<(String, String), CliError> {
    match pair.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(CliError::InvalidPair(pair.to_string())),
    }
}

/// Collect `key=value` pairs into a string-valued JSON object, or `None` if empty
pub fn pairs_to_object(pairs: &[String]) -> Result<Option<Value>, CliError> {
    if pairs.is_empty() {
        return Ok(None);
    }
    let mut map = Map::new();
    for pair in pairs {
        let (key, value) = parse_key_value(pair)?;
        map.insert(key, Value::String(value));
    }
    Ok(Some(Value::Object(map)))
}

/// One simulated call, as requested on the command line
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub method: Method,
    pub url: String,
    pub data: Option<Value>,
    pub headers: Option<Value>,
    pub options: SimulateOptions,
}

impl Invocation {
    pub fn get(
        url: String,
        params: &[String],
        headers: &[String],
        error_status: Option<u16>,
    ) -> Result<Self, CliError> {
        Ok(Self {
            method: Method::Get,
            url,
            data: pairs_to_object(params)?,
            headers: pairs_to_object(headers)?,
            options: options_for(error_status),
        })
    }

    /// `body` is raw JSON text; a non-object body is left for the simulator to reject
    pub fn post(
        url: String,
        body: Option<&str>,
        headers: &[String],
        error_status: Option<u16>,
    ) -> Result<Self, CliError> {
        let data: Option<Value> = body.map(serde_json::from_str).transpose()?;
        Ok(Self {
            method: Method::Post,
            url,
            data,
            headers: pairs_to_object(headers)?,
            options: options_for(error_status),
        })
    }
}

fn options_for(error_status: Option<u16>) -> SimulateOptions {
    error_status
        .map(SimulateOptions::error)
        .unwrap_or_default()
}

/// Load the optional config file and apply a `--latency` override
pub fn load_config(path: Option<&str>, latency: Option<&str>) -> Result<Config, CliError> {
    let mut config = match path {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    if let Some(name) = latency {
        if LatencyProfile::from_name(name).is_none() {
            return Err(ConfigError::Validation(format!("unknown latency profile: {}", name)).into());
        }
        config.latency.profile = Some(name.to_string());
    }

    Ok(config)
}

/// Run one invocation against a simulator built from `config`
pub fn run(config: &Config, invocation: Invocation) -> Result<ResponseData, CliError> {
    let simulator = config.simulator()?;
    tracing::info!(
        method = %invocation.method,
        url = %invocation.url,
        latency = ?simulator.latency(),
        "Running simulated request"
    );

    let response = simulator.simulate(
        invocation.method,
        &invocation.url,
        invocation.data,
        invocation.headers,
        invocation.options,
    )?;
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn instant_config() -> Config {
        let mut config = Config::default();
        config.latency.profile = Some("instant".to_string());
        config
    }

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("page=2").unwrap(),
            ("page".to_string(), "2".to_string())
        );
        // Only the first '=' splits
        assert_eq!(
            parse_key_value("filter=a=b").unwrap(),
            ("filter".to_string(), "a=b".to_string())
        );
        assert_eq!(
            parse_key_value("empty=").unwrap(),
            ("empty".to_string(), String::new())
        );
        assert!(matches!(
            parse_key_value("novalue"),
            Err(CliError::InvalidPair(_))
        ));
        assert!(matches!(
            parse_key_value("=orphan"),
            Err(CliError::InvalidPair(_))
        ));
    }

    #[test]
    fn test_pairs_to_object() {
        assert_eq!(pairs_to_object(&[]).unwrap(), None);
        let object = pairs_to_object(&["a=1".to_string(), "b=x".to_string()]).unwrap();
        assert_eq!(object, Some(json!({"a": "1", "b": "x"})));
    }

    #[test]
    fn test_post_body_must_be_json() {
        let err = Invocation::post("/orders".to_string(), Some("{qty: 3"), &[], None).unwrap_err();
        assert!(matches!(err, CliError::InvalidJson(_)));
    }

    #[test]
    fn test_run_get() {
        let invocation = Invocation::get(
            "/users".to_string(),
            &["page=2".to_string()],
            &["Accept=application/json".to_string()],
            None,
        )
        .unwrap();

        let response = run(&instant_config(), invocation).unwrap();
        assert!(response.is_success());
        assert_eq!(response.payload()["params"], json!({"page": "2"}));
        assert_eq!(
            response.payload()["headers"],
            json!({"Accept": "application/json"})
        );
    }

    #[test]
    fn test_run_post_with_error_status() {
        let invocation =
            Invocation::post("/orders".to_string(), Some(r#"{"qty": 3}"#), &[], Some(503))
                .unwrap();

        let response = run(&instant_config(), invocation).unwrap();
        assert_eq!(response.status_code(), 503);
        assert!(response.payload().get("error").is_some());
    }

    #[test]
    fn test_run_post_rejects_array_body() {
        let invocation = Invocation::post("/orders".to_string(), Some("[1, 2]"), &[], None).unwrap();
        let err = run(&instant_config(), invocation).unwrap_err();
        assert!(matches!(
            err,
            CliError::Simulation(SimError::TypeArgument { .. })
        ));
    }

    #[test]
    fn test_load_config_latency_override() {
        let config = load_config(None, Some("fast")).unwrap();
        assert_eq!(config.latency_profile().unwrap(), LatencyProfile::fast());

        assert!(matches!(
            load_config(None, Some("warp")),
            Err(CliError::Config(ConfigError::Validation(_)))
        ));
    }
}
