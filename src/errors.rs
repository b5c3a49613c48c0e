// Error Injection Module
// Produces failure-shaped responses, either on request or at configured rates.

use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

/// Message carried by an explicitly requested error response
pub const SIMULATED_ERROR_MESSAGE: &str = "This is a fake error response.";

/// Payload for a caller-forced error (`simulate_error`)
pub fn error_payload(status: u16) -> Value {
    json!({
        "error": "Simulated error",
        "status": status,
        "message": SIMULATED_ERROR_MESSAGE,
    })
}

/// Configuration for random error injection.
///
/// An injected timeout blocks the calling thread for `timeout_after_ms`
/// on a real clock before the 504 comes back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorConfig {
    /// Probability of rate limit error (0.0-1.0)
    #[serde(default)]
    pub rate_limit_rate: f64,
    /// Probability of server error (0.0-1.0)
    #[serde(default)]
    pub server_error_rate: f64,
    /// Probability of timeout (0.0-1.0)
    #[serde(default)]
    pub timeout_rate: f64,
    /// Delay before timeout error (default 5000ms)
    #[serde(default = "default_timeout_after_ms")]
    pub timeout_after_ms: u64,
}

fn default_timeout_after_ms() -> u64 {
    5000
}

impl ErrorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config with no errors (for normal operation)
    pub fn none() -> Self {
        Self::default()
    }

    /// Create a config for chaos testing (high error rates)
    pub fn chaos() -> Self {
        Self {
            rate_limit_rate: 0.1,
            server_error_rate: 0.05,
            timeout_rate: 0.05,
            timeout_after_ms: 5000,
        }
    }

    /// Builder pattern methods
    pub fn with_rate_limit_rate(mut self, rate: f64) -> Self {
        self.rate_limit_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_server_error_rate(mut self, rate: f64) -> Self {
        self.server_error_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_timeout_rate(mut self, rate: f64) -> Self {
        self.timeout_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_timeout_after_ms(mut self, ms: u64) -> Self {
        self.timeout_after_ms = ms;
        self
    }

    /// Get the total probability of any error occurring
    pub fn total_error_rate(&self) -> f64 {
        (self.rate_limit_rate + self.server_error_rate + self.timeout_rate).min(1.0)
    }
}

impl Default for ErrorConfig {
    fn default() -> Self {
        Self {
            rate_limit_rate: 0.0,
            server_error_rate: 0.0,
            timeout_rate: 0.0,
            timeout_after_ms: default_timeout_after_ms(),
        }
    }
}

/// Types of randomly injected errors
#[derive(Debug, Clone, PartialEq)]
pub enum SimulatedError {
    /// Rate limit exceeded (HTTP 429)
    RateLimit { retry_after_seconds: u32 },
    /// Internal server error (HTTP 500)
    ServerError,
    /// Service unavailable (HTTP 503)
    ServiceUnavailable,
    /// Gateway timeout (HTTP 504), returned after `after` has elapsed
    Timeout { after: Duration },
}

impl SimulatedError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            SimulatedError::RateLimit { .. } => 429,
            SimulatedError::ServerError => 500,
            SimulatedError::ServiceUnavailable => 503,
            SimulatedError::Timeout { .. } => 504,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            SimulatedError::RateLimit { .. } => "rate_limit_error",
            SimulatedError::ServerError => "server_error",
            SimulatedError::ServiceUnavailable => "service_unavailable",
            SimulatedError::Timeout { .. } => "timeout_error",
        }
    }

    fn message(&self) -> &'static str {
        match self {
            SimulatedError::RateLimit { .. } => "Rate limit exceeded. Please retry later.",
            SimulatedError::ServerError => "The server had an error processing the request.",
            SimulatedError::ServiceUnavailable => "Service temporarily unavailable",
            SimulatedError::Timeout { .. } => "Request timed out",
        }
    }

    /// Failure-shaped body, same shape as [`error_payload`] plus a type tag
    pub fn to_payload(&self) -> Value {
        json!({
            "error": "Simulated error",
            "status": self.status_code(),
            "message": self.message(),
            "type": self.kind(),
        })
    }

    /// Get Retry-After header value if applicable
    pub fn retry_after(&self) -> Option<u32> {
        match self {
            SimulatedError::RateLimit {
                retry_after_seconds,
            } => Some(*retry_after_seconds),
            SimulatedError::ServiceUnavailable => Some(60),
            _ => None,
        }
    }
}

/// Error injector that decides whether to return an error
#[derive(Debug, Clone, Default)]
pub struct ErrorInjector {
    config: ErrorConfig,
}

impl ErrorInjector {
    pub fn new(config: ErrorConfig) -> Self {
        Self { config }
    }

    /// Decide whether to inject an error based on configured rates
    /// Returns None if no error should be injected
    pub fn maybe_inject<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<SimulatedError> {
        if !self.is_enabled() {
            return None;
        }

        let roll: f64 = rng.random();
        let mut threshold = 0.0;

        threshold += self.config.rate_limit_rate;
        if roll < threshold {
            return Some(SimulatedError::RateLimit {
                retry_after_seconds: rng.random_range(1..60),
            });
        }

        threshold += self.config.server_error_rate;
        if roll < threshold {
            // Randomly choose between 500 and 503
            return if rng.random_bool(0.7) {
                Some(SimulatedError::ServerError)
            } else {
                Some(SimulatedError::ServiceUnavailable)
            };
        }

        threshold += self.config.timeout_rate;
        if roll < threshold {
            return Some(SimulatedError::Timeout {
                after: Duration::from_millis(self.config.timeout_after_ms),
            });
        }

        None
    }

    /// Check if error injection is enabled (any rate > 0)
    pub fn is_enabled(&self) -> bool {
        self.config.total_error_rate() > 0.0
    }

    /// Get the underlying config
    pub fn config(&self) -> &ErrorConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_error_payload_shape() {
        let payload = error_payload(503);
        assert_eq!(payload["error"], "Simulated error");
        assert_eq!(payload["status"], 503);
        assert_eq!(payload["message"], SIMULATED_ERROR_MESSAGE);
    }

    #[test]
    fn test_error_config_defaults() {
        let config = ErrorConfig::default();
        assert_eq!(config.rate_limit_rate, 0.0);
        assert_eq!(config.server_error_rate, 0.0);
        assert_eq!(config.timeout_after_ms, 5000);
        assert_eq!(config.total_error_rate(), 0.0);
    }

    #[test]
    fn test_error_config_chaos() {
        let config = ErrorConfig::chaos();
        assert!(config.total_error_rate() > 0.0);
        assert!(config.rate_limit_rate > 0.0);
    }

    #[test]
    fn test_error_config_clamps_values() {
        let config = ErrorConfig::new()
            .with_rate_limit_rate(1.5) // Should clamp to 1.0
            .with_server_error_rate(-0.5); // Should clamp to 0.0

        assert_eq!(config.rate_limit_rate, 1.0);
        assert_eq!(config.server_error_rate, 0.0);
    }

    #[test]
    fn test_simulated_error_status_codes() {
        assert_eq!(
            SimulatedError::RateLimit {
                retry_after_seconds: 30
            }
            .status_code(),
            429
        );
        assert_eq!(SimulatedError::ServerError.status_code(), 500);
        assert_eq!(SimulatedError::ServiceUnavailable.status_code(), 503);
        assert_eq!(
            SimulatedError::Timeout {
                after: Duration::from_secs(30)
            }
            .status_code(),
            504
        );
    }

    #[test]
    fn test_injected_payload_carries_type() {
        let payload = SimulatedError::RateLimit {
            retry_after_seconds: 30,
        }
        .to_payload();
        assert_eq!(payload["type"], "rate_limit_error");
        assert_eq!(payload["status"], 429);
        assert!(payload.get("error").is_some());
    }

    #[test]
    fn test_retry_after() {
        let error = SimulatedError::RateLimit {
            retry_after_seconds: 45,
        };
        assert_eq!(error.retry_after(), Some(45));
        assert_eq!(SimulatedError::ServiceUnavailable.retry_after(), Some(60));
        assert_eq!(SimulatedError::ServerError.retry_after(), None);
    }

    #[test]
    fn test_error_injector_disabled() {
        let injector = ErrorInjector::new(ErrorConfig::none());
        let mut rng = StdRng::seed_from_u64(11);
        assert!(!injector.is_enabled());

        for _ in 0..100 {
            assert!(injector.maybe_inject(&mut rng).is_none());
        }
    }

    #[test]
    fn test_error_injector_always_timeout() {
        let injector = ErrorInjector::new(
            ErrorConfig::new()
                .with_timeout_rate(1.0)
                .with_timeout_after_ms(250),
        );
        let mut rng = StdRng::seed_from_u64(12);

        for _ in 0..10 {
            assert_eq!(
                injector.maybe_inject(&mut rng),
                Some(SimulatedError::Timeout {
                    after: Duration::from_millis(250)
                })
            );
        }
    }

    #[test]
    fn test_error_rate_distribution() {
        let injector = ErrorInjector::new(ErrorConfig::new().with_rate_limit_rate(0.5));
        let mut rng = StdRng::seed_from_u64(13);

        let trials = 1000;
        let errors = (0..trials)
            .filter(|_| injector.maybe_inject(&mut rng).is_some())
            .count();

        // Should be roughly 50% (with some variance)
        let error_rate = errors as f64 / trials as f64;
        assert!(
            error_rate > 0.4 && error_rate < 0.6,
            "Error rate {} not within expected range",
            error_rate
        );
    }
}
