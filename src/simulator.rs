//! The fake response generator.
//!
//! A [`Simulator`] validates a request, waits out a sampled delay on its
//! [`Clock`], and returns a [`ResponseData`] that looks like a real reply.
//! It keeps no state between calls: each call draws fresh randomness and a
//! fresh timestamp, so identical inputs can produce different outputs.
//!
//! Every operation comes in two forms. The plain one uses the thread RNG;
//! the `*_with_rng` one takes any [`rand::Rng`] so tests can seed it.

use crate::clock::{unix_seconds, Clock, SystemClock};
use crate::errors::{error_payload, ErrorConfig, ErrorInjector, SimulatedError};
use crate::generator::{
    generate_request_id, generate_success_status, success_payload, Method, SimRequest,
};
use crate::latency::LatencyProfile;
use crate::response::ResponseData;
use crate::validation::SimError;
use rand::Rng;
use serde_json::Value;

/// Per-call switches for a forced error response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulateOptions {
    /// Return a failure-shaped payload instead of a success
    pub simulate_error: bool,
    /// Status used when `simulate_error` is set
    pub error_status: u16,
}

impl SimulateOptions {
    /// Force an error response with the given status
    pub fn error(status: u16) -> Self {
        Self {
            simulate_error: true,
            error_status: status,
        }
    }
}

impl Default for SimulateOptions {
    fn default() -> Self {
        Self {
            simulate_error: false,
            error_status: 500,
        }
    }
}

/// Fake HTTP client: a latency profile, an error injector and a clock
#[derive(Debug, Clone)]
pub struct Simulator<C = SystemClock> {
    latency: LatencyProfile,
    injector: ErrorInjector,
    clock: C,
}

impl Simulator<SystemClock> {
    /// Real clock, 50-150ms uniform delay, no random errors
    pub fn new() -> Self {
        Self {
            latency: LatencyProfile::default(),
            injector: ErrorInjector::default(),
            clock: SystemClock,
        }
    }
}

impl Default for Simulator<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Simulator<C> {
    pub fn with_latency(mut self, latency: LatencyProfile) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_errors(mut self, config: ErrorConfig) -> Self {
        self.injector = ErrorInjector::new(config);
        self
    }

    /// Swap the clock, e.g. for a [`crate::clock::FixedClock`] in tests
    pub fn with_clock<D: Clock>(self, clock: D) -> Simulator<D> {
        Simulator {
            latency: self.latency,
            injector: self.injector,
            clock,
        }
    }

    pub fn latency(&self) -> &LatencyProfile {
        &self.latency
    }

    pub fn error_config(&self) -> &ErrorConfig {
        self.injector.config()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn simulate_get(
        &self,
        url: &str,
        params: Option<Value>,
        headers: Option<Value>,
        options: SimulateOptions,
    ) -> Result<ResponseData, SimError> {
        self.simulate_with_rng(&mut rand::rng(), Method::Get, url, params, headers, options)
    }

    pub fn simulate_post(
        &self,
        url: &str,
        body: Option<Value>,
        headers: Option<Value>,
        options: SimulateOptions,
    ) -> Result<ResponseData, SimError> {
        self.simulate_with_rng(&mut rand::rng(), Method::Post, url, body, headers, options)
    }

    pub fn simulate(
        &self,
        method: Method,
        url: &str,
        data: Option<Value>,
        headers: Option<Value>,
        options: SimulateOptions,
    ) -> Result<ResponseData, SimError> {
        self.simulate_with_rng(&mut rand::rng(), method, url, data, headers, options)
    }

    pub fn simulate_get_with_rng<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        url: &str,
        params: Option<Value>,
        headers: Option<Value>,
        options: SimulateOptions,
    ) -> Result<ResponseData, SimError> {
        self.simulate_with_rng(rng, Method::Get, url, params, headers, options)
    }

    pub fn simulate_post_with_rng<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        url: &str,
        body: Option<Value>,
        headers: Option<Value>,
        options: SimulateOptions,
    ) -> Result<ResponseData, SimError> {
        self.simulate_with_rng(rng, Method::Post, url, body, headers, options)
    }

    /// Validate, delay, then build an error or success response.
    ///
    /// Validation failures return before the clock is touched.
    pub fn simulate_with_rng<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        method: Method,
        url: &str,
        data: Option<Value>,
        headers: Option<Value>,
        options: SimulateOptions,
    ) -> Result<ResponseData, SimError> {
        let request = SimRequest::new(method, url, data, headers)?;

        let delay = self.latency.sample(rng);
        tracing::debug!(
            method = %request.method,
            url = %request.url,
            delay_ms = delay.as_millis() as u64,
            "Simulating request"
        );
        self.clock.sleep(delay);

        if options.simulate_error {
            tracing::info!(
                method = %request.method,
                url = %request.url,
                status = options.error_status,
                "Returning requested error response"
            );
            return ResponseData::json_response(
                options.error_status,
                error_payload(options.error_status),
            );
        }

        if let Some(error) = self.injector.maybe_inject(rng) {
            tracing::warn!("Injecting error: {:?}", error);
            return self.injected_response(&error);
        }

        let request_id = generate_request_id(rng);
        let time = unix_seconds(self.clock.now());
        let payload = success_payload(&request, &request_id, time);
        ResponseData::json_response(generate_success_status(rng), payload)
    }

    fn injected_response(&self, error: &SimulatedError) -> Result<ResponseData, SimError> {
        if let SimulatedError::Timeout { after } = error {
            self.clock.sleep(*after);
        }

        let response = ResponseData::json_response(error.status_code(), error.to_payload())?;
        Ok(match error.retry_after() {
            Some(seconds) => response.with_header("Retry-After", seconds.to_string()),
            None => response,
        })
    }
}

/// Simulate a GET with the default [`Simulator`]
pub fn simulate_get(
    url: &str,
    params: Option<Value>,
    headers: Option<Value>,
    options: SimulateOptions,
) -> Result<ResponseData, SimError> {
    Simulator::new().simulate_get(url, params, headers, options)
}

/// Simulate a POST with the default [`Simulator`]
pub fn simulate_post(
    url: &str,
    body: Option<Value>,
    headers: Option<Value>,
    options: SimulateOptions,
) -> Result<ResponseData, SimError> {
    Simulator::new().simulate_post(url, body, headers, options)
}
