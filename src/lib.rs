//! # respsim - Fake HTTP Response Simulator
//!
//! Produces values shaped like HTTP replies without doing any network I/O,
//! for testing code that consumes API responses.
//!
//! ## Features
//!
//! - GET and POST simulation that echoes the request back in a JSON payload
//! - Bounded random latency (uniform 50-150ms by default, other profiles)
//! - Forced error responses with a caller-chosen status
//! - Optional random error injection (rate limits, 5xx, timeouts)
//! - Injectable clock and RNG for deterministic tests
//!
//! ## Usage
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use respsim::{simulate_get, simulate_post, SimulateOptions};
//! use serde_json::json;
//!
//! let response = simulate_get("/users", None, None, SimulateOptions::default()).unwrap();
//! assert!(response.is_success());
//! assert_eq!(response.payload()["url"], "/users");
//!
//! let failed = simulate_post(
//!     "/orders",
//!     Some(json!({"qty": 3})),
//!     None,
//!     SimulateOptions::error(503),
//! )
//! .unwrap();
//! assert_eq!(failed.status_code(), 503);
//! ```
//!
//! ### As a CLI
//!
//! ```bash
//! respsim get /users --param page=2
//! ```

// Core library modules
pub mod clock;
pub mod config;
pub mod errors;
pub mod generator;
pub mod latency;
pub mod response;
pub mod simulator;
pub mod validation;

// CLI module (for the `respsim` binary)
pub mod cli;

// Re-export commonly used types
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{Config, ConfigError};
pub use errors::{ErrorConfig, ErrorInjector, SimulatedError};
pub use generator::{Method, SimRequest};
pub use latency::{LatencyProfile, LatencyShape};
pub use response::ResponseData;
pub use simulator::{simulate_get, simulate_post, SimulateOptions, Simulator};
pub use validation::SimError;
