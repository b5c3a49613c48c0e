// Latency Profiles Module
// Defines bounded delay profiles for emulating network round-trip time.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use std::time::Duration;

/// Shape of the delay distribution inside a profile's bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LatencyShape {
    /// Every delay in `[min_ms, max_ms]` is equally likely
    Uniform,
    /// Normally distributed around `mean_ms`, clamped to the bounds
    Normal { mean_ms: u64, stddev_ms: u64 },
}

/// Latency profile for simulating response delay
#[derive(Debug, Clone, PartialEq)]
pub struct LatencyProfile {
    /// Lower bound of any sampled delay in milliseconds
    pub min_ms: u64,
    /// Upper bound of any sampled delay in milliseconds
    pub max_ms: u64,
    pub shape: LatencyShape,
}

impl LatencyProfile {
    /// Create a uniform profile; the bounds are swapped if given in reverse
    pub fn uniform(min_ms: u64, max_ms: u64) -> Self {
        Self {
            min_ms: min_ms.min(max_ms),
            max_ms: min_ms.max(max_ms),
            shape: LatencyShape::Uniform,
        }
    }

    /// Create a normally distributed profile bounded to `[min_ms, max_ms]`
    pub fn normal(mean_ms: u64, stddev_ms: u64, min_ms: u64, max_ms: u64) -> Self {
        Self {
            min_ms: min_ms.min(max_ms),
            max_ms: min_ms.max(max_ms),
            shape: LatencyShape::Normal { mean_ms, stddev_ms },
        }
    }

    /// Instant profile - no delay (for fast tests)
    pub fn instant() -> Self {
        Self::uniform(0, 0)
    }

    /// Fast profile - a few milliseconds, enough to reorder racing callers
    pub fn fast() -> Self {
        Self::uniform(1, 5)
    }

    /// Slow upstream service with a long tail
    pub fn slow() -> Self {
        Self::normal(400, 100, 100, 1000)
    }

    /// Mobile network profile
    pub fn mobile() -> Self {
        Self::normal(250, 80, 80, 800)
    }

    /// Get a profile by its preset name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" | "lan" => Some(Self::default()),
            "instant" | "none" => Some(Self::instant()),
            "fast" => Some(Self::fast()),
            "slow" => Some(Self::slow()),
            "mobile" | "3g" => Some(Self::mobile()),
            _ => None,
        }
    }

    /// Sample a delay; the result always lies within the profile's bounds.
    ///
    /// Inverted bounds are ordered before use.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let (lo, hi) = (self.min_ms.min(self.max_ms), self.min_ms.max(self.max_ms));
        if hi == 0 {
            return Duration::ZERO;
        }

        let ms = match self.shape {
            LatencyShape::Uniform => rng.random_range(lo..=hi),
            LatencyShape::Normal { mean_ms, stddev_ms } => {
                let sample = if stddev_ms > 0 {
                    match Normal::new(mean_ms as f64, stddev_ms as f64) {
                        Ok(normal) => normal.sample(rng).max(0.0) as u64,
                        Err(_) => mean_ms,
                    }
                } else {
                    mean_ms
                };
                sample.clamp(lo, hi)
            }
        };

        Duration::from_millis(ms)
    }

    /// Whether this profile can ever produce a non-zero delay
    pub fn is_instant(&self) -> bool {
        self.min_ms.max(self.max_ms) == 0
    }
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self::uniform(50, 150)
    }
}
