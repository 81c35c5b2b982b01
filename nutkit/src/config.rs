//! Timing configuration for panel animation and measurement.
//!
//! All delays are empirical. Hosts that want different pacing build a
//! [`Timing`] in code or load one from JSON settings:
//!
//! ```ignore
//! let timing = Timing::from_json(r#"{ "settle_delay_ms": 250 }"#)?;
//! ```

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Delays driving a panel's height animation and re-measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Delay between anchoring the start height and applying the end height.
    pub expand_delay: Duration,
    /// Delay after the end height is applied before an open panel relaxes to `auto`.
    pub settle_delay: Duration,
    /// Delay before the first measurement after mount.
    pub mount_probe_delay: Duration,
    /// Delay before re-measuring after the content changes.
    pub content_probe_delay: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            expand_delay: Duration::from_millis(100),
            settle_delay: Duration::from_millis(300),
            mount_probe_delay: Duration::from_millis(100),
            content_probe_delay: Duration::from_millis(200),
        }
    }
}

/// Errors from loading or validating a [`Timing`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse timing settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("expand delay must be non-zero")]
    ZeroExpandDelay,

    #[error("content probe delay ({content:?}) is shorter than mount probe delay ({mount:?})")]
    ProbeDelayOrder { mount: Duration, content: Duration },
}

/// On-disk shape: millisecond fields, all optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct TimingSettings {
    expand_delay_ms: Option<u64>,
    settle_delay_ms: Option<u64>,
    mount_probe_delay_ms: Option<u64>,
    content_probe_delay_ms: Option<u64>,
}

impl Timing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expand_delay(mut self, delay: Duration) -> Self {
        self.expand_delay = delay;
        self
    }

    pub fn settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn mount_probe_delay(mut self, delay: Duration) -> Self {
        self.mount_probe_delay = delay;
        self
    }

    pub fn content_probe_delay(mut self, delay: Duration) -> Self {
        self.content_probe_delay = delay;
        self
    }

    /// Load from JSON settings. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: TimingSettings = serde_json::from_str(json)?;
        let defaults = Self::default();
        let ms = |value: Option<u64>, fallback: Duration| {
            value.map(Duration::from_millis).unwrap_or(fallback)
        };

        let timing = Self {
            expand_delay: ms(settings.expand_delay_ms, defaults.expand_delay),
            settle_delay: ms(settings.settle_delay_ms, defaults.settle_delay),
            mount_probe_delay: ms(settings.mount_probe_delay_ms, defaults.mount_probe_delay),
            content_probe_delay: ms(
                settings.content_probe_delay_ms,
                defaults.content_probe_delay,
            ),
        };
        timing.validate()?;
        Ok(timing)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.expand_delay.is_zero() {
            return Err(ConfigError::ZeroExpandDelay);
        }
        if self.content_probe_delay < self.mount_probe_delay {
            return Err(ConfigError::ProbeDelayOrder {
                mount: self.mount_probe_delay,
                content: self.content_probe_delay,
            });
        }
        Ok(())
    }
}
