//! Smoothing and Throttling Value Filter
//!
//! ## Overview
//!
//! Raw sensor readings are noisy, and most consumers (a display, an MQTT
//! topic, a log) only care when the value actually moved. [`ValueFilter`]
//! does both jobs in one call per poll:
//!
//! 1. **Smoothing**: every raw value is folded into a running mean. The
//!    number of samples counted in the mean saturates at `smooth_interval`,
//!    so old history never dominates and a new value keeps a weight of at
//!    least `1 / (smooth_interval + 1)`.
//! 2. **Change threshold**: a new reading is reported only when the mean
//!    moved by more than `eps` since the last report.
//! 3. **Heartbeat**: if nothing was reported for `poll_time_sec` seconds,
//!    the current mean is reported anyway, so downstream consumers can treat
//!    silence as "unchanged" instead of "stale".
//!
//! The first sample after construction or [`reset`](ValueFilter::reset) is
//! always reported.
//!
//! `smooth_interval = 0` disables smoothing: the mean is always the latest
//! raw value. With `smooth_interval = 1` the new sample still shares the
//! mean with the previous one.
//!
//! ## Update Rule
//!
//! ```text
//! mean  = (mean × n + raw) / (n + 1)
//! n     = min(n + 1, smooth_interval)
//! emit  = first || |last − mean| > eps || (poll ≠ 0 && elapsed > poll)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use sensorproc_core::{FilterConfig, ValueFilter};
//! use sensorproc_core::time::MockTimeSource;
//!
//! let clock = MockTimeSource::new(0);
//! // average over 10 values, heartbeat every hour, report changes > 0.1
//! let config = FilterConfig::new(10, 3600, 0.1);
//! let mut sensor = ValueFilter::new(config, &clock);
//!
//! let mut filtered = 20.0;
//! assert!(sensor.filter(&mut filtered)); // first reading is always reported
//!
//! let mut filtered = 20.05;
//! assert!(!sensor.filter(&mut filtered)); // too small a change
//! assert_eq!(filtered, 20.05);            // caller's value untouched
//! ```
//!
//! Raw values are not validated. NaN or out-of-range input flows into the
//! mean; pre-validate sensor output if that matters.

use crate::{
    constants::filter::{
        DEFAULT_EPS, DEFAULT_POLL_TIME_SEC, DEFAULT_SMOOTH_INTERVAL, SENSOR_VALUE_INVALID,
    },
    errors::{ConfigError, ConfigResult},
    time::{self, TimeSource, Timestamp},
    traits::Reading,
};

/// Tunable parameters of a [`ValueFilter`]
///
/// Missing fields fall back to the defaults when deserialised.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FilterConfig {
    /// Cap on the number of samples counted in the running mean
    pub smooth_interval: u32,
    /// Heartbeat interval in seconds; 0 disables forced reports
    pub poll_time_sec: u32,
    /// Minimum change of the mean that triggers a report
    pub eps: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            smooth_interval: DEFAULT_SMOOTH_INTERVAL,
            poll_time_sec: DEFAULT_POLL_TIME_SEC,
            eps: DEFAULT_EPS,
        }
    }
}

impl FilterConfig {
    /// Create a configuration from all three parameters
    pub const fn new(smooth_interval: u32, poll_time_sec: u32, eps: f64) -> Self {
        Self {
            smooth_interval,
            poll_time_sec,
            eps,
        }
    }

    /// Set the smoothing cap (larger = smoother, slower)
    pub fn with_smooth_interval(mut self, smooth_interval: u32) -> Self {
        self.smooth_interval = smooth_interval;
        self
    }

    /// Set the heartbeat interval (0 = report on change only)
    pub fn with_poll_time_sec(mut self, poll_time_sec: u32) -> Self {
        self.poll_time_sec = poll_time_sec;
        self
    }

    /// Set the change threshold
    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    /// Reject thresholds that make the filter meaningless
    ///
    /// A NaN `eps` suppresses every change-triggered report; a negative one
    /// reports every sample. Infinite `eps` is accepted: it turns the filter
    /// into a pure heartbeat.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.eps.is_nan() {
            return Err(ConfigError::EpsNotANumber);
        }
        if self.eps < 0.0 {
            return Err(ConfigError::NegativeEps { eps: self.eps });
        }
        Ok(())
    }
}

/// Bounded running-mean filter with change threshold and heartbeat
///
/// Generic over its clock so tests can drive time explicitly. Pass a
/// reference (`&clock`) to share one clock between several filters.
#[derive(Debug)]
pub struct ValueFilter<C: TimeSource> {
    config: FilterConfig,
    clock: C,
    /// Samples counted in the mean, saturating at `smooth_interval`
    sample_count: u32,
    mean: f64,
    /// Mean at the last report; `None` until the first one
    last_emitted: Option<f64>,
    last_emit_time: Timestamp,
}

impl<C: TimeSource> ValueFilter<C> {
    /// Create a filter and start its heartbeat timer
    pub fn new(config: FilterConfig, clock: C) -> Self {
        let last_emit_time = clock.now();
        Self {
            config,
            clock,
            sample_count: 0,
            mean: 0.0,
            last_emitted: None,
            last_emit_time,
        }
    }

    /// Create a filter with the default parameters (5 samples, 60 s, 0.1)
    pub fn with_defaults(clock: C) -> Self {
        Self::new(FilterConfig::default(), clock)
    }

    /// Create a filter after checking the configuration
    pub fn try_new(config: FilterConfig, clock: C) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::new(config, clock))
    }

    /// Forget all history; the next sample is reported unconditionally
    pub fn reset(&mut self) {
        self.sample_count = 0;
        self.mean = 0.0;
        self.last_emitted = None;
        self.last_emit_time = self.clock.now();
    }

    /// Replace the parameters and reset, same as building a new filter
    pub fn update(&mut self, config: FilterConfig) {
        self.config = config;
        self.reset();
    }

    /// [`update`](Self::update) with positional parameters
    pub fn update_params(&mut self, smooth_interval: u32, poll_time_sec: u32, eps: f64) {
        self.update(FilterConfig::new(smooth_interval, poll_time_sec, eps));
    }

    /// Fold in a raw value; on a report, overwrite it with the smoothed one
    ///
    /// Returns `true` when `value` now holds a new smoothed reading. On
    /// `false` the caller's value is left as it was. Works for any
    /// [`Reading`]; integer readings are truncated toward zero on output.
    pub fn filter<V: Reading>(&mut self, value: &mut V) -> bool {
        match self.process(value.to_f64()) {
            Some(smoothed) => {
                *value = V::from_f64(smoothed);
                true
            }
            None => false,
        }
    }

    /// Fold in a raw value and return the smoothed reading if one is due
    pub fn process(&mut self, raw: f64) -> Option<f64> {
        let n = f64::from(self.sample_count);
        self.mean = (self.mean * n + raw) / (n + 1.0);
        if self.sample_count < self.config.smooth_interval {
            self.sample_count += 1;
        }

        let changed = match self.last_emitted {
            None => true,
            Some(last) => libm::fabs(last - self.mean) > self.config.eps,
        };
        if changed {
            let now = self.clock.now();
            log_trace!("filter: mean moved to {}", self.mean);
            return Some(self.emit(now));
        }

        let now = self.clock.now();
        let elapsed = self.clock.elapsed(self.last_emit_time, now);
        if time::expired(elapsed, self.config.poll_time_sec) {
            log_debug!(
                "filter: no report for {}s, forcing {}",
                self.config.poll_time_sec,
                self.mean
            );
            return Some(self.emit(now));
        }

        None
    }

    fn emit(&mut self, now: Timestamp) -> f64 {
        self.last_emitted = Some(self.mean);
        self.last_emit_time = now;
        self.mean
    }

    /// Current parameters
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Current running mean (0 before the first sample)
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Number of samples counted in the mean
    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    /// Last reported value, `None` if nothing was reported since reset
    pub fn last_emitted(&self) -> Option<f64> {
        self.last_emitted
    }

    /// Last reported value, or [`SENSOR_VALUE_INVALID`] before the first report
    pub fn last_emitted_or_invalid(&self) -> f64 {
        self.last_emitted.unwrap_or(SENSOR_VALUE_INVALID)
    }

    /// Time of the last report (or of the last reset)
    pub fn last_emit_time(&self) -> Timestamp {
        self.last_emit_time
    }

    /// The clock driving the heartbeat
    pub fn clock(&self) -> &C {
        &self.clock
    }
}
