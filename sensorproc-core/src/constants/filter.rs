//! Value Filter Defaults
//!
//! Defaults for [`FilterConfig`](crate::FilterConfig). They suit a slowly
//! changing environmental sensor polled about once per second.

/// Default number of samples folded into the running mean.
///
/// Larger values smooth more and react slower to real changes.
pub const DEFAULT_SMOOTH_INTERVAL: u32 = 5;

/// Default heartbeat interval (seconds).
///
/// A reading is reported at least this often even when the smoothed value
/// does not move. Zero disables the heartbeat.
pub const DEFAULT_POLL_TIME_SEC: u32 = 60;

/// Default minimum change of the smoothed value that triggers a report.
pub const DEFAULT_EPS: f64 = 0.1;

/// Numeric stand-in for "no reading reported yet".
///
/// The filter tracks this state as `Option<f64>` internally; the sentinel is
/// exported for hosts that forward the last value over a numeric-only
/// channel (see [`ValueFilter::last_emitted_or_invalid`](crate::ValueFilter::last_emitted_or_invalid)).
pub const SENSOR_VALUE_INVALID: f64 = -999_999.0;
