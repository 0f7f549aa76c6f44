//! Constants for sensorproc
//!
//! Every tunable default and conversion factor lives here, with units in the
//! name. Grouped by domain:
//! - **Time**: unit conversions and clock widths
//! - **Filter**: value filter defaults and the legacy "no reading" sentinel
//! - **Table**: sample table capacity
//!
//! Use these constants instead of magic numbers.

/// Time unit conversions.
pub mod time;

/// Value filter defaults.
pub mod filter;

/// Sample table sizing.
pub mod table;

// Re-export commonly used constants for convenience
pub use time::{MS_PER_SECOND, SECONDS_PER_HOUR};

pub use filter::{
    DEFAULT_EPS, DEFAULT_POLL_TIME_SEC, DEFAULT_SMOOTH_INTERVAL, SENSOR_VALUE_INVALID,
};

pub use table::DEFAULT_TABLE_CAPACITY;
