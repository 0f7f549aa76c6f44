//! Time-Related Constants
//!
//! Conversion factors used by the clock helpers and by the filter's
//! heartbeat check. Timestamps are milliseconds throughout the crate.

// ===== TIME UNIT CONVERSIONS =====

/// Milliseconds per second.
pub const MS_PER_SECOND: u64 = 1000;

/// Seconds per minute.
pub const SECONDS_PER_MINUTE: u32 = 60;

/// Minutes per hour.
pub const MINUTES_PER_HOUR: u32 = 60;

/// Seconds per hour.
///
/// A common heartbeat interval for slow environmental sensors.
pub const SECONDS_PER_HOUR: u32 = SECONDS_PER_MINUTE * MINUTES_PER_HOUR;
