//! Sample Table Sizing

/// Default capacity of a [`SampleTable`](crate::SampleTable) (points).
///
/// Calibration curves from datasheets rarely need more than a dozen points.
/// 16 points × 2 axes × 8 bytes = 256 bytes for an `f64` table.
pub const DEFAULT_TABLE_CAPACITY: usize = 16;
