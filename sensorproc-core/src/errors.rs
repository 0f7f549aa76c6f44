//! Error Types for Configuration and Strict Table Construction
//!
//! ## Design Philosophy
//!
//! The filter and the table never fail once they exist: noisy input is
//! smoothed, non-monotonic sample points are dropped, degenerate ranges fall
//! back to an offset. Errors therefore only appear at the edges where a
//! caller explicitly asks to be told about bad input:
//!
//! - [`FilterConfig::validate`](crate::FilterConfig::validate) and
//!   [`ValueFilter::try_new`](crate::ValueFilter::try_new)
//! - [`SampleTable::try_new`](crate::SampleTable::try_new)
//!
//! Same rules as the rest of the crate: small, `Copy`, no heap, no `String`.
//!
//! ```rust
//! use sensorproc_core::{SampleTable, TableError};
//!
//! let result = SampleTable::<f32, 2>::try_new(&[0.0, 1.0, 2.0], &[0.0, 1.0, 2.0], false);
//! assert_eq!(
//!     result.err(),
//!     Some(TableError::CapacityExceeded { count: 3, capacity: 2 })
//! );
//! ```

use thiserror_no_std::Error;

/// Result type for configuration checks
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for strict table construction
pub type TableResult<T> = Result<T, TableError>;

/// Filter configuration rejected by [`FilterConfig::validate`](crate::FilterConfig::validate)
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// `eps` is NaN, so no change could ever exceed it
    #[error("Change threshold eps is not a number")]
    EpsNotANumber,

    /// `eps` below zero makes every sample an emission
    #[error("Change threshold eps {eps} is negative")]
    NegativeEps {
        /// The rejected threshold
        eps: f64,
    },
}

/// Sample point input rejected by [`SampleTable::try_new`](crate::SampleTable::try_new)
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    /// x and y slices have different lengths
    #[error("Sample slices differ in length: {xs} x values, {ys} y values")]
    LengthMismatch {
        /// Number of x values supplied
        xs: usize,
        /// Number of y values supplied
        ys: usize,
    },

    /// More sample points than the table can hold
    #[error("{count} sample points exceed table capacity {capacity}")]
    CapacityExceeded {
        /// Number of points supplied
        count: usize,
        /// Compile-time capacity of the table
        capacity: usize,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::EpsNotANumber => defmt::write!(fmt, "eps is NaN"),
            Self::NegativeEps { eps } => defmt::write!(fmt, "eps {} is negative", eps),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TableError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::LengthMismatch { xs, ys } =>
                defmt::write!(fmt, "{} x values, {} y values", xs, ys),
            Self::CapacityExceeded { count, capacity } =>
                defmt::write!(fmt, "{} points exceed capacity {}", count, capacity),
        }
    }
}
