//! Sensor smoothing and sample-table interpolation for polled edge devices
//!
//! Two independent building blocks that a scheduler tick handler can call:
//!
//! - [`ValueFilter`] folds raw readings into a bounded running mean and only
//!   reports a new reading when the mean moved by more than `eps`, or when a
//!   heartbeat interval elapsed without a report.
//! - [`SampleTable`] approximates a function from a handful of `(x, y)` sample
//!   points with linear segments, with optional linear extrapolation and
//!   in-place axis rescaling.
//!
//! Key constraints:
//! - No heap allocation (tables live in `heapless::Vec`)
//! - Every call completes in bounded time, no blocking
//! - Runtime operations never fail; bad input degrades gracefully
//!
//! ```rust
//! use sensorproc_core::{FilterConfig, SampleTable, ValueFilter};
//! use sensorproc_core::time::MockTimeSource;
//!
//! let clock = MockTimeSource::new(0);
//! let mut filter = ValueFilter::new(FilterConfig::default(), &clock);
//!
//! let mut reading = 21.7;
//! if filter.filter(&mut reading) {
//!     // `reading` now holds the smoothed value
//! }
//!
//! let table: SampleTable<f64, 4> =
//!     SampleTable::new(&[0.0, 1.0, 2.0, 3.0], &[9.0, 3.0, 2.8, 1.0], true);
//! assert!((table.interpol(1.5) - 2.9).abs() < 1e-9);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod logging;

pub mod constants;
pub mod errors;
pub mod filter;
pub mod stream;
pub mod table;
pub mod time;
pub mod traits;

// Public API
pub use errors::{ConfigError, ConfigResult, TableError, TableResult};
pub use filter::{FilterConfig, ValueFilter};
pub use stream::{FilteredStream, SliceStream, Stream, StreamError};
pub use table::{max_of, min_of, search, SampleTable};
pub use time::{time_diff, TimeSource, Timestamp};
pub use traits::{Reading, TableFloat};

/// Crate version, as recorded by Cargo
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
