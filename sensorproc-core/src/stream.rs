//! Pull-based reading streams
//!
//! Scheduler tick handlers poll for data instead of awaiting it. The
//! [`Stream`] trait follows that model with `nb::Result`:
//!
//! - `Ok(item)` - a reading is available
//! - `Err(nb::Error::WouldBlock)` - nothing to report this tick
//! - `Err(nb::Error::Other(e))` - the source failed or ended
//!
//! [`FilteredStream`] puts a [`ValueFilter`] behind that interface, so the
//! handler only ever sees readings worth reporting:
//!
//! ```rust
//! use sensorproc_core::{FilterConfig, FilteredStream, SliceStream, Stream, StreamError};
//! use sensorproc_core::time::MockTimeSource;
//!
//! let clock = MockTimeSource::new(0);
//! let raw = [20.0, 20.01, 20.02, 25.0];
//! let mut readings = FilteredStream::new(
//!     SliceStream::new(&raw),
//!     FilterConfig::new(1, 0, 0.5),
//!     &clock,
//! );
//!
//! let mut reported = Vec::new();
//! loop {
//!     match readings.poll_next() {
//!         Ok(value) => reported.push(value),
//!         Err(nb::Error::WouldBlock) => continue,
//!         Err(nb::Error::Other(StreamError::EndOfStream)) => break,
//!         Err(nb::Error::Other(e)) => panic!("{e}"),
//!     }
//! }
//! assert_eq!(reported.len(), 2);
//! ```

use core::convert::Infallible;
use core::fmt;

use crate::{
    filter::{FilterConfig, ValueFilter},
    time::TimeSource,
    traits::Reading,
};

/// Source of readings polled without blocking
///
/// ## Implementation Notes
///
/// - Return `nb::Error::WouldBlock` when no data is available yet
/// - Never block; the caller polls again on its next tick
/// - `EndOfStream` should be sticky once returned
pub trait Stream {
    /// Type of items produced by the stream
    type Item;

    /// Type of errors that can occur
    type Error;

    /// Attempt to pull the next item from the stream
    fn poll_next(&mut self) -> nb::Result<Self::Item, Self::Error>;

    /// Returns bounds on remaining items, `(0, None)` if unknown
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, None)
    }
}

/// Errors that can occur while pulling readings
#[derive(Debug, Clone, PartialEq)]
pub enum StreamError<E> {
    /// Error from the underlying sensor or bus
    Transport(E),
    /// End of stream reached
    EndOfStream,
}

impl<E: fmt::Display> fmt::Display for StreamError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "Transport error: {}", e),
            Self::EndOfStream => write!(f, "End of stream"),
        }
    }
}

/// Replays a slice of readings
///
/// Handy for tests and for re-running recorded sensor logs through a filter.
#[derive(Debug, Clone)]
pub struct SliceStream<'a, V> {
    readings: &'a [V],
    position: usize,
}

impl<'a, V: Copy> SliceStream<'a, V> {
    /// Create new stream over `readings`
    pub fn new(readings: &'a [V]) -> Self {
        Self {
            readings,
            position: 0,
        }
    }

    /// Reset to beginning
    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Get current position
    pub fn position(&self) -> usize {
        self.position
    }

    /// Check if stream is exhausted
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.readings.len()
    }
}

impl<'a, V: Copy> Stream for SliceStream<'a, V> {
    type Item = V;
    type Error = StreamError<Infallible>;

    fn poll_next(&mut self) -> nb::Result<Self::Item, Self::Error> {
        let Some(&reading) = self.readings.get(self.position) else {
            return Err(nb::Error::Other(StreamError::EndOfStream));
        };
        self.position += 1;
        Ok(reading)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.readings.len().saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

/// Stream adapter that only yields readings the filter reports
///
/// Every raw reading pulled from the inner stream is folded into the filter.
/// Suppressed readings surface as `nb::Error::WouldBlock`; inner errors pass
/// through untouched.
pub struct FilteredStream<S: Stream, C: TimeSource> {
    inner: S,
    filter: ValueFilter<C>,
}

impl<S, C> FilteredStream<S, C>
where
    S: Stream,
    S::Item: Reading,
    C: TimeSource,
{
    /// Wrap `inner` with a fresh filter
    pub fn new(inner: S, config: FilterConfig, clock: C) -> Self {
        Self::with_filter(inner, ValueFilter::new(config, clock))
    }

    /// Wrap `inner` with an existing filter
    pub fn with_filter(inner: S, filter: ValueFilter<C>) -> Self {
        Self { inner, filter }
    }

    /// The filter state
    pub fn filter(&self) -> &ValueFilter<C> {
        &self.filter
    }

    /// Mutable filter access, e.g. to [`reset`](ValueFilter::reset) or retune it
    pub fn filter_mut(&mut self) -> &mut ValueFilter<C> {
        &mut self.filter
    }

    /// Mutable access to the raw stream
    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    /// Split back into the raw stream and the filter
    pub fn into_parts(self) -> (S, ValueFilter<C>) {
        (self.inner, self.filter)
    }
}

impl<S, C> Stream for FilteredStream<S, C>
where
    S: Stream,
    S::Item: Reading,
    C: TimeSource,
{
    type Item = S::Item;
    type Error = S::Error;

    fn poll_next(&mut self) -> nb::Result<Self::Item, Self::Error> {
        let mut reading = self.inner.poll_next()?;
        if self.filter.filter(&mut reading) {
            Ok(reading)
        } else {
            Err(nb::Error::WouldBlock)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Filtering may suppress any number of readings
        let (_min, max) = self.inner.size_hint();
        (0, max)
    }
}
