//! Time management for edge devices
//!
//! Provides the clock abstraction the value filter reads its heartbeat from:
//! - Monotonic host clock (when `std` is available)
//! - Closure-backed clocks over 64-bit or 32-bit `millis()` counters
//! - Mock clock (deterministic tests and simulation)
//!
//! Hardware tick counters wrap. Elapsed time is always taken through
//! [`TimeSource::elapsed`], which subtracts with wrapping at the counter's
//! own width, so the result across a wrap is still correct as long as the
//! real interval is shorter than one full counter period.

use crate::constants::time::MS_PER_SECOND;
use core::cell::Cell;

/// Timestamp in milliseconds since device boot (or any fixed origin)
pub type Timestamp = u64;

/// Source of time for the system
///
/// Implement this over whatever the platform offers: a SysTick counter, an
/// RTOS tick count, `std::time::Instant`. Counters narrower than 64 bits
/// must override [`elapsed`](Self::elapsed) so the subtraction wraps at
/// their width:
///
/// ```rust
/// use sensorproc_core::time::{time_diff_u32, TimeSource, Timestamp};
///
/// struct TickCounter {
///     ticks: u32,
/// }
///
/// impl TimeSource for TickCounter {
///     fn now(&self) -> Timestamp {
///         // 1 kHz tick, widened for the filter
///         Timestamp::from(self.ticks)
///     }
///
///     fn elapsed(&self, since: Timestamp, now: Timestamp) -> u64 {
///         u64::from(time_diff_u32(since as u32, now as u32))
///     }
/// }
///
/// let clock = TickCounter { ticks: 5 };
/// assert_eq!(clock.elapsed(Timestamp::from(u32::MAX - 9), clock.now()), 15);
/// ```
pub trait TimeSource {
    /// Get current timestamp in milliseconds
    fn now(&self) -> Timestamp;

    /// Milliseconds from `since` to `now`, both read from this clock
    fn elapsed(&self, since: Timestamp, now: Timestamp) -> u64 {
        time_diff(since, now)
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now(&self) -> Timestamp {
        (**self).now()
    }

    fn elapsed(&self, since: Timestamp, now: Timestamp) -> u64 {
        (**self).elapsed(since, now)
    }
}

/// Milliseconds elapsed from `since` to `now`, correct across a 64-bit wrap
#[inline]
pub fn time_diff(since: Timestamp, now: Timestamp) -> u64 {
    now.wrapping_sub(since)
}

/// [`time_diff`] for raw 32-bit tick counters
#[inline]
pub fn time_diff_u32(since: u32, now: u32) -> u32 {
    now.wrapping_sub(since)
}

/// Whether `elapsed_ms` is strictly more than `seconds`
///
/// Zero seconds never expires; callers use it to disable a timeout.
pub fn expired(elapsed_ms: u64, seconds: u32) -> bool {
    seconds != 0 && elapsed_ms > u64::from(seconds) * MS_PER_SECOND
}

/// Controllable clock for tests and simulation
///
/// Interior mutability lets a test keep advancing time while a filter holds
/// a shared reference to the clock.
///
/// ```rust
/// use sensorproc_core::time::{MockTimeSource, TimeSource};
///
/// let clock = MockTimeSource::new(1_000);
/// let borrowed = &clock;
/// clock.advance(500);
/// assert_eq!(borrowed.now(), 1_500);
/// ```
#[derive(Debug, Default)]
pub struct MockTimeSource {
    now: Cell<Timestamp>,
}

impl MockTimeSource {
    /// Create a clock reading `start`
    pub fn new(start: Timestamp) -> Self {
        Self { now: Cell::new(start) }
    }

    /// Jump to an absolute time
    pub fn set(&self, timestamp: Timestamp) {
        self.now.set(timestamp);
    }

    /// Move forward by `ms`, wrapping like a hardware counter
    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().wrapping_add(ms));
    }

    /// Move forward by whole seconds
    pub fn advance_secs(&self, secs: u64) {
        self.advance(secs.wrapping_mul(MS_PER_SECOND));
    }
}

impl TimeSource for MockTimeSource {
    fn now(&self) -> Timestamp {
        self.now.get()
    }
}

/// Clock backed by a closure, typically a HAL `millis()` call
///
/// ```rust
/// use sensorproc_core::time::{FnClock, TimeSource};
///
/// fn millis() -> u64 { 42 }
///
/// let clock = FnClock(millis);
/// assert_eq!(clock.now(), 42);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FnClock<F>(pub F);

impl<F: Fn() -> Timestamp> TimeSource for FnClock<F> {
    fn now(&self) -> Timestamp {
        (self.0)()
    }
}

/// Clock backed by a 32-bit `millis()` counter
///
/// Arduino-style cores and most 32-bit timers wrap after about 49.7 days.
/// Elapsed time is computed modulo 2^32 so a heartbeat keeps its period
/// across the wrap.
///
/// ```rust
/// use core::cell::Cell;
/// use sensorproc_core::time::{FnClock32, TimeSource};
///
/// let ticks = Cell::new(u32::MAX - 9);
/// let clock = FnClock32(|| ticks.get());
/// let before = clock.now();
/// ticks.set(5);
/// assert_eq!(clock.elapsed(before, clock.now()), 15);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FnClock32<F>(pub F);

impl<F: Fn() -> u32> TimeSource for FnClock32<F> {
    fn now(&self) -> Timestamp {
        Timestamp::from((self.0)())
    }

    fn elapsed(&self, since: Timestamp, now: Timestamp) -> u64 {
        u64::from(time_diff_u32(since as u32, now as u32))
    }
}

/// Monotonic host clock, milliseconds since construction (requires std)
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: std::time::Instant,
}

#[cfg(feature = "std")]
impl MonotonicClock {
    /// Start counting from now
    pub fn new() -> Self {
        Self { start: std::time::Instant::now() }
    }
}

#[cfg(feature = "std")]
impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl TimeSource for MonotonicClock {
    fn now(&self) -> Timestamp {
        self.start.elapsed().as_millis() as Timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_time_advances() {
        let time = MockTimeSource::new(1000);
        assert_eq!(time.now(), 1000);

        time.advance(500);
        assert_eq!(time.now(), 1500);

        time.advance_secs(2);
        assert_eq!(time.now(), 3500);
    }

    #[test]
    fn diff_survives_wraparound() {
        // 10ms before the wrap to 5ms after it
        assert_eq!(time_diff(u64::MAX - 9, 5), 15);
        assert_eq!(time_diff_u32(u32::MAX - 9, 5), 15);

        // Plain case
        assert_eq!(time_diff(1_000, 4_000), 3_000);
    }

    #[test]
    fn mock_clock_wraps_like_hardware() {
        let time = MockTimeSource::new(u64::MAX - 1);
        time.advance(3);
        assert_eq!(time.now(), 1);
    }

    #[test]
    fn expiry_is_strict_and_zero_disables() {
        assert!(!expired(60_000, 60));
        assert!(expired(60_001, 60));
        assert!(!expired(u64::MAX, 0));
    }

    #[test]
    fn references_forward_to_the_clock() {
        let time = MockTimeSource::new(7);
        let by_ref: &dyn TimeSource = &time;
        assert_eq!((&by_ref).now(), 7);
        assert_eq!((&by_ref).elapsed(2, 7), 5);
    }

    #[test]
    fn counter_32_bit_elapsed_wraps_at_its_width() {
        let ticks = Cell::new(u32::MAX - 100);
        let clock = FnClock32(|| ticks.get());
        let start = clock.now();
        assert_eq!(start, u64::from(u32::MAX - 100));

        ticks.set(199);
        assert_eq!(clock.elapsed(start, clock.now()), 300);

        // the 64-bit rule would see the same readings as almost 2^64 ms apart
        assert!(time_diff(start, clock.now()) > u64::from(u32::MAX));
    }

    #[test]
    fn wide_clocks_use_64_bit_difference() {
        let time = MockTimeSource::new(u64::MAX - 9);
        let start = time.now();
        time.advance(15);
        assert_eq!(time.elapsed(start, time.now()), 15);
    }
}
