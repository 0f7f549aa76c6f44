//! Common test utilities for integration tests
//!
//! This module provides:
//! - Clock-driven trace helpers for the value filter
//! - Calibration fixtures for sample tables
//! - Tolerance assertions

#![allow(dead_code)]

use sensorproc_core::{
    time::{MockTimeSource, TimeSource},
    ValueFilter,
};

/// Points from the reference example: falling curve through four points
pub const FALLING_X: [f64; 4] = [0.0, 1.0, 2.0, 3.0];
pub const FALLING_Y: [f64; 4] = [9.0, 3.0, 2.8, 1.0];

/// NTC thermistor: ADC counts (rising) against temperature in °C (falling)
pub const NTC_COUNTS: [f64; 7] = [310.0, 520.0, 980.0, 1650.0, 2400.0, 3050.0, 3500.0];
pub const NTC_TEMP_C: [f64; 7] = [100.0, 80.0, 60.0, 40.0, 20.0, 0.0, -20.0];

/// Feed `(advance_ms, raw)` pairs through `filter`, advancing `clock` before
/// each sample, and record what the filter reported.
pub fn emission_trace<C: TimeSource>(
    filter: &mut ValueFilter<C>,
    clock: &MockTimeSource,
    samples: &[(u64, f64)],
) -> Vec<Option<f64>> {
    samples
        .iter()
        .map(|&(advance_ms, raw)| {
            clock.advance(advance_ms);
            filter.process(raw)
        })
        .collect()
}

/// Count the reported entries of a trace
pub fn emissions(trace: &[Option<f64>]) -> usize {
    trace.iter().filter(|e| e.is_some()).count()
}

#[macro_export]
macro_rules! assert_within_tolerance {
    ($actual:expr, $expected:expr, $tolerance:expr) => {
        let diff = ($actual - $expected).abs();
        if diff > $tolerance {
            panic!(
                "Value {} not within tolerance {} of expected {} (diff: {})",
                $actual, $tolerance, $expected, diff
            );
        }
    };
}
