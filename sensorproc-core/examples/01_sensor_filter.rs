//! Sensor Filter Example
//!
//! Runs a simulated outdoor temperature sensor through a [`ValueFilter`] and
//! prints only the readings that would be published.
//!
//! ## What You'll Learn
//!
//! - How `smooth_interval`, `poll_time_sec` and `eps` shape the output
//! - Why a heartbeat report still arrives when nothing changes
//! - Using the same filter for integer ADC counts
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_sensor_filter
//! ```

use sensorproc_core::{time::MockTimeSource, FilterConfig, ValueFilter};

fn main() {
    println!("sensorproc Value Filter Example");
    println!("===============================\n");

    println!("Noisy temperature, polled every 10 s:");
    println!("-------------------------------------");
    demo_temperature();

    println!("\n\nADC counts with integer readings:");
    println!("---------------------------------");
    demo_adc_counts();
}

fn demo_temperature() {
    let clock = MockTimeSource::new(0);
    // average over 10 values, heartbeat every 5 minutes, report changes > 0.1 °C
    let mut sensor = ValueFilter::new(FilterConfig::new(10, 300, 0.1), &clock);

    let mut published = 0;
    for tick in 0..120u32 {
        let t = f64::from(tick);
        // slow warm-up with a ±0.15 °C sawtooth as noise
        let noise = (f64::from(tick % 7) - 3.0) * 0.05;
        let raw = 18.0 + t * 0.01 + noise;

        let mut reading = raw;
        if sensor.filter(&mut reading) {
            published += 1;
            println!(
                "  t={:>5}s  raw {:>6.2}°C  ->  publish {:>6.2}°C",
                tick * 10,
                raw,
                reading
            );
        }
        clock.advance_secs(10);
    }
    println!("\n  {} of 120 readings published", published);
}

fn demo_adc_counts() {
    let clock = MockTimeSource::new(0);
    let mut adc = ValueFilter::new(FilterConfig::new(4, 0, 8.0), &clock);

    for raw in [2048_u16, 2050, 2046, 2049, 2200, 2201, 2199, 2200, 2200] {
        let mut counts = raw;
        let status = if adc.filter(&mut counts) {
            format!("report {}", counts)
        } else {
            "suppressed".to_string()
        };
        println!("  raw {:>5}  mean {:>8.2}  {}", raw, adc.mean(), status);
    }
}
