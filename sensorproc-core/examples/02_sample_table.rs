//! Sample Table Example
//!
//! Converts NTC thermistor ADC counts into temperatures with a
//! piecewise-linear calibration table, then reuses the same curve after
//! rescaling its axes.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 02_sample_table
//! ```

use sensorproc_core::{SampleTable, TableError};

const COUNTS: [f32; 7] = [310.0, 520.0, 980.0, 1650.0, 2400.0, 3050.0, 3500.0];
const TEMP_C: [f32; 7] = [100.0, 80.0, 60.0, 40.0, 20.0, 0.0, -20.0];

fn main() -> Result<(), TableError> {
    println!("sensorproc Sample Table Example");
    println!("===============================\n");

    let mut ntc: SampleTable<f32, 8> = SampleTable::try_new(&COUNTS, &TEMP_C, false)?;
    println!(
        "Calibration: {} points, counts {:?}, temperature {:?}",
        ntc.len(),
        ntc.x_range(),
        ntc.y_range()
    );

    println!("\nClamped lookups:");
    for counts in [0.0, 310.0, 750.0, 1315.0, 2000.0, 3500.0, 4095.0] {
        println!("  {:>6.0} counts  ->  {:>7.2}°C", counts, ntc.interpol(counts));
    }

    ntc.set_extrapolate(true);
    println!("\nExtrapolated lookups:");
    for counts in [0.0, 4095.0] {
        println!("  {:>6.0} counts  ->  {:>7.2}°C", counts, ntc.interpol(counts));
    }
    ntc.set_extrapolate(false);

    // same curve on a 0..3.3 V input, reporting Fahrenheit
    ntc.rescale_x(0.0, 3.3);
    ntc.rescale_y(-4.0, 212.0);
    println!("\nAfter rescaling to volts and °F:");
    for (volts, fahrenheit) in ntc.points() {
        println!("  {:>5.3} V  ->  {:>7.2}°F", volts, fahrenheit);
    }

    // more points than the table holds
    let long: Vec<f32> = (0..10).map(|i| i as f32).collect();
    match SampleTable::<f32, 8>::try_new(&long, &long, false) {
        Ok(_) => println!("\nUnexpectedly accepted"),
        Err(e) => println!("\nRejected oversized calibration: {:?}", e),
    }

    Ok(())
}
