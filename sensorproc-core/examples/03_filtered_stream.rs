//! Filtered Stream Example
//!
//! A tick loop polling a pressure sensor through a calibration table and a
//! value filter, using the non-blocking [`Stream`] interface.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 03_filtered_stream
//! ```

use sensorproc_core::{
    time::MockTimeSource, FilterConfig, FilteredStream, SampleTable, SliceStream, Stream,
    StreamError,
};

fn main() {
    println!("sensorproc Filtered Stream Example");
    println!("==================================\n");

    // ADC counts against kPa for a ratiometric pressure sensor
    let calibration: SampleTable<f64, 4> = SampleTable::new(
        &[410.0, 1230.0, 2870.0, 3690.0],
        &[20.0, 70.0, 170.0, 220.0],
        false,
    );

    let raw_counts = [
        1230.0, 1232.0, 1229.0, 1231.0, 1400.0, 1650.0, 1655.0, 1652.0, 1651.0, 1653.0,
    ];
    let kpa: Vec<f64> = raw_counts.iter().map(|&c| calibration.interpol(c)).collect();

    let clock = MockTimeSource::new(0);
    let mut stream = FilteredStream::new(
        SliceStream::new(&kpa),
        FilterConfig::new(3, 30, 0.5),
        &clock,
    );

    let mut tick = 0;
    loop {
        tick += 1;
        clock.advance_secs(5);
        match stream.poll_next() {
            Ok(pressure) => println!("  tick {:>2}: publish {:>7.2} kPa", tick, pressure),
            Err(nb::Error::WouldBlock) => println!("  tick {:>2}: -", tick),
            Err(nb::Error::Other(StreamError::EndOfStream)) => break,
            Err(nb::Error::Other(StreamError::Transport(e))) => match e {},
        }
    }

    println!(
        "\nLast published: {:.2} kPa after {} samples in the mean",
        stream.filter().last_emitted_or_invalid(),
        stream.filter().sample_count()
    );
}
