//! Integration tests for polling filtered sensor streams
//!
//! Simulates a scheduler tick loop pulling from a bus-backed sensor that is
//! sometimes busy and sometimes fails.

mod common;

use std::collections::VecDeque;

use sensorproc_core::{
    time::MockTimeSource, FilterConfig, FilteredStream, SampleTable, SliceStream, Stream,
    StreamError, ValueFilter,
};

#[derive(Debug, Clone, Copy, PartialEq)]
enum BusError {
    Nack,
}

#[derive(Debug, Clone, Copy)]
enum Tick {
    Busy,
    Fail,
    Sample(f64),
}

/// Scripted sensor that advances a shared clock by one second per poll
struct ScriptedSensor<'a> {
    script: VecDeque<Tick>,
    clock: &'a MockTimeSource,
}

impl<'a> ScriptedSensor<'a> {
    fn new(script: &[Tick], clock: &'a MockTimeSource) -> Self {
        Self {
            script: script.iter().copied().collect(),
            clock,
        }
    }
}

impl Stream for ScriptedSensor<'_> {
    type Item = f64;
    type Error = StreamError<BusError>;

    fn poll_next(&mut self) -> nb::Result<f64, Self::Error> {
        self.clock.advance_secs(1);
        match self.script.pop_front() {
            None => Err(nb::Error::Other(StreamError::EndOfStream)),
            Some(Tick::Busy) => Err(nb::Error::WouldBlock),
            Some(Tick::Fail) => Err(nb::Error::Other(StreamError::Transport(BusError::Nack))),
            Some(Tick::Sample(v)) => Ok(v),
        }
    }
}

#[derive(Debug, Default, PartialEq)]
struct TickLog {
    reported: Vec<f64>,
    idle: usize,
    faults: usize,
}

fn run_until_end<S>(stream: &mut S) -> TickLog
where
    S: Stream<Item = f64, Error = StreamError<BusError>>,
{
    let mut log = TickLog::default();
    loop {
        match stream.poll_next() {
            Ok(v) => log.reported.push(v),
            Err(nb::Error::WouldBlock) => log.idle += 1,
            Err(nb::Error::Other(StreamError::Transport(_))) => log.faults += 1,
            Err(nb::Error::Other(StreamError::EndOfStream)) => break,
        }
    }
    log
}

#[test]
fn busy_ticks_and_faults_pass_through_the_filter() {
    let clock = MockTimeSource::new(0);
    let script = [
        Tick::Sample(21.0),
        Tick::Busy,
        Tick::Sample(21.02),
        Tick::Fail,
        Tick::Sample(21.01),
        Tick::Busy,
        Tick::Sample(30.0),
    ];
    let mut stream = FilteredStream::new(
        ScriptedSensor::new(&script, &clock),
        FilterConfig::new(3, 0, 0.5),
        &clock,
    );

    let log = run_until_end(&mut stream);

    assert_eq!(log.faults, 1);
    // two busy ticks plus two suppressed readings
    assert_eq!(log.idle, 4);
    assert_eq!(log.reported.len(), 2);
    assert_eq!(log.reported[0], 21.0);
    // faults and busy ticks never reach the mean
    assert_eq!(stream.filter().sample_count(), 3);
    assert!(log.reported[1] > 21.5 && log.reported[1] < 30.0);
}

#[test]
fn heartbeat_reports_steady_sensor_between_changes() {
    let clock = MockTimeSource::new(0);
    let script: Vec<Tick> = (0..25).map(|_| Tick::Sample(5.0)).collect();
    let mut stream = FilteredStream::new(
        ScriptedSensor::new(&script, &clock),
        FilterConfig::new(5, 10, 0.1),
        &clock,
    );

    let log = run_until_end(&mut stream);

    // filter created at t=0, samples at t=1..25: first at 1, heartbeats at 12, 23
    assert_eq!(log.reported, vec![5.0, 5.0, 5.0]);
    assert_eq!(log.idle, 22);
}

#[test]
fn reset_through_the_adapter_restarts_reporting() {
    let clock = MockTimeSource::new(0);
    let raw = [3.0, 3.0, 3.0];
    let mut stream = FilteredStream::new(SliceStream::new(&raw), FilterConfig::default(), &clock);

    assert_eq!(stream.poll_next(), Ok(3.0));
    assert_eq!(stream.poll_next(), Err(nb::Error::WouldBlock));

    stream.filter_mut().reset();
    assert_eq!(stream.poll_next(), Ok(3.0));

    stream.inner_mut().reset();
    assert_eq!(stream.poll_next(), Err(nb::Error::WouldBlock));
}

#[test]
fn shared_filter_and_calibration_pipeline() {
    // raw ADC counts -> calibrated °C -> filtered reports
    let ntc: SampleTable = SampleTable::new(&common::NTC_COUNTS, &common::NTC_TEMP_C, false);
    let counts = [1650.0, 1652.0, 1649.0, 2400.0, 2400.0];
    let celsius: Vec<f64> = counts.iter().map(|&c| ntc.interpol(c)).collect();

    let clock = MockTimeSource::new(0);
    let filter = ValueFilter::new(FilterConfig::new(1, 0, 1.0), &clock);
    let mut stream = FilteredStream::with_filter(SliceStream::new(&celsius), filter);

    let mut reported = Vec::new();
    loop {
        match stream.poll_next() {
            Ok(t) => reported.push(t),
            Err(nb::Error::WouldBlock) => {}
            Err(nb::Error::Other(_)) => break,
        }
    }

    assert_eq!(reported[0], 40.0);
    // 2400 counts is 20 °C; the mean halves the gap each sample
    assert_eq!(reported.len(), 3);
    assert!(reported[1] > 20.0 && reported[1] < 40.0);
    assert!(reported[2] < reported[1]);
}
