use std::{
    collections::VecDeque,
    hint::black_box,
    time::{Duration, Instant},
};

use anyhow::ensure;
use serde::Serialize;
use sorting::RingBuffer;
use tracing::info;

const RING_BUFFER_WORKLOAD: &str = "fill then drain";

#[derive(Debug, Serialize)]
pub struct Measurement {
    pub algorithm: &'static str,
    pub dataset: &'static str,
    pub iterations: u32,
    pub total_ms: f64,
    pub mean_us: f64,
}

impl Measurement {
    fn new(algorithm: &'static str, dataset: &'static str, iterations: u32, elapsed: Duration) -> Self {
        let measurement = Self {
            algorithm,
            dataset,
            iterations,
            total_ms: elapsed.as_secs_f64() * 1e3,
            mean_us: elapsed.as_secs_f64() * 1e6 / f64::from(iterations),
        };

        info!(
            algorithm,
            dataset,
            total_ms = measurement.total_ms,
            mean_us = measurement.mean_us,
            "measured"
        );

        measurement
    }
}

/// Times `sort_fn` over a fresh copy of `data` each iteration
///
/// Only the sort itself is timed. Every result is checked before the next
/// iteration starts.
pub fn sort<T, F>(
    algorithm: &'static str,
    dataset: &'static str,
    data: &[T],
    iterations: u32,
    mut sort_fn: F,
) -> anyhow::Result<Measurement>
where
    T: PartialOrd + Clone,
    F: FnMut(&mut [T]),
{
    let mut elapsed = Duration::ZERO;
    for _ in 0..iterations {
        let mut copy = data.to_vec();

        let start = Instant::now();
        sort_fn(black_box(copy.as_mut_slice()));
        elapsed += start.elapsed();

        ensure!(copy.is_sorted(), "{algorithm} left {dataset} unsorted");
    }

    Ok(Measurement::new(algorithm, dataset, iterations, elapsed))
}

pub fn ring_buffer(capacity: usize, iterations: u32) -> anyhow::Result<Measurement> {
    let mut buffer = RingBuffer::new(capacity)?;

    let start = Instant::now();
    for _ in 0..iterations {
        for i in 0..capacity {
            let _ = black_box(buffer.enqueue(i));
        }
        for _ in 0..capacity {
            let _ = black_box(buffer.dequeue());
        }
    }
    let elapsed = start.elapsed();

    ensure!(buffer.is_empty(), "ring buffer not drained");

    Ok(Measurement::new("RingBuffer", RING_BUFFER_WORKLOAD, iterations, elapsed))
}

/// Same workload as [`ring_buffer`] on the standard library deque
pub fn vec_deque(capacity: usize, iterations: u32) -> Measurement {
    let mut deque = VecDeque::with_capacity(capacity);

    let start = Instant::now();
    for _ in 0..iterations {
        for i in 0..capacity {
            deque.push_back(black_box(i));
        }
        for _ in 0..capacity {
            let _ = black_box(deque.pop_front());
        }
    }

    Measurement::new("VecDeque", RING_BUFFER_WORKLOAD, iterations, start.elapsed())
}
