#![deny(clippy::all)]
#![deny(unused_must_use)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

use std::{path::PathBuf, str::FromStr};

use anyhow::{Context, ensure};
use serde::Serialize;
use sorting::{counting_sort, introsort};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{dataset::Datasets, report::Report};

mod dataset;
mod measure;
mod report;

const DEFAULT_LOG_FILTER: &str = "sorting=info,sorting_bench=info";
const HEX_UPPER_BOUND: usize = 0x10;

#[derive(Debug, Serialize)]
struct Config {
    array_size: usize,
    iterations: u32,
    seed: u64,
    ring_capacity: usize,
    report_path: Option<PathBuf>,
}

impl Config {
    fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let config = Self {
            array_size: var_or("BENCH_ARRAY_SIZE", 1 << 16)?,
            iterations: var_or("BENCH_ITERATIONS", 100)?,
            seed: var_or("BENCH_SEED", 128)?,
            ring_capacity: var_or("BENCH_RING_CAPACITY", 1 << 16)?,
            report_path: dotenv::var("BENCH_REPORT_PATH").ok().map(PathBuf::from),
        };

        ensure!(config.array_size > 0, "BENCH_ARRAY_SIZE must be positive");
        ensure!(config.iterations > 0, "BENCH_ITERATIONS must be positive");

        Ok(config)
    }
}

/// Parses `key` from the environment, falling back to `default` when unset
fn var_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    dotenv::var(key).map_or(Ok(default), |raw| {
        raw.parse().with_context(|| format!("invalid {key}: {raw:?}"))
    })
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from(DEFAULT_LOG_FILTER)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("failed to load env vars")?;
    info!(?config, "starting benchmarks");

    let datasets = Datasets::generate(config.array_size, config.seed);
    let iterations = config.iterations;

    let mut measurements = vec![measure::sort(
        "counting_sort",
        Datasets::HEXADECIMAL_DIGITS,
        &datasets.hexadecimal_digits,
        iterations,
        |arr| counting_sort(arr, HEX_UPPER_BOUND),
    )?];

    measurements.push(measure::sort(
        "builtin",
        Datasets::HEXADECIMAL_DIGITS,
        &datasets.hexadecimal_digits,
        iterations,
        <[usize]>::sort,
    )?);
    measurements.push(measure::sort(
        "sort",
        Datasets::HEXADECIMAL_DIGITS,
        &datasets.hexadecimal_digits,
        iterations,
        introsort,
    )?);

    for (dataset, data) in datasets.floats() {
        measurements.push(measure::sort(
            "builtin",
            dataset,
            data,
            iterations,
            |arr: &mut [f64]| arr.sort_by(f64::total_cmp),
        )?);
        measurements.push(measure::sort("sort", dataset, data, iterations, introsort)?);
    }

    measurements.push(measure::ring_buffer(config.ring_capacity, iterations)?);
    measurements.push(measure::vec_deque(config.ring_capacity, iterations));

    if let Some(path) = &config.report_path {
        Report::new(&config, &measurements).write_to(path)?;
    }

    info!(count = measurements.len(), "finished benchmarks");

    Ok(())
}
