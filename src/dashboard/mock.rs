//! Mock time-series generator
//!
//! Produces 24 hourly samples of request and error counts ending one hour
//! before the render instant. Values are redrawn on every render unless the
//! source is seeded.

use chrono::{Duration, NaiveDateTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Number of hourly samples per series
pub const SERIES_LEN: usize = 24;

/// Uniform range of the base request count per hour
pub const REQUESTS_RANGE: Range<u32> = 1500..3000;

/// Upward trend added across the series, from 0 at the oldest point
pub const REQUESTS_TREND: f64 = 500.0;

/// Uniform range of the error count per hour
pub const ERRORS_RANGE: Range<u32> = 5..30;

/// Three parallel sequences of equal length; timestamps are local wall-clock time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeSeries {
    pub timestamps: Vec<NaiveDateTime>,
    pub requests: Vec<f64>,
    pub errors: Vec<u32>,
}

impl TimeSeries {
    /// Generate a fresh series ending one hour before `now`
    ///
    /// All request counts are drawn before all error counts, so a seeded
    /// source yields the same series regardless of how it is consumed later.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, now: NaiveDateTime) -> Self {
        let timestamps: Vec<NaiveDateTime> = (1..=SERIES_LEN as i64)
            .rev()
            .map(|hours_ago| now - Duration::hours(hours_ago))
            .collect();

        let trend = linspace(0.0, REQUESTS_TREND, SERIES_LEN);
        let requests: Vec<f64> = trend
            .into_iter()
            .map(|offset| f64::from(rng.gen_range(REQUESTS_RANGE)) + offset)
            .collect();

        let errors: Vec<u32> = (0..SERIES_LEN)
            .map(|_| rng.gen_range(ERRORS_RANGE))
            .collect();

        Self {
            timestamps,
            requests,
            errors,
        }
    }
}

/// `n` evenly spaced values from `start` to `end`, both inclusive
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Where a render cycle gets its randomness
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MockSource {
    /// Freshly seeded from the OS on every render
    #[default]
    Entropy,
    /// Same seed on every render, so every render draws identical data
    Seeded(u64),
}

impl MockSource {
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map(MockSource::Seeded).unwrap_or_default()
    }

    /// A generator for one render cycle
    pub fn rng(&self) -> StdRng {
        match self {
            MockSource::Entropy => StdRng::from_entropy(),
            MockSource::Seeded(seed) => StdRng::seed_from_u64(*seed),
        }
    }
}
