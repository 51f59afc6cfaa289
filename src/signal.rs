//! Module implementing the concept of a continuous signal sampled at discrete times.

use itertools::Itertools;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use rand_distr::Normal;
use serde::{Deserialize, Serialize};

use super::error::EtrError;

/// A time-value pair representing one sample of a continuous signal.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Sample {
    /// The time at which the signal is sampled.
    time: f64,
    /// The value of the signal at that time.
    value: f64,
}

impl Sample {
    /// Create a new sample with the specified parameters.
    pub fn new(time: f64, value: f64) -> Self {
        Sample { time, value }
    }

    /// Returns the time at which the signal is sampled.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Returns the value of the signal at that time.
    pub fn value(&self) -> f64 {
        self.value
    }
}

/// A scalar signal over a recording session, e.g., a fluorescence trace or a running speed,
/// as an ordered sequence of samples with strictly increasing timestamps.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Signal {
    samples: Vec<Sample>,
}

impl Signal {
    /// Create a signal from matching slices of timestamps and values.
    /// The function returns an error if the two slices differ in length,
    /// or if the timestamps are non-finite or not strictly increasing.
    pub fn build(times: &[f64], values: &[f64]) -> Result<Self, EtrError> {
        if times.len() != values.len() {
            return Err(EtrError::InvalidSignal(format!(
                "expected as many timestamps as values, got {} and {}",
                times.len(),
                values.len()
            )));
        }

        if let Some(t) = times.iter().find(|t| !t.is_finite()) {
            return Err(EtrError::InvalidSignal(format!(
                "timestamps must be finite, got {}",
                t
            )));
        }

        if let Some((t1, t2)) = times.iter().tuple_windows().find(|(t1, t2)| t1 >= t2) {
            return Err(EtrError::InvalidSignal(format!(
                "timestamps must be strictly increasing, got {} followed by {}",
                t1, t2
            )));
        }

        let samples = times
            .iter()
            .zip(values.iter())
            .map(|(&time, &value)| Sample { time, value })
            .collect();

        Ok(Signal { samples })
    }

    /// Returns the samples of the signal.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Returns the number of samples in the signal.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the signal contains no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns the timestamp of the first sample, if any.
    pub fn first_time(&self) -> Option<f64> {
        self.samples.first().map(|sample| sample.time)
    }

    /// Returns the timestamp of the last sample, if any.
    pub fn last_time(&self) -> Option<f64> {
        self.samples.last().map(|sample| sample.time)
    }

    /// Returns the value of the signal at the given time, using piecewise-linear
    /// interpolation between the two bracketing samples.
    /// A time matching a recorded timestamp returns that recorded value exactly,
    /// and both boundary timestamps are in range.
    /// A time strictly outside the recorded interval is missing, never extrapolated.
    pub fn value_at(&self, time: f64) -> Option<f64> {
        let first = self.samples.first()?;
        let last = self.samples.last()?;
        if !(time >= first.time && time <= last.time) {
            return None;
        }

        match self
            .samples
            .binary_search_by(|sample| sample.time.total_cmp(&time))
        {
            Ok(pos) => Some(self.samples[pos].value),
            Err(pos) => {
                // time lies strictly between the samples at pos - 1 and pos
                let left = &self.samples[pos - 1];
                let right = &self.samples[pos];
                let alpha = (time - left.time) / (right.time - left.time);
                Some(left.value + alpha * (right.value - left.value))
            }
        }
    }

    /// Samples a random signal over the prescribed duration.
    ///
    /// The timestamps are jittered around a regular grid, one per bin of width
    /// `duration / num_samples`, so they are always strictly increasing. The values
    /// follow a standard Gaussian random walk starting at zero.
    ///
    /// # Parameters
    /// - `num_samples`: The number of samples of the signal, at least 2.
    /// - `duration`: The duration of the signal, in seconds.
    /// - `rng`: A mutable reference to a random number generator implementing the `Rng` trait.
    ///
    /// # Returns
    /// A signal spanning `[0, duration)`.
    pub fn rand<R: Rng>(num_samples: usize, duration: f64, rng: &mut R) -> Result<Self, EtrError> {
        if num_samples < 2 {
            return Err(EtrError::InvalidParameters(format!(
                "a signal requires at least 2 samples, got {}",
                num_samples
            )));
        }

        if !(duration > 0.0 && duration.is_finite()) {
            return Err(EtrError::InvalidParameters(format!(
                "the duration must be positive and finite, got {}",
                duration
            )));
        }

        let dt = duration / num_samples as f64;
        let jitter = Uniform::new(0.0, 1.0);
        let times = (0..num_samples)
            .map(|i| (i as f64 + jitter.sample(rng)) * dt)
            .collect::<Vec<f64>>();

        let step =
            Normal::new(0.0, 1.0).map_err(|e| EtrError::InvalidParameters(e.to_string()))?;
        let mut values = Vec::with_capacity(num_samples);
        let mut value = 0.0;
        for _ in 0..num_samples {
            value += step.sample(rng);
            values.push(value);
        }

        Signal::build(&times, &values)
    }
}
