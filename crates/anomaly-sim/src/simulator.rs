//! Voltage stream simulation
//!
//! Readings are a nominal level plus uniform noise; with a small probability
//! a reading also gets a uniform spike of up to `anomaly_magnitude` in either
//! direction. The random source is injected so runs are reproducible.

use anomaly_core::{check_threshold, Error, Result};
use rand::distributions::{Distribution, Uniform};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Shape of the simulated signal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParameters {
    /// Level the signal fluctuates around, in volts
    pub nominal: f64,
    /// Half-width of the uniform noise band
    pub fluctuation: f64,
    /// Probability that a reading carries a spike
    pub anomaly_chance: f64,
    /// Half-width of the uniform spike added on top of the noise
    pub anomaly_magnitude: f64,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self::daily()
    }
}

impl SimulationParameters {
    /// One reading per day over a year of generator output
    pub fn daily() -> Self {
        Self {
            nominal: 230.0,
            fluctuation: 5.0,
            anomaly_chance: 0.05,
            anomaly_magnitude: 50.0,
        }
    }

    /// One reading per second from a live feed; spikes are twice as common
    pub fn realtime() -> Self {
        Self {
            anomaly_chance: 0.1,
            ..Self::daily()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.nominal.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "nominal level must be finite, got {}",
                self.nominal
            )));
        }
        check_threshold("fluctuation", self.fluctuation)?;
        check_threshold("anomaly_magnitude", self.anomaly_magnitude)?;
        if !(0.0..=1.0).contains(&self.anomaly_chance) {
            return Err(Error::invalid_probability("anomaly_chance", self.anomaly_chance));
        }
        Ok(())
    }
}

/// A simulated reading with its ground truth
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatedReading {
    /// Position in the stream (day or second)
    pub index: usize,
    pub value: f64,
    /// Whether a spike was injected into this reading
    pub injected: bool,
}

/// Infinite iterator of simulated readings driven by an injected generator
///
/// Use [`Iterator::take`], [`VoltageSimulator::stream`] or
/// [`VoltageSimulator::labeled_stream`] for a finite run.
#[derive(Debug, Clone)]
pub struct VoltageSimulator<R: Rng> {
    params: SimulationParameters,
    rng: R,
    noise: Uniform<f64>,
    spike: Uniform<f64>,
    next_index: usize,
}

impl<R: Rng> VoltageSimulator<R> {
    pub fn new(params: SimulationParameters, rng: R) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            noise: Uniform::new_inclusive(-params.fluctuation, params.fluctuation),
            spike: Uniform::new_inclusive(-params.anomaly_magnitude, params.anomaly_magnitude),
            params,
            rng,
            next_index: 0,
        })
    }

    pub fn parameters(&self) -> &SimulationParameters {
        &self.params
    }

    /// Generate the next reading
    pub fn next_reading(&mut self) -> SimulatedReading {
        let index = self.next_index;
        self.next_index += 1;

        let mut value = self.params.nominal + self.noise.sample(&mut self.rng);
        let injected = self.rng.gen_bool(self.params.anomaly_chance);
        if injected {
            let spike = self.spike.sample(&mut self.rng);
            trace!(index, spike, "spike injected");
            value += spike;
        }

        SimulatedReading {
            index,
            value,
            injected,
        }
    }

    /// A finite, lazy stream of `len` voltage values
    pub fn stream(self, len: usize) -> impl Iterator<Item = f64> {
        self.take(len).map(|reading| reading.value)
    }

    /// A finite, lazy stream of `len` readings with ground truth
    pub fn labeled_stream(self, len: usize) -> impl Iterator<Item = SimulatedReading> {
        self.take(len)
    }
}

impl VoltageSimulator<ChaCha8Rng> {
    /// Deterministic simulator seeded from `seed`
    pub fn from_seed(params: SimulationParameters, seed: u64) -> Result<Self> {
        Self::new(params, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Iterator for VoltageSimulator<R> {
    type Item = SimulatedReading;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_reading())
    }
}
