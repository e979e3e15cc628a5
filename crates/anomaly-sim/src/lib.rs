//! Simulated voltage feeds for exercising anomaly detectors
//!
//! ```rust
//! use anomaly_sim::{SimulationParameters, VoltageSimulator};
//!
//! let year: Vec<f64> = VoltageSimulator::from_seed(SimulationParameters::daily(), 42)
//!     .unwrap()
//!     .stream(365)
//!     .collect();
//! assert_eq!(year.len(), 365);
//! ```

pub mod simulator;

pub use simulator::{SimulatedReading, SimulationParameters, VoltageSimulator};
