//! Core types for rolling-window anomaly detection
//!
//! This crate holds the pieces every detector shares:
//!
//! - [`Error`] / [`Result`]: the workspace-wide error type
//! - [`Numeric`]: reading types and the float their statistics use
//! - [`Window`] and [`RollingWindow`]: ordered views of the trailing readings
//! - [`WindowStats`]: mean, population standard deviation and z-scores
//!
//! # Example
//!
//! ```rust
//! use anomaly_core::{RollingWindow, WindowStats, ZeroVariancePolicy};
//!
//! let mut window = RollingWindow::new(5).unwrap();
//! window.extend([0.0, 0.0, 0.0, 0.0, 5.0]);
//!
//! let stats = WindowStats::from_window(&window).unwrap();
//! assert_eq!(stats.mean, 1.0);
//! assert_eq!(stats.z_score(5.0, ZeroVariancePolicy::default()), 2.0);
//! ```

pub mod error;
pub mod numeric;
pub mod stats;
pub mod window;

pub use error::{check_threshold, Error, Result};
pub use numeric::Numeric;
pub use stats::{WindowStats, ZeroVariancePolicy};
pub use window::{RollingWindow, Window};
