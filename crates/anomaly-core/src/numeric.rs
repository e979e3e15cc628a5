//! Numeric trait for readings
//!
//! Readings can be stored in any primitive numeric type while statistics are
//! always computed in an associated floating point type, so integer sensors
//! (millivolt counters, ADC codes) go through the same code path as `f64`.

use num_traits::{Float, FromPrimitive};
use std::fmt::Debug;

/// A reading type with an associated float used for statistics
pub trait Numeric: Copy + PartialOrd + Debug + Send + Sync + 'static {
    /// Float type in which mean, spread and scores are expressed
    type Float: Float + FromPrimitive + Debug + Send + Sync + 'static;

    /// Convert the reading to its statistics type
    fn to_float(self) -> Self::Float;

    /// Whether the reading is a finite number
    #[inline]
    fn is_finite(self) -> bool {
        self.to_float().is_finite()
    }
}

macro_rules! impl_numeric {
    ($t:ty => $f:ty) => {
        impl Numeric for $t {
            type Float = $f;

            #[inline]
            fn to_float(self) -> $f {
                self as $f
            }
        }
    };
}

impl_numeric!(f64 => f64);
impl_numeric!(f32 => f32);
impl_numeric!(i64 => f64);
impl_numeric!(i32 => f64);
impl_numeric!(u32 => f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_conversion() {
        assert_eq!(230.5f64.to_float(), 230.5);
        assert_eq!(230.5f32.to_float(), 230.5f32);
        assert_eq!(230i32.to_float(), 230.0f64);
        assert_eq!((-7i64).to_float(), -7.0f64);
        assert_eq!(12u32.to_float(), 12.0f64);
    }

    #[test]
    fn test_finiteness() {
        assert!(Numeric::is_finite(1.0f64));
        assert!(!Numeric::is_finite(f64::NAN));
        assert!(!Numeric::is_finite(f32::INFINITY));
        assert!(Numeric::is_finite(i32::MAX));
    }
}
