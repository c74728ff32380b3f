//! # Traits
//!
//! Element types that can be reconstructed from sparse sensor samples.

use num_complex::Complex;
use num_traits::Float;

/// A value that can fill a dense array built from a sparse point cloud.
///
/// Cells that no sample lands on hold [`missing`](SampleValue::missing), and two
/// samples landing on one cell are only accepted when they are
/// [`identical`](SampleValue::identical).
pub trait SampleValue: Copy {
    /// marker for a cell without any sample
    fn missing() -> Self;

    /// bitwise equality, so that two NaN samples compare equal
    fn identical(&self, other: &Self) -> bool;
}

impl SampleValue for f32 {
    fn missing() -> Self {
        f32::NAN
    }

    fn identical(&self, other: &Self) -> bool {
        self.to_bits() == other.to_bits()
    }
}

impl SampleValue for f64 {
    fn missing() -> Self {
        f64::NAN
    }

    fn identical(&self, other: &Self) -> bool {
        self.to_bits() == other.to_bits()
    }
}

impl<T> SampleValue for Complex<T>
where
    T: Float + SampleValue,
{
    fn missing() -> Self {
        Complex::new(T::nan(), T::nan())
    }

    fn identical(&self, other: &Self) -> bool {
        self.re.identical(&other.re) && self.im.identical(&other.im)
    }
}
