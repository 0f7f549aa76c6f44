//! Numeric traits shared by the filter and the table
//!
//! Keep them small - embedded callers only need conversions and the four
//! arithmetic operators.

use core::fmt::Debug;
use core::ops::{Add, Div, Mul, Sub};

/// A sensor reading the value filter can smooth
///
/// The filter runs one algorithm on `f64`. Readings of other types convert in
/// before the update and back out only when a new value is reported, so an
/// integer ADC count and a float temperature follow the same rules.
///
/// Integer conversions truncate toward zero and saturate at the type bounds
/// (NaN becomes zero), matching Rust's `as` casts.
pub trait Reading: Copy {
    /// Widen to the filter's working type
    fn to_f64(self) -> f64;

    /// Narrow a smoothed value back to the reading type
    fn from_f64(value: f64) -> Self;
}

impl Reading for f64 {
    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }
}

macro_rules! impl_reading_cast {
    ($($t:ty),* $(,)?) => {
        $(
            impl Reading for $t {
                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn from_f64(value: f64) -> Self {
                    value as $t
                }
            }
        )*
    };
}

impl_reading_cast!(f32, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

// Fixed-point sensor registers (e.g. Q16.16 pressure, Q20.12 temperature)
#[cfg(feature = "fixed")]
macro_rules! impl_reading_fixed {
    ($($t:ty),* $(,)?) => {
        $(
            impl Reading for $t {
                #[inline]
                fn to_f64(self) -> f64 {
                    self.to_num::<f64>()
                }

                #[inline]
                fn from_f64(value: f64) -> Self {
                    <$t>::saturating_from_num(value)
                }
            }
        )*
    };
}

#[cfg(feature = "fixed")]
impl_reading_fixed!(
    fixed::types::I16F16,
    fixed::types::I20F12,
    fixed::types::U16F16,
    fixed::types::I8F8,
);

/// Element type of a [`SampleTable`](crate::SampleTable)
///
/// Implemented for `f32` and `f64`. `Default` must be zero.
pub trait TableFloat:
    Copy
    + Debug
    + Default
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    /// Additive identity
    const ZERO: Self;

    /// Multiplicative identity
    const ONE: Self;
}

impl TableFloat for f32 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
}

impl TableFloat for f64 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
}
