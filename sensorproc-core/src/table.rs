//! Piecewise-Linear Sample Tables
//!
//! ## Motivation
//!
//! Many sensors ship with a calibration curve given as a handful of points:
//! thermistor resistance against temperature, ADC counts against pressure,
//! battery voltage against state of charge. Between the points a straight
//! line is good enough, and a table lookup costs a few comparisons instead
//! of evaluating a fitted polynomial or a logarithm on an FPU-less core.
//!
//! ## Table Construction
//!
//! The input points are filtered in order so the stored table is a proper
//! function with a proper inverse direction:
//!
//! ```text
//! for each (x, y) after the first accepted point:
//!   x <= last accepted x          -> dropped (x must strictly increase)
//!   y == last accepted y          -> dropped (no flat segments)
//!   second accepted point         -> fixes direction (rising / falling)
//!   y moves against the direction -> dropped
//! ```
//!
//! Dropping is silent; check [`SampleTable::len`] if every point matters, or
//! use [`SampleTable::try_new`] to catch slice-level mistakes.
//!
//! ## Lookup
//!
//! ```text
//!        y
//!   10.8 ┤•  extrapolated (first segment slope)
//!    9.0 ┤ ●
//!        │  ╲
//!    3.0 ┤   ●───●  2.8
//!        │        ╲
//!    1.0 ┤         ●
//!   0.64 ┤           •  extrapolated (last segment slope)
//!        └─┬─┬───┬───┬─┬── x
//!        -0.3 0  1   2  3 3.2
//! ```
//!
//! Inside the sampled range the bracketing segment is found by binary search
//! and interpolated. Outside, the table either clamps to the boundary value
//! or extends the first/last segment, depending on `extrapolate`.
//!
//! ```rust
//! use sensorproc_core::SampleTable;
//!
//! let table: SampleTable<f32, 4> =
//!     SampleTable::new(&[0.0, 1.0, 2.0, 3.0], &[9.0, 3.0, 2.8, 1.0], true);
//!
//! assert!((table.interpol(-0.3) - 10.8).abs() < 1e-4);
//! assert!((table.interpol(1.5) - 2.9).abs() < 1e-4);
//! assert!((table.interpol(3.2) - 0.64).abs() < 1e-4);
//! ```

use crate::{
    constants::table::DEFAULT_TABLE_CAPACITY,
    errors::{TableError, TableResult},
    traits::TableFloat,
};
use heapless::Vec;

/// Piecewise-linear function defined by up to `N` sample points
///
/// x values are strictly increasing and y values strictly monotonic in one
/// direction. The only mutation after construction is axis rescaling.
#[derive(Debug, Clone)]
pub struct SampleTable<T = f64, const N: usize = { DEFAULT_TABLE_CAPACITY }> {
    x: Vec<T, N>,
    y: Vec<T, N>,
    min_x: T,
    max_x: T,
    min_y: T,
    max_y: T,
    /// y rises with x; fixed by the first two accepted points
    rising: bool,
    extrapolate: bool,
}

impl<T: TableFloat, const N: usize> SampleTable<T, N> {
    /// Build a table from parallel x/y slices
    ///
    /// Uses as many pairs as the shorter slice provides. Points that break
    /// strict monotonicity are dropped; points beyond capacity `N` are
    /// dropped with a warning.
    pub fn new(xs: &[T], ys: &[T], extrapolate: bool) -> Self {
        Self::from_parts(xs, ys, xs.len().min(ys.len()), extrapolate)
    }

    /// Build a table from the first `count` pairs of `xs` and `ys`
    ///
    /// `count` is clamped to the slice lengths.
    pub fn from_parts(xs: &[T], ys: &[T], count: usize, extrapolate: bool) -> Self {
        let count = count.min(xs.len()).min(ys.len());
        let mut table = Self::empty(extrapolate);
        let mut dropped = 0usize;

        for (i, (&x, &y)) in xs[..count].iter().zip(&ys[..count]).enumerate() {
            if table.x.is_full() {
                log_warn!(
                    "Sample table: capacity {} reached, ignoring {} remaining points",
                    N,
                    count - i
                );
                break;
            }
            if !table.accepts(x, y) {
                dropped += 1;
                continue;
            }
            table.push(x, y);
        }

        if dropped > 0 {
            log_debug!(
                "Sample table: dropped {} of {} points breaking monotonicity",
                dropped,
                count
            );
        }

        table
    }

    /// Build a table, rejecting mismatched slices and capacity overflow
    ///
    /// Monotonicity filtering still applies to the individual points.
    pub fn try_new(xs: &[T], ys: &[T], extrapolate: bool) -> TableResult<Self> {
        if xs.len() != ys.len() {
            return Err(TableError::LengthMismatch {
                xs: xs.len(),
                ys: ys.len(),
            });
        }
        if xs.len() > N {
            return Err(TableError::CapacityExceeded {
                count: xs.len(),
                capacity: N,
            });
        }
        Ok(Self::new(xs, ys, extrapolate))
    }

    fn empty(extrapolate: bool) -> Self {
        Self {
            x: Vec::new(),
            y: Vec::new(),
            min_x: T::ZERO,
            max_x: T::ZERO,
            min_y: T::ZERO,
            max_y: T::ZERO,
            rising: true,
            extrapolate,
        }
    }

    /// Whether `(x, y)` may follow the points accepted so far
    fn accepts(&mut self, x: T, y: T) -> bool {
        let (Some(&last_x), Some(&last_y)) = (self.x.last(), self.y.last()) else {
            return true;
        };
        if !(x > last_x) || y == last_y {
            return false;
        }
        let rising = y > last_y;
        if self.x.len() == 1 {
            self.rising = rising;
        }
        rising == self.rising
    }

    fn push(&mut self, x: T, y: T) {
        let first = self.x.is_empty();
        // Capacity checked by the caller; x and y always have equal length
        if self.x.push(x).is_err() || self.y.push(y).is_err() {
            return;
        }
        if first || x < self.min_x {
            self.min_x = x;
        }
        if first || x > self.max_x {
            self.max_x = x;
        }
        if first || y < self.min_y {
            self.min_y = y;
        }
        if first || y > self.max_y {
            self.max_y = y;
        }
    }

    /// Index `n` of the segment `[x[n], x[n + 1]]` that should contain `x`
    ///
    /// Outside the sampled range this is the nearest boundary segment.
    pub fn search(&self, x: T) -> usize {
        search(&self.x, x)
    }

    /// Approximate f(x)
    ///
    /// - empty table: 0
    /// - single point: that point's y, everywhere
    /// - outside `[min_x, max_x]`: boundary y, or the first/last segment
    ///   extended when extrapolating
    /// - at a sample x: exactly the stored y
    pub fn interpol(&self, x: T) -> T {
        let len = self.x.len();
        match len {
            0 => return T::ZERO,
            1 => return self.y[0],
            _ => {}
        }
        let last = len - 1;

        if x < self.min_x {
            return if self.extrapolate {
                self.segment(0, x)
            } else {
                self.y[0]
            };
        }
        if x > self.max_x {
            return if self.extrapolate {
                self.segment(last - 1, x)
            } else {
                self.y[last]
            };
        }

        let n = self.search(x);
        if x == self.x[n] {
            return self.y[n];
        }
        if x == self.x[n + 1] {
            return self.y[n + 1];
        }
        self.segment(n, x)
    }

    /// Alias of [`interpol`](Self::interpol)
    #[inline]
    pub fn eval(&self, x: T) -> T {
        self.interpol(x)
    }

    /// Borrow the table as a plain function
    ///
    /// ```rust
    /// use sensorproc_core::SampleTable;
    ///
    /// let table: SampleTable<f64, 2> = SampleTable::new(&[0.0, 10.0], &[0.0, 100.0], false);
    /// let f = table.as_fn();
    /// let ys: Vec<f64> = [2.5, 5.0].into_iter().map(f).collect();
    /// assert_eq!(ys, [25.0, 50.0]);
    /// ```
    pub fn as_fn(&self) -> impl Fn(T) -> T + '_ {
        move |x| self.interpol(x)
    }

    /// Evaluate the line through points `n` and `n + 1` at `x`
    fn segment(&self, n: usize, x: T) -> T {
        let (x0, x1) = (self.x[n], self.x[n + 1]);
        let (y0, y1) = (self.y[n], self.y[n + 1]);
        let dx = x1 - x0;
        // Only reachable after rescaling the x axis onto a single point
        if dx == T::ZERO {
            return y0;
        }
        y0 + (y1 - y0) / dx * (x - x0)
    }

    /// Linearly remap the x axis onto `[new_min, new_max]`
    ///
    /// `new_min > new_max` mirrors the table; the points are reordered so x
    /// keeps increasing and the y direction flips.
    pub fn rescale_x(&mut self, new_min: T, new_max: T) {
        if self.x.is_empty() {
            return;
        }
        rescale(&mut self.x, self.min_x, self.max_x, new_min, new_max);
        if new_min > new_max {
            self.x.reverse();
            self.y.reverse();
            self.rising = !self.rising;
        }
        let (lo, hi) = ordered(new_min, new_max);
        if self.x.len() > 1 {
            let last = self.x.len() - 1;
            self.x[0] = lo;
            self.x[last] = hi;
            self.min_x = lo;
            self.max_x = hi;
        } else {
            self.min_x = self.x[0];
            self.max_x = self.x[0];
        }
    }

    /// Linearly remap the y axis onto `[new_min, new_max]`
    ///
    /// `new_min > new_max` flips the direction of the table.
    pub fn rescale_y(&mut self, new_min: T, new_max: T) {
        if self.y.is_empty() {
            return;
        }
        rescale(&mut self.y, self.min_y, self.max_y, new_min, new_max);
        if new_min > new_max {
            self.rising = !self.rising;
        }
        let (lo, hi) = ordered(new_min, new_max);
        if self.y.len() > 1 {
            let last = self.y.len() - 1;
            let (first_y, last_y) = if self.rising { (lo, hi) } else { (hi, lo) };
            self.y[0] = first_y;
            self.y[last] = last_y;
            self.min_y = lo;
            self.max_y = hi;
        } else {
            self.min_y = self.y[0];
            self.max_y = self.y[0];
        }
    }

    /// Number of accepted points
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// True if no point was accepted
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Accepted x values, strictly increasing
    pub fn xs(&self) -> &[T] {
        &self.x
    }

    /// Accepted y values, parallel to [`xs`](Self::xs)
    pub fn ys(&self) -> &[T] {
        &self.y
    }

    /// Accepted points in x order
    pub fn points(&self) -> impl Iterator<Item = (T, T)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// `(min_x, max_x)` of the accepted points
    pub fn x_range(&self) -> (T, T) {
        (self.min_x, self.max_x)
    }

    /// `(min_y, max_y)` of the accepted points
    pub fn y_range(&self) -> (T, T) {
        (self.min_y, self.max_y)
    }

    /// True if y rises with x (also for tables with fewer than two points)
    pub fn is_rising(&self) -> bool {
        self.rising
    }

    /// Whether lookups outside the range extend the boundary segments
    pub fn extrapolates(&self) -> bool {
        self.extrapolate
    }

    /// Switch between extrapolation and clamping
    pub fn set_extrapolate(&mut self, extrapolate: bool) {
        self.extrapolate = extrapolate;
    }

    /// Same as [`min_of`]
    pub fn min(values: &[T]) -> T {
        min_of(values)
    }

    /// Same as [`max_of`]
    pub fn max(values: &[T]) -> T {
        max_of(values)
    }
}

fn ordered<T: TableFloat>(a: T, b: T) -> (T, T) {
    if a > b {
        (b, a)
    } else {
        (a, b)
    }
}

/// Affine remap of `values` from `[min, max]` onto `[new_min, new_max]`
///
/// With fewer than two values or `min == max` there is no span to scale, so
/// the values are only shifted.
fn rescale<T: TableFloat>(values: &mut [T], min: T, max: T, new_min: T, new_max: T) {
    let span = if values.len() < 2 || min == max {
        T::ONE
    } else {
        max - min
    };
    let new_span = new_max - new_min;
    for value in values.iter_mut() {
        *value = (*value - min) / span * new_span + new_min;
    }
}

/// Largest index `n` with `values[n] <= x`, capped to `len - 2`
///
/// `values` must be strictly increasing. Below the first value this is 0,
/// above the last it is `len - 2`, so `[n, n + 1]` is always a valid
/// segment for two or more values. Returns 0 for shorter slices.
pub fn search<T: TableFloat>(values: &[T], x: T) -> usize {
    if values.len() < 2 {
        return 0;
    }
    let (mut a, mut b) = (0, values.len() - 1);
    while b - a > 1 {
        let n = (a + b) / 2;
        if values[n] == x {
            return n;
        }
        if x > values[n] {
            a = n;
        } else {
            b = n;
        }
    }
    a
}

/// Smallest value of `values`, or zero (`T::default()`) if empty
pub fn min_of<T: Copy + PartialOrd + Default>(values: &[T]) -> T {
    values
        .iter()
        .copied()
        .reduce(|min, v| if v < min { v } else { min })
        .unwrap_or_default()
}

/// Largest value of `values`, or zero (`T::default()`) if empty
pub fn max_of<T: Copy + PartialOrd + Default>(values: &[T]) -> T {
    values
        .iter()
        .copied()
        .reduce(|max, v| if v > max { v } else { max })
        .unwrap_or_default()
}
