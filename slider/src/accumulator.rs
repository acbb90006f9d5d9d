/// Bounded slider value.
///
/// Deltas are applied with a 64-bit intermediate and clamped into `[min, max]`, so the
/// value never overshoots or wraps regardless of how large a delta is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Accumulator {
    min: i32,
    max: i32,
    value: i32,
}

impl Accumulator {
    /// Create an accumulator holding `value`, clamped into `[min, max]`.
    ///
    /// `min` must be less than `max`; [`SliderConfig::validate`](crate::SliderConfig::validate)
    /// rejects anything else before a slider gets here.
    pub const fn new(min: i32, max: i32, value: i32) -> Self {
        debug_assert!(min < max);
        let value = if value < min {
            min
        } else if value > max {
            max
        } else {
            value
        };
        Self { min, max, value }
    }

    pub const fn value(&self) -> i32 {
        self.value
    }

    pub const fn min(&self) -> i32 {
        self.min
    }

    pub const fn max(&self) -> i32 {
        self.max
    }

    /// Apply `delta` and return the new value if it actually changed.
    pub fn apply(&mut self, delta: i64) -> Option<i32> {
        let candidate = i64::from(self.value).saturating_add(delta);
        let candidate = if candidate > i64::from(self.max) {
            self.max
        } else if candidate < i64::from(self.min) {
            self.min
        } else {
            // In [min, max], so it fits
            candidate as i32
        };

        if candidate == self.value {
            return None;
        }
        self.value = candidate;
        Some(candidate)
    }
}
