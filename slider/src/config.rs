use crate::slider::BeginError;

/// Multiplier applied to the increment when a finger crosses a whole channel between
/// two observations
pub const DEFAULT_FAST_FACTOR: i32 = 2;

/// Operating parameters supplied to [`Slider::begin`](crate::Slider::begin)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SliderConfig {
    /// The lowest value the slider can reach. Sliding down from here has no effect.
    pub min: i32,
    /// The highest value the slider can reach. Must be more than `min`.
    pub max: i32,
    /// Value the slider takes when put into service. Must be in `[min, max]`.
    pub initial: i32,
    /// Amount one slow slide changes the value by. Must be more than 0.
    pub increment: i32,
    /// Multiple of `increment` applied for a fast slide. Must be more than 0.
    pub fast_factor: i32,
}

impl SliderConfig {
    /// Full `i32` range, starting at 0 and stepping by 1
    pub const fn default() -> Self {
        Self {
            min: i32::MIN,
            max: i32::MAX,
            initial: 0,
            increment: 1,
            fast_factor: DEFAULT_FAST_FACTOR,
        }
    }

    pub const fn with_bounds(min: i32, max: i32) -> Self {
        Self {
            min,
            max,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), BeginError> {
        if self.max <= self.min {
            return Err(BeginError::InvertedBounds {
                min: self.min,
                max: self.max,
            });
        }
        if self.increment <= 0 {
            return Err(BeginError::NonPositiveIncrement(self.increment));
        }
        if self.fast_factor <= 0 {
            return Err(BeginError::NonPositiveFastFactor(self.fast_factor));
        }
        if self.initial < self.min || self.initial > self.max {
            return Err(BeginError::InitialOutOfRange(self.initial));
        }
        Ok(())
    }
}

pub const DEFAULT_SLIDER_CONFIG: SliderConfig = SliderConfig::default();
