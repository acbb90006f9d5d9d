//! Touch slider control built from an ordered ring of discrete touch channels.
//!
//! A [`Slider`] watches the touched / not-touched state of each of its channels and turns
//! finger slides across neighbouring channels into changes of a bounded integer value.
//! It can be driven either by polling ([`Slider::evaluate`]) or by per-channel edge
//! notifications ([`Slider::on_edge`]).

#![cfg_attr(not(test), no_std)]

pub mod accumulator;
pub mod button;
pub mod config;
pub mod gesture;
pub mod sensor;
pub mod slider;
pub mod store;

pub use config::{SliderConfig, DEFAULT_FAST_FACTOR, DEFAULT_SLIDER_CONFIG};
pub use sensor::{ChannelSensor, Edge, SensorError};
pub use slider::{BeginError, Slider};

/// The most channels a single slider can be built from
pub const MAX_CHANNELS: usize = 6;

/// Enumeration of touch activity states

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchState {
    Stopped,
    Startup(u16),
    Calibrate(u16),
    Idle(u16),
    Active,
}

/// Configuration structure for all touch inputs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchConfig {
    /// The number of counts of delta capacitance required to active the button
    pub detect_threshold: u16,
    /// The hysteresis in deactivation. Once active, counts must fall below `detect_threshold -
    /// detect_hysteresis` in order to deactivate.
    pub detect_hysteresis: u16,
    /// Number of samples to wait after initialization before starting calibration
    pub calibration_delay: u16,
    /// Number of sample to collect for reference level calibration
    pub calibration_samples: u16,
    /// Number of positive samples required to transition to Active state
    pub debounce: u16,
}

impl TouchConfig {
    pub const fn default() -> Self {
        Self {
            detect_threshold: 100,
            detect_hysteresis: 5,
            calibration_delay: 10,
            calibration_samples: 16,
            debounce: 2,
        }
    }

    /// Check that a button running this configuration can ever calibrate, activate and
    /// release.
    pub fn validate(&self) -> Result<(), SensorError> {
        if self.detect_hysteresis >= self.detect_threshold
            || self.calibration_samples == 0
            || self.debounce == 0
        {
            return Err(SensorError::InvalidConfig);
        }
        Ok(())
    }
}

pub const DEFAULT_TOUCH_CONFIG: TouchConfig = TouchConfig::default();

#[cfg(test)]
pub mod test {
    use super::*;

    #[test]
    fn test_touch_config_validate() {
        assert_eq!(DEFAULT_TOUCH_CONFIG.validate(), Ok(()));

        let config = TouchConfig {
            detect_hysteresis: 100,
            ..DEFAULT_TOUCH_CONFIG
        };
        assert_eq!(config.validate(), Err(SensorError::InvalidConfig));

        let config = TouchConfig {
            calibration_samples: 0,
            ..DEFAULT_TOUCH_CONFIG
        };
        assert_eq!(config.validate(), Err(SensorError::InvalidConfig));

        let config = TouchConfig {
            debounce: 0,
            ..DEFAULT_TOUCH_CONFIG
        };
        assert_eq!(config.validate(), Err(SensorError::InvalidConfig));
    }
}
