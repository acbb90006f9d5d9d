//! The seam between a slider and the per-channel touch sensing underneath it.
//!
//! Capacitive measurement, thresholding and debouncing all live behind [`ChannelSensor`].
//! A slider only ever asks a channel to start, to stop, and whether it is touched right
//! now. In event-driven setups the sensor owner also reports [`Edge`]s back to the slider.

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    #[error("sensor configuration can never detect a touch")]
    InvalidConfig,
    #[error("sensor hardware did not respond")]
    Unresponsive,
}

/// A change of a single channel's touched state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    Touched,
    Released,
}

impl Edge {
    pub const fn is_touched(self) -> bool {
        matches!(self, Edge::Touched)
    }
}

/// One touch channel of a slider.
pub trait ChannelSensor {
    /// Identity the sensor owner uses when reporting edges, e.g. a pin or TSC channel.
    type Id: Copy + PartialEq;

    fn id(&self) -> Self::Id;

    /// Put the channel into service.
    fn start(&mut self) -> Result<(), SensorError>;

    /// Take the channel out of service. Stopping a stopped channel does nothing.
    fn stop(&mut self);

    /// Whether the channel is being touched as of its latest sample.
    fn is_touched(&self) -> bool;
}
