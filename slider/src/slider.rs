//! The slider itself: channel ownership, lifecycle and the observation entry points.
//!
//! Whenever a channel changes state we look at what happened to the channel that
//! logically precedes it. If the preceding channel was touched and still is, the finger
//! has slid one step: up if the channel became touched, down if it was released. If the
//! preceding channel flipped the opposite way at the same moment, the finger crossed a
//! whole channel and the step is multiplied by the fast factor. See [`crate::gesture`].

use heapless::Vec;
use thiserror::Error;

use crate::accumulator::Accumulator;
use crate::config::{SliderConfig, DEFAULT_SLIDER_CONFIG};
use crate::gesture;
use crate::sensor::{ChannelSensor, Edge, SensorError};
use crate::store::{ChannelStates, StateDump};
use crate::MAX_CHANNELS;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BeginError {
    #[error("slider needs 2 to {max} channels, has {0}", max = MAX_CHANNELS)]
    TooFewChannels(usize),
    #[error("max {max} must be more than min {min}")]
    InvertedBounds { min: i32, max: i32 },
    #[error("increment {0} must be more than 0")]
    NonPositiveIncrement(i32),
    #[error("fast factor {0} must be more than 0")]
    NonPositiveFastFactor(i32),
    #[error("initial value {0} is outside the slider bounds")]
    InitialOutOfRange(i32),
    #[error("channel {channel} failed to start: {error}")]
    SensorStart { channel: usize, error: SensorError },
}

/// A touch slider over up to [`MAX_CHANNELS`] channels, ordered from the low-value end to
/// the high-value end.
///
/// Three or more channels form a ring, so a finger can keep sliding round. Two channels
/// form a straight line with no wraparound.
///
/// A slider built from fewer than two or more than [`MAX_CHANNELS`] channels is inert:
/// it holds no channels, `begin` fails and everything else does nothing.
pub struct Slider<'h, S: ChannelSensor> {
    sensors: Vec<S, MAX_CHANNELS>,
    states: ChannelStates,
    accumulator: Accumulator,
    increment: i32,
    fast_factor: i32,
    in_service: bool,
    on_change: Option<&'h mut dyn FnMut(i32)>,
}

impl<'h, S: ChannelSensor> Slider<'h, S> {
    pub fn new<I: IntoIterator<Item = S>>(sensors: I) -> Self {
        let mut channels: Vec<S, MAX_CHANNELS> = Vec::new();
        let mut overflow = false;
        for sensor in sensors {
            if channels.push(sensor).is_err() {
                overflow = true;
                break;
            }
        }
        if overflow || channels.len() < 2 {
            #[cfg(feature = "defmt")]
            defmt::warn!("slider built with unusable channel count, staying inert");
            channels.clear();
        }

        let states = ChannelStates::new(channels.len());
        Self {
            sensors: channels,
            states,
            accumulator: Accumulator::new(
                DEFAULT_SLIDER_CONFIG.min,
                DEFAULT_SLIDER_CONFIG.max,
                DEFAULT_SLIDER_CONFIG.initial,
            ),
            increment: DEFAULT_SLIDER_CONFIG.increment,
            fast_factor: DEFAULT_SLIDER_CONFIG.fast_factor,
            in_service: false,
            on_change: None,
        }
    }

    /// Put the slider into service with `config`, starting every channel.
    ///
    /// If a channel fails to start, the channels started before it are stopped again in
    /// the order they were started and the slider stays out of service. Calling `begin`
    /// on a slider already in service restarts it.
    pub fn begin(&mut self, config: &SliderConfig) -> Result<(), BeginError> {
        if self.sensors.len() < 2 {
            return Err(BeginError::TooFewChannels(self.sensors.len()));
        }
        config.validate()?;
        self.end();

        let failure = self
            .sensors
            .iter_mut()
            .enumerate()
            .find_map(|(channel, sensor)| sensor.start().err().map(|error| (channel, error)));
        if let Some((channel, error)) = failure {
            #[cfg(feature = "defmt")]
            defmt::warn!("channel {=usize} failed to start: {}, rolling back", channel, error);
            self.sensors.iter_mut().take(channel).for_each(|sensor| sensor.stop());
            return Err(BeginError::SensorStart { channel, error });
        }

        self.accumulator = Accumulator::new(config.min, config.max, config.initial);
        self.increment = config.increment;
        self.fast_factor = config.fast_factor;
        for (i, sensor) in self.sensors.iter().enumerate() {
            self.states.reset(i, sensor.is_touched());
        }
        self.in_service = true;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "slider in service: {=usize} channels, [{=i32}, {=i32}] at {=i32}",
            self.sensors.len(),
            config.min,
            config.max,
            config.initial
        );
        Ok(())
    }

    /// Put the slider into service over the full `i32` range, starting at 0
    pub fn begin_default(&mut self) -> Result<(), BeginError> {
        self.begin(&DEFAULT_SLIDER_CONFIG)
    }

    /// Take the slider out of service, stopping every channel. The value is kept and no
    /// notification is made.
    pub fn end(&mut self) {
        if !self.in_service {
            return;
        }
        self.sensors.iter_mut().for_each(|sensor| sensor.stop());
        self.in_service = false;

        #[cfg(feature = "defmt")]
        defmt::info!("slider out of service at {=i32}", self.accumulator.value());
    }

    /// Call `handler` with the new value whenever the value changes, replacing any
    /// previously registered handler.
    pub fn set_change_handler(&mut self, handler: &'h mut dyn FnMut(i32)) {
        self.on_change = Some(handler);
    }

    pub fn clear_change_handler(&mut self) {
        self.on_change = None;
    }

    pub fn value(&self) -> i32 {
        self.accumulator.value()
    }

    pub fn in_service(&self) -> bool {
        self.in_service
    }

    /// Number of channels; 0 for an inert slider
    pub fn channel_count(&self) -> usize {
        self.sensors.len()
    }

    pub fn sensor(&self, channel: usize) -> Option<&S> {
        self.sensors.get(channel)
    }

    /// Access to a channel's sensor, e.g. to feed it raw samples
    pub fn sensor_mut(&mut self, channel: usize) -> Option<&mut S> {
        self.sensors.get_mut(channel)
    }

    /// Index of the channel whose sensor has identity `id`
    pub fn channel_of(&self, id: S::Id) -> Option<usize> {
        self.sensors.iter().position(|sensor| sensor.id() == id)
    }

    /// Last observed touched state of every channel
    pub fn state_dump(&self) -> StateDump<'_> {
        self.states.dump()
    }

    /// Sample every channel and act on any slide since the previous observation.
    ///
    /// Call this often from the main loop when driving the slider by polling.
    pub fn evaluate(&mut self) {
        if !self.in_service {
            return;
        }
        for (i, sensor) in self.sensors.iter().enumerate() {
            self.states.record_observation(i, sensor.is_touched());
        }
        self.settle();
    }

    /// Act on the channel identified by `id` changing state.
    ///
    /// The other channels are sampled as they are at the moment of the edge. Edges for
    /// unknown identities are ignored.
    pub fn on_edge(&mut self, id: S::Id, edge: Edge) {
        if !self.in_service {
            return;
        }
        let Some(changed) = self.channel_of(id) else {
            return;
        };
        for (i, sensor) in self.sensors.iter().enumerate() {
            let touched = if i == changed {
                edge.is_touched()
            } else {
                sensor.is_touched()
            };
            self.states.record_observation(i, touched);
        }
        self.settle();
    }

    pub fn on_touched(&mut self, id: S::Id) {
        self.on_edge(id, Edge::Touched);
    }

    pub fn on_released(&mut self, id: S::Id) {
        self.on_edge(id, Edge::Released);
    }

    /// Classify the pending observation, commit it, and apply the slide if there was one.
    fn settle(&mut self) {
        let slide = gesture::classify(&self.states);
        self.states.commit();
        let Some(slide) = slide else {
            return;
        };

        #[cfg(feature = "defmt")]
        defmt::trace!("slide {} at channel {=usize}", slide.kind, slide.channel);

        let delta = slide.delta(self.increment, self.fast_factor);
        if let Some(value) = self.accumulator.apply(delta) {
            #[cfg(feature = "defmt")]
            defmt::debug!("slider value {=i32}", value);

            if let Some(on_change) = self.on_change.as_mut() {
                on_change(value);
            }
        }
    }
}

impl<S: ChannelSensor> Drop for Slider<'_, S> {
    fn drop(&mut self) {
        self.end();
    }
}
