use crate::sensor::{ChannelSensor, Edge, SensorError};
use crate::{TouchConfig, TouchState, DEFAULT_TOUCH_CONFIG};

/// A single capacitive touch channel, driven by raw counts from whatever measures it.
///
/// After `start`, the button waits `calibration_delay` samples, averages
/// `calibration_samples` samples into a reference level, and from then on reports a touch
/// once the count has exceeded the reference by `detect_threshold` for `debounce`
/// consecutive samples.
pub struct Button<'a, Id> {
    id: Id,
    pub reference: u32,
    pub state: TouchState,
    pub config: &'a TouchConfig,
}

impl<'a, Id: Copy + PartialEq> Button<'a, Id> {
    pub fn new(id: Id, config: Option<&'a TouchConfig>) -> Self {
        Self {
            id,
            reference: 0,
            state: TouchState::Stopped,
            config: config.unwrap_or(&DEFAULT_TOUCH_CONFIG),
        }
    }

    pub fn active(&self) -> bool {
        matches!(self.state, TouchState::Active)
    }

    /// Process a new measurement for this touch button
    ///
    /// Returns the edge if the measurement changed whether the button is touched.
    pub fn push(&mut self, measurement: u16) -> Option<Edge> {
        let was_active = self.active();
        let delta = u32::from(measurement).saturating_sub(self.reference);
        let threshold = u32::from(self.config.detect_threshold);
        let release = u32::from(
            self.config
                .detect_threshold
                .saturating_sub(self.config.detect_hysteresis),
        );

        self.state = match self.state {
            TouchState::Stopped => TouchState::Stopped,
            TouchState::Startup(counter) => {
                if counter == 0 {
                    TouchState::Calibrate(self.config.calibration_samples)
                } else {
                    TouchState::Startup(counter - 1)
                }
            }
            TouchState::Calibrate(counter) => {
                self.reference += u32::from(measurement);
                if counter <= 1 {
                    self.reference /= u32::from(self.config.calibration_samples.max(1));
                    TouchState::Idle(self.config.debounce)
                } else {
                    TouchState::Calibrate(counter - 1)
                }
            }
            TouchState::Idle(counter) => {
                if delta >= threshold {
                    if counter <= 1 {
                        TouchState::Active
                    } else {
                        TouchState::Idle(counter - 1)
                    }
                } else {
                    TouchState::Idle(self.config.debounce)
                }
            }
            TouchState::Active => {
                if delta < release {
                    TouchState::Idle(self.config.debounce)
                } else {
                    TouchState::Active
                }
            }
        };

        match (was_active, self.active()) {
            (false, true) => Some(Edge::Touched),
            (true, false) => Some(Edge::Released),
            _ => None,
        }
    }
}

impl<Id: Copy + PartialEq> ChannelSensor for Button<'_, Id> {
    type Id = Id;

    fn id(&self) -> Id {
        self.id
    }

    /// Restart calibration from scratch
    fn start(&mut self) -> Result<(), SensorError> {
        self.config.validate()?;
        self.reference = 0;
        self.state = TouchState::Startup(self.config.calibration_delay);
        Ok(())
    }

    fn stop(&mut self) {
        self.state = TouchState::Stopped;
    }

    fn is_touched(&self) -> bool {
        self.active()
    }
}
