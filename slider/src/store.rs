use core::fmt;

use crate::gesture::Transition;
use crate::MAX_CHANNELS;

/// Touched state of every channel, both as of the last committed observation and as
/// sampled for the observation currently being evaluated.
///
/// Three or more channels form a ring: the channel preceding index 0 is the last one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChannelStates {
    len: usize,
    last: [bool; MAX_CHANNELS],
    current: [bool; MAX_CHANNELS],
}

impl ChannelStates {
    /// Create a store for `len` channels, all untouched. A `len` above [`MAX_CHANNELS`]
    /// yields an empty store.
    pub const fn new(len: usize) -> Self {
        Self {
            len: if len > MAX_CHANNELS { 0 } else { len },
            last: [false; MAX_CHANNELS],
            current: [false; MAX_CHANNELS],
        }
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Overwrite both the committed and the pending state of channel `i`
    pub fn reset(&mut self, i: usize, touched: bool) {
        if i < self.len {
            self.last[i] = touched;
            self.current[i] = touched;
        }
    }

    /// Record the newly sampled state of channel `i` for the pending evaluation.
    pub fn record_observation(&mut self, i: usize, touched: bool) {
        if i < self.len {
            self.current[i] = touched;
        }
    }

    /// The channel logically preceding `i`, in the direction of increasing value.
    ///
    /// With three or more channels the ring wraps, so channel 0 follows the last one. Two
    /// channels form a straight line: channel 0 has no predecessor.
    pub const fn previous(&self, i: usize) -> Option<usize> {
        if i >= self.len {
            None
        } else if i > 0 {
            Some(i - 1)
        } else if self.len > 2 {
            Some(self.len - 1)
        } else {
            None
        }
    }

    /// Transition of channel `i` between the committed and the pending observation.
    pub fn transition(&self, i: usize) -> Transition {
        if i < self.len {
            Transition::new(self.last[i], self.current[i])
        } else {
            Transition::StableUntouched
        }
    }

    /// Make the pending observation the committed one.
    pub fn commit(&mut self) {
        self.last = self.current;
    }

    /// Committed touched state of channel `i`
    pub fn touched(&self, i: usize) -> bool {
        i < self.len && self.last[i]
    }

    /// Committed touched state of every channel, in index order
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.last[..self.len].iter().copied()
    }

    pub fn dump(&self) -> StateDump<'_> {
        StateDump(self)
    }
}

/// Diagnostic rendering of the committed channel states: `T` for touched, `n` for not,
/// one per channel in index order.
pub struct StateDump<'a>(&'a ChannelStates);

impl fmt::Display for StateDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for touched in self.0.iter() {
            f.write_str(if touched { "T " } else { "n " })?;
        }
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for StateDump<'_> {
    fn format(&self, f: defmt::Formatter) {
        for touched in self.0.iter() {
            if touched {
                defmt::write!(f, "T ");
            } else {
                defmt::write!(f, "n ");
            }
        }
    }
}

#[cfg(test)]
pub mod test {
    use super::*;

    #[test]
    fn test_previous_wraps() {
        let states = ChannelStates::new(4);
        assert_eq!(states.previous(0), Some(3));
        assert_eq!(states.previous(1), Some(0));
        assert_eq!(states.previous(3), Some(2));
        assert_eq!(states.previous(4), None);
    }

    #[test]
    fn test_two_channels_do_not_wrap() {
        let states = ChannelStates::new(2);
        assert_eq!(states.previous(0), None);
        assert_eq!(states.previous(1), Some(0));
    }

    #[test]
    fn test_transitions_and_commit() {
        let mut states = ChannelStates::new(3);
        states.reset(0, true);
        states.record_observation(0, false);
        states.record_observation(1, true);

        assert_eq!(states.transition(0), Transition::NewlyReleased);
        assert_eq!(states.transition(1), Transition::NewlyTouched);
        assert_eq!(states.transition(2), Transition::StableUntouched);
        // Committed state is untouched until commit
        assert!(states.touched(0));
        assert!(!states.touched(1));

        states.commit();
        assert_eq!(states.transition(0), Transition::StableUntouched);
        assert_eq!(states.transition(1), Transition::StableTouched);
        assert!(!states.touched(0));
        assert!(states.touched(1));
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let mut states = ChannelStates::new(2);
        states.record_observation(5, true);
        states.reset(2, true);
        states.commit();
        assert_eq!(states.iter().collect::<Vec<_>>(), vec![false, false]);
        assert_eq!(states.transition(5), Transition::StableUntouched);

        assert!(ChannelStates::new(MAX_CHANNELS + 1).is_empty());
    }

    #[test]
    fn test_dump() {
        let mut states = ChannelStates::new(4);
        states.reset(1, true);
        states.reset(2, true);
        assert_eq!(format!("{}", states.dump()), "n T T n ");
    }
}
