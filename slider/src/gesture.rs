//! Slide detection from the transition patterns of neighbouring channels.
//!
//! For every channel `i` the classifier looks at `i` and the channel preceding it. A
//! finger sliding "up" first overlaps the next channel while still resting on the
//! previous one (slow slide), or crosses a whole channel between two observations so the
//! previous channel releases as the next one is touched (fast slide). Sliding "down" is
//! the mirror image.
//!
//! At most one slide is recognised per evaluation: channels are scanned in increasing
//! index order and the first match wins. The classifier assumes no more than two
//! adjacent channels are touched at once; more than that gives unspecified (but
//! deterministic) results.

use crate::store::ChannelStates;

/// How a channel's touched state moved between two observations
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    StableUntouched,
    NewlyTouched,
    NewlyReleased,
    StableTouched,
}

impl Transition {
    pub const fn new(was_touched: bool, is_touched: bool) -> Self {
        match (was_touched, is_touched) {
            (false, false) => Transition::StableUntouched,
            (false, true) => Transition::NewlyTouched,
            (true, false) => Transition::NewlyReleased,
            (true, true) => Transition::StableTouched,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlideKind {
    SlowUp,
    SlowDown,
    FastUp,
    FastDown,
}

impl SlideKind {
    /// Match the transitions of a channel and of the channel preceding it against the
    /// slide patterns.
    pub const fn from_transitions(channel: Transition, previous: Transition) -> Option<Self> {
        use Transition::*;
        match (channel, previous) {
            (NewlyTouched, StableTouched) => Some(SlideKind::SlowUp),
            (NewlyReleased, StableTouched) => Some(SlideKind::SlowDown),
            (NewlyTouched, NewlyReleased) => Some(SlideKind::FastUp),
            (NewlyReleased, NewlyTouched) => Some(SlideKind::FastDown),
            _ => None,
        }
    }

    /// Signed number of increments this slide moves the value by
    pub fn ticks(self, fast_factor: i32) -> i64 {
        let fast = i64::from(fast_factor);
        match self {
            SlideKind::SlowUp => 1,
            SlideKind::SlowDown => -1,
            SlideKind::FastUp => fast,
            SlideKind::FastDown => -fast,
        }
    }
}

/// A recognised slide, and the channel whose transition completed it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Slide {
    pub channel: usize,
    pub kind: SlideKind,
}

impl Slide {
    /// Value delta for this slide. Both factors are `i32`, so the product cannot overflow.
    pub fn delta(&self, increment: i32, fast_factor: i32) -> i64 {
        self.kind.ticks(fast_factor) * i64::from(increment)
    }
}

/// Find the slide, if any, between the committed and pending observations in `states`.
pub fn classify(states: &ChannelStates) -> Option<Slide> {
    (0..states.len()).find_map(|channel| {
        let previous = states.previous(channel)?;
        SlideKind::from_transitions(states.transition(channel), states.transition(previous))
            .map(|kind| Slide { channel, kind })
    })
}

#[cfg(test)]
pub mod test {
    use super::*;

    /// Build a store from bitmasks of touched channels, bit `i` being channel `i`
    fn states(len: usize, last: u8, current: u8) -> ChannelStates {
        let mut states = ChannelStates::new(len);
        for i in 0..len {
            states.reset(i, last & (1 << i) != 0);
            states.record_observation(i, current & (1 << i) != 0);
        }
        states
    }

    fn slide(channel: usize, kind: SlideKind) -> Option<Slide> {
        Some(Slide { channel, kind })
    }

    #[test]
    fn test_slow_slides() {
        assert_eq!(classify(&states(4, 0b0001, 0b0011)), slide(1, SlideKind::SlowUp));
        assert_eq!(classify(&states(4, 0b0011, 0b0001)), slide(1, SlideKind::SlowDown));
    }

    #[test]
    fn test_fast_slides() {
        assert_eq!(classify(&states(4, 0b0010, 0b0100)), slide(2, SlideKind::FastUp));
        assert_eq!(classify(&states(4, 0b0100, 0b0010)), slide(2, SlideKind::FastDown));
    }

    #[test]
    fn test_wraps_around_ring() {
        // Channel 0's predecessor is channel 3
        assert_eq!(classify(&states(4, 0b1000, 0b1001)), slide(0, SlideKind::SlowUp));
        assert_eq!(classify(&states(3, 0b100, 0b001)), slide(0, SlideKind::FastUp));
    }

    #[test]
    fn test_two_channels_are_linear() {
        assert_eq!(classify(&states(2, 0b01, 0b11)), slide(1, SlideKind::SlowUp));
        // Leaving channel 0 afterwards must not undo the slide
        assert_eq!(classify(&states(2, 0b11, 0b10)), None);
        assert_eq!(classify(&states(2, 0b11, 0b01)), slide(1, SlideKind::SlowDown));
        assert_eq!(classify(&states(2, 0b01, 0b10)), slide(1, SlideKind::FastUp));
        assert_eq!(classify(&states(2, 0b10, 0b01)), slide(1, SlideKind::FastDown));
        assert_eq!(classify(&states(2, 0b10, 0b11)), None);
    }

    #[test]
    fn test_non_patterns_are_inert() {
        // Lower channel released while the upper one stays touched
        assert_eq!(classify(&states(4, 0b0011, 0b0010)), None);
        // Lone touch with no neighbour
        assert_eq!(classify(&states(4, 0b0000, 0b0100)), None);
        // Two neighbours touched together
        assert_eq!(classify(&states(4, 0b0000, 0b0110)), None);
        // No change at all
        assert_eq!(classify(&states(4, 0b0011, 0b0011)), None);
    }

    #[test]
    fn test_lowest_channel_wins() {
        // Channel 1 completes a slow slide up, channel 2 a fast slide down and channel 3 a
        // fast slide up.
        let s = states(4, 0b0101, 0b1011);
        assert_eq!(classify(&s), slide(1, SlideKind::SlowUp));
        assert_eq!(classify(&s), classify(&s));
    }

    #[test]
    fn test_delta() {
        let fast_down = Slide {
            channel: 0,
            kind: SlideKind::FastDown,
        };
        assert_eq!(fast_down.delta(3, 2), -6);

        let fast_up = Slide {
            channel: 0,
            kind: SlideKind::FastUp,
        };
        let widest = i64::from(i32::MAX) * i64::from(i32::MAX);
        assert_eq!(fast_up.delta(i32::MAX, i32::MAX), widest);

        let slow_up = Slide {
            channel: 0,
            kind: SlideKind::SlowUp,
        };
        assert_eq!(slow_up.delta(5, 2), 5);
    }
}
