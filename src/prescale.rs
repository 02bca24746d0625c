//! Mapping of a requested tick rate onto the two prescale timers.
//!
//! RT0PS divides the 32768 Hz clock, RT1PS divides the /256 output of RT0PS
//! (128 Hz). Each raises its interrupt every `2^(RTIP + 1)` input cycles, so a
//! rate of 1..64 events per second is expressed by RT1PS and 128..16384 by
//! RT0PS.

use crate::Error;

/// One of the two prescale timers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    /// RT0PS, 128 to 16384 events per second
    Channel0,
    /// RT1PS, 1 to 64 events per second
    Channel1,
}

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::Channel0, Channel::Channel1];

    pub fn index(self) -> usize {
        match self {
            Channel::Channel0 => 0,
            Channel::Channel1 => 1,
        }
    }
}

/// Highest bit ordinal handled by RT1PS
const CHANNEL1_TOP: u32 = 6;
/// Highest bit ordinal handled by RT0PS
const CHANNEL0_TOP: u32 = 14;

/// Interval both timers are reset to, /256
pub const RESET_INTERVAL: u8 = 7;

/// Decode a rate mask into a channel and its `RTIP` interval value.
///
/// `mask` is the requested number of events per second and must be a single
/// power of two between 1 and 16384.
pub fn decode(mask: u16) -> Result<(Channel, u8), Error> {
    if mask.count_ones() != 1 {
        return Err(Error::InvalidParameter);
    }
    let ordinal = mask.trailing_zeros();
    match ordinal {
        0..=CHANNEL1_TOP => Ok((Channel::Channel1, (CHANNEL1_TOP - ordinal) as u8)),
        7..=CHANNEL0_TOP => Ok((Channel::Channel0, (CHANNEL0_TOP - ordinal) as u8)),
        _ => Err(Error::InvalidParameter),
    }
}
