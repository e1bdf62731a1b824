//! Decoded channel values.

use crate::config::DecoderConfig;
use crate::frame::channel_value;
use crate::scale::map_range;

/// Raw and scaled values of the last completed frame.
///
/// Both arrays are written together when a frame completes and are left
/// untouched otherwise. Before the first frame every value is zero.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct ChannelSet<const CHANNELS: usize> {
    /// Native channel values, typically 1000..=2000.
    pub raw: [i32; CHANNELS],
    /// Channel values mapped onto the configured output range, typically 0..=255.
    pub scaled: [i32; CHANNELS],
}

impl<const CHANNELS: usize> ChannelSet<CHANNELS> {
    /// An all-zero channel set.
    pub const fn new() -> Self {
        Self {
            raw: [0; CHANNELS],
            scaled: [0; CHANNELS],
        }
    }

    /// Decodes every channel out of `frame` and rescales it per `config`.
    ///
    /// `frame` must be at least `2 + 2 * CHANNELS` bytes long; channels that do
    /// not fit are left at their previous value.
    pub fn update(&mut self, frame: &[u8], config: &DecoderConfig) {
        for (i, (raw, scaled)) in self.raw.iter_mut().zip(self.scaled.iter_mut()).enumerate() {
            let Some(value) = channel_value(frame, i) else {
                break;
            };
            *raw = i32::from(value);
            let mapped = map_range(*raw, config.raw_range, config.scaled_range);
            *scaled = if config.clamp {
                config.scaled_range.clamp(mapped)
            } else {
                mapped
            };
        }
    }

    /// Number of channels.
    pub const fn len(&self) -> usize {
        CHANNELS
    }

    /// Whether the set holds no channels at all.
    pub const fn is_empty(&self) -> bool {
        CHANNELS == 0
    }
}

impl<const CHANNELS: usize> Default for ChannelSet<CHANNELS> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: [u8; 8] = [0x20, 0x40, 0xe8, 0x03, 0xdc, 0x05, 0xc4, 0x09];

    #[test]
    fn test_update_decodes_and_scales() {
        let mut set: ChannelSet<3> = ChannelSet::new();
        set.update(&FRAME, &DecoderConfig::default());
        assert_eq!(set.raw, [1000, 1500, 2500]);
        assert_eq!(set.scaled, [0, 127, 382]);
    }

    #[test]
    fn test_update_with_clamp() {
        let mut set: ChannelSet<3> = ChannelSet::new();
        set.update(&FRAME, &DecoderConfig::new().with_clamp(true));
        assert_eq!(set.raw, [1000, 1500, 2500]);
        assert_eq!(set.scaled, [0, 127, 255]);
    }

    #[test]
    fn test_update_short_frame_keeps_tail() {
        let mut set: ChannelSet<4> = ChannelSet::new();
        set.raw[3] = 7;
        set.update(&FRAME, &DecoderConfig::default());
        assert_eq!(set.raw, [1000, 1500, 2500, 7]);
        assert_eq!(set.len(), 4);
    }
}
