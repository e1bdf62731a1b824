//! Run-time configuration for [`FrameDecoder`](crate::decoder::FrameDecoder).
//!
//! Frame length and channel count are compile-time parameters of the decoder
//! itself. Everything else lives here.

use crate::consts::{DEFAULT_BAUD_RATE, RAW_MAX, RAW_MIN, SCALED_MAX, SCALED_MIN};
use crate::scale::ScaleRange;

/// Decoder settings.
///
/// The [`Default`] value reproduces the receiver's stock behaviour:
/// 115200 baud, 1000..=2000 mapped onto 0..=255, no clamping.
///
/// ```rust
/// use fsa8s::config::DecoderConfig;
///
/// let config = DecoderConfig::new().with_clamp(true);
/// assert_eq!(config.baud_rate, 115_200);
/// assert!(config.clamp);
/// ```
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct DecoderConfig {
    /// Bit rate the serial peripheral should be configured with before the
    /// byte source is handed to the decoder.
    pub baud_rate: u32,
    /// Native range of a channel value.
    pub raw_range: ScaleRange,
    /// Range native values are mapped onto.
    pub scaled_range: ScaleRange,
    /// Clamp scaled values into `scaled_range`.
    ///
    /// Off by default: out-of-range raw values propagate to out-of-range
    /// scaled values.
    pub clamp: bool,
}

impl DecoderConfig {
    /// The stock configuration.
    pub const fn new() -> Self {
        Self {
            baud_rate: DEFAULT_BAUD_RATE,
            raw_range: ScaleRange::new(RAW_MIN, RAW_MAX),
            scaled_range: ScaleRange::new(SCALED_MIN, SCALED_MAX),
            clamp: false,
        }
    }

    /// Sets the expected serial bit rate.
    pub const fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    /// Sets the native channel range.
    pub const fn with_raw_range(mut self, low: i32, high: i32) -> Self {
        self.raw_range = ScaleRange::new(low, high);
        self
    }

    /// Sets the output range of scaled channels.
    pub const fn with_scaled_range(mut self, low: i32, high: i32) -> Self {
        self.scaled_range = ScaleRange::new(low, high);
        self
    }

    /// Enables or disables clamping of scaled values.
    pub const fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self::new()
    }
}
