//! Errors surfaced by [`FrameDecoder::poll_once`](crate::decoder::FrameDecoder::poll_once).
//!
//! Malformed streams are never reported: a missing header stalls the decoder
//! and a corrupted payload yields garbage channel values. Only misuse and
//! transport failures end up here.

use embedded_hal_nb::serial::ErrorKind;
use thiserror::Error;

/// Decoder error.
#[derive(Error, PartialEq, Eq, Clone, Copy, Debug)]
pub enum DecoderError {
    /// `poll_once` was called before `begin`.
    #[error("decoder polled before begin()")]
    NotStarted,
    /// The byte source reported an error. No byte was consumed.
    #[error("serial read failed: {0:?}")]
    Serial(ErrorKind),
}

#[cfg(feature = "defmt-0-3")]
impl defmt::Format for DecoderError {
    fn format(&self, f: defmt::Formatter<'_>) {
        match self {
            DecoderError::NotStarted => defmt::write!(f, "NotStarted"),
            DecoderError::Serial(kind) => {
                defmt::write!(f, "Serial({})", defmt::Debug2Format(kind))
            }
        }
    }
}
