//! Fixed-capacity frame buffer and header synchronization.
//!
//! [`FrameBuffer`] holds the bytes of the frame currently being assembled. Its
//! length doubles as the write cursor and as the state discriminant of the
//! framing state machine:
//!
//! | cursor                 | [`Phase`]                   | accepts            |
//! |------------------------|-----------------------------|--------------------|
//! | `0`                    | [`Phase::SeekHeader1`]      | `0x20` only        |
//! | `1`                    | [`Phase::SeekHeader2`]      | `0x40` only        |
//! | `2 .. FRAME_LEN`       | [`Phase::Accumulate`]       | any byte           |
//! | `FRAME_LEN`            | [`Phase::Complete`]         | nothing            |
//!
//! A mismatch while seeking either header byte drops the byte and leaves the
//! cursor where it was. In particular a `0x20` arriving while header byte 2 is
//! expected is *not* taken as the start of a new header.

use heapless::Vec;

use crate::consts::{CHANNEL_WIDTH, HEADER_BYTE_1, HEADER_BYTE_2, HEADER_LEN};

/// Framing state derived from the buffer cursor.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Phase {
    /// Waiting for [`HEADER_BYTE_1`].
    SeekHeader1,
    /// Waiting for [`HEADER_BYTE_2`].
    SeekHeader2,
    /// Filling the payload.
    Accumulate,
    /// The buffer is full. The next consumed byte publishes the frame.
    Complete,
}

/// Outcome of offering one byte to a [`FrameBuffer`].
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Push {
    /// The byte was stored.
    Stored,
    /// The byte did not match the expected header byte and was dropped.
    Rejected,
    /// The buffer is full; the byte was dropped. Take the frame first.
    Full,
}

/// Byte buffer of one frame with its write cursor.
#[derive(Debug)]
pub struct FrameBuffer<const FRAME_LEN: usize> {
    bytes: Vec<u8, FRAME_LEN>,
}

impl<const FRAME_LEN: usize> FrameBuffer<FRAME_LEN> {
    /// Creates an empty buffer seeking the first header byte.
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Current write position, in `0..=FRAME_LEN`.
    pub fn cursor(&self) -> usize {
        self.bytes.len()
    }

    /// Framing state implied by the cursor.
    pub fn phase(&self) -> Phase {
        match self.bytes.len() {
            0 => Phase::SeekHeader1,
            1 => Phase::SeekHeader2,
            n if n >= FRAME_LEN => Phase::Complete,
            _ => Phase::Accumulate,
        }
    }

    /// Offers one byte to the buffer.
    pub fn push(&mut self, byte: u8) -> Push {
        match self.phase() {
            Phase::SeekHeader1 if byte != HEADER_BYTE_1 => Push::Rejected,
            Phase::SeekHeader2 if byte != HEADER_BYTE_2 => Push::Rejected,
            Phase::Complete => Push::Full,
            _ => match self.bytes.push(byte) {
                Ok(()) => Push::Stored,
                Err(_) => Push::Full,
            },
        }
    }

    /// Resets the cursor and returns a copy of the completed frame, if any.
    pub fn take_frame(&mut self) -> Option<[u8; FRAME_LEN]> {
        let frame = *self.frame()?;
        self.reset();
        Some(frame)
    }

    /// Moves the cursor back to zero.
    pub fn reset(&mut self) {
        self.bytes.clear();
    }

    /// Bytes stored so far, header included.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// The full frame, once the cursor has reached `FRAME_LEN`.
    pub fn frame(&self) -> Option<&[u8; FRAME_LEN]> {
        self.bytes.as_slice().try_into().ok()
    }
}

impl<const FRAME_LEN: usize> Default for FrameBuffer<FRAME_LEN> {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads the little-endian value of channel `index` out of a complete frame.
///
/// The pair for channel `i` sits at offsets `2 + 2i` (low byte) and `3 + 2i`
/// (high byte). Returns `None` if the frame is too short to hold it.
pub fn channel_value(frame: &[u8], index: usize) -> Option<u16> {
    let low = HEADER_LEN + CHANNEL_WIDTH * index;
    let pair = frame.get(low..low + CHANNEL_WIDTH)?;
    Some(u16::from_le_bytes([pair[0], pair[1]]))
}
