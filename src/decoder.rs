//! FS-A8S serial frame decoder.
//!
//! This module provides the [`FrameDecoder`] struct, a byte-at-a-time state
//! machine turning the receiver's continuous serial stream into channel values.
//! It never blocks: each call to [`poll_once()`](FrameDecoder::poll_once) reads
//! at most one byte from the byte source and does a bounded amount of work.
//!
//! ## Example
//!
//! ```rust
//! # use embedded_hal_mock::eh1::serial::{Mock as Serial, Transaction as SerialTransaction};
//! use fsa8s::config::DecoderConfig;
//! use fsa8s::decoder::{FrameDecoder, Poll};
//!
//! # let serial = Serial::new(&[SerialTransaction::read(0x20u8)]);
//! // The UART is configured for `config.baud_rate` by the HAL first.
//! let config = DecoderConfig::default();
//! let mut decoder: FrameDecoder<_> = FrameDecoder::new(serial, config);
//! decoder.begin();
//!
//! loop {
//!     if let Ok(Poll::FrameComplete) = decoder.poll_once() {
//!         let throttle = decoder.scaled()[2];
//!         # let _ = throttle;
//!     }
//!     # break;
//! }
//! # decoder.release().done();
//! ```
//!
//! ## Timing of completion
//!
//! The cursor reaching the frame length does not by itself publish the frame.
//! The channel set is updated on the *next* poll that consumes a byte; that
//! byte is dropped, and the byte after it is the first header candidate of the
//! next frame.
//!
//! ## Design Notes
//!
//! No checksum is validated and the payload content is not inspected. A noisy
//! stream produces garbage channel values rather than an error.

use embedded_hal_nb::serial::{Error as _, Read};

use crate::channels::ChannelSet;
use crate::config::DecoderConfig;
use crate::consts::{DEFAULT_CHANNELS, DEFAULT_FRAME_LEN, min_frame_len};
use crate::error::DecoderError;
use crate::fmt::{debug, info, trace, warning};
use crate::frame::{FrameBuffer, Phase, Push};

/// What a single [`FrameDecoder::poll_once`] call did.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Poll {
    /// No byte was available. Nothing changed.
    Idle,
    /// A byte was stored; the decoder is now in the given phase.
    Stored(Phase),
    /// A byte failed to match the expected header byte and was dropped.
    Discarded(Phase),
    /// A frame was published to the channel set.
    FrameComplete,
}

/// A non-blocking decoder for the FS-A8S serial channel stream.
///
/// ## Type Parameters
///
/// - `RX`: the byte source, any [`embedded_hal_nb::serial::Read<u8>`]
/// - `CHANNELS`: number of channels decoded per frame (default 6)
/// - `FRAME_LEN`: frame length and buffer capacity in bytes (default 32)
///
/// `FRAME_LEN` must be at least `2 + 2 * CHANNELS`. This is checked when the
/// decoder is instantiated, so a mismatched pair fails to compile.
///
/// ## Lifecycle
///
/// 1. Configure the serial peripheral (see [`DecoderConfig::baud_rate`]).
/// 2. [`FrameDecoder::new`] with the byte source.
/// 3. [`FrameDecoder::begin`] once.
/// 4. [`FrameDecoder::poll_once`] as often as possible from the main loop.
///
/// ## Notes
///
/// - Only one caller context should drive a decoder. For interrupt-driven
///   polling see [`crate::timer`].
/// - There is no frame timeout. A stream that stops mid-frame leaves the
///   decoder parked in [`Phase::Accumulate`] until enough bytes arrive.
#[derive(Debug)]
pub struct FrameDecoder<
    RX,
    const CHANNELS: usize = DEFAULT_CHANNELS,
    const FRAME_LEN: usize = DEFAULT_FRAME_LEN,
> where
    RX: Read<u8>,
{
    rx: RX,
    config: DecoderConfig,
    buf: FrameBuffer<FRAME_LEN>,
    channels: ChannelSet<CHANNELS>,
    started: bool,

    /// Number of frames published since `begin()`. Wraps on overflow.
    pub frames_completed: u16,

    /// Number of bytes dropped while seeking a header. Wraps on overflow.
    pub bytes_discarded: u16,
}

impl<RX, const CHANNELS: usize, const FRAME_LEN: usize> FrameDecoder<RX, CHANNELS, FRAME_LEN>
where
    RX: Read<u8>,
{
    const LAYOUT_FITS: () = assert!(
        FRAME_LEN >= min_frame_len(CHANNELS),
        "FRAME_LEN must be at least 2 + 2 * CHANNELS"
    );

    /// Creates a new decoder around `rx`.
    ///
    /// No byte is read here. Call [`begin()`](Self::begin) before polling.
    pub fn new(rx: RX, config: DecoderConfig) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::LAYOUT_FITS;
        Self {
            rx,
            config,
            buf: FrameBuffer::new(),
            channels: ChannelSet::new(),
            started: false,
            frames_completed: 0,
            bytes_discarded: 0,
        }
    }

    /// Completes initialization.
    ///
    /// Resets the cursor, the channel set and the counters, then enables
    /// polling. Calling it again restarts the decoder from a clean state.
    pub fn begin(&mut self) {
        self.buf.reset();
        self.channels = ChannelSet::new();
        self.frames_completed = 0;
        self.bytes_discarded = 0;
        self.started = true;
        info!(
            "fsa8s: decoding {} channels from {}-byte frames at {} baud",
            CHANNELS,
            FRAME_LEN,
            self.config.baud_rate
        );
    }

    /// Consumes at most one byte from the byte source and advances the state machine.
    ///
    /// # Behavior
    /// - No byte ready: returns [`Poll::Idle`] without touching any state
    /// - Cursor 0: only `0x20` is stored, anything else is discarded
    /// - Cursor 1: only `0x40` is stored, anything else is discarded and the
    ///   decoder keeps waiting for `0x40`
    /// - Cursor at `FRAME_LEN`: the cursor goes back to 0, the byte is dropped
    ///   and the channel set is rebuilt from the buffered frame
    /// - Otherwise the byte is stored as payload
    ///
    /// # Errors
    /// - [`DecoderError::NotStarted`] if [`begin()`](Self::begin) has not been called
    /// - [`DecoderError::Serial`] if the byte source failed; no byte is consumed
    pub fn poll_once(&mut self) -> Result<Poll, DecoderError> {
        if !self.started {
            return Err(DecoderError::NotStarted);
        }

        let byte = match self.rx.read() {
            Ok(byte) => byte,
            Err(nb::Error::WouldBlock) => return Ok(Poll::Idle),
            Err(nb::Error::Other(e)) => {
                let err = DecoderError::Serial(e.kind());
                warning!("fsa8s: {}", err);
                return Err(err);
            }
        };

        if let Some(frame) = self.buf.take_frame() {
            self.channels.update(&frame, &self.config);
            self.frames_completed = self.frames_completed.wrapping_add(1);
            debug!("fsa8s: frame {} complete", self.frames_completed);
            return Ok(Poll::FrameComplete);
        }

        match self.buf.push(byte) {
            Push::Stored => Ok(Poll::Stored(self.buf.phase())),
            Push::Rejected | Push::Full => {
                self.bytes_discarded = self.bytes_discarded.wrapping_add(1);
                trace!("fsa8s: dropped {} at cursor {}", byte, self.buf.cursor());
                Ok(Poll::Discarded(self.buf.phase()))
            }
        }
    }

    /// Raw and scaled values of the last completed frame.
    pub fn channels(&self) -> &ChannelSet<CHANNELS> {
        &self.channels
    }

    /// Raw channel values of the last completed frame.
    pub fn raw(&self) -> &[i32; CHANNELS] {
        &self.channels.raw
    }

    /// Scaled channel values of the last completed frame.
    pub fn scaled(&self) -> &[i32; CHANNELS] {
        &self.channels.scaled
    }

    /// Raw value of channel `index`, or `None` if out of range.
    pub fn raw_channel(&self, index: usize) -> Option<i32> {
        self.channels.raw.get(index).copied()
    }

    /// Scaled value of channel `index`, or `None` if out of range.
    pub fn scaled_channel(&self, index: usize) -> Option<i32> {
        self.channels.scaled.get(index).copied()
    }

    /// Current framing state.
    pub fn phase(&self) -> Phase {
        self.buf.phase()
    }

    /// Current write position in the frame buffer.
    pub fn cursor(&self) -> usize {
        self.buf.cursor()
    }

    /// Whether [`begin()`](Self::begin) has been called.
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// The decoder's configuration.
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Gives the byte source back, dropping the decoder.
    pub fn release(self) -> RX {
        self.rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::serial::{Mock as SerialMock, Transaction as SerialTransaction};
    use embedded_hal_nb::serial::{ErrorKind, ErrorType};
    use std::collections::VecDeque;

    /// Byte source replaying a fixed stream, then reporting `WouldBlock`.
    #[derive(Debug, Default)]
    struct Stream {
        bytes: VecDeque<u8>,
        reads: usize,
    }

    impl Stream {
        fn new(bytes: &[u8]) -> Self {
            Self {
                bytes: bytes.iter().copied().collect(),
                reads: 0,
            }
        }
    }

    impl ErrorType for Stream {
        type Error = ErrorKind;
    }

    impl Read<u8> for Stream {
        fn read(&mut self) -> nb::Result<u8, Self::Error> {
            self.reads += 1;
            self.bytes.pop_front().ok_or(nb::Error::WouldBlock)
        }
    }

    fn started(bytes: &[u8]) -> FrameDecoder<Stream> {
        let mut decoder = FrameDecoder::new(Stream::new(bytes), DecoderConfig::default());
        decoder.begin();
        decoder
    }

    fn drain<const C: usize, const F: usize>(
        decoder: &mut FrameDecoder<Stream, C, F>,
    ) -> Vec<Poll> {
        let mut polls = Vec::new();
        loop {
            match decoder.poll_once() {
                Ok(Poll::Idle) => return polls,
                Ok(poll) => polls.push(poll),
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
    }

    /// 32-byte frame carrying `values` followed by `pad` padding.
    fn frame(values: &[u16], pad: u8) -> Vec<u8> {
        let mut bytes = vec![0x20, 0x40];
        for v in values {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        bytes.resize(DEFAULT_FRAME_LEN, pad);
        bytes
    }

    const VALUES: [u16; 6] = [1000, 1200, 1500, 1800, 2000, 1100];

    #[test]
    fn test_decoder_initialization() {
        let decoder: FrameDecoder<Stream> =
            FrameDecoder::new(Stream::default(), DecoderConfig::default());
        assert!(!decoder.is_started());
        assert_eq!(decoder.cursor(), 0);
        assert_eq!(decoder.phase(), Phase::SeekHeader1);
        assert_eq!(decoder.raw(), &[0; 6]);
        assert_eq!(decoder.scaled(), &[0; 6]);
        assert_eq!(decoder.config().baud_rate, 115_200);
    }

    #[test]
    fn test_poll_before_begin_is_rejected() {
        let mut decoder: FrameDecoder<Stream> =
            FrameDecoder::new(Stream::new(&[0x20]), DecoderConfig::default());
        assert_eq!(decoder.poll_once(), Err(DecoderError::NotStarted));
        // The byte source was not touched
        assert_eq!(decoder.release().reads, 0);
    }

    #[test]
    fn test_idle_poll_is_a_no_op() {
        let mut decoder = started(&[]);
        for _ in 0..10 {
            assert_eq!(decoder.poll_once(), Ok(Poll::Idle));
        }
        assert_eq!(decoder.cursor(), 0);
        assert_eq!(decoder.bytes_discarded, 0);
    }

    #[test]
    fn test_end_to_end_frame() {
        let mut bytes = frame(&VALUES, 0xa5);
        bytes.push(0x00);
        let mut decoder = started(&bytes);

        for _ in 0..DEFAULT_FRAME_LEN {
            assert!(matches!(decoder.poll_once(), Ok(Poll::Stored(_))));
        }
        // Buffer full but nothing published yet
        assert_eq!(decoder.phase(), Phase::Complete);
        assert_eq!(decoder.raw(), &[0; 6]);

        assert_eq!(decoder.poll_once(), Ok(Poll::FrameComplete));
        assert_eq!(decoder.raw(), &[1000, 1200, 1500, 1800, 2000, 1100]);
        assert_eq!(decoder.scaled(), &[0, 51, 127, 204, 255, 25]);
        assert_eq!(decoder.cursor(), 0);
        assert_eq!(decoder.frames_completed, 1);
        assert_eq!(decoder.raw_channel(2), Some(1500));
        assert_eq!(decoder.scaled_channel(5), Some(25));
        assert_eq!(decoder.scaled_channel(6), None);
    }

    #[test]
    fn test_raw_value_is_low_byte_first() {
        let mut bytes = vec![0x20, 0x40, 0x34, 0x12, 0xff, 0x00];
        bytes.resize(DEFAULT_FRAME_LEN, 0);
        bytes.push(0);
        let mut decoder = started(&bytes);
        let _ = drain(&mut decoder);
        assert_eq!(decoder.raw_channel(0), Some(0x1234));
        assert_eq!(decoder.raw_channel(1), Some(0x00ff));
    }

    #[test]
    fn test_unclamped_scaling_passes_through() {
        let mut bytes = frame(&[500, 2500, 0, 0, 0, 0], 0);
        bytes.push(0);
        let mut decoder = started(&bytes);
        let _ = drain(&mut decoder);
        assert_eq!(decoder.raw_channel(0), Some(500));
        assert!(decoder.scaled_channel(0).is_some_and(|v| v < 0));
        assert!(decoder.scaled_channel(1).is_some_and(|v| v > 255));
    }

    #[test]
    fn test_clamped_scaling() {
        let mut bytes = frame(&[500, 2500, 1500, 0, 0, 0], 0);
        bytes.push(0);
        let mut decoder: FrameDecoder<Stream> =
            FrameDecoder::new(Stream::new(&bytes), DecoderConfig::new().with_clamp(true));
        decoder.begin();
        let _ = drain(&mut decoder);
        assert_eq!(&decoder.scaled()[..3], &[0, 255, 127]);
    }

    #[test]
    fn test_wide_scaled_range_with_max_raw_value() {
        let mut bytes = frame(&[u16::MAX, 1000, 0, 0, 0, 0], 0);
        bytes.push(0);
        let config = DecoderConfig::new().with_scaled_range(0, 100_000);
        let mut decoder: FrameDecoder<Stream> = FrameDecoder::new(Stream::new(&bytes), config);
        decoder.begin();

        let polls = drain(&mut decoder);
        assert_eq!(polls.last(), Some(&Poll::FrameComplete));
        assert_eq!(decoder.raw_channel(0), Some(65_535));
        assert_eq!(decoder.scaled_channel(0), Some(6_453_500));
        assert_eq!(decoder.scaled_channel(1), Some(0));
    }

    #[test]
    fn test_cursor_resets_and_next_byte_seeks_header() {
        let mut bytes = frame(&VALUES, 0);
        // Completion trigger, then a second frame
        bytes.push(0x99);
        bytes.extend(frame(&[1100; 6], 0));
        bytes.push(0x99);
        let mut decoder = started(&bytes);

        let polls = drain(&mut decoder);
        assert_eq!(polls.iter().filter(|p| **p == Poll::FrameComplete).count(), 2);
        assert_eq!(decoder.raw(), &[1100; 6]);
        assert_eq!(decoder.frames_completed, 2);
        assert_eq!(decoder.bytes_discarded, 0);
    }

    #[test]
    fn test_completion_byte_is_dropped() {
        // Back-to-back frames: the second header's 0x20 triggers completion
        // and is lost, so the second frame is never assembled.
        let mut bytes = frame(&VALUES, 0);
        bytes.extend(frame(&[1100; 6], 0));
        let mut decoder = started(&bytes);

        let _ = drain(&mut decoder);
        assert_eq!(decoder.frames_completed, 1);
        assert_eq!(decoder.raw(), &[1000, 1200, 1500, 1800, 2000, 1100]);
        assert_eq!(decoder.phase(), Phase::SeekHeader1);
    }

    #[test]
    fn test_interleaved_garbage() {
        let mut bytes = vec![0x41, 0x20, 0x41, 0x40];
        bytes.extend_from_slice(&frame(&VALUES, 0x11)[2..]);
        bytes.push(0x00);
        let mut decoder = started(&bytes);

        assert_eq!(decoder.poll_once(), Ok(Poll::Discarded(Phase::SeekHeader1)));
        assert_eq!(decoder.poll_once(), Ok(Poll::Stored(Phase::SeekHeader2)));
        assert_eq!(decoder.poll_once(), Ok(Poll::Discarded(Phase::SeekHeader2)));
        assert_eq!(decoder.cursor(), 1);
        assert_eq!(decoder.poll_once(), Ok(Poll::Stored(Phase::Accumulate)));

        let polls = drain(&mut decoder);
        assert_eq!(polls.last(), Some(&Poll::FrameComplete));
        assert_eq!(decoder.raw(), &[1000, 1200, 1500, 1800, 2000, 1100]);
        assert_eq!(decoder.bytes_discarded, 2);
    }

    #[test]
    fn test_stalled_header_never_completes() {
        let mut bytes = vec![0x20];
        for _ in 0..100 {
            bytes.extend_from_slice(&[0x41, 0x20]);
        }
        let mut decoder = started(&bytes);

        let polls = drain(&mut decoder);
        assert!(!polls.contains(&Poll::FrameComplete));
        assert_eq!(decoder.phase(), Phase::SeekHeader2);
        assert_eq!(decoder.bytes_discarded, 200);
        assert_eq!(decoder.raw(), &[0; 6]);
    }

    #[test]
    fn test_no_header_pair_never_completes() {
        let bytes: Vec<u8> = (0..=255u8).filter(|b| *b != 0x20).cycle().take(1024).collect();
        let mut decoder = started(&bytes);

        let polls = drain(&mut decoder);
        assert!(polls.iter().all(|p| *p == Poll::Discarded(Phase::SeekHeader1)));
        assert_eq!(decoder.frames_completed, 0);
        assert_eq!(decoder.raw(), &[0; 6]);
    }

    #[test]
    fn test_minimal_frame_length() {
        let bytes = [0x20, 0x40, 0xe8, 0x03, 0xd0, 0x07, 0x00];
        let mut decoder: FrameDecoder<Stream, 2, 6> =
            FrameDecoder::new(Stream::new(&bytes), DecoderConfig::default());
        decoder.begin();
        let polls = drain(&mut decoder);
        assert_eq!(polls.last(), Some(&Poll::FrameComplete));
        assert_eq!(decoder.raw(), &[1000, 2000]);
        assert_eq!(decoder.scaled(), &[0, 255]);
    }

    #[test]
    fn test_begin_resets_state() {
        let mut bytes = frame(&VALUES, 0);
        bytes.extend_from_slice(&[0x00, 0x20, 0x40]);
        let mut decoder = started(&bytes);
        let _ = drain(&mut decoder);
        assert_eq!(decoder.cursor(), 2);

        decoder.begin();
        assert_eq!(decoder.cursor(), 0);
        assert_eq!(decoder.raw(), &[0; 6]);
        assert_eq!(decoder.frames_completed, 0);
    }

    #[test]
    fn test_serial_mock_bytes_and_would_block() {
        let expectations = [
            SerialTransaction::read(0x20),
            SerialTransaction::read_error(nb::Error::WouldBlock),
            SerialTransaction::read(0x40),
        ];
        let serial = SerialMock::new(&expectations);
        let mut decoder: FrameDecoder<SerialMock<u8>> =
            FrameDecoder::new(serial, DecoderConfig::default());
        decoder.begin();

        assert_eq!(decoder.poll_once(), Ok(Poll::Stored(Phase::SeekHeader2)));
        assert_eq!(decoder.poll_once(), Ok(Poll::Idle));
        assert_eq!(decoder.cursor(), 1);
        assert_eq!(decoder.poll_once(), Ok(Poll::Stored(Phase::Accumulate)));
        decoder.release().done();
    }

    #[test]
    fn test_serial_error_leaves_state_untouched() {
        let expectations = [
            SerialTransaction::read(0x20),
            SerialTransaction::read_error(nb::Error::Other(ErrorKind::Overrun)),
        ];
        let serial = SerialMock::new(&expectations);
        let mut decoder: FrameDecoder<SerialMock<u8>> =
            FrameDecoder::new(serial, DecoderConfig::default());
        decoder.begin();

        assert_eq!(decoder.poll_once(), Ok(Poll::Stored(Phase::SeekHeader2)));
        assert_eq!(
            decoder.poll_once(),
            Err(DecoderError::Serial(ErrorKind::Overrun))
        );
        assert_eq!(decoder.cursor(), 1);
        assert_eq!(decoder.bytes_discarded, 0);
        decoder.release().done();
    }
}
