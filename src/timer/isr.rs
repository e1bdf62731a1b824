use crate::channels::ChannelSet;
use crate::config::DecoderConfig;
use crate::decoder::{FrameDecoder, Poll};
use crate::error::DecoderError;
use core::cell::RefCell;
use critical_section::Mutex;
use embedded_hal_nb::serial::Read;

/// A decoder shared between an interrupt handler and the main loop.
pub type GlobalDecoder<RX, const CHANNELS: usize, const FRAME_LEN: usize> =
    Mutex<RefCell<Option<FrameDecoder<RX, CHANNELS, FRAME_LEN>>>>;

/// Used to initialize the global static `FrameDecoder` for use with
/// `critical_section`.
///
/// # Returns
/// * An empty mutable ref-cell
///
/// # Example
/// ```rust,ignore
/// use fsa8s::timer::{GlobalDecoder, global_decoder_init};
/// use some_hal::UartRx;
///
/// static DECODER: GlobalDecoder<UartRx, 6, 32> = global_decoder_init();
/// ```
pub const fn global_decoder_init<RX: Read<u8>, const CHANNELS: usize, const FRAME_LEN: usize>()
-> GlobalDecoder<RX, CHANNELS, FRAME_LEN> {
    Mutex::new(RefCell::new(None))
}

/// Builds a decoder around `rx`, starts it, and stores it in the global.
///
/// Any decoder already stored is dropped.
///
/// # Example
/// ```rust,ignore
/// main() {
///     global_decoder_setup(&DECODER, uart_rx, DecoderConfig::default());
/// }
/// ```
pub fn global_decoder_setup<RX: Read<u8>, const CHANNELS: usize, const FRAME_LEN: usize>(
    global_decoder: &'static GlobalDecoder<RX, CHANNELS, FRAME_LEN>,
    rx: RX,
    config: DecoderConfig,
) {
    let mut decoder = FrameDecoder::new(rx, config);
    decoder.begin();
    critical_section::with(|cs| {
        let _ = global_decoder.borrow(cs).replace(Some(decoder));
    });
}

/// Polls the global decoder once. Call this from the timer or UART RX interrupt.
///
/// # Returns
/// * `None` if the decoder has not been set up yet
/// * The result of [`FrameDecoder::poll_once`] otherwise
///
/// # Example
/// ```rust,ignore
/// #[interrupt]
/// fn TIM2() {
///     let _ = global_decoder_poll(&DECODER);
/// }
/// ```
pub fn global_decoder_poll<RX: Read<u8>, const CHANNELS: usize, const FRAME_LEN: usize>(
    global_decoder: &'static GlobalDecoder<RX, CHANNELS, FRAME_LEN>,
) -> Option<Result<Poll, DecoderError>> {
    critical_section::with(|cs| {
        global_decoder
            .borrow(cs)
            .borrow_mut()
            .as_mut()
            .map(FrameDecoder::poll_once)
    })
}

/// Copies the channel set of the last completed frame out of the global decoder.
///
/// Returns `None` if the decoder has not been set up yet.
pub fn global_decoder_channels<RX: Read<u8>, const CHANNELS: usize, const FRAME_LEN: usize>(
    global_decoder: &'static GlobalDecoder<RX, CHANNELS, FRAME_LEN>,
) -> Option<ChannelSet<CHANNELS>> {
    critical_section::with(|cs| {
        global_decoder
            .borrow(cs)
            .borrow()
            .as_ref()
            .map(|decoder| *decoder.channels())
    })
}
