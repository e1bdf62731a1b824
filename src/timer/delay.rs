use crate::channels::ChannelSet;
use crate::decoder::{FrameDecoder, Poll};
use embedded_hal::delay::DelayNs;
use embedded_hal_nb::serial::Read;

/// Polls the decoder `polls` times, sleeping `interval_us` between polls.
///
/// `on_frame` is called with the fresh channel set every time a frame
/// completes. Errors from the byte source are skipped; the next poll retries.
///
/// # Notes
/// - A decoder that has not been started yet is started here with
///   [`FrameDecoder::begin`], so this never spins on `NotStarted`.
/// - A decoder that is already started is polled as is; its cursor, channel
///   set and counters are kept.
///
/// # Returns
/// The number of frames completed.
pub fn poll_for<D, RX, F, const CHANNELS: usize, const FRAME_LEN: usize>(
    decoder: &mut FrameDecoder<RX, CHANNELS, FRAME_LEN>,
    delay: &mut D,
    interval_us: u32,
    polls: usize,
    mut on_frame: F,
) -> usize
where
    D: DelayNs,
    RX: Read<u8>,
    F: FnMut(&ChannelSet<CHANNELS>),
{
    if !decoder.is_started() {
        decoder.begin();
    }
    let mut frames = 0;
    for _ in 0..polls {
        if let Ok(Poll::FrameComplete) = decoder.poll_once() {
            frames += 1;
            on_frame(decoder.channels());
        }
        delay.delay_us(interval_us);
    }
    frames
}

/// Runs a blocking loop that repeatedly calls `poll_once()` on the provided decoder.
///
/// This is a simple timing loop for use in environments where interrupts are unavailable
/// or undesired. Use [`poll_interval_us`](super::poll_interval_us) to pick `interval_us`.
///
/// # Arguments
/// - `decoder`: A mutable reference to a `FrameDecoder` instance.
/// - `delay`: A delay provider implementing `DelayNs`, typically from the HAL.
/// - `interval_us`: The delay between each poll, in microseconds (e.g. 80 at 115200 baud).
/// - `on_frame`: Called with the channel set each time a frame completes.
///
/// # Example
/// ```rust,no_run
/// # use embedded_hal_mock::eh1::{delay::NoopDelay, serial::Mock as Serial};
/// use fsa8s::config::DecoderConfig;
/// use fsa8s::decoder::FrameDecoder;
/// use fsa8s::timer::{poll_interval_us, run_poll_loop};
///
/// # let serial = Serial::<u8>::new(&[]);
/// # let mut delay = NoopDelay::new();
/// let config = DecoderConfig::default();
/// let mut decoder: FrameDecoder<_> = FrameDecoder::new(serial, config);
/// run_poll_loop(&mut decoder, &mut delay, poll_interval_us(config.baud_rate), |channels| {
///     let _throttle = channels.scaled[2];
/// });
/// ```
///
/// # Notes
/// - This loop will never return; it is intended for single-purpose polling firmware.
/// - For more efficient or concurrent applications, prefer interrupt-driven polling.
pub fn run_poll_loop<D, RX, F, const CHANNELS: usize, const FRAME_LEN: usize>(
    decoder: &mut FrameDecoder<RX, CHANNELS, FRAME_LEN>,
    delay: &mut D,
    interval_us: u32,
    mut on_frame: F,
) -> !
where
    D: DelayNs,
    RX: Read<u8>,
    F: FnMut(&ChannelSet<CHANNELS>),
{
    loop {
        let _ = poll_for(decoder, delay, interval_us, usize::MAX, &mut on_frame);
    }
}
