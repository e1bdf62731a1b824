/// Declares a static global `FSA8S_DECODER` instance protected by a `critical_section` mutex.
///
/// This macro creates a `static` singleton `FSA8S_DECODER` suitable for use in
/// interrupt-based environments, where both the main thread and an ISR need
/// to safely access the shared decoder state.
///
/// # Arguments
/// - `$rx`: The concrete type of the byte source (must implement `embedded_hal_nb::serial::Read<u8>`)
/// - `$channels`, `$frame_len`: Optional channel count and frame length (default 6 and 32)
///
/// # Example
/// ```rust,ignore
/// init_fsa8s_decoder!(MyUartRx);
/// init_fsa8s_decoder!(MyUartRx, 14, 32);
/// ```
#[macro_export]
macro_rules! init_fsa8s_decoder {
    ( $rx:ty ) => {
        $crate::init_fsa8s_decoder!(
            $rx,
            $crate::consts::DEFAULT_CHANNELS,
            $crate::consts::DEFAULT_FRAME_LEN
        );
    };
    ( $rx:ty, $channels:expr, $frame_len:expr ) => {
        pub static FSA8S_DECODER: $crate::timer::GlobalDecoder<$rx, { $channels }, { $frame_len }> =
            $crate::timer::global_decoder_init();
    };
}

/// Initializes the global `FSA8S_DECODER` singleton with a started decoder.
///
/// # Arguments
/// - `$rx`: The byte source (must implement `embedded_hal_nb::serial::Read<u8>`)
/// - `$config`: Optional [`DecoderConfig`](crate::config::DecoderConfig); the default is used if omitted
///
/// # Example
/// ```rust,ignore
/// main() {
///     setup_fsa8s_decoder!(uart_rx);
/// }
/// ```
///
/// # Notes
/// - Must be called inside a critical section-aware context (safe in `main()`).
/// - Requires `init_fsa8s_decoder!` to have been used earlier.
#[macro_export]
macro_rules! setup_fsa8s_decoder {
    ( $rx:expr ) => {
        $crate::setup_fsa8s_decoder!($rx, $crate::config::DecoderConfig::new());
    };
    ( $rx:expr, $config:expr ) => {
        $crate::timer::global_decoder_setup(&FSA8S_DECODER, $rx, $config);
    };
}

/// Calls `poll_once()` on the global `FSA8S_DECODER` if it has been initialized.
///
/// This macro is intended to be invoked from a timer or UART RX ISR at least
/// once per byte time. It evaluates to the same value as
/// [`global_decoder_poll`](crate::timer::global_decoder_poll).
///
/// # Example
/// ```rust,ignore
/// #[interrupt]
/// fn TIM2() {
///     let _ = poll_fsa8s_decoder!();
/// }
/// ```
///
/// # Notes
/// - This macro assumes `FSA8S_DECODER` was declared with `init_fsa8s_decoder!`
///   and initialized via `setup_fsa8s_decoder!`.
/// - Safe to call repeatedly: evaluates to `None` if the decoder hasn't been set up yet.
#[macro_export]
macro_rules! poll_fsa8s_decoder {
    () => {
        $crate::timer::global_decoder_poll(&FSA8S_DECODER)
    };
}
