//! Poll scheduling utilities for the frame decoder.
//!
//! [`FrameDecoder::poll_once`](crate::decoder::FrameDecoder::poll_once) consumes at
//! most one byte per call, so it has to be called at least once per byte time or
//! the UART's receive register overruns. This module helps drive it at that rate,
//! either from an interrupt service routine using `critical_section::with`
//! (`timer-isr` feature) or from a busy-loop delay (`delay-loop` feature).
//!
//! Contains:
//! - `byte_period_ns` / `poll_interval_us`: byte timing for a given baud rate
//! - `compute_ocr_value`: runtime OCR calculator for a byte-rate polling timer
//! - `const_ocr_value`: compile-time OCR calculator
//! - `run_poll_loop` and `poll_for`: blocking drivers for `DelayNs` (feature `delay-loop`)
//! - `global_decoder_poll` and `poll_fsa8s_decoder!()`: interrupt-based wrappers
//!   (feature `timer-isr`)
//!
//! Byte times at common receiver rates (8N1):
//!
//! | BAUD    | Byte period | Max poll interval |
//! |---------|-------------|-------------------|
//! |   9600  |   1041.7 µs |           1041 µs |
//! |  57600  |    173.6 µs |            173 µs |
//! | 115200  |     86.8 µs |             86 µs |

use libm::floor;

#[cfg(feature = "delay-loop")]
mod delay;
#[cfg_attr(feature = "delay-loop", allow(unused_imports))]
#[cfg(feature = "delay-loop")]
pub use delay::*;

#[cfg(feature = "timer-isr")]
mod isr;
#[cfg_attr(feature = "timer-isr", allow(unused_imports))]
#[cfg(feature = "timer-isr")]
pub use isr::*;

#[cfg(feature = "timer-isr")]
mod macros;
#[cfg_attr(feature = "timer-isr", allow(unused_imports))]
#[cfg(feature = "timer-isr")]
pub use macros::*;

/// Bits on the wire per byte: start bit, 8 data bits, stop bit.
pub const BITS_PER_BYTE: u32 = 10;
/// 1,000,000,000 nanoseconds = 1 second
pub const NANOSECONDS_PER_SECOND: u64 = 1_000_000_000;
/// 1,000 nanoseconds = 1 microsecond
pub const NANOSECONDS_PER_MICROSECOND: u64 = 1_000;

/// Time one byte occupies on the wire, in nanoseconds (truncated).
pub const fn byte_period_ns(baud_rate: u32) -> u64 {
    BITS_PER_BYTE as u64 * NANOSECONDS_PER_SECOND / baud_rate as u64
}

/// Longest poll interval, in whole microseconds, that still keeps up with the
/// byte rate.
pub const fn poll_interval_us(baud_rate: u32) -> u32 {
    (byte_period_ns(baud_rate) / NANOSECONDS_PER_MICROSECOND) as u32
}

/// Computes the OCR value for an AVR timer (CTC mode) firing once per byte time.
///
/// # Arguments
/// - `f_cpu`: CPU frequency in Hz
/// - `prescaler`: timer prescaler (e.g., 8, 64, 256)
/// - `baud_rate`: serial bit rate of the receiver link (e.g., 115200)
///
/// # Returns
/// - OCR value for OCRnA, rounded down so the timer never fires slower than
///   bytes arrive
pub fn compute_ocr_value(f_cpu: u32, prescaler: u32, baud_rate: u32) -> u16 {
    let ticks_per_second: f64 = f_cpu as f64 / prescaler as f64;
    let ticks_per_byte: f64 = ticks_per_second * BITS_PER_BYTE as f64 / baud_rate as f64;
    floor(ticks_per_byte) as u16
}

/// Compile-time OCR value calculator
///
/// # Arguments
/// - `f_cpu`: CPU frequency in Hz
/// - `prescaler`: timer prescaler (e.g., 8, 64, 256)
/// - `baud_rate`: serial bit rate of the receiver link (e.g., 115200)
///
/// # Returns
/// - OCR value for OCRnA (truncated)
pub const fn const_ocr_value(f_cpu: u32, prescaler: u32, baud_rate: u32) -> u16 {
    ((f_cpu / prescaler) as u64 * BITS_PER_BYTE as u64 / baud_rate as u64) as u16
}
