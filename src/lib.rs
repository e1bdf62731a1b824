//! # fsa8s
//!
//! A portable, no_std Rust decoder for the serial channel stream of the FlySky
//! FS-A8S radio-control receiver.
//!
//! The receiver emits a continuous, unframed byte stream. This crate finds the
//! `0x20 0x40` frame header in it, collects the fixed-size frame, and decodes
//! the little-endian channel values into raw (~1000–2000) and scaled (0–255)
//! arrays for a control loop.
//!
//! This crate implements the decoder using:
//! - `embedded-hal-nb` serial traits for the byte source
//! - a fixed-capacity `heapless` buffer with no allocation
//! - interrupt-safe global access with `critical-section`
//! - optional poll sources using either timer interrupts or blocking delay
//!
//! ## Crate features
//! | Feature               | Description |
//! |-----------------------|-------------|
//! | `std`                 | Builds against `std` |
//! | `delay-loop`          | Uses `embedded_hal::delay::DelayNs` for poll timing |
//! | `timer-isr` (default) | Uses `critical_section::with` for interrupt-driven polling |
//! | `defmt-0-3`           | Uses `defmt` logging |
//! | `log`                 | Uses `log` logging |
//!
//! ## Software Features
//!
//! - **Byte-at-a-time framing**: one byte per poll, never blocks
//! - Literal two-byte header synchronization
//! - Compile-time channel count and frame length (defaults 6 and 32)
//! - Unclamped integer rescaling, with opt-in clamping
//!
//! ## Usage
//!
//! ```rust
//! # use embedded_hal_mock::eh1::serial::{Mock as Serial, Transaction};
//! use fsa8s::config::DecoderConfig;
//! use fsa8s::decoder::FrameDecoder;
//!
//! # let uart_rx = Serial::<u8>::new(&[Transaction::read(0x20)]);
//! let mut decoder: FrameDecoder<_> = FrameDecoder::new(uart_rx, DecoderConfig::default());
//! decoder.begin();
//! loop {
//!     let _ = decoder.poll_once(); // Call at least once per byte time (~86 µs at 115200 baud)
//!     # break;
//! }
//! # decoder.release().done();
//! ```
//!
//! Or, use `run_poll_loop()` with a `DelayNs` implementation:
//!
//! ```rust,ignore
//! fsa8s::timer::run_poll_loop(&mut decoder, &mut delay, 80, |channels| { /* ... */ });
//! ```
//!
//! ## Integration Notes
//!
//! - The serial peripheral must be configured (115200 baud by default) before
//!   its receiver half is handed to the decoder
//! - There are no checksums; a corrupted frame yields garbage channel values
//! - Only one decoder instance should be polled per serial port
//!
//! --
//! Designed for `#![no_std]` use in resource-constrained embedded environments.

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(feature = "timer-isr")]
pub use critical_section;

pub use embedded_hal_nb;
pub use heapless;

pub(crate) mod fmt;

pub mod channels;
pub mod config;
pub mod consts;
pub mod decoder;
pub mod error;
pub mod frame;
pub mod scale;
pub mod timer;
