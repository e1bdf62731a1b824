//! Constants used across the FS-A8S frame decoder.
//!
//! This module defines the wire-level framing constants of the receiver's
//! serial stream along with the default sizing and scaling parameters.
//!
//! ## Frame layout
//!
//! ```text
//! | 0x20 | 0x40 | ch0 lo | ch0 hi | ch1 lo | ch1 hi | ... | padding ... |
//! |<- header ->|<------------ 2 * CHANNELS bytes ------>|
//! |<------------------------- FRAME_LEN bytes ------------------------->|
//! ```
//!
//! Channel values are little-endian `u16`s. Bytes after the last channel pair
//! carry no decoded meaning but still count towards the frame length.

/// First byte of every frame header.
pub const HEADER_BYTE_1: u8 = 0x20;

/// Second byte of every frame header.
pub const HEADER_BYTE_2: u8 = 0x40;

/// Length (in bytes) of the fixed frame header.
pub const HEADER_LEN: usize = 2;

/// Width (in bytes) of a single encoded channel value.
pub const CHANNEL_WIDTH: usize = 2;

/// Default number of channels decoded from each frame.
pub const DEFAULT_CHANNELS: usize = 6;

/// Default frame length, and therefore buffer capacity, in bytes.
///
/// This is larger than the `HEADER_LEN + CHANNEL_WIDTH * DEFAULT_CHANNELS`
/// bytes actually decoded; the remainder is read and ignored.
pub const DEFAULT_FRAME_LEN: usize = 32;

/// Default serial bit rate of the receiver link.
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Lower bound of the native channel range (stick at minimum).
pub const RAW_MIN: i32 = 1_000;

/// Upper bound of the native channel range (stick at maximum).
pub const RAW_MAX: i32 = 2_000;

/// Lower bound of the scaled output range.
pub const SCALED_MIN: i32 = 0;

/// Upper bound of the scaled output range.
pub const SCALED_MAX: i32 = 255;

/// Minimum frame length able to carry `channels` channel values.
pub const fn min_frame_len(channels: usize) -> usize {
    HEADER_LEN + CHANNEL_WIDTH * channels
}
