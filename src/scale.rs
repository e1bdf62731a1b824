//! Integer linear rescaling of channel values.

/// An inclusive integer range used as either side of a linear mapping.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct ScaleRange {
    /// Value mapped from / to the bottom of the range.
    pub low: i32,
    /// Value mapped from / to the top of the range.
    pub high: i32,
}

impl ScaleRange {
    /// Creates a new range. `low` may be greater than `high` for an inverted mapping.
    pub const fn new(low: i32, high: i32) -> Self {
        Self { low, high }
    }

    /// Difference `high - low`, widened so extreme bounds cannot overflow.
    pub const fn span(&self) -> i64 {
        self.high as i64 - self.low as i64
    }

    /// Restricts `value` to lie between `low` and `high`, whichever order they are in.
    pub const fn clamp(&self, value: i32) -> i32 {
        let (min, max) = if self.low <= self.high {
            (self.low, self.high)
        } else {
            (self.high, self.low)
        };
        if value < min {
            min
        } else if value > max {
            max
        } else {
            value
        }
    }
}

/// Maps `value` from the `from` range onto the `to` range.
///
/// Computes `to.low + (value - from.low) * (to.high - to.low) / (from.high - from.low)`
/// with truncating integer division. The result is **not** clamped, so inputs
/// outside `from` produce outputs outside `to`.
///
/// The arithmetic is carried out in `i64`; a result beyond `i32` saturates.
/// A zero-width `from` range maps every input to `to.low`.
pub const fn map_range(value: i32, from: ScaleRange, to: ScaleRange) -> i32 {
    let span = from.span();
    if span == 0 {
        return to.low;
    }
    let mapped = to.low as i64 + (value as i64 - from.low as i64) * to.span() / span;
    if mapped > i32::MAX as i64 {
        i32::MAX
    } else if mapped < i32::MIN as i64 {
        i32::MIN
    } else {
        mapped as i32
    }
}
