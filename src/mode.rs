use std::fmt;
use std::str::FromStr;

use crate::error::DequeError;

/// Where the spare slots of the buffer are placed, and therefore which end
/// of the deque can grow longer before its window has to be shifted.
///
/// The mode is fixed at construction. It sets the anchor offset, the start
/// position the window returns to after every shift.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum PaddingMode {
    /// Spare slots are split evenly between both ends.
    Equal,

    /// About three quarters of the spare slots are after the window, favoring
    /// [`put`](crate::PaddedDeque::put).
    #[default]
    Right,

    /// About three quarters of the spare slots are before the window,
    /// favoring [`put_left`](crate::PaddedDeque::put_left).
    Left,

    /// All spare slots are after the window. A `put_left` on the full buffer
    /// edge always shifts, and interior removals always close toward the
    /// front.
    RightOnly,

    /// All spare slots are before the window. A `put` on the full buffer edge
    /// always shifts, and interior removals always close toward the back.
    LeftOnly,
}

impl PaddingMode {
    /// The long name of the mode, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            PaddingMode::Equal => "equal",
            PaddingMode::Right => "right",
            PaddingMode::Left => "left",
            PaddingMode::RightOnly => "rightonly",
            PaddingMode::LeftOnly => "leftonly",
        }
    }

    /// Whether all the padding sits on a single side.
    pub fn is_one_sided(self) -> bool {
        matches!(self, PaddingMode::RightOnly | PaddingMode::LeftOnly)
    }

    /// Computes the anchor offset for a buffer of `buffer_capacity` slots
    /// holding up to `max_size` elements.
    ///
    /// Returns the offset along with the mode actually in effect: with fewer
    /// than two spare slots there is nothing to distribute, so the anchor is
    /// forced to 0 and the mode to [`RightOnly`](PaddingMode::RightOnly)
    /// whatever was asked for.
    pub(crate) fn anchor(self, buffer_capacity: usize, max_size: usize) -> (usize, PaddingMode) {
        debug_assert!(buffer_capacity >= max_size);
        let pad = buffer_capacity - max_size;
        let left_pad = pad / 2;

        if pad < 2 {
            return (0, PaddingMode::RightOnly);
        }

        let anchor = match self {
            PaddingMode::Equal => left_pad,
            PaddingMode::Right => {
                let anchor = left_pad / 2;
                if anchor == 0 && pad > 2 {
                    1
                } else {
                    anchor
                }
            }
            PaddingMode::RightOnly => 0,
            PaddingMode::Left => {
                let anchor = ((3 * pad) / 4).min(pad);
                if anchor == pad && pad > 2 {
                    pad - 1
                } else {
                    anchor
                }
            }
            PaddingMode::LeftOnly => pad,
        };

        (anchor, self)
    }
}

impl fmt::Display for PaddingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaddingMode {
    type Err = DequeError;

    /// Parses a long mode name or its short flag (`e`, `r`, `l`, `ro`, `lo`),
    /// ignoring case and surrounding whitespace.
    ///
    /// ```
    /// use padded_deque::PaddingMode;
    ///
    /// assert_eq!("RightOnly".parse::<PaddingMode>(), Ok(PaddingMode::RightOnly));
    /// assert_eq!(" lo ".parse::<PaddingMode>(), Ok(PaddingMode::LeftOnly));
    /// assert!("middle".parse::<PaddingMode>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "equal" | "e" => Ok(PaddingMode::Equal),
            "right" | "r" => Ok(PaddingMode::Right),
            "left" | "l" => Ok(PaddingMode::Left),
            "rightonly" | "ro" => Ok(PaddingMode::RightOnly),
            "leftonly" | "lo" => Ok(PaddingMode::LeftOnly),
            _ => Err(DequeError::InvalidPaddingMode(s.to_string())),
        }
    }
}
