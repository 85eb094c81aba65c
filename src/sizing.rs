//! Buffer capacity policy.
//!
//! The buffer is always larger than the deque's maximum size so that both
//! ends have slack to grow into before the window has to be shifted. The
//! policy rounds to powers of two, guarantees a minimum amount of slack and
//! caps the automatically added slack for large deques.

/// Capacity used for deques smaller than 4 elements when no padding is
/// requested.
pub const SMALL_BUFFER: usize = 32;

/// Capacity used for deques smaller than 4 elements whose requested padding
/// fits in fewer than 8 slots.
pub const SMALL_PADDED_BUFFER: usize = 8;

/// Minimum slack left after rounding. Below this the capacity is doubled.
pub const MIN_SLACK: usize = 8;

/// Maximum slack the policy adds on top of the requested space.
pub const MAX_AUTO_SLACK: usize = 2048;

/// Step by which an oversized capacity is shrunk back under
/// [`MAX_AUTO_SLACK`].
pub const SLACK_STEP: usize = 128;

/// Computes the buffer capacity for a deque holding up to `max_size`
/// elements, with an optional `padding` hint for each end.
///
/// Without a hint, the buffer gets room for twice `max_size`. With a hint
/// `p`, it gets room for `max_size + 2 * p`. In both cases the result has at
/// least [`MIN_SLACK`] and at most [`MAX_AUTO_SLACK`] slots beyond the
/// requested amount.
///
/// # Panics
///
/// Panics if the capacity does not fit in a `usize`.
///
/// # Example
///
/// ```
/// use padded_deque::sizing::buffer_capacity;
///
/// assert_eq!(buffer_capacity(3, None), 32);
/// assert_eq!(buffer_capacity(10, None), 32);
/// assert!(buffer_capacity(10, Some(10)) >= 10 + 2 * 10);
/// ```
pub fn buffer_capacity(max_size: usize, padding: Option<usize>) -> usize {
    let (requested, mut cap) = match padding {
        None => {
            if max_size < 4 {
                return SMALL_BUFFER;
            }

            let requested = checked(max_size.checked_mul(2));
            let mut cap = next_power_of_two(requested);
            if cap == requested {
                cap = checked(cap.checked_mul(2));
            }
            (requested, cap)
        }
        Some(padding) => {
            let requested = checked(
                padding
                    .checked_mul(2)
                    .and_then(|both| both.checked_add(max_size)),
            );
            if max_size < 4 && requested < SMALL_PADDED_BUFFER {
                return SMALL_PADDED_BUFFER;
            }
            (requested, next_power_of_two(requested))
        }
    };

    while cap - requested < MIN_SLACK {
        cap = checked(cap.checked_mul(2));
    }

    let slack = cap - requested;
    if slack > MAX_AUTO_SLACK {
        // same result as shrinking one step at a time until under the ceiling
        let steps = (slack - MAX_AUTO_SLACK).div_ceil(SLACK_STEP);
        cap -= steps * SLACK_STEP;
    }

    cap
}

/// Returns the smallest power of two greater than or equal to `x`, and never
/// less than 2.
///
/// # Panics
///
/// Panics if the result does not fit in a `usize`.
pub fn next_power_of_two(x: usize) -> usize {
    if x < 2 {
        2
    } else {
        checked(x.checked_next_power_of_two())
    }
}

fn checked(value: Option<usize>) -> usize {
    match value {
        Some(value) => value,
        None => panic!("capacity overflow"),
    }
}
