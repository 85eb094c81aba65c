use crate::error::Result;
use crate::mode::PaddingMode;
use crate::sizing;

/// Construction parameters for a [`PaddedDeque`](crate::PaddedDeque).
///
/// # Example
///
/// ```
/// use padded_deque::{DequeOptions, PaddedDeque, PaddingMode};
///
/// let options = DequeOptions::new(10).padding(10).mode(PaddingMode::Equal);
/// let deque: PaddedDeque<f64> = PaddedDeque::with_options(options);
///
/// assert_eq!(deque.max_size(), 10);
/// assert!(deque.buffer_capacity() >= 10 + 2 * 10);
/// assert_eq!(deque.padding_mode(), PaddingMode::Equal);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct DequeOptions {
    pub(crate) max_size: usize,
    pub(crate) padding: Option<usize>,
    pub(crate) mode: PaddingMode,
    pub(crate) force_buffer_capacity: Option<usize>,
}

impl DequeOptions {
    /// Options for a deque holding at most `max_size` elements, with the
    /// default buffer sizing and [`PaddingMode::Right`].
    pub fn new(max_size: usize) -> Self {
        DequeOptions {
            max_size,
            ..Default::default()
        }
    }

    /// Asks for about `padding` spare slots on each end of the buffer.
    pub fn padding(mut self, padding: usize) -> Self {
        self.padding = Some(padding);
        self
    }

    /// Sets the padding mode.
    pub fn mode(mut self, mode: PaddingMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the padding mode from its name.
    ///
    /// # Errors
    ///
    /// Fails with [`DequeError::InvalidPaddingMode`] when `mode` is not one
    /// of the names accepted by [`PaddingMode`]'s `FromStr`.
    ///
    /// ```
    /// use padded_deque::{DequeError, DequeOptions};
    ///
    /// assert!(DequeOptions::new(5).mode_str("leftonly").is_ok());
    /// assert_eq!(
    ///     DequeOptions::new(5).mode_str("invalid"),
    ///     Err(DequeError::InvalidPaddingMode("invalid".to_string())),
    /// );
    /// ```
    ///
    /// [`DequeError::InvalidPaddingMode`]: crate::DequeError::InvalidPaddingMode
    pub fn mode_str(self, mode: &str) -> Result<Self> {
        Ok(self.mode(mode.parse()?))
    }

    /// Bypasses the sizing policy and uses exactly `capacity` slots, or
    /// `max_size` slots if that is larger.
    pub fn force_buffer_capacity(mut self, capacity: usize) -> Self {
        self.force_buffer_capacity = Some(capacity);
        self
    }

    pub(crate) fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    pub(crate) fn buffer_capacity(&self) -> usize {
        match self.force_buffer_capacity {
            Some(capacity) => capacity.max(self.max_size),
            None => sizing::buffer_capacity(self.max_size, self.padding),
        }
    }
}
