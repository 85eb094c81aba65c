use thiserror::Error;

/// Errors reported by [`PaddedDeque`](crate::PaddedDeque) and its
/// configuration.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum DequeError {
    /// A padding mode string did not name one of the known modes.
    #[error(
        "invalid padding mode `{0}`: expected \"right\", \"left\", \"rightonly\", \"leftonly\" or \"equal\""
    )]
    InvalidPaddingMode(String),

    /// A checked access used an index outside the live window.
    #[error("index {index} is out of bounds for a deque of length {len}")]
    IndexOutOfBounds {
        /// The index as given by the caller, possibly negative.
        index: isize,
        /// The deque length at the time of the access.
        len: usize,
    },
}

/// Result alias for fallible deque operations.
pub type Result<T> = std::result::Result<T, DequeError>;
