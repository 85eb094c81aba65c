#![warn(missing_docs)]
#![doc(test(attr(deny(warnings))))]

//! A bounded double-ended queue over a padded linear buffer.
//!
//! [`PaddedDeque`] holds at most [`max_size`] elements. Putting an element
//! into a full deque evicts the element at the opposite end, so the deque
//! always keeps the most recent values pushed from either side.
//!
//! # Padded linear buffer
//!
//! The elements live in a window `[start, end)` of a single buffer that is
//! allocated once and is larger than `max_size`. The spare slots on each side
//! of the window let both ends grow in O(1). When a side runs out, the whole
//! window is shifted back to its anchor offset, which restores the padding
//! on that side.
//!
//! Because the window never wraps around, the content is contiguous at any
//! time and the deque dereferences to a slice, even when it is not mutable.
//! Searching, sorting, reversing, indexing and iterating all go through that
//! slice.
//!
//! # Padding modes
//!
//! The [`PaddingMode`] decides how the spare slots are split between both
//! ends, and therefore which of [`put`] or [`put_left`] shifts less often.
//!
//! [`max_size`]: PaddedDeque::max_size
//! [`put`]: PaddedDeque::put
//! [`put_left`]: PaddedDeque::put_left

use std::fmt;
use std::hash::Hash;
use std::mem::ManuallyDrop;
use std::ops::{Deref, DerefMut};
use std::ptr;

use tracing::{debug, trace};

use buffer::Buffer;
pub use error::{DequeError, Result};
pub use iter::IntoIter;
pub use mode::PaddingMode;
pub use options::DequeOptions;

mod buffer;
mod error;
mod iter;
mod mode;
mod ops;
mod options;
mod removal;
pub mod sizing;

#[cfg(test)]
mod drop_tracker;

/// A bounded double-ended queue implemented with a padded linear buffer.
///
/// ```
/// use padded_deque::PaddedDeque;
///
/// let mut deque = PaddedDeque::new(5);
/// deque.put_many([1, 2, 3, 4, 5]);
///
/// deque.put(6);
/// assert_eq!(deque, [2, 3, 4, 5, 6]);
///
/// deque.put_left(0);
/// assert_eq!(deque, [0, 2, 3, 4, 5]);
/// ```
///
/// Since the elements are contiguous in memory, the deque can be coerced
/// into a slice at any time.
pub struct PaddedDeque<T> {
    buf: Buffer<T>,
    start: usize,
    end: usize,
    max_size: usize,
    anchor: usize,
    mode: PaddingMode,
}

/// The side of the buffer that ran out of padding.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Side {
    Left,
    Right,
}

impl<T> PaddedDeque<T> {
    /// Creates an empty deque holding at most `max_size` elements, with the
    /// default buffer sizing and [`PaddingMode::Right`].
    ///
    /// # Example
    ///
    /// ```
    /// use padded_deque::PaddedDeque;
    ///
    /// let deque: PaddedDeque<u32> = PaddedDeque::new(10);
    /// assert_eq!(deque.max_size(), 10);
    /// assert!(deque.is_empty());
    /// ```
    pub fn new(max_size: usize) -> Self {
        Self::with_options(DequeOptions::new(max_size))
    }

    /// Creates an empty deque from explicit options.
    ///
    /// With fewer than two spare slots in the buffer the requested padding
    /// mode is replaced with [`PaddingMode::RightOnly`]; see
    /// [`padding_mode`](PaddedDeque::padding_mode).
    pub fn with_options(options: DequeOptions) -> Self {
        let max_size = options.max_size;
        let cap = options.buffer_capacity();
        let (anchor, mode) = options.mode.anchor(cap, max_size);

        if mode != options.mode {
            debug!(
                requested = %options.mode,
                max_size,
                buffer_capacity = cap,
                "less than two spare slots, using rightonly padding"
            );
        }
        debug!(max_size, buffer_capacity = cap, anchor, mode = %mode, "allocating padded deque");

        PaddedDeque {
            buf: Buffer::with_capacity(cap),
            start: anchor,
            end: anchor,
            max_size,
            anchor,
            mode,
        }
    }

    /// Creates a full deque holding `max_size` clones of `value`.
    ///
    /// # Example
    ///
    /// ```
    /// use padded_deque::{DequeOptions, PaddedDeque};
    ///
    /// let deque = PaddedDeque::filled(DequeOptions::new(3), 0.5);
    /// assert_eq!(deque, [0.5, 0.5, 0.5]);
    /// ```
    pub fn filled(options: DequeOptions, value: T) -> Self
    where
        T: Clone,
    {
        let mut deque = Self::with_options(options);
        let count = deque.max_size;
        deque.put_many(std::iter::repeat(value).take(count));
        deque
    }

    /// Creates a deque holding `values`.
    ///
    /// The maximum size is taken from `options`, or from the number of
    /// values when that is larger.
    ///
    /// # Example
    ///
    /// ```
    /// use padded_deque::{DequeOptions, PaddedDeque};
    ///
    /// let deque = PaddedDeque::from_sequence([1, 2, 3], DequeOptions::new(10));
    /// assert_eq!(deque.max_size(), 10);
    /// assert_eq!(deque, [1, 2, 3]);
    ///
    /// let deque = PaddedDeque::from_sequence([1, 2, 3], DequeOptions::default());
    /// assert_eq!(deque.max_size(), 3);
    /// ```
    pub fn from_sequence<I>(values: I, options: DequeOptions) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let values: Vec<T> = values.into_iter().collect();
        let max_size = options.max_size.max(values.len());
        let mut deque = Self::with_options(options.with_max_size(max_size));
        deque.put_many(values);
        deque
    }

    /// The maximum number of elements the deque holds.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// The number of slots of the underlying buffer.
    pub fn buffer_capacity(&self) -> usize {
        self.buf.cap()
    }

    /// The padding mode in effect.
    ///
    /// This is the mode given at construction, except when the buffer has
    /// fewer than two spare slots: then it is always
    /// [`PaddingMode::RightOnly`].
    ///
    /// ```
    /// use padded_deque::{DequeOptions, PaddedDeque, PaddingMode};
    ///
    /// let options = DequeOptions::new(5).mode(PaddingMode::Left).force_buffer_capacity(6);
    /// let deque: PaddedDeque<i32> = PaddedDeque::with_options(options);
    /// assert_eq!(deque.padding_mode(), PaddingMode::RightOnly);
    /// ```
    pub fn padding_mode(&self) -> PaddingMode {
        self.mode
    }

    /// The buffer offset the window is moved back to when it is shifted.
    pub fn anchor_offset(&self) -> usize {
        self.anchor
    }

    /// Returns `true` if the deque holds [`max_size`](PaddedDeque::max_size)
    /// elements, so that the next put evicts one.
    pub fn is_full(&self) -> bool {
        self.size() == self.max_size
    }

    /// Options that rebuild a deque with the same maximum size, mode and
    /// buffer capacity.
    pub(crate) fn options(&self) -> DequeOptions {
        DequeOptions::new(self.max_size)
            .mode(self.mode)
            .force_buffer_capacity(self.buf.cap())
    }

    #[inline]
    fn size(&self) -> usize {
        self.end - self.start
    }

    /// Appends an element to the back of the deque.
    ///
    /// If the deque is full, its front element is evicted and returned.
    ///
    /// # Example
    ///
    /// ```
    /// use padded_deque::PaddedDeque;
    ///
    /// let mut deque = PaddedDeque::new(3);
    /// assert_eq!(deque.put(1), None);
    /// deque.put(2);
    /// deque.put(3);
    /// assert_eq!(deque.put(4), Some(1));
    /// assert_eq!(deque, [2, 3, 4]);
    /// ```
    pub fn put(&mut self, value: T) -> Option<T> {
        if self.max_size == 0 {
            return Some(value);
        }

        let evicted = if self.is_full() {
            self.start += 1;
            unsafe { Some(self.buf.read(self.start - 1)) }
        } else {
            None
        };

        if self.end == self.buf.cap() {
            self.shift(Side::Right);
        }

        unsafe {
            self.buf.write(self.end, value);
        }
        self.end += 1;

        evicted
    }

    /// Prepends an element to the front of the deque.
    ///
    /// If the deque is full, its back element is evicted and returned.
    ///
    /// # Example
    ///
    /// ```
    /// use padded_deque::PaddedDeque;
    ///
    /// let mut deque = PaddedDeque::new(3);
    /// deque.put_left(1);
    /// deque.put_left(2);
    /// deque.put_left(3);
    /// assert_eq!(deque.put_left(4), Some(1));
    /// assert_eq!(deque, [4, 3, 2]);
    /// ```
    pub fn put_left(&mut self, value: T) -> Option<T> {
        if self.max_size == 0 {
            return Some(value);
        }

        let evicted = if self.is_full() {
            self.end -= 1;
            unsafe { Some(self.buf.read(self.end)) }
        } else {
            None
        };

        if self.start == 0 {
            self.shift(Side::Left);
        }

        self.start -= 1;
        unsafe {
            self.buf.write(self.start, value);
        }

        evicted
    }

    /// Appends all `values` to the back of the deque, evicting front elements
    /// as needed.
    ///
    /// The result is the same as calling [`put`](PaddedDeque::put) for each
    /// value. When the iterator reports an exact length, the evictions and
    /// the shift are done once for the whole batch, and a batch of at least
    /// `max_size` values replaces the content without touching the evicted
    /// values' slots one at a time.
    ///
    /// # Example
    ///
    /// ```
    /// use padded_deque::PaddedDeque;
    ///
    /// let mut deque = PaddedDeque::new(5);
    /// deque.put_many([7, 9, 11, 13, 15]);
    ///
    /// deque.put_many([1, 2, 3]);
    /// assert_eq!(deque, [13, 15, 1, 2, 3]);
    ///
    /// deque.put_many(1..=7);
    /// assert_eq!(deque, [3, 4, 5, 6, 7]);
    /// ```
    pub fn put_many<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        let mut values = values.into_iter();
        if let (lower, Some(upper)) = values.size_hint() {
            if lower == upper {
                self.put_counted(&mut values, lower);
            }
        }

        // unknown length, or an iterator yielding more than it announced
        for value in values {
            self.put(value);
        }
    }

    /// Prepends all `values` to the front of the deque, evicting back
    /// elements as needed.
    ///
    /// The values end up in reverse order, the same as calling
    /// [`put_left`](PaddedDeque::put_left) for each value.
    ///
    /// # Example
    ///
    /// ```
    /// use padded_deque::PaddedDeque;
    ///
    /// let mut deque = PaddedDeque::new(5);
    /// deque.put_many_left([7, 9, 11, 13, 15]);
    /// assert_eq!(deque, [15, 13, 11, 9, 7]);
    ///
    /// deque.put_many_left([1, 2, 3]);
    /// assert_eq!(deque, [3, 2, 1, 15, 13]);
    /// ```
    pub fn put_many_left<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        let mut values = values.into_iter();
        if let (lower, Some(upper)) = values.size_hint() {
            if lower == upper {
                self.put_counted_left(&mut values, lower);
            }
        }

        for value in values {
            self.put_left(value);
        }
    }

    /// Bulk right insert of `values`, announced to hold `count` items.
    ///
    /// The cursors only advance past slots actually written, so a short
    /// iterator leaves a consistent window.
    fn put_counted<I: Iterator<Item = T>>(&mut self, values: &mut I, count: usize) {
        if count >= self.max_size {
            self.discard_window();
            self.start = self.anchor;
            self.end = self.anchor;
            trace!(count, max_size = self.max_size, "overwriting whole window");

            for value in values.by_ref().skip(count - self.max_size).take(self.max_size) {
                unsafe {
                    self.buf.write(self.end, value);
                }
                self.end += 1;
            }
            return;
        }

        let excess = (self.size() + count).saturating_sub(self.max_size);
        if excess > 0 {
            let from = self.start;
            self.start += excess;
            unsafe { self.buf.drop_range(from, from + excess) }
        }

        if self.end + count >= self.buf.cap() {
            self.shift(Side::Right);
        }

        for value in values.by_ref().take(count) {
            unsafe {
                self.buf.write(self.end, value);
            }
            self.end += 1;
        }
    }

    /// Bulk left insert of `values`, announced to hold `count` items.
    fn put_counted_left<I: Iterator<Item = T>>(&mut self, values: &mut I, count: usize) {
        if count >= self.max_size {
            self.discard_window();
            self.start = self.anchor + self.max_size;
            self.end = self.start;
            trace!(count, max_size = self.max_size, "overwriting whole window");

            for value in values.by_ref().skip(count - self.max_size).take(self.max_size) {
                self.start -= 1;
                unsafe {
                    self.buf.write(self.start, value);
                }
            }
            return;
        }

        let excess = (self.size() + count).saturating_sub(self.max_size);
        if excess > 0 {
            let to = self.end;
            self.end -= excess;
            unsafe { self.buf.drop_range(self.end, to) }
        }

        if self.start < count {
            // make room for the whole batch in front of the anchor
            let len = self.size();
            let new_start = self.anchor + count;
            debug_assert!(new_start + len <= self.buf.cap());
            unsafe {
                self.buf.copy(self.start, new_start, len);
            }
            trace!(old_start = self.start, new_start, len, "relocating window for bulk left insert");
            self.start = new_start;
            self.end = new_start + len;
        }

        for value in values.by_ref().take(count) {
            self.start -= 1;
            unsafe {
                self.buf.write(self.start, value);
            }
        }
    }

    /// Drops every live element. The cursors are left equal but otherwise
    /// untouched.
    fn discard_window(&mut self) {
        let (start, end) = (self.start, self.end);
        self.end = start;
        unsafe { self.buf.drop_range(start, end) }
    }

    /// Moves the window back to the anchor so the exhausted side regains its
    /// padding.
    ///
    /// A left shift leaves one extra slot before the window, which the
    /// pending [`put_left`](PaddedDeque::put_left) fills, so that both sides
    /// end up with the window starting at the anchor.
    fn shift(&mut self, exhausted: Side) {
        let len = self.size();
        let new_start = match exhausted {
            Side::Left => self.anchor + 1,
            Side::Right => self.anchor,
        };
        debug_assert!(
            new_start + len <= self.buf.cap(),
            "shift past the buffer end: {new_start} + {len} > {}",
            self.buf.cap()
        );

        unsafe {
            self.buf.copy(self.start, new_start, len);
        }
        trace!(side = ?exhausted, old_start = self.start, new_start, len, "shifting window");

        self.start = new_start;
        self.end = new_start + len;
    }
}

impl<T> Drop for PaddedDeque<T> {
    fn drop(&mut self) {
        self.discard_window();
    }
}

impl<T> Deref for PaddedDeque<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        unsafe { self.buf.slice(self.start, self.end) }
    }
}

impl<T> DerefMut for PaddedDeque<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        unsafe { self.buf.slice_mut(self.start, self.end) }
    }
}

impl<T: Clone> Clone for PaddedDeque<T> {
    /// Copies the live elements into a new deque with the same maximum size,
    /// padding mode and buffer capacity.
    fn clone(&self) -> Self {
        self.map(T::clone)
    }
}

impl<T: fmt::Debug> fmt::Debug for PaddedDeque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> IntoIterator for PaddedDeque<T> {
    type Item = T;

    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let deque = ManuallyDrop::new(self);
        let buf = unsafe { ptr::read(&deque.buf) };
        IntoIter::new(buf, deque.start, deque.end)
    }
}

impl<'a, T> IntoIterator for &'a PaddedDeque<T> {
    type Item = &'a T;

    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut PaddedDeque<T> {
    type Item = &'a mut T;

    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

macro_rules! impl_partial_eq {
    ([$($n:tt)*] $rhs:ty) => {
        impl<T, U, $($n)*> PartialEq<$rhs> for PaddedDeque<T>
        where
            T: PartialEq<U>,
        {
            fn eq(&self, other: & $rhs) -> bool {
                self.deref() == other.deref()
            }
        }
    };
}

impl_partial_eq!([const N: usize] [U; N]);
impl_partial_eq!([const N: usize] &[U; N]);
impl_partial_eq!([] & [U]);
impl_partial_eq!([] &mut [U]);
impl_partial_eq!([] Vec<U>);
impl_partial_eq!([] PaddedDeque<U>);

impl<T: Eq> Eq for PaddedDeque<T> {}

impl<T: PartialOrd> PartialOrd for PaddedDeque<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord> Ord for PaddedDeque<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash> Hash for PaddedDeque<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.deref().hash(state);
    }
}

impl<T> Extend<T> for PaddedDeque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.put_many(iter);
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for PaddedDeque<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.put_many(iter.into_iter().copied());
    }
}

impl<T, const N: usize> From<[T; N]> for PaddedDeque<T> {
    /// Converts a `[T; N]` into a full `PaddedDeque<T>` of maximum size `N`.
    ///
    /// ```
    /// use padded_deque::PaddedDeque;
    ///
    /// let deque = PaddedDeque::from([1, 2, 3, 4]);
    /// assert_eq!(deque, [1, 2, 3, 4]);
    /// assert!(deque.is_full());
    /// ```
    fn from(value: [T; N]) -> Self {
        Self::from_iter(value)
    }
}

impl<T> From<Vec<T>> for PaddedDeque<T> {
    /// Turns a [`Vec<T>`] into a full [`PaddedDeque<T>`] whose maximum size is
    /// the vector's length.
    fn from(value: Vec<T>) -> Self {
        Self::from_iter(value)
    }
}

impl<T> FromIterator<T> for PaddedDeque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_sequence(iter, DequeOptions::default())
    }
}
