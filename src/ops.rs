use std::cmp::Ordering;
use std::mem;
use std::ops::{Bound, RangeBounds};

use crate::error::{DequeError, Result};
use crate::PaddedDeque;

impl<T> PaddedDeque<T> {
    /// Removes all elements.
    ///
    /// The window is reset to the start of the buffer; its padding is
    /// restored by the next shift.
    ///
    /// # Example
    ///
    /// ```
    /// use padded_deque::PaddedDeque;
    ///
    /// let mut deque = PaddedDeque::from([1, 2, 3]);
    /// deque.clear();
    /// assert!(deque.is_empty());
    ///
    /// deque.put_left(4);
    /// assert_eq!(deque, [4]);
    /// ```
    pub fn clear(&mut self) {
        self.discard_window();
        self.start = 0;
        self.end = 0;
    }

    /// Sorts the elements in ascending order.
    ///
    /// Only a partial order is required. Elements that do not compare equal
    /// to themselves, such as `NaN`, are moved to the back.
    ///
    /// ```
    /// use padded_deque::PaddedDeque;
    ///
    /// let mut deque = PaddedDeque::from([3.0, f64::NAN, 1.0, 2.0]);
    /// deque.sort();
    /// assert_eq!(deque[..3], [1.0, 2.0, 3.0]);
    /// assert!(deque[3].is_nan());
    /// ```
    pub fn sort(&mut self)
    where
        T: PartialOrd,
    {
        self.sort_by(unordered_last);
    }

    /// Returns the index of the first element equal to `value`.
    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|elem| elem == value)
    }

    /// Returns the index of the first element equal to `value` within
    /// `range`. Range bounds past the end of the deque are clamped.
    ///
    /// ```
    /// use padded_deque::PaddedDeque;
    ///
    /// let deque = PaddedDeque::from([1, 2, 1, 2, 1]);
    /// assert_eq!(deque.index_of_in(&1, 1..), Some(2));
    /// assert_eq!(deque.index_of_in(&1, 3..4), None);
    /// assert_eq!(deque.index_of_in(&1, 3..100), Some(4));
    /// ```
    pub fn index_of_in<R>(&self, value: &T, range: R) -> Option<usize>
    where
        T: PartialEq,
        R: RangeBounds<usize>,
    {
        let len = self.len();
        let from = match range.start_bound() {
            Bound::Included(&from) => from,
            Bound::Excluded(&from) => from.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let to = match range.end_bound() {
            Bound::Included(&to) => to.saturating_add(1),
            Bound::Excluded(&to) => to,
            Bound::Unbounded => len,
        }
        .min(len);

        if from >= to {
            return None;
        }
        self[from..to]
            .iter()
            .position(|elem| elem == value)
            .map(|index| index + from)
    }

    /// Returns the indices of all elements equal to `value`, in order.
    ///
    /// ```
    /// use padded_deque::PaddedDeque;
    ///
    /// let deque = PaddedDeque::from([4, 7, 4, 4]);
    /// assert_eq!(deque.positions(&4).collect::<Vec<_>>(), [0, 2, 3]);
    /// ```
    pub fn positions<'a>(&'a self, value: &'a T) -> impl Iterator<Item = usize> + 'a
    where
        T: PartialEq,
    {
        self.iter()
            .enumerate()
            .filter(move |(_, elem)| *elem == value)
            .map(|(index, _)| index)
    }

    /// Counts the elements equal to `value`.
    pub fn count(&self, value: &T) -> usize
    where
        T: PartialEq,
    {
        self.iter().filter(|elem| *elem == value).count()
    }

    /// Returns the element at `index`. A negative index counts back from the
    /// current length, so `-1` is the last element.
    ///
    /// # Errors
    ///
    /// Fails with [`DequeError::IndexOutOfBounds`] when the index falls
    /// outside the deque.
    ///
    /// ```
    /// use padded_deque::{DequeError, PaddedDeque};
    ///
    /// let deque = PaddedDeque::from([5, 4, 3]);
    /// assert_eq!(deque.at(-1), Ok(&3));
    /// assert_eq!(deque.at(3), Err(DequeError::IndexOutOfBounds { index: 3, len: 3 }));
    /// ```
    pub fn at(&self, index: isize) -> Result<&T> {
        let index = self.resolve(index)?;
        Ok(&self[index])
    }

    /// Mutable counterpart of [`at`](PaddedDeque::at).
    pub fn at_mut(&mut self, index: isize) -> Result<&mut T> {
        let index = self.resolve(index)?;
        Ok(&mut self[index])
    }

    /// Replaces the element at `index` and returns the previous one. Indices
    /// are resolved as in [`at`](PaddedDeque::at).
    pub fn replace_at(&mut self, index: isize, value: T) -> Result<T> {
        self.at_mut(index).map(|slot| mem::replace(slot, value))
    }

    fn resolve(&self, index: isize) -> Result<usize> {
        let len = self.len();
        let resolved = if index < 0 {
            index.checked_add_unsigned(len)
        } else {
            Some(index)
        };

        match resolved {
            Some(resolved) if resolved >= 0 && (resolved as usize) < len => Ok(resolved as usize),
            _ => Err(DequeError::IndexOutOfBounds { index, len }),
        }
    }

    /// Builds a deque of another element type from the elements of this one,
    /// with the same maximum size, padding mode and buffer capacity.
    ///
    /// ```
    /// use padded_deque::PaddedDeque;
    ///
    /// let deque = PaddedDeque::from([1, 2, 3]);
    /// let halves = deque.map(|&value| f64::from(value) / 2.0);
    /// assert_eq!(halves, [0.5, 1.0, 1.5]);
    /// assert_eq!(halves.buffer_capacity(), deque.buffer_capacity());
    /// ```
    pub fn map<U, F>(&self, f: F) -> PaddedDeque<U>
    where
        F: FnMut(&T) -> U,
    {
        let mut mapped = PaddedDeque::with_options(self.options());
        mapped.put_many(self.iter().map(f));
        mapped
    }

    /// Clones the deque into a buffer of `capacity` slots, or of
    /// [`max_size`](PaddedDeque::max_size) slots if that is larger.
    pub fn clone_with_capacity(&self, capacity: usize) -> Self
    where
        T: Clone,
    {
        let mut copy = PaddedDeque::with_options(self.options().force_buffer_capacity(capacity));
        copy.put_many(self.iter().cloned());
        copy
    }
}

/// A total order over partially ordered values, placing values that are not
/// comparable with themselves after all others.
fn unordered_last<T: PartialOrd>(a: &T, b: &T) -> Ordering {
    let a_unordered = a.partial_cmp(a).is_none();
    let b_unordered = b.partial_cmp(b).is_none();

    match (a_unordered, b_unordered) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
    }
}

#[cfg(test)]
mod tests {
    use crate::drop_tracker::DropTracker;
    use crate::{DequeError, DequeOptions, PaddedDeque, PaddingMode};

    #[test]
    fn clear_resets_window() {
        let mut deque = PaddedDeque::from([1, 2, 3, 4, 5]);

        deque.clear();

        assert!(deque.is_empty());
        assert_eq!((deque.start, deque.end), (0, 0));
        assert_eq!(deque.max_size(), 5);
    }

    #[test]
    fn clear_drops_elements() {
        let tracker = DropTracker::new();
        let mut deque: PaddedDeque<_> = tracker.wrap_iter([1, 2, 3]).collect();

        deque.clear();
        assert_eq!(tracker.take(), [1, 2, 3]);

        drop(deque);
        assert!(tracker.take().is_empty());
    }

    #[test]
    fn put_after_clear() {
        let mut deque = PaddedDeque::from_sequence([1, 2, 3], DequeOptions::new(5));
        deque.clear();

        deque.put(1);
        deque.put(2);
        assert_eq!(deque, [1, 2]);

        deque.put_left(0);
        // the left shift moves the window back to the anchor
        assert_eq!(deque.start, deque.anchor_offset());
        assert_eq!(deque, [0, 1, 2]);

        deque.put_many_left([9, 8]);
        assert_eq!(deque, [8, 9, 0, 1, 2]);
    }

    #[test]
    fn clone_keeps_layout() {
        let options = DequeOptions::new(5).mode(PaddingMode::Left).force_buffer_capacity(10);
        let deque = PaddedDeque::from_sequence([1, 2, 3], options);

        let copy = deque.clone();

        assert_eq!(copy, deque);
        assert_eq!(copy.max_size(), 5);
        assert_eq!(copy.buffer_capacity(), 10);
        assert_eq!(copy.padding_mode(), PaddingMode::Left);
        assert_eq!(copy.start, copy.anchor_offset());
        assert_ne!(copy.buf.cap(), 0);
    }

    #[test]
    fn clone_is_independent() {
        let mut deque = PaddedDeque::from([1, 2, 3]);
        let copy = deque.clone();

        deque.put(4);
        deque[0] = 20;

        assert_eq!(deque, [20, 3, 4]);
        assert_eq!(copy, [1, 2, 3]);
    }

    #[test]
    fn clone_with_capacity() {
        let deque = PaddedDeque::from_sequence([1, 2, 3], DequeOptions::new(4));

        let copy = deque.clone_with_capacity(100);
        assert_eq!(copy, [1, 2, 3]);
        assert_eq!(copy.buffer_capacity(), 100);
        assert_eq!(copy.max_size(), 4);

        let copy = deque.clone_with_capacity(1);
        assert_eq!(copy.buffer_capacity(), 4);
        assert_eq!(copy.padding_mode(), PaddingMode::RightOnly);
        assert_eq!(copy, [1, 2, 3]);
    }

    #[test]
    fn sort_and_reverse() {
        let mut deque = PaddedDeque::from([3, 1, 4, 2, 5]);

        deque.sort();
        assert_eq!(deque, [1, 2, 3, 4, 5]);

        deque.reverse();
        assert_eq!(deque, [5, 4, 3, 2, 1]);
    }

    #[test]
    fn sort_only_touches_the_window() {
        let mut deque = PaddedDeque::new(4);
        deque.put_many([9, 8, 7, 6, 5]);
        let (start, end) = (deque.start, deque.end);

        deque.sort();

        assert_eq!(deque, [5, 6, 7, 8]);
        assert_eq!((deque.start, deque.end), (start, end));
        // eviction order follows the sorted order
        assert_eq!(deque.put(10), Some(5));
    }

    #[test]
    fn sort_floats_with_nan() {
        let mut deque = PaddedDeque::from([f64::NAN, 2.5, -1.0, f64::NAN, 0.0]);

        deque.sort();

        assert_eq!(deque[..3], [-1.0, 0.0, 2.5]);
        assert!(deque[3].is_nan());
        assert!(deque[4].is_nan());
    }

    #[test]
    fn search() {
        let deque = PaddedDeque::from([1, 2, 3, 2, 1]);

        assert_eq!(deque.index_of(&2), Some(1));
        assert_eq!(deque.index_of(&9), None);
        assert_eq!(deque.index_of_in(&2, 2..), Some(3));
        assert_eq!(deque.index_of_in(&2, ..=1), Some(1));
        assert_eq!(deque.index_of_in(&2, 4..2), None);
        assert_eq!(deque.count(&1), 2);
        assert_eq!(deque.count(&3), 1);
        assert_eq!(deque.count(&0), 0);
        assert_eq!(deque.positions(&1).collect::<Vec<_>>(), [0, 4]);
        assert!(deque.contains(&3));
    }

    #[test]
    fn checked_access() {
        let mut deque = PaddedDeque::from_sequence([10, 20, 30], DequeOptions::new(5));

        assert_eq!(deque.at(0), Ok(&10));
        assert_eq!(deque.at(-3), Ok(&10));
        assert_eq!(deque.at(2), Ok(&30));
        assert_eq!(
            deque.at(3),
            Err(DequeError::IndexOutOfBounds { index: 3, len: 3 })
        );
        assert_eq!(
            deque.at(-4),
            Err(DequeError::IndexOutOfBounds { index: -4, len: 3 })
        );
        assert!(deque.at(isize::MIN).is_err());

        *deque.at_mut(1).unwrap() += 1;
        assert_eq!(deque.replace_at(-1, 31), Ok(30));
        assert_eq!(deque, [10, 21, 31]);
        assert!(deque.replace_at(4, 0).is_err());
    }

    #[test]
    #[should_panic]
    fn index_past_len_panics() {
        let mut deque = PaddedDeque::new(5);
        deque.put_many([5, 4, 3]);

        let _value = deque[3];
    }

    #[test]
    fn map_converts_element_type() {
        let options = DequeOptions::new(6).mode(PaddingMode::Equal);
        let deque = PaddedDeque::from_sequence([1, -2, 3], options);

        let mapped = deque.map(|&value| f64::from(value).abs());

        assert_eq!(mapped, [1.0, 2.0, 3.0]);
        assert_eq!(mapped.max_size(), 6);
        assert_eq!(mapped.padding_mode(), PaddingMode::Equal);
        assert_eq!(mapped.buffer_capacity(), deque.buffer_capacity());
    }
}
