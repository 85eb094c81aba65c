use tracing::trace;

use crate::{PaddedDeque, PaddingMode};

impl<T> PaddedDeque<T> {
    /// Removes the last element and returns it, or `None` if the deque is
    /// empty.
    ///
    /// # Example
    ///
    /// ```
    /// use padded_deque::PaddedDeque;
    ///
    /// let mut deque = PaddedDeque::from([1, 2]);
    /// assert_eq!(deque.pop(), Some(2));
    /// assert_eq!(deque.pop(), Some(1));
    /// assert_eq!(deque.pop(), None);
    /// ```
    pub fn pop(&mut self) -> Option<T> {
        if self.start == self.end {
            None
        } else {
            self.end -= 1;
            unsafe { Some(self.buf.read(self.end)) }
        }
    }

    /// Removes the first element and returns it, or `None` if the deque is
    /// empty.
    ///
    /// # Example
    ///
    /// ```
    /// use padded_deque::PaddedDeque;
    ///
    /// let mut deque = PaddedDeque::from([1, 2]);
    /// assert_eq!(deque.pop_left(), Some(1));
    /// assert_eq!(deque.pop_left(), Some(2));
    /// assert_eq!(deque.pop_left(), None);
    /// ```
    pub fn pop_left(&mut self) -> Option<T> {
        if self.start == self.end {
            None
        } else {
            self.start += 1;
            unsafe { Some(self.buf.read(self.start - 1)) }
        }
    }

    /// Removes and returns the element at `index`, moving the elements on
    /// one side of it by one slot to close the gap.
    ///
    /// A negative `index` counts back from [`max_size`], not from the
    /// current length, so `-1` is the last element only when the deque is
    /// full. An index at or past the last element pops the back, and an index
    /// at or before the first element pops the front; `None` is only returned
    /// for an empty deque.
    ///
    /// Interior removals move whichever side has fewer elements, except in
    /// the one-sided padding modes: [`RightOnly`] always moves the elements
    /// after `index` and [`LeftOnly`] always moves the elements before it.
    ///
    /// # Example
    ///
    /// ```
    /// use padded_deque::PaddedDeque;
    ///
    /// let mut deque = PaddedDeque::from([1, 2, 3, 4, 5]);
    /// assert_eq!(deque.drop_at(2), Some(3));
    /// assert_eq!(deque, [1, 2, 4, 5]);
    ///
    /// assert_eq!(deque.drop_at(9), Some(5));
    /// assert_eq!(deque.drop_at(-5), Some(1));
    /// assert_eq!(deque, [2, 4]);
    /// ```
    ///
    /// [`max_size`]: PaddedDeque::max_size
    /// [`RightOnly`]: PaddingMode::RightOnly
    /// [`LeftOnly`]: PaddingMode::LeftOnly
    pub fn drop_at(&mut self, index: isize) -> Option<T> {
        let logical = if index < 0 {
            (self.max_size as isize).saturating_add(index)
        } else {
            index
        };
        let position = (self.start as isize).saturating_add(logical);

        if position.saturating_add(1) >= self.end as isize {
            return self.pop();
        }
        if position <= self.start as isize {
            return self.pop_left();
        }

        let position = position as usize;
        let value = unsafe { self.buf.read(position) };

        let close_from_back = match self.mode {
            PaddingMode::RightOnly => true,
            PaddingMode::LeftOnly => false,
            _ => self.end - position <= position - self.start,
        };
        trace!(position, close_from_back, "closing gap");

        if close_from_back {
            unsafe {
                self.buf.copy(position + 1, position, self.end - position - 1);
            }
            self.end -= 1;
        } else {
            unsafe {
                self.buf.copy(self.start, self.start + 1, position - self.start);
            }
            self.start += 1;
        }

        Some(value)
    }

    /// Removes the first element equal to `value` and returns it, or `None`
    /// if there is no such element.
    ///
    /// # Example
    ///
    /// ```
    /// use padded_deque::PaddedDeque;
    ///
    /// let mut deque = PaddedDeque::from([2, 3, 5, 8, 5]);
    /// assert_eq!(deque.remove(&5), Some(5));
    /// assert_eq!(deque.remove(&1), None);
    /// assert_eq!(deque, [2, 3, 8, 5]);
    /// ```
    pub fn remove(&mut self, value: &T) -> Option<T>
    where
        T: PartialEq,
    {
        let index = self.index_of(value)?;
        self.drop_at(index as isize)
    }
}

#[cfg(test)]
mod tests {
    use crate::drop_tracker::DropTracker;
    use crate::{DequeOptions, PaddedDeque, PaddingMode};

    fn prepare_deque(mode: PaddingMode, elems: &[i32]) -> PaddedDeque<i32> {
        let options = DequeOptions::new(5).mode(mode).force_buffer_capacity(10);
        PaddedDeque::from_sequence(elems.iter().copied(), options)
    }

    fn full_deque() -> PaddedDeque<i32> {
        prepare_deque(PaddingMode::Right, &[1, 2, 3, 4, 5])
    }

    #[test]
    fn pop_on_empty_changes_nothing() {
        let mut deque = prepare_deque(PaddingMode::Right, &[]);
        // |-[]---------|

        assert_eq!(deque.pop(), None);
        assert_eq!(deque.pop_left(), None);
        assert_eq!(deque.drop_at(0), None);
        assert_eq!(deque.drop_at(-1), None);

        assert_eq!((deque.start, deque.end), (1, 1));
    }

    #[test]
    fn pop_and_pop_left_alternating() {
        let mut deque = full_deque();

        assert_eq!(deque.pop(), Some(5));
        assert_eq!(deque, [1, 2, 3, 4]);
        assert_eq!(deque.pop_left(), Some(1));
        assert_eq!(deque, [2, 3, 4]);
        assert_eq!(deque.pop_left(), Some(2));
        assert_eq!(deque.pop(), Some(4));
        assert_eq!(deque.pop_left(), Some(3));
        assert!(deque.is_empty());
        assert_eq!(deque.pop_left(), None);
    }

    #[test]
    fn drop_near_front_closes_from_front() {
        let mut deque = full_deque();
        // |-[12345]----|

        assert_eq!(deque.drop_at(1), Some(2));

        // |--[1345]----|
        assert_eq!((deque.start, deque.end), (2, 6));
        assert_eq!(deque, [1, 3, 4, 5]);
    }

    #[test]
    fn drop_near_back_closes_from_back() {
        let mut deque = full_deque();
        // |-[12345]----|

        assert_eq!(deque.drop_at(3), Some(4));

        // |-[1235]-----|
        assert_eq!((deque.start, deque.end), (1, 5));
        assert_eq!(deque, [1, 2, 3, 5]);
    }

    #[test]
    fn drop_in_the_middle_closes_from_front() {
        let mut deque = full_deque();
        // |-[12345]----|

        assert_eq!(deque.drop_at(2), Some(3));

        // three slots from the back, two from the front
        // |--[1245]----|
        assert_eq!((deque.start, deque.end), (2, 6));
        assert_eq!(deque, [1, 2, 4, 5]);
    }

    #[test]
    fn right_only_always_closes_from_back() {
        let mut deque = prepare_deque(PaddingMode::RightOnly, &[1, 2, 3, 4, 5]);
        // |[12345]-----|

        assert_eq!(deque.drop_at(1), Some(2));

        // |[1345]------|
        assert_eq!((deque.start, deque.end), (0, 4));
        assert_eq!(deque, [1, 3, 4, 5]);
    }

    #[test]
    fn left_only_always_closes_from_front() {
        let mut deque = prepare_deque(PaddingMode::LeftOnly, &[1, 2, 3, 4, 5]);
        // |-----[12345]|

        assert_eq!(deque.drop_at(3), Some(4));

        // |------[1235]|
        assert_eq!((deque.start, deque.end), (6, 10));
        assert_eq!(deque, [1, 2, 3, 5]);
    }

    #[test]
    fn drop_at_the_ends_pops() {
        let mut deque = full_deque();
        assert_eq!(deque.drop_at(-1), Some(5));
        assert_eq!(deque, [1, 2, 3, 4]);

        let mut deque = full_deque();
        assert_eq!(deque.drop_at(0), Some(1));
        assert_eq!(deque, [2, 3, 4, 5]);
    }

    #[test]
    fn negative_index_counts_from_max_size() {
        let mut deque = prepare_deque(PaddingMode::Right, &[1, 2, 3]);

        // max size 5: -3 is logical index 2, the last element
        assert_eq!(deque.drop_at(-3), Some(3));
        // -4 is logical index 1
        deque.put(3);
        assert_eq!(deque.drop_at(-4), Some(2));
        // far before the front pops the front
        assert_eq!(deque.drop_at(isize::MIN), Some(1));
        assert_eq!(deque, [3]);
    }

    #[test]
    fn out_of_range_index_pops() {
        let mut deque = full_deque();

        assert_eq!(deque.drop_at(isize::MAX), Some(5));
        assert_eq!(deque.drop_at(-100), Some(1));
        assert_eq!(deque, [2, 3, 4]);
    }

    #[test]
    fn repeated_drop() {
        let mut deque = full_deque();

        assert_eq!(deque.drop_at(2), Some(3));
        assert_eq!(deque.drop_at(2), Some(4));
        assert_eq!(deque.len(), 3);
        assert_eq!(deque.drop_at(2), Some(5));
        assert_eq!(deque.len(), 2);
        assert_eq!(deque.drop_at(2), Some(2));
        assert_eq!(deque.len(), 1);
        assert_eq!(deque.drop_at(2), Some(1));
        assert!(deque.is_empty());
        assert_eq!(deque.drop_at(2), None);
    }

    #[test]
    fn drop_then_put() {
        let mut deque = full_deque();

        deque.drop_at(2);
        deque.put(33);
        assert_eq!(deque, [1, 2, 4, 5, 33]);

        assert_eq!(deque.drop_at(2), Some(4));
        deque.put_left(44);
        assert_eq!(deque, [44, 1, 2, 5, 33]);
    }

    #[test]
    fn remove_first_match() {
        let mut deque = PaddedDeque::from_sequence([2, 3, 5, 6, 7, 8, 9, 8], DequeOptions::new(10));

        assert_eq!(deque.remove(&8), Some(8));
        assert_eq!(deque, [2, 3, 5, 6, 7, 9, 8]);

        assert_eq!(deque.remove(&1), None);
        assert_eq!(deque, [2, 3, 5, 6, 7, 9, 8]);
    }

    #[test]
    fn dropped_value_is_moved_out_not_dropped() {
        let tracker = DropTracker::new();
        let options = DequeOptions::new(5).force_buffer_capacity(10);
        let mut deque = PaddedDeque::from_sequence(tracker.wrap_iter(['A', 'B', 'C', 'D']), options);

        let removed = deque.drop_at(1);
        assert!(tracker.take().is_empty());
        assert_eq!(removed.as_ref().map(|tracked| *tracked.value()), Some('B'));

        drop(removed);
        assert_eq!(tracker.take(), ['B']);

        drop(deque);
        assert_eq!(tracker.take(), ['A', 'C', 'D']);
    }
}
