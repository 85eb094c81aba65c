use std::fmt;
use std::iter::FusedIterator;

use crate::buffer::Buffer;

/// An owning iterator over the elements of a `PaddedDeque`.
///
/// This `struct` is created by the [`into_iter`] method on
/// [`PaddedDeque`](crate::PaddedDeque) (provided by the [`IntoIterator`]
/// trait). Elements not yet yielded are dropped with the iterator.
///
/// [`into_iter`]: crate::PaddedDeque::into_iter
pub struct IntoIter<T> {
    buf: Buffer<T>,
    start: usize,
    end: usize,
}

impl<T> IntoIter<T> {
    /// `buf` must hold live values exactly in `[start, end)`.
    pub(crate) fn new(buf: Buffer<T>, start: usize, end: usize) -> Self {
        IntoIter { buf, start, end }
    }

    /// Returns the remaining elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        unsafe { self.buf.slice(self.start, self.end) }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            None
        } else {
            self.start += 1;
            unsafe { Some(self.buf.read(self.start - 1)) }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.start;
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            None
        } else {
            self.end -= 1;
            unsafe { Some(self.buf.read(self.end)) }
        }
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let (start, end) = (self.start, self.end);
        self.start = end;
        unsafe { self.buf.drop_range(start, end) }
    }
}
