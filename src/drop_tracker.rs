use std::cell::RefCell;
use std::fmt;
use std::mem;
use std::rc::Rc;

/// Records the values of [`Tracked`] elements as they are dropped.
pub struct DropTracker<T> {
    dropped: Rc<RefCell<Vec<T>>>,
}

impl<T: Clone> DropTracker<T> {
    pub fn new() -> Self {
        DropTracker {
            dropped: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn wrap(&self, value: T) -> Tracked<T> {
        Tracked {
            value,
            dropped: Rc::clone(&self.dropped),
        }
    }

    /// Wraps every value, keeping the source iterator's size hint.
    pub fn wrap_iter<I>(&self, values: I) -> impl Iterator<Item = Tracked<T>>
    where
        I: IntoIterator<Item = T>,
    {
        let dropped = Rc::clone(&self.dropped);
        values.into_iter().map(move |value| Tracked {
            value,
            dropped: Rc::clone(&dropped),
        })
    }

    /// Returns the values dropped since the last call, in drop order.
    pub fn take(&self) -> Vec<T> {
        mem::take(&mut *self.dropped.borrow_mut())
    }
}

pub struct Tracked<T: Clone> {
    value: T,
    dropped: Rc<RefCell<Vec<T>>>,
}

impl<T: Clone> Tracked<T> {
    pub fn value(&self) -> &T {
        &self.value
    }
}

impl<T: Clone> Drop for Tracked<T> {
    fn drop(&mut self) {
        self.dropped.borrow_mut().push(self.value.clone());
    }
}

impl<T: Clone + PartialEq> PartialEq<T> for Tracked<T> {
    fn eq(&self, other: &T) -> bool {
        self.value == *other
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Tracked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}
