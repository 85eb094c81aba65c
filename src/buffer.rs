use std::alloc::{self, Layout};
use std::mem;
use std::ptr::{self, NonNull};
use std::slice;

/// Fixed-capacity raw storage for a [`PaddedDeque`](crate::PaddedDeque).
///
/// The buffer never tracks which slots are initialised and never drops its
/// contents; the owner keeps that bookkeeping. Every `unsafe` method requires
/// the indices it touches to be below [`cap`](Buffer::cap).
#[derive(Debug)]
pub struct Buffer<T> {
    ptr: NonNull<T>,
    cap: usize,
}

unsafe impl<T: Send> Send for Buffer<T> {}
unsafe impl<T: Sync> Sync for Buffer<T> {}

impl<T> Buffer<T> {
    pub fn with_capacity(cap: usize) -> Self {
        if cap == 0 || mem::size_of::<T>() == 0 {
            return Buffer {
                ptr: NonNull::dangling(),
                cap,
            };
        }

        let layout = match Layout::array::<T>(cap) {
            Ok(layout) => layout,
            Err(_) => panic!("capacity overflow"),
        };
        let raw = unsafe { alloc::alloc(layout) };

        let ptr = match NonNull::new(raw as *mut T) {
            Some(p) => p,
            None => alloc::handle_alloc_error(layout),
        };

        Buffer { ptr, cap }
    }

    #[inline]
    pub fn cap(&self) -> usize {
        self.cap
    }

    #[inline]
    fn ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Moves `value` into slot `index`, which must not hold a live value.
    #[inline]
    pub unsafe fn write(&mut self, index: usize, value: T) {
        debug_assert!(index < self.cap);
        ptr::write(self.ptr().add(index), value);
    }

    /// Moves the value out of slot `index`, which must hold a live value.
    /// The slot is logically uninitialised afterwards.
    #[inline]
    pub unsafe fn read(&self, index: usize) -> T {
        debug_assert!(index < self.cap);
        ptr::read(self.ptr().add(index))
    }

    /// Moves `count` values from `src` to `dst`. The ranges may overlap.
    pub unsafe fn copy(&mut self, src: usize, dst: usize, count: usize) {
        if count > 0 && src != dst {
            debug_assert!(src + count <= self.cap && dst + count <= self.cap);
            ptr::copy(self.ptr().add(src), self.ptr().add(dst), count);
        }
    }

    /// Drops the live values in `[start, end)` in place.
    pub unsafe fn drop_range(&mut self, start: usize, end: usize) {
        if start < end {
            let live = ptr::slice_from_raw_parts_mut(self.ptr().add(start), end - start);
            ptr::drop_in_place(live);
        }
    }

    #[inline]
    pub unsafe fn slice(&self, start: usize, end: usize) -> &[T] {
        slice::from_raw_parts(self.ptr().add(start), end - start)
    }

    #[inline]
    pub unsafe fn slice_mut(&mut self, start: usize, end: usize) -> &mut [T] {
        slice::from_raw_parts_mut(self.ptr().add(start), end - start)
    }
}

impl<T> Drop for Buffer<T> {
    fn drop(&mut self) {
        let elem_size = mem::size_of::<T>();

        if self.cap != 0 && elem_size != 0 {
            unsafe {
                alloc::dealloc(
                    self.ptr.as_ptr() as *mut u8,
                    Layout::array::<T>(self.cap).unwrap_unchecked(),
                );
            }
        }
    }
}
