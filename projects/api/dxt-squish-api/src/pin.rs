//! Pin guards for buffers handed to the codec.
//!
//! A guard holds the borrow of a buffer for as long as a raw pointer to it may
//! be in use, so the buffer cannot move, be resized or be freed in the
//! meantime. The pin is released in [`Drop`], which runs on every exit path,
//! including early returns and unwinding.
//!
//! Live pins are counted per thread (see [`active_pins`]) and logged at `trace`.

use core::cell::Cell;
use core::marker::PhantomData;
use tracing::trace;

thread_local! {
    static ACTIVE_PINS: Cell<usize> = const { Cell::new(0) };
}

/// Number of pin guards currently alive on this thread.
pub fn active_pins() -> usize {
    ACTIVE_PINS.with(Cell::get)
}

fn acquire(ptr: *const u8, len: usize, mutable: bool) {
    let active = ACTIVE_PINS.with(|pins| {
        let active = pins.get() + 1;
        pins.set(active);
        active
    });
    trace!(?ptr, len, mutable, active, "pinned buffer");
}

fn release(ptr: *const u8, len: usize, mutable: bool) {
    let active = ACTIVE_PINS.with(|pins| {
        let active = pins.get().saturating_sub(1);
        pins.set(active);
        active
    });
    trace!(?ptr, len, mutable, active, "released buffer");
}

/// A read-only buffer pinned for the duration of a codec call.
#[derive(Debug)]
pub struct PinnedBuffer<'a> {
    data: &'a [u8],
    // Guards are tied to the thread whose pin count they changed.
    _not_send: PhantomData<*const ()>,
}

impl<'a> PinnedBuffer<'a> {
    /// Pins `data` until the guard is dropped.
    pub fn new(data: &'a [u8]) -> Self {
        acquire(data.as_ptr(), data.len(), false);
        Self {
            data,
            _not_send: PhantomData,
        }
    }

    /// Stable address of the pinned buffer.
    #[inline]
    pub fn as_ptr(&self) -> *const u8 {
        self.data.as_ptr()
    }

    /// Length of the pinned buffer in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the pinned buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Drop for PinnedBuffer<'_> {
    fn drop(&mut self) {
        release(self.data.as_ptr(), self.data.len(), false);
    }
}

/// A writable buffer pinned for the duration of a codec call.
#[derive(Debug)]
pub struct PinnedBufferMut<'a> {
    data: &'a mut [u8],
    _not_send: PhantomData<*const ()>,
}

impl<'a> PinnedBufferMut<'a> {
    /// Pins `data` until the guard is dropped.
    pub fn new(data: &'a mut [u8]) -> Self {
        acquire(data.as_ptr(), data.len(), true);
        Self {
            data,
            _not_send: PhantomData,
        }
    }

    /// Stable address of the pinned buffer.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.data.as_mut_ptr()
    }

    /// Length of the pinned buffer in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the pinned buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Drop for PinnedBufferMut<'_> {
    fn drop(&mut self) {
        release(self.data.as_ptr(), self.data.len(), true);
    }
}
