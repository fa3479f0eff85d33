//! Interrupt-safe access to the keyboard context.
//!
//! Bluetooth callbacks may fire from the radio's interrupt while the RGB
//! driver is mid-frame. Every callback and every indicator tick runs inside
//! the same critical section, so the tracker and the decay step never
//! interleave.

use core::cell::RefCell;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

/// A keyboard context shared between interrupt and thread mode.
pub struct SharedKeyboard<K> {
    inner: Mutex<CriticalSectionRawMutex, RefCell<K>>,
}

impl<K> SharedKeyboard<K> {
    pub const fn new(keyboard: K) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(keyboard)),
        }
    }

    /// Run `f` with exclusive access to the context.
    ///
    /// Panics if called re-entrantly from inside `f`.
    pub fn with<R>(&self, f: impl FnOnce(&mut K) -> R) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }
}
