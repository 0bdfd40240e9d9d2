//! Bus lock abstraction
//!
//! The SPI bus and the chip-select line may be shared with unrelated
//! subsystems. A [`BusLock`] is held for exactly one transaction: taken
//! immediately before chip-select is asserted and dropped immediately after
//! it is released.
//!
//! Any `embassy-sync` blocking mutex over `()` is a bus lock, so the choice of
//! [`RawMutex`] picks the sharing scope:
//!
//! - `CriticalSectionRawMutex` - shared with interrupt handlers / other cores
//! - `NoopRawMutex` - single owner, no locking (tests, dedicated buses)

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

/// Mutual exclusion around one bus transaction
pub trait BusLock {
    /// Run `f` while holding the lock
    fn lock<R>(&self, f: impl FnOnce() -> R) -> R;
}

/// A bus lock backed by an `embassy-sync` blocking mutex
pub type SharedBusLock<M> = Mutex<M, ()>;

/// Create a bus lock, usable in a `static`
pub const fn shared_bus_lock<M: RawMutex>() -> SharedBusLock<M> {
    Mutex::new(())
}

impl<M: RawMutex> BusLock for Mutex<M, ()> {
    fn lock<R>(&self, f: impl FnOnce() -> R) -> R {
        Mutex::lock(self, |_| f())
    }
}

impl<L: BusLock> BusLock for &L {
    fn lock<R>(&self, f: impl FnOnce() -> R) -> R {
        L::lock(self, f)
    }
}
