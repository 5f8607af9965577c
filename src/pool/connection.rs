//! Bounded pool of reusable, caller-managed connection handles.
//!
//! The pool is a pure resource-counting primitive: a counting semaphore caps
//! how many connections may be checked out at once, and a LIFO stack caches
//! idle ones for reuse. The pool never opens, validates, or closes a
//! connection; it only transfers ownership between "cached" and "held by a
//! caller".

use log::{debug, trace};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::error::PoolError;
use crate::pool::lease::Lease;
use crate::sync::Semaphore;

/// Default capacity for a pool created with [`ConnectionPool::default`]
pub const DEFAULT_CAPACITY: usize = 50;

/// Outcome of an acquire: a cached connection, or a slot the caller must fill.
///
/// A `Miss` is not an error. It means the caller now holds a permit and is
/// expected to open a connection itself, then eventually hand the permit back
/// through [`ConnectionPool::release`].
#[derive(Debug)]
pub enum Checkout<C> {
    /// A cached connection, most recently released first
    Hit(C),

    /// Nothing cached; the caller opens a new connection and keeps the permit
    Miss,
}

impl<C> Checkout<C> {
    /// The cached connection, if this checkout was a hit.
    pub fn into_cached(self) -> Option<C> {
        match self {
            Checkout::Hit(conn) => Some(conn),
            Checkout::Miss => None,
        }
    }
}

/// The caller's verdict on a connection when handing its permit back.
#[derive(Debug)]
pub enum Verdict<C> {
    /// Still usable: cache it for the next acquire
    Reuse(C),

    /// Broken or unwanted: return only the permit, cache nothing
    Discard,
}

/// Snapshot of pool counters.
#[derive(Debug, Default, Clone)]
pub struct PoolStats {
    /// Maximum connections concurrently checked out plus cached
    pub capacity: usize,

    /// Permits currently available for acquisition
    pub available_permits: usize,

    /// Idle connections currently cached
    pub idle: usize,

    /// Acquires that reused a cached connection
    pub hits: usize,

    /// Acquires that found nothing cached
    pub misses: usize,

    /// Releases that cached the connection for reuse
    pub reuses: usize,

    /// Releases that discarded the connection
    pub discards: usize,
}

/// A bounded, thread-safe pool of reusable connection handles.
///
/// `C` is an opaque handle owned by the caller (a socket wrapper, a client
/// session, anything `Send`). Admission is bounded by a counting semaphore
/// with `capacity` permits; idle connections are cached LIFO so the warmest
/// connection is reused first.
///
/// Every successful acquire holds exactly one permit and must eventually be
/// matched by exactly one [`release`](Self::release), or the pool permanently
/// loses one unit of capacity. The [`lease`](Self::lease) API makes that
/// pairing automatic.
pub struct ConnectionPool<C> {
    /// Maximum connections concurrently checked out plus cached
    capacity: usize,

    /// Admission semaphore; one permit per connection slot
    admission: Semaphore,

    /// Idle connections, most recently released at the back
    idle: Mutex<Vec<C>>,

    /// Acquires that reused a cached connection
    hits: AtomicUsize,

    /// Acquires that found the cache empty
    misses: AtomicUsize,

    /// Releases that cached the connection
    reuses: AtomicUsize,

    /// Releases that discarded the connection
    discards: AtomicUsize,
}

impl<C> ConnectionPool<C> {
    /// Create a pool admitting at most `capacity` concurrent connections.
    ///
    /// No connections are pre-created; the cache starts empty and fills as
    /// callers release connections back.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero, since a zero-capacity pool would block
    /// every caller forever.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "pool capacity must be positive");

        debug!("creating connection pool with capacity {}", capacity);

        Self {
            capacity,
            admission: Semaphore::new(capacity),
            idle: Mutex::new(Vec::with_capacity(capacity)),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
            reuses: AtomicUsize::new(0),
            discards: AtomicUsize::new(0),
        }
    }

    /// Acquire a connection slot, blocking until a permit is free.
    ///
    /// Returns [`Checkout::Hit`] with the most recently released idle
    /// connection, or [`Checkout::Miss`] when nothing is cached. Either way
    /// the caller now holds one permit.
    pub fn acquire(&self) -> Checkout<C> {
        self.admission.acquire();
        self.pop_idle()
    }

    /// Acquire a connection slot without blocking.
    ///
    /// Returns [`PoolError::Exhausted`] if all permits are checked out.
    pub fn try_acquire(&self) -> Result<Checkout<C>, PoolError> {
        if !self.admission.try_acquire() {
            return Err(PoolError::Exhausted);
        }

        Ok(self.pop_idle())
    }

    /// Acquire a connection slot, blocking at most `timeout`.
    ///
    /// Returns [`PoolError::Timeout`] if no permit freed up in time. This is
    /// the bounded-wait escape hatch for callers that cannot tolerate
    /// indefinite blocking under full-capacity contention.
    pub fn acquire_timeout(&self, timeout: Duration) -> Result<Checkout<C>, PoolError> {
        if !self.admission.acquire_timeout(timeout) {
            return Err(PoolError::Timeout(timeout));
        }

        Ok(self.pop_idle())
    }

    /// Hand a permit back, optionally caching the connection for reuse.
    ///
    /// Never blocks. Exactly one permit is returned regardless of the
    /// verdict; [`Verdict::Reuse`] additionally makes the connection the next
    /// one handed out, while [`Verdict::Discard`] shrinks the cached count by
    /// one so a future acquire will miss and open a replacement.
    pub fn release(&self, verdict: Verdict<C>) {
        match verdict {
            Verdict::Reuse(conn) => {
                // Cache before posting the permit so the connection is
                // visible to whichever waiter the permit wakes
                let mut idle = self.idle.lock();
                idle.push(conn);
                trace!("pool release: connection cached ({} idle)", idle.len());
                drop(idle);

                self.reuses.fetch_add(1, Ordering::Relaxed);
            }
            Verdict::Discard => {
                trace!("pool release: connection discarded");
                self.discards.fetch_add(1, Ordering::Relaxed);
            }
        }

        self.admission.release();
    }

    /// Acquire a slot as a scoped [`Lease`] that releases itself on drop.
    pub fn lease(&self) -> Lease<'_, C> {
        let checkout = self.acquire();
        Lease::new(self, checkout)
    }

    /// Acquire a scoped [`Lease`] without blocking.
    pub fn try_lease(&self) -> Result<Lease<'_, C>, PoolError> {
        let checkout = self.try_acquire()?;
        Ok(Lease::new(self, checkout))
    }

    /// Acquire a scoped [`Lease`], blocking at most `timeout`.
    pub fn lease_timeout(&self, timeout: Duration) -> Result<Lease<'_, C>, PoolError> {
        let checkout = self.acquire_timeout(timeout)?;
        Ok(Lease::new(self, checkout))
    }

    /// The fixed capacity this pool was created with.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Permits currently available for acquisition.
    ///
    /// At any quiescent point, `capacity() - available_permits()` is the
    /// number of permits held by callers.
    pub fn available_permits(&self) -> usize {
        self.admission.available()
    }

    /// Idle connections currently cached.
    pub fn idle_count(&self) -> usize {
        self.idle.lock().len()
    }

    /// Snapshot of pool counters.
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            capacity: self.capacity,
            available_permits: self.admission.available(),
            idle: self.idle.lock().len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            reuses: self.reuses.load(Ordering::Relaxed),
            discards: self.discards.load(Ordering::Relaxed),
        }
    }

    /// Pop the warmest idle connection, if any. Caller must hold a permit.
    fn pop_idle(&self) -> Checkout<C> {
        let mut idle = self.idle.lock();

        match idle.pop() {
            Some(conn) => {
                trace!("pool hit: reusing cached connection ({} idle left)", idle.len());
                drop(idle);

                self.hits.fetch_add(1, Ordering::Relaxed);
                Checkout::Hit(conn)
            }
            None => {
                drop(idle);

                trace!("pool miss: caller must open a new connection");
                self.misses.fetch_add(1, Ordering::Relaxed);
                Checkout::Miss
            }
        }
    }
}

impl<C> Default for ConnectionPool<C> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
