//! Scoped lease guard that releases its permit on drop.

use log::trace;

use crate::pool::connection::{Checkout, ConnectionPool, Verdict};

/// A scoped lease on one connection slot.
///
/// Created by [`ConnectionPool::lease`] and friends. The lease holds one
/// admission permit and, on a cache hit, the cached connection. Dropping the
/// lease performs the matching release: the connection is cached for reuse if
/// the lease still holds one, otherwise only the permit is returned.
///
/// This removes the leak risk of the raw acquire/release contract: the permit
/// cannot outlive the scope, even on early return or panic.
pub struct Lease<'a, C> {
    /// The pool the permit came from
    pool: &'a ConnectionPool<C>,

    /// The connection attached to this lease, if any
    conn: Option<C>,
}

impl<'a, C> Lease<'a, C> {
    /// Wrap a freshly acquired checkout. The permit is already held.
    pub(crate) fn new(pool: &'a ConnectionPool<C>, checkout: Checkout<C>) -> Self {
        Self {
            pool,
            conn: checkout.into_cached(),
        }
    }

    /// The leased connection, if the lease holds one.
    ///
    /// `None` means the acquire missed and no connection has been supplied
    /// yet; the caller is expected to open one and [`supply`](Self::supply)
    /// it.
    pub fn connection(&mut self) -> Option<&mut C> {
        self.conn.as_mut()
    }

    /// Whether the lease currently holds a connection.
    pub fn is_vacant(&self) -> bool {
        self.conn.is_none()
    }

    /// Attach a caller-created connection to this lease.
    ///
    /// Returns the previously attached connection, if there was one, so it is
    /// never silently dropped.
    pub fn supply(&mut self, conn: C) -> Option<C> {
        self.conn.replace(conn)
    }

    /// Drop the attached connection without caching it.
    ///
    /// The permit stays with the lease until it goes out of scope, so the
    /// caller can open a replacement under the same lease.
    pub fn discard(&mut self) {
        if self.conn.take().is_some() {
            trace!("lease: connection discarded");
        }
    }
}

impl<C> Drop for Lease<'_, C> {
    fn drop(&mut self) {
        match self.conn.take() {
            Some(conn) => self.pool.release(Verdict::Reuse(conn)),
            None => self.pool.release(Verdict::Discard),
        }
    }
}
