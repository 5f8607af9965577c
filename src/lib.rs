#![deny(warnings)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

//! # Corral
//!
//! Bounded, thread-safe connection leasing for synchronous request/response
//! clients.
//!
//! Opening a connection per request is expensive, but letting every caller
//! open its own connection risks exhausting client or server resources.
//! Corral caps how many connections may be checked out at once and reuses
//! idle ones, while leaving connection creation and teardown entirely to the
//! caller — the pool itself never performs I/O.
//!
//! The crate provides:
//!
//! - A [`ConnectionPool`] combining a counting semaphore for admission with a
//!   LIFO cache of idle connection handles
//! - A scoped [`Lease`] guard that releases its permit automatically on drop
//! - Bounded-wait acquisition (`try_acquire`, `acquire_timeout`) so callers
//!   can put a deadline on contention
//! - A standalone counting [`Semaphore`] usable on its own
//!
//! ## Usage
//!
//! ```
//! use corral::{Checkout, ConnectionPool, Verdict};
//!
//! struct Conn;
//!
//! let pool = ConnectionPool::new(2);
//!
//! let conn = match pool.acquire() {
//!     Checkout::Hit(conn) => conn,
//!     // Nothing cached: the caller opens the connection itself.
//!     Checkout::Miss => Conn,
//! };
//!
//! // ... issue a request on `conn` ...
//!
//! pool.release(Verdict::Reuse(conn));
//! ```
//!
//! The pool never inspects a connection's health. A broken connection that is
//! released with [`Verdict::Reuse`] will be handed out again; callers that
//! detect an I/O failure should release with [`Verdict::Discard`] instead so
//! the next acquire opens a fresh one.

/// Error types for pool acquisition
pub mod error;

/// The connection pool and its lease guard
pub mod pool;

/// Synchronization primitives backing the pool
pub mod sync;

pub use error::PoolError;
pub use pool::{Checkout, ConnectionPool, Lease, PoolStats, Verdict};
pub use sync::Semaphore;
