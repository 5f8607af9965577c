//! The bounded connection pool and its lease guard.
//!
//! Two styles of use:
//!
//! - Raw [`ConnectionPool::acquire`] / [`ConnectionPool::release`], where the
//!   caller is responsible for matching every acquire with exactly one release
//! - Scoped [`Lease`] guards, where the release happens on drop

pub mod connection;
pub mod lease;

// Re-export key types from connection
pub use connection::{Checkout, ConnectionPool, PoolStats, Verdict, DEFAULT_CAPACITY};

// Re-export key types from lease
pub use lease::Lease;
