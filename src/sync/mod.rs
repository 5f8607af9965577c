//! Synchronization primitives backing the pool.
//!
//! This module provides the counting semaphore that bounds admission to the
//! pool. It is exposed publicly because a bounded-permit primitive is useful
//! on its own for throttling synchronous callers.

pub mod semaphore;

// Re-export key types from semaphore
pub use semaphore::Semaphore;
