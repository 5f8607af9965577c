//! Error types for bounded pool acquisition.
//!
//! Plain blocking acquisition never fails; only the bounded-wait variants
//! produce errors.

use std::time::Duration;
use thiserror::Error;

/// Error when acquiring a connection slot from the pool
#[derive(Error, Debug)]
pub enum PoolError {
    /// No permit became available within the specified timeout
    #[error("pool acquire timed out after {0:?}")]
    Timeout(Duration),

    /// All permits are currently checked out
    #[error("pool exhausted")]
    Exhausted,
}
