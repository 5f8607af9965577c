//! Counting semaphore with blocking, non-blocking, and bounded waits.
//!
//! Permits are fungible: a permit carries no payload and no identity, it is
//! purely one unit of admission capacity.

use log::trace;
use parking_lot::{Condvar, Mutex};
use std::time::{Duration, Instant};

/// A counting semaphore for blocking callers.
///
/// Waiters are woken as permits are released; wakeup order is whatever the
/// underlying condition variable provides (eventually fair, not strictly
/// FIFO).
pub struct Semaphore {
    /// Number of permits currently available
    permits: Mutex<usize>,

    /// Signaled whenever a permit is released
    available: Condvar,
}

impl Semaphore {
    /// Create a semaphore holding `permits` permits.
    pub fn new(permits: usize) -> Self {
        Self {
            permits: Mutex::new(permits),
            available: Condvar::new(),
        }
    }

    /// Take one permit, blocking until one is available.
    pub fn acquire(&self) {
        let mut permits = self.permits.lock();

        while *permits == 0 {
            self.available.wait(&mut permits);
        }

        *permits -= 1;
        trace!("semaphore: permit acquired ({} left)", *permits);
    }

    /// Take one permit without blocking.
    ///
    /// Returns `false` if no permit is currently available.
    pub fn try_acquire(&self) -> bool {
        let mut permits = self.permits.lock();

        if *permits == 0 {
            return false;
        }

        *permits -= 1;
        trace!("semaphore: permit acquired ({} left)", *permits);
        true
    }

    /// Take one permit, blocking at most `timeout`.
    ///
    /// Returns `false` if the timeout elapsed with no permit available.
    pub fn acquire_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut permits = self.permits.lock();

        while *permits == 0 {
            if self.available.wait_until(&mut permits, deadline).timed_out() {
                // Re-check: a release may have raced the timeout
                if *permits > 0 {
                    break;
                }

                trace!("semaphore: acquire timed out after {:?}", timeout);
                return false;
            }
        }

        *permits -= 1;
        trace!("semaphore: permit acquired ({} left)", *permits);
        true
    }

    /// Return one permit and wake a waiter.
    pub fn release(&self) {
        let mut permits = self.permits.lock();
        *permits += 1;
        trace!("semaphore: permit released ({} available)", *permits);
        drop(permits);

        self.available.notify_one();
    }

    /// Number of permits currently available.
    pub fn available(&self) -> usize {
        *self.permits.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_semaphore_counts() {
        let sem = Semaphore::new(2);
        assert_eq!(sem.available(), 2);

        sem.acquire();
        assert_eq!(sem.available(), 1);

        sem.acquire();
        assert_eq!(sem.available(), 0);

        sem.release();
        assert_eq!(sem.available(), 1);
    }

    #[test]
    fn test_try_acquire_exhausted() {
        let sem = Semaphore::new(1);

        assert!(sem.try_acquire());
        assert!(!sem.try_acquire());

        sem.release();
        assert!(sem.try_acquire());
    }

    #[test]
    fn test_acquire_blocks_until_release() {
        let sem = Arc::new(Semaphore::new(1));
        sem.acquire();

        let sem_clone = Arc::clone(&sem);
        let waiter = thread::spawn(move || {
            sem_clone.acquire();
        });

        // Give the waiter time to block
        thread::sleep(Duration::from_millis(50));
        assert!(!waiter.is_finished());

        sem.release();
        waiter.join().unwrap();
        assert_eq!(sem.available(), 0);
    }

    #[test]
    fn test_acquire_timeout_expires() {
        let sem = Semaphore::new(1);
        sem.acquire();

        let start = Instant::now();
        assert!(!sem.acquire_timeout(Duration::from_millis(50)));
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn test_acquire_timeout_succeeds_on_release() {
        let sem = Arc::new(Semaphore::new(1));
        sem.acquire();

        let sem_clone = Arc::clone(&sem);
        let waiter = thread::spawn(move || sem_clone.acquire_timeout(Duration::from_secs(5)));

        thread::sleep(Duration::from_millis(50));
        sem.release();

        assert!(waiter.join().unwrap());
        assert_eq!(sem.available(), 0);
    }

    #[test]
    fn test_release_restores_capacity() {
        let sem = Arc::new(Semaphore::new(4));
        let mut handles = vec![];

        for _ in 0..8 {
            let sem = Arc::clone(&sem);
            handles.push(thread::spawn(move || {
                for _ in 0..50 {
                    sem.acquire();
                    thread::sleep(Duration::from_micros(10));
                    sem.release();
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(sem.available(), 4);
    }
}
