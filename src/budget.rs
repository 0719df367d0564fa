//! Deadlines and cancellation for long-running searches.
//!
//! Factorization, discrete logarithms, order computation and irreducible
//! polynomial enumeration can run for a very long time on large inputs.
//! Each of these loops polls a [`Budget`] and stops with
//! [`Error::Interrupted`] once the deadline passes or the token is cancelled.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::{Error, Interrupt, Result};

/// A cancellation flag that can be shared across threads.
///
/// # Example
///
/// ```
/// use modfield::{Budget, CancelToken};
///
/// let token = CancelToken::new();
/// let budget = Budget::unlimited().with_token(token.clone());
/// assert!(budget.check().is_ok());
///
/// token.cancel();
/// assert!(budget.check().is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of every search holding this token.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Limits threaded through search loops.
#[derive(Debug, Clone, Default)]
pub struct Budget {
    deadline: Option<Instant>,
    token: Option<CancelToken>,
}

impl Budget {
    /// A budget that never interrupts.
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Stop once `timeout` has elapsed from now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Stop once `deadline` has passed.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Stop once `token` is cancelled.
    pub fn with_token(mut self, token: CancelToken) -> Self {
        self.token = Some(token);
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns `Err(Error::Interrupted(_))` if the search must stop.
    ///
    /// Cancellation is reported before an expired deadline.
    #[inline]
    pub fn check(&self) -> Result<()> {
        if let Some(token) = &self.token {
            if token.is_cancelled() {
                return Err(Error::Interrupted(Interrupt::Cancelled));
            }
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(Error::Interrupted(Interrupt::DeadlineExceeded));
            }
        }
        Ok(())
    }
}
