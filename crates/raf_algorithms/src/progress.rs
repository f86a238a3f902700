use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Cooperative cancellation outcome. Not an error in the usual sense:
/// exact algorithms return it instead of a result, heuristics never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canceled;

impl fmt::Display for Canceled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Computation canceled")
    }
}

impl std::error::Error for Canceled {}

/// Progress reporting and cancellation, implemented by the caller.
///
/// All methods take `&self`: the same handle is polled from every worker
/// of a parallel fan-out. Every method has a no-op default, so a reporter
/// only implements what it displays.
pub trait Progress: Sync {
    fn set_tasks(&self, _title: &str, _subtitle: &str) {}

    fn set_subtask(&self, _text: &str) {}

    fn set_maximum(&self, _n: u64) {}

    fn set_progress(&self, _n: u64) {}

    fn increment_progress(&self) {}

    /// Polled once per outer iteration or parallel candidate.
    fn check_for_cancel(&self) -> Result<(), Canceled> {
        Ok(())
    }
}

/// Reports nothing and never cancels.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Progress for Silent {}

/// Silent towards the user, but forwards cancellation from its parent.
/// Used for algorithms that run as a step of another algorithm.
pub struct Nested<'a> {
    parent: &'a dyn Progress,
}

impl<'a> Nested<'a> {
    pub fn new(parent: &'a dyn Progress) -> Self {
        Self { parent }
    }
}

impl Progress for Nested<'_> {
    fn check_for_cancel(&self) -> Result<(), Canceled> {
        self.parent.check_for_cancel()
    }
}

/// A flag that can be raised from anywhere to cancel a running computation.
#[derive(Debug, Default)]
pub struct CancelFlag {
    canceled: AtomicBool,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.canceled.store(true, Ordering::Relaxed);
    }

    pub fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::Relaxed)
    }
}

impl Progress for CancelFlag {
    fn check_for_cancel(&self) -> Result<(), Canceled> {
        if self.is_canceled() { Err(Canceled) } else { Ok(()) }
    }
}

/// Cancels once `polls` checks have passed. Bounds the work of a
/// computation without a clock.
#[derive(Debug)]
pub struct CancelAfter {
    remaining: AtomicUsize,
}

impl CancelAfter {
    pub fn new(polls: usize) -> Self {
        Self { remaining: AtomicUsize::new(polls) }
    }
}

impl Progress for CancelAfter {
    fn check_for_cancel(&self) -> Result<(), Canceled> {
        let update = self.remaining
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1));
        match update {
            Ok(_) => Ok(()),
            Err(_) => Err(Canceled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_never_cancels() {
        let p = Silent;
        p.set_tasks("a", "b");
        p.increment_progress();
        assert_eq!(p.check_for_cancel(), Ok(()));
    }

    #[test]
    fn test_nested_forwards_cancel() {
        let flag = CancelFlag::new();
        let nested = Nested::new(&flag);
        assert_eq!(nested.check_for_cancel(), Ok(()));
        flag.cancel();
        assert_eq!(nested.check_for_cancel(), Err(Canceled));
    }

    #[test]
    fn test_cancel_after() {
        let p = CancelAfter::new(2);
        assert_eq!(p.check_for_cancel(), Ok(()));
        assert_eq!(p.check_for_cancel(), Ok(()));
        assert_eq!(p.check_for_cancel(), Err(Canceled));
        assert_eq!(p.check_for_cancel(), Err(Canceled));
    }
}
