//! Stop conditions shared between a search and the threads it spawns.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cooperative cancellation flag. Clones observe the same flag, so raising
/// it from the caller stops sequential searches and every root worker.
#[derive(Clone, Debug)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    #[must_use]
    pub fn new() -> Self {
        StopFlag(Arc::new(AtomicBool::new(false)))
    }

    /// A flag that is already raised.
    #[must_use]
    pub fn stopped() -> Self {
        StopFlag(Arc::new(AtomicBool::new(true)))
    }

    #[inline]
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    #[inline]
    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    #[inline]
    pub fn reset(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for StopFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Why a search gave up before finishing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The shared flag was raised
    Requested,
    /// The context ran past its deadline
    DeadlineExceeded,
}

/// Wall-clock limit for one search context. The default never expires.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Deadline(Option<Instant>);

impl Deadline {
    pub const NONE: Deadline = Deadline(None);

    /// Expires `limit` from now.
    #[must_use]
    pub fn after(limit: Duration) -> Self {
        Deadline(Some(Instant::now() + limit))
    }

    /// `Deadline::after(limit)`, or no deadline for `None`.
    #[must_use]
    pub fn from_limit(limit: Option<Duration>) -> Self {
        limit.map_or(Deadline::NONE, Deadline::after)
    }

    #[inline]
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.0.is_some_and(|at| Instant::now() >= at)
    }

    /// Time left, `None` without a deadline.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        self.0.map(|at| at.saturating_duration_since(Instant::now()))
    }
}

/// A stop flag plus the deadline of the context polling it.
#[derive(Clone, Debug, Default)]
pub struct StopCondition {
    flag: StopFlag,
    deadline: Deadline,
}

impl StopCondition {
    #[must_use]
    pub fn new(flag: StopFlag) -> Self {
        StopCondition {
            flag,
            deadline: Deadline::NONE,
        }
    }

    #[must_use]
    pub fn with_deadline(mut self, deadline: Deadline) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn set_deadline(&mut self, deadline: Deadline) {
        self.deadline = deadline;
    }

    #[must_use]
    pub fn flag(&self) -> &StopFlag {
        &self.flag
    }

    #[must_use]
    pub fn deadline(&self) -> Deadline {
        self.deadline
    }

    /// A raised flag wins over an expired deadline.
    #[must_use]
    pub fn poll(&self) -> Option<StopReason> {
        if self.flag.is_stopped() {
            Some(StopReason::Requested)
        } else if self.deadline.is_expired() {
            Some(StopReason::DeadlineExceeded)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_flag_lifecycle() {
        let flag = StopFlag::new();
        assert!(!flag.is_stopped());

        flag.stop();
        assert!(flag.is_stopped());

        flag.reset();
        assert!(!flag.is_stopped());
        assert!(StopFlag::stopped().is_stopped());
    }

    #[test]
    fn test_stop_flag_visible_across_threads() {
        let flag = StopFlag::new();
        let remote = flag.clone();
        std::thread::spawn(move || remote.stop()).join().unwrap();
        assert!(flag.is_stopped());
    }

    #[test]
    fn test_deadline() {
        assert!(!Deadline::NONE.is_expired());
        assert_eq!(Deadline::NONE.remaining(), None);
        assert_eq!(Deadline::from_limit(None), Deadline::NONE);

        assert!(Deadline::after(Duration::ZERO).is_expired());
        let far = Deadline::from_limit(Some(Duration::from_secs(3600)));
        assert!(!far.is_expired());
        assert!(far.remaining().unwrap() > Duration::from_secs(3000));
    }

    #[test]
    fn test_poll_prefers_requested() {
        let flag = StopFlag::new();
        let condition = StopCondition::new(flag.clone());
        assert_eq!(condition.poll(), None);

        let expired = condition.clone().with_deadline(Deadline::after(Duration::ZERO));
        assert_eq!(expired.poll(), Some(StopReason::DeadlineExceeded));

        flag.stop();
        assert_eq!(expired.poll(), Some(StopReason::Requested));
        assert_eq!(condition.poll(), Some(StopReason::Requested));
    }
}
