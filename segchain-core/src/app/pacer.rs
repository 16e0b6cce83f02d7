//! Interval pacing on a free-running millisecond clock
//!
//! Replaces CPU-speed-dependent delay loops: the caller polls with the
//! current time once per scheduling quantum and acts when an interval is
//! due. Times wrap at `u32::MAX` (about 49 days).

/// Longest interval the wrapping comparison can tell apart from "not yet due"
pub const MAX_INTERVAL_MS: u32 = i32::MAX as u32;

/// Fixed-interval pacer
#[derive(Debug, Clone)]
pub struct Pacer {
    interval_ms: u32,
    next_due_ms: u32,
}

impl Pacer {
    /// First interval is due `interval_ms` after `now_ms`
    ///
    /// The interval is clamped to `1..=MAX_INTERVAL_MS`.
    pub fn new(interval_ms: u32, now_ms: u32) -> Self {
        let interval_ms = interval_ms.clamp(1, MAX_INTERVAL_MS);
        Self {
            interval_ms,
            next_due_ms: now_ms.wrapping_add(interval_ms),
        }
    }

    /// Interval length
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Check whether an interval has elapsed
    ///
    /// Reports at most one interval per call. A slightly late poll keeps
    /// the original cadence; a poll more than a full interval late
    /// restarts the cadence from `now_ms` instead of bursting.
    pub fn poll(&mut self, now_ms: u32) -> bool {
        let late_by = now_ms.wrapping_sub(self.next_due_ms);
        if (late_by as i32) < 0 {
            return false;
        }

        if late_by >= self.interval_ms {
            self.next_due_ms = now_ms.wrapping_add(self.interval_ms);
        } else {
            self.next_due_ms = self.next_due_ms.wrapping_add(self.interval_ms);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_not_due_before_interval() {
        let mut pacer = Pacer::new(1000, 0);
        assert!(!pacer.poll(0));
        assert!(!pacer.poll(999));
        assert!(pacer.poll(1000));
        assert!(!pacer.poll(1000));
    }

    #[test]
    fn test_late_poll_keeps_cadence() {
        let mut pacer = Pacer::new(100, 0);
        assert!(pacer.poll(130));
        // Next due at 200, not 230
        assert!(!pacer.poll(199));
        assert!(pacer.poll(200));
    }

    #[test]
    fn test_very_late_poll_does_not_burst() {
        let mut pacer = Pacer::new(100, 0);
        assert!(pacer.poll(1000));
        assert!(!pacer.poll(1001));
        assert!(pacer.poll(1100));
    }

    #[test]
    fn test_wraparound() {
        let start = u32::MAX - 50;
        let mut pacer = Pacer::new(100, start);
        assert!(!pacer.poll(u32::MAX));
        assert!(!pacer.poll(48));
        assert!(pacer.poll(49));
    }

    #[test]
    fn test_zero_interval() {
        let mut pacer = Pacer::new(0, 10);
        assert_eq!(pacer.interval_ms(), 1);
        assert!(pacer.poll(11));
    }

    #[test]
    fn test_long_interval_is_clamped() {
        let mut pacer = Pacer::new(3_000_000_000, 0);
        assert_eq!(pacer.interval_ms(), MAX_INTERVAL_MS);
        assert!(!pacer.poll(10));
        assert!(!pacer.poll(MAX_INTERVAL_MS - 1));
        assert!(pacer.poll(MAX_INTERVAL_MS));
    }

    proptest! {
        #[test]
        fn prop_ticks_match_elapsed_intervals(
            interval in 1u32..500,
            start in any::<u32>(),
            quantum in 1u32..10,
            polls in 1usize..2000,
        ) {
            prop_assume!(quantum <= interval);
            let mut pacer = Pacer::new(interval, start);
            let mut fired = 0u32;
            let mut now = start;
            for _ in 0..polls {
                now = now.wrapping_add(quantum);
                if pacer.poll(now) {
                    fired += 1;
                }
            }
            let elapsed = (polls as u32) * quantum;
            prop_assert_eq!(fired, elapsed / interval);
        }
    }
}
