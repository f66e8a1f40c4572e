// crates/store/src/clock.rs
use std::sync::atomic::{AtomicI64, Ordering};

/// Source of "now" in epoch milliseconds.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Clock that starts at a fixed instant and advances 1ms per reading.
#[derive(Debug)]
pub struct StepClock {
    next: AtomicI64,
}

impl StepClock {
    pub fn starting_at(millis: i64) -> Self {
        Self {
            next: AtomicI64::new(millis),
        }
    }
}

impl Clock for StepClock {
    fn now_millis(&self) -> i64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }
}
