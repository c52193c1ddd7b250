use chrono::{DateTime, TimeZone, Utc};
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use voice_agent_brain::{advisor::TemplateSelector, clock::Clock};

/// Always picks the same fallback template
#[derive(Debug)]
pub struct FixedSelector(pub usize);

impl TemplateSelector for FixedSelector {
    fn choose(&self, _candidates: usize) -> usize {
        self.0
    }
}

/// Walks the fallback templates in order, wrapping around
#[derive(Debug, Default)]
pub struct CyclingSelector {
    next: AtomicUsize,
}

impl TemplateSelector for CyclingSelector {
    fn choose(&self, candidates: usize) -> usize {
        self.next.fetch_add(1, Ordering::SeqCst) % candidates
    }
}

/// Clock pinned to a fixed instant
#[derive(Debug)]
pub struct FrozenClock {
    millis: AtomicI64,
}

impl FrozenClock {
    pub fn at_millis(millis: i64) -> Self {
        Self {
            millis: AtomicI64::new(millis),
        }
    }

    pub fn advance_millis(&self, by: i64) {
        self.millis.fetch_add(by, Ordering::SeqCst);
    }
}

impl Clock for FrozenClock {
    fn now(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.millis.load(Ordering::SeqCst))
            .single()
            .expect("frozen clock holds a valid timestamp")
    }
}
