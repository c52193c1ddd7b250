use std::sync::Mutex;

/// Picks one of `candidates` fallback templates.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateSelector: Send + Sync {
    /// Returns an index in `0..candidates`. `candidates` is never zero.
    fn choose(&self, candidates: usize) -> usize;
}

/// Uniform selection. Uses the thread-local generator unless seeded.
#[derive(Debug, Default)]
pub struct RandomSelector {
    rng: Option<Mutex<fastrand::Rng>>,
}

impl RandomSelector {
    pub fn new() -> Self {
        Self { rng: None }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Some(Mutex::new(fastrand::Rng::with_seed(seed))),
        }
    }
}

impl TemplateSelector for RandomSelector {
    fn choose(&self, candidates: usize) -> usize {
        if candidates <= 1 {
            return 0;
        }
        match &self.rng {
            Some(rng) => rng
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .usize(..candidates),
            None => fastrand::usize(..candidates),
        }
    }
}
