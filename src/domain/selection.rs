//! Candidate ordering strategies for link targets

use crate::domain::PostId;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Decides in which order related posts are offered as link targets.
///
/// The linker always takes the first candidate after ordering.
pub trait CandidateSelector {
    fn arrange(&mut self, candidates: &mut [PostId]);
}

/// Shuffles candidates, so each eligible post is equally likely to be linked
#[derive(Debug)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    pub fn new() -> Self {
        RandomSelector {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible shuffling for a fixed seed
    pub fn seeded(seed: u64) -> Self {
        RandomSelector {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl CandidateSelector for RandomSelector {
    fn arrange(&mut self, candidates: &mut [PostId]) {
        candidates.shuffle(&mut self.rng);
    }
}

/// Orders candidates by ascending post id
#[derive(Debug, Default, Clone, Copy)]
pub struct StableSelector;

impl CandidateSelector for StableSelector {
    fn arrange(&mut self, candidates: &mut [PostId]) {
        candidates.sort_unstable();
    }
}

impl<T: CandidateSelector + ?Sized> CandidateSelector for Box<T> {
    fn arrange(&mut self, candidates: &mut [PostId]) {
        (**self).arrange(candidates)
    }
}
