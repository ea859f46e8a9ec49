use std::collections::HashMap;

use super::{CredibilityStore, Direction};

/// Predicted versus realized direction for one article.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    pub predicted: Direction,
    pub actual: Direction,
}

impl Observation {
    pub fn hit(self) -> bool {
        self.predicted == self.actual
    }
}

/// What a completed pair did to its domain's counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairOutcome {
    /// Both articles were right, or both were wrong.
    Correct,
    /// Exactly one article was right.
    Incorrect,
    /// At least one article had neutral sentiment; the pair is not counted.
    Skipped,
}

/// Feeds observations into a [`CredibilityStore`] in consecutive per-domain pairs.
///
/// Observations of one domain are paired in arrival order (1st with 2nd, 3rd with
/// 4th, ...). An odd one out is dropped by [`CredibilityTracker::finish`].
#[derive(Debug, Default)]
pub struct CredibilityTracker {
    store: CredibilityStore,
    pending: HashMap<String, Observation>,
}

impl CredibilityTracker {
    pub fn new(store: CredibilityStore) -> Self {
        Self {
            store,
            pending: HashMap::new(),
        }
    }

    /// Records one article. Returns the outcome when it completes a pair.
    pub fn update(&mut self, domain: &str, predicted: Direction, actual: Direction) -> Option<PairOutcome> {
        let obs = Observation { predicted, actual };
        // Every domain that shows up gets an entry, paired or not.
        self.store.entry(domain);

        let Some(first) = self.pending.remove(domain) else {
            self.pending.insert(domain.to_string(), obs);
            return None;
        };

        let outcome = if first.predicted == Direction::Neutral || obs.predicted == Direction::Neutral {
            PairOutcome::Skipped
        } else if first.hit() == obs.hit() {
            PairOutcome::Correct
        } else {
            PairOutcome::Incorrect
        };

        let stat = self.store.entry(domain);
        match outcome {
            PairOutcome::Correct => {
                stat.total_pairs += 1;
                stat.correct += 1;
            }
            PairOutcome::Incorrect => {
                stat.total_pairs += 1;
                stat.incorrect += 1;
            }
            PairOutcome::Skipped => {}
        }
        stat.recompute();
        tracing::debug!(domain, ?outcome, weight = stat.average_weight, "pair evaluated");
        Some(outcome)
    }

    /// Current weight of `domain`, `0.0` if unseen.
    pub fn weight(&self, domain: &str) -> f64 {
        self.store.weight(domain)
    }

    pub fn store(&self) -> &CredibilityStore {
        &self.store
    }

    /// Drops unpaired observations and returns the updated store.
    pub fn finish(mut self) -> CredibilityStore {
        if !self.pending.is_empty() {
            tracing::debug!(unpaired = self.pending.len(), "dropping unpaired observations");
        }
        self.store.recompute_all();
        self.store
    }
}
