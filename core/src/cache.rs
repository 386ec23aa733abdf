//! Prediction cache: a customer's score is computed once and then served
//! from the prediction table.
//!
//! A hit is returned as stored, even if the profile changed since. Only the
//! explicit re-analysis path overwrites a cached score.

use crate::{error::GuardResult, store::GuardStore, types::Probability};
use serde::{Deserialize, Serialize};

/// Result of an insert-only prediction write.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InsertOutcome {
    Inserted,
    /// Another writer stored a score first; carries the stored value.
    AlreadyExists(Probability),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CachedScore {
    pub score:     Probability,
    pub cache_hit: bool,
}

pub struct PredictionCache<'a> {
    store: &'a GuardStore,
}

impl<'a> PredictionCache<'a> {
    pub fn new(store: &'a GuardStore) -> Self {
        Self { store }
    }

    pub fn lookup(&self, customer_id: &str) -> GuardResult<Option<Probability>> {
        self.store.get_prediction(customer_id)
    }

    /// Return the cached score, or run `compute` and store its result.
    ///
    /// Losing an insert race to a concurrent request is not an error: the
    /// winner's stored value is returned and reported as a hit.
    pub fn get_or_compute<F>(&self, customer_id: &str, compute: F) -> GuardResult<CachedScore>
    where
        F: FnOnce() -> GuardResult<Probability>,
    {
        if let Some(score) = self.lookup(customer_id)? {
            log::debug!("cache: hit for {customer_id} (score={score:.3})");
            return Ok(CachedScore { score, cache_hit: true });
        }

        let computed = compute()?;
        match self.store.insert_prediction(customer_id, computed)? {
            InsertOutcome::Inserted => {
                log::debug!("cache: stored {customer_id} (score={computed:.3})");
                Ok(CachedScore { score: computed, cache_hit: false })
            }
            InsertOutcome::AlreadyExists(existing) => {
                log::warn!(
                    "cache: concurrent insert for {customer_id}; keeping stored score {existing:.3} over {computed:.3}"
                );
                Ok(CachedScore { score: existing, cache_hit: true })
            }
        }
    }
}
