//! Codename assignment for new gadgets.
//!
//! Codenames come from a fixed pool and must be unique across every gadget ever created,
//! including decommissioned and destroyed ones. Codenames are never recycled.

use rand::Rng;

use crate::server::{
    data::gadget::GadgetRepository,
    error::{gadget::GadgetError, AppError},
};

/// Default pool of codenames.
pub const CODENAMES: &[&str] = &[
    "The Nightingale",
    "The Kraken",
    "The Falcon",
    "The Phantom",
    "The Viper",
    "The Ghost",
    "The Cobra",
    "The Raptor",
    "The Jackal",
    "The Mongoose",
    "The Chameleon",
    "The Wraith",
    "The Harbinger",
    "The Basilisk",
    "The Sparrow",
    "The Lynx",
    "The Scorpion",
    "The Specter",
    "The Osprey",
    "The Mantis",
    "The Wolverine",
    "The Barracuda",
    "The Condor",
    "The Panther",
];

/// Random draws attempted before falling back to a full sweep of the pool.
const MAX_RANDOM_DRAWS: usize = 16;

/// Picks an unused codename from a pool.
///
/// Draws at random first; once the draw budget is spent it sweeps the whole pool from a
/// random offset, so exhaustion is reported only when every codename is taken.
#[derive(Debug, Clone, Copy)]
pub struct CodenameGenerator {
    pool: &'static [&'static str],
    max_random_draws: usize,
}

impl CodenameGenerator {
    pub fn new() -> Self {
        Self::with_pool(CODENAMES)
    }

    /// Generator over a custom pool.
    pub fn with_pool(pool: &'static [&'static str]) -> Self {
        Self {
            pool,
            max_random_draws: MAX_RANDOM_DRAWS,
        }
    }

    /// Number of codenames in the pool.
    #[cfg(test)]
    pub fn capacity(&self) -> usize {
        self.pool.len()
    }

    /// Returns a codename no existing gadget holds.
    ///
    /// The result is only a candidate: a concurrent create may claim it first, which the
    /// unique index on `codename` catches at insert time.
    ///
    /// # Returns
    /// - `Ok(String)` - An unused codename
    /// - `Err(AppError::GadgetErr(CodenamesExhausted))` - Every codename is in use
    /// - `Err(AppError::DbErr)` - Database error while checking availability
    pub async fn generate(&self, repo: &GadgetRepository<'_>) -> Result<String, AppError> {
        if self.pool.is_empty() {
            return Err(GadgetError::CodenamesExhausted.into());
        }

        for _ in 0..self.max_random_draws {
            let candidate = self.pool[self.random_index()];
            if !repo.codename_exists(candidate).await? {
                return Ok(candidate.to_string());
            }
        }

        let offset = self.random_index();
        for step in 0..self.pool.len() {
            let candidate = self.pool[(offset + step) % self.pool.len()];
            if !repo.codename_exists(candidate).await? {
                return Ok(candidate.to_string());
            }
        }

        Err(GadgetError::CodenamesExhausted.into())
    }

    // ThreadRng is not Send; keep it out of any await.
    fn random_index(&self) -> usize {
        rand::rng().random_range(0..self.pool.len())
    }
}

impl Default for CodenameGenerator {
    fn default() -> Self {
        Self::new()
    }
}
