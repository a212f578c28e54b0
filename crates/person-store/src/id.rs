//! Identifier allocation for the in-memory store.

use std::collections::HashSet;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{NumericId, Result, StoreError};

/// Upper bound (exclusive) of random ids: the largest integer range that
/// survives a round trip through a JSON number.
pub const MAX_SAFE_ID: u64 = 1 << 53;

/// Random draws attempted before allocation gives up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 32;

/// How the in-memory store picks identifiers for new records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdStrategy {
    /// Uniform draw from `[0, bound)`, retried at most `max_attempts` times.
    Random { bound: u64, max_attempts: u32 },
    /// Monotonic counter.
    Sequential,
}

impl Default for IdStrategy {
    fn default() -> Self {
        Self::Random {
            bound: MAX_SAFE_ID,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl FromStr for IdStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(Self::default()),
            "sequential" => Ok(Self::Sequential),
            other => Err(format!(
                "unknown id strategy '{other}', expected 'random' or 'sequential'"
            )),
        }
    }
}

/// Hands out identifiers that are not currently in use.
///
/// Allocation always terminates: the random strategy fails with
/// [`StoreError::IdSpaceExhausted`] after a bounded number of collisions and
/// the sequential strategy walks past at most `existing.len()` taken ids.
#[derive(Debug)]
pub struct IdAllocator {
    strategy: IdStrategy,
    rng: StdRng,
    next: u64,
}

impl IdAllocator {
    /// Creates an allocator seeded from OS entropy.
    pub fn new(strategy: IdStrategy) -> Self {
        Self {
            strategy,
            rng: StdRng::from_entropy(),
            next: 1,
        }
    }

    /// Creates an allocator with a fixed seed, for reproducible draws.
    pub fn seeded(strategy: IdStrategy, seed: u64) -> Self {
        Self {
            strategy,
            rng: StdRng::seed_from_u64(seed),
            next: 1,
        }
    }

    /// Returns an id absent from `existing`.
    pub fn allocate(&mut self, existing: &HashSet<NumericId>) -> Result<NumericId> {
        match self.strategy {
            IdStrategy::Random {
                bound,
                max_attempts,
            } => self.draw_random(existing, bound, max_attempts),
            IdStrategy::Sequential => self.next_sequential(existing),
        }
    }

    fn draw_random(
        &mut self,
        existing: &HashSet<NumericId>,
        bound: u64,
        max_attempts: u32,
    ) -> Result<NumericId> {
        if bound == 0 {
            return Err(StoreError::IdSpaceExhausted { attempts: 0 });
        }

        for attempt in 1..=max_attempts {
            let candidate = NumericId::new(self.rng.gen_range(0..bound));
            if !existing.contains(&candidate) {
                return Ok(candidate);
            }
            tracing::debug!(%candidate, attempt, "id collision, drawing again");
        }

        Err(StoreError::IdSpaceExhausted {
            attempts: max_attempts,
        })
    }

    fn next_sequential(&mut self, existing: &HashSet<NumericId>) -> Result<NumericId> {
        let mut candidate = self.next;
        while existing.contains(&NumericId::new(candidate)) {
            candidate = candidate
                .checked_add(1)
                .ok_or(StoreError::IdSpaceExhausted { attempts: 0 })?;
        }
        self.next = candidate
            .checked_add(1)
            .ok_or(StoreError::IdSpaceExhausted { attempts: 0 })?;
        Ok(NumericId::new(candidate))
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new(IdStrategy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: impl IntoIterator<Item = u64>) -> HashSet<NumericId> {
        values.into_iter().map(NumericId::new).collect()
    }

    #[test]
    fn random_id_is_within_bound_and_free() {
        let mut allocator = IdAllocator::seeded(
            IdStrategy::Random {
                bound: 10,
                max_attempts: 1000,
            },
            7,
        );
        let taken = ids(0..9);

        let id = allocator.allocate(&taken).unwrap();
        assert_eq!(id, NumericId::new(9));
    }

    #[test]
    fn random_allocation_fails_instead_of_spinning_when_full() {
        let mut allocator = IdAllocator::seeded(
            IdStrategy::Random {
                bound: 4,
                max_attempts: 8,
            },
            1,
        );
        let taken = ids(0..4);

        let result = allocator.allocate(&taken);
        assert!(matches!(
            result,
            Err(StoreError::IdSpaceExhausted { attempts: 8 })
        ));
    }

    #[test]
    fn random_allocation_with_empty_range_fails() {
        let mut allocator = IdAllocator::new(IdStrategy::Random {
            bound: 0,
            max_attempts: 8,
        });
        assert!(allocator.allocate(&HashSet::new()).is_err());
    }

    #[test]
    fn sequential_ids_increase() {
        let mut allocator = IdAllocator::new(IdStrategy::Sequential);
        let mut taken = HashSet::new();

        for expected in 1..=3 {
            let id = allocator.allocate(&taken).unwrap();
            assert_eq!(id, NumericId::new(expected));
            taken.insert(id);
        }
    }

    #[test]
    fn sequential_skips_taken_ids() {
        let mut allocator = IdAllocator::new(IdStrategy::Sequential);
        let taken = ids([1, 2, 3, 4]);

        assert_eq!(allocator.allocate(&taken).unwrap(), NumericId::new(5));
        assert_eq!(allocator.allocate(&taken).unwrap(), NumericId::new(6));
    }

    #[test]
    fn sequential_does_not_reuse_freed_ids() {
        let mut allocator = IdAllocator::new(IdStrategy::Sequential);
        let first = allocator.allocate(&HashSet::new()).unwrap();
        let second = allocator.allocate(&HashSet::new()).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn strategy_parses_from_str() {
        assert_eq!(
            "sequential".parse::<IdStrategy>(),
            Ok(IdStrategy::Sequential)
        );
        assert_eq!("random".parse::<IdStrategy>(), Ok(IdStrategy::default()));
        assert!("uuid".parse::<IdStrategy>().is_err());
    }
}
