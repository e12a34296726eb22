//! Username generation backed by an injectable random source

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt::Debug;
use std::sync::Mutex;

use crate::domain::user::build_username;

/// Trait for deriving a username from a first name
pub trait UsernameGenerator: Send + Sync + Debug {
    /// Produce `<stem>-<random suffix>` for the given first name
    fn generate(&self, first_name: &str) -> String;
}

/// Generator drawing suffixes from a standard RNG
#[derive(Debug)]
pub struct RandomUsernameGenerator {
    rng: Mutex<StdRng>,
}

impl RandomUsernameGenerator {
    /// Seed from operating system entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic generator for tests and reproducible fixtures
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomUsernameGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl UsernameGenerator for RandomUsernameGenerator {
    fn generate(&self, first_name: &str) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        build_username(first_name, &mut *rng)
    }
}
