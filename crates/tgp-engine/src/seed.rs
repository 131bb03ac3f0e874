use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seed of the random stream that drives an entire evolution run.
///
/// Every random decision of a run (initial variables, insertion and crossover draws,
/// operator choice, selection) comes from one [`Pcg32`] built from this seed, so the
/// same seed, parameters and training set reproduce the same population at every
/// generation.
///
/// The seed is 128 bits and is written as 32 hex characters. Short decimal seeds are
/// also accepted when parsing.
///
/// # Example
///
/// ```
/// use tgp_engine::EvolutionSeed;
///
/// let seed: EvolutionSeed = "42".parse().unwrap();
/// assert_eq!(seed, EvolutionSeed::from_u64(42));
/// assert_eq!(seed.to_string(), "0000000000000000000000000000002a");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvolutionSeed([u8; 16]);

/// Error returned when a seed string is neither 32 hex characters nor a decimal `u64`.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid seed {input:?}: expected 32 hex characters or a decimal integer")]
pub struct SeedParseError {
    input: String,
}

impl EvolutionSeed {
    #[must_use]
    pub fn from_u64(seed: u64) -> Self {
        Self(u128::from(seed).to_be_bytes())
    }

    /// Creates the random number generator for a run.
    #[must_use]
    pub fn rng(&self) -> Pcg32 {
        Pcg32::from_seed(self.0)
    }
}

impl fmt::Display for EvolutionSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for EvolutionSeed {
    type Err = SeedParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || SeedParseError {
            input: s.to_owned(),
        };
        if s.len() == 32 {
            let num = u128::from_str_radix(s, 16).map_err(|_| err())?;
            return Ok(Self(num.to_be_bytes()));
        }
        s.parse::<u64>().map(Self::from_u64).map_err(|_| err())
    }
}

impl Serialize for EvolutionSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EvolutionSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        if hex_str.len() != 32 {
            return Err(serde::de::Error::custom(format!(
                "invalid hex: expected 32 characters, got {}",
                hex_str.len()
            )));
        }
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows drawing a fresh seed with `rng.random()`.
impl Distribution<EvolutionSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> EvolutionSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        EvolutionSeed(seed)
    }
}
