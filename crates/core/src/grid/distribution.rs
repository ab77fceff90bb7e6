//! Initial landscape mix
//!
//! A [`SpeciesDistribution`] gives the probability that a freshly initialized interior
//! cell starts in each [`CellState`].

use rand::distr::weighted::WeightedIndex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core_types::CellState;
use crate::error::ConfigError;

/// Probability per initial cell state, indexed by discriminant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DistributionRepr")]
pub struct SpeciesDistribution {
    weights: [f64; CellState::COUNT],
}

/// Unchecked wire form; deserialization goes through [`SpeciesDistribution::new`]
#[derive(Deserialize)]
struct DistributionRepr {
    weights: [f64; CellState::COUNT],
}

impl TryFrom<DistributionRepr> for SpeciesDistribution {
    type Error = ConfigError;

    fn try_from(repr: DistributionRepr) -> Result<Self, Self::Error> {
        Self::new(CellState::ALL.into_iter().zip(repr.weights))
    }
}

impl SpeciesDistribution {
    /// Allowed deviation of the weight sum from 1.0 for [`SpeciesDistribution::new`]
    pub const SUM_TOLERANCE: f64 = 1e-6;

    /// Build a distribution that must already sum to 1.
    ///
    /// Repeated states accumulate; absent states get probability 0.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidWeight`] for a negative or non-finite weight
    /// - [`ConfigError::EmptyDistribution`] if no weight is positive
    /// - [`ConfigError::DistributionSum`] if the sum is outside `1 ± SUM_TOLERANCE`
    pub fn new(entries: impl IntoIterator<Item = (CellState, f64)>) -> Result<Self, ConfigError> {
        let weights = collect_weights(entries)?;
        let sum: f64 = weights.iter().sum();
        if (sum - 1.0).abs() > Self::SUM_TOLERANCE {
            return Err(ConfigError::DistributionSum { sum });
        }
        Ok(Self { weights })
    }

    /// Build a distribution from arbitrary non-negative weights, rescaling them to sum to 1.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidWeight`] for a negative or non-finite weight
    /// - [`ConfigError::EmptyDistribution`] if no weight is positive
    pub fn normalized(
        entries: impl IntoIterator<Item = (CellState, f64)>,
    ) -> Result<Self, ConfigError> {
        let mut weights = collect_weights(entries)?;
        let sum: f64 = weights.iter().sum();
        if (sum - 1.0).abs() > Self::SUM_TOLERANCE {
            warn!("Species distribution sums to {sum:.6}, normalizing");
        }
        for w in &mut weights {
            *w /= sum;
        }
        Ok(Self { weights })
    }

    /// Every interior cell starts as `state`
    pub fn single(state: CellState) -> Self {
        let mut weights = [0.0; CellState::COUNT];
        weights[state.index()] = 1.0;
        Self { weights }
    }

    #[inline]
    pub fn probability(&self, state: CellState) -> f64 {
        self.weights[state.index()]
    }

    /// `(state, probability)` pairs with non-zero probability
    pub fn support(&self) -> impl Iterator<Item = (CellState, f64)> + '_ {
        CellState::ALL
            .iter()
            .map(|&s| (s, self.probability(s)))
            .filter(|&(_, p)| p > 0.0)
    }

    /// Weighted sampler over [`CellState::ALL`] indices
    pub(crate) fn sampler(&self) -> Result<WeightedIndex<f64>, ConfigError> {
        WeightedIndex::new(self.weights).map_err(|_| ConfigError::EmptyDistribution)
    }
}

impl Default for SpeciesDistribution {
    /// Mixed landscape: half bare ground, mostly young and mature forest, a little rock
    /// and water, and a handful of cells already alight.
    fn default() -> Self {
        let mut weights = [0.0; CellState::COUNT];
        weights[CellState::Empty.index()] = 0.5;
        weights[CellState::DeadTree.index()] = 0.05;
        weights[CellState::OldTree.index()] = 0.05;
        weights[CellState::Tree.index()] = 0.19;
        weights[CellState::Sapling.index()] = 0.1;
        weights[CellState::Stone.index()] = 0.05;
        weights[CellState::Water.index()] = 0.05;
        weights[CellState::Sparks.index()] = 0.005;
        weights[CellState::Fire.index()] = 0.005;
        Self { weights }
    }
}

fn collect_weights(
    entries: impl IntoIterator<Item = (CellState, f64)>,
) -> Result<[f64; CellState::COUNT], ConfigError> {
    let mut weights = [0.0; CellState::COUNT];
    for (state, value) in entries {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::InvalidWeight {
                state: state.name(),
                value,
            });
        }
        weights[state.index()] += value;
    }
    if weights.iter().all(|&w| w == 0.0) {
        return Err(ConfigError::EmptyDistribution);
    }
    Ok(weights)
}
