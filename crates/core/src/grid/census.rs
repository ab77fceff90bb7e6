//! Per-state cell counts for a grid snapshot

use serde::{Deserialize, Serialize};

use crate::core_types::CellState;

/// Number of cells in each [`CellState`], indexed by discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StateCensus {
    counts: [usize; CellState::COUNT],
}

impl StateCensus {
    pub fn from_cells(cells: &[CellState]) -> Self {
        let mut counts = [0; CellState::COUNT];
        for &cell in cells {
            counts[cell.index()] += 1;
        }
        Self { counts }
    }

    #[inline]
    pub fn get(&self, state: CellState) -> usize {
        self.counts[state.index()]
    }

    /// Cells in `Sparks`, `Fire` or `Coals`
    pub fn burning(&self) -> usize {
        self.sum_of(&[CellState::Sparks, CellState::Fire, CellState::Coals])
    }

    /// Cells holding any vegetation stage
    pub fn vegetation(&self) -> usize {
        self.sum_of(&CellState::VEGETATION)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    fn sum_of(&self, states: &[CellState]) -> usize {
        states.iter().map(|&s| self.get(s)).sum()
    }

    /// `(state, count)` pairs in discriminant order
    pub fn entries(&self) -> impl Iterator<Item = (CellState, usize)> + '_ {
        CellState::ALL.iter().map(|&s| (s, self.get(s)))
    }
}

impl std::fmt::Display for StateCensus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (state, count) in self.entries().filter(|&(_, n)| n > 0) {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{state}={count}")?;
            first = false;
        }
        Ok(())
    }
}
