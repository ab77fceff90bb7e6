//! Cell state model
//!
//! Every cell of the automaton holds exactly one [`CellState`]. The states fall into
//! three families:
//! - Vegetation: `Sapling`, `Tree`, `OldTree`, `DeadTree` (the only states that can ignite)
//! - Terrain: `Empty`, `Stone`, `Water`, `BurnedGround`
//! - Fire lifecycle: `Sparks → Fire → Coals → BurnedGround`
//!
//! The discriminants are stable and used as the cell encoding across the FFI boundary.

use serde::{Deserialize, Serialize};

/// Discrete state of one grid cell
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellState {
    /// Bare ground that can be recolonised by saplings
    #[default]
    Empty = 0,
    /// Young vegetation, least flammable
    Sapling = 1,
    /// Mature tree
    Tree = 2,
    /// Old tree, more flammable and may die off
    OldTree = 3,
    /// Standing dead timber, most flammable
    DeadTree = 4,
    /// Rock outcrop, never changes
    Stone = 5,
    /// Open water, never changes and dampens ignition nearby
    Water = 6,
    /// First fire stage
    Sparks = 7,
    /// Fully developed fire
    Fire = 8,
    /// Smouldering remains
    Coals = 9,
    /// Burnt-out ground, absorbing
    BurnedGround = 10,
}

impl CellState {
    /// Number of distinct states
    pub const COUNT: usize = 11;

    /// All states in discriminant order
    pub const ALL: [CellState; Self::COUNT] = [
        CellState::Empty,
        CellState::Sapling,
        CellState::Tree,
        CellState::OldTree,
        CellState::DeadTree,
        CellState::Stone,
        CellState::Water,
        CellState::Sparks,
        CellState::Fire,
        CellState::Coals,
        CellState::BurnedGround,
    ];

    /// Vegetation states that are eligible for ignition
    pub const VEGETATION: [CellState; 4] = [
        CellState::DeadTree,
        CellState::OldTree,
        CellState::Tree,
        CellState::Sapling,
    ];

    /// Fire lifecycle in strict successor order
    pub const FIRE_LIFECYCLE: [CellState; 4] = [
        CellState::Sparks,
        CellState::Fire,
        CellState::Coals,
        CellState::BurnedGround,
    ];

    /// Stable array index of this state (equal to its discriminant)
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Decode a state from its discriminant
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(usize::from(id)).copied()
    }

    /// Human-readable name
    pub fn name(self) -> &'static str {
        match self {
            CellState::Empty => "Empty",
            CellState::Sapling => "Sapling",
            CellState::Tree => "Tree",
            CellState::OldTree => "OldTree",
            CellState::DeadTree => "DeadTree",
            CellState::Stone => "Stone",
            CellState::Water => "Water",
            CellState::Sparks => "Sparks",
            CellState::Fire => "Fire",
            CellState::Coals => "Coals",
            CellState::BurnedGround => "BurnedGround",
        }
    }

    /// True for `Sapling`, `Tree`, `OldTree` and `DeadTree`
    #[inline]
    pub fn is_vegetation(self) -> bool {
        susceptibility(self).is_some()
    }

    /// True for `Sparks`, `Fire` and `Coals` (the stages that can spread fire)
    #[inline]
    pub fn is_burning(self) -> bool {
        matches!(self, CellState::Sparks | CellState::Fire | CellState::Coals)
    }

    /// Next stage of the fire lifecycle, `None` outside the lifecycle
    #[inline]
    pub fn fire_successor(self) -> Option<CellState> {
        match self {
            CellState::Sparks => Some(CellState::Fire),
            CellState::Fire => Some(CellState::Coals),
            CellState::Coals => Some(CellState::BurnedGround),
            _ => None,
        }
    }
}

impl std::fmt::Display for CellState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Flammability multiplier per state, indexed by discriminant.
/// Non-vegetation states carry `None`.
const SUSCEPTIBILITY: [Option<f64>; CellState::COUNT] = [
    None,      // Empty
    Some(0.5), // Sapling
    Some(1.0), // Tree
    Some(1.5), // OldTree
    Some(2.0), // DeadTree
    None,      // Stone
    None,      // Water
    None,      // Sparks
    None,      // Fire
    None,      // Coals
    None,      // BurnedGround
];

/// Species susceptibility multiplier, `None` for non-vegetation states
#[inline]
pub fn susceptibility(state: CellState) -> Option<f64> {
    SUSCEPTIBILITY[state.index()]
}
