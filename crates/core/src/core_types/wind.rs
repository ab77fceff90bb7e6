//! Wind direction and the neighbor influence table
//!
//! Wind is discrete: eight compass directions plus calm. A direction names where the
//! wind comes FROM, so a burning neighbor lying in that direction pushes fire onto the
//! cell and gets the largest multiplier. Weights fall off in 45° bands:
//!
//! | Angle to wind | Band  | Weight |
//! |---------------|-------|--------|
//! | 0°            | best  | 1.5    |
//! | 45°           | most  | 1.2    |
//! | 90°           | ok    | 0.8    |
//! | 135°          | bad   | 0.4    |
//! | 180°          | worst | 0.1    |
//!
//! Calm weights every neighbor by 1.0.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Relative `(dy, dx)` positions of the eight neighbors.
///
/// Order matters: it is the column index into [`WIND_INFLUENCE`] and the ignition scan
/// order. `dy` grows southwards (row index), `dx` grows eastwards (column index).
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), // NW
    (-1, 0),  // N
    (-1, 1),  // NE
    (0, -1),  // W
    (0, 1),   // E
    (1, -1),  // SW
    (1, 0),   // S
    (1, 1),   // SE
];

/// Spread multiplier per `[wind direction][neighbor index]`
pub const WIND_INFLUENCE: [[f64; 8]; 9] = [
    // NW   N    NE   W    E    SW   S    SE
    [0.1, 0.4, 0.8, 0.4, 1.2, 0.8, 1.2, 1.5], // SouthEast
    [0.4, 0.8, 1.2, 0.1, 1.5, 0.4, 0.8, 1.2], // East
    [0.8, 1.2, 1.5, 0.4, 1.2, 0.1, 0.4, 0.8], // NorthEast
    [1.2, 1.5, 1.2, 0.8, 0.8, 0.4, 0.1, 0.4], // North
    [1.5, 1.2, 0.8, 1.2, 0.4, 0.8, 0.4, 0.1], // NorthWest
    [1.2, 0.8, 0.4, 1.5, 0.1, 1.2, 0.8, 0.4], // West
    [0.8, 0.4, 0.1, 1.2, 0.4, 1.5, 1.2, 0.8], // SouthWest
    [0.4, 0.1, 0.4, 0.8, 0.8, 1.2, 1.5, 1.2], // South
    [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0], // Calm
];

/// True if the neighbor at `index` sits on a diagonal
#[inline]
pub fn is_diagonal(index: usize) -> bool {
    let (dy, dx) = NEIGHBOR_OFFSETS[index];
    dy != 0 && dx != 0
}

/// Discrete wind direction.
///
/// Discriminants are the row indices of [`WIND_INFLUENCE`].
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WindDirection {
    SouthEast = 0,
    East = 1,
    NorthEast = 2,
    North = 3,
    NorthWest = 4,
    West = 5,
    SouthWest = 6,
    South = 7,
    /// No wind: uniform influence
    #[default]
    Calm = 8,
}

impl WindDirection {
    /// All nine directions in table order
    pub const ALL: [WindDirection; 9] = [
        WindDirection::SouthEast,
        WindDirection::East,
        WindDirection::NorthEast,
        WindDirection::North,
        WindDirection::NorthWest,
        WindDirection::West,
        WindDirection::SouthWest,
        WindDirection::South,
        WindDirection::Calm,
    ];

    /// Row of [`WIND_INFLUENCE`] for this direction
    #[inline]
    pub fn influence_row(self) -> &'static [f64; 8] {
        &WIND_INFLUENCE[self as usize]
    }

    /// Display label, e.g. `"North East"` or `"No Wind"`
    pub fn label(self) -> &'static str {
        match self {
            WindDirection::SouthEast => "South East",
            WindDirection::East => "East",
            WindDirection::NorthEast => "North East",
            WindDirection::North => "North",
            WindDirection::NorthWest => "North West",
            WindDirection::West => "West",
            WindDirection::SouthWest => "South West",
            WindDirection::South => "South",
            WindDirection::Calm => "No Wind",
        }
    }
}

impl fmt::Display for WindDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<u8> for WindDirection {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or_else(|| ConfigError::UnknownWindDirection(value.to_string()))
    }
}

impl FromStr for WindDirection {
    type Err = ConfigError;

    /// Accepts labels in any case with spaces, dashes or underscores
    /// (`"North East"`, `"north-east"`, `"NORTH_EAST"`), compass abbreviations
    /// (`"ne"`), `"calm"`/`"none"`/`"no wind"`, and numeric indices `"0"`..`"8"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        let direction = match key.as_str() {
            "southeast" | "se" => WindDirection::SouthEast,
            "east" | "e" => WindDirection::East,
            "northeast" | "ne" => WindDirection::NorthEast,
            "north" | "n" => WindDirection::North,
            "northwest" | "nw" => WindDirection::NorthWest,
            "west" | "w" => WindDirection::West,
            "southwest" | "sw" => WindDirection::SouthWest,
            "south" | "s" => WindDirection::South,
            "nowind" | "calm" | "none" => WindDirection::Calm,
            other => {
                return other
                    .parse::<u8>()
                    .map_err(|_| ConfigError::UnknownWindDirection(s.to_string()))
                    .and_then(|index| {
                        WindDirection::try_from(index)
                            .map_err(|_| ConfigError::UnknownWindDirection(s.to_string()))
                    });
            }
        };
        Ok(direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Compass step (0 = N, clockwise in 45° steps) of each neighbor offset
    const OFFSET_COMPASS: [usize; 8] = [7, 0, 1, 6, 2, 5, 4, 3];
    /// Compass step of each directional wind row
    const WIND_COMPASS: [usize; 8] = [3, 2, 1, 0, 7, 6, 5, 4];
    const BANDS: [f64; 5] = [1.5, 1.2, 0.8, 0.4, 0.1];

    #[test]
    fn test_influence_follows_angular_bands() {
        for (row, &wind_step) in WIND_COMPASS.iter().enumerate() {
            for (col, &offset_step) in OFFSET_COMPASS.iter().enumerate() {
                let diff = wind_step.abs_diff(offset_step);
                let steps = diff.min(8 - diff);
                assert_eq!(
                    WIND_INFLUENCE[row][col], BANDS[steps],
                    "row {row} col {col}"
                );
            }
        }
    }

    #[test]
    fn test_calm_row_uniform() {
        assert!(WindDirection::Calm.influence_row().iter().all(|&w| w == 1.0));
    }

    #[test]
    fn test_maximum_in_own_direction() {
        assert_eq!(WindDirection::North.influence_row()[1], 1.5);
        assert_eq!(WindDirection::North.influence_row()[6], 0.1);
        assert_eq!(WindDirection::East.influence_row()[4], 1.5);
        assert_eq!(WindDirection::East.influence_row()[3], 0.1);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("North East".parse::<WindDirection>().ok(), Some(WindDirection::NorthEast));
        assert_eq!("south-west".parse::<WindDirection>().ok(), Some(WindDirection::SouthWest));
        assert_eq!("No Wind".parse::<WindDirection>().ok(), Some(WindDirection::Calm));
        assert_eq!("nw".parse::<WindDirection>().ok(), Some(WindDirection::NorthWest));
        assert_eq!("3".parse::<WindDirection>().ok(), Some(WindDirection::North));
        assert!("9".parse::<WindDirection>().is_err());
        assert!("upwards".parse::<WindDirection>().is_err());
    }

    #[test]
    fn test_try_from_index_round_trips_labels() {
        for (i, dir) in WindDirection::ALL.iter().enumerate() {
            assert_eq!(WindDirection::try_from(i as u8).ok(), Some(*dir));
            assert_eq!(dir.label().parse::<WindDirection>().ok(), Some(*dir));
        }
        assert!(WindDirection::try_from(9).is_err());
    }

    #[test]
    fn test_diagonals() {
        let diagonals: Vec<usize> = (0..8).filter(|&i| is_diagonal(i)).collect();
        assert_eq!(diagonals, vec![0, 2, 5, 7]);
    }
}
