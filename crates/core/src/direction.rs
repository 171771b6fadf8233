//! Block-relative directions.
//!
//! [`Direction`] covers all six faces of a block and is what neighbouring
//! mechanisms use to describe the side they act from. [`Facing`] is the
//! horizontal subset stored in a block's placement state.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Per-block state bits (placement metadata).
pub type BlockState = u16;

/// One of the six faces of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Negative Y.
    Down,
    /// Positive Y.
    Up,
    /// Negative Z.
    North,
    /// Positive Z.
    South,
    /// Negative X.
    West,
    /// Positive X.
    East,
}

impl Direction {
    /// Every direction, in stable order.
    pub const ALL: [Direction; 6] = [
        Direction::Down,
        Direction::Up,
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// The direction pointing the other way.
    pub fn opposite(self) -> Self {
        match self {
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::East => Direction::West,
        }
    }

    /// True for the four compass directions.
    pub fn is_horizontal(self) -> bool {
        !matches!(self, Direction::Down | Direction::Up)
    }

    /// Unit offset `(dx, dy, dz)` for this direction.
    pub fn offset(self) -> (i32, i32, i32) {
        match self {
            Direction::Down => (0, -1, 0),
            Direction::Up => (0, 1, 0),
            Direction::North => (0, 0, -1),
            Direction::South => (0, 0, 1),
            Direction::West => (-1, 0, 0),
            Direction::East => (1, 0, 0),
        }
    }

    /// Lowercase name used in configs and logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::Down => "down",
            Direction::Up => "up",
            Direction::North => "north",
            Direction::South => "south",
            Direction::West => "west",
            Direction::East => "east",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown direction name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown direction `{0}`")]
pub struct ParseDirectionError(String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Direction::ALL
            .into_iter()
            .find(|dir| dir.as_str() == lowered)
            .ok_or_else(|| ParseDirectionError(s.to_string()))
    }
}

/// Facing direction for blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    /// Front face points north.
    #[default]
    North,
    /// Front face points south.
    South,
    /// Front face points east.
    East,
    /// Front face points west.
    West,
}

impl Facing {
    /// Every horizontal facing, in state-bit order.
    pub const ALL: [Facing; 4] = [Facing::North, Facing::South, Facing::East, Facing::West];

    /// Get facing from state bits (2 bits)
    pub fn from_state(state: BlockState) -> Self {
        match state & 0x03 {
            0 => Facing::North,
            1 => Facing::South,
            2 => Facing::East,
            _ => Facing::West,
        }
    }

    /// Convert to state bits
    pub fn to_state(self) -> BlockState {
        match self {
            Facing::North => 0,
            Facing::South => 1,
            Facing::East => 2,
            Facing::West => 3,
        }
    }

    /// Get the opposite facing
    pub fn opposite(self) -> Self {
        match self {
            Facing::North => Facing::South,
            Facing::South => Facing::North,
            Facing::East => Facing::West,
            Facing::West => Facing::East,
        }
    }

    /// The block face this facing points out of.
    pub fn direction(self) -> Direction {
        match self {
            Facing::North => Direction::North,
            Facing::South => Direction::South,
            Facing::East => Direction::East,
            Facing::West => Direction::West,
        }
    }

    /// The face directly behind the front face.
    pub fn back(self) -> Direction {
        self.opposite().direction()
    }
}

impl TryFrom<Direction> for Facing {
    type Error = ParseDirectionError;

    fn try_from(dir: Direction) -> Result<Self, Self::Error> {
        match dir {
            Direction::North => Ok(Facing::North),
            Direction::South => Ok(Facing::South),
            Direction::East => Ok(Facing::East),
            Direction::West => Ok(Facing::West),
            other => Err(ParseDirectionError(other.as_str().to_string())),
        }
    }
}

impl FromStr for Facing {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Direction>().and_then(Facing::try_from)
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.direction().fmt(f)
    }
}
