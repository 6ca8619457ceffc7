// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nereid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::grid::GridPos;

/// Compass direction on the grid. North is `-y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Direction {
    /// Clockwise from north. Label placement breaks score ties in this order.
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::N => (0, -1),
            Self::NE => (1, -1),
            Self::E => (1, 0),
            Self::SE => (1, 1),
            Self::S => (0, 1),
            Self::SW => (-1, 1),
            Self::W => (-1, 0),
            Self::NW => (-1, -1),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::N => Self::S,
            Self::NE => Self::SW,
            Self::E => Self::W,
            Self::SE => Self::NW,
            Self::S => Self::N,
            Self::SW => Self::NE,
            Self::W => Self::E,
            Self::NW => Self::SE,
        }
    }

    pub fn is_cardinal(self) -> bool {
        matches!(self, Self::N | Self::E | Self::S | Self::W)
    }

    pub fn step(self, pos: GridPos) -> GridPos {
        let (dx, dy) = self.delta();
        pos.offset(dx, dy)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::N => "n",
            Self::NE => "ne",
            Self::E => "e",
            Self::SE => "se",
            Self::S => "s",
            Self::SW => "sw",
            Self::W => "w",
            Self::NW => "nw",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown compass direction {value:?}")]
pub struct ParseDirectionError {
    pub value: String,
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let dir = match s.to_ascii_lowercase().as_str() {
            "n" | "north" => Self::N,
            "ne" | "northeast" | "north-east" => Self::NE,
            "e" | "east" => Self::E,
            "se" | "southeast" | "south-east" => Self::SE,
            "s" | "south" => Self::S,
            "sw" | "southwest" | "south-west" => Self::SW,
            "w" | "west" => Self::W,
            "nw" | "northwest" | "north-west" => Self::NW,
            _ => return Err(ParseDirectionError { value: s.to_owned() }),
        };
        Ok(dir)
    }
}
