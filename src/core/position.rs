use glam::Vec2;
use serde::{Deserialize, Serialize};
use strum_macros::{EnumIter, EnumString};

pub const MAX_GAME_POSITION: usize = 5;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
)]
pub enum Position {
    PG,
    SG,
    SF,
    PF,
    C,
}

impl Position {
    pub fn index(&self) -> usize {
        match self {
            Self::PG => 0,
            Self::SG => 1,
            Self::SF => 2,
            Self::PF => 3,
            Self::C => 4,
        }
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        match idx {
            0 => Some(Self::PG),
            1 => Some(Self::SG),
            2 => Some(Self::SF),
            3 => Some(Self::PF),
            4 => Some(Self::C),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::PG => "PG",
            Self::SG => "SG",
            Self::SF => "SF",
            Self::PF => "PF",
            Self::C => "C",
        }
    }

    pub fn long_name(&self) -> &str {
        match self {
            Self::PG => "Point guard",
            Self::SG => "Shooting guard",
            Self::SF => "Small forward",
            Self::PF => "Power forward",
            Self::C => "Center",
        }
    }

    // Half-court spot (feet, basket at the bottom) used when a play
    // does not place the player explicitly.
    pub fn default_spot(&self) -> Vec2 {
        match self {
            Self::PG => Vec2::new(25.0, 30.0),
            Self::SG => Vec2::new(44.0, 18.0),
            Self::SF => Vec2::new(6.0, 18.0),
            Self::PF => Vec2::new(36.0, 8.0),
            Self::C => Vec2::new(14.0, 8.0),
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
