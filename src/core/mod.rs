pub mod badge;
pub mod constants;
pub mod player;
pub mod position;
pub mod skill;

pub use badge::{Badge, BadgeLevel};
pub use constants::*;
pub use player::LineupPlayer;
pub use position::{Position, MAX_GAME_POSITION};
pub use skill::{Attribute, AttributeCategory, Attributes, GameSkill, Rated, Skill};
