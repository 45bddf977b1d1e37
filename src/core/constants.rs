use super::skill::Skill;

// Fallback values used whenever a player record lacks the attribute.
pub const DEFAULT_ATTRIBUTE: Skill = 50.0;
pub const DEFAULT_OVERALL: Skill = 70.0;
pub const DEFAULT_OFFENSIVE_REBOUND: Skill = 40.0;
pub const DEFAULT_DEFENSIVE_REBOUND: Skill = 50.0;
pub const DEFAULT_FREE_THROW: Skill = 70.0;

pub const MAX_PLAYERS_PER_LINEUP: usize = 5;
