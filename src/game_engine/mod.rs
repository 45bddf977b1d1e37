mod action;
pub mod config;
pub mod constants;
pub mod description;
pub mod engine;
pub mod formation;
pub mod free_throw;
pub mod play;
pub mod rebound;
pub mod replay;
pub mod resolver;
pub mod roles;
pub mod scheme;
pub mod stats;
pub mod types;

pub use config::EngineConfig;
pub use engine::{execute_play, execute_play_seeded, PlayInput, PlayState};
pub use play::{ActionNode, ActionType, Actor, Outcome, OutcomeKey, Play, PlayCategory, RoleSlot, ShotType, Transition};
pub use replay::ReplaySeed;
pub use roles::RoleAssignment;
pub use scheme::{DefensiveModifiers, DefensiveScheme};
pub use stats::PlayStats;
pub use types::{Keyframe, PlayOutcome, PlayResult};
