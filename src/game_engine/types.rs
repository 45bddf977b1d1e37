use super::{
    play::{ActionType, OutcomeKey, ShotType},
    roles::RoleAssignment,
};
use crate::{
    core::badge::BadgeLevel,
    types::{ActionId, BadgeId, PlayId, PlayerId},
};
use glam::Vec2;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PlayOutcome {
    Made,
    Missed,
    Blocked,
    Turnover,
    Foul,
    OffensiveRebound,
    DefensiveRebound,
    FreeThrows,
    #[default]
    Completed,
}

impl PlayOutcome {
    /// Maps the suffix of an authored `end_*` marker. Unknown markers
    /// close the play as `Completed`.
    pub fn from_terminal_tag(tag: &str) -> Self {
        match tag {
            "made" | "score" | "scored" => Self::Made,
            "missed" | "miss" => Self::Missed,
            "blocked" | "block" => Self::Blocked,
            "turnover" | "stolen" | "steal" | "shot_clock" | "violation" => Self::Turnover,
            "foul" | "fouled" => Self::Foul,
            "offensive_rebound" => Self::OffensiveRebound,
            "defensive_rebound" => Self::DefensiveRebound,
            "free_throws" => Self::FreeThrows,
            "completed" | "reset" => Self::Completed,
            other => {
                log::warn!("Unknown terminal marker end_{other}, treating it as completed");
                Self::Completed
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShotAttempt {
    pub shooter: PlayerId,
    pub shot_type: ShotType,
    pub made: bool,
    pub fouled: bool,
    pub blocked: bool,
    pub points: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contested_by: Option<PlayerId>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeThrowResult {
    pub shooter: Option<PlayerId>,
    pub attempted: u8,
    pub made: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReboundResult {
    pub offensive: bool,
    pub rebounder: Option<PlayerId>,
    pub offensive_probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeActivation {
    pub player_id: PlayerId,
    pub badge_id: BadgeId,
    pub action_id: ActionId,
    pub level: BadgeLevel,
    pub time: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshot {
    pub player_id: PlayerId,
    pub position: Vec2,
    pub has_ball: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyframe {
    pub time: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_id: Option<ActionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_type: Option<ActionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<OutcomeKey>,
    pub ball_carrier: Option<PlayerId>,
    pub positions: Vec<PlayerSnapshot>,
    pub description: String,
}

impl Keyframe {
    pub fn ball_position(&self) -> Option<Vec2> {
        self.positions
            .iter()
            .find(|snapshot| snapshot.has_ball)
            .map(|snapshot| snapshot.position)
    }
}

/// Everything one `execute_play` call produces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayResult {
    pub play_id: PlayId,
    pub outcome: PlayOutcome,
    pub points: u8,
    pub duration: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shot_attempt: Option<ShotAttempt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_throws: Option<FreeThrowResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rebound: Option<ReboundResult>,
    pub keyframes: Vec<Keyframe>,
    pub role_assignment: RoleAssignment,
    pub activated_badges: Vec<BadgeActivation>,
    pub nodes_visited: usize,
}

impl PlayResult {
    pub fn description(&self) -> String {
        self.keyframes
            .iter()
            .map(|keyframe| keyframe.description.as_str())
            .filter(|text| !text.is_empty())
            .join(" ")
    }
}
