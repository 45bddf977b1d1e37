use super::{constants::DEFAULT_ACTION_DURATION, scheme::DefensiveModifiers, types::PlayOutcome};
use crate::{
    core::{position::Position, skill::Attribute},
    types::{ActionId, AppResult, BadgeId, PlayId, RoleName},
};
use anyhow::anyhow;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt::Display;
use strum_macros::{Display, EnumIter};

const DYNAMIC_ACTOR: &str = "dynamic";
const BALL_ACTOR: &str = "ball";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PlayCategory {
    PickAndRoll,
    Isolation,
    Post,
    OffBall,
    Horns,
    Motion,
    Transition,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ActionType {
    Pass,
    Shot,
    Drive,
    Screen,
    Cut,
    Post,
    Handoff,
    Decision,
    Setup,
    Reset,
}

impl ActionType {
    pub fn moves_ball(&self) -> bool {
        matches!(self, Self::Pass | Self::Handoff)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ShotType {
    Layup,
    Dunk,
    Floater,
    Hook,
    CloseShot,
    PostFade,
    MidRange,
    Pullup,
    ThreePoint,
    CornerThree,
    #[serde(other)]
    Other,
}

impl ShotType {
    pub fn is_three(&self) -> bool {
        matches!(self, Self::ThreePoint | Self::CornerThree)
    }

    pub fn default_points(&self) -> u8 {
        if self.is_three() {
            3
        } else {
            2
        }
    }
}

/// Who performs an action, or who a movement applies to.
/// Authored as a role name, or `"dynamic"` / `"ball"` for whoever holds
/// the ball when the action runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Actor {
    NamedRole(RoleName),
    BallCarrier,
}

impl From<String> for Actor {
    fn from(value: String) -> Self {
        match value.as_str() {
            DYNAMIC_ACTOR | BALL_ACTOR => Self::BallCarrier,
            _ => Self::NamedRole(value),
        }
    }
}

impl From<&str> for Actor {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<Actor> for String {
    fn from(actor: Actor) -> Self {
        match actor {
            Actor::NamedRole(role) => role,
            Actor::BallCarrier => DYNAMIC_ACTOR.to_string(),
        }
    }
}

/// Where traversal goes after an outcome is drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Transition {
    NextAction(ActionId),
    Terminal(PlayOutcome),
    ReboundBattle,
    FreeThrows,
}

impl From<String> for Transition {
    fn from(value: String) -> Self {
        if let Some(tag) = value.strip_prefix("end_") {
            return Self::Terminal(PlayOutcome::from_terminal_tag(tag));
        }
        match value.as_str() {
            "rebound" | "rebound_battle" => Self::ReboundBattle,
            "free_throws" | "freethrows" => Self::FreeThrows,
            _ => Self::NextAction(value),
        }
    }
}

impl From<&str> for Transition {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<Transition> for String {
    fn from(transition: Transition) -> Self {
        match transition {
            Transition::NextAction(id) => id,
            Transition::Terminal(outcome) => format!("end_{outcome}"),
            Transition::ReboundBattle => "rebound".to_string(),
            Transition::FreeThrows => "free_throws".to_string(),
        }
    }
}

/// Key of an authored outcome. The named variants are the keys the
/// resolver treats specially, everything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OutcomeKey {
    Success,
    Made,
    Missed,
    Finish,
    Open,
    BeatDefender,
    Drive,
    ShooterOpen,
    CutterOpen,
    Stolen,
    Turnover,
    Blocked,
    Deflected,
    Covered,
    Fouled,
    Other(String),
}

impl OutcomeKey {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Success => "success",
            Self::Made => "made",
            Self::Missed => "missed",
            Self::Finish => "finish",
            Self::Open => "open",
            Self::BeatDefender => "beat_defender",
            Self::Drive => "drive",
            Self::ShooterOpen => "shooter_open",
            Self::CutterOpen => "cutter_open",
            Self::Stolen => "stolen",
            Self::Turnover => "turnover",
            Self::Blocked => "blocked",
            Self::Deflected => "deflected",
            Self::Covered => "covered",
            Self::Fouled => "fouled",
            Self::Other(key) => key.as_str(),
        }
    }

    /// Outcomes that get better as the offense gains an advantage.
    pub fn is_positive(&self) -> bool {
        matches!(
            self,
            Self::Success
                | Self::Made
                | Self::Finish
                | Self::Open
                | Self::BeatDefender
                | Self::Drive
                | Self::ShooterOpen
                | Self::CutterOpen
        )
    }

    /// Outcomes that get better as the defense gains an advantage.
    pub fn is_negative(&self) -> bool {
        matches!(
            self,
            Self::Stolen | Self::Turnover | Self::Blocked | Self::Deflected | Self::Covered
        )
    }

    // Scheme adjustment applied on top of the advantage shift.
    pub fn scheme_modifier(&self, modifiers: &DefensiveModifiers) -> f64 {
        match self {
            Self::Made => modifiers.shot_modifier,
            Self::Blocked => modifiers.block_modifier,
            Self::Stolen | Self::Deflected => modifiers.steal_modifier,
            Self::Turnover => modifiers.turnover_modifier,
            _ => 0.0,
        }
    }
}

impl From<String> for OutcomeKey {
    fn from(value: String) -> Self {
        match value.as_str() {
            "success" => Self::Success,
            "made" => Self::Made,
            "missed" => Self::Missed,
            "finish" => Self::Finish,
            "open" => Self::Open,
            "beat_defender" => Self::BeatDefender,
            "drive" => Self::Drive,
            "shooter_open" => Self::ShooterOpen,
            "cutter_open" => Self::CutterOpen,
            "stolen" => Self::Stolen,
            "turnover" => Self::Turnover,
            "blocked" => Self::Blocked,
            "deflected" => Self::Deflected,
            "covered" => Self::Covered,
            "fouled" => Self::Fouled,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for OutcomeKey {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<OutcomeKey> for String {
    fn from(key: OutcomeKey) -> Self {
        match key {
            OutcomeKey::Other(key) => key,
            known => known.as_str().to_string(),
        }
    }
}

impl Display for OutcomeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    pub key: OutcomeKey,
    pub probability: f64,
    #[serde(default)]
    pub modifier: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u8>,
    pub next: Transition,
}

impl Outcome {
    pub fn new(key: impl Into<OutcomeKey>, probability: f64, next: impl Into<Transition>) -> Self {
        Self {
            key: key.into(),
            probability,
            modifier: 0.0,
            points: None,
            next: next.into(),
        }
    }

    pub fn with_points(mut self, points: u8) -> Self {
        self.points = Some(points);
        self
    }

    pub fn with_modifier(mut self, modifier: f64) -> Self {
        self.modifier = modifier;
        self
    }
}

fn default_duration() -> f32 {
    DEFAULT_ACTION_DURATION
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionNode {
    pub id: ActionId,
    pub actor: Actor,
    #[serde(rename = "type")]
    pub action_type: ActionType,
    // Destinations, applied before the outcome is drawn.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub movement: BTreeMap<Actor, Vec2>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<RoleName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shot_type: Option<ShotType>,
    #[serde(default = "default_duration")]
    pub duration: f32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub offense_attributes: Vec<Attribute>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub defense_attributes: Vec<Attribute>,
    pub outcomes: Vec<Outcome>,
}

impl ActionNode {
    pub fn new(id: impl Into<ActionId>, actor: impl Into<Actor>, action_type: ActionType) -> Self {
        Self {
            id: id.into(),
            actor: actor.into(),
            action_type,
            movement: BTreeMap::new(),
            receiver: None,
            shot_type: None,
            duration: DEFAULT_ACTION_DURATION,
            offense_attributes: vec![],
            defense_attributes: vec![],
            outcomes: vec![],
        }
    }

    pub fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.outcomes.push(outcome);
        self
    }

    pub fn with_receiver(mut self, role: impl Into<RoleName>) -> Self {
        self.receiver = Some(role.into());
        self
    }

    pub fn with_shot_type(mut self, shot_type: ShotType) -> Self {
        self.shot_type = Some(shot_type);
        self
    }

    pub fn with_movement(mut self, target: impl Into<Actor>, destination: Vec2) -> Self {
        self.movement.insert(target.into(), destination);
        self
    }

    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_attributes(mut self, offense: &[Attribute], defense: &[Attribute]) -> Self {
        self.offense_attributes = offense.to_vec();
        self.defense_attributes = defense.to_vec();
        self
    }

    pub fn outcome(&self, key: &OutcomeKey) -> Option<&Outcome> {
        self.outcomes.iter().find(|o| o.key == *key)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleSlot {
    pub name: RoleName,
    pub positions: Vec<Position>,
}

impl RoleSlot {
    pub fn new(name: impl Into<RoleName>, positions: &[Position]) -> Self {
        Self {
            name: name.into(),
            positions: positions.to_vec(),
        }
    }
}

/// An authored play. Read-only for the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Play {
    pub id: PlayId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: PlayCategory,
    pub roles: Vec<RoleSlot>,
    #[serde(default)]
    pub formation: HashMap<RoleName, Vec2>,
    pub actions: Vec<ActionNode>,
    #[serde(default)]
    pub badge_effects: HashMap<ActionId, Vec<BadgeId>>,
}

impl Play {
    pub fn new(id: impl Into<PlayId>, category: PlayCategory) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            category,
            roles: vec![],
            formation: HashMap::new(),
            actions: vec![],
            badge_effects: HashMap::new(),
        }
    }

    pub fn with_role(mut self, role: RoleSlot, spot: Option<Vec2>) -> Self {
        if let Some(spot) = spot {
            self.formation.insert(role.name.clone(), spot);
        }
        self.roles.push(role);
        self
    }

    pub fn with_action(mut self, action: ActionNode) -> Self {
        self.actions.push(action);
        self
    }

    pub fn with_badge_effect(mut self, action_id: &str, badge_id: &str) -> Self {
        self.badge_effects
            .entry(action_id.to_string())
            .or_default()
            .push(badge_id.to_string());
        self
    }

    pub fn entry(&self) -> Option<&ActionNode> {
        self.actions.first()
    }

    pub fn action(&self, id: &str) -> Option<&ActionNode> {
        self.actions.iter().find(|a| a.id == id)
    }

    pub fn role(&self, name: &str) -> Option<&RoleSlot> {
        self.roles.iter().find(|r| r.name == name)
    }

    pub fn badges_for(&self, action_id: &str) -> &[BadgeId] {
        self.badge_effects
            .get(action_id)
            .map(|badges| badges.as_slice())
            .unwrap_or_default()
    }

    /// Content checks run by the loader. The engine itself degrades
    /// gracefully on everything but an empty action list or role list.
    pub fn validate(&self) -> AppResult<()> {
        if self.actions.is_empty() {
            return Err(anyhow!("Play {} has no actions", self.id));
        }
        if self.roles.is_empty() {
            return Err(anyhow!("Play {} has no roles", self.id));
        }

        let mut role_names = HashSet::new();
        for role in self.roles.iter() {
            if !role_names.insert(role.name.as_str()) {
                return Err(anyhow!("Play {} declares role {} twice", self.id, role.name));
            }
            if role.positions.is_empty() {
                return Err(anyhow!(
                    "Role {} of play {} has no eligible position",
                    role.name,
                    self.id
                ));
            }
        }

        let mut action_ids = HashSet::new();
        for action in self.actions.iter() {
            if !action_ids.insert(action.id.as_str()) {
                return Err(anyhow!("Play {} declares action {} twice", self.id, action.id));
            }
        }

        let check_actor = |actor: &Actor, action: &ActionNode| -> AppResult<()> {
            match actor {
                Actor::NamedRole(role) if !role_names.contains(role.as_str()) => Err(anyhow!(
                    "Action {} of play {} references unknown role {}",
                    action.id,
                    self.id,
                    role
                )),
                _ => Ok(()),
            }
        };

        for action in self.actions.iter() {
            check_actor(&action.actor, action)?;
            for target in action.movement.keys() {
                check_actor(target, action)?;
            }
            if let Some(receiver) = &action.receiver {
                check_actor(&Actor::NamedRole(receiver.clone()), action)?;
            }
            if !(action.duration.is_finite() && action.duration >= 0.0) {
                return Err(anyhow!(
                    "Action {} of play {} has invalid duration {}",
                    action.id,
                    self.id,
                    action.duration
                ));
            }
            if action.outcomes.is_empty() {
                return Err(anyhow!(
                    "Action {} of play {} has no outcomes",
                    action.id,
                    self.id
                ));
            }
            for outcome in action.outcomes.iter() {
                if !(outcome.probability.is_finite() && outcome.probability >= 0.0)
                    || !outcome.modifier.is_finite()
                {
                    return Err(anyhow!(
                        "Outcome {} of action {} in play {} has invalid probability",
                        outcome.key,
                        action.id,
                        self.id
                    ));
                }
                if let Transition::NextAction(next) = &outcome.next {
                    if !action_ids.contains(next.as_str()) {
                        return Err(anyhow!(
                            "Outcome {} of action {} in play {} leads to unknown action {}",
                            outcome.key,
                            action.id,
                            self.id,
                            next
                        ));
                    }
                }
            }
        }

        for action_id in self.badge_effects.keys() {
            if !action_ids.contains(action_id.as_str()) {
                log::warn!(
                    "Play {} lists badge effects for unknown action {}",
                    self.id,
                    action_id
                );
            }
        }

        Ok(())
    }
}
