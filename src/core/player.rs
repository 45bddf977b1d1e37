use super::{
    badge::{Badge, BadgeLevel},
    constants::{DEFAULT_ATTRIBUTE, DEFAULT_OVERALL},
    position::Position,
    skill::{Attribute, AttributeCategory, Attributes, GameSkill, Skill},
};
use crate::types::PlayerId;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

const NORMAL_STD: f32 = 7.5;
const POSITION_BIAS: f32 = 9.0;

fn default_overall() -> Skill {
    DEFAULT_OVERALL
}

/// Read-only view of a player for the duration of one play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineupPlayer {
    pub id: PlayerId,
    #[serde(default)]
    pub name: String,
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_position: Option<Position>,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub badges: Vec<Badge>,
    #[serde(default = "default_overall")]
    pub overall: Skill,
}

impl LineupPlayer {
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Self {
            id: PlayerId::new_v4(),
            name: name.into(),
            position,
            secondary_position: None,
            attributes: Attributes::default(),
            badges: vec![],
            overall: DEFAULT_OVERALL,
        }
    }

    /// Stand-in used when a lineup is empty or a role cannot be resolved.
    /// Every lookup on it falls back to the documented defaults.
    pub fn placeholder() -> Self {
        Self {
            id: PlayerId::nil(),
            name: String::new(),
            position: Position::PG,
            secondary_position: None,
            attributes: Attributes::default(),
            badges: vec![],
            overall: DEFAULT_OVERALL,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.id.is_nil()
    }

    pub fn with_secondary_position(mut self, position: Position) -> Self {
        self.secondary_position = Some(position);
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute, value: Skill) -> Self {
        self.attributes.set(attribute, value);
        self
    }

    pub fn with_all_attributes(mut self, value: Skill) -> Self {
        for attribute in Attribute::iter() {
            self.attributes.set(attribute, value);
        }
        self
    }

    pub fn with_overall(mut self, overall: Skill) -> Self {
        self.overall = overall.bound();
        self
    }

    pub fn with_badge(mut self, id: &str, level: BadgeLevel) -> Self {
        self.badges.retain(|b| b.id != id);
        self.badges.push(Badge::new(id, level));
        self
    }

    pub fn attribute(&self, attribute: Attribute) -> Option<Skill> {
        self.attributes.get(attribute)
    }

    pub fn attribute_or(&self, attribute: Attribute, default: Skill) -> Skill {
        self.attribute(attribute).unwrap_or(default)
    }

    pub fn attribute_or_default(&self, attribute: Attribute) -> Skill {
        self.attribute_or(attribute, DEFAULT_ATTRIBUTE)
    }

    pub fn plays_any(&self, positions: &[Position]) -> bool {
        positions.contains(&self.position)
            || self
                .secondary_position
                .is_some_and(|secondary| positions.contains(&secondary))
    }

    pub fn badge_level(&self, badge_id: &str) -> Option<BadgeLevel> {
        self.badges
            .iter()
            .find(|b| b.id == badge_id)
            .map(|b| b.level)
    }

    pub fn short_name(&self) -> String {
        let mut parts = self.name.split_whitespace();
        match (parts.next(), parts.last()) {
            (Some(first), Some(last)) => format!(
                "{}. {}",
                first.chars().next().unwrap_or_default(),
                last
            ),
            (Some(only), None) => only.to_string(),
            _ => format!("the {}", self.position.long_name().to_lowercase()),
        }
    }

    /// Random player built around `base_level`, skewed towards the
    /// attributes that matter at `position`.
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        name: impl Into<String>,
        position: Position,
        base_level: Skill,
    ) -> Self {
        let mut attributes = Attributes::default();
        for attribute in Attribute::iter() {
            let mean = base_level + POSITION_BIAS * position_bias(position, attribute);
            let value = Normal::new(mean, NORMAL_STD)
                .map(|normal| normal.sample(rng))
                .unwrap_or(mean);
            attributes.set(attribute, value.round());
        }

        let overall = [
            AttributeCategory::Offense,
            AttributeCategory::Defense,
            AttributeCategory::Physical,
            AttributeCategory::Mental,
        ]
        .iter()
        .filter_map(|category| attributes.category_rating(*category))
        .sum::<Skill>()
            / 4.0;

        Self {
            id: uuid::Builder::from_random_bytes(rng.random()).into_uuid(),
            name: name.into(),
            position,
            secondary_position: None,
            attributes,
            badges: vec![],
            overall: overall.round().bound(),
        }
    }
}

// In [-1, 1]: how much a position leans on an attribute.
fn position_bias(position: Position, attribute: Attribute) -> f32 {
    use Attribute::*;
    match (position, attribute) {
        (Position::PG, BallHandling | PassAccuracy | Vision | Speed | Acceleration) => 1.0,
        (Position::PG, ThreePoint | Steal | OffensiveIq) => 0.5,
        (Position::PG, PostControl | Block | OffensiveRebound | DefensiveRebound | Strength) => {
            -1.0
        }
        (Position::SG, ThreePoint | MidRange | ShotIq | FreeThrow) => 1.0,
        (Position::SG, BallHandling | Speed | PerimeterDefense) => 0.5,
        (Position::SG, PostControl | Block | Strength) => -1.0,
        (Position::SF, Layup | MidRange | PerimeterDefense | Vertical) => 1.0,
        (Position::SF, ThreePoint | Dunk | HelpDefense) => 0.5,
        (Position::PF, PostControl | Strength | DefensiveRebound | OffensiveRebound) => 1.0,
        (Position::PF, InteriorDefense | CloseShot | Dunk) => 0.5,
        (Position::PF, BallHandling | ThreePoint | Speed) => -0.5,
        (Position::C, Block | InteriorDefense | DefensiveRebound | OffensiveRebound) => 1.0,
        (Position::C, PostControl | Strength | Dunk | CloseShot) => 0.5,
        (Position::C, BallHandling | ThreePoint | FreeThrow | Speed | PassAccuracy) => -1.0,
        _ => 0.0,
    }
}
