use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

pub const MIN_SKILL: f32 = 0.0;
pub const MAX_SKILL: f32 = 100.0;

pub type Skill = f32;

pub trait GameSkill {
    fn bound(&self) -> Skill;
    // Skill read as a success probability in [0, 1].
    fn as_probability(&self) -> f64 {
        (self.bound() / MAX_SKILL) as f64
    }
}

impl GameSkill for Skill {
    fn bound(&self) -> Skill {
        if self.is_nan() {
            return MIN_SKILL;
        }
        self.max(MIN_SKILL).min(MAX_SKILL)
    }
}

pub trait Rated {
    fn rating(&self) -> Option<Skill>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum AttributeCategory {
    Offense,
    Defense,
    Physical,
    Mental,
}

/// Every attribute a play may reference, authored in camelCase
/// (`"threePoint"`, `"ballHandling"`, ...).
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
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Attribute {
    CloseShot,
    MidRange,
    ThreePoint,
    FreeThrow,
    Layup,
    Dunk,
    PostControl,
    BallHandling,
    PassAccuracy,
    OffensiveRebound,
    PerimeterDefense,
    InteriorDefense,
    Steal,
    Block,
    DefensiveRebound,
    HelpDefense,
    Speed,
    Acceleration,
    Strength,
    Vertical,
    Stamina,
    Vision,
    OffensiveIq,
    DefensiveIq,
    ShotIq,
    Consistency,
}

impl Attribute {
    pub fn category(&self) -> AttributeCategory {
        match self {
            Self::CloseShot
            | Self::MidRange
            | Self::ThreePoint
            | Self::FreeThrow
            | Self::Layup
            | Self::Dunk
            | Self::PostControl
            | Self::BallHandling
            | Self::PassAccuracy
            | Self::OffensiveRebound => AttributeCategory::Offense,
            Self::PerimeterDefense
            | Self::InteriorDefense
            | Self::Steal
            | Self::Block
            | Self::DefensiveRebound
            | Self::HelpDefense => AttributeCategory::Defense,
            Self::Speed | Self::Acceleration | Self::Strength | Self::Vertical | Self::Stamina => {
                AttributeCategory::Physical
            }
            Self::Vision
            | Self::OffensiveIq
            | Self::DefensiveIq
            | Self::ShotIq
            | Self::Consistency => AttributeCategory::Mental,
        }
    }
}

fn mean_of(values: &[Option<Skill>]) -> Option<Skill> {
    let present: Vec<Skill> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        return None;
    }
    Some(present.iter().sum::<Skill>() / present.len() as Skill)
}

#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Offense {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_shot: Option<Skill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mid_range: Option<Skill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub three_point: Option<Skill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_throw: Option<Skill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layup: Option<Skill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dunk: Option<Skill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_control: Option<Skill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ball_handling: Option<Skill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pass_accuracy: Option<Skill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offensive_rebound: Option<Skill>,
}

impl Rated for Offense {
    fn rating(&self) -> Option<Skill> {
        mean_of(&[
            self.close_shot,
            self.mid_range,
            self.three_point,
            self.free_throw,
            self.layup,
            self.dunk,
            self.post_control,
            self.ball_handling,
            self.pass_accuracy,
            self.offensive_rebound,
        ])
    }
}

#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Defense {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perimeter_defense: Option<Skill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interior_defense: Option<Skill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steal: Option<Skill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block: Option<Skill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defensive_rebound: Option<Skill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_defense: Option<Skill>,
}

impl Rated for Defense {
    fn rating(&self) -> Option<Skill> {
        mean_of(&[
            self.perimeter_defense,
            self.interior_defense,
            self.steal,
            self.block,
            self.defensive_rebound,
            self.help_defense,
        ])
    }
}

#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Physical {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<Skill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acceleration: Option<Skill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<Skill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical: Option<Skill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stamina: Option<Skill>,
}

impl Rated for Physical {
    fn rating(&self) -> Option<Skill> {
        mean_of(&[
            self.speed,
            self.acceleration,
            self.strength,
            self.vertical,
            self.stamina,
        ])
    }
}

#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Mental {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vision: Option<Skill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offensive_iq: Option<Skill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defensive_iq: Option<Skill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shot_iq: Option<Skill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consistency: Option<Skill>,
}

impl Rated for Mental {
    fn rating(&self) -> Option<Skill> {
        mean_of(&[
            self.vision,
            self.offensive_iq,
            self.defensive_iq,
            self.shot_iq,
            self.consistency,
        ])
    }
}

/// The four attribute categories of a player record.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Attributes {
    pub offense: Offense,
    pub defense: Defense,
    pub physical: Physical,
    pub mental: Mental,
}

impl Attributes {
    fn slot(&self, attribute: Attribute) -> &Option<Skill> {
        match attribute {
            Attribute::CloseShot => &self.offense.close_shot,
            Attribute::MidRange => &self.offense.mid_range,
            Attribute::ThreePoint => &self.offense.three_point,
            Attribute::FreeThrow => &self.offense.free_throw,
            Attribute::Layup => &self.offense.layup,
            Attribute::Dunk => &self.offense.dunk,
            Attribute::PostControl => &self.offense.post_control,
            Attribute::BallHandling => &self.offense.ball_handling,
            Attribute::PassAccuracy => &self.offense.pass_accuracy,
            Attribute::OffensiveRebound => &self.offense.offensive_rebound,
            Attribute::PerimeterDefense => &self.defense.perimeter_defense,
            Attribute::InteriorDefense => &self.defense.interior_defense,
            Attribute::Steal => &self.defense.steal,
            Attribute::Block => &self.defense.block,
            Attribute::DefensiveRebound => &self.defense.defensive_rebound,
            Attribute::HelpDefense => &self.defense.help_defense,
            Attribute::Speed => &self.physical.speed,
            Attribute::Acceleration => &self.physical.acceleration,
            Attribute::Strength => &self.physical.strength,
            Attribute::Vertical => &self.physical.vertical,
            Attribute::Stamina => &self.physical.stamina,
            Attribute::Vision => &self.mental.vision,
            Attribute::OffensiveIq => &self.mental.offensive_iq,
            Attribute::DefensiveIq => &self.mental.defensive_iq,
            Attribute::ShotIq => &self.mental.shot_iq,
            Attribute::Consistency => &self.mental.consistency,
        }
    }

    fn slot_mut(&mut self, attribute: Attribute) -> &mut Option<Skill> {
        match attribute {
            Attribute::CloseShot => &mut self.offense.close_shot,
            Attribute::MidRange => &mut self.offense.mid_range,
            Attribute::ThreePoint => &mut self.offense.three_point,
            Attribute::FreeThrow => &mut self.offense.free_throw,
            Attribute::Layup => &mut self.offense.layup,
            Attribute::Dunk => &mut self.offense.dunk,
            Attribute::PostControl => &mut self.offense.post_control,
            Attribute::BallHandling => &mut self.offense.ball_handling,
            Attribute::PassAccuracy => &mut self.offense.pass_accuracy,
            Attribute::OffensiveRebound => &mut self.offense.offensive_rebound,
            Attribute::PerimeterDefense => &mut self.defense.perimeter_defense,
            Attribute::InteriorDefense => &mut self.defense.interior_defense,
            Attribute::Steal => &mut self.defense.steal,
            Attribute::Block => &mut self.defense.block,
            Attribute::DefensiveRebound => &mut self.defense.defensive_rebound,
            Attribute::HelpDefense => &mut self.defense.help_defense,
            Attribute::Speed => &mut self.physical.speed,
            Attribute::Acceleration => &mut self.physical.acceleration,
            Attribute::Strength => &mut self.physical.strength,
            Attribute::Vertical => &mut self.physical.vertical,
            Attribute::Stamina => &mut self.physical.stamina,
            Attribute::Vision => &mut self.mental.vision,
            Attribute::OffensiveIq => &mut self.mental.offensive_iq,
            Attribute::DefensiveIq => &mut self.mental.defensive_iq,
            Attribute::ShotIq => &mut self.mental.shot_iq,
            Attribute::Consistency => &mut self.mental.consistency,
        }
    }

    /// Looks the attribute up in whichever category holds it.
    pub fn get(&self, attribute: Attribute) -> Option<Skill> {
        *self.slot(attribute)
    }

    pub fn set(&mut self, attribute: Attribute, value: Skill) {
        *self.slot_mut(attribute) = Some(value.bound());
    }

    pub fn category_rating(&self, category: AttributeCategory) -> Option<Skill> {
        match category {
            AttributeCategory::Offense => self.offense.rating(),
            AttributeCategory::Defense => self.defense.rating(),
            AttributeCategory::Physical => self.physical.rating(),
            AttributeCategory::Mental => self.mental.rating(),
        }
    }
}
