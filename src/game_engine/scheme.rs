use super::constants::{MAN_DEFENSE_GAP, PRESSURE_DEFENSE_GAP};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use strum_macros::{EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DefensiveScheme {
    #[default]
    Man,
    Switch,
    #[serde(rename = "zone_2_3", alias = "zone23")]
    #[strum(serialize = "zone_2_3", serialize = "zone23")]
    Zone23,
    #[serde(rename = "zone_3_2", alias = "zone32")]
    #[strum(serialize = "zone_3_2", serialize = "zone32")]
    Zone32,
    #[serde(rename = "zone_1_3_1", alias = "zone131")]
    #[strum(serialize = "zone_1_3_1", serialize = "zone131")]
    Zone131,
    Press,
    Trap,
}

impl Display for DefensiveScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Man => write!(f, "Man-to-man"),
            Self::Switch => write!(f, "Switch everything"),
            Self::Zone23 => write!(f, "2-3 Zone"),
            Self::Zone32 => write!(f, "3-2 Zone"),
            Self::Zone131 => write!(f, "1-3-1 Zone"),
            Self::Press => write!(f, "Full-court press"),
            Self::Trap => write!(f, "Trap"),
        }
    }
}

impl DefensiveScheme {
    pub fn description(&self) -> &str {
        match self {
            Self::Man => "Every defender follows a single attacker.",
            Self::Switch => "Man defense switching on every screen.",
            Self::Zone23 => "Two guards up top, three defenders protecting the paint.",
            Self::Zone32 => "Three defenders on the perimeter, two bigs down low.",
            Self::Zone131 => "A long diamond built to jump passing lanes.",
            Self::Press => "Pressure the ball handler from the inbound.",
            Self::Trap => "Double the ball handler as soon as they pick up the dribble.",
        }
    }

    pub fn is_zone(&self) -> bool {
        matches!(self, Self::Zone23 | Self::Zone32 | Self::Zone131)
    }

    /// Distance kept from the matched attacker, towards the basket.
    /// `None` for zone schemes, where defenders hold `zone_spots` instead.
    pub fn guard_distance(&self) -> Option<f32> {
        match self {
            Self::Man | Self::Switch => Some(MAN_DEFENSE_GAP),
            Self::Press | Self::Trap => Some(PRESSURE_DEFENSE_GAP),
            Self::Zone23 | Self::Zone32 | Self::Zone131 => None,
        }
    }

    // Indexed by defender lineup order.
    pub fn zone_spots(&self) -> Option<[Vec2; 5]> {
        match self {
            Self::Zone23 => Some([
                Vec2::new(19.0, 21.0),
                Vec2::new(31.0, 21.0),
                Vec2::new(9.0, 9.0),
                Vec2::new(41.0, 9.0),
                Vec2::new(25.0, 8.0),
            ]),
            Self::Zone32 => Some([
                Vec2::new(25.0, 25.0),
                Vec2::new(10.0, 19.0),
                Vec2::new(40.0, 19.0),
                Vec2::new(17.0, 8.0),
                Vec2::new(33.0, 8.0),
            ]),
            Self::Zone131 => Some([
                Vec2::new(25.0, 28.0),
                Vec2::new(8.0, 17.0),
                Vec2::new(42.0, 17.0),
                Vec2::new(25.0, 16.0),
                Vec2::new(25.0, 6.0),
            ]),
            Self::Man | Self::Switch | Self::Press | Self::Trap => None,
        }
    }
}

/// Adjustments precomputed by the scheme-evaluation service. They are
/// added straight to the matching outcome probabilities.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DefensiveModifiers {
    pub shot_modifier: f64,
    pub turnover_modifier: f64,
    pub block_modifier: f64,
    pub steal_modifier: f64,
}

#[cfg(test)]
mod tests {
    use super::{DefensiveModifiers, DefensiveScheme};
    use crate::types::AppResult;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_scheme_places_defenders() {
        for scheme in DefensiveScheme::iter() {
            assert_ne!(scheme.guard_distance().is_some(), scheme.zone_spots().is_some());
            assert_eq!(scheme.is_zone(), scheme.zone_spots().is_some());
            assert!(!scheme.description().is_empty());
        }
    }

    #[test]
    fn test_scheme_tags() -> AppResult<()> {
        assert_eq!(DefensiveScheme::from_str("zone_2_3")?, DefensiveScheme::Zone23);
        assert_eq!(DefensiveScheme::from_str("press")?, DefensiveScheme::Press);
        let scheme: DefensiveScheme = serde_json::from_str(r#""zone_1_3_1""#)?;
        assert_eq!(scheme, DefensiveScheme::Zone131);
        let scheme: DefensiveScheme = serde_json::from_str(r#""zone32""#)?;
        assert_eq!(scheme, DefensiveScheme::Zone32);
        Ok(())
    }

    #[test]
    fn test_modifiers_serde() -> AppResult<()> {
        let modifiers: DefensiveModifiers =
            serde_json::from_str(r#"{"shotModifier": -0.02, "stealModifier": 0.03}"#)?;
        assert_eq!(modifiers.shot_modifier, -0.02);
        assert_eq!(modifiers.steal_modifier, 0.03);
        assert_eq!(modifiers.block_modifier, 0.0);
        Ok(())
    }
}
