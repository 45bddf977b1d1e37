use crate::types::BadgeId;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

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
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BadgeLevel {
    Bronze,
    Silver,
    Gold,
    #[serde(rename = "hof", alias = "hall_of_fame")]
    #[strum(serialize = "hof")]
    HallOfFame,
}

impl BadgeLevel {
    /// Advantage bonus granted when the badge fires on an action.
    pub fn bonus(&self) -> f64 {
        match self {
            Self::Bronze => 0.01,
            Self::Silver => 0.03,
            Self::Gold => 0.05,
            Self::HallOfFame => 0.08,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Badge {
    pub id: BadgeId,
    pub level: BadgeLevel,
}

impl Badge {
    pub fn new(id: impl Into<BadgeId>, level: BadgeLevel) -> Self {
        Self {
            id: id.into(),
            level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Badge, BadgeLevel};
    use crate::types::AppResult;
    use itertools::Itertools;
    use strum::IntoEnumIterator;

    #[test]
    fn test_bonus_grows_with_level() {
        let bonuses = BadgeLevel::iter().map(|l| l.bonus()).collect_vec();
        for pair in bonuses.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_badge_serde() -> AppResult<()> {
        let badge: Badge = serde_json::from_str(r#"{"id": "deadeye", "level": "hof"}"#)?;
        assert_eq!(badge, Badge::new("deadeye", BadgeLevel::HallOfFame));
        let badge: Badge = serde_json::from_str(r#"{"id": "handles", "level": "silver"}"#)?;
        assert_eq!(badge.level, BadgeLevel::Silver);
        assert_eq!(BadgeLevel::HallOfFame.to_string(), "hof");
        Ok(())
    }
}
