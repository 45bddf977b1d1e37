use super::{
    config::EngineConfig,
    constants::{ADVANTAGE_DIVISOR, BADGE_ADVANTAGE_SCALE},
    play::{ActionNode, Outcome},
    scheme::DefensiveModifiers,
};
use crate::{
    core::{badge::Badge, constants::DEFAULT_ATTRIBUTE, player::LineupPlayer, skill::Attribute},
    types::BadgeId,
};
use rand::Rng;

/// Adjusted, normalized outcome probabilities for one action.
#[derive(Debug, Clone, PartialEq)]
pub struct Odds {
    pub offense_rating: f64,
    pub defense_rating: f64,
    pub advantage: f64,
    // Same order as the node outcomes.
    pub probabilities: Vec<f64>,
    pub triggered_badges: Vec<Badge>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub index: usize,
    pub roll: f64,
    pub odds: Odds,
}

/// Mean of the listed attributes, or the overall rating when the action
/// lists none. No player at all rates as an average defender.
pub fn rating(player: Option<&LineupPlayer>, attributes: &[Attribute]) -> f64 {
    let Some(player) = player else {
        return DEFAULT_ATTRIBUTE as f64;
    };
    if attributes.is_empty() {
        return player.overall as f64;
    }
    attributes
        .iter()
        .map(|attribute| player.attribute_or_default(*attribute) as f64)
        .sum::<f64>()
        / attributes.len() as f64
}

/// Summed level bonus of the actor badges listed for this action.
pub fn badge_boost(actor: &LineupPlayer, listed: &[BadgeId]) -> (f64, Vec<Badge>) {
    let triggered = actor
        .badges
        .iter()
        .filter(|badge| listed.contains(&badge.id))
        .cloned()
        .collect::<Vec<_>>();
    let boost = triggered.iter().map(|badge| badge.level.bonus()).sum();
    (boost, triggered)
}

pub fn adjusted_probability(
    outcome: &Outcome,
    advantage: f64,
    modifiers: &DefensiveModifiers,
    config: &EngineConfig,
) -> f64 {
    let shift = advantage / ADVANTAGE_DIVISOR;
    let mut probability = outcome.probability;

    if outcome.key.is_positive() {
        probability += shift + outcome.key.scheme_modifier(modifiers);
    } else if outcome.key.is_negative() {
        probability += outcome.key.scheme_modifier(modifiers) - shift;
    }
    probability += outcome.modifier;

    if probability.is_nan() {
        return config.min_outcome_probability;
    }
    probability.clamp(config.min_outcome_probability, config.max_outcome_probability)
}

/// Scales to a total of 1. Degenerate sets become uniform.
pub fn normalize(raw: &[f64]) -> Vec<f64> {
    let total = raw.iter().sum::<f64>();
    if !(total.is_finite() && total > 0.0) {
        log::warn!("Outcome probabilities sum to {total}, drawing uniformly");
        return vec![1.0 / raw.len() as f64; raw.len()];
    }
    raw.iter().map(|p| p / total).collect()
}

/// Cumulative draw against `roll` in [0, 1). Falls back to the last
/// outcome when rounding leaves the roll uncovered.
pub fn draw(probabilities: &[f64], roll: f64) -> usize {
    let mut cumulative = 0.0;
    for (idx, probability) in probabilities.iter().enumerate() {
        cumulative += probability;
        if roll < cumulative {
            return idx;
        }
    }
    probabilities.len().saturating_sub(1)
}

pub fn odds(
    node: &ActionNode,
    actor: &LineupPlayer,
    defender: Option<&LineupPlayer>,
    listed_badges: &[BadgeId],
    modifiers: &DefensiveModifiers,
    config: &EngineConfig,
) -> Odds {
    let offense_rating = rating(Some(actor), &node.offense_attributes);
    let defense_rating = rating(defender, &node.defense_attributes);
    let (boost, triggered_badges) = badge_boost(actor, listed_badges);
    let advantage = (offense_rating - defense_rating) / 2.0 + boost * BADGE_ADVANTAGE_SCALE;

    let raw = node
        .outcomes
        .iter()
        .map(|outcome| adjusted_probability(outcome, advantage, modifiers, config))
        .collect::<Vec<_>>();

    Odds {
        offense_rating,
        defense_rating,
        advantage,
        probabilities: normalize(&raw),
        triggered_badges,
    }
}

/// Draws one outcome of `node`. `None` only when the node has no outcomes.
pub fn resolve<R: Rng + ?Sized>(
    node: &ActionNode,
    actor: &LineupPlayer,
    defender: Option<&LineupPlayer>,
    listed_badges: &[BadgeId],
    modifiers: &DefensiveModifiers,
    config: &EngineConfig,
    rng: &mut R,
) -> Option<Resolution> {
    if node.outcomes.is_empty() {
        return None;
    }
    let odds = odds(node, actor, defender, listed_badges, modifiers, config);
    let roll = rng.random::<f64>();
    let index = draw(&odds.probabilities, roll);
    log::debug!(
        "{} by {}: advantage {:.2}, roll {:.3} -> {}",
        node.id,
        actor.name,
        odds.advantage,
        roll,
        node.outcomes[index].key
    );
    Some(Resolution { index, roll, odds })
}
