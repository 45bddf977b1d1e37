use super::{
    config::EngineConfig,
    constants::{BASKET_POSITION, REBOUND_DURATION},
    description::rebound_description,
    engine::{PlayInput, PlayState},
    types::{PlayOutcome, ReboundResult},
};
use crate::core::{
    constants::{DEFAULT_DEFENSIVE_REBOUND, DEFAULT_OFFENSIVE_REBOUND},
    player::LineupPlayer,
    skill::{Attribute, GameSkill, Skill},
};
use rand::{seq::IndexedRandom, Rng};
use rand_distr::{weighted::WeightedIndex, Distribution};

fn rebound_rating(player: &LineupPlayer, attribute: Attribute, default: Skill) -> f64 {
    player.attribute_or(attribute, default).bound() as f64
}

/// Share of missed shots the offense gets back. The defensive total is
/// scaled up for box-out position, then the share is clamped.
pub fn offensive_rebound_probability(
    offense: &[LineupPlayer],
    defense: &[LineupPlayer],
    config: &EngineConfig,
) -> f64 {
    let attack = offense
        .iter()
        .map(|p| rebound_rating(p, Attribute::OffensiveRebound, DEFAULT_OFFENSIVE_REBOUND))
        .sum::<f64>();
    let defense = defense
        .iter()
        .map(|p| rebound_rating(p, Attribute::DefensiveRebound, DEFAULT_DEFENSIVE_REBOUND))
        .sum::<f64>()
        * config.defensive_rebound_multiplier;

    let total = attack + defense;
    if !(total.is_finite() && total > 0.0) {
        return config.min_offensive_rebound_probability;
    }
    (attack / total).clamp(
        config.min_offensive_rebound_probability,
        config.max_offensive_rebound_probability,
    )
}

fn pick_rebounder<'a, R: Rng + ?Sized>(
    side: &'a [LineupPlayer],
    attribute: Attribute,
    default: Skill,
    rng: &mut R,
) -> Option<&'a LineupPlayer> {
    let weights = side
        .iter()
        .map(|p| rebound_rating(p, attribute, default))
        .collect::<Vec<_>>();
    match WeightedIndex::new(&weights) {
        Ok(weighted) => side.get(weighted.sample(rng)),
        Err(_) => side.choose(rng),
    }
}

/// Settles a missed shot. The ball goes to the rebounder, who comes down
/// halfway between their spot and the rim.
pub(crate) fn execute<R: Rng + ?Sized, D: Rng + ?Sized>(
    input: &PlayInput,
    config: &EngineConfig,
    state: &mut PlayState,
    action_rng: &mut R,
    description_rng: &mut D,
) -> ReboundResult {
    let offensive_probability = offensive_rebound_probability(input.offense, input.defense, config);
    let offensive = action_rng.random_bool(offensive_probability);

    let rebounder = if offensive {
        pick_rebounder(
            input.offense,
            Attribute::OffensiveRebound,
            DEFAULT_OFFENSIVE_REBOUND,
            action_rng,
        )
    } else {
        pick_rebounder(
            input.defense,
            Attribute::DefensiveRebound,
            DEFAULT_DEFENSIVE_REBOUND,
            action_rng,
        )
    };

    let result = ReboundResult {
        offensive,
        rebounder: rebounder.map(|p| p.id),
        offensive_probability,
    };

    if let Some(rebounder) = rebounder {
        if let Some(spot) = state.tracker.position_of(&rebounder.id) {
            state
                .tracker
                .set_position(&rebounder.id, spot.lerp(BASKET_POSITION, 0.5));
        }
        state.ball_carrier = Some(rebounder.id);
    } else {
        log::warn!("Nobody on the floor to grab the rebound");
        state.ball_carrier = None;
    }

    state.outcome = if offensive {
        PlayOutcome::OffensiveRebound
    } else {
        PlayOutcome::DefensiveRebound
    };
    state.points = 0;
    state.rebound = Some(result);
    let description = rebound_description(&result, rebounder, description_rng);
    state.push_keyframe(input.slots, None, None, description);
    state.elapsed += REBOUND_DURATION;

    log::debug!(
        "Rebound: offensive share {:.3}, offense won: {}",
        offensive_probability,
        offensive
    );
    result
}

#[cfg(test)]
mod tests {
    use super::offensive_rebound_probability;
    use crate::{
        core::{player::LineupPlayer, position::Position, skill::Attribute},
        game_engine::config::EngineConfig,
    };
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn lineup(level: f32) -> Vec<LineupPlayer> {
        [Position::PG, Position::SG, Position::SF, Position::PF, Position::C]
            .into_iter()
            .map(|position| LineupPlayer::new("Reb Ounder", position).with_all_attributes(level))
            .collect()
    }

    #[test]
    fn test_probability_is_always_clamped() {
        let config = EngineConfig::default();
        for attack in [0.0, 1.0, 50.0, 100.0] {
            for defense in [0.0, 1.0, 50.0, 100.0] {
                let p = offensive_rebound_probability(&lineup(attack), &lineup(defense), &config);
                assert!((0.15..=0.40).contains(&p), "{attack} vs {defense}: {p}");
            }
        }
        assert_eq!(offensive_rebound_probability(&[], &[], &config), 0.15);
        assert_eq!(
            offensive_rebound_probability(&lineup(100.0), &[], &config),
            0.40
        );
    }

    #[test]
    fn test_random_lineups_stay_in_band() {
        let config = EngineConfig::default();
        let rng = &mut ChaCha8Rng::seed_from_u64(17);
        for _ in 0..200 {
            let offense = (0..5)
                .map(|_| {
                    LineupPlayer::new("Ann Offense", Position::PF)
                        .with_attribute(Attribute::OffensiveRebound, rand::Rng::random_range(rng, -50.0..150.0))
                })
                .collect::<Vec<_>>();
            let p = offensive_rebound_probability(&offense, &lineup(10.0), &config);
            assert!((0.15..=0.40).contains(&p));
        }
    }

    #[test]
    fn test_missing_ratings_use_defaults() {
        let config = EngineConfig::default();
        let offense = vec![LineupPlayer::new("Ann Offense", Position::C)];
        let defense = vec![LineupPlayer::new("Dee Defense", Position::C)];
        // 40 / (40 + 2.5 * 50)
        let expected: f64 = 40.0 / 165.0;
        assert!(
            (offensive_rebound_probability(&offense, &defense, &config) - expected).abs() < 1e-9
        );
    }
}
