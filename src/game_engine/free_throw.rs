use super::{
    constants::{FREE_THROW_ATTEMPTS, FREE_THROW_DURATION, FREE_THROW_LINE},
    description::free_throw_description,
    engine::{PlayInput, PlayState},
    types::{FreeThrowResult, PlayOutcome},
};
use crate::{
    core::{
        constants::DEFAULT_FREE_THROW,
        player::LineupPlayer,
        skill::{Attribute, GameSkill},
    },
    types::{LineupSlice, PlayerId},
};
use rand::Rng;

pub fn make_probability(shooter: &LineupPlayer) -> f64 {
    shooter
        .attribute_or(Attribute::FreeThrow, DEFAULT_FREE_THROW)
        .as_probability()
}

/// The ball carrier shoots if they are on offense, else the first
/// offensive player.
pub fn shooter<'a>(
    offense: &'a [LineupPlayer],
    ball_carrier: Option<PlayerId>,
) -> Option<&'a LineupPlayer> {
    ball_carrier
        .and_then(|id| offense.player(&id))
        .or_else(|| offense.first())
}

/// Independent makes for a fixed number of attempts.
pub fn shoot<R: Rng + ?Sized>(shooter: Option<&LineupPlayer>, rng: &mut R) -> FreeThrowResult {
    let Some(shooter) = shooter else {
        return FreeThrowResult::default();
    };
    let probability = make_probability(shooter);
    let made = (0..FREE_THROW_ATTEMPTS)
        .filter(|_| rng.random_bool(probability))
        .count() as u8;

    FreeThrowResult {
        shooter: Some(shooter.id),
        attempted: FREE_THROW_ATTEMPTS,
        made,
    }
}

/// Sends the shooter to the line. `and_one_points` come from the outcome
/// that drew the foul and are added to the makes.
pub(crate) fn execute<R: Rng + ?Sized>(
    input: &PlayInput,
    and_one_points: u8,
    state: &mut PlayState,
    action_rng: &mut R,
) -> FreeThrowResult {
    let shooter = shooter(input.offense, state.ball_carrier);
    if shooter.is_none() {
        log::warn!("No offensive player left to shoot free throws");
    }
    let result = shoot(shooter, action_rng);

    if let Some(shooter) = shooter {
        state.tracker.set_position(&shooter.id, FREE_THROW_LINE);
        state.ball_carrier = Some(shooter.id);
    }

    state.outcome = PlayOutcome::FreeThrows;
    state.points = result.made.saturating_add(and_one_points);
    state.free_throws = Some(result);
    state.push_keyframe(
        input.slots,
        None,
        None,
        free_throw_description(&result, shooter),
    );
    state.elapsed += FREE_THROW_DURATION;

    log::debug!(
        "Free throws: {}/{} plus {} from the field",
        result.made,
        result.attempted,
        and_one_points
    );
    result
}

#[cfg(test)]
mod tests {
    use super::{make_probability, shoot, shooter};
    use crate::core::{player::LineupPlayer, position::Position, skill::Attribute};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const RUNS: usize = 10_000;

    fn make_rate(rating: f32, seed: u64) -> f64 {
        let player =
            LineupPlayer::new("Fran Throw", Position::SG).with_attribute(Attribute::FreeThrow, rating);
        let rng = &mut ChaCha8Rng::seed_from_u64(seed);
        let (made, attempted) = (0..RUNS)
            .map(|_| shoot(Some(&player), rng))
            .fold((0usize, 0usize), |(made, attempted), result| {
                (made + result.made as usize, attempted + result.attempted as usize)
            });
        assert_eq!(attempted, 2 * RUNS);
        made as f64 / attempted as f64
    }

    #[test]
    fn test_perfect_shooter_never_misses() {
        assert_eq!(make_rate(100.0, 1), 1.0);
    }

    #[test]
    fn test_zero_rated_shooter_never_makes() {
        assert_eq!(make_rate(0.0, 2), 0.0);
    }

    #[test]
    fn test_average_shooter() {
        let rate = make_rate(70.0, 3);
        assert!((rate - 0.7).abs() < 0.02, "{rate}");
    }

    #[test]
    fn test_default_rating() {
        let player = LineupPlayer::new("Fran Throw", Position::SG);
        assert!((make_probability(&player) - 0.7).abs() < 1e-6);
        let wild = player.with_attribute(Attribute::FreeThrow, 250.0);
        assert_eq!(make_probability(&wild), 1.0);
    }

    #[test]
    fn test_shooter_selection() {
        let offense = vec![
            LineupPlayer::new("Ann Offense", Position::PG),
            LineupPlayer::new("Bea Offense", Position::C),
        ];
        let defender = LineupPlayer::new("Dee Defense", Position::C);

        assert_eq!(
            shooter(&offense, Some(offense[1].id)).map(|p| p.id),
            Some(offense[1].id)
        );
        assert_eq!(
            shooter(&offense, Some(defender.id)).map(|p| p.id),
            Some(offense[0].id)
        );
        assert!(shooter(&[], Some(defender.id)).is_none());

        let rng = &mut ChaCha8Rng::seed_from_u64(0);
        let empty = shoot(None, rng);
        assert_eq!((empty.attempted, empty.made), (0, 0));
    }
}
