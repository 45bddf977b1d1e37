use super::{
    play::{ActionNode, ActionType, OutcomeKey, Play},
    scheme::DefensiveScheme,
    types::{FreeThrowResult, ReboundResult},
};
use crate::core::player::LineupPlayer;
use rand::{seq::IndexedRandom, Rng};

fn pick<D: Rng + ?Sized>(phrases: Vec<String>, rng: &mut D) -> String {
    phrases.choose(rng).cloned().unwrap_or_default()
}

fn name_of(player: Option<&LineupPlayer>, fallback: &str) -> String {
    match player {
        Some(player) if !player.is_placeholder() => player.short_name(),
        _ => fallback.to_string(),
    }
}

/// Block calls, one pool per scheme.
pub fn block_phrases(scheme: DefensiveScheme, shooter: &str, defender: &str) -> Vec<String> {
    match scheme {
        DefensiveScheme::Man | DefensiveScheme::Switch => vec![
            format!("{defender} stays home and swats {shooter}'s shot."),
            format!("{shooter} rises, but {defender} meets the ball at its peak."),
            format!("{defender} mirrors {shooter} all the way and gets a hand on it."),
        ],
        DefensiveScheme::Zone23 | DefensiveScheme::Zone32 => vec![
            format!("{shooter} attacks the zone and runs into {defender} at the rim."),
            format!("The back line collapses, {defender} sends {shooter}'s attempt away."),
            format!("{defender} rotates over from the weak side to block {shooter}."),
        ],
        DefensiveScheme::Zone131 => vec![
            format!("{defender} anchors the middle of the 1-3-1 and rejects {shooter}."),
            format!("{shooter} tries to split the diamond, {defender} is waiting."),
        ],
        DefensiveScheme::Press | DefensiveScheme::Trap => vec![
            format!("{defender} chases {shooter} down from behind for the block."),
            format!("{shooter} beats the pressure, but {defender} recovers to swat it."),
        ],
    }
}

/// Turnover calls, one pool per scheme.
pub fn turnover_phrases(scheme: DefensiveScheme, handler: &str, defender: &str) -> Vec<String> {
    match scheme {
        DefensiveScheme::Man | DefensiveScheme::Switch => vec![
            format!("{defender} pokes the ball away from {handler}."),
            format!("{handler} gets stripped by {defender} on the dribble."),
            format!("{defender} reads it perfectly and picks off {handler}."),
        ],
        DefensiveScheme::Zone23 | DefensiveScheme::Zone32 => vec![
            format!("{handler} throws into the teeth of the zone, {defender} picks it off."),
            format!("The zone shifts and {defender} jumps {handler}'s skip pass."),
        ],
        DefensiveScheme::Zone131 => vec![
            format!("{defender} jumps the passing lane from the wing, {handler} coughs it up."),
            format!("{handler} is stuck in the corner trap of the 1-3-1, {defender} takes it."),
        ],
        DefensiveScheme::Press => vec![
            format!("The press gets home, {defender} rips it from {handler}."),
            format!("{handler} panics against the full court pressure and {defender} steals it."),
        ],
        DefensiveScheme::Trap => vec![
            format!("{handler} is doubled and {defender} comes away with the ball."),
            format!("The trap closes on {handler}, {defender} pokes it loose."),
        ],
    }
}

pub fn formation_description(play: &Play, scheme: DefensiveScheme) -> String {
    let name = if play.name.is_empty() {
        play.id.as_str()
    } else {
        play.name.as_str()
    };
    format!("The offense sets up {name} against a {scheme}.")
}

pub fn action_description<D: Rng + ?Sized>(
    node: &ActionNode,
    key: &OutcomeKey,
    actor: &LineupPlayer,
    defender: Option<&LineupPlayer>,
    receiver: Option<&LineupPlayer>,
    scheme: DefensiveScheme,
    rng: &mut D,
) -> String {
    let actor = name_of(Some(actor), "The ball handler");
    let defender = name_of(defender, "the defense");
    let receiver = name_of(receiver, "a teammate");

    match key {
        OutcomeKey::Blocked => return pick(block_phrases(scheme, &actor, &defender), rng),
        OutcomeKey::Stolen | OutcomeKey::Turnover | OutcomeKey::Deflected => {
            return pick(turnover_phrases(scheme, &actor, &defender), rng)
        }
        _ => {}
    }

    let phrases = match (node.action_type, key) {
        (ActionType::Shot, OutcomeKey::Made) => vec![
            format!("{actor} knocks it down."),
            format!("{actor} buries the shot over {defender}."),
            format!("Nothing but net for {actor}."),
        ],
        (ActionType::Shot, OutcomeKey::Missed) => vec![
            format!("{actor} misses."),
            format!("{actor}'s shot rims out."),
            format!("{actor} can't get it to fall."),
        ],
        (_, OutcomeKey::Fouled) => vec![
            format!("{defender} fouls {actor}."),
            format!("{actor} draws contact from {defender}."),
        ],
        (ActionType::Pass, _) | (ActionType::Handoff, _) => vec![
            format!("{actor} finds {receiver}."),
            format!("{actor} moves it to {receiver}."),
            format!("{receiver} gets the ball from {actor}."),
        ],
        (ActionType::Drive, _) => vec![
            format!("{actor} puts the ball on the floor and attacks {defender}."),
            format!("{actor} drives hard at the basket."),
        ],
        (ActionType::Screen, _) => vec![
            format!("{actor} sets a screen."),
            format!("{actor} comes up to set the pick."),
        ],
        (ActionType::Cut, _) => vec![
            format!("{actor} cuts to the basket."),
            format!("{actor} slips behind {defender}."),
        ],
        (ActionType::Post, _) => vec![
            format!("{actor} backs down {defender} in the post."),
            format!("{actor} establishes position on the block."),
        ],
        (ActionType::Decision, _) => vec![
            format!("{actor} reads the defense."),
            format!("{actor} surveys the floor."),
        ],
        (ActionType::Setup, _) => vec![format!("{actor} gets into position.")],
        (ActionType::Reset, _) => vec![
            format!("{actor} resets the offense."),
            format!("{actor} pulls it back out."),
        ],
        (ActionType::Shot, _) => vec![format!("{actor} lets it fly.")],
    };
    pick(phrases, rng)
}

pub fn rebound_description<D: Rng + ?Sized>(
    result: &ReboundResult,
    rebounder: Option<&LineupPlayer>,
    rng: &mut D,
) -> String {
    let name = name_of(rebounder, "Somebody");
    let phrases = if result.offensive {
        vec![
            format!("{name} crashes the glass for the offensive rebound."),
            format!("{name} keeps it alive with an offensive board."),
        ]
    } else {
        vec![
            format!("{name} secures the defensive rebound."),
            format!("{name} cleans up the miss."),
        ]
    };
    pick(phrases, rng)
}

pub fn free_throw_description(result: &FreeThrowResult, shooter: Option<&LineupPlayer>) -> String {
    let name = name_of(shooter, "Nobody");
    match (result.attempted, result.made) {
        (0, _) => "No one is left to shoot the free throws.".to_string(),
        (attempted, made) if attempted == made => {
            format!("{name} makes all {attempted} from the line.")
        }
        (_, 0) => format!("{name} misses both free throws."),
        (attempted, made) => format!("{name} goes {made} for {attempted} from the line."),
    }
}

#[cfg(test)]
mod tests {
    use super::{action_description, block_phrases, free_throw_description, turnover_phrases};
    use crate::{
        core::{player::LineupPlayer, position::Position},
        game_engine::{
            play::{ActionNode, ActionType, OutcomeKey},
            scheme::DefensiveScheme,
            types::FreeThrowResult,
        },
    };
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_scheme_has_phrases() {
        for scheme in DefensiveScheme::iter() {
            assert!(!block_phrases(scheme, "A", "B").is_empty());
            assert!(!turnover_phrases(scheme, "A", "B").is_empty());
        }
    }

    #[test]
    fn test_block_uses_scheme_pool() {
        let rng = &mut ChaCha8Rng::seed_from_u64(1);
        let shooter = LineupPlayer::new("Sam Wing", Position::SG);
        let defender = LineupPlayer::new("Dee Center", Position::C);
        let node = ActionNode::new("shot", "shooter", ActionType::Shot);
        let text = action_description(
            &node,
            &OutcomeKey::Blocked,
            &shooter,
            Some(&defender),
            None,
            DefensiveScheme::Zone131,
            rng,
        );
        assert!(block_phrases(DefensiveScheme::Zone131, "S. Wing", "D. Center").contains(&text));
    }

    #[test]
    fn test_free_throw_description() {
        let shooter = LineupPlayer::new("Sam Wing", Position::SG);
        let result = FreeThrowResult {
            shooter: Some(shooter.id),
            attempted: 2,
            made: 1,
        };
        assert_eq!(
            free_throw_description(&result, Some(&shooter)),
            "S. Wing goes 1 for 2 from the line."
        );
        assert_eq!(
            free_throw_description(&FreeThrowResult::default(), None),
            "No one is left to shoot the free throws."
        );
    }
}
