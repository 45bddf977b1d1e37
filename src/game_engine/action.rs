use super::{
    config::EngineConfig,
    constants::{BASKET_POSITION, CLOSE_SHOT_DISTANCE, THREE_POINT_DISTANCE},
    description::action_description,
    engine::{PlayInput, PlayState},
    formation::matched_defender,
    play::{ActionNode, ActionType, Actor, Outcome, OutcomeKey, ShotType, Transition},
    resolver,
    roles::RoleAssignment,
    types::{BadgeActivation, PlayOutcome, ShotAttempt},
};
use crate::{
    core::player::LineupPlayer,
    types::{LineupSlice, PlayerId},
};
use glam::Vec2;
use rand::Rng;

fn resolve_actor(
    actor: &Actor,
    assignment: &RoleAssignment,
    ball_carrier: Option<PlayerId>,
) -> Option<PlayerId> {
    match actor {
        Actor::NamedRole(role) => assignment.player_for(role),
        Actor::BallCarrier => ball_carrier,
    }
}

fn shot_type_from_spot(spot: Option<Vec2>) -> ShotType {
    match spot.map(|spot| spot.distance(BASKET_POSITION)) {
        Some(distance) if distance >= THREE_POINT_DISTANCE => ShotType::ThreePoint,
        Some(distance) if distance <= CLOSE_SHOT_DISTANCE => ShotType::Layup,
        _ => ShotType::MidRange,
    }
}

fn shot_attempt(
    node: &ActionNode,
    outcome: &Outcome,
    shooter: PlayerId,
    spot: Option<Vec2>,
    defender: Option<&LineupPlayer>,
) -> ShotAttempt {
    let shot_type = node
        .shot_type
        .unwrap_or_else(|| shot_type_from_spot(spot));
    let fouled = outcome.key == OutcomeKey::Fouled || outcome.next == Transition::FreeThrows;
    let made = outcome.key == OutcomeKey::Made
        || outcome.next == Transition::Terminal(PlayOutcome::Made)
        || (fouled && outcome.points.unwrap_or_default() > 0);
    let points = match outcome.points {
        Some(points) => points,
        None if made => shot_type.default_points(),
        None => 0,
    };

    ShotAttempt {
        shooter,
        shot_type,
        made,
        fouled,
        blocked: outcome.key == OutcomeKey::Blocked,
        points,
        contested_by: defender.map(|defender| defender.id),
    }
}

/// Runs one visited node against `state` and returns the drawn outcome.
/// `None` means the node has no outcome to follow.
pub(crate) fn execute<'p, R: Rng + ?Sized, D: Rng + ?Sized>(
    node: &'p ActionNode,
    input: &PlayInput,
    assignment: &RoleAssignment,
    config: &EngineConfig,
    state: &mut PlayState,
    action_rng: &mut R,
    description_rng: &mut D,
) -> Option<&'p Outcome> {
    let placeholder = LineupPlayer::placeholder();
    let actor_id = resolve_actor(&node.actor, assignment, state.ball_carrier);
    let actor = match actor_id.and_then(|id| input.offense.player(&id)) {
        Some(actor) => actor,
        None => {
            log::warn!(
                "No offensive player for {:?} in action {}, using a placeholder",
                node.actor,
                node.id
            );
            &placeholder
        }
    };
    let defender = matched_defender(actor, input.defense);

    state
        .tracker
        .apply_movement(&node.movement, assignment, state.ball_carrier);
    state
        .tracker
        .realign_defense(input.offense, input.defense, input.scheme);

    let resolution = resolver::resolve(
        node,
        actor,
        defender,
        input.play.badges_for(&node.id),
        &input.modifiers,
        config,
        action_rng,
    )?;
    let outcome = &node.outcomes[resolution.index];

    for badge in resolution.odds.triggered_badges.iter() {
        log::debug!("{} triggers {} on {}", actor.name, badge.id, node.id);
        state.activated_badges.push(BadgeActivation {
            player_id: actor.id,
            badge_id: badge.id.clone(),
            action_id: node.id.clone(),
            level: badge.level,
            time: state.elapsed,
        });
    }

    let receiver = node
        .receiver
        .as_ref()
        .and_then(|role| assignment.player_for(role));

    match node.action_type {
        action_type if action_type.moves_ball() => {
            if outcome.key.is_positive() {
                match receiver {
                    Some(receiver) => state.ball_carrier = Some(receiver),
                    None => log::debug!("Action {} has no receiver on the floor", node.id),
                }
            }
        }
        ActionType::Shot => {
            state.shot_attempt = Some(shot_attempt(
                node,
                outcome,
                actor.id,
                state.tracker.position_of(&actor.id),
                defender,
            ));
        }
        _ => {}
    }
    if outcome.key == OutcomeKey::Stolen {
        if let Some(defender) = defender {
            state.ball_carrier = Some(defender.id);
        }
    }

    let description = action_description(
        node,
        &outcome.key,
        actor,
        defender,
        receiver.and_then(|id| input.offense.player(&id)),
        input.scheme,
        description_rng,
    );
    state.push_keyframe(input.slots, Some(node), Some(outcome.key.clone()), description);
    state.elapsed += node.duration;

    Some(outcome)
}
