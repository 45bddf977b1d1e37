use super::{
    action,
    config::EngineConfig,
    description::formation_description,
    formation::PositionTracker,
    free_throw,
    play::{ActionNode, OutcomeKey, Play, Transition},
    rebound,
    replay::ReplaySeed,
    roles::{assign_roles, RoleAssignment},
    scheme::{DefensiveModifiers, DefensiveScheme},
    types::{
        BadgeActivation, FreeThrowResult, Keyframe, PlayOutcome, PlayResult, ReboundResult,
        ShotAttempt,
    },
};
use crate::{
    core::player::LineupPlayer,
    types::{PlayerId, SlotMap},
};
use rand::Rng;

/// Read-only inputs of one play. Everything is borrowed for the whole call.
#[derive(Debug, Clone, Copy)]
pub struct PlayInput<'a> {
    pub play: &'a Play,
    pub offense: &'a [LineupPlayer],
    pub defense: &'a [LineupPlayer],
    pub scheme: DefensiveScheme,
    pub modifiers: DefensiveModifiers,
    pub slots: &'a SlotMap,
    pub config: EngineConfig,
}

impl<'a> PlayInput<'a> {
    pub fn new(
        play: &'a Play,
        offense: &'a [LineupPlayer],
        defense: &'a [LineupPlayer],
        slots: &'a SlotMap,
    ) -> Self {
        Self {
            play,
            offense,
            defense,
            scheme: DefensiveScheme::default(),
            modifiers: DefensiveModifiers::default(),
            slots,
            config: EngineConfig::default(),
        }
    }

    pub fn with_scheme(mut self, scheme: DefensiveScheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn with_modifiers(mut self, modifiers: DefensiveModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }
}

/// Everything that changes while a play runs. Built at the start of
/// `execute_play` and consumed into the result.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayState {
    pub ball_carrier: Option<PlayerId>,
    pub tracker: PositionTracker,
    pub elapsed: f32,
    pub keyframes: Vec<Keyframe>,
    pub outcome: PlayOutcome,
    pub points: u8,
    pub shot_attempt: Option<ShotAttempt>,
    pub free_throws: Option<FreeThrowResult>,
    pub rebound: Option<ReboundResult>,
    pub activated_badges: Vec<BadgeActivation>,
    pub nodes_visited: usize,
}

impl PlayState {
    pub fn new(input: &PlayInput, assignment: &RoleAssignment) -> Self {
        Self {
            ball_carrier: assignment.initial_ball_carrier(),
            tracker: PositionTracker::seed(
                input.play,
                assignment,
                input.offense,
                input.defense,
                input.scheme,
            ),
            elapsed: 0.0,
            keyframes: vec![],
            outcome: PlayOutcome::default(),
            points: 0,
            shot_attempt: None,
            free_throws: None,
            rebound: None,
            activated_badges: vec![],
            nodes_visited: 0,
        }
    }

    pub fn push_keyframe(
        &mut self,
        slots: &SlotMap,
        action: Option<&ActionNode>,
        outcome: Option<OutcomeKey>,
        description: String,
    ) {
        self.keyframes.push(Keyframe {
            time: self.elapsed,
            action_id: action.map(|node| node.id.clone()),
            action_type: action.map(|node| node.action_type),
            outcome,
            ball_carrier: self.ball_carrier,
            positions: self.tracker.snapshot(self.ball_carrier, slots),
            description,
        });
    }

    pub fn into_result(self, play: &Play, role_assignment: RoleAssignment) -> PlayResult {
        PlayResult {
            play_id: play.id.clone(),
            outcome: self.outcome,
            points: self.points,
            duration: self.elapsed,
            shot_attempt: self.shot_attempt,
            free_throws: self.free_throws,
            rebound: self.rebound,
            keyframes: self.keyframes,
            role_assignment,
            activated_badges: self.activated_badges,
            nodes_visited: self.nodes_visited,
        }
    }
}

/// Runs one play to completion.
///
/// Game-state problems (empty lineups, dangling links, cycles) degrade to a
/// well-formed result. A play without actions or roles is an authoring bug
/// and panics.
pub fn execute_play<R: Rng + ?Sized, D: Rng + ?Sized>(
    input: &PlayInput,
    action_rng: &mut R,
    description_rng: &mut D,
) -> PlayResult {
    let play = input.play;
    assert!(!play.actions.is_empty(), "Play {} has no actions", play.id);
    assert!(!play.roles.is_empty(), "Play {} has no roles", play.id);

    let config = input.config.sanitized();
    let assignment = assign_roles(&play.roles, input.offense, action_rng);
    let mut state = PlayState::new(input, &assignment);
    state.push_keyframe(
        input.slots,
        None,
        None,
        formation_description(play, input.scheme),
    );

    let mut current = play.entry();
    while let Some(node) = current {
        if state.nodes_visited >= config.max_iterations {
            log::warn!(
                "Play {} stopped after {} actions without an ending",
                play.id,
                state.nodes_visited
            );
            break;
        }
        state.nodes_visited += 1;

        let Some(outcome) = action::execute(
            node,
            input,
            &assignment,
            &config,
            &mut state,
            action_rng,
            description_rng,
        ) else {
            log::warn!("Action {} of play {} has no outcomes", node.id, play.id);
            break;
        };

        current = match &outcome.next {
            Transition::NextAction(next_id) => {
                let next = play.action(next_id);
                if next.is_none() {
                    log::warn!("Action {} leads to unknown action {}", node.id, next_id);
                }
                next
            }
            Transition::Terminal(kind) => {
                state.outcome = *kind;
                state.points = outcome
                    .points
                    .or_else(|| {
                        state
                            .shot_attempt
                            .as_ref()
                            .filter(|shot| shot.made && *kind == PlayOutcome::Made)
                            .map(|shot| shot.points)
                    })
                    .unwrap_or_default();
                None
            }
            Transition::ReboundBattle => {
                rebound::execute(input, &config, &mut state, action_rng, description_rng);
                None
            }
            Transition::FreeThrows => {
                free_throw::execute(
                    input,
                    outcome.points.unwrap_or_default(),
                    &mut state,
                    action_rng,
                );
                None
            }
        };
    }

    log::info!(
        "Play {} ended {} for {} points after {:.1}s",
        play.id,
        state.outcome,
        state.points,
        state.elapsed
    );
    state.into_result(play, assignment)
}

/// Runs a play with the generator pair derived from `seed`, so the same
/// game, possession and play always replay identically.
pub fn execute_play_seeded(input: &PlayInput, seed: &ReplaySeed) -> PlayResult {
    let (mut action_rng, mut description_rng) = seed.rngs();
    execute_play(input, &mut action_rng, &mut description_rng)
}
