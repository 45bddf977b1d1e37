use super::{
    constants::{BALL_HANDLER_ROLES, PLACEHOLDER_ROLE, ROLE_PICK_WEIGHTS},
    play::RoleSlot,
};
use crate::{
    core::{player::LineupPlayer, skill::Attribute},
    types::{PlayerId, RoleName},
};
use rand::{seq::IndexedRandom, Rng};
use rand_distr::{weighted::WeightedIndex, Distribution};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleBinding {
    pub role: RoleName,
    pub player_id: PlayerId,
}

/// Role name to player, in the order roles were filled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleAssignment(Vec<RoleBinding>);

impl RoleAssignment {
    pub fn placeholder() -> Self {
        Self(vec![RoleBinding {
            role: PLACEHOLDER_ROLE.to_string(),
            player_id: LineupPlayer::placeholder().id,
        }])
    }

    pub fn player_for(&self, role: &str) -> Option<PlayerId> {
        self.0
            .iter()
            .find(|binding| binding.role == role)
            .map(|binding| binding.player_id)
    }

    pub fn role_of(&self, player_id: &PlayerId) -> Option<&str> {
        self.0
            .iter()
            .find(|binding| binding.player_id == *player_id)
            .map(|binding| binding.role.as_str())
    }

    pub fn is_assigned(&self, player_id: &PlayerId) -> bool {
        self.role_of(player_id).is_some()
    }

    pub fn bind(&mut self, role: impl Into<RoleName>, player_id: PlayerId) {
        let role = role.into();
        assert!(
            !self.is_assigned(&player_id),
            "Player {player_id} cannot fill two roles"
        );
        self.0.retain(|binding| binding.role != role);
        self.0.push(RoleBinding { role, player_id });
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoleBinding> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First assigned handler role in priority order, else the first role.
    pub fn initial_ball_carrier(&self) -> Option<PlayerId> {
        BALL_HANDLER_ROLES
            .iter()
            .find_map(|role| self.player_for(role))
            .or_else(|| self.0.first().map(|binding| binding.player_id))
            .filter(|id| !id.is_nil())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleArchetype {
    BallHandling,
    Shooting,
    Screening,
    Cutting,
    Generic,
}

impl RoleArchetype {
    pub fn from_role_name(name: &str) -> Self {
        let name = name.to_lowercase();
        let has = |keys: &[&str]| keys.iter().any(|key| name.contains(key));

        if has(&["handler", "point", "creator"]) {
            Self::BallHandling
        } else if has(&["shoot", "corner", "wing", "spot", "pop"]) {
            Self::Shooting
        } else if has(&["screen", "roll", "post", "big", "center"]) {
            Self::Screening
        } else if has(&["cut", "trail", "slash"]) {
            Self::Cutting
        } else {
            Self::Generic
        }
    }

    fn weights(&self) -> &[(Attribute, f32)] {
        match self {
            Self::BallHandling => &[
                (Attribute::BallHandling, 0.4),
                (Attribute::Vision, 0.3),
                (Attribute::Speed, 0.3),
            ],
            Self::Shooting => &[(Attribute::ThreePoint, 0.8)],
            Self::Screening => &[(Attribute::PostControl, 0.5), (Attribute::Strength, 0.5)],
            Self::Cutting => &[(Attribute::Layup, 0.5), (Attribute::Speed, 0.5)],
            Self::Generic => &[],
        }
    }

    pub fn fitness(&self, player: &LineupPlayer) -> f32 {
        player.overall
            + self
                .weights()
                .iter()
                .map(|(attribute, weight)| weight * player.attribute_or_default(*attribute))
                .sum::<f32>()
    }
}

// 70% best, 25% second best, 5% anyone. Candidates are sorted by fitness.
fn pick_candidate<'a, R: Rng + ?Sized>(
    candidates: &[&'a LineupPlayer],
    rng: &mut R,
) -> Option<&'a LineupPlayer> {
    let band = WeightedIndex::new(ROLE_PICK_WEIGHTS)
        .map(|weights| weights.sample(rng))
        .unwrap_or_default();

    match band {
        0 => candidates.first().copied(),
        1 if candidates.len() > 1 => Some(candidates[1]),
        _ => candidates.choose(rng).copied(),
    }
}

/// Binds every role of the play to a lineup player, never the same player
/// twice. An empty lineup yields the inert placeholder assignment.
pub fn assign_roles<R: Rng + ?Sized>(
    roles: &[RoleSlot],
    lineup: &[LineupPlayer],
    rng: &mut R,
) -> RoleAssignment {
    if lineup.is_empty() {
        log::warn!("Cannot assign roles to an empty lineup, using a placeholder");
        return RoleAssignment::placeholder();
    }

    let mut assignment = RoleAssignment::default();
    for role in roles.iter() {
        let archetype = RoleArchetype::from_role_name(&role.name);
        let mut candidates = lineup
            .iter()
            .filter(|player| !assignment.is_assigned(&player.id))
            .filter(|player| player.plays_any(&role.positions))
            .map(|player| (archetype.fitness(player), player))
            .collect::<Vec<_>>();
        candidates.sort_by(|(a, _), (b, _)| b.total_cmp(a));
        let candidates = candidates
            .into_iter()
            .map(|(_, player)| player)
            .collect::<Vec<_>>();

        let picked = pick_candidate(&candidates, rng).or_else(|| {
            lineup
                .iter()
                .find(|player| !assignment.is_assigned(&player.id))
        });

        match picked {
            Some(player) => {
                log::debug!("Role {} assigned to {}", role.name, player.name);
                assignment.bind(role.name.clone(), player.id);
            }
            None => log::warn!("No player left for role {}", role.name),
        }
    }

    assignment
}
