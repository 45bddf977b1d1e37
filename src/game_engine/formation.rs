use super::{
    constants::BASKET_POSITION,
    play::{Actor, Play},
    roles::RoleAssignment,
    scheme::DefensiveScheme,
    types::PlayerSnapshot,
};
use crate::{
    core::{player::LineupPlayer, position::Position},
    types::{PlayerId, SlotMap},
};
use glam::Vec2;
use std::collections::BTreeMap;

/// Defender guarding `attacker`: same primary position first, then a
/// defender whose secondary position matches, then anyone.
pub fn matched_defender<'a>(
    attacker: &LineupPlayer,
    defense: &'a [LineupPlayer],
) -> Option<&'a LineupPlayer> {
    defense
        .iter()
        .find(|defender| defender.position == attacker.position)
        .or_else(|| {
            defense
                .iter()
                .find(|defender| defender.plays_any(&[attacker.position]))
        })
        .or_else(|| defense.first())
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Tracked {
    player_id: PlayerId,
    position: Vec2,
}

/// Court coordinates of every player on the floor for one play.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionTracker {
    offense: Vec<Tracked>,
    defense: Vec<Tracked>,
}

impl PositionTracker {
    /// Assigned roles start on their formation spot, everyone else on the
    /// default spot of their position.
    pub fn seed(
        play: &Play,
        assignment: &RoleAssignment,
        offense: &[LineupPlayer],
        defense: &[LineupPlayer],
        scheme: DefensiveScheme,
    ) -> Self {
        let mut tracker = Self::default();

        for (idx, binding) in assignment
            .iter()
            .enumerate()
            .filter(|(_, binding)| !binding.player_id.is_nil())
        {
            let spot = play.formation.get(&binding.role).copied().unwrap_or_else(|| {
                play.role(&binding.role)
                    .and_then(|role| role.positions.first().copied())
                    .or_else(|| Position::from_index(idx % 5))
                    .unwrap_or(Position::PG)
                    .default_spot()
            });
            tracker.offense.push(Tracked {
                player_id: binding.player_id,
                position: spot,
            });
        }

        for player in offense
            .iter()
            .filter(|player| !assignment.is_assigned(&player.id))
        {
            tracker.offense.push(Tracked {
                player_id: player.id,
                position: player.position.default_spot(),
            });
        }

        tracker.defense = defense
            .iter()
            .map(|player| Tracked {
                player_id: player.id,
                position: player.position.default_spot(),
            })
            .collect();
        tracker.realign_defense(offense, defense, scheme);

        tracker
    }

    pub fn position_of(&self, player_id: &PlayerId) -> Option<Vec2> {
        self.offense
            .iter()
            .chain(self.defense.iter())
            .find(|tracked| tracked.player_id == *player_id)
            .map(|tracked| tracked.position)
    }

    pub fn set_position(&mut self, player_id: &PlayerId, position: Vec2) -> bool {
        match self
            .offense
            .iter_mut()
            .chain(self.defense.iter_mut())
            .find(|tracked| tracked.player_id == *player_id)
        {
            Some(tracked) => {
                tracked.position = position;
                true
            }
            None => false,
        }
    }

    /// Moves every target to its destination. The ball carrier target is
    /// resolved against `ball_carrier` at call time.
    pub fn apply_movement(
        &mut self,
        movement: &BTreeMap<Actor, Vec2>,
        assignment: &RoleAssignment,
        ball_carrier: Option<PlayerId>,
    ) -> usize {
        let mut moved = 0;
        for (target, destination) in movement.iter() {
            let player_id = match target {
                Actor::NamedRole(role) => assignment.player_for(role),
                Actor::BallCarrier => ball_carrier,
            };
            match player_id {
                Some(player_id) if self.set_position(&player_id, *destination) => moved += 1,
                _ => log::debug!("Movement target {target:?} is not on the floor"),
            }
        }
        moved
    }

    /// Man schemes sit each defender between its attacker and the basket,
    /// zones hold their spots.
    pub fn realign_defense(
        &mut self,
        offense: &[LineupPlayer],
        defense: &[LineupPlayer],
        scheme: DefensiveScheme,
    ) {
        if let Some(spots) = scheme.zone_spots() {
            for (tracked, spot) in self.defense.iter_mut().zip(spots.iter()) {
                tracked.position = *spot;
            }
            return;
        }

        let gap = scheme.guard_distance().unwrap_or_default();
        for (idx, defender) in defense.iter().enumerate() {
            let guarded = offense
                .iter()
                .find(|attacker| {
                    matched_defender(attacker, defense).is_some_and(|d| d.id == defender.id)
                })
                .or_else(|| offense.get(idx));
            let Some(attacker_position) = guarded.and_then(|p| self.position_of(&p.id)) else {
                continue;
            };
            let towards_basket = (BASKET_POSITION - attacker_position).normalize_or_zero();
            self.set_position(&defender.id, attacker_position + towards_basket * gap);
        }
    }

    pub fn snapshot(&self, ball_carrier: Option<PlayerId>, slots: &SlotMap) -> Vec<PlayerSnapshot> {
        self.offense
            .iter()
            .chain(self.defense.iter())
            .map(|tracked| PlayerSnapshot {
                player_id: tracked.player_id,
                position: tracked.position,
                has_ball: ball_carrier == Some(tracked.player_id),
                slot: slots.get(&tracked.player_id).copied(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{matched_defender, PositionTracker};
    use crate::{
        core::{player::LineupPlayer, position::Position},
        game_engine::{
            constants::{BASKET_POSITION, MAN_DEFENSE_GAP},
            play::{Actor, Play, PlayCategory, RoleSlot},
            roles::RoleAssignment,
            scheme::DefensiveScheme,
        },
        types::slot_map,
    };
    use glam::Vec2;
    use std::collections::BTreeMap;

    fn setup() -> (Play, RoleAssignment, Vec<LineupPlayer>, Vec<LineupPlayer>) {
        let play = Play::new("two_man", PlayCategory::PickAndRoll)
            .with_role(
                RoleSlot::new("ballHandler", &[Position::PG]),
                Some(Vec2::new(25.0, 28.0)),
            )
            .with_role(RoleSlot::new("screener", &[Position::C]), None);
        let offense = vec![
            LineupPlayer::new("Pat Guard", Position::PG),
            LineupPlayer::new("Max Center", Position::C),
            LineupPlayer::new("Kai Forward", Position::SF),
        ];
        let defense = vec![
            LineupPlayer::new("Dee Center", Position::C),
            LineupPlayer::new("Dan Guard", Position::PG),
        ];
        let mut assignment = RoleAssignment::default();
        assignment.bind("ballHandler", offense[0].id);
        assignment.bind("screener", offense[1].id);
        (play, assignment, offense, defense)
    }

    #[test]
    fn test_seed_positions() {
        let (play, assignment, offense, defense) = setup();
        let tracker =
            PositionTracker::seed(&play, &assignment, &offense, &defense, DefensiveScheme::Man);

        assert_eq!(tracker.position_of(&offense[0].id), Some(Vec2::new(25.0, 28.0)));
        assert_eq!(
            tracker.position_of(&offense[1].id),
            Some(Position::C.default_spot())
        );
        assert_eq!(
            tracker.position_of(&offense[2].id),
            Some(Position::SF.default_spot())
        );

        // The point guard defender sits between the handler and the rim.
        let handler = Vec2::new(25.0, 28.0);
        let expected = handler + (BASKET_POSITION - handler).normalize() * MAN_DEFENSE_GAP;
        let defender = tracker
            .position_of(&defense[1].id)
            .expect("Defender should be tracked");
        assert!(defender.distance(expected) < 1e-4);
    }

    #[test]
    fn test_zone_defense_holds_spots() {
        let (play, assignment, offense, defense) = setup();
        let tracker =
            PositionTracker::seed(&play, &assignment, &offense, &defense, DefensiveScheme::Zone23);
        let spots = DefensiveScheme::Zone23
            .zone_spots()
            .expect("Zone should have spots");
        assert_eq!(tracker.position_of(&defense[0].id), Some(spots[0]));
        assert_eq!(tracker.position_of(&defense[1].id), Some(spots[1]));
    }

    #[test]
    fn test_dynamic_movement_follows_carrier() {
        let (play, assignment, offense, defense) = setup();
        let mut tracker =
            PositionTracker::seed(&play, &assignment, &offense, &defense, DefensiveScheme::Man);
        let mut movement = BTreeMap::new();
        movement.insert(Actor::BallCarrier, Vec2::new(30.0, 10.0));

        assert_eq!(
            tracker.apply_movement(&movement, &assignment, Some(offense[0].id)),
            1
        );
        assert_eq!(tracker.position_of(&offense[0].id), Some(Vec2::new(30.0, 10.0)));

        assert_eq!(
            tracker.apply_movement(&movement, &assignment, Some(offense[1].id)),
            1
        );
        assert_eq!(tracker.position_of(&offense[1].id), Some(Vec2::new(30.0, 10.0)));

        assert_eq!(tracker.apply_movement(&movement, &assignment, None), 0);
    }

    #[test]
    fn test_snapshot_uses_injected_slots() {
        let (play, assignment, offense, defense) = setup();
        let tracker =
            PositionTracker::seed(&play, &assignment, &offense, &defense, DefensiveScheme::Man);
        let slots = slot_map(&offense, &defense);
        let snapshot = tracker.snapshot(Some(offense[0].id), &slots);

        assert_eq!(snapshot.len(), offense.len() + defense.len());
        assert_eq!(snapshot.iter().filter(|s| s.has_ball).count(), 1);
        for s in snapshot.iter() {
            assert_eq!(s.slot, slots.get(&s.player_id).copied());
        }

        let no_slots = tracker.snapshot(None, &Default::default());
        assert!(no_slots.iter().all(|s| s.slot.is_none() && !s.has_ball));
    }

    #[test]
    fn test_placeholder_is_not_tracked() {
        let (play, _, _, defense) = setup();
        let assignment = RoleAssignment::placeholder();
        let tracker =
            PositionTracker::seed(&play, &assignment, &[], &defense, DefensiveScheme::Man);
        let snapshot = tracker.snapshot(None, &slot_map(&[], &defense));

        assert_eq!(snapshot.len(), defense.len());
        assert!(snapshot.iter().all(|s| !s.player_id.is_nil()));
    }

    #[test]
    fn test_matched_defender() {
        let (_, _, offense, defense) = setup();
        assert_eq!(
            matched_defender(&offense[0], &defense).map(|d| d.id),
            Some(defense[1].id)
        );
        // No small forward on defense: fall back to the first defender.
        assert_eq!(
            matched_defender(&offense[2], &defense).map(|d| d.id),
            Some(defense[0].id)
        );
        assert!(matched_defender(&offense[0], &[]).is_none());
    }
}
