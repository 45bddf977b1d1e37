use crate::core::player::LineupPlayer;
use std::collections::HashMap;

pub type PlayerId = uuid::Uuid;
pub type GameId = uuid::Uuid;

pub type PlayId = String;
pub type ActionId = String;
pub type RoleName = String;
pub type BadgeId = String;

pub type AppResult<T> = Result<T, anyhow::Error>;

// Renderer slot of every on-court player: 0-4 offense, 5-9 defense.
pub type SlotMap = HashMap<PlayerId, u8>;

pub trait LineupSlice {
    fn player(&self, id: &PlayerId) -> Option<&LineupPlayer>;
    fn has_player(&self, id: &PlayerId) -> bool {
        self.player(id).is_some()
    }
}

impl LineupSlice for [LineupPlayer] {
    fn player(&self, id: &PlayerId) -> Option<&LineupPlayer> {
        self.iter().find(|p| p.id == *id)
    }
}

impl LineupSlice for Vec<LineupPlayer> {
    fn player(&self, id: &PlayerId) -> Option<&LineupPlayer> {
        self.as_slice().player(id)
    }
}

/// Builds the conventional renderer slot map for two lineups.
/// The engine never calls this: slots are always injected by the caller.
pub fn slot_map(offense: &[LineupPlayer], defense: &[LineupPlayer]) -> SlotMap {
    let mut slots = SlotMap::new();
    for (idx, player) in offense.iter().take(5).enumerate() {
        slots.insert(player.id, idx as u8);
    }
    for (idx, player) in defense.iter().take(5).enumerate() {
        slots.insert(player.id, 5 + idx as u8);
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::{slot_map, LineupSlice};
    use crate::core::{player::LineupPlayer, position::Position};

    #[test]
    fn test_slot_map() {
        let offense = vec![
            LineupPlayer::new("Ann Offense", Position::PG),
            LineupPlayer::new("Bea Offense", Position::C),
        ];
        let defense = vec![LineupPlayer::new("Cat Defense", Position::SF)];
        let slots = slot_map(&offense, &defense);

        assert_eq!(slots.len(), 3);
        assert_eq!(slots[&offense[0].id], 0);
        assert_eq!(slots[&offense[1].id], 1);
        assert_eq!(slots[&defense[0].id], 5);
        assert!(offense.has_player(&offense[1].id));
        assert!(!offense.has_player(&defense[0].id));
    }
}
