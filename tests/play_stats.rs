#[cfg(test)]
mod tests {
    use courtside::core::{LineupPlayer, Position};
    use courtside::game_engine::{
        execute_play_seeded, DefensiveScheme, EngineConfig, PlayInput, PlayOutcome, PlayStats,
        ReplaySeed,
    };
    use courtside::store::{demo_library, demo_lineups, find_play};
    use courtside::types::{slot_map, AppResult, GameId, LineupSlice};
    use rayon::prelude::*;
    use strum::IntoEnumIterator;

    const N: u32 = 2_000;

    fn run_many(input: &PlayInput, game_id: GameId) -> PlayStats {
        (0..N)
            .into_par_iter()
            .map(|possession| {
                let seed = ReplaySeed::new(game_id, possession, &input.play.id);
                let result = execute_play_seeded(input, &seed);
                let mut stats = PlayStats::default();
                stats.record(&result);
                stats
            })
            .reduce(PlayStats::default, |mut a, b| {
                a.update(&b);
                a
            })
    }

    #[test]
    fn test_every_demo_play_against_every_scheme() -> AppResult<()> {
        let (offense, defense) = demo_lineups()?;
        let slots = slot_map(&offense, &defense);
        let game_id = GameId::new_v4();

        for play in demo_library() {
            for scheme in DefensiveScheme::iter() {
                let input = PlayInput::new(play, &offense, &defense, &slots).with_scheme(scheme);
                let stats = run_many(&input, game_id);

                assert_eq!(stats.plays, N);
                assert_eq!(stats.outcomes.values().sum::<u32>(), N);
                assert!(
                    stats.nodes_visited
                        <= N as u64 * EngineConfig::default().max_iterations as u64
                );
                assert_eq!(
                    stats.attempted_ft,
                    2 * stats.outcome_count(PlayOutcome::FreeThrows)
                );

                let rebounds = stats.offensive_rebounds + stats.defensive_rebounds;
                if rebounds > 0 {
                    assert_eq!(
                        rebounds,
                        stats.outcome_count(PlayOutcome::OffensiveRebound)
                            + stats.outcome_count(PlayOutcome::DefensiveRebound)
                    );
                }
                println!("{} vs {scheme}\n{stats}\n", play.id);
            }
        }
        Ok(())
    }

    #[test]
    fn test_rebound_share_stays_in_bounds() -> AppResult<()> {
        let (offense, defense) = demo_lineups()?;
        let slots = slot_map(&offense, &defense);
        let play = find_play(demo_library(), "pick_and_roll")?;
        let input = PlayInput::new(play, &offense, &defense, &slots);
        let stats = run_many(&input, GameId::new_v4());

        let rebounds = stats.offensive_rebounds + stats.defensive_rebounds;
        assert!(rebounds > 0);
        let rate = stats.offensive_rebound_rate();
        assert!((0.10..=0.45).contains(&rate), "offensive rebound rate {rate}");
        Ok(())
    }

    #[test]
    fn test_replay_is_deterministic() -> AppResult<()> {
        let (offense, defense) = demo_lineups()?;
        let slots = slot_map(&offense, &defense);
        let game_id = GameId::new_v4();

        for play in demo_library() {
            let input = PlayInput::new(play, &offense, &defense, &slots)
                .with_scheme(DefensiveScheme::Zone23);
            for possession in 0..50 {
                let seed = ReplaySeed::new(game_id, possession, &play.id);
                let first = execute_play_seeded(&input, &seed);
                let second = execute_play_seeded(&input, &seed);
                assert_eq!(first, second);
            }
        }
        Ok(())
    }

    #[test]
    fn test_keyframes_are_well_formed() -> AppResult<()> {
        let (offense, defense) = demo_lineups()?;
        let slots = slot_map(&offense, &defense);
        let game_id = GameId::new_v4();

        for play in demo_library() {
            let input = PlayInput::new(play, &offense, &defense, &slots);
            for possession in 0..200 {
                let result = execute_play_seeded(&input, &ReplaySeed::new(game_id, possession, &play.id));
                assert!(!result.keyframes.is_empty());
                assert_eq!(result.keyframes[0].time, 0.0);
                assert!(result
                    .keyframes
                    .windows(2)
                    .all(|pair| pair[0].time <= pair[1].time));
                // Keyframes are stamped when their step starts.
                assert!(result.keyframes.iter().all(|k| k.time < result.duration));
                assert_eq!(result.keyframes.len(), result.nodes_visited + 1 + extra_keyframes(&result));
                for keyframe in result.keyframes.iter() {
                    assert_eq!(keyframe.positions.len(), offense.len() + defense.len());
                    assert!(keyframe.positions.iter().filter(|p| p.has_ball).count() <= 1);
                    if let Some(carrier) = keyframe.ball_carrier {
                        assert!(offense.has_player(&carrier) || defense.has_player(&carrier));
                    }
                }
                for binding in result.role_assignment.iter() {
                    assert!(offense.has_player(&binding.player_id));
                }
            }
        }
        Ok(())
    }

    fn extra_keyframes(result: &courtside::game_engine::PlayResult) -> usize {
        result.rebound.is_some() as usize + result.free_throws.is_some() as usize
    }

    #[test]
    fn test_short_lineup_still_runs() -> AppResult<()> {
        let offense = vec![
            LineupPlayer::new("Ann Offense", Position::PG),
            LineupPlayer::new("Bea Offense", Position::C),
        ];
        let defense: Vec<LineupPlayer> = vec![];
        let slots = slot_map(&offense, &defense);
        let game_id = GameId::new_v4();

        for play in demo_library() {
            let input = PlayInput::new(play, &offense, &defense, &slots);
            for possession in 0..100 {
                let result = execute_play_seeded(&input, &ReplaySeed::new(game_id, possession, &play.id));
                assert!(result.nodes_visited >= 1);
                assert!(result.points <= 4);
            }
        }
        Ok(())
    }
}
