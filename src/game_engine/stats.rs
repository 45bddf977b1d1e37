use super::types::{PlayOutcome, PlayResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;

fn is_default<T: Default + PartialEq>(t: &T) -> bool {
    t == &T::default()
}

/// Totals over many executions of the same play.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayStats {
    pub plays: u32,
    pub points: u32,
    pub outcomes: BTreeMap<PlayOutcome, u32>,
    #[serde(skip_serializing_if = "is_default", default)]
    pub attempted_2pt: u32,
    #[serde(skip_serializing_if = "is_default", default)]
    pub made_2pt: u32,
    #[serde(skip_serializing_if = "is_default", default)]
    pub attempted_3pt: u32,
    #[serde(skip_serializing_if = "is_default", default)]
    pub made_3pt: u32,
    #[serde(skip_serializing_if = "is_default", default)]
    pub blocks: u32,
    #[serde(skip_serializing_if = "is_default", default)]
    pub shooting_fouls: u32,
    #[serde(skip_serializing_if = "is_default", default)]
    pub attempted_ft: u32,
    #[serde(skip_serializing_if = "is_default", default)]
    pub made_ft: u32,
    #[serde(skip_serializing_if = "is_default", default)]
    pub offensive_rebounds: u32,
    #[serde(skip_serializing_if = "is_default", default)]
    pub defensive_rebounds: u32,
    #[serde(skip_serializing_if = "is_default", default)]
    pub badge_activations: u32,
    pub nodes_visited: u64,
    pub seconds: f64,
}

impl PlayStats {
    pub fn record(&mut self, result: &PlayResult) {
        self.plays += 1;
        self.points += result.points as u32;
        *self.outcomes.entry(result.outcome).or_default() += 1;

        if let Some(shot) = result.shot_attempt.as_ref() {
            let (attempted, made) = if shot.shot_type.is_three() {
                (&mut self.attempted_3pt, &mut self.made_3pt)
            } else {
                (&mut self.attempted_2pt, &mut self.made_2pt)
            };
            *attempted += 1;
            if shot.made {
                *made += 1;
            }
            if shot.blocked {
                self.blocks += 1;
            }
            if shot.fouled {
                self.shooting_fouls += 1;
            }
        }

        if let Some(free_throws) = result.free_throws {
            self.attempted_ft += free_throws.attempted as u32;
            self.made_ft += free_throws.made as u32;
        }

        if let Some(rebound) = result.rebound {
            if rebound.offensive {
                self.offensive_rebounds += 1;
            } else {
                self.defensive_rebounds += 1;
            }
        }

        self.badge_activations += result.activated_badges.len() as u32;
        self.nodes_visited += result.nodes_visited as u64;
        self.seconds += result.duration as f64;
    }

    pub fn update(&mut self, other: &PlayStats) {
        self.plays += other.plays;
        self.points += other.points;
        for (outcome, count) in other.outcomes.iter() {
            *self.outcomes.entry(*outcome).or_default() += count;
        }
        self.attempted_2pt += other.attempted_2pt;
        self.made_2pt += other.made_2pt;
        self.attempted_3pt += other.attempted_3pt;
        self.made_3pt += other.made_3pt;
        self.blocks += other.blocks;
        self.shooting_fouls += other.shooting_fouls;
        self.attempted_ft += other.attempted_ft;
        self.made_ft += other.made_ft;
        self.offensive_rebounds += other.offensive_rebounds;
        self.defensive_rebounds += other.defensive_rebounds;
        self.badge_activations += other.badge_activations;
        self.nodes_visited += other.nodes_visited;
        self.seconds += other.seconds;
    }

    pub fn outcome_count(&self, outcome: PlayOutcome) -> u32 {
        self.outcomes.get(&outcome).copied().unwrap_or_default()
    }

    pub fn outcome_rate(&self, outcome: PlayOutcome) -> f64 {
        ratio(self.outcome_count(outcome), self.plays)
    }

    pub fn points_per_play(&self) -> f64 {
        ratio(self.points, self.plays)
    }

    pub fn offensive_rebound_rate(&self) -> f64 {
        ratio(
            self.offensive_rebounds,
            self.offensive_rebounds + self.defensive_rebounds,
        )
    }

    pub fn free_throw_rate(&self) -> f64 {
        ratio(self.made_ft, self.attempted_ft)
    }
}

fn ratio(num: u32, den: u32) -> f64 {
    if den == 0 {
        return 0.0;
    }
    num as f64 / den as f64
}

impl Display for PlayStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Plays: {}", self.plays)?;
        writeln!(f, "Points per play: {:.3}", self.points_per_play())?;
        for (outcome, count) in self.outcomes.iter() {
            writeln!(
                f,
                "  {:<18} {:>7} ({:>5.1}%)",
                outcome.to_string(),
                count,
                100.0 * self.outcome_rate(*outcome)
            )?;
        }
        writeln!(
            f,
            "2PT {}/{}  3PT {}/{}  Blocks {}  Shooting fouls {}",
            self.made_2pt,
            self.attempted_2pt,
            self.made_3pt,
            self.attempted_3pt,
            self.blocks,
            self.shooting_fouls
        )?;
        writeln!(
            f,
            "FT {}/{} ({:.1}%)",
            self.made_ft,
            self.attempted_ft,
            100.0 * self.free_throw_rate()
        )?;
        writeln!(
            f,
            "Rebounds {} off / {} def ({:.1}% offensive)",
            self.offensive_rebounds,
            self.defensive_rebounds,
            100.0 * self.offensive_rebound_rate()
        )?;
        write!(
            f,
            "Badge activations {}  Avg actions {:.2}  Avg duration {:.1}s",
            self.badge_activations,
            self.nodes_visited as f64 / self.plays.max(1) as f64,
            self.seconds / self.plays.max(1) as f64
        )
    }
}

#[cfg(test)]
mod tests {
    use super::PlayStats;
    use crate::game_engine::{
        play::ShotType,
        types::{FreeThrowResult, PlayOutcome, PlayResult, ShotAttempt},
    };
    use uuid::Uuid;

    fn made_three() -> PlayResult {
        PlayResult {
            outcome: PlayOutcome::Made,
            points: 3,
            duration: 4.0,
            shot_attempt: Some(ShotAttempt {
                shooter: Uuid::new_v4(),
                shot_type: ShotType::CornerThree,
                made: true,
                fouled: false,
                blocked: false,
                points: 3,
                contested_by: None,
            }),
            nodes_visited: 3,
            ..Default::default()
        }
    }

    fn trip_to_the_line() -> PlayResult {
        PlayResult {
            outcome: PlayOutcome::FreeThrows,
            points: 1,
            duration: 8.0,
            free_throws: Some(FreeThrowResult {
                shooter: Some(Uuid::new_v4()),
                attempted: 2,
                made: 1,
            }),
            nodes_visited: 2,
            ..Default::default()
        }
    }

    #[test]
    fn test_record_and_merge() {
        let mut first = PlayStats::default();
        first.record(&made_three());
        let mut second = PlayStats::default();
        second.record(&trip_to_the_line());
        second.record(&PlayResult::default());

        first.update(&second);
        assert_eq!(first.plays, 3);
        assert_eq!(first.points, 4);
        assert_eq!((first.made_3pt, first.attempted_3pt), (1, 1));
        assert_eq!((first.made_ft, first.attempted_ft), (1, 2));
        assert_eq!(first.outcome_count(PlayOutcome::Completed), 1);
        assert!((first.points_per_play() - 4.0 / 3.0).abs() < 1e-12);
        assert_eq!(first.offensive_rebound_rate(), 0.0);
        assert!(first.to_string().contains("Plays: 3"));
    }

    #[test]
    fn test_outcome_rate() {
        let mut stats = PlayStats::default();
        assert_eq!(stats.outcome_rate(PlayOutcome::Made), 0.0);

        for _ in 0..3 {
            stats.record(&made_three());
        }
        stats.record(&trip_to_the_line());
        assert_eq!(stats.outcome_rate(PlayOutcome::Made), 0.75);
        assert_eq!(stats.outcome_rate(PlayOutcome::FreeThrows), 0.25);
        assert_eq!(stats.outcome_rate(PlayOutcome::Turnover), 0.0);
        assert!(stats.to_string().contains("( 75.0%)"));
    }
}
