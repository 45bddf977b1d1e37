use crate::{
    core::{constants::MAX_PLAYERS_PER_LINEUP, player::LineupPlayer},
    game_engine::{config::EngineConfig, play::Play, scheme::DefensiveModifiers},
    types::AppResult,
};
use anyhow::anyhow;
use include_dir::{include_dir, Dir};
use itertools::Itertools;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::{
    fs::File,
    path::{Path, PathBuf},
};

pub static ASSETS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/assets/");

/// Plays embedded under `assets/plays`, sorted by id. Files that fail to
/// parse or validate are logged and skipped.
pub static DEMO_LIBRARY: Lazy<Vec<Play>> = Lazy::new(|| {
    let Some(dir) = ASSETS_DIR.get_dir("plays") else {
        log::error!("No embedded play library");
        return vec![];
    };
    dir.files()
        .filter_map(|file| {
            let data = file.contents_utf8()?;
            match parse_plays(data) {
                Ok(plays) => Some(plays),
                Err(err) => {
                    log::error!("Invalid embedded play {}: {err}", file.path().display());
                    None
                }
            }
        })
        .flatten()
        .sorted_by(|a, b| a.id.cmp(&b.id))
        .collect()
});

pub fn store_path(filename: &str) -> AppResult<PathBuf> {
    let dirs = directories::ProjectDirs::from("org", "courtside", "courtside")
        .ok_or(anyhow!("Failed to get directories"))?;
    let data_dir = dirs.data_dir();
    if !data_dir.exists() {
        std::fs::create_dir_all(data_dir)?;
    }
    Ok(data_dir.join(filename))
}

pub fn load_from_json<T: for<'a> Deserialize<'a>>(path: &Path) -> AppResult<T> {
    let file = File::open(path)
        .map_err(|err| anyhow!("Cannot open {}: {err}", path.display()))?;
    let data: T = serde_json::from_reader(std::io::BufReader::new(file))?;
    Ok(data)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PlayFile {
    Library(Vec<Play>),
    Single(Box<Play>),
}

/// Parses a single play or a library array and validates every play.
pub fn parse_plays(data: &str) -> AppResult<Vec<Play>> {
    let plays = match serde_json::from_str::<PlayFile>(data)? {
        PlayFile::Library(plays) => plays,
        PlayFile::Single(play) => vec![*play],
    };
    if plays.is_empty() {
        return Err(anyhow!("Play library is empty"));
    }
    for play in plays.iter() {
        play.validate()?;
    }
    if let Some(id) = plays.iter().map(|play| &play.id).duplicates().next() {
        return Err(anyhow!("Play {id} is defined twice"));
    }
    Ok(plays)
}

pub fn load_plays(path: &Path) -> AppResult<Vec<Play>> {
    let data = std::fs::read_to_string(path)
        .map_err(|err| anyhow!("Cannot read {}: {err}", path.display()))?;
    let plays = parse_plays(&data)?;
    log::info!("Loaded {} plays from {}", plays.len(), path.display());
    Ok(plays)
}

pub fn demo_library() -> &'static [Play] {
    DEMO_LIBRARY.as_slice()
}

pub fn find_play<'a>(library: &'a [Play], id: &str) -> AppResult<&'a Play> {
    library.iter().find(|play| play.id == id).ok_or_else(|| {
        anyhow!(
            "No play {id} in library, available: {}",
            library.iter().map(|play| play.id.as_str()).join(", ")
        )
    })
}

pub fn parse_lineup(data: &str) -> AppResult<Vec<LineupPlayer>> {
    let lineup: Vec<LineupPlayer> = serde_json::from_str(data)?;
    check_lineup(&lineup)?;
    Ok(lineup)
}

fn check_lineup(lineup: &[LineupPlayer]) -> AppResult<()> {
    if lineup.len() > MAX_PLAYERS_PER_LINEUP {
        return Err(anyhow!(
            "Lineup has {} players, at most {MAX_PLAYERS_PER_LINEUP} can be on the floor",
            lineup.len()
        ));
    }
    if let Some(id) = lineup.iter().map(|player| player.id).duplicates().next() {
        return Err(anyhow!("Player {id} appears twice in lineup"));
    }
    if lineup.len() < MAX_PLAYERS_PER_LINEUP {
        log::warn!("Lineup has only {} players", lineup.len());
    }
    Ok(())
}

pub fn load_lineup(path: &Path) -> AppResult<Vec<LineupPlayer>> {
    let lineup: Vec<LineupPlayer> = load_from_json(path)?;
    check_lineup(&lineup)?;
    Ok(lineup)
}

pub fn demo_lineups() -> AppResult<(Vec<LineupPlayer>, Vec<LineupPlayer>)> {
    let read = |name: &str| -> AppResult<Vec<LineupPlayer>> {
        let file = ASSETS_DIR
            .get_file(format!("data/{name}"))
            .ok_or(anyhow!("Missing embedded lineup {name}"))?;
        let data = file
            .contents_utf8()
            .ok_or(anyhow!("Embedded lineup {name} is not utf8"))?;
        parse_lineup(data)
    };
    Ok((read("demo_offense.json")?, read("demo_defense.json")?))
}

pub fn load_engine_config(path: &Path) -> AppResult<EngineConfig> {
    let config: EngineConfig = load_from_json(path)?;
    Ok(config.sanitized())
}

pub fn load_modifiers(path: &Path) -> AppResult<DefensiveModifiers> {
    load_from_json(path)
}

#[cfg(test)]
mod tests {
    use super::{demo_library, demo_lineups, find_play, parse_lineup, parse_plays};
    use crate::{game_engine::play::PlayCategory, types::AppResult};
    use itertools::Itertools;

    #[test]
    fn test_demo_library() -> AppResult<()> {
        let library = demo_library();
        assert_eq!(library.len(), 3);
        assert_eq!(
            find_play(library, "pick_and_roll")?.category,
            PlayCategory::PickAndRoll
        );
        assert!(find_play(library, "horns_flare").is_ok());
        assert!(find_play(library, "post_entry").is_ok());
        assert!(find_play(library, "princeton").is_err());
        Ok(())
    }

    #[test]
    fn test_demo_lineups() -> AppResult<()> {
        let (offense, defense) = demo_lineups()?;
        assert_eq!(offense.len(), 5);
        assert_eq!(defense.len(), 5);
        assert!(offense.iter().any(|p| !p.badges.is_empty()));
        Ok(())
    }

    #[test]
    fn test_single_play_and_library() -> AppResult<()> {
        let single = r#"{
            "id": "iso",
            "roles": [{"name": "scorer", "positions": ["SF"]}],
            "actions": [{
                "id": "shot", "actor": "scorer", "type": "shot",
                "outcomes": [{"key": "made", "probability": 1.0, "next": "end_made"}]
            }]
        }"#;
        assert_eq!(parse_plays(single)?.len(), 1);
        assert_eq!(parse_plays(&format!("[{single}]"))?.len(), 1);
        assert!(parse_plays(&format!("[{single}, {single}]")).is_err());
        assert!(parse_plays("[]").is_err());
        Ok(())
    }

    #[test]
    fn test_rejects_malformed_play() {
        let no_actions = r#"{
            "id": "empty",
            "roles": [{"name": "scorer", "positions": ["SF"]}],
            "actions": []
        }"#;
        assert!(parse_plays(no_actions).is_err());

        let missing_roles = r#"{"id": "no_roles", "actions": []}"#;
        assert!(parse_plays(missing_roles).is_err());
    }

    #[test]
    fn test_lineup_limits() {
        let player = |id: &str| {
            format!(r#"{{"id": "{id}", "name": "Ann Offense", "position": "PG"}}"#)
        };
        let ids = [
            "00000000-0000-4000-8000-000000000001",
            "00000000-0000-4000-8000-000000000002",
            "00000000-0000-4000-8000-000000000003",
            "00000000-0000-4000-8000-000000000004",
            "00000000-0000-4000-8000-000000000005",
            "00000000-0000-4000-8000-000000000006",
        ];
        let six = format!("[{}]", ids.iter().map(|id| player(*id)).join(","));
        assert!(parse_lineup(&six).is_err());

        let twice = format!("[{}, {}]", player(ids[0]), player(ids[0]));
        assert!(parse_lineup(&twice).is_err());

        let one = format!("[{}]", player(ids[0]));
        assert!(parse_lineup(&one).is_ok_and(|lineup| lineup[0].overall == 70.0));
    }
}
