use crate::game_engine::scheme::DefensiveScheme;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(name="Courtside", about = "Run basketball plays against a defense", author, version, long_about = None)]
pub struct AppArgs {
    #[clap(long, short = 'p', action=ArgAction::Set, help = "Id of the play to run")]
    pub play: Option<String>,
    #[clap(long, short = 'l', action=ArgAction::Set, help = "Load play library from json file")]
    pub library: Option<PathBuf>,
    #[clap(long, short = 'o', action=ArgAction::Set, help = "Load offense lineup from json file")]
    pub offense: Option<PathBuf>,
    #[clap(long, short = 'd', action=ArgAction::Set, help = "Load defense lineup from json file")]
    pub defense: Option<PathBuf>,
    #[clap(long, short = 's', action=ArgAction::Set, help = "Defensive scheme (man, switch, zone_2_3, zone_3_2, zone_1_3_1, press, trap)")]
    pub scheme: Option<DefensiveScheme>,
    #[clap(long, short = 'm', action=ArgAction::Set, help = "Load defensive modifiers from json file")]
    pub modifiers: Option<PathBuf>,
    #[clap(long, short = 'c', action=ArgAction::Set, help = "Load engine config from json file")]
    pub config: Option<PathBuf>,
    #[clap(long, action=ArgAction::Set, help = "Set random seed for replayable runs")]
    pub seed: Option<u64>,
    #[clap(long, short = 'n', action=ArgAction::Set, default_value_t = 1, help = "Number of times the play is run")]
    pub runs: u32,
    #[clap(long, action=ArgAction::SetTrue, help = "Print the last play result as json")]
    pub json: bool,
    #[clap(long, action=ArgAction::SetTrue, help = "List the plays in the library and exit")]
    pub list: bool,
    #[clap(long, short = 'v', action=ArgAction::SetTrue, help = "Log every action node")]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::AppArgs;
    use crate::game_engine::scheme::DefensiveScheme;
    use clap::Parser;

    #[test]
    fn test_parse_args() {
        let args = AppArgs::parse_from([
            "courtside",
            "--play",
            "horns_flare",
            "--scheme",
            "zone_2_3",
            "--runs",
            "500",
            "--seed",
            "7",
            "--json",
        ]);
        assert_eq!(args.play.as_deref(), Some("horns_flare"));
        assert_eq!(args.scheme, Some(DefensiveScheme::Zone23));
        assert_eq!(args.runs, 500);
        assert_eq!(args.seed, Some(7));
        assert!(args.json);
        assert!(!args.list);

        let args = AppArgs::parse_from(["courtside"]);
        assert_eq!(args.runs, 1);
        assert!(args.scheme.is_none());
    }

    #[test]
    fn test_rejects_unknown_scheme() {
        assert!(AppArgs::try_parse_from(["courtside", "--scheme", "box_and_one"]).is_err());
    }
}
