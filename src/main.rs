use clap::Parser;
use courtside::args::AppArgs;
use courtside::game_engine::{
    execute_play_seeded, DefensiveModifiers, EngineConfig, PlayInput, PlayResult, PlayStats,
    ReplaySeed,
};
use courtside::store::{
    demo_library, demo_lineups, find_play, load_engine_config, load_lineup, load_modifiers,
    load_plays, store_path,
};
use courtside::types::{slot_map, AppResult, GameId};
use log::LevelFilter;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn main() -> AppResult<()> {
    let args = AppArgs::parse();

    let logfile_path = store_path("courtside.log")?;
    let logfile = FileAppender::builder()
        .append(false)
        .encoder(Box::new(PatternEncoder::new("{l} - {m}\n")))
        .build(logfile_path)?;

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let config = Config::builder()
        .appender(Appender::builder().build("logfile", Box::new(logfile)))
        .build(Root::builder().appender("logfile").build(level))?;

    log4rs::init_config(config)?;

    let library = match args.library.as_ref() {
        Some(path) => load_plays(path)?,
        None => demo_library().to_vec(),
    };

    if args.list {
        for play in library.iter() {
            println!("{:<20} {:<14} {}", play.id, play.category.to_string(), play.name);
        }
        return Ok(());
    }

    let play_id = args
        .play
        .clone()
        .or_else(|| library.first().map(|play| play.id.clone()))
        .unwrap_or_default();
    let play = find_play(&library, &play_id)?;

    let (demo_offense, demo_defense) = demo_lineups()?;
    let offense = match args.offense.as_ref() {
        Some(path) => load_lineup(path)?,
        None => demo_offense,
    };
    let defense = match args.defense.as_ref() {
        Some(path) => load_lineup(path)?,
        None => demo_defense,
    };
    let modifiers = match args.modifiers.as_ref() {
        Some(path) => load_modifiers(path)?,
        None => DefensiveModifiers::default(),
    };
    let engine_config = match args.config.as_ref() {
        Some(path) => load_engine_config(path)?,
        None => EngineConfig::default(),
    };

    let slots = slot_map(&offense, &defense);
    let input = PlayInput::new(play, &offense, &defense, &slots)
        .with_scheme(args.scheme.unwrap_or_default())
        .with_modifiers(modifiers)
        .with_config(engine_config);

    let game_id = match args.seed {
        Some(seed) => GameId::from_u128(ChaCha8Rng::seed_from_u64(seed).random()),
        None => GameId::new_v4(),
    };
    log::info!(
        "Running {} x{} against {} (game {game_id})",
        play.id,
        args.runs,
        input.scheme
    );

    let mut stats = PlayStats::default();
    let mut last: Option<PlayResult> = None;
    for possession in 0..args.runs.max(1) {
        let seed = ReplaySeed::new(game_id, possession, &play.id);
        let result = execute_play_seeded(&input, &seed);
        stats.record(&result);
        last = Some(result);
    }

    if args.json {
        if let Some(result) = last.as_ref() {
            println!("{}", serde_json::to_string_pretty(result)?);
        }
        return Ok(());
    }

    if let Some(result) = last.as_ref().filter(|_| args.runs <= 1) {
        for keyframe in result.keyframes.iter() {
            println!("{:>5.1}s  {}", keyframe.time, keyframe.description);
        }
        println!("{} for {} points", result.outcome, result.points);
        log::debug!("{}", result.description());
    } else {
        println!("{} ({}) vs {}", play.name, play.id, input.scheme);
        println!("{}", input.scheme.description());
        println!("{stats}");
    }

    Ok(())
}
