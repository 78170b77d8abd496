use std::collections::BTreeSet;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use kanapop::config::Config;
use kanapop::engine::{Difficulty, RoundEngine};
use kanapop::event::{AppEvent, EventHandler};
use kanapop::kana::{Subset, Variant};
use kanapop::session::round::Phase;
use kanapop::store::schema::ExportData;
use kanapop::store::{FileStorage, ProgressStore, Storage};
use kanapop::ui::terminal::TerminalView;
use kanapop::view::{Effect, dispatch};

const TICK_RATE: Duration = Duration::from_millis(100);
/// Pause after a resolved round before the next one starts.
const NEXT_ROUND_DELAY: Duration = Duration::from_millis(600);

#[derive(Parser)]
#[command(name = "kanapop", version, about = "Kana recognition game with mistake-weighted repetition")]
struct Cli {
    #[arg(short, long, help = "Writing system (hiragana, katakana)")]
    variant: Option<Variant>,

    #[arg(short, long, help = "Difficulty (easy, medium, hard)")]
    difficulty: Option<Difficulty>,

    #[arg(
        short,
        long,
        value_delimiter = ',',
        help = "Character subsets, comma separated (basic, voiced, combination)"
    )]
    subsets: Option<Vec<Subset>>,

    #[arg(long, help = "Directory holding saved progress")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Play rounds until `q` or end of input (default)
    Play,
    /// Show the characters with the most mistakes
    Stats,
    /// Wipe all recorded mistakes
    Reset {
        #[arg(short, long, help = "Skip the confirmation prompt")]
        yes: bool,
    },
    /// Write progress and settings to a JSON file
    Export { path: PathBuf },
    /// Replace progress with a previously exported file
    Import { path: PathBuf },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("could not load config, using defaults: {e}");
        Config::default()
    });
    if let Some(variant) = cli.variant {
        config.variant = variant;
    }
    if let Some(difficulty) = cli.difficulty {
        config.difficulty = difficulty;
    }
    if let Some(subsets) = cli.subsets {
        config.subsets = subsets.iter().map(|s| s.to_key().to_string()).collect();
        config.normalize_subsets();
    }
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir.to_string_lossy().to_string();
    }

    let storage = FileStorage::with_base_dir(PathBuf::from(&config.data_dir))?;
    let mut store = ProgressStore::open(storage);

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => play(store, config),
        Command::Stats => {
            let engine = RoundEngine::new(store, &config);
            let stdin = io::stdin();
            TerminalView::new(io::stdout(), &stdin).print_report(&engine.report());
            Ok(())
        }
        Command::Reset { yes } => {
            if yes {
                store.reset();
                println!("Progress reset.");
                return Ok(());
            }
            let mut engine = RoundEngine::new(store, &config);
            let stdin = io::stdin();
            let mut view = TerminalView::new(io::stdout(), &stdin);
            if engine.request_reset(&mut view).is_empty() {
                println!("Cancelled.");
            } else {
                println!("Progress reset.");
            }
            Ok(())
        }
        Command::Export { path } => {
            store.export(&config).save_to(&path)?;
            println!("Exported progress to {}", path.display());
            Ok(())
        }
        Command::Import { path } => {
            let data = ExportData::load_from(&path)?;
            store.import(data)?;
            println!("Imported progress from {}", path.display());
            Ok(())
        }
    }
}

enum Flow {
    Continue(Vec<Effect>),
    Quit,
}

fn play<S: Storage>(store: ProgressStore<S>, mut config: Config) -> Result<()> {
    let mut engine = RoundEngine::new(store, &config);
    let events = EventHandler::new(TICK_RATE);
    let mut view = TerminalView::new(io::stdout(), &events);

    view.print_help();
    dispatch(&mut view, engine.start_round());

    let mut last_tick = Instant::now();
    let mut next_round_at: Option<Instant> = None;

    loop {
        io::stdout().flush()?;
        match events.next()? {
            AppEvent::Tick => {
                let now = Instant::now();
                let effects = engine.tick(now.duration_since(last_tick));
                last_tick = now;
                dispatch(&mut view, effects);
                if let Some(at) = next_round_at
                    && now >= at
                {
                    next_round_at = None;
                    dispatch(&mut view, engine.start_round());
                }
            }
            AppEvent::Input(line) => {
                let command = line.trim();
                let resets = command == "reset";
                match handle_command(&mut engine, &mut view, &mut config, command) {
                    Flow::Continue(effects) => dispatch(&mut view, effects),
                    Flow::Quit => break,
                }
                if resets {
                    // the prompt blocked; don't charge that time to the new round
                    last_tick = Instant::now();
                }
            }
            AppEvent::Eof => break,
        }

        match engine.phase() {
            Phase::Resolved(_) if next_round_at.is_none() => {
                next_round_at = Some(Instant::now() + NEXT_ROUND_DELAY);
            }
            Phase::AwaitingAnswer => next_round_at = None,
            _ => {}
        }
    }

    if engine.stats().total_attempts > 0 {
        view.print_report(&engine.report());
    }
    Ok(())
}

fn handle_command<S: Storage, W: Write>(
    engine: &mut RoundEngine<S>,
    view: &mut TerminalView<'_, W>,
    config: &mut Config,
    command: &str,
) -> Flow {
    let (verb, arg) = command
        .split_once(char::is_whitespace)
        .map(|(v, a)| (v, a.trim()))
        .unwrap_or((command, ""));

    let effects = match verb {
        "" => Vec::new(),
        "q" | "quit" => return Flow::Quit,
        "?" | "help" => {
            view.print_help();
            Vec::new()
        }
        "h" => {
            config.variant = Variant::Hiragana;
            save_settings(config);
            engine.set_variant(Variant::Hiragana)
        }
        "k" => {
            config.variant = Variant::Katakana;
            save_settings(config);
            engine.set_variant(Variant::Katakana)
        }
        "d" => match arg.parse::<Difficulty>() {
            Ok(difficulty) => {
                config.difficulty = difficulty;
                save_settings(config);
                engine.set_difficulty(difficulty)
            }
            Err(e) => {
                view.message(&e.to_string());
                Vec::new()
            }
        },
        "s" => match parse_subsets(arg) {
            Ok(subsets) => {
                let effects = engine.set_subsets(subsets);
                config.subsets = engine
                    .subsets()
                    .iter()
                    .map(|s| s.to_key().to_string())
                    .collect();
                save_settings(config);
                effects
            }
            Err(e) => {
                view.message(&e.to_string());
                Vec::new()
            }
        },
        "n" | "next" => engine.skip_round(),
        "stats" => {
            view.print_report(&engine.report());
            Vec::new()
        }
        "reset" => engine.request_reset(view),
        _ => match pick_glyph(engine, command) {
            Some(glyph) => engine.choose(glyph),
            None => {
                view.message("unknown command, type ? for help");
                Vec::new()
            }
        },
    };
    Flow::Continue(effects)
}

/// A bubble number (1-based) or one of the glyphs on screen.
fn pick_glyph<S: Storage>(engine: &RoundEngine<S>, input: &str) -> Option<&'static str> {
    let round = engine.round()?;
    if let Ok(n) = input.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| round.bubbles.get(i)).copied();
    }
    round.bubbles.iter().copied().find(|&glyph| glyph == input)
}

fn parse_subsets(arg: &str) -> Result<BTreeSet<Subset>, kanapop::kana::ParseError> {
    arg.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}

fn save_settings(config: &Config) {
    if let Err(e) = config.save() {
        tracing::warn!("could not save settings: {e}");
    }
}
