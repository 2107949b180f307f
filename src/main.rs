//! Grid Snake - headless runner
//!
//! Plays sessions without a window: input comes from a scripted command list
//! or the autopilot, frames can be dumped as JSON lines, and scores are
//! recorded to the configured data directory like in an interactive game.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;

use grid_snake::audio::LogSink;
use grid_snake::game::Stage;
use grid_snake::platform::Command;
use grid_snake::sim::GameMode;
use grid_snake::{Game, Settings, Theme};

#[derive(Parser, Debug)]
#[command(name = "grid-snake", version, about = "Snake on a wrap-around grid")]
struct Args {
    /// Settings file (JSON); missing fields use defaults
    #[arg(long, default_value = Settings::FILE_NAME)]
    config: PathBuf,
    /// Game mode: classic or survival
    #[arg(long)]
    mode: Option<String>,
    /// Color theme name
    #[arg(long)]
    theme: Option<String>,
    /// Grid width in cells
    #[arg(long)]
    width: Option<i32>,
    /// Grid height in cells
    #[arg(long)]
    height: Option<i32>,
    /// Directory for the high score and leaderboard files
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// RNG seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Name recorded on the survival leaderboard
    #[arg(long, default_value = "Player")]
    name: String,
    /// Comma-separated commands, one per tick (up, down, left, right, pause,
    /// restart, quit; empty entries wait a tick)
    #[arg(long, default_value = "")]
    script: String,
    /// Let the computer steer
    #[arg(long)]
    autopilot: bool,
    /// Stop after this many simulated ticks
    #[arg(long, default_value_t = 2000)]
    max_ticks: u64,
    /// Run at wall-clock speed instead of as fast as possible
    #[arg(long)]
    realtime: bool,
    /// Print every frame as a JSON line
    #[arg(long)]
    print_frames: bool,
    /// Write the effective settings back to the config file
    #[arg(long)]
    save_config: bool,
}

fn build_settings(args: &Args) -> Result<Settings, String> {
    let mut settings = Settings::load(&args.config);
    if let Some(mode) = &args.mode {
        settings.rules.mode =
            GameMode::from_str(mode).ok_or_else(|| format!("unknown mode {mode:?}"))?;
    }
    if let Some(theme) = &args.theme {
        settings.theme = Theme::from_str(theme).ok_or_else(|| format!("unknown theme {theme:?}"))?;
    }
    if let Some(width) = args.width {
        settings.rules.grid_width = width;
    }
    if let Some(height) = args.height {
        settings.rules.grid_height = height;
    }
    if let Some(dir) = &args.data_dir {
        settings.data_dir = dir.clone();
    }
    Ok(settings)
}

/// Script entry for each tick; `None` entries send nothing
fn parse_script(script: &str) -> Result<Vec<Option<Command>>, String> {
    if script.trim().is_empty() {
        return Ok(Vec::new());
    }
    script
        .split(',')
        .map(|word| {
            if word.trim().is_empty() {
                Ok(None)
            } else {
                Command::from_word(word)
                    .map(Some)
                    .ok_or_else(|| format!("unknown command {:?}", word.trim()))
            }
        })
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let settings = build_settings(&args)?;
    if args.save_config {
        settings.save(&args.config)?;
    }
    let script = parse_script(&args.script)?;
    let seed = args.seed.unwrap_or_else(rand::random);

    log::info!(
        "Starting {} on {}x{} (theme {}, seed {})",
        settings.rules.mode.as_str(),
        settings.rules.grid_width,
        settings.rules.grid_height,
        settings.theme.as_str(),
        seed
    );

    let mut game = Game::new(settings, seed, LogSink::default())?;
    game.set_player_name(&args.name);
    game.set_autopilot(args.autopilot);

    let mut script = script.into_iter();
    let mut ticks = 0u64;
    let mut last = Instant::now();

    while ticks < args.max_ticks && !game.is_quit() {
        let frame_dt = if args.realtime {
            let step = Duration::from_secs_f32(1.0 / game.state().tick_rate);
            std::thread::sleep(step.saturating_sub(last.elapsed()));
            let now = Instant::now();
            let dt = now.duration_since(last).as_secs_f32();
            last = now;
            dt
        } else {
            1.0 / game.state().tick_rate
        };

        let running = game.stage() == &Stage::Running;
        if running || game.is_finished() {
            match script.next() {
                Some(Some(command)) => game.push_command(command),
                Some(None) => {}
                // Script done and nothing left to play
                None if game.is_finished() => break,
                None => {}
            }
        }

        game.update(frame_dt)?;
        if running {
            // Paused frames count too, so a paused script still terminates
            ticks += 1;
            if args.print_frames {
                println!("{}", serde_json::to_string(&game.view())?);
            }
        }
    }

    match game.summary() {
        Some(summary) => {
            let cause = summary.cause.map_or("none", |c| c.as_str());
            println!(
                "{} over ({}): score {} in {}s, high score {}{}",
                summary.mode.as_str(),
                cause,
                summary.score,
                summary.elapsed_secs,
                game.high_score(),
                if summary.new_high_score { " (new!)" } else { "" }
            );
            if let Some(rank) = summary.leaderboard_rank {
                println!("Leaderboard rank #{rank}");
            }
        }
        None => println!(
            "Stopped after {} ticks with score {}",
            ticks,
            game.state().score
        ),
    }
    for (i, entry) in game.leaderboard().entries.iter().enumerate() {
        log::info!("{:>2}. {:<10} {:>6} {:>5}s", i + 1, entry.name, entry.score, entry.time_secs);
    }
    Ok(())
}
