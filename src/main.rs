use std::fs::File;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::terminal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use pacman_maze::config::{
    DEFAULT_GRID_SIZE, DEFAULT_RENDER_FPS, DEFAULT_TICK_MS, DEFAULT_WALL_PROBABILITY,
};
use pacman_maze::controller::{command_for, Flow, Session};
use pacman_maze::render::Renderer;
use pacman_maze::terminal::TerminalGuard;
use pacman_maze::{GameConfig, GameResult, RunConfig};

/// Eat every pellet in a random maze without meeting a ghost.
#[derive(Parser, Debug)]
#[command(name = "pacman-maze", version, about)]
struct Args {
    /// Board side length in cells (3 to 200)
    #[arg(long, env = "PACMAN_SIZE", default_value_t = DEFAULT_GRID_SIZE)]
    size: usize,

    /// Chance that an interior cell starts as a wall
    #[arg(long, env = "PACMAN_WALL_PROBABILITY", default_value_t = DEFAULT_WALL_PROBABILITY)]
    wall_probability: f64,

    /// Milliseconds per simulation tick
    #[arg(long, env = "PACMAN_TICK_MS", default_value_t = DEFAULT_TICK_MS)]
    tick_ms: u64,

    /// Redraw rate
    #[arg(long, env = "PACMAN_FPS", default_value_t = DEFAULT_RENDER_FPS)]
    fps: u64,

    /// Seed for reproducible sessions (default: random)
    #[arg(short, long, env = "PACMAN_SEED")]
    seed: Option<u64>,

    /// Write logs here; filter with RUST_LOG
    #[arg(long, env = "PACMAN_LOG")]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = init_logging(args.log_file.as_ref()) {
        eprintln!("cannot open log file: {e}");
        return ExitCode::FAILURE;
    }

    let game_config = GameConfig {
        size: args.size,
        wall_probability: args.wall_probability,
        seed: args.seed,
    };
    let setup = game_config
        .validate()
        .and_then(|()| RunConfig::new(args.tick_ms, args.fps));
    let run_config = match setup {
        Ok(run) => run,
        Err(e) => {
            error!(%e, "bad configuration");
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match play(game_config, run_config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(%e, "terminated");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// The terminal is in raw alternate-screen mode while playing, so logs only
/// go to a file.
fn init_logging(path: Option<&PathBuf>) -> io::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn play(game_config: GameConfig, run_config: RunConfig) -> GameResult<()> {
    let mut guard = TerminalGuard::enter(io::stdout())?;
    let result = run(guard.out(), game_config, run_config);
    let restored = guard.restore();
    result?;
    restored?;
    Ok(())
}

fn run(stdout: &mut Stdout, game_config: GameConfig, run_config: RunConfig) -> GameResult<()> {
    let mut session = Session::new(game_config, run_config.tick, Instant::now())?;
    let mut renderer = Renderer::new(game_config.size);
    let frame_time = run_config.frame_time();
    info!(
        size = game_config.size,
        tick_ms = run_config.tick.as_millis() as u64,
        "session started"
    );

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key) => {
                    let Some(cmd) = command_for(key) else {
                        continue;
                    };
                    let games = session.games_started();
                    if session.handle(cmd, Instant::now())? == Flow::Exit {
                        info!(games = session.games_started(), "exit");
                        return Ok(());
                    }
                    if session.games_started() != games {
                        renderer.invalidate();
                    }
                }
                Event::Resize(..) => renderer.invalidate(),
                _ => {}
            }
        }

        session.update(Instant::now());
        renderer.draw(
            stdout,
            session.game(),
            session.games_started(),
            terminal::size()?,
        )?;

        let now = Instant::now();
        let mut wait = frame_time.saturating_sub(now.duration_since(frame_start));
        if let Some(next_tick) = session.driver().until_next(now) {
            wait = wait.min(next_tick);
        }
        if !wait.is_zero() {
            thread::sleep(wait);
        }
    }
}
