//! Terminal-free half of the front end: key mapping, the tick timer and the
//! restart / win-dialog flow.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::components::{Direction, Phase};
use crate::config::GameConfig;
use crate::error::GameResult;
use crate::game::GameState;

/// Something the player asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    Restart,
    /// "New Level" in the win dialog.
    NewLevel,
    /// "Exit" in the win dialog.
    Exit,
    Quit,
}

/// Maps a key press to a command. Releases and unbound keys are dropped.
pub fn command_for(key: KeyEvent) -> Option<Command> {
    if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
        return None;
    }
    let cmd = match key.code {
        KeyCode::Up | KeyCode::Char('k') => Command::Steer(Direction::Up),
        KeyCode::Down | KeyCode::Char('j') => Command::Steer(Direction::Down),
        KeyCode::Left | KeyCode::Char('h') => Command::Steer(Direction::Left),
        KeyCode::Right | KeyCode::Char('l') => Command::Steer(Direction::Right),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Command::Quit,
        KeyCode::Char('r') => Command::Restart,
        KeyCode::Char('n') => Command::NewLevel,
        KeyCode::Char('e') => Command::Exit,
        KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
        _ => return None,
    };
    Some(cmd)
}

/// Fires once per period while running.
#[derive(Debug, Clone, Copy)]
pub struct TickDriver {
    period: Duration,
    last_tick: Instant,
    running: bool,
}

impl TickDriver {
    pub fn new(period: Duration, now: Instant) -> Self {
        Self {
            period,
            last_tick: now,
            running: true,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn restart(&mut self, now: Instant) {
        self.running = true;
        self.last_tick = now;
    }

    /// Whether a tick is due at `now`; consumes the period when it is.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.running || now.duration_since(self.last_tick) < self.period {
            return false;
        }
        self.last_tick = now;
        true
    }

    /// Time until the next tick, or `None` when stopped.
    pub fn until_next(&self, now: Instant) -> Option<Duration> {
        self.running
            .then(|| self.period.saturating_sub(now.duration_since(self.last_tick)))
    }
}

/// What the event loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// The current game plus its tick driver. Restarting swaps in a freshly
/// generated game of the same size.
#[derive(Debug)]
pub struct Session {
    config: GameConfig,
    seeder: StdRng,
    game: GameState,
    driver: TickDriver,
    games_started: u32,
}

impl Session {
    pub fn new(config: GameConfig, tick: Duration, now: Instant) -> GameResult<Self> {
        config.validate()?;
        let mut seeder = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let game = GameState::new(&config.with_seed(seeder.gen()))?;
        Ok(Self {
            config,
            seeder,
            game,
            driver: TickDriver::new(tick, now),
            games_started: 1,
        })
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn games_started(&self) -> u32 {
        self.games_started
    }

    pub fn driver(&self) -> &TickDriver {
        &self.driver
    }

    /// Throws away the current game and starts a new one.
    pub fn restart(&mut self, now: Instant) -> GameResult<()> {
        let seed = self.seeder.gen();
        self.game = GameState::new(&self.config.with_seed(seed))?;
        self.games_started += 1;
        self.driver.restart(now);
        info!(game = self.games_started, seed, "restarted");
        Ok(())
    }

    pub fn handle(&mut self, cmd: Command, now: Instant) -> GameResult<Flow> {
        match cmd {
            Command::Steer(dir) => self.game.set_direction(dir),
            Command::Restart => self.restart(now)?,
            Command::NewLevel if self.game.phase() == Phase::Won => self.restart(now)?,
            Command::Exit if self.game.phase() == Phase::Won => return Ok(Flow::Exit),
            Command::NewLevel | Command::Exit => {}
            Command::Quit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    /// Runs a tick if one is due. The driver stops as soon as the game ends.
    /// Returns whether the game advanced.
    pub fn update(&mut self, now: Instant) -> bool {
        if !self.driver.poll(now) {
            return false;
        }
        if self.game.tick().is_over() {
            self.driver.stop();
        }
        true
    }
}
