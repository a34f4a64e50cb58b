//! Game state and the per-tick simulation.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, trace};

use crate::components::{Direction, Phase, Pos, Tile};
use crate::config::GameConfig;
use crate::connectivity::{pick_ghost_spawns, repair};
use crate::error::{GameError, GameResult};
use crate::ghost::{Ghost, GHOST_TAGS};
use crate::level::{generate, Grid};
use crate::player::Player;

/// One game: the maze, the player, the ghosts and the phase.
///
/// `tick` and `set_direction` are the only mutators. Once the phase is
/// `Lost` or `Won` both become no-ops; a new game needs a new `GameState`.
#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    player: Player,
    ghosts: Vec<Ghost>,
    phase: Phase,
    ticks: u64,
    rng: StdRng,
}

impl GameState {
    /// Generates a maze, walls off everything the player cannot reach from
    /// the centre, and spawns the ghosts on reachable cells.
    pub fn new(config: &GameConfig) -> GameResult<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self::build(config, rng))
    }

    fn build(config: &GameConfig, mut rng: StdRng) -> Self {
        let size = config.size;
        let mut grid = generate(size, config.wall_probability, &mut rng);

        let start = Pos::new(size / 2, size / 2);
        grid.set(start, Tile::Open);
        let cells = repair(&mut grid, start);

        let spawns = pick_ghost_spawns(&mut grid, &cells, start, GHOST_TAGS.len(), &mut rng);
        let ghosts = spawns
            .into_iter()
            .zip(GHOST_TAGS)
            .map(|(pos, tag)| Ghost::spawn(pos, tag, &mut rng))
            .collect::<Vec<_>>();

        info!(
            size,
            seed = ?config.seed,
            reachable = cells.len(),
            pellets = grid.pellets_left(),
            "new game"
        );
        debug!(?start, ghosts = ?ghosts.iter().map(|g| g.pos).collect::<Vec<_>>(), "spawned");

        Self {
            grid,
            player: Player::new(start),
            ghosts,
            phase: Phase::Playing,
            ticks: 0,
            rng,
        }
    }

    /// Builds a game from a hand-made board. Every agent must stand on a
    /// non-wall cell inside the board.
    pub fn from_layout(grid: Grid, player: Pos, ghosts: Vec<Ghost>, seed: u64) -> GameResult<Self> {
        let agents = std::iter::once(player).chain(ghosts.iter().map(|g| g.pos));
        for pos in agents {
            if !grid.contains(pos) || grid.is_wall(pos) {
                return Err(GameError::InvalidLayout(format!(
                    "agent at ({}, {}) is not on an open cell",
                    pos.x, pos.y
                )));
            }
        }
        if ghosts.iter().any(|g| g.dir == Direction::None) {
            return Err(GameError::InvalidLayout("ghosts must have a heading".into()));
        }
        Ok(Self {
            grid,
            player: Player::new(player),
            ghosts,
            phase: Phase::Playing,
            ticks: 0,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn ghosts(&self) -> &[Ghost] {
        &self.ghosts
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn pellets_left(&self) -> usize {
        self.grid.pellets_left()
    }

    /// Steers the player. Takes effect on the next tick; ignored once the
    /// game is over.
    pub fn set_direction(&mut self, dir: Direction) {
        if self.phase == Phase::Playing {
            self.player.dir = dir;
        }
    }

    /// Advances the simulation one step and returns the resulting phase.
    pub fn tick(&mut self) -> Phase {
        if self.phase != Phase::Playing {
            return self.phase;
        }
        self.ticks += 1;

        let ate = self.player.advance(&mut self.grid);
        for ghost in &mut self.ghosts {
            ghost.wander(&self.grid, &mut self.rng);
        }
        trace!(tick = self.ticks, player = ?self.player.pos, ate, "tick");

        if let Some(ghost) = self.ghosts.iter().find(|g| g.pos == self.player.pos) {
            self.phase = Phase::Lost;
            info!(tick = self.ticks, tag = ?ghost.tag, pos = ?ghost.pos, "caught by ghost");
        } else if !self.grid.has_pellets() {
            self.phase = Phase::Won;
            info!(tick = self.ticks, "all pellets eaten");
        }
        self.phase
    }
}
