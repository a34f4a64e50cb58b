use rand::Rng;

use crate::components::{Direction, GhostTag, Pos};
use crate::level::Grid;

/// Tags handed out to ghosts in spawn order.
pub const GHOST_TAGS: [GhostTag; 2] = [GhostTag::Red, GhostTag::Pink];

/// A wandering ghost. Its direction is always one of [`Direction::MOVES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ghost {
    pub pos: Pos,
    pub dir: Direction,
    pub tag: GhostTag,
}

impl Ghost {
    pub fn spawn(pos: Pos, tag: GhostTag, rng: &mut impl Rng) -> Self {
        Self {
            pos,
            dir: random_dir(rng),
            tag,
        }
    }

    /// Advances one tick. When the next cell is off the board or a wall the
    /// ghost stays put and rolls a fresh direction for the next tick; the new
    /// roll may be blocked too.
    pub fn wander(&mut self, grid: &Grid, rng: &mut impl Rng) {
        match self.pos.step(self.dir, grid.size()) {
            Some(next) if !grid.is_wall(next) => self.pos = next,
            _ => self.dir = random_dir(rng),
        }
    }
}

fn random_dir(rng: &mut impl Rng) -> Direction {
    match rng.gen_range(0..4) {
        0 => Direction::Right,
        1 => Direction::Left,
        2 => Direction::Down,
        _ => Direction::Up,
    }
}
