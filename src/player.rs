use crate::components::{Direction, Pos, Tile};
use crate::level::Grid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    pub pos: Pos,
    /// Kept until the next steer; `None` until the first key press.
    pub dir: Direction,
}

impl Player {
    pub fn new(pos: Pos) -> Self {
        Self {
            pos,
            dir: Direction::None,
        }
    }

    /// Steps one cell along the current direction unless that is off the
    /// board or a wall, eating the pellet it lands on. Returns whether a
    /// pellet was eaten.
    pub fn advance(&mut self, grid: &mut Grid) -> bool {
        if self.dir == Direction::None {
            return false;
        }
        let Some(next) = self.pos.step(self.dir, grid.size()) else {
            return false;
        };
        match grid.get(next) {
            Tile::Wall => false,
            Tile::Open => {
                self.pos = next;
                false
            }
            Tile::Pellet => {
                self.pos = next;
                grid.set(next, Tile::Open);
                true
            }
        }
    }
}
