use rand::Rng;

use crate::components::{Pos, Tile};
use crate::config::MAX_GRID_SIZE;
use crate::error::{GameError, GameResult};

/// Square board of `size` x `size` tiles stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Tile>,
}

impl Grid {
    /// A board of all walls.
    pub fn filled(size: usize) -> Self {
        Self {
            size,
            cells: vec![Tile::Wall; size * size],
        }
    }

    /// Builds a board from text rows: `#` wall, `.` pellet, space open.
    ///
    /// Rows must form a square whose border is entirely wall.
    pub fn from_rows(rows: &[&str]) -> GameResult<Self> {
        let size = rows.len();
        if size > MAX_GRID_SIZE {
            return Err(GameError::GridTooLarge {
                size,
                max: MAX_GRID_SIZE,
            });
        }
        let mut grid = Grid::filled(size);
        for (y, row) in rows.iter().enumerate() {
            let chars: Vec<char> = row.chars().collect();
            if chars.len() != size {
                return Err(GameError::InvalidLayout(format!(
                    "row {y} has {} cells, expected {size}",
                    chars.len()
                )));
            }
            for (x, ch) in chars.into_iter().enumerate() {
                let tile = match ch {
                    '#' => Tile::Wall,
                    '.' => Tile::Pellet,
                    ' ' => Tile::Open,
                    other => {
                        return Err(GameError::InvalidLayout(format!(
                            "unknown cell {other:?} at ({x}, {y})"
                        )))
                    }
                };
                grid.set(Pos { x, y }, tile);
            }
        }
        if size < 3 {
            return Err(GameError::GridTooSmall { size });
        }
        if grid.border().any(|p| grid.get(p) != Tile::Wall) {
            return Err(GameError::InvalidLayout("border must be solid wall".into()));
        }
        Ok(grid)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn idx(&self, pos: Pos) -> usize {
        pos.y * self.size + pos.x
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.x < self.size && pos.y < self.size
    }

    pub fn get(&self, pos: Pos) -> Tile {
        self.cells[self.idx(pos)]
    }

    pub fn set(&mut self, pos: Pos, tile: Tile) {
        let idx = self.idx(pos);
        self.cells[idx] = tile;
    }

    pub fn is_wall(&self, pos: Pos) -> bool {
        self.get(pos) == Tile::Wall
    }

    /// Every position on the board, row by row.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.size).flat_map(move |y| (0..self.size).map(move |x| Pos { x, y }))
    }

    pub fn border(&self) -> impl Iterator<Item = Pos> + '_ {
        let last = self.size.saturating_sub(1);
        self.positions()
            .filter(move |p| p.x == 0 || p.y == 0 || p.x == last || p.y == last)
    }

    pub fn count(&self, tile: Tile) -> usize {
        self.cells.iter().filter(|&&cell| cell == tile).count()
    }

    pub fn pellets_left(&self) -> usize {
        self.count(Tile::Pellet)
    }

    pub fn has_pellets(&self) -> bool {
        self.cells.contains(&Tile::Pellet)
    }
}

/// Random maze with a solid border. Each interior cell is independently a
/// wall with probability `wall_probability`, otherwise a pellet.
///
/// Callers validate `size >= 3` and `wall_probability` in `[0, 1]` first
/// (see [`crate::config::GameConfig::validate`]).
pub fn generate(size: usize, wall_probability: f64, rng: &mut impl Rng) -> Grid {
    let mut grid = Grid::filled(size);
    let last = size.saturating_sub(1);
    for y in 1..last {
        for x in 1..last {
            let tile = if rng.gen::<f64>() < wall_probability {
                Tile::Wall
            } else {
                Tile::Pellet
            };
            grid.set(Pos { x, y }, tile);
        }
    }
    grid
}
