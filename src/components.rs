/// Contents of one maze cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Open,
    Pellet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Neighbour one step along `dir`, or `None` when that would leave the
    /// `size` x `size` board.
    pub fn step(self, dir: Direction, size: usize) -> Option<Pos> {
        let (dx, dy) = dir.delta();
        let nx = self.x as isize + dx;
        let ny = self.y as isize + dy;
        if nx < 0 || ny < 0 {
            return None;
        }
        let nx = nx as usize;
        let ny = ny as usize;
        if nx >= size || ny >= size {
            return None;
        }
        Some(Pos { x: nx, y: ny })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    #[default]
    None,
}

impl Direction {
    /// The four directions an agent can actually travel in.
    pub const MOVES: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::None => (0, 0),
        }
    }
}

/// Overall status of one game. `Lost` and `Won` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Lost,
    Won,
}

impl Phase {
    pub fn is_over(self) -> bool {
        self != Phase::Playing
    }
}

/// Display identity of a ghost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GhostTag {
    Red,
    Pink,
}
