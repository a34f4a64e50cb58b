use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use crate::components::{Direction, Pos, Tile};
use crate::level::Grid;

/// Breadth-first scan from `origin` over non-wall cells. Returns the visit
/// order (starting with `origin`) and a row-major visited mask.
fn bfs(grid: &Grid, origin: Pos) -> (Vec<Pos>, Vec<bool>) {
    let size = grid.size();
    let mut seen = vec![false; size * size];
    let mut order = vec![origin];
    let mut q = VecDeque::from([origin]);
    seen[origin.y * size + origin.x] = true;
    while let Some(pos) = q.pop_front() {
        for dir in Direction::MOVES {
            let Some(next) = pos.step(dir, size) else {
                continue;
            };
            let idx = next.y * size + next.x;
            if seen[idx] || grid.is_wall(next) {
                continue;
            }
            seen[idx] = true;
            order.push(next);
            q.push_back(next);
        }
    }
    (order, seen)
}

/// Cells reachable from `origin`, in breadth-first order starting with
/// `origin` itself.
pub fn reachable(grid: &Grid, origin: Pos) -> Vec<Pos> {
    bfs(grid, origin).0
}

/// Walls off every cell not reachable from `origin` and returns the
/// reachable cells. Afterwards every non-wall cell is connected to `origin`.
pub fn repair(grid: &mut Grid, origin: Pos) -> Vec<Pos> {
    let (cells, keep) = bfs(grid, origin);
    let size = grid.size();
    let mut walled = 0;
    for y in 0..size {
        for x in 0..size {
            let pos = Pos { x, y };
            if !keep[y * size + x] && !grid.is_wall(pos) {
                grid.set(pos, Tile::Wall);
                walled += 1;
            }
        }
    }
    debug!(walled, reachable = cells.len(), "repaired maze");
    cells
}

/// Fixed spawn points used when the maze is too closed-in to pick from.
pub fn fallback_spawns(size: usize, count: usize) -> Vec<Pos> {
    let far = size.saturating_sub(2);
    let corners = [
        Pos { x: 1, y: 1 },
        Pos { x: far, y: far },
        Pos { x: far, y: 1 },
        Pos { x: 1, y: far },
    ];
    corners.iter().copied().cycle().take(count).collect()
}

/// Picks `count` distinct ghost spawns uniformly from `reachable` minus
/// `origin`. When there are not enough candidates the fixed corner spawns are
/// used instead. Every chosen cell is forced open.
pub fn pick_ghost_spawns(
    grid: &mut Grid,
    reachable: &[Pos],
    origin: Pos,
    count: usize,
    rng: &mut impl Rng,
) -> Vec<Pos> {
    let candidates: Vec<Pos> = reachable.iter().copied().filter(|&p| p != origin).collect();
    let spawns = if candidates.len() >= count {
        candidates.choose_multiple(rng, count).copied().collect()
    } else {
        warn!(
            candidates = candidates.len(),
            count, "not enough reachable cells for ghosts, using corner spawns"
        );
        fallback_spawns(grid.size(), count)
    };
    for &pos in &spawns {
        grid.set(pos, Tile::Open);
    }
    spawns
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn layout(rows: &[&str]) -> Grid {
        Grid::from_rows(rows).unwrap()
    }

    #[test]
    fn open_board_is_fully_reachable() {
        let grid = layout(&["#####", "#...#", "#...#", "#...#", "#####"]);
        let cells = reachable(&grid, Pos::new(2, 2));
        assert_eq!(cells.len(), 9);
        assert_eq!(cells[0], Pos::new(2, 2));
    }

    #[test]
    fn walls_block_the_flood() {
        let grid = layout(&[
            "#######", //
            "#..#..#", //
            "#..#..#", //
            "#######", //
            "#.....#", //
            "#.....#", //
            "#######",
        ]);
        let cells = reachable(&grid, Pos::new(1, 1));
        assert_eq!(cells.len(), 4);
        assert!(!cells.contains(&Pos::new(4, 1)));
        assert!(!cells.contains(&Pos::new(1, 4)));
    }

    #[test]
    fn repair_walls_off_pockets() {
        let mut grid = layout(&[
            "#######", //
            "#..#..#", //
            "#..#..#", //
            "#######", //
            "#.....#", //
            "#.. ..#", //
            "#######",
        ]);
        let cells = repair(&mut grid, Pos::new(1, 1));
        assert_eq!(cells.len(), 4);
        assert_eq!(grid.pellets_left(), 4);
        assert_eq!(grid.count(Tile::Open), 0);
        let non_wall = grid.positions().filter(|&p| !grid.is_wall(p)).count();
        assert_eq!(non_wall, reachable(&grid, Pos::new(1, 1)).len());
    }

    #[test]
    fn spawns_are_distinct_and_not_origin() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            let mut grid = layout(&["#####", "#...#", "#...#", "#...#", "#####"]);
            let origin = Pos::new(2, 2);
            let cells = repair(&mut grid, origin);
            let spawns = pick_ghost_spawns(&mut grid, &cells, origin, 2, &mut rng);
            assert_eq!(spawns.len(), 2);
            assert_ne!(spawns[0], spawns[1]);
            assert!(!spawns.contains(&origin));
            assert!(spawns.iter().all(|&p| grid.get(p) == Tile::Open));
        }
    }

    #[test]
    fn falls_back_to_corners() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut grid = layout(&["#####", "#####", "## ##", "#####", "#####"]);
        let origin = Pos::new(2, 2);
        let cells = repair(&mut grid, origin);
        assert_eq!(cells, vec![origin]);
        let spawns = pick_ghost_spawns(&mut grid, &cells, origin, 2, &mut rng);
        assert_eq!(spawns, vec![Pos::new(1, 1), Pos::new(3, 3)]);
        assert_eq!(grid.get(Pos::new(1, 1)), Tile::Open);
        assert_eq!(grid.get(Pos::new(3, 3)), Tile::Open);
    }

    #[test]
    fn corner_fallback_can_land_on_the_start() {
        // One candidate only, so the corners are used. On a 4x4 board the far
        // corner is the start cell, and opening (1, 1) joins it to the flood.
        let mut rng = StdRng::seed_from_u64(2);
        let mut grid = layout(&["####", "####", "#. #", "####"]);
        let origin = Pos::new(2, 2);
        let cells = repair(&mut grid, origin);
        assert_eq!(cells.len(), 2);
        let spawns = pick_ghost_spawns(&mut grid, &cells, origin, 2, &mut rng);
        assert_eq!(spawns, fallback_spawns(4, 2));
        assert_eq!(spawns, vec![Pos::new(1, 1), origin]);
        assert_eq!(reachable(&grid, origin).len(), 3);
    }
}
