//! Terminal renderer. Only cells that changed since the last frame are
//! redrawn.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use crate::components::{GhostTag, Phase, Pos, Tile};
use crate::game::GameState;

const CELL_W: usize = 2;
const GAME_OVER: &str = "GAME OVER";
const WIN_TITLE: &str = "YOU WIN!";
const WIN_CHOICES: &str = "[e] Exit  [n] New Level";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Glyph {
    Player,
    Ghost,
    Wall,
    Empty,
    Pellet,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Cell {
    pub glyph: Glyph,
    pub color: Color,
}

pub fn ghost_color(tag: GhostTag) -> Color {
    match tag {
        GhostTag::Red => Color::Red,
        GhostTag::Pink => Color::Magenta,
    }
}

/// What to draw at `pos`: agents on top of the maze, the player above ghosts.
pub fn cell_for(game: &GameState, pos: Pos) -> Cell {
    if pos == game.player().pos {
        return Cell {
            glyph: Glyph::Player,
            color: Color::Yellow,
        };
    }
    if let Some(ghost) = game.ghosts().iter().find(|g| g.pos == pos) {
        return Cell {
            glyph: Glyph::Ghost,
            color: ghost_color(ghost.tag),
        };
    }
    match game.grid().get(pos) {
        Tile::Wall => Cell {
            glyph: Glyph::Wall,
            color: Color::Blue,
        },
        Tile::Open => Cell {
            glyph: Glyph::Empty,
            color: Color::Reset,
        },
        Tile::Pellet => Cell {
            glyph: Glyph::Pellet,
            color: Color::White,
        },
    }
}

fn glyph_text(glyph: Glyph) -> &'static str {
    match glyph {
        Glyph::Player => "● ",
        Glyph::Ghost => "● ",
        Glyph::Wall => "██",
        Glyph::Empty => "  ",
        Glyph::Pellet => "· ",
    }
}

#[derive(Debug)]
pub struct Renderer {
    last: Vec<Cell>,
    last_hud: String,
    last_phase: Phase,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    pub fn new(size: usize) -> Self {
        Self {
            last: vec![
                Cell {
                    glyph: Glyph::Empty,
                    color: Color::Reset,
                };
                size * size
            ],
            last_hud: String::new(),
            last_phase: Phase::Playing,
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }

    /// Forces the next frame to repaint everything, e.g. after a restart.
    pub fn invalidate(&mut self) {
        self.needs_full = true;
    }

    /// Draws one frame for a terminal of `term` (cols, rows).
    pub fn draw(
        &mut self,
        out: &mut impl Write,
        game: &GameState,
        games_started: u32,
        term: (u16, u16),
    ) -> io::Result<()> {
        let size = game.grid().size();
        let needed_h = (size + 4) as u16;
        let needed_w = ((size * CELL_W) as u16).max(WIN_CHOICES.len() as u16);
        let (term_w, term_h) = term;

        if self.last.len() != size * size {
            self.last.resize(
                size * size,
                Cell {
                    glyph: Glyph::Empty,
                    color: Color::Reset,
                },
            );
            self.needs_full = true;
        }

        out.queue(MoveTo(0, 0))?;
        if term_w < needed_w || term_h < needed_h {
            out.queue(Clear(ClearType::All))?;
            let msg = format!(
                "Terminal too small. Need at least {needed_w}x{needed_h} (cols x rows). Current: {term_w}x{term_h}."
            );
            out.queue(Print(msg))?;
            out.flush()?;
            self.needs_full = true;
            return Ok(());
        }

        let origin_x = (term_w - (size * CELL_W) as u16) / 2;
        let origin_y = (term_h - needed_h) / 2 + 1;
        if origin_x != self.origin_x || origin_y != self.origin_y {
            self.origin_x = origin_x;
            self.origin_y = origin_y;
            self.needs_full = true;
        }
        if game.phase() != self.last_phase {
            // Overlays from the previous phase have to be painted over.
            self.last_phase = game.phase();
            self.needs_full = true;
        }
        if self.needs_full {
            out.queue(Clear(ClearType::All))?;
        }

        // Clipped to the columns right of the board origin so it never wraps
        // onto board row 0, which the cell diff would not repaint.
        let room = usize::from(term_w - self.origin_x);
        let hud: String = format!(
            "Game {games_started}  Pellets: {}  arrows/hjkl r:restart q:quit",
            game.pellets_left()
        )
        .chars()
        .take(room)
        .collect();
        if self.needs_full || hud != self.last_hud {
            out.queue(MoveTo(self.origin_x, self.origin_y - 1))?;
            out.queue(SetForegroundColor(Color::White))?;
            out.queue(Clear(ClearType::CurrentLine))?;
            out.queue(Print(&hud))?;
            out.queue(ResetColor)?;
            self.last_hud = hud;
        }

        for pos in game.grid().positions() {
            let cell = cell_for(game, pos);
            let idx = pos.y * size + pos.x;
            if self.needs_full || cell != self.last[idx] {
                self.last[idx] = cell;
                self.draw_cell(out, pos, cell)?;
            }
        }

        match game.phase() {
            Phase::Playing => {}
            Phase::Lost => self.overlay(out, size, size / 2, GAME_OVER, Color::White)?,
            Phase::Won => {
                self.overlay(out, size, size / 2, WIN_TITLE, Color::Green)?;
                self.overlay(out, size, size + 1, WIN_CHOICES, Color::White)?;
            }
        }
        self.needs_full = false;

        out.flush()?;
        Ok(())
    }

    fn draw_cell(&self, out: &mut impl Write, pos: Pos, cell: Cell) -> io::Result<()> {
        let text = glyph_text(cell.glyph);
        let x_pos = self.origin_x + (pos.x * CELL_W) as u16;
        let y_pos = self.origin_y + pos.y as u16;
        out.queue(MoveTo(x_pos, y_pos))?;
        out.queue(SetForegroundColor(cell.color))?;
        out.queue(Print(text))?;
        let w = UnicodeWidthStr::width(text);
        if w < CELL_W {
            for _ in 0..(CELL_W - w) {
                out.queue(Print(' '))?;
            }
        }
        out.queue(ResetColor)?;
        Ok(())
    }

    /// Prints `msg` centred horizontally over the board on board row `row`.
    fn overlay(
        &self,
        out: &mut impl Write,
        size: usize,
        row: usize,
        msg: &str,
        color: Color,
    ) -> io::Result<()> {
        let board_w = size * CELL_W;
        let msg_w = UnicodeWidthStr::width(msg);
        let x = (self.origin_x as usize + board_w / 2).saturating_sub(msg_w / 2);
        out.queue(MoveTo(x as u16, self.origin_y + row as u16))?;
        out.queue(SetForegroundColor(color))?;
        out.queue(Print(msg))?;
        out.queue(ResetColor)?;
        Ok(())
    }
}
