//! Grid maze-chase game: a random maze with guaranteed connectivity, a
//! player eating pellets, and ghosts on a random walk.

pub mod components;
pub mod config;
pub mod connectivity;
pub mod controller;
pub mod error;
pub mod game;
pub mod ghost;
pub mod level;
pub mod player;
pub mod render;
pub mod terminal;

pub use components::{Direction, GhostTag, Phase, Pos, Tile};
pub use config::{GameConfig, RunConfig};
pub use error::{GameError, GameResult};
pub use game::GameState;
pub use ghost::Ghost;
pub use level::Grid;
pub use player::Player;
