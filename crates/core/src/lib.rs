pub mod content;
pub mod game;
pub mod mapgen;
pub mod save;
pub mod state;
pub mod types;

pub use game::Game;
pub use state::{GameState, Map};
pub use types::*;
