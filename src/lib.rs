//! **labyrinth** is a maze carving and traversal library.
//!
//! The `generators` module carves perfect mazes (exactly one route between
//! any two cells) onto a rectangular `SquareGrid` with a randomized
//! depth first search. The `game` module owns a carved grid and runs the
//! player's move/win state machine over it.

pub mod cells;
pub mod errors;
pub mod game;
pub mod generators;
pub mod grid;
pub mod pathing;
pub mod units;
mod utils;
