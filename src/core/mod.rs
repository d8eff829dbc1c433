//! Core game types and logic (map, player, monsters, session, tick loop).
//!
//! Re-exports:
//! - `map`: Tile map loading and wall queries
//! - `player`: Player pose and movement
//! - `monster`: Monsters, props and the chase AI
//! - `input`: Discrete commands and the `InputHandler` seam
//! - `session`: One play-through, score and lifecycle
//! - `game_loop`: Fixed-period tick timer and driver
//! - `config`: Runtime configuration

pub mod map;
pub mod player;
pub mod monster;
pub mod input;
pub mod session;
pub mod game_loop;
pub mod config;
