//! A grid-of-cells raycasting shooter.
//!
//! The simulation (`core`) and the renderer (`render`) have no windowing
//! dependency; the `dot_doom` binary supplies a raylib window as the display
//! surface and keyboard source.
//!
//! `arcade` holds three smaller games (tower climber, brick breaker, dot
//! collector) that run on the same framebuffer, input and tick pieces.

pub mod arcade;
pub mod core;
pub mod render;

pub use crate::arcade::arcade_loop::{ArcadeEvent, ArcadeLoop};
pub use crate::arcade::{Arcade, ArcadeOutcome, Ending};
pub use crate::core::config::{ConfigError, GameConfig, GameKind};
pub use crate::core::game_loop::{GameLoop, LoopEvent, TickTimer};
pub use crate::core::input::{Command, InputHandler};
pub use crate::core::map::{MapError, TileMap};
pub use crate::core::session::{GameSession, SessionState, TickOutcome};
pub use crate::render::framebuffer::{Color, Framebuffer};
pub use crate::render::render3d::Renderer;
