//! Rendering into an owned grid of cells.
//!
//! Re-exports:
//! - `framebuffer`: Cell grid and flat colors
//! - `casters`: Fixed-step ray march
//! - `render3d`: Column renderer (walls, scene) and `Renderer`
//! - `sprites`: Billboard projection, occlusion and the crosshair

pub mod framebuffer;
pub mod casters;
pub mod render3d;
pub mod sprites;
