//! Side games that share the shooter's framebuffer, input and tick seams.
//!
//! Re-exports:
//! - `tower`: Platform climber with gravity and a falling tower
//! - `bricks`: Paddle-and-ball brick breaker
//! - `dots`: Catch the good dots a bouncing monster drops, dodge the bad ones
//! - `arcade_loop`: Fixed-tick driver for any `Arcade`

pub mod tower;
pub mod bricks;
pub mod dots;
pub mod arcade_loop;

use std::time::Duration;

use rand::rngs::StdRng;

use crate::core::config::GameKind;
use crate::core::input::InputHandler;
use crate::render::framebuffer::{Color, Framebuffer};

/// How a finished game ended, with the message shown to the player.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Ending {
    Won(&'static str),
    Lost(&'static str),
}

impl Ending {
    pub fn message(&self) -> &'static str {
        match self {
            Ending::Won(m) | Ending::Lost(m) => m,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ArcadeOutcome {
    Continue,
    Finished(Ending),
}

/// A tick-driven game drawn into a `Framebuffer`. Left/right rotation keys
/// steer, forward and fire are the action key.
pub trait Arcade: InputHandler {
    fn tick(&mut self) -> ArcadeOutcome;

    /// Wall-clock timers that run independently of ticks.
    fn elapse(&mut self, _dt: Duration) {}

    fn draw(&self, fb: &mut Framebuffer);

    fn status_text(&self) -> String;

    fn reset(&mut self);
}

/// `None` for the raycaster, which has its own loop.
pub fn build(kind: GameKind, rng: StdRng) -> Option<Box<dyn Arcade>> {
    match kind {
        GameKind::Raycaster => None,
        GameKind::Tower => Some(Box::new(tower::Tower::new(rng))),
        GameKind::Bricks => Some(Box::new(bricks::Bricks::new(rng))),
        GameKind::Dots => Some(Box::new(dots::Dots::new(rng))),
    }
}

/// Fills the cells covered by a world-space rectangle on a `field_w x field_h`
/// playfield. Anything on the field covers at least one cell.
pub(crate) fn fill_world_rect(
    fb: &mut Framebuffer,
    (field_w, field_h): (f32, f32),
    (x, y): (f32, f32),
    (w, h): (f32, f32),
    color: Color,
) {
    let sx = fb.width as f32 / field_w;
    let sy = fb.height as f32 / field_h;
    let x0 = (x * sx).floor() as i32;
    let y0 = (y * sy).floor() as i32;
    let x1 = (((x + w) * sx).ceil() as i32).max(x0 + 1);
    let y1 = (((y + h) * sy).ceil() as i32).max(y0 + 1);
    fb.fill_rect(x0, y0, x1, y1, color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn world_rects_scale_onto_the_grid() {
        let mut fb = Framebuffer::new(40, 80);
        // 400x800 field: 10 world units per cell
        fill_world_rect(&mut fb, (400.0, 800.0), (100.0, 700.0), (100.0, 20.0), Color::WHITE);
        assert_eq!(fb.get_pixel(10, 70), Color::WHITE);
        assert_eq!(fb.get_pixel(19, 71), Color::WHITE);
        assert_eq!(fb.get_pixel(20, 70), Color::BLACK);
        assert_eq!(fb.get_pixel(10, 72), Color::BLACK);

        // tiny objects still show up
        fill_world_rect(&mut fb, (400.0, 800.0), (3.0, 3.0), (1.0, 1.0), Color::RED);
        assert_eq!(fb.get_pixel(0, 0), Color::RED);
    }

    #[test]
    fn build_picks_the_configured_game() {
        let rng = || StdRng::seed_from_u64(1);
        assert!(build(GameKind::Raycaster, rng()).is_none());
        for kind in [GameKind::Tower, GameKind::Bricks, GameKind::Dots] {
            let game = build(kind, rng()).expect("arcade game");
            assert!(!game.status_text().is_empty());
        }
    }
}
