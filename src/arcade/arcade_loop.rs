//! Fixed-tick driver for the side games: tick, then redraw, once per period.
use std::time::Duration;

use tracing::{info, trace};

use crate::arcade::{Arcade, ArcadeOutcome, Ending};
use crate::core::game_loop::TickTimer;
use crate::core::input::Command;
use crate::render::framebuffer::Framebuffer;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ArcadeEvent {
    Idle,
    Ticked(u32),
    Finished(Ending),
}

pub struct ArcadeLoop {
    pub game: Box<dyn Arcade>,
    timer: TickTimer,
    fb: Framebuffer,
}

impl ArcadeLoop {
    pub fn new(game: Box<dyn Arcade>, period: Duration, width: u32, height: u32) -> Self {
        let mut fb = Framebuffer::new(width, height);
        game.draw(&mut fb);
        Self { game, timer: TickTimer::new(period), fb }
    }

    #[inline]
    pub fn frame(&self) -> &Framebuffer {
        &self.fb
    }

    #[inline]
    pub fn is_halted(&self) -> bool {
        !self.timer.is_running()
    }

    /// Feeds elapsed time; runs whatever ticks fell due. The timer stops when
    /// the game finishes, and that event is reported exactly once.
    pub fn advance(&mut self, dt: Duration) -> ArcadeEvent {
        if self.is_halted() {
            return ArcadeEvent::Idle;
        }
        self.game.elapse(dt);
        let due = self.timer.advance(dt);
        for _ in 0..due {
            let outcome = self.game.tick();
            self.game.draw(&mut self.fb);
            trace!(?outcome, "arcade tick");
            if let ArcadeOutcome::Finished(ending) = outcome {
                self.timer.stop();
                info!(message = ending.message(), "arcade game finished, tick timer stopped");
                return ArcadeEvent::Finished(ending);
            }
        }
        if due == 0 { ArcadeEvent::Idle } else { ArcadeEvent::Ticked(due) }
    }

    /// Ignored while halted.
    pub fn apply(&mut self, command: Command) {
        if !self.is_halted() {
            self.game.apply(command);
        }
    }

    pub fn restart(&mut self) {
        self.game.reset();
        self.timer.start();
        self.game.draw(&mut self.fb);
    }
}
