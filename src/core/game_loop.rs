//! Fixed-tick driver: update monsters, then render, once per period.
use std::time::Duration;

use tracing::{info, trace};

use crate::core::input::{Command, InputHandler};
use crate::core::session::{GameSession, TickOutcome};
use crate::render::framebuffer::Framebuffer;
use crate::render::render3d::Renderer;

/// Most ticks a single `advance` will run; any backlog beyond that is dropped.
pub const MAX_CATCH_UP: u32 = 5;

/// Repeating fixed-period timer fed with elapsed wall-clock time.
#[derive(Debug, Clone)]
pub struct TickTimer {
    period: Duration,
    accumulated: Duration,
    running: bool,
}

impl TickTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            accumulated: Duration::ZERO,
            running: true,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        self.running = true;
        self.accumulated = Duration::ZERO;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.accumulated = Duration::ZERO;
    }

    /// Number of ticks that fell due during `dt`.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if !self.running {
            return 0;
        }
        self.accumulated += dt;
        let due = self.accumulated.as_nanos() / self.period.as_nanos();
        if due > MAX_CATCH_UP as u128 {
            self.accumulated = Duration::ZERO;
            return MAX_CATCH_UP;
        }
        let due = due as u32;
        self.accumulated -= self.period * due;
        due
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoopEvent {
    Idle,
    Ticked(u32),
    GameOver { kills: u32 },
}

pub struct GameLoop {
    pub session: GameSession,
    timer: TickTimer,
    renderer: Renderer,
}

impl GameLoop {
    pub fn new(session: GameSession, period: Duration, width: u32, height: u32) -> Self {
        let mut game = Self {
            session,
            timer: TickTimer::new(period),
            renderer: Renderer::new(width, height),
        };
        game.renderer.render(&game.session);
        game
    }

    #[inline]
    pub fn frame(&self) -> &Framebuffer {
        self.renderer.frame()
    }

    #[inline]
    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    #[inline]
    pub fn is_halted(&self) -> bool {
        !self.timer.is_running()
    }

    /// One tick: monsters first, then a full redraw.
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.session.tick();
        self.renderer.render(&self.session);
        trace!(?outcome, "tick");
        outcome
    }

    /// Feeds elapsed time; runs whatever ticks fell due. The timer stops on
    /// Game Over, and that event is reported exactly once.
    pub fn advance(&mut self, dt: Duration) -> LoopEvent {
        self.session.elapse(dt);
        let due = self.timer.advance(dt);
        for _ in 0..due {
            if let TickOutcome::GameOver { kills } = self.tick() {
                self.timer.stop();
                info!(kills, "game over, tick timer stopped");
                return LoopEvent::GameOver { kills };
            }
        }
        if due == 0 { LoopEvent::Idle } else { LoopEvent::Ticked(due) }
    }

    pub fn apply(&mut self, command: Command) {
        self.session.apply(command);
    }

    pub fn restart(&mut self) {
        self.session.reset();
        self.timer.start();
        self.renderer.render(&self.session);
    }
}
