//! Dot collector: a monster bounces along the top dropping dots. Catch every
//! good dot with the paddle and let the bad ones fall past.
use std::time::Duration;

use rand::Rng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::arcade::{Arcade, ArcadeOutcome, Ending, fill_world_rect};
use crate::core::input::InputHandler;
use crate::render::framebuffer::{Color, Framebuffer};

pub const FIELD_W: f32 = 400.0;
pub const FIELD_H: f32 = 800.0;

pub const PADDLE_W: f32 = 100.0;
pub const PADDLE_H: f32 = 20.0;
pub const PADDLE_Y: f32 = 700.0;
const PADDLE_START_X: f32 = 100.0;
pub const MOVE_STEP: f32 = 20.0;

pub const MONSTER_Y: f32 = 50.0;
const MONSTER_START_X: f32 = 125.0;
pub const MONSTER_SPEED: f32 = 7.0;
const MONSTER_PX: (f32, f32) = (40.0, 20.0);

pub const DOT_SPEED: f32 = 5.0;
const DOT_PX: f32 = 10.0;
pub const DROP_DELAY_MS: std::ops::RangeInclusive<u64> = 500..=1500;
pub const GOOD_DOT_CHANCE: f64 = 0.8;

const HIT_BAD_DOT: &str = "You hit a bad dot!";
const MISSED_GOOD_DOT: &str = "You missed a good dot!";

pub const BACKDROP: Color = Color::new(60, 60, 60);
pub const PADDLE: Color = Color::new(0, 120, 255);
pub const MONSTER: Color = Color::new(180, 0, 0);
pub const GOOD_DOT: Color = Color::WHITE;
pub const BAD_DOT: Color = Color::BLACK;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DotKind {
    Good,
    Bad,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Dot {
    pub x: f32,
    pub y: f32,
    pub kind: DotKind,
}

pub struct Dots {
    pub paddle_x: f32,
    pub monster_x: f32,
    monster_dx: f32,
    pub dots: Vec<Dot>,
    collected: u32,
    next_drop: Duration,
    ending: Option<Ending>,
    rng: StdRng,
}

impl Dots {
    pub fn new(rng: StdRng) -> Self {
        let mut game = Self {
            paddle_x: PADDLE_START_X,
            monster_x: MONSTER_START_X,
            monster_dx: MONSTER_SPEED,
            dots: Vec::new(),
            collected: 0,
            next_drop: Duration::ZERO,
            ending: None,
            rng,
        };
        game.start();
        game
    }

    fn start(&mut self) {
        self.paddle_x = PADDLE_START_X;
        self.monster_x = MONSTER_START_X;
        self.monster_dx = MONSTER_SPEED;
        self.dots.clear();
        self.collected = 0;
        self.ending = None;
        self.next_drop = self.roll_drop_delay();
        info!(first_drop_ms = self.next_drop.as_millis() as u64, "dots started");
    }

    #[inline]
    pub fn collected(&self) -> u32 {
        self.collected
    }

    #[inline]
    pub fn next_drop(&self) -> Duration {
        self.next_drop
    }

    fn roll_drop_delay(&mut self) -> Duration {
        Duration::from_millis(self.rng.gen_range(DROP_DELAY_MS))
    }

    /// Drops a dot from the monster's current position.
    pub fn drop_dot(&mut self) {
        let kind = if self.rng.gen_bool(GOOD_DOT_CHANCE) { DotKind::Good } else { DotKind::Bad };
        self.dots.push(Dot { x: self.monster_x, y: MONSTER_Y, kind });
        debug!(x = self.monster_x, ?kind, "dot dropped");
    }

    fn finish(&mut self, ending: Ending) -> ArcadeOutcome {
        self.ending = Some(ending);
        self.dots.clear();
        info!(collected = self.collected, message = ending.message(), "dots finished");
        ArcadeOutcome::Finished(ending)
    }

    pub fn shift(&mut self, dx: f32) {
        if self.ending.is_some() {
            return;
        }
        self.paddle_x = (self.paddle_x + dx).clamp(0.0, FIELD_W - PADDLE_W);
    }
}

#[inline]
fn paddle_catches(paddle_x: f32, x: f32, y: f32) -> bool {
    x >= paddle_x && x <= paddle_x + PADDLE_W && y >= PADDLE_Y && y <= PADDLE_Y + PADDLE_H
}

impl Arcade for Dots {
    fn tick(&mut self) -> ArcadeOutcome {
        if let Some(ending) = self.ending {
            return ArcadeOutcome::Finished(ending);
        }

        let mut x = self.monster_x + self.monster_dx;
        if x <= 0.0 {
            x = 0.0;
            self.monster_dx = self.monster_dx.abs();
        } else if x >= FIELD_W {
            x = FIELD_W;
            self.monster_dx = -self.monster_dx.abs();
        }
        self.monster_x = x;

        let paddle_x = self.paddle_x;
        let mut caught = 0;
        let mut ending = None;
        self.dots.retain_mut(|dot| {
            dot.y += DOT_SPEED;
            if paddle_catches(paddle_x, dot.x, dot.y) {
                match dot.kind {
                    DotKind::Good => caught += 1,
                    DotKind::Bad => {
                        ending.get_or_insert(Ending::Lost(HIT_BAD_DOT));
                    }
                }
                return false;
            }
            if dot.y >= FIELD_H {
                if dot.kind == DotKind::Good {
                    ending.get_or_insert(Ending::Lost(MISSED_GOOD_DOT));
                }
                return false;
            }
            true
        });
        self.collected += caught;

        match ending {
            Some(ending) => self.finish(ending),
            None => ArcadeOutcome::Continue,
        }
    }

    /// Runs the drop timer; each drop schedules the next one 0.5 to 1.5 s out.
    fn elapse(&mut self, dt: Duration) {
        if self.ending.is_some() {
            return;
        }
        let mut dt = dt;
        while dt >= self.next_drop {
            dt -= self.next_drop;
            self.drop_dot();
            self.next_drop = self.roll_drop_delay();
        }
        self.next_drop -= dt;
    }

    fn draw(&self, fb: &mut Framebuffer) {
        let field = (FIELD_W, FIELD_H);
        fb.set_background_color(BACKDROP);
        fb.clear();
        let (mw, mh) = MONSTER_PX;
        fill_world_rect(fb, field, (self.monster_x - mw / 2.0, MONSTER_Y - mh), (mw, mh), MONSTER);
        for dot in &self.dots {
            let color = match dot.kind {
                DotKind::Good => GOOD_DOT,
                DotKind::Bad => BAD_DOT,
            };
            let half = DOT_PX / 2.0;
            fill_world_rect(fb, field, (dot.x - half, dot.y - half), (DOT_PX, DOT_PX), color);
        }
        fill_world_rect(fb, field, (self.paddle_x, PADDLE_Y), (PADDLE_W, PADDLE_H), PADDLE);
    }

    fn status_text(&self) -> String {
        format!("Collected: {}", self.collected)
    }

    fn reset(&mut self) {
        self.start();
    }
}

impl InputHandler for Dots {
    fn move_forward(&mut self) {}

    fn move_backward(&mut self) {}

    fn rotate_left(&mut self) {
        self.shift(-MOVE_STEP);
    }

    fn rotate_right(&mut self) {
        self.shift(MOVE_STEP);
    }

    fn fire(&mut self) {}
}
