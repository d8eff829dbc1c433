//! Tower climber: hop between platforms. After the first few landings the
//! tower starts falling, faster with every jump.
//!
//! World units, y grows downward, the playfield is `FIELD_W x FIELD_H`.
use rand::Rng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::arcade::{Arcade, ArcadeOutcome, Ending, fill_world_rect};
use crate::core::input::InputHandler;
use crate::render::framebuffer::{Color, Framebuffer};

pub const FIELD_W: f32 = 400.0;
pub const FIELD_H: f32 = 800.0;

pub const GRAVITY: f32 = 1.0;
pub const JUMP_VELOCITY: f32 = -20.0;
pub const MOVE_STEP: f32 = 20.0;

pub const CLIMBER_W: f32 = 50.0;
pub const CLIMBER_H: f32 = 50.0;
pub const PLATFORM_W: f32 = 100.0;
pub const PLATFORM_H: f32 = 10.0;
pub const PLATFORM_SPACING: f32 = 150.0;

pub const BASE_FALL_SPEED: f32 = 5.0;
pub const FALL_SPEED_INCREMENT: f32 = 1.0;
/// Landings before the tower starts to fall.
pub const SAFE_LANDINGS: u32 = 3;

/// Lowest the climber can stand while the safe floor holds.
pub const SAFE_LINE: f32 = FIELD_H - CLIMBER_H;
/// Climbing above this scrolls the tower down instead.
pub const SCROLL_LINE: f32 = FIELD_H / 3.0;

const FELL_OFF: &str = "Game Over! You fell off the tower.";

pub const BACKDROP: Color = Color::new(20, 20, 40);
pub const PLATFORM: Color = Color::new(150, 150, 150);
pub const CLIMBER: Color = Color::new(255, 200, 0);

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Platform {
    pub x: f32,
    pub y: f32,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Climber {
    pub x: f32,
    pub y: f32,
    pub vy: f32,
}

pub struct Tower {
    pub climber: Climber,
    pub platforms: Vec<Platform>,
    on_platform: bool,
    landings: u32,
    fall_speed: f32,
    score: u32,
    ending: Option<Ending>,
    rng: StdRng,
}

impl Tower {
    pub fn new(rng: StdRng) -> Self {
        let mut tower = Self {
            climber: Climber { x: 0.0, y: 0.0, vy: 0.0 },
            platforms: Vec::new(),
            on_platform: false,
            landings: 0,
            fall_speed: BASE_FALL_SPEED,
            score: 0,
            ending: None,
            rng,
        };
        tower.start();
        tower
    }

    fn start(&mut self) {
        self.climber = Climber { x: (FIELD_W - CLIMBER_W) / 2.0, y: SAFE_LINE, vy: 0.0 };
        self.on_platform = false;
        self.landings = 0;
        self.fall_speed = BASE_FALL_SPEED;
        self.score = 0;
        self.ending = None;

        self.platforms.clear();
        self.add_platform(FIELD_H);
        let mut y = FIELD_H - PLATFORM_SPACING;
        while y > 0.0 {
            self.add_platform(y);
            y -= PLATFORM_SPACING;
        }
        info!(platforms = self.platforms.len(), "tower started");
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[inline]
    pub fn landings(&self) -> u32 {
        self.landings
    }

    #[inline]
    pub fn fall_speed(&self) -> f32 {
        self.fall_speed
    }

    #[inline]
    pub fn is_falling(&self) -> bool {
        self.landings >= SAFE_LANDINGS
    }

    fn add_platform(&mut self, y: f32) {
        let x = self.rng.gen_range(0..=(FIELD_W - PLATFORM_W) as u32) as f32;
        self.platforms.push(Platform { x, y });
    }

    /// Adds platforms above the highest one until the top of the field is covered.
    fn refill(&mut self) {
        let mut top = self
            .platforms
            .iter()
            .map(|p| p.y)
            .reduce(f32::min)
            .unwrap_or(0.0);
        while top > 0.0 {
            top -= PLATFORM_SPACING;
            self.add_platform(top);
        }
    }

    /// Snaps the climber onto the first platform it dropped through this tick.
    fn land(&mut self, previous_y: f32, new_y: f32) {
        let center = self.climber.x + CLIMBER_W / 2.0;
        for p in &self.platforms {
            if center < p.x || center > p.x + PLATFORM_W {
                continue;
            }
            if previous_y + CLIMBER_H <= p.y && new_y + CLIMBER_H >= p.y {
                self.climber.y = p.y - CLIMBER_H;
                self.climber.vy = 0.0;
                if !self.on_platform {
                    self.landings += 1;
                    debug!(landings = self.landings, y = p.y, "landed");
                }
                self.on_platform = true;
                self.fall_speed = BASE_FALL_SPEED;
                self.score = self.score.max((FIELD_H - p.y).max(0.0) as u32);
                break;
            }
            self.on_platform = false;
        }
    }

    fn finish(&mut self, ending: Ending) -> ArcadeOutcome {
        self.ending = Some(ending);
        info!(score = self.score, message = ending.message(), "tower finished");
        ArcadeOutcome::Finished(ending)
    }

    /// Only from a platform or the safe floor. Once the tower is falling every
    /// jump speeds it up.
    pub fn jump(&mut self) {
        if self.ending.is_some() {
            return;
        }
        if self.on_platform || self.climber.y >= SAFE_LINE {
            if self.is_falling() {
                self.fall_speed += FALL_SPEED_INCREMENT;
            }
            self.climber.vy = JUMP_VELOCITY;
            self.on_platform = false;
        }
    }

    pub fn shift(&mut self, dx: f32) {
        if self.ending.is_some() {
            return;
        }
        self.climber.x = (self.climber.x + dx).clamp(0.0, FIELD_W - CLIMBER_W);
    }
}

impl Arcade for Tower {
    fn tick(&mut self) -> ArcadeOutcome {
        if let Some(ending) = self.ending {
            return ArcadeOutcome::Finished(ending);
        }

        self.climber.vy += GRAVITY;
        let previous_y = self.climber.y;
        let new_y = previous_y + self.climber.vy;
        self.climber.y = new_y;
        if self.climber.vy > 0.0 {
            self.land(previous_y, new_y);
        }

        if !self.is_falling() {
            if new_y > SAFE_LINE {
                self.climber.y = SAFE_LINE;
                self.climber.vy = 0.0;
            }
        } else {
            let fall = self.fall_speed;
            for p in &mut self.platforms {
                p.y += fall;
            }
            if self.on_platform {
                self.climber.y += fall;
            }
            if self.climber.y > FIELD_H {
                return self.finish(Ending::Lost(FELL_OFF));
            }
            self.platforms.retain(|p| p.y <= FIELD_H);
            self.refill();
        }

        if new_y < SCROLL_LINE {
            let delta = SCROLL_LINE - new_y;
            self.climber.y = SCROLL_LINE;
            for p in &mut self.platforms {
                p.y += delta;
            }
            self.score += delta as u32;
            self.refill();
        }
        ArcadeOutcome::Continue
    }

    fn draw(&self, fb: &mut Framebuffer) {
        let field = (FIELD_W, FIELD_H);
        fb.set_background_color(BACKDROP);
        fb.clear();
        for p in &self.platforms {
            fill_world_rect(fb, field, (p.x, p.y), (PLATFORM_W, PLATFORM_H), PLATFORM);
        }
        let c = &self.climber;
        fill_world_rect(fb, field, (c.x, c.y), (CLIMBER_W, CLIMBER_H), CLIMBER);
    }

    fn status_text(&self) -> String {
        format!("Score: {}", self.score)
    }

    fn reset(&mut self) {
        self.start();
    }
}

impl InputHandler for Tower {
    fn move_forward(&mut self) {
        self.jump();
    }

    fn move_backward(&mut self) {}

    fn rotate_left(&mut self) {
        self.shift(-MOVE_STEP);
    }

    fn rotate_right(&mut self) {
        self.shift(MOVE_STEP);
    }

    fn fire(&mut self) {
        self.jump();
    }
}
