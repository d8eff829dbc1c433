//! Brick breaker: keep the ball off the floor with the paddle, clear every brick.
use rand::Rng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::arcade::{Arcade, ArcadeOutcome, Ending, fill_world_rect};
use crate::core::input::InputHandler;
use crate::render::framebuffer::{Color, Framebuffer};

pub const FIELD_W: f32 = 800.0;
pub const FIELD_H: f32 = 380.0;

pub const PADDLE_W: f32 = 100.0;
pub const PADDLE_H: f32 = 20.0;
pub const PADDLE_Y: f32 = 300.0;
const PADDLE_START_X: f32 = 150.0;
pub const MOVE_STEP: f32 = 20.0;

pub const BRICK_W: f32 = 80.0;
pub const BRICK_H: f32 = 40.0;
const BRICK_GAP: f32 = 10.0;
const BRICK_ROWS: usize = 3;
const BRICK_COLS: usize = 8;
const BRICKS_ORIGIN: (f32, f32) = (50.0, 50.0);

const BALL_START: (f32, f32) = (200.0, 280.0);
pub const BALL_SPEED: f32 = 5.0;
const BALL_PX: f32 = 8.0;

const CLEARED: &str = "Congratulations";
const DROPPED: &str = "Game Over";

pub const BACKDROP: Color = Color::new(10, 10, 30);
pub const PADDLE: Color = Color::new(200, 200, 200);
pub const BALL: Color = Color::WHITE;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Brick {
    pub x: f32,
    pub y: f32,
    pub color: Color,
}

impl Brick {
    pub fn new(x: f32, y: f32, color: Color) -> Self {
        Self { x, y, color }
    }

    /// Edges included.
    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + BRICK_W && y >= self.y && y <= self.y + BRICK_H
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ball {
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
}

pub struct Bricks {
    pub paddle_x: f32,
    pub ball: Ball,
    pub bricks: Vec<Brick>,
    ending: Option<Ending>,
    rng: StdRng,
}

impl Bricks {
    pub fn new(rng: StdRng) -> Self {
        let mut game = Self {
            paddle_x: PADDLE_START_X,
            ball: Ball { x: BALL_START.0, y: BALL_START.1, dx: BALL_SPEED, dy: -BALL_SPEED },
            bricks: Vec::with_capacity(BRICK_ROWS * BRICK_COLS),
            ending: None,
            rng,
        };
        game.start();
        game
    }

    fn start(&mut self) {
        self.paddle_x = PADDLE_START_X;
        self.ball = Ball { x: BALL_START.0, y: BALL_START.1, dx: BALL_SPEED, dy: -BALL_SPEED };
        self.ending = None;

        self.bricks.clear();
        let (x0, y0) = BRICKS_ORIGIN;
        for row in 0..BRICK_ROWS {
            for col in 0..BRICK_COLS {
                let color = Color::new(self.rng.r#gen(), self.rng.r#gen(), self.rng.r#gen());
                self.bricks.push(Brick::new(
                    x0 + col as f32 * (BRICK_W + BRICK_GAP),
                    y0 + row as f32 * (BRICK_H + BRICK_GAP),
                    color,
                ));
            }
        }
        info!(bricks = self.bricks.len(), "bricks started");
    }

    #[inline]
    fn paddle_contains(&self, x: f32, y: f32) -> bool {
        x >= self.paddle_x && x <= self.paddle_x + PADDLE_W && y >= PADDLE_Y && y <= PADDLE_Y + PADDLE_H
    }

    fn finish(&mut self, ending: Ending) -> ArcadeOutcome {
        self.ending = Some(ending);
        info!(bricks_left = self.bricks.len(), message = ending.message(), "bricks finished");
        ArcadeOutcome::Finished(ending)
    }

    pub fn shift(&mut self, dx: f32) {
        if self.ending.is_some() {
            return;
        }
        self.paddle_x = (self.paddle_x + dx).clamp(0.0, FIELD_W - PADDLE_W);
    }
}

impl Arcade for Bricks {
    fn tick(&mut self) -> ArcadeOutcome {
        if let Some(ending) = self.ending {
            return ArcadeOutcome::Finished(ending);
        }

        let mut x = self.ball.x + self.ball.dx;
        let mut y = self.ball.y + self.ball.dy;

        if x <= 0.0 {
            x = 0.0;
            self.ball.dx = self.ball.dx.abs();
        } else if x >= FIELD_W {
            x = FIELD_W;
            self.ball.dx = -self.ball.dx.abs();
        }
        if y <= 0.0 {
            y = 0.0;
            self.ball.dy = self.ball.dy.abs();
        }
        if y >= FIELD_H {
            return self.finish(Ending::Lost(DROPPED));
        }

        if self.paddle_contains(x, y) {
            self.ball.dy = -self.ball.dy.abs();
            y = PADDLE_Y - 1.0;
        }

        let before = self.bricks.len();
        self.bricks.retain(|b| !b.contains(x, y));
        if self.bricks.len() < before {
            self.ball.dy = self.ball.dy.abs();
            debug!(hit = before - self.bricks.len(), left = self.bricks.len(), "brick hit");
        }
        if self.bricks.is_empty() {
            return self.finish(Ending::Won(CLEARED));
        }

        self.ball.x = x;
        self.ball.y = y;
        ArcadeOutcome::Continue
    }

    fn draw(&self, fb: &mut Framebuffer) {
        let field = (FIELD_W, FIELD_H);
        fb.set_background_color(BACKDROP);
        fb.clear();
        for b in &self.bricks {
            fill_world_rect(fb, field, (b.x, b.y), (BRICK_W, BRICK_H), b.color);
        }
        fill_world_rect(fb, field, (self.paddle_x, PADDLE_Y), (PADDLE_W, PADDLE_H), PADDLE);
        let half = BALL_PX / 2.0;
        fill_world_rect(fb, field, (self.ball.x - half, self.ball.y - half), (BALL_PX, BALL_PX), BALL);
    }

    fn status_text(&self) -> String {
        format!("Bricks left: {}", self.bricks.len())
    }

    fn reset(&mut self) {
        self.start();
    }
}

impl InputHandler for Bricks {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::Command;
    use rand::SeedableRng;

    fn bricks() -> Bricks {
        Bricks::new(StdRng::seed_from_u64(3))
    }

    fn ball(x: f32, y: f32, dx: f32, dy: f32) -> Ball {
        Ball { x, y, dx, dy }
    }

    #[test]
    fn lays_out_three_rows_of_eight() {
        let g = bricks();
        assert_eq!(g.bricks.len(), 24);
        assert_eq!((g.bricks[0].x, g.bricks[0].y), (50.0, 50.0));
        assert_eq!((g.bricks[9].x, g.bricks[9].y), (140.0, 100.0));
        assert_eq!((g.bricks[23].x, g.bricks[23].y), (680.0, 150.0));
        assert_eq!(g.ball, ball(200.0, 280.0, BALL_SPEED, -BALL_SPEED));
        assert_eq!(g.status_text(), "Bricks left: 24");
    }

    #[test]
    fn bounces_off_side_and_top_walls() {
        let mut g = bricks();
        g.ball = ball(3.0, 200.0, -5.0, 5.0);
        g.tick();
        assert_eq!(g.ball, ball(0.0, 205.0, 5.0, 5.0));

        g.ball = ball(798.0, 200.0, 5.0, 5.0);
        g.tick();
        assert_eq!(g.ball, ball(FIELD_W, 205.0, -5.0, 5.0));

        g.ball = ball(20.0, 2.0, 5.0, -5.0);
        g.tick();
        assert_eq!(g.ball, ball(25.0, 0.0, 5.0, 5.0));
    }

    #[test]
    fn paddle_sends_the_ball_back_up() {
        let mut g = bricks();
        g.ball = ball(200.0, 296.0, 5.0, 5.0);
        g.tick();
        assert_eq!(g.ball, ball(205.0, PADDLE_Y - 1.0, 5.0, -5.0));
    }

    #[test]
    fn hitting_a_brick_removes_it_and_turns_the_ball_down() {
        let mut g = bricks();
        // bottom edge of the first brick in row 2
        g.ball = ball(60.0, 195.0, 0.0, -5.0);
        g.tick();
        assert_eq!(g.bricks.len(), 23);
        assert!(g.bricks.iter().all(|b| !(b.x == 50.0 && b.y == 150.0)));
        assert_eq!(g.ball, ball(60.0, 190.0, 0.0, 5.0));
        assert_eq!(g.status_text(), "Bricks left: 23");
    }

    #[test]
    fn last_brick_wins() {
        let mut g = bricks();
        g.bricks = vec![Brick::new(50.0, 150.0, Color::RED)];
        g.ball = ball(60.0, 195.0, 0.0, -5.0);
        assert_eq!(g.tick(), ArcadeOutcome::Finished(Ending::Won(CLEARED)));
    }

    #[test]
    fn ball_past_the_floor_loses() {
        let mut g = bricks();
        g.ball = ball(600.0, 378.0, 5.0, 5.0);
        assert_eq!(g.tick(), ArcadeOutcome::Finished(Ending::Lost(DROPPED)));
        assert_eq!(g.ball.y, 378.0);

        g.apply(Command::RotateRight);
        assert_eq!(g.paddle_x, PADDLE_START_X);

        g.reset();
        assert_eq!(g.tick(), ArcadeOutcome::Continue);
        assert_eq!(g.bricks.len(), 24);
    }

    #[test]
    fn paddle_steers_within_the_field() {
        let mut g = bricks();
        g.apply(Command::RotateLeft);
        assert_eq!(g.paddle_x, PADDLE_START_X - MOVE_STEP);
        for _ in 0..100 {
            g.apply(Command::RotateLeft);
        }
        assert_eq!(g.paddle_x, 0.0);
        g.apply(Command::Fire);
        g.apply(Command::Forward);
        assert_eq!(g.paddle_x, 0.0);
    }

    #[test]
    fn draws_bricks_paddle_and_ball() {
        let g = bricks();
        let mut fb = Framebuffer::new(80, 38);
        g.draw(&mut fb);
        // 10 world units per cell
        assert_eq!(fb.get_pixel(6, 6), g.bricks[0].color);
        assert_eq!(fb.get_pixel(16, 30), PADDLE);
        assert_eq!(fb.get_pixel(20, 28), BALL);
        assert_eq!(fb.get_pixel(78, 36), BACKDROP);
    }
}
