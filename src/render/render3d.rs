//! Column renderer: flat sky/wall/floor bands, then billboards and crosshair.
use crate::core::map::TileMap;
use crate::core::player::Player;
use crate::core::session::GameSession;
use crate::render::casters::cast_ray;
use crate::render::framebuffer::{Color, Framebuffer};
use crate::render::sprites::{self, Billboard};

pub const SKY: Color = Color::new(0, 0, 10);
pub const WALL: Color = Color::new(40, 40, 40);
pub const FLOOR: Color = Color::new(10, 5, 0);

/// Keeps the height projection finite at zero distance.
pub const DEPTH_EPSILON: f32 = 0.0001;

#[inline]
pub fn column_angle(player: &Player, column: u32, width: u32) -> f32 {
    player.a - player.fov / 2.0 + (column as f32 / width as f32) * player.fov
}

/// Screen height of something `distance` away, clamped to the screen.
#[inline]
pub fn projected_height(distance: f32, screen_h: u32) -> u32 {
    ((screen_h as f32 / (distance + DEPTH_EPSILON)) as u32).min(screen_h)
}

/// Casts one ray per column, paints the sky/wall/floor bands and records each
/// column's wall distance into `wall_distances`.
pub fn render_walls(fb: &mut Framebuffer, map: &TileMap, player: &Player, wall_distances: &mut [f32]) {
    let (w, h) = (fb.width, fb.height);
    for (col, z) in (0..w).zip(wall_distances.iter_mut()) {
        let d = cast_ray(map, player.x, player.y, column_angle(player, col, w));
        *z = d;

        let wall_h = projected_height(d, h);
        let top = (h - wall_h) / 2;
        let bottom = top + wall_h;

        fb.fill_column(col, 0, top, SKY);
        fb.fill_column(col, top, bottom, WALL);
        fb.fill_column(col, bottom, h, FLOOR);
    }
}

/// Owns the frame and the per-column wall distances of the last render.
pub struct Renderer {
    fb: Framebuffer,
    wall_distances: Vec<f32>,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            fb: Framebuffer::new(width, height),
            wall_distances: vec![f32::INFINITY; width as usize],
        }
    }

    #[inline]
    pub fn frame(&self) -> &Framebuffer {
        &self.fb
    }

    #[inline]
    pub fn wall_distances(&self) -> &[f32] {
        &self.wall_distances
    }

    /// Full redraw. Props go first and monsters second, so at equal depth a
    /// monster covers a prop.
    pub fn render(&mut self, session: &GameSession) -> &Framebuffer {
        let player = &session.player;
        self.fb.clear();
        render_walls(&mut self.fb, &session.map, player, &mut self.wall_distances);

        let z = &self.wall_distances;
        for prop in &session.props {
            sprites::draw_billboard(&mut self.fb, player, z, prop.x, prop.y, Billboard::from(prop.kind));
        }
        for m in session.monsters.alive() {
            sprites::draw_billboard(&mut self.fb, player, z, m.x, m.y, Billboard::Monster);
        }

        let aim = if session.crosshair().is_flashing() {
            sprites::CROSSHAIR_FIRED
        } else {
            sprites::CROSSHAIR
        };
        sprites::draw_crosshair(&mut self.fb, aim);
        &self.fb
    }
}
