//! Billboard sprites (trees, monsters) and the crosshair.
//!
//! Occlusion is per column: a sprite is drawn only when it is nearer than the
//! wall recorded for the column it projects onto.
use crate::core::monster::{PropKind, bearing_from};
use crate::core::player::Player;
use crate::render::framebuffer::{Color, Framebuffer};
use crate::render::render3d::projected_height;

pub const CANOPY: Color = Color::new(0, 200, 0);
pub const TRUNK: Color = Color::new(120, 50, 0);
pub const SKIN: Color = Color::new(255, 220, 177);
pub const TORSO: Color = Color::new(180, 0, 0);
pub const LEGS: Color = Color::new(50, 0, 0);
pub const OUTLINE: Color = Color::BLACK;
pub const CROSSHAIR: Color = Color::WHITE;
pub const CROSSHAIR_FIRED: Color = Color::RED;

const TREE_COLUMNS: i32 = 2;
const MONSTER_COLUMNS: i32 = 3;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Billboard {
    Tree,
    Monster,
}

impl From<PropKind> for Billboard {
    fn from(kind: PropKind) -> Self {
        match kind {
            PropKind::Tree => Billboard::Tree,
        }
    }
}

/// Where a world point lands on screen.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projection {
    pub column: u32,
    pub distance: f32,
    pub height: u32,
    pub top: u32,
}

/// `None` when the point is outside the field of view.
pub fn project(player: &Player, width: u32, height: u32, x: f32, y: f32) -> Option<Projection> {
    let (distance, diff) = bearing_from(player, x, y);
    let half_fov = player.fov / 2.0;
    if diff.abs() >= half_fov {
        return None;
    }
    let column = ((diff + half_fov) / player.fov * width as f32) as i32;
    if column < 0 || column >= width as i32 {
        return None;
    }
    let h = projected_height(distance, height);
    Some(Projection {
        column: column as u32,
        distance,
        height: h,
        top: (height - h) / 2,
    })
}

#[inline]
pub fn is_visible(p: &Projection, wall_distances: &[f32]) -> bool {
    wall_distances
        .get(p.column as usize)
        .is_some_and(|&wall| p.distance < wall)
}

/// Projects, occlusion-tests and draws one billboard. Returns whether it was drawn.
pub fn draw_billboard(
    fb: &mut Framebuffer,
    player: &Player,
    wall_distances: &[f32],
    x: f32,
    y: f32,
    kind: Billboard,
) -> bool {
    let Some(p) = project(player, fb.width, fb.height, x, y) else {
        return false;
    };
    if !is_visible(&p, wall_distances) {
        return false;
    }
    match kind {
        Billboard::Tree => draw_tree(fb, &p),
        Billboard::Monster => draw_monster(fb, &p),
    }
    true
}

/// Columns `[center - n/2, center - n/2 + n)` clipped to the screen, paired
/// with their offset from the left edge of the sprite.
fn sprite_columns(screen_w: u32, center: u32, n: i32) -> impl Iterator<Item = (u32, i32)> {
    let left = center as i32 - n / 2;
    (left.max(0)..(left + n).min(screen_w as i32)).map(move |c| (c as u32, c - left))
}

/// Two columns: canopy over the top half, trunk below.
pub fn draw_tree(fb: &mut Framebuffer, p: &Projection) {
    let split = p.top + p.height / 2;
    let bottom = p.top + p.height;
    for (col, _) in sprite_columns(fb.width, p.column, TREE_COLUMNS) {
        for row in p.top..bottom {
            let color = if row < split { CANOPY } else { TRUNK };
            fb.set_pixel_color(col, row, color);
        }
    }
}

/// Three columns banded head / torso / legs by relative height, with
/// alternating outline columns.
pub fn draw_monster(fb: &mut Framebuffer, p: &Projection) {
    if p.height == 0 {
        return;
    }
    let bottom = p.top + p.height;
    for (col, offset) in sprite_columns(fb.width, p.column, MONSTER_COLUMNS) {
        let stripe = offset % 2 == 0;
        for row in p.top..bottom {
            let rel = (row - p.top) as f32 / p.height as f32;
            let color = if rel < 0.2 {
                if col == p.column { SKIN } else { OUTLINE }
            } else if rel < 0.7 {
                if stripe { TORSO } else { OUTLINE }
            } else if stripe {
                LEGS
            } else {
                OUTLINE
            };
            fb.set_pixel_color(col, row, color);
        }
    }
}

/// Five-cell plus at the screen centre.
pub fn draw_crosshair(fb: &mut Framebuffer, color: Color) {
    let (cx, cy) = (fb.width as i64 / 2, fb.height as i64 / 2);
    for (x, y) in [(cx, cy), (cx, cy - 1), (cx, cy + 1), (cx - 1, cy), (cx + 1, cy)] {
        if x >= 0 && y >= 0 {
            fb.set_pixel_color(x as u32, y as u32, color);
        }
    }
}
