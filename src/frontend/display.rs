use raylib::prelude::*;

use dot_doom::{Ending, Framebuffer};

pub const STATUS_BAR_PX: i32 = 32;

#[inline]
fn to_raylib(c: dot_doom::Color) -> Color {
    Color::new(c.r, c.g, c.b, 255)
}

/// Each cell becomes a `cell_px` square, like a grid of dots.
pub fn draw_frame(d: &mut impl RaylibDraw, fb: &Framebuffer, cell_px: i32) {
    for (y, row) in fb.rows().enumerate() {
        for (x, &cell) in row.iter().enumerate() {
            d.draw_rectangle(x as i32 * cell_px, y as i32 * cell_px, cell_px, cell_px, to_raylib(cell));
        }
    }
}

pub fn draw_status(d: &mut impl RaylibDraw, text: &str, top: i32) {
    d.draw_text(text, 10, top + 8, 20, Color::WHITE);
}

pub fn draw_game_over(d: &mut impl RaylibDraw, kills: u32, ask_restart: bool, width: i32, height: i32) {
    let detail = format!("Monsters Defeated: {kills}");
    draw_prompt(d, "Game Over! You were killed by a monster.", Color::RED, &detail, ask_restart, width, height);
}

pub fn draw_ending(d: &mut impl RaylibDraw, ending: Ending, status: &str, ask_restart: bool, width: i32, height: i32) {
    let color = match ending {
        Ending::Won(_) => Color::GREEN,
        Ending::Lost(_) => Color::RED,
    };
    draw_prompt(d, ending.message(), color, status, ask_restart, width, height);
}

fn draw_prompt(
    d: &mut impl RaylibDraw,
    title: &str,
    title_color: Color,
    detail: &str,
    ask_restart: bool,
    width: i32,
    height: i32,
) {
    d.draw_rectangle(0, 0, width, height, Color::new(0, 0, 0, 180));
    let cy = height / 2;
    d.draw_text(title, 20, cy - 50, 24, title_color);
    d.draw_text(detail, 20, cy - 16, 20, Color::WHITE);
    if ask_restart {
        d.draw_text("Do you want to restart the game? [Y]es / [N]o", 20, cy + 16, 20, Color::LIGHTGRAY);
    } else {
        d.draw_text("Press Esc to quit.", 20, cy + 16, 20, Color::GRAY);
    }
}
