/// Flat cell color.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const RED: Color = Color::new(255, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Grid of display cells, overwritten in full every frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Framebuffer {
    pub color_buffer: Vec<Color>,
    pub width: u32,
    pub height: u32,
    pub background_color: Color,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let bg = Color::BLACK;
        Self {
            color_buffer: vec![bg; width as usize * height as usize],
            width,
            height,
            background_color: bg,
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.color_buffer.fill(self.background_color);
    }

    #[inline]
    pub fn set_pixel_color(&mut self, x: u32, y: u32, color: Color) {
        if x < self.width && y < self.height {
            self.color_buffer[(y * self.width + x) as usize] = color;
        }
    }

    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Color {
        if x < self.width && y < self.height {
            return self.color_buffer[(y * self.width + x) as usize];
        }
        self.background_color
    }

    #[inline] pub fn set_background_color(&mut self, c: Color) { self.background_color = c; }

    /// Fills rows `y0..y1` of column `x`.
    pub fn fill_column(&mut self, x: u32, y0: u32, y1: u32, color: Color) {
        for y in y0..y1.min(self.height) {
            self.set_pixel_color(x, y, color);
        }
    }

    /// Fills `[x0, x1) x [y0, y1)`, clipped to the grid.
    pub fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let (w, h) = (self.width as i32, self.height as i32);
        for y in y0.max(0)..y1.min(h) {
            for x in x0.max(0)..x1.min(w) {
                self.color_buffer[(y * w + x) as usize] = color;
            }
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        self.color_buffer.chunks(self.width.max(1) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_writes_are_ignored() {
        let mut fb = Framebuffer::new(4, 3);
        fb.set_pixel_color(4, 0, Color::RED);
        fb.set_pixel_color(0, 3, Color::RED);
        assert!(fb.color_buffer.iter().all(|&c| c == Color::BLACK));
        assert_eq!(fb.get_pixel(9, 9), fb.background_color);
    }

    #[test]
    fn fill_column_and_clear() {
        let mut fb = Framebuffer::new(4, 3);
        fb.fill_column(2, 1, 10, Color::WHITE);
        let rows: Vec<_> = fb.rows().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0][2], Color::BLACK);
        assert_eq!(rows[1][2], Color::WHITE);
        assert_eq!(rows[2][2], Color::WHITE);
        fb.set_background_color(Color::new(1, 2, 3));
        fb.clear();
        assert!(fb.color_buffer.iter().all(|&c| c == Color::new(1, 2, 3)));
    }

    #[test]
    fn fill_rect_clips_to_grid() {
        let mut fb = Framebuffer::new(4, 3);
        fb.fill_rect(-2, 2, 2, 9, Color::RED);
        let lit: Vec<_> = (0..3)
            .flat_map(|y| (0..4).map(move |x| (x, y)))
            .filter(|&(x, y)| fb.get_pixel(x, y) == Color::RED)
            .collect();
        assert_eq!(lit, [(0, 2), (1, 2)]);
    }
}
