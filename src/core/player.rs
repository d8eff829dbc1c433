use crate::core::map::TileMap;

pub const SPAWN_X: f32 = 3.0;
pub const SPAWN_Y: f32 = 3.0;
pub const FOV: f32 = std::f32::consts::FRAC_PI_4;
pub const MOVE_STEP: f32 = 0.5;
pub const TURN_STEP: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub a: f32,   // facing (radians), 0 looks along +x
    pub fov: f32,
}

impl Player {
    pub fn new(x: f32, y: f32, angle: f32) -> Self {
        Self { x, y, a: angle, fov: FOV }
    }

    pub fn spawn() -> Self {
        Self::new(SPAWN_X, SPAWN_Y, 0.0)
    }

    /// The usual spawn pose when it is open on `map`, otherwise the centre of
    /// the map's first open cell.
    pub fn spawn_on(map: &TileMap) -> Self {
        if !map.is_wall(SPAWN_X, SPAWN_Y) {
            return Self::spawn();
        }
        match map.first_open_cell() {
            Some((col, row)) => Self::new(col as f32 + 0.5, row as f32 + 0.5, 0.0),
            None => Self::spawn(),
        }
    }

    #[inline]
    pub fn pos(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn move_forward(&mut self, map: &TileMap) -> bool {
        self.step(map, MOVE_STEP)
    }

    pub fn move_backward(&mut self, map: &TileMap) -> bool {
        self.step(map, -MOVE_STEP)
    }

    pub fn rotate_left(&mut self) {
        self.a -= TURN_STEP;
    }

    pub fn rotate_right(&mut self) {
        self.a += TURN_STEP;
    }

    /// Steps along the facing vector; a step that would land inside a wall is dropped.
    fn step(&mut self, map: &TileMap, dist: f32) -> bool {
        let nx = self.x + self.a.cos() * dist;
        let ny = self.y + self.a.sin() * dist;
        if map.is_wall(nx, ny) {
            return false;
        }
        self.x = nx;
        self.y = ny;
        true
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::spawn()
    }
}
