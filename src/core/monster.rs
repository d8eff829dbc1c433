//! Monsters, environment props, and the monster AI.
use rand::Rng;
use tracing::debug;

use crate::core::map::TileMap;
use crate::core::player::Player;

pub const SPAWN_ATTEMPTS: usize = 100;
pub const SPAWN_CLEARANCE: f32 = 2.0;
pub const CATCH_RADIUS: f32 = 0.5;
pub const CHASE_SPEED: f32 = 0.02;
pub const MIN_ALIVE: usize = 3;
pub const SHOT_CONE: f32 = 0.1;
pub const SHOT_RANGE: f32 = 5.0;

// normaliza ángulo a [-pi, pi]
#[inline]
pub fn normalize_angle(mut a: f32) -> f32 {
    while a > std::f32::consts::PI { a -= 2.0 * std::f32::consts::PI; }
    while a < -std::f32::consts::PI { a += 2.0 * std::f32::consts::PI; }
    a
}

/// Distance and bearing (relative to the player's facing) of a world point.
#[inline]
pub fn bearing_from(player: &Player, x: f32, y: f32) -> (f32, f32) {
    let dx = x - player.x;
    let dy = y - player.y;
    let dist = (dx * dx + dy * dy).sqrt();
    (dist, normalize_angle(dy.atan2(dx) - player.a))
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MonsterState { Alive, Dead }

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Monster {
    pub x: f32,
    pub y: f32,
    pub state: MonsterState,
}

impl Monster {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, state: MonsterState::Alive }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.state == MonsterState::Alive
    }

    /// One chase step towards `(px, py)`. Returns the distance measured before moving.
    fn chase(&mut self, px: f32, py: f32) -> f32 {
        let dx = px - self.x;
        let dy = py - self.y;
        let dist = (dx * dx + dy * dy).sqrt();
        if dist >= CATCH_RADIUS {
            self.x += dx / dist * CHASE_SPEED;
            self.y += dy / dist * CHASE_SPEED;
        }
        dist
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PropKind { Tree }

/// Static decoration drawn as an occludable billboard.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Prop {
    pub kind: PropKind,
    pub x: f32,
    pub y: f32,
}

impl Prop {
    pub fn tree(x: f32, y: f32) -> Self {
        Self { kind: PropKind::Tree, x, y }
    }
}

pub fn default_props() -> Vec<Prop> {
    vec![Prop::tree(5.0, 2.0), Prop::tree(12.0, 4.0), Prop::tree(16.0, 2.0)]
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MonsterUpdate {
    Moved { spawned: bool },
    CaughtPlayer { x: f32, y: f32 },
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ShotOutcome {
    Hit { distance: f32 },
    Miss,
}

#[derive(Clone, Debug, Default)]
pub struct Monsters {
    list: Vec<Monster>,
}

impl Monsters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Monster> {
        self.list.iter()
    }

    pub fn alive(&self) -> impl Iterator<Item = &Monster> {
        self.list.iter().filter(|m| m.is_alive())
    }

    pub fn alive_count(&self) -> usize {
        self.alive().count()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn push(&mut self, monster: Monster) {
        self.list.push(monster);
    }

    pub fn clear(&mut self) {
        self.list.clear();
    }

    /// Drops dead monsters; they take no further part in AI or rendering.
    pub fn compact(&mut self) {
        self.list.retain(Monster::is_alive);
    }

    /// Rejection-samples an open cell, at least `SPAWN_CLEARANCE` away from
    /// `avoid_near` when given. Gives up quietly after `SPAWN_ATTEMPTS` tries.
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        map: &TileMap,
        avoid_near: Option<(f32, f32)>,
        rng: &mut R,
    ) -> Option<(f32, f32)> {
        let hi_x = map.width() as f32 - 2.0;
        let hi_y = map.height() as f32 - 2.0;
        if hi_x < 1.0 || hi_y < 1.0 {
            debug!(width = map.width(), height = map.height(), "map too small to spawn");
            return None;
        }

        for _ in 0..SPAWN_ATTEMPTS {
            let x = rng.gen_range(1.0..=hi_x);
            let y = rng.gen_range(1.0..=hi_y);
            if !map.is_open_cell(x as usize, y as usize) {
                continue;
            }
            if let Some((px, py)) = avoid_near {
                let d = ((x - px).powi(2) + (y - py).powi(2)).sqrt();
                if d <= SPAWN_CLEARANCE {
                    continue;
                }
            }
            self.list.push(Monster::new(x, y));
            debug!(x, y, "monster spawned");
            return Some((x, y));
        }

        debug!("monster spawn gave up after {} attempts", SPAWN_ATTEMPTS);
        None
    }

    /// Moves every alive monster one step towards the player, then tops the
    /// pack back up to `MIN_ALIVE`. A monster within `CATCH_RADIUS` ends the
    /// update immediately.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        map: &TileMap,
        player: &Player,
        rng: &mut R,
    ) -> MonsterUpdate {
        self.compact();

        let (px, py) = player.pos();
        for m in self.list.iter_mut() {
            if m.chase(px, py) < CATCH_RADIUS {
                return MonsterUpdate::CaughtPlayer { x: m.x, y: m.y };
            }
        }

        let spawned = self.alive_count() < MIN_ALIVE
            && self.spawn(map, Some((px, py)), rng).is_some();
        MonsterUpdate::Moved { spawned }
    }

    /// Kills the first alive monster inside the aiming cone and range.
    pub fn shoot(&mut self, player: &Player) -> ShotOutcome {
        for m in self.list.iter_mut().filter(|m| m.is_alive()) {
            let (distance, deviation) = bearing_from(player, m.x, m.y);
            if deviation.abs() < SHOT_CONE && distance < SHOT_RANGE {
                m.state = MonsterState::Dead;
                return ShotOutcome::Hit { distance };
            }
        }
        ShotOutcome::Miss
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn normalize_wraps_into_pi_range() {
        let pi = std::f32::consts::PI;
        assert!((normalize_angle(3.0 * pi) - pi).abs() < 1e-5);
        assert!((normalize_angle(-2.5 * pi) + 0.5 * pi).abs() < 1e-5);
        assert_eq!(normalize_angle(0.3), 0.3);
    }

    #[test]
    fn spawn_lands_on_open_cells_away_from_player() {
        let map = TileMap::default_level();
        let mut r = rng();
        let mut monsters = Monsters::new();
        for _ in 0..200 {
            let (x, y) = monsters.spawn(&map, Some((3.0, 3.0)), &mut r).expect("spawn");
            assert!(map.is_open_cell(x as usize, y as usize));
            assert!(((x - 3.0).powi(2) + (y - 3.0).powi(2)).sqrt() > SPAWN_CLEARANCE);
        }
        assert_eq!(monsters.len(), 200);
    }

    #[test]
    fn spawn_gives_up_when_no_cell_qualifies() {
        let map = TileMap::from_rows(&["11111", "1...1", "1...1", "1...1", "11111"]).expect("map");
        let mut monsters = Monsters::new();
        // every sample lands within sqrt(2) of (2, 2)
        assert_eq!(monsters.spawn(&map, Some((2.0, 2.0)), &mut rng()), None);
        assert!(monsters.is_empty());

        // only the border row is open; samples never reach it
        let walled = TileMap::from_rows(&["1111", "1111", "...."]).expect("map");
        assert_eq!(monsters.spawn(&walled, None, &mut rng()), None);
    }

    #[test]
    fn update_moves_towards_player_at_fixed_speed() {
        let map = TileMap::default_level();
        let player = Player::spawn();
        let mut monsters = Monsters::new();
        monsters.push(Monster::new(7.0, 3.0));
        let out = monsters.update(&map, &player, &mut rng());
        assert!(matches!(out, MonsterUpdate::Moved { spawned: true }));
        let first = monsters.iter().next().expect("monster");
        assert!((first.x - (7.0 - CHASE_SPEED)).abs() < 1e-5);
        assert!((first.y - 3.0).abs() < 1e-6);
    }

    #[test]
    fn update_maintains_minimum_pressure() {
        let map = TileMap::default_level();
        let player = Player::spawn();
        let mut monsters = Monsters::new();
        let mut r = rng();
        for _ in 0..MIN_ALIVE {
            let out = monsters.update(&map, &player, &mut r);
            assert!(matches!(out, MonsterUpdate::Moved { .. }));
        }
        assert!(monsters.alive_count() >= MIN_ALIVE);

        let before = monsters.alive_count();
        monsters.update(&map, &player, &mut r);
        assert_eq!(monsters.alive_count(), before);
    }

    #[test]
    fn update_reports_catch_and_skips_spawn() {
        let map = TileMap::default_level();
        let player = Player::spawn();
        let mut monsters = Monsters::new();
        monsters.push(Monster::new(3.3, 3.0));
        let out = monsters.update(&map, &player, &mut rng());
        assert_eq!(out, MonsterUpdate::CaughtPlayer { x: 3.3, y: 3.0 });
        assert_eq!(monsters.len(), 1);
    }

    #[test]
    fn update_compacts_dead_monsters() {
        let map = TileMap::default_level();
        let player = Player::spawn();
        let mut monsters = Monsters::new();
        monsters.push(Monster::new(6.0, 3.0));
        monsters.push(Monster::new(10.0, 5.0));
        assert!(matches!(monsters.shoot(&player), ShotOutcome::Hit { .. }));
        assert_eq!(monsters.len(), 2);
        monsters.update(&map, &player, &mut rng());
        assert!(monsters.iter().all(Monster::is_alive));
    }

    #[test]
    fn shoot_hits_first_monster_in_cone() {
        let player = Player::spawn();
        let mut monsters = Monsters::new();
        monsters.push(Monster::new(3.0, 6.0)); // off to the side
        monsters.push(Monster::new(6.0, 3.1)); // deviation ~0.033 rad, 3.0 away
        monsters.push(Monster::new(7.0, 3.0)); // also in cone, further back
        match monsters.shoot(&player) {
            ShotOutcome::Hit { distance } => assert!((distance - 3.0).abs() < 0.01),
            ShotOutcome::Miss => panic!("expected a hit"),
        }
        let states: Vec<_> = monsters.iter().map(|m| m.state).collect();
        assert_eq!(states, [MonsterState::Alive, MonsterState::Dead, MonsterState::Alive]);
    }

    #[test]
    fn shoot_misses_outside_range_or_cone() {
        let player = Player::spawn();
        let mut monsters = Monsters::new();
        monsters.push(Monster::new(8.5, 3.0)); // 5.5 away
        monsters.push(Monster::new(5.0, 4.0)); // ~0.46 rad off
        assert_eq!(monsters.shoot(&player), ShotOutcome::Miss);
        assert_eq!(monsters.alive_count(), 2);
    }

    #[test]
    fn dead_monsters_are_not_shot_again() {
        let player = Player::spawn();
        let mut monsters = Monsters::new();
        monsters.push(Monster::new(5.0, 3.0));
        assert!(matches!(monsters.shoot(&player), ShotOutcome::Hit { .. }));
        assert_eq!(monsters.shoot(&player), ShotOutcome::Miss);
    }
}
