//! One play-through: map, player, monsters, score.
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::core::input::InputHandler;
use crate::core::map::TileMap;
use crate::core::monster::{self, MonsterUpdate, Monsters, Prop, ShotOutcome};
use crate::core::player::Player;

pub const AIM_FLASH: Duration = Duration::from_millis(100);
pub const STARTING_MONSTERS: usize = 3;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    Running,
    GameOver { kills: u32 },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    GameOver { kills: u32 },
}

/// Aim indicator; turns red for `AIM_FLASH` after every shot.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Crosshair {
    flash_remaining: Duration,
}

impl Crosshair {
    pub fn fired(&mut self) {
        self.flash_remaining = AIM_FLASH;
    }

    pub fn elapse(&mut self, dt: Duration) {
        self.flash_remaining = self.flash_remaining.saturating_sub(dt);
    }

    #[inline]
    pub fn is_flashing(&self) -> bool {
        !self.flash_remaining.is_zero()
    }
}

pub struct GameSession {
    pub map: TileMap,
    pub player: Player,
    pub monsters: Monsters,
    pub props: Vec<Prop>,
    kills: u32,
    crosshair: Crosshair,
    state: SessionState,
    rng: StdRng,
}

impl GameSession {
    pub fn new(map: TileMap, rng: StdRng) -> Self {
        let mut session = Self {
            player: Player::spawn_on(&map),
            map,
            monsters: Monsters::new(),
            props: monster::default_props(),
            kills: 0,
            crosshair: Crosshair::default(),
            state: SessionState::Running,
            rng,
        };
        session.populate();
        info!(monsters = session.monsters.alive_count(), "session started");
        session
    }

    pub fn with_seed(map: TileMap, seed: u64) -> Self {
        Self::new(map, StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(map: TileMap) -> Self {
        Self::new(map, StdRng::from_entropy())
    }

    fn populate(&mut self) {
        let avoid = Some(self.player.pos());
        for _ in 0..STARTING_MONSTERS {
            self.monsters.spawn(&self.map, avoid, &mut self.rng);
        }
    }

    #[inline]
    pub fn kills(&self) -> u32 {
        self.kills
    }

    #[inline]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    #[inline]
    pub fn crosshair(&self) -> &Crosshair {
        &self.crosshair
    }

    pub fn status_text(&self) -> String {
        format!("Monsters Defeated: {}", self.kills)
    }

    /// Advances the monsters by one step. Once the player is caught the
    /// session stays halted and further ticks are no-ops.
    pub fn tick(&mut self) -> TickOutcome {
        if let SessionState::GameOver { kills } = self.state {
            return TickOutcome::GameOver { kills };
        }
        match self.monsters.update(&self.map, &self.player, &mut self.rng) {
            MonsterUpdate::Moved { .. } => TickOutcome::Continue,
            MonsterUpdate::CaughtPlayer { x, y } => {
                let kills = self.kills;
                self.state = SessionState::GameOver { kills };
                info!(kills, x, y, "player caught by a monster");
                TickOutcome::GameOver { kills }
            }
        }
    }

    /// Hit: +1 kill. Miss: -1 kill, never below zero.
    pub fn shoot(&mut self) -> ShotOutcome {
        let outcome = self.monsters.shoot(&self.player);
        match outcome {
            ShotOutcome::Hit { distance } => {
                self.kills += 1;
                debug!(distance, kills = self.kills, "shot hit");
            }
            ShotOutcome::Miss => {
                self.kills = self.kills.saturating_sub(1);
                debug!(kills = self.kills, "shot missed");
            }
        }
        self.crosshair.fired();
        outcome
    }

    pub fn elapse(&mut self, dt: Duration) {
        self.crosshair.elapse(dt);
    }

    pub fn reset(&mut self) {
        self.player = Player::spawn_on(&self.map);
        self.kills = 0;
        self.crosshair = Crosshair::default();
        self.monsters.clear();
        self.populate();
        self.state = SessionState::Running;
        info!(monsters = self.monsters.alive_count(), "session reset");
    }
}

// Input is ignored while the session is halted.
impl InputHandler for GameSession {
    fn move_forward(&mut self) {
        if self.is_running() {
            self.player.move_forward(&self.map);
        }
    }

    fn move_backward(&mut self) {
        if self.is_running() {
            self.player.move_backward(&self.map);
        }
    }

    fn rotate_left(&mut self) {
        if self.is_running() {
            self.player.rotate_left();
        }
    }

    fn rotate_right(&mut self) {
        if self.is_running() {
            self.player.rotate_right();
        }
    }

    fn fire(&mut self) {
        if self.is_running() {
            self.shoot();
        }
    }
}
