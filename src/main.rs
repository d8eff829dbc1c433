// main.rs
mod frontend;

use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use raylib::prelude::*;
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use dot_doom::{
    Arcade, ArcadeEvent, ArcadeLoop, Command, ConfigError, Ending, GameConfig, GameLoop, GameSession,
    LoopEvent, MapError,
};
use frontend::audio::AudioManager;
use frontend::display::{self, STATUS_BAR_PX};
use frontend::keys::{self, PromptAnswer};

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to load map: {0}")]
    Map(#[from] MapError),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

/// Window geometry in pixels: the cell grid with the status bar beneath it.
struct Screen {
    cell_px: i32,
    grid_w: i32,
    grid_h: i32,
}

impl Screen {
    // sizes are capped by `GameConfig` validation, so these fit in i32
    fn new(config: &GameConfig) -> Self {
        let cell_px = config.cell_px as i32;
        Self {
            cell_px,
            grid_w: config.grid_width as i32 * cell_px,
            grid_h: config.grid_height as i32 * cell_px,
        }
    }

    fn open(&self, title: &str) -> (RaylibHandle, RaylibThread) {
        let (mut window, thread) = raylib::init()
            .size(self.grid_w, self.grid_h + STATUS_BAR_PX)
            .title(title)
            .build();
        window.set_target_fps(60);
        (window, thread)
    }
}

fn open_audio(config: &GameConfig) -> Option<AudioManager> {
    if !config.audio {
        return None;
    }
    AudioManager::new().map(|mut a| {
        a.load_sfx_auto();
        a
    })
}

/// Handles the restart prompt while it is up. Returns true when the player
/// chose to restart; "no" closes the prompt and leaves the game halted.
fn answer_prompt(window: &RaylibHandle, prompt_open: &mut bool) -> bool {
    if !*prompt_open {
        return false;
    }
    match keys::poll_prompt(window) {
        Some(PromptAnswer::Yes) => {
            *prompt_open = false;
            true
        }
        Some(PromptAnswer::No) => {
            info!("restart declined");
            *prompt_open = false;
            false
        }
        None => false,
    }
}

fn run_shooter(config: &GameConfig) -> Result<(), AppError> {
    let map = config.load_map()?;
    info!(width = map.width(), height = map.height(), seed = ?config.seed, "map ready");

    let session = match config.seed {
        Some(seed) => GameSession::with_seed(map, seed),
        None => GameSession::from_entropy(map),
    };
    let mut game = GameLoop::new(session, config.tick_period(), config.grid_width, config.grid_height);

    let screen = Screen::new(config);
    let (mut window, raylib_thread) = screen.open("Dot Doom");
    let audio = open_audio(config);

    let mut prompt_open = false;
    let mut last_frame = Instant::now();

    while !window.window_should_close() {
        let now = Instant::now();
        let dt = now - last_frame;
        last_frame = now;

        if game.is_halted() {
            if answer_prompt(&window, &mut prompt_open) {
                game.restart();
            }
        } else {
            for command in keys::poll_commands(&window) {
                let kills_before = game.session.kills();
                game.apply(command);
                if command == Command::Fire {
                    if let Some(a) = &audio {
                        a.play_fire();
                        if game.session.kills() > kills_before {
                            a.play_kill();
                        }
                    }
                }
            }
            if let LoopEvent::GameOver { .. } = game.advance(dt) {
                prompt_open = true;
                if let Some(a) = &audio {
                    a.play_player_caught();
                }
            }
        }

        let status = game.session.status_text();
        let halted = game.is_halted();
        let kills = game.session.kills();

        let mut d = window.begin_drawing(&raylib_thread);
        d.clear_background(Color::BLACK);
        display::draw_frame(&mut d, game.frame(), screen.cell_px);
        display::draw_status(&mut d, &status, screen.grid_h);
        if halted {
            display::draw_game_over(&mut d, kills, prompt_open, screen.grid_w, screen.grid_h);
        }
    }

    info!(kills = game.session.kills(), "window closed");
    Ok(())
}

fn run_arcade(config: &GameConfig, game: Box<dyn Arcade>) -> Result<(), AppError> {
    let mut arcade = ArcadeLoop::new(game, config.tick_period(), config.grid_width, config.grid_height);

    let screen = Screen::new(config);
    let (mut window, raylib_thread) = screen.open("Dot Doom Arcade");
    let audio = open_audio(config);

    let mut prompt_open = false;
    let mut ending: Option<Ending> = None;
    let mut last_frame = Instant::now();

    while !window.window_should_close() {
        let now = Instant::now();
        let dt = now - last_frame;
        last_frame = now;

        if arcade.is_halted() {
            if answer_prompt(&window, &mut prompt_open) {
                arcade.restart();
                ending = None;
            }
        } else {
            for command in keys::poll_commands(&window) {
                arcade.apply(command);
            }
            if let ArcadeEvent::Finished(end) = arcade.advance(dt) {
                prompt_open = true;
                ending = Some(end);
                if let (Ending::Lost(_), Some(a)) = (end, &audio) {
                    a.play_player_caught();
                }
            }
        }

        let status = arcade.game.status_text();

        let mut d = window.begin_drawing(&raylib_thread);
        d.clear_background(Color::BLACK);
        display::draw_frame(&mut d, arcade.frame(), screen.cell_px);
        display::draw_status(&mut d, &status, screen.grid_h);
        if let Some(end) = ending {
            display::draw_ending(&mut d, end, &status, prompt_open, screen.grid_w, screen.grid_h);
        }
    }

    info!(status = %arcade.game.status_text(), "window closed");
    Ok(())
}

fn run() -> Result<(), AppError> {
    let config = GameConfig::resolve()?;
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    match dot_doom::arcade::build(config.game, rng) {
        Some(game) => {
            info!(game = ?config.game, "starting arcade game");
            run_arcade(&config, game)
        }
        None => run_shooter(&config),
    }
}

fn main() {
    init_tracing();
    info!("=== Dot Doom ===");
    if let Err(err) = run() {
        error!("{err}");
        std::process::exit(1);
    }
}
