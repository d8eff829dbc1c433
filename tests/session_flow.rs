use std::time::Duration;

use dot_doom::core::monster::{MIN_ALIVE, Monster};
use dot_doom::render::casters::cast_ray;
use dot_doom::{
    Command, GameConfig, GameLoop, GameSession, InputHandler, LoopEvent, SessionState, TickOutcome, TileMap,
};

const TICK: Duration = Duration::from_millis(50);

fn lone_monster_session(seed: u64, monster_x: f32) -> GameSession {
    let mut session = GameSession::with_seed(TileMap::default_level(), seed);
    session.monsters.clear();
    session.monsters.push(Monster::new(monster_x, 3.0));
    session
}

#[test]
fn stationary_player_is_caught_when_distance_drops_below_half() {
    // 1.01 away, closing 0.02 per tick: 0.51 before tick 26, 0.49 before tick 27
    let mut session = lone_monster_session(11, 4.01);
    for tick in 1..=26 {
        assert_eq!(session.tick(), TickOutcome::Continue, "tick {tick}");
    }
    assert_eq!(session.tick(), TickOutcome::GameOver { kills: 0 });
    assert_eq!(session.state(), SessionState::GameOver { kills: 0 });
}

#[test]
fn game_loop_halts_on_game_over_and_restarts() {
    let session = lone_monster_session(5, 4.01);
    let mut game = GameLoop::new(session, TICK, 80, 60);

    let mut ticks = 0;
    let kills = loop {
        match game.advance(TICK) {
            LoopEvent::Ticked(n) => ticks += n,
            LoopEvent::GameOver { kills } => break kills,
            LoopEvent::Idle => panic!("a full period should always tick"),
        }
        assert!(ticks < 100, "monster never arrived");
    };
    assert_eq!(ticks, 26);
    assert_eq!(kills, 0);
    assert!(game.is_halted());

    // halted: time passes, nothing happens
    assert_eq!(game.advance(TICK * 10), LoopEvent::Idle);

    game.restart();
    assert!(!game.is_halted());
    assert!(game.session.is_running());
    assert_eq!(game.session.kills(), 0);
    assert_eq!(game.session.monsters.alive_count(), 3);
    assert_eq!(game.advance(TICK), LoopEvent::Ticked(1));
}

#[test]
fn shooting_the_approaching_monster_scores_and_keeps_pressure() {
    let mut session = lone_monster_session(21, 7.0);
    session.apply(Command::Fire);
    assert_eq!(session.kills(), 1);
    assert_eq!(session.status_text(), "Monsters Defeated: 1");

    for _ in 0..3 {
        assert_eq!(session.tick(), TickOutcome::Continue);
    }
    assert!(session.monsters.alive_count() >= MIN_ALIVE);
    assert!(session.monsters.iter().all(Monster::is_alive));

    session.monsters.clear();
    session.fire();
    assert_eq!(session.kills(), 0);
}

#[test]
fn pressure_never_drops_below_minimum_while_running() {
    let mut session = GameSession::with_seed(TileMap::default_level(), 99);
    let map = session.map.clone();
    for _ in 0..40 {
        if session.tick() != TickOutcome::Continue {
            break;
        }
        assert!(session.monsters.alive_count() >= MIN_ALIVE);
        for m in session.monsters.iter() {
            assert!(!map.is_wall(m.x, m.y));
        }
        session.rotate_right();
    }
}

#[test]
fn loaded_map_without_usual_spawn_keeps_player_in_open_space() {
    let dir = tempfile::TempDir::new().expect("temp dir");
    let path = dir.path().join("corridor.txt");
    std::fs::write(&path, "11111\n1...1\n11111\n").expect("write map");
    let config = GameConfig { map_path: Some(path), seed: Some(4), ..GameConfig::default() };

    let map = config.load_map().expect("map");
    let mut session = GameSession::with_seed(map, 4);
    assert!(!session.map.is_wall(session.player.x, session.player.y));
    assert!(cast_ray(&session.map, session.player.x, session.player.y, session.player.a) > 2.0);

    for command in [
        Command::Forward,
        Command::Backward,
        Command::RotateLeft,
        Command::Forward,
        Command::Backward,
        Command::RotateRight,
        Command::RotateRight,
        Command::Forward,
        Command::Backward,
    ] {
        let before = session.player.pos();
        session.apply(command);
        assert!(!session.map.is_wall(session.player.x, session.player.y), "{command:?}");
        if command == Command::Forward {
            assert_ne!(session.player.pos(), before, "forward step was blocked");
        }
    }
}
