use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use dot_doom::arcade::tower::Tower;
use dot_doom::{ArcadeEvent, ArcadeLoop, Command, Ending, GameKind, arcade};

const TICK: Duration = Duration::from_millis(50);

#[test]
fn idle_tower_climber_stands_on_the_safe_floor() {
    let tower = Tower::new(StdRng::seed_from_u64(12));
    let mut game = ArcadeLoop::new(Box::new(tower), TICK, 40, 80);

    for _ in 0..200 {
        assert_ne!(game.advance(TICK), ArcadeEvent::Idle);
    }
    assert!(!game.is_halted());

    game.apply(Command::Fire);
    game.advance(TICK);
    let status = game.game.status_text();
    assert!(status.starts_with("Score: "), "{status}");
}

#[test]
fn unattended_dot_collector_eventually_loses() {
    let game = arcade::build(GameKind::Dots, StdRng::seed_from_u64(31)).expect("dots");
    let mut game = ArcadeLoop::new(game, TICK, 40, 80);

    let mut ending = None;
    for _ in 0..2000 {
        if let ArcadeEvent::Finished(end) = game.advance(TICK) {
            ending = Some(end);
            break;
        }
    }
    let ending = ending.expect("a dot reached the floor or the paddle");
    assert!(matches!(ending, Ending::Lost(_)), "{ending:?}");
    assert!(game.is_halted());

    // halted: steering is ignored until restart
    game.apply(Command::RotateLeft);
    assert_eq!(game.advance(TICK * 100), ArcadeEvent::Idle);
    game.restart();
    assert_eq!(game.game.status_text(), "Collected: 0");
    assert_eq!(game.advance(TICK), ArcadeEvent::Ticked(1));
}
