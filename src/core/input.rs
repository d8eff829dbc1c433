//! Discrete game commands.
//!
//! Whatever produces raw key events (a window, a test, a replay) translates
//! them into [`Command`]s and hands them to an [`InputHandler`]. Commands are
//! applied as soon as they arrive; nothing is queued.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Forward,
    Backward,
    RotateLeft,
    RotateRight,
    Fire,
}

pub trait InputHandler {
    fn move_forward(&mut self);
    fn move_backward(&mut self);
    fn rotate_left(&mut self);
    fn rotate_right(&mut self);
    fn fire(&mut self);

    fn apply(&mut self, command: Command) {
        match command {
            Command::Forward => self.move_forward(),
            Command::Backward => self.move_backward(),
            Command::RotateLeft => self.rotate_left(),
            Command::RotateRight => self.rotate_right(),
            Command::Fire => self.fire(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<&'static str>);

    impl InputHandler for Recorder {
        fn move_forward(&mut self) { self.0.push("fwd"); }
        fn move_backward(&mut self) { self.0.push("back"); }
        fn rotate_left(&mut self) { self.0.push("left"); }
        fn rotate_right(&mut self) { self.0.push("right"); }
        fn fire(&mut self) { self.0.push("fire"); }
    }

    #[test]
    fn apply_dispatches_each_command() {
        let mut r = Recorder::default();
        for c in [
            Command::Fire,
            Command::Forward,
            Command::RotateLeft,
            Command::Backward,
            Command::RotateRight,
        ] {
            r.apply(c);
        }
        assert_eq!(r.0, ["fire", "fwd", "left", "back", "right"]);
    }
}
