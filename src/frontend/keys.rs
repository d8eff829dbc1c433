use raylib::prelude::*;

use dot_doom::Command;

const BINDINGS: [(KeyboardKey, Command); 9] = [
    (KeyboardKey::KEY_UP, Command::Forward),
    (KeyboardKey::KEY_W, Command::Forward),
    (KeyboardKey::KEY_DOWN, Command::Backward),
    (KeyboardKey::KEY_S, Command::Backward),
    (KeyboardKey::KEY_LEFT, Command::RotateLeft),
    (KeyboardKey::KEY_A, Command::RotateLeft),
    (KeyboardKey::KEY_RIGHT, Command::RotateRight),
    (KeyboardKey::KEY_D, Command::RotateRight),
    (KeyboardKey::KEY_SPACE, Command::Fire),
];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PromptAnswer {
    Yes,
    No,
}

/// Commands whose keys went down this frame, in binding order.
pub fn poll_commands(rl: &RaylibHandle) -> Vec<Command> {
    BINDINGS
        .iter()
        .filter(|(key, _)| rl.is_key_pressed(*key))
        .map(|&(_, c)| c)
        .collect()
}

pub fn poll_prompt(rl: &RaylibHandle) -> Option<PromptAnswer> {
    if rl.is_key_pressed(KeyboardKey::KEY_Y) || rl.is_key_pressed(KeyboardKey::KEY_ENTER) {
        Some(PromptAnswer::Yes)
    } else if rl.is_key_pressed(KeyboardKey::KEY_N) {
        Some(PromptAnswer::No)
    } else {
        None
    }
}
