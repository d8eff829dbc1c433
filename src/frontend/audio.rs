use std::io::Cursor;
use std::sync::Arc;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use tracing::{debug, warn};

fn load_bytes_any(paths: &[&str]) -> Option<Arc<Vec<u8>>> {
    paths.iter().find_map(|p| std::fs::read(p).ok()).map(Arc::new)
}

/// Sound cues for shots, kills and the player being caught. Missing files
/// just mean silence for that cue.
pub struct AudioManager {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sfx_sink: Sink,
    fire: Option<Arc<Vec<u8>>>,
    kill: Option<Arc<Vec<u8>>>,
    caught: Option<Arc<Vec<u8>>>,
    fire_volume: f32,
}

impl AudioManager {
    /// `None` when there is no usable output device.
    pub fn new() -> Option<Self> {
        let (_stream, handle) = match OutputStream::try_default() {
            Ok(pair) => pair,
            Err(err) => {
                warn!("audio disabled: {err}");
                return None;
            }
        };
        let sfx_sink = Sink::try_new(&handle).ok()?;
        Some(Self {
            _stream,
            handle,
            sfx_sink,
            fire: None,
            kill: None,
            caught: None,
            fire_volume: 0.65,
        })
    }

    pub fn load_sfx_auto(&mut self) {
        self.fire = load_bytes_any(&[
            "assets/sfx_fire.wav",
            "assets/sounds/fire.wav",
            "assets/sounds/shot.wav",
        ]);
        self.kill = load_bytes_any(&[
            "assets/sfx_kill.wav",
            "assets/sounds/kill.wav",
            "assets/sounds/monster_death.wav",
        ]);
        self.caught = load_bytes_any(&[
            "assets/sfx_player_caught.wav",
            "assets/sounds/caught.wav",
            "assets/sounds/caught.mp3",
        ]);
        debug!(
            fire = self.fire.is_some(),
            kill = self.kill.is_some(),
            caught = self.caught.is_some(),
            "sound effects loaded"
        );
    }

    pub fn play_fire(&self) {
        // own sink so rapid fire overlaps instead of queueing
        if let Some(dec) = decode(&self.fire) {
            if let Ok(sink) = Sink::try_new(&self.handle) {
                sink.append(dec.amplify(self.fire_volume));
                sink.detach();
            }
        }
    }

    pub fn play_kill(&self) {
        if let Some(dec) = decode(&self.kill) {
            self.sfx_sink.append(dec);
        }
    }

    pub fn play_player_caught(&self) {
        if let Some(dec) = decode(&self.caught) {
            self.sfx_sink.append(dec);
        }
    }
}

fn decode(data: &Option<Arc<Vec<u8>>>) -> Option<Decoder<Cursor<Vec<u8>>>> {
    let bytes = data.as_ref()?.as_ref().clone();
    Decoder::new(Cursor::new(bytes)).ok()
}
