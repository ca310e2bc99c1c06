//! Two-note heartbeat music that speeds up as the belt thins out

use super::AdaptiveMusic;
use crate::consts::SIM_HZ;
use crate::ticks_for;

/// Which note of the heartbeat to play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Beat {
    Low,
    High,
}

/// Something that can sound a single beat
pub trait BeatVoice {
    fn play_beat(&mut self, beat: Beat);
}

/// Fastest tempo reached when the last asteroid is left (seconds per beat)
const MIN_TEMPO: f32 = 0.25;

/// Alternating low/high beats with an adaptive tempo
#[derive(Debug, Clone)]
pub struct Music<V> {
    voice: V,
    /// Seconds per beat pair
    tempo: f32,
    /// Ticks until the next beat
    beat_ticks: u32,
    low: bool,
    enabled: bool,
}

impl<V: BeatVoice> Music<V> {
    pub fn new(voice: V, enabled: bool) -> Self {
        Self {
            voice,
            tempo: 1.0,
            beat_ticks: 0,
            low: true,
            enabled,
        }
    }

    #[inline]
    pub fn tempo(&self) -> f32 {
        self.tempo
    }

    pub fn voice(&self) -> &V {
        &self.voice
    }

    fn play(&mut self) {
        if !self.enabled {
            return;
        }
        let beat = if self.low { Beat::Low } else { Beat::High };
        self.voice.play_beat(beat);
        self.low = !self.low;
    }
}

impl<V: BeatVoice> AdaptiveMusic for Music<V> {
    fn tick(&mut self) {
        if self.beat_ticks == 0 {
            self.play();
            self.beat_ticks = ticks_for(self.tempo / 2.0, SIM_HZ);
        } else {
            self.beat_ticks -= 1;
        }
    }

    fn set_asteroid_ratio(&mut self, ratio: f32) {
        let ratio = ratio.clamp(0.0, 1.0);
        self.tempo = 1.0 - (1.0 - MIN_TEMPO) * (1.0 - ratio);
    }

    fn reset(&mut self) {
        self.tempo = 1.0;
        self.beat_ticks = 0;
        self.low = true;
    }
}
