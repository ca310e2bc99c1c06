//! Audio capabilities
//!
//! The simulation never builds sounds itself. It receives an [`Audio`]
//! bundle of cues plus an adaptive music ticker and triggers them on game
//! events. On the web the cues are procedural Web Audio synths (see `web`);
//! natively and in tests they are silent or recording fakes.

pub mod music;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use music::{Beat, BeatVoice, Music};

/// Sound effects the game triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Laser fired
    Laser,
    /// Ship exploded
    Explode,
    /// Asteroid hit
    Hit,
    /// Engine thrust (looping until stopped)
    Thrust,
}

/// A playable sound
pub trait AudioCue {
    fn play(&mut self);
    fn stop(&mut self);
}

/// Background music whose tempo follows the remaining asteroids
pub trait AdaptiveMusic {
    /// Advance one simulation tick
    fn tick(&mut self);
    /// Remaining/total asteroid ratio for this round (1.0 = full belt)
    fn set_asteroid_ratio(&mut self, ratio: f32);
    /// Back to the opening tempo
    fn reset(&mut self) {
        self.set_asteroid_ratio(1.0);
    }
}

/// A cue or music track that does nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl AudioCue for Silent {
    fn play(&mut self) {}
    fn stop(&mut self) {}
}

impl AdaptiveMusic for Silent {
    fn tick(&mut self) {}
    fn set_asteroid_ratio(&mut self, _ratio: f32) {}
}

/// The set of cues handed to the simulation
pub struct Audio {
    laser: Box<dyn AudioCue>,
    explode: Box<dyn AudioCue>,
    hit: Box<dyn AudioCue>,
    thrust: Box<dyn AudioCue>,
    music: Box<dyn AdaptiveMusic>,
}

impl Default for Audio {
    fn default() -> Self {
        Self::silent()
    }
}

impl std::fmt::Debug for Audio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Audio").finish_non_exhaustive()
    }
}

impl Audio {
    pub fn new(
        laser: Box<dyn AudioCue>,
        explode: Box<dyn AudioCue>,
        hit: Box<dyn AudioCue>,
        thrust: Box<dyn AudioCue>,
        music: Box<dyn AdaptiveMusic>,
    ) -> Self {
        Self {
            laser,
            explode,
            hit,
            thrust,
            music,
        }
    }

    /// No sound at all (native builds, tests)
    pub fn silent() -> Self {
        Self::new(
            Box::new(Silent),
            Box::new(Silent),
            Box::new(Silent),
            Box::new(Silent),
            Box::new(Silent),
        )
    }

    fn cue(&mut self, effect: SoundEffect) -> &mut dyn AudioCue {
        match effect {
            SoundEffect::Laser => self.laser.as_mut(),
            SoundEffect::Explode => self.explode.as_mut(),
            SoundEffect::Hit => self.hit.as_mut(),
            SoundEffect::Thrust => self.thrust.as_mut(),
        }
    }

    pub fn play(&mut self, effect: SoundEffect) {
        self.cue(effect).play();
    }

    pub fn stop(&mut self, effect: SoundEffect) {
        self.cue(effect).stop();
    }

    pub fn music(&mut self) -> &mut dyn AdaptiveMusic {
        self.music.as_mut()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording fakes shared by the simulation tests

    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    pub enum Played {
        Play(SoundEffect),
        Stop(SoundEffect),
        Ratio(f32),
        Reset,
    }

    pub type Log = Rc<RefCell<Vec<Played>>>;

    struct RecordingCue {
        effect: SoundEffect,
        log: Log,
    }

    impl AudioCue for RecordingCue {
        fn play(&mut self) {
            self.log.borrow_mut().push(Played::Play(self.effect));
        }
        fn stop(&mut self) {
            self.log.borrow_mut().push(Played::Stop(self.effect));
        }
    }

    struct RecordingMusic {
        log: Log,
    }

    impl AdaptiveMusic for RecordingMusic {
        fn tick(&mut self) {}
        fn set_asteroid_ratio(&mut self, ratio: f32) {
            self.log.borrow_mut().push(Played::Ratio(ratio));
        }
        fn reset(&mut self) {
            self.log.borrow_mut().push(Played::Reset);
        }
    }

    /// An audio bundle that records every trigger
    pub fn recording() -> (Audio, Log) {
        let log: Log = Rc::default();
        let cue = |effect| -> Box<dyn AudioCue> {
            Box::new(RecordingCue {
                effect,
                log: log.clone(),
            })
        };
        let audio = Audio::new(
            cue(SoundEffect::Laser),
            cue(SoundEffect::Explode),
            cue(SoundEffect::Hit),
            cue(SoundEffect::Thrust),
            Box::new(RecordingMusic { log: log.clone() }),
        );
        (audio, log)
    }

    /// Count plays of one effect
    pub fn plays(log: &Log, effect: SoundEffect) -> usize {
        log.borrow()
            .iter()
            .filter(|p| **p == Played::Play(effect))
            .count()
    }
}
