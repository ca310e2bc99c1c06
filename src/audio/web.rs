//! Audio cues using the Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!

use std::rc::Rc;

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use super::{AdaptiveMusic, Audio, AudioCue, Beat, BeatVoice, Music, SoundEffect};
use crate::settings::Settings;

/// Shared oscillator synth behind every cue
pub struct Synth {
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    sound_on: bool,
}

impl Synth {
    pub fn new(settings: &Settings) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            music_volume: settings.music_volume.clamp(0.0, 1.0),
            sound_on: settings.sound_on,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    fn sfx_volume(&self) -> f32 {
        if self.sound_on {
            self.master_volume * self.sfx_volume
        } else {
            0.0
        }
    }

    /// Context ready to play, resumed if the browser suspended it
    fn live_ctx(&self) -> Option<&AudioContext> {
        let ctx = self.ctx.as_ref()?;
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }
        Some(ctx)
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Play a one-shot effect
    fn play(&self, effect: SoundEffect, level: f32) {
        let vol = self.sfx_volume() * level;
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = self.live_ctx() else { return };

        match effect {
            SoundEffect::Laser => Self::play_laser(ctx, vol),
            SoundEffect::Explode => Self::play_explosion(ctx, vol),
            SoundEffect::Hit => Self::play_hit(ctx, vol),
            SoundEffect::Thrust => {}
        }
    }

    /// Laser - quick descending zap
    fn play_laser(ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = Self::create_osc(ctx, 1400.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.2, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.12)
            .ok();
        osc.frequency().set_value_at_time(1400.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(300.0, t + 0.12)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.15).ok();
    }

    /// Ship explosion - boom!
    fn play_explosion(ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = Self::create_osc(ctx, 100.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.5, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.4)
            .ok();
        osc.frequency().set_value_at_time(100.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(30.0, t + 0.4)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.5).ok();

        // Add high frequency crack
        if let Some((osc2, gain2)) = Self::create_osc(ctx, 1500.0, OscillatorType::Square) {
            gain2.gain().set_value_at_time(vol * 0.2, t).ok();
            gain2
                .gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                .ok();
            osc2.start().ok();
            osc2.stop_with_when(t + 0.15).ok();
        }
    }

    /// Asteroid hit - rocky crunch
    fn play_hit(ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        // Deep bass impact
        if let Some((osc, gain)) = Self::create_osc(ctx, 80.0, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.5, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                .ok();
            osc.frequency().set_value_at_time(80.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(40.0, t + 0.2)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.3).ok();
        }

        // Crackle on top
        if let Some((osc, gain)) = Self::create_osc(ctx, 300.0, OscillatorType::Sawtooth) {
            gain.gain().set_value_at_time(vol * 0.25, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                .ok();
            osc.frequency().set_value_at_time(300.0, t).ok();
            osc.frequency().set_value_at_time(900.0, t + 0.02).ok();
            osc.frequency().set_value_at_time(200.0, t + 0.04).ok();
            osc.frequency().set_value_at_time(600.0, t + 0.07).ok();
            osc.frequency().set_value_at_time(120.0, t + 0.1).ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.18).ok();
        }
    }

    /// Engine rumble, running until the returned node is stopped
    fn start_thrust(&self, level: f32) -> Option<OscillatorNode> {
        let vol = self.sfx_volume() * level;
        if vol <= 0.0 {
            return None;
        }
        let ctx = self.live_ctx()?;
        let (osc, gain) = Self::create_osc(ctx, 55.0, OscillatorType::Sawtooth)?;
        let t = ctx.current_time();
        gain.gain().set_value_at_time(0.01, t).ok();
        gain.gain()
            .linear_ramp_to_value_at_time(vol * 0.25, t + 0.05)
            .ok();
        osc.start().ok();
        Some(osc)
    }

    /// Heartbeat note
    fn play_beat(&self, beat: Beat) {
        let vol = self.master_volume * self.music_volume;
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = self.live_ctx() else { return };
        let freq = match beat {
            Beat::Low => 55.0,
            Beat::High => 65.0,
        };
        let Some((osc, gain)) = Self::create_osc(ctx, freq, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();
        gain.gain().set_value_at_time(vol * 0.5, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.2)
            .ok();
        osc.start().ok();
        osc.stop_with_when(t + 0.25).ok();
    }
}

/// One sound effect bound to the shared synth
pub struct SynthCue {
    synth: Rc<Synth>,
    effect: SoundEffect,
    /// Relative loudness of this cue
    level: f32,
    /// Looping voice (thrust only)
    voice: Option<OscillatorNode>,
}

impl AudioCue for SynthCue {
    fn play(&mut self) {
        let synth = &self.synth;
        if self.effect == SoundEffect::Thrust {
            if self.voice.is_none() {
                self.voice = synth.start_thrust(self.level);
            }
        } else {
            synth.play(self.effect, self.level);
        }
    }

    fn stop(&mut self) {
        if let Some(osc) = self.voice.take() {
            osc.stop().ok();
        }
    }
}

/// Heartbeat voice bound to the shared synth
pub struct SynthBeat {
    synth: Rc<Synth>,
}

impl BeatVoice for SynthBeat {
    fn play_beat(&mut self, beat: Beat) {
        self.synth.play_beat(beat);
    }
}

/// Build the browser audio bundle. The synth handle is returned so the host
/// can resume the context after a user gesture.
pub fn browser_audio(settings: &Settings) -> (Audio, Rc<Synth>) {
    let synth = Rc::new(Synth::new(settings));
    let cue = |effect, level| -> Box<dyn AudioCue> {
        Box::new(SynthCue {
            synth: synth.clone(),
            effect,
            level,
            voice: None,
        })
    };
    let music: Box<dyn AdaptiveMusic> = Box::new(Music::new(
        SynthBeat {
            synth: synth.clone(),
        },
        settings.music_on,
    ));
    let audio = Audio::new(
        cue(SoundEffect::Laser, 0.5),
        cue(SoundEffect::Explode, 1.0),
        cue(SoundEffect::Hit, 1.0),
        cue(SoundEffect::Thrust, 1.0),
        music,
    );
    (audio, synth)
}
