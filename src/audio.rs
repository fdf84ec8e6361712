//! Arcade sound effects
//!
//! Procedurally generated with the Web Audio API - no sound files. Each effect is a
//! single oscillator with an exponential gain decay; the envelopes are plain data so
//! they can be checked without an audio device.

use crate::platform::Storage;
use crate::settings::SoundSettings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Sharp click on buttons
    Click,
    /// Subtle beep on hover
    Hover,
    /// Coin insert, also the unmute confirmation
    Coin,
    /// Power-up
    Powerup,
}

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// One oscillator's parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    pub frequency: f32,
    pub waveform: Waveform,
    /// Gain at start
    pub gain: f32,
    /// Seconds until gain has decayed to `RAMP_FLOOR`
    pub decay: f64,
    /// Seconds until the oscillator stops
    pub stop: f64,
}

/// Exponential ramps cannot reach zero
pub const RAMP_FLOOR: f32 = 0.01;

/// Every effect stops after this long
pub const EFFECT_LENGTH: f64 = 0.3;

/// Delay before the confirmation coin after unmuting
pub const UNMUTE_CHIME_DELAY_MS: i32 = 100;

impl SoundEffect {
    pub const ALL: [SoundEffect; 4] = [
        SoundEffect::Click,
        SoundEffect::Hover,
        SoundEffect::Coin,
        SoundEffect::Powerup,
    ];

    pub fn envelope(&self) -> Envelope {
        let (frequency, waveform, gain, decay) = match self {
            SoundEffect::Click => (800.0, Waveform::Square, 0.3, 0.1),
            SoundEffect::Hover => (600.0, Waveform::Sine, 0.1, 0.05),
            SoundEffect::Coin => (1000.0, Waveform::Triangle, 0.3, 0.2),
            SoundEffect::Powerup => (400.0, Waveform::Sawtooth, 0.2, 0.3),
        };
        Envelope {
            frequency,
            waveform,
            gain,
            decay,
            stop: EFFECT_LENGTH,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::Click => "click",
            SoundEffect::Hover => "hover",
            SoundEffect::Coin => "coin",
            SoundEffect::Powerup => "powerup",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "click" => Some(SoundEffect::Click),
            "hover" => Some(SoundEffect::Hover),
            "coin" => Some(SoundEffect::Coin),
            "powerup" | "power-up" => Some(SoundEffect::Powerup),
            _ => None,
        }
    }
}

/// Something that can actually make noise
pub trait SoundOutput {
    fn play(&mut self, effect: SoundEffect);
}

/// A sound to play after a delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayedSound {
    pub effect: SoundEffect,
    pub delay_ms: i32,
}

/// Mute-aware front for a `SoundOutput`, with the preference kept in `Storage`
pub struct SoundBoard<St: Storage, O: SoundOutput> {
    settings: SoundSettings,
    storage: St,
    output: O,
}

impl<St: Storage, O: SoundOutput> SoundBoard<St, O> {
    pub fn new(storage: St, output: O) -> Self {
        Self {
            settings: SoundSettings::load(&storage),
            storage,
            output,
        }
    }

    pub fn is_muted(&self) -> bool {
        self.settings.muted
    }

    /// Play unless muted; returns whether the effect was sent to the output
    pub fn play(&mut self, effect: SoundEffect) -> bool {
        if self.settings.muted {
            return false;
        }
        self.output.play(effect);
        true
    }

    /// Flip mute. Unmuting asks for a coin chime shortly after, so the user hears it worked.
    pub fn toggle_mute(&mut self) -> Option<DelayedSound> {
        let muted = self.settings.toggle_mute(&mut self.storage);
        log::info!("Sound {}", if muted { "muted" } else { "unmuted" });
        (!muted).then_some(DelayedSound {
            effect: SoundEffect::Coin,
            delay_ms: UNMUTE_CHIME_DELAY_MS,
        })
    }

    pub fn output(&self) -> &O {
        &self.output
    }
}

/// Web Audio synthesizer
#[cfg(target_arch = "wasm32")]
pub use web_synth::Synth;

#[cfg(target_arch = "wasm32")]
mod web_synth {
    use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

    use super::{Envelope, RAMP_FLOOR, SoundEffect, SoundOutput, Waveform};

    impl From<Waveform> for OscillatorType {
        fn from(w: Waveform) -> Self {
            match w {
                Waveform::Sine => OscillatorType::Sine,
                Waveform::Square => OscillatorType::Square,
                Waveform::Sawtooth => OscillatorType::Sawtooth,
                Waveform::Triangle => OscillatorType::Triangle,
            }
        }
    }

    pub struct Synth {
        ctx: Option<AudioContext>,
    }

    impl Default for Synth {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Synth {
        pub fn new() -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - sound effects disabled");
            }
            Self { ctx }
        }

        /// Create an oscillator routed through a gain node to the speakers
        fn create_osc(ctx: &AudioContext, env: &Envelope) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(env.waveform.into());
            osc.frequency().set_value(env.frequency);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }
    }

    impl SoundOutput for Synth {
        fn play(&mut self, effect: SoundEffect) {
            let Some(ctx) = &self.ctx else { return };

            // Browsers start the context suspended until a user gesture
            if ctx.state() == AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let env = effect.envelope();
            let Some((osc, gain)) = Self::create_osc(ctx, &env) else {
                log::warn!("Failed to build oscillator for {}", effect.as_str());
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(env.gain, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(RAMP_FLOOR, t + env.decay)
                .ok();

            osc.start_with_when(t).ok();
            osc.stop_with_when(t + env.stop).ok();
        }
    }
}

/// Output that makes no sound (native builds)
#[derive(Debug, Default)]
pub struct Silent;

impl SoundOutput for Silent {
    fn play(&mut self, _effect: SoundEffect) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStorage;

    #[derive(Default)]
    struct Recorder(Vec<SoundEffect>);

    impl SoundOutput for Recorder {
        fn play(&mut self, effect: SoundEffect) {
            self.0.push(effect);
        }
    }

    #[test]
    fn test_envelopes() {
        let click = SoundEffect::Click.envelope();
        assert_eq!(click.frequency, 800.0);
        assert_eq!(click.waveform, Waveform::Square);
        assert_eq!(click.gain, 0.3);
        assert_eq!(click.decay, 0.1);

        let hover = SoundEffect::Hover.envelope();
        assert_eq!((hover.frequency, hover.waveform), (600.0, Waveform::Sine));
        assert_eq!((hover.gain, hover.decay), (0.1, 0.05));

        let coin = SoundEffect::Coin.envelope();
        assert_eq!((coin.frequency, coin.waveform), (1000.0, Waveform::Triangle));

        let powerup = SoundEffect::Powerup.envelope();
        assert_eq!((powerup.frequency, powerup.waveform), (400.0, Waveform::Sawtooth));
        assert_eq!(powerup.gain, 0.2);

        for effect in SoundEffect::ALL {
            let env = effect.envelope();
            assert_eq!(env.stop, EFFECT_LENGTH);
            assert!(env.decay <= env.stop);
            assert!(env.gain > RAMP_FLOOR);
        }
    }

    #[test]
    fn test_names_round_trip() {
        for effect in SoundEffect::ALL {
            assert_eq!(SoundEffect::from_name(effect.as_str()), Some(effect));
        }
        assert_eq!(SoundEffect::from_name("POWER-UP"), Some(SoundEffect::Powerup));
        assert_eq!(SoundEffect::from_name("honk"), None);
    }

    #[test]
    fn test_muted_board_stays_silent() {
        let mut storage = MemoryStorage::new();
        storage.set("soundMuted", "true");
        let mut board = SoundBoard::new(storage, Recorder::default());

        assert!(board.is_muted());
        assert!(!board.play(SoundEffect::Click));
        assert!(board.output().0.is_empty());
    }

    #[test]
    fn test_toggle_and_unmute_chime() {
        let mut board = SoundBoard::new(MemoryStorage::new(), Recorder::default());
        assert!(board.play(SoundEffect::Hover));

        // Muting asks for nothing
        assert_eq!(board.toggle_mute(), None);
        assert!(!board.play(SoundEffect::Click));

        assert_eq!(
            board.toggle_mute(),
            Some(DelayedSound {
                effect: SoundEffect::Coin,
                delay_ms: 100
            })
        );
        assert!(board.play(SoundEffect::Powerup));
        assert_eq!(
            board.output().0,
            vec![SoundEffect::Hover, SoundEffect::Powerup]
        );
    }
}
