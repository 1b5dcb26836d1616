//! Paddle hit cue
//!
//! The game only needs one fire-and-forget sound. Playback never blocks and
//! never fails the caller; on web it is a short procedurally generated beep.

/// Something that can play the paddle hit cue
pub trait CuePlayer {
    /// Start the cue and return immediately. Failures are swallowed.
    fn play_cue(&self);
}

/// Plays nothing (headless replay, tests)
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentCue;

impl CuePlayer for SilentCue {
    fn play_cue(&self) {}
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudioCue;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::CuePlayer;

    /// Web Audio beep
    pub struct WebAudioCue {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl Default for WebAudioCue {
        fn default() -> Self {
            Self::new()
        }
    }

    impl WebAudioCue {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx, volume: 0.8 }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
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
    }

    impl CuePlayer for WebAudioCue {
        /// Short square-wave beep, scheduled on the audio clock
        fn play_cue(&self) {
            if self.volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Browsers keep the context suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let Some((osc, gain)) = self.create_osc(ctx, 880.0, OscillatorType::Square) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(self.volume * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.08)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.1).ok();
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::Cell;

    use super::*;

    /// Counts cues instead of playing them
    #[derive(Debug, Default)]
    pub struct CountingCue {
        pub count: Cell<u32>,
    }

    impl CuePlayer for CountingCue {
        fn play_cue(&self) {
            self.count.set(self.count.get() + 1);
        }
    }

    #[test]
    fn test_silent_cue_is_noop() {
        SilentCue.play_cue();
    }

    #[test]
    fn test_counting_cue() {
        let cue = CountingCue::default();
        cue.play_cue();
        cue.play_cue();
        assert_eq!(cue.count.get(), 2);
    }
}
