//! Web Audio backend for interaction feedback.
//!
//! Browsers refuse to start an `AudioContext` before the first user gesture,
//! so the context is created lazily on the first cue and resumed whenever it
//! is found suspended. The clip element, by contrast, is resolved once when
//! the output is built.

use crate::js_bridge;
use wasm_bindgen::JsValue;
use web_sys::{
    AudioContext, AudioContextState, BiquadFilterNode, BiquadFilterType, GainNode, HtmlAudioElement,
    OscillatorNode, OscillatorType,
};
use wut_core::feedback::{AmbientLevel, Curve, SoundScheme, Tone, ToneOutput, Waveform};
use wut_core::TrackerError;

/// DOM id of the `<audio>` element holding the click clip.
pub const CLIP_ELEMENT_ID: &str = "tap-sound";

const SILENT: f64 = 0.0001;
const ATTACK: f64 = 0.01;
/// Time constant for drone parameter moves
const AMBIENT_GLIDE: f64 = 0.8;

struct Drone {
    voice_a: OscillatorNode,
    voice_b: OscillatorNode,
    filter: BiquadFilterNode,
    gain: GainNode,
}

#[derive(Default)]
pub struct WebAudioOutput {
    ctx: Option<AudioContext>,
    drone: Option<Drone>,
    /// Bound only for the clip scheme
    clip: Option<HtmlAudioElement>,
}

fn oscillator_type(waveform: Waveform) -> OscillatorType {
    match waveform {
        Waveform::Sine => OscillatorType::Sine,
        Waveform::Triangle => OscillatorType::Triangle,
        Waveform::Square => OscillatorType::Square,
        Waveform::Sawtooth => OscillatorType::Sawtooth,
    }
}

impl WebAudioOutput {
    /// Output for `scheme`. The clip scheme needs `<audio id="tap-sound">`
    /// in the page and fails here if it is missing.
    pub fn for_scheme(scheme: SoundScheme) -> Result<Self, TrackerError> {
        Self::with_clip_lookup(scheme, js_bridge::element_by_id::<HtmlAudioElement>)
    }

    fn with_clip_lookup(
        scheme: SoundScheme,
        lookup: impl FnOnce(&str) -> Result<HtmlAudioElement, TrackerError>,
    ) -> Result<Self, TrackerError> {
        let clip = match scheme {
            SoundScheme::Clip => Some(lookup(CLIP_ELEMENT_ID)?),
            _ => None,
        };
        Ok(Self {
            clip,
            ..Self::default()
        })
    }

    fn context(&mut self) -> Result<AudioContext, JsValue> {
        let ctx = match &self.ctx {
            Some(ctx) => ctx.clone(),
            None => {
                let ctx = AudioContext::new()?;
                self.ctx = Some(ctx.clone());
                ctx
            }
        };
        if ctx.state() == AudioContextState::Suspended {
            let _ = ctx.resume();
        }
        Ok(ctx)
    }

    fn schedule(&mut self, tone: &Tone) -> Result<(), JsValue> {
        let ctx = self.context()?;
        let start = ctx.current_time() + tone.delay;
        let end = start + tone.duration;

        let osc = ctx.create_oscillator()?;
        osc.set_type(oscillator_type(tone.waveform));
        osc.frequency().set_value_at_time(tone.frequency as f32, start)?;
        if let Some((target, over)) = tone.glide {
            osc.frequency()
                .exponential_ramp_to_value_at_time(target as f32, start + over)?;
        }

        let gain = ctx.create_gain()?;
        let envelope = gain.gain();
        envelope.set_value_at_time(SILENT as f32, start)?;
        match tone.curve {
            Curve::Exponential => {
                envelope.exponential_ramp_to_value_at_time(tone.volume as f32, start + ATTACK)?;
                envelope.exponential_ramp_to_value_at_time(SILENT as f32, end)?;
            }
            Curve::Linear => {
                envelope.linear_ramp_to_value_at_time(tone.volume as f32, start + ATTACK)?;
                envelope.linear_ramp_to_value_at_time(SILENT as f32, end)?;
            }
        }

        match tone.filter {
            Some(band) => {
                let filter = ctx.create_biquad_filter()?;
                filter.set_type(BiquadFilterType::Bandpass);
                filter.frequency().set_value_at_time(band.frequency as f32, start)?;
                filter.q().set_value_at_time(band.q as f32, start)?;
                osc.connect_with_audio_node(&filter)?;
                filter.connect_with_audio_node(&gain)?;
            }
            None => {
                osc.connect_with_audio_node(&gain)?;
            }
        }
        gain.connect_with_audio_node(&ctx.destination())?;

        osc.start_with_when(start)?;
        osc.stop_with_when(end + 0.02)?;
        Ok(())
    }

    fn start_drone(&mut self) -> Result<(), JsValue> {
        let ctx = self.context()?;
        let now = ctx.current_time();

        let voice_a = ctx.create_oscillator()?;
        voice_a.set_type(OscillatorType::Sine);
        voice_a.frequency().set_value_at_time(110.0, now)?;

        let voice_b = ctx.create_oscillator()?;
        voice_b.set_type(OscillatorType::Triangle);
        voice_b.frequency().set_value_at_time(165.0, now)?;

        // Slow vibrato on the upper voice
        let lfo = ctx.create_oscillator()?;
        lfo.set_type(OscillatorType::Sine);
        lfo.frequency().set_value_at_time(0.15, now)?;
        let lfo_depth = ctx.create_gain()?;
        lfo_depth.gain().set_value_at_time(8.0, now)?;
        lfo.connect_with_audio_node(&lfo_depth)?;
        lfo_depth.connect_with_audio_param(&voice_b.frequency())?;

        let filter = ctx.create_biquad_filter()?;
        filter.set_type(BiquadFilterType::Lowpass);
        filter.frequency().set_value_at_time(600.0, now)?;
        filter.q().set_value_at_time(0.7, now)?;

        let gain = ctx.create_gain()?;
        gain.gain().set_value_at_time(SILENT as f32, now)?;
        gain.gain().linear_ramp_to_value_at_time(0.008, now + 1.5)?;

        voice_a.connect_with_audio_node(&filter)?;
        voice_b.connect_with_audio_node(&filter)?;
        filter.connect_with_audio_node(&gain)?;
        gain.connect_with_audio_node(&ctx.destination())?;

        voice_a.start()?;
        voice_b.start()?;
        lfo.start()?;
        log::debug!("Ambient drone started");

        self.drone = Some(Drone {
            voice_a,
            voice_b,
            filter,
            gain,
        });
        Ok(())
    }

    fn move_drone(&mut self, level: AmbientLevel) -> Result<(), JsValue> {
        if self.drone.is_none() {
            self.start_drone()?;
        }
        let ctx = self.context()?;
        let Some(drone) = &self.drone else {
            return Ok(());
        };
        let now = ctx.current_time();
        drone
            .gain
            .gain()
            .set_target_at_time(level.gain as f32, now, AMBIENT_GLIDE)?;
        drone
            .filter
            .frequency()
            .set_target_at_time(level.cutoff as f32, now, AMBIENT_GLIDE)?;
        drone
            .voice_a
            .frequency()
            .set_target_at_time(level.base_frequency as f32, now, AMBIENT_GLIDE)?;
        drone
            .voice_b
            .frequency()
            .set_target_at_time((level.base_frequency * 1.5) as f32, now, AMBIENT_GLIDE)?;
        Ok(())
    }
}

impl ToneOutput for WebAudioOutput {
    fn play(&mut self, tone: &Tone) {
        if let Err(e) = self.schedule(tone) {
            log::warn!("Tone dropped: {}", js_bridge::describe(&e));
        }
    }

    fn play_clip(&mut self) {
        if let Some(clip) = &self.clip {
            clip.set_current_time(0.0);
            let _ = clip.play();
        }
    }

    fn set_ambient(&mut self, level: AmbientLevel) {
        if let Err(e) = self.move_drone(level) {
            log::warn!("Ambient update dropped: {}", js_bridge::describe(&e));
        }
    }
}
