//! Interaction feedback.
//!
//! The tracker emits symbolic [`FeedbackEvent`]s into a [`FeedbackSink`]. What
//! they sound like is up to the sink: [`SilentSink`] ignores them, while
//! [`ToneSink`] voices them through a [`SoundScheme`] into a [`ToneOutput`]
//! (Web Audio in the browser). Nothing here affects chart state.

use crate::error::TrackerError;
use crate::view::ViewMode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cue {
    Tap,
    ModeToggle,
    PopupOpen,
    Reward,
    Delete,
    Navigate(ViewMode),
}

impl Cue {
    pub fn tag(&self) -> &'static str {
        match self {
            Cue::Tap => "tap",
            Cue::ModeToggle => "mode-toggle",
            Cue::PopupOpen => "popup-open",
            Cue::Reward => "reward",
            Cue::Delete => "delete",
            Cue::Navigate(_) => "navigate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeedbackEvent {
    pub cue: Cue,
    /// Strength in `[0, 1]`
    pub intensity: Option<f64>,
    /// Intensity carries data (a wedge's share) rather than a UI weight
    pub sonified: bool,
}

impl FeedbackEvent {
    pub fn new(cue: Cue) -> Self {
        Self {
            cue,
            intensity: None,
            sonified: false,
        }
    }

    pub fn with_intensity(cue: Cue, intensity: f64) -> Self {
        Self {
            cue,
            intensity: Some(intensity.clamp(0.0, 1.0)),
            sonified: false,
        }
    }

    /// Tap on a wedge holding `pct` percent of total usage.
    pub fn percent_tap(pct: u32) -> Self {
        Self {
            cue: Cue::Tap,
            intensity: Some((pct as f64 / 100.0).clamp(0.0, 1.0)),
            sonified: true,
        }
    }
}

impl fmt::Display for FeedbackEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.cue, self.intensity) {
            (Cue::Navigate(view), _) => write!(f, "navigate({})", view),
            (cue, Some(x)) => write!(f, "{}({:.2})", cue.tag(), x),
            (cue, None) => f.write_str(cue.tag()),
        }
    }
}

/// Receiver of interaction feedback.
pub trait FeedbackSink {
    fn emit(&mut self, event: FeedbackEvent);

    /// Called after each breakdown redraw with the current total usage.
    fn usage_changed(&mut self, _total: f64) {}
}

/// Drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSink;

impl FeedbackSink for SilentSink {
    fn emit(&mut self, _event: FeedbackEvent) {}
}

/// Writes events to the log; used by headless sessions.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl FeedbackSink for LogSink {
    fn emit(&mut self, event: FeedbackEvent) {
        log::info!("feedback: {}", event);
    }
}

/// Keeps every event, in order.
impl FeedbackSink for Vec<FeedbackEvent> {
    fn emit(&mut self, event: FeedbackEvent) {
        self.push(event);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    Triangle,
    Square,
    Sawtooth,
}

/// Shape of the attack/release gain ramps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Curve {
    Exponential,
    Linear,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandPass {
    pub frequency: f64,
    pub q: f64,
}

/// One short synthesized note. Times are in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tone {
    pub frequency: f64,
    /// Pitch the note slides to, and how long the slide takes
    pub glide: Option<(f64, f64)>,
    pub waveform: Waveform,
    pub duration: f64,
    pub volume: f64,
    /// Offset from the moment the cue fires
    pub delay: f64,
    pub curve: Curve,
    pub filter: Option<BandPass>,
}

impl Tone {
    pub fn new(frequency: f64, waveform: Waveform, duration: f64, volume: f64) -> Self {
        Self {
            frequency,
            glide: None,
            waveform,
            duration,
            volume,
            delay: 0.0,
            curve: Curve::Exponential,
            filter: None,
        }
    }

    pub fn delayed(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    pub fn linear(mut self) -> Self {
        self.curve = Curve::Linear;
        self
    }

    pub fn glide_to(mut self, frequency: f64, over: f64) -> Self {
        self.glide = Some((frequency, over));
        self
    }

    pub fn band_pass(mut self, frequency: f64, q: f64) -> Self {
        self.filter = Some(BandPass { frequency, q });
        self
    }
}

/// Target settings for the continuous background drone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AmbientLevel {
    pub gain: f64,
    pub cutoff: f64,
    pub base_frequency: f64,
}

/// Total usage at which the drone is quietest.
const AMBIENT_LOW_USAGE: f64 = 80.0;
/// Total usage at which the drone is loudest.
const AMBIENT_HIGH_USAGE: f64 = 250.0;

impl AmbientLevel {
    pub fn from_intensity(intensity: f64) -> Self {
        let x = intensity.clamp(0.0, 1.0);
        Self {
            gain: 0.02 + x * 0.03,
            cutoff: 450.0 + x * 1100.0,
            base_frequency: 95.0 + x * 35.0,
        }
    }

    pub fn from_total(total: f64) -> Self {
        Self::from_intensity((total - AMBIENT_LOW_USAGE) / (AMBIENT_HIGH_USAGE - AMBIENT_LOW_USAGE))
    }
}

/// Audio backend for [`ToneSink`].
pub trait ToneOutput {
    fn play(&mut self, tone: &Tone);

    /// Restart the prerecorded click clip.
    fn play_clip(&mut self) {}

    /// Move the background drone toward `level`, starting it if needed.
    fn set_ambient(&mut self, _level: AmbientLevel) {}
}

/// How events are voiced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundScheme {
    /// Same recorded click for every cue
    Clip,
    /// Synth tones with percent-to-pitch sonification
    Tonal,
    /// Tonal cues over a drone that follows total usage
    Ambient,
    /// Droplet, bubble and drain sounds
    #[default]
    WaterDrop,
}

impl FromStr for SoundScheme {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "clip" => Ok(SoundScheme::Clip),
            "tonal" => Ok(SoundScheme::Tonal),
            "ambient" => Ok(SoundScheme::Ambient),
            "waterdrop" => Ok(SoundScheme::WaterDrop),
            other => Err(TrackerError::Config(format!("unknown sound scheme: {}", other))),
        }
    }
}

fn reward_chime(volume: f64, sparkle: f64) -> Vec<Tone> {
    // C5, E5, G5 then a high sparkle
    let mut tones: Vec<Tone> = [523.0, 659.0, 784.0]
        .iter()
        .enumerate()
        .map(|(i, f)| Tone::new(*f, Waveform::Sine, 0.12, volume).delayed(i as f64 * 0.09))
        .collect();
    tones.push(Tone::new(1200.0, Waveform::Triangle, 0.08, sparkle).delayed(0.28));
    tones
}

fn mode_toggle(volume: f64) -> Vec<Tone> {
    vec![
        Tone::new(260.0, Waveform::Square, 0.10, volume).linear(),
        Tone::new(360.0, Waveform::Square, 0.10, volume).linear().delayed(0.09),
    ]
}

fn droplet(intensity: f64) -> Tone {
    let x = intensity.clamp(0.0, 1.0);
    Tone::new(1100.0 + x * 700.0, Waveform::Triangle, 0.10, 0.05 + x * 0.06)
        .glide_to(250.0 + x * 120.0, 0.06)
        .band_pass(900.0 + x * 600.0, 10.0)
}

fn tonal(event: &FeedbackEvent) -> Vec<Tone> {
    match event.cue {
        Cue::Tap if event.sonified => {
            // 0..100% maps to 300..1100 Hz, with an octave harmonic
            let freq = 300.0 + event.intensity.unwrap_or(0.0) * 800.0;
            vec![
                Tone::new(freq, Waveform::Triangle, 0.12, 0.18).band_pass(freq, 6.0),
                Tone::new(freq * 2.0, Waveform::Sine, 0.12, 0.18).band_pass(freq, 6.0),
            ]
        }
        Cue::Tap => vec![Tone::new(420.0, Waveform::Triangle, 0.08, 0.10)],
        Cue::ModeToggle => mode_toggle(0.12),
        Cue::PopupOpen => vec![Tone::new(520.0, Waveform::Sine, 0.10, 0.10)],
        Cue::Reward => reward_chime(0.22, 0.12),
        Cue::Delete => vec![Tone::new(180.0, Waveform::Sawtooth, 0.10, 0.10).linear()],
        Cue::Navigate(view) => {
            let (freq, waveform) = match view {
                ViewMode::Breakdown => (520.0, Waveform::Sine),
                ViewMode::Weekly => (660.0, Waveform::Triangle),
                ViewMode::Daily => (440.0, Waveform::Square),
            };
            vec![Tone::new(freq, waveform, 0.08, 0.10)]
        }
    }
}

fn water_drop(event: &FeedbackEvent) -> Vec<Tone> {
    match event.cue {
        Cue::Tap if event.sonified => {
            let p = event.intensity.unwrap_or(0.0);
            vec![
                droplet(p),
                Tone::new(380.0 + p * 520.0, Waveform::Sine, 0.05, 0.05).delayed(0.04),
            ]
        }
        Cue::Tap => vec![droplet(event.intensity.unwrap_or(0.5))],
        Cue::ModeToggle => mode_toggle(0.10),
        Cue::PopupOpen => vec![
            Tone::new(620.0, Waveform::Sine, 0.08, 0.08),
            Tone::new(780.0, Waveform::Triangle, 0.06, 0.06).delayed(0.06),
        ],
        Cue::Reward => reward_chime(0.18, 0.10),
        Cue::Delete => vec![Tone::new(420.0, Waveform::Sawtooth, 0.20, 0.10).glide_to(140.0, 0.18)],
        Cue::Navigate(view) => {
            let intensity = match view {
                ViewMode::Breakdown => 0.35,
                ViewMode::Weekly => 0.45,
                ViewMode::Daily => 0.30,
            };
            vec![droplet(intensity)]
        }
    }
}

/// Notes for `event` under `scheme`. The clip scheme has no synthesized notes.
pub fn voice(scheme: SoundScheme, event: &FeedbackEvent) -> Vec<Tone> {
    match scheme {
        SoundScheme::Clip => Vec::new(),
        SoundScheme::Tonal | SoundScheme::Ambient => tonal(event),
        SoundScheme::WaterDrop => water_drop(event),
    }
}

/// Voices feedback events through a [`ToneOutput`].
#[derive(Debug, Clone)]
pub struct ToneSink<O> {
    scheme: SoundScheme,
    output: O,
}

impl<O: ToneOutput> ToneSink<O> {
    pub fn new(scheme: SoundScheme, output: O) -> Self {
        Self { scheme, output }
    }

    pub fn scheme(&self) -> SoundScheme {
        self.scheme
    }

    pub fn output(&self) -> &O {
        &self.output
    }
}

impl<O: ToneOutput> FeedbackSink for ToneSink<O> {
    fn emit(&mut self, event: FeedbackEvent) {
        if self.scheme == SoundScheme::Clip {
            self.output.play_clip();
            return;
        }
        for tone in voice(self.scheme, &event) {
            self.output.play(&tone);
        }
    }

    fn usage_changed(&mut self, total: f64) {
        if self.scheme == SoundScheme::Ambient {
            self.output.set_ambient(AmbientLevel::from_total(total));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingOutput {
        tones: Vec<Tone>,
        clips: usize,
        ambient: Vec<AmbientLevel>,
    }

    impl ToneOutput for RecordingOutput {
        fn play(&mut self, tone: &Tone) {
            self.tones.push(*tone);
        }

        fn play_clip(&mut self) {
            self.clips += 1;
        }

        fn set_ambient(&mut self, level: AmbientLevel) {
            self.ambient.push(level);
        }
    }

    #[test]
    fn test_event_tags() {
        assert_eq!(FeedbackEvent::new(Cue::ModeToggle).to_string(), "mode-toggle");
        assert_eq!(FeedbackEvent::with_intensity(Cue::Tap, 0.25).to_string(), "tap(0.25)");
        assert_eq!(
            FeedbackEvent::new(Cue::Navigate(ViewMode::Weekly)).to_string(),
            "navigate(weekly)"
        );
        assert_eq!(FeedbackEvent::with_intensity(Cue::Tap, 3.0).intensity, Some(1.0));
    }

    #[test]
    fn test_percent_tone_pitch_tracks_share() {
        let low = voice(SoundScheme::Tonal, &FeedbackEvent::percent_tap(0));
        let high = voice(SoundScheme::Tonal, &FeedbackEvent::percent_tap(100));
        assert_eq!(low[0].frequency, 300.0);
        assert_eq!(high[0].frequency, 1100.0);
        assert_eq!(high[1].frequency, 2200.0);
    }

    #[test]
    fn test_reward_chime_is_staggered() {
        let tones = voice(SoundScheme::Tonal, &FeedbackEvent::new(Cue::Reward));
        let delays: Vec<f64> = tones.iter().map(|t| t.delay).collect();
        assert_eq!(delays.len(), 4);
        assert!(delays.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_water_drop_delete_drains_downward() {
        let tones = voice(SoundScheme::WaterDrop, &FeedbackEvent::new(Cue::Delete));
        let (target, _) = tones[0].glide.unwrap();
        assert!(target < tones[0].frequency);
    }

    #[test]
    fn test_clip_scheme_plays_clip() {
        let mut sink = ToneSink::new(SoundScheme::Clip, RecordingOutput::default());
        sink.emit(FeedbackEvent::new(Cue::Tap));
        sink.emit(FeedbackEvent::new(Cue::Reward));
        assert_eq!(sink.output().clips, 2);
        assert!(sink.output().tones.is_empty());
    }

    #[test]
    fn test_ambient_follows_usage() {
        let mut sink = ToneSink::new(SoundScheme::Ambient, RecordingOutput::default());
        sink.usage_changed(80.0);
        sink.usage_changed(250.0);
        sink.usage_changed(1000.0);
        let levels = &sink.output().ambient;
        assert_eq!(levels[0], AmbientLevel::from_intensity(0.0));
        assert_eq!(levels[1], AmbientLevel::from_intensity(1.0));
        assert_eq!(levels[2], levels[1]);

        let mut tonal = ToneSink::new(SoundScheme::Tonal, RecordingOutput::default());
        tonal.usage_changed(100.0);
        assert!(tonal.output().ambient.is_empty());
    }

    #[test]
    fn test_scheme_parse() {
        assert_eq!("waterdrop".parse::<SoundScheme>().unwrap(), SoundScheme::WaterDrop);
        assert!("hum".parse::<SoundScheme>().is_err());
    }
}
