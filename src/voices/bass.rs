//! Bass voice.
//!
//! A monophonic, percussive bass: one PolyBLEP oscillator, two selectable
//! timbres, a bipolar macro filter and a decay-only amplitude envelope.
//!
//! # How It Works
//!
//! 1. A trigger edge (jack, button or unplugging V/Oct) restarts the decay
//!    envelope and a 0.5 ms micro-attack that hides the retrigger click
//! 2. The oscillator advances once; every waveform is read from that phase
//! 3. The timbre switch picks a clean sine/triangle blend or a driven
//!    square/saw/sub blend with its own tone filters
//! 4. The macro filter sweeps low-pass (negative) to high-pass (positive)
//! 5. Envelope × micro-attack, DC block, ×5 gain and a ±11.7 V safety clamp
//!
//! # Timbres
//!
//! - `Clean` ("1" on the panel): tanh(1.05 · (0.9·sine + 0.1·triangle))
//! - `Aggressive` ("2"): 0.55·square + 0.45·saw, high-passed at 45 Hz, 15% sub
//!   sine mixed in, driven through tanh(1.4·x), low-passed at 6 kHz

use crate::config::{BassConfig, ConfigError};
use crate::dsp::distortion::{hard_clip, saturate};
use crate::dsp::envelope::{DecayEnvelope, MicroAttack};
use crate::dsp::filter::{OnePoleHighPass, OnePoleLowPass};
use crate::dsp::macro_filter::{MacroFilter, MACRO_RANGE};
use crate::dsp::oscillator::PolyBlepOscillator;
use crate::dsp::pan::finite_or;
use crate::dsp::trigger::{ConnectionWatch, PulseGenerator, SchmittTrigger};
use crate::io::converter::{nyquist_clamp, pitch_to_freq};
use crate::io::Jack;
use crate::module::{Module, ProcessCtx};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Timbre {
    /// Near-sine with a little soft drive.
    #[default]
    Clean,
    /// Square/saw/sub blend with tone shaping.
    Aggressive,
}

impl Timbre {
    /// Panel switch value: above 0.5 selects `Clean`.
    pub fn from_switch(value: f32) -> Self {
        if value > 0.5 {
            Self::Clean
        } else {
            Self::Aggressive
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BassInputs {
    pub trigger: Jack,
    /// Momentary button, 0 or 1.
    pub trigger_button: f32,
    pub voct: Jack,
    /// -10..10, 0 bypasses the filter.
    pub filter_knob: f32,
    pub filter_cv: Jack,
    /// -10..10, short to long.
    pub decay_knob: f32,
    pub decay_cv: Jack,
    pub timbre: Timbre,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BassOutputs {
    /// Mono output in volts.
    pub out: f32,
    /// Trigger button light, 1.0 for a short pulse after each trigger.
    pub trigger_light: f32,
}

pub struct BassVoice {
    config: BassConfig,
    sample_rate: f32,

    trigger_in: SchmittTrigger,
    trigger_button: SchmittTrigger,
    voct_watch: ConnectionWatch,
    trigger_light: PulseGenerator,

    osc: PolyBlepOscillator,
    env: DecayEnvelope,
    attack: MicroAttack,
    filter: MacroFilter,

    pre_highpass: OnePoleHighPass,
    post_lowpass: OnePoleLowPass,
    dc_block: OnePoleHighPass,
}

impl BassVoice {
    pub fn new(sample_rate: f32) -> Self {
        Self::build(BassConfig::default(), sample_rate)
    }

    pub fn with_config(config: BassConfig, sample_rate: f32) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, sample_rate))
    }

    fn build(config: BassConfig, sample_rate: f32) -> Self {
        let sample_rate = ProcessCtx::new(sample_rate).sample_rate;
        Self {
            sample_rate,
            trigger_in: SchmittTrigger::new(),
            trigger_button: SchmittTrigger::new(),
            voct_watch: ConnectionWatch::new(),
            trigger_light: PulseGenerator::new(),
            osc: PolyBlepOscillator::new(
                pitch_to_freq(config.base_pitch_v, 0.0, config.pitch_cv_range_v),
                sample_rate,
            ),
            env: DecayEnvelope::new(),
            attack: MicroAttack::new(config.micro_attack_s, sample_rate),
            filter: MacroFilter::new(),
            pre_highpass: OnePoleHighPass::new(config.pre_highpass_hz, sample_rate),
            post_lowpass: OnePoleLowPass::new(config.post_lowpass_hz, sample_rate),
            dc_block: OnePoleHighPass::new(config.dc_block_hz, sample_rate),
            config,
        }
    }

    pub fn config(&self) -> &BassConfig {
        &self.config
    }

    /// Current decay envelope level, 0..1.
    pub fn envelope(&self) -> f32 {
        self.env.value()
    }

    /// Decay envelope times micro-attack: the gain applied before the DC
    /// blocker.
    pub fn amplitude(&self) -> f32 {
        self.env.value() * self.attack.value()
    }

    pub fn is_active(&self) -> bool {
        self.env.is_active()
    }

    pub fn frequency(&self) -> f32 {
        self.osc.freq()
    }

    fn detect_trigger(&mut self, inputs: &BassInputs) -> bool {
        let (low, high) = (self.config.trigger_low_v, self.config.trigger_high_v);
        let mut fired = false;

        if inputs.trigger.connected {
            fired |= self
                .trigger_in
                .process(inputs.trigger.voltage, low, high);
        }
        fired |= self.trigger_button.process(inputs.trigger_button, low, high);

        // Unplugging V/Oct snaps back to the base note and plays it.
        fired |= self.voct_watch.disconnected(inputs.voct.connected);
        fired
    }

    fn timbre_sample(&mut self, timbre: Timbre) -> f32 {
        let osc = &self.osc;
        match timbre {
            Timbre::Clean => {
                let clean = 0.90 * osc.sine() + 0.10 * osc.triangle();
                saturate(clean, 1.05)
            }
            Timbre::Aggressive => {
                let core = 0.55 * osc.square(self.config.pulse_width) + 0.45 * osc.saw();
                let sub = osc.sub_sine();
                let core = self.pre_highpass.process(core);
                let core = 0.85 * core + 0.15 * sub;
                let shaped = saturate(core, 1.40) * 0.9 + 0.1 * core;
                self.post_lowpass.process(shaped)
            }
        }
    }
}

impl Module for BassVoice {
    type Inputs = BassInputs;
    type Outputs = BassOutputs;

    fn process(&mut self, inputs: &BassInputs, ctx: &ProcessCtx) -> BassOutputs {
        let sample_rate = ProcessCtx::new(ctx.sample_rate).sample_rate;
        if sample_rate != self.sample_rate {
            self.set_sample_rate(sample_rate);
        }
        let sr = self.sample_rate;

        let fired = self.detect_trigger(inputs);
        if fired {
            self.trigger_light.trigger(self.config.trigger_light_s);
        }
        let trigger_light = if self.trigger_light.process(ctx.sample_time) {
            1.0
        } else {
            0.0
        };

        let decay_param = finite_or(inputs.decay_knob + inputs.decay_cv.voltage_or(0.0), 0.0)
            .clamp(-MACRO_RANGE, MACRO_RANGE);
        if fired {
            self.env.trigger(decay_param, sr);
            self.attack.trigger();
        }

        let pitch_cv = finite_or(inputs.voct.voltage_or(0.0), 0.0);
        let freq = pitch_to_freq(
            self.config.base_pitch_v,
            pitch_cv,
            self.config.pitch_cv_range_v,
        );
        self.osc
            .set_freq(nyquist_clamp(freq, sr, self.config.nyquist_guard));
        self.osc.advance();

        let pre = self.timbre_sample(inputs.timbre);

        let env = self.env.process();
        let attack = self.attack.process();

        let filter_param = inputs.filter_knob + inputs.filter_cv.voltage_or(0.0);
        let x = self.filter.process(pre, filter_param, sr);

        let out = self.dc_block.process(x * env * attack);
        let out = hard_clip(out, self.config.output_gain, self.config.output_limit_v);

        BassOutputs { out, trigger_light }
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        let sr = ProcessCtx::new(sample_rate).sample_rate;
        log::debug!("bass voice sample rate {} -> {}", self.sample_rate, sr);
        self.sample_rate = sr;

        self.osc.set_sample_rate(sr);
        self.attack.set_sample_rate(sr);
        self.dc_block.set_cutoff(self.config.dc_block_hz, sr);
        self.pre_highpass.set_cutoff(self.config.pre_highpass_hz, sr);
        self.post_lowpass.set_cutoff(self.config.post_lowpass_hz, sr);
        self.filter.invalidate();
    }

    fn reset(&mut self) {
        log::debug!("bass voice reset");
        self.trigger_in.reset();
        self.trigger_button.reset();
        self.voct_watch.reset();
        self.trigger_light.reset();
        self.osc.reset_phase();
        self.env.reset();
        self.attack.reset();
        self.filter.reset();
        self.pre_highpass.reset();
        self.post_lowpass.reset();
        self.dc_block.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 48_000.0;

    fn run(voice: &mut BassVoice, inputs: &BassInputs, samples: usize) -> Vec<BassOutputs> {
        let ctx = ProcessCtx::new(SAMPLE_RATE);
        (0..samples).map(|_| voice.process(inputs, &ctx)).collect()
    }

    fn triggered() -> BassInputs {
        BassInputs {
            trigger: Jack::patched(10.0),
            ..BassInputs::default()
        }
    }

    #[test]
    fn silent_until_triggered() {
        let mut voice = BassVoice::new(SAMPLE_RATE);
        let out = run(&mut voice, &BassInputs::default(), 256);
        assert!(out.iter().all(|o| o.out == 0.0 && o.trigger_light == 0.0));
        assert!(!voice.is_active());
    }

    #[test]
    fn jack_trigger_starts_note_and_light() {
        let mut voice = BassVoice::new(SAMPLE_RATE);
        let out = run(&mut voice, &triggered(), 4_800);

        assert!(voice.envelope() > 0.0);
        assert_eq!(out[0].trigger_light, 1.0);
        // 1 ms pulse at 48 kHz.
        assert_eq!(out[200].trigger_light, 0.0);
        assert!(out.iter().any(|o| o.out.abs() > 0.1));
        assert!(out.iter().all(|o| o.out.abs() <= 11.7));
    }

    #[test]
    fn unpatched_trigger_jack_is_ignored() {
        let mut voice = BassVoice::new(SAMPLE_RATE);
        let inputs = BassInputs {
            trigger: Jack {
                connected: false,
                voltage: 10.0,
            },
            ..BassInputs::default()
        };
        run(&mut voice, &inputs, 64);
        assert!(!voice.is_active());
    }

    #[test]
    fn button_triggers() {
        let mut voice = BassVoice::new(SAMPLE_RATE);
        let inputs = BassInputs {
            trigger_button: 1.0,
            ..BassInputs::default()
        };
        run(&mut voice, &inputs, 8);
        assert!(voice.is_active());
    }

    #[test]
    fn unplugging_voct_retriggers_at_base_pitch() {
        let mut voice = BassVoice::new(SAMPLE_RATE);
        let patched = BassInputs {
            voct: Jack::patched(1.0),
            ..BassInputs::default()
        };
        run(&mut voice, &patched, 16);
        assert!(!voice.is_active());
        assert!((voice.frequency() - 130.81).abs() < 0.1);

        run(&mut voice, &BassInputs::default(), 1);
        assert!(voice.is_active());
        assert!((voice.frequency() - 65.41).abs() < 0.05);
    }

    #[test]
    fn pitch_cv_is_limited_to_two_octaves() {
        let mut voice = BassVoice::new(SAMPLE_RATE);
        let inputs = BassInputs {
            voct: Jack::patched(8.0),
            ..BassInputs::default()
        };
        run(&mut voice, &inputs, 1);
        assert!((voice.frequency() - 65.406 * 4.0).abs() < 0.1);
    }

    #[test]
    fn aggressive_timbre_stays_bounded() {
        let mut voice = BassVoice::new(SAMPLE_RATE);
        let inputs = BassInputs {
            timbre: Timbre::Aggressive,
            decay_knob: 10.0,
            ..triggered()
        };
        let out = run(&mut voice, &inputs, 9_600);
        let peak = out.iter().fold(0.0f32, |m, o| m.max(o.out.abs()));
        assert!(peak > 0.5 && peak <= 11.7, "{peak}");
        assert!(out.iter().all(|o| o.out.is_finite()));
    }

    #[test]
    fn longer_decay_rings_longer() {
        let energy = |decay: f32| {
            let mut voice = BassVoice::new(SAMPLE_RATE);
            let inputs = BassInputs {
                decay_knob: decay,
                ..triggered()
            };
            run(&mut voice, &inputs, 24_000)
                .iter()
                .skip(12_000)
                .map(|o| o.out * o.out)
                .sum::<f32>()
        };
        assert!(energy(10.0) > energy(-10.0) * 10.0);
    }

    #[test]
    fn sample_rate_change_is_picked_up_by_process() {
        let mut voice = BassVoice::new(44_100.0);
        let ctx = ProcessCtx::new(96_000.0);
        voice.process(&triggered(), &ctx);
        assert_eq!(voice.sample_rate, 96_000.0);
    }

    #[test]
    fn degenerate_context_rate_is_configured_once() {
        let zero = ProcessCtx {
            sample_rate: 0.0,
            sample_time: 1.0,
        };
        let mut voice = BassVoice::new(SAMPLE_RATE);
        let inputs = BassInputs {
            filter_knob: -4.0,
            ..triggered()
        };

        let records = crate::test_log::records_during(|| {
            for _ in 0..1_000 {
                voice.process(&inputs, &zero);
            }
        });
        assert_eq!(records, 1);
        assert_eq!(voice.sample_rate, 1.0);

        let nan = ProcessCtx {
            sample_rate: f32::NAN,
            sample_time: f32::NAN,
        };
        let mut voice = BassVoice::new(crate::DEFAULT_SAMPLE_RATE);
        let records = crate::test_log::records_during(|| {
            for _ in 0..1_000 {
                voice.process(&inputs, &nan);
            }
        });
        assert_eq!(records, 0);
    }

    #[test]
    fn non_finite_cv_keeps_output_finite() {
        let mut voice = BassVoice::new(SAMPLE_RATE);
        let inputs = BassInputs {
            voct: Jack::patched(f32::NAN),
            decay_cv: Jack::patched(f32::INFINITY),
            ..triggered()
        };
        let out = run(&mut voice, &inputs, 4_800);
        assert!(out.iter().all(|o| o.out.is_finite()));
        assert!(voice.is_active());
    }

    #[test]
    fn reset_silences_voice() {
        let mut voice = BassVoice::new(SAMPLE_RATE);
        run(&mut voice, &triggered(), 100);
        voice.reset();
        assert!(!voice.is_active());
        let out = run(&mut voice, &BassInputs::default(), 32);
        assert!(out.iter().all(|o| o.out == 0.0));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = BassConfig {
            output_limit_v: -1.0,
            ..BassConfig::default()
        };
        assert!(BassVoice::with_config(config, SAMPLE_RATE).is_err());
        assert!(BassVoice::with_config(BassConfig::default(), SAMPLE_RATE).is_ok());
    }

    #[test]
    fn timbre_switch_mapping() {
        assert_eq!(Timbre::from_switch(1.0), Timbre::Clean);
        assert_eq!(Timbre::from_switch(0.0), Timbre::Aggressive);
    }
}
