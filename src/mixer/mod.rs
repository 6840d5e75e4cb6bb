//! Seven-channel stereo mixer.
//!
//! # Signal Flow
//!
//! ```text
//!   ch 1..7:  L/R in ─→ [mono-to-dual] ─→ [cut HP 180 Hz] ─→ × volume ─→ pan/balance ─┐
//!                                                                                      │
//!   bus:      Σ channels ─→ × master ─→ soft limit ±5 V ─→ out L/R ─→ peak meters ─→ VU lights
//! ```
//!
//! Channels that are muted, or not soloed while another channel is, are
//! skipped before any of their DSP runs.

mod bus;
mod channel;

pub use bus::MixBus;
pub use channel::{is_audible, ChannelInputs, ChannelStrip, PanCache};

use crate::config::{ConfigError, MixerConfig};
use crate::dsp::meter::SEGMENT_COUNT;
use crate::dsp::mix::StereoFrame;
use crate::module::{Module, ProcessCtx};

pub const CHANNEL_COUNT: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MixerInputs {
    pub channels: [ChannelInputs; CHANNEL_COUNT],
    /// 0..100.
    pub master: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MixerOutputs {
    pub left: f32,
    pub right: f32,
    pub vu_left: [f32; SEGMENT_COUNT],
    pub vu_right: [f32; SEGMENT_COUNT],
    pub cut_lights: [f32; CHANNEL_COUNT],
    pub mute_lights: [f32; CHANNEL_COUNT],
    pub solo_lights: [f32; CHANNEL_COUNT],
}

#[inline]
fn light(on: bool) -> f32 {
    if on {
        1.0
    } else {
        0.0
    }
}

pub struct Mixer {
    config: MixerConfig,
    sample_rate: f32,
    channels: [ChannelStrip; CHANNEL_COUNT],
    bus: MixBus,
}

impl Mixer {
    pub fn new(sample_rate: f32) -> Self {
        Self::build(MixerConfig::default(), sample_rate)
    }

    pub fn with_config(config: MixerConfig, sample_rate: f32) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, sample_rate))
    }

    fn build(config: MixerConfig, sample_rate: f32) -> Self {
        let sample_rate = ProcessCtx::new(sample_rate).sample_rate;
        Self {
            sample_rate,
            channels: std::array::from_fn(|_| {
                ChannelStrip::new(config.cut_hz, sample_rate, config.pan_epsilon)
            }),
            bus: MixBus::new(config.vu_release_s, config.vu_thresholds, sample_rate),
            config,
        }
    }

    pub fn config(&self) -> &MixerConfig {
        &self.config
    }

    /// Held VU levels in volts, left and right.
    pub fn levels(&self) -> StereoFrame {
        self.bus.levels()
    }
}

impl Module for Mixer {
    type Inputs = MixerInputs;
    type Outputs = MixerOutputs;

    fn process(&mut self, inputs: &MixerInputs, ctx: &ProcessCtx) -> MixerOutputs {
        let sample_rate = ProcessCtx::new(ctx.sample_rate).sample_rate;
        if sample_rate != self.sample_rate {
            self.set_sample_rate(sample_rate);
        }

        let any_solo = inputs.channels.iter().any(|c| c.solo);
        let mut outputs = MixerOutputs::default();
        let mut sum = StereoFrame::SILENCE;

        for (i, (strip, ch)) in self
            .channels
            .iter_mut()
            .zip(inputs.channels.iter())
            .enumerate()
        {
            outputs.cut_lights[i] = light(ch.cut);
            outputs.mute_lights[i] = light(ch.mute);
            outputs.solo_lights[i] = light(ch.solo);

            if !is_audible(ch.mute, ch.solo, any_solo) {
                continue;
            }
            sum += strip.process(ch);
        }

        let out = self.bus.process(sum, inputs.master);
        let (vu_left, vu_right) = self.bus.segments();

        outputs.left = out.left;
        outputs.right = out.right;
        outputs.vu_left = vu_left;
        outputs.vu_right = vu_right;
        outputs
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        let sr = ProcessCtx::new(sample_rate).sample_rate;
        log::debug!("mixer sample rate {} -> {}", self.sample_rate, sr);
        self.sample_rate = sr;
        for strip in &mut self.channels {
            strip.set_sample_rate(self.config.cut_hz, sr);
        }
        self.bus.set_sample_rate(sr);
    }

    fn reset(&mut self) {
        log::debug!("mixer reset");
        for strip in &mut self.channels {
            strip.reset();
        }
        self.bus.reset();
    }
}
