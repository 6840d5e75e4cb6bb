//! Pump: a trigger-driven stereo ducker.
//!
//! Each trigger runs the selected `DuckShape` and multiplies the input by its
//! gain, producing the "pumping" of a sidechained compressor without needing
//! a sidechain signal.
//!
//! # Controls
//!
//! - Trigger jack and manual button start the envelope
//! - Shape button steps through the four shapes (A → B → C → D → A)
//! - Dry/wet blends the untouched input with the ducked one
//!
//! Right input is normalled to left, so a mono source on L comes out on both
//! sides.

use crate::config::{ConfigError, PumpConfig};
use crate::dsp::envelope::{DuckShape, ShapedEnvelope};
use crate::dsp::mix::{blend_frames, StereoFrame};
use crate::dsp::pan::finite_or;
use crate::dsp::trigger::SchmittTrigger;
use crate::io::Jack;
use crate::module::{Module, ProcessCtx};

pub const SHAPE_COUNT: usize = 4;

const TRIGGER_LOW: f32 = 0.0;
const TRIGGER_HIGH: f32 = 1.0;
const SHAPE_LIGHT_IDLE: f32 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PumpInputs {
    pub left: Jack,
    pub right: Jack,
    pub trigger: Jack,
    /// Momentary button, 0 or 1.
    pub trigger_button: f32,
    /// Momentary button, 0 or 1.
    pub shape_button: f32,
    /// 0 = dry, 1 = fully ducked.
    pub mix: f32,
}

impl Default for PumpInputs {
    fn default() -> Self {
        Self {
            left: Jack::disconnected(),
            right: Jack::disconnected(),
            trigger: Jack::disconnected(),
            trigger_button: 0.0,
            shape_button: 0.0,
            mix: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PumpOutputs {
    pub left: f32,
    pub right: f32,
    /// One light per shape, 1.0 on the selected one.
    pub shape_lights: [f32; SHAPE_COUNT],
    pub shape_button_light: f32,
    /// Duck depth, 0 when the input passes untouched.
    pub trigger_light: f32,
}

pub struct Pump {
    config: PumpConfig,
    sample_rate: f32,
    shape_index: usize,
    env: ShapedEnvelope,
    shape_button: SchmittTrigger,
    trigger_button: SchmittTrigger,
    trigger_in: SchmittTrigger,
}

impl Pump {
    pub fn new(sample_rate: f32) -> Self {
        Self::build(PumpConfig::default(), sample_rate)
    }

    pub fn with_config(config: PumpConfig, sample_rate: f32) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, sample_rate))
    }

    fn build(config: PumpConfig, sample_rate: f32) -> Self {
        Self {
            sample_rate: ProcessCtx::new(sample_rate).sample_rate,
            shape_index: 0,
            env: ShapedEnvelope::new(config.shapes[0], config.min_gain),
            shape_button: SchmittTrigger::new(),
            trigger_button: SchmittTrigger::new(),
            trigger_in: SchmittTrigger::new(),
            config,
        }
    }

    pub fn shape_index(&self) -> usize {
        self.shape_index
    }

    pub fn shape(&self) -> DuckShape {
        self.config.shapes[self.shape_index]
    }

    /// Select a shape directly. Out-of-range indices wrap.
    pub fn set_shape(&mut self, index: usize) {
        self.select_shape(index);
        log::debug!("pump shape -> {} ({:?})", self.shape_index, self.shape());
    }

    #[inline]
    fn select_shape(&mut self, index: usize) {
        self.shape_index = index % SHAPE_COUNT;
        self.env.set_shape(self.config.shapes[self.shape_index]);
    }

    /// Fire the envelope as if the trigger button had been pressed.
    pub fn trigger(&mut self) {
        self.env.trigger();
    }

    pub fn gain(&self) -> f32 {
        self.env.gain()
    }
}

impl Module for Pump {
    type Inputs = PumpInputs;
    type Outputs = PumpOutputs;

    fn process(&mut self, inputs: &PumpInputs, ctx: &ProcessCtx) -> PumpOutputs {
        let sample_rate = ProcessCtx::new(ctx.sample_rate).sample_rate;
        if sample_rate != self.sample_rate {
            self.set_sample_rate(sample_rate);
        }

        if self
            .shape_button
            .process(inputs.shape_button, TRIGGER_LOW, TRIGGER_HIGH)
        {
            self.select_shape(self.shape_index + 1);
        }

        let mut fired = self
            .trigger_button
            .process(inputs.trigger_button, TRIGGER_LOW, TRIGGER_HIGH);
        if inputs.trigger.connected {
            fired |= self
                .trigger_in
                .process(inputs.trigger.voltage, TRIGGER_LOW, TRIGGER_HIGH);
        }
        if fired {
            self.env.trigger();
        }

        let gain = self.env.process(ctx.sample_time);

        let left = finite_or(inputs.left.voltage_or(0.0), 0.0);
        let right = finite_or(inputs.right.voltage_or(left), 0.0);
        let dry = StereoFrame::new(left, right);
        let wet = dry * gain;
        let out = blend_frames(dry, wet, finite_or(inputs.mix, 1.0));

        let mut shape_lights = [0.0; SHAPE_COUNT];
        shape_lights[self.shape_index] = 1.0;

        PumpOutputs {
            left: out.left,
            right: out.right,
            shape_lights,
            shape_button_light: SHAPE_LIGHT_IDLE
                + (1.0 - SHAPE_LIGHT_IDLE) * inputs.shape_button.clamp(0.0, 1.0),
            trigger_light: (1.0 - gain).clamp(0.0, 1.0),
        }
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        // Shapes are timed in seconds, so only the recorded rate changes.
        let sr = ProcessCtx::new(sample_rate).sample_rate;
        log::debug!("pump sample rate {} -> {}", self.sample_rate, sr);
        self.sample_rate = sr;
    }

    fn reset(&mut self) {
        log::debug!("pump reset");
        self.env.reset();
        self.shape_button.reset();
        self.trigger_button.reset();
        self.trigger_in.reset();
    }
}
