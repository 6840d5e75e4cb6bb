//! The patch the demo host plays: bass → pump → mixer.

use tl_dsp::io::{ControlMessage, Jack, MessageReceiver, ParamTarget};
use tl_dsp::mixer::MixerInputs;
use tl_dsp::voices::{BassInputs, PumpInputs, Timbre};
use tl_dsp::{BassVoice, Mixer, Module, ProcessCtx, Pump, FULL_SCALE_V};

/// Length of the gate sent to the bass trigger jack.
const GATE_SECONDS: f32 = 0.005;
const GATE_VOLTAGE: f32 = 10.0;

pub struct Rack<R> {
    controls: R,
    ctx: ProcessCtx,
    bass: BassVoice,
    pump: Pump,
    mixer: Mixer,
    bass_inputs: BassInputs,
    pump_inputs: PumpInputs,
    mixer_inputs: MixerInputs,
    gate_remaining: usize,
}

impl<R: MessageReceiver> Rack<R> {
    pub fn new(controls: R, sample_rate: f32) -> Self {
        let ctx = ProcessCtx::new(sample_rate);

        let mut mixer_inputs = MixerInputs {
            master: 80.0,
            ..MixerInputs::default()
        };
        // Channel 1: pumped bass in stereo. Channel 2: a little dry bass on
        // the right.
        mixer_inputs.channels[0].volume = 8.0;
        mixer_inputs.channels[1].volume = 3.0;
        mixer_inputs.channels[1].pan = 0.4;

        Self {
            controls,
            ctx,
            bass: BassVoice::new(ctx.sample_rate),
            pump: Pump::new(ctx.sample_rate),
            mixer: Mixer::new(ctx.sample_rate),
            bass_inputs: BassInputs {
                trigger: Jack::patched(0.0),
                decay_knob: -2.0,
                timbre: Timbre::Aggressive,
                ..BassInputs::default()
            },
            pump_inputs: PumpInputs {
                trigger: Jack::patched(0.0),
                mix: 0.7,
                ..PumpInputs::default()
            },
            mixer_inputs,
            gate_remaining: 0,
        }
    }

    fn apply(&mut self, message: ControlMessage) {
        match message {
            ControlMessage::Trigger => {
                self.gate_remaining = (GATE_SECONDS * self.ctx.sample_rate) as usize;
            }
            ControlMessage::Reset => {
                self.bass.reset();
                self.pump.reset();
                self.mixer.reset();
                self.gate_remaining = 0;
            }
            ControlMessage::SetParam { target, value } => self.set_param(target, value),
        }
    }

    fn set_param(&mut self, target: ParamTarget, value: f32) {
        let channels = &mut self.mixer_inputs.channels;
        match target {
            ParamTarget::BassDecay => self.bass_inputs.decay_knob = value,
            ParamTarget::BassFilter => self.bass_inputs.filter_knob = value,
            ParamTarget::BassTimbre => self.bass_inputs.timbre = Timbre::from_switch(value),
            ParamTarget::PumpShape => self.pump.set_shape(value.max(0.0) as usize),
            ParamTarget::PumpMix => self.pump_inputs.mix = value,
            ParamTarget::Master => self.mixer_inputs.master = value,
            ParamTarget::ChannelVolume(i) => {
                if let Some(ch) = channels.get_mut(i) {
                    ch.volume = value;
                }
            }
            ParamTarget::ChannelPan(i) => {
                if let Some(ch) = channels.get_mut(i) {
                    ch.pan = value;
                }
            }
            ParamTarget::ChannelMute(i) => {
                if let Some(ch) = channels.get_mut(i) {
                    ch.mute = value > 0.5;
                }
            }
            ParamTarget::ChannelSolo(i) => {
                if let Some(ch) = channels.get_mut(i) {
                    ch.solo = value > 0.5;
                }
            }
            ParamTarget::ChannelCut(i) => {
                if let Some(ch) = channels.get_mut(i) {
                    ch.cut = value > 0.5;
                }
            }
        }
    }

    /// One frame through the whole patch, in volts.
    fn frame(&mut self) -> (f32, f32) {
        let gate = self.gate_remaining > 0;
        self.gate_remaining = self.gate_remaining.saturating_sub(1);
        self.bass_inputs.trigger.voltage = if gate { GATE_VOLTAGE } else { 0.0 };

        let bass = self.bass.process(&self.bass_inputs, &self.ctx);

        // The bass trigger light doubles as the pump's sidechain trigger.
        self.pump_inputs.left = Jack::patched(bass.out);
        self.pump_inputs.trigger.voltage = bass.trigger_light * GATE_VOLTAGE;
        let pumped = self.pump.process(&self.pump_inputs, &self.ctx);

        let channels = &mut self.mixer_inputs.channels;
        channels[0].left = Jack::patched(pumped.left);
        channels[0].right = Jack::patched(pumped.right);
        channels[1].left = Jack::patched(bass.out);

        let mixed = self.mixer.process(&self.mixer_inputs, &self.ctx);
        (mixed.left, mixed.right)
    }

    /// Fill an interleaved output buffer. Control messages are drained once
    /// per call.
    pub fn render(&mut self, data: &mut [f32], channels: usize) {
        while let Some(message) = self.controls.pop() {
            self.apply(message);
        }

        for frame in data.chunks_mut(channels.max(1)) {
            let (left, right) = self.frame();
            let (left, right) = (left / FULL_SCALE_V, right / FULL_SCALE_V);
            for (ch, sample) in frame.iter_mut().enumerate() {
                *sample = if ch % 2 == 0 { left } else { right };
            }
        }
    }
}
