use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Band-Limited Oscillator (PolyBLEP)
==================================

A naive sawtooth jumps from +1 to -1 in a single sample. That discontinuity
contains energy at every frequency, and everything above Nyquist folds back
into the audible band as inharmonic "aliasing" tones.

PolyBLEP (polynomial band-limited step) replaces the ideal step with a short
polynomial ramp spanning one sample on each side of the jump:

    naive saw            polyblep saw
     ╱│  ╱│  ╱│           ╱╲  ╱╲  ╱╲
    ╱ │ ╱ │ ╱ │          ╱  ╲╱  ╲╱  ╲
      │╱  │╱  │╱

With t the phase and dt the per-sample phase increment:

    t < dt       (just after the edge):  u = t/dt;        u + u − u² − 1
    t > 1 − dt   (just before the edge): u = (t − 1)/dt;  u² + u + u + 1
    otherwise                            0

The saw subtracts one correction at its wrap. A pulse has two edges, rising
at phase 0 and falling at phase = pwm, so it adds one correction and
subtracts another evaluated at the phase shifted by pwm.

Phase Model
-----------

The oscillator keeps two phases in [0, 1):

  phase       advances by dt = freq / sample_rate
  sub_phase   advances by dt / 2, one octave below

`advance()` is the only thing that moves time forward and must be called once
per sample. Reading any waveform is a pure function of the current phases, so
a voice can read sine, triangle, saw and pulse from the same sample without
the shapes drifting apart.
*/

pub const MIN_FREQ: f32 = 10.0;
pub const MAX_FREQ: f32 = 12_000.0;
pub const MIN_PWM: f32 = 0.05;
pub const MAX_PWM: f32 = 0.95;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
    Saw,
    Square,
    SubSine,
}

/// Polynomial band-limited step correction around a discontinuity at t = 0.
#[inline]
pub fn poly_blep(t: f32, dt: f32) -> f32 {
    if dt <= 0.0 {
        return 0.0;
    }
    if t < dt {
        let u = t / dt;
        u + u - u * u - 1.0
    } else if t > 1.0 - dt {
        let u = (t - 1.0) / dt;
        u * u + u + u + 1.0
    } else {
        0.0
    }
}

#[derive(Debug, Clone)]
pub struct PolyBlepOscillator {
    phase: f32,
    sub_phase: f32,
    freq: f32,
    sample_rate: f32,
    dt: f32,
}

impl PolyBlepOscillator {
    pub fn new(freq: f32, sample_rate: f32) -> Self {
        let mut osc = Self {
            phase: 0.0,
            sub_phase: 0.0,
            freq: 100.0,
            sample_rate: sample_rate.max(1.0),
            dt: 0.0,
        };
        osc.set_freq(freq);
        osc
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate.max(1.0);
        self.dt = self.freq / self.sample_rate;
    }

    /// Set the pitch in Hz, clamped to [10, 12000].
    pub fn set_freq(&mut self, freq: f32) {
        self.freq = if freq.is_finite() {
            freq.clamp(MIN_FREQ, MAX_FREQ)
        } else {
            MIN_FREQ
        };
        self.dt = self.freq / self.sample_rate;
    }

    pub fn freq(&self) -> f32 {
        self.freq
    }

    /// Phase increment per sample.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn sub_phase(&self) -> f32 {
        self.sub_phase
    }

    /// Jump to a phase in [0, 1). The sub-octave phase is left alone.
    pub fn set_phase(&mut self, phase: f32) {
        self.phase = phase.rem_euclid(1.0);
    }

    pub fn reset_phase(&mut self) {
        self.phase = 0.0;
        self.sub_phase = 0.0;
    }

    /// Move both phases forward by one sample.
    #[inline]
    pub fn advance(&mut self) {
        // dt can exceed 1 at very low sample rates.
        self.phase = (self.phase + self.dt).fract();
        self.sub_phase = (self.sub_phase + 0.5 * self.dt).fract();
    }

    #[inline]
    pub fn sine(&self) -> f32 {
        (TAU * self.phase).sin()
    }

    /// Naive triangle. Its discontinuities are in the slope only, so
    /// aliasing is already low.
    #[inline]
    pub fn triangle(&self) -> f32 {
        let t = 2.0 * self.phase - 1.0;
        2.0 * t.abs() - 1.0
    }

    #[inline]
    pub fn saw(&self) -> f32 {
        (2.0 * self.phase - 1.0) - poly_blep(self.phase, self.dt)
    }

    /// Pulse with duty cycle `pwm`, clamped to [0.05, 0.95].
    #[inline]
    pub fn square(&self, pwm: f32) -> f32 {
        let pwm = pwm.clamp(MIN_PWM, MAX_PWM);
        let mut y = if self.phase < pwm { 1.0 } else { -1.0 };
        y += poly_blep(self.phase, self.dt);

        let mut t = self.phase - pwm;
        if t < 0.0 {
            t += 1.0;
        }
        y - poly_blep(t, self.dt)
    }

    /// Sine one octave below the main pitch.
    #[inline]
    pub fn sub_sine(&self) -> f32 {
        (TAU * self.sub_phase).sin()
    }

    /// Read any waveform by name. Square uses a 50% duty cycle.
    pub fn read(&self, waveform: Waveform) -> f32 {
        match waveform {
            Waveform::Sine => self.sine(),
            Waveform::Triangle => self.triangle(),
            Waveform::Saw => self.saw(),
            Waveform::Square => self.square(0.5),
            Waveform::SubSine => self.sub_sine(),
        }
    }
}
