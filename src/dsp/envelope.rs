use crate::MIN_TIME;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Envelope Generators
===================

Three envelopes live here. None of them has a sustain stage: they are all
fired by a trigger edge and then run on their own.

Vocabulary
----------

  value / gain  The envelope's current output. Multiplies the audio signal.

  trigger       A rising edge that restarts the envelope from its initial
                state, even if it is still running (retrigger).

  coefficient   Per-sample multiplier for exponential curves:
                    coeff = exp(-1 / (time_seconds * sample_rate))
                After `time_seconds` the curve has covered 1 − 1/e ≈ 63% of
                the distance to its target.

  curve         Exponent applied to normalised progress x ∈ [0, 1]. Values
                above 1 start slow and finish fast; below 1 the opposite.


Decay Envelope
--------------

    value
    1.0 ┐╲
        │ ╲
        │  ╲__
        │     ╲____
    0.0 └──────────────────→ time
        ↑ trigger

One multiply per sample: value *= coeff. The decay time comes from a
bipolar control in [-10, +10], mapped exponentially onto [0.08 s, 0.8 s]:

    normalized = (param + 10) / 20
    time       = 0.08 · (0.8 / 0.08) ^ normalized

The envelope counts as active while value > 0.001 (−60 dB).


Micro-Attack
------------

A one-pole rise from 0 to 1 with a 0.5 ms time constant. Multiplied into the
decay envelope so a retrigger never jumps the output instantaneously: the
old note is pulled to zero and the new one fades in within a few samples.

    value = 1 − (1 − value) · coeff


Shaped Duck Envelope
--------------------

A gain curve for sidechain-style ducking. Idle gain is 1.0 (signal passes).
Two families of shapes:

  Duck   hold at a floor, then release back to unity.

    gain
    1.0 ──┐           ____────
          │        ╱╱
          │      ╱
    min   └─────╱
          hold  release

        release gain = min + (1 − min) · x^curve,   x = elapsed / release

  Fade   fall from unity to zero, optionally latching at zero.

    gain
    1.0 ──────╲
               ╲
                ╲
    0.0          ╲_________  (latched until next trigger)

        fade gain = 1 − x^curve,   x = elapsed / duration

Retriggering resets elapsed time to zero and restarts the sequence.
*/

pub const DECAY_MIN_TIME: f32 = 0.08;
pub const DECAY_MAX_TIME: f32 = 0.8;
/// Decay envelope counts as finished below this level.
pub const ACTIVE_THRESHOLD: f32 = 0.001;
/// Time constant of the anti-click attack, in seconds.
pub const MICRO_ATTACK_TIME: f32 = 0.0005;
/// Floor gain used by the duck shapes.
pub const DEFAULT_MIN_GAIN: f32 = 0.03;

/// Per-sample coefficient of an exponential approach with the given time
/// constant.
#[inline]
pub fn time_to_coeff(time_seconds: f32, sample_rate: f32) -> f32 {
    (-1.0 / (time_seconds.max(MIN_TIME * 0.01) * sample_rate.max(1.0))).exp()
}

/// Map a bipolar decay control onto seconds.
pub fn decay_time(decay_param: f32) -> f32 {
    let normalized = (decay_param.clamp(-10.0, 10.0) + 10.0) / 20.0;
    let time = DECAY_MIN_TIME * (DECAY_MAX_TIME / DECAY_MIN_TIME).powf(normalized);
    time.max(MIN_TIME)
}

/// Exponential decay, fired by `trigger`.
#[derive(Debug, Clone, Default)]
pub struct DecayEnvelope {
    value: f32,
    coeff: f32,
}

impl DecayEnvelope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restart at full level with a decay time derived from `decay_param`.
    pub fn trigger(&mut self, decay_param: f32, sample_rate: f32) {
        self.coeff = time_to_coeff(decay_time(decay_param), sample_rate);
        self.value = 1.0;
    }

    /// Advance one sample and return the new level.
    #[inline]
    pub fn process(&mut self) -> f32 {
        self.value *= self.coeff;
        self.value
    }

    pub fn is_active(&self) -> bool {
        self.value > ACTIVE_THRESHOLD
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
    }
}

/// Sub-millisecond fade-in used to de-click retriggers.
#[derive(Debug, Clone)]
pub struct MicroAttack {
    value: f32,
    coeff: f32,
    time: f32,
}

impl MicroAttack {
    pub fn new(time_seconds: f32, sample_rate: f32) -> Self {
        Self {
            value: 1.0,
            coeff: time_to_coeff(time_seconds, sample_rate),
            time: time_seconds,
        }
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.coeff = time_to_coeff(self.time, sample_rate);
    }

    /// Drop to zero; the next samples rise back toward one.
    pub fn trigger(&mut self) {
        self.value = 0.0;
    }

    #[inline]
    pub fn process(&mut self) -> f32 {
        self.value = 1.0 - (1.0 - self.value) * self.coeff;
        self.value
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Settle at unity, as if the last attack finished long ago.
    pub fn reset(&mut self) {
        self.value = 1.0;
    }
}

/// Gain curve selected for the shaped envelope.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DuckShape {
    /// Hold at the floor gain for `hold` seconds, then rise to unity over
    /// `release` seconds following `x^release_curve`.
    Duck {
        hold: f32,
        release: f32,
        release_curve: f32,
    },
    /// Fall from unity to zero over `duration` seconds following
    /// `1 − x^curve`. With `latch_at_zero` the gain stays at zero until the
    /// next trigger.
    Fade {
        duration: f32,
        curve: f32,
        latch_at_zero: bool,
    },
}

impl DuckShape {
    /// Classic pump: instant duck, medium recovery.
    pub const PUMP: Self = Self::Duck {
        hold: 0.0015,
        release: 0.180,
        release_curve: 2.2,
    };
    /// Deep: short hold at the floor, long recovery.
    pub const DEEP: Self = Self::Duck {
        hold: 0.016,
        release: 0.320,
        release_curve: 2.6,
    };
    /// Lets the kick transient through before recovering.
    pub const LET_THROUGH: Self = Self::Duck {
        hold: 0.010,
        release: 0.200,
        release_curve: 2.1,
    };
    /// Gate: fade to silence and stay there.
    pub const GATE: Self = Self::Fade {
        duration: 0.090,
        curve: 2.0,
        latch_at_zero: true,
    };

    pub const PRESETS: [Self; 4] = [Self::PUMP, Self::DEEP, Self::LET_THROUGH, Self::GATE];

    /// Total running time in seconds, not counting a latch.
    pub fn duration(&self) -> f32 {
        match *self {
            Self::Duck { hold, release, .. } => hold.max(0.0) + release.max(0.0),
            Self::Fade { duration, .. } => duration.max(0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuckStage {
    Idle,      // Gain 1.0, waiting for a trigger
    Holding,   // Pinned at the floor gain
    Releasing, // Rising back toward 1.0
    Fading,    // Falling toward 0.0
    Latched,   // Fade finished, held at 0.0 until retriggered
}

/// Attack/hold/release gain envelope for ducking.
#[derive(Debug, Clone)]
pub struct ShapedEnvelope {
    shape: DuckShape,
    min_gain: f32,
    stage: DuckStage,
    elapsed: f32,
    gain: f32,
}

impl ShapedEnvelope {
    pub fn new(shape: DuckShape, min_gain: f32) -> Self {
        Self {
            shape,
            min_gain: min_gain.clamp(0.0, 1.0),
            stage: DuckStage::Idle,
            elapsed: 0.0,
            gain: 1.0,
        }
    }

    /// Swap the curve. A running envelope continues from its elapsed time
    /// using the new shape.
    pub fn set_shape(&mut self, shape: DuckShape) {
        self.shape = shape;
    }

    pub fn shape(&self) -> DuckShape {
        self.shape
    }

    /// Start (or restart) the shape from time zero.
    pub fn trigger(&mut self) {
        self.elapsed = 0.0;
        self.stage = match self.shape {
            DuckShape::Duck { .. } => DuckStage::Holding,
            DuckShape::Fade { .. } => DuckStage::Fading,
        };
    }

    /// Gain for the current sample, then advance time by `sample_time`.
    #[inline]
    pub fn process(&mut self, sample_time: f32) -> f32 {
        self.gain = match self.stage {
            DuckStage::Idle => 1.0,
            DuckStage::Latched => 0.0,
            _ => self.running_gain(),
        };

        if !matches!(self.stage, DuckStage::Idle | DuckStage::Latched) {
            self.elapsed += sample_time;
        }

        self.gain
    }

    fn running_gain(&mut self) -> f32 {
        let t = self.elapsed;
        match self.shape {
            DuckShape::Duck {
                hold,
                release,
                release_curve,
            } => {
                if t < hold {
                    self.stage = DuckStage::Holding;
                    return self.min_gain;
                }

                let into_release = t - hold.max(0.0);
                if release <= 0.0 || into_release >= release {
                    self.stage = DuckStage::Idle;
                    return 1.0;
                }

                self.stage = DuckStage::Releasing;
                let x = (into_release / release).clamp(0.0, 1.0);
                self.min_gain + (1.0 - self.min_gain) * x.powf(release_curve)
            }
            DuckShape::Fade {
                duration,
                curve,
                latch_at_zero,
            } => {
                if duration <= 0.0 || t >= duration {
                    if latch_at_zero {
                        self.stage = DuckStage::Latched;
                        return 0.0;
                    }
                    self.stage = DuckStage::Idle;
                    return 1.0;
                }

                self.stage = DuckStage::Fading;
                let x = (t / duration).clamp(0.0, 1.0);
                1.0 - x.powf(curve)
            }
        }
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    pub fn stage(&self) -> DuckStage {
        self.stage
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.stage, DuckStage::Idle)
    }

    pub fn reset(&mut self) {
        self.stage = DuckStage::Idle;
        self.elapsed = 0.0;
        self.gain = 1.0;
    }
}
