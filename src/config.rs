//! Construction-time settings for the voices and the mixer.
//!
//! Processing never fails; the only fallible step is building a processor
//! from a config. Each config has a `validate` that names the first bad field.

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::envelope::{DuckShape, DEFAULT_MIN_GAIN, MICRO_ATTACK_TIME};
use crate::dsp::meter::{DEFAULT_RELEASE_TIME, DEFAULT_THRESHOLDS, SEGMENT_COUNT};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be greater than zero, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("{field} must lie in [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },
}

fn finite(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if finite(field, value)? > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn in_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    let value = finite(field, value)?;
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

/// Log and pass through a validation result.
fn report<T>(kind: &str, result: Result<T, ConfigError>) -> Result<T, ConfigError> {
    if let Err(err) = &result {
        log::warn!("rejected {kind} config: {err}");
    }
    result
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct BassConfig {
    /// Pitch of an unpatched V/Oct input, in volts (A4 = 0 V).
    pub base_pitch_v: f32,
    /// Pitch CV is clamped to ±this many volts.
    pub pitch_cv_range_v: f32,
    /// Oscillator frequency is kept below this fraction of the sample rate.
    pub nyquist_guard: f32,
    pub micro_attack_s: f32,
    pub dc_block_hz: f32,
    pub pre_highpass_hz: f32,
    pub post_lowpass_hz: f32,
    pub pulse_width: f32,
    pub output_gain: f32,
    pub output_limit_v: f32,
    pub trigger_low_v: f32,
    pub trigger_high_v: f32,
    pub trigger_light_s: f32,
}

impl Default for BassConfig {
    fn default() -> Self {
        Self {
            base_pitch_v: -2.75,
            pitch_cv_range_v: 2.0,
            nyquist_guard: 0.45,
            micro_attack_s: MICRO_ATTACK_TIME,
            dc_block_hz: 20.0,
            pre_highpass_hz: 45.0,
            post_lowpass_hz: 6_000.0,
            pulse_width: 0.48,
            output_gain: 5.0,
            output_limit_v: 11.7,
            trigger_low_v: 0.1,
            trigger_high_v: 1.0,
            trigger_light_s: 0.001,
        }
    }
}

impl BassConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        report("bass", self.check())
    }

    fn check(&self) -> Result<(), ConfigError> {
        finite("base_pitch_v", self.base_pitch_v)?;
        positive("pitch_cv_range_v", self.pitch_cv_range_v)?;
        in_range("nyquist_guard", self.nyquist_guard, 0.01, 0.5)?;
        positive("micro_attack_s", self.micro_attack_s)?;
        positive("dc_block_hz", self.dc_block_hz)?;
        positive("pre_highpass_hz", self.pre_highpass_hz)?;
        positive("post_lowpass_hz", self.post_lowpass_hz)?;
        in_range("pulse_width", self.pulse_width, 0.05, 0.95)?;
        positive("output_gain", self.output_gain)?;
        positive("output_limit_v", self.output_limit_v)?;
        finite("trigger_low_v", self.trigger_low_v)?;
        in_range(
            "trigger_high_v",
            self.trigger_high_v,
            self.trigger_low_v,
            f32::MAX,
        )?;
        positive("trigger_light_s", self.trigger_light_s)
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct MixerConfig {
    pub cut_hz: f32,
    pub vu_release_s: f32,
    /// Fractions of 5 V full scale at which each VU segment lights.
    pub vu_thresholds: [f32; SEGMENT_COUNT],
    /// Pan gains are reused while the knob moves less than this.
    pub pan_epsilon: f32,
}

impl Default for MixerConfig {
    fn default() -> Self {
        Self {
            cut_hz: 180.0,
            vu_release_s: DEFAULT_RELEASE_TIME,
            vu_thresholds: DEFAULT_THRESHOLDS,
            pan_epsilon: 1e-6,
        }
    }
}

impl MixerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        report("mixer", self.check())
    }

    fn check(&self) -> Result<(), ConfigError> {
        positive("cut_hz", self.cut_hz)?;
        positive("vu_release_s", self.vu_release_s)?;
        for &threshold in &self.vu_thresholds {
            in_range("vu_thresholds", threshold, 0.0, 1.0)?;
        }
        in_range("pan_epsilon", self.pan_epsilon, 0.0, 0.1)
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PumpConfig {
    /// Floor gain while a duck shape is holding.
    pub min_gain: f32,
    /// Shapes selected by the shape button, in cycling order.
    pub shapes: [DuckShape; 4],
}

impl Default for PumpConfig {
    fn default() -> Self {
        Self {
            min_gain: DEFAULT_MIN_GAIN,
            shapes: DuckShape::PRESETS,
        }
    }
}

impl PumpConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        report("pump", self.check())
    }

    fn check(&self) -> Result<(), ConfigError> {
        in_range("min_gain", self.min_gain, 0.0, 1.0)?;
        for shape in &self.shapes {
            match *shape {
                DuckShape::Duck {
                    hold,
                    release,
                    release_curve,
                } => {
                    in_range("shapes.hold", hold, 0.0, 10.0)?;
                    positive("shapes.release", release)?;
                    positive("shapes.release_curve", release_curve)?;
                }
                DuckShape::Fade {
                    duration, curve, ..
                } => {
                    positive("shapes.duration", duration)?;
                    positive("shapes.curve", curve)?;
                }
            }
        }
        Ok(())
    }
}
