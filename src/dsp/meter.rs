//! Peak-hold level metering and LED segment mapping.

/*
Peak-Hold Metering
==================

A VU-style meter should jump to a new peak immediately and fall back slowly,
otherwise short transients never show up on the lights.

    level
      │    ┌╮
      │    │ ╲__
      │    │    ╲___
      │ ┌╮ │        ╲_____
      │ │╰─┘              ╲______
      └──────────────────────────── time
        ↑ rise: instant   ↑ release: exponential

Per sample:

    smoothed = vu · (1 − release) + |x| · release
    vu       = max(|x|, smoothed)

`release` is the fraction of the gap closed each sample. It is derived from a
time constant so the fall rate does not depend on the sample rate:

    release = 1 − exp(−1 / (t · sample_rate))

Segments
--------

The held peak lights a row of five LEDs. Segment i is on (1.0) when the peak
reaches thresholds[i] × 5 V, otherwise off (0.0).
*/

use crate::FULL_SCALE_V;

pub const SEGMENT_COUNT: usize = 5;
pub const DEFAULT_RELEASE_TIME: f32 = 0.020;
pub const DEFAULT_THRESHOLDS: [f32; SEGMENT_COUNT] = [0.05, 0.12, 0.25, 0.50, 0.90];

/// One step of the peak-hold recurrence.
#[inline]
pub fn peak_hold(previous: f32, magnitude: f32, release: f32) -> f32 {
    let smoothed = previous * (1.0 - release) + magnitude * release;
    magnitude.max(smoothed)
}

/// Release fraction per sample for a given time constant.
#[inline]
pub fn release_coefficient(time_seconds: f32, sample_rate: f32) -> f32 {
    let samples = time_seconds.max(1e-5) * sample_rate.max(1.0);
    1.0 - (-1.0 / samples).exp()
}

/// Light levels for a held peak in volts, relative to 5 V full scale.
pub fn vu_segments(peak: f32, thresholds: &[f32; SEGMENT_COUNT]) -> [f32; SEGMENT_COUNT] {
    let mut lights = [0.0; SEGMENT_COUNT];
    for (light, &threshold) in lights.iter_mut().zip(thresholds.iter()) {
        if peak >= threshold * FULL_SCALE_V {
            *light = 1.0;
        }
    }
    lights
}

#[derive(Debug, Clone)]
pub struct PeakMeter {
    level: f32,
    release: f32,
    release_time: f32,
}

impl PeakMeter {
    pub fn new(release_time: f32, sample_rate: f32) -> Self {
        Self {
            level: 0.0,
            release: release_coefficient(release_time, sample_rate),
            release_time,
        }
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.release = release_coefficient(self.release_time, sample_rate);
    }

    /// Feed one sample and return the held level.
    #[inline]
    pub fn process(&mut self, sample: f32) -> f32 {
        self.level = peak_hold(self.level, sample.abs(), self.release);
        self.level
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn release(&self) -> f32 {
        self.release
    }

    pub fn reset(&mut self) {
        self.level = 0.0;
    }
}
