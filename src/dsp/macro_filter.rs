//! Single-knob "DJ" filter: low-pass below zero, bypass at zero, high-pass
//! above zero.

/*
Macro Filter
============

One control value `filter_param` in [-10, +10] sweeps the whole range:

    -10 ─────────────── 0 ─────────────── +10
    LP @ 20 Hz    LP @ 20 kHz | HP @ 20 Hz    HP @ 20 kHz
                           bypass

Cutoff is logarithmic in the knob position. For the low-pass side:

    cutoff = 10 ^ rescale(param, -10, 0, log10(20), log10(20000))

and the high-pass side mirrors it on [0, +10]. So each side covers three
decades over ten volts, about 3.3 V per decade.

Resonance follows the distance from center ("amount" = |param| / 10):

    Q = 0.707 + (2.5 − 0.707) · amount^1.35

so the filter is flat near bypass and gets a resonant edge as it closes in.

Each branch owns its own biquad and its own (param, sample rate) cache. The
cache is per instance: two bass voices never share filter coefficients.
*/

use super::filter::{Biquad, BiquadKind, ParamCache, BUTTERWORTH_Q};

pub const MACRO_RANGE: f32 = 10.0;
pub const MIN_CUTOFF_HZ: f32 = 20.0;
pub const MAX_CUTOFF_HZ: f32 = 20_000.0;
pub const MAX_Q: f32 = 2.5;
const Q_CURVE: f32 = 1.35;

/// Linear map of `x` from [in_lo, in_hi] onto [out_lo, out_hi].
#[inline]
pub fn rescale(x: f32, in_lo: f32, in_hi: f32, out_lo: f32, out_hi: f32) -> f32 {
    out_lo + (x - in_lo) * (out_hi - out_lo) / (in_hi - in_lo)
}

/// Cutoff frequency for a macro value. The sign selects the branch, the
/// magnitude the position along it.
pub fn macro_cutoff_hz(filter_param: f32) -> f32 {
    let param = filter_param.clamp(-MACRO_RANGE, MACRO_RANGE);
    let (lo, hi) = (MIN_CUTOFF_HZ.log10(), MAX_CUTOFF_HZ.log10());
    let exponent = if param < 0.0 {
        rescale(param, -MACRO_RANGE, 0.0, lo, hi)
    } else {
        rescale(param, 0.0, MACRO_RANGE, lo, hi)
    };
    10.0f32.powf(exponent)
}

/// Resonance for a macro value: flat at the center, 2.5 at either end.
pub fn macro_q(filter_param: f32) -> f32 {
    let amount = (filter_param.abs() / MACRO_RANGE).clamp(0.0, 1.0);
    BUTTERWORTH_Q + (MAX_Q - BUTTERWORTH_Q) * amount.powf(Q_CURVE)
}

/// One side of the macro filter: a biquad that only re-derives its
/// coefficients when (param, sample rate) changes.
#[derive(Debug, Clone)]
pub struct CachedBiquad {
    filter: Biquad,
    cache: ParamCache<2>,
}

impl CachedBiquad {
    pub fn new(kind: BiquadKind) -> Self {
        Self {
            filter: Biquad::new(kind),
            cache: ParamCache::new(),
        }
    }

    /// Filter one sample. Returns the input untouched unless `filter_param`
    /// lies on this branch's side of zero.
    #[inline]
    pub fn process(&mut self, input: f32, filter_param: f32, sample_rate: f32) -> f32 {
        let active = match self.filter.kind() {
            BiquadKind::LowPass => filter_param < 0.0,
            BiquadKind::HighPass => filter_param > 0.0,
        };
        if !active {
            return input;
        }

        if self.cache.update([filter_param, sample_rate]) {
            self.filter.set_cutoff(
                macro_cutoff_hz(filter_param),
                sample_rate,
                macro_q(filter_param),
            );
        }
        self.filter.process(input)
    }

    pub fn reset(&mut self) {
        self.filter.reset();
    }

    /// Drop cached coefficients so the next sample recomputes them.
    pub fn invalidate(&mut self) {
        self.cache.invalidate();
    }
}

/// Low-pass and high-pass branches in series. At most one is ever active.
#[derive(Debug, Clone)]
pub struct MacroFilter {
    low: CachedBiquad,
    high: CachedBiquad,
}

impl MacroFilter {
    pub fn new() -> Self {
        Self {
            low: CachedBiquad::new(BiquadKind::LowPass),
            high: CachedBiquad::new(BiquadKind::HighPass),
        }
    }

    #[inline]
    pub fn process(&mut self, input: f32, filter_param: f32, sample_rate: f32) -> f32 {
        let param = if filter_param.is_finite() {
            filter_param.clamp(-MACRO_RANGE, MACRO_RANGE)
        } else {
            0.0
        };
        let x = self.low.process(input, param, sample_rate);
        self.high.process(x, param, sample_rate)
    }

    pub fn reset(&mut self) {
        self.low.reset();
        self.high.reset();
    }

    pub fn invalidate(&mut self) {
        self.low.invalidate();
        self.high.invalidate();
    }
}

impl Default for MacroFilter {
    fn default() -> Self {
        Self::new()
    }
}
