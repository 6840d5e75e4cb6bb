use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
| type              | constructed by          | order | passes       | rejects      |
| ----------------- | ----------------------- | ----- | ------------ | ------------ |
| one-pole HP (HP1) | OnePoleHighPass::new    | 1st   | above cutoff | below cutoff |
| one-pole LP       | OnePoleLowPass::new     | 1st   | below cutoff | above cutoff |
| biquad LP         | Biquad::lowpass         | 2nd   | below cutoff | above cutoff |
| biquad HP         | Biquad::highpass        | 2nd   | above cutoff | below cutoff |

Filters in this module run one sample at a time and own their history cells.
Coefficients are derived from (cutoff, Q, sample rate) and are only
recomputed when that tuple changes, which keeps tan/sin/cos/exp off the
per-sample path when a knob is not moving.


One-Pole Filters
----------------

Both one-pole designs come from the RC circuit discretised with a time step
dt = 1/sample_rate:

    RC = 1 / (2π·fc)

    high-pass:  a = RC / (RC + dt)      y[n] = a·(y[n-1] + x[n] − x[n-1])
    low-pass:   α = dt / (RC + dt)      y[n] = y[n-1] + α·(x[n] − y[n-1])

6 dB/octave slopes. Cheap, unconditionally stable, no resonance. Used for DC
blocking, tone trimming and the mixer's "cut" switch.


Biquad (RBJ cookbook)
---------------------

A second-order section with five coefficients:

    ω0    = 2π·fc / fs
    alpha = sin(ω0) / (2·Q)

    low-pass:  b0 = (1 − cos ω0)/2   b1 = 1 − cos ω0      b2 = b0
    high-pass: b0 = (1 + cos ω0)/2   b1 = −(1 + cos ω0)   b2 = b0
    both:      a0 = 1 + alpha        a1 = −2·cos ω0       a2 = 1 − alpha

Everything is divided by a0 so the stored a0 is 1. Processing uses the
transposed direct form II, which needs two state cells:

    y  = b0·x + z1
    z1 = b1·x − a1·y + z2
    z2 = b2·x − a2·y

Q = 0.707 gives a maximally flat (Butterworth) response. Larger Q produces a
resonant bump at the cutoff.
*/

/// Q of a maximally flat second-order response.
pub const BUTTERWORTH_Q: f32 = 0.707;

const MIN_BIQUAD_CUTOFF: f32 = 20.0;
const MIN_ONE_POLE_CUTOFF: f32 = 1.0;
const MIN_Q: f32 = 1e-4;
/// Biquad cutoffs are kept below this fraction of the sample rate.
const MAX_CUTOFF_RATIO: f32 = 0.49;

/// Remembers the last parameter tuple a derived value was computed from.
///
/// `update` answers "do I need to recompute?" and records the new tuple when
/// the answer is yes. With an epsilon of zero only exact repeats are skipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamCache<const N: usize> {
    last: Option<[f32; N]>,
    epsilon: f32,
}

impl<const N: usize> ParamCache<N> {
    pub const fn new() -> Self {
        Self {
            last: None,
            epsilon: 0.0,
        }
    }

    pub const fn with_epsilon(epsilon: f32) -> Self {
        Self {
            last: None,
            epsilon,
        }
    }

    /// Returns `true` when `params` differs from the last recorded tuple by
    /// more than epsilon in any position.
    #[inline]
    pub fn update(&mut self, params: [f32; N]) -> bool {
        if let Some(last) = self.last {
            let unchanged = last
                .iter()
                .zip(params.iter())
                .all(|(a, b)| (a - b).abs() <= self.epsilon);
            if unchanged {
                return false;
            }
        }

        self.last = Some(params);
        true
    }

    /// Forget the last tuple so the next `update` always recomputes.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    pub fn last(&self) -> Option<[f32; N]> {
        self.last
    }
}

impl<const N: usize> Default for ParamCache<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// First-order RC high-pass ("HP1").
#[derive(Debug, Clone)]
pub struct OnePoleHighPass {
    a: f32,
    y1: f32,
    x1: f32,
    cache: ParamCache<2>,
}

impl OnePoleHighPass {
    pub fn new(cutoff_hz: f32, sample_rate: f32) -> Self {
        let mut filter = Self {
            a: 0.0,
            y1: 0.0,
            x1: 0.0,
            cache: ParamCache::new(),
        };
        filter.set_cutoff(cutoff_hz, sample_rate);
        filter
    }

    /// Returns `true` if the coefficient was recomputed.
    pub fn set_cutoff(&mut self, cutoff_hz: f32, sample_rate: f32) -> bool {
        let fc = cutoff_hz.max(MIN_ONE_POLE_CUTOFF);
        let sample_rate = sample_rate.max(1.0);
        if !self.cache.update([fc, sample_rate]) {
            return false;
        }

        let dt = 1.0 / sample_rate;
        let rc = 1.0 / (TAU * fc);
        self.a = rc / (rc + dt);
        true
    }

    #[inline]
    pub fn process(&mut self, x: f32) -> f32 {
        let y = self.a * (self.y1 + x - self.x1);
        self.y1 = y;
        self.x1 = x;
        y
    }

    pub fn reset(&mut self) {
        self.y1 = 0.0;
        self.x1 = 0.0;
    }

    pub fn coefficient(&self) -> f32 {
        self.a
    }
}

/// First-order RC low-pass.
#[derive(Debug, Clone)]
pub struct OnePoleLowPass {
    alpha: f32,
    y: f32,
    cache: ParamCache<2>,
}

impl OnePoleLowPass {
    pub fn new(cutoff_hz: f32, sample_rate: f32) -> Self {
        let mut filter = Self {
            alpha: 1.0,
            y: 0.0,
            cache: ParamCache::new(),
        };
        filter.set_cutoff(cutoff_hz, sample_rate);
        filter
    }

    pub fn set_cutoff(&mut self, cutoff_hz: f32, sample_rate: f32) -> bool {
        let fc = cutoff_hz.max(MIN_ONE_POLE_CUTOFF);
        let sample_rate = sample_rate.max(1.0);
        if !self.cache.update([fc, sample_rate]) {
            return false;
        }

        let dt = 1.0 / sample_rate;
        let rc = 1.0 / (TAU * fc);
        self.alpha = (dt / (rc + dt)).clamp(0.0, 1.0);
        true
    }

    #[inline]
    pub fn process(&mut self, x: f32) -> f32 {
        self.y += self.alpha * (x - self.y);
        self.y
    }

    pub fn reset(&mut self) {
        self.y = 0.0;
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiquadKind {
    LowPass,
    HighPass,
}

/// Normalised biquad coefficients (a0 == 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoefficients {
    pub b0: f32,
    pub b1: f32,
    pub b2: f32,
    pub a1: f32,
    pub a2: f32,
}

impl BiquadCoefficients {
    /// Identity section: passes the input unchanged.
    pub const PASS: Self = Self {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a1: 0.0,
        a2: 0.0,
    };

    /// RBJ cookbook design for the given response.
    pub fn rbj(kind: BiquadKind, cutoff_hz: f32, sample_rate: f32, q: f32) -> Self {
        let w0 = TAU * cutoff_hz / sample_rate;
        let (sin_w0, cos_w0) = w0.sin_cos();
        let alpha = sin_w0 / (2.0 * q.max(MIN_Q));

        let (b0, b1, b2) = match kind {
            BiquadKind::LowPass => {
                let b1 = 1.0 - cos_w0;
                (b1 * 0.5, b1, b1 * 0.5)
            }
            BiquadKind::HighPass => {
                let b1 = -(1.0 + cos_w0);
                (-b1 * 0.5, b1, -b1 * 0.5)
            }
        };

        let a0 = 1.0 + alpha;
        Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: (-2.0 * cos_w0) / a0,
            a2: (1.0 - alpha) / a0,
        }
    }

    /// Magnitude of the response at DC (z = 1).
    pub fn dc_gain(&self) -> f32 {
        (self.b0 + self.b1 + self.b2) / (1.0 + self.a1 + self.a2)
    }
}

/// Second-order low-pass or high-pass section.
#[derive(Debug, Clone)]
pub struct Biquad {
    kind: BiquadKind,
    coeffs: BiquadCoefficients,
    z1: f32,
    z2: f32,
    cache: ParamCache<3>,
}

impl Biquad {
    pub fn new(kind: BiquadKind) -> Self {
        Self {
            kind,
            coeffs: BiquadCoefficients::PASS,
            z1: 0.0,
            z2: 0.0,
            cache: ParamCache::new(),
        }
    }

    pub fn lowpass(cutoff_hz: f32, sample_rate: f32) -> Self {
        let mut filter = Self::new(BiquadKind::LowPass);
        filter.set_cutoff(cutoff_hz, sample_rate, BUTTERWORTH_Q);
        filter
    }

    pub fn highpass(cutoff_hz: f32, sample_rate: f32) -> Self {
        let mut filter = Self::new(BiquadKind::HighPass);
        filter.set_cutoff(cutoff_hz, sample_rate, BUTTERWORTH_Q);
        filter
    }

    /// Configure cutoff and resonance. Returns `true` if the coefficients
    /// were recomputed, `false` if the tuple matched the previous call.
    ///
    /// Cutoff is clamped to [20 Hz, 0.49·fs] and Q to ≥ 1e-4.
    pub fn set_cutoff(&mut self, cutoff_hz: f32, sample_rate: f32, q: f32) -> bool {
        let sample_rate = sample_rate.max(2.0 * MIN_BIQUAD_CUTOFF / MAX_CUTOFF_RATIO);
        let cutoff = cutoff_hz.clamp(MIN_BIQUAD_CUTOFF, MAX_CUTOFF_RATIO * sample_rate);
        let q = q.max(MIN_Q);

        if !self.cache.update([cutoff, q, sample_rate]) {
            return false;
        }

        self.coeffs = BiquadCoefficients::rbj(self.kind, cutoff, sample_rate, q);
        true
    }

    #[inline]
    pub fn process(&mut self, x: f32) -> f32 {
        let c = &self.coeffs;
        let y = c.b0 * x + self.z1;
        self.z1 = c.b1 * x - c.a1 * y + self.z2;
        self.z2 = c.b2 * x - c.a2 * y;
        y
    }

    /// Clear the state cells. Coefficients are kept.
    pub fn reset(&mut self) {
        self.z1 = 0.0;
        self.z2 = 0.0;
    }

    pub fn kind(&self) -> BiquadKind {
        self.kind
    }

    pub fn coefficients(&self) -> BiquadCoefficients {
        self.coeffs
    }
}
