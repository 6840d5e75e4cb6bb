//! Volume and pan resolution, equal-power pan and balance laws.

/*
Knobs, CV and Pan Laws
======================

Every channel control has a knob and may also have a CV jack. The rules for
combining them differ per control:

  volume   The knob sets a ceiling in [0, 1] (0..10 on the panel). A patched
           CV (0..10 V) scales *within* that ceiling; it never exceeds it.

               no CV:  vol = knob / 10
               CV:     vol = knob / 10 · cv / 10

  pan      A patched CV (±5 V) fully overrides the knob.

               no CV:  pan = knob
               CV:     pan = cv / 5

Both results are clamped to their domains before use. A non-finite knob or
CV reading counts as 0 (no CV reading at all for volume, center for pan).


Equal-Power Pan (mono source)
-----------------------------

    θ  = (pan · 0.5 + 0.5) · π/2        pan = -1 → θ = 0
    gL = cos θ                           pan =  0 → θ = π/4
    gR = sin θ                           pan = +1 → θ = π/2

gL² + gR² = 1 everywhere, so perceived loudness is constant across the
sweep. At center both gains are √½ ≈ 0.707 (−3 dB).


Equal-Power Balance (stereo source)
-----------------------------------

A stereo channel already has its own image, so "pan" becomes balance: only
the side opposite the pan direction is attenuated.

    θ = |pan| · π/2,  g = cos θ

    pan > 0  →  left  *= g
    pan < 0  →  right *= g
    pan = 0  →  unity on both sides
*/

use std::f32::consts::FRAC_PI_2;

/// `value`, or `fallback` when `value` is NaN or infinite.
///
/// `f32::clamp` passes NaN through, so control values go through this first.
#[inline]
pub fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// Knob ceiling scaled by optional CV. Result in [0, 1].
#[inline]
pub fn resolve_volume_01(knob_0_to_10: f32, cv_connected: bool, cv_0_to_10: f32) -> f32 {
    let ceiling = (finite_or(knob_0_to_10, 0.0) / 10.0).clamp(0.0, 1.0);
    if !cv_connected {
        return ceiling;
    }
    ceiling * (finite_or(cv_0_to_10, 0.0) / 10.0).clamp(0.0, 1.0)
}

/// Knob pan, or CV pan when patched. Result in [-1, 1].
#[inline]
pub fn resolve_pan(knob_minus1_to_1: f32, cv_connected: bool, cv_plus_minus_5: f32) -> f32 {
    if !cv_connected {
        return finite_or(knob_minus1_to_1, 0.0).clamp(-1.0, 1.0);
    }
    (finite_or(cv_plus_minus_5, 0.0) / 5.0).clamp(-1.0, 1.0)
}

/// A pair of left/right gains.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StereoGains {
    pub left: f32,
    pub right: f32,
}

impl StereoGains {
    pub const UNITY: Self = Self {
        left: 1.0,
        right: 1.0,
    };

    /// Equal-power pan of a mono source.
    #[inline]
    pub fn pan(pan: f32) -> Self {
        let theta = (pan.clamp(-1.0, 1.0) * 0.5 + 0.5) * FRAC_PI_2;
        let (sin, cos) = theta.sin_cos();
        Self {
            left: cos,
            right: sin,
        }
    }

    /// Equal-power balance of a stereo source.
    #[inline]
    pub fn balance(pan: f32) -> Self {
        let pan = pan.clamp(-1.0, 1.0);
        let g = (pan.abs() * FRAC_PI_2).cos();
        if pan > 0.0 {
            Self {
                left: g,
                right: 1.0,
            }
        } else if pan < 0.0 {
            Self {
                left: 1.0,
                right: g,
            }
        } else {
            Self::UNITY
        }
    }

    #[inline]
    pub fn apply(&self, left: f32, right: f32) -> (f32, f32) {
        (left * self.left, right * self.right)
    }
}
