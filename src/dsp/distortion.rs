//! Saturation, clipping and the output soft limiter.
//!
//! Waveshapers apply a transfer function to each sample:
//!   output = f(input * drive)
//!
//! # Curves used here
//!
//! Tanh saturation:
//!   f(x) = tanh(x)
//!   - Smooth and symmetric, odd harmonics only
//!   - Unity slope at zero, so quiet signals pass almost unchanged
//!
//! Hard clip:
//!   f(x) = clamp(x, -threshold, threshold)
//!   - Used as a safety rail on output voltages, not as an effect
//!
//! Soft limiter (5 V):
//!   f(x) = 5 · tanh(x / 5)
//!   - Approaches ±5 V asymptotically, never reaches it
//!   - With the `fast-limiter` feature a cubic curve replaces tanh:
//!       u = clamp(x / 5, -1.5, 1.5)
//!       f(x) = 5 · (u − 4u³/27)
//!     It reaches exactly ±5 V at |x| = 7.5 V and stays there. It differs
//!     from the tanh curve by at most `CUBIC_LIMIT_TOLERANCE_V`.

use crate::FULL_SCALE_V;

/// Largest difference between the cubic and tanh limiter curves, in volts.
pub const CUBIC_LIMIT_TOLERANCE_V: f32 = 0.6;

/// Tanh waveshaper with input drive.
#[inline]
pub fn saturate(sample: f32, drive: f32) -> f32 {
    (sample * drive).tanh()
}

/// Hard clipping at ±threshold after applying drive.
#[inline]
pub fn hard_clip(sample: f32, drive: f32, threshold: f32) -> f32 {
    let x = sample * drive;
    x.clamp(-threshold, threshold)
}

/// Smooth saturation toward ±5 V full scale.
#[inline]
pub fn soft_limit_5v(x: f32) -> f32 {
    #[cfg(feature = "fast-limiter")]
    {
        soft_limit_5v_cubic(x)
    }
    #[cfg(not(feature = "fast-limiter"))]
    {
        soft_limit_5v_tanh(x)
    }
}

#[inline]
pub fn soft_limit_5v_tanh(x: f32) -> f32 {
    FULL_SCALE_V * (x / FULL_SCALE_V).tanh()
}

/// Cubic approximation of `soft_limit_5v_tanh`. No transcendental calls.
#[inline]
pub fn soft_limit_5v_cubic(x: f32) -> f32 {
    let u = (x / FULL_SCALE_V).clamp(-1.5, 1.5);
    FULL_SCALE_V * (u - u * u * u * (4.0 / 27.0))
}
