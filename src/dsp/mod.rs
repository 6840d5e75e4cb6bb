//! Low-level DSP primitives used by the voices and the mixer.
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! embed directly inside voice and channel structs. Each one processes a single
//! sample per call and owns its own state; nothing here is shared between
//! channels.

/// Saturation, hard clipping and the 5 V soft limiter.
pub mod distortion;
/// Decay, micro-attack and shaped duck envelopes.
pub mod envelope;
/// One-pole and biquad filters plus the coefficient cache.
pub mod filter;
/// Bipolar low-pass/high-pass macro filter.
pub mod macro_filter;
/// Peak-hold metering and LED segments.
pub mod meter;
/// Stereo frames and dry/wet blending.
pub mod mix;
/// PolyBLEP oscillator.
pub mod oscillator;
/// Volume/pan resolution and equal-power laws.
pub mod pan;
/// Schmitt triggers, unplug detection and light pulses.
pub mod trigger;

pub use envelope::{DecayEnvelope, DuckShape, MicroAttack, ShapedEnvelope};
pub use filter::{Biquad, OnePoleHighPass, OnePoleLowPass, ParamCache};
pub use mix::StereoFrame;
pub use trigger::SchmittTrigger;
