//! Stereo frames, summing and dry/wet blending.

/*
Signal Mixing
=============

Mixing combines signals by ADDING them together, optionally with weights.
This is the additive counterpart to multiplication (gain).

Vocabulary
----------

  frame         One left sample and one right sample taken at the same
                instant. Processors here work one frame at a time.

  summing       Adding frames at equal levels (no weighting). Seven channels
                near full scale can sum well past ±5 V, which is why the
                mixer soft-limits the bus afterwards.

  wet/dry       Effect mixing terminology.
                  dry = input signal (unprocessed)
                  wet = effect signal (processed)
                A "30% wet" mix means mix = 0.3.


Linear Crossfade
----------------

    output = dry × (1 − mix) + wet × mix

The weights always sum to 1.0, so a fully correlated dry and wet signal is
never boosted. At mix = 0.5 two uncorrelated signals dip slightly in
perceived loudness; for a ducker this is inaudible because wet is just a
scaled copy of dry.


Phase Relationships
-------------------

When mixing similar signals:

  IN PHASE:      Signals add constructively → louder (up to 2×)
  OUT OF PHASE:  Signals cancel → quieter (potentially silent!)

Summing an inverted copy of a channel with itself produces silence.
*/

use std::ops::{Add, AddAssign, Mul};

/// A single stereo sample pair.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StereoFrame {
    pub left: f32,
    pub right: f32,
}

impl StereoFrame {
    pub const SILENCE: Self = Self {
        left: 0.0,
        right: 0.0,
    };

    #[inline]
    pub const fn new(left: f32, right: f32) -> Self {
        Self { left, right }
    }

    /// The same sample on both sides.
    #[inline]
    pub const fn mono(sample: f32) -> Self {
        Self {
            left: sample,
            right: sample,
        }
    }

    /// Apply `f` to each side independently.
    #[inline]
    pub fn map(self, mut f: impl FnMut(f32) -> f32) -> Self {
        Self {
            left: f(self.left),
            right: f(self.right),
        }
    }

    /// Average of both sides.
    #[inline]
    pub fn mid(&self) -> f32 {
        0.5 * (self.left + self.right)
    }
}

impl Add for StereoFrame {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            left: self.left + rhs.left,
            right: self.right + rhs.right,
        }
    }
}

impl AddAssign for StereoFrame {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.left += rhs.left;
        self.right += rhs.right;
    }
}

impl Mul<f32> for StereoFrame {
    type Output = Self;

    #[inline]
    fn mul(self, gain: f32) -> Self {
        Self {
            left: self.left * gain,
            right: self.right * gain,
        }
    }
}

/// Blend dry and wet samples using linear crossfade.
///
/// output = (dry × (1-mix)) + (wet × mix)
#[inline]
pub fn blend_dry_wet(dry: f32, wet: f32, mix: f32) -> f32 {
    let mix = mix.clamp(0.0, 1.0);
    dry * (1.0 - mix) + wet * mix
}

/// `blend_dry_wet` applied to both sides of a frame.
#[inline]
pub fn blend_frames(dry: StereoFrame, wet: StereoFrame, mix: f32) -> StereoFrame {
    StereoFrame {
        left: blend_dry_wet(dry.left, wet.left, mix),
        right: blend_dry_wet(dry.right, wet.right, mix),
    }
}
