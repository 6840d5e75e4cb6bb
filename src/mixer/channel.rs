use crate::dsp::filter::{OnePoleHighPass, ParamCache};
use crate::dsp::mix::StereoFrame;
use crate::dsp::pan::{finite_or, resolve_pan, resolve_volume_01, StereoGains};
use crate::io::Jack;

/// Panel state and jack readings for one channel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChannelInputs {
    pub left: Jack,
    pub right: Jack,
    /// 0..10, also the ceiling for volume CV.
    pub volume: f32,
    pub volume_cv: Jack,
    /// -1..1.
    pub pan: f32,
    pub pan_cv: Jack,
    pub cut: bool,
    pub mute: bool,
    pub solo: bool,
}

/// Mute always wins; otherwise an active solo anywhere silences the
/// channels that are not soloed.
#[inline]
pub fn is_audible(mute: bool, solo: bool, any_solo: bool) -> bool {
    !mute && (solo || !any_solo)
}

/// Pan and balance gains remembered for the last knob position.
///
/// Only knob pans are cached. A patched pan CV changes every sample, so
/// gains are computed directly and the cache is left untouched.
#[derive(Debug, Clone)]
pub struct PanCache {
    key: ParamCache<1>,
    mono: StereoGains,
    balance: StereoGains,
}

impl PanCache {
    pub fn new(epsilon: f32) -> Self {
        Self {
            key: ParamCache::with_epsilon(epsilon),
            mono: StereoGains::pan(0.0),
            balance: StereoGains::UNITY,
        }
    }

    /// (mono pan gains, stereo balance gains) for `pan`.
    #[inline]
    pub fn resolve(&mut self, pan: f32, from_cv: bool) -> (StereoGains, StereoGains) {
        if from_cv {
            return (StereoGains::pan(pan), StereoGains::balance(pan));
        }
        if self.key.update([pan]) {
            self.mono = StereoGains::pan(pan);
            self.balance = StereoGains::balance(pan);
        }
        (self.mono, self.balance)
    }

    pub fn reset(&mut self) {
        self.key.invalidate();
    }
}

/// Per-channel DSP state: the cut filters and the pan cache.
#[derive(Debug, Clone)]
pub struct ChannelStrip {
    cut_left: OnePoleHighPass,
    cut_right: OnePoleHighPass,
    pan: PanCache,
}

impl ChannelStrip {
    pub fn new(cut_hz: f32, sample_rate: f32, pan_epsilon: f32) -> Self {
        Self {
            cut_left: OnePoleHighPass::new(cut_hz, sample_rate),
            cut_right: OnePoleHighPass::new(cut_hz, sample_rate),
            pan: PanCache::new(pan_epsilon),
        }
    }

    pub fn set_sample_rate(&mut self, cut_hz: f32, sample_rate: f32) {
        self.cut_left.set_cutoff(cut_hz, sample_rate);
        self.cut_right.set_cutoff(cut_hz, sample_rate);
    }

    /// Contribution of an audible channel to the bus.
    ///
    /// A channel with one jack patched is mono: the signal is copied to both
    /// sides and placed with the equal-power pan. With both jacks patched the
    /// pan knob acts as an equal-power balance instead.
    #[inline]
    pub fn process(&mut self, inputs: &ChannelInputs) -> StereoFrame {
        let stereo = inputs.left.connected && inputs.right.connected;
        let (left, right) = (
            finite_or(inputs.left.voltage, 0.0),
            finite_or(inputs.right.voltage, 0.0),
        );
        // Non-finite samples never reach the cut filters' history.
        let mut frame = if stereo {
            StereoFrame::new(left, right)
        } else if inputs.left.connected {
            StereoFrame::mono(left)
        } else if inputs.right.connected {
            StereoFrame::mono(right)
        } else {
            StereoFrame::SILENCE
        };

        if inputs.cut {
            frame.left = self.cut_left.process(frame.left);
            frame.right = self.cut_right.process(frame.right);
        }

        let volume = resolve_volume_01(
            inputs.volume,
            inputs.volume_cv.connected,
            inputs.volume_cv.voltage,
        );
        let pan = resolve_pan(inputs.pan, inputs.pan_cv.connected, inputs.pan_cv.voltage);
        let frame = frame * volume;

        let (mono, balance) = self.pan.resolve(pan, inputs.pan_cv.connected);
        let (left, right) = if stereo {
            balance.apply(frame.left, frame.right)
        } else {
            let m = frame.mid();
            mono.apply(m, m)
        };
        StereoFrame::new(left, right)
    }

    /// Coefficient of the cut high-pass.
    pub fn cut_coefficient(&self) -> f32 {
        self.cut_left.coefficient()
    }

    pub fn reset(&mut self) {
        self.cut_left.reset();
        self.cut_right.reset();
        self.pan.reset();
    }
}
