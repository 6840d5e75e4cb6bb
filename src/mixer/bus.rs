use crate::dsp::distortion::soft_limit_5v;
use crate::dsp::meter::{vu_segments, PeakMeter, SEGMENT_COUNT};
use crate::dsp::mix::StereoFrame;
use crate::dsp::pan::finite_or;

/// Master section: gain, limiter and the two peak meters.
#[derive(Debug, Clone)]
pub struct MixBus {
    vu_left: PeakMeter,
    vu_right: PeakMeter,
    thresholds: [f32; SEGMENT_COUNT],
}

impl MixBus {
    pub fn new(release_time: f32, thresholds: [f32; SEGMENT_COUNT], sample_rate: f32) -> Self {
        Self {
            vu_left: PeakMeter::new(release_time, sample_rate),
            vu_right: PeakMeter::new(release_time, sample_rate),
            thresholds,
        }
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.vu_left.set_sample_rate(sample_rate);
        self.vu_right.set_sample_rate(sample_rate);
    }

    /// Master gain (0..100 on the panel), soft limit, then meter.
    #[inline]
    pub fn process(&mut self, sum: StereoFrame, master: f32) -> StereoFrame {
        let gain = (finite_or(master, 0.0) / 100.0).clamp(0.0, 1.0);
        let out = (sum * gain).map(soft_limit_5v);
        self.vu_left.process(out.left);
        self.vu_right.process(out.right);
        out
    }

    pub fn levels(&self) -> StereoFrame {
        StereoFrame::new(self.vu_left.level(), self.vu_right.level())
    }

    pub fn segments(&self) -> ([f32; SEGMENT_COUNT], [f32; SEGMENT_COUNT]) {
        (
            vu_segments(self.vu_left.level(), &self.thresholds),
            vu_segments(self.vu_right.level(), &self.thresholds),
        )
    }

    /// Per-sample release factor of the meters.
    pub fn release(&self) -> f32 {
        self.vu_left.release()
    }

    pub fn reset(&mut self) {
        self.vu_left.reset();
        self.vu_right.reset();
    }
}
