/// Context passed to a module for every processed frame
///
/// The host supplies both values once per call:
/// - sample_rate: Audio sample rate (e.g., 48000.0)
/// - sample_time: Duration of one frame in seconds (1 / sample_rate)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessCtx {
    pub sample_rate: f32,
    pub sample_time: f32,
}

impl ProcessCtx {
    /// Build a context from a sample rate. Rates below 1 Hz are floored so the
    /// sample period never becomes infinite.
    pub fn new(sample_rate: f32) -> Self {
        let sample_rate = if sample_rate.is_finite() {
            sample_rate.max(1.0)
        } else {
            crate::DEFAULT_SAMPLE_RATE
        };

        Self {
            sample_rate,
            sample_time: 1.0 / sample_rate,
        }
    }
}

impl Default for ProcessCtx {
    fn default() -> Self {
        Self::new(crate::DEFAULT_SAMPLE_RATE)
    }
}

/// Core trait for per-frame processors (bass voice, pump, mixer).
///
/// The host calls `process` exactly once per audio frame. Implementations
/// must not allocate, lock or block inside `process`.
pub trait Module: Send {
    /// Knob values, switch states and jack readings for one frame.
    type Inputs;
    /// Output voltages and light brightnesses for one frame.
    type Outputs;

    fn process(&mut self, inputs: &Self::Inputs, ctx: &ProcessCtx) -> Self::Outputs;

    /// Recompute every coefficient derived from the sample rate.
    ///
    /// Called on an explicit rate-change notification, and by `process`
    /// itself when it sees a rate it was not configured for.
    fn set_sample_rate(&mut self, sample_rate: f32);

    /// Clear filter memory, envelopes, meters and caches.
    fn reset(&mut self);
}
