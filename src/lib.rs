pub mod config;
pub mod dsp; // Per-sample primitives
pub mod io; // Host-facing jack and control types
pub mod mixer;
pub mod module;
pub mod voices; // Composed processors built from the primitives

#[cfg(test)]
mod test_log;

pub use config::{BassConfig, ConfigError, MixerConfig, PumpConfig};
pub use mixer::Mixer;
pub use module::{Module, ProcessCtx};
pub use voices::{BassVoice, Pump};

pub const DEFAULT_SAMPLE_RATE: f32 = 44_100.0;
/// Nominal audio full scale (±5 V, 10 Vpp).
pub const FULL_SCALE_V: f32 = 5.0;
pub(crate) const MIN_TIME: f32 = 0.001;
