//! Ready-to-use processors built from the `dsp` primitives.
//!
//! Each voice owns all of its state and implements [`Module`](crate::Module):
//! feed it one frame of knob values and jack readings, get back output
//! voltages and light levels.
//!
//! # Example
//!
//! ```ignore
//! use tl_dsp::voices::{BassInputs, BassVoice};
//! use tl_dsp::{Module, ProcessCtx};
//!
//! let ctx = ProcessCtx::new(48_000.0);
//! let mut bass = BassVoice::new(ctx.sample_rate);
//! let frame = bass.process(&BassInputs::default(), &ctx);
//! ```

mod bass;
mod pump;

pub use bass::{BassInputs, BassOutputs, BassVoice, Timbre};
pub use pump::{Pump, PumpInputs, PumpOutputs, SHAPE_COUNT};
