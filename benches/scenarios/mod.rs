//! Real-world scenario benchmarks.
//!
//! These run the composed processors the way a host does: one `process`
//! call per frame, with knobs and jacks set like a live patch.

mod mix;
mod voices;

pub use mix::bench_mix;
pub use voices::bench_voices;
