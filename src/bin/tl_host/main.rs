//! tl-host - plays the bass, pump and mixer on the default audio device
//!
//! Run with: cargo run --bin tl-host
//! Log level: TL_LOG=debug cargo run --bin tl-host

mod rack;

use std::thread;
use std::time::Duration;

use color_eyre::eyre::{eyre, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use log::LevelFilter;
use rtrb::RingBuffer;
use simple_logger::SimpleLogger;

use rack::Rack;
use tl_dsp::io::{ControlMessage, ParamTarget};

const CONTROL_QUEUE_SIZE: usize = 64;
/// Eighth notes at 120 BPM.
const STEP: Duration = Duration::from_millis(250);
/// Filter knob per step: closed low-pass, bypass, a touch of high-pass.
const FILTER_SWEEP: [f32; 8] = [-6.0, -4.0, -2.0, 0.0, -5.0, -3.0, 0.0, 2.0];

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let level = std::env::var("TL_LOG")
        .ok()
        .and_then(|value| value.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);
    SimpleLogger::new()
        .with_level(level)
        .init()
        .wrap_err("failed to install logger")?;

    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    let sample_rate = config.sample_rate().0 as f32;
    let channels = config.channels() as usize;
    log::info!("output: {} Hz, {} channels", sample_rate, channels);

    let (mut controls, receiver) = RingBuffer::<ControlMessage>::new(CONTROL_QUEUE_SIZE);
    let mut rack = Rack::new(receiver, sample_rate);

    let stream = device
        .build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| rack.render(data, channels),
            |err| log::error!("audio stream error: {err}"),
            None,
        )
        .wrap_err("failed to build output stream")?;
    stream.play().wrap_err("failed to start output stream")?;
    log::info!("playing, press Ctrl+C to stop");

    let mut step = 0usize;
    loop {
        let filter = FILTER_SWEEP[step % FILTER_SWEEP.len()];
        let pushed = controls
            .push(ControlMessage::SetParam {
                target: ParamTarget::BassFilter,
                value: filter,
            })
            .and_then(|_| controls.push(ControlMessage::Trigger));
        if pushed.is_err() {
            log::warn!("control queue full, dropped step {step}");
        }

        step += 1;
        thread::sleep(STEP);
    }
}
