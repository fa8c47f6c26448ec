//! Audio setup: input capture, effect processing, optional output monitor.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::{Consumer, Producer, RingBuffer};

use notelight::{
    io::{AudioInput, AudioOutput},
    telemetry::{frame_channel, Courier},
    AnalyzerEffect, DelayParams, SinkError, MAX_BLOCK_SIZE,
};

use crate::cli::Cli;
use crate::ui::UiApp;

/// Effect channels; wider or narrower devices are mapped onto these.
const CHANNELS: usize = 2;
/// Stereo samples buffered between input and output callbacks.
const MONITOR_RING_LEN: usize = MAX_BLOCK_SIZE * CHANNELS * 8;
const COURIER_INTERVAL: Duration = Duration::from_millis(5);

pub fn run(cli: Cli) -> EyreResult<()> {
    let host = cpal::default_host();
    let input_device = host
        .default_input_device()
        .ok_or_else(|| eyre!("no default input device available"))?;
    let input_config = input_device
        .default_input_config()
        .wrap_err("failed to fetch default input config")?;

    let sample_rate = input_config.sample_rate().0 as f32;
    let device_channels = input_config.channels() as usize;

    let params = Arc::new(DelayParams::from(cli.delay_params()));
    let bypass = Arc::new(AtomicBool::new(cli.bypass));

    let config = cli.effect_config(sample_rate);
    let (frames_tx, courier) = frame_channel(config.queue_capacity);
    let mut effect = AnalyzerEffect::new(config, Arc::clone(&params), frames_tx)
        .wrap_err("invalid effect configuration")?;

    let (monitor_tx, monitor_rx) = RingBuffer::<f32>::new(MONITOR_RING_LEN);

    // Buffers reused by the input callback
    let mut input_block = AudioInput::silence(CHANNELS, MAX_BLOCK_SIZE);
    let mut output_block = AudioOutput::with_shape(CHANNELS, MAX_BLOCK_SIZE);
    let mut monitor_tx = monitor_tx;
    let monitor = !cli.no_monitor;

    let input_stream = input_device
        .build_input_stream(
            &input_config.into(),
            {
                let bypass = Arc::clone(&bypass);
                move |data: &[f32], _| {
                    effect.set_bypass(bypass.load(Ordering::Relaxed));

                    for chunk in data.chunks(MAX_BLOCK_SIZE * device_channels) {
                        let frames = chunk.len() / device_channels;

                        // Mono devices feed both channels; extra channels are ignored.
                        for (ch, buffer) in input_block.buffers.iter_mut().enumerate() {
                            let source = ch.min(device_channels - 1);
                            buffer.clear();
                            buffer.extend(chunk.chunks_exact(device_channels).map(|f| f[source]));
                        }
                        for buffer in output_block.buffers.iter_mut() {
                            buffer.resize(frames, 0.0);
                        }

                        effect.process_block(&input_block, &mut output_block);

                        if monitor {
                            push_monitor(&mut monitor_tx, &output_block, frames);
                        }
                    }
                }
            },
            move |err| log::error!("input stream error: {err}"),
            None,
        )
        .wrap_err("failed to build input stream")?;

    let output_stream = if monitor {
        Some(build_monitor(&host, monitor_rx)?)
    } else {
        None
    };

    input_stream.play().wrap_err("failed to start input stream")?;
    if let Some(stream) = &output_stream {
        stream.play().wrap_err("failed to start output stream")?;
    }

    log::info!(
        "capturing {} channel(s) at {} Hz",
        device_channels,
        sample_rate
    );

    if cli.headless {
        run_headless(courier)
    } else {
        let mut terminal = ratatui::init();
        let mut app = UiApp::new(courier, params, bypass, CHANNELS);
        let res = app.run(&mut terminal);
        ratatui::restore();
        res
    }
}

/// Interleave the processed block into the monitor ring, dropping whole
/// frames when the output side falls behind.
fn push_monitor(tx: &mut Producer<f32>, block: &AudioOutput, frames: usize) {
    for i in 0..frames {
        if tx.slots() < CHANNELS {
            break;
        }
        for buffer in &block.buffers {
            let _ = tx.push(buffer[i]);
        }
    }
}

fn build_monitor(host: &cpal::Host, mut rx: Consumer<f32>) -> EyreResult<cpal::Stream> {
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;
    let channels = config.channels() as usize;

    let mut frame = [0.0f32; CHANNELS];
    device
        .build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                for out_frame in data.chunks_mut(channels) {
                    // Silence on underrun
                    if rx.slots() >= CHANNELS {
                        for sample in frame.iter_mut() {
                            *sample = rx.pop().unwrap_or(0.0);
                        }
                    } else {
                        frame = [0.0; CHANNELS];
                    }
                    for (ch, sample) in out_frame.iter_mut().enumerate() {
                        *sample = frame[ch % CHANNELS];
                    }
                }
            },
            move |err| log::error!("output stream error: {err}"),
            None,
        )
        .wrap_err("failed to build output stream")
}

fn run_headless(courier: Courier) -> EyreResult<()> {
    let stats = Arc::clone(courier.stats());
    let sink = |key: &str, payload: &[u8]| {
        if let Some((note, &level)) = payload.iter().enumerate().max_by_key(|&(_, &b)| b) {
            log::info!("{key}: peak {note} at {level}");
        }
        Ok::<(), SinkError>(())
    };
    let _delivery = courier.spawn(sink, COURIER_INTERVAL);

    println!("Analyzing... Press Ctrl+C to stop");
    loop {
        std::thread::sleep(Duration::from_secs(5));
        log::info!(
            "frames delivered: {}, dropped: {}",
            stats.delivered(),
            stats.dropped()
        );
    }
}
