//! Capture device abstraction and the cpal microphone backend.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleFormat, Stream, StreamConfig};
use crossbeam_channel::Sender;
use thiserror::Error;

/// Errors from acquiring or driving a capture device.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("no audio input device available")]
    NoDevice,

    #[error("audio input device '{0}' not found")]
    DeviceNotFound(String),

    #[error("microphone access failed: {0}")]
    Access(String),
}

/// A source of captured audio.
///
/// `open()` acquires the device and begins delivering mono f32 sample
/// buffers through the given channel in arrival order. `close()` finalizes
/// the capture and releases the device handle; it must be safe to call
/// more than once, releasing the handle only the first time.
pub trait CaptureBackend {
    /// Acquire the device and start delivering chunks.
    fn open(&mut self, chunks: Sender<Vec<f32>>) -> Result<(), CaptureError>;

    /// Finalize the capture and release the device handle.
    fn close(&mut self) -> Result<(), CaptureError>;

    /// Sample rate of the delivered chunks, in Hz. Valid after `open()`.
    fn sample_rate(&self) -> u32;

    /// Backend name for diagnostics.
    fn name(&self) -> &str;
}

/// Microphone capture via cpal.
///
/// Captures from the system default input device, or a named device when
/// one is configured. Multichannel input is downmixed to mono in the
/// audio callback.
pub struct CpalBackend {
    device_name: Option<String>,
    stream: Option<Stream>,
    sample_rate: u32,
    /// Non-fatal stream errors seen this session (reset on open)
    stream_errors: Arc<AtomicU64>,
}

impl CpalBackend {
    pub fn new(device_name: Option<String>) -> Self {
        Self {
            device_name,
            stream: None,
            sample_rate: 0,
            stream_errors: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Total non-fatal stream errors from the current session.
    pub fn stream_error_count(&self) -> u64 {
        self.stream_errors.load(Ordering::Relaxed)
    }

    fn find_device(&self) -> Result<Device, CaptureError> {
        let host = cpal::default_host();

        match &self.device_name {
            None => host.default_input_device().ok_or(CaptureError::NoDevice),
            Some(name) => {
                let devices = host
                    .input_devices()
                    .map_err(|e| CaptureError::Access(e.to_string()))?;
                for device in devices {
                    if let Ok(desc) = device.description()
                        && desc.to_string() == *name
                    {
                        return Ok(device);
                    }
                }
                Err(CaptureError::DeviceNotFound(name.clone()))
            }
        }
    }
}

impl CaptureBackend for CpalBackend {
    fn open(&mut self, chunks: Sender<Vec<f32>>) -> Result<(), CaptureError> {
        let device = self.find_device()?;
        let supported = device
            .default_input_config()
            .map_err(|e| CaptureError::Access(e.to_string()))?;

        let sample_format = supported.sample_format();
        let config: StreamConfig = supported.config();
        self.sample_rate = config.sample_rate;
        self.stream_errors.store(0, Ordering::Relaxed);

        let stream = match sample_format {
            SampleFormat::F32 => build_stream::<f32>(&device, &config, chunks, &self.stream_errors),
            SampleFormat::I16 => build_stream::<i16>(&device, &config, chunks, &self.stream_errors),
            SampleFormat::U16 => build_stream::<u16>(&device, &config, chunks, &self.stream_errors),
            other => Err(CaptureError::Access(format!(
                "unsupported sample format: {other:?}"
            ))),
        }?;

        stream
            .play()
            .map_err(|e| CaptureError::Access(e.to_string()))?;
        self.stream = Some(stream);

        crate::verbose!("Capturing at {} Hz", self.sample_rate);
        Ok(())
    }

    fn close(&mut self) -> Result<(), CaptureError> {
        // Dropping the stream stops the callback and releases the device.
        // Safe to call again once closed.
        if let Some(stream) = self.stream.take() {
            drop(stream);
            let errors = self.stream_error_count();
            if errors > 0 {
                crate::verbose!("Capture finished with {errors} non-fatal stream errors");
            }
        }
        Ok(())
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn name(&self) -> &str {
        self.device_name.as_deref().unwrap_or("default input")
    }
}

/// Build an input stream that downmixes to mono and forwards chunks.
fn build_stream<T>(
    device: &Device,
    config: &StreamConfig,
    chunks: Sender<Vec<f32>>,
    error_count: &Arc<AtomicU64>,
) -> Result<Stream, CaptureError>
where
    T: cpal::Sample + cpal::SizedSample,
    f32: cpal::FromSample<T>,
{
    let channels = config.channels as usize;
    let error_count = Arc::clone(error_count);

    // Stream errors are common on Linux (especially USB audio) and non-fatal:
    // count them, report the first, suppress the rest.
    let err_fn = move |err| {
        let count = error_count.fetch_add(1, Ordering::Relaxed);
        if count == 0 {
            crate::verbose!("Audio stream error (non-fatal, recording continues): {err}");
        }
    };

    device
        .build_input_stream(
            config,
            move |data: &[T], _: &cpal::InputCallbackInfo| {
                let mono: Vec<f32> = if channels <= 1 {
                    data.iter()
                        .map(|&s| cpal::Sample::from_sample(s))
                        .collect()
                } else {
                    data.chunks_exact(channels)
                        .map(|frame| {
                            frame
                                .iter()
                                .map(|&s| -> f32 { cpal::Sample::from_sample(s) })
                                .sum::<f32>()
                                / channels as f32
                        })
                        .collect()
                };

                if !mono.is_empty() {
                    // Unbounded channel: never blocks the audio thread. The
                    // send fails only after the receiver is gone (teardown).
                    let _ = chunks.send(mono);
                }
            },
            err_fn,
            None,
        )
        .map_err(|e| CaptureError::Access(e.to_string()))
}
