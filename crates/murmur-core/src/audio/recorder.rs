//! The recording session controller.
//!
//! Coordinates one capture session: device acquisition, chunk
//! accumulation, the elapsed-time tick, and finalization into a single
//! WAV payload. Enforces that at most one session is active at a time.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use thiserror::Error;

use super::capture::{CaptureBackend, CaptureError};
use super::encoder::encode_wav;

/// Session lifecycle: `Idle → Recording → Stopping → Idle`.
///
/// There is no retry state and no paused state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingState {
    Idle,
    Recording,
    Stopping,
}

/// Errors from the session controller.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("a recording session is already active")]
    AlreadyRecording,

    #[error("no recording session is active")]
    NotRecording,

    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error("failed to encode recording: {0}")]
    Encode(String),
}

/// The finalized product of one recording session.
#[derive(Debug)]
pub struct Recording {
    /// WAV-encoded audio, ready for upload.
    pub wav: Vec<u8>,
    /// Elapsed whole seconds, as counted immediately before the reset to idle.
    pub duration_secs: u64,
    pub sample_rate: u32,
}

/// One recording session at a time, start to stop.
pub struct Recorder {
    state: RecordingState,
    session: Option<ActiveSession>,
    tick_interval: Duration,
}

struct ActiveSession {
    backend: Box<dyn CaptureBackend>,
    chunk_rx: Receiver<Vec<f32>>,
    elapsed: Arc<AtomicU64>,
    ticker_stop: Arc<AtomicBool>,
    ticker: Option<JoinHandle<()>>,
}

impl ActiveSession {
    fn stop_ticker(&mut self) {
        self.ticker_stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.ticker.take() {
            handle.thread().unpark();
            let _ = handle.join();
        }
    }
}

impl Drop for ActiveSession {
    fn drop(&mut self) {
        // Teardown mid-session must still release the device and end the
        // ticker thread.
        self.ticker_stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.ticker.take() {
            handle.thread().unpark();
        }
        let _ = self.backend.close();
    }
}

impl Recorder {
    pub fn new() -> Self {
        Self {
            state: RecordingState::Idle,
            session: None,
            tick_interval: Duration::from_secs(1),
        }
    }

    /// Override the elapsed-counter tick interval (default one second).
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    pub fn state(&self) -> RecordingState {
        self.state
    }

    /// Elapsed whole seconds of the active session, zero when idle.
    pub fn elapsed_seconds(&self) -> u64 {
        self.session
            .as_ref()
            .map(|s| s.elapsed.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Start a recording session on the given capture backend.
    ///
    /// Rejected if a session is already active. On a device error the
    /// state remains `Idle` and nothing is accumulated.
    pub fn start(&mut self, mut backend: Box<dyn CaptureBackend>) -> Result<(), SessionError> {
        if self.state != RecordingState::Idle {
            return Err(SessionError::AlreadyRecording);
        }

        let (chunk_tx, chunk_rx) = crossbeam_channel::unbounded();
        backend.open(chunk_tx)?;
        crate::verbose!("Recording started on {}", backend.name());

        let elapsed = Arc::new(AtomicU64::new(0));
        let ticker_stop = Arc::new(AtomicBool::new(false));
        let ticker = spawn_ticker(
            self.tick_interval,
            Arc::clone(&elapsed),
            Arc::clone(&ticker_stop),
        );

        self.session = Some(ActiveSession {
            backend,
            chunk_rx,
            elapsed,
            ticker_stop,
            ticker: Some(ticker),
        });
        self.state = RecordingState::Recording;
        Ok(())
    }

    /// Stop the active session and finalize the captured audio.
    ///
    /// Releases the device, concatenates the accumulated chunks in
    /// arrival order, and returns exactly one finalized `Recording`.
    /// Every path returns the controller to `Idle`.
    pub fn stop(&mut self) -> Result<Recording, SessionError> {
        if self.state != RecordingState::Recording {
            return Err(SessionError::NotRecording);
        }
        self.state = RecordingState::Stopping;

        let Some(mut session) = self.session.take() else {
            self.state = RecordingState::Idle;
            return Err(SessionError::NotRecording);
        };

        // Elapsed as reported immediately before the reset to idle.
        let duration_secs = session.elapsed.load(Ordering::SeqCst);
        session.stop_ticker();

        // Finalize the device first so all pending chunks are flushed,
        // then drain them in arrival order.
        let close_result = session.backend.close();
        let sample_rate = session.backend.sample_rate();

        let mut samples = Vec::new();
        while let Ok(chunk) = session.chunk_rx.try_recv() {
            samples.extend_from_slice(&chunk);
        }

        // The device handle is released; ActiveSession::drop sees an
        // already-closed backend and does not release it again.
        drop(session);
        self.state = RecordingState::Idle;

        close_result?;

        crate::verbose!(
            "Recording stopped: {} samples over {duration_secs}s",
            samples.len()
        );

        let wav =
            encode_wav(&samples, sample_rate).map_err(|e| SessionError::Encode(e.to_string()))?;

        Ok(Recording {
            wav,
            duration_secs,
            sample_rate,
        })
    }
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawn the elapsed-counter thread: one increment per interval, prompt
/// exit when the stop flag is set.
fn spawn_ticker(
    interval: Duration,
    elapsed: Arc<AtomicU64>,
    stop: Arc<AtomicBool>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut next = Instant::now() + interval;
        loop {
            let now = Instant::now();
            if now < next {
                thread::park_timeout(next - now);
            }
            if stop.load(Ordering::SeqCst) {
                break;
            }
            // park_timeout may wake spuriously; only count full intervals
            if Instant::now() >= next {
                elapsed.fetch_add(1, Ordering::SeqCst);
                next += interval;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::Sender;
    use std::io::Cursor;
    use std::sync::atomic::AtomicUsize;

    /// Shared observation point for backend lifecycle assertions.
    #[derive(Default)]
    struct BackendProbe {
        closes: AtomicUsize,
    }

    /// Capture backend that delivers a fixed script of chunks on open.
    struct ScriptedBackend {
        chunks: Vec<Vec<f32>>,
        fail_open: bool,
        closed: bool,
        probe: Arc<BackendProbe>,
    }

    impl ScriptedBackend {
        fn new(chunks: Vec<Vec<f32>>, probe: &Arc<BackendProbe>) -> Box<Self> {
            Box::new(Self {
                chunks,
                fail_open: false,
                closed: false,
                probe: Arc::clone(probe),
            })
        }

        fn denied(probe: &Arc<BackendProbe>) -> Box<Self> {
            Box::new(Self {
                chunks: Vec::new(),
                fail_open: true,
                closed: false,
                probe: Arc::clone(probe),
            })
        }
    }

    impl CaptureBackend for ScriptedBackend {
        fn open(&mut self, chunks: Sender<Vec<f32>>) -> Result<(), CaptureError> {
            if self.fail_open {
                return Err(CaptureError::Access("permission denied".into()));
            }
            for chunk in self.chunks.drain(..) {
                chunks.send(chunk).expect("receiver alive during open");
            }
            Ok(())
        }

        fn close(&mut self) -> Result<(), CaptureError> {
            if !self.closed {
                self.closed = true;
                self.probe.closes.fetch_add(1, Ordering::SeqCst);
            }
            Ok(())
        }

        fn sample_rate(&self) -> u32 {
            16_000
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn decode(wav: &[u8]) -> Vec<f32> {
        let mut reader = hound::WavReader::new(Cursor::new(wav)).unwrap();
        reader
            .samples::<i16>()
            .map(|s| s.unwrap() as f32 / i16::MAX as f32)
            .collect()
    }

    #[test]
    fn session_produces_single_payload_in_arrival_order() {
        let probe = Arc::new(BackendProbe::default());
        let mut recorder = Recorder::new();

        let chunks = vec![vec![0.1, 0.2], vec![0.3], vec![0.4, 0.5]];
        recorder.start(ScriptedBackend::new(chunks, &probe)).unwrap();
        assert_eq!(recorder.state(), RecordingState::Recording);

        let recording = recorder.stop().unwrap();
        assert_eq!(recorder.state(), RecordingState::Idle);
        assert_eq!(recording.sample_rate, 16_000);
        assert_eq!(probe.closes.load(Ordering::SeqCst), 1);

        let decoded = decode(&recording.wav);
        let expected = [0.1, 0.2, 0.3, 0.4, 0.5];
        assert_eq!(decoded.len(), expected.len());
        for (got, want) in decoded.iter().zip(expected) {
            assert!((got - want).abs() < 0.001, "got {got}, want {want}");
        }
    }

    #[test]
    fn start_while_recording_is_rejected() {
        let probe = Arc::new(BackendProbe::default());
        let mut recorder = Recorder::new();

        recorder
            .start(ScriptedBackend::new(vec![vec![0.1]], &probe))
            .unwrap();

        let second = Arc::new(BackendProbe::default());
        let err = recorder
            .start(ScriptedBackend::new(vec![], &second))
            .unwrap_err();
        assert!(matches!(err, SessionError::AlreadyRecording));

        // The original session is unaffected and still finalizes.
        let recording = recorder.stop().unwrap();
        assert_eq!(decode(&recording.wav).len(), 1);
        assert_eq!(probe.closes.load(Ordering::SeqCst), 1);
        assert_eq!(second.closes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn stop_while_idle_is_rejected() {
        let mut recorder = Recorder::new();
        let err = recorder.stop().unwrap_err();
        assert!(matches!(err, SessionError::NotRecording));
        assert_eq!(recorder.state(), RecordingState::Idle);
    }

    #[test]
    fn denied_device_leaves_idle_with_no_session() {
        let probe = Arc::new(BackendProbe::default());
        let mut recorder = Recorder::new();

        let err = recorder.start(ScriptedBackend::denied(&probe)).unwrap_err();
        assert!(matches!(err, SessionError::Capture(_)));
        assert_eq!(recorder.state(), RecordingState::Idle);
        assert_eq!(recorder.elapsed_seconds(), 0);

        // The controller is still usable for the next attempt.
        recorder
            .start(ScriptedBackend::new(vec![vec![0.2]], &probe))
            .unwrap();
        let recording = recorder.stop().unwrap();
        assert_eq!(decode(&recording.wav).len(), 1);
    }

    #[test]
    fn elapsed_ticks_while_recording_and_resets_on_stop() {
        let probe = Arc::new(BackendProbe::default());
        let mut recorder = Recorder::new().with_tick_interval(Duration::from_millis(5));

        recorder.start(ScriptedBackend::new(vec![], &probe)).unwrap();
        thread::sleep(Duration::from_millis(80));

        let mid = recorder.elapsed_seconds();
        assert!(mid >= 5, "expected several ticks, got {mid}");

        let recording = recorder.stop().unwrap();
        // Duration reports the counter as it stood just before the reset.
        assert!(recording.duration_secs >= mid);
        assert_eq!(recorder.elapsed_seconds(), 0);
    }

    #[test]
    fn drop_mid_session_releases_device_once() {
        let probe = Arc::new(BackendProbe::default());
        {
            let mut recorder = Recorder::new();
            recorder
                .start(ScriptedBackend::new(vec![vec![0.1]], &probe))
                .unwrap();
        }
        assert_eq!(probe.closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn stop_then_drop_does_not_double_release() {
        let probe = Arc::new(BackendProbe::default());
        let mut recorder = Recorder::new();
        recorder.start(ScriptedBackend::new(vec![], &probe)).unwrap();
        recorder.stop().unwrap();
        drop(recorder);
        assert_eq!(probe.closes.load(Ordering::SeqCst), 1);
    }
}
