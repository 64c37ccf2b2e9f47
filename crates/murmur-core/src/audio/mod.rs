//! Microphone capture and the recording session lifecycle.

mod capture;
mod devices;
mod encoder;
mod recorder;

pub use capture::{CaptureBackend, CaptureError, CpalBackend};
pub use devices::{AudioDeviceInfo, list_input_devices};
pub use encoder::encode_wav;
pub use recorder::{Recorder, Recording, RecordingState, SessionError};
