pub mod api;
pub mod audio;
pub mod log;
pub mod session;
pub mod settings;

pub use api::{ApiClient, DEFAULT_TIMEOUT_SECS, HistoryFormat, TranscriptRecord};
pub use audio::{
    AudioDeviceInfo, CaptureBackend, CaptureError, CpalBackend, Recorder, Recording,
    RecordingState, SessionError, encode_wav, list_input_devices,
};
pub use log::set_verbose;
pub use session::{SessionCredentials, SessionStore, UserProfile};
pub use settings::Settings;
