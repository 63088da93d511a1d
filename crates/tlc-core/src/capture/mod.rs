pub mod config;
pub mod script;
pub mod session;

pub use config::CaptureConfig;
pub use script::{parse_script, replay_script, ScriptLine};
pub use session::{CaptureError, CaptureEvent, CaptureSession, CaptureState};
