//! Crate error type.
//!
//! Only lifecycle operations can fail; runtime failures (enumeration coming
//! back empty, stale handles, out-of-range queries) degrade to neutral
//! defaults instead of surfacing here, so the consuming loop never stalls.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Registering the capture window class failed.
    #[error("window class registration failed (os error {0})")]
    ClassRegistration(u32),

    /// Creating the message-only capture window failed.
    #[error("window creation failed (os error {0})")]
    WindowCreation(u32),

    /// `RegisterRawInputDevices` rejected the mouse registration.
    #[error("raw input registration failed (os error {0})")]
    RawInputRegistration(u32),

    /// The backend's input thread is not running.
    #[error("input thread is not running")]
    NotRunning,

    /// The backend's input thread ended before it became ready.
    #[error("input thread exited during startup")]
    StartupFailed,

    /// A sensitivity profile could not be encoded or decoded.
    #[error("profile error: {0}")]
    Profile(String),
}
