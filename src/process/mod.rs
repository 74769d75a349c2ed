use std::fmt;

pub mod executor;
pub mod signal;

pub use executor::{ProcessExecutor, StageIo};

use crate::shell::redirect::RedirectError;

#[derive(Debug)]
pub enum ProcessError {
    CommandNotFound(String),
    IsDirectory(String),
    NotExecutable(String),
    Stat(String, std::io::Error),
    MissingCommand,
    Redirect(RedirectError),
    SpawnFailed(String, std::io::Error),
    SignalError(String),
    Wait(String),
    Other(String),
}

impl From<RedirectError> for ProcessError {
    fn from(e: RedirectError) -> Self {
        ProcessError::Redirect(e)
    }
}

impl From<std::io::Error> for ProcessError {
    fn from(e: std::io::Error) -> Self {
        ProcessError::Other(e.to_string())
    }
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::CommandNotFound(cmd) => write!(f, "{}: Command not found.", cmd),
            ProcessError::IsDirectory(name) => write!(f, "{}: is a directory", name),
            ProcessError::NotExecutable(name) => write!(f, "{}: permission denied", name),
            ProcessError::Stat(name, e) => write!(f, "{}: {}", name, e),
            ProcessError::MissingCommand => write!(f, "missing command"),
            ProcessError::Redirect(e) => write!(f, "{}", e),
            ProcessError::SpawnFailed(program, e) => {
                write!(f, "cannot execute {}: {}", program, e)
            }
            ProcessError::SignalError(msg) => write!(f, "signal error: {}", msg),
            ProcessError::Wait(msg) => write!(f, "wait error: {}", msg),
            ProcessError::Other(msg) => write!(f, "{}", msg),
        }
    }
}
