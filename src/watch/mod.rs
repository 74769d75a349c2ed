use std::time::{SystemTime, UNIX_EPOCH};

pub mod mail;
pub mod user;

pub use mail::MailWatchList;
pub use user::UserWatchList;

#[derive(Debug)]
pub enum WatchError {
    AlreadyWatched(String),
    NotWatched(String),
    AlreadyTracked(String),
    NoSuchUser(String),
    Stat(String, std::io::Error),
    Lock,
}

impl std::fmt::Display for WatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WatchError::AlreadyWatched(path) => write!(f, "already watching {}", path),
            WatchError::NotWatched(path) => {
                write!(f, "cannot unwatch {}, not in mail list", path)
            }
            WatchError::AlreadyTracked(name) => write!(f, "already watching user {}", name),
            WatchError::NoSuchUser(name) => write!(f, "cannot remove {}, no such user", name),
            WatchError::Stat(path, e) => write!(f, "{}: {}", path, e),
            WatchError::Lock => write!(f, "watch list lock poisoned"),
        }
    }
}

impl std::error::Error for WatchError {}

/// Wall-clock `HH:MM:SS` for watcher alerts.
pub(crate) fn clock_now() -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let secs = timestamp % 60;
    let mins = (timestamp / 60) % 60;
    let hours = (timestamp / 3600) % 24;
    format!("{:02}:{:02}:{:02}", hours, mins, secs)
}
