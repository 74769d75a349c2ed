use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::WatchError;
use crate::style::OutputStyle;

const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// A username registered for login notification and whether the last
/// login-table scan found it in an active session.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedUser {
    pub name: String,
    pub logged_on: bool,
}

/// The tracked-user set plus the single shared monitor thread. Every
/// access to the set, from any thread, happens inside the one mutex.
#[derive(Clone)]
pub struct UserWatchList {
    users: Arc<Mutex<Vec<TrackedUser>>>,
    monitor: Arc<Mutex<Option<JoinHandle<()>>>>,
    style: OutputStyle,
}

impl UserWatchList {
    pub fn new(style: OutputStyle) -> Self {
        UserWatchList {
            users: Arc::new(Mutex::new(Vec::new())),
            monitor: Arc::new(Mutex::new(None)),
            style,
        }
    }

    /// Add a username to the tracked set; the first ever add starts the
    /// shared monitor. Usernames are unique within the set.
    pub fn track(&self, name: &str) -> Result<(), WatchError> {
        {
            let mut users = self.users.lock().map_err(|_| WatchError::Lock)?;
            if users.iter().any(|u| u.name == name) {
                return Err(WatchError::AlreadyTracked(name.to_string()));
            }
            users.push(TrackedUser {
                name: name.to_string(),
                logged_on: false,
            });
        }

        let mut monitor = self.monitor.lock().map_err(|_| WatchError::Lock)?;
        if monitor.is_none() {
            let users = Arc::clone(&self.users);
            let style = self.style;
            *monitor = Some(thread::spawn(move || poll_logins(&users, style)));
        }
        Ok(())
    }

    /// Remove a username. The monitor keeps running even when the set
    /// empties; it just iterates nothing.
    pub fn untrack(&self, name: &str) -> Result<(), WatchError> {
        let mut users = self.users.lock().map_err(|_| WatchError::Lock)?;
        let index = users
            .iter()
            .position(|u| u.name == name)
            .ok_or_else(|| WatchError::NoSuchUser(name.to_string()))?;
        users.remove(index);
        Ok(())
    }

    pub fn tracked(&self) -> Result<Vec<TrackedUser>, WatchError> {
        let users = self.users.lock().map_err(|_| WatchError::Lock)?;
        Ok(users.clone())
    }
}

/// Shared monitor loop: scan the login-session table, update every
/// tracked entry under the mutex, announce rising edges. Runs for the
/// rest of the process lifetime.
fn poll_logins(users: &Arc<Mutex<Vec<TrackedUser>>>, style: OutputStyle) {
    loop {
        let sessions = active_sessions();
        {
            let Ok(mut users) = users.lock() else {
                return;
            };
            for name in mark_logged_on(&mut users, &sessions) {
                println!(
                    "\x07\n{}",
                    style.alert(&format!("{} has logged on", name))
                );
            }
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// Update every entry's logged-on flag from the current session list,
/// returning the names that just transitioned to logged on.
fn mark_logged_on(users: &mut [TrackedUser], sessions: &[String]) -> Vec<String> {
    let mut newly_on = Vec::new();
    for user in users.iter_mut() {
        let on = sessions.iter().any(|s| s == &user.name);
        if on && !user.logged_on {
            newly_on.push(user.name.clone());
        }
        user.logged_on = on;
    }
    newly_on
}

/// Usernames with an active session in the system login table.
fn active_sessions() -> Vec<String> {
    let mut names = Vec::new();
    unsafe {
        libc::setutxent();
        loop {
            let entry = libc::getutxent();
            if entry.is_null() {
                break;
            }
            if (*entry).ut_type == libc::USER_PROCESS {
                let raw = &(*entry).ut_user;
                // ut_user is not NUL-terminated when the name fills it
                let bytes: Vec<u8> = raw
                    .iter()
                    .take_while(|&&c| c != 0)
                    .map(|&c| c as u8)
                    .collect();
                names.push(String::from_utf8_lossy(&bytes).into_owned());
            }
        }
        libc::endutxent();
    }
    names.sort();
    names.dedup();
    names
}
