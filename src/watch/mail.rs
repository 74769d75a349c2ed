use std::fs;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::{clock_now, WatchError};
use crate::style::OutputStyle;

const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// One watched file: its path, the last size the monitor saw, and the
/// monitor thread with its stop flag. The baseline is owned by the
/// monitor; it is an atomic only so the interactive thread can display it
/// without stopping the poll.
struct MailWatch {
    path: String,
    baseline: Arc<AtomicU64>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

/// All active mail watches. Only the interactive thread adds or removes
/// entries; each monitor thread touches nothing but its own baseline.
#[derive(Clone)]
pub struct MailWatchList {
    entries: Arc<Mutex<Vec<MailWatch>>>,
    style: OutputStyle,
}

impl MailWatchList {
    pub fn new(style: OutputStyle) -> Self {
        MailWatchList {
            entries: Arc::new(Mutex::new(Vec::new())),
            style,
        }
    }

    /// Start a dedicated monitor for `path`. The file must exist; a path
    /// already being watched is refused.
    pub fn watch(&self, path: &str) -> Result<(), WatchError> {
        let size = fs::metadata(path)
            .map_err(|e| WatchError::Stat(path.to_string(), e))?
            .len();

        let mut entries = self.entries.lock().map_err(|_| WatchError::Lock)?;
        if entries.iter().any(|w| w.path == path) {
            return Err(WatchError::AlreadyWatched(path.to_string()));
        }

        let baseline = Arc::new(AtomicU64::new(size));
        let stop = Arc::new(AtomicBool::new(false));
        let handle = {
            let path = path.to_string();
            let baseline = Arc::clone(&baseline);
            let stop = Arc::clone(&stop);
            let style = self.style;
            thread::spawn(move || poll_file(&path, &baseline, &stop, style))
        };

        entries.push(MailWatch {
            path: path.to_string(),
            baseline,
            stop,
            handle: Some(handle),
        });
        Ok(())
    }

    /// Stop the monitor for `path` and drop its entry. The stop flag is
    /// raised before the entry is unlinked, and the thread is joined so
    /// no poll runs after the command returns.
    pub fn unwatch(&self, path: &str) -> Result<(), WatchError> {
        let handle = {
            let mut entries = self.entries.lock().map_err(|_| WatchError::Lock)?;
            let index = entries
                .iter()
                .position(|w| w.path == path)
                .ok_or_else(|| WatchError::NotWatched(path.to_string()))?;
            entries[index].stop.store(true, Ordering::SeqCst);
            let handle = entries[index].handle.take();
            entries.remove(index);
            handle
        };
        if let Some(handle) = handle {
            let _ = handle.join();
        }
        Ok(())
    }

    /// Stop and join every monitor; used by `exit` teardown.
    pub fn stop_all(&self) {
        let drained: Vec<MailWatch> = match self.entries.lock() {
            Ok(mut entries) => {
                for entry in entries.iter() {
                    entry.stop.store(true, Ordering::SeqCst);
                }
                entries.drain(..).collect()
            }
            Err(_) => return,
        };
        for mut entry in drained {
            if let Some(handle) = entry.handle.take() {
                let _ = handle.join();
            }
        }
    }

    /// Snapshot of (path, last seen size) for display and tests.
    pub fn watched(&self) -> Result<Vec<(String, u64)>, WatchError> {
        let entries = self.entries.lock().map_err(|_| WatchError::Lock)?;
        Ok(entries
            .iter()
            .map(|w| (w.path.clone(), w.baseline.load(Ordering::SeqCst)))
            .collect())
    }
}

/// Monitor loop: poll the file size once per interval; growth beyond the
/// baseline raises one alert and moves the baseline. Cooperative
/// cancellation: the flag is checked on every turn, so a stop is observed
/// within one poll interval.
fn poll_file(path: &str, baseline: &AtomicU64, stop: &AtomicBool, style: OutputStyle) {
    while !stop.load(Ordering::SeqCst) {
        thread::sleep(POLL_INTERVAL);
        if stop.load(Ordering::SeqCst) {
            break;
        }
        let Ok(meta) = fs::metadata(path) else {
            // A vanished file is not fatal; it may reappear
            continue;
        };
        let size = meta.len();
        if size > baseline.load(Ordering::SeqCst) {
            println!(
                "\x07\n{}",
                style.alert(&format!("You have new mail in {} at {}", path, clock_now()))
            );
            baseline.store(size, Ordering::SeqCst);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs::OpenOptions;
    use std::io::Write;
    use std::path::PathBuf;

    fn scratch_file(name: &str, content: &str) -> PathBuf {
        let file = env::temp_dir().join(name);
        fs::write(&file, content).unwrap();
        file
    }

    #[test]
    fn test_watch_missing_file_is_refused() {
        let list = MailWatchList::new(OutputStyle::new());
        assert!(matches!(
            list.watch("/nonexistent/vena_mailbox"),
            Err(WatchError::Stat(_, _))
        ));
    }

    #[test]
    fn test_watch_duplicate_is_refused() {
        let file = scratch_file("vena_mail_dup", "x");
        let list = MailWatchList::new(OutputStyle::new());
        let path = file.display().to_string();

        list.watch(&path).unwrap();
        assert!(matches!(
            list.watch(&path),
            Err(WatchError::AlreadyWatched(_))
        ));
        list.unwatch(&path).unwrap();
    }

    #[test]
    fn test_unwatch_unknown_path() {
        let list = MailWatchList::new(OutputStyle::new());
        assert!(matches!(
            list.unwatch("/never/watched"),
            Err(WatchError::NotWatched(_))
        ));
    }

    #[test]
    fn test_growth_moves_baseline() {
        let file = scratch_file("vena_mail_growth", "seed");
        let list = MailWatchList::new(OutputStyle::new());
        let path = file.display().to_string();

        list.watch(&path).unwrap();
        let before = list.watched().unwrap()[0].1;

        let mut handle = OpenOptions::new().append(true).open(&file).unwrap();
        handle.write_all(b" and more bytes").unwrap();
        handle.flush().unwrap();

        // Give the 1-second poll two turns to notice
        thread::sleep(Duration::from_millis(2500));

        let after = list.watched().unwrap()[0].1;
        assert!(after > before, "baseline should move after growth");
        list.unwatch(&path).unwrap();
    }

    #[test]
    fn test_no_growth_keeps_baseline() {
        let file = scratch_file("vena_mail_static", "constant");
        let list = MailWatchList::new(OutputStyle::new());
        let path = file.display().to_string();

        list.watch(&path).unwrap();
        let before = list.watched().unwrap()[0].1;
        thread::sleep(Duration::from_millis(1500));
        let after = list.watched().unwrap()[0].1;
        assert_eq!(before, after);

        list.unwatch(&path).unwrap();
        assert!(list.watched().unwrap().is_empty());
    }
}
