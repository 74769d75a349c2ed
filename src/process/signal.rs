use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::Pid;
use signal_hook::consts::{SIGALRM, SIGCHLD};

use super::ProcessError;

static CHILD_DONE: AtomicBool = AtomicBool::new(false);
static TIMED_OUT: AtomicBool = AtomicBool::new(false);
static LAST_REAPED_PID: AtomicI32 = AtomicI32::new(0);
static LAST_REAPED_STATUS: AtomicI32 = AtomicI32::new(0);

/// Install the process-wide SIGCHLD and SIGALRM handlers. Handler bodies
/// stay async-signal-safe: atomics and non-blocking waitpid only; every
/// decision is made by the main thread polling the flags.
pub fn install() -> Result<(), ProcessError> {
    unsafe {
        signal_hook::low_level::register(SIGCHLD, reap_terminated)
            .map_err(|e| ProcessError::SignalError(e.to_string()))?;
        signal_hook::low_level::register(SIGALRM, || TIMED_OUT.store(true, Ordering::SeqCst))
            .map_err(|e| ProcessError::SignalError(e.to_string()))?;
    }
    Ok(())
}

/// Drain every terminated child. Multiple children can exit between two
/// SIGCHLD deliveries; a single delivery reaps them all.
fn reap_terminated() {
    loop {
        match waitpid(Pid::from_raw(-1), Some(WaitPidFlag::WNOHANG)) {
            Ok(WaitStatus::Exited(pid, code)) => record(pid, code),
            Ok(WaitStatus::Signaled(pid, sig, _)) => record(pid, 128 + sig as i32),
            _ => break,
        }
    }
}

fn record(pid: Pid, status: i32) {
    LAST_REAPED_PID.store(pid.as_raw(), Ordering::SeqCst);
    LAST_REAPED_STATUS.store(status, Ordering::SeqCst);
    CHILD_DONE.store(true, Ordering::SeqCst);
}

/// Clear the per-wait flags before arming the alarm for a foreground wait.
pub fn begin_wait() {
    CHILD_DONE.store(false, Ordering::SeqCst);
    TIMED_OUT.store(false, Ordering::SeqCst);
}

pub fn timed_out() -> bool {
    TIMED_OUT.load(Ordering::SeqCst)
}

/// Consume the child-finished flag set by the reaper.
pub fn child_done() -> bool {
    CHILD_DONE.swap(false, Ordering::SeqCst)
}

/// Exit status recorded by the reaper for `pid`, when the reaper won the
/// race against the foreground waiter's own status check.
pub fn reaped_status(pid: Pid) -> Option<i32> {
    (LAST_REAPED_PID.load(Ordering::SeqCst) == pid.as_raw())
        .then(|| LAST_REAPED_STATUS.load(Ordering::SeqCst))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaped_status_matches_pid() {
        record(Pid::from_raw(4242), 3);
        assert_eq!(reaped_status(Pid::from_raw(4242)), Some(3));
        assert_eq!(reaped_status(Pid::from_raw(4243)), None);
        assert!(child_done());
        // Flag is consumed on read
        assert!(!child_done());
    }
}
