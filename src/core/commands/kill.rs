use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;

use super::{Command, CommandError};

/// `kill <pid>` sends SIGTERM; `kill -N <pid>` sends signal N.
#[derive(Clone)]
pub struct KillCommand;

impl Default for KillCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl KillCommand {
    pub fn new() -> Self {
        Self
    }
}

fn parse_pid(arg: &str) -> Result<Pid, CommandError> {
    arg.parse::<i32>()
        .map(Pid::from_raw)
        .map_err(|_| CommandError::InvalidArguments(format!("bad pid: {}", arg)))
}

fn parse_signal(arg: &str) -> Result<Signal, CommandError> {
    let number: i32 = arg
        .trim_start_matches('-')
        .parse()
        .map_err(|_| CommandError::InvalidArguments(format!("bad signal: {}", arg)))?;
    Signal::try_from(number)
        .map_err(|_| CommandError::InvalidArguments(format!("bad signal: {}", arg)))
}

impl Command for KillCommand {
    fn execute(&self, args: &[String]) -> Result<(), CommandError> {
        let (signal, pid) = match args {
            [] => {
                return Err(CommandError::InvalidArguments(
                    "kill: specify at least one argument".to_string(),
                ))
            }
            [pid] => (Signal::SIGTERM, parse_pid(pid)?),
            [signal, pid] => (parse_signal(signal)?, parse_pid(pid)?),
            _ => {
                return Err(CommandError::InvalidArguments(
                    "kill: too many arguments".to_string(),
                ))
            }
        };

        kill(pid, signal)
            .map_err(|e| CommandError::ExecutionError(format!("kill {}: {}", pid, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_signal_with_dash() {
        assert_eq!(parse_signal("-9").unwrap(), Signal::SIGKILL);
        assert_eq!(parse_signal("15").unwrap(), Signal::SIGTERM);
    }

    #[test]
    fn test_parse_signal_rejects_garbage() {
        assert!(parse_signal("-zap").is_err());
        assert!(parse_signal("9999").is_err());
    }

    #[test]
    fn test_parse_pid_rejects_garbage() {
        assert!(parse_pid("abc").is_err());
        assert!(parse_pid("12").is_ok());
    }

    #[test]
    fn test_kill_requires_arguments() {
        assert!(matches!(
            KillCommand::new().execute(&[]),
            Err(CommandError::InvalidArguments(_))
        ));
    }

    #[test]
    fn test_kill_nonexistent_process() {
        // Pid well above any live process on a test machine
        let result = KillCommand::new().execute(&["99999999".to_string()]);
        assert!(result.is_err());
    }
}
