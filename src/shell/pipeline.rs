use std::os::fd::OwnedFd;

use nix::unistd;

use crate::process::{ProcessError, ProcessExecutor, StageIo};

/// Which descriptors of the left command feed the pipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipeKind {
    /// `|` stdout only
    Out,
    /// `|&` stdout and stderr
    OutErr,
}

impl PipeKind {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "|" => Some(PipeKind::Out),
            "|&" => Some(PipeKind::OutErr),
            _ => None,
        }
    }
}

/// A command line split at its single pipe operator.
#[derive(Debug, PartialEq)]
pub struct PipeSplit {
    pub left: Vec<String>,
    pub kind: PipeKind,
    pub right: Vec<String>,
}

/// Outcome of scanning a token list for pipe operators.
#[derive(Debug, PartialEq)]
pub enum Parsed {
    Single(Vec<String>),
    Piped(PipeSplit),
}

#[derive(Debug)]
pub enum PipelineError {
    /// Only a single pipe stage is supported; more than one operator in a
    /// line is rejected rather than silently picking a split point.
    MultiplePipes,
    EmptyLeft,
    EmptyRight,
    Pipe(nix::errno::Errno),
    Clone(std::io::Error),
    Process(ProcessError),
}

impl From<ProcessError> for PipelineError {
    fn from(e: ProcessError) -> Self {
        PipelineError::Process(e)
    }
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::MultiplePipes => {
                write!(f, "only one pipe per command is supported")
            }
            PipelineError::EmptyLeft => write!(f, "missing command before pipe"),
            PipelineError::EmptyRight => write!(f, "missing command after pipe"),
            PipelineError::Pipe(e) => write!(f, "cannot create pipe: {}", e),
            PipelineError::Clone(e) => write!(f, "cannot duplicate pipe end: {}", e),
            PipelineError::Process(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for PipelineError {}

/// Split a token list at its pipe operator, if any. Ownership of the
/// tokens moves into the resulting halves; nothing is copied.
pub fn split(mut tokens: Vec<String>) -> Result<Parsed, PipelineError> {
    let mut found = None;
    for (i, token) in tokens.iter().enumerate() {
        if let Some(kind) = PipeKind::from_token(token) {
            if found.is_some() {
                return Err(PipelineError::MultiplePipes);
            }
            found = Some((i, kind));
        }
    }

    let Some((at, kind)) = found else {
        return Ok(Parsed::Single(tokens));
    };

    let right: Vec<String> = tokens.split_off(at + 1);
    tokens.pop(); // the operator itself
    if tokens.is_empty() {
        return Err(PipelineError::EmptyLeft);
    }
    if right.is_empty() {
        return Err(PipelineError::EmptyRight);
    }

    Ok(Parsed::Piped(PipeSplit {
        left: tokens,
        kind,
        right,
    }))
}

/// Wire one OS pipe between the two sides and run them. Both children are
/// spawned before either is waited on, so a left command that fills the
/// pipe buffer cannot deadlock against an unstarted reader. The shell's
/// own descriptors are never rewired; the terminal is intact for the next
/// prompt.
pub fn run(split: PipeSplit, executor: &ProcessExecutor) -> Result<(), PipelineError> {
    let (read_end, write_end) = unistd::pipe().map_err(PipelineError::Pipe)?;

    let left_io = left_wiring(write_end, split.kind)?;
    let mut stages = Vec::new();

    match executor.spawn_stage(split.left, left_io) {
        Ok(Some(stage)) => stages.push(stage),
        Ok(None) => {}
        // The write end is already dropped here, so the right side sees
        // end-of-file instead of hanging.
        Err(e) => executor.report(&e),
    }

    let right_io = StageIo {
        stdin: Some(read_end),
        ..StageIo::default()
    };
    match executor.spawn_stage(split.right, right_io) {
        Ok(Some(stage)) => stages.push(stage),
        Ok(None) => {}
        Err(e) => executor.report(&e),
    }

    for (child, background) in &stages {
        if *background {
            println!("[{}]", child.id());
        } else {
            executor.wait_foreground(child)?;
        }
    }
    Ok(())
}

fn left_wiring(write_end: OwnedFd, kind: PipeKind) -> Result<StageIo, PipelineError> {
    let stderr = match kind {
        PipeKind::OutErr => Some(write_end.try_clone().map_err(PipelineError::Clone)?),
        PipeKind::Out => None,
    };
    Ok(StageIo {
        stdin: None,
        stdout: Some(write_end),
        stderr,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_split_no_pipe() {
        let parsed = split(tokens(&["ls", "-l"])).unwrap();
        assert_eq!(parsed, Parsed::Single(tokens(&["ls", "-l"])));
    }

    #[test]
    fn test_split_plain_pipe() {
        let parsed = split(tokens(&["ls", "-l", "|", "wc", "-l"])).unwrap();
        let Parsed::Piped(split) = parsed else {
            panic!("expected a pipe");
        };
        assert_eq!(split.left, tokens(&["ls", "-l"]));
        assert_eq!(split.kind, PipeKind::Out);
        assert_eq!(split.right, tokens(&["wc", "-l"]));
    }

    #[test]
    fn test_split_stderr_pipe() {
        let parsed = split(tokens(&["make", "|&", "less"])).unwrap();
        let Parsed::Piped(split) = parsed else {
            panic!("expected a pipe");
        };
        assert_eq!(split.kind, PipeKind::OutErr);
    }

    #[test]
    fn test_split_rejects_multiple_pipes() {
        assert!(matches!(
            split(tokens(&["a", "|", "b", "|", "c"])),
            Err(PipelineError::MultiplePipes)
        ));
    }

    #[test]
    fn test_split_rejects_empty_sides() {
        assert!(matches!(
            split(tokens(&["|", "wc"])),
            Err(PipelineError::EmptyLeft)
        ));
        assert!(matches!(
            split(tokens(&["ls", "|"])),
            Err(PipelineError::EmptyRight)
        ));
    }

    #[test]
    fn test_run_feeds_left_stdout_into_right_stdin() {
        use crate::core::env::SearchPath;
        use crate::core::state::ShellContext;
        use crate::flags::Flags;
        use crate::style::OutputStyle;
        use std::sync::{Arc, Mutex};

        let executor = ProcessExecutor::new(
            &Flags::default(),
            Arc::new(Mutex::new(SearchPath::from_str_path("/usr/bin:/bin"))),
            Arc::new(Mutex::new(ShellContext::new().unwrap())),
            OutputStyle::new(),
        );

        let target = std::env::temp_dir().join("vena_pipe_out.txt");
        let _ = std::fs::remove_file(&target);
        let target_str = target.display().to_string();

        let parsed = split(tokens(&[
            "echo", "hello", "|", "wc", "-c", ">", &target_str,
        ]))
        .unwrap();
        let Parsed::Piped(parts) = parsed else {
            panic!("expected a pipe");
        };
        run(parts, &executor).unwrap();

        // "hello\n" is six bytes, counted by the right-hand command
        assert_eq!(
            std::fs::read_to_string(&target).unwrap().trim(),
            "6"
        );
    }
}
