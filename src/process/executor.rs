use std::os::fd::OwnedFd;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use nix::errno::Errno;
use nix::sys::signal::{kill, Signal};
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::{alarm, Pid};

use super::{signal, ProcessError};
use crate::core::env::SearchPath;
use crate::core::state::ShellContext;
use crate::flags::Flags;
use crate::path::PathExpander;
use crate::shell::redirect::{self, RedirectFiles};
use crate::style::OutputStyle;

const WAIT_POLL: Duration = Duration::from_millis(50);

/// Pipe-stage descriptor overrides. Applied after any per-command
/// redirection, so a conflicting redirection on a piped side loses.
#[derive(Default)]
pub struct StageIo {
    pub stdin: Option<OwnedFd>,
    pub stdout: Option<OwnedFd>,
    pub stderr: Option<OwnedFd>,
}

/// Resolves a command name to an executable, spawns it with the requested
/// descriptor wiring, and either waits (with the alarm timeout) or lets a
/// background child run until the SIGCHLD reaper collects it.
#[derive(Clone)]
pub struct ProcessExecutor {
    quiet: bool,
    timeout_secs: u32,
    search_path: Arc<Mutex<SearchPath>>,
    context: Arc<Mutex<ShellContext>>,
    path_expander: PathExpander,
    style: OutputStyle,
}

impl ProcessExecutor {
    pub fn new(
        flags: &Flags,
        search_path: Arc<Mutex<SearchPath>>,
        context: Arc<Mutex<ShellContext>>,
        style: OutputStyle,
    ) -> Self {
        ProcessExecutor {
            quiet: flags.is_set("quiet"),
            timeout_secs: flags.timeout_secs(),
            search_path,
            context,
            path_expander: PathExpander::new(),
            style,
        }
    }

    /// Run one complete command line with no pipe in it.
    pub fn launch(&self, tokens: Vec<String>) -> Result<(), ProcessError> {
        let Some((child, background)) = self.spawn_stage(tokens, StageIo::default())? else {
            return Ok(());
        };
        if background {
            println!("[{}]", child.id());
            Ok(())
        } else {
            self.wait_foreground(&child)
        }
    }

    /// Resolve and spawn one command, returning the child and whether it
    /// asked to run in the background. All abort conditions (noclobber
    /// conflict, missing input file, unresolvable command) are checked
    /// before any process exists.
    pub fn spawn_stage(
        &self,
        mut tokens: Vec<String>,
        io: StageIo,
    ) -> Result<Option<(Child, bool)>, ProcessError> {
        let background = strip_background_marker(&mut tokens);
        let redirect = redirect::extract(&mut tokens)?;
        if tokens.is_empty() {
            return Err(ProcessError::MissingCommand);
        }

        let noclobber = self
            .context
            .lock()
            .map_err(|_| ProcessError::Other("shell context lock poisoned".to_string()))?
            .noclobber;
        let files = match &redirect {
            Some(r) => r.open(noclobber)?,
            None => RedirectFiles::default(),
        };

        let program = self.resolve(&tokens[0])?;
        let args = self.expand_args(&tokens[1..]);

        let mut command = Command::new(&program);
        command.args(&args);
        apply_wiring(&mut command, files, io);

        let child = command
            .spawn()
            .map_err(|e| ProcessError::SpawnFailed(program.display().to_string(), e))?;
        Ok(Some((child, background)))
    }

    /// Block until the child finishes or the alarm fires. A child that
    /// outlives the timeout is sent SIGINT and reported; a nonzero exit
    /// status is echoed, a zero one is silent.
    pub fn wait_foreground(&self, child: &Child) -> Result<(), ProcessError> {
        let pid = Pid::from_raw(child.id() as i32);
        signal::begin_wait();
        let _ = alarm::set(self.timeout_secs);
        let status = self.poll_until_done(pid);
        let _ = alarm::cancel();

        if let Some(code) = status? {
            if code != 0 {
                println!("exit code of child: {}", code);
            }
        }
        Ok(())
    }

    fn poll_until_done(&self, pid: Pid) -> Result<Option<i32>, ProcessError> {
        loop {
            match waitpid(pid, Some(WaitPidFlag::WNOHANG)) {
                Ok(WaitStatus::Exited(_, code)) => return Ok(Some(code)),
                Ok(WaitStatus::Signaled(_, sig, _)) => return Ok(Some(128 + sig as i32)),
                Ok(_) => {}
                // The SIGCHLD reaper won the race; it kept the status.
                Err(Errno::ECHILD) => return Ok(signal::reaped_status(pid)),
                Err(e) => return Err(ProcessError::Wait(e.to_string())),
            }

            if signal::timed_out() {
                let _ = kill(pid, Signal::SIGINT);
                eprintln!(
                    "{}",
                    self.style
                        .error("!!! taking too long to execute this command !!!")
                );
                return Ok(None);
            }

            if !signal::child_done() {
                thread::sleep(WAIT_POLL);
            }
        }
    }

    pub fn report(&self, err: &ProcessError) {
        if !self.quiet {
            eprintln!("{}", self.style.error(&format!("vena: {}", err)));
        }
    }

    fn resolve(&self, name: &str) -> Result<PathBuf, ProcessError> {
        if name.contains('/') {
            return self.resolve_explicit(name);
        }
        let search = self
            .search_path
            .lock()
            .map_err(|_| ProcessError::Other("search path lock poisoned".to_string()))?;
        search
            .resolve(name)
            .ok_or_else(|| ProcessError::CommandNotFound(name.to_string()))
    }

    /// A name containing a path separator must point at an existing
    /// non-directory file executable by owner, group, and other.
    fn resolve_explicit(&self, name: &str) -> Result<PathBuf, ProcessError> {
        let path = self
            .path_expander
            .expand(name)
            .map_err(|e| ProcessError::Other(e.to_string()))?;
        let meta = path
            .metadata()
            .map_err(|e| ProcessError::Stat(name.to_string(), e))?;
        if meta.is_dir() {
            return Err(ProcessError::IsDirectory(name.to_string()));
        }
        if meta.permissions().mode() & 0o111 != 0o111 {
            return Err(ProcessError::NotExecutable(name.to_string()));
        }
        Ok(path)
    }

    fn expand_args(&self, args: &[String]) -> Vec<String> {
        args.iter()
            .map(|arg| {
                if arg.contains('~') {
                    self.path_expander
                        .expand(arg)
                        .map(|p| p.to_string_lossy().into_owned())
                        .unwrap_or_else(|_| arg.clone())
                } else {
                    arg.clone()
                }
            })
            .collect()
    }
}

fn apply_wiring(command: &mut Command, files: RedirectFiles, io: StageIo) {
    if let Some(file) = files.stdin {
        command.stdin(Stdio::from(file));
    }
    if let Some(file) = files.stdout {
        command.stdout(Stdio::from(file));
    }
    if let Some(file) = files.stderr {
        command.stderr(Stdio::from(file));
    }
    if let Some(fd) = io.stdin {
        command.stdin(Stdio::from(fd));
    }
    if let Some(fd) = io.stdout {
        command.stdout(Stdio::from(fd));
    }
    if let Some(fd) = io.stderr {
        command.stderr(Stdio::from(fd));
    }
}

/// A standalone trailing `&` marks a background command; it is stripped
/// before spawn so the program never sees it.
fn strip_background_marker(tokens: &mut Vec<String>) -> bool {
    if tokens.last().map(String::as_str) == Some("&") {
        tokens.pop();
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn test_executor() -> ProcessExecutor {
        ProcessExecutor::new(
            &Flags::default(),
            Arc::new(Mutex::new(SearchPath::from_str_path("/usr/bin:/bin"))),
            Arc::new(Mutex::new(ShellContext::new().unwrap())),
            OutputStyle::new(),
        )
    }

    #[test]
    fn test_strip_background_marker() {
        let mut tokens = vec!["sleep".to_string(), "5".to_string(), "&".to_string()];
        assert!(strip_background_marker(&mut tokens));
        assert_eq!(tokens, vec!["sleep".to_string(), "5".to_string()]);

        let mut tokens = vec!["echo".to_string(), "a&b".to_string()];
        assert!(!strip_background_marker(&mut tokens));
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn test_resolve_explicit_rejects_directory() {
        let executor = test_executor();
        let result = executor.resolve("/tmp/");
        assert!(matches!(result, Err(ProcessError::IsDirectory(_))));
    }

    #[test]
    fn test_resolve_explicit_rejects_non_executable() {
        let executor = test_executor();
        let file = env::temp_dir().join("vena_not_executable");
        fs::write(&file, "data").unwrap();
        let mut perms = fs::metadata(&file).unwrap().permissions();
        perms.set_mode(0o644);
        fs::set_permissions(&file, perms).unwrap();

        let name = file.display().to_string();
        assert!(matches!(
            executor.resolve(&name),
            Err(ProcessError::NotExecutable(_))
        ));
    }

    #[test]
    fn test_resolve_explicit_missing_file() {
        let executor = test_executor();
        assert!(matches!(
            executor.resolve("/nonexistent/vena/tool"),
            Err(ProcessError::Stat(_, _))
        ));
    }

    #[test]
    fn test_resolve_unknown_command() {
        let executor = test_executor();
        assert!(matches!(
            executor.resolve("vena_definitely_not_a_command"),
            Err(ProcessError::CommandNotFound(_))
        ));
    }

    #[test]
    fn test_launch_foreground_command() {
        let executor = test_executor();
        assert!(executor.launch(vec!["true".to_string()]).is_ok());
    }

    #[test]
    fn test_launch_background_returns_immediately() {
        let executor = test_executor();
        let started = std::time::Instant::now();
        executor
            .launch(vec!["sleep".to_string(), "2".to_string(), "&".to_string()])
            .unwrap();
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_spawn_with_redirection_writes_file() {
        let executor = test_executor();
        let target = env::temp_dir().join("vena_exec_redirect.txt");
        let _ = fs::remove_file(&target);

        let tokens = vec![
            "echo".to_string(),
            "hello".to_string(),
            ">".to_string(),
            target.display().to_string(),
        ];
        let (child, background) = executor
            .spawn_stage(tokens, StageIo::default())
            .unwrap()
            .unwrap();
        assert!(!background);
        executor.wait_foreground(&child).unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap().trim(), "hello");
    }

    #[test]
    fn test_spawn_aborts_on_noclobber_conflict() {
        let executor = test_executor();
        let target = env::temp_dir().join("vena_exec_noclobber.txt");
        fs::write(&target, "keep me").unwrap();
        executor.context.lock().unwrap().noclobber = true;

        let tokens = vec![
            "echo".to_string(),
            "gone".to_string(),
            ">".to_string(),
            target.display().to_string(),
        ];
        let result = executor.spawn_stage(tokens, StageIo::default());
        assert!(matches!(result, Err(ProcessError::Redirect(_))));
        assert_eq!(fs::read_to_string(&target).unwrap(), "keep me");
    }
}
