use std::env;
use std::io;
use std::path::PathBuf;

/// Mutable per-session state: prompt prefix, the directory `cd -` returns
/// to, and the clobber guard. Owned by the interactive thread; built-in
/// handlers mutate it through a shared mutex.
#[derive(Debug)]
pub struct ShellContext {
    pub prompt_prefix: Option<String>,
    pub previous_dir: PathBuf,
    pub noclobber: bool,
}

impl ShellContext {
    pub fn new() -> Result<Self, io::Error> {
        Ok(ShellContext {
            prompt_prefix: None,
            previous_dir: env::current_dir()?,
            noclobber: false,
        })
    }

    /// Flip the clobber guard, returning the new setting.
    pub fn toggle_noclobber(&mut self) -> bool {
        self.noclobber = !self.noclobber;
        self.noclobber
    }

    /// Prompt line for the given working directory: `PREFIX [CWD]> `.
    pub fn render_prompt(&self, cwd: &str) -> String {
        match &self.prompt_prefix {
            Some(prefix) => format!("{} [{}]> ", prefix, cwd),
            None => format!("[{}]> ", cwd),
        }
    }
}
