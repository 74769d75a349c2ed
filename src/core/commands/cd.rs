use std::env;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use super::{Command, CommandError};
use crate::core::state::ShellContext;
use crate::path::PathExpander;

/// `cd`: no argument goes home, `-` returns to the previous directory,
/// anything else is a (tilde-expanded) target path.
#[derive(Clone)]
pub struct CdCommand {
    context: Arc<Mutex<ShellContext>>,
    path_expander: PathExpander,
}

impl CdCommand {
    pub fn new(context: Arc<Mutex<ShellContext>>) -> Self {
        Self {
            context,
            path_expander: PathExpander::new(),
        }
    }
}

impl Command for CdCommand {
    fn execute(&self, args: &[String]) -> Result<(), CommandError> {
        if args.len() > 1 {
            return Err(CommandError::InvalidArguments(
                "cd takes at most one argument".to_string(),
            ));
        }

        let mut ctx = self
            .context
            .lock()
            .map_err(|_| CommandError::ExecutionError("context lock poisoned".to_string()))?;

        let current = env::current_dir()?;
        let target: PathBuf = match args.first().map(String::as_str) {
            None => dirs::home_dir().ok_or_else(|| {
                CommandError::ExecutionError("home directory not found".to_string())
            })?,
            Some("-") => ctx.previous_dir.clone(),
            Some(path) => self
                .path_expander
                .expand(path)
                .map_err(|e| CommandError::ExecutionError(e.to_string()))?,
        };

        env::set_current_dir(&target).map_err(|e| {
            CommandError::ExecutionError(format!("cannot cd to {}: {}", target.display(), e))
        })?;
        ctx.previous_dir = current;
        Ok(())
    }
}
