use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex};

use super::{Command, CommandError};
use crate::core::state::ShellContext;

/// `prompt words...` sets the prompt prefix; with no argument the prefix
/// is read interactively. An empty reply clears the prefix.
#[derive(Clone)]
pub struct PromptCommand {
    context: Arc<Mutex<ShellContext>>,
}

impl PromptCommand {
    pub fn new(context: Arc<Mutex<ShellContext>>) -> Self {
        Self { context }
    }

    fn read_prefix() -> Result<String, CommandError> {
        print!("input prompt prefix: ");
        io::stdout().flush()?;
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim_end_matches('\n').to_string())
    }
}

impl Command for PromptCommand {
    fn execute(&self, args: &[String]) -> Result<(), CommandError> {
        let prefix = if args.is_empty() {
            Self::read_prefix()?
        } else {
            args.join(" ")
        };

        let mut ctx = self
            .context
            .lock()
            .map_err(|_| CommandError::ExecutionError("context lock poisoned".to_string()))?;
        ctx.prompt_prefix = if prefix.is_empty() {
            None
        } else {
            Some(prefix)
        };
        Ok(())
    }
}
