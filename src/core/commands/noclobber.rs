use std::sync::{Arc, Mutex};

use super::{Command, CommandError};
use crate::core::state::ShellContext;

/// `noclobber`: toggle the overwrite guard and report the new state.
#[derive(Clone)]
pub struct NoclobberCommand {
    context: Arc<Mutex<ShellContext>>,
}

impl NoclobberCommand {
    pub fn new(context: Arc<Mutex<ShellContext>>) -> Self {
        Self { context }
    }
}

impl Command for NoclobberCommand {
    fn execute(&self, _args: &[String]) -> Result<(), CommandError> {
        let mut ctx = self
            .context
            .lock()
            .map_err(|_| CommandError::ExecutionError("context lock poisoned".to_string()))?;
        let enabled = ctx.toggle_noclobber();
        println!("noclobber is now {}", if enabled { "on" } else { "off" });
        Ok(())
    }
}
