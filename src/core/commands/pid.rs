use super::{Command, CommandError};

#[derive(Clone)]
pub struct PidCommand;

impl Default for PidCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl PidCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for PidCommand {
    fn execute(&self, _args: &[String]) -> Result<(), CommandError> {
        println!("pid: {}", std::process::id());
        Ok(())
    }
}
