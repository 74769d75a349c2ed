use std::env;

use super::{Command, CommandError};

#[derive(Clone)]
pub struct PwdCommand;

impl Default for PwdCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl PwdCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for PwdCommand {
    fn execute(&self, _args: &[String]) -> Result<(), CommandError> {
        let cwd = env::current_dir()?;
        println!("{}", cwd.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pwd_succeeds() {
        assert!(PwdCommand::new().execute(&[]).is_ok());
    }
}
