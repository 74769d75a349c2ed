use std::env;
use std::fs;
use std::path::Path;

use super::{Command, CommandError};

/// `list`: directory listing of the working directory, or of each named
/// directory with a header. A directory that cannot be read is reported
/// and the rest still print.
#[derive(Clone)]
pub struct ListCommand;

impl Default for ListCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl ListCommand {
    pub fn new() -> Self {
        Self
    }

    fn list_one(&self, dir: &Path, with_header: bool) -> Result<(), CommandError> {
        let entries = fs::read_dir(dir).map_err(|e| {
            CommandError::ExecutionError(format!("cannot access {}: {}", dir.display(), e))
        })?;

        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();

        if with_header {
            println!("{}:", dir.display());
        }
        for name in names {
            println!("  {}", name);
        }
        Ok(())
    }
}

impl Command for ListCommand {
    fn execute(&self, args: &[String]) -> Result<(), CommandError> {
        if args.is_empty() {
            let cwd = env::current_dir()?;
            return self.list_one(&cwd, false);
        }

        for arg in args {
            if let Err(e) = self.list_one(Path::new(arg), true) {
                eprintln!("list: {}", e);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_cwd() {
        assert!(ListCommand::new().execute(&[]).is_ok());
    }

    #[test]
    fn test_list_missing_dir_is_reported_not_fatal() {
        // Per-argument failures are printed; the command itself succeeds
        assert!(ListCommand::new()
            .execute(&["/nonexistent/vena_dir".to_string()])
            .is_ok());
    }
}
