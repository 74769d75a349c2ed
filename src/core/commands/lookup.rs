use std::sync::{Arc, Mutex};

use super::{Command, CommandError};
use crate::core::env::SearchPath;

fn lock_search(
    search_path: &Arc<Mutex<SearchPath>>,
) -> Result<std::sync::MutexGuard<'_, SearchPath>, CommandError> {
    search_path
        .lock()
        .map_err(|_| CommandError::ExecutionError("search path lock poisoned".to_string()))
}

/// `which`: first executable match for each name across the search list.
#[derive(Clone)]
pub struct WhichCommand {
    search_path: Arc<Mutex<SearchPath>>,
}

impl WhichCommand {
    pub fn new(search_path: Arc<Mutex<SearchPath>>) -> Self {
        Self { search_path }
    }
}

impl Command for WhichCommand {
    fn execute(&self, args: &[String]) -> Result<(), CommandError> {
        if args.is_empty() {
            return Err(CommandError::InvalidArguments(
                "which: specify a command name".to_string(),
            ));
        }

        let search = lock_search(&self.search_path)?;
        for name in args {
            match search.resolve(name) {
                Some(path) => println!("{}", path.display()),
                None => println!("{}: Command not found.", name),
            }
        }
        Ok(())
    }
}

/// `where`: every executable match for each name, in search order.
#[derive(Clone)]
pub struct WhereCommand {
    search_path: Arc<Mutex<SearchPath>>,
}

impl WhereCommand {
    pub fn new(search_path: Arc<Mutex<SearchPath>>) -> Self {
        Self { search_path }
    }
}

impl Command for WhereCommand {
    fn execute(&self, args: &[String]) -> Result<(), CommandError> {
        if args.is_empty() {
            return Err(CommandError::InvalidArguments(
                "where: specify a command name".to_string(),
            ));
        }

        let search = lock_search(&self.search_path)?;
        for name in args {
            let matches = search.resolve_all(name);
            if matches.is_empty() {
                println!("{}: Command not found.", name);
            } else {
                for path in matches {
                    println!("{}", path.display());
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_which_requires_a_name() {
        let cmd = WhichCommand::new(Arc::new(Mutex::new(SearchPath::from_env())));
        assert!(matches!(
            cmd.execute(&[]),
            Err(CommandError::InvalidArguments(_))
        ));
    }

    #[test]
    fn test_where_requires_a_name() {
        let cmd = WhereCommand::new(Arc::new(Mutex::new(SearchPath::from_env())));
        assert!(matches!(
            cmd.execute(&[]),
            Err(CommandError::InvalidArguments(_))
        ));
    }

    #[test]
    fn test_which_with_unknown_name_still_succeeds() {
        let cmd = WhichCommand::new(Arc::new(Mutex::new(SearchPath::from_str_path(
            "/nonexistent_dir_for_vena",
        ))));
        assert!(cmd
            .execute(&["vena_definitely_missing".to_string()])
            .is_ok());
    }
}
