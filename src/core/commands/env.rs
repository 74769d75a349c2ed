use std::env;
use std::sync::{Arc, Mutex};

use super::{Command, CommandError};
use crate::core::env::{format_env, set_var, EnvError, SearchPath};

/// `printenv`: the whole environment, or one variable's value.
#[derive(Clone)]
pub struct PrintenvCommand;

impl Default for PrintenvCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl PrintenvCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for PrintenvCommand {
    fn execute(&self, args: &[String]) -> Result<(), CommandError> {
        match args {
            [] => {
                for line in format_env() {
                    println!("{}", line);
                }
                Ok(())
            }
            [name] => match env::var(name) {
                Ok(value) => {
                    println!("{}", value);
                    Ok(())
                }
                Err(_) => Err(CommandError::EnvError(EnvError::VarNotFound(name.clone()))),
            },
            _ => Err(CommandError::EnvError(EnvError::TooManyArguments)),
        }
    }
}

/// `setenv`: with no argument behaves like `printenv`; one argument sets
/// the variable empty, two set it to the value. Changing PATH replaces
/// the search list with a fresh snapshot.
#[derive(Clone)]
pub struct SetenvCommand {
    search_path: Arc<Mutex<SearchPath>>,
}

impl SetenvCommand {
    pub fn new(search_path: Arc<Mutex<SearchPath>>) -> Self {
        Self { search_path }
    }

    fn rebuild_search_path(&self) -> Result<(), CommandError> {
        let mut search = self
            .search_path
            .lock()
            .map_err(|_| CommandError::ExecutionError("search path lock poisoned".to_string()))?;
        *search = SearchPath::from_env();
        Ok(())
    }
}

impl Command for SetenvCommand {
    fn execute(&self, args: &[String]) -> Result<(), CommandError> {
        let (name, value) = match args {
            [] => {
                for line in format_env() {
                    println!("{}", line);
                }
                return Ok(());
            }
            [name] => (name.as_str(), ""),
            [name, value] => (name.as_str(), value.as_str()),
            _ => return Err(CommandError::EnvError(EnvError::TooManyArguments)),
        };

        set_var(name, value)?;
        if name == "PATH" {
            self.rebuild_search_path()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printenv_single_variable() {
        env::set_var("VENA_PRINTENV_TEST", "value");
        assert!(PrintenvCommand::new()
            .execute(&["VENA_PRINTENV_TEST".to_string()])
            .is_ok());
    }

    #[test]
    fn test_printenv_missing_variable() {
        assert!(matches!(
            PrintenvCommand::new().execute(&["VENA_MISSING_VARIABLE".to_string()]),
            Err(CommandError::EnvError(EnvError::VarNotFound(_)))
        ));
    }

    #[test]
    fn test_printenv_too_many_arguments() {
        assert!(matches!(
            PrintenvCommand::new().execute(&["A".to_string(), "B".to_string()]),
            Err(CommandError::EnvError(EnvError::TooManyArguments))
        ));
    }

    #[test]
    fn test_setenv_sets_value() {
        let cmd = SetenvCommand::new(Arc::new(Mutex::new(SearchPath::from_env())));
        cmd.execute(&["VENA_SETENV_TEST".to_string(), "set".to_string()])
            .unwrap();
        assert_eq!(env::var("VENA_SETENV_TEST").unwrap(), "set");
    }

    #[test]
    fn test_setenv_single_argument_sets_empty() {
        let cmd = SetenvCommand::new(Arc::new(Mutex::new(SearchPath::from_env())));
        cmd.execute(&["VENA_SETENV_EMPTY".to_string()]).unwrap();
        assert_eq!(env::var("VENA_SETENV_EMPTY").unwrap(), "");
    }

    #[test]
    fn test_setenv_path_rebuilds_search_list() {
        let search_path = Arc::new(Mutex::new(SearchPath::from_str_path("/old")));
        let cmd = SetenvCommand::new(Arc::clone(&search_path));

        let original_path = env::var("PATH").unwrap_or_default();
        cmd.execute(&["PATH".to_string(), "/usr/bin:/bin".to_string()])
            .unwrap();
        assert_eq!(
            search_path.lock().unwrap().dirs(),
            &[
                std::path::PathBuf::from("/usr/bin"),
                std::path::PathBuf::from("/bin")
            ]
        );

        // Put PATH back for the rest of the test run
        env::set_var("PATH", original_path);
    }

    #[test]
    fn test_setenv_too_many_arguments() {
        let cmd = SetenvCommand::new(Arc::new(Mutex::new(SearchPath::from_env())));
        assert!(matches!(
            cmd.execute(&["A".to_string(), "B".to_string(), "C".to_string()]),
            Err(CommandError::EnvError(EnvError::TooManyArguments))
        ));
    }
}
