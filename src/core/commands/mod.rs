use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

mod cd;
mod env;
mod exit;
mod kill;
mod list;
mod lookup;
mod noclobber;
mod pid;
mod prompt;
mod pwd;
mod watch;

pub use cd::CdCommand;
pub use env::{PrintenvCommand, SetenvCommand};
pub use exit::ExitCommand;
pub use kill::KillCommand;
pub use list::ListCommand;
pub use lookup::{WhereCommand, WhichCommand};
pub use noclobber::NoclobberCommand;
pub use pid::PidCommand;
pub use prompt::PromptCommand;
pub use pwd::PwdCommand;
pub use watch::{WatchmailCommand, WatchuserCommand};

use crate::core::env::{EnvError, SearchPath};
use crate::core::state::ShellContext;
use crate::watch::{MailWatchList, UserWatchList, WatchError};

#[derive(Debug)]
pub enum CommandError {
    NotFound(String),
    InvalidArguments(String),
    ExecutionError(String),
    IoError(std::io::Error),
    EnvError(EnvError),
    WatchError(WatchError),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::NotFound(cmd) => write!(f, "command not found: {}", cmd),
            CommandError::InvalidArguments(msg) => write!(f, "invalid arguments: {}", msg),
            CommandError::ExecutionError(msg) => write!(f, "execution error: {}", msg),
            CommandError::IoError(err) => write!(f, "IO error: {}", err),
            CommandError::EnvError(err) => write!(f, "{}", err),
            CommandError::WatchError(err) => write!(f, "{}", err),
        }
    }
}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        CommandError::IoError(err)
    }
}

impl From<EnvError> for CommandError {
    fn from(err: EnvError) -> Self {
        CommandError::EnvError(err)
    }
}

impl From<WatchError> for CommandError {
    fn from(err: WatchError) -> Self {
        CommandError::WatchError(err)
    }
}

pub trait Command {
    fn execute(&self, args: &[String]) -> Result<(), CommandError>;
}

#[derive(Clone)]
enum CommandType {
    Exit(ExitCommand),
    Which(WhichCommand),
    Where(WhereCommand),
    Cd(CdCommand),
    Pwd(PwdCommand),
    List(ListCommand),
    Pid(PidCommand),
    Kill(KillCommand),
    Prompt(PromptCommand),
    Printenv(PrintenvCommand),
    Setenv(SetenvCommand),
    Watchuser(WatchuserCommand),
    Watchmail(WatchmailCommand),
    Noclobber(NoclobberCommand),
}

impl Command for CommandType {
    fn execute(&self, args: &[String]) -> Result<(), CommandError> {
        match self {
            CommandType::Exit(cmd) => cmd.execute(args),
            CommandType::Which(cmd) => cmd.execute(args),
            CommandType::Where(cmd) => cmd.execute(args),
            CommandType::Cd(cmd) => cmd.execute(args),
            CommandType::Pwd(cmd) => cmd.execute(args),
            CommandType::List(cmd) => cmd.execute(args),
            CommandType::Pid(cmd) => cmd.execute(args),
            CommandType::Kill(cmd) => cmd.execute(args),
            CommandType::Prompt(cmd) => cmd.execute(args),
            CommandType::Printenv(cmd) => cmd.execute(args),
            CommandType::Setenv(cmd) => cmd.execute(args),
            CommandType::Watchuser(cmd) => cmd.execute(args),
            CommandType::Watchmail(cmd) => cmd.execute(args),
            CommandType::Noclobber(cmd) => cmd.execute(args),
        }
    }
}

/// The built-in dispatcher: a fixed name-to-handler table consulted
/// before any process is launched.
#[derive(Clone)]
pub struct CommandExecutor {
    commands: BTreeMap<String, CommandType>,
}

impl CommandExecutor {
    pub fn new(
        context: Arc<Mutex<ShellContext>>,
        search_path: Arc<Mutex<SearchPath>>,
        mail_watches: MailWatchList,
        user_watches: UserWatchList,
    ) -> Self {
        let mut commands = BTreeMap::new();

        commands.insert(
            "exit".to_string(),
            CommandType::Exit(ExitCommand::new(mail_watches.clone())),
        );
        commands.insert(
            "which".to_string(),
            CommandType::Which(WhichCommand::new(Arc::clone(&search_path))),
        );
        commands.insert(
            "where".to_string(),
            CommandType::Where(WhereCommand::new(Arc::clone(&search_path))),
        );
        commands.insert(
            "cd".to_string(),
            CommandType::Cd(CdCommand::new(Arc::clone(&context))),
        );
        commands.insert("pwd".to_string(), CommandType::Pwd(PwdCommand::new()));
        commands.insert("list".to_string(), CommandType::List(ListCommand::new()));
        commands.insert("pid".to_string(), CommandType::Pid(PidCommand::new()));
        commands.insert("kill".to_string(), CommandType::Kill(KillCommand::new()));
        commands.insert(
            "prompt".to_string(),
            CommandType::Prompt(PromptCommand::new(Arc::clone(&context))),
        );
        commands.insert(
            "printenv".to_string(),
            CommandType::Printenv(PrintenvCommand::new()),
        );
        commands.insert(
            "setenv".to_string(),
            CommandType::Setenv(SetenvCommand::new(search_path)),
        );
        commands.insert(
            "watchuser".to_string(),
            CommandType::Watchuser(WatchuserCommand::new(user_watches)),
        );
        commands.insert(
            "watchmail".to_string(),
            CommandType::Watchmail(WatchmailCommand::new(mail_watches)),
        );
        commands.insert(
            "noclobber".to_string(),
            CommandType::Noclobber(NoclobberCommand::new(context)),
        );

        CommandExecutor { commands }
    }

    pub fn execute(&self, command: &str, args: &[String]) -> Result<(), CommandError> {
        match self.commands.get(command) {
            Some(cmd) => cmd.execute(args),
            None => Err(CommandError::NotFound(command.to_string())),
        }
    }

    pub fn is_builtin(&self, command: &str) -> bool {
        self.commands.contains_key(command)
    }
}
