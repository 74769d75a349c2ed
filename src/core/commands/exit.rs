use super::{Command, CommandError};
use crate::watch::MailWatchList;

/// `exit`: stop every mail monitor, then leave with status 0. The shared
/// user monitor holds no resources and dies with the process.
#[derive(Clone)]
pub struct ExitCommand {
    mail_watches: MailWatchList,
}

impl ExitCommand {
    pub fn new(mail_watches: MailWatchList) -> Self {
        Self { mail_watches }
    }
}

impl Command for ExitCommand {
    fn execute(&self, _args: &[String]) -> Result<(), CommandError> {
        self.mail_watches.stop_all();
        std::process::exit(0);
    }
}
