use super::{Command, CommandError};
use crate::watch::{MailWatchList, UserWatchList};

/// Argument shape shared by `watchmail` and `watchuser`:
/// `<subject>` starts a watch, `<subject> off` stops one.
enum WatchRequest<'a> {
    Start(&'a str),
    Stop(&'a str),
}

fn parse_request<'a>(usage: &str, args: &'a [String]) -> Result<WatchRequest<'a>, CommandError> {
    match args {
        [subject] => Ok(WatchRequest::Start(subject)),
        [subject, toggle] if toggle == "off" => Ok(WatchRequest::Stop(subject)),
        _ => Err(CommandError::InvalidArguments(usage.to_string())),
    }
}

/// `watchmail <path>` starts a size monitor on the file;
/// `watchmail <path> off` stops it.
#[derive(Clone)]
pub struct WatchmailCommand {
    mail_watches: MailWatchList,
}

impl WatchmailCommand {
    pub fn new(mail_watches: MailWatchList) -> Self {
        Self { mail_watches }
    }
}

impl Command for WatchmailCommand {
    fn execute(&self, args: &[String]) -> Result<(), CommandError> {
        match parse_request("usage: watchmail <file> [off]", args)? {
            WatchRequest::Start(path) => self.mail_watches.watch(path)?,
            WatchRequest::Stop(path) => self.mail_watches.unwatch(path)?,
        }
        Ok(())
    }
}

/// `watchuser <name>` tracks a user's logins;
/// `watchuser <name> off` stops tracking.
#[derive(Clone)]
pub struct WatchuserCommand {
    user_watches: UserWatchList,
}

impl WatchuserCommand {
    pub fn new(user_watches: UserWatchList) -> Self {
        Self { user_watches }
    }
}

impl Command for WatchuserCommand {
    fn execute(&self, args: &[String]) -> Result<(), CommandError> {
        match parse_request("usage: watchuser <name> [off]", args)? {
            WatchRequest::Start(name) => self.user_watches.track(name)?,
            WatchRequest::Stop(name) => self.user_watches.untrack(name)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::OutputStyle;
    use crate::watch::WatchError;
    use std::env;
    use std::fs;

    #[test]
    fn test_watchmail_requires_arguments() {
        let cmd = WatchmailCommand::new(MailWatchList::new(OutputStyle::new()));
        assert!(matches!(
            cmd.execute(&[]),
            Err(CommandError::InvalidArguments(_))
        ));
    }

    #[test]
    fn test_watchmail_rejects_unknown_toggle() {
        let cmd = WatchmailCommand::new(MailWatchList::new(OutputStyle::new()));
        assert!(matches!(
            cmd.execute(&["inbox".to_string(), "pause".to_string()]),
            Err(CommandError::InvalidArguments(_))
        ));
    }

    #[test]
    fn test_watchmail_round_trip() {
        let file = env::temp_dir().join("vena_watch_cmd_inbox");
        fs::write(&file, "mail").unwrap();
        let path = file.display().to_string();

        let cmd = WatchmailCommand::new(MailWatchList::new(OutputStyle::new()));
        cmd.execute(&[path.clone()]).unwrap();
        cmd.execute(&[path, "off".to_string()]).unwrap();
    }

    #[test]
    fn test_watchuser_off_for_untracked_name() {
        let cmd = WatchuserCommand::new(UserWatchList::new(OutputStyle::new()));
        let result = cmd.execute(&["ghost".to_string(), "off".to_string()]);
        assert!(matches!(
            result,
            Err(CommandError::WatchError(WatchError::NoSuchUser(_)))
        ));
    }
}
