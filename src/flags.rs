use crate::error::ShellError;
use std::collections::HashMap;

pub const DEFAULT_TIMEOUT_SECS: u32 = 30;

#[derive(Debug, Clone)]
pub struct Flags {
    flags: HashMap<String, Flag>,
}

#[derive(Debug, Clone)]
pub struct Flag {
    pub short: String,
    pub long: String,
    pub description: String,
    pub value: Option<String>,
}

impl Default for Flags {
    fn default() -> Self {
        Self::new()
    }
}

impl Flags {
    pub fn new() -> Self {
        let mut flags = HashMap::new();

        flags.insert(
            "help".to_string(),
            Flag {
                short: "-h".to_string(),
                long: "--help".to_string(),
                description: "Print this help message".to_string(),
                value: None,
            },
        );

        flags.insert(
            "version".to_string(),
            Flag {
                short: "-v".to_string(),
                long: "--version".to_string(),
                description: "Show version information".to_string(),
                value: None,
            },
        );

        flags.insert(
            "quiet".to_string(),
            Flag {
                short: "-q".to_string(),
                long: "--quiet".to_string(),
                description: "Suppress banner and warnings".to_string(),
                value: None,
            },
        );

        flags.insert(
            "timeout".to_string(),
            Flag {
                short: "-t".to_string(),
                long: "--timeout".to_string(),
                description: "Foreground command time limit in seconds".to_string(),
                value: None,
            },
        );

        Flags { flags }
    }

    pub fn parse(&mut self, args: &[String]) -> Result<(), ShellError> {
        let mut i = 0;
        while i < args.len() {
            let arg = &args[i];

            let mut matched = false;
            for flag in self.flags.values_mut() {
                if arg == &flag.short || arg == &flag.long {
                    matched = true;
                    // Only --timeout carries a value
                    if arg == "-t" || arg == "--timeout" {
                        if i + 1 < args.len() {
                            flag.value = Some(args[i + 1].clone());
                            i += 1;
                        } else {
                            return Err(ShellError::FlagError(format!(
                                "Flag {} requires a value",
                                arg
                            )));
                        }
                    } else {
                        flag.value = Some("true".to_string());
                    }
                }
            }
            if !matched {
                return Err(ShellError::FlagError(format!("Unknown flag: {}", arg)));
            }
            i += 1;
        }
        Ok(())
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.flags
            .get(name)
            .and_then(|f| f.value.as_ref())
            .is_some()
    }

    pub fn get_value(&self, name: &str) -> Option<&String> {
        self.flags.get(name).and_then(|f| f.value.as_ref())
    }

    /// Foreground timeout, falling back to the default when the flag is
    /// absent or unparsable.
    pub fn timeout_secs(&self) -> u32 {
        self.get_value("timeout")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    pub fn print_help(&self) {
        println!("Usage: vena [OPTIONS]");
        println!("\nOptions:");
        for flag in self.flags.values() {
            println!("  {}, {:<15} {}", flag.short, flag.long, flag.description);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_boolean_flag() {
        let mut flags = Flags::new();
        flags.parse(&["--quiet".to_string()]).unwrap();
        assert!(flags.is_set("quiet"));
        assert!(!flags.is_set("help"));
    }

    #[test]
    fn test_parse_timeout_value() {
        let mut flags = Flags::new();
        flags
            .parse(&["-t".to_string(), "5".to_string()])
            .unwrap();
        assert_eq!(flags.timeout_secs(), 5);
    }

    #[test]
    fn test_timeout_default() {
        let flags = Flags::new();
        assert_eq!(flags.timeout_secs(), DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_timeout_missing_value() {
        let mut flags = Flags::new();
        assert!(flags.parse(&["--timeout".to_string()]).is_err());
    }

    #[test]
    fn test_unknown_flag() {
        let mut flags = Flags::new();
        assert!(flags.parse(&["--bogus".to_string()]).is_err());
    }
}
