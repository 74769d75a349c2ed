use std::fs::{File, OpenOptions};
use std::path::Path;

/// The five redirection operators. A closed enum keeps every consumer
/// exhaustive instead of threading magic integers around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectKind {
    /// `>` create/truncate, fd 1
    TruncateOut,
    /// `>>` create/append, fd 1
    AppendOut,
    /// `<` read-only, fd 0
    Input,
    /// `>>&` create/append, fds 1 and 2
    AppendOutErr,
    /// `>&` create/truncate, fds 1 and 2
    TruncateOutErr,
}

impl RedirectKind {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            ">" => Some(RedirectKind::TruncateOut),
            ">>" => Some(RedirectKind::AppendOut),
            "<" => Some(RedirectKind::Input),
            ">>&" => Some(RedirectKind::AppendOutErr),
            ">&" => Some(RedirectKind::TruncateOutErr),
            _ => None,
        }
    }

    fn writes_stderr(self) -> bool {
        matches!(
            self,
            RedirectKind::AppendOutErr | RedirectKind::TruncateOutErr
        )
    }
}

/// One resolved redirection: what to do and which file to do it to.
/// Constructed per invocation, consumed by the process launcher.
#[derive(Debug, Clone, PartialEq)]
pub struct Redirect {
    pub kind: RedirectKind,
    pub target: String,
}

#[derive(Debug)]
pub enum RedirectError {
    MissingTarget(String),
    Clobber(String),
    MissingInput(String),
    Open(String, std::io::Error),
}

impl std::fmt::Display for RedirectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RedirectError::MissingTarget(op) => {
                write!(f, "missing file name after {}", op)
            }
            RedirectError::Clobber(target) => {
                write!(f, "noclobber is on, cannot overwrite {}", target)
            }
            RedirectError::MissingInput(target) => {
                write!(f, "{}: no such file", target)
            }
            RedirectError::Open(target, e) => write!(f, "{}: {}", target, e),
        }
    }
}

impl std::error::Error for RedirectError {}

/// Files opened for a redirection, ready to install on fds 0/1/2.
#[derive(Debug, Default)]
pub struct RedirectFiles {
    pub stdin: Option<File>,
    pub stdout: Option<File>,
    pub stderr: Option<File>,
}

/// Scan the whole token list for redirection operators. The last operator
/// found wins and names the destination; the list is truncated at the
/// first operator so the launched program sees only its own arguments.
pub fn extract(tokens: &mut Vec<String>) -> Result<Option<Redirect>, RedirectError> {
    let mut first_operator = None;
    let mut resolved = None;

    for (i, token) in tokens.iter().enumerate() {
        if let Some(kind) = RedirectKind::from_token(token) {
            first_operator.get_or_insert(i);
            let target = tokens
                .get(i + 1)
                .ok_or_else(|| RedirectError::MissingTarget(token.clone()))?
                .clone();
            resolved = Some(Redirect { kind, target });
        }
    }

    if let Some(at) = first_operator {
        tokens.truncate(at);
    }
    Ok(resolved)
}

impl Redirect {
    /// Open the destination. Overwrite-style redirections are refused
    /// outright when noclobber is set and the target exists; input
    /// redirection requires the target to exist. Either refusal happens
    /// before any process is spawned.
    pub fn open(&self, noclobber: bool) -> Result<RedirectFiles, RedirectError> {
        let exists = Path::new(&self.target).exists();
        let mut files = RedirectFiles::default();

        match self.kind {
            RedirectKind::Input => {
                if !exists {
                    return Err(RedirectError::MissingInput(self.target.clone()));
                }
                files.stdin = Some(self.open_with(OpenOptions::new().read(true))?);
                return Ok(files);
            }
            RedirectKind::TruncateOut | RedirectKind::TruncateOutErr => {
                if noclobber && exists {
                    return Err(RedirectError::Clobber(self.target.clone()));
                }
                files.stdout =
                    Some(self.open_with(OpenOptions::new().write(true).create(true).truncate(true))?);
            }
            RedirectKind::AppendOut | RedirectKind::AppendOutErr => {
                if noclobber && exists {
                    return Err(RedirectError::Clobber(self.target.clone()));
                }
                files.stdout = Some(self.open_with(OpenOptions::new().append(true).create(true))?);
            }
        }

        if self.kind.writes_stderr() {
            if let Some(out) = &files.stdout {
                files.stderr = Some(
                    out.try_clone()
                        .map_err(|e| RedirectError::Open(self.target.clone(), e))?,
                );
            }
        }
        Ok(files)
    }

    fn open_with(&self, options: &OpenOptions) -> Result<File, RedirectError> {
        options
            .open(&self.target)
            .map_err(|e| RedirectError::Open(self.target.clone(), e))
    }
}
