mod search;
mod vars;

pub use search::SearchPath;
pub use vars::{format_env, set_var};

#[derive(Debug)]
pub enum EnvError {
    VarNotFound(String),
    InvalidValue(&'static str),
    TooManyArguments,
}

impl std::fmt::Display for EnvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvError::VarNotFound(var) => write!(f, "environment variable not found: {}", var),
            EnvError::InvalidValue(msg) => write!(f, "invalid value: {}", msg),
            EnvError::TooManyArguments => write!(f, "too many arguments"),
        }
    }
}

impl std::error::Error for EnvError {}
