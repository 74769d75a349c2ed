use super::{pipeline, tokenizer};
use crate::error::ShellError;
use crate::shell::pipeline::Parsed;

pub(crate) trait CommandHandler {
    fn execute_line(&mut self, line: &str) -> Result<(), ShellError>;
}

impl CommandHandler for super::Shell {
    /// One trip through the engine: tokenize and expand, short-circuit
    /// into the built-in dispatcher, otherwise split on a pipe and hand
    /// each side to the process launcher.
    fn execute_line(&mut self, line: &str) -> Result<(), ShellError> {
        if line.trim().is_empty() {
            return Ok(());
        }

        let parsed = tokenizer::tokenize(line);
        for warning in &parsed.warnings {
            eprintln!("{}", self.style.error(&format!("vena: {}", warning)));
        }

        let tokens = parsed.tokens;
        if tokens.is_empty() {
            return Ok(());
        }

        if self.dispatcher.is_builtin(&tokens[0]) {
            self.dispatcher.execute(&tokens[0], &tokens[1..])?;
            return Ok(());
        }

        match pipeline::split(tokens)? {
            Parsed::Single(tokens) => self.launcher.launch(tokens)?,
            Parsed::Piped(split) => pipeline::run(split, &self.launcher)?,
        }
        Ok(())
    }
}
