use std::env;
use std::sync::{Arc, Mutex};

use rustyline::DefaultEditor;

mod executor;
pub mod pipeline;
pub mod redirect;
pub mod tokenizer;

use crate::{
    core::{commands::CommandExecutor, config::Config, env::SearchPath, state::ShellContext},
    error::ShellError,
    flags::Flags,
    process::{signal, ProcessExecutor},
    style::OutputStyle,
    watch::{MailWatchList, UserWatchList},
};

use executor::CommandHandler;

pub struct Shell {
    pub(crate) editor: DefaultEditor,
    pub(crate) context: Arc<Mutex<ShellContext>>,
    pub(crate) dispatcher: CommandExecutor,
    pub(crate) launcher: ProcessExecutor,
    pub(crate) style: OutputStyle,
    pub(crate) flags: Flags,
}

impl Shell {
    pub fn new(flags: Flags) -> Result<Self, ShellError> {
        let editor = DefaultEditor::new()?;
        let style = OutputStyle::new();

        let mut context = ShellContext::new()?;
        Config::load()?.apply(&mut context);
        let context = Arc::new(Mutex::new(context));

        let search_path = Arc::new(Mutex::new(SearchPath::from_env()));
        let mail_watches = MailWatchList::new(style);
        let user_watches = UserWatchList::new(style);

        let launcher = ProcessExecutor::new(
            &flags,
            Arc::clone(&search_path),
            Arc::clone(&context),
            style,
        );
        let dispatcher = CommandExecutor::new(
            Arc::clone(&context),
            Arc::clone(&search_path),
            mail_watches,
            user_watches,
        );

        // SIGCHLD reaping and the alarm timeout flag
        signal::install()?;

        // Ctrl-C never kills the shell; the foreground child receives its
        // own copy of the signal and dies on its own.
        ctrlc::set_handler(move || {
            println!(" Interrupt");
        })?;

        Ok(Shell {
            editor,
            context,
            dispatcher,
            launcher,
            style,
            flags,
        })
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        if !self.flags.is_set("quiet") {
            println!(
                "{}",
                self.style
                    .notice(&format!("Welcome to vena {}", env!("CARGO_PKG_VERSION")))
            );
        }

        loop {
            let prompt = self.render_prompt();
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    if let Err(e) = self.editor.add_history_entry(line.as_str()) {
                        if !self.flags.is_set("quiet") {
                            eprintln!("Warning: Couldn't add to history: {}", e);
                        }
                    }

                    if let Err(e) = self.execute_line(&line) {
                        eprintln!("{}", self.style.error(&format!("vena: {}", e)));
                    }
                }
                Err(rustyline::error::ReadlineError::Interrupted) => {
                    // Redraw the prompt on the next loop turn
                    continue;
                }
                Err(rustyline::error::ReadlineError::Eof) => {
                    // End-of-input does not end the session
                    println!("^D");
                    println!("Use \"exit\" to leave the shell.");
                    continue;
                }
                Err(e) => {
                    eprintln!("{}", self.style.error(&format!("vena: {}", e)));
                    continue;
                }
            }
        }
    }

    fn render_prompt(&self) -> String {
        let cwd = env::current_dir()
            .map(|d| d.to_string_lossy().into_owned())
            .unwrap_or_else(|_| "?".to_string());
        match self.context.lock() {
            Ok(ctx) => ctx.render_prompt(&cwd),
            Err(_) => format!("[{}]> ", cwd),
        }
    }
}
