//! The interactive shell loop.

use std::io::{self, Write};

use cutoffs_foundation::{Error, Result};

use crate::command::Command;
use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::session::{Reply, Session};

/// The interactive shell.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// Session state (view, tracer).
    session: Session,

    /// Whether to show the welcome banner.
    show_banner: bool,

    /// Prompt.
    prompt: String,
}

impl Repl<RustylineEditor> {
    /// Creates a new shell with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new(session: Session) -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor, session))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a new shell with the given editor.
    pub fn with_editor(mut editor: E, session: Session) -> Self {
        editor.set_keywords(session.completion_words());
        Self {
            editor,
            session,
            show_banner: true,
            prompt: "cutoffs> ".to_string(),
        }
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Sets the prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Returns a reference to the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns a mutable reference to the session.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Runs the shell loop until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails fatally.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            self.print_banner();
        }

        loop {
            match self.read_eval_print() {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => self.print_error(&e),
            }
        }

        println!("\nGoodbye!");
        Ok(())
    }

    /// Executes one read-eval-print iteration.
    ///
    /// Returns `Ok(true)` to continue, `Ok(false)` to exit.
    fn read_eval_print(&mut self) -> Result<bool> {
        let input = match self.editor.read_line(&self.prompt)? {
            ReadResult::Line(line) => line,
            ReadResult::Interrupted => return Ok(true),
            ReadResult::Eof => return Ok(false),
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(true);
        }
        self.editor.add_history(trimmed);

        match self.eval(trimmed) {
            Ok(Reply::Output(text)) => {
                print!("{text}");
                if !text.ends_with('\n') {
                    println!();
                }
                let _ = io::stdout().flush();
            }
            Ok(Reply::Quit) => return Ok(false),
            Err(e) => self.print_error(&e),
        }

        Ok(true)
    }

    /// Parses and executes one command line.
    ///
    /// # Errors
    ///
    /// Returns an error if the line is not a valid command or the command
    /// is rejected.
    pub fn eval(&mut self, input: &str) -> Result<Reply> {
        let command: Command = input.parse()?;
        self.session.execute(&command)
    }

    /// Prints an error to stderr.
    #[allow(clippy::unused_self)]
    fn print_error(&self, error: &Error) {
        eprintln!("\x1b[31mError: {error}\x1b[0m");
    }

    /// Prints the welcome banner.
    fn print_banner(&self) {
        let snapshot = self.session.snapshot();
        println!("\x1b[1;36mcutoffs\x1b[0m v{}", env!("CARGO_PKG_VERSION"));
        println!(
            "{} records loaded. Type `help` for commands, Ctrl+D to exit.\n",
            snapshot.total
        );
        let _ = io::stdout().flush();
    }
}
