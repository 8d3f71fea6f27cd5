//! Interactive session over one long-lived `GradebookApp`.
//!
//! Reads one command per line, applies it, and re-renders the whole view.

use std::io::{BufRead, Write};

use anyhow::Context;

use crate::app::GradebookApp;
use crate::client::GradebookService;
use crate::render;

const HELP: &str = "\
commands:
  add <subject> <grade>   add a subject (the last word is the grade)
  edit <n>                start editing subject n
  grade <text>            stage a new grade for the subject being edited
  save                    save the staged grade
  cancel                  leave edit mode
  delete <n>              delete subject n (asks first)
  refresh                 reload the listing
  help                    show this help
  quit                    leave the shell";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add { subject: String, grade: String },
    Edit(usize),
    Grade(String),
    Save,
    Cancel,
    Delete(usize),
    Refresh,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "add" => match rest.rsplit_once(char::is_whitespace) {
            Some((subject, grade)) => Ok(Command::Add {
                subject: subject.trim().to_string(),
                grade: grade.to_string(),
            }),
            None => Err("usage: add <subject> <grade>".to_string()),
        },
        "edit" => parse_ordinal(rest).map(Command::Edit),
        "grade" => Ok(Command::Grade(rest.to_string())),
        "save" => Ok(Command::Save),
        "cancel" => Ok(Command::Cancel),
        "delete" | "rm" => parse_ordinal(rest).map(Command::Delete),
        "refresh" | "show" => Ok(Command::Refresh),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        "" => Err(String::new()),
        other => Err(format!("unknown command `{other}`; type `help`")),
    }
}

fn parse_ordinal(text: &str) -> Result<usize, String> {
    text.parse::<usize>()
        .map_err(|_| format!("expected a subject number, got `{text}`"))
}

/// Asks `prompt` on `output` and reads the answer from `input`.
pub fn confirm<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> bool {
    if write!(output, "{prompt} [y/N] ").and_then(|_| output.flush()).is_err() {
        return false;
    }
    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

pub struct Shell<S, R, W> {
    app: GradebookApp<S>,
    api_url: String,
    input: R,
    output: W,
}

impl<S, R, W> Shell<S, R, W>
where
    S: GradebookService,
    R: BufRead,
    W: Write,
{
    pub fn new(app: GradebookApp<S>, api_url: impl Into<String>, input: R, output: W) -> Self {
        Self {
            app,
            api_url: api_url.into(),
            input,
            output,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        // Load failures are already on screen as the advisory message.
        let _ = self.app.refresh().await;
        self.render()?;

        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .context("failed to read command")?;
            if read == 0 {
                break;
            }

            match parse_command(&line) {
                Ok(Command::Quit) => break,
                Ok(Command::Help) => writeln!(self.output, "{HELP}")?,
                Ok(command) => {
                    self.apply(command).await;
                    self.render()?;
                }
                Err(message) if message.is_empty() => {}
                Err(message) => writeln!(self.output, "{message}")?,
            }
        }
        Ok(())
    }

    async fn apply(&mut self, command: Command) {
        // Operation errors land in the app's advisory message.
        let _ = match command {
            Command::Add { subject, grade } => {
                self.app.set_inputs(subject, grade);
                self.app.submit_add().await
            }
            Command::Edit(id) => {
                self.app.start_edit(id);
                Ok(())
            }
            Command::Grade(text) => {
                self.app.stage_edit_grade(text);
                Ok(())
            }
            Command::Save => self.app.save_edit().await,
            Command::Cancel => {
                self.app.cancel_edit();
                Ok(())
            }
            Command::Delete(id) => {
                let input = &mut self.input;
                let output = &mut self.output;
                self.app
                    .delete(id, |prompt| confirm(input, output, prompt))
                    .await
            }
            Command::Refresh => self.app.refresh().await,
            Command::Help | Command::Quit => Ok(()),
        };
    }

    fn render(&mut self) -> anyhow::Result<()> {
        let view = render::render_view(&self.app, &self.api_url);
        writeln!(self.output, "{view}")?;
        Ok(())
    }
}
