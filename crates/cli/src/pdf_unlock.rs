//! pdf-unlock - Unlock a password protected PDF from the terminal
//!
//! Shows the unlock prompt for a locked file, reads the password without
//! echo and reports the opened document. Optionally writes an unlocked copy.

use anyhow::Context;
use clap::{ArgAction, Parser};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use unlocker_core::dialog::{DEFAULT_MESSAGE, DEFAULT_TITLE};
use unlocker_core::error::{Result, UnlockError};
use unlocker_core::frontend::{Action, Frontend, render, run};
use unlocker_core::{LopdfOpener, UnlockDialog, UnlockedDocument};
use zeroize::Zeroizing;

/// Prompt for the password of a protected PDF and open it.
#[derive(Parser, Debug)]
#[command(name = "pdf-unlock")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the locked PDF file
    file: PathBuf,

    /// Title shown at the top of the prompt
    #[arg(short = 't', long, default_value = DEFAULT_TITLE)]
    title: String,

    /// Message shown above the password field
    #[arg(short = 'm', long, default_value = DEFAULT_MESSAGE)]
    message: String,

    /// Password to confirm with instead of prompting
    #[arg(short = 'P', long, env = "PDF_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Number of incorrect passwords before giving up (0 = no limit)
    #[arg(short = 'a', long = "max-attempts", default_value = "3")]
    max_attempts: u32,

    /// Write an unlocked copy of the document to this path
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,
}

/// Terminal front-end: the prompt goes to stderr, the password is read
/// without echo. An empty line is the cancel button.
struct TerminalFrontend;

impl Frontend for TerminalFrontend {
    fn show(&mut self, dialog: &UnlockDialog) -> Result<()> {
        let mut stderr = io::stderr().lock();
        writeln!(stderr)?;
        write!(stderr, "{}", render(dialog))?;
        Ok(())
    }

    fn next_action(&mut self, _dialog: &UnlockDialog) -> Result<Action> {
        let password = Zeroizing::new(rpassword::prompt_password("Password (empty to cancel): ")?);
        if password.is_empty() {
            Ok(Action::Cancel)
        } else {
            Ok(Action::Confirm(password))
        }
    }
}

/// Front-end for a password given on the command line: one confirm, then
/// cancel if it was rejected.
struct PresetFrontend {
    password: Option<Zeroizing<String>>,
}

impl Frontend for PresetFrontend {
    fn show(&mut self, dialog: &UnlockDialog) -> Result<()> {
        tracing::debug!(title = dialog.title(), "confirming with the given password");
        Ok(())
    }

    fn next_action(&mut self, _dialog: &UnlockDialog) -> Result<Action> {
        Ok(self.password.take().map_or(Action::Cancel, Action::Confirm))
    }
}

#[derive(Serialize)]
struct Summary<'a> {
    path: String,
    version: &'a str,
    pages: usize,
    output: Option<String>,
}

fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn report(doc: &UnlockedDocument, args: &Args) -> anyhow::Result<()> {
    let summary = Summary {
        path: doc.path().display().to_string(),
        version: doc.version(),
        pages: doc.page_count(),
        output: args.output.as_ref().map(|p| p.display().to_string()),
    };

    let mut stdout = io::stdout().lock();
    if args.json {
        serde_json::to_writer_pretty(&mut stdout, &summary)?;
        writeln!(stdout)?;
    } else {
        writeln!(stdout, "Unlocked: {}", summary.path)?;
        writeln!(stdout, "Version: {}", summary.version)?;
        writeln!(stdout, "Pages: {}", summary.pages)?;
        if let Some(ref output) = summary.output {
            writeln!(stdout, "Saved: {}", output)?;
        }
    }
    stdout.flush()?;
    Ok(())
}

fn unlock(args: &mut Args) -> anyhow::Result<Option<UnlockedDocument>> {
    if !args.file.exists() {
        anyhow::bail!("File not found: {}", args.file.display());
    }

    let mut dialog = UnlockDialog::new(args.title.clone(), args.message.clone());
    dialog.set_locked_file(&args.file);

    let opener = LopdfOpener::new();
    let result = match args.password.take() {
        Some(password) => {
            let mut frontend = PresetFrontend {
                password: Some(Zeroizing::new(password)),
            };
            run(&mut dialog, &mut frontend, &opener, 1)
        }
        None => run(&mut dialog, &mut TerminalFrontend, &opener, args.max_attempts),
    };

    match result {
        Ok(doc) => Ok(doc),
        Err(UnlockError::Io(e)) => Err(e).context("Failed to read password"),
        Err(e) => Err(e.into()),
    }
}

fn main() -> ExitCode {
    let mut args = Args::parse();
    init_logging(args.debug);

    let mut doc = match unlock(&mut args) {
        Ok(Some(doc)) => doc,
        Ok(None) => {
            eprintln!("Document was not unlocked: {}", args.file.display());
            return ExitCode::from(1);
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::from(2);
        }
    };

    if let Some(ref output) = args.output {
        if let Err(e) = doc.save(output) {
            eprintln!("Error writing {}: {}", output.display(), e);
            return ExitCode::from(2);
        }
    }

    if let Err(e) = report(&doc, &args) {
        eprintln!("Error: {:#}", e);
        return ExitCode::from(2);
    }

    ExitCode::SUCCESS
}
