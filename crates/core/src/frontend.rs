//! Driving an [`UnlockDialog`] from a user-facing front-end.
//!
//! A front-end turns user input into [`Action`]s and renders the dialog
//! between them. [`run`] wires the two together: it displays the dialog,
//! dispatches each action to the matching handler and returns whatever the
//! dialog produced once it closes.

use crate::dialog::{Transition, UnlockDialog};
use crate::document::{DocumentOpener, UnlockedDocument};
use crate::error::Result;
use std::fmt::Write;
use tracing::{debug, warn};
use zeroize::Zeroizing;

/// A terminal user action.
#[derive(Clone, PartialEq, Eq)]
pub enum Action {
    /// The confirm button, with the password typed so far.
    Confirm(Zeroizing<String>),
    /// The cancel button.
    Cancel,
}

impl std::fmt::Debug for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Confirm(_) => f.write_str("Confirm(<redacted>)"),
            Action::Cancel => f.write_str("Cancel"),
        }
    }
}

impl Action {
    pub fn confirm(password: impl Into<String>) -> Self {
        Action::Confirm(Zeroizing::new(password.into()))
    }
}

/// Something that can show a dialog and collect user actions.
pub trait Frontend {
    /// Render the dialog in its current state.
    fn show(&mut self, dialog: &UnlockDialog) -> Result<()>;

    /// Block until the user confirms or cancels.
    fn next_action(&mut self, dialog: &UnlockDialog) -> Result<Action>;
}

impl<F: Frontend + ?Sized> Frontend for &mut F {
    fn show(&mut self, dialog: &UnlockDialog) -> Result<()> {
        (**self).show(dialog)
    }

    fn next_action(&mut self, dialog: &UnlockDialog) -> Result<Action> {
        (**self).next_action(dialog)
    }
}

/// Display `dialog` and handle actions from `frontend` until it closes.
///
/// After `max_attempts` rejected confirmations the dialog is cancelled
/// (`0` means no limit). Unlock failures are absorbed by the dialog; only
/// front-end errors are returned.
pub fn run<F, O>(
    dialog: &mut UnlockDialog,
    frontend: &mut F,
    opener: &O,
    max_attempts: u32,
) -> Result<Option<UnlockedDocument>>
where
    F: Frontend + ?Sized,
    O: DocumentOpener + ?Sized,
{
    dialog.display();

    while dialog.is_open() {
        frontend.show(dialog)?;
        match frontend.next_action(dialog)? {
            Action::Confirm(password) => {
                dialog.set_password(&password);
                let transition = dialog.confirm(opener);
                debug!(?transition, attempts = dialog.attempts(), "confirm handled");
                if transition == Transition::Rejected
                    && max_attempts > 0
                    && dialog.attempts() >= max_attempts
                {
                    warn!(max_attempts, "giving up after too many incorrect passwords");
                    dialog.cancel();
                }
            }
            Action::Cancel => {
                dialog.cancel();
            }
        }
    }

    Ok(dialog.take_unlocked_document())
}

/// Plain-text rendering of a dialog, used by text front-ends.
pub fn render(dialog: &UnlockDialog) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", dialog.title());
    let _ = writeln!(out, "{}", "=".repeat(dialog.title().chars().count()));
    if let Some(path) = dialog.locked_file() {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        let _ = writeln!(out, "File: {}", name);
    }
    let _ = writeln!(out, "{}", dialog.message());
    if let Some(failure) = dialog.failure() {
        let _ = writeln!(out, "! {}", failure);
    }
    out
}
