//! The unlock prompt session.
//!
//! An [`UnlockDialog`] holds everything a password prompt shows and produces:
//! title, message, the password being typed, the file to unlock and, after a
//! successful confirm, the opened document. The two user actions are the
//! [`UnlockDialog::confirm`] and [`UnlockDialog::cancel`] handlers, each of
//! which returns the [`Transition`] it caused.
//!
//! ```text
//! Idle -> Displayed -> Unlocked
//!             ^  |
//!             +--+  (rejected confirm)
//!             |
//!             +----> Cancelled
//! ```

use crate::document::{DocumentOpener, UnlockedDocument};
use crate::error::UnlockError;
use std::path::{Path, PathBuf};
use tracing::debug;
use zeroize::{Zeroize, Zeroizing};

/// Window title used when the caller does not provide one.
pub const DEFAULT_TITLE: &str = "Unlock PDF";

/// Message used when the caller does not provide one.
pub const DEFAULT_MESSAGE: &str = "Enter the password to open this document";

/// Notice shown after a rejected confirm.
pub const FAILURE_NOTICE: &str = "The password is incorrect. Try again.";

/// Lifecycle state of a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    /// Configured but not shown yet.
    Idle,
    /// Shown and waiting for the user.
    Displayed,
    /// Closed after a successful confirm.
    Unlocked,
    /// Closed by the user without unlocking.
    Cancelled,
}

/// Outcome of a single handler call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The password opened the document and the dialog closed.
    Unlocked,
    /// The open attempt failed; the dialog is still displayed.
    Rejected,
    /// The dialog closed without a document.
    Cancelled,
    /// The action does not apply in the current state.
    Ignored,
}

/// Password prompt for a locked document.
pub struct UnlockDialog {
    title: String,
    message: String,
    password: Zeroizing<String>,
    locked_file: Option<PathBuf>,
    unlocked: Option<UnlockedDocument>,
    state: DialogState,
    failure: Option<String>,
    attempts: u32,
}

impl Default for UnlockDialog {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE, DEFAULT_MESSAGE)
    }
}

impl std::fmt::Debug for UnlockDialog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnlockDialog")
            .field("title", &self.title)
            .field("message", &self.message)
            .field("password", &"<redacted>")
            .field("locked_file", &self.locked_file)
            .field("unlocked", &self.unlocked.is_some())
            .field("state", &self.state)
            .field("failure", &self.failure)
            .field("attempts", &self.attempts)
            .finish()
    }
}

impl UnlockDialog {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            password: Zeroizing::new(String::new()),
            locked_file: None,
            unlocked: None,
            state: DialogState::Idle,
            failure: None,
            attempts: 0,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    /// File the next confirm will try to open.
    pub fn locked_file(&self) -> Option<&Path> {
        self.locked_file.as_deref()
    }

    /// Configure the file to unlock. The last value set wins; nothing is
    /// checked until a confirm.
    pub fn set_locked_file(&mut self, path: impl Into<PathBuf>) {
        self.locked_file = Some(path.into());
    }

    // === Password field ===

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Replace the password text.
    pub fn set_password(&mut self, password: &str) {
        self.password.zeroize();
        self.password.push_str(password);
        self.failure = None;
    }

    pub fn push_char(&mut self, c: char) {
        self.password.push(c);
        self.failure = None;
    }

    pub fn pop_char(&mut self) -> Option<char> {
        self.failure = None;
        self.password.pop()
    }

    pub fn clear_password(&mut self) {
        self.password.zeroize();
        self.failure = None;
    }

    // === State ===

    pub fn state(&self) -> DialogState {
        self.state
    }

    /// True while the dialog is waiting for the user.
    pub fn is_open(&self) -> bool {
        self.state == DialogState::Displayed
    }

    /// Notice left by the last rejected confirm, if the password has not been
    /// edited since.
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Number of confirm actions handled so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Show the dialog. Has no effect unless it is idle.
    pub fn display(&mut self) -> DialogState {
        if self.state == DialogState::Idle {
            debug!(title = %self.title, "displaying unlock dialog");
            self.state = DialogState::Displayed;
        }
        self.state
    }

    /// Handle the confirm action.
    ///
    /// Tries to open the configured file with the current password. On
    /// success the document is stored and the dialog closes. On any failure
    /// the dialog stays displayed, the password field is cleared and a
    /// failure notice is set. Errors are never returned to the caller.
    pub fn confirm<O: DocumentOpener + ?Sized>(&mut self, opener: &O) -> Transition {
        if self.state != DialogState::Displayed {
            return Transition::Ignored;
        }

        self.attempts += 1;
        let result = match self.locked_file.as_deref() {
            Some(path) => opener.open(path, &self.password),
            None => Err(UnlockError::NoLockedFile),
        };
        self.password.zeroize();

        match result {
            Ok(document) => {
                debug!(
                    path = %document.path().display(),
                    attempts = self.attempts,
                    "document unlocked"
                );
                self.unlocked = Some(document);
                self.failure = None;
                self.state = DialogState::Unlocked;
                Transition::Unlocked
            }
            Err(err) => {
                debug!(attempts = self.attempts, error = %err, "unlock attempt rejected");
                self.failure = Some(FAILURE_NOTICE.to_string());
                Transition::Rejected
            }
        }
    }

    /// Handle the cancel action. Closes the dialog without opening anything.
    pub fn cancel(&mut self) -> Transition {
        match self.state {
            DialogState::Idle | DialogState::Displayed => {
                debug!(attempts = self.attempts, "unlock dialog cancelled");
                self.password.zeroize();
                self.failure = None;
                self.state = DialogState::Cancelled;
                Transition::Cancelled
            }
            DialogState::Unlocked | DialogState::Cancelled => Transition::Ignored,
        }
    }

    // === Result ===

    /// The opened document, present only after a successful confirm.
    pub fn unlocked_document(&self) -> Option<&UnlockedDocument> {
        self.unlocked.as_ref()
    }

    pub fn take_unlocked_document(&mut self) -> Option<UnlockedDocument> {
        self.unlocked.take()
    }

    pub fn into_unlocked_document(mut self) -> Option<UnlockedDocument> {
        self.unlocked.take()
    }
}
