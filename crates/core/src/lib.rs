//! unlocker - a password prompt for protected PDF documents.
//!
//! [`UnlockDialog`] collects a password for a locked file and, on confirm,
//! asks a [`DocumentOpener`] to open it. Front-ends drive the dialog through
//! [`frontend::run`].

pub mod dialog;
pub mod document;
pub mod error;
pub mod frontend;

pub use dialog::{DialogState, Transition, UnlockDialog};
pub use document::{DocumentOpener, LopdfOpener, UnlockedDocument, is_locked};
pub use error::{Result, UnlockError};
pub use frontend::{Action, Frontend, run};
