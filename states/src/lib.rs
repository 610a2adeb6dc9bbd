//! Typed state context shared by the roster business layer and UI.
//!
//! UI code reads and mutates states synchronously through [`StateCtx`];
//! anything that does IO is a [`Command`] that reports back through an
//! [`Updater`].

mod command;
mod ctx;
mod error;
mod state;
mod updater;

pub use command::{Command, CommandFuture, CommandSnapshot};
pub use ctx::StateCtx;
pub use error::Error;
pub use state::{State, snapshot_clone};
pub use updater::{Update, Updater, Waker};
