//! Channel used by commands to hand state changes back to the UI thread.
//!
//! Commands run on tokio tasks and never touch `StateCtx` directly. They send
//! an [`Update`] through an [`Updater`]; the frame loop drains the channel with
//! `StateCtx::sync_computes()` and applies each update in order.

use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::sync::{Arc, OnceLock};

use flume::Sender;
use log::debug;

use crate::State;

type Patch = Box<dyn FnOnce(&mut dyn Any) + Send>;

/// Callback fired after every update, used to wake an idle UI.
pub type Waker = Box<dyn Fn() + Send + Sync>;

/// A pending change to one registered state.
pub enum Update {
    /// Swap the whole value.
    Replace(TypeId, Box<dyn State>),
    /// Mutate the current value in place.
    Patch(TypeId, &'static str, Patch),
}

impl fmt::Debug for Update {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Replace(id, _) => f.debug_tuple("Replace").field(id).finish(),
            Self::Patch(id, name, _) => f.debug_tuple("Patch").field(id).field(name).finish(),
        }
    }
}

/// Cloneable, `Send` handle for pushing state updates from async work.
#[derive(Clone)]
pub struct Updater {
    send: Sender<Update>,
    waker: Arc<OnceLock<Waker>>,
}

impl fmt::Debug for Updater {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Updater")
            .field("pending", &self.send.len())
            .field("has_waker", &self.waker.get().is_some())
            .finish()
    }
}

impl Updater {
    pub(crate) fn new(send: Sender<Update>, waker: Arc<OnceLock<Waker>>) -> Self {
        Self { send, waker }
    }

    /// Replace the registered value of `T`.
    pub fn set<T: State>(&self, state: T) {
        self.push(Update::Replace(TypeId::of::<T>(), Box::new(state)));
    }

    /// Patch the registered value of `T` against whatever it holds when the
    /// update is applied, not against the snapshot the command started from.
    pub fn update<T: State>(&self, f: impl FnOnce(&mut T) + Send + 'static) {
        let patch: Patch = Box::new(move |any: &mut dyn Any| {
            if let Some(state) = any.downcast_mut::<T>() {
                f(state);
            }
        });
        self.push(Update::Patch(TypeId::of::<T>(), type_name::<T>(), patch));
    }

    fn push(&self, update: Update) {
        if self.send.send(update).is_err() {
            debug!("State context dropped, discarding update");
            return;
        }
        if let Some(wake) = self.waker.get() {
            wake();
        }
    }
}
