use std::any::{TypeId, type_name};
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, OnceLock};

use flume::Receiver;
use log::{debug, error, warn};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::updater::{Update, Waker};
use crate::{Command, CommandSnapshot, Error, State, Updater};

/// Owner of every registered state, the update channel and in-flight commands.
///
/// The frame loop drives it in three steps:
/// 1. `sync_computes()` applies updates sent by finished or running commands
/// 2. the UI reads states and mutates them synchronously, queueing commands
/// 3. `flush_commands()` snapshots the states and spawns the queued commands
pub struct StateCtx {
    states: BTreeMap<TypeId, Box<dyn State>>,
    commands: BTreeMap<TypeId, Arc<dyn Command>>,
    queue: VecDeque<(TypeId, &'static str)>,

    updater: Updater,
    recv: Receiver<Update>,
    waker: Arc<OnceLock<Waker>>,

    tasks: JoinSet<()>,
    cancel: CancellationToken,
}

impl Default for StateCtx {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StateCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateCtx")
            .field("states", &self.states.len())
            .field("commands", &self.commands.len())
            .field("queued", &self.queue.len())
            .field("tasks", &self.tasks.len())
            .finish()
    }
}

impl StateCtx {
    pub fn new() -> Self {
        let (send, recv) = flume::unbounded();
        let waker = Arc::new(OnceLock::new());

        Self {
            states: BTreeMap::new(),
            commands: BTreeMap::new(),
            queue: VecDeque::new(),
            updater: Updater::new(send, Arc::clone(&waker)),
            recv,
            waker,
            tasks: JoinSet::new(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn add_state<T: State>(&mut self, state: T) {
        self.states.insert(TypeId::of::<T>(), Box::new(state));
    }

    pub fn record_command<C: Command>(&mut self, command: C) {
        self.commands.insert(TypeId::of::<C>(), Arc::new(command));
    }

    /// Register a callback run after each update is sent, e.g. to request a repaint.
    ///
    /// Only the first waker is kept.
    pub fn set_waker(&self, wake: impl Fn() + Send + Sync + 'static) {
        if self.waker.set(Box::new(wake)).is_err() {
            debug!("Waker already installed, keeping the first one");
        }
    }

    pub fn try_state<T: State>(&self) -> Result<&T, Error> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|state| state.as_any().downcast_ref::<T>())
            .ok_or(Error::StateNotFound {
                name: type_name::<T>(),
            })
    }

    pub fn try_state_mut<T: State>(&mut self) -> Result<&mut T, Error> {
        self.states
            .get_mut(&TypeId::of::<T>())
            .and_then(|state| state.as_any_mut().downcast_mut::<T>())
            .ok_or(Error::StateNotFound {
                name: type_name::<T>(),
            })
    }

    /// # Panics
    /// Panics if `T` was never added with [`StateCtx::add_state`].
    pub fn state<T: State>(&self) -> &T {
        self.try_state::<T>().unwrap_or_else(|err| panic!("{err}"))
    }

    /// # Panics
    /// Panics if `T` was never added with [`StateCtx::add_state`].
    pub fn state_mut<T: State>(&mut self) -> &mut T {
        self.try_state_mut::<T>().unwrap_or_else(|err| panic!("{err}"))
    }

    pub fn update<T: State>(&mut self, f: impl FnOnce(&mut T)) {
        match self.try_state_mut::<T>() {
            Ok(state) => f(state),
            Err(err) => warn!("Skipping update: {err}"),
        }
    }

    pub fn updater(&self) -> Updater {
        self.updater.clone()
    }

    /// Apply every update received so far. Returns how many were applied.
    pub fn sync_computes(&mut self) -> usize {
        self.reap_tasks();

        let mut applied = 0;
        for update in self.recv.try_iter() {
            match update {
                Update::Replace(id, state) => {
                    self.states.insert(id, state);
                }
                Update::Patch(id, name, patch) => match self.states.get_mut(&id) {
                    Some(state) => patch(state.as_any_mut()),
                    None => {
                        warn!("Dropping patch for unregistered state {name}");
                        continue;
                    }
                },
            }
            applied += 1;
        }
        applied
    }

    /// Queue a command to run on the next [`StateCtx::flush_commands`].
    pub fn enqueue_command<C: Command>(&mut self) {
        self.queue.push_back((TypeId::of::<C>(), type_name::<C>()));
    }

    /// Queue a command and spawn it right away.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch<C: Command>(&mut self) {
        self.enqueue_command::<C>();
        self.flush_commands();
    }

    /// Spawn every queued command against one shared snapshot.
    ///
    /// Must be called from within a tokio runtime.
    pub fn flush_commands(&mut self) {
        if self.queue.is_empty() {
            return;
        }

        let queued: Vec<(TypeId, &'static str)> = self.queue.drain(..).collect();
        for (id, name) in queued {
            let Some(recorded) = self.commands.get(&id) else {
                error!("{}", Error::CommandNotFound { name });
                continue;
            };

            let future = recorded.run(self.snapshot(), self.updater());
            let cancel = self.cancel.child_token();

            debug!("Spawning command {name}");
            self.tasks.spawn(async move {
                tokio::select! {
                    () = cancel.cancelled() => debug!("Command {name} cancelled"),
                    () = future => debug!("Command {name} finished"),
                }
            });
        }
    }

    pub(crate) fn snapshot(&self) -> CommandSnapshot {
        let mut snap = CommandSnapshot::default();
        for (id, state) in &self.states {
            if let Some(cloned) = state.snapshot() {
                snap.insert(*id, cloned);
            }
        }
        snap
    }

    fn reap_tasks(&mut self) {
        while let Some(result) = self.tasks.try_join_next() {
            if let Err(err) = result
                && err.is_panic()
            {
                error!("Command task panicked: {err}");
            }
        }
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn task_set_mut(&mut self) -> &mut JoinSet<()> {
        &mut self.tasks
    }

    /// Cancel every running command and wait for the tasks to wind down.
    pub async fn shutdown(&mut self) {
        self.cancel.cancel();
        while self.tasks.join_next().await.is_some() {}
        self.sync_computes();
    }
}

impl Drop for StateCtx {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
