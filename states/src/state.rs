use std::any::Any;

/// A value stored in [`StateCtx`](crate::StateCtx), keyed by its concrete type.
///
/// Implementors only need to expose themselves as `Any`. States that commands
/// read must also return a clone from [`State::snapshot`]; anything returning
/// `None` stays invisible to commands.
pub trait State: Any + Send {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        None
    }
}

/// Helper for [`State::snapshot`] on `Clone` states.
pub fn snapshot_clone<T: State + Clone>(state: &T) -> Option<Box<dyn Any + Send>> {
    Some(Box::new(state.clone()))
}
