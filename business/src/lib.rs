//! Business layer for the roster admin view.
//!
//! States and commands here are registered into a [`StateCtx`] by
//! [`build_state_ctx`]; the UI reads the states every frame and dispatches the
//! commands on user action.

mod config;
pub mod http;
pub mod users;

pub use config::{BusinessConfig, ConfigError, DEFAULT_API_BASE_URL};
pub use users::{
    DeleteUserCommand, EditDraft, LoadStatus, LoadUsersCommand, PendingDeletion,
    SaveUserCommand, User, UserDirectoryClient, UserDirectoryError, UserId, UserList,
    UserListViewState,
};

use roster_states::StateCtx;

/// Initialize `StateCtx` with every state and command the user list view needs.
pub fn build_state_ctx(config: BusinessConfig) -> StateCtx {
    let mut ctx = StateCtx::new();

    // The client captures the token once; later config changes do not reach it.
    ctx.add_state(UserDirectoryClient::new(&config));
    ctx.add_state(config);

    ctx.add_state(UserList::default());
    ctx.add_state(UserListViewState::default());

    ctx.record_command(LoadUsersCommand);
    ctx.record_command(SaveUserCommand);
    ctx.record_command(DeleteUserCommand);

    ctx
}

#[cfg(test)]
mod test_utils;
