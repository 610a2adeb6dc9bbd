//! The user directory: wire types, API client, local list and view state.

pub mod api;
pub mod commands;
pub mod list;
pub mod model;
pub mod view;

pub use api::{ApiResult, UserDirectoryClient, UserDirectoryError};
pub use commands::{DeleteUserCommand, LoadUsersCommand, SaveUserCommand};
pub use list::{LoadStatus, UserList};
pub use model::{EditDraft, User, UserId};
pub use view::{PendingDeletion, UserListViewState};
