//! Commands that talk to the user directory.
//!
//! Each command reads what it needs from the snapshot taken at flush time,
//! performs one request and reports back with `Updater::update` patches, so
//! results land on the list as it is when they arrive rather than on the
//! snapshot the command started from.
//!
//! Failures are logged and never shown to the user.

use log::{error, info, warn};
use roster_states::{Command, CommandFuture, CommandSnapshot, Updater};

use crate::users::api::UserDirectoryClient;
use crate::users::list::UserList;
use crate::users::view::UserListViewState;

/// `GET /users`, then overwrite the list.
///
/// Dispatched once when the view mounts.
#[derive(Default, Debug)]
pub struct LoadUsersCommand;

impl Command for LoadUsersCommand {
    fn run(&self, snap: CommandSnapshot, updater: Updater) -> CommandFuture {
        let client = snap.state::<UserDirectoryClient>().clone();

        info!("LoadUsersCommand: Fetching users");
        updater.update::<UserList>(UserList::begin_load);

        Box::pin(async move {
            match client.list_users().await {
                Ok(users) => {
                    info!("LoadUsersCommand: Fetched {} users", users.len());
                    updater.update::<UserList>(move |list| {
                        list.replace_all(users);
                    });
                }
                Err(err) => {
                    error!("LoadUsersCommand: {err}");
                    updater.update::<UserList>(UserList::load_failed);
                }
            }
        })
    }
}

/// `PUT /users/{id}` with the draft locked by `UserListViewState::begin_save`.
#[derive(Default, Debug)]
pub struct SaveUserCommand;

impl Command for SaveUserCommand {
    fn run(&self, snap: CommandSnapshot, updater: Updater) -> CommandFuture {
        let Some(user) = snap.state::<UserListViewState>().saving_user() else {
            warn!("SaveUserCommand: No draft is being saved, skipping");
            return Box::pin(async {});
        };
        let client = snap.state::<UserDirectoryClient>().clone();

        info!("SaveUserCommand: Saving user {}", user.id);

        Box::pin(async move {
            let id = user.id;
            match client.update_user(&user).await {
                Ok(()) => {
                    info!("SaveUserCommand: Saved user {id}");
                    updater.update::<UserList>(move |list| {
                        if !list.apply_update(user) {
                            warn!("SaveUserCommand: User {id} is no longer in the list");
                        }
                    });
                    updater.update::<UserListViewState>(move |view| view.finish_save(id, true));
                }
                Err(err) => {
                    error!("SaveUserCommand: Failed to save user {id}: {err}");
                    updater.update::<UserListViewState>(move |view| view.finish_save(id, false));
                }
            }
        })
    }
}

/// `DELETE /users/{id}` for the deletion confirmed by `UserListViewState::begin_delete`.
#[derive(Default, Debug)]
pub struct DeleteUserCommand;

impl Command for DeleteUserCommand {
    fn run(&self, snap: CommandSnapshot, updater: Updater) -> CommandFuture {
        let Some(id) = snap.state::<UserListViewState>().deleting_id() else {
            warn!("DeleteUserCommand: No deletion is confirmed, skipping");
            return Box::pin(async {});
        };
        let client = snap.state::<UserDirectoryClient>().clone();

        info!("DeleteUserCommand: Deleting user {id}");

        Box::pin(async move {
            match client.delete_user(id).await {
                Ok(()) => {
                    info!("DeleteUserCommand: Deleted user {id}");
                    updater.update::<UserList>(move |list| {
                        list.remove(id);
                    });
                }
                Err(err) => error!("DeleteUserCommand: Failed to delete user {id}: {err}"),
            }
            updater.update::<UserListViewState>(move |view| view.finish_delete(id));
        })
    }
}
