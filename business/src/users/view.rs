//! Dialog state for the user list view.
//!
//! The edit dialog and the delete confirmation are independent: each has its
//! own slot and its own in-flight flag. While a request is in flight the slot
//! is locked, so a second save or delete for the same dialog cannot start.

use std::any::Any;

use roster_states::{State, snapshot_clone};

use crate::users::list::UserList;
use crate::users::model::{EditDraft, User, UserId};

#[derive(Debug, Clone)]
struct EditSession {
    draft: EditDraft,
    saving: bool,
}

/// A delete awaiting confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingDeletion {
    pub id: UserId,
    pub deleting: bool,
}

#[derive(Debug, Clone, Default)]
pub struct UserListViewState {
    edit: Option<EditSession>,
    pending_deletion: Option<PendingDeletion>,
    mounted: bool,
}

impl UserListViewState {
    /// Returns true exactly once, on the first frame the view is shown.
    pub fn mark_mounted(&mut self) -> bool {
        !std::mem::replace(&mut self.mounted, true)
    }

    /// Open the edit dialog with a fresh draft of the user `id`.
    ///
    /// Refused while a save is in flight or when `id` is not in the list.
    pub fn open_edit(&mut self, list: &UserList, id: UserId) -> bool {
        if self.is_saving() {
            return false;
        }
        let Some(user) = list.get(id) else {
            return false;
        };
        self.edit = Some(EditSession {
            draft: EditDraft::from_user(user),
            saving: false,
        });
        true
    }

    pub fn draft(&self) -> Option<&EditDraft> {
        self.edit.as_ref().map(|session| &session.draft)
    }

    /// Editable draft, or `None` while it is being saved.
    pub fn draft_mut(&mut self) -> Option<&mut EditDraft> {
        self.edit
            .as_mut()
            .filter(|session| !session.saving)
            .map(|session| &mut session.draft)
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_some()
    }

    /// Discard the draft. Ignored while a save is in flight.
    pub fn cancel_edit(&mut self) -> bool {
        if self.is_saving() {
            return false;
        }
        self.edit.take().is_some()
    }

    /// Lock the draft for a save. Returns false when there is nothing to save,
    /// a save is already running, or a field is blank.
    pub fn begin_save(&mut self) -> bool {
        match self.edit.as_mut() {
            Some(session) if !session.saving && session.draft.has_required_fields() => {
                session.saving = true;
                true
            }
            _ => false,
        }
    }

    /// The user to send, present only while a save is in flight.
    pub fn saving_user(&self) -> Option<User> {
        self.edit
            .as_ref()
            .filter(|session| session.saving)
            .map(|session| session.draft.to_user())
    }

    pub fn is_saving(&self) -> bool {
        self.edit.as_ref().is_some_and(|session| session.saving)
    }

    /// Close the dialog on success; on failure unlock it with the fields as typed.
    pub fn finish_save(&mut self, id: UserId, succeeded: bool) {
        let Some(session) = self.edit.as_mut() else {
            return;
        };
        if session.draft.id() != id {
            return;
        }
        if succeeded {
            self.edit = None;
        } else {
            session.saving = false;
        }
    }

    /// Ask for confirmation before deleting `id`. No request is sent yet.
    pub fn request_delete(&mut self, id: UserId) -> bool {
        if self.is_deleting() {
            return false;
        }
        self.pending_deletion = Some(PendingDeletion {
            id,
            deleting: false,
        });
        true
    }

    pub fn pending_deletion(&self) -> Option<PendingDeletion> {
        self.pending_deletion
    }

    /// Ignored while the delete request is in flight.
    pub fn cancel_delete(&mut self) -> bool {
        if self.is_deleting() {
            return false;
        }
        self.pending_deletion.take().is_some()
    }

    pub fn begin_delete(&mut self) -> bool {
        match self.pending_deletion.as_mut() {
            Some(pending) if !pending.deleting => {
                pending.deleting = true;
                true
            }
            _ => false,
        }
    }

    /// The id to delete, present only while a delete is in flight.
    pub fn deleting_id(&self) -> Option<UserId> {
        self.pending_deletion
            .filter(|pending| pending.deleting)
            .map(|pending| pending.id)
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting_id().is_some()
    }

    /// Cleared whether or not the request succeeded.
    pub fn finish_delete(&mut self, id: UserId) {
        if self.pending_deletion.is_some_and(|pending| pending.id == id) {
            self.pending_deletion = None;
        }
    }
}

impl State for UserListViewState {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        snapshot_clone(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list() -> UserList {
        let mut list = UserList::default();
        list.replace_all(vec![
            User::new("u1", "Ana", "ana@example.com"),
            User::new("u2", "Bruno", "bruno@example.com"),
        ]);
        list
    }

    fn u1() -> UserId {
        UserId::from("u1")
    }

    #[test]
    fn test_mark_mounted_once() {
        let mut view = UserListViewState::default();
        assert!(view.mark_mounted());
        assert!(!view.mark_mounted());
    }

    #[test]
    fn test_open_edit_copies_user() {
        let list = list();
        let mut view = UserListViewState::default();

        assert!(view.open_edit(&list, u1()));
        assert_eq!(view.draft().unwrap().name, "Ana");

        view.draft_mut().unwrap().set_name("Alice");
        assert_eq!(list.get(u1()).unwrap().name, "Ana");
    }

    #[test]
    fn test_open_edit_unknown_user() {
        let mut view = UserListViewState::default();
        assert!(!view.open_edit(&list(), UserId::from("u9")));
        assert!(!view.is_editing());
    }

    #[test]
    fn test_cancel_edit_discards_draft() {
        let list = list();
        let mut view = UserListViewState::default();
        view.open_edit(&list, u1());
        view.draft_mut().unwrap().set_name("Alice");

        assert!(view.cancel_edit());
        assert!(view.draft().is_none());

        view.open_edit(&list, u1());
        assert_eq!(view.draft().unwrap().name, "Ana");
    }

    #[test]
    fn test_save_locks_draft() {
        let mut view = UserListViewState::default();
        view.open_edit(&list(), u1());

        assert!(view.begin_save());
        assert!(!view.begin_save(), "second save refused while in flight");
        assert!(view.draft_mut().is_none());
        assert!(!view.cancel_edit());
        assert_eq!(view.saving_user().unwrap().id, u1());
    }

    #[test]
    fn test_blank_field_blocks_save() {
        let mut view = UserListViewState::default();
        view.open_edit(&list(), u1());
        view.draft_mut().unwrap().set_email(" ");

        assert!(!view.begin_save());
        assert!(view.saving_user().is_none());
    }

    #[test]
    fn test_failed_save_keeps_dialog_open() {
        let mut view = UserListViewState::default();
        view.open_edit(&list(), u1());
        view.draft_mut().unwrap().set_name("Alice");
        view.begin_save();

        view.finish_save(u1(), false);
        assert!(!view.is_saving());
        assert_eq!(view.draft().unwrap().name, "Alice");
    }

    #[test]
    fn test_successful_save_closes_dialog() {
        let mut view = UserListViewState::default();
        view.open_edit(&list(), u1());
        view.begin_save();

        view.finish_save(u1(), true);
        assert!(!view.is_editing());
    }

    #[test]
    fn test_delete_flow() {
        let mut view = UserListViewState::default();
        let u2 = UserId::from("u2");

        assert!(view.request_delete(u2));
        assert_eq!(view.deleting_id(), None);
        assert!(view.begin_delete());
        assert!(!view.begin_delete());
        assert!(!view.cancel_delete());
        assert!(!view.request_delete(u1()));

        view.finish_delete(u2);
        assert!(view.pending_deletion().is_none());
    }

    #[test]
    fn test_cancel_delete() {
        let mut view = UserListViewState::default();
        view.request_delete(u1());
        assert!(view.cancel_delete());
        assert!(view.pending_deletion().is_none());
        assert!(!view.begin_delete());
    }

    #[test]
    fn test_dialogs_are_independent() {
        let mut view = UserListViewState::default();
        view.open_edit(&list(), u1());
        view.request_delete(UserId::from("u2"));

        assert!(view.cancel_delete());
        assert!(view.is_editing());
    }
}
