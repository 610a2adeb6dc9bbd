//! User list view: table of users plus the edit and delete dialogs.

mod modals;
mod panel;

pub use panel::user_list_view;
