//! Edit and delete dialogs for the user list.
//!
//! Closing a dialog with its title bar button counts as Cancel.

use egui::{Button, Color32, RichText, Ui, Window};
use roster_business::{DeleteUserCommand, SaveUserCommand, UserList, UserListViewState};
use roster_states::StateCtx;

enum DialogAction {
    Confirm,
    Cancel,
}

/// Shows the edit dialog while a draft exists.
pub fn show_edit_user_modal(state_ctx: &mut StateCtx, ui: &mut Ui) {
    if !state_ctx.state::<UserListViewState>().is_editing() {
        return;
    }

    let mut open = true;
    let mut action = None;

    Window::new("Edit user")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ui.ctx(), |ui| {
            let view = state_ctx.state_mut::<UserListViewState>();
            let saving = view.is_saving();

            if let Some(draft) = view.draft_mut() {
                egui::Grid::new("edit_user_fields")
                    .num_columns(2)
                    .spacing([8.0, 8.0])
                    .show(ui, |ui| {
                        let label = ui.label("Name:");
                        ui.text_edit_singleline(&mut draft.name).labelled_by(label.id);
                        ui.end_row();

                        let label = ui.label("Email:");
                        ui.text_edit_singleline(&mut draft.email).labelled_by(label.id);
                        ui.end_row();
                    });
            } else if let Some(draft) = view.draft() {
                ui.label(format!("Name: {}", draft.name));
                ui.label(format!("Email: {}", draft.email));
            }

            let can_save = !saving && view.draft().is_some_and(|d| d.has_required_fields());

            if saving {
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Saving...");
                });
            }

            ui.add_space(16.0);

            ui.horizontal(|ui| {
                if ui.add_enabled(can_save, Button::new("Save")).clicked() {
                    action = Some(DialogAction::Confirm);
                }
                if ui.add_enabled(!saving, Button::new("Cancel")).clicked() {
                    action = Some(DialogAction::Cancel);
                }
            });
        });

    if !open {
        action = Some(DialogAction::Cancel);
    }

    match action {
        Some(DialogAction::Confirm) => {
            if state_ctx.state_mut::<UserListViewState>().begin_save() {
                state_ctx.enqueue_command::<SaveUserCommand>();
            }
        }
        Some(DialogAction::Cancel) => {
            state_ctx.state_mut::<UserListViewState>().cancel_edit();
        }
        None => {}
    }
}

/// Shows the delete confirmation while a deletion is pending.
pub fn show_delete_user_modal(state_ctx: &mut StateCtx, ui: &mut Ui) {
    let Some(pending) = state_ctx.state::<UserListViewState>().pending_deletion() else {
        return;
    };
    let name = state_ctx
        .state::<UserList>()
        .get(pending.id)
        .map_or_else(|| pending.id.to_string(), |user| user.name.clone());

    let mut open = true;
    let mut action = None;

    Window::new("Delete user")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ui.ctx(), |ui| {
            ui.colored_label(Color32::from_rgb(255, 165, 0), "⚠ Warning");
            ui.add_space(4.0);
            ui.label(format!("Are you sure you want to delete user '{name}'?"));
            ui.label("This action cannot be undone.");

            if pending.deleting {
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Deleting user...");
                });
            }

            ui.add_space(16.0);

            ui.horizontal(|ui| {
                let delete = Button::new(RichText::new("Delete").color(Color32::RED));
                if ui.add_enabled(!pending.deleting, delete).clicked() {
                    action = Some(DialogAction::Confirm);
                }
                if ui.add_enabled(!pending.deleting, Button::new("Cancel")).clicked() {
                    action = Some(DialogAction::Cancel);
                }
            });
        });

    if !open {
        action = Some(DialogAction::Cancel);
    }

    match action {
        Some(DialogAction::Confirm) => {
            if state_ctx.state_mut::<UserListViewState>().begin_delete() {
                state_ctx.enqueue_command::<DeleteUserCommand>();
            }
        }
        Some(DialogAction::Cancel) => {
            state_ctx.state_mut::<UserListViewState>().cancel_delete();
        }
        None => {}
    }
}
