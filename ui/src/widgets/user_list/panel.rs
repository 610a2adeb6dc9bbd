//! Main panel for the user list.
//!
//! Uses a Typora-like table style with clean borders and minimal styling.

use egui::{Button, Color32, Frame, InnerResponse, Margin, Response, ScrollArea, Stroke, Ui};
use roster_business::{LoadUsersCommand, UserId, UserList, UserListViewState};
use roster_states::StateCtx;

use super::modals::{show_delete_user_modal, show_edit_user_modal};

/// Border color for Typora-like table style (subtle gray)
const TABLE_BORDER_COLOR: Color32 = Color32::from_rgb(200, 200, 200);

/// Header background color for Typora-like table style (light gray)
const HEADER_BG_COLOR: Color32 = Color32::from_rgb(245, 245, 245);

fn header_cell<R>(ui: &mut Ui, add_contents: impl FnOnce(&mut Ui) -> R) -> InnerResponse<R> {
    Frame::NONE
        .fill(HEADER_BG_COLOR)
        .inner_margin(Margin::symmetric(8, 8))
        .show(ui, add_contents)
}

fn data_cell<R>(ui: &mut Ui, add_contents: impl FnOnce(&mut Ui) -> R) -> InnerResponse<R> {
    Frame::NONE
        .inner_margin(Margin::symmetric(8, 6))
        .show(ui, add_contents)
}

#[derive(Debug, Clone, Copy)]
enum RowAction {
    Edit(UserId),
    Delete(UserId),
}

/// Displays the user list and whichever dialogs are open.
///
/// The first call queues the one-shot load of the collection.
pub fn user_list_view(state_ctx: &mut StateCtx, ui: &mut Ui) -> Response {
    if state_ctx.state_mut::<UserListViewState>().mark_mounted() {
        state_ctx.enqueue_command::<LoadUsersCommand>();
    }

    let response = ui.vertical(|ui| {
        ui.horizontal(|ui| {
            ui.heading("Users");
            // Not wired to any flow yet.
            ui.add_enabled(false, Button::new("➕ Add user"))
                .on_disabled_hover_text("Adding users is not available");
        });

        ui.add_space(8.0);

        let list = state_ctx.state::<UserList>();
        if list.is_loading() {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading users...");
            });
            return;
        }

        let action = users_table(list, ui);
        if list.is_empty() {
            ui.add_space(8.0);
            ui.weak("No users to show.");
        }

        match action {
            Some(RowAction::Edit(id)) => {
                let list = state_ctx.state::<UserList>().clone();
                state_ctx
                    .state_mut::<UserListViewState>()
                    .open_edit(&list, id);
            }
            Some(RowAction::Delete(id)) => {
                state_ctx.state_mut::<UserListViewState>().request_delete(id);
            }
            None => {}
        }
    });

    show_edit_user_modal(state_ctx, ui);
    show_delete_user_modal(state_ctx, ui);

    response.response
}

fn users_table(list: &UserList, ui: &mut Ui) -> Option<RowAction> {
    let mut action = None;

    Frame::NONE
        .stroke(Stroke::new(1.0, TABLE_BORDER_COLOR))
        .inner_margin(Margin::ZERO)
        .show(ui, |ui| {
            ScrollArea::vertical().show(ui, |ui| {
                egui::Grid::new("users_table")
                    .num_columns(3)
                    .striped(true)
                    .spacing([16.0, 0.0])
                    .min_col_width(60.0)
                    .show(ui, |ui| {
                        header_cell(ui, |ui| {
                            ui.strong("Name");
                        });
                        header_cell(ui, |ui| {
                            ui.strong("Email");
                        });
                        header_cell(ui, |ui| {
                            ui.strong("Actions");
                        });
                        ui.end_row();

                        for user in list.users() {
                            data_cell(ui, |ui| {
                                ui.label(&user.name);
                            });
                            data_cell(ui, |ui| {
                                ui.label(&user.email);
                            });
                            data_cell(ui, |ui| {
                                ui.horizontal(|ui| {
                                    if ui
                                        .button("✏ Edit")
                                        .on_hover_text("Edit this user")
                                        .clicked()
                                    {
                                        action = Some(RowAction::Edit(user.id));
                                    }
                                    if ui
                                        .button("🗑 Delete")
                                        .on_hover_text("Delete this user")
                                        .clicked()
                                    {
                                        action = Some(RowAction::Delete(user.id));
                                    }
                                });
                            });
                            ui.end_row();
                        }
                    });
            });
        });

    action
}
