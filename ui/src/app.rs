use crate::{state::State, widgets};

pub struct RosterApp {
    state: State,
    waker_installed: bool,
}

impl RosterApp {
    /// Called once before the first frame.
    pub fn new(state: State) -> Self {
        Self {
            state,
            waker_installed: false,
        }
    }

    /// One frame: apply command results, draw, then spawn what the frame queued.
    ///
    /// Must be called from within a tokio runtime.
    pub fn render(state: &mut State, ui: &mut egui::Ui) {
        state.ctx.sync_computes();
        widgets::user_list_view(&mut state.ctx, ui);
        state.ctx.flush_commands();
    }
}

impl eframe::App for RosterApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.waker_installed {
            // Command results arrive while the UI is idle; wake it up to draw them.
            let repaint = ctx.clone();
            self.state.ctx.set_waker(move || repaint.request_repaint());
            self.waker_installed = true;
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            Self::render(&mut self.state, ui);
        });
    }
}
