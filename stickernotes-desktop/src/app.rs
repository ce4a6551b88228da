//! The application shell: control panel, note windows, and dialogs.

use crate::note_window::{self, ActiveResize};
use eframe::egui::{self, vec2, Align2, Color32};
use stickernotes_core::{NoteDraft, Store};

/// Color-picker dialog state for one note. The working color only reaches
/// the note when the user confirms; Cancel leaves the note untouched.
struct ColorDialog {
    note_id: String,
    color: Color32,
}

pub struct StickerApp {
    store: Store,
    resize: Option<ActiveResize>,
    color_dialog: Option<ColorDialog>,
    confirm_clear: bool,
    show_about: bool,
    load_notice: Option<String>,
}

impl StickerApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        store: Store,
        load_notice: Option<String>,
    ) -> Self {
        Self {
            store,
            resize: None,
            color_dialog: None,
            confirm_clear: false,
            show_about: false,
            load_notice,
        }
    }

    fn persist(&self) {
        if let Err(e) = self.store.save() {
            log::warn!("could not save notes: {}", e.user_message());
        }
    }

    fn control_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                ui.heading("Sticker Notes");
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("➕  New Sticker").clicked() {
                        if let Err(e) = self.store.create_note(NoteDraft::default()) {
                            log::warn!("could not create note: {}", e.user_message());
                        }
                    }
                    if ui.button("Delete All").clicked() {
                        self.confirm_clear = true;
                    }
                    if ui.button("?").clicked() {
                        self.show_about = true;
                    }
                });
                ui.add_space(4.0);
                ui.label(format!("{} stickers", self.store.len()));
            });
        });
    }

    fn note_windows(&mut self, ctx: &egui::Context) {
        let mut to_remove: Vec<String> = Vec::new();
        let mut recolor: Option<String> = None;
        let mut save = false;

        for id in self.store.ids() {
            let Some(note) = self.store.note_mut(&id) else {
                continue;
            };
            let action = note_window::show(ctx, note, &mut self.resize);
            if action.close {
                to_remove.push(id.clone());
            }
            if action.recolor {
                recolor = Some(id.clone());
            }
            save |= action.save;
        }

        for id in &to_remove {
            if let Err(e) = self.store.remove_note(id) {
                log::warn!("could not remove note: {}", e.user_message());
            }
        }
        if let Some(id) = recolor {
            if let Some(note) = self.store.note(&id) {
                self.color_dialog = Some(ColorDialog {
                    note_id: id,
                    color: note_window::hex_color(note.color()),
                });
            }
        }
        if save {
            self.persist();
        }
    }

    fn color_dialog_ui(&mut self, ctx: &egui::Context) {
        let Some(mut dialog) = self.color_dialog.take() else {
            return;
        };
        let mut apply = false;
        let mut cancel = false;

        egui::Window::new("Pick a color")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, vec2(0.0, 0.0))
            .show(ctx, |ui| {
                egui::color_picker::color_picker_color32(
                    ui,
                    &mut dialog.color,
                    egui::color_picker::Alpha::Opaque,
                );
                ui.separator();
                ui.horizontal(|ui| {
                    apply = ui.button("OK").clicked();
                    cancel = ui.button("Cancel").clicked();
                });
            });

        if apply {
            let hex = format!(
                "#{:02x}{:02x}{:02x}",
                dialog.color.r(),
                dialog.color.g(),
                dialog.color.b()
            );
            if let Some(note) = self.store.note_mut(&dialog.note_id) {
                match note.set_color(&hex) {
                    Ok(()) => self.persist(),
                    Err(e) => log::warn!("could not apply color: {}", e.user_message()),
                }
            }
        } else if !cancel {
            self.color_dialog = Some(dialog);
        }
    }

    fn confirm_clear_ui(&mut self, ctx: &egui::Context) {
        if !self.confirm_clear {
            return;
        }
        let mut delete = false;
        let mut keep = false;

        egui::Window::new("Confirm")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label("Delete all stickers? This cannot be undone.");
                ui.separator();
                ui.horizontal(|ui| {
                    delete = ui.button("Delete everything").clicked();
                    keep = ui.button("Keep them").clicked();
                });
            });

        if delete {
            if let Err(e) = self.store.clear_all() {
                log::warn!("could not clear notes: {}", e.user_message());
            }
        }
        if delete || keep {
            self.confirm_clear = false;
        }
    }

    fn about_ui(&mut self, ctx: &egui::Context) {
        if !self.show_about {
            return;
        }
        let mut close = false;

        egui::Window::new("About")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading("Sticker Notes");
                    ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                    ui.add_space(4.0);
                    ui.label("Freeform sticky notes that stay where you put them.");
                    ui.add_space(8.0);
                    close = ui.button("OK").clicked();
                });
            });

        if close {
            self.show_about = false;
        }
    }

    fn load_notice_ui(&mut self, ctx: &egui::Context) {
        let mut dismiss = false;
        if let Some(notice) = &self.load_notice {
            egui::Window::new("Load problem")
                .collapsible(false)
                .resizable(false)
                .anchor(Align2::CENTER_CENTER, vec2(0.0, 0.0))
                .show(ctx, |ui| {
                    ui.label(notice);
                    ui.separator();
                    dismiss = ui.button("OK").clicked();
                });
        }
        if dismiss {
            self.load_notice = None;
        }
    }
}

impl eframe::App for StickerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.control_panel(ctx);
        self.note_windows(ctx);
        self.color_dialog_ui(ctx);
        self.confirm_clear_ui(ctx);
        self.about_ui(ctx);
        self.load_notice_ui(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        // one last save so the final on-screen state is durable
        self.persist();
    }
}
