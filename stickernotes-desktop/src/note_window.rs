//! One floating window per sticky note: chrome, gestures, and the actions
//! they produce.
//!
//! Window geometry is driven entirely from the note's own fields: the window
//! is pinned to the note's position and size every frame, and gestures
//! mutate the note rather than egui's window memory. Drag and resize report
//! a save only when the gesture completes.

use eframe::egui::{
    self, pos2, vec2, Align2, Button, Color32, CursorIcon, FontId, Frame, Id, Margin, Rect,
    RichText, Rounding, Sense, Stroke, TextEdit, Vec2,
};
use stickernotes_core::{parse_hex, Note, ResizeGesture, MINIMIZED_HEIGHT};

/// Height of the header bar; also the full height of a minimized note.
const HEADER_HEIGHT: f32 = MINIMIZED_HEIGHT as f32;
const BUTTON_SIZE: f32 = 22.0;
const GRIP_SIZE: f32 = 16.0;
const BODY_PADDING: f32 = 5.0;
const CORNER_RADIUS: f32 = 4.0;

/// What a note window asked for this frame.
#[derive(Debug, Default)]
pub struct NoteAction {
    /// Close button pressed: remove this note from the store.
    pub close: bool,
    /// A mutation completed; persist the whole set now.
    pub save: bool,
    /// Recolor button pressed: open the color dialog for this note.
    pub recolor: bool,
}

/// A corner resize in progress on one note. Held by the app across frames so
/// the size always tracks the cursor relative to the press origin.
pub struct ActiveResize {
    note_id: String,
    gesture: ResizeGesture,
    total: Vec2,
}

/// Converts a core `#rrggbb` string to an egui color. Values reaching the UI
/// were validated by the core, so the gray fallback is never expected.
pub fn hex_color(color: &str) -> Color32 {
    match parse_hex(color) {
        Ok((r, g, b)) => Color32::from_rgb(r, g, b),
        Err(_) => Color32::GRAY,
    }
}

/// Renders `note` as a floating window and returns the actions it produced.
pub fn show(ctx: &egui::Context, note: &mut Note, resize: &mut Option<ActiveResize>) -> NoteAction {
    let mut action = NoteAction::default();

    let body_color = hex_color(note.color());
    let chrome_color = hex_color(note.chrome_color());
    let win_id = Id::new(note.id().to_string());

    let frame = Frame::none()
        .fill(body_color)
        .stroke(Stroke::new(1.0, Color32::GRAY))
        .rounding(Rounding::same(CORNER_RADIUS));

    egui::Window::new("")
        .id(win_id)
        .title_bar(false)
        .collapsible(false)
        .resizable(false)
        .frame(frame)
        .current_pos(pos2(note.x() as f32, note.y() as f32))
        .fixed_size(vec2(note.width() as f32, note.height() as f32))
        .show(ctx, |ui| {
            header(ui, note, chrome_color, &mut action);
            if !note.is_minimized() {
                body(ui, note, &mut action);
                grip(ui, win_id, note, chrome_color, resize, &mut action);
            }
        });

    action
}

/// The chrome bar: drag handle plus close, recolor, and minimize buttons.
fn header(ui: &mut egui::Ui, note: &mut Note, chrome_color: Color32, action: &mut NoteAction) {
    let (header_rect, drag) =
        ui.allocate_exact_size(vec2(ui.available_width(), HEADER_HEIGHT), Sense::drag());
    let rounding = Rounding {
        nw: CORNER_RADIUS,
        ne: CORNER_RADIUS,
        sw: 0.0,
        se: 0.0,
    };
    ui.painter().rect_filled(header_rect, rounding, chrome_color);

    if drag.dragged() {
        let delta = drag.drag_delta();
        note.move_by(delta.x.round() as i32, delta.y.round() as i32);
    }
    if drag.drag_stopped() {
        action.save = true;
    }

    let button_at = |ui: &mut egui::Ui, index: usize, label: &str| {
        let right = header_rect.right() - 4.0 - index as f32 * (BUTTON_SIZE + 2.0);
        let rect = Rect::from_min_size(
            pos2(right - BUTTON_SIZE, header_rect.center().y - BUTTON_SIZE / 2.0),
            vec2(BUTTON_SIZE, BUTTON_SIZE),
        );
        ui.put(
            rect,
            Button::new(RichText::new(label).color(Color32::WHITE).size(13.0)).frame(false),
        )
    };

    if button_at(ui, 0, "✕").on_hover_text("Close").clicked() {
        action.close = true;
    }
    if button_at(ui, 1, "🎨").on_hover_text("Change color").clicked() {
        action.recolor = true;
    }
    let minimize_hover = if note.is_minimized() { "Expand" } else { "Minimize" };
    if button_at(ui, 2, "—").on_hover_text(minimize_hover).clicked() {
        note.toggle_minimized();
        action.save = true;
    }
}

/// The editable text body. Edits persist on every change.
fn body(ui: &mut egui::Ui, note: &mut Note, action: &mut NoteAction) {
    let text_id = ui.id().with("text");
    Frame::none()
        .inner_margin(Margin::same(BODY_PADDING))
        .show(ui, |ui| {
            let response = ui.add_sized(
                ui.available_size(),
                TextEdit::multiline(note.text_mut())
                    .id(text_id)
                    .frame(false)
                    .text_color(Color32::BLACK),
            );
            if response.changed() {
                action.save = true;
            }
        });
}

/// The bottom-right resize grip. Hidden while minimized (the caller skips
/// this), saves when the gesture completes.
fn grip(
    ui: &mut egui::Ui,
    win_id: Id,
    note: &mut Note,
    chrome_color: Color32,
    resize: &mut Option<ActiveResize>,
    action: &mut NoteAction,
) {
    let content = ui.max_rect();
    let grip_rect = Rect::from_min_size(
        pos2(content.right() - GRIP_SIZE, content.bottom() - GRIP_SIZE),
        vec2(GRIP_SIZE, GRIP_SIZE),
    );
    let response = ui
        .interact(grip_rect, win_id.with("grip"), Sense::drag())
        .on_hover_cursor(CursorIcon::ResizeNwSe);
    ui.painter().text(
        grip_rect.center(),
        Align2::CENTER_CENTER,
        "◢",
        FontId::proportional(10.0),
        chrome_color,
    );

    if response.drag_started() {
        *resize = Some(ActiveResize {
            note_id: note.id().to_string(),
            gesture: ResizeGesture::begin(note),
            total: Vec2::ZERO,
        });
    }
    if response.dragged() {
        if let Some(active) = resize.as_mut() {
            if active.note_id == note.id() {
                active.total += response.drag_delta();
                active
                    .gesture
                    .apply(note, active.total.x.round() as i32, active.total.y.round() as i32);
            }
        }
    }
    if response.drag_stopped() {
        *resize = None;
        action.save = true;
    }
}
