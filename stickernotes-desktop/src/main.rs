//! Sticker Notes desktop entry point: logging, settings, store load, and the
//! eframe main loop.

mod app;
mod note_window;
mod settings;

use app::StickerApp;
use eframe::egui;
use std::path::Path;
use stickernotes_core::Store;

const APP_NAME: &str = "Sticker Notes";
const ICON_PATH: &str = "assets/icon.png";

fn main() -> eframe::Result<()> {
    env_logger::init();

    let settings = settings::load_settings();
    let mut store = Store::new(&settings.data_file);
    let load_notice = match store.load() {
        Ok(report) if report.skipped > 0 => {
            log::warn!("{} note records could not be restored", report.skipped);
            Some(format!(
                "{} saved notes could not be restored and were skipped.",
                report.skipped
            ))
        }
        Ok(report) => {
            log::info!(
                "restored {} notes from {}",
                report.restored,
                store.path().display()
            );
            None
        }
        Err(e) => {
            log::warn!("could not load notes: {e}");
            Some(e.user_message())
        }
    };

    let mut viewport = egui::ViewportBuilder::default()
        .with_title(APP_NAME)
        .with_inner_size([980.0, 680.0])
        .with_always_on_top();
    match load_icon(Path::new(ICON_PATH)) {
        Ok(icon) => viewport = viewport.with_icon(icon),
        Err(e) => log::warn!("could not load {ICON_PATH}: {e}"),
    }

    let options = eframe::NativeOptions {
        viewport,
        centered: true,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| Ok(Box::new(StickerApp::new(cc, store, load_notice)))),
    )
}

/// Decodes the window icon PNG. Failure is reported by the caller and does
/// not block startup.
fn load_icon(path: &Path) -> Result<egui::IconData, image::ImageError> {
    let image = image::open(path)?.into_rgba8();
    let (width, height) = image.dimensions();
    Ok(egui::IconData {
        rgba: image.into_raw(),
        width,
        height,
    })
}
