//! Core library for Sticker Notes: freeform desktop sticky notes persisted
//! to a single JSON file.
//!
//! The primary entry point is [`Store`], which owns the set of live notes and
//! the backing file. All note mutations go through [`Note`] methods, with the
//! desktop shell calling [`Store::save`] at gesture boundaries.
//!
//! Types are re-exported from their respective sub-modules for convenience;
//! consumers should import from the crate root rather than the `core` module.

pub mod core;

// Re-export commonly used types.
#[doc(inline)]
pub use core::{
    color::{darken, parse_hex, PALETTE},
    error::{Result, StickernotesError},
    note::{
        Note, NoteData, ResizeGesture, DEFAULT_HEIGHT, DEFAULT_WIDTH, MINIMIZED_HEIGHT,
        MIN_HEIGHT, MIN_WIDTH,
    },
    store::{LoadReport, NoteDraft, Store},
    storage::Storage,
};
