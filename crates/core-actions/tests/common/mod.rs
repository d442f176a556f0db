#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use std::time::SystemTime;

use core_actions::{Command, DispatchResult, dispatch};
use core_events::{KeyCode, KeyEvent, KeyModifiers};
use core_model::{ModelId, ResourceMetadata, TextModel, View, ViewId};
use core_state::Cursor;
use core_text::Position;

pub const MODEL: ModelId = ModelId(7);

pub fn model(text: &str) -> TextModel {
    model_at("doc.txt", text)
}

pub fn model_at(uri: &str, text: &str) -> TextModel {
    TextModel::new(MODEL, ResourceMetadata::new(uri, SystemTime::UNIX_EPOCH), text)
}

/// View whose first cursor is primary, the rest secondary, in the given order.
pub fn view(cursors: &[(usize, usize)]) -> View {
    let mut v = View::new(ViewId(0), MODEL);
    let mut iter = cursors.iter();
    if let Some(&(row, column)) = iter.next() {
        v.primary_mut().set_position(Position::new(row, column));
    }
    for &(row, column) in iter {
        v.add_cursor(Cursor::new(row, column));
    }
    v
}

pub fn positions(view: &View) -> Vec<(usize, usize)> {
    view.cursors().iter().map(|c| (c.row, c.column)).collect()
}

pub fn press(model: &mut TextModel, view: &mut View, code: KeyCode) -> DispatchResult {
    press_with(model, view, code, KeyModifiers::empty())
}

pub fn press_with(
    model: &mut TextModel,
    view: &mut View,
    code: KeyCode,
    mods: KeyModifiers,
) -> DispatchResult {
    dispatch(Command::Key(KeyEvent::new(code, mods)), model, view).unwrap()
}

pub fn type_str(model: &mut TextModel, view: &mut View, text: &str) {
    for ch in text.chars() {
        press(model, view, KeyCode::Char(ch));
    }
}
