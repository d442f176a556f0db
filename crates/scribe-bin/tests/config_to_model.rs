use std::time::SystemTime;

use core_actions::{Command, dispatch};
use core_config::{RowEndingSetting, load_from};
use core_events::{KeyCode, KeyEvent};
use core_model::{ModelId, ModelOptions, ResourceMetadata, TextModel, View, ViewId};
use core_text::RowEndingKind;

// Settings flow from `scribe.toml` into a new, empty document: the configured
// row ending is what Enter inserts and the history cap bounds undo.
#[test]
fn configured_row_ending_and_history_cap_reach_the_model() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(
        tmp.path(),
        "[document]\nrow_ending = \"crlf\"\n[history]\nmax_edit_blocks = 3\n",
    )
    .unwrap();
    let config = load_from(Some(tmp.path().to_path_buf())).unwrap();
    assert_eq!(config.row_ending(), RowEndingSetting::Crlf);

    let options = ModelOptions {
        max_edit_blocks: config.max_edit_blocks(),
        default_row_ending: RowEndingKind::CarriageReturnLineFeed,
    };
    let mut model = TextModel::with_options(
        ModelId(1),
        ResourceMetadata::new("new.txt", SystemTime::UNIX_EPOCH),
        "",
        options,
    );
    let mut view = View::new(ViewId(0), ModelId(1));
    let key = |code| Command::Key(KeyEvent::plain(code));

    // Alternate kinds so every request persists its own block.
    for _ in 0..4 {
        dispatch(key(KeyCode::Char('a')), &mut model, &mut view).unwrap();
        dispatch(key(KeyCode::Enter), &mut model, &mut view).unwrap();
        dispatch(key(KeyCode::Backspace), &mut model, &mut view).unwrap();
    }
    assert_eq!(model.buffer().all_text(), "aaaa");
    assert!(model.history().blocks().len() <= 3);

    dispatch(key(KeyCode::Enter), &mut model, &mut view).unwrap();
    assert_eq!(model.buffer().all_text(), "aaaa\r\n");
    assert_eq!(view.primary().row, 1);
}
