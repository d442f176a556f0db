//! Configuration loading and parsing.
//!
//! Parses `scribe.toml` (or an override path provided by the binary). Three
//! tables are recognised:
//! * `[editor]`   - global options owned by the settings collaborator. The
//!   engine itself only reads `tab_width`; the rest is carried through for
//!   renderers.
//! * `[history]`  - `max_edit_blocks`, the cap on persisted undo blocks.
//! * `[document]` - `row_ending` inserted by Enter in documents whose own row
//!   ending cannot be detected.
//!
//! Every field has a default and unknown fields are ignored. A missing file
//! yields defaults silently; a malformed one yields defaults plus a warning.
//! Out-of-range values are clamped by `Config::normalize`.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const MIN_TAB_WIDTH: u16 = 1;
pub const MAX_TAB_WIDTH: u16 = 16;
/// Undo needs at least the pending run plus one restorable block.
pub const MIN_EDIT_BLOCKS: usize = 2;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct EditorConfig {
    #[serde(default = "EditorConfig::default_font_size_px")]
    pub font_size_px: u16,
    #[serde(default = "EditorConfig::default_cursor_width_px")]
    pub cursor_width_px: f32,
    #[serde(default)]
    pub height_px: Option<u32>,
    #[serde(default = "EditorConfig::default_theme")]
    pub theme: String,
    #[serde(default = "EditorConfig::default_keymap")]
    pub keymap: String,
    #[serde(default)]
    pub show_whitespace: bool,
    #[serde(default)]
    pub show_newlines: bool,
    #[serde(default = "EditorConfig::default_tab_width")]
    pub tab_width: u16,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            font_size_px: Self::default_font_size_px(),
            cursor_width_px: Self::default_cursor_width_px(),
            height_px: None,
            theme: Self::default_theme(),
            keymap: Self::default_keymap(),
            show_whitespace: false,
            show_newlines: false,
            tab_width: Self::default_tab_width(),
        }
    }
}

impl EditorConfig {
    const fn default_font_size_px() -> u16 {
        20
    }
    const fn default_cursor_width_px() -> f32 {
        2.5
    }
    fn default_theme() -> String {
        "visual_studio_dark".to_string()
    }
    fn default_keymap() -> String {
        "default".to_string()
    }
    const fn default_tab_width() -> u16 {
        4
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct HistoryConfig {
    #[serde(default = "HistoryConfig::default_max_edit_blocks")]
    pub max_edit_blocks: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_edit_blocks: Self::default_max_edit_blocks(),
        }
    }
}

impl HistoryConfig {
    const fn default_max_edit_blocks() -> usize {
        200
    }
}

/// Row ending names accepted in `[document] row_ending`.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RowEndingSetting {
    #[default]
    Lf,
    Crlf,
    Cr,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct DocumentConfig {
    #[serde(default)]
    pub row_ending: RowEndingSetting,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct ConfigFile {
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub document: DocumentConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
    pub source: Option<PathBuf>,
}

/// Best-effort config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from("scribe.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("scribe").join("scribe.toml");
    }
    PathBuf::from("scribe.toml")
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            let mut cfg = Config {
                raw: Some(content),
                file,
                source: Some(path),
            };
            cfg.normalize();
            Ok(cfg)
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e.message(), "config_parse_failed_using_defaults");
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Clamp values the engine cannot honour. Returns true when anything
    /// changed.
    pub fn normalize(&mut self) -> bool {
        let mut changed = false;
        let raw_tab = self.file.editor.tab_width;
        let tab = raw_tab.clamp(MIN_TAB_WIDTH, MAX_TAB_WIDTH);
        if tab != raw_tab {
            info!(target: "config", raw = raw_tab, clamped = tab, "tab_width_clamped");
            self.file.editor.tab_width = tab;
            changed = true;
        }
        let raw_blocks = self.file.history.max_edit_blocks;
        if raw_blocks < MIN_EDIT_BLOCKS {
            info!(target: "config", raw = raw_blocks, clamped = MIN_EDIT_BLOCKS, "max_edit_blocks_clamped");
            self.file.history.max_edit_blocks = MIN_EDIT_BLOCKS;
            changed = true;
        }
        changed
    }

    pub fn tab_width(&self) -> usize {
        usize::from(self.file.editor.tab_width)
    }

    pub fn max_edit_blocks(&self) -> usize {
        self.file.history.max_edit_blocks
    }

    pub fn row_ending(&self) -> RowEndingSetting {
        self.file.document.row_ending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex, MutexGuard};
    use tracing::Level;
    use tracing::subscriber::with_default;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone)]
    struct BufferWriter {
        inner: Arc<Mutex<Vec<u8>>>,
    }

    impl BufferWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buf = Arc::new(Mutex::new(Vec::new()));
            (Self { inner: buf.clone() }, buf)
        }
    }

    struct LockedWriter<'a> {
        guard: MutexGuard<'a, Vec<u8>>,
    }

    impl<'a> Write for LockedWriter<'a> {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.guard.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for BufferWriter {
        type Writer = LockedWriter<'a>;

        fn make_writer(&'a self) -> Self::Writer {
            LockedWriter {
                guard: self.inner.lock().expect("log buffer poisoned"),
            }
        }
    }

    fn write_config(body: &str) -> tempfile::NamedTempFile {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), body).unwrap();
        tmp
    }

    fn capture<F: FnOnce()>(f: F) -> String {
        let (writer, buffer) = BufferWriter::new();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .with_target(true)
            .with_ansi(false)
            .without_time()
            .with_writer(writer)
            .finish();
        with_default(subscriber, f);
        String::from_utf8(buffer.lock().unwrap().clone()).unwrap()
    }

    #[test]
    fn default_config_when_missing_file() {
        let cfg = load_from(Some(PathBuf::from("__nonexistent_hopefully__.toml"))).unwrap();
        assert_eq!(cfg.file, ConfigFile::default());
        assert_eq!(cfg.tab_width(), 4);
        assert_eq!(cfg.max_edit_blocks(), 200);
        assert_eq!(cfg.row_ending(), RowEndingSetting::Lf);
        assert_eq!(cfg.file.editor.theme, "visual_studio_dark");
        assert!(cfg.raw.is_none());
    }

    #[test]
    fn parses_all_tables() {
        let tmp = write_config(
            "[editor]\nfont_size_px = 14\ncursor_width_px = 1.0\nheight_px = 600\n\
             theme = \"light\"\nshow_whitespace = true\ntab_width = 8\n\
             [history]\nmax_edit_blocks = 50\n[document]\nrow_ending = \"crlf\"\n",
        );
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.file.editor.font_size_px, 14);
        assert_eq!(cfg.file.editor.height_px, Some(600));
        assert_eq!(cfg.file.editor.theme, "light");
        assert_eq!(cfg.file.editor.keymap, "default");
        assert!(cfg.file.editor.show_whitespace);
        assert!(!cfg.file.editor.show_newlines);
        assert_eq!(cfg.tab_width(), 8);
        assert_eq!(cfg.max_edit_blocks(), 50);
        assert_eq!(cfg.row_ending(), RowEndingSetting::Crlf);
        assert_eq!(cfg.source.as_deref(), Some(tmp.path()));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let tmp = write_config("[editor]\nligatures = true\n[plugins]\nx = 1\n");
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.file, ConfigFile::default());
        assert!(cfg.raw.is_some());
    }

    #[test]
    fn malformed_file_falls_back_with_warning() {
        let tmp = write_config("[editor\ntab_width = ");
        let mut cfg = None;
        let logs = capture(|| {
            cfg = Some(load_from(Some(tmp.path().to_path_buf())).unwrap());
        });
        let cfg = cfg.unwrap();
        assert_eq!(cfg.file, ConfigFile::default());
        assert!(logs.contains("WARN config:"));
        assert!(logs.contains("config_parse_failed_using_defaults"));
    }

    #[test]
    fn out_of_range_values_are_clamped_and_logged() {
        let tmp = write_config("[editor]\ntab_width = 0\n[history]\nmax_edit_blocks = 1\n");
        let mut cfg = None;
        let logs = capture(|| {
            cfg = Some(load_from(Some(tmp.path().to_path_buf())).unwrap());
        });
        let mut cfg = cfg.unwrap();
        assert_eq!(cfg.tab_width(), 1);
        assert_eq!(cfg.max_edit_blocks(), MIN_EDIT_BLOCKS);
        assert!(logs.contains("INFO config:"));
        assert!(logs.contains("tab_width_clamped"));
        assert!(logs.contains("max_edit_blocks_clamped"));
        // Already normalised.
        assert!(!cfg.normalize());
    }

    #[test]
    fn wide_tab_width_clamped_to_max() {
        let tmp = write_config("[editor]\ntab_width = 400\n");
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.tab_width(), usize::from(MAX_TAB_WIDTH));
    }
}
