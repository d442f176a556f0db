use std::path::Path;
use std::sync::Arc;
use std::time::SystemTime;

use core_lexer::{
    DecorationMapper, DiagnosticBag, LexCompletion, LexError, LexRequest, Lexer, LexerPair,
    lexer_for_extension,
};
use core_state::{EditHistory, EditKind, UNDO_HISTORY_MAX};
use core_text::{Buffer, DecorationTag, RowEndingKind, TextError, detect_row_ending};
use tracing::{debug, trace, warn};

use crate::ModelId;

/// Where a document came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceMetadata {
    pub uri: String,
    pub last_write_time: SystemTime,
    /// Extension of `uri` without the dot; empty when there is none.
    pub file_extension: String,
}

impl ResourceMetadata {
    pub fn new(uri: impl Into<String>, last_write_time: SystemTime) -> Self {
        let uri = uri.into();
        let file_extension = Path::new(&uri)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_string();
        Self {
            uri,
            last_write_time,
            file_extension,
        }
    }
}

/// Per-model settings fixed at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelOptions {
    pub max_edit_blocks: usize,
    /// Row ending for documents that contain none yet.
    pub default_row_ending: RowEndingKind,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            max_edit_blocks: UNDO_HISTORY_MAX,
            default_row_ending: RowEndingKind::LineFeed,
        }
    }
}

/// Outcome of applying a lex completion to a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexApplyOutcome {
    /// Spans painted; `diagnostics` now holds this pass's diagnostics.
    Applied { spans: usize },
    /// Computed against an older revision (or another model); dropped.
    Stale { completed: u64, current: u64 },
    /// The lexer failed; decoration untouched.
    Failed(LexError),
    /// The lexer produced spans outside the text; decoration untouched.
    Rejected(TextError),
}

/// One open document: content, history, origin and its lexer pair.
///
/// `revision` increases on every content mutation and is attached to each lex
/// request, so completions computed against older content can be recognised.
#[derive(Debug)]
pub struct TextModel {
    id: ModelId,
    buffer: Buffer,
    history: EditHistory,
    resource: ResourceMetadata,
    lexers: LexerPair,
    revision: u64,
    using_row_ending_kind: RowEndingKind,
    diagnostics: DiagnosticBag,
}

impl TextModel {
    pub fn new(id: ModelId, resource: ResourceMetadata, content: &str) -> Self {
        Self::with_options(id, resource, content, ModelOptions::default())
    }

    /// Lexer chosen from the resource extension; row ending detected from
    /// `content`, falling back to `options.default_row_ending`.
    pub fn with_options(
        id: ModelId,
        resource: ResourceMetadata,
        content: &str,
        options: ModelOptions,
    ) -> Self {
        let lexers = lexer_for_extension(&resource.file_extension);
        let using_row_ending_kind =
            detect_row_ending(content).unwrap_or(options.default_row_ending);
        debug!(target: "model", %id, chars = content.len(), lexer = lexers.lexer.name(), ?using_row_ending_kind, "model_created");
        Self {
            id,
            buffer: Buffer::new(content),
            history: EditHistory::with_capacity_limit(options.max_edit_blocks),
            resource,
            lexers,
            revision: 0,
            using_row_ending_kind,
            diagnostics: DiagnosticBag::new(),
        }
    }

    pub fn with_lexers(mut self, lexers: LexerPair) -> Self {
        self.lexers = lexers;
        self
    }

    pub fn id(&self) -> ModelId {
        self.id
    }
    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }
    pub fn history(&self) -> &EditHistory {
        &self.history
    }
    pub fn resource(&self) -> &ResourceMetadata {
        &self.resource
    }
    pub fn revision(&self) -> u64 {
        self.revision
    }
    pub fn using_row_ending_kind(&self) -> RowEndingKind {
        self.using_row_ending_kind
    }
    pub fn diagnostics(&self) -> &DiagnosticBag {
        &self.diagnostics
    }
    pub fn lexer(&self) -> &Arc<dyn Lexer> {
        &self.lexers.lexer
    }
    pub fn decoration_mapper(&self) -> &Arc<dyn DecorationMapper> {
        &self.lexers.mapper
    }

    pub fn semantic_class(&self, tag: DecorationTag) -> &'static str {
        self.lexers.mapper.semantic_class(tag)
    }

    /// Mutable content access. Counts as a mutation: the revision moves.
    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.revision += 1;
        &mut self.buffer
    }

    /// History boundary for an edit about to be applied.
    pub fn record_boundary(&mut self, kind: EditKind) {
        self.history.record_boundary(kind, &self.buffer);
    }

    /// Restore the previous snapshot. Returns whether content changed.
    pub fn undo(&mut self) -> bool {
        match self.history.undo(&self.buffer) {
            Some(cells) => {
                self.replace_from_history(cells);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(cells) => {
                self.replace_from_history(cells);
                true
            }
            None => false,
        }
    }

    fn replace_from_history(&mut self, cells: Vec<core_text::Cell>) {
        self.buffer.replace_cells(cells);
        self.revision += 1;
        trace!(target: "model", id = %self.id, revision = self.revision, "content_restored");
    }

    /// Replace all content (e.g. the file changed on disk). History is
    /// cleared.
    pub fn reload(&mut self, content: &str, last_write_time: SystemTime) {
        self.buffer.set_content(content);
        self.history.clear();
        self.resource.last_write_time = last_write_time;
        self.diagnostics = DiagnosticBag::new();
        self.revision += 1;
        debug!(target: "model", id = %self.id, revision = self.revision, chars = content.len(), "reloaded");
    }

    /// Update origin. A changed extension re-selects the lexer pair.
    pub fn set_resource_data(&mut self, uri: impl Into<String>, last_write_time: SystemTime) {
        let resource = ResourceMetadata::new(uri, last_write_time);
        if resource.file_extension != self.resource.file_extension {
            self.lexers = lexer_for_extension(&resource.file_extension);
        }
        self.resource = resource;
    }

    pub fn set_using_row_ending_kind(&mut self, kind: RowEndingKind) {
        self.using_row_ending_kind = kind;
    }

    /// Snapshot for background lexing at the current revision.
    pub fn lex_request(&self) -> LexRequest<ModelId> {
        LexRequest {
            key: self.id,
            revision: self.revision,
            text: self.buffer.all_text(),
            lexer: Arc::clone(&self.lexers.lexer),
        }
    }

    /// Paint a completed lex pass if it still matches the current revision.
    pub fn apply_lex_result(&mut self, completion: LexCompletion<ModelId>) -> LexApplyOutcome {
        if completion.key != self.id || completion.revision != self.revision {
            debug!(target: "model", id = %self.id, completed = completion.revision, current = self.revision, "stale_lex_discarded");
            return LexApplyOutcome::Stale {
                completed: completion.revision,
                current: self.revision,
            };
        }
        let output = match completion.outcome {
            Ok(output) => output,
            Err(err) => {
                warn!(target: "model", id = %self.id, error = %err, "lex_failed");
                return LexApplyOutcome::Failed(err);
            }
        };
        if let Err(err) = self.buffer.apply_decoration(&output.spans) {
            warn!(target: "model", id = %self.id, error = %err, "lex_spans_rejected");
            return LexApplyOutcome::Rejected(err);
        }
        let spans = output.spans.len();
        self.diagnostics = output.diagnostics;
        trace!(target: "model", id = %self.id, revision = self.revision, spans, diagnostics = self.diagnostics.len(), "lex_applied");
        LexApplyOutcome::Applied { spans }
    }
}
