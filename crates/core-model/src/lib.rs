//! Document model layer.
//!
//! A `TextModel` bundles what belongs to one open document: the buffer, its
//! edit history, resource metadata, the lexer/decoration-mapper pair chosen at
//! registration, the row ending inserted by Enter, and a revision counter.
//! The `ModelRegistry` owns models; `View`s own cursors and refer to a model
//! by id, so many views (and many cursors) can address one buffer.
//!
//! Core invariants:
//! * at most one model per `ModelId` in a registry;
//! * `TextModel::revision` strictly increases with every content mutation
//!   (edit, undo, redo, reload);
//! * lex results are painted only when their revision equals the model's
//!   current revision;
//! * a view always has at least one cursor and exactly one primary cursor.

use std::fmt;

use thiserror::Error;

mod registry;
mod text_model;
mod view;

pub use registry::ModelRegistry;
pub use text_model::{LexApplyOutcome, ModelOptions, ResourceMetadata, TextModel};
pub use view::{View, ViewId};

/// Stable identifier for a registered model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelId(pub u64);

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "model#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("{0} is already registered")]
    DuplicateModel(ModelId),
    #[error("{0} is not registered")]
    UnknownModel(ModelId),
}
