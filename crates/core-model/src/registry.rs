use std::collections::BTreeMap;
use std::time::SystemTime;

use core_lexer::LexCompletion;
use core_text::RowEndingKind;
use tracing::debug;

use crate::text_model::{LexApplyOutcome, TextModel};
use crate::{ModelError, ModelId};

/// Owner of every open model. One model per logical document.
#[derive(Debug, Default)]
pub struct ModelRegistry {
    models: BTreeMap<ModelId, TextModel>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, model: TextModel) -> Result<ModelId, ModelError> {
        let id = model.id();
        if self.models.contains_key(&id) {
            return Err(ModelError::DuplicateModel(id));
        }
        self.models.insert(id, model);
        debug!(target: "model.registry", %id, open = self.models.len(), "registered");
        Ok(id)
    }

    pub fn dispose(&mut self, id: ModelId) -> Result<TextModel, ModelError> {
        let model = self
            .models
            .remove(&id)
            .ok_or(ModelError::UnknownModel(id))?;
        debug!(target: "model.registry", %id, open = self.models.len(), "disposed");
        Ok(model)
    }

    pub fn get(&self, id: ModelId) -> Result<&TextModel, ModelError> {
        self.models.get(&id).ok_or(ModelError::UnknownModel(id))
    }

    pub fn get_mut(&mut self, id: ModelId) -> Result<&mut TextModel, ModelError> {
        self.models.get_mut(&id).ok_or(ModelError::UnknownModel(id))
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TextModel> {
        self.models.values()
    }

    pub fn find_by_resource_uri(&self, uri: &str) -> Option<&TextModel> {
        self.models.values().find(|m| m.resource().uri == uri)
    }

    pub fn reload(
        &mut self,
        id: ModelId,
        content: &str,
        last_write_time: SystemTime,
    ) -> Result<(), ModelError> {
        self.get_mut(id)?.reload(content, last_write_time);
        Ok(())
    }

    pub fn set_resource_data(
        &mut self,
        id: ModelId,
        uri: impl Into<String>,
        last_write_time: SystemTime,
    ) -> Result<(), ModelError> {
        self.get_mut(id)?.set_resource_data(uri, last_write_time);
        Ok(())
    }

    pub fn set_using_row_ending_kind(
        &mut self,
        id: ModelId,
        kind: RowEndingKind,
    ) -> Result<(), ModelError> {
        self.get_mut(id)?.set_using_row_ending_kind(kind);
        Ok(())
    }

    /// Route a completion to its model. Completions for disposed models are
    /// an `UnknownModel` error the caller may ignore.
    pub fn apply_lex_completion(
        &mut self,
        completion: LexCompletion<ModelId>,
    ) -> Result<LexApplyOutcome, ModelError> {
        let model = self.get_mut(completion.key)?;
        Ok(model.apply_lex_result(completion))
    }
}
