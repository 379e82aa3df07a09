//! Per-run translation of validated models into LookML files
//!
//! Each model is translated on its own; nothing is shared between models
//! except the read-only type maps, and an unmapped type never stops the
//! rest of the run.

use crate::assemble::{model_document, view_from_model, DEFAULT_INCLUDE};
use crate::lookml::{LookmlFile, ModelDocument, View};
use looksmith_core::{Diagnostic, Dialect};
use looksmith_dbt::DbtModel;

/// Both documents generated for one model
#[derive(Debug, Clone, PartialEq)]
pub struct ModelTranslation {
    pub unique_id: String,
    pub view: View,
    pub model: ModelDocument,
    /// Non-fatal findings for this model
    pub diagnostics: Vec<Diagnostic>,
}

impl ModelTranslation {
    pub fn view_file(&self) -> LookmlFile {
        self.view.render()
    }

    pub fn model_file(&self) -> LookmlFile {
        self.model.render()
    }
}

/// Result of translating a whole model set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Translation {
    pub models: Vec<ModelTranslation>,
}

impl Translation {
    /// Rendered view files, in model order
    pub fn view_files(&self) -> Vec<LookmlFile> {
        self.models.iter().map(ModelTranslation::view_file).collect()
    }

    /// Rendered model files, in model order
    pub fn model_files(&self) -> Vec<LookmlFile> {
        self.models.iter().map(ModelTranslation::model_file).collect()
    }

    /// Diagnostics of every model, in model order
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.models.iter().flat_map(|m| m.diagnostics.iter())
    }

    pub fn explore_count(&self) -> usize {
        self.models.len()
    }
}

/// Translates dbt models of one dialect into LookML
#[derive(Debug, Clone)]
pub struct Generator {
    dialect: Dialect,
    connection: String,
    include: String,
}

impl Generator {
    /// Create a generator writing explores against `connection`
    pub fn new(dialect: Dialect, connection: impl Into<String>) -> Self {
        Self {
            dialect,
            connection: connection.into(),
            include: DEFAULT_INCLUDE.to_string(),
        }
    }

    /// Override the `include:` pattern of model files
    pub fn with_include(mut self, include: impl Into<String>) -> Self {
        self.include = include.into();
        self
    }

    /// Translate one model
    pub fn translate_model(&self, model: &DbtModel) -> ModelTranslation {
        let mut diagnostics = Vec::new();
        let view = view_from_model(model, self.dialect, &mut diagnostics);
        let document = model_document(model, &self.connection, &self.include);

        ModelTranslation {
            unique_id: model.unique_id.clone(),
            view,
            model: document,
            diagnostics,
        }
    }

    /// Translate every model, in order
    pub fn translate<'a>(&self, models: impl IntoIterator<Item = &'a DbtModel>) -> Translation {
        let models: Vec<ModelTranslation> =
            models.into_iter().map(|m| self.translate_model(m)).collect();

        tracing::info!(
            "Translated {} models for dialect {} ({} diagnostics)",
            models.len(),
            self.dialect,
            models.iter().map(|m| m.diagnostics.len()).sum::<usize>()
        );

        Translation { models }
    }
}
