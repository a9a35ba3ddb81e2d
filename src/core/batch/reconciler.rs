//! Staged batch edits against a server baseline

use super::naming::{NamingContext, render_name};
use super::ordering::OrderRule;
use super::source::DocumentSource;
use super::types::{DocumentChange, EditField, EditableEntity};
use crate::sdk::errors::{Result, SDKError};
use crate::sdk::types::Document;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info, warn};

/// Tracks baseline and pending name/order for every document of a project.
///
/// Entities keep the order in which the server listed them; that order is
/// what rename patterns number from.
#[derive(Debug, Clone, Default)]
pub struct BatchEditReconciler {
    entities: Vec<EditableEntity>,
}

impl BatchEditReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconciler initialized from a document listing
    pub fn from_documents(documents: &[Document]) -> Self {
        let mut reconciler = Self::new();
        reconciler.initialize(documents);
        reconciler
    }

    /// Replace all state with `documents`, baseline equal to pending.
    /// Documents without a positive display order get their 1-based
    /// listing position.
    pub fn initialize(&mut self, documents: &[Document]) -> &[EditableEntity] {
        let mut seen = HashSet::new();
        self.entities = documents
            .iter()
            .enumerate()
            .filter_map(|(idx, document)| {
                if !seen.insert(document.id.as_str()) {
                    warn!("Duplicate document {} in listing, keeping the first", document.id);
                    return None;
                }
                Some(EditableEntity::from_document(document, idx as u32 + 1))
            })
            .collect();

        debug!("Batch edit initialized with {} documents", self.entities.len());
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Entities in listing order
    pub fn entities(&self) -> &[EditableEntity] {
        &self.entities
    }

    pub fn entity(&self, id: &str) -> Option<&EditableEntity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Stage one field of one entity. The baseline is never touched and
    /// orders are not renormalized.
    pub fn set_pending_field(&mut self, id: &str, field: EditField) -> Result<()> {
        if field == EditField::Order(0) {
            return Err(SDKError::Validation(
                "El orden debe ser un número positivo".to_string(),
            ));
        }

        let entity = self
            .entities
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| SDKError::Validation(format!("Documento desconocido: {id}")))?;

        match field {
            EditField::Name(name) => entity.pending.name = name,
            EditField::Order(order) => entity.pending.order = order,
        }
        Ok(())
    }

    /// Rename every entity from `pattern`, numbering by listing position.
    /// Returns how many entities were renamed.
    pub fn apply_name_pattern(&mut self, pattern: &str, context: &NamingContext) -> Result<usize> {
        if pattern.trim().is_empty() {
            return Err(SDKError::Validation(
                "Ingrese un patrón de nombres".to_string(),
            ));
        }

        for (idx, entity) in self.entities.iter_mut().enumerate() {
            entity.pending.name = render_name(pattern, idx + 1, &entity.baseline.name, context);
        }

        info!("Applied name pattern '{}' to {} documents", pattern, self.entities.len());
        Ok(self.entities.len())
    }

    /// Reorder by a free-text rule. Returns the rule that matched; when
    /// none does nothing changes.
    pub fn apply_order_rule(&mut self, rule_text: &str) -> Option<OrderRule> {
        let Some(rule) = OrderRule::classify(rule_text) else {
            debug!("No ordering rule recognized in '{}'", rule_text);
            return None;
        };

        let mut ranked: Vec<usize> = (0..self.entities.len()).collect();
        ranked.sort_by(|&a, &b| rule.compare(&self.entities[a], &self.entities[b]));

        for (rank, idx) in ranked.into_iter().enumerate() {
            self.entities[idx].pending.order = rank as u32 + 1;
        }

        info!("Applied {:?} ordering to {} documents", rule, self.entities.len());
        Some(rule)
    }

    pub fn has_any_change(&self) -> bool {
        self.entities.iter().any(EditableEntity::has_change)
    }

    pub fn changed_count(&self) -> usize {
        self.entities.iter().filter(|e| e.has_change()).count()
    }

    /// Submission payload: every entity, changed or not, keyed by id
    pub fn diff(&self) -> BTreeMap<String, DocumentChange> {
        self.entities
            .iter()
            .map(|entity| (entity.id.clone(), DocumentChange::from(entity)))
            .collect()
    }

    /// Entities sorted by pending order, listing order among equals
    pub fn sorted_by_pending_order(&self) -> Vec<&EditableEntity> {
        let mut sorted: Vec<&EditableEntity> = self.entities.iter().collect();
        sorted.sort_by_key(|e| e.pending.order);
        sorted
    }

    /// Drop staged edits and reload the baseline from the server. On
    /// failure the current state is kept.
    pub async fn reset<S>(&mut self, source: &S, project_id: &str) -> Result<()>
    where
        S: DocumentSource + ?Sized,
    {
        let documents = source.list_documents(project_id).await?;
        self.initialize(&documents);
        Ok(())
    }
}
