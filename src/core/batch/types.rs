//! Batch edit types

use crate::sdk::types::{Document, DocumentStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name and position of a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityFields {
    pub name: String,
    /// 1-based position
    pub order: u32,
}

/// One document under batch edit
#[derive(Debug, Clone, PartialEq)]
pub struct EditableEntity {
    pub id: String,
    /// Last value confirmed by the server
    pub baseline: EntityFields,
    /// Locally staged value
    pub pending: EntityFields,
    pub created_at: Option<DateTime<Utc>>,
    pub status: DocumentStatus,
}

impl EditableEntity {
    /// Baseline and pending both set to the server state; `position` is
    /// the 1-based fallback when the server has no display order.
    pub fn from_document(document: &Document, position: u32) -> Self {
        let fields = EntityFields {
            name: document.original_filename.clone(),
            order: document.display_order.filter(|o| *o > 0).unwrap_or(position),
        };
        Self {
            id: document.id.clone(),
            baseline: fields.clone(),
            pending: fields,
            created_at: document.created_at,
            status: document.status,
        }
    }

    pub fn has_change(&self) -> bool {
        self.pending != self.baseline
    }

    pub fn name_changed(&self) -> bool {
        self.pending.name != self.baseline.name
    }

    pub fn order_changed(&self) -> bool {
        self.pending.order != self.baseline.order
    }
}

/// Single-field edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditField {
    Name(String),
    Order(u32),
}

/// Per-document entry of the submission payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentChange {
    pub new_name: String,
    pub new_order: u32,
    pub current_name: String,
    pub current_order: u32,
}

impl From<&EditableEntity> for DocumentChange {
    fn from(entity: &EditableEntity) -> Self {
        Self {
            new_name: entity.pending.name.clone(),
            new_order: entity.pending.order,
            current_name: entity.baseline.name.clone(),
            current_order: entity.baseline.order,
        }
    }
}
