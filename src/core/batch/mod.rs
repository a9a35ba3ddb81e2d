//! Batch rename/reorder staging
//!
//! Edits are staged locally against the last server-confirmed state and
//! submitted all at once.

mod naming;
mod ordering;
mod reconciler;
mod source;
mod types;


pub use naming::{NamingContext, PLACEHOLDERS, render_name, strip_extension};
pub use ordering::OrderRule;
pub use reconciler::BatchEditReconciler;
pub use source::DocumentSource;
pub use types::{DocumentChange, EditField, EditableEntity, EntityFields};

#[cfg(test)]
pub(crate) use source::MockDocumentSource;
