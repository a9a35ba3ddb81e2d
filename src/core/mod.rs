//! Client side workflow logic
//!
//! Nothing here talks HTTP directly: polling goes through a
//! [`StatusFetcher`](task::StatusFetcher) and reloading through a
//! [`DocumentSource`](batch::DocumentSource).

pub mod batch;
pub mod processor;
pub mod task;

pub use batch::{BatchEditReconciler, DocumentSource, NamingContext, OrderRule};
pub use processor::{DocumentProcessor, SubmitOutcome};
pub use task::{PollHandle, PollOptions, PollOutcome, Task, TaskPoller, TaskStatus};
