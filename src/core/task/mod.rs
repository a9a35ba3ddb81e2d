//! Server task tracking
//!
//! A [`TaskPoller`] watches one server-side job until it reaches a terminal
//! state, a fetch fails, the deadline passes, or the caller cancels.

mod poller;
mod types;


pub use poller::{PollHandle, PollOptions, PollOutcome, StatusFetcher, TaskPoller};
pub use types::{Task, TaskStatus};
