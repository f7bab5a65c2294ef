#![warn(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Per-user rolling conversation state.
//!
//! A [`ConversationHistory`] holds the bounded message window for one user;
//! a [`ConversationStore`] leases per-user history slots so that turns for
//! the same user serialize while distinct users proceed in parallel.

mod history;
mod store;

pub use history::ConversationHistory;
pub use store::{ConversationStore, HistorySlot, MemoryConversationStore};
