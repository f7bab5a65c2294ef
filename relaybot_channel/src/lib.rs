#![deny(
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

//! The webhook channel surface.
//!
//! Decodes chat-platform activity envelopes arriving on `POST /api/messages`,
//! dispatches built-in commands, relays everything else through the
//! completion service, and returns the reply activity.

pub mod activity;
pub mod command;
mod error;
pub mod relay;
pub mod server;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{Error, Result};
pub use relay::{RelayHandler, RelayOptions};
