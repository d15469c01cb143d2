//! Data types for recognized tasks.
//!
//! [`Task`] is the only entity; the enums in this module describe its
//! status, priority and date fields.

mod common;
mod task;

pub use common::*;
pub use task::*;
