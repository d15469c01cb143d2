//! Prelude module for convenient imports.
//!
//! Re-exports the task model and the recognizer entry points.

pub use crate::error::ParseError;
pub use crate::models::{DateField, Priority, Task, TaskStatus};
pub use crate::recognize::{recognize, recognize_document};
