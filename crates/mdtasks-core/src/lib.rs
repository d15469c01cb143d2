//! Task records and the line-level recognizer for markdown checklists.
//!
//! # Quick Start
//!
//! For convenient imports, use the prelude:
//!
//! ```
//! use mdtasks_core::prelude::*;
//!
//! let tasks = recognize_document("- [x] ship it ✅\n- [ ] celebrate #party", "log.md");
//! assert_eq!(tasks.len(), 2);
//! assert_eq!(tasks[0].status, TaskStatus::Complete);
//! ```

pub mod error;
pub mod models;
pub mod prelude;
pub mod recognize;
