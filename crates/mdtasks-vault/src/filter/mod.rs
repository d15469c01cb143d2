//! Query parser and evaluator for recognized tasks.
//!
//! A query is plain text with one clause per line. Every clause must match
//! for a task to be kept. Clauses are case-insensitive.
//!
//! # Supported Syntax
//!
//! ## Status
//! - `done` - Complete tasks
//! - `not done` - Incomplete or in-progress tasks
//! - `cancelled`, `in progress`
//!
//! ## Dates
//! The keywords `due`, `scheduled`, `starts` and `created` each accept:
//! - `today`, `before today`, `after today`
//! - `<YYYY-MM-DD>`, `on <YYYY-MM-DD>`, `before <YYYY-MM-DD>`, `after <YYYY-MM-DD>`
//!
//! Presence tests: `has due date`, `no due date`, and likewise for
//! `scheduled`, `start` and `created`.
//!
//! ## Tags
//! - `has tags`, `no tags`
//! - `has tag <name>` - Exact tag, with or without `#`
//! - `tag includes <text>` - Any tag containing the text
//!
//! ## Path and Description
//! - `path includes <text>`, `path does not include <text>`
//! - `description includes <text>`, `description does not include <text>`
//!
//! ## Priority and Recurrence
//! - `priority is highest|high|medium|low|lowest|none`
//! - `is recurring`, `is not recurring`
//!
//! ## Boolean Operators
//! - `<a> and <b>`, `<a> or <b>`, `not <a>`
//!
//! A clause containing ` and ` is split on it first, then ` or `, then a
//! leading `not `. There is no grouping.
//!
//! Any other clause is a case-insensitive description search.
//!
//! # Example
//!
//! ```
//! use mdtasks_core::recognize::recognize_document;
//! use mdtasks_vault::filter::{evaluate_query, FilterContext};
//!
//! let tasks = recognize_document("- [ ] a ⏫\n- [x] b ⏫\n- [ ] c", "x.md");
//! let open_high = evaluate_query(&tasks, "not done\npriority is high", &FilterContext::now());
//! assert_eq!(open_high.len(), 1);
//! ```

mod ast;
mod evaluator;
mod parser;
mod query;

pub use ast::{DateCondition, Filter, StatusFilter};
pub use evaluator::{evaluate_clause, FilterContext, FilterEvaluator};
pub use parser::FilterParser;
pub use query::{evaluate_query, Query};
