//! Explain command implementation.
//!
//! Prints how each clause of a query is parsed, without scanning a vault.

use mdtasks_vault::filter::Query;

use super::{CommandContext, CommandError, Result};
use crate::output::{format_explain_json, format_explain_table};

/// Executes the explain command.
///
/// # Errors
///
/// Returns [`CommandError::Query`] if the text holds no clauses.
pub fn execute(ctx: &CommandContext, query_text: &str) -> Result<()> {
    let query = parse_non_empty(query_text)?;

    if ctx.json_output {
        let output = format_explain_json(&query)?;
        println!("{output}");
    } else if !ctx.quiet {
        let output = format_explain_table(&query, ctx.use_colors);
        print!("{output}");
    }

    Ok(())
}

fn parse_non_empty(query_text: &str) -> Result<Query> {
    let query = Query::parse(query_text);
    if query.is_empty() {
        return Err(CommandError::Query(
            "query has no clauses (blank lines and # comments are ignored)".to_string(),
        ));
    }
    Ok(query)
}
