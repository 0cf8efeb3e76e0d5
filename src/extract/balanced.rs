//! Syntax-aware function scan using tree-sitter-bash.
//!
//! Each definition runs from its name to the brace that actually closes it,
//! so nested blocks, nested functions and braces inside strings are kept.

use tree_sitter::{Node, Parser};

use super::types::FunctionTable;
use crate::error::{Error, Result};

/// Collect every top-level function definition.
pub fn functions(source: &str) -> Result<FunctionTable> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_bash::LANGUAGE.into())
        .map_err(|e| Error::Parse(format!("failed to load tree-sitter-bash: {e}")))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| Error::Parse("parser returned no tree".into()))?;

    let mut table = FunctionTable::new();
    collect_definitions(&tree.root_node(), source, &mut table);
    Ok(table)
}

/// Walk the top level, stepping into error-recovery nodes so one bad
/// statement does not hide the definitions around it.
fn collect_definitions(node: &Node, source: &str, table: &mut FunctionTable) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "function_definition" => {
                if let Some((name, definition)) = definition_text(&child, source) {
                    table.insert(name, definition);
                }
            }
            "ERROR" => collect_definitions(&child, source, table),
            _ => {}
        }
    }
}

fn definition_text<'s>(node: &Node, source: &'s str) -> Option<(&'s str, &'s str)> {
    let name = node
        .child_by_field_name("name")?
        .utf8_text(source.as_bytes())
        .ok()?;
    let definition = node.utf8_text(source.as_bytes()).ok()?;
    Some((name, definition))
}
