//! Shell-source extraction: the boilerplate block and the function table.
//!
//! Both scans are pure functions of the source text. A missing block or an
//! empty table is a normal result, not an error.

/// tree-sitter scan that honors brace nesting.
pub mod balanced;
/// Regex scans for the boilerplate markers and line-anchored functions.
pub mod pattern;
/// Function table, extraction result and strategy selector.
pub mod types;

pub use types::{Extraction, FunctionTable, Strategy};

use crate::error::Result;

/// Text between the `# BEGIN BOILERPLATE` and `# END BOILERPLATE` lines, trimmed.
pub fn extract_boilerplate(source: &str) -> Option<String> {
    pattern::boilerplate(source)
}

/// All function definitions found with the given strategy.
pub fn extract_functions(source: &str, strategy: Strategy) -> Result<FunctionTable> {
    match strategy {
        Strategy::Pattern => Ok(pattern::functions(source)),
        Strategy::Balanced => balanced::functions(source),
    }
}

/// Run both scans over one source text.
pub fn extract(source: &str, strategy: Strategy) -> Result<Extraction> {
    let boilerplate = extract_boilerplate(source);
    let functions = extract_functions(source, strategy)?;
    log::debug!(
        "extracted {} function(s) with {} scan, boilerplate {}",
        functions.len(),
        strategy.as_str(),
        if boilerplate.is_some() { "found" } else { "absent" },
    );
    Ok(Extraction {
        boilerplate,
        functions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "# BEGIN BOILERPLATE\nX=1\n# END BOILERPLATE\ngreet() {\n  echo \"hi\"\n}\n";

    #[test]
    fn end_to_end_example() {
        let extraction = extract(EXAMPLE, Strategy::Pattern).unwrap();
        assert_eq!(extraction.boilerplate.as_deref(), Some("X=1"));
        assert_eq!(extraction.functions.len(), 1);
        assert_eq!(
            extraction.functions.get("greet"),
            Some("greet() {\n  echo \"hi\"\n}")
        );
    }

    #[test]
    fn strategies_agree_on_simple_input() {
        let pattern = extract(EXAMPLE, Strategy::Pattern).unwrap();
        let balanced = extract(EXAMPLE, Strategy::Balanced).unwrap();
        assert_eq!(pattern, balanced);
    }

    #[test]
    fn strategies_differ_on_column_zero_inner_brace() {
        let src = "\nouter() {\n  {\n    echo grouped\n}\n  echo tail\n}\n";
        let pattern = extract_functions(src, Strategy::Pattern).unwrap();
        let balanced = extract_functions(src, Strategy::Balanced).unwrap();
        assert_eq!(pattern.get("outer"), Some("outer() {\n  {\n    echo grouped\n}"));
        assert_eq!(
            balanced.get("outer"),
            Some("outer() {\n  {\n    echo grouped\n}\n  echo tail\n}")
        );
    }
}
