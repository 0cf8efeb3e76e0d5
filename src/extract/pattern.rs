//! Regex-based scans for the boilerplate block and function definitions.

use once_cell::sync::Lazy;
use regex::Regex;

use super::types::FunctionTable;

/// Marker lines around the shared boilerplate block. The block itself is
/// captured lazily so the first `END` marker closes it.
static BOILERPLATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?ms)^# BEGIN BOILERPLATE\n(.*?)\n# END BOILERPLATE$").unwrap()
});

/// `name() {` at the start of a line through the nearest line that is
/// exactly `}`. No brace counting: an inner block closed in column zero
/// ends the match early.
static FUNCTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?ms)\n((\w+)\s*\(\)\s+\{\n.*?\n\}$)").unwrap());

/// Extract the text between the boilerplate markers, trimmed.
pub fn boilerplate(source: &str) -> Option<String> {
    BOILERPLATE
        .captures(source)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Collect every `name() { ... }` definition that follows a newline.
pub fn functions(source: &str) -> FunctionTable {
    let mut table = FunctionTable::new();
    for caps in FUNCTION.captures_iter(source) {
        let (Some(definition), Some(name)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        table.insert(name.as_str(), definition.as_str());
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boilerplate_is_trimmed() {
        let src = "#!/bin/sh\n# BEGIN BOILERPLATE\n\n  set -eu\n  X=1\n\n# END BOILERPLATE\n";
        assert_eq!(boilerplate(src).as_deref(), Some("set -eu\n  X=1"));
    }

    #[test]
    fn boilerplate_absent_without_markers() {
        assert_eq!(boilerplate("echo hi\n"), None);
    }

    #[test]
    fn boilerplate_needs_both_markers() {
        assert_eq!(boilerplate("# BEGIN BOILERPLATE\nX=1\n"), None);
        assert_eq!(boilerplate("X=1\n# END BOILERPLATE\n"), None);
    }

    #[test]
    fn boilerplate_markers_must_be_whole_lines() {
        let src = "echo '# BEGIN BOILERPLATE'\nX=1\n# END BOILERPLATE\n";
        assert_eq!(boilerplate(src), None);
    }

    #[test]
    fn only_first_boilerplate_block_is_used() {
        let src = "# BEGIN BOILERPLATE\nA=1\n# END BOILERPLATE\n\
                   # BEGIN BOILERPLATE\nB=2\n# END BOILERPLATE\n";
        assert_eq!(boilerplate(src).as_deref(), Some("A=1"));
    }

    #[test]
    fn function_at_very_start_is_not_matched() {
        // A definition must follow a newline.
        assert!(functions("foo() {\n  echo hi\n}\n").is_empty());
        assert_eq!(functions("\nfoo() {\n  echo hi\n}\n").len(), 1);
    }

    #[test]
    fn space_before_parens_is_allowed() {
        let table = functions("\nfoo () {\n  echo hi\n}\n");
        assert_eq!(table.get("foo"), Some("foo () {\n  echo hi\n}"));
    }

    #[test]
    fn indented_definitions_are_ignored() {
        let table = functions("\nouter() {\n  inner() {\n    echo\n  }\n  inner\n}\n");
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["outer"]);
    }

    #[test]
    fn closing_brace_must_be_alone_on_its_line() {
        let src = "\nfoo() {\n  echo one\n} >/dev/null\n  echo two\n}\n";
        assert_eq!(
            functions(src).get("foo"),
            Some("foo() {\n  echo one\n} >/dev/null\n  echo two\n}")
        );
    }

    #[test]
    fn consecutive_definitions_are_both_found() {
        let table = functions("\na() {\n  echo a\n}\nb() {\n  echo b\n}\n");
        assert_eq!(table.get("a"), Some("a() {\n  echo a\n}"));
        assert_eq!(table.get("b"), Some("b() {\n  echo b\n}"));
    }
}
