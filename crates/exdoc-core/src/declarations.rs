//! Enclosing declaration lookup.
//!
//! Both lookups scan upward, line by line, from a throw statement. They use
//! line-level patterns rather than a parser, so they find the nearest
//! declaration *above* the line, which is not always the one that lexically
//! encloses it (a preceding sibling class, for example).

use crate::lines::LineIndex;
use once_cell::sync::Lazy;
use regex::Regex;

static CLASS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(private|internal|public|protected)\s?(static)?\sclass\s(\w*)").unwrap()
});

static MEMBER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^\s*",
        r"(?:(?:public|private|protected|internal|static|virtual|override|abstract|",
        r"async|sealed|extern|unsafe|new|partial)\s+)*",
        r"([\w.]+(?:<[^()]*>)?(?:\[\])?\??)\s+",
        r"(\w+)\s*(?:<[^()]*>)?\s*\(",
    ))
    .unwrap()
});

/// Words that may look like a return type or member name in a statement
/// line but never start a declaration.
const STATEMENT_KEYWORDS: &[&str] = &[
    "if", "else", "for", "foreach", "while", "do", "switch", "case", "catch", "using", "lock",
    "return", "new", "throw", "await", "yield",
];

/// A class declaration found above a throw statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDeclarationInfo {
    /// Line holding the declaration.
    pub start_line: u32,
    /// Closing line of the class body. Never computed by the line scan.
    pub end_line: Option<u32>,
    pub class_name: String,
    /// Access modifier (`public`, `internal`, `protected` or `private`).
    pub modifier: String,
    /// The matched declaration text, e.g. `public static class Guard`.
    pub statement: String,
}

/// A method or constructor declaration found above a throw statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDeclarationInfo {
    pub line: u32,
    pub name: String,
    /// The declaration line with surrounding whitespace removed.
    pub statement: String,
}

/// Finds the nearest class declaration at or above `line`.
///
/// Scans from `line` up to and including line 0 and returns the first line
/// matching `<modifier> [static] class <Name>`.
///
/// # Examples
///
/// ```
/// use exdoc_core::declarations::locate_enclosing_class;
/// use exdoc_core::lines::LineIndex;
///
/// let source = "namespace App\n{\n    public class Service\n    {\n        void Run() { throw new Exception(); }\n    }\n}";
/// let class = locate_enclosing_class(&LineIndex::new(source), 4).unwrap();
///
/// assert_eq!(class.start_line, 2);
/// assert_eq!(class.class_name, "Service");
/// assert_eq!(class.modifier, "public");
/// ```
pub fn locate_enclosing_class(lines: &LineIndex<'_>, line: u32) -> Option<ClassDeclarationInfo> {
    (0..=line).rev().find_map(|current| {
        let text = lines.line(current)?;
        let caps = CLASS_PATTERN.captures(text)?;

        Some(ClassDeclarationInfo {
            start_line: current,
            end_line: None,
            class_name: caps[3].to_string(),
            modifier: caps[1].to_string(),
            statement: caps[0].to_string(),
        })
    })
}

/// Finds the nearest method or constructor declaration strictly above `line`.
///
/// The scan stops at `floor` (inclusive), normally the enclosing class
/// declaration line. Lines ending in `;` are calls or abstract members, not
/// declarations with a body, and are skipped.
pub fn locate_enclosing_member(
    lines: &LineIndex<'_>,
    line: u32,
    floor: u32,
) -> Option<MemberDeclarationInfo> {
    if line == 0 || floor >= line {
        return None;
    }

    (floor..line).rev().find_map(|current| {
        let text = lines.line(current)?;
        let trimmed = text.trim();
        if trimmed.ends_with(';') {
            return None;
        }

        let caps = MEMBER_PATTERN.captures(text)?;
        let return_type = &caps[1];
        let name = &caps[2];
        if STATEMENT_KEYWORDS.contains(&return_type) || STATEMENT_KEYWORDS.contains(&name) {
            return None;
        }

        Some(MemberDeclarationInfo {
            line: current,
            name: name.to_string(),
            statement: trimmed.to_string(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERVICE: &str = r#"using System;

public class OrderService
{
    private readonly IRepository _repository;

    /// <summary>Creates the service.</summary>
    public OrderService(IRepository repository)
    {
        _repository = repository ?? throw new ArgumentNullException(nameof(repository));
    }

    [Obsolete]
    public async Task<Order> LoadAsync(int id)
    {
        if (id < 0)
        {
            throw new ArgumentOutOfRangeException(nameof(id));
        }
        return await _repository.Find(id);
    }
}
"#;

    #[test]
    fn test_class_found_above_throw() {
        let source = "using System;\n\npublic class Parser\n{\n    public void Parse()\n    {\n        Helper();\n        Other();\n        More();\n        Last();\n        throw new FormatException(\"x\");\n    }\n}";
        let class = locate_enclosing_class(&LineIndex::new(source), 10).unwrap();

        assert_eq!(class.start_line, 2);
        assert_eq!(class.end_line, None);
        assert_eq!(class.class_name, "Parser");
        assert_eq!(class.modifier, "public");
        assert_eq!(class.statement, "public class Parser");
    }

    #[test]
    fn test_static_class() {
        let lines = LineIndex::new("internal static class Guard\n{\n}");
        let class = locate_enclosing_class(&lines, 2).unwrap();

        assert_eq!(class.modifier, "internal");
        assert_eq!(class.class_name, "Guard");
        assert_eq!(class.statement, "internal static class Guard");
    }

    #[test]
    fn test_class_on_first_line() {
        let lines = LineIndex::new("public class A\n{\n}");
        assert_eq!(locate_enclosing_class(&lines, 2).unwrap().start_line, 0);
    }

    #[test]
    fn test_no_class_declaration() {
        let lines = LineIndex::new("var x = 1;\nthrow new Exception();");
        assert!(locate_enclosing_class(&lines, 1).is_none());
    }

    #[test]
    fn test_class_without_access_modifier_not_found() {
        let lines = LineIndex::new("class Implicit\n{\n}");
        assert!(locate_enclosing_class(&lines, 2).is_none());
    }

    #[test]
    fn test_class_search_past_end_of_document() {
        let lines = LineIndex::new("public class A");
        assert_eq!(locate_enclosing_class(&lines, 40).unwrap().class_name, "A");
    }

    #[test]
    fn test_member_for_constructor() {
        let lines = LineIndex::new(SERVICE);
        let member = locate_enclosing_member(&lines, 9, 2).unwrap();

        assert_eq!(member.line, 7);
        assert_eq!(member.name, "OrderService");
        assert_eq!(
            member.statement,
            "public OrderService(IRepository repository)"
        );
    }

    #[test]
    fn test_member_skips_control_flow() {
        let lines = LineIndex::new(SERVICE);
        let member = locate_enclosing_member(&lines, 17, 2).unwrap();

        assert_eq!(member.line, 13);
        assert_eq!(member.name, "LoadAsync");
    }

    #[test]
    fn test_member_search_respects_floor() {
        let lines = LineIndex::new(SERVICE);
        assert!(locate_enclosing_member(&lines, 9, 8).is_none());
    }

    #[test]
    fn test_member_ignores_calls_and_fields() {
        let lines = LineIndex::new("    DoWork(x);\n    private int _count;\n    throw new Exception();");
        assert!(locate_enclosing_member(&lines, 2, 0).is_none());
    }

    #[test]
    fn test_member_with_generic_and_array_types() {
        let lines = LineIndex::new(
            "    public static Dictionary<string, int[]> Build<T>(T seed)\n    {\n        throw new NotImplementedException();",
        );
        let member = locate_enclosing_member(&lines, 2, 0).unwrap();
        assert_eq!(member.name, "Build");
    }

    #[test]
    fn test_member_at_line_zero_has_nothing_above() {
        let lines = LineIndex::new("throw new Exception();");
        assert!(locate_enclosing_member(&lines, 0, 0).is_none());
    }
}
