//! Removal of previously applied styling from a diagram body.
//!
//! Restyling must be repeatable, so everything a previous run (or a hand
//! edit) added is stripped before a new header and class section go on:
//! init directives, decorative theme banners, `classDef` and `class`
//! statements. Blank line runs left behind are collapsed afterwards.
//!
//! [`sanitize`] is idempotent.

use std::sync::LazyLock;

use regex::Regex;

/// Header emitted above generated `class` assignments.
pub const CLASSIFICATION_HEADER: &str = "%% Node Classifications";

const DIRECTIVE_OPEN: &str = "%%{";
const DIRECTIVE_CLOSE: &str = "}%%";
const BANNER_RULE: &str = "---";

// Statements may carry a trailing `%%` comment after the terminator.
static CLASS_DEF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*classDef[ \t]+[^;\n]+;[ \t]*(?:%%[^\n]*)?[ \t\r]*$").expect("valid classDef regex")
});

static CLASS_ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*class[ \t]+[^;\n]+;[ \t]*(?:%%[^\n]*)?[ \t\r]*$").expect("valid class regex")
});

/// Strip old styling from `diagram` and normalize its blank lines.
pub fn sanitize(diagram: &str) -> String {
    let text = strip_init_directives(diagram);
    let text = strip_banners(&text);
    let text = strip_class_defs(&text);
    let text = strip_class_assignments(&text);
    collapse_blank_lines(&text).trim().to_string()
}

/// Remove every `%%{init: ... }%%` block, including multi-line ones.
///
/// Each block ends at the first `}%%` after its opening marker. A block with
/// no closing marker swallows the rest of the text.
pub fn strip_init_directives(text: &str) -> String {
    let mut out = text.to_string();
    // Removing a block can splice a new opening marker together, so rescan
    // from the top until none is left.
    while let Some(start) = find_init_open(&out) {
        let after_open = start + DIRECTIVE_OPEN.len();
        let end = out[after_open..]
            .find(DIRECTIVE_CLOSE)
            .map_or(out.len(), |offset| after_open + offset + DIRECTIVE_CLOSE.len());
        out.replace_range(start..end, "");
    }
    out
}

fn find_init_open(text: &str) -> Option<usize> {
    text.match_indices(DIRECTIVE_OPEN)
        .map(|(start, _)| start)
        .find(|&start| {
            text[start + DIRECTIVE_OPEN.len()..]
                .trim_start()
                .starts_with("init")
        })
}

/// Blank out theme banner comments and the generated classification header.
pub fn strip_banners(text: &str) -> String {
    map_lines(text, |line| if is_banner(line) { "" } else { line })
}

/// Returns true for `%% --- <title> ---` comment lines and the
/// classification header.
pub fn is_banner(line: &str) -> bool {
    let Some(comment) = line.trim().strip_prefix("%%") else {
        return false;
    };
    let comment = comment.trim();
    if comment.eq_ignore_ascii_case(CLASSIFICATION_HEADER.trim_start_matches("%% ")) {
        return true;
    }
    comment
        .strip_prefix(BANNER_RULE)
        .is_some_and(|rest| rest.ends_with(BANNER_RULE))
}

pub fn strip_class_defs(text: &str) -> String {
    CLASS_DEF.replace_all(text, "").into_owned()
}

pub fn strip_class_assignments(text: &str) -> String {
    CLASS_ASSIGNMENT.replace_all(text, "").into_owned()
}

/// Collapse every run of two or more blank lines into one empty line.
///
/// A lone blank line is kept as it is.
pub fn collapse_blank_lines(text: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    let mut run: Vec<&str> = Vec::new();
    for line in text.split('\n') {
        if line.trim().is_empty() {
            run.push(line);
            continue;
        }
        flush_blank_run(&mut out, &mut run);
        out.push(line);
    }
    flush_blank_run(&mut out, &mut run);
    out.join("\n")
}

fn flush_blank_run<'a>(out: &mut Vec<&'a str>, run: &mut Vec<&'a str>) {
    match run.len() {
        0 => {}
        1 => out.push(run[0]),
        _ => out.push(""),
    }
    run.clear();
}

fn map_lines<'a>(text: &'a str, f: impl Fn(&'a str) -> &'a str) -> String {
    text.split('\n').map(f).collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const INIT: &str = "%%{init: {\n  \"theme\": \"dark\",\n  \"themeVariables\": {\n    \"primaryColor\": \"#0d1117\"\n  }\n}}%%";

    #[test]
    fn test_removes_both_init_directives() {
        let text = format!("{INIT}\n{INIT}\nflowchart TD\n    A --> B");
        let clean = sanitize(&text);
        assert!(!clean.contains("%%{"), "got: {clean}");
        assert_eq!(clean, "flowchart TD\n    A --> B");
    }

    #[test]
    fn test_init_removal_is_minimal() {
        let text = "%%{init: {\"a\": 1}}%%\nflowchart LR\n    A --> B\n%%{init: {\"b\": 2}}%%\n    B --> C";
        let clean = strip_init_directives(text);
        assert_eq!(clean, "\nflowchart LR\n    A --> B\n\n    B --> C");
    }

    #[test]
    fn test_init_directive_with_space_and_initialize() {
        let text = "%%{ init: {}}%%\n%%{initialize: {}}%%\ngraph TD";
        assert_eq!(sanitize(text), "graph TD");
    }

    #[test]
    fn test_other_directives_are_kept() {
        let text = "%%{wrap}%%\nsequenceDiagram";
        assert_eq!(sanitize(text), text);
    }

    #[test]
    fn test_unclosed_init_consumes_remainder() {
        let text = "graph TD\n    A --> B\n%%{init: {\n    C --> D";
        assert_eq!(sanitize(text), "graph TD\n    A --> B");
    }

    #[test]
    fn test_strips_theme_banners() {
        let text = "graph TD\n    A --> B\n    %% --- TECH BLUE THEME STYLING ---\n    %% --- DARK GRADIENT GLOW STYLING ---";
        assert_eq!(sanitize(text), "graph TD\n    A --> B");
    }

    #[test]
    fn test_keeps_ordinary_comments() {
        let text = "graph TD\n    %% entry point\n    A --> B";
        assert_eq!(sanitize(text), text);
    }

    #[test]
    fn test_open_banner_rule_is_not_a_banner() {
        assert!(!is_banner("%% --- unfinished"));
        assert!(is_banner("    %% --- x ---"));
        assert!(is_banner("%% Node Classifications"));
        assert!(!is_banner("A --- B"));
    }

    #[test]
    fn test_strips_class_defs_and_assignments() {
        let text = "graph TD\n    A[\"x\"] --> B\n    classDef hot fill:#f00,stroke:#000;\n    class A,B hot;\n    class C cold;";
        assert_eq!(sanitize(text), "graph TD\n    A[\"x\"] --> B");
    }

    #[test]
    fn test_class_statements_with_trailing_comment_are_stripped() {
        let text = "graph TD\n    A --> B\n    classDef foo fill:#fff; %% old\n    class A foo; %% note";
        assert_eq!(sanitize(text), "graph TD\n    A --> B");
    }

    #[test]
    fn test_class_statement_without_terminator_is_kept() {
        let text = "graph TD\n    classDef hot fill:#f00";
        assert_eq!(sanitize(text), text);
    }

    #[test]
    fn test_class_word_inside_label_is_kept() {
        let text = "graph TD\n    A[\"First class; seats\"] --> B";
        assert_eq!(sanitize(text), text);
    }

    #[test]
    fn test_collapses_blank_runs() {
        let text = "a\n\n\n\nb\n  \n \t\nc\n\nd";
        assert_eq!(collapse_blank_lines(text), "a\n\nb\n\nc\n\nd");
    }

    #[test]
    fn test_single_blank_line_keeps_its_whitespace() {
        let text = "a\n    \nb";
        assert_eq!(collapse_blank_lines(text), text);
    }

    #[test]
    fn test_previous_output_section_is_stripped() {
        let text = "graph TD\n    A[\"User Database\"]\n    %% --- TECH BLUE THEME STYLING ---\n    classDef database fill:#0d1117,stroke:#79c0ff,stroke-width:4px,color:#79c0ff,font-weight:bold;\n    %% Node Classifications\n    class A database;";
        assert_eq!(sanitize(text), "graph TD\n    A[\"User Database\"]");
    }

    #[test]
    fn test_sanitize_of_clean_text_is_noop() {
        let text = "flowchart LR\n    A[\"Start\"] --> B{\"Ok?\"}\n\n    B --> C";
        assert_eq!(sanitize(text), text);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn diagram_line() -> impl Strategy<Value = String> {
            prop_oneof![
                Just("flowchart TD".to_string()),
                Just("    A[\"User Database\"] --> B[\"Payment?\"]".to_string()),
                Just("%%{init: {\"theme\": \"dark\"}}%%".to_string()),
                Just("%%{init: {\n  \"theme\": \"dark\"\n}}%%".to_string()),
                Just("    %% --- TECH BLUE THEME STYLING ---".to_string()),
                Just("    %% Node Classifications".to_string()),
                Just("    classDef a fill:#fff;".to_string()),
                Just("    class A,B database;".to_string()),
                Just("    class C old; %% stale".to_string()),
                Just("    %% a comment".to_string()),
                Just(String::new()),
                Just("   ".to_string()),
                "[a-zA-Z%{}:;\\[\\]\" \t-]{0,30}",
            ]
        }

        proptest! {
            #[test]
            fn sanitize_is_idempotent(lines in prop::collection::vec(diagram_line(), 0..20)) {
                let text = lines.join("\n");
                let once = sanitize(&text);
                prop_assert_eq!(sanitize(&once), once);
            }

            #[test]
            fn sanitize_is_idempotent_on_arbitrary_text(text in "[a-z%{}:;\\- \n\t]{0,200}") {
                let once = sanitize(&text);
                prop_assert_eq!(sanitize(&once), once);
            }

            #[test]
            fn sanitized_text_has_no_init_directive(lines in prop::collection::vec(diagram_line(), 0..20)) {
                let clean = sanitize(&lines.join("\n"));
                prop_assert!(find_init_open(&clean).is_none());
            }
        }
    }
}
