//! Restyling of a single diagram body.
//!
//! A rewrite runs four steps on one diagram, independent of any other
//! diagram in the same document:
//!
//! 1. choose a category (or take the configured override)
//! 2. sanitize the body
//! 3. classify its nodes against the category's theme
//! 4. render `init directive + body + class defs + node classes`

use tracing::debug;

use crate::category::{self, Category};
use crate::kind::DiagramKind;
use crate::nodes::{self, ClassGroup};
use crate::sanitize::sanitize;
use crate::theme::{Theme, theme_for};

/// Restyle one diagram body with default options.
pub fn rewrite(diagram: &str) -> String {
    Rewriter::default().rewrite(diagram).text
}

/// Options shared by every diagram rewritten in a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Rewriter {
    /// Force this category instead of detecting one per diagram.
    pub category_override: Option<Category>,
    /// Leave style classes out of diagram kinds that cannot use them.
    pub kind_aware: bool,
}

/// Result of rewriting one diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenDiagram {
    pub category: Category,
    pub theme: &'static Theme,
    pub kind: DiagramKind,
    /// Sanitized body, as placed between the directive and the class defs.
    pub body: String,
    pub groups: Vec<ClassGroup>,
    /// The full replacement text.
    pub text: String,
}

impl RewrittenDiagram {
    /// Number of nodes that received a class.
    pub fn classified_nodes(&self) -> usize {
        self.groups.iter().map(|group| group.nodes.len()).sum()
    }
}

impl Rewriter {
    pub const fn with_category(mut self, category: Option<Category>) -> Self {
        self.category_override = category;
        self
    }

    pub const fn with_kind_aware(mut self, kind_aware: bool) -> Self {
        self.kind_aware = kind_aware;
        self
    }

    pub fn rewrite(&self, diagram: &str) -> RewrittenDiagram {
        let category = self
            .category_override
            .unwrap_or_else(|| category::classify(diagram));
        let theme = theme_for(category);
        debug!(%category, theme = theme.name, "category chosen");

        let body = sanitize(diagram);
        let kind = DiagramKind::detect(&body);
        debug!(%kind, bytes = body.len(), "sanitized");

        let styled = !self.kind_aware || kind.supports_style_classes();
        let groups = if styled {
            nodes::classify_nodes(&body, theme)
        } else {
            Vec::new()
        };
        debug!(groups = groups.len(), "classified");

        let mut text = format!("{}\n{body}", theme.init);
        if styled {
            text.push_str(&theme.render_class_defs());
            text.push_str(&nodes::render_classifications(&groups));
        }

        RewrittenDiagram {
            category,
            theme,
            kind,
            body,
            groups,
            text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLOW: &str = "flowchart TD\n    A[\"User Database\"] --> B[\"Auth Service\"]\n    B --> C[\"Mobile App\"]";

    #[test]
    fn test_rewrite_layout() {
        let out = rewrite(FLOW);
        let theme = theme_for(Category::Architecture);
        let expected = format!(
            "{}\n{FLOW}{}\n    %% Node Classifications\n    class A database;\n    class B service;\n    class C mobile;",
            theme.init,
            theme.render_class_defs()
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_rewrite_replaces_old_styling() {
        let old = format!(
            "%%{{init: {{\"theme\": \"forest\"}}}}%%\n{FLOW}\n    classDef old fill:#fff;\n    class A old;"
        );
        let out = Rewriter::default().rewrite(&old);
        assert_eq!(out.body, FLOW);
        assert!(!out.text.contains("forest"));
        assert!(!out.text.contains("classDef old"));
        assert_eq!(out.text.matches("%%{init:").count(), 1);
    }

    #[test]
    fn test_no_nodes_means_no_classification_section() {
        let out = rewrite("flowchart LR\n    start --> stop");
        assert!(!out.contains("Node Classifications"));
        assert!(out.contains("TECH BLUE THEME STYLING"));
    }

    #[test]
    fn test_category_follows_content() {
        let out = Rewriter::default().rewrite("graph TD\n    T[\"Trip Booking\"]");
        assert_eq!(out.category, Category::Business);
        assert_eq!(out.theme.name, "Corporate Green");
        assert_eq!(out.groups[0].class, "process");
    }

    #[test]
    fn test_category_override() {
        let rewriter = Rewriter::default().with_category(Some(Category::Payment));
        let out = rewriter.rewrite(FLOW);
        assert_eq!(out.category, Category::Payment);
        // Corporate/Gold have no mobile or service class.
        for group in &out.groups {
            assert!(out.theme.defines(group.class));
        }
        assert!(out.text.contains("FINANCIAL GOLD THEME STYLING"));
    }

    #[test]
    fn test_kind_aware_skips_classes_for_sequence() {
        let text = "sequenceDiagram\n    Client->>API: GET";
        let rewriter = Rewriter::default().with_kind_aware(true);
        let out = rewriter.rewrite(text);
        assert_eq!(out.kind, DiagramKind::Sequence);
        assert_eq!(out.text, format!("{}\n{text}", out.theme.init));
    }

    #[test]
    fn test_kind_aware_keeps_classes_for_flowchart() {
        let rewriter = Rewriter::default().with_kind_aware(true);
        assert_eq!(rewriter.rewrite(FLOW).text, rewrite(FLOW));
    }

    #[test]
    fn test_classified_node_count() {
        let out = Rewriter::default().rewrite(FLOW);
        assert_eq!(out.classified_nodes(), 3);
    }

    #[test]
    fn test_rewrite_twice_keeps_body() {
        let first = Rewriter::default().rewrite(FLOW);
        let second = Rewriter::default().rewrite(&first.text);
        assert_eq!(second.body, first.body);
        assert_eq!(second.text.matches("%% Node Classifications").count(), 1);
        assert_eq!(second.text.matches("THEME STYLING ---").count(), 1);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn body_line() -> impl Strategy<Value = String> {
            prop_oneof![
                Just("flowchart LR".to_string()),
                Just("    A[\"Payment Gateway\"] --> B[\"Trip?\"]".to_string()),
                Just("    C[\"Redis\"] --> D[\"Driver App\"]".to_string()),
                Just("    %% note".to_string()),
                Just("    classDef x fill:#000;".to_string()),
                Just("%%{init: {\"theme\": \"base\"}}%%".to_string()),
                Just(String::new()),
                "    [A-Z]{1,3}\\[\"[a-zA-Z ?]{0,16}\"\\]",
            ]
        }

        proptest! {
            #[test]
            fn rewrite_round_trip_keeps_sanitized_body(lines in prop::collection::vec(body_line(), 0..16)) {
                let first = Rewriter::default().rewrite(&lines.join("\n"));
                let second = Rewriter::default().rewrite(&first.text);
                prop_assert_eq!(second.body, first.body);
            }
        }
    }
}
