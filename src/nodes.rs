//! Keyword-based node classification.
//!
//! Nodes are found by scanning for `ID[...]` declarations. Each node with a
//! quoted label is matched against [`RULES`] in order; the first rule whose
//! keywords hit the label and whose preferred classes resolve in the active
//! theme decides the node's class. Classes are only ever taken from the
//! theme, so every assignment can be styled.

use std::sync::LazyLock;

use regex::Regex;

use crate::sanitize::CLASSIFICATION_HEADER;
use crate::theme::Theme;

static NODE_DECLARATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z]+)\[[^\n]*?\]").expect("valid node regex"));

/// A node identifier and the label found for it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRef {
    pub id: String,
    pub label: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// Matches when the lower-cased label contains any of the keywords.
    Keywords(&'static [&'static str]),
    /// Matches every label.
    Always,
}

impl Matcher {
    fn matches(self, label: &str) -> bool {
        match self {
            Self::Keywords(keywords) => keywords.iter().any(|keyword| label.contains(keyword)),
            Self::Always => true,
        }
    }
}

/// One row of the classification table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub name: &'static str,
    pub matcher: Matcher,
    /// Class names tried in order against the active theme.
    pub preferences: &'static [&'static str],
}

impl Rule {
    /// The first preferred class the theme defines.
    pub fn resolve(&self, theme: &Theme) -> Option<&'static str> {
        self.preferences
            .iter()
            .find_map(|name| theme.class(name))
            .map(|class| class.name)
    }
}

pub const RULES: &[Rule] = &[
    Rule {
        name: "storage",
        matcher: Matcher::Keywords(&["database", "postgresql", "redis", "mongodb"]),
        preferences: &["database"],
    },
    Rule {
        name: "monetary",
        matcher: Matcher::Keywords(&["payment", "billing", "transaction", "revenue", "commission"]),
        preferences: &["payment", "financial", "primary"],
    },
    Rule {
        name: "entry-point",
        matcher: Matcher::Keywords(&["gateway", "load balancer", "api gateway"]),
        preferences: &["gateway"],
    },
    Rule {
        name: "client",
        matcher: Matcher::Keywords(&["mobile", "app", "client", "dashboard"]),
        preferences: &["mobile", "primary"],
    },
    Rule {
        name: "backend",
        matcher: Matcher::Keywords(&["service", "backend", "auth", "user"]),
        preferences: &["service", "secondary"],
    },
    Rule {
        name: "external",
        matcher: Matcher::Keywords(&["ebs", "cyberpay", "external"]),
        preferences: &["external", "gateway"],
    },
    Rule {
        name: "decision",
        matcher: Matcher::Keywords(&["?", "decision"]),
        preferences: &["decision"],
    },
    Rule {
        name: "default",
        matcher: Matcher::Always,
        preferences: &["process", "transaction"],
    },
];

/// Nodes assigned to one style class, in first-assignment order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassGroup {
    pub class: &'static str,
    pub nodes: Vec<String>,
}

impl ClassGroup {
    /// Render as a `class A,B name;` statement.
    pub fn to_statement(&self) -> String {
        format!("class {} {};", self.nodes.join(","), self.class)
    }
}

/// Find distinct node identifiers in first-seen order, with their labels.
pub fn scan_nodes(text: &str) -> Vec<NodeRef> {
    let mut nodes: Vec<NodeRef> = Vec::new();
    for caps in NODE_DECLARATION.captures_iter(text) {
        let Some(id) = caps.get(1) else {
            continue;
        };
        let label = quoted_label(&text[id.end() + 1..]);
        match nodes.iter_mut().find(|node| node.id == id.as_str()) {
            Some(node) => {
                if node.label.is_none() {
                    node.label = label;
                }
            }
            None => nodes.push(NodeRef {
                id: id.as_str().to_string(),
                label,
            }),
        }
    }
    nodes
}

/// The quoted string opening inside a bracket region, before its first `]`.
///
/// `rest` starts right after the opening `[`.
fn quoted_label(rest: &str) -> Option<String> {
    let open = rest.find(['"', ']', '\n'])?;
    if !rest[open..].starts_with('"') {
        return None;
    }
    let body = &rest[open + 1..];
    let close = body.find(['"', '\n'])?;
    body[close..]
        .starts_with('"')
        .then(|| body[..close].to_string())
}

/// Pick the class for a label in `theme`, or `None` if no rule resolves.
pub fn classify_label(label: &str, theme: &Theme) -> Option<&'static str> {
    let label = label.to_lowercase();
    RULES
        .iter()
        .filter(|rule| rule.matcher.matches(&label))
        .find_map(|rule| rule.resolve(theme))
}

/// Classify the labelled nodes of a sanitized diagram and group them by class.
pub fn classify_nodes(text: &str, theme: &Theme) -> Vec<ClassGroup> {
    let mut groups: Vec<ClassGroup> = Vec::new();
    for node in scan_nodes(text) {
        let Some(label) = node.label else {
            continue;
        };
        let Some(class) = classify_label(&label, theme) else {
            continue;
        };
        match groups.iter_mut().find(|group| group.class == class) {
            Some(group) => group.nodes.push(node.id),
            None => groups.push(ClassGroup {
                class,
                nodes: vec![node.id],
            }),
        }
    }
    groups
}

/// Render the classification section appended after the theme's class defs.
///
/// Empty when there are no groups.
pub fn render_classifications(groups: &[ClassGroup]) -> String {
    if groups.is_empty() {
        return String::new();
    }
    let mut out = format!("\n    {CLASSIFICATION_HEADER}");
    for group in groups {
        out.push_str("\n    ");
        out.push_str(&group.to_statement());
    }
    out
}
