//! Mermaid diagram kind detection.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramKind {
    Flowchart,
    Sequence,
    Class,
    State,
    EntityRelationship,
    Other,
}

impl DiagramKind {
    /// Detect the kind from the first line that is neither blank nor a comment.
    pub fn detect(diagram: &str) -> Self {
        let Some(header) = diagram
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty() && !line.starts_with("%%"))
        else {
            return Self::Other;
        };
        let keyword = header.split_whitespace().next().unwrap_or_default();
        match keyword {
            "flowchart" | "graph" => Self::Flowchart,
            "sequenceDiagram" => Self::Sequence,
            "classDiagram" | "classDiagram-v2" => Self::Class,
            "stateDiagram" | "stateDiagram-v2" => Self::State,
            "erDiagram" => Self::EntityRelationship,
            _ => Self::Other,
        }
    }

    /// Whether `classDef`/`class` statements are valid in this kind of diagram.
    pub const fn supports_style_classes(self) -> bool {
        matches!(self, Self::Flowchart | Self::State)
    }
}

impl fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Flowchart => "flowchart",
            Self::Sequence => "sequence",
            Self::Class => "class",
            Self::State => "state",
            Self::EntityRelationship => "er",
            Self::Other => "other",
        })
    }
}
