//! Mermaid fence extraction and splicing.

use std::sync::LazyLock;

use regex::Regex;

use crate::rewrite::{RewrittenDiagram, Rewriter};

static MERMAID_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```mermaid(\r?\n)(.*?)\r?\n```").expect("valid fence regex")
});

/// A fenced mermaid block inside a document snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagramBlock<'a> {
    /// Byte offset of the opening fence.
    pub start: usize,
    /// Byte offset just past the closing fence.
    pub end: usize,
    /// Text between the fence lines.
    pub body: &'a str,
    /// Line ending of the opening fence, `"\n"` or `"\r\n"`.
    pub newline: &'a str,
}

impl DiagramBlock<'_> {
    pub fn is_crlf(&self) -> bool {
        self.newline == "\r\n"
    }
}

/// Find all mermaid blocks in textual order.
pub fn find_diagram_blocks(source: &str) -> Vec<DiagramBlock<'_>> {
    MERMAID_FENCE
        .captures_iter(source)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let newline = caps.get(1)?;
            let body = caps.get(2)?;
            Some(DiagramBlock {
                start: whole.start(),
                end: whole.end(),
                body: body.as_str(),
                newline: newline.as_str(),
            })
        })
        .collect()
}

/// What happened to one diagram of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramReport {
    /// 1-based position in the document.
    pub index: usize,
    pub diagram: RewrittenDiagram,
}

/// A document with every mermaid block restyled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRewrite {
    pub text: String,
    /// In document order.
    pub diagrams: Vec<DiagramReport>,
    changed: bool,
}

impl DocumentRewrite {
    /// True if the restyled text differs from the source.
    pub const fn changed(&self) -> bool {
        self.changed
    }
}

/// Restyle every mermaid block of `source`.
///
/// Blocks are spliced from last to first so the offsets of blocks not yet
/// replaced stay valid.
pub fn restyle_document(source: &str, rewriter: &Rewriter) -> DocumentRewrite {
    let blocks = find_diagram_blocks(source);
    let mut text = source.to_string();
    let mut diagrams = Vec::with_capacity(blocks.len());

    for (index, block) in blocks.iter().enumerate().rev() {
        // CRLF blocks are rewritten as LF and converted back, so the
        // generated lines share the block's line ending.
        let diagram = if block.is_crlf() {
            rewriter.rewrite(&block.body.replace("\r\n", "\n"))
        } else {
            rewriter.rewrite(block.body)
        };
        tracing::debug!(
            index = index + 1,
            theme = diagram.theme.name,
            kind = %diagram.kind,
            "restyled diagram"
        );
        let fenced = format!("```mermaid\n{}\n```", diagram.text);
        let fenced = if block.is_crlf() {
            fenced.replace('\n', "\r\n")
        } else {
            fenced
        };
        text.replace_range(block.start..block.end, &fenced);
        diagrams.push(DiagramReport {
            index: index + 1,
            diagram,
        });
    }
    diagrams.reverse();

    let changed = text != source;
    DocumentRewrite {
        text,
        diagrams,
        changed,
    }
}
