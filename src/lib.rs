// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. theme::Theme)
    clippy::module_name_repetitions
)]

//! # Mermaid Restyle
//!
//! Restyles the mermaid diagrams embedded in markdown documentation.
//!
//! Every ```` ```mermaid ```` block gets:
//! - Old init directives, theme banners and class statements stripped
//! - A curated theme picked from the diagram's subject matter
//! - Nodes sorted into the theme's style classes by their labels
//!
//! ## Pipeline
//!
//! Each diagram is rewritten on its own and purely:
//! - **Category**: keyword tiers pick architecture, business or payment
//! - **Sanitize**: previous styling is removed, blank lines normalized
//! - **Classify**: labelled nodes are matched against a rule table
//! - **Render**: directive, body, class defs and node classes are joined
//!
//! ## Modules
//!
//! - [`theme`]: Built-in themes and their rendering
//! - [`category`]: Diagram category detection
//! - [`sanitize`]: Removal of previous styling
//! - [`nodes`]: Node scanning and classification
//! - [`kind`]: Mermaid diagram kind detection
//! - [`rewrite`]: The per-diagram pipeline
//! - [`document`]: Markdown discovery, fence splicing and file processing
//! - [`config`]: Saved command-line defaults
//! - [`perf`]: Opt-in timing

pub mod category;
pub mod config;
pub mod document;
pub mod kind;
pub mod nodes;
pub mod perf;
pub mod rewrite;
pub mod sanitize;
pub mod theme;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::category::{Category, classify};
    pub use crate::document::{WriteMode, restyle_all, restyle_document, restyle_file};
    pub use crate::nodes::{ClassGroup, classify_nodes};
    pub use crate::rewrite::{Rewriter, rewrite};
    pub use crate::sanitize::sanitize;
    pub use crate::theme::{Theme, theme_for, themes};
}
