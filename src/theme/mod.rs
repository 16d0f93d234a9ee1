//! Built-in diagram themes.
//!
//! A theme bundles the `%%{init: ...}%%` directive placed at the top of a
//! restyled diagram with the `classDef` statements appended after its body.
//! The registry is a static table; nothing here allocates until a theme is
//! rendered.

mod presets;

use std::fmt;

use serde::Serialize;

use crate::category::Category;

pub use presets::THEMES;

/// All built-in themes, one per category.
pub fn themes() -> &'static [Theme] {
    &THEMES
}

/// The theme registered for `category`.
pub fn theme_for(category: Category) -> &'static Theme {
    match category {
        Category::Architecture => &THEMES[0],
        Category::Business => &THEMES[1],
        Category::Payment => &THEMES[2],
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Theme {
    pub category: Category,
    /// Display name, e.g. "Tech Blue".
    pub name: &'static str,
    pub init: InitDirective,
    pub classes: &'static [StyleClass],
}

impl Theme {
    /// Returns true if the theme defines a style class called `name`.
    pub fn defines(&self, name: &str) -> bool {
        self.class(name).is_some()
    }

    pub fn class(&self, name: &str) -> Option<&'static StyleClass> {
        self.classes.iter().find(|class| class.name == name)
    }

    /// The comment banner that opens the theme's `classDef` section.
    pub fn banner(&self) -> String {
        format!("%% --- {} THEME STYLING ---", self.name.to_uppercase())
    }

    /// Render the styling section appended after a diagram body.
    ///
    /// Starts with a newline so it can be concatenated directly onto the body.
    pub fn render_class_defs(&self) -> String {
        let mut out = format!("\n    {}", self.banner());
        for class in self.classes {
            out.push_str("\n    ");
            out.push_str(&class.to_string());
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Normal,
    Bold,
}

impl FontWeight {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Bold => "bold",
        }
    }
}

/// A named visual style applied to nodes with `class <ids> <name>;`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleClass {
    pub name: &'static str,
    pub fill: &'static str,
    pub stroke: &'static str,
    pub stroke_width: u8,
    pub color: &'static str,
    pub font_weight: FontWeight,
    /// Dash and gap lengths for `stroke-dasharray`.
    pub dash: Option<(u8, u8)>,
}

impl fmt::Display for StyleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "classDef {} fill:{},stroke:{},stroke-width:{}px,color:{},font-weight:{}",
            self.name,
            self.fill,
            self.stroke,
            self.stroke_width,
            self.color,
            self.font_weight.as_str()
        )?;
        if let Some((dash, gap)) = self.dash {
            write!(f, ",stroke-dasharray: {dash} {gap}")?;
        }
        f.write_str(";")
    }
}

/// Mermaid initialization directive, serialized as pretty JSON.
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitDirective {
    pub theme: &'static str,
    pub theme_variables: ThemeVariables,
    pub flowchart: FlowchartOptions,
    pub sequence: SequenceOptions,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeVariables {
    pub primary_color: &'static str,
    pub primary_text_color: &'static str,
    pub primary_border_color: &'static str,
    pub line_color: &'static str,
    pub secondary_color: &'static str,
    pub tertiary_color: &'static str,
    pub background: &'static str,
    pub main_bkg: &'static str,
    pub second_bkg: &'static str,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowchartOptions {
    pub use_max_width: bool,
    pub html_labels: bool,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceOptions {
    pub use_max_width: bool,
    pub wrap: bool,
}

impl fmt::Display for InitDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string_pretty(self).map_err(|_| fmt::Error)?;
        write!(f, "%%{{init: {json}}}%%")
    }
}
