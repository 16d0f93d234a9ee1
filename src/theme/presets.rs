use super::{
    FlowchartOptions, FontWeight, InitDirective, SequenceOptions, StyleClass, Theme,
    ThemeVariables,
};
use crate::category::Category;

const BACKGROUND: &str = "#0d1117";
const SECOND_BACKGROUND: &str = "#21262d";

const FLOWCHART: FlowchartOptions = FlowchartOptions {
    use_max_width: true,
    html_labels: true,
};

const SEQUENCE: SequenceOptions = SequenceOptions {
    use_max_width: true,
    wrap: true,
};

const fn variables(
    text: &'static str,
    border: &'static str,
    secondary: &'static str,
    tertiary: &'static str,
) -> ThemeVariables {
    ThemeVariables {
        primary_color: BACKGROUND,
        primary_text_color: text,
        primary_border_color: border,
        line_color: border,
        secondary_color: secondary,
        tertiary_color: tertiary,
        background: BACKGROUND,
        main_bkg: BACKGROUND,
        second_bkg: SECOND_BACKGROUND,
    }
}

const fn class(
    name: &'static str,
    stroke: &'static str,
    stroke_width: u8,
    color: &'static str,
    font_weight: FontWeight,
) -> StyleClass {
    StyleClass {
        name,
        fill: BACKGROUND,
        stroke,
        stroke_width,
        color,
        font_weight,
        dash: None,
    }
}

const fn dashed(mut class: StyleClass, dash: u8, gap: u8) -> StyleClass {
    class.dash = Some((dash, gap));
    class
}

const fn on_second_background(mut class: StyleClass) -> StyleClass {
    class.fill = SECOND_BACKGROUND;
    class
}

// Shared by all three themes.
const DECISION: StyleClass = dashed(
    class("decision", "#d29922", 3, "#d29922", FontWeight::Bold),
    8,
    4,
);

const TECH_BLUE: &[StyleClass] = &[
    class("mobile", "#1f6feb", 3, "#c9d1d9", FontWeight::Bold),
    class("service", "#388bfd", 2, "#c9d1d9", FontWeight::Normal),
    class("database", "#79c0ff", 4, "#79c0ff", FontWeight::Bold),
    dashed(
        class("external", "#3fb950", 2, "#3fb950", FontWeight::Normal),
        3,
        3,
    ),
    class("gateway", "#d29922", 3, "#d29922", FontWeight::Bold),
    DECISION,
    on_second_background(class("process", "#1f6feb", 2, "#c9d1d9", FontWeight::Normal)),
];

const CORPORATE_GREEN: &[StyleClass] = &[
    class("primary", "#238636", 4, "#aff5b4", FontWeight::Bold),
    class("secondary", "#2ea043", 3, "#aff5b4", FontWeight::Normal),
    on_second_background(class("process", "#238636", 2, "#aff5b4", FontWeight::Normal)),
    DECISION,
    class("success", "#238636", 3, "#238636", FontWeight::Bold),
    dashed(
        class("external", "#2ea043", 2, "#2ea043", FontWeight::Normal),
        3,
        3,
    ),
    class("database", "#3fb950", 4, "#3fb950", FontWeight::Bold),
];

const FINANCIAL_GOLD: &[StyleClass] = &[
    class("payment", "#d97706", 4, "#f7d794", FontWeight::Bold),
    class("financial", "#f59e0b", 3, "#f7d794", FontWeight::Normal),
    on_second_background(class(
        "transaction",
        "#d97706",
        2,
        "#f7d794",
        FontWeight::Normal,
    )),
    dashed(
        class("gateway", "#fbbf24", 2, "#fbbf24", FontWeight::Normal),
        3,
        3,
    ),
    class("success", "#3fb950", 3, "#3fb950", FontWeight::Bold),
    DECISION,
    class("database", "#fbbf24", 4, "#fbbf24", FontWeight::Bold),
];

/// Indexed in `Category` declaration order; see `theme_for`.
pub static THEMES: [Theme; 3] = [
    Theme {
        category: Category::Architecture,
        name: "Tech Blue",
        init: InitDirective {
            theme: "dark",
            theme_variables: variables("#c9d1d9", "#1f6feb", "#388bfd", "#79c0ff"),
            flowchart: FLOWCHART,
            sequence: SEQUENCE,
        },
        classes: TECH_BLUE,
    },
    Theme {
        category: Category::Business,
        name: "Corporate Green",
        init: InitDirective {
            theme: "dark",
            theme_variables: variables("#aff5b4", "#238636", "#2ea043", "#3fb950"),
            flowchart: FLOWCHART,
            sequence: SEQUENCE,
        },
        classes: CORPORATE_GREEN,
    },
    Theme {
        category: Category::Payment,
        name: "Financial Gold",
        init: InitDirective {
            theme: "dark",
            theme_variables: variables("#f7d794", "#d97706", "#f59e0b", "#fbbf24"),
            flowchart: FLOWCHART,
            sequence: SEQUENCE,
        },
        classes: FINANCIAL_GOLD,
    },
];
