//! Diagram category detection.
//!
//! A diagram's category picks the theme it is restyled with. Detection is a
//! keyword scan over the whole lower-cased diagram text, tested tier by tier
//! in priority order; the first tier with any hit wins.

use std::fmt;

/// Subject-matter bucket a diagram falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Architecture,
    Business,
    Payment,
}

impl Category {
    pub const ALL: [Self; 3] = [Self::Architecture, Self::Business, Self::Payment];

    /// Stable identifier used in config files and reports.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Architecture => "architecture",
            Self::Business => "business",
            Self::Payment => "payment",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.as_str() == s)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword tiers in priority order. Architecture is the fallback and has no tier.
pub const TIERS: &[(Category, &[&str])] = &[
    (
        Category::Payment,
        &[
            "payment",
            "transaction",
            "billing",
            "revenue",
            "commission",
            "earnings",
        ],
    ),
    (
        Category::Business,
        &["trip", "booking", "passenger", "driver", "journey", "process"],
    ),
];

/// Detect the category of a diagram from its raw text.
pub fn classify(diagram: &str) -> Category {
    let lower = diagram.to_lowercase();
    TIERS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| lower.contains(keyword)))
        .map_or(Category::Architecture, |(category, _)| *category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_vocabulary_selects_business() {
        assert_eq!(classify("trip booking passenger flow"), Category::Business);
    }

    #[test]
    fn test_payment_outranks_business() {
        let text = "flowchart LR\n    A[\"Driver\"] --> B[\"Trip Payment\"]";
        assert_eq!(classify(text), Category::Payment);
    }

    #[test]
    fn test_plain_diagram_defaults_to_architecture() {
        let text = "flowchart TD\n    A[\"API\"] --> B[\"Cache\"]";
        assert_eq!(classify(text), Category::Architecture);
    }

    #[test]
    fn test_detection_is_case_insensitive() {
        assert_eq!(classify("REVENUE REPORT"), Category::Payment);
        assert_eq!(classify("Journey Map"), Category::Business);
    }

    #[test]
    fn test_keywords_match_inside_words() {
        // "processing" contains "process"
        assert_eq!(classify("Processing pipeline"), Category::Business);
    }

    #[test]
    fn test_empty_text_is_architecture() {
        assert_eq!(classify(""), Category::Architecture);
    }

    #[test]
    fn test_parse_round_trips_identifiers() {
        for category in Category::ALL {
            assert_eq!(Category::parse(category.as_str()), Some(category));
        }
        assert_eq!(Category::parse("finance"), None);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn payment_keyword_always_wins(
                prefix in "[a-z ]{0,40}",
                suffix in "[a-z ]{0,40}",
                keyword_index in 0..6usize,
                other_index in 0..6usize,
            ) {
                let payment = TIERS[0].1[keyword_index];
                let business = TIERS[1].1[other_index];
                let text = format!("{prefix} {business} {payment} {suffix}");
                prop_assert_eq!(classify(&text), Category::Payment);
            }
        }
    }
}
