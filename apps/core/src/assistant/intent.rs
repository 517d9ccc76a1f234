//! Intent classification using ordered keyword rules.
//!
//! Each rule owns a small set of ASCII keywords. The utterance is lower-cased
//! and tested against the rules in a fixed order; the first rule with a
//! substring hit wins. No scoring, no longest-match preference.

use super::responses::ResponseTable;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Canned response category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// How to submit a complaint
    SubmitHelp,
    /// How to track an existing complaint
    TrackHelp,
    /// What the complaint stages mean
    StatusExplain,
    /// Phone numbers and email
    Contact,
    /// Which department handles what
    Departments,
    /// Priority levels and response windows
    Priority,
    /// Fallback when nothing matched
    Default,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Category {
    pub const COUNT: usize = 7;

    /// All categories in evaluation order, `Default` last.
    pub const ALL: [Category; Category::COUNT] = [
        Category::SubmitHelp,
        Category::TrackHelp,
        Category::StatusExplain,
        Category::Contact,
        Category::Departments,
        Category::Priority,
        Category::Default,
    ];

    /// Returns the snake_case label used in logs and override files
    pub fn label(&self) -> &'static str {
        match self {
            Category::SubmitHelp => "submit_help",
            Category::TrackHelp => "track_help",
            Category::StatusExplain => "status_explain",
            Category::Contact => "contact",
            Category::Departments => "departments",
            Category::Priority => "priority",
            Category::Default => "default",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Result of classifying one utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Selected category
    pub category: Category,
    /// Keyword that selected it; `None` for the fallback
    pub matched_keyword: Option<&'static str>,
}

/// Keyword set for one category
struct KeywordRule {
    category: Category,
    keywords: &'static [&'static str],
}

// "status" appears in both TrackHelp and StatusExplain. TrackHelp is evaluated
// first, so "status" can never select StatusExplain; only "stages" reaches it.
// The overlap is kept as-is and reported by `shadowed_keywords`.
static RULES: &[KeywordRule] = &[
    KeywordRule {
        category: Category::SubmitHelp,
        keywords: &["submit", "file", "report"],
    },
    KeywordRule {
        category: Category::TrackHelp,
        keywords: &["track", "status", "progress"],
    },
    KeywordRule {
        category: Category::StatusExplain,
        keywords: &["status", "stages"],
    },
    KeywordRule {
        category: Category::Contact,
        keywords: &["contact", "phone", "email"],
    },
    KeywordRule {
        category: Category::Departments,
        keywords: &["department", "who handles"],
    },
    KeywordRule {
        category: Category::Priority,
        keywords: &["priority", "urgent", "emergency"],
    },
];

/// Rule-based classifier bound to a response table
#[derive(Debug, Clone, Default)]
pub struct IntentClassifier {
    responses: ResponseTable,
}

impl IntentClassifier {
    /// Create a classifier answering from `responses`
    pub fn new(responses: ResponseTable) -> Self {
        let classifier = Self { responses };
        for (category, keyword) in classifier.shadowed_keywords() {
            debug!(
                category = %category,
                keyword,
                "Keyword is claimed by an earlier rule and never selects its category"
            );
        }
        classifier
    }

    /// Pick the category for an utterance. Never fails: no hit means `Default`.
    pub fn classify(&self, utterance: &str) -> Classification {
        let lowered = utterance.to_ascii_lowercase();

        RULES
            .iter()
            .find_map(|rule| {
                rule.keywords
                    .iter()
                    .find(|keyword| lowered.contains(*keyword))
                    .map(|keyword| Classification {
                        category: rule.category,
                        matched_keyword: Some(*keyword),
                    })
            })
            .unwrap_or(Classification {
                category: Category::Default,
                matched_keyword: None,
            })
    }

    /// Canned response for an utterance.
    pub fn respond(&self, utterance: &str) -> &str {
        let classification = self.classify(utterance);
        debug!(
            category = %classification.category,
            keyword = ?classification.matched_keyword,
            "Classified utterance"
        );
        self.responses.get(classification.category)
    }

    /// The table this classifier answers from.
    pub fn responses(&self) -> &ResponseTable {
        &self.responses
    }

    /// Keywords that can never select their own category.
    ///
    /// A keyword is shadowed when an earlier rule owns a keyword it contains:
    /// any utterance containing it already hits the earlier rule.
    pub fn shadowed_keywords(&self) -> Vec<(Category, &'static str)> {
        let mut shadowed = Vec::new();
        for (position, rule) in RULES.iter().enumerate() {
            for keyword in rule.keywords {
                let claimed = RULES[..position]
                    .iter()
                    .flat_map(|earlier| earlier.keywords.iter())
                    .any(|earlier| keyword.contains(earlier));
                if claimed {
                    shadowed.push((rule.category, *keyword));
                }
            }
        }
        shadowed
    }
}
