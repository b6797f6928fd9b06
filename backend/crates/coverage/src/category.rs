use std::fmt;

use serde::{Deserialize, Serialize};

/// Test-coverage categories. The tag of each variant is exactly the Jira label
/// that marks an issue as covered that way.
///
/// `NoLabel` is synthetic: it is assigned when an issue carries none of the
/// other four labels and is never matched against a label string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CoverageCategory {
    Junit,
    Tuj,
    ManualCase,
    NoCaseNeeded,
    NoLabel,
}

/// Categories that can be matched from a label.
pub const RECOGNIZED: [CoverageCategory; 4] = [
    CoverageCategory::Junit,
    CoverageCategory::Tuj,
    CoverageCategory::ManualCase,
    CoverageCategory::NoCaseNeeded,
];

impl CoverageCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Junit => "Junit",
            Self::Tuj => "Tuj",
            Self::ManualCase => "ManualCase",
            Self::NoCaseNeeded => "NoCaseNeeded",
            Self::NoLabel => "NoLabel",
        }
    }

    /// Exact, case-sensitive lookup of a label among the recognized tags.
    pub fn from_label(label: &str) -> Option<Self> {
        RECOGNIZED.into_iter().find(|c| c.as_str() == label)
    }
}

impl fmt::Display for CoverageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
