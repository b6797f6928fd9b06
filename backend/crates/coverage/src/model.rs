use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::category::CoverageCategory;

static EMPTY: BTreeSet<String> = BTreeSet::new();

/// An issue as seen by the classifier: its key and raw label strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub key: String,
    pub labels: Vec<String>,
}

impl Issue {
    pub fn new<K, I, L>(key: K, labels: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        Self {
            key: key.into(),
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }
}

/// Sprint metadata. Dates are calendar days; future sprints may have none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SprintInfo {
    pub id: u64,
    pub name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Coverage of one sprint, before partitioning.
///
/// Category sets may overlap. Every key in a category set is also in
/// `issue_keys`, and only categories with at least one issue are stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SprintCoverageResult {
    sprint: SprintInfo,
    issue_keys: BTreeSet<String>,
    categories: BTreeMap<CoverageCategory, BTreeSet<String>>,
}

impl SprintCoverageResult {
    pub(crate) fn new(
        sprint: SprintInfo,
        issue_keys: BTreeSet<String>,
        categories: BTreeMap<CoverageCategory, BTreeSet<String>>,
    ) -> Self {
        Self {
            sprint,
            issue_keys,
            categories,
        }
    }

    pub fn sprint(&self) -> &SprintInfo {
        &self.sprint
    }

    pub fn issue_keys(&self) -> &BTreeSet<String> {
        &self.issue_keys
    }

    pub fn total(&self) -> usize {
        self.issue_keys.len()
    }

    /// Keys carrying `category`; empty when no issue does.
    pub fn issues_in(&self, category: CoverageCategory) -> &BTreeSet<String> {
        self.categories.get(&category).unwrap_or(&EMPTY)
    }

    pub fn categories(&self) -> &BTreeMap<CoverageCategory, BTreeSet<String>> {
        &self.categories
    }
}
