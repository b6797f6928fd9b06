use std::collections::{BTreeMap, BTreeSet};

use crate::category::CoverageCategory;
use crate::model::{Issue, SprintCoverageResult, SprintInfo};

/// Classify the issues of a sprint by coverage label.
///
/// Each recognized label adds the issue to that category; an issue with no
/// recognized label lands in `NoLabel` and nowhere else. Unrecognized labels
/// are ignored.
pub fn classify(sprint: SprintInfo, issues: &[Issue]) -> SprintCoverageResult {
    let mut issue_keys = BTreeSet::new();
    let mut categories: BTreeMap<CoverageCategory, BTreeSet<String>> = BTreeMap::new();

    for issue in issues {
        issue_keys.insert(issue.key.clone());

        let mut covered = false;
        for category in issue
            .labels
            .iter()
            .filter_map(|l| CoverageCategory::from_label(l))
        {
            covered = true;
            categories
                .entry(category)
                .or_default()
                .insert(issue.key.clone());
        }

        if !covered {
            categories
                .entry(CoverageCategory::NoLabel)
                .or_default()
                .insert(issue.key.clone());
        }
    }

    SprintCoverageResult::new(sprint, issue_keys, categories)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::RECOGNIZED;
    use CoverageCategory::*;

    fn sprint() -> SprintInfo {
        SprintInfo {
            id: 1,
            name: "Sprint 1".to_string(),
            start_date: None,
            end_date: None,
        }
    }

    fn keys(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn sample_issues() -> Vec<Issue> {
        vec![
            Issue::new("A", ["Junit"]),
            Issue::new("B", ["Tuj", "Junit"]),
            Issue::new("C", Vec::<String>::new()),
        ]
    }

    #[test]
    fn classifies_mixed_sprint() {
        let result = classify(sprint(), &sample_issues());

        assert_eq!(result.issue_keys(), &keys(&["A", "B", "C"]));
        assert_eq!(result.issues_in(Junit), &keys(&["A", "B"]));
        assert_eq!(result.issues_in(Tuj), &keys(&["B"]));
        assert_eq!(result.issues_in(NoLabel), &keys(&["C"]));
        assert!(result.issues_in(ManualCase).is_empty());
        assert!(result.issues_in(NoCaseNeeded).is_empty());
    }

    #[test]
    fn empty_sprint_has_no_categories() {
        let result = classify(sprint(), &[]);
        assert_eq!(result.total(), 0);
        assert!(result.categories().is_empty());
    }

    #[test]
    fn unrecognized_label_counts_as_no_label() {
        let result = classify(sprint(), &[Issue::new("X", ["RandomTag"])]);
        assert_eq!(result.issues_in(NoLabel), &keys(&["X"]));
        assert_eq!(result.categories().len(), 1);
    }

    #[test]
    fn unrecognized_labels_do_not_block_recognized_ones() {
        let result = classify(sprint(), &[Issue::new("X", ["backend", "ManualCase", "p1"])]);
        assert_eq!(result.issues_in(ManualCase), &keys(&["X"]));
        assert!(result.issues_in(NoLabel).is_empty());
    }

    #[test]
    fn literal_no_label_tag_is_not_recognized() {
        let result = classify(sprint(), &[Issue::new("X", ["NoLabel", "Junit"])]);
        assert_eq!(result.issues_in(Junit), &keys(&["X"]));
        assert!(result.issues_in(NoLabel).is_empty());
    }

    #[test]
    fn duplicate_keys_and_labels_collapse() {
        let issues = vec![
            Issue::new("A", ["Junit", "Junit"]),
            Issue::new("A", ["Junit"]),
        ];
        let result = classify(sprint(), &issues);
        assert_eq!(result.total(), 1);
        assert_eq!(result.issues_in(Junit).len(), 1);
    }

    #[test]
    fn every_categorised_key_is_in_the_full_set() {
        let issues = vec![
            Issue::new("A", ["Junit", "NoCaseNeeded"]),
            Issue::new("B", ["Tuj", "ManualCase"]),
            Issue::new("C", ["docs"]),
            Issue::new("D", Vec::<String>::new()),
        ];
        let result = classify(sprint(), &issues);

        let union: BTreeSet<String> = result.categories().values().flatten().cloned().collect();
        assert_eq!(&union, result.issue_keys());
    }

    #[test]
    fn no_label_iff_no_recognized_label() {
        let issues = vec![
            Issue::new("A", ["Junit"]),
            Issue::new("B", ["tuj"]),
            Issue::new("C", ["NoCaseNeeded"]),
            Issue::new("D", ["misc", "other"]),
        ];
        let result = classify(sprint(), &issues);

        for issue in &issues {
            let has_recognized = issue
                .labels
                .iter()
                .any(|l| RECOGNIZED.iter().any(|c| c.as_str() == l.as_str()));
            assert_eq!(
                result.issues_in(NoLabel).contains(&issue.key),
                !has_recognized,
                "issue {}",
                issue.key
            );
        }
    }

    #[test]
    fn classification_is_idempotent() {
        let issues = sample_issues();
        assert_eq!(classify(sprint(), &issues), classify(sprint(), &issues));
    }

    #[test]
    fn keeps_sprint_metadata() {
        let result = classify(sprint(), &sample_issues());
        assert_eq!(result.sprint().id, 1);
        assert_eq!(result.sprint().name, "Sprint 1");
    }
}
