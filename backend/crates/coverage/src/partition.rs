use std::collections::BTreeSet;

use serde::Serialize;

use crate::category::CoverageCategory;
use crate::model::SprintCoverageResult;

/// Mutually exclusive wedge of the coverage chart.
///
/// Variants are declared in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Bucket {
    NoLabel,
    NoCaseNeeded,
    JunitOnly,
    TujOnly,
    ManualCaseOnly,
    JunitTuj,
    JunitManualCase,
    TujManualCase,
    All,
}

impl Bucket {
    pub const ORDER: [Bucket; 9] = [
        Bucket::NoLabel,
        Bucket::NoCaseNeeded,
        Bucket::JunitOnly,
        Bucket::TujOnly,
        Bucket::ManualCaseOnly,
        Bucket::JunitTuj,
        Bucket::JunitManualCase,
        Bucket::TujManualCase,
        Bucket::All,
    ];

    /// Categories named in the wedge label.
    pub fn categories(&self) -> &'static [CoverageCategory] {
        use CoverageCategory::*;
        match self {
            Self::NoLabel => &[NoLabel],
            Self::NoCaseNeeded => &[NoCaseNeeded],
            Self::JunitOnly => &[Junit],
            Self::TujOnly => &[Tuj],
            Self::ManualCaseOnly => &[ManualCase],
            Self::JunitTuj => &[Junit, Tuj],
            Self::JunitManualCase => &[Junit, ManualCase],
            Self::TujManualCase => &[Tuj, ManualCase],
            Self::All => &[Junit, Tuj, ManualCase],
        }
    }

    /// Wedge label, e.g. `Junit+Tuj(3)`.
    pub fn label(&self, count: usize) -> String {
        let names: Vec<&str> = self.categories().iter().map(|c| c.as_str()).collect();
        format!("{}({count})", names.join("+"))
    }

    /// Issue keys falling in this bucket.
    ///
    /// `NoLabel` and `NoCaseNeeded` are taken as-is; the other seven are the
    /// inclusion-exclusion partition of the Junit / Tuj / ManualCase sets.
    pub fn members(&self, result: &SprintCoverageResult) -> BTreeSet<String> {
        let j = result.issues_in(CoverageCategory::Junit);
        let t = result.issues_in(CoverageCategory::Tuj);
        let m = result.issues_in(CoverageCategory::ManualCase);

        // keys in `a` and `b` (when given) but in none of `without`
        let select = |a: &BTreeSet<String>,
                      b: Option<&BTreeSet<String>>,
                      without: &[&BTreeSet<String>]| {
            a.iter()
                .filter(|k| b.map_or(true, |b| b.contains(*k)))
                .filter(|k| without.iter().all(|w| !w.contains(*k)))
                .cloned()
                .collect::<BTreeSet<String>>()
        };

        match self {
            Self::NoLabel => result.issues_in(CoverageCategory::NoLabel).clone(),
            Self::NoCaseNeeded => result.issues_in(CoverageCategory::NoCaseNeeded).clone(),
            Self::JunitOnly => select(j, None, &[t, m]),
            Self::TujOnly => select(t, None, &[j, m]),
            Self::ManualCaseOnly => select(m, None, &[j, t]),
            Self::JunitTuj => select(j, Some(t), &[m]),
            Self::JunitManualCase => select(j, Some(m), &[t]),
            Self::TujManualCase => select(t, Some(m), &[j]),
            Self::All => select(j, Some(t), &[])
                .into_iter()
                .filter(|k| m.contains(k))
                .collect(),
        }
    }
}

/// One emitted wedge: bucket, display label, issue count and share of the sprint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartEntry {
    pub bucket: Bucket,
    pub label: String,
    pub count: usize,
    pub ratio: f64,
}

/// All nine buckets in emission order, empty ones included.
pub fn buckets(result: &SprintCoverageResult) -> Vec<(Bucket, BTreeSet<String>)> {
    Bucket::ORDER
        .iter()
        .map(|bucket| (*bucket, bucket.members(result)))
        .collect()
}

/// Chart-ready wedges for a sprint.
///
/// Empty when the sprint has no issues. Empty buckets are dropped, never
/// emitted as zero-width wedges.
pub fn partition(result: &SprintCoverageResult) -> Vec<ChartEntry> {
    let total = result.total();
    if total == 0 {
        return Vec::new();
    }

    buckets(result)
        .into_iter()
        .filter(|(_, keys)| !keys.is_empty())
        .map(|(bucket, keys)| {
            let count = keys.len();
            ChartEntry {
                bucket,
                label: bucket.label(count),
                count,
                ratio: count as f64 / total as f64,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::model::{Issue, SprintInfo};

    fn sprint() -> SprintInfo {
        SprintInfo {
            id: 12,
            name: "Sprint 12".to_string(),
            start_date: None,
            end_date: None,
        }
    }

    fn keys(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    /// One issue per combination of the three overlapping labels, plus an
    /// unlabelled one and a NoCaseNeeded one.
    fn every_combination() -> Vec<Issue> {
        vec![
            Issue::new("NL", Vec::<String>::new()),
            Issue::new("NC", ["NoCaseNeeded"]),
            Issue::new("J", ["Junit"]),
            Issue::new("T", ["Tuj"]),
            Issue::new("M", ["ManualCase"]),
            Issue::new("JT", ["Junit", "Tuj"]),
            Issue::new("JM", ["ManualCase", "Junit"]),
            Issue::new("TM", ["Tuj", "ManualCase"]),
            Issue::new("JTM", ["Tuj", "Junit", "ManualCase"]),
        ]
    }

    #[test]
    fn scenario_three_issues() {
        let issues = vec![
            Issue::new("A", ["Junit"]),
            Issue::new("B", ["Tuj", "Junit"]),
            Issue::new("C", Vec::<String>::new()),
        ];
        let entries = partition(&classify(sprint(), &issues));

        let buckets: Vec<Bucket> = entries.iter().map(|e| e.bucket).collect();
        assert_eq!(buckets, vec![Bucket::NoLabel, Bucket::JunitOnly, Bucket::JunitTuj]);

        let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["NoLabel(1)", "Junit(1)", "Junit+Tuj(1)"]);

        for entry in &entries {
            assert!((entry.ratio - 1.0 / 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn empty_sprint_emits_nothing() {
        let entries = partition(&classify(sprint(), &[]));
        assert!(entries.is_empty());
    }

    #[test]
    fn buckets_follow_inclusion_exclusion() {
        let result = classify(sprint(), &every_combination());
        let all = buckets(&result);

        let expected = [
            (Bucket::NoLabel, "NL"),
            (Bucket::NoCaseNeeded, "NC"),
            (Bucket::JunitOnly, "J"),
            (Bucket::TujOnly, "T"),
            (Bucket::ManualCaseOnly, "M"),
            (Bucket::JunitTuj, "JT"),
            (Bucket::JunitManualCase, "JM"),
            (Bucket::TujManualCase, "TM"),
            (Bucket::All, "JTM"),
        ];
        assert_eq!(all.len(), expected.len());
        for ((bucket, set), (want_bucket, want_key)) in all.iter().zip(expected) {
            assert_eq!(*bucket, want_bucket);
            assert_eq!(set, &keys(&[want_key]), "bucket {bucket:?}");
        }
    }

    #[test]
    fn buckets_follow_declared_order() {
        let result = classify(sprint(), &every_combination());
        let order: Vec<Bucket> = buckets(&result).into_iter().map(|(b, _)| b).collect();
        assert_eq!(order, Bucket::ORDER.to_vec());
    }

    #[test]
    fn members_of_empty_sprint_are_empty() {
        let result = classify(sprint(), &[]);
        for bucket in Bucket::ORDER {
            assert!(bucket.members(&result).is_empty(), "{bucket:?}");
        }
    }

    #[test]
    fn buckets_are_disjoint_and_cover_every_issue() {
        let result = classify(sprint(), &every_combination());
        let all = buckets(&result);

        let mut seen = BTreeSet::new();
        for (bucket, set) in &all {
            for key in set {
                assert!(seen.insert(key.clone()), "{key} appears twice (in {bucket:?})");
            }
        }
        assert_eq!(&seen, result.issue_keys());
    }

    #[test]
    fn ratios_sum_to_one() {
        let result = classify(sprint(), &every_combination());
        let entries = partition(&result);
        assert_eq!(entries.len(), 9);
        let sum: f64 = entries.iter().map(|e| e.ratio).sum();
        assert!((sum - 1.0).abs() < 1e-9, "sum was {sum}");
    }

    #[test]
    fn emission_order_is_fixed() {
        let entries = partition(&classify(sprint(), &every_combination()));
        let order: Vec<Bucket> = entries.iter().map(|e| e.bucket).collect();
        assert_eq!(order, Bucket::ORDER.to_vec());
    }

    #[test]
    fn zero_buckets_are_omitted() {
        let issues = vec![
            Issue::new("A", ["Tuj", "ManualCase"]),
            Issue::new("B", ["Tuj", "ManualCase"]),
            Issue::new("C", ["Tuj"]),
        ];
        let entries = partition(&classify(sprint(), &issues));
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].bucket, Bucket::TujOnly);
        assert_eq!(entries[0].label, "Tuj(1)");
        assert_eq!(entries[1].bucket, Bucket::TujManualCase);
        assert_eq!(entries[1].label, "Tuj+ManualCase(2)");
        assert_eq!(entries[1].count, 2);
        assert!((entries[1].ratio - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn all_three_label() {
        assert_eq!(Bucket::All.label(4), "Junit+Tuj+ManualCase(4)");
        assert_eq!(Bucket::JunitManualCase.label(1), "Junit+ManualCase(1)");
    }

    #[test]
    fn random_tag_only_matches_unlabelled() {
        let tagged = partition(&classify(sprint(), &[Issue::new("X", ["RandomTag"])]));
        let bare = partition(&classify(sprint(), &[Issue::new("X", Vec::<String>::new())]));
        assert_eq!(tagged, bare);
        assert_eq!(tagged[0].bucket, Bucket::NoLabel);
        assert!((tagged[0].ratio - 1.0).abs() < 1e-12);
    }

    /// NoCaseNeeded is taken as-is, so an issue that also carries a test label
    /// is counted in two wedges.
    #[test]
    fn no_case_needed_overlap_is_counted_twice() {
        let issues = vec![
            Issue::new("A", ["NoCaseNeeded", "Junit"]),
            Issue::new("B", ["Junit"]),
        ];
        let entries = partition(&classify(sprint(), &issues));
        let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["NoCaseNeeded(1)", "Junit(2)"]);
        let sum: f64 = entries.iter().map(|e| e.ratio).sum();
        assert!((sum - 1.5).abs() < 1e-12);
    }
}
