//! Release classification of changesets

use changekit_core::BumpType;
use serde::Serialize;

use crate::types::ChangesetRecord;

/// Changesets partitioned into release-notes categories.
///
/// Each bucket keeps the input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Categories<'a> {
    /// Breaking changes, whatever their type
    pub breaking: Vec<&'a ChangesetRecord>,
    /// Non-breaking features
    pub features: Vec<&'a ChangesetRecord>,
    /// Non-breaking fixes
    pub fixes: Vec<&'a ChangesetRecord>,
    /// Everything else
    pub other: Vec<&'a ChangesetRecord>,
}

impl Categories<'_> {
    /// Total number of categorized records
    pub fn len(&self) -> usize {
        self.breaking.len() + self.features.len() + self.fixes.len() + self.other.len()
    }

    /// Check if no record was categorized
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Per-category counts
    pub fn summary(&self) -> CategorySummary {
        CategorySummary {
            breaking: self.breaking.len(),
            features: self.features.len(),
            fixes: self.fixes.len(),
            other: self.other.len(),
        }
    }
}

/// Number of changesets in each category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub breaking: usize,
    pub features: usize,
    pub fixes: usize,
    pub other: usize,
}

/// Partition changesets into breaking changes, features, fixes and other
pub fn categorize(records: &[ChangesetRecord]) -> Categories<'_> {
    let mut categories = Categories::default();

    for record in records {
        if record.breaking {
            categories.breaking.push(record);
        } else if record.is_feature() {
            categories.features.push(record);
        } else if record.is_fix() {
            categories.fixes.push(record);
        } else {
            categories.other.push(record);
        }
    }

    categories
}

/// Recommend a version bump: major on any breaking change, minor on any
/// feature, patch otherwise
pub fn determine_bump(records: &[ChangesetRecord]) -> BumpType {
    if records.iter().any(|r| r.breaking) {
        BumpType::Major
    } else if records.iter().any(ChangesetRecord::is_feature) {
        BumpType::Minor
    } else {
        BumpType::Patch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChangeType;

    fn record(title: &str, pr: u64, author: &str) -> ChangesetRecord {
        ChangesetRecord::new(title, pr, author)
    }

    #[test]
    fn test_example_release() {
        let records = vec![
            record("feat: add widget", 10, "alice"),
            record("fix: crash", 11, "bob"),
        ];

        assert_eq!(determine_bump(&records), BumpType::Minor);

        let categories = categorize(&records);
        assert_eq!(categories.features.len(), 1);
        assert_eq!(categories.features[0].pr, 10);
        assert_eq!(categories.fixes.len(), 1);
        assert_eq!(categories.fixes[0].pr, 11);
        assert!(categories.breaking.is_empty());
        assert!(categories.other.is_empty());
    }

    #[test]
    fn test_breaking_dominates_type() {
        let records = vec![
            record("fix: crash", 1, "a").with_breaking(true),
            record("docs: readme", 2, "b").with_breaking(true),
            record("feat: widget", 3, "c").with_breaking(true),
        ];

        let categories = categorize(&records);
        assert_eq!(categories.breaking.len(), 3);
        assert!(categories.features.is_empty());
        assert!(categories.fixes.is_empty());
        assert_eq!(determine_bump(&records), BumpType::Major);
    }

    #[test]
    fn test_bump_is_monotone() {
        let mut records = vec![
            record("docs: readme", 1, "a"),
            record("chore: deps", 2, "b"),
        ];
        assert_eq!(determine_bump(&records), BumpType::Patch);

        records.push(record("feat: widget", 3, "c"));
        assert_eq!(determine_bump(&records), BumpType::Minor);

        records.insert(0, record("refactor!: layout", 4, "d"));
        assert_eq!(determine_bump(&records), BumpType::Major);

        records.reverse();
        assert_eq!(determine_bump(&records), BumpType::Major);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(determine_bump(&[]), BumpType::Patch);
        assert!(categorize(&[]).is_empty());
    }

    #[test]
    fn test_partition_is_total_and_stable() {
        let records = vec![
            record("chore: a", 1, "a"),
            record("fix: b", 2, "b"),
            record("perf: c", 3, "c"),
            record("fix: d", 4, "d"),
            record("Unprefixed", 5, "e").with_type(ChangeType::Custom("security".to_string())),
        ];

        let categories = categorize(&records);
        assert_eq!(categories.len(), records.len());

        let fixes: Vec<u64> = categories.fixes.iter().map(|r| r.pr).collect();
        assert_eq!(fixes, vec![2, 4]);
        let other: Vec<u64> = categories.other.iter().map(|r| r.pr).collect();
        assert_eq!(other, vec![1, 3, 5]);

        assert_eq!(
            categories.summary(),
            CategorySummary {
                breaking: 0,
                features: 0,
                fixes: 2,
                other: 3
            }
        );
    }

    #[test]
    fn test_classification_is_repeatable() {
        let records = vec![record("feat: a", 1, "a"), record("fix: b", 2, "b")];
        assert_eq!(categorize(&records), categorize(&records));
        assert_eq!(determine_bump(&records), determine_bump(&records));
    }
}
