//! List-view derivations over a fetched record set.
//!
//! Both the filtered view and the type index are recomputed from the full set
//! on every call. Neither keeps state between calls.

use schema::CatalogRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The user's current list-view inputs. Empty strings mean "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFilter {
    /// Exact, case-sensitive type label (values come from `type_index`)
    #[serde(default)]
    pub type_label: String,
    /// Free text matched against every localized name
    #[serde(default)]
    pub search: String,
}

impl CatalogFilter {
    pub fn new(type_label: impl Into<String>, search: impl Into<String>) -> Self {
        Self {
            type_label: type_label.into(),
            search: search.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.type_label.is_empty() && self.search.is_empty()
    }

    /// Whether a single record passes every active criterion.
    ///
    /// To test many records, build the predicate once with `matcher`.
    pub fn matches(&self, record: &CatalogRecord) -> bool {
        self.matcher()(record)
    }

    /// The filter as a reusable predicate; the search term is lowercased once.
    ///
    /// Placeholder entries (`id == 0`) never pass.
    pub fn matcher(&self) -> impl Fn(&CatalogRecord) -> bool + '_ {
        let needle = self.search.to_lowercase();
        move |record: &CatalogRecord| {
            !record.is_placeholder()
                && (self.type_label.is_empty() || record.has_type(&self.type_label))
                && (needle.is_empty()
                    || record
                        .names
                        .iter()
                        .any(|name| name.to_lowercase().contains(&needle)))
        }
    }
}

/// Returns the records that pass `filter`, in fetch order.
///
/// An empty result is a normal outcome, not an error.
pub fn filter_records<'a>(
    records: &'a [CatalogRecord],
    filter: &CatalogFilter,
) -> Vec<&'a CatalogRecord> {
    let matches = filter.matcher();
    records.iter().filter(|&record| matches(record)).collect()
}

/// Distinct type labels across `records`, in first-seen order.
pub fn type_index(records: &[CatalogRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .flat_map(|record| record.types.iter())
        .filter(|&tag| seen.insert(tag.label.as_str()))
        .map(|tag| tag.label.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::common::RecordBuilder;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn records() -> Vec<CatalogRecord> {
        vec![
            RecordBuilder::new(0, "MissingNo.").build(),
            RecordBuilder::new(1, "Bulbizarre")
                .with_english("Bulbasaur")
                .with_types(&["Plante", "Poison"])
                .build(),
            RecordBuilder::new(4, "Salamèche")
                .with_english("Charmander")
                .with_types(&["Feu"])
                .build(),
            RecordBuilder::new(6, "Dracaufeu")
                .with_english("Charizard")
                .with_types(&["Feu", "Vol"])
                .build(),
            RecordBuilder::new(25, "Pikachu")
                .with_japanese("ピカチュウ")
                .with_types(&["Électrik"])
                .build(),
        ]
    }

    fn ids(records: &[&CatalogRecord]) -> Vec<u32> {
        records.iter().map(|r| r.id).collect()
    }

    #[rstest]
    #[case::no_filter("", "", vec![1, 4, 6, 25])]
    #[case::type_exact("Feu", "", vec![4, 6])]
    #[case::type_is_case_sensitive("feu", "", vec![])]
    #[case::search_lower("", "pika", vec![25])]
    #[case::search_upper("", "PIKA", vec![25])]
    #[case::search_accented("", "SALAMÈ", vec![4])]
    #[case::search_english("", "charizard", vec![6])]
    #[case::search_japanese("", "ピカ", vec![25])]
    #[case::type_and_search("Feu", "char", vec![4, 6])]
    #[case::type_and_search_disjoint("Vol", "charmander", vec![])]
    #[case::placeholder_by_name("", "missing", vec![])]
    #[case::no_match("", "zzz", vec![])]
    fn test_filter_records(
        records: Vec<CatalogRecord>,
        #[case] type_label: &str,
        #[case] search: &str,
        #[case] expected: Vec<u32>,
    ) {
        let result = filter_records(&records, &CatalogFilter::new(type_label, search));
        assert_eq!(ids(&result), expected);
    }

    #[rstest]
    #[case("Feu", "dra")]
    #[case("Plante", "")]
    #[case("", "a")]
    fn test_results_satisfy_each_criterion(
        records: Vec<CatalogRecord>,
        #[case] type_label: &str,
        #[case] search: &str,
    ) {
        let filter = CatalogFilter::new(type_label, search);
        let result = filter_records(&records, &filter);
        assert!(!result.is_empty());

        for record in result {
            assert!(!record.is_placeholder());
            assert!(type_label.is_empty() || record.has_type(type_label));
            assert!(record
                .names
                .iter()
                .any(|n| n.to_lowercase().contains(&search.to_lowercase())));
        }
    }

    #[rstest]
    fn test_matches_agrees_with_filter_records(records: Vec<CatalogRecord>) {
        for filter in [
            CatalogFilter::default(),
            CatalogFilter::new("Feu", ""),
            CatalogFilter::new("Feu", "SALA"),
            CatalogFilter::new("", "missing"),
        ] {
            let by_record: Vec<u32> = records
                .iter()
                .filter(|&r| filter.matches(r))
                .map(|r| r.id)
                .collect();
            assert_eq!(by_record, ids(&filter_records(&records, &filter)));
        }
    }

    #[rstest]
    fn test_type_index_first_seen_without_duplicates(records: Vec<CatalogRecord>) {
        assert_eq!(type_index(&records), vec!["Plante", "Poison", "Feu", "Vol", "Électrik"]);
        assert!(type_index(&[]).is_empty());
    }
}
