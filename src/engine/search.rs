//! Three-field substring search with match-aware ranking
//!
//! Each cat is tested against the query on its name, breed and description,
//! in that order, and tagged with the first field that contains the query.
//! The tag lives on the per-request [`Ranked`] wrapper and never touches the
//! shared record.
//!
//! Ordering follows a fixed pairwise table:
//!
//! | left        | right       | decided by              |
//! |-------------|-------------|-------------------------|
//! | name        | name        | names                   |
//! | description | description | names                   |
//! | breed       | breed       | breeds                  |
//! | name        | other       | left first              |
//! | other       | name        | right first             |
//! | breed/desc  | desc/breed  | breeds                  |
//!
//! Mixed breed/description pairs compare on breed while description pairs
//! compare on name, so the table is not a total order. Results are sorted with
//! a stable insertion sort, which stays deterministic for any comparator. When
//! breed and description hits interleave, their relative order depends on the
//! sorting algorithm; other sorts can order the same hits differently.
//!
//! Strings are ordered by the Unicode root collation at tertiary strength.

use crate::catalog::Cat;
use icu_collator::{Collator, CollatorOptions};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

thread_local! {
    static COLLATOR: Option<Collator> =
        Collator::try_new(&Default::default(), CollatorOptions::new())
            .map_err(|e| tracing::warn!("Root collator unavailable, using case-folded order: {}", e))
            .ok();
}

/// Which field of a cat satisfied the query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchField {
    Name,
    Breed,
    Description,
}

impl MatchField {
    /// Fields in the order they are tested
    pub const PRIORITY: [MatchField; 3] =
        [MatchField::Name, MatchField::Breed, MatchField::Description];

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchField::Name => "name",
            MatchField::Breed => "breed",
            MatchField::Description => "description",
        }
    }

    fn value_of<'a>(&self, cat: &'a Cat) -> &'a str {
        match self {
            MatchField::Name => &cat.name,
            MatchField::Breed => &cat.breed,
            MatchField::Description => &cat.description,
        }
    }
}

impl fmt::Display for MatchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A search hit: the shared record plus the field that matched
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ranked<'a> {
    pub cat: &'a Cat,
    pub match_by: Option<MatchField>,
}

/// Treat an empty query the same as a missing one
pub fn normalize_query(query: Option<&str>) -> Option<&str> {
    query.filter(|q| !q.is_empty())
}

/// First field, in priority order, that contains `query` case-insensitively
pub fn match_field(cat: &Cat, query: &str) -> Option<MatchField> {
    let needle = query.to_lowercase();
    match_field_lowered(cat, &needle)
}

fn match_field_lowered(cat: &Cat, needle: &str) -> Option<MatchField> {
    MatchField::PRIORITY
        .into_iter()
        .find(|field| field.value_of(cat).to_lowercase().contains(needle))
}

/// Filter `records` by `query` and order the hits
///
/// Without a query every record is returned, in store order, untagged.
pub fn search_and_rank<'a>(records: &'a [Cat], query: Option<&str>) -> Vec<Ranked<'a>> {
    let Some(query) = normalize_query(query) else {
        return records
            .iter()
            .map(|cat| Ranked {
                cat,
                match_by: None,
            })
            .collect();
    };

    let needle = query.to_lowercase();
    let mut hits: Vec<Ranked<'a>> = records
        .iter()
        .filter_map(|cat| {
            match_field_lowered(cat, &needle).map(|field| Ranked {
                cat,
                match_by: Some(field),
            })
        })
        .collect();

    insertion_sort_by(&mut hits, compare_ranked);

    tracing::debug!(query, hits = hits.len(), "search ranked");
    hits
}

/// Pairwise ranking rule, see the module docs for the table
pub fn compare_ranked(a: &Ranked<'_>, b: &Ranked<'_>) -> Ordering {
    use MatchField::*;

    let (Some(left), Some(right)) = (a.match_by, b.match_by) else {
        return Ordering::Equal;
    };

    match (left, right) {
        (Name, Name) | (Description, Description) => locale_compare(&a.cat.name, &b.cat.name),
        (Breed, Breed) => locale_compare(&a.cat.breed, &b.cat.breed),
        (Name, _) => Ordering::Less,
        (_, Name) => Ordering::Greater,
        _ => locale_compare(&a.cat.breed, &b.cat.breed),
    }
}

/// Human-oriented string order
///
/// Accents and case only break ties between otherwise equal letters, so
/// `"Éclair" < "Felix"` and `"a" < "A" < "b"`. Punctuation sorts before
/// letters.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    COLLATOR.with(|collator| match collator {
        Some(collator) => collator.compare(a, b),
        None => case_folded_compare(a, b),
    })
}

fn case_folded_compare(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| b.cmp(a))
}

/// Stable insertion sort that tolerates comparators without a total order
fn insertion_sort_by<T, F>(items: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && compare(&items[j - 1], &items[j]) == Ordering::Greater {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}
