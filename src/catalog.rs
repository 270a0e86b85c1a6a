//! Catalog records and the pure derivations over them: the level
//! vocabulary and the combined name/level filter.

use serde::{Deserialize, Serialize};

use crate::{LEVEL_ORDER, UNKNOWN_LEVEL_RANK};

/// One creature record as served by the catalog API.
///
/// Immutable once decoded; the whole catalog is replaced on every
/// successful load, never patched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Digimon {
    pub name: String,
    #[serde(rename = "img")]
    pub image_url: String,
    pub level: String,
}

/// Transient filter state owned by the UI; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub search_text: String,
    /// `None` (or an empty string, which normalizes to `None` at the event
    /// boundary) means "all levels".
    pub level: Option<String>,
}

impl FilterCriteria {
    /// Both predicates must hold: case-insensitive substring containment of
    /// the trimmed search text, and exact (case-sensitive) level equality
    /// when a level is selected.
    #[must_use]
    pub fn matches(&self, entry: &Digimon) -> bool {
        let needle = self.search_text.trim().to_lowercase();
        let matches_name = needle.is_empty() || entry.name.to_lowercase().contains(&needle);

        let matches_level = match self.level.as_deref() {
            None | Some("") => true,
            Some(level) => entry.level == level,
        };

        matches_name && matches_level
    }
}

#[must_use]
pub fn canonical_rank(level: &str) -> usize {
    LEVEL_ORDER
        .iter()
        .position(|known| *known == level)
        .unwrap_or(UNKNOWN_LEVEL_RANK)
}

/// Distinct levels present in the catalog, ordered by canonical rank.
///
/// Unknown levels all share [`UNKNOWN_LEVEL_RANK`] and keep their first-seen
/// order relative to each other (the sort is stable), which is this crate's
/// documented tie-break.
#[must_use]
pub fn level_vocabulary(catalog: &[Digimon]) -> Vec<String> {
    let mut levels: Vec<String> = Vec::new();
    for entry in catalog {
        if !levels.iter().any(|level| level == &entry.level) {
            levels.push(entry.level.clone());
        }
    }
    levels.sort_by_key(|level| canonical_rank(level));
    levels
}

/// Order-preserving subsequence of `catalog` matching `criteria`.
#[must_use]
pub fn filter_catalog<'a>(catalog: &'a [Digimon], criteria: &FilterCriteria) -> Vec<&'a Digimon> {
    catalog.iter().filter(|entry| criteria.matches(entry)).collect()
}

/// Short blurb describing an evolution level in the detail view.
#[must_use]
pub fn level_description(level: &str) -> &'static str {
    match level {
        "Fresh" => {
            "The earliest stage of Digimon evolution. These Digimon are newly born and very weak."
        }
        "In Training" => {
            "Young Digimon that have evolved from Fresh level. Still developing their abilities."
        }
        "Training" => "Young Digimon in their training phase, developing basic combat skills.",
        "Rookie" => "Fully developed young Digimon. This is often the first battle-ready form.",
        "Champion" => "Adult-level Digimon with developed combat abilities and stronger attacks.",
        "Ultimate" => "Powerful Digimon that have achieved a high level of evolution.",
        "Mega" => "The highest natural evolution level. These Digimon possess immense power.",
        "Armor" => {
            "Special Digimon that evolved using Digi-Eggs, gaining unique armor and abilities."
        }
        _ => "A powerful Digital Monster from the Digital World.",
    }
}
