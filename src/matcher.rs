// Staged fuzzy matching of a hotel name against the table's identity
// columns. Pure lookup, no side effects.
use crate::table::{Table, IDENTITY_COLUMNS};

// One tier of the fallback chain. Each stage is only consulted when every
// earlier stage produced zero matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStage {
    Exact,
    CaseInsensitive,
    Substring,
}

impl MatchStage {
    const FALLBACK_CHAIN: [MatchStage; 3] =
        [Self::Exact, Self::CaseInsensitive, Self::Substring];

    fn matches(self, candidate: &str, target: &str) -> bool {
        let candidate = candidate.trim();
        match self {
            Self::Exact => candidate == target,
            Self::CaseInsensitive => candidate.to_lowercase() == target.to_lowercase(),
            Self::Substring => candidate
                .to_lowercase()
                .contains(&target.to_lowercase()),
        }
    }
}

/// Find the rows referring to `target_name`, in file order. Matches from
/// the `name` and `hotel_name` columns are unioned within a stage; the
/// first stage with any match wins and later stages are never consulted.
pub fn match_rows(table: &Table, target_name: &str) -> Vec<usize> {
    let target = target_name.trim();
    let identity_idx: Vec<usize> = IDENTITY_COLUMNS
        .iter()
        .filter_map(|column| table.column_index(column))
        .collect();

    for stage in MatchStage::FALLBACK_CHAIN {
        let matched: Vec<usize> = table
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| {
                identity_idx.iter().any(|&idx| {
                    row.value(idx)
                        .is_some_and(|value| stage.matches(value, target))
                })
            })
            .map(|(idx, _)| idx)
            .collect();
        if !matched.is_empty() {
            return matched;
        }
    }

    Vec::new()
}
