use report_core::KeywordGroup;
use std::collections::BTreeSet;

/// Distinct non-empty institutions across all groups (sorted).
pub fn institutions<'a, I>(groups: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a KeywordGroup>,
{
    groups
        .into_iter()
        .flat_map(|g| g.titles.iter())
        .map(|r| r.source_name.as_str())
        .filter(|s| !s.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Group keywords in order. Duplicates are kept; empty words are not.
pub fn keywords<'a, I>(groups: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a KeywordGroup>,
{
    groups
        .into_iter()
        .map(|g| g.word.as_str())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}
