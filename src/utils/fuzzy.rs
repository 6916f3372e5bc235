//! Subsequence-based fuzzy matching over documentation symbol names.

use regex::RegexBuilder;

/// Rank `entries` by how closely each symbol name matches `term`.
///
/// The term's characters are matched as an in-order subsequence, case
/// insensitively. Entries whose name does not contain the subsequence are
/// dropped entirely; the rest are ordered by match tightness (shorter match
/// first) and then by match position. Ties keep their original insertion
/// order. At most `limit` pairs are returned.
pub fn finder<'a>(
    term: &str,
    entries: &'a [(String, String)],
    limit: usize,
) -> Vec<(&'a str, &'a str)> {
    if term.is_empty() {
        return Vec::new();
    }

    let pattern = term
        .chars()
        .map(|c| regex::escape(&c.to_string()))
        .collect::<Vec<_>>()
        .join(".*?");

    let regex = match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(regex) => regex,
        // A term long enough to blow the compiled-size limit matches nothing.
        Err(_) => return Vec::new(),
    };

    let mut scored: Vec<(usize, usize, (&str, &str))> = entries
        .iter()
        .filter_map(|(name, url)| {
            regex
                .find(name)
                .map(|m| (m.len(), m.start(), (name.as_str(), url.as_str())))
        })
        .collect();

    // Stable sort keeps insertion order for fully tied entries.
    scored.sort_by_key(|(len, start, _)| (*len, *start));

    scored
        .into_iter()
        .take(limit)
        .map(|(_, _, pair)| pair)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn index() -> Vec<(String, String)> {
        vec![
            ("json.dumps".to_string(), "https://docs/json.dumps".to_string()),
            ("json.loads".to_string(), "https://docs/json.loads".to_string()),
            ("os.path".to_string(), "https://docs/os.path".to_string()),
        ]
    }

    #[test]
    fn exact_prefix_matches_rank_first() {
        let entries = index();
        let results = finder("json", &entries, 10);

        let names: Vec<_> = results.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["json.dumps", "json.loads"]);
    }

    #[test]
    fn subsequence_matches_are_found() {
        let entries = index();
        let results = finder("jsdu", &entries, 10);
        assert_eq!(results[0].0, "json.dumps");
    }

    #[test]
    fn matching_is_case_insensitive() {
        let entries = index();
        let results = finder("JSON", &entries, 10);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn non_matching_entries_are_dropped() {
        let entries = index();
        assert!(finder("zzz", &entries, 10).is_empty());
    }

    #[test]
    fn empty_index_yields_empty_results() {
        assert!(finder("json", &[], 10).is_empty());
    }

    #[test]
    fn limit_caps_the_result_count() {
        let entries: Vec<_> = (0..30)
            .map(|n| (format!("json.symbol{n}"), format!("https://docs/{n}")))
            .collect();
        assert_eq!(finder("json", &entries, 10).len(), 10);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let entries = vec![
            ("alpha.a".to_string(), "u1".to_string()),
            ("alpha.b".to_string(), "u2".to_string()),
            ("alpha.c".to_string(), "u3".to_string()),
        ];
        let names: Vec<_> = finder("alpha", &entries, 10)
            .iter()
            .map(|(name, _)| *name)
            .collect();
        assert_eq!(names, vec!["alpha.a", "alpha.b", "alpha.c"]);
    }
}
