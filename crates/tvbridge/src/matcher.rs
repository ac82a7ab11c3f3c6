use std::collections::BTreeSet;

use strsim::normalized_levenshtein;

/// Scores at or below this are treated as "no match".
pub const MIN_SCORE: u32 = 50;

/// Whole-string similarity in [0, 100], case-insensitive.
pub fn ratio(a: &str, b: &str) -> u32 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();

    (normalized_levenshtein(&a, &b) * 100.0).round() as u32
}

/// Order-insensitive token overlap similarity in [0, 100]. Tolerates word
/// reordering and subset queries, e.g. "hdmi 2" against "HDMI 2 / GAME".
pub fn token_set_ratio(a: &str, b: &str) -> u32 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();

    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();

    let common = tokens_a
        .intersection(&tokens_b)
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    let only_a = tokens_a
        .difference(&tokens_b)
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    let only_b = tokens_b
        .difference(&tokens_a)
        .copied()
        .collect::<Vec<_>>()
        .join(" ");

    let combined_a = join_tokens(&common, &only_a);
    let combined_b = join_tokens(&common, &only_b);

    ratio(&common, &combined_a)
        .max(ratio(&common, &combined_b))
        .max(ratio(&combined_a, &combined_b))
}

fn join_tokens(common: &str, rest: &str) -> String {
    match (common.is_empty(), rest.is_empty()) {
        (true, _) => rest.to_string(),
        (_, true) => common.to_string(),
        _ => format!("{common} {rest}"),
    }
}

/// Returns the candidate with the strictly highest score above [`MIN_SCORE`].
/// Equal scores never displace an earlier candidate, so ties resolve to the
/// first candidate in device-reported order.
pub fn best_match<'a, T>(
    query: &str,
    candidates: impl IntoIterator<Item = &'a T>,
    score: impl Fn(&str, &T) -> u32,
) -> Option<&'a T> {
    let mut best: Option<(&T, u32)> = None;

    for candidate in candidates {
        let score = score(query, candidate);
        if score > MIN_SCORE && best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((candidate, score));
        }
    }

    best.map(|(candidate, _)| candidate)
}
